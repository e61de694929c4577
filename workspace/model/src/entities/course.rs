use sea_orm::entity::prelude::*;

/// A course offered by a tutor, billed per hour.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "courses")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub tutor_id: i32,
    pub name_thai: String,
    pub name_english: Option<String>,
    #[sea_orm(column_type = "Decimal(Some((10, 2)))")]
    pub price_per_hour: Decimal,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::tutor::Entity",
        from = "Column::TutorId",
        to = "super::tutor::Column::Id"
    )]
    Tutor,
    #[sea_orm(has_many = "super::enrollment::Entity")]
    Enrollment,
}

impl Related<super::tutor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutor.def()
    }
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
