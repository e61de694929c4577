use sea_orm::entity::prelude::*;

/// A single scheduled or delivered lesson.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "class_sessions")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    pub enrollment_id: i32,
    pub session_date: Date,
    pub start_time: Time,
    pub end_time: Time,
    pub lesson: Option<String>,
    pub note: Option<String>,
    /// Set once the session has been put on a bill.
    pub payment_id: Option<i32>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::enrollment::Entity",
        from = "Column::EnrollmentId",
        to = "super::enrollment::Column::Id"
    )]
    Enrollment,
    #[sea_orm(
        belongs_to = "super::payment::Entity",
        from = "Column::PaymentId",
        to = "super::payment::Column::Id"
    )]
    Payment,
}

impl Related<super::enrollment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Enrollment.def()
    }
}

impl Related<super::payment::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payment.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    /// Length of the session in hours, rounded to two decimals.
    /// A session whose end is not after its start counts as zero hours.
    pub fn hours(&self) -> Decimal {
        let minutes = (self.end_time - self.start_time).num_minutes();
        if minutes <= 0 {
            return Decimal::ZERO;
        }
        (Decimal::from(minutes) / Decimal::from(60)).round_dp(2)
    }
}
