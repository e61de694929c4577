use sea_orm::entity::prelude::*;

/// The role an account signs in as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(1))")]
pub enum AccountRole {
    /// A student's guardian.
    #[sea_orm(string_value = "P")]
    Parent,
    /// A tutor teaching courses.
    #[sea_orm(string_value = "T")]
    Tutor,
}

impl AccountRole {
    /// The single-letter flag used on the wire and in storage.
    pub fn code(&self) -> &'static str {
        match self {
            AccountRole::Parent => "P",
            AccountRole::Tutor => "T",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "P" => Some(AccountRole::Parent),
            "T" => Some(AccountRole::Tutor),
            _ => None,
        }
    }
}

/// A login identity. Tutors get a matching row in `tutors`.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "accounts")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i32,
    #[sea_orm(unique)]
    pub email: String,
    /// Argon2 PHC string, never the raw password.
    pub password_hash: String,
    pub fname: String,
    pub lname: String,
    pub role: AccountRole,
    pub phone: Option<String>,
    pub line: Option<String>,
    pub facebook: Option<String>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_one = "super::tutor::Entity")]
    Tutor,
    /// Students registered by this (parent) account.
    #[sea_orm(has_many = "super::student::Entity")]
    Student,
}

impl Related<super::tutor::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutor.def()
    }
}

impl Related<super::student::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
