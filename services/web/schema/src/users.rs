use sea_orm::entity::prelude::*;

/// User account row. One table for both login variants; `auth_type` is the
/// discriminator (`email` | `google`) and `google_id` is set only for
/// OAuth-created accounts.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    #[sea_orm(unique, nullable)]
    pub google_id: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub name: String,
    #[sea_orm(nullable)]
    pub profile_picture: Option<String>,
    pub points: i32,
    pub total_study_time: i64,
    pub auth_type: String,
    pub email_verified: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::study_sessions::Entity")]
    StudySessions,
}

impl Related<super::study_sessions::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::StudySessions.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
