use sea_orm::entity::prelude::*;

/// Role of a site member.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(16))")]
pub enum Role {
    #[sea_orm(string_value = "User")]
    User,
    #[sea_orm(string_value = "Bot")]
    Bot,
    #[sea_orm(string_value = "Moderator")]
    Moderator,
    #[sea_orm(string_value = "Administrator")]
    Administrator,
}

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "kigg_user")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub user_name: String,
    /// Not unique, OpenID accounts may share the default address
    pub email: String,
    /// Argon2 PHC string, `None` for accounts that sign in through OpenID
    pub password: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub is_locked_out: bool,
    pub last_activity_at: DateTime,
    pub created_at: DateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::user_ip_address::Entity")]
    UserIpAddress,
}

impl Related<super::user_ip_address::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserIpAddress.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
