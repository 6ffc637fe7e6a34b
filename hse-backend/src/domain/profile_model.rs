// src/domain/profile_model.rs
use super::role::Role;
use chrono::{DateTime, Utc};
use sea_orm::entity::prelude::*;
use sea_orm::{ConnectionTrait, DbErr, Set};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel, Serialize, Deserialize)]
#[sea_orm(table_name = "profiles")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,

    #[sea_orm(unique)]
    pub email: String,

    pub full_name: String,

    #[serde(skip_serializing)] // never serialize the password hash
    pub password_hash: String,

    pub role: String,

    #[sea_orm(nullable)]
    pub banned_until: Option<DateTime<Utc>>,

    pub created_at: DateTime<Utc>,

    pub updated_at: DateTime<Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        has_many = "super::objective_model::Entity",
        from = "Column::Id",
        to = "super::objective_model::Column::OwnerId"
    )]
    Objectives,

    #[sea_orm(
        has_many = "super::daily_work_model::Entity",
        from = "Column::Id",
        to = "super::daily_work_model::Column::UserId"
    )]
    DailyWork,

    #[sea_orm(
        has_many = "super::action_item_model::Entity",
        from = "Column::Id",
        to = "super::action_item_model::Column::AssignedTo"
    )]
    ActionItems,
}

impl Related<super::objective_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Objectives.def()
    }
}

impl Related<super::daily_work_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::DailyWork.def()
    }
}

impl Related<super::action_item_model::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ActionItems.def()
    }
}

#[async_trait::async_trait]
impl ActiveModelBehavior for ActiveModel {
    fn new() -> Self {
        Self {
            id: Set(Uuid::new_v4()),
            role: Set(Role::User.as_str().to_string()),
            created_at: Set(Utc::now()),
            updated_at: Set(Utc::now()),
            ..ActiveModelTrait::default()
        }
    }

    async fn before_save<C>(mut self, _db: &C, insert: bool) -> Result<Self, DbErr>
    where
        C: ConnectionTrait,
    {
        if !insert {
            self.updated_at = Set(Utc::now());
        }
        Ok(self)
    }
}

impl Model {
    /// Parsed role; unknown strings in the database fall back to `user`.
    pub fn role(&self) -> Role {
        Role::from_str(&self.role).unwrap_or_default()
    }

    /// Sign-in is refused while a ban is in the future.
    pub fn is_banned(&self, now: DateTime<Utc>) -> bool {
        matches!(self.banned_until, Some(until) if until > now)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn profile(role: &str, banned_until: Option<DateTime<Utc>>) -> Model {
        Model {
            id: Uuid::new_v4(),
            email: "worker@example.com".to_string(),
            full_name: "Site Worker".to_string(),
            password_hash: "hash".to_string(),
            role: role.to_string(),
            banned_until,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_role_parsing_with_fallback() {
        assert_eq!(profile("superadmin", None).role(), Role::Superadmin);
        assert_eq!(profile("admin", None).role(), Role::Admin);
        assert_eq!(profile("garbage", None).role(), Role::User);
    }

    #[test]
    fn test_ban_check() {
        let now = Utc::now();
        assert!(!profile("user", None).is_banned(now));
        assert!(profile("user", Some(now + Duration::hours(1))).is_banned(now));
        assert!(!profile("user", Some(now - Duration::hours(1))).is_banned(now));
    }

    #[test]
    fn test_password_hash_not_serialized() {
        let value = serde_json::to_value(profile("user", None)).unwrap();
        assert!(value.get("password_hash").is_none());
        assert!(value.get("email").is_some());
    }
}
