// src/repository/component_permission_repository.rs
use crate::domain::component_permission_model::{
    self, ActiveModel as PermissionActiveModel, Entity as ComponentPermissions,
};
use crate::domain::role::Role;
use sea_orm::{entity::*, query::*, DbConn, DbErr, Set};

pub struct ComponentPermissionRepository {
    db: DbConn,
}

impl ComponentPermissionRepository {
    pub fn new(db: DbConn) -> Self {
        Self { db }
    }

    pub async fn find_all(&self) -> Result<Vec<component_permission_model::Model>, DbErr> {
        ComponentPermissions::find()
            .order_by_asc(component_permission_model::Column::Component)
            .all(&self.db)
            .await
    }

    pub async fn find_by_component(
        &self,
        component: &str,
    ) -> Result<Option<component_permission_model::Model>, DbErr> {
        ComponentPermissions::find()
            .filter(component_permission_model::Column::Component.eq(component))
            .one(&self.db)
            .await
    }

    pub async fn upsert(
        &self,
        component: &str,
        role: Role,
    ) -> Result<component_permission_model::Model, DbErr> {
        let existing = self.find_by_component(component).await?;

        match existing {
            Some(row) => {
                let mut active: PermissionActiveModel = row.into();
                active.role = Set(role.as_str().to_string());
                active.update(&self.db).await
            }
            None => {
                let row = PermissionActiveModel {
                    component: Set(component.to_string()),
                    role: Set(role.as_str().to_string()),
                    ..PermissionActiveModel::new()
                };
                row.insert(&self.db).await
            }
        }
    }
}
