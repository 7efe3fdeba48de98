use crate::entities::status_check_entity as status_checks;
use crate::error::AppResult;
use crate::models::StatusCheckCreate;
use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, QueryOrder, QuerySelect, Set};
use uuid::Uuid;

/// Most records returned by a single listing call.
const STATUS_CHECK_LIST_LIMIT: u64 = 1000;

#[derive(Clone)]
pub struct StatusService {
    pool: DatabaseConnection,
}

impl StatusService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    pub async fn create_status_check(
        &self,
        input: StatusCheckCreate,
    ) -> AppResult<status_checks::Model> {
        let model = status_checks::ActiveModel {
            id: Set(Uuid::new_v4()),
            client_name: Set(input.client_name),
            timestamp: Set(Utc::now()),
        }
        .insert(&self.pool)
        .await?;

        Ok(model)
    }

    pub async fn list_status_checks(&self) -> AppResult<Vec<status_checks::Model>> {
        let records = status_checks::Entity::find()
            .order_by_asc(status_checks::Column::Timestamp)
            .limit(STATUS_CHECK_LIST_LIMIT)
            .all(&self.pool)
            .await?;

        Ok(records)
    }
}
