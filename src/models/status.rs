use crate::entities::status_check_entity;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusCheckCreate {
    pub client_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StatusCheckResponse {
    pub id: Uuid,
    pub client_name: String,
    pub timestamp: DateTime<Utc>,
}

impl From<status_check_entity::Model> for StatusCheckResponse {
    fn from(model: status_check_entity::Model) -> Self {
        Self {
            id: model.id,
            client_name: model.client_name,
            timestamp: model.timestamp,
        }
    }
}
