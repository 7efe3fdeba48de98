use crate::entities::{season_entity, progress_entity};
use chrono::{DateTime, Utc};
use sea_orm::FromJsonQueryResult;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum RewardKind {
    Points,
    Cash,
    Item,
}

impl std::fmt::Display for RewardKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RewardKind::Points => write!(f, "points"),
            RewardKind::Cash => write!(f, "cash"),
            RewardKind::Item => write!(f, "item"),
        }
    }
}

/// One day's grant inside a season. Lives embedded in the season's
/// rewards column; has no identity outside it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
pub struct Reward {
    pub id: Uuid,
    pub day: i32,
    pub item_name: String,
    pub item_type: RewardKind,
    pub reward_value: i64,
    pub icon: String,
    pub description: String,
}

/// Ordered reward list, stored as a JSON column on the season row.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, FromJsonQueryResult)]
pub struct RewardSchedule(pub Vec<Reward>);

/// Set of claimed day numbers, stored as a JSON column on the progress row.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq, FromJsonQueryResult)]
pub struct ClaimedDays(pub Vec<i32>);

impl ClaimedDays {
    pub fn contains(&self, day: i32) -> bool {
        self.0.contains(&day)
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SeasonResponse {
    pub id: Uuid,
    pub season_number: i32,
    pub name: String,
    pub start_date: DateTime<Utc>,
    pub end_date: DateTime<Utc>,
    pub is_active: bool,
    pub rewards: Vec<Reward>,
}

impl From<season_entity::Model> for SeasonResponse {
    fn from(model: season_entity::Model) -> Self {
        Self {
            id: model.id,
            season_number: model.season_number,
            name: model.name,
            start_date: model.start_date,
            end_date: model.end_date,
            is_active: model.is_active,
            rewards: model.rewards.0,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct UserProgressResponse {
    pub id: Uuid,
    pub uid: i64,
    pub season_id: Uuid,
    pub current_day: i32,
    pub claimed_days: Vec<i32>,
    pub last_claim_date: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl From<progress_entity::Model> for UserProgressResponse {
    fn from(model: progress_entity::Model) -> Self {
        Self {
            id: model.id,
            uid: model.uid,
            season_id: model.season_id,
            current_day: model.current_day,
            claimed_days: model.claimed_days.0,
            last_claim_date: model.last_claim_date,
            created_at: model.created_at,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClaimRewardRequest {
    pub uid: i64,
    pub day: i32,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ClaimRewardResponse {
    pub success: bool,
    pub message: String,
    pub reward: Option<Reward>,
    pub new_day: Option<i32>,
}

impl ClaimRewardResponse {
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            reward: None,
            new_day: None,
        }
    }
}
