use crate::entities::{progress_entity as progress, season_entity as seasons};
use crate::error::AppResult;
use crate::models::{ClaimRewardRequest, ClaimRewardResponse, ClaimedDays, Reward, RewardKind, RewardSchedule};
use chrono::{Duration, Utc};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait,
    IntoActiveModel, QueryFilter, QuerySelect, Set, TransactionTrait,
};
use uuid::Uuid;

pub const SEASON_LENGTH_DAYS: i32 = 30;

#[derive(Clone)]
pub struct BattlePassService {
    pool: DatabaseConnection,
}

impl BattlePassService {
    pub fn new(pool: DatabaseConnection) -> Self {
        Self { pool }
    }

    /// 获取当前激活赛季；不存在时创建默认30天赛季
    ///
    /// Returns the active season, creating the default 30-day season if none
    /// exists yet. Concurrent first calls are serialized by the partial unique
    /// index on is_active: the loser re-reads the winner's row.
    pub async fn get_or_create_active_season(&self) -> AppResult<seasons::Model> {
        if let Some(season) = Self::find_active_season(&self.pool).await? {
            return Ok(season);
        }

        let now = Utc::now();
        let new_season = seasons::ActiveModel {
            id: Set(Uuid::new_v4()),
            season_number: Set(1),
            name: Set("Season 1 - Genesis".to_string()),
            start_date: Set(now),
            end_date: Set(now + Duration::days(SEASON_LENGTH_DAYS as i64)),
            is_active: Set(true),
            rewards: Set(RewardSchedule(default_reward_schedule())),
        };

        match new_season.insert(&self.pool).await {
            Ok(season) => {
                log::info!(
                    "Created default battle pass season {} ({})",
                    season.season_number,
                    season.id
                );
                Ok(season)
            }
            Err(err) => {
                // lost the insert race; the unique index kept exactly one row
                if let Some(season) = Self::find_active_season(&self.pool).await? {
                    Ok(season)
                } else {
                    Err(err.into())
                }
            }
        }
    }

    /// Returns the user's progress in the active season, creating a fresh
    /// record (day 1, nothing claimed) on first access. Fails with NotFound
    /// when no season is active.
    pub async fn get_or_create_progress(&self, uid: i64) -> AppResult<progress::Model> {
        let season = Self::find_active_season(&self.pool)
            .await?
            .ok_or_else(|| crate::error::AppError::NotFound("No active battle pass season".to_string()))?;

        if let Some(existing) = Self::find_progress(&self.pool, uid, season.id).await? {
            return Ok(existing);
        }

        let new_progress = progress::ActiveModel {
            id: Set(Uuid::new_v4()),
            uid: Set(uid),
            season_id: Set(season.id),
            current_day: Set(1),
            claimed_days: Set(ClaimedDays::default()),
            last_claim_date: Set(None),
            created_at: Set(Utc::now()),
        };

        match new_progress.insert(&self.pool).await {
            Ok(model) => Ok(model),
            Err(err) => {
                // lost the insert race on the (uid, season_id) unique index
                if let Some(existing) = Self::find_progress(&self.pool, uid, season.id).await? {
                    Ok(existing)
                } else {
                    Err(err.into())
                }
            }
        }
    }

    /// 领取每日奖励
    ///
    /// Claim flow:
    /// 1. require an active season and an existing progress record
    /// 2. reject duplicate and future-day claims
    /// 3. look up the reward for the requested day
    /// 4. record the claim; advance the frontier when the claimed day is the
    ///    current day (capped at day 30)
    ///
    /// Rule violations come back as success=false with a reason, not as errors.
    /// The progress row is read FOR UPDATE inside the transaction, so a
    /// concurrent claim for the same day waits on the lock, re-reads the
    /// committed claim set and fails the duplicate check.
    pub async fn claim_reward(&self, request: ClaimRewardRequest) -> AppResult<ClaimRewardResponse> {
        let txn = self.pool.begin().await?;

        let Some(season) = Self::find_active_season(&txn).await? else {
            return Ok(ClaimRewardResponse::failure("No active battle pass season"));
        };

        let Some(user_progress) = progress::Entity::find()
            .filter(progress::Column::Uid.eq(request.uid))
            .filter(progress::Column::SeasonId.eq(season.id))
            .lock_exclusive()
            .one(&txn)
            .await?
        else {
            return Ok(ClaimRewardResponse::failure(
                "User not registered for battle pass",
            ));
        };

        let reward = match evaluate_claim(
            &season.rewards.0,
            &user_progress.claimed_days,
            user_progress.current_day,
            request.day,
        ) {
            Ok(reward) => reward.clone(),
            Err(reason) => return Ok(ClaimRewardResponse::failure(reason)),
        };

        let mut claimed = user_progress.claimed_days.clone();
        claimed.0.push(request.day);
        let new_day = advance_day(user_progress.current_day, request.day);

        let mut am = user_progress.into_active_model();
        am.claimed_days = Set(claimed);
        am.current_day = Set(new_day);
        am.last_claim_date = Set(Some(Utc::now()));
        am.update(&txn).await?;

        txn.commit().await?;

        log::info!("uid {} claimed day {} reward", request.uid, request.day);

        Ok(ClaimRewardResponse {
            success: true,
            message: format!("Successfully claimed {}!", reward.item_name),
            reward: Some(reward),
            new_day: Some(new_day),
        })
    }

    async fn find_active_season<C: ConnectionTrait>(conn: &C) -> AppResult<Option<seasons::Model>> {
        let season = seasons::Entity::find()
            .filter(seasons::Column::IsActive.eq(true))
            .one(conn)
            .await?;
        Ok(season)
    }

    async fn find_progress<C: ConnectionTrait>(
        conn: &C,
        uid: i64,
        season_id: Uuid,
    ) -> AppResult<Option<progress::Model>> {
        let model = progress::Entity::find()
            .filter(progress::Column::Uid.eq(uid))
            .filter(progress::Column::SeasonId.eq(season_id))
            .one(conn)
            .await?;
        Ok(model)
    }
}

/// Reward for a single day of the default schedule. Weekly days pay cash,
/// every fifth day pays points, the rest are generic items.
fn reward_for_day(day: i32) -> Reward {
    let (item_type, reward_value, icon, description) = if day % 7 == 0 {
        let value = i64::from(day) * 10;
        (
            RewardKind::Cash,
            value,
            "💰".to_string(),
            format!("Weekly Bonus: {value} Cash"),
        )
    } else if day % 5 == 0 {
        let value = i64::from(day) * 15;
        (
            RewardKind::Points,
            value,
            "⭐".to_string(),
            format!("Bonus Points: {value} Points"),
        )
    } else {
        (
            RewardKind::Item,
            1,
            "🎁".to_string(),
            "Daily Reward Item".to_string(),
        )
    };

    Reward {
        id: Uuid::new_v4(),
        day,
        item_name: format!("Day {day} Reward"),
        item_type,
        reward_value,
        icon,
        description,
    }
}

pub fn default_reward_schedule() -> Vec<Reward> {
    (1..=SEASON_LENGTH_DAYS).map(reward_for_day).collect()
}

/// Checks the claim rules in order and returns the first violation, or the
/// matching reward. No lower bound on `day`: a non-positive day passes the
/// frontier check and fails reward lookup instead.
fn evaluate_claim<'a>(
    rewards: &'a [Reward],
    claimed_days: &ClaimedDays,
    current_day: i32,
    day: i32,
) -> Result<&'a Reward, &'static str> {
    if claimed_days.contains(day) {
        return Err("Reward already claimed for this day");
    }
    if day > current_day {
        return Err("Cannot claim future rewards");
    }
    rewards
        .iter()
        .find(|r| r.day == day)
        .ok_or("No reward found for this day")
}

/// Claiming exactly the frontier day unlocks the next one; backfilled claims
/// leave the frontier alone. Never advances past day 30.
fn advance_day(current_day: i32, claimed_day: i32) -> i32 {
    if claimed_day == current_day && current_day < SEASON_LENGTH_DAYS {
        current_day + 1
    } else {
        current_day
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn claim(
        rewards: &[Reward],
        claimed: &mut ClaimedDays,
        current_day: &mut i32,
        day: i32,
    ) -> Result<Reward, &'static str> {
        let reward = evaluate_claim(rewards, claimed, *current_day, day)?.clone();
        claimed.0.push(day);
        *current_day = advance_day(*current_day, day);
        Ok(reward)
    }

    #[test]
    fn test_schedule_covers_thirty_days() {
        let schedule = default_reward_schedule();
        assert_eq!(schedule.len(), 30);
        for (i, reward) in schedule.iter().enumerate() {
            assert_eq!(reward.day, i as i32 + 1);
            assert_eq!(reward.item_name, format!("Day {} Reward", i + 1));
        }
    }

    #[test]
    fn test_reward_rule_table() {
        let schedule = default_reward_schedule();
        let by_day = |d: i32| schedule.iter().find(|r| r.day == d).unwrap();

        assert_eq!(by_day(7).item_type, RewardKind::Cash);
        assert_eq!(by_day(7).reward_value, 70);
        assert_eq!(by_day(14).item_type, RewardKind::Cash);
        assert_eq!(by_day(14).reward_value, 140);

        assert_eq!(by_day(5).item_type, RewardKind::Points);
        assert_eq!(by_day(5).reward_value, 75);
        // 10 is not a multiple of 7, so the points rule wins
        assert_eq!(by_day(10).item_type, RewardKind::Points);
        assert_eq!(by_day(10).reward_value, 150);
        assert_eq!(by_day(30).item_type, RewardKind::Points);
        assert_eq!(by_day(30).reward_value, 450);

        assert_eq!(by_day(1).item_type, RewardKind::Item);
        assert_eq!(by_day(3).item_type, RewardKind::Item);
        assert_eq!(by_day(3).reward_value, 1);
    }

    #[test]
    fn test_double_claim_rejected() {
        let schedule = default_reward_schedule();
        let claimed = ClaimedDays(vec![1]);
        let err = evaluate_claim(&schedule, &claimed, 2, 1).unwrap_err();
        assert_eq!(err, "Reward already claimed for this day");
    }

    #[test]
    fn test_future_claim_rejected() {
        let schedule = default_reward_schedule();
        let claimed = ClaimedDays::default();
        let err = evaluate_claim(&schedule, &claimed, 3, 5).unwrap_err();
        assert_eq!(err, "Cannot claim future rewards");
    }

    #[test]
    fn test_frontier_claim_advances() {
        let schedule = default_reward_schedule();
        let mut claimed = ClaimedDays::default();
        let mut current_day = 1;

        let reward = claim(&schedule, &mut claimed, &mut current_day, 1).unwrap();
        assert_eq!(reward.day, 1);
        assert_eq!(current_day, 2);
        assert_eq!(claimed.0, vec![1]);
    }

    #[test]
    fn test_backfill_claim_does_not_advance() {
        let schedule = default_reward_schedule();
        let mut claimed = ClaimedDays(vec![1, 3]);
        let mut current_day = 4;

        claim(&schedule, &mut claimed, &mut current_day, 2).unwrap();
        assert_eq!(current_day, 4);
    }

    #[test]
    fn test_claim_at_cap_stays_at_thirty() {
        let schedule = default_reward_schedule();
        let mut claimed = ClaimedDays((1..30).collect());
        let mut current_day = 30;

        claim(&schedule, &mut claimed, &mut current_day, 30).unwrap();
        assert_eq!(current_day, 30);
        assert_eq!(claimed.0.len(), 30);
    }

    #[test]
    fn test_competing_claim_rejected_after_reread() {
        // two claims race for the same day; the loser of the row lock re-reads
        // the winner's committed state and must fail the duplicate check
        let schedule = default_reward_schedule();
        let mut claimed = ClaimedDays(vec![1]);
        let mut current_day = 2;

        // both claims would pass against the stale snapshot
        assert!(evaluate_claim(&schedule, &claimed, current_day, 2).is_ok());

        claim(&schedule, &mut claimed, &mut current_day, 2).unwrap();
        assert_eq!(current_day, 3);

        // refreshed state: the second claim is now a duplicate
        let err = evaluate_claim(&schedule, &claimed, current_day, 2).unwrap_err();
        assert_eq!(err, "Reward already claimed for this day");
        assert_eq!(claimed.0, vec![1, 2]);
    }

    #[test]
    fn test_out_of_range_day_has_no_reward() {
        let schedule = default_reward_schedule();
        let claimed = ClaimedDays::default();

        // no lower-bound check: these pass the frontier test, then miss lookup
        assert_eq!(
            evaluate_claim(&schedule, &claimed, 5, 0).unwrap_err(),
            "No reward found for this day"
        );
        assert_eq!(
            evaluate_claim(&schedule, &claimed, 5, -3).unwrap_err(),
            "No reward found for this day"
        );
    }

    #[test]
    fn test_fresh_progress_claim_sequence() {
        let schedule = default_reward_schedule();
        let mut claimed = ClaimedDays::default();
        let mut current_day = 1;

        let reward = claim(&schedule, &mut claimed, &mut current_day, 1).unwrap();
        assert_eq!(reward.item_name, "Day 1 Reward");
        assert_eq!(current_day, 2);

        let err = claim(&schedule, &mut claimed, &mut current_day, 1).unwrap_err();
        assert_eq!(err, "Reward already claimed for this day");

        claim(&schedule, &mut claimed, &mut current_day, 2).unwrap();
        assert_eq!(current_day, 3);

        let err = claim(&schedule, &mut claimed, &mut current_day, 5).unwrap_err();
        assert_eq!(err, "Cannot claim future rewards");
        assert_eq!(claimed.0, vec![1, 2]);
    }
}
