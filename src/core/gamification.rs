//! Gamification engine - XP, levels, badges, and leaderboards.
//!
//! XP lives on the profile and only moves upward. The level is derived from
//! XP through [`level_for_xp`] and rewritten together with every XP change,
//! so the stored level always matches the formula. Badge awards are
//! idempotent: the ownership row and the one-time XP grant are paired inside
//! a single database transaction. All functions are async and return Result
//! types for error handling.

use crate::{
    entities::{Badge, BadgeOwnership, Profile, User, badge, badge_ownership, profile, user},
    errors::{Error, Result},
};
use sea_orm::{PaginatorTrait, QueryOrder, QuerySelect, Set, TransactionTrait, prelude::*};
use serde::Serialize;
use tracing::info;

/// Default number of entries returned by the leaderboard.
const DEFAULT_LEADERBOARD_SIZE: u64 = 10;

/// One row of the school leaderboard.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeaderboardEntry {
    /// 1-based position in the result
    pub rank: usize,
    /// User this entry belongs to
    pub user_id: i64,
    /// Login email
    pub email: String,
    /// Display name from the profile
    pub name: String,
    /// Accumulated experience points
    pub xp: i64,
    /// Level derived from XP
    pub level: i32,
    /// Number of badges the profile owns
    pub badge_count: u64,
}

/// Computes the level for an XP total: `floor(sqrt(xp / 100)) + 1`.
///
/// A deliberately non-linear curve - each level requires quadratically more
/// XP. Level 1 covers 0-99 XP, level 2 starts at 100, level 3 at 400,
/// level 4 at 900.
#[must_use]
pub fn level_for_xp(xp: i64) -> i32 {
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
    let tier = ((xp.max(0) as f64) / 100.0).sqrt().floor() as i32;
    tier + 1
}

/// Adds XP to a user's profile and rewrites the derived level.
///
/// `reason` is recorded in the log only; XP changes have no durable audit
/// trail of their own. The XP increment is applied as a database-level
/// `xp = xp + amount` expression and the level is recomputed from the
/// resulting total, both inside one database transaction.
///
/// # Arguments
/// * `user_id` - Owner of the profile
/// * `amount` - Positive XP to add
/// * `reason` - Why the XP was granted, for the log
pub async fn add_xp(
    db: &DatabaseConnection,
    user_id: i64,
    amount: i64,
    reason: &str,
) -> Result<profile::Model> {
    if amount <= 0 {
        return Err(Error::InvalidAmount { amount });
    }

    let txn = db.begin().await?;

    let profile = profile_for_user(&txn, user_id).await?;

    info!(user_id, amount, reason, "adding xp");

    let updated = apply_xp_atomic(&txn, profile.id, user_id, amount).await?;

    txn.commit().await?;

    Ok(updated)
}

/// Awards a badge to a user, granting the badge's XP value on first award.
///
/// Re-awarding an already-owned badge is a no-op that returns the existing
/// ownership row without a second XP grant. On first award, the ownership
/// insert and the XP grant commit together or not at all.
pub async fn award_badge(
    db: &DatabaseConnection,
    user_id: i64,
    badge_id: i64,
) -> Result<badge_ownership::Model> {
    let txn = db.begin().await?;

    let profile = profile_for_user(&txn, user_id).await?;

    let badge = Badge::find_by_id(badge_id)
        .one(&txn)
        .await?
        .ok_or(Error::BadgeNotFound { badge_id })?;

    // Already owned: return the existing row unchanged, no second XP grant
    if let Some(existing) = BadgeOwnership::find_by_id((profile.id, badge_id))
        .one(&txn)
        .await?
    {
        return Ok(existing);
    }

    let ownership = badge_ownership::ActiveModel {
        profile_id: Set(profile.id),
        badge_id: Set(badge.id),
        earned_at: Set(chrono::Utc::now()),
    };
    let result = ownership.insert(&txn).await?;

    apply_xp_atomic(&txn, profile.id, user_id, badge.xp_value).await?;

    txn.commit().await?;

    info!(user_id, badge = %badge.name, xp_value = badge.xp_value, "badge awarded");

    Ok(result)
}

/// Returns the top `limit` users of a school ordered by XP descending.
///
/// Rank is the 1-based position in the result. Ties on XP are broken
/// deterministically by user id ascending rather than left to incidental
/// store ordering. Each entry carries the display name, XP, level, and
/// owned-badge count.
pub async fn get_leaderboard(
    db: &DatabaseConnection,
    school_id: i64,
    limit: Option<u64>,
) -> Result<Vec<LeaderboardEntry>> {
    let rows = Profile::find()
        .find_also_related(User)
        .filter(user::Column::SchoolId.eq(school_id))
        .order_by_desc(profile::Column::Xp)
        .order_by_asc(profile::Column::UserId)
        .limit(limit.unwrap_or(DEFAULT_LEADERBOARD_SIZE))
        .all(db)
        .await?;

    let mut entries = Vec::with_capacity(rows.len());
    for (profile, joined_user) in rows {
        // The school filter runs on the joined user row, so it is present
        let Some(joined_user) = joined_user else {
            continue;
        };

        let badge_count = BadgeOwnership::find()
            .filter(badge_ownership::Column::ProfileId.eq(profile.id))
            .count(db)
            .await?;

        entries.push(LeaderboardEntry {
            rank: entries.len() + 1,
            user_id: joined_user.id,
            email: joined_user.email,
            name: profile.display_name(),
            xp: profile.xp,
            level: profile.level,
            badge_count,
        });
    }

    Ok(entries)
}

/// Retrieves the full badge catalog, ordered alphabetically by name.
pub async fn get_all_badges(db: &DatabaseConnection) -> Result<Vec<badge::Model>> {
    Badge::find()
        .order_by_asc(badge::Column::Name)
        .all(db)
        .await
        .map_err(Into::into)
}

/// Creates a catalog badge, validating field presence.
///
/// The name must be non-empty and unique; `xp_value` must not be negative,
/// since a negative first-award grant would pull XP backwards.
pub async fn create_badge(
    db: &DatabaseConnection,
    name: String,
    description: String,
    icon: String,
    xp_value: i64,
) -> Result<badge::Model> {
    if name.trim().is_empty() {
        return Err(Error::Config {
            message: "Badge name cannot be empty".to_string(),
        });
    }

    if xp_value < 0 {
        return Err(Error::InvalidAmount { amount: xp_value });
    }

    let badge = badge::ActiveModel {
        name: Set(name.trim().to_string()),
        description: Set(description),
        icon: Set(icon),
        xp_value: Set(xp_value),
        ..Default::default()
    };

    badge.insert(db).await.map_err(Into::into)
}

/// Looks up the profile owned by `user_id`.
async fn profile_for_user<C>(db: &C, user_id: i64) -> Result<profile::Model>
where
    C: ConnectionTrait,
{
    Profile::find()
        .filter(profile::Column::UserId.eq(user_id))
        .one(db)
        .await?
        .ok_or(Error::ProfileNotFound { user_id })
}

/// Applies an XP delta with a database-level update, then rewrites the level
/// from the resulting total.
///
/// The `xp = xp + delta` expression keeps concurrent grants from losing
/// updates; the follow-up level write reads the committed total so the
/// stored level always matches [`level_for_xp`] of the stored XP. Private:
/// all XP mutations go through [`add_xp`] or [`award_badge`].
async fn apply_xp_atomic<C>(
    db: &C,
    profile_id: i64,
    user_id: i64,
    delta: i64,
) -> Result<profile::Model>
where
    C: ConnectionTrait,
{
    use sea_orm::sea_query::Expr;

    Profile::update_many()
        .col_expr(
            profile::Column::Xp,
            Expr::col(profile::Column::Xp).add(delta),
        )
        .filter(profile::Column::Id.eq(profile_id))
        .exec(db)
        .await?;

    let profile = Profile::find_by_id(profile_id)
        .one(db)
        .await?
        .ok_or(Error::ProfileNotFound { user_id })?;

    let new_level = level_for_xp(profile.xp);
    let mut active: profile::ActiveModel = profile.into();
    active.level = Set(new_level);
    active.update(db).await.map_err(Into::into)
}
