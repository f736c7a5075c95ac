//! Premium entitlement types.
//!
//! An entitlement is a time-boxed upgrade bought with stars. The stored
//! record is small; `active` and the video-duration cap are derived. Expiry
//! is never swept by a background job: a lapsed record is healed to inactive
//! on the next status read.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Length of the one-time trial, in days.
pub const TRIAL_DAYS: i64 = 7;

/// Length of a purchased entitlement, in days.
pub const PURCHASE_DAYS: i64 = 30;

/// Standard tier price in stars.
pub const STANDARD_PRICE_STARS: i64 = 120;

/// Blogger tier price in stars.
pub const BLOGGER_PRICE_STARS: i64 = 180;

/// Standard tier per-post video cap, in seconds.
pub const STANDARD_MAX_VIDEO_SECONDS: u32 = 300;

/// Blogger tier per-post video cap, in seconds.
pub const BLOGGER_MAX_VIDEO_SECONDS: u32 = 1080;

/// Premium tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    /// Standard premium: 5-minute videos.
    Standard,

    /// Blogger premium: 18-minute videos.
    Blogger,
}

impl Tier {
    /// Canonical purchase price in stars.
    ///
    /// Purchases supplying any other amount are rejected; the price is not
    /// client-controlled.
    #[must_use]
    pub const fn price_stars(self) -> i64 {
        match self {
            Self::Standard => STANDARD_PRICE_STARS,
            Self::Blogger => BLOGGER_PRICE_STARS,
        }
    }

    /// Per-post video duration cap granted by this tier, in seconds.
    #[must_use]
    pub const fn max_video_seconds(self) -> u32 {
        match self {
            Self::Standard => STANDARD_MAX_VIDEO_SECONDS,
            Self::Blogger => BLOGGER_MAX_VIDEO_SECONDS,
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Standard => write!(f, "standard"),
            Self::Blogger => write!(f, "blogger"),
        }
    }
}

/// A premium entitlement owned by one account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Entitlement {
    /// Whether the entitlement is currently in force.
    ///
    /// Kept consistent with `expires_at` by the read path: a record whose
    /// expiry has passed is persisted back as inactive on the next read.
    pub active: bool,

    /// The granted tier. Retained after lapse for display.
    pub tier: Tier,

    /// When the entitlement lapses. `None` once it has been healed to
    /// inactive.
    pub expires_at: Option<DateTime<Utc>>,

    /// True only for the one-time lazily granted trial.
    pub is_trial: bool,
}

impl Entitlement {
    /// The one-time trial: 7 days of standard tier.
    #[must_use]
    pub fn trial(now: DateTime<Utc>) -> Self {
        Self {
            active: true,
            tier: Tier::Standard,
            expires_at: Some(now + Duration::days(TRIAL_DAYS)),
            is_trial: true,
        }
    }

    /// A purchased entitlement: 30 days of the given tier.
    ///
    /// A purchase fully replaces any prior record; remaining time does not
    /// stack.
    #[must_use]
    pub fn purchased(tier: Tier, now: DateTime<Utc>) -> Self {
        Self {
            active: true,
            tier,
            expires_at: Some(now + Duration::days(PURCHASE_DAYS)),
            is_trial: false,
        }
    }

    /// The record this entitlement becomes once its expiry has passed.
    #[must_use]
    pub fn lapsed(&self) -> Self {
        Self {
            active: false,
            tier: self.tier,
            expires_at: None,
            is_trial: false,
        }
    }

    /// Whether the entitlement is in force at `now`.
    #[must_use]
    pub fn is_current(&self, now: DateTime<Utc>) -> bool {
        self.active && self.expires_at.is_some_and(|t| t > now)
    }

    /// Per-post video duration cap, derived from the tier.
    #[must_use]
    pub const fn max_video_seconds(&self) -> u32 {
        self.tier.max_video_seconds()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_prices() {
        assert_eq!(Tier::Standard.price_stars(), 120);
        assert_eq!(Tier::Blogger.price_stars(), 180);
    }

    #[test]
    fn tier_video_caps() {
        assert_eq!(Tier::Standard.max_video_seconds(), 300);
        assert_eq!(Tier::Blogger.max_video_seconds(), 1080);
    }

    #[test]
    fn trial_is_seven_days_standard() {
        let now = Utc::now();
        let trial = Entitlement::trial(now);
        assert!(trial.active);
        assert!(trial.is_trial);
        assert_eq!(trial.tier, Tier::Standard);
        assert_eq!(trial.expires_at, Some(now + Duration::days(7)));
        assert!(trial.is_current(now));
    }

    #[test]
    fn purchase_is_thirty_days() {
        let now = Utc::now();
        let ent = Entitlement::purchased(Tier::Blogger, now);
        assert_eq!(ent.expires_at, Some(now + Duration::days(30)));
        assert!(!ent.is_trial);
        assert_eq!(ent.max_video_seconds(), 1080);
    }

    #[test]
    fn lapse_clears_expiry_and_trial_flag() {
        let now = Utc::now();
        let lapsed = Entitlement::trial(now).lapsed();
        assert!(!lapsed.active);
        assert_eq!(lapsed.expires_at, None);
        assert!(!lapsed.is_trial);
        assert!(!lapsed.is_current(now));
    }

    #[test]
    fn expired_record_is_not_current() {
        let now = Utc::now();
        let mut ent = Entitlement::purchased(Tier::Standard, now);
        ent.expires_at = Some(now - Duration::seconds(1));
        assert!(!ent.is_current(now));
    }
}
