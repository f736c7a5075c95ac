//! Content items and promotion (pin) semantics.
//!
//! The ledger only needs a narrow view of content: who owns it, what kind it
//! is, how many stars it has received, and until when it is pinned. Pin
//! state is always derived from `pinned_until` at evaluation time, never
//! cached as a boolean.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Reverse;
use std::fmt;

use crate::ids::{AccountId, ContentId};

/// Minimum pin duration in hours.
pub const MIN_PIN_HOURS: i64 = 1;

/// Maximum pin duration in hours.
pub const MAX_PIN_HOURS: i64 = 24;

/// Hourly pin rate for stories, in stars.
pub const STORY_PIN_RATE_STARS: i64 = 300;

/// Hourly pin rate for posts, in stars.
pub const POST_PIN_RATE_STARS: i64 = 200;

/// The kind of a content item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentKind {
    /// A feed post.
    Post,

    /// A story.
    Story,
}

impl ContentKind {
    /// Hourly pin rate for this kind, in stars.
    #[must_use]
    pub const fn pin_hourly_rate(self) -> i64 {
        match self {
            Self::Post => POST_PIN_RATE_STARS,
            Self::Story => STORY_PIN_RATE_STARS,
        }
    }

    /// Single-byte tag used in store index keys.
    #[must_use]
    pub const fn as_byte(self) -> u8 {
        match self {
            Self::Post => 0,
            Self::Story => 1,
        }
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Post => write!(f, "post"),
            Self::Story => write!(f, "story"),
        }
    }
}

/// Clamp a requested pin duration to the allowed range.
#[must_use]
pub const fn clamp_pin_hours(hours: i64) -> i64 {
    if hours < MIN_PIN_HOURS {
        MIN_PIN_HOURS
    } else if hours > MAX_PIN_HOURS {
        MAX_PIN_HOURS
    } else {
        hours
    }
}

/// Price of pinning a content item of `kind` for `hours` (already clamped).
#[must_use]
pub const fn pin_price(kind: ContentKind, hours: i64) -> i64 {
    kind.pin_hourly_rate() * hours
}

/// A content item as the ledger sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentItem {
    /// Content id (ULID, creation-time ordered).
    pub id: ContentId,

    /// The owning account.
    pub owner: AccountId,

    /// Post or story.
    pub kind: ContentKind,

    /// Caption text.
    pub caption: String,

    /// Stars gifted to this item.
    pub star_count: i64,

    /// Promotion expiry. The item is pinned iff this is in the future.
    pub pinned_until: Option<DateTime<Utc>>,

    /// When the item was created.
    pub created_at: DateTime<Utc>,
}

impl ContentItem {
    /// Create a new, unpinned content item.
    #[must_use]
    pub fn new(owner: AccountId, kind: ContentKind, caption: String) -> Self {
        Self {
            id: ContentId::generate(),
            owner,
            kind,
            caption,
            star_count: 0,
            pinned_until: None,
            created_at: Utc::now(),
        }
    }

    /// Whether the item is pinned at `now`.
    #[must_use]
    pub fn is_pinned(&self, now: DateTime<Utc>) -> bool {
        self.pinned_until.is_some_and(|t| t > now)
    }

    /// The pin expiry for a promotion of `hours` starting at `now`.
    #[must_use]
    pub fn pin_expiry(now: DateTime<Utc>, hours: i64) -> DateTime<Utc> {
        now + Duration::hours(hours)
    }
}

/// Order a listing for display: currently pinned items first, then newest
/// first within each group.
pub fn feed_order(items: &mut [ContentItem], now: DateTime<Utc>) {
    items.sort_by_key(|item| (!item.is_pinned(now), Reverse(item.created_at)));
}
