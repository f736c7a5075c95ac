//! Identifier types for Starpost.
//!
//! Account ids are opaque strings handed to us by the chat-platform host;
//! content and transaction ids are ULIDs so they sort by creation time.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use ulid::Ulid;

/// Maximum accepted length of an account id, in bytes.
pub const MAX_ACCOUNT_ID_BYTES: usize = 128;

/// An account identifier.
///
/// The host platform assigns these; the ledger treats them as opaque keys.
/// An id must be non-empty, at most [`MAX_ACCOUNT_ID_BYTES`] bytes, and free
/// of interior NUL bytes (ids are used as length-delimited index-key
/// prefixes in the store).
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct AccountId(String);

impl AccountId {
    /// Generate a random account id (primarily for testing).
    #[must_use]
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    /// Return the id as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Return the raw bytes of the id.
    #[must_use]
    pub fn as_bytes(&self) -> &[u8] {
        self.0.as_bytes()
    }
}

impl FromStr for AccountId {
    type Err = IdError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(IdError::EmptyAccountId);
        }
        if s.len() > MAX_ACCOUNT_ID_BYTES {
            return Err(IdError::AccountIdTooLong { length: s.len() });
        }
        if s.bytes().any(|b| b == 0) {
            return Err(IdError::AccountIdContainsNul);
        }
        Ok(Self(s.to_string()))
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.0)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl TryFrom<String> for AccountId {
    type Error = IdError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<AccountId> for String {
    fn from(id: AccountId) -> Self {
        id.0
    }
}

impl AsRef<str> for AccountId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Macro to define a ULID-based identifier type with standard trait
/// implementations.
///
/// Generates a newtype wrapper around [`ulid::Ulid`] with `Clone`, `Copy`,
/// `PartialEq`, `Eq`, `Hash`, `Ord`, string serde, `FromStr`, `Display`,
/// `Debug`, and byte conversions. ULIDs embed a millisecond timestamp, so
/// ids of the same type sort by creation time.
macro_rules! ulid_id_type {
    ($name:ident, $doc:expr) => {
        #[doc = $doc]
        #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
        #[serde(try_from = "String", into = "String")]
        pub struct $name(Ulid);

        impl $name {
            /// Create an identifier from a ULID.
            #[must_use]
            pub const fn from_ulid(ulid: Ulid) -> Self {
                Self(ulid)
            }

            /// Generate a new identifier with the current timestamp.
            #[must_use]
            pub fn generate() -> Self {
                Self(Ulid::new())
            }

            /// Return the underlying ULID.
            #[must_use]
            pub const fn as_ulid(&self) -> &Ulid {
                &self.0
            }

            /// Return the bytes of the ULID (16 bytes).
            #[must_use]
            pub fn to_bytes(&self) -> [u8; 16] {
                self.0.to_bytes()
            }

            /// Create an identifier from raw ULID bytes.
            #[must_use]
            pub fn from_bytes(bytes: [u8; 16]) -> Self {
                Self(Ulid::from_bytes(bytes))
            }
        }

        impl FromStr for $name {
            type Err = IdError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let ulid = Ulid::from_string(s).map_err(|_| IdError::InvalidUlid)?;
                Ok(Self(ulid))
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl TryFrom<String> for $name {
            type Error = IdError;

            fn try_from(value: String) -> Result<Self, Self::Error> {
                value.parse()
            }
        }

        impl From<$name> for String {
            fn from(id: $name) -> Self {
                id.0.to_string()
            }
        }
    };
}

ulid_id_type!(
    ContentId,
    "A content item identifier (post or story).\n\nULID-based, so ids order by creation time and \"most recent item by owner\" is a deterministic index lookup."
);
ulid_id_type!(
    TransactionId,
    "A star transaction identifier.\n\nULID-based for natural chronological ordering of ledger history."
);

/// Errors that can occur when parsing identifiers.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdError {
    /// The account id is empty.
    #[error("account id must not be empty")]
    EmptyAccountId,

    /// The account id exceeds [`MAX_ACCOUNT_ID_BYTES`].
    #[error("account id too long: {length} bytes (max {MAX_ACCOUNT_ID_BYTES})")]
    AccountIdTooLong {
        /// Length of the rejected id in bytes.
        length: usize,
    },

    /// The account id contains a NUL byte.
    #[error("account id must not contain NUL bytes")]
    AccountIdContainsNul,

    /// The input is not a valid ULID.
    #[error("invalid ULID format")]
    InvalidUlid,
}
