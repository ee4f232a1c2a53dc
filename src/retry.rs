//! Retry options for pushed jobs.
//!
//! Sidekiq's `retry` worker option is either a boolean (retry with the server's
//! default attempt count, or never retry) or an explicit number of attempts.
//! On the command line the value arrives as a plain string, so this module also
//! provides the casting rule that turns such a string into a retry value.
//!
//! # Examples
//!
//! ```rust
//! use sidekiq_push::retry::{cast_retry_option, RetryCast, RetryOption};
//!
//! assert_eq!(cast_retry_option("yes"), RetryCast::Boolean(true));
//! assert_eq!(cast_retry_option("0"), RetryCast::Boolean(false));
//! assert_eq!(cast_retry_option("25"), RetryCast::Integer(25));
//! assert_eq!(cast_retry_option("sometimes"), RetryCast::Unrecognized);
//!
//! assert_eq!(cast_retry_option("25").into_option(), Some(RetryOption::Attempts(25)));
//! assert_eq!(cast_retry_option("sometimes").into_option(), None);
//! ```

use serde::{Deserialize, Serialize};
use std::{convert::Infallible, fmt, str::FromStr};

/// A resolved retry setting for a job.
///
/// Serialized untagged, so it appears on the wire (and in TOML) as a bare
/// boolean or integer, exactly as Sidekiq expects it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RetryOption {
    /// `true` retries with the server default, `false` disables retries.
    Enabled(bool),
    /// Retry up to this many times.
    Attempts(u64),
}

impl fmt::Display for RetryOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RetryOption::Enabled(enabled) => write!(f, "{}", enabled),
            RetryOption::Attempts(attempts) => write!(f, "{}", attempts),
        }
    }
}

/// Result of casting a raw retry string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RetryCast {
    Boolean(bool),
    Integer(u64),
    /// The string was neither a recognised boolean nor a decimal integer.
    Unrecognized,
}

impl RetryCast {
    /// Converts the cast into a settings value. `Unrecognized` yields `None`.
    pub fn into_option(self) -> Option<RetryOption> {
        match self {
            RetryCast::Boolean(enabled) => Some(RetryOption::Enabled(enabled)),
            RetryCast::Integer(attempts) => Some(RetryOption::Attempts(attempts)),
            RetryCast::Unrecognized => None,
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, RetryCast::Unrecognized)
    }
}

impl FromStr for RetryCast {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(cast_retry_option(s))
    }
}

/// Casts a raw retry string.
///
/// `true|t|yes|y` and `false|f|no|n|0` are matched case-insensitively against
/// the whole string, booleans first so `"0"` means `false`. Anything made only
/// of decimal digits becomes an integer; everything else, including integers
/// too large for `u64`, is [`RetryCast::Unrecognized`].
pub fn cast_retry_option(raw: &str) -> RetryCast {
    let lowered = raw.to_ascii_lowercase();
    match lowered.as_str() {
        "true" | "t" | "yes" | "y" => return RetryCast::Boolean(true),
        "false" | "f" | "no" | "n" | "0" => return RetryCast::Boolean(false),
        _ => {}
    }

    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return RetryCast::Unrecognized;
    }

    raw.parse::<u64>()
        .map(RetryCast::Integer)
        .unwrap_or(RetryCast::Unrecognized)
}
