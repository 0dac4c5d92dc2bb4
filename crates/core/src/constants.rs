/// Prefix carried by every API key issued to a user.
pub const API_KEY_PREFIX: &str = "kipo_";

/// Number of random bytes behind an API key secret.
pub const API_KEY_SECRET_BYTES: usize = 32;

/// Maximum length of an API key display name.
pub const API_KEY_NAME_MAX_LEN: usize = 64;

/// Minimum accepted password length.
pub const PASSWORD_MIN_LEN: usize = 8;

/// Maximum number of recommendations stored per generation request.
pub const MAX_RECOMMENDATIONS_PER_REQUEST: usize = 3;

/// Maximum length of a fallback recommendation message.
pub const FALLBACK_MESSAGE_MAX_CHARS: usize = 500;

/// Window (in days) of history used when building recommendation context.
pub const RECOMMENDATION_CONTEXT_DAYS: i64 = 30;

/// Window (in days) of history used by the unusual-spending check.
pub const UNUSUAL_SPENDING_LOOKBACK_DAYS: i64 = 90;

/// Minimum number of earlier expenses in a category before the check applies.
pub const UNUSUAL_SPENDING_MIN_SAMPLES: usize = 3;

/// An expense at or above this multiple of the category average is unusual.
pub const UNUSUAL_SPENDING_FACTOR: f64 = 2.0;

/// Default page size for list endpoints that accept a limit.
pub const DEFAULT_LIST_LIMIT: i64 = 100;

/// Upper bound for list limits supplied by callers.
pub const MAX_LIST_LIMIT: i64 = 1000;

/// Widest window (in days) accepted when looking up upcoming card payments.
pub const MAX_UPCOMING_DAYS: i64 = 366;
