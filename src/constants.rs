use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

pub const API_PREFIX: &str = "/api/v1";

/// Seconds a health report is served from cache before it is rebuilt.
pub const HEALTH_CACHE_SECS: i64 = 5;

pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);
