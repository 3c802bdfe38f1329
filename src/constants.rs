use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;

/// Moment the process started; the health check reports uptime from it.
pub static START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);
