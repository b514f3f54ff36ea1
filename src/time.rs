use std::time::SystemTime;
use chrono::{DateTime, Utc};

pub type ServerTime = DateTime<Utc>;

/// Converts a unix timestamp in seconds. Returns `None` if the timestamp is out of range.
pub fn timestamp_to_server_time(timestamp: i64) -> Option<ServerTime> {
    DateTime::from_timestamp(timestamp, 0)
}

pub fn get_server_time_now() -> ServerTime {
    ServerTime::from(SystemTime::now())
}
