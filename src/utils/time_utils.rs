use chrono::{TimeZone, Utc};

pub struct TimeUtils;

impl TimeUtils {
    pub const SECONDS_IN_MIN: i64 = 60;
    pub const SECONDS_IN_H: i64 = Self::SECONDS_IN_MIN * 60;
    pub const SECONDS_IN_D: i64 = Self::SECONDS_IN_H * 24;
    pub const SECONDS_IN_W: i64 = Self::SECONDS_IN_D * 7;
    pub const SECONDS_IN_30_D: i64 = Self::SECONDS_IN_D * 30;
    pub const SECONDS_IN_365_D: i64 = Self::SECONDS_IN_D * 365;
    pub const STANDARD_TIME_FORMAT: &'static str = "%Y-%m-%d";
}

/// Format an epoch-seconds timestamp for display. Invalid timestamps render
/// as an empty string rather than panicking.
pub fn epoch_sec_to_utc(epoch_sec: i64) -> String {
    if let chrono::LocalResult::Single(datetime) = Utc.timestamp_opt(epoch_sec, 0) {
        datetime.format(TimeUtils::STANDARD_TIME_FORMAT).to_string()
    } else {
        String::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_epoch_formatting() {
        // 2021-01-01T00:00:00Z
        assert_eq!(epoch_sec_to_utc(1_609_459_200), "2021-01-01");
    }
}
