// Time-of-day greeting

use chrono::{NaiveDateTime, Timelike};

/// Salutation for a local hour (0-23)
pub fn salutation(hour: u32) -> &'static str {
    if hour < 12 {
        "Good Morning"
    } else if hour < 17 {
        "Good Afternoon"
    } else {
        "Good Evening"
    }
}

/// Full greeting line, e.g. `Good Evening, Student`
pub fn greeting(now: &NaiveDateTime, name: &str) -> String {
    format!("{}, {}", salutation(now.hour()), name)
}

/// Wall-clock time as `HH:MM`
pub fn format_time_of_day(now: &NaiveDateTime) -> String {
    now.format("%H:%M").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 3, 14)
            .unwrap()
            .and_hms_opt(hour, minute, 0)
            .unwrap()
    }

    #[test]
    fn test_salutation_boundaries() {
        assert_eq!(salutation(0), "Good Morning");
        assert_eq!(salutation(11), "Good Morning");
        assert_eq!(salutation(12), "Good Afternoon");
        assert_eq!(salutation(16), "Good Afternoon");
        assert_eq!(salutation(17), "Good Evening");
        assert_eq!(salutation(23), "Good Evening");
    }

    #[test]
    fn test_greeting() {
        assert_eq!(greeting(&at(9, 5), "Student"), "Good Morning, Student");
        assert_eq!(greeting(&at(18, 0), "Ada"), "Good Evening, Ada");
    }

    #[test]
    fn test_format_time_of_day() {
        assert_eq!(format_time_of_day(&at(7, 3)), "07:03");
        assert_eq!(format_time_of_day(&at(23, 59)), "23:59");
    }
}
