use chrono::{Datelike, Duration, NaiveDate, Weekday};
use roleplan::calendar::*;

fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}

#[test]
fn test_week_starts_on_saturday() {
    let mut d = date("2024-05-25");
    for _ in 0..21 {
        let days = days_of_week(d);
        assert_eq!(days.len(), 7);
        assert_eq!(days[0].date.weekday(), Weekday::Sat);
        assert!(days[0].date <= d && d < days[0].date + Duration::days(7));
        for pair in days.windows(2) {
            assert_eq!(pair[1].date, pair[0].date + Duration::days(1));
        }
        d += Duration::days(1);
    }
}

#[test]
fn test_days_of_week_fields() {
    let days = days_of_week(date("2024-06-05"));
    let first = &days[0];
    assert_eq!(first.formatted_date, "2024-06-01");
    assert_eq!(first.day_name, "Saturday");
    assert_eq!(first.day_number, 1);
    assert_eq!(first.month, "Jun");
    assert_eq!(days[6].formatted_date, "2024-06-07");
    assert_eq!(days[6].day_name, "Friday");
}

#[test]
fn test_saturday_is_its_own_week_start() {
    assert_eq!(week_start(date("2024-06-08")), date("2024-06-08"));
    assert_eq!(week_start(date("2024-06-07")), date("2024-06-01"));
    assert_eq!(week_start(date("2024-06-02")), date("2024-06-01"));
}

#[test]
fn test_week_spanning_months() {
    let days = days_of_week(date("2024-03-01"));
    assert_eq!(days[0].formatted_date, "2024-02-24");
    assert_eq!(days[6].formatted_date, "2024-03-01");
    assert_eq!(days[6].month, "Mar");
}

#[test]
fn test_hours_of_day() {
    let hours = hours_of_day();
    assert_eq!(hours.len(), 16);
    assert_eq!(hours[0].hour, 5);
    assert_eq!(hours[0].label, "5am");
    assert_eq!(hours[7].label, "12pm");
    assert_eq!(hours[15].hour, 20);
    assert_eq!(hours[15].label, "8pm");
}

#[test]
fn test_format_hour() {
    assert_eq!(format_hour(0), "12am");
    assert_eq!(format_hour(11), "11am");
    assert_eq!(format_hour(12), "12pm");
    assert_eq!(format_hour(13), "1pm");
}

#[test]
fn test_parse_time_string() {
    assert_eq!(parse_time_string("12am"), Some(0));
    assert_eq!(parse_time_string("12pm"), Some(12));
    assert_eq!(parse_time_string("7pm"), Some(19));
    assert_eq!(parse_time_string("9am"), Some(9));
    assert_eq!(parse_time_string(" 7PM "), Some(19));
    assert_eq!(parse_time_string("bogus"), None);
    assert_eq!(parse_time_string("13pm"), None);
    assert_eq!(parse_time_string("0am"), None);
    assert_eq!(parse_time_string("7"), None);
    assert_eq!(parse_time_string("pm"), None);
    assert_eq!(parse_time_string("7 pm"), None);
    assert_eq!(parse_time_string("\u{0667}pm"), None);
}

#[test]
fn test_format_date() {
    assert_eq!(format_date("2024-06-01").as_deref(), Some("Jun 1"));
    assert_eq!(format_date("2024-12-25").as_deref(), Some("Dec 25"));
    assert_eq!(format_date("not a date"), None);
}

#[test]
fn test_week_cursor_navigation() {
    let mut cursor = WeekCursor::new(date("2024-06-05"));
    cursor.next_week();
    assert_eq!(cursor.days()[0].date, date("2024-06-08"));
    cursor.previous_week();
    cursor.previous_week();
    assert_eq!(cursor.days()[0].date, date("2024-05-25"));
    assert!(cursor.contains(date("2024-05-31")));
    assert!(!cursor.contains(date("2024-06-01")));

    cursor.go_to(date("2024-06-01"));
    assert_eq!(cursor.reference(), date("2024-06-01"));
}
