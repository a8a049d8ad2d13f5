use chrono::{Duration, NaiveDate};
use rstest::rstest;
use timetable_core::{SemesterCalendar, TimetableError};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

fn calendar() -> SemesterCalendar {
    SemesterCalendar::new(date(2020, 9, 1), date(2020, 12, 31)).unwrap()
}

#[test]
fn test_first_week_is_even() {
    let calendar = calendar();

    assert!(!calendar.week_parity_of(date(2020, 9, 1)));
    assert!(!calendar.week_parity_of(date(2020, 9, 6)));
    assert!(calendar.week_parity_of(date(2020, 9, 7)));
    assert!(!calendar.week_parity_of(date(2020, 9, 14)));
}

#[rstest]
#[case(date(2020, 9, 1))]
#[case(date(2020, 9, 6))]
#[case(date(2020, 10, 15))]
#[case(date(2020, 12, 31))]
#[case(date(2020, 8, 20))]
#[case(date(2019, 1, 1))]
fn test_parity_is_fortnightly(#[case] day: NaiveDate) {
    let calendar = calendar();

    assert_eq!(
        calendar.week_parity_of(day),
        calendar.week_parity_of(day + Duration::days(14))
    );
    assert_ne!(
        calendar.week_parity_of(day),
        calendar.week_parity_of(day + Duration::days(7))
    );
}

#[test]
fn test_contains_and_weeks() {
    let calendar = calendar();

    assert!(calendar.contains(date(2020, 9, 1)));
    assert!(calendar.contains(date(2020, 12, 31)));
    assert!(!calendar.contains(date(2021, 1, 1)));
    assert!(!calendar.contains(date(2020, 8, 31)));
    // 2020-08-31 .. 2020-12-28 Mondays
    assert_eq!(calendar.weeks(), 18);
}

#[test]
fn test_end_before_start_is_rejected() {
    let result = SemesterCalendar::new(date(2020, 12, 31), date(2020, 9, 1));

    assert!(matches!(result, Err(TimetableError::Validation(_))));
}
