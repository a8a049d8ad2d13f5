use std::collections::HashMap;

use chrono::NaiveDate;
use pretty_assertions::assert_eq;
use timetable_api::config::ApiConfig;
use tracing::Level;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let vars: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| vars.get(key).cloned()
}

const REQUIRED: &[(&str, &str)] = &[
    ("DATABASE_URL", "postgres://localhost/timetable"),
    ("SEMESTER_START_DATE", "2020-09-01"),
    ("SEMESTER_END_DATE", "2020-12-31"),
];

#[test]
fn defaults_apply() {
    let config = ApiConfig::from_lookup(lookup(REQUIRED)).unwrap();

    assert_eq!(config.server_addr(), "0.0.0.0:3000");
    assert_eq!(config.log_level, Level::INFO);
    assert_eq!(config.request_timeout, 30);
    assert_eq!(config.cors_origins, None);
    assert_eq!(
        config.semester_start,
        NaiveDate::from_ymd_opt(2020, 9, 1).unwrap()
    );
}

#[test]
fn overrides_are_read() {
    let mut pairs = REQUIRED.to_vec();
    pairs.extend([
        ("API_PORT", "8080"),
        ("LOG_LEVEL", "DEBUG"),
        ("API_CORS_ORIGINS", "http://a.test, http://b.test,"),
        ("API_REQUEST_TIMEOUT_SECONDS", "5"),
    ]);

    let config = ApiConfig::from_lookup(lookup(&pairs)).unwrap();

    assert_eq!(config.port, 8080);
    assert_eq!(config.log_level, Level::DEBUG);
    assert_eq!(
        config.cors_origins,
        Some(vec!["http://a.test".to_string(), "http://b.test".to_string()])
    );
    assert_eq!(config.request_timeout, 5);
}

#[test]
fn semester_dates_are_required() {
    let pairs = [("DATABASE_URL", "postgres://localhost/timetable")];

    assert!(ApiConfig::from_lookup(lookup(&pairs)).is_err());
}

#[test]
fn malformed_semester_date_fails() {
    let mut pairs = REQUIRED.to_vec();
    pairs.push(("SEMESTER_END_DATE", "31.12.2020"));
    // later entries win in the map
    let config = ApiConfig::from_lookup(lookup(&pairs));

    assert!(config.is_err());
}

#[test]
fn semester_must_not_end_before_it_starts() {
    let pairs = [
        ("DATABASE_URL", "postgres://localhost/timetable"),
        ("SEMESTER_START_DATE", "2020-12-31"),
        ("SEMESTER_END_DATE", "2020-09-01"),
    ];

    let config = ApiConfig::from_lookup(lookup(&pairs)).unwrap();

    assert!(config.semester_calendar().is_err());
}
