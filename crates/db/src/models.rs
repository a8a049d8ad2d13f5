use chrono::{NaiveDate, Weekday};
use eyre::{Report, eyre};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use timetable_core::models::{
    Auditorium, Course, Group, Period, Professor, ReschedulingOption, Schedule, ScheduleTemplate,
    Student, weekday_from_iso,
};

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbAuditorium {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbCourse {
    pub id: i64,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbGroup {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbProfessor {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbStudent {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub group_id: Option<i64>,
    pub group_name: Option<String>,
}

/// A schedule row joined with its auditorium, course, group and professor.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbSchedule {
    pub id: i64,
    pub template_id: Option<i64>,
    pub on_date: NaiveDate,
    pub day_of_week: i16,
    pub period: String,
    pub auditorium_id: i64,
    pub auditorium_name: String,
    pub course_id: i64,
    pub course_name: String,
    pub course_description: Option<String>,
    pub group_id: i64,
    pub group_name: String,
    pub professor_id: i64,
    pub professor_first_name: String,
    pub professor_last_name: String,
}

/// A template row joined the same way as [`DbSchedule`].
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbScheduleTemplate {
    pub id: i64,
    pub week_parity: bool,
    pub day_of_week: i16,
    pub period: String,
    pub auditorium_id: i64,
    pub auditorium_name: String,
    pub course_id: i64,
    pub course_name: String,
    pub course_description: Option<String>,
    pub group_id: i64,
    pub group_name: String,
    pub professor_id: i64,
    pub professor_first_name: String,
    pub professor_last_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct DbReschedulingOption {
    pub id: i64,
    pub day_of_week: i16,
    pub period: String,
    pub auditorium_id: i64,
    pub auditorium_name: String,
}

/// ISO day number stored in `day_of_week` columns.
pub fn day_to_db(day: Weekday) -> i16 {
    day.number_from_monday() as i16
}

fn day_from_db(day: i16) -> Result<Weekday, Report> {
    weekday_from_iso(day).ok_or_else(|| eyre!("Invalid day_of_week in database: {}", day))
}

fn period_from_db(period: &str) -> Result<Period, Report> {
    period
        .parse()
        .map_err(|e| eyre!("Invalid period in database: {}", e))
}

impl From<DbAuditorium> for Auditorium {
    fn from(row: DbAuditorium) -> Self {
        Auditorium {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<DbCourse> for Course {
    fn from(row: DbCourse) -> Self {
        Course {
            id: row.id,
            name: row.name,
            description: row.description,
        }
    }
}

impl From<DbGroup> for Group {
    fn from(row: DbGroup) -> Self {
        Group {
            id: row.id,
            name: row.name,
        }
    }
}

impl From<DbProfessor> for Professor {
    fn from(row: DbProfessor) -> Self {
        Professor {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
        }
    }
}

impl From<DbStudent> for Student {
    fn from(row: DbStudent) -> Self {
        let group = match (row.group_id, row.group_name) {
            (Some(id), Some(name)) => Some(Group { id, name }),
            _ => None,
        };

        Student {
            id: row.id,
            first_name: row.first_name,
            last_name: row.last_name,
            group,
        }
    }
}

impl TryFrom<DbSchedule> for Schedule {
    type Error = Report;

    fn try_from(row: DbSchedule) -> Result<Self, Self::Error> {
        Ok(Schedule {
            id: row.id,
            template_id: row.template_id,
            date: row.on_date,
            day: day_from_db(row.day_of_week)?,
            period: period_from_db(&row.period)?,
            auditorium: Auditorium {
                id: row.auditorium_id,
                name: row.auditorium_name,
            },
            course: Course {
                id: row.course_id,
                name: row.course_name,
                description: row.course_description,
            },
            group: Group {
                id: row.group_id,
                name: row.group_name,
            },
            professor: Professor {
                id: row.professor_id,
                first_name: row.professor_first_name,
                last_name: row.professor_last_name,
            },
        })
    }
}

impl TryFrom<DbScheduleTemplate> for ScheduleTemplate {
    type Error = Report;

    fn try_from(row: DbScheduleTemplate) -> Result<Self, Self::Error> {
        Ok(ScheduleTemplate {
            id: row.id,
            week_parity: row.week_parity,
            day: day_from_db(row.day_of_week)?,
            period: period_from_db(&row.period)?,
            auditorium: Auditorium {
                id: row.auditorium_id,
                name: row.auditorium_name,
            },
            course: Course {
                id: row.course_id,
                name: row.course_name,
                description: row.course_description,
            },
            group: Group {
                id: row.group_id,
                name: row.group_name,
            },
            professor: Professor {
                id: row.professor_id,
                first_name: row.professor_first_name,
                last_name: row.professor_last_name,
            },
        })
    }
}

impl TryFrom<DbReschedulingOption> for ReschedulingOption {
    type Error = Report;

    fn try_from(row: DbReschedulingOption) -> Result<Self, Self::Error> {
        Ok(ReschedulingOption {
            id: row.id,
            day: day_from_db(row.day_of_week)?,
            period: period_from_db(&row.period)?,
            auditorium: Auditorium {
                id: row.auditorium_id,
                name: row.auditorium_name,
            },
        })
    }
}

/// Converts a batch of rows, failing on the first malformed one.
pub fn convert_all<R, T>(rows: Vec<R>) -> Result<Vec<T>, Report>
where
    T: TryFrom<R, Error = Report>,
{
    rows.into_iter().map(T::try_from).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use rstest::rstest;

    fn schedule_row(day_of_week: i16, period: &str) -> DbSchedule {
        DbSchedule {
            id: 1,
            template_id: Some(2),
            on_date: NaiveDate::from_ymd_opt(2020, 9, 7).unwrap(),
            day_of_week,
            period: period.to_string(),
            auditorium_id: 3,
            auditorium_name: "A-03".to_string(),
            course_id: 4,
            course_name: "math".to_string(),
            course_description: None,
            group_id: 5,
            group_name: "G-5".to_string(),
            professor_id: 6,
            professor_first_name: "Ada".to_string(),
            professor_last_name: "Lovelace".to_string(),
        }
    }

    #[test]
    fn schedule_row_converts() {
        let schedule = Schedule::try_from(schedule_row(1, "SECOND")).unwrap();

        assert_eq!(schedule.day, Weekday::Mon);
        assert_eq!(schedule.period, Period::Second);
        assert_eq!(schedule.template_id, Some(2));
        assert_eq!(schedule.auditorium.name, "A-03");
        assert_eq!(schedule.professor.last_name, "Lovelace");
    }

    #[rstest]
    #[case(8, "SECOND")]
    #[case(0, "FIRST")]
    #[case(1, "LUNCH")]
    #[case(1, "")]
    fn malformed_rows_are_rejected(#[case] day_of_week: i16, #[case] period: &str) {
        assert!(Schedule::try_from(schedule_row(day_of_week, period)).is_err());
    }

    #[test]
    fn one_bad_row_fails_the_batch() {
        let rows = vec![schedule_row(1, "FIRST"), schedule_row(0, "FIRST")];
        assert!(convert_all::<_, Schedule>(rows).is_err());
    }

    #[test]
    fn student_without_group() {
        let student = Student::from(DbStudent {
            id: 1,
            first_name: "Alan".to_string(),
            last_name: "Turing".to_string(),
            group_id: None,
            group_name: None,
        });

        assert_eq!(student.group, None);
    }

    #[test]
    fn day_round_trips_through_iso_number() {
        assert_eq!(day_to_db(Weekday::Mon), 1);
        assert_eq!(day_to_db(Weekday::Sun), 7);
    }
}
