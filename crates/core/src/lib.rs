//! Domain core of the timetable service: models, the semester calendar,
//! the rescheduling rules and the `Timetable` facade that applies them
//! through the repository traits.

pub mod calendar;
pub mod errors;
pub mod models;
pub mod repositories;
pub mod rescheduling;
pub mod services;

pub use calendar::SemesterCalendar;
pub use errors::{TimetableError, TimetableResult};
pub use services::Timetable;
