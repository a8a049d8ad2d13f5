mod rescheduling;
mod timetable;

pub use rescheduling::DayOptions;
pub use timetable::{Repositories, Timetable};
