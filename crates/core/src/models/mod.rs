pub mod period;
pub mod reference;
pub mod schedule;

pub use period::{Period, weekday_from_iso};
pub use reference::{
    Auditorium, Course, Group, NewAuditorium, NewCourse, NewGroup, NewProfessor, NewStudent,
    Professor, Student,
};
pub use schedule::{
    NewReschedulingOption, NewSchedule, NewScheduleTemplate, ReschedulingOption, Schedule,
    ScheduleFilter, ScheduleTemplate,
};
