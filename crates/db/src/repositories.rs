pub mod auditorium;
pub mod course;
pub mod group;
pub mod option;
pub mod professor;
pub mod schedule;
pub mod student;
pub mod template;
