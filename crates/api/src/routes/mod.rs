pub mod health;
pub mod me;
pub mod reference;
pub mod schedule;
pub mod template;
