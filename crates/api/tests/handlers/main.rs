#[path = "../test_utils.rs"]
mod test_utils;

mod me_test;
mod middleware_test;
mod reference_test;
mod schedule_test;
