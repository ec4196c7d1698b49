pub mod console;
pub mod create_quiz;
pub mod dashboard;
pub mod navbar;
pub mod notice;
pub mod quiz_detail;
pub mod quiz_list;
pub mod take_quiz;
