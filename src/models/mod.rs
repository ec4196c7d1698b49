pub mod answer;
pub mod quiz;
pub mod user;
