pub mod app;
pub mod cli;
pub mod config;
pub mod dto;
pub mod error;
pub mod models;
pub mod router;
pub mod services;
pub mod storage;
pub mod views;

pub use app::App;
pub use error::{Error, Result};
