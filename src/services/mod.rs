pub mod api_client;
pub mod attempt_service;
pub mod authoring_service;
pub mod query_cache;
pub mod quiz_service;
pub mod session_service;
