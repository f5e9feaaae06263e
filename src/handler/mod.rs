pub mod api_handler;
pub mod file_handler;
