pub mod file_errors;
pub mod user_errors;
