pub mod access_service;
pub mod file_service;
pub mod tree_service;
pub mod user_service;
