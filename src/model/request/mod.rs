pub mod file_requests;
pub mod file_upload;
pub mod user_requests;

pub use file_upload::FileUpload;
