pub mod uploads;
pub mod user;

pub use uploads::{
    CompareUpload, CompareUploadResponse, ConvertUpload, ConvertUploadResponse, ValidateUpload,
    ValidateUploadResponse,
};
pub use user::{User, UserResponse};
