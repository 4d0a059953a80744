mod file_upload;

pub use file_upload::{upload_file, FileUploadResponse};
