//! Turning uploaded files into raw transaction descriptions

pub mod lines;
pub mod upload;

pub use lines::extract_lines;
pub use upload::{ingest_batch, ingest_file, UploadRecord, UploadedFile};
