//! Result strings and shared constants.
//!
//! The upload record `result` column carries these sentinels; clients match
//! on them, so they are part of the public contract and must not drift.

/// Result recorded when the toolchain accepts a document.
pub const VALID_DOCUMENT_RESULT: &str = "This SPDX Document is valid.";

/// Result recorded when a validate request arrives without a file field.
pub const FILE_NOT_UPLOADED_RESULT: &str = "File Not Uploaded";

/// Path prefix under which stored files are publicly served.
pub const MEDIA_URL_PREFIX: &str = "/media";
