//! File storage for uploaded documents and generated outputs.
//!
//! Keys are paths relative to the media root: `uploads/{uuid}-{filename}`
//! for incoming documents, and a bare filename for generated outputs so
//! they are reachable at `/media/{filename}`.

mod local;
mod traits;

pub use local::LocalStorage;
pub use traits::{sanitize_filename, StoredFile, Storage, StorageError, StorageResult};
