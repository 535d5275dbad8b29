//! Packaged source archive

use chrono::Utc;

/// A packaged folder, ready for upload
///
/// Created once per run by the packaging step and dropped after the
/// upload; the bytes are never written to disk.
#[derive(Debug, Clone)]
pub struct SourceArchive {
    /// Object name the archive is uploaded under, unique per run
    pub object_name: String,
    /// Gzipped tar bytes
    pub bytes: Vec<u8>,
    /// Number of files packaged, for progress reporting
    pub entry_count: usize,
}

impl SourceArchive {
    pub fn new(bytes: Vec<u8>, entry_count: usize) -> Self {
        Self {
            object_name: format!("source-{}.tar.gz", Utc::now().timestamp_millis()),
            bytes,
            entry_count,
        }
    }
}
