//! Disk persistence for the index snapshot using bincode serialization.
//!
//! The whole [`IndexData`] is serialized to one `index.ldb` file. Writes use
//! atomic temp-file + rename to prevent corruption on crash.
//! A CRC32 checksum is appended as a footer for integrity verification;
//! loading is all-or-nothing — a snapshot that fails the checksum, fails to
//! deserialize, or fails validation leaves the caller's index untouched.

use crate::config;
use crate::index::store::IndexData;
use std::fs;
use std::io;
use std::path::Path;

/// Magic bytes appended before the CRC32 footer identifying a checksummed snapshot.
const SNAPSHOT_CRC_MAGIC: &[u8; 4] = b"LDX1";

/// Path of the snapshot file inside a data directory.
pub fn snapshot_path(dir: &str) -> std::path::PathBuf {
    Path::new(dir).join(config::SNAPSHOT_FILE_NAME)
}

/// Save the index to `dir` using bincode serialization with atomic write.
/// Appends a CRC32 checksum footer: [bincode payload][magic "LDX1"][u32 CRC32 BE].
pub fn save_index(data: &IndexData, dir: &str) -> io::Result<()> {
    let bytes = bincode::serialize(data).map_err(|e| io::Error::other(e.to_string()))?;

    // Compute CRC32 over the bincode payload
    let crc = crc32fast::hash(&bytes);

    fs::create_dir_all(dir)?;
    let path = snapshot_path(dir);
    let tmp_path = path.with_extension("ldb.tmp");

    let mut output = Vec::with_capacity(bytes.len() + 8);
    output.extend_from_slice(&bytes);
    output.extend_from_slice(SNAPSHOT_CRC_MAGIC);
    output.extend_from_slice(&crc.to_be_bytes());

    // Atomic write: write to temp, then rename
    fs::write(&tmp_path, &output)?;
    fs::rename(&tmp_path, &path)?;

    tracing::info!(
        "Saved index snapshot ({} documents, {} bytes, CRC32={:#010x})",
        data.doc_count,
        bytes.len(),
        crc
    );
    Ok(())
}

/// Load the index snapshot from `dir`, verifying CRC32 integrity.
pub fn load_index(dir: &str) -> io::Result<IndexData> {
    let path = snapshot_path(dir);
    let raw = fs::read(&path)?;

    // Footer: last 8 bytes = [magic "LDX1"][CRC32 BE]
    if raw.len() < 8 || &raw[raw.len() - 8..raw.len() - 4] != SNAPSHOT_CRC_MAGIC {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!("Not a lexis.db snapshot (missing CRC footer): {:?}", path),
        ));
    }
    let payload = &raw[..raw.len() - 8];
    let stored_crc = u32::from_be_bytes([
        raw[raw.len() - 4],
        raw[raw.len() - 3],
        raw[raw.len() - 2],
        raw[raw.len() - 1],
    ]);
    let computed_crc = crc32fast::hash(payload);
    if computed_crc != stored_crc {
        return Err(io::Error::new(
            io::ErrorKind::InvalidData,
            format!(
                "Snapshot CRC32 mismatch: expected {:#010x}, got {:#010x}. File may be corrupted: {:?}",
                stored_crc, computed_crc, path
            ),
        ));
    }

    let data: IndexData = bincode::deserialize(payload)
        .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e.to_string()))?;

    data.validate().map_err(|e| {
        io::Error::new(
            io::ErrorKind::InvalidData,
            format!("snapshot validation failed: {}", e),
        )
    })?;

    tracing::info!(
        "Loaded index snapshot ({} documents, {} terms)",
        data.doc_count,
        data.corpus_term_freq.len()
    );

    Ok(data)
}
