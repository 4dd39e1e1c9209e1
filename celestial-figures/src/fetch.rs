//! Source file acquisition.
//!
//! Remote files are cached in a working directory so repeated runs do not
//! hit the network. Gzip payloads (remote or a local `.gz` sibling) are
//! decompressed on the way in.

use crate::error::{Error, Result};
use flate2::read::GzDecoder;
use std::fs::{self, File};
use std::io::{BufReader, Read, Write};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tempfile::NamedTempFile;
use tracing::{debug, info};

const GZIP_MAGIC: [u8; 2] = [0x1f, 0x8b];

/// Downloads `url`, decompressing it if the body is gzip.
///
/// # Errors
/// [`Error::Fetch`] on connection failures, non-success status codes or a
/// corrupt gzip body.
pub fn fetch_bytes(url: &str, timeout: Duration) -> Result<Vec<u8>> {
    let fetch_err = |message: String| Error::Fetch {
        url: url.to_string(),
        message,
    };
    let client = reqwest::blocking::Client::builder()
        .timeout(timeout)
        .build()
        .map_err(|e| fetch_err(e.to_string()))?;
    let response = client.get(url).send().map_err(|e| fetch_err(e.to_string()))?;
    if !response.status().is_success() {
        return Err(fetch_err(format!("HTTP {}", response.status())));
    }
    let body = response.bytes().map_err(|e| fetch_err(e.to_string()))?;
    debug!("Downloaded {} bytes from {}", body.len(), url);
    maybe_gunzip(&body).map_err(|e| fetch_err(format!("bad gzip body: {}", e)))
}

/// Returns `bytes` unchanged unless it starts with the gzip magic number.
pub fn maybe_gunzip(bytes: &[u8]) -> std::io::Result<Vec<u8>> {
    if !bytes.starts_with(&GZIP_MAGIC) {
        return Ok(bytes.to_vec());
    }
    let mut out = Vec::new();
    GzDecoder::new(bytes).read_to_end(&mut out)?;
    Ok(out)
}

/// Makes sure `path` exists locally.
///
/// Uses the file if present, otherwise decompresses `<path>.gz` if that
/// exists, otherwise downloads `url` into `path`. Content is staged in a
/// temporary file next to `path` and renamed into place once complete.
pub fn ensure_file(path: &Path, url: &str, label: &str, timeout: Duration) -> Result<PathBuf> {
    if path.exists() {
        debug!("Found {}: {:?}", label, path);
        return Ok(path.to_path_buf());
    }
    let gz_path = path.with_extension(gz_extension(path));
    if gz_path.exists() {
        info!("Decompressing {:?}", gz_path);
        decompress_gz(&gz_path, path)?;
        return Ok(path.to_path_buf());
    }
    info!("{} not found at {:?}, downloading {}", label, path, url);
    let bytes = fetch_bytes(url, timeout)?;
    let mut staged = staging_file(path)?;
    staged.write_all(&bytes)?;
    persist(staged, path)?;
    info!(
        "Saved {:?} ({:.1} MB)",
        path,
        bytes.len() as f64 / 1_048_576.0
    );
    Ok(path.to_path_buf())
}

fn gz_extension(path: &Path) -> String {
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");
    format!("{}.gz", ext)
}

fn staging_file(dest: &Path) -> Result<NamedTempFile> {
    let parent = match dest.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    fs::create_dir_all(parent)?;
    Ok(NamedTempFile::new_in(parent)?)
}

fn persist(staged: NamedTempFile, dest: &Path) -> Result<()> {
    staged.persist(dest).map_err(|e| Error::Io(e.error))?;
    Ok(())
}

fn decompress_gz(gz_path: &Path, dest: &Path) -> Result<()> {
    let gz_file = File::open(gz_path)?;
    let mut reader = BufReader::new(GzDecoder::new(BufReader::new(gz_file)));
    let mut staged = staging_file(dest)?;
    std::io::copy(&mut reader, &mut staged)?;
    staged.flush()?;
    persist(staged, dest)
}
