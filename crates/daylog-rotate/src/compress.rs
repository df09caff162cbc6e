//! Gzip compaction of retired log files

use crate::error::{Error, Result};
use flate2::Compression;
use flate2::write::GzEncoder;
use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

/// Archive path for a log file: the original path with `.gz` appended.
pub fn archive_path(path: &Path) -> PathBuf {
    let mut os = path.as_os_str().to_os_string();
    os.push(".gz");
    PathBuf::from(os)
}

/// Streams `path` into `path + ".gz"` and removes the original.
///
/// Removal of the source is strictly the last step. On any read, write, or
/// encode failure the partial archive is discarded and the source is left
/// intact, so a crash mid-compression never leaves zero readable copies of
/// the day's log.
pub fn compress(path: &Path) -> Result<()> {
    let gz_path = archive_path(path);
    match stream_to_gzip(path, &gz_path) {
        Ok(()) => fs::remove_file(path).map_err(|source| Error::Compress {
            path: path.to_owned(),
            source,
        }),
        Err(source) => {
            let _ = fs::remove_file(&gz_path);
            Err(Error::Compress {
                path: path.to_owned(),
                source,
            })
        }
    }
}

fn stream_to_gzip(source: &Path, target: &Path) -> io::Result<()> {
    let mut input = File::open(source)?;
    let output = File::create(target)?;
    let mut encoder = GzEncoder::new(output, Compression::default());
    io::copy(&mut input, &mut encoder)?;
    encoder.finish()?.sync_all()?;
    Ok(())
}
