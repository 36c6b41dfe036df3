//! Log sources: plain files, glob patterns, stdin (`-`), and gzip/zstd
//! compressed logs.
//!
//! Compression is detected by file extension (.gz → gzip, .zst/.zstd → zstd).
//! Every source is read fully into memory before ingestion.

use anyhow::{Context, Result, bail};
use std::io::Read;

/// Name used for standard input.
pub const STDIN: &str = "-";

/// A fully read, UTF-8 decoded log.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSource {
    pub name: String,
    pub text: String,
}

/// Returns true if the file path has a recognized compressed extension.
pub fn is_compressed(path: &str) -> bool {
    path.ends_with(".gz")
        || path.ends_with(".gzip")
        || path.ends_with(".zst")
        || path.ends_with(".zstd")
}

fn is_pattern(arg: &str) -> bool {
    arg.contains(['*', '?', '['])
}

/// Expand command-line arguments into concrete source names.
///
/// Arguments without glob metacharacters are kept as-is (a missing file is
/// reported when it is read). A pattern must match at least one file.
pub fn expand(args: &[String]) -> Result<Vec<String>> {
    let mut names = Vec::new();
    for arg in args {
        if arg == STDIN || !is_pattern(arg) {
            names.push(arg.clone());
            continue;
        }
        let before = names.len();
        for entry in glob::glob(arg).with_context(|| format!("invalid glob pattern: {arg}"))? {
            let path = entry.with_context(|| format!("failed to read glob match for: {arg}"))?;
            if path.is_file() {
                names.push(path.to_string_lossy().into_owned());
            }
        }
        if names.len() == before {
            bail!("no log files match pattern: {arg}");
        }
    }
    Ok(names)
}

/// Read raw bytes, decompressing if the extension asks for it.
fn read_bytes(name: &str) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    if name == STDIN {
        std::io::stdin()
            .read_to_end(&mut buf)
            .context("failed to read stdin")?;
    } else if !is_compressed(name) {
        buf = std::fs::read(name).with_context(|| format!("failed to read file: {name}"))?;
    } else if name.ends_with(".gz") || name.ends_with(".gzip") {
        let file =
            std::fs::File::open(name).with_context(|| format!("failed to open file: {name}"))?;
        flate2::read::GzDecoder::new(file)
            .read_to_end(&mut buf)
            .with_context(|| format!("failed to decompress gzip file: {name}"))?;
    } else {
        let file =
            std::fs::File::open(name).with_context(|| format!("failed to open file: {name}"))?;
        zstd::Decoder::new(file)
            .with_context(|| format!("failed to initialize zstd decoder for: {name}"))?
            .read_to_end(&mut buf)
            .with_context(|| format!("failed to decompress zstd file: {name}"))?;
    }
    Ok(buf)
}

/// Strip UTF-8 BOM (U+FEFF, bytes EF BB BF) from the beginning of a buffer.
pub fn strip_bom(buf: &mut Vec<u8>) {
    if buf.starts_with(&[0xEF, 0xBB, 0xBF]) {
        buf.drain(..3);
    }
}

pub fn read_source(name: &str) -> Result<LogSource> {
    let mut buf = read_bytes(name)?;
    strip_bom(&mut buf);
    let text = String::from_utf8(buf).with_context(|| format!("log is not valid UTF-8: {name}"))?;
    tracing::debug!(source = name, bytes = text.len(), "read log");
    Ok(LogSource {
        name: name.to_string(),
        text,
    })
}
