//! Field separator detection from a bounded file prefix.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use log::debug;

use crate::error::{CsvDiffError, Result};

/// Candidate separators, in tie-break order (comma first).
pub const CANDIDATES: &[u8] = &[b',', b';', b'\t', b'|'];

/// Maximum number of bytes inspected during detection.
const SAMPLE_BYTES: u64 = 64 * 1024;

/// Maximum number of non-blank lines inspected during detection.
const SAMPLE_LINES: usize = 20;

/// Outcome of separator detection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Detection {
    /// The chosen separator.
    pub separator: u8,
    /// True when no candidate produced a multi-column split and comma was
    /// chosen as a last resort.
    pub fallback: bool,
}

/// Detect the separator of a file by reading at most 64 KiB of it.
pub fn detect_separator(path: &Path) -> Result<Detection> {
    let file = File::open(path).map_err(|e| CsvDiffError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;

    let mut prefix = Vec::new();
    let read = file
        .take(SAMPLE_BYTES)
        .read_to_end(&mut prefix)
        .map_err(|e| CsvDiffError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
    let truncated = read as u64 == SAMPLE_BYTES;

    let text = match std::str::from_utf8(&prefix) {
        Ok(text) => text,
        // A multi-byte character cut by the window is not an encoding error.
        Err(e) if e.error_len().is_none() && truncated => {
            std::str::from_utf8(&prefix[..e.valid_up_to()]).map_err(|_| {
                CsvDiffError::Encoding {
                    path: path.to_path_buf(),
                    row: 0,
                }
            })?
        }
        Err(_) => {
            return Err(CsvDiffError::Encoding {
                path: path.to_path_buf(),
                row: 0,
            });
        }
    };

    let detection = detect_in_sample(text, truncated);
    debug!(
        "Detected separator {:?} for {} (fallback: {})",
        detection.separator as char,
        path.display(),
        detection.fallback
    );
    Ok(detection)
}

/// Detect the separator within an in-memory sample.
///
/// When `truncated` is set the final line may be cut mid-record and is
/// ignored.
pub fn detect_in_sample(sample: &str, truncated: bool) -> Detection {
    let mut lines: Vec<&str> = sample.lines().collect();
    if truncated && !sample.ends_with('\n') && lines.len() > 1 {
        lines.pop();
    }
    let lines: Vec<&str> = lines
        .into_iter()
        .filter(|l| !l.trim().is_empty())
        .take(SAMPLE_LINES)
        .collect();

    let mut best: Option<(u8, f64, usize)> = None;

    for &candidate in CANDIDATES {
        let counts: Vec<usize> = lines
            .iter()
            .map(|line| count_fields(line, candidate))
            .collect();

        let Some((modal, frequency)) = modal_count(&counts) else {
            continue;
        };
        if modal < 2 {
            continue;
        }

        let consistency = frequency as f64 / counts.len() as f64;
        let better = match best {
            None => true,
            Some((_, best_consistency, best_modal)) => {
                consistency > best_consistency
                    || (consistency == best_consistency && modal > best_modal)
            }
        };
        if better {
            best = Some((candidate, consistency, modal));
        }
    }

    match best {
        Some((separator, _, _)) => Detection {
            separator,
            fallback: false,
        },
        None => Detection {
            separator: b',',
            fallback: true,
        },
    }
}

/// Parse a separator override given on the command line or in config.
pub fn parse_separator(value: &str) -> Result<u8> {
    match value {
        "tab" | "\\t" | "\t" => return Ok(b'\t'),
        "comma" => return Ok(b','),
        "semicolon" => return Ok(b';'),
        "pipe" => return Ok(b'|'),
        _ => {}
    }

    let mut chars = value.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) if c.is_ascii() && c != '"' && c != '\n' && c != '\r' => Ok(c as u8),
        _ => Err(CsvDiffError::InvalidSeparator(value.to_string())),
    }
}

/// Most frequent field count and how often it occurs. Ties go to the larger
/// count.
fn modal_count(counts: &[usize]) -> Option<(usize, usize)> {
    let mut tally: Vec<(usize, usize)> = Vec::new();
    for &count in counts {
        match tally.iter_mut().find(|(c, _)| *c == count) {
            Some(entry) => entry.1 += 1,
            None => tally.push((count, 1)),
        }
    }
    tally
        .into_iter()
        .max_by(|a, b| a.1.cmp(&b.1).then(a.0.cmp(&b.0)))
}

/// Count fields in a line, respecting quotes.
fn count_fields(line: &str, delimiter: u8) -> usize {
    let delim_char = delimiter as char;
    let mut count = 1;
    let mut in_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => in_quotes = !in_quotes,
            c if c == delim_char && !in_quotes => count += 1,
            _ => {}
        }
    }

    count
}
