//! Memory trace format.
//!
//! One operation per line:
//!
//! ```text
//! # comment
//! R 0x7fff1000    read
//! W 4096          write
//! I 0x7fff1       invalidate virtual page number
//! ```
//!
//! Blank lines and `#` comments are skipped; numbers are decimal or `0x` hex.

use std::fs;
use std::path::Path;

use thiserror::Error;

use crate::common::{AccessType, VirtAddr};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TraceOp {
    Access(VirtAddr, AccessType),
    Invalidate(u64),
}

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("failed to read trace {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
}

pub fn parse_trace(input: &str) -> Result<Vec<TraceOp>, TraceError> {
    let mut ops = Vec::new();
    for (idx, raw) in input.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }
        ops.push(parse_line(line).map_err(|reason| TraceError::Malformed {
            line: idx + 1,
            reason,
        })?);
    }
    Ok(ops)
}

pub fn load_trace(path: impl AsRef<Path>) -> Result<Vec<TraceOp>, TraceError> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|source| TraceError::Io {
        path: path.display().to_string(),
        source,
    })?;
    parse_trace(&content)
}

fn parse_line(line: &str) -> Result<TraceOp, String> {
    let mut parts = line.split_whitespace();
    let (Some(kind), Some(value), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(format!("expected `<op> <address>`, got `{}`", line));
    };
    let value = parse_number(value)?;

    match kind.to_ascii_uppercase().as_str() {
        "R" => Ok(TraceOp::Access(VirtAddr::new(value), AccessType::Read)),
        "W" => Ok(TraceOp::Access(VirtAddr::new(value), AccessType::Write)),
        "I" => Ok(TraceOp::Invalidate(value)),
        other => Err(format!("unknown operation `{}`", other)),
    }
}

fn parse_number(s: &str) -> Result<u64, String> {
    let parsed = match s.strip_prefix("0x").or_else(|| s.strip_prefix("0X")) {
        Some(hex) => u64::from_str_radix(&hex.replace('_', ""), 16),
        None => s.replace('_', "").parse(),
    };
    parsed.map_err(|e| format!("invalid number `{}`: {}", s, e))
}
