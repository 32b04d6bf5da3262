//! Input loading
//!
//! Reads either one JSON document or JSON Lines (one document per non-empty
//! line) from a reader.

use serde_json::Value;
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use crate::error::FlattenError;

/// Read documents from a file, or stdin when `path` is `None` or `-`
pub fn load_documents(path: Option<&Path>, jsonl: bool) -> Result<Vec<Value>, FlattenError> {
    match path {
        Some(p) if p != Path::new("-") => read_documents(BufReader::new(File::open(p)?), jsonl),
        _ => read_documents(io::stdin().lock(), jsonl),
    }
}

/// Read documents from any buffered reader
pub fn read_documents<R: BufRead>(reader: R, jsonl: bool) -> Result<Vec<Value>, FlattenError> {
    if jsonl {
        read_jsonl(reader)
    } else {
        read_json(reader).map(|value| vec![value])
    }
}

fn read_json<R: Read>(mut reader: R) -> Result<Value, FlattenError> {
    let mut content = String::new();
    reader.read_to_string(&mut content)?;
    serde_json::from_str(&content).map_err(|source| FlattenError::InvalidJson {
        line: source.line(),
        source,
    })
}

fn read_jsonl<R: BufRead>(reader: R) -> Result<Vec<Value>, FlattenError> {
    let mut documents = Vec::new();
    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let value = serde_json::from_str(&line)
            .map_err(|source| FlattenError::InvalidJson { line: idx + 1, source })?;
        documents.push(value);
    }
    Ok(documents)
}
