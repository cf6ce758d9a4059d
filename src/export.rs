//! JSON Lines export of derived datasets.
//!
//! Rows are written one JSON object per line (`.jsonl`), so a renderer can
//! stream them without holding the whole round in memory. Absent derived
//! values serialize as `null`.
//!
//! # Usage
//!
//! ```ignore
//! use tickdash::export;
//! use std::path::Path;
//!
//! let derived = tickdash::build_derived_book(&rows, Some(Instrument::Etf));
//! export::save_rows(&derived, Path::new("order_book.jsonl")).unwrap();
//! let back: Vec<DerivedBookRow> = export::load_rows(Path::new("order_book.jsonl")).unwrap();
//! ```

use std::io::{self, BufRead, Write};
use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

fn io_error(path: &Path, source: io::Error) -> Error {
    Error::Io {
        path: path.to_path_buf(),
        source,
    }
}

/// Write rows to any writer, one JSON object per line.
pub fn write_rows<T: Serialize, W: Write>(rows: &[T], writer: W) -> Result<()> {
    let mut writer = io::BufWriter::new(writer);
    for row in rows {
        let mut line = serde_json::to_vec(row)?;
        line.push(b'\n');
        writer.write_all(&line).map_err(Error::Write)?;
    }
    writer.flush().map_err(Error::Write)?;
    Ok(())
}

/// Save rows to a file in JSON Lines format.
pub fn save_rows<T: Serialize>(rows: &[T], path: &Path) -> Result<()> {
    let file = std::fs::File::create(path).map_err(|e| io_error(path, e))?;
    write_rows(rows, file)
}

/// Load rows from a JSON Lines file. Empty lines are skipped.
pub fn load_rows<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    let file = std::fs::File::open(path).map_err(|e| io_error(path, e))?;
    let reader = io::BufReader::new(file);
    let mut rows = Vec::new();

    for (line_num, line) in reader.lines().enumerate() {
        let line = line.map_err(|e| io_error(path, e))?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let row: T = serde_json::from_str(line).map_err(|e| Error::MalformedRow {
            line: line_num + 1,
            reason: e.to_string(),
        })?;
        rows.push(row);
    }

    Ok(rows)
}
