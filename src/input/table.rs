use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use flate2::read::MultiGzDecoder;

use crate::input::InputError;

pub fn open_maybe_gz(path: &Path) -> Result<Box<dyn BufRead>, InputError> {
    let file = File::open(path)?;
    if path.extension().is_some_and(|ext| ext == "gz") {
        Ok(Box::new(BufReader::new(MultiGzDecoder::new(file))))
    } else {
        Ok(Box::new(BufReader::new(file)))
    }
}

/// A header-addressed reference table with trimmed cells.
#[derive(Debug, Clone)]
pub struct Table {
    pub path: PathBuf,
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

#[derive(Debug, Clone)]
pub struct Row {
    pub line: u64,
    pub cells: Vec<String>,
}

impl Row {
    /// Cell text, or "" when the column is absent or the row is short.
    pub fn get(&self, column: Option<usize>) -> &str {
        column
            .and_then(|idx| self.cells.get(idx))
            .map(String::as_str)
            .unwrap_or("")
    }
}

impl Table {
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }

    pub fn require(&self, name: &str) -> Result<usize, InputError> {
        self.column(name).ok_or_else(|| InputError::MissingColumn {
            path: self.path.display().to_string(),
            column: name.to_string(),
        })
    }

    pub fn malformed(&self, row: &Row, msg: impl Into<String>) -> InputError {
        InputError::Malformed {
            path: self.path.display().to_string(),
            line: row.line,
            msg: msg.into(),
        }
    }
}

pub fn read_table(path: &Path) -> Result<Table, InputError> {
    let reader = open_maybe_gz(path)?;
    let csv_err = |source| InputError::Csv {
        path: path.display().to_string(),
        source,
    };
    let mut rdr = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = rdr
        .headers()
        .map_err(csv_err)?
        .iter()
        .map(|h| h.trim_start_matches('\u{feff}').to_string())
        .collect::<Vec<_>>();

    let mut rows = Vec::new();
    for record in rdr.records() {
        let record = record.map_err(csv_err)?;
        if record.iter().all(|c| c.is_empty()) {
            continue;
        }
        let line = record.position().map(|p| p.line()).unwrap_or(0);
        rows.push(Row {
            line,
            cells: record.iter().map(str::to_string).collect(),
        });
    }

    tracing::debug!(path = %path.display(), rows = rows.len(), "read table");
    Ok(Table {
        path: path.to_path_buf(),
        headers,
        rows,
    })
}

/// Empty cells (and spreadsheet "nan" exports) read as absent.
pub fn is_blank(cell: &str) -> bool {
    cell.is_empty() || cell.eq_ignore_ascii_case("nan")
}

pub fn parse_opt_f64(cell: &str) -> Result<Option<f64>, String> {
    if is_blank(cell) {
        return Ok(None);
    }
    match cell.parse::<f64>() {
        Ok(v) if v.is_finite() => Ok(Some(v)),
        _ => Err(format!("not a number: '{cell}'")),
    }
}

/// Integer cells may be exported as "8.0".
pub fn parse_opt_int(cell: &str) -> Result<Option<i64>, String> {
    match parse_opt_f64(cell)? {
        None => Ok(None),
        Some(v) if v.fract() == 0.0 => Ok(Some(v as i64)),
        Some(_) => Err(format!("not a whole number: '{cell}'")),
    }
}

pub fn positive_u32(v: i64) -> Option<u32> {
    if v > 0 { u32::try_from(v).ok() } else { None }
}

#[cfg(test)]
#[path = "../../tests/src_inline/input/table.rs"]
mod tests;
