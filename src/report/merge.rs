use std::collections::BTreeMap;
use std::io;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Default)]
pub struct MergeOutcome {
    pub files_merged: usize,
    pub rows: usize,
    pub columns: Vec<String>,
    pub failed: Vec<(PathBuf, String)>,
}

struct SummaryFile {
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
}

fn read_summary(path: &Path) -> csv::Result<SummaryFile> {
    let mut rdr = csv::ReaderBuilder::new().flexible(true).from_path(path)?;
    let headers = rdr.headers()?.iter().map(str::to_string).collect();
    let mut rows = Vec::new();
    for record in rdr.records() {
        rows.push(record?.iter().map(str::to_string).collect());
    }
    Ok(SummaryFile { headers, rows })
}

/// Concatenates exported quote summaries. Columns are the union of all
/// headers in first-seen order; cells a file lacks are left empty. An
/// unreadable file is reported in the outcome and skipped.
pub fn merge_summaries<W: io::Write>(inputs: &[PathBuf], writer: W) -> io::Result<MergeOutcome> {
    let mut outcome = MergeOutcome::default();
    let mut files = Vec::with_capacity(inputs.len());

    for path in inputs {
        match read_summary(path) {
            Ok(file) => {
                tracing::info!(path = %path.display(), rows = file.rows.len(), "read summary");
                files.push(file);
            }
            Err(err) => {
                tracing::error!(path = %path.display(), "cannot read summary: {err}");
                outcome.failed.push((path.clone(), err.to_string()));
            }
        }
    }

    if files.is_empty() {
        return Err(io::Error::new(
            io::ErrorKind::InvalidInput,
            "no valid data found in the given summary files",
        ));
    }

    let mut columns: Vec<String> = Vec::new();
    for file in &files {
        for h in &file.headers {
            if !columns.contains(h) {
                columns.push(h.clone());
            }
        }
    }
    let position: BTreeMap<&str, usize> = columns
        .iter()
        .enumerate()
        .map(|(i, c)| (c.as_str(), i))
        .collect();

    let mut w = csv::Writer::from_writer(writer);
    w.write_record(&columns)?;
    for file in &files {
        for row in &file.rows {
            let mut out = vec![String::new(); columns.len()];
            for (h, cell) in file.headers.iter().zip(row.iter()) {
                if let Some(&idx) = position.get(h.as_str()) {
                    out[idx] = cell.clone();
                }
            }
            w.write_record(&out)?;
            outcome.rows += 1;
        }
    }
    w.flush()?;

    outcome.files_merged = files.len();
    outcome.columns = columns;
    Ok(outcome)
}

pub fn merge_summaries_to_file(inputs: &[PathBuf], out: &Path) -> io::Result<MergeOutcome> {
    if let Some(parent) = out.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    let file = std::fs::File::create(out)?;
    merge_summaries(inputs, io::BufWriter::new(file))
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/merge.rs"]
mod tests;
