//! CSV writer: one file per workbook sheet.

use crate::ExportResult;
use crate::workbook::{Cell, Sheet, Workbook};
use std::fs;
use std::path::{Path, PathBuf};

/// Render a sheet as RFC 4180 CSV with CRLF line endings.
///
/// Rows shorter than the widest row are not padded.
pub fn sheet_to_csv(sheet: &Sheet) -> String {
    let mut out = String::new();
    for row in &sheet.rows {
        let line: Vec<String> = row.iter().map(cell_field).collect();
        out.push_str(&line.join(","));
        out.push_str("\r\n");
    }
    out
}

/// Write `<dir>/<sheet name>.csv` for every sheet. Returns the written paths
/// in sheet order.
pub fn write_csv_dir(workbook: &Workbook, dir: &Path) -> ExportResult<Vec<PathBuf>> {
    fs::create_dir_all(dir)?;
    let mut written = Vec::with_capacity(workbook.sheets.len());
    for sheet in &workbook.sheets {
        let path = dir.join(format!("{}.csv", file_stem(&sheet.name)));
        fs::write(&path, sheet_to_csv(sheet))?;
        written.push(path);
    }
    tracing::debug!(dir = %dir.display(), files = written.len(), "csv export written");
    Ok(written)
}

fn cell_field(cell: &Cell) -> String {
    match cell {
        Cell::Text(s) => quote(s),
        Cell::Number(v) => v.to_string(),
        Cell::Empty => String::new(),
    }
}

fn quote(s: &str) -> String {
    if s.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", s.replace('"', "\"\""))
    } else {
        s.to_string()
    }
}

fn file_stem(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() { "sheet".to_string() } else { stem }
}
