//! CSV output
//!
//! A reset write truncates the destination and writes the header; an append
//! write adds rows only. One export owns its destination file, so no locking
//! is done here.

use crate::core::transform::{column_union, flatten_record, project, FlatRecord};
use crate::domain::Result;
use std::fs::OpenOptions;
use std::path::{Path, PathBuf};

/// How a batch is written to its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteMode {
    /// Create or truncate, then write the header
    Reset,
    /// Append rows to the existing file (created if absent)
    Append,
}

impl WriteMode {
    /// Mode for the page at `index` of a run
    pub fn for_page(index: usize) -> Self {
        if index == 0 {
            WriteMode::Reset
        } else {
            WriteMode::Append
        }
    }
}

/// Writes `records` to `destination` as CSV
///
/// Records are flattened to dotted column names. With `columns`, rows are
/// projected onto exactly those columns; without, the header is the union of
/// flattened keys in encounter order.
///
/// # Errors
///
/// Returns an I/O error if the file cannot be opened and a CSV error if a
/// row cannot be written.
///
/// # Examples
///
/// ```no_run
/// use lucca_export::core::export::writer::{write_records, WriteMode};
/// use serde_json::json;
/// use std::path::Path;
///
/// # fn example() -> lucca_export::domain::Result<()> {
/// let columns = vec!["id".to_string(), "name".to_string()];
/// write_records(
///     &[json!({"id": 1, "name": "Finance"})],
///     Path::new("Results/departments.csv"),
///     Some(&columns),
///     WriteMode::Reset,
/// )?;
/// # Ok(())
/// # }
/// ```
pub fn write_records(
    records: &[serde_json::Value],
    destination: &Path,
    columns: Option<&[String]>,
    mode: WriteMode,
) -> Result<PathBuf> {
    let rows: Vec<FlatRecord> = records.iter().map(flatten_record).collect();
    let columns = match columns {
        Some(columns) => columns.to_vec(),
        None => column_union(&rows),
    };

    let mut options = OpenOptions::new();
    match mode {
        WriteMode::Reset => options.write(true).create(true).truncate(true),
        WriteMode::Append => options.append(true).create(true),
    };
    let file = options.open(destination)?;

    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(file);

    if mode == WriteMode::Reset {
        writer.write_record(&columns)?;
    }
    for row in &rows {
        writer.write_record(project(row, &columns))?;
    }
    writer.flush()?;

    tracing::debug!(
        path = %destination.display(),
        rows = rows.len(),
        mode = ?mode,
        "Wrote CSV batch"
    );

    Ok(destination.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use tempfile::TempDir;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    fn departments() -> Vec<Value> {
        vec![
            json!({"id": 1, "name": "Finance", "parentId": null}),
            json!({"id": 2, "name": "R&D, Paris", "parentId": 1}),
        ]
    }

    #[test]
    fn test_reset_writes_header_and_rows() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("departments.csv");
        let cols = columns(&["id", "name", "parentId"]);

        let written = write_records(&departments(), &path, Some(&cols), WriteMode::Reset).unwrap();

        assert_eq!(written, path);
        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,name,parentId\n1,Finance,\n2,\"R&D, Paris\",1\n");
    }

    #[test]
    fn test_reset_twice_is_identical() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("departments.csv");
        let cols = columns(&["id", "name"]);

        write_records(&departments(), &path, Some(&cols), WriteMode::Reset).unwrap();
        let first = std::fs::read(&path).unwrap();
        write_records(&departments(), &path, Some(&cols), WriteMode::Reset).unwrap();
        let second = std::fs::read(&path).unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_append_adds_rows_without_header() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.csv");
        let cols = columns(&["id"]);

        write_records(&[json!({"id": 1})], &path, Some(&cols), WriteMode::Reset).unwrap();
        write_records(&[json!({"id": 2}), json!({"id": 3})], &path, Some(&cols), WriteMode::Append)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id\n1\n2\n3\n");
    }

    #[test]
    fn test_append_creates_missing_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("contracts.csv");
        let cols = columns(&["id"]);

        write_records(&[json!({"id": 9})], &path, Some(&cols), WriteMode::Append).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "9\n");
    }

    #[test]
    fn test_projection_matches_columns_exactly() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.csv");
        let cols = columns(&["lastName", "id", "department.name"]);
        let records = vec![json!({
            "id": 4,
            "firstName": "Ada",
            "department": {"name": "Ops", "id": 3}
        })];

        write_records(&records, &path, Some(&cols), WriteMode::Reset).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(String::from).collect();
        assert_eq!(header, cols);
        let row = reader.records().next().unwrap().unwrap();
        assert_eq!(row.iter().collect::<Vec<_>>(), vec!["", "4", "Ops"]);
    }

    #[test]
    fn test_union_header_without_columns() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("free.csv");
        let records = vec![
            json!({"id": 1, "tags": ["a"]}),
            json!({"id": 2, "owner": {"id": 8}}),
        ];

        write_records(&records, &path, None, WriteMode::Reset).unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "id,tags,owner.id\n1,\"[\"\"a\"\"]\",\n2,,8\n");
    }

    #[test]
    fn test_empty_batch_with_columns_writes_header_only() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("users.csv");
        let cols = columns(&["id", "mail"]);

        write_records(&[], &path, Some(&cols), WriteMode::Reset).unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "id,mail\n");
    }

    #[test]
    fn test_missing_directory_is_io_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("missing").join("users.csv");

        let err = write_records(&[json!({"id": 1})], &path, None, WriteMode::Reset).unwrap_err();
        assert!(matches!(err, crate::domain::ExportError::Io(_)));
    }

    #[test]
    fn test_write_mode_for_page() {
        assert_eq!(WriteMode::for_page(0), WriteMode::Reset);
        assert_eq!(WriteMode::for_page(1), WriteMode::Append);
    }
}
