use std::collections::HashSet;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use crate::errors::PipelineError;
use crate::types::ColumnName;

/// Minimal in-memory tabular frame backing the CSV artifacts.
///
/// Values are kept as strings; stages interpret individual columns
/// (class ids, feature values) at their own boundaries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Frame {
    columns: Vec<ColumnName>,
    rows: Vec<Vec<String>>,
}

impl Frame {
    /// Build a frame from a header and row data.
    pub fn new(columns: Vec<ColumnName>, rows: Vec<Vec<String>>) -> Self {
        Self { columns, rows }
    }

    /// Read a CSV document from `reader`.
    ///
    /// Rows shorter than the header are padded with empty strings and rows
    /// longer than the header are truncated, so every row has exactly one
    /// value per column (missing values become the empty string).
    pub fn from_reader<R: io::Read>(reader: R) -> Result<Self, PipelineError> {
        let mut csv_reader = csv::ReaderBuilder::new()
            .flexible(true)
            .from_reader(reader);
        let columns: Vec<ColumnName> = csv_reader
            .headers()?
            .iter()
            .map(|name| name.to_string())
            .collect();
        let width = columns.len();
        let mut rows = Vec::new();
        for record in csv_reader.records() {
            let record = record?;
            let mut row: Vec<String> = record.iter().map(|value| value.to_string()).collect();
            row.resize(width, String::new());
            rows.push(row);
        }
        Ok(Self { columns, rows })
    }

    /// Read a CSV file from `path`.
    pub fn read_csv(path: impl AsRef<Path>) -> Result<Self, PipelineError> {
        let file = std::fs::File::open(path.as_ref())?;
        Self::from_reader(file)
    }

    /// Write the frame as CSV to `path`, header first.
    pub fn write_csv(&self, path: impl AsRef<Path>) -> Result<(), PipelineError> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        writer.write_record(&self.columns)?;
        for row in &self.rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Column names in order.
    pub fn columns(&self) -> &[ColumnName] {
        &self.columns
    }

    /// Row data in order.
    pub fn rows(&self) -> &[Vec<String>] {
        &self.rows
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Returns `true` when the frame has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Index of the column named `name`.
    pub fn column_index(&self, name: &str) -> Result<usize, PipelineError> {
        self.columns
            .iter()
            .position(|column| column == name)
            .ok_or_else(|| PipelineError::Schema {
                column: name.to_string(),
            })
    }

    /// All values of the column named `name`, in row order.
    pub fn column(&self, name: &str) -> Result<Vec<&str>, PipelineError> {
        let idx = self.column_index(name)?;
        Ok(self.rows.iter().map(|row| row[idx].as_str()).collect())
    }

    /// Project the frame down to the listed `(existing, renamed)` columns.
    ///
    /// Columns not listed are dropped; listed columns appear in the given
    /// order under their new names.
    pub fn select(&self, mapping: &[(&str, &str)]) -> Result<Self, PipelineError> {
        let mut indices = Vec::with_capacity(mapping.len());
        let mut columns = Vec::with_capacity(mapping.len());
        for (existing, renamed) in mapping {
            indices.push(self.column_index(existing)?);
            columns.push((*renamed).to_string());
        }
        let rows = self
            .rows
            .iter()
            .map(|row| indices.iter().map(|&idx| row[idx].clone()).collect())
            .collect();
        Ok(Self { columns, rows })
    }

    /// Remove rows that are exact duplicates across all columns, keeping the
    /// first occurrence.
    pub fn dedup_rows(&mut self) {
        let mut seen: HashSet<Vec<String>> = HashSet::with_capacity(self.rows.len());
        self.rows.retain(|row| seen.insert(row.clone()));
    }

    /// Replace every value of the column named `name` with `f(value)`.
    pub fn map_column<F>(&mut self, name: &str, mut f: F) -> Result<(), PipelineError>
    where
        F: FnMut(&str) -> String,
    {
        self.try_map_column(name, |value| Ok(f(value)))
    }

    /// Fallible variant of [`map_column`](Self::map_column); the first error
    /// aborts the mapping and leaves already-mapped values in place.
    pub fn try_map_column<F>(&mut self, name: &str, mut f: F) -> Result<(), PipelineError>
    where
        F: FnMut(&str) -> Result<String, PipelineError>,
    {
        let idx = self.column_index(name)?;
        for row in &mut self.rows {
            row[idx] = f(&row[idx])?;
        }
        Ok(())
    }

    /// Split the frame into two by row index sets, preserving the index order
    /// given in each set.
    pub fn take_rows(&self, indices: &[usize]) -> Self {
        let rows = indices.iter().map(|&idx| self.rows[idx].clone()).collect();
        Self {
            columns: self.columns.clone(),
            rows,
        }
    }
}

fn staging_path(path: &Path) -> PathBuf {
    let mut name = path
        .file_name()
        .map(|name| name.to_os_string())
        .unwrap_or_default();
    name.push(".tmp");
    path.with_file_name(name)
}

/// Write two frames so that either both files appear at their final paths or
/// neither does.
///
/// Each frame is first written to a sibling `.tmp` file and only renamed into
/// place once both writes succeed; any failure removes everything already
/// produced, staging files included.
pub fn write_csv_pair(
    first: &Frame,
    first_path: &Path,
    second: &Frame,
    second_path: &Path,
) -> Result<(), PipelineError> {
    let first_staged = staging_path(first_path);
    let second_staged = staging_path(second_path);

    let written = first
        .write_csv(&first_staged)
        .and_then(|_| second.write_csv(&second_staged));
    if let Err(err) = written {
        let _ = fs::remove_file(&first_staged);
        let _ = fs::remove_file(&second_staged);
        return Err(err);
    }

    if let Err(err) = fs::rename(&first_staged, first_path) {
        let _ = fs::remove_file(&first_staged);
        let _ = fs::remove_file(&second_staged);
        return Err(err.into());
    }
    if let Err(err) = fs::rename(&second_staged, second_path) {
        let _ = fs::remove_file(first_path);
        let _ = fs::remove_file(&second_staged);
        return Err(err.into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_frame() -> Frame {
        Frame::new(
            vec!["a".to_string(), "b".to_string(), "c".to_string()],
            vec![
                vec!["1".to_string(), "x".to_string(), "p".to_string()],
                vec!["2".to_string(), "y".to_string(), "q".to_string()],
                vec!["1".to_string(), "x".to_string(), "p".to_string()],
            ],
        )
    }

    #[test]
    fn from_reader_pads_short_rows() {
        let csv = "a,b,c\n1,x\n2,y,q,extra\n";
        let frame = Frame::from_reader(csv.as_bytes()).unwrap();
        assert_eq!(frame.columns(), &["a", "b", "c"]);
        assert_eq!(frame.rows()[0], vec!["1", "x", ""]);
        assert_eq!(frame.rows()[1], vec!["2", "y", "q"]);
    }

    #[test]
    fn column_lookup_reports_missing_column() {
        let frame = sample_frame();
        assert!(frame.column("a").is_ok());
        let err = frame.column("missing").unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Schema { column } if column == "missing"
        ));
    }

    #[test]
    fn select_projects_and_renames() {
        let frame = sample_frame();
        let projected = frame.select(&[("a", "target"), ("b", "text")]).unwrap();
        assert_eq!(projected.columns(), &["target", "text"]);
        assert_eq!(projected.rows()[0], vec!["1", "x"]);
        assert_eq!(projected.len(), frame.len());
    }

    #[test]
    fn dedup_rows_keeps_first_occurrence() {
        let mut frame = sample_frame();
        frame.dedup_rows();
        assert_eq!(frame.len(), 2);
        assert_eq!(frame.rows()[0], vec!["1", "x", "p"]);
        assert_eq!(frame.rows()[1], vec!["2", "y", "q"]);
    }

    #[test]
    fn map_column_rewrites_in_place() {
        let mut frame = sample_frame();
        frame
            .map_column("b", |value| value.to_uppercase())
            .unwrap();
        assert_eq!(frame.column("b").unwrap(), vec!["X", "Y", "X"]);
    }

    #[test]
    fn paired_write_produces_both_files() {
        let dir = tempfile::tempdir().unwrap();
        let first_path = dir.path().join("train.csv");
        let second_path = dir.path().join("test.csv");
        let frame = sample_frame();
        write_csv_pair(&frame, &first_path, &frame, &second_path).unwrap();
        assert_eq!(Frame::read_csv(&first_path).unwrap(), frame);
        assert_eq!(Frame::read_csv(&second_path).unwrap(), frame);
    }

    #[test]
    fn paired_write_leaves_neither_file_on_failure() {
        let dir = tempfile::tempdir().unwrap();
        let first_path = dir.path().join("train.csv");
        let second_path = dir.path().join("test.csv");
        // A directory at the second target makes its rename fail.
        std::fs::create_dir(&second_path).unwrap();

        let frame = sample_frame();
        assert!(write_csv_pair(&frame, &first_path, &frame, &second_path).is_err());
        assert!(!first_path.exists());
        assert!(!dir.path().join("train.csv.tmp").exists());
        assert!(!dir.path().join("test.csv.tmp").exists());
    }

    #[test]
    fn csv_round_trip_preserves_frame() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("frame.csv");
        let frame = sample_frame();
        frame.write_csv(&path).unwrap();
        let read_back = Frame::read_csv(&path).unwrap();
        assert_eq!(read_back, frame);
    }
}
