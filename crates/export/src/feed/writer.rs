use std::fs::{self, File, OpenOptions};
use std::marker::PhantomData;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use tracing::debug;

use super::rows::FeedRow;
use crate::error::{ExportError, ExportResult};

/// Handle to a created feed file.
///
/// Only [`FeedWriter::create`] hands one out, and it writes the header
/// first, so rows can never precede the header. Every append reopens the
/// file, writes one row and flushes; a crash leaves a valid CSV holding the
/// rows appended so far.
#[derive(Debug)]
pub struct FeedWriter<R> {
    path: PathBuf,
    append_lock: Mutex<()>,
    _row: PhantomData<fn(&R)>,
}

impl<R: FeedRow> FeedWriter<R> {
    /// Create or truncate `path` and write the header line.
    pub fn create(path: impl Into<PathBuf>) -> ExportResult<Self> {
        let path = path.into();

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|e| ExportError::io(parent, e))?;
        }

        let file = File::create(&path).map_err(|e| ExportError::io(&path, e))?;
        let mut writer = csv::Writer::from_writer(file);
        writer.write_record(R::COLUMNS)?;
        writer.flush().map_err(|e| ExportError::io(&path, e))?;

        debug!(path = %path.display(), columns = R::COLUMNS.len(), "feed created");

        Ok(Self {
            path,
            append_lock: Mutex::new(()),
            _row: PhantomData,
        })
    }

    /// Append exactly one row and flush it.
    pub fn append(&self, row: &R) -> ExportResult<()> {
        let _guard = self.append_lock.lock().unwrap_or_else(PoisonError::into_inner);

        let file = OpenOptions::new()
            .append(true)
            .open(&self.path)
            .map_err(|e| ExportError::io(&self.path, e))?;
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(file);
        writer.serialize(row)?;
        writer.flush().map_err(|e| ExportError::io(&self.path, e))?;

        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feed::CategoryRow;

    fn row(id: &str) -> CategoryRow {
        CategoryRow {
            id: id.into(),
            ccid: id.into(),
            name: format!("{id}, the category"),
            url_path: format!("products/{id}"),
            desc: String::new(),
            parent_ccid: String::new(),
        }
    }

    #[test]
    fn header_is_written_once_before_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/dir/categories.csv");

        let writer = FeedWriter::<CategoryRow>::create(&path).unwrap();
        writer.append(&row("A")).unwrap();
        writer.append(&row("B")).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines[0], "id,ccid,name,url_path,desc,parent_ccid");
        assert_eq!(lines.len(), 3);
        assert_eq!(lines.iter().filter(|l| l.starts_with("id,ccid")).count(), 1);
        // Embedded separator is quoted.
        assert_eq!(lines[1], "A,A,\"A, the category\",products/A,,");
    }

    #[test]
    fn creating_twice_resets_to_header_only() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.csv");

        let writer = FeedWriter::<CategoryRow>::create(&path).unwrap();
        writer.append(&row("A")).unwrap();
        drop(writer);

        FeedWriter::<CategoryRow>::create(&path).unwrap();
        let text = fs::read_to_string(&path).unwrap();
        assert_eq!(text.lines().count(), 1);
    }

    #[test]
    fn rows_read_back_with_csv_reader() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.csv");

        let writer = FeedWriter::<CategoryRow>::create(&path).unwrap();
        writer.append(&row("A")).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let records: Vec<csv::StringRecord> = reader.records().map(Result::unwrap).collect();
        assert_eq!(records.len(), 1);
        assert_eq!(&records[0][2], "A, the category");
    }

    #[test]
    fn append_after_file_removal_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("categories.csv");

        let writer = FeedWriter::<CategoryRow>::create(&path).unwrap();
        fs::remove_file(&path).unwrap();

        let err = writer.append(&row("A")).unwrap_err();
        assert!(matches!(err, ExportError::Io { .. }));
    }
}
