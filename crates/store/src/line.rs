//! Raw line operations on a single text file.
//!
//! `LineStore` knows nothing about record formats; it appends lines, scans
//! them back, and rewrites the file without a selected subset. Every
//! operation opens the file, works, and closes it again, so a store handle
//! holds no file descriptor between calls.

use std::fs::{self, File, OpenOptions};
use std::io::{self, BufRead, BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use crate::error::{Result, StoreError};

/// Handle to one line-oriented data file.
pub struct LineStore {
    path: PathBuf,
}

impl LineStore {
    /// Create a handle to `filename` inside `dir`, creating `dir` if needed.
    ///
    /// The file itself is not created until the first append; scanning a
    /// store whose file does not exist yields no lines.
    pub fn open(dir: impl AsRef<Path>, filename: impl AsRef<str>) -> Result<Self> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        Ok(Self {
            path: dir.join(filename.as_ref()),
        })
    }

    /// Full path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append one line to the end of the file, creating it if absent.
    ///
    /// `line` must not contain newlines; the trailing newline is added here.
    pub fn append(&self, line: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        file.write_all(line.as_bytes())?;
        file.write_all(b"\n")?;
        Ok(())
    }

    /// Iterate over the lines of the file, in order.
    ///
    /// A missing file is an empty store, not an error. I/O failures while
    /// reading surface through the iterator items.
    pub fn lines(&self) -> Result<Lines> {
        match File::open(&self.path) {
            Ok(file) => Ok(Lines(Some(BufReader::new(file).lines()))),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(Lines(None)),
            Err(e) => Err(e.into()),
        }
    }

    /// Rewrite the file keeping every line for which `exclude` is false.
    ///
    /// Retained lines keep their order. The replacement is built in a temp
    /// sibling file and swapped in with a rename, so a failure partway
    /// through leaves the original file untouched. Returns the number of
    /// excluded lines; a missing file is a no-op.
    pub fn rewrite_excluding<F>(&self, mut exclude: F) -> Result<usize>
    where
        F: FnMut(&str) -> bool,
    {
        let source = match File::open(&self.path) {
            Ok(file) => file,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(e.into()),
        };

        let temp_path = self.path.with_extension("tmp");
        let excluded = match Self::copy_retained(source, &temp_path, &mut exclude) {
            Ok(excluded) => excluded,
            Err(e) => {
                let _ = fs::remove_file(&temp_path);
                return Err(StoreError::Rewrite {
                    path: self.path.display().to_string(),
                    source: e,
                });
            }
        };

        if let Err(e) = fs::rename(&temp_path, &self.path) {
            let _ = fs::remove_file(&temp_path);
            return Err(StoreError::Rewrite {
                path: self.path.display().to_string(),
                source: e,
            });
        }

        tracing::debug!(
            "Rewrote {} ({} lines excluded)",
            self.path.display(),
            excluded
        );

        Ok(excluded)
    }

    fn copy_retained(
        source: File,
        temp_path: &Path,
        exclude: &mut dyn FnMut(&str) -> bool,
    ) -> io::Result<usize> {
        let mut writer = BufWriter::new(File::create(temp_path)?);
        let mut excluded = 0;

        for line in BufReader::new(source).lines() {
            let line = line?;
            if exclude(&line) {
                excluded += 1;
                continue;
            }
            writer.write_all(line.as_bytes())?;
            writer.write_all(b"\n")?;
        }

        writer.flush()?;
        Ok(excluded)
    }
}

/// Iterator over the lines of a store.
pub struct Lines(Option<io::Lines<BufReader<File>>>);

impl Iterator for Lines {
    type Item = io::Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        self.0.as_mut()?.next()
    }
}
