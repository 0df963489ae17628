use super::entry::line_name;
use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("unable to open catalog {}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to read catalog {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to write catalog {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("unable to replace catalog {}", path.display())]
    Replace {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Line-oriented storage for catalog entries.
pub trait CatalogStore {
    /// Every line, without terminators, in file order.
    fn read_lines(&self) -> Result<Vec<String>, CatalogError>;

    fn append_line(&mut self, line: &str) -> Result<(), CatalogError>;

    /// Replace the whole catalog with `lines`. Either every line is stored
    /// or the previous contents stay untouched.
    fn replace_all(&mut self, lines: &[String]) -> Result<(), CatalogError>;

    /// First line stored under `name`.
    fn find_by_name(&self, name: &str) -> Result<Option<String>, CatalogError> {
        Ok(self
            .read_lines()?
            .into_iter()
            .find(|line| line_name(line) == name))
    }
}

/// Catalog kept in a single text file.
#[derive(Debug, Clone)]
pub struct FileCatalog {
    path: PathBuf,
}

impl FileCatalog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl CatalogStore for FileCatalog {
    /// A catalog that does not exist yet reads as empty.
    fn read_lines(&self) -> Result<Vec<String>, CatalogError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(source) => {
                return Err(CatalogError::Open {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        let text = String::from_utf8(bytes).map_err(|err| CatalogError::Read {
            path: self.path.clone(),
            source: io::Error::new(io::ErrorKind::InvalidData, err),
        })?;
        let mut lines: Vec<String> = text.split('\n').map(str::to_string).collect();
        if lines.last().is_some_and(String::is_empty) {
            lines.pop();
        }
        Ok(lines)
    }

    fn append_line(&mut self, line: &str) -> Result<(), CatalogError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|source| CatalogError::Open {
                path: self.path.clone(),
                source,
            })?;
        writeln!(file, "{line}").map_err(|source| CatalogError::Write {
            path: self.path.clone(),
            source,
        })
    }

    fn replace_all(&mut self, lines: &[String]) -> Result<(), CatalogError> {
        let write_err = |source| CatalogError::Write {
            path: self.path.clone(),
            source,
        };
        let mut tmp = NamedTempFile::new_in(self.dir()).map_err(write_err)?;
        for line in lines {
            writeln!(tmp, "{line}").map_err(write_err)?;
        }
        tmp.as_file().sync_all().map_err(write_err)?;
        tmp.persist(&self.path)
            .map_err(|err| CatalogError::Replace {
                path: self.path.clone(),
                source: err.error,
            })?;
        Ok(())
    }
}
