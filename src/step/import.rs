use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

pub const DEFAULT_DESCRIPTION: &str = "Default Description";

#[derive(Debug, Clone, PartialEq)]
pub struct TextFileInputStep {
    pub description: String,
    pub file_name: String,
    pub imported: bool,
    /// Every line of the file, each followed by `\n`.
    pub content: String,
}

impl Default for TextFileInputStep {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            file_name: String::new(),
            imported: false,
            content: String::new(),
        }
    }
}

impl TextFileInputStep {
    pub const EXTENSION: &'static str = ".txt";

    pub fn with_description(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Self::default()
        }
    }

    /// Import `path` under the display name `file_name`. A file that cannot be
    /// opened or read leaves the step not imported and returns the error for
    /// reporting.
    pub fn import(&mut self, file_name: &str, path: &Path) -> Result<()> {
        self.file_name = file_name.to_string();
        self.imported = false;
        self.content.clear();
        let text = read_import(path)?;
        self.content = text.lines().map(|line| format!("{line}\n")).collect();
        self.imported = true;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CsvFileInputStep {
    pub description: String,
    pub file_name: String,
    pub imported: bool,
    pub rows: Vec<Vec<String>>,
}

impl Default for CsvFileInputStep {
    fn default() -> Self {
        Self {
            description: DEFAULT_DESCRIPTION.to_string(),
            file_name: String::new(),
            imported: false,
            rows: Vec::new(),
        }
    }
}

impl CsvFileInputStep {
    pub const EXTENSION: &'static str = ".csv";

    pub fn with_description(description: &str) -> Self {
        Self {
            description: description.to_string(),
            ..Self::default()
        }
    }

    pub fn import(&mut self, file_name: &str, path: &Path) -> Result<()> {
        self.file_name = file_name.to_string();
        self.imported = false;
        self.rows.clear();
        let text = read_import(path)?;
        self.rows = text.lines().map(split_row).collect();
        self.imported = true;
        Ok(())
    }

    /// Rows flattened to one `, `-joined line each.
    pub fn flattened_rows(&self) -> Vec<String> {
        self.rows.iter().map(|row| row.join(", ")).collect()
    }
}

fn read_import(path: &Path) -> Result<String> {
    let bytes = fs::read(path).with_context(|| format!("open {}", path.display()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Split one CSV line on commas. No quoting; a single trailing empty cell
/// (from a trailing comma) is dropped, and an empty line is an empty row.
fn split_row(line: &str) -> Vec<String> {
    let mut cells: Vec<String> = line.split(',').map(str::to_string).collect();
    if cells.last().is_some_and(String::is_empty) {
        cells.pop();
    }
    cells
}
