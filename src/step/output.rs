//! Report writing for Output steps.
//!
//! Reports never overwrite an existing file: the requested name gets a `.txt`
//! suffix and, while that name is taken, a numeric `N_` prefix.
use crate::util::{display_path, ensure_extension};
use anyhow::{Context, Result};
use std::fs;
use std::path::{Path, PathBuf};

pub const REPORT_EXTENSION: &str = ".txt";

#[derive(Debug, Clone, PartialEq)]
pub struct OutputStep {
    pub file_name: String,
    pub title: String,
    pub description: String,
    pub lines: Vec<String>,
}

impl Default for OutputStep {
    fn default() -> Self {
        Self {
            file_name: "Default File Name".to_string(),
            title: "Default File Title".to_string(),
            description: "Default File Description".to_string(),
            lines: Vec::new(),
        }
    }
}

impl OutputStep {
    /// Full report text: two header lines, two blank lines, then every line.
    pub fn render_report(&self) -> String {
        let mut text = format!(
            "Title of the output file: {}\nDescription of the output file: {}\n\n\n",
            self.title, self.description
        );
        for line in &self.lines {
            text.push_str(line);
            text.push('\n');
        }
        text
    }

    /// Resolve a free name under `report_dir`, write the report there and
    /// record the final file name on the step.
    pub fn write_report(&mut self, report_dir: &Path) -> Result<PathBuf> {
        let path = resolve_report_path(report_dir, &self.file_name);
        if let Some(name) = path.file_name().and_then(|name| name.to_str()) {
            self.file_name = name.to_string();
        }
        fs::write(&path, self.render_report())
            .with_context(|| format!("write report {}", path.display()))?;
        tracing::info!(
            report = %display_path(&path, Some(report_dir)),
            lines = self.lines.len(),
            "report written"
        );
        Ok(path)
    }
}

/// `report` → `report.txt`; if taken, `0_report.txt`, `1_report.txt`, … until
/// an unused name is found.
pub fn resolve_report_path(report_dir: &Path, requested: &str) -> PathBuf {
    let base = ensure_extension(requested, REPORT_EXTENSION);
    let candidate = report_dir.join(&base);
    if !candidate.exists() {
        return candidate;
    }
    (0u64..)
        .map(|counter| report_dir.join(format!("{counter}_{base}")))
        .find(|path| !path.exists())
        .unwrap_or(candidate)
}
