use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use super::{Error, Verify};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    Id,
    Age,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    #[serde(default = "default_report_path")]
    pub path: PathBuf,
    #[serde(default = "default_originals_title")]
    pub originals_title: String,
    #[serde(default = "default_accepted_title")]
    pub accepted_title: String,
    /// Append to an existing report instead of truncating it.
    #[serde(default)]
    pub append: bool,
    #[serde(default)]
    pub sort_by: Option<SortKey>,
    /// Emit id and age sums below the accepted table.
    #[serde(default)]
    pub summary: bool,
}

fn default_report_path() -> PathBuf {
    PathBuf::from("results.txt")
}

fn default_originals_title() -> String {
    "Original records".to_string()
}

fn default_accepted_title() -> String {
    "Transformed records, filtered".to_string()
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            path: default_report_path(),
            originals_title: default_originals_title(),
            accepted_title: default_accepted_title(),
            append: false,
            sort_by: None,
            summary: false,
        }
    }
}

impl Verify for ReportConfig {
    fn verify(&mut self) -> super::Result<()> {
        if self.path.as_os_str().is_empty() {
            return Err(Error::EmptyField("report", "path"));
        }

        Ok(())
    }
}
