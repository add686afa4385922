use std::collections::HashMap;
use std::path::Path;

use anyhow::Result;

use crate::util;

/// Label shown for a citation that has no verification result.
pub const UNKNOWN_LABEL: &str = "unknown";

/// Immutable status-code to display-label table. Owned configuration data
/// rather than an ambient global; an unrecognized status code displays
/// verbatim.
#[derive(Debug, Clone)]
pub struct StatusLabels {
    labels: HashMap<String, String>,
}

impl Default for StatusLabels {
    fn default() -> Self {
        let labels = [
            ("valid", "Valid"),
            ("not_found", "Not Found"),
            ("quote_mismatch", "Quote Mismatch"),
            ("overruled", "Overruled"),
            ("superseded", "Superseded"),
        ]
        .into_iter()
        .map(|(code, label)| (code.to_string(), label.to_string()))
        .collect();

        Self { labels }
    }
}

impl StatusLabels {
    /// Loads an override table from a JSON object of `{"status": "Label"}`
    /// entries.
    pub fn load(path: &Path) -> Result<Self> {
        let labels: HashMap<String, String> = util::load_json(path)?;
        Ok(Self { labels })
    }

    pub fn label<'a>(&'a self, status: &'a str) -> &'a str {
        self.labels.get(status).map(String::as_str).unwrap_or(status)
    }

    pub fn recognizes(&self, status: &str) -> bool {
        self.labels.contains_key(status)
    }
}

#[cfg(test)]
mod tests {
    use super::StatusLabels;

    #[test]
    fn default_table_covers_the_five_statuses() {
        let labels = StatusLabels::default();

        assert_eq!(labels.label("valid"), "Valid");
        assert_eq!(labels.label("not_found"), "Not Found");
        assert_eq!(labels.label("quote_mismatch"), "Quote Mismatch");
        assert_eq!(labels.label("overruled"), "Overruled");
        assert_eq!(labels.label("superseded"), "Superseded");
    }

    #[test]
    fn unrecognized_status_displays_verbatim() {
        let labels = StatusLabels::default();

        assert_eq!(labels.label("pending_review"), "pending_review");
        assert!(!labels.recognizes("pending_review"));
    }
}
