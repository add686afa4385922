pub mod check;
pub mod render;
pub mod show;
pub mod stats;

use std::path::Path;

use anyhow::Result;
use tracing::info;

use crate::labels::StatusLabels;

pub(crate) fn load_labels(path: Option<&Path>) -> Result<StatusLabels> {
    match path {
        Some(path) => {
            let labels = StatusLabels::load(path)?;
            info!(path = %path.display(), "loaded status label override");
            Ok(labels)
        }
        None => Ok(StatusLabels::default()),
    }
}
