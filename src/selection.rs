use crate::model::{Citation, VerificationResult};

/// Which citation, if any, the reader currently has open. Two states:
/// unselected (initial) and selected by citation id. Exactly one writer;
/// the sequencer reads it on every pass to mark the matching segment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionState {
    selected_citation_id: Option<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Selects a citation. A citation with no verification result is inert:
    /// the selection is refused and the current state is kept.
    pub fn select(&mut self, citation: &Citation, result: Option<&VerificationResult>) -> bool {
        if result.is_none() {
            return false;
        }
        self.selected_citation_id = Some(citation.id.clone());
        true
    }

    /// Returns to the unselected state. Also the handler for an external
    /// dismiss signal (escape, navigation away).
    pub fn clear(&mut self) {
        self.selected_citation_id = None;
    }

    pub fn selected_citation_id(&self) -> Option<&str> {
        self.selected_citation_id.as_deref()
    }
}
