use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Brief {
    pub title: String,
    pub content: String,
    pub citations: Vec<Citation>,
    #[serde(default)]
    pub verification_results: Vec<VerificationResult>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Citation {
    pub id: String,
    pub text: String,
    pub case_name: String,
    pub reporter: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pin_cite: Option<String>,
    pub year: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub citation_id: String,
    pub status: String,
    pub severity: Severity,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<VerificationDetails>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expected_quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub actual_quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub treatment_history: Option<String>,
}

/// Coarse three-way classification of a verification outcome. Any severity
/// string other than `critical` or `warning` folds into `Valid` at the
/// deserialization edge, so aggregation and rendering share one partition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Critical,
    Warning,
    #[serde(other)]
    Valid,
}

impl Severity {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::Warning => "warning",
            Self::Valid => "valid",
        }
    }
}

/// One unit of the final render sequence. Recomputed on every render pass;
/// never persisted.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case", rename_all_fields = "camelCase")]
pub enum RenderSegment {
    Prose {
        text: String,
    },
    Citation {
        citation: Citation,
        #[serde(skip_serializing_if = "Option::is_none")]
        result: Option<VerificationResult>,
        severity: Severity,
        status_label: String,
        tooltip: String,
        selected: bool,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SeverityCounts {
    pub valid: usize,
    pub warning: usize,
    pub critical: usize,
}

impl SeverityCounts {
    pub fn total(self) -> usize {
        self.valid + self.warning + self.critical
    }
}

/// Location of the first citation occurrence with a given severity, in
/// document order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirstOccurrence {
    pub severity: Severity,
    pub citation_id: String,
    pub ordinal: usize,
    pub byte_offset: usize,
}
