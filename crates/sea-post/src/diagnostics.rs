//! Typed outcomes for degraded extraction steps.

use core::fmt;

/// Which part of the bundle an extraction step failed to populate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExtractionField {
    Frequency,
    Systems,
    ModalData,
    Junctions,
    Energy,
    Response,
    PowerInput,
    PowerBalance,
    Loads,
}

impl ExtractionField {
    pub fn label(self) -> &'static str {
        match self {
            ExtractionField::Frequency => "frequency",
            ExtractionField::Systems => "systems",
            ExtractionField::ModalData => "modal_data",
            ExtractionField::Junctions => "junctions",
            ExtractionField::Energy => "energy",
            ExtractionField::Response => "result",
            ExtractionField::PowerInput => "power_input",
            ExtractionField::PowerBalance => "sea_matrix",
            ExtractionField::Loads => "loads",
        }
    }
}

/// One degraded extraction step: the field stayed empty for this reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtractionIssue {
    pub field: ExtractionField,
    pub reason: String,
}

impl ExtractionIssue {
    pub fn new(field: ExtractionField, reason: impl Into<String>) -> Self {
        Self {
            field,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for ExtractionIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field.label(), self.reason)
    }
}
