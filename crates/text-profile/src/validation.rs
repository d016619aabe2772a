use crate::config::ValidationThresholds;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Soft problems with a profile document. None of them make it invalid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ValidationWarning {
    /// The document has no content
    Empty,
    /// Shorter than the informative minimum
    Short,
    /// Longer than the comfortable maximum
    Long,
}

impl fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "Profile is empty"),
            Self::Short => write!(f, "Profile is very short; add more detail about your farm"),
            Self::Long => write!(f, "Profile is very long; consider summarizing"),
        }
    }
}

/// Outcome of [`validate_content`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileValidation {
    pub is_valid: bool,
    pub warnings: Vec<ValidationWarning>,
}

impl ProfileValidation {
    #[must_use]
    pub fn has_warning(&self, warning: ValidationWarning) -> bool {
        self.warnings.contains(&warning)
    }
}

/// Check `content` against the length bands in `thresholds`.
///
/// Content is never rejected; `is_valid` is always true.
#[must_use]
pub fn validate_content(content: &str, thresholds: &ValidationThresholds) -> ProfileValidation {
    let chars = content.chars().count();
    let mut warnings = Vec::new();

    if chars == 0 {
        warnings.push(ValidationWarning::Empty);
    } else if chars < thresholds.min_informative_chars {
        warnings.push(ValidationWarning::Short);
    } else if chars > thresholds.max_comfortable_chars {
        warnings.push(ValidationWarning::Long);
    }

    ProfileValidation {
        is_valid: true,
        warnings,
    }
}
