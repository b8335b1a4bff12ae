//! Structured configuration findings.
//!
//! A [`ConfigIssue`] pins one problem to a JSON-pointer path inside a
//! [`RankConfig`](super::RankConfig), with a stable [`IssueCode`] and an
//! optional hint for fixing it.

use std::fmt;

use serde::Serialize;

/// Stable machine-readable category of a config finding.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum IssueCode {
    /// A numeric field lies outside its valid range.
    OutOfRange,
    /// A limit is zero or cannot accommodate another setting.
    LimitExceeded,
    /// A field name the schema does not know.
    UnknownField,
}

impl IssueCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OutOfRange => "out_of_range",
            Self::LimitExceeded => "limit_exceeded",
            Self::UnknownField => "unknown_field",
        }
    }
}

/// One finding about a config value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ConfigIssue {
    pub code: IssueCode,
    /// JSON pointer to the offending field, e.g. `/damping`.
    pub path: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ConfigIssue {
    pub fn new(code: IssueCode, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code,
            path: path.into(),
            message: message.into(),
            hint: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

impl fmt::Display for ConfigIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.code.as_str(), self.path, self.message)?;
        if let Some(hint) = &self.hint {
            write!(f, " ({hint})")?;
        }
        Ok(())
    }
}
