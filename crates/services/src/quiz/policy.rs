use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// How a submitted answer is normalised before it is compared.
///
/// Comparison itself is always exact; this only decides what the boundary hands
/// to the session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerPolicy {
    /// Use the submitted value as-is.
    #[default]
    Exact,
    /// Strip leading and trailing whitespace.
    Trim,
}

impl AnswerPolicy {
    #[must_use]
    pub fn normalize(self, answer: Option<String>) -> Option<String> {
        match self {
            AnswerPolicy::Exact => answer,
            AnswerPolicy::Trim => answer.map(|a| a.trim().to_owned()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown answer policy {0:?} (expected \"exact\" or \"trim\")")]
pub struct ParsePolicyError(String);

impl FromStr for AnswerPolicy {
    type Err = ParsePolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "exact" => Ok(Self::Exact),
            "trim" => Ok(Self::Trim),
            _ => Err(ParsePolicyError(s.to_owned())),
        }
    }
}

impl fmt::Display for AnswerPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnswerPolicy::Exact => f.write_str("exact"),
            AnswerPolicy::Trim => f.write_str("trim"),
        }
    }
}

/// An answer posted by the visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AnswerSubmission {
    /// Chosen option; `None` when the form was sent without one.
    pub answer: Option<String>,
    /// 1-based position of the question the form was rendered for, if known.
    pub position: Option<usize>,
}

impl AnswerSubmission {
    #[must_use]
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: Some(answer.into()),
            position: None,
        }
    }

    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn at_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_keeps_whitespace() {
        assert_eq!(
            AnswerPolicy::Exact.normalize(Some(" Mars ".into())),
            Some(" Mars ".into())
        );
    }

    #[test]
    fn trim_strips_but_keeps_absence() {
        assert_eq!(
            AnswerPolicy::Trim.normalize(Some(" Mars\n".into())),
            Some("Mars".into())
        );
        assert_eq!(AnswerPolicy::Trim.normalize(None), None);
    }

    #[test]
    fn parses_from_config_strings() {
        assert_eq!("exact".parse::<AnswerPolicy>().unwrap(), AnswerPolicy::Exact);
        assert_eq!("TRIM".parse::<AnswerPolicy>().unwrap(), AnswerPolicy::Trim);
        assert!("fuzzy".parse::<AnswerPolicy>().is_err());
        assert_eq!(AnswerPolicy::Trim.to_string(), "trim");
    }
}
