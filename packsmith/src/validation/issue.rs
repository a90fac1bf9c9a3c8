//! Packaging issues reported by validation rules.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Severity of a packaging issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum IssueLevel {
    /// The package works but could be improved.
    Warning,
    /// The package is broken or will be rejected.
    Error,
}

impl fmt::Display for IssueLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IssueLevel::Warning => write!(f, "warning"),
            IssueLevel::Error => write!(f, "error"),
        }
    }
}

/// One packaging problem found by a validation rule.
///
/// The runner passes issues through untouched; their content is entirely up
/// to the rule that reported them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageIssue {
    /// Severity.
    pub level: IssueLevel,

    /// Short title.
    pub title: String,

    /// What is wrong.
    pub description: String,

    /// How to fix it, if known.
    pub solution: Option<String>,
}

impl PackageIssue {
    /// Create a warning.
    pub fn warning(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(IssueLevel::Warning, title, description)
    }

    /// Create an error.
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(IssueLevel::Error, title, description)
    }

    fn new(level: IssueLevel, title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            level,
            title: title.into(),
            description: description.into(),
            solution: None,
        }
    }

    /// Attach a suggested fix.
    pub fn with_solution(mut self, solution: impl Into<String>) -> Self {
        self.solution = Some(solution.into());
        self
    }
}

impl fmt::Display for PackageIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}: {}", self.level, self.title, self.description)
    }
}

/// Counts of issues by severity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ValidationSummary {
    pub warnings: usize,
    pub errors: usize,
}

impl ValidationSummary {
    /// Count the issues in `issues`.
    pub fn from_issues<'a, I>(issues: I) -> Self
    where
        I: IntoIterator<Item = &'a PackageIssue>,
    {
        issues
            .into_iter()
            .fold(Self::default(), |mut summary, issue| {
                match issue.level {
                    IssueLevel::Warning => summary.warnings += 1,
                    IssueLevel::Error => summary.errors += 1,
                }
                summary
            })
    }

    /// Whether any error-level issue was reported.
    pub fn has_errors(&self) -> bool {
        self.errors > 0
    }
}

impl fmt::Display for ValidationSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} error(s), {} warning(s)", self.errors, self.warnings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constructors() {
        let warning = PackageIssue::warning("Title", "Desc");
        assert_eq!(warning.level, IssueLevel::Warning);
        assert!(warning.solution.is_none());

        let error = PackageIssue::error("Bad", "Broken").with_solution("Fix it");
        assert_eq!(error.level, IssueLevel::Error);
        assert_eq!(error.solution.as_deref(), Some("Fix it"));
    }

    #[test]
    fn test_display() {
        let issue = PackageIssue::error("Missing license", "No license URL");
        assert_eq!(issue.to_string(), "error: Missing license: No license URL");
    }

    #[test]
    fn test_summary_counts() {
        let issues = vec![
            PackageIssue::warning("a", "a"),
            PackageIssue::error("b", "b"),
            PackageIssue::warning("c", "c"),
        ];
        let summary = ValidationSummary::from_issues(&issues);

        assert_eq!(summary, ValidationSummary { warnings: 2, errors: 1 });
        assert!(summary.has_errors());
        assert_eq!(summary.to_string(), "1 error(s), 2 warning(s)");
    }

    #[test]
    fn test_summary_empty() {
        let summary = ValidationSummary::from_issues(&Vec::<PackageIssue>::new());
        assert!(!summary.has_errors());
        assert_eq!(summary, ValidationSummary::default());
    }
}
