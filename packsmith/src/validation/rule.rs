//! The validation rule collaborator.

use thiserror::Error;

use super::issue::PackageIssue;
use crate::package::BuiltPackage;

/// A rule that failed to run to completion.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct RuleError {
    message: String,
}

impl RuleError {
    /// Create an error with a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// The error message.
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl From<String> for RuleError {
    fn from(message: String) -> Self {
        Self::new(message)
    }
}

impl From<&str> for RuleError {
    fn from(message: &str) -> Self {
        Self::new(message)
    }
}

/// A check run against a built package.
///
/// Rules are supplied by callers; this crate ships none. A rule reports any
/// number of issues, in its own order. A rule that returns an error or panics
/// contributes no issues and does not stop the remaining rules.
///
/// # Example
///
/// ```
/// use packsmith::package::BuiltPackage;
/// use packsmith::validation::{PackageIssue, PackageRule, RuleError};
///
/// struct RequireLicense;
///
/// impl PackageRule for RequireLicense {
///     fn name(&self) -> &str {
///         "require-license"
///     }
///
///     fn validate(
///         &self,
///         package: &BuiltPackage,
///         _source: &str,
///     ) -> Result<Vec<PackageIssue>, RuleError> {
///         if package.manifest().license_url.is_some() {
///             return Ok(Vec::new());
///         }
///         Ok(vec![PackageIssue::warning(
///             "Missing license",
///             format!("{} declares no license URL", package.id()),
///         )])
///     }
/// }
/// ```
pub trait PackageRule {
    /// Name used when reporting a failure of this rule.
    fn name(&self) -> &str;

    /// Check `package`, which was loaded from `source`.
    fn validate(&self, package: &BuiltPackage, source: &str)
        -> Result<Vec<PackageIssue>, RuleError>;
}

/// An entry in an ordered rule list. Empty slots are skipped.
pub type RuleSlot = Option<Box<dyn PackageRule>>;

/// A rule backed by a closure.
///
/// Created with [`from_fn`].
pub struct FnRule<F> {
    name: String,
    check: F,
}

/// Create a rule from a name and a closure.
///
/// # Example
///
/// ```
/// use packsmith::validation::{from_fn, PackageIssue, PackageRule};
///
/// let rule = from_fn("no-empty-description", |package, _source| {
///     if package.manifest().description.is_empty() {
///         Ok(vec![PackageIssue::warning("Description", "description is empty")])
///     } else {
///         Ok(Vec::new())
///     }
/// });
/// assert_eq!(rule.name(), "no-empty-description");
/// ```
pub fn from_fn<F>(name: impl Into<String>, check: F) -> FnRule<F>
where
    F: Fn(&BuiltPackage, &str) -> Result<Vec<PackageIssue>, RuleError>,
{
    FnRule {
        name: name.into(),
        check,
    }
}

impl<F> PackageRule for FnRule<F>
where
    F: Fn(&BuiltPackage, &str) -> Result<Vec<PackageIssue>, RuleError>,
{
    fn name(&self) -> &str {
        &self.name
    }

    fn validate(
        &self,
        package: &BuiltPackage,
        source: &str,
    ) -> Result<Vec<PackageIssue>, RuleError> {
        (self.check)(package, source)
    }
}
