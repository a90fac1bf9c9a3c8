//! Runs validation rules with per-rule fault isolation.

use std::any::Any;
use std::fmt;
use std::iter::FusedIterator;
use std::panic::{self, AssertUnwindSafe};

use super::issue::PackageIssue;
use super::rule::{PackageRule, RuleError, RuleSlot};
use crate::package::BuiltPackage;

/// Why a rule produced no result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleFailureKind {
    /// The rule returned an error.
    Error(RuleError),
    /// The rule panicked; holds the panic message when it was a string.
    Panicked(String),
}

/// A rule failure that was absorbed by the runner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RuleFailure {
    /// Name of the failed rule.
    pub rule: String,
    /// What went wrong.
    pub kind: RuleFailureKind,
}

impl fmt::Display for RuleFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            RuleFailureKind::Error(e) => write!(f, "rule '{}' failed: {}", self.rule, e),
            RuleFailureKind::Panicked(msg) => write!(f, "rule '{}' panicked: {}", self.rule, msg),
        }
    }
}

/// Result of running a single rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RuleOutcome {
    /// The rule ran and reported these issues.
    Reported(Vec<PackageIssue>),
    /// The rule failed.
    Failed(RuleFailure),
}

impl RuleOutcome {
    /// The issues this outcome contributes. A failure contributes none.
    pub fn into_issues(self) -> Vec<PackageIssue> {
        match self {
            RuleOutcome::Reported(issues) => issues,
            RuleOutcome::Failed(_) => Vec::new(),
        }
    }

    /// Whether the rule failed.
    pub fn is_failure(&self) -> bool {
        matches!(self, RuleOutcome::Failed(_))
    }
}

/// Run one rule, converting errors and panics into [`RuleOutcome::Failed`].
pub fn run_rule(rule: &dyn PackageRule, package: &BuiltPackage, source: &str) -> RuleOutcome {
    let result = panic::catch_unwind(AssertUnwindSafe(|| rule.validate(package, source)));

    let kind = match result {
        Ok(Ok(issues)) => return RuleOutcome::Reported(issues),
        Ok(Err(e)) => RuleFailureKind::Error(e),
        Err(payload) => RuleFailureKind::Panicked(panic_message(payload.as_ref())),
    };

    RuleOutcome::Failed(RuleFailure {
        rule: rule.name().to_string(),
        kind,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        (*msg).to_string()
    } else if let Some(msg) = payload.downcast_ref::<String>() {
        msg.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

/// Run `rules` against `package` and stream the reported issues.
///
/// Rules run in slice order and empty slots are skipped. The issues of each
/// rule are yielded in the rule's own order before the next rule runs, so a
/// rule is only invoked once the consumer has drained the issues before it.
/// A rule that returns an error or panics contributes no issues; the pass
/// continues with the next rule and nothing is returned to the caller.
/// [`Issues::failures`] lists the absorbed failures for diagnostics.
///
/// # Example
///
/// ```
/// use packsmith::validation::{from_fn, validate, PackageIssue, RuleError, RuleSlot};
/// use packsmith::{build_package, PackageMetadata};
/// use semver::Version;
///
/// let package = build_package(&PackageMetadata::new("A", Version::new(1, 0, 0)), vec![]).unwrap();
///
/// let rules: Vec<RuleSlot> = vec![
///     Some(Box::new(from_fn("broken", |_, _| Err(RuleError::new("boom"))))),
///     None,
///     Some(Box::new(from_fn("ok", |_, _| {
///         Ok(vec![PackageIssue::warning("A", "first"), PackageIssue::warning("B", "second")])
///     }))),
/// ];
///
/// let titles: Vec<String> = validate(&package, &rules, "local")
///     .map(|issue| issue.title)
///     .collect();
/// assert_eq!(titles, vec!["A", "B"]);
/// ```
pub fn validate<'a>(package: &'a BuiltPackage, rules: &'a [RuleSlot], source: &'a str) -> Issues<'a> {
    Issues {
        package,
        source,
        rules: rules.iter().enumerate(),
        pending: Vec::new().into_iter(),
        failures: Vec::new(),
    }
}

/// Lazy sequence of issues produced by [`validate`].
pub struct Issues<'a> {
    package: &'a BuiltPackage,
    source: &'a str,
    rules: std::iter::Enumerate<std::slice::Iter<'a, RuleSlot>>,
    pending: std::vec::IntoIter<PackageIssue>,
    failures: Vec<(usize, RuleFailure)>,
}

impl Issues<'_> {
    /// Failures absorbed so far, with each rule's position in the rule list.
    pub fn failures(&self) -> &[(usize, RuleFailure)] {
        &self.failures
    }
}

impl Iterator for Issues<'_> {
    type Item = PackageIssue;

    fn next(&mut self) -> Option<PackageIssue> {
        loop {
            if let Some(issue) = self.pending.next() {
                return Some(issue);
            }

            let (index, slot) = self.rules.next()?;
            let Some(rule) = slot else {
                continue;
            };

            match run_rule(rule.as_ref(), self.package, self.source) {
                RuleOutcome::Reported(issues) => self.pending = issues.into_iter(),
                RuleOutcome::Failed(failure) => self.failures.push((index, failure)),
            }
        }
    }
}

impl FusedIterator for Issues<'_> {}

impl fmt::Debug for Issues<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Issues")
            .field("package", &self.package.id())
            .field("source", &self.source)
            .field("pending", &self.pending.len())
            .field("failures", &self.failures)
            .finish()
    }
}
