//! Package validation.
//!
//! Callers supply an ordered list of [`PackageRule`]s and a source label;
//! [`validate`] runs them against a [`BuiltPackage`](crate::package::BuiltPackage)
//! and streams the reported [`PackageIssue`]s.
//!
//! # Fault isolation
//!
//! ```text
//! rules:  [R1] ──Err──► (nothing)
//!         [  ] ──skip
//!         [R2] ──Ok([A, B])──► A, B
//!         [R3] ──panic──► (nothing)
//! ```
//!
//! A failing rule never aborts the pass. Its failure is kept on the
//! [`Issues`] iterator and can be read back with [`Issues::failures`].

mod issue;
mod rule;
mod rule_set;
mod runner;

pub use issue::{IssueLevel, PackageIssue, ValidationSummary};
pub use rule::{from_fn, FnRule, PackageRule, RuleError, RuleSlot};
pub use rule_set::RuleSet;
pub use runner::{run_rule, validate, Issues, RuleFailure, RuleFailureKind, RuleOutcome};
