//! An ordered rule list bound to a package source.

use std::fmt;

use super::rule::{PackageRule, RuleSlot};
use super::runner::{validate, Issues};
use crate::package::BuiltPackage;

/// Rules to run against packages from one source.
///
/// # Example
///
/// ```
/// use packsmith::validation::{from_fn, PackageIssue, RuleSet};
/// use packsmith::{build_package, PackageMetadata};
/// use semver::Version;
///
/// let rules = RuleSet::new("https://feed.example/v3")
///     .with_rule(from_fn("no-authors", |package, _| {
///         if package.manifest().authors.is_empty() {
///             Ok(vec![PackageIssue::error("Authors", "no authors declared")])
///         } else {
///             Ok(Vec::new())
///         }
///     }));
///
/// let package = build_package(&PackageMetadata::new("A", Version::new(1, 0, 0)), vec![]).unwrap();
/// assert_eq!(rules.validate(&package).count(), 1);
/// ```
#[derive(Default)]
pub struct RuleSet {
    source: String,
    rules: Vec<RuleSlot>,
}

impl RuleSet {
    pub fn new(source: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            rules: Vec::new(),
        }
    }

    /// Append a rule.
    pub fn with_rule(mut self, rule: impl PackageRule + 'static) -> Self {
        self.rules.push(Some(Box::new(rule)));
        self
    }

    /// Append a slot, which may be empty.
    pub fn push(&mut self, slot: RuleSlot) {
        self.rules.push(slot);
    }

    pub fn rules(&self) -> &[RuleSlot] {
        &self.rules
    }

    /// Label passed to every rule.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Number of slots, including empty ones.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run every rule against `package`.
    pub fn validate<'a>(&'a self, package: &'a BuiltPackage) -> Issues<'a> {
        validate(package, &self.rules, &self.source)
    }
}

impl fmt::Debug for RuleSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<Option<&str>> = self
            .rules
            .iter()
            .map(|slot| slot.as_ref().map(|rule| rule.name()))
            .collect();

        f.debug_struct("RuleSet")
            .field("source", &self.source)
            .field("rules", &names)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::package::PackageBuilder;
    use crate::validation::{from_fn, PackageIssue, RuleError};
    use semver::Version;

    fn package() -> BuiltPackage {
        let mut builder = PackageBuilder::new();
        builder.id = "Set.Test".to_string();
        builder.version = Some(Version::new(2, 0, 0));
        builder.build().unwrap()
    }

    #[test]
    fn test_rule_set_runs_rules_in_order() {
        let mut rules = RuleSet::new("local")
            .with_rule(from_fn("a", |_, source| {
                Ok(vec![PackageIssue::warning("a", source)])
            }))
            .with_rule(from_fn("b", |_, _| Err(RuleError::new("broken"))));
        rules.push(None);
        rules.push(Some(Box::new(from_fn("c", |_, _| {
            Ok(vec![PackageIssue::error("c", "")])
        }))));

        assert_eq!(rules.len(), 4);
        assert_eq!(rules.source(), "local");

        let package = package();
        let mut issues = rules.validate(&package);
        let titles: Vec<String> = issues.by_ref().map(|issue| issue.title).collect();

        assert_eq!(titles, vec!["a", "c"]);
        assert_eq!(issues.failures().len(), 1);
        assert_eq!(issues.failures()[0].1.rule, "b");
    }

    #[test]
    fn test_empty_rule_set() {
        let rules = RuleSet::new("nowhere");
        assert!(rules.is_empty());
        assert_eq!(rules.validate(&package()).count(), 0);
    }

    #[test]
    fn test_debug_lists_rule_names() {
        let mut rules = RuleSet::new("src").with_rule(from_fn("named", |_, _| Ok(Vec::new())));
        rules.push(None);

        let debug = format!("{:?}", rules);
        assert!(debug.contains("named"));
        assert!(debug.contains("None"));
    }
}
