//! Permission codes and the predicates that gate navigation and UI elements.
//!
//! A permission code is an opaque string such as `"order:view"`. The wildcard
//! code grants every permission. Two predicates exist and are not
//! interchangeable: [`PermissionSet::has_any`] (route access, ANY-of the
//! required codes) and [`PermissionSet::has_all`] (UI element visibility,
//! ALL-of the required codes).

use std::collections::HashSet;

/// Wildcard code held by superuser sessions.
pub const WILDCARD: &str = "*:*:*";

/// The set of permission codes granted to a session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PermissionSet {
    codes: HashSet<String>,
}

impl PermissionSet {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    /// Whether a single code is granted. Wildcard holders pass every check.
    pub fn has(&self, code: &str) -> bool {
        if self.codes.is_empty() {
            return false;
        }
        self.codes.contains(WILDCARD) || self.codes.contains(code)
    }

    /// Route-level predicate: true when `required` is empty, the wildcard is
    /// held, or at least one required code is granted.
    pub fn has_any<S: AsRef<str>>(&self, required: &[S]) -> bool {
        if required.is_empty() {
            return true;
        }
        required.iter().any(|code| self.has(code.as_ref()))
    }

    /// UI-visibility predicate: true only when every required code is granted
    /// (vacuously true for an empty list).
    pub fn has_all<S: AsRef<str>>(&self, required: &[S]) -> bool {
        required.iter().all(|code| self.has(code.as_ref()))
    }
}

impl<S: Into<String>> FromIterator<S> for PermissionSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self::new(iter)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn set(codes: &[&str]) -> PermissionSet {
        PermissionSet::new(codes.iter().copied())
    }

    #[test]
    fn empty_requirement_is_always_authorized() {
        let required: [&str; 0] = [];
        assert!(set(&[]).has_any(&required));
        assert!(set(&["order:view"]).has_any(&required));
    }

    #[test]
    fn any_semantics_require_one_match() {
        let granted = set(&["order:view"]);
        assert!(granted.has_any(&["order:view", "expense:view"]));
        assert!(!granted.has_any(&["expense:view", "budget:view"]));
    }

    #[test]
    fn wildcard_grants_everything() {
        let granted = set(&[WILDCARD]);
        assert!(granted.has("anything:whatsoever"));
        assert!(granted.has_any(&["anything:whatsoever"]));
        assert!(granted.has_all(&["order:view", "expense:view", "report:view"]));
    }

    #[test]
    fn all_semantics_require_every_code() {
        let granted = set(&["order:view", "expense:view"]);
        assert!(granted.has_all(&["order:view", "expense:view"]));
        assert!(!granted.has_all(&["order:view", "budget:view"]));
        let none: [&str; 0] = [];
        assert!(granted.has_all(&none));
    }

    #[test]
    fn empty_grant_denies_named_codes() {
        let granted = set(&[]);
        assert!(!granted.has("order:view"));
        assert!(!granted.has_any(&["order:view"]));
    }

    #[test]
    fn duplicates_collapse() {
        let granted = PermissionSet::new(["order:view", "order:view"]);
        assert!(granted.has("order:view"));
    }
}
