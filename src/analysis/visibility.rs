//! Final visibility classification.
//!
//! The metadata extractor and the scope walker carry two different notions
//! of "private": the extractor tracks every Ruby mechanism (bare modifiers,
//! symbol form, inline form), while the walker only recognizes the bare
//! `private` statement. The two can disagree - a method made private
//! through the symbol form, or a name collision across singleton/instance
//! scope. The explicit `@private` marker is rendered only where both
//! signals agree, so a method is never mislabeled on one signal alone.

use std::collections::HashSet;

use serde::Serialize;

use crate::analysis::{DeclaredVisibility, MethodInfo};

/// Rendered visibility for one method.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum VisibilityTag {
    /// Rendered in the public section, no marker.
    Public,
    /// Both signals agree: rendered in the private section with `@private`.
    PrivateExplicit,
    /// Extractor-only private: rendered in the private section, unmarked.
    PrivateImplicit,
}

impl VisibilityTag {
    /// Whether the method lands in the type's private section.
    pub fn is_private(&self) -> bool {
        matches!(self, VisibilityTag::PrivateExplicit | VisibilityTag::PrivateImplicit)
    }
}

/// Classify one method against the walker's private-name set.
///
/// Protected methods are excluded from rendering entirely and yield `None`.
pub fn classify(method: &MethodInfo, private_names: &HashSet<String>) -> Option<VisibilityTag> {
    match method.visibility {
        DeclaredVisibility::Protected => None,
        DeclaredVisibility::Public => Some(VisibilityTag::Public),
        DeclaredVisibility::Private => {
            if private_names.contains(&method.name) {
                Some(VisibilityTag::PrivateExplicit)
            } else {
                Some(VisibilityTag::PrivateImplicit)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{MethodScope, Span};

    fn method(name: &str, visibility: DeclaredVisibility) -> MethodInfo {
        MethodInfo {
            name: name.to_string(),
            scope: MethodScope::Instance,
            params: Vec::new(),
            visibility,
            source: format!("def {name}\nend\n"),
            span: Span {
                start_byte: 0,
                end_byte: 0,
                start_line: 1,
                end_line: 2,
            },
        }
    }

    fn names(items: &[&str]) -> HashSet<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_public_stays_public_even_when_walker_disagrees() {
        let m = method("foo", DeclaredVisibility::Public);
        assert_eq!(classify(&m, &names(&["foo"])), Some(VisibilityTag::Public));
    }

    #[test]
    fn test_private_with_agreement_is_explicit() {
        let m = method("bar", DeclaredVisibility::Private);
        assert_eq!(
            classify(&m, &names(&["bar"])),
            Some(VisibilityTag::PrivateExplicit)
        );
    }

    #[test]
    fn test_private_without_agreement_is_implicit() {
        let m = method("bar", DeclaredVisibility::Private);
        assert_eq!(
            classify(&m, &names(&[])),
            Some(VisibilityTag::PrivateImplicit)
        );
    }

    #[test]
    fn test_protected_is_excluded() {
        let m = method("guarded", DeclaredVisibility::Protected);
        assert_eq!(classify(&m, &names(&["guarded"])), None);
    }

    #[test]
    fn test_is_private() {
        assert!(!VisibilityTag::Public.is_private());
        assert!(VisibilityTag::PrivateExplicit.is_private());
        assert!(VisibilityTag::PrivateImplicit.is_private());
    }
}
