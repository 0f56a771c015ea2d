//! Syntactic validation of icon and library identifiers.
//!
//! This is the first security layer of the pipeline: nothing that fails
//! these predicates ever reaches the filesystem.  The patterns are strict
//! allowlists, so path separators, parent-directory references, angle
//! brackets, whitespace, and control characters are all rejected up front.

use once_cell::sync::Lazy;
use regex::Regex;

static ICON_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[A-Za-z0-9_.\-]+$").unwrap());
static LIBRARY_NAME: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[a-z0-9_\-]+$").unwrap());

/// Returns whether `name` is acceptable as an icon name.
///
/// Accepts ASCII word characters, dots, and hyphens; additionally rejects
/// any occurrence of `..` so that a name can never smuggle a
/// parent-directory reference past the character allowlist.
pub fn is_valid_icon_name(name: &str) -> bool {
    ICON_NAME.is_match(name) && !name.contains("..")
}

/// Returns whether `library` is acceptable as a library namespace.
///
/// Lowercase letters, digits, underscores, and hyphens only; no dots, so a
/// library segment can never be `.` or `..`.
pub fn is_valid_library_name(library: &str) -> bool {
    LIBRARY_NAME.is_match(library)
}

/// Splits the `library:name` shorthand into its two halves.
///
/// The split is accepted only if both halves individually validate;
/// otherwise the caller should treat the whole token as an icon name, which
/// will then fail [`is_valid_icon_name`] (a `:` is not in its allowlist) and
/// fall through to the fallback.
pub fn split_shorthand(token: &str) -> Option<(&str, &str)> {
    let (library, name) = token.split_once(':')?;
    if is_valid_library_name(library) && is_valid_icon_name(name) {
        Some((library, name))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn accepts_ordinary_names() {
        assert!(is_valid_icon_name("home"));
        assert!(is_valid_icon_name("arrow-up"));
        assert!(is_valid_icon_name("chevron_double.left"));
        assert!(is_valid_icon_name("Icon2"));
    }

    #[test]
    fn rejects_traversal_and_markup() {
        assert!(!is_valid_icon_name(""));
        assert!(!is_valid_icon_name("../etc/passwd"));
        assert!(!is_valid_icon_name(".."));
        assert!(!is_valid_icon_name("a..b"));
        assert!(!is_valid_icon_name("icons/home"));
        assert!(!is_valid_icon_name("evil<script>"));
        assert!(!is_valid_icon_name("name with spaces"));
        assert!(!is_valid_icon_name("null\0byte"));
        assert!(!is_valid_icon_name("tab\there"));
    }

    #[test]
    fn rejects_non_ascii() {
        assert!(!is_valid_icon_name("héros"));
        assert!(!is_valid_icon_name("家"));
    }

    #[test]
    fn library_names_are_lowercase_only() {
        assert!(is_valid_library_name("heroicons-outline"));
        assert!(is_valid_library_name("font_awesome6"));
        assert!(!is_valid_library_name("Bootstrap"));
        assert!(!is_valid_library_name("lib.name"));
        assert!(!is_valid_library_name("invalid/../library"));
        assert!(!is_valid_library_name(""));
    }

    #[test]
    fn shorthand_splits_when_both_halves_validate() {
        assert_eq!(split_shorthand("test:home"), Some(("test", "home")));
        assert_eq!(split_shorthand("heroicons:arrow-up"), Some(("heroicons", "arrow-up")));
    }

    #[test]
    fn shorthand_rejected_when_either_half_is_bad() {
        assert_eq!(split_shorthand("home"), None);
        assert_eq!(split_shorthand("Bad:home"), None);
        assert_eq!(split_shorthand("test:../up"), None);
        assert_eq!(split_shorthand(":home"), None);
        assert_eq!(split_shorthand("test:"), None);
    }

    proptest! {
        #[test]
        fn names_with_forbidden_substrings_never_validate(
            prefix in "[a-z0-9]{0,8}",
            bad in prop::sample::select(vec!["/", "..", "<", ">", " ", "\t", "\n", "\\"]),
            suffix in "[a-z0-9]{0,8}",
        ) {
            let name = format!("{prefix}{bad}{suffix}");
            prop_assert!(!is_valid_icon_name(&name));
        }

        #[test]
        fn library_names_never_contain_separators(s in ".*") {
            if is_valid_library_name(&s) {
                prop_assert!(!s.contains('/'));
                prop_assert!(!s.contains('\\'));
                prop_assert!(!s.contains('.'));
            }
        }
    }
}
