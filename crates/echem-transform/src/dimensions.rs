//! Selection of the canonical electrochemistry columns.
//!
//! Every converted table must provide time, voltage and current. Each
//! dimension is recognized by a fixed list of column aliases (see
//! [`Dimension::aliases`]).

use echem_model::Dimension;
use serde::{Deserialize, Serialize};

use crate::error::{ConvertError, Result};

/// How many aliases of one dimension end up in the output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AliasPolicy {
    /// Keep every alias that is present, e.g. both `E` and `U`.
    #[default]
    AllPresent,
    /// Keep only the highest-priority alias that is present.
    FirstMatch,
}

/// Selects the canonical columns among `names`.
///
/// The result lists time aliases, then voltage aliases, then current
/// aliases, each group in alias priority order.
///
/// # Errors
///
/// Returns [`ConvertError::MissingDimension`] for the first dimension that
/// has no alias among `names`.
pub fn select_dimensions<S: AsRef<str>>(names: &[S], policy: AliasPolicy) -> Result<Vec<String>> {
    let mut selected = Vec::new();
    for dimension in Dimension::CORE {
        let mut present = dimension
            .aliases()
            .iter()
            .filter(|alias| names.iter().any(|name| name.as_ref() == **alias));

        let Some(first) = present.next() else {
            return Err(ConvertError::MissingDimension { dimension });
        };
        selected.push((*first).to_string());
        if policy == AliasPolicy::AllPresent {
            selected.extend(present.map(|alias| (*alias).to_string()));
        }
    }
    Ok(selected)
}

/// Checks that time, voltage and current are all present.
pub fn validate_core_dimensions<S: AsRef<str>>(names: &[S]) -> Result<()> {
    select_dimensions(names, AliasPolicy::AllPresent).map(|_| ())
}

/// Returns every canonical column present in `names`, in canonical order.
pub fn electrochemistry_dimensions<S: AsRef<str>>(names: &[S]) -> Result<Vec<String>> {
    select_dimensions(names, AliasPolicy::AllPresent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_missing_current() {
        let err = validate_core_dimensions(&["t", "U"]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingDimension {
                dimension: Dimension::Current
            }
        ));
        assert!(validate_core_dimensions(&["t", "U", "I"]).is_ok());
    }

    #[test]
    fn test_first_missing_dimension_is_reported() {
        let err = validate_core_dimensions::<&str>(&[]).unwrap_err();
        assert!(matches!(
            err,
            ConvertError::MissingDimension {
                dimension: Dimension::Time
            }
        ));
    }

    #[test]
    fn test_canonical_order() {
        let names = electrochemistry_dimensions(&["j", "x", "U", "t", "E"]).unwrap();
        assert_eq!(names, vec!["t", "E", "U", "j"]);
    }

    #[test]
    fn test_first_match_policy() {
        let names = select_dimensions(&["j", "U", "t", "E", "I"], AliasPolicy::FirstMatch).unwrap();
        assert_eq!(names, vec!["t", "E", "I"]);

        let names = select_dimensions(&["j", "U", "t"], AliasPolicy::FirstMatch).unwrap();
        assert_eq!(names, vec!["t", "U", "j"]);
    }

    #[test]
    fn test_policy_serde() {
        let policy: AliasPolicy = serde_json::from_str("\"first-match\"").unwrap();
        assert_eq!(policy, AliasPolicy::FirstMatch);
        assert_eq!(AliasPolicy::default(), AliasPolicy::AllPresent);
    }

    const CANONICAL: [&str; 5] = ["t", "E", "U", "I", "j"];

    fn is_subsequence(needle: &[String], haystack: &[&str]) -> bool {
        let mut rest = haystack.iter();
        needle
            .iter()
            .all(|name| rest.any(|candidate| *candidate == name.as_str()))
    }

    proptest! {
        #[test]
        fn prop_supersets_select_a_canonical_subsequence(
            extra in prop::collection::vec("[a-zA-Z/<>]{1,8}", 0..8),
            voltage in prop::sample::subsequence(vec!["E", "U"], 1..=2),
            current in prop::sample::subsequence(vec!["I", "j"], 1..=2),
            seed in any::<u64>(),
        ) {
            let mut names: Vec<String> = extra;
            names.push("t".to_string());
            names.extend(voltage.iter().map(|s| (*s).to_string()));
            names.extend(current.iter().map(|s| (*s).to_string()));
            let len = names.len();
            names.rotate_left((seed as usize) % len);

            let selected = electrochemistry_dimensions(&names).unwrap();
            prop_assert!(is_subsequence(&selected, &CANONICAL));
            prop_assert!(selected.len() >= 3);
            for name in &selected {
                prop_assert!(names.contains(name));
            }
        }
    }
}
