//! Registry of trust mergers.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::error::NhsError;

/// Immutable mapping from a successor trust to the trusts it replaced.
///
/// Rules enforced on construction:
/// - every successor lists at least one predecessor, without duplicates;
/// - a predecessor is never itself a successor (no merge chains).
///
/// Trusts that only appear as predecessors are *retired*: their history is
/// folded into the successor and they get no page of their own.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<String, Vec<String>>", into = "BTreeMap<String, Vec<String>>")]
pub struct MergerRegistry {
    mergers: BTreeMap<String, Vec<String>>,
}

impl MergerRegistry {
    /// Build a registry from `(successor, predecessors)` pairs.
    ///
    /// # Errors
    /// Returns `InvalidRegistry` if a successor appears twice, has no
    /// predecessors, lists a predecessor twice, or if a predecessor is also a
    /// successor.
    pub fn new<I, S, P>(mergers: I) -> Result<Self, NhsError>
    where
        I: IntoIterator<Item = (S, P)>,
        S: Into<String>,
        P: IntoIterator,
        P::Item: Into<String>,
    {
        let mut map: BTreeMap<String, Vec<String>> = BTreeMap::new();
        for (succ, preds) in mergers {
            let succ = succ.into();
            let preds: Vec<String> = preds.into_iter().map(Into::into).collect();
            if map.contains_key(&succ) {
                return Err(NhsError::InvalidRegistry(format!(
                    "successor '{succ}' listed twice"
                )));
            }
            map.insert(succ, preds);
        }
        Self::validate(&map)?;
        Ok(Self { mergers: map })
    }

    fn validate(map: &BTreeMap<String, Vec<String>>) -> Result<(), NhsError> {
        for (succ, preds) in map {
            if preds.is_empty() {
                return Err(NhsError::InvalidRegistry(format!(
                    "successor '{succ}' has no predecessors"
                )));
            }
            let mut seen = BTreeSet::new();
            for p in preds {
                if !seen.insert(p.as_str()) {
                    return Err(NhsError::InvalidRegistry(format!(
                        "predecessor '{p}' listed twice under '{succ}'"
                    )));
                }
                if map.contains_key(p) {
                    return Err(NhsError::InvalidRegistry(format!(
                        "'{p}' is both a predecessor of '{succ}' and a successor"
                    )));
                }
            }
        }
        Ok(())
    }

    /// The four acute trust mergers of 2020 in England.
    #[must_use]
    pub fn known_mergers() -> Self {
        let mergers: [(&str, &[&str]); 4] = [
            (
                "Bedfordshire Hospitals NHS Foundation Trust",
                &[
                    "Bedford Hospital NHS Trust",
                    "Luton And Dunstable University Hospital NHS Foundation Trust",
                ],
            ),
            (
                "Mid And South Essex NHS Foundation Trust",
                &[
                    "Basildon And Thurrock University Hospitals NHS Foundation Trust",
                    "Mid Essex Hospital Services NHS Trust",
                    "Southend University Hospital NHS Foundation Trust",
                ],
            ),
            (
                "Manchester University NHS Foundation Trust",
                &[
                    "Central Manchester University Hospitals NHS Foundation Trust",
                    "University Hospital Of South Manchester NHS Foundation Trust",
                ],
            ),
            (
                "Liverpool University Hospitals NHS Foundation Trust",
                &[
                    "Royal Liverpool And Broadgreen University Hospitals NHS Trust",
                    "Aintree University Hospital NHS Foundation Trust",
                ],
            ),
        ];
        let map = mergers
            .into_iter()
            .map(|(s, ps)| (s.to_string(), ps.iter().map(|p| (*p).to_string()).collect()))
            .collect();
        Self { mergers: map }
    }

    /// Parse a registry from a JSON object of `successor: [predecessors]`.
    ///
    /// # Errors
    /// Returns `InvalidArg` for malformed JSON and `InvalidRegistry` for a
    /// structurally invalid registry.
    pub fn from_json_str(json: &str) -> Result<Self, NhsError> {
        let map: BTreeMap<String, Vec<String>> = serde_json::from_str(json)?;
        Self::try_from(map)
    }

    /// Predecessors of `successor`, in registry order.
    #[must_use]
    pub fn predecessors(&self, successor: &str) -> Option<&[String]> {
        self.mergers.get(successor).map(Vec::as_slice)
    }

    /// True when `name` is the successor of a merger.
    #[must_use]
    pub fn is_successor(&self, name: &str) -> bool {
        self.mergers.contains_key(name)
    }

    /// True when `name` only survives as a predecessor of some merger.
    #[must_use]
    pub fn is_retired(&self, name: &str) -> bool {
        self.mergers.values().any(|ps| ps.iter().any(|p| p == name))
    }

    /// Successor names in sorted order.
    pub fn successors(&self) -> impl Iterator<Item = &str> + '_ {
        self.mergers.keys().map(String::as_str)
    }

    /// Every retired (predecessor) name.
    #[must_use]
    pub fn retired(&self) -> BTreeSet<&str> {
        self.mergers
            .values()
            .flat_map(|ps| ps.iter().map(String::as_str))
            .collect()
    }

    /// Number of mergers.
    #[must_use]
    pub fn len(&self) -> usize {
        self.mergers.len()
    }

    /// True when no mergers are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.mergers.is_empty()
    }
}

impl TryFrom<BTreeMap<String, Vec<String>>> for MergerRegistry {
    type Error = NhsError;

    fn try_from(mergers: BTreeMap<String, Vec<String>>) -> Result<Self, Self::Error> {
        Self::validate(&mergers)?;
        Ok(Self { mergers })
    }
}

impl From<MergerRegistry> for BTreeMap<String, Vec<String>> {
    fn from(r: MergerRegistry) -> Self {
        r.mergers
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chains_are_rejected() {
        let err = MergerRegistry::new([("AB", vec!["A", "B"]), ("ABC", vec!["AB", "C"])]).unwrap_err();
        assert!(matches!(err, NhsError::InvalidRegistry(_)));
    }

    #[test]
    fn empty_predecessor_list_is_rejected() {
        let err = MergerRegistry::new([("AB", Vec::<String>::new())]).unwrap_err();
        assert!(matches!(err, NhsError::InvalidRegistry(_)));
    }

    #[test]
    fn retired_and_successor_queries() {
        let r = MergerRegistry::new([("AB", ["A", "B"])]).unwrap();
        assert!(r.is_successor("AB"));
        assert!(r.is_retired("A"));
        assert!(!r.is_retired("AB"));
        assert_eq!(r.predecessors("AB").unwrap(), ["A", "B"]);
        assert!(r.predecessors("A").is_none());
    }

    #[test]
    fn known_mergers_are_valid() {
        let r = MergerRegistry::known_mergers();
        let map: BTreeMap<String, Vec<String>> = r.clone().into();
        assert_eq!(MergerRegistry::try_from(map).unwrap(), r);
        assert_eq!(r.len(), 4);
        assert_eq!(r.retired().len(), 9);
    }

    #[test]
    fn json_registry_is_validated() {
        let ok = MergerRegistry::from_json_str(r#"{"AB": ["A", "B"]}"#).unwrap();
        assert!(ok.is_successor("AB"));
        let chained = MergerRegistry::from_json_str(r#"{"AB": ["A"], "A": ["X"]}"#);
        assert!(matches!(chained, Err(NhsError::InvalidRegistry(_))));
    }
}
