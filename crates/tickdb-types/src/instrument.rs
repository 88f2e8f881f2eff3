//! Instrument label normalization.
//!
//! Every instrument table in the store is named by the normalized form of
//! the instrument's human label. Callers never use a raw label as a key.

use serde::{Deserialize, Serialize};

/// Characters removed from a label before it becomes a key.
const STRIPPED: [char; 4] = ['.', '-', '/', ' '];

/// Canonicalizes an instrument label into a storage key.
///
/// Strips `.`, `-`, `/` and spaces, then uppercases. Total and idempotent.
/// Distinct labels may collapse onto the same key (`"RFX 20"` and
/// `"RFX-20"`); no collision detection is performed.
///
/// ```
/// use tickdb_types::normalize;
///
/// assert_eq!(normalize("I.RFX20"), "IRFX20");
/// assert_eq!(normalize("DLR/MAR19 - x"), "DLRMAR19X");
/// ```
#[must_use]
pub fn normalize(label: &str) -> String {
    label
        .chars()
        .filter(|c| !STRIPPED.contains(c))
        .collect::<String>()
        .to_uppercase()
}

/// Normalized instrument key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub struct InstrumentKey(String);

impl InstrumentKey {
    /// Creates a key by normalizing the given label.
    #[must_use]
    pub fn new(label: &str) -> Self {
        Self(normalize(label))
    }

    /// Returns the key as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true if the label normalized to an empty key.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for InstrumentKey {
    fn from(label: &str) -> Self {
        Self::new(label)
    }
}

impl From<String> for InstrumentKey {
    fn from(label: String) -> Self {
        Self::new(&label)
    }
}

impl From<InstrumentKey> for String {
    fn from(key: InstrumentKey) -> Self {
        key.0
    }
}

impl AsRef<str> for InstrumentKey {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for InstrumentKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_strips_and_uppercases() {
        assert_eq!(normalize("RFX20Mar19"), "RFX20MAR19");
        assert_eq!(normalize("I.RFX20"), "IRFX20");
        assert_eq!(normalize("DO-Feb 19/A"), "DOFEB19A");
        assert_eq!(normalize(""), "");
        assert_eq!(normalize(". - /"), "");
    }

    #[test]
    fn test_normalize_idempotent() {
        for label in ["I.RFX20", "dlr/mar19", "ggal - jun", "ÁbC.d", "  "] {
            let once = normalize(label);
            assert_eq!(normalize(&once), once);
        }
    }

    #[test]
    fn test_colliding_labels_share_key() {
        assert_eq!(InstrumentKey::new("RFX 20"), InstrumentKey::new("rfx-20"));
        assert_eq!(InstrumentKey::new("RFX 20").as_str(), "RFX20");
    }

    #[test]
    fn test_key_serde_normalizes() {
        let key: InstrumentKey = serde_json::from_str("\"i.rfx20\"").unwrap();
        assert_eq!(key.as_str(), "IRFX20");
        assert_eq!(serde_json::to_string(&key).unwrap(), "\"IRFX20\"");
    }
}
