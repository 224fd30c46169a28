//! Label records attached to generated waveforms.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// A label record: shape and strike descriptors mapped to numeric lists.
///
/// The ordered map keeps serialized output stable across runs, which matters
/// for downstream dataset tooling that diffs sidecar metadata.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Labels(BTreeMap<String, Vec<f64>>);

impl Labels {
    /// Creates an empty label record.
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a descriptor with its numeric values.
    pub fn insert(&mut self, key: impl Into<String>, values: Vec<f64>) {
        self.0.insert(key.into(), values);
    }

    /// Inserts a single-valued descriptor.
    pub fn insert_scalar(&mut self, key: impl Into<String>, value: f64) {
        self.insert(key, vec![value]);
    }

    /// Looks up a descriptor.
    pub fn get(&self, key: &str) -> Option<&[f64]> {
        self.0.get(key).map(Vec::as_slice)
    }

    /// Whether the record holds no descriptors.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of descriptors.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterates over descriptors in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[f64])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }
}

impl FromIterator<(String, Vec<f64>)> for Labels {
    fn from_iter<I: IntoIterator<Item = (String, Vec<f64>)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_labels_round_trip() {
        let mut labels = Labels::new();
        labels.insert_scalar("drum_size", 0.3);
        labels.insert("strike_location", vec![0.5, 0.25]);

        let json = serde_json::to_string(&labels).unwrap();
        assert_eq!(json, r#"{"drum_size":[0.3],"strike_location":[0.5,0.25]}"#);

        let back: Labels = serde_json::from_str(&json).unwrap();
        assert_eq!(labels, back);
    }

    #[test]
    fn test_labels_lookup() {
        let mut labels = Labels::new();
        labels.insert("vertices", vec![0.0, 1.0, 0.5]);
        assert_eq!(labels.get("vertices"), Some(&[0.0, 1.0, 0.5][..]));
        assert_eq!(labels.get("missing"), None);
        assert_eq!(labels.len(), 1);
    }
}
