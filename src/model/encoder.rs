// Label encoder module
// Fitted categorical string -> integer code mappings

use serde::Deserialize;
use std::collections::HashMap;

/// A fitted label encoder for one categorical column.
///
/// `classes` is the list of category strings seen at training time, in
/// sorted order; the code of a category is its index in that list.
#[derive(Debug, Clone, Deserialize)]
pub struct LabelEncoder {
    pub classes: Vec<String>,
}

impl LabelEncoder {
    /// Look up the integer code of a category string.
    ///
    /// Returns `None` for a category the encoder was never fitted on.
    pub fn transform(&self, value: &str) -> Option<usize> {
        // Invariant: classes are sorted ascending (checked at load time)
        self.classes
            .binary_search_by(|c| c.as_str().cmp(value))
            .ok()
    }

    /// Check the sorted-classes invariant. Called once at load time.
    pub fn is_sorted(&self) -> bool {
        self.classes.windows(2).all(|w| w[0] < w[1])
    }
}

/// The full set of fitted encoders, keyed by training column name.
#[derive(Debug, Clone, Deserialize)]
#[serde(transparent)]
pub struct LabelEncoders(HashMap<String, LabelEncoder>);

/// Training column names the predictor requires.
///
/// The derived `age_group` / `vehicle_group` columns were label-encoded at
/// training time with the same mechanism as the raw inputs.
pub const REQUIRED_COLUMNS: [&str; 9] = [
    "1st Road Class",
    "Road Surface",
    "Lighting Conditions",
    "Weather Conditions",
    "Casualty Severity",
    "Sex of Casualty",
    "Type of Vehicle",
    "age_group",
    "vehicle_group",
];

impl LabelEncoders {
    /// Get the encoder for a column. The column set is validated at load
    /// time, so a miss here is a programming error surfaced as `None`.
    pub fn get(&self, column: &str) -> Option<&LabelEncoder> {
        self.0.get(column)
    }

    /// Column names missing from the artifact, if any.
    pub fn missing_columns(&self) -> Vec<&'static str> {
        REQUIRED_COLUMNS
            .into_iter()
            .filter(|c| !self.0.contains_key(*c))
            .collect()
    }

    /// Columns whose class lists violate the sorted invariant.
    pub fn unsorted_columns(&self) -> Vec<&str> {
        self.0
            .iter()
            .filter(|(_, enc)| !enc.is_sorted())
            .map(|(name, _)| name.as_str())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn encoder(classes: &[&str]) -> LabelEncoder {
        LabelEncoder {
            classes: classes.iter().map(ToString::to_string).collect(),
        }
    }

    #[test]
    fn transform_returns_sorted_index() {
        let enc = encoder(&["Dry", "Frost/Ice", "Snow", "Wet/Damp"]);
        assert_eq!(enc.transform("Dry"), Some(0));
        assert_eq!(enc.transform("Snow"), Some(2));
        assert_eq!(enc.transform("Wet/Damp"), Some(3));
    }

    #[test]
    fn transform_rejects_unseen_category() {
        let enc = encoder(&["Female", "Male"]);
        assert_eq!(enc.transform("Other"), None);
        assert_eq!(enc.transform(""), None);
    }

    #[test]
    fn sorted_invariant_detects_violations() {
        assert!(encoder(&["A", "B", "C"]).is_sorted());
        assert!(!encoder(&["B", "A"]).is_sorted());
        // Duplicates also violate the invariant
        assert!(!encoder(&["A", "A"]).is_sorted());
    }

    #[test]
    fn missing_columns_reported() {
        let json = r#"{"Road Surface": {"classes": ["Dry", "Wet/Damp"]}}"#;
        let encoders: LabelEncoders = serde_json::from_str(json).unwrap();
        let missing = encoders.missing_columns();
        assert!(missing.contains(&"1st Road Class"));
        assert!(!missing.contains(&"Road Surface"));
        assert_eq!(missing.len(), REQUIRED_COLUMNS.len() - 1);
    }
}
