//! Ward name label encoder.
//!
//! Maps each ward name to its index among the sorted, de-duplicated names
//! seen at fit time. The encoder must be the one fitted on the training
//! data; a freshly fitted encoder over a different name set shifts codes.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::{ArtifactError, EncodingError};

/// Fitted ward name encoder.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fits an encoder over `names`. Codes are assigned in sorted order.
    pub fn fit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let classes: BTreeSet<String> = names
            .into_iter()
            .map(|name| name.as_ref().to_string())
            .collect();
        Self {
            classes: classes.into_iter().collect(),
        }
    }

    /// Fits an encoder over every registered ward name.
    #[must_use]
    pub fn fit_registry() -> Self {
        Self::fit(wpi_ward::ward_names())
    }

    /// Fitted class names, in code order.
    #[must_use]
    pub fn classes(&self) -> &[String] {
        &self.classes
    }

    /// Returns the integer code for `name`.
    ///
    /// # Errors
    ///
    /// Returns [`EncodingError::UnseenWard`] if `name` was not present at
    /// fit time.
    pub fn transform(&self, name: &str) -> Result<usize, EncodingError> {
        self.classes
            .binary_search_by(|class| class.as_str().cmp(name))
            .map_err(|_| EncodingError::UnseenWard {
                ward: name.to_string(),
            })
    }

    /// Parses an encoder artifact from JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, has no classes, or its
    /// classes are not strictly sorted.
    pub fn from_json(json: &str) -> Result<Self, ArtifactError> {
        let encoder: Self = serde_json::from_str(json)?;
        if encoder.classes.is_empty() {
            return Err(ArtifactError::Invalid {
                message: "ward encoder has no classes".to_string(),
            });
        }
        if encoder.classes.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ArtifactError::Invalid {
                message: "ward encoder classes must be sorted and unique".to_string(),
            });
        }
        Ok(encoder)
    }

    /// Loads an encoder artifact from `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or fails
    /// [`Self::from_json`].
    pub fn load(path: &Path) -> Result<Self, ArtifactError> {
        let encoder = Self::from_json(&std::fs::read_to_string(path)?)?;
        log::info!(
            "Loaded ward encoder with {} classes from {}",
            encoder.classes.len(),
            path.display()
        );
        Ok(encoder)
    }

    /// Writes the encoder as pretty JSON to `path`, creating parent
    /// directories.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization or any filesystem operation fails.
    pub fn save(&self, path: &Path) -> Result<(), ArtifactError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(path, serde_json::to_string_pretty(self)?)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fit_sorts_and_dedups() {
        let encoder = LabelEncoder::fit(["Worli", "Colaba", "Worli", "Dadar"]);
        assert_eq!(encoder.classes(), ["Colaba", "Dadar", "Worli"]);
        assert_eq!(encoder.transform("Colaba"), Ok(0));
        assert_eq!(encoder.transform("Worli"), Ok(2));
    }

    #[test]
    fn unseen_ward() {
        let encoder = LabelEncoder::fit_registry();
        assert_eq!(
            encoder.transform("Unknown Ward"),
            Err(EncodingError::UnseenWard {
                ward: "Unknown Ward".to_string()
            })
        );
    }

    #[test]
    fn registry_codes_are_dense() {
        let encoder = LabelEncoder::fit_registry();
        assert_eq!(encoder.classes().len(), wpi_ward::all().len());
        assert_eq!(encoder.transform("Andheri East"), Ok(0));
        assert_eq!(encoder.transform("Worli"), Ok(wpi_ward::all().len() - 1));
    }

    #[test]
    fn json_artifact() {
        let encoder = LabelEncoder::from_json(r#"{"classes":["Bandra West","Colaba"]}"#).unwrap();
        assert_eq!(encoder.transform("Colaba"), Ok(1));

        assert!(matches!(
            LabelEncoder::from_json(r#"{"classes":["Colaba","Bandra West"]}"#),
            Err(ArtifactError::Invalid { .. })
        ));
        assert!(matches!(
            LabelEncoder::from_json(r#"{"classes":[]}"#),
            Err(ArtifactError::Invalid { .. })
        ));
        assert!(matches!(
            LabelEncoder::from_json("[]"),
            Err(ArtifactError::Json(_))
        ));
    }

    #[test]
    fn save_and_load() {
        let dir = std::env::temp_dir().join(format!("wpi_encoder_{}", std::process::id()));
        let path = dir.join("ward_encoder.json");
        let encoder = LabelEncoder::fit_registry();
        encoder.save(&path).unwrap();
        assert_eq!(LabelEncoder::load(&path).unwrap(), encoder);
        std::fs::remove_dir_all(&dir).unwrap();
    }
}
