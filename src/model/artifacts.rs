// Artifact loading module
// Deserializes the four fitted artifacts exported from training

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde::de::DeserializeOwned;
use thiserror::Error;

use super::encoder::LabelEncoders;
use super::features::FEATURE_COUNT;
use super::forest::Forest;
use super::power::PowerTransformer;
use super::scaler::StandardScaler;
use crate::config::ModelConfig;

/// Error loading or validating a fitted artifact.
#[derive(Debug, Error)]
pub enum ArtifactError {
    #[error("failed to read artifact {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse artifact {path:?}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("invalid artifact {path:?}: {reason}")]
    Invalid { path: PathBuf, reason: String },
}

/// The complete set of fitted artifacts, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Artifacts {
    pub encoders: LabelEncoders,
    pub power: PowerTransformer,
    pub scaler: StandardScaler,
    pub forest: Forest,
}

impl Artifacts {
    /// Load and validate all four artifacts from the configured paths.
    pub fn load(model: &ModelConfig) -> Result<Self, ArtifactError> {
        let encoders: LabelEncoders = load_json(&model.label_encoders_path())?;
        let missing = encoders.missing_columns();
        if !missing.is_empty() {
            return Err(invalid(
                &model.label_encoders_path(),
                format!("missing encoders for columns: {}", missing.join(", ")),
            ));
        }
        let unsorted = encoders.unsorted_columns();
        if !unsorted.is_empty() {
            return Err(invalid(
                &model.label_encoders_path(),
                format!("encoder classes not sorted for: {}", unsorted.join(", ")),
            ));
        }

        let power: PowerTransformer = load_json(&model.power_transformer_path())?;
        if !power.is_valid() {
            return Err(invalid(
                &model.power_transformer_path(),
                "expected a fitted yeo-johnson transform with finite lambdas".to_string(),
            ));
        }

        let scaler: StandardScaler = load_json(&model.scaler_path())?;
        if !scaler.is_valid() {
            return Err(invalid(
                &model.scaler_path(),
                "expected matching finite mean/scale arrays with non-zero scale".to_string(),
            ));
        }

        let forest: Forest = load_json(&model.model_path())?;
        if !forest.is_valid(FEATURE_COUNT) {
            return Err(invalid(
                &model.model_path(),
                format!("tree ensemble failed validation for {FEATURE_COUNT} features"),
            ));
        }

        Ok(Self {
            encoders,
            power,
            scaler,
            forest,
        })
    }

    /// One-line summary for the startup log.
    pub fn summary(&self) -> String {
        format!(
            "{} encoders, {} trees, {} classes",
            self.encoders.len(),
            self.forest.n_trees(),
            self.forest.classes.len()
        )
    }
}

fn load_json<T: DeserializeOwned>(path: &Path) -> Result<T, ArtifactError> {
    let file = File::open(path).map_err(|source| ArtifactError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_reader(BufReader::new(file)).map_err(|source| ArtifactError::Json {
        path: path.to_path_buf(),
        source,
    })
}

fn invalid(path: &Path, reason: String) -> ArtifactError {
    ArtifactError::Invalid {
        path: path.to_path_buf(),
        reason,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::config::ModelConfig;
    use std::fs;
    use tempfile::TempDir;

    pub(crate) const ENCODERS_JSON: &str = r#"{
        "1st Road Class": {"classes": ["A", "A(M)", "B", "C", "Motorway", "Unclassified"]},
        "Road Surface": {"classes": ["Dry", "Frost/Ice", "Snow", "Wet/Damp"]},
        "Lighting Conditions": {"classes": [
            "Darkness: no street lighting",
            "Darkness: street lights present and lit",
            "Daylight: street lights present"
        ]},
        "Weather Conditions": {"classes": [
            "Fine without high winds",
            "Raining without high winds",
            "Snowing without high winds"
        ]},
        "Casualty Severity": {"classes": ["Fatal", "Serious", "Slight"]},
        "Sex of Casualty": {"classes": ["Female", "Male"]},
        "Type of Vehicle": {"classes": [
            "Bus or coach (17 or more passenger seats)",
            "Car",
            "Goods vehicle 3.5 tonnes mgw and under",
            "Motorcycle over 500cc",
            "Pedal cycle",
            "Taxi/Private hire car"
        ]},
        "age_group": {"classes": ["+70", "0-9", "10-19", "20-29", "30-39", "40-49", "50-59", "60-69"]},
        "vehicle_group": {"classes": ["Car", "Other Vehicle", "Public Transportation", "Two-Wheeled Vehicle"]}
    }"#;

    pub(crate) const POWER_JSON: &str =
        r#"{"method": "yeo-johnson", "lambdas": [1.0]}"#;

    pub(crate) const SCALER_JSON: &str = r#"{"mean": [1300.0], "scale": [650.0]}"#;

    /// A tiny forest splitting on the scaled time column: early casualties
    /// are drivers, late ones pedestrians.
    pub(crate) const MODEL_JSON: &str = r#"{
        "classes": [0, 1, 2],
        "trees": [
            {"nodes": [
                {"kind": "split", "feature": 1, "threshold": 0.0, "left": 1, "right": 2},
                {"kind": "leaf", "class": 0},
                {"kind": "leaf", "class": 2}
            ]}
        ]
    }"#;

    pub(crate) fn write_artifacts(dir: &TempDir) -> ModelConfig {
        write_artifacts_with(dir, ENCODERS_JSON, POWER_JSON, SCALER_JSON, MODEL_JSON)
    }

    pub(crate) fn write_artifacts_with(
        dir: &TempDir,
        encoders: &str,
        power: &str,
        scaler: &str,
        model: &str,
    ) -> ModelConfig {
        fs::write(dir.path().join("label_encoders.json"), encoders).unwrap();
        fs::write(dir.path().join("power_transformer.json"), power).unwrap();
        fs::write(dir.path().join("scaler.json"), scaler).unwrap();
        fs::write(dir.path().join("model.json"), model).unwrap();
        ModelConfig::with_dir(dir.path().to_string_lossy().as_ref())
    }

    #[test]
    fn loads_complete_artifact_set() {
        let dir = tempfile::tempdir().unwrap();
        let model = write_artifacts(&dir);
        let artifacts = Artifacts::load(&model).unwrap();
        assert_eq!(artifacts.encoders.len(), 9);
        assert_eq!(artifacts.forest.n_trees(), 1);
        assert!(artifacts.summary().contains("9 encoders"));
    }

    #[test]
    fn missing_file_reports_path() {
        let dir = tempfile::tempdir().unwrap();
        let model = ModelConfig::with_dir(dir.path().to_string_lossy().as_ref());
        let err = Artifacts::load(&model).unwrap_err();
        assert!(matches!(err, ArtifactError::Io { .. }));
        assert!(err.to_string().contains("label_encoders.json"));
    }

    #[test]
    fn malformed_json_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let model =
            write_artifacts_with(&dir, "{not json", POWER_JSON, SCALER_JSON, MODEL_JSON);
        let err = Artifacts::load(&model).unwrap_err();
        assert!(matches!(err, ArtifactError::Json { .. }));
    }

    #[test]
    fn missing_encoder_column_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let model = write_artifacts_with(
            &dir,
            r#"{"Road Surface": {"classes": ["Dry"]}}"#,
            POWER_JSON,
            SCALER_JSON,
            MODEL_JSON,
        );
        let err = Artifacts::load(&model).unwrap_err();
        assert!(err.to_string().contains("missing encoders"));
    }

    #[test]
    fn wrong_power_method_is_invalid() {
        let dir = tempfile::tempdir().unwrap();
        let model = write_artifacts_with(
            &dir,
            ENCODERS_JSON,
            r#"{"method": "box-cox", "lambdas": [0.5]}"#,
            SCALER_JSON,
            MODEL_JSON,
        );
        let err = Artifacts::load(&model).unwrap_err();
        assert!(err.to_string().contains("yeo-johnson"));
    }
}
