//! Prediction pipeline module
//!
//! Ties the fitted artifacts together: encode the categorical columns,
//! derive the age/vehicle groups, transform the time column, run the
//! classifier and translate the numeric class back to its label.

use thiserror::Error;

use super::artifacts::Artifacts;
use super::encoder::LabelEncoder;
use super::features::{CasualtyFeatures, FEATURE_COUNT, TIME_COLUMN};

/// Error on the prediction request path. All variants map to client or
/// internal errors in the HTTP layer; none of them panic.
#[derive(Debug, Error)]
pub enum PredictError {
    /// The client sent a category the encoder was never fitted on.
    #[error("invalid value for {column}: {value:?}")]
    UnknownCategory { column: &'static str, value: String },
    /// Artifact shapes disagree at runtime. Load-time validation makes
    /// this unreachable in practice, but the pipeline still refuses to
    /// produce a class from inconsistent state.
    #[error("inference failed: inconsistent artifact shapes")]
    Inconsistent,
}

/// A class prediction, numeric and human-readable.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Prediction {
    pub class: u32,
    pub label: &'static str,
}

/// Translate a numeric class to its casualty-class label.
///
/// Classes outside the trained set degrade to "Unknown" rather than fail.
pub const fn class_label(class: u32) -> &'static str {
    match class {
        0 => "Driver",
        1 => "Passenger",
        2 => "Pedestrian",
        _ => "Unknown",
    }
}

/// The loaded model, shared read-only across all connections.
#[derive(Debug, Clone)]
pub struct Predictor {
    artifacts: Artifacts,
}

impl Predictor {
    pub const fn new(artifacts: Artifacts) -> Self {
        Self { artifacts }
    }

    /// One-line summary for the startup log.
    pub fn summary(&self) -> String {
        self.artifacts.summary()
    }

    /// Run the full pipeline for one record.
    pub fn predict(&self, record: &CasualtyFeatures) -> Result<Prediction, PredictError> {
        let sample = self.assemble(record)?;
        let class = self
            .artifacts
            .forest
            .predict(&sample)
            .ok_or(PredictError::Inconsistent)?;
        Ok(Prediction {
            class,
            label: class_label(class),
        })
    }

    /// Build the 12-column feature vector in training order, with the
    /// time column power-transformed and scaled.
    #[allow(clippy::cast_precision_loss)]
    fn assemble(&self, record: &CasualtyFeatures) -> Result<Vec<f64>, PredictError> {
        let age_group = record.age_group();
        let vehicle_group = record.vehicle_group();

        let mut sample = Vec::with_capacity(FEATURE_COUNT);
        sample.push(record.number_of_vehicles as f64);
        sample.push(record.time_24hr as f64);
        sample.push(self.encode("1st Road Class", &record.first_road_class)?);
        sample.push(self.encode("Road Surface", &record.road_surface)?);
        sample.push(self.encode("Lighting Conditions", &record.lighting_conditions)?);
        sample.push(self.encode("Weather Conditions", &record.weather_conditions)?);
        sample.push(self.encode("Casualty Severity", &record.casualty_severity)?);
        sample.push(self.encode("Sex of Casualty", &record.sex_of_casualty)?);
        sample.push(record.age_of_casualty as f64);
        sample.push(self.encode("Type of Vehicle", &record.type_of_vehicle)?);
        sample.push(self.encode("age_group", &age_group)?);
        sample.push(self.encode("vehicle_group", vehicle_group)?);

        let time = self
            .artifacts
            .power
            .transform(0, sample[TIME_COLUMN])
            .and_then(|y| self.artifacts.scaler.transform(0, y))
            .ok_or(PredictError::Inconsistent)?;
        sample[TIME_COLUMN] = time;

        Ok(sample)
    }

    fn encode(&self, column: &'static str, value: &str) -> Result<f64, PredictError> {
        let encoder: &LabelEncoder = self
            .artifacts
            .encoders
            .get(column)
            .ok_or(PredictError::Inconsistent)?;
        let code = encoder
            .transform(value)
            .ok_or_else(|| PredictError::UnknownCategory {
                column,
                value: value.to_string(),
            })?;
        // Encoded codes are small indices; the cast is exact
        #[allow(clippy::cast_precision_loss)]
        let code = code as f64;
        Ok(code)
    }
}
