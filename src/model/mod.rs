//! Inference model module
//!
//! Holds the pre-fitted preprocessing artifacts and the trained classifier:
//! - Label encoders for the categorical columns
//! - Yeo-Johnson power transform + standard scaler for the time column
//! - Tree-ensemble classifier (majority vote)
//!
//! Everything here is loaded once at startup and read-only afterwards.

pub mod artifacts;
pub mod encoder;
pub mod features;
pub mod forest;
pub mod power;
pub mod predictor;
pub mod scaler;

// Re-export the request-path entry points
pub use artifacts::{ArtifactError, Artifacts};
pub use features::CasualtyFeatures;
pub use predictor::{PredictError, Prediction, Predictor};
