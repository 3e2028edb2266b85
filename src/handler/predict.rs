//! Prediction endpoint module
//!
//! POST /predict: deserialize one casualty record, run the preprocessing
//! pipeline and the classifier, and answer with the predicted class.

use http_body_util::{BodyExt, Full};
use hyper::body::{Bytes, Incoming};
use hyper::{Request, Response, StatusCode};
use serde::Serialize;
use std::sync::Arc;

use crate::config::AppState;
use crate::http;
use crate::logger;
use crate::model::{CasualtyFeatures, PredictError};

/// Prediction response wire shape
#[derive(Debug, Serialize)]
pub struct PredictResponse {
    pub prediction_numeric: u32,
    pub prediction_text: &'static str,
}

/// Handle one prediction request
pub async fn handle_predict(
    req: Request<Incoming>,
    state: &Arc<AppState>,
) -> Response<Full<Bytes>> {
    // Read request body
    let whole_body = if let Ok(collected) = req.collect().await {
        collected.to_bytes()
    } else {
        return http::build_400_response("Failed to read request body");
    };

    let record: CasualtyFeatures = match serde_json::from_slice(&whole_body) {
        Ok(r) => r,
        Err(e) => {
            logger::log_rejected_prediction(&format!("malformed body: {e}"));
            return http::build_400_response(&format!("Invalid request body: {e}"));
        }
    };

    match state.predictor.predict(&record) {
        Ok(prediction) => http::build_json_response(
            StatusCode::OK,
            &PredictResponse {
                prediction_numeric: prediction.class,
                prediction_text: prediction.label,
            },
        ),
        Err(e @ PredictError::UnknownCategory { .. }) => {
            logger::log_rejected_prediction(&e.to_string());
            http::build_400_response(&e.to_string())
        }
        Err(e @ PredictError::Inconsistent) => {
            logger::log_error(&format!("prediction failed: {e}"));
            http::build_error_response(StatusCode::INTERNAL_SERVER_ERROR, "Prediction failed")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn response_wire_shape() {
        let resp = PredictResponse {
            prediction_numeric: 2,
            prediction_text: "Pedestrian",
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert_eq!(
            json,
            r#"{"prediction_numeric":2,"prediction_text":"Pedestrian"}"#
        );
    }
}
