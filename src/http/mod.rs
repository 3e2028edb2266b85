//! HTTP protocol layer module
//!
//! Provides HTTP protocol-related base functionality, decoupled from the
//! prediction business logic.

pub mod response;

// Re-export commonly used builders
pub use response::{
    build_400_response, build_404_response, build_405_response, build_413_response,
    build_error_response, build_json_response, build_options_response,
};
