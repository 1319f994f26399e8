//! Application-level configuration.
//!
//! - [`ConsultationParams`]: model and sampling settings for every stage

pub mod consultation_params;

pub use consultation_params::{ConsultationParams, DEFAULT_TEMPERATURE};
