//! Parameter management types and utilities
//!
//! This module provides the parameter store and the typed parameter blocks
//! the control loops are configured from. Each block registers its defaults
//! and loads itself back with values clamped to a valid range.

pub mod calibration;
pub mod error;
pub mod estimator;
pub mod helm;
pub mod servo;
pub mod steering;
pub mod storage;

pub use error::ParameterError;
pub use estimator::EstimatorParams;
pub use helm::HelmParams;
pub use servo::RudderServoParams;
pub use steering::SteeringParams;
pub use storage::{ParamEntry, ParamFlags, ParamName, ParamValue, ParameterStore};
pub use storage::{MAX_PARAMS, PARAM_NAME_LEN};

/// Register every parameter block's defaults
pub fn register_all(store: &mut ParameterStore) -> Result<(), ParameterError> {
    SteeringParams::register_defaults(store)?;
    RudderServoParams::register_defaults(store)?;
    EstimatorParams::register_defaults(store)?;
    HelmParams::register_defaults(store)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_all_fits_store() {
        let mut store = ParameterStore::new();
        register_all(&mut store).unwrap();
        assert_eq!(store.len(), 17);
        // Leaves room for the calibration record
        assert!(store.len() + 9 <= MAX_PARAMS);
    }
}
