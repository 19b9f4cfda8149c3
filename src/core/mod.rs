//! Firmware-side infrastructure
//!
//! Pure control logic lives in `tiller_core`; this module holds what only
//! makes sense on the firmware side of the seam.

pub mod logging;
