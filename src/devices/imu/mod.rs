//! Interrupt-driven IMU sampling
//!
//! The sensor raises a data-ready line; the single interrupt entry point
//! calls [`irq::dispatch`] with the line number, which routes to the
//! registered [`ImuDataReady`] handler. The handler reads one sample and
//! pushes it into the sample queue's producer half. Nothing else is mutated
//! from interrupt context.
//!
//! ## Usage
//!
//! ```ignore
//! let (producer, consumer) = QUEUE.split();
//! let handler = HANDLER.init(ImuDataReady::new(driver, producer));
//! imu::attach(IMU_INT_LINE, handler)?;      // fatal on failure
//!
//! // in the GPIO interrupt vector:
//! irq::dispatch(line);
//! ```

pub mod data_ready;
pub mod irq;
#[cfg(any(test, feature = "mock"))]
pub mod mock;

pub use data_ready::{attach, ImuDataReady};
pub use irq::{DataReadyHandler, MAX_IRQ_LINES};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRawImu;
