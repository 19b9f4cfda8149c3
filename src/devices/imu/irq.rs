//! Interrupt line to handler registration table
//!
//! A hardware interrupt carries no context argument, so the one interrupt
//! entry point needs a way to find the object that owns a line. Adapters
//! register a `&'static mut` handler for their line at initialization; the
//! entry point calls [`dispatch`] with the line that fired.
//!
//! The table lives in a `critical_section::Mutex`, so registration from
//! thread context cannot race a dispatch from interrupt context.

use core::cell::RefCell;

use critical_section::Mutex;

use crate::platform::error::IrqError;

/// Number of interrupt lines the table can route (one per GPIO)
pub const MAX_IRQ_LINES: usize = 40;

/// Something that services a data-ready interrupt
///
/// Runs in interrupt context: must not block or allocate.
pub trait DataReadyHandler: Send {
    fn on_data_ready(&mut self);
}

type Slot = Option<&'static mut dyn DataReadyHandler>;

static HANDLERS: Mutex<RefCell<[Slot; MAX_IRQ_LINES]>> =
    Mutex::new(RefCell::new([const { None }; MAX_IRQ_LINES]));

/// Claim `line` for `handler`
///
/// # Errors
///
/// `IrqError::InvalidLine` past the table, `IrqError::LineInUse` if another
/// handler owns the line. Both are initialization failures.
pub fn register(line: u8, handler: &'static mut dyn DataReadyHandler) -> Result<(), IrqError> {
    let index = line as usize;
    if index >= MAX_IRQ_LINES {
        return Err(IrqError::InvalidLine);
    }

    critical_section::with(|cs| {
        let mut table = HANDLERS.borrow_ref_mut(cs);
        if table[index].is_some() {
            return Err(IrqError::LineInUse);
        }
        table[index] = Some(handler);
        Ok(())
    })?;

    crate::log_debug!("IRQ line {} registered", line);
    Ok(())
}

/// Release `line`, handing the handler back
pub fn unregister(line: u8) -> Option<&'static mut dyn DataReadyHandler> {
    let index = line as usize;
    if index >= MAX_IRQ_LINES {
        return None;
    }
    critical_section::with(|cs| HANDLERS.borrow_ref_mut(cs)[index].take())
}

/// Route an interrupt on `line` to its handler
///
/// Returns `false` for an unclaimed or out-of-range line (a spurious
/// interrupt, ignored).
pub fn dispatch(line: u8) -> bool {
    let index = line as usize;
    if index >= MAX_IRQ_LINES {
        return false;
    }
    critical_section::with(|cs| {
        let mut table = HANDLERS.borrow_ref_mut(cs);
        match table[index].as_mut() {
            Some(handler) => {
                handler.on_data_ready();
                true
            }
            None => false,
        }
    })
}

/// Whether `line` currently has a handler
pub fn is_registered(line: u8) -> bool {
    let index = line as usize;
    index < MAX_IRQ_LINES && critical_section::with(|cs| HANDLERS.borrow_ref(cs)[index].is_some())
}
