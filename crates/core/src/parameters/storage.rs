//! Fixed-capacity parameter store
//!
//! Holds the tuning blocks and the IMU calibration record as named values.
//! Names are at most [`PARAM_NAME_LEN`] bytes; the store never allocates.
//! Writing the store to flash is an adapter concern: adapters watch
//! [`is_dirty`](ParameterStore::is_dirty) and walk [`entries`](ParameterStore::entries).

use bitflags::bitflags;
use heapless::index_map::FnvIndexMap;
use heapless::String;

use super::error::ParameterError;

/// Maximum parameter name length
pub const PARAM_NAME_LEN: usize = 16;

/// Maximum number of parameters
pub const MAX_PARAMS: usize = 64;

pub type ParamName = String<PARAM_NAME_LEN>;

bitflags! {
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct ParamFlags: u8 {
        /// Left out of [`ParameterStore::visible_names`]
        const HIDDEN = 1 << 0;
        /// Fixed at registration
        const READ_ONLY = 1 << 1;
    }
}

/// Stored value
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParamValue {
    Bool(bool),
    Int(i32),
    Float(f32),
}

impl ParamValue {
    /// Numeric view; `Bool` reads as 0.0 / 1.0
    pub fn as_f32(&self) -> f32 {
        match *self {
            ParamValue::Bool(b) => f32::from(u8::from(b)),
            ParamValue::Int(v) => v as f32,
            ParamValue::Float(v) => v,
        }
    }
}

/// One registered parameter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ParamEntry {
    pub value: ParamValue,
    pub flags: ParamFlags,
}

fn name_key(name: &str) -> Result<ParamName, ParameterError> {
    let mut key = ParamName::new();
    key.push_str(name)
        .map_err(|_| ParameterError::NameTooLong)?;
    Ok(key)
}

/// Named parameter values with registration flags and dirty tracking
#[derive(Debug, Clone, Default)]
pub struct ParameterStore {
    entries: FnvIndexMap<ParamName, ParamEntry, MAX_PARAMS>,
    dirty: bool,
}

impl ParameterStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name` with its default; an already registered name keeps its
    /// current value and flags
    pub fn register(
        &mut self,
        name: &str,
        default: ParamValue,
        flags: ParamFlags,
    ) -> Result<(), ParameterError> {
        let key = name_key(name)?;
        if self.entries.contains_key(&key) {
            return Ok(());
        }
        self.entries
            .insert(
                key,
                ParamEntry {
                    value: default,
                    flags,
                },
            )
            .map_err(|_| ParameterError::StoreFull)?;
        self.dirty = true;
        Ok(())
    }

    pub fn get(&self, name: &str) -> Option<&ParamValue> {
        self.entry(name).map(|entry| &entry.value)
    }

    pub fn entry(&self, name: &str) -> Option<&ParamEntry> {
        self.entries.get(&name_key(name).ok()?)
    }

    /// Overwrite a registered parameter
    ///
    /// The value type is not checked; block loaders fall back to their
    /// defaults on a value they cannot use.
    pub fn set(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        let key = name_key(name)?;
        let entry = self
            .entries
            .get_mut(&key)
            .ok_or(ParameterError::UnknownParameter)?;
        if entry.flags.contains(ParamFlags::READ_ONLY) {
            return Err(ParameterError::ReadOnly);
        }
        entry.value = value;
        self.dirty = true;
        Ok(())
    }

    /// Register `name` if unknown, then set it
    pub fn upsert(&mut self, name: &str, value: ParamValue) -> Result<(), ParameterError> {
        self.register(name, value, ParamFlags::empty())?;
        self.set(name, value)
    }

    /// Numeric value of `name`, or `default` when missing or not finite
    pub fn get_f32_or(&self, name: &str, default: f32) -> f32 {
        self.get(name)
            .map(ParamValue::as_f32)
            .filter(|v| v.is_finite())
            .unwrap_or(default)
    }

    /// Every parameter, hidden ones included, in registration order
    pub fn entries(&self) -> impl Iterator<Item = (&ParamName, &ParamEntry)> {
        self.entries.iter()
    }

    /// Names an operator may list
    pub fn visible_names(&self) -> impl Iterator<Item = &ParamName> {
        self.entries
            .iter()
            .filter(|(_, entry)| !entry.flags.contains(ParamFlags::HIDDEN))
            .map(|(name, _)| name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Changed since the last [`mark_saved`](Self::mark_saved)
    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    pub fn mark_saved(&mut self) {
        self.dirty = false;
    }
}
