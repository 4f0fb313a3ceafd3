//! Shared plumbing of the functional units.
//!
//! An open device is represented by a [`Session`]: the runtime binding plus the native handle.
//! The [`Device`](crate::device::Device) owns the session and closes it; functional units and
//! their channels keep an `Arc<Session>` so that they can issue calls, but they never release the
//! handle. Once the device is closed the handle reads as [`HDWF_NONE`] and every further call
//! fails with [`UsageError::DeviceClosed`] before reaching the native layer.
//!
//! [`BaseUnit`] is implemented by every unit and channel type and gives them uniform access to
//! the binding and the live handle.

use std::sync::atomic::{AtomicBool, AtomicI32, Ordering};
use std::sync::Arc;

use dwf_backend::{Dwf, Hdwf, Result, UsageError, HDWF_NONE};
use libc::c_int;

/// Native handle of one open device.
pub struct Session {
    dwf: Arc<Dwf>,
    hdwf: AtomicI32,
    analog_in_status_read: AtomicBool,
    digital_in_status_read: AtomicBool,
}

impl Session {
    pub(crate) fn new(dwf: Arc<Dwf>, hdwf: Hdwf) -> Arc<Self> {
        Arc::new(Self {
            dwf,
            hdwf: AtomicI32::new(hdwf),
            analog_in_status_read: AtomicBool::new(false),
            digital_in_status_read: AtomicBool::new(false),
        })
    }

    pub fn dwf(&self) -> &Dwf {
        &self.dwf
    }

    pub fn dwf_arc(&self) -> &Arc<Dwf> {
        &self.dwf
    }

    /// The live handle, or [`UsageError::DeviceClosed`] once the device has been closed.
    pub fn hdwf(&self) -> Result<Hdwf> {
        match self.hdwf.load(Ordering::Acquire) {
            HDWF_NONE => Err(UsageError::DeviceClosed.into()),
            hdwf => Ok(hdwf),
        }
    }

    pub fn is_open(&self) -> bool {
        self.hdwf.load(Ordering::Acquire) != HDWF_NONE
    }

    /// Invalidates the handle and returns the previous value. Returns `HDWF_NONE` when already
    /// released, so the caller closes the native handle at most once.
    pub(crate) fn release(&self) -> Hdwf {
        self.hdwf.swap(HDWF_NONE, Ordering::AcqRel)
    }

    pub(crate) fn status_flag(&self, unit: Acquisition) -> &AtomicBool {
        match unit {
            Acquisition::AnalogIn => &self.analog_in_status_read,
            Acquisition::DigitalIn => &self.digital_in_status_read,
        }
    }
}

/// Acquisition units whose sample buffer is only valid after a status read with data.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Acquisition {
    AnalogIn,
    DigitalIn,
}

/// Access to the binding and handle of the device a unit or channel belongs to.
pub trait BaseUnit {
    fn session(&self) -> &Arc<Session>;

    fn dwf(&self) -> &Dwf {
        self.session().dwf()
    }

    fn hdwf(&self) -> Result<Hdwf> {
        self.session().hdwf()
    }
}

/// A channel of a functional unit. The index is the native zero-based channel index.
pub trait BaseChannel: BaseUnit {
    fn index(&self) -> usize;

    fn raw_index(&self) -> c_int {
        self.index() as c_int
    }
}

pub(crate) fn to_cbool(value: bool) -> c_int {
    c_int::from(value)
}

pub(crate) fn from_cbool(value: c_int) -> bool {
    value != 0
}

/// Reinterprets a driver capability bit field for the `from_bits` helpers of the native enums.
pub(crate) fn bits(value: c_int) -> u64 {
    value as u32 as u64
}

#[cfg(test)]
mod tests {
    use super::*;
    use dwf_backend::{DwfError, EntryPoints};

    #[test]
    fn released_session_rejects_calls() {
        let session = Session::new(Arc::new(Dwf::with_entry_points(EntryPoints::default())), 7);
        assert_eq!(session.hdwf().unwrap(), 7);
        assert_eq!(session.release(), 7);
        assert_eq!(session.release(), HDWF_NONE);
        assert!(!session.is_open());
        assert!(matches!(
            session.hdwf(),
            Err(DwfError::Usage(UsageError::DeviceClosed))
        ));
    }
}
