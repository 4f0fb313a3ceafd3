//! Error taxonomy shared by the binding layer and the device API.

use thiserror::Error;

/// Failure returned by every fallible operation of the crate.
#[derive(Debug, Error)]
pub enum DwfError {
    /// A native call reported failure. `code` is the driver's `DWFERC` value.
    #[error("dwf error {code}: {message}")]
    Driver { code: i32, message: String },

    #[error(transparent)]
    Addressing(#[from] AddressingError),

    #[error(transparent)]
    Usage(#[from] UsageError),

    #[error("device not found")]
    DeviceNotFound,

    #[error("the device does not support {0}")]
    Unsupported(String),

    /// An option was rejected before any native call was issued.
    #[error("invalid option `{option}`: {reason}")]
    InvalidOption { option: &'static str, reason: String },

    #[error("failed to load the WaveForms runtime library: {0}")]
    Library(String),

    #[error("the WaveForms runtime does not export {0}")]
    MissingEntryPoint(&'static str),

    /// The driver returned an enumeration value this crate does not know.
    #[error("unexpected {kind} value {value}")]
    InvalidValue { kind: &'static str, value: i64 },
}

/// Invalid channel or node lookup.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AddressingError {
    #[error("index {index} is out of range for a collection of {len}")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("no entry is labeled '{0}'")]
    UnknownLabel(String),

    #[error("more than one entry is labeled '{0}'")]
    AmbiguousLabel(String),
}

/// Operation invoked in a state that does not permit it.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UsageError {
    #[error("device is not open")]
    DeviceClosed,

    #[error("status with data must be read before reading samples")]
    StatusNotRead,

    #[error("device is already open")]
    AlreadyOpen,

    #[error("device is already in use by another application")]
    InUse,
}

pub type Result<T> = std::result::Result<T, DwfError>;

impl DwfError {
    pub fn invalid_option(option: &'static str, reason: impl Into<String>) -> Self {
        DwfError::InvalidOption {
            option,
            reason: reason.into(),
        }
    }

    /// Native error code, if this is a driver failure.
    pub fn driver_code(&self) -> Option<i32> {
        match self {
            DwfError::Driver { code, .. } => Some(*code),
            _ => None,
        }
    }
}
