//! # dwf_backend
//!
//! Runtime binding to the Digilent WaveForms `dwf` library.
//!
//! The crate loads the vendor runtime at runtime (see [`ffi`]), resolves every `FDwf*` entry point
//! and exposes one safe method per entry point on [`Dwf`]. Native output parameters become return
//! values and native failures become [`DwfError::Driver`].
//!
//! Higher level device, channel and recorder abstractions live in `dwfctrl_backend`; this crate
//! mirrors the C API one-to-one.
//!
//! ## Modules
//!
//! - [`ffi`]: native types, constants, the entry point table and library loading.
//! - [`dwf`]: the [`Dwf`] handle, error checking, system, enumeration and device calls.
//! - `analog_in`, `analog_out`, `analog_io`, `digital_in`, `digital_out`, `digital_io`,
//!   `protocols`: the remaining entry points, grouped per instrument.
//! - [`constants`]: typed enumerations for native values.
//! - [`error`]: [`DwfError`] and the addressing/usage sub-errors shared with `dwfctrl_backend`.

#[macro_use]
mod macros;

pub mod constants;
pub mod dwf;
pub mod error;
pub mod ffi;

mod analog_in;
mod analog_io;
mod analog_out;
mod digital_in;
mod digital_io;
mod digital_out;
mod protocols;

pub use crate::constants::*;
pub use crate::digital_in::SampleWord;
pub use crate::dwf::{string_from_buffer, string_to_buffer, Dwf};
pub use crate::error::{AddressingError, DwfError, Result, UsageError};
pub use crate::ffi::{EntryPoints, Hdwf, HDWF_NONE};
pub use crate::protocols::CanFrame;
