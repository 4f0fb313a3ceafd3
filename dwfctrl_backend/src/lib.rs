//! # dwfctrl_backend
//!
//! Device, channel and acquisition model for Digilent WaveForms instruments, built on the
//! `dwf_backend` runtime binding.
//!
//! A [`Device`] is opened from a [`DeviceFilter`] and exposes its functional units: analog input
//! (oscilloscope), analog output (waveform generator), analog IO (supplies and monitors), digital
//! input (logic analyzer), digital output (pattern generator), digital IO and the serial
//! [`Protocols`]. Units hold their channels in a [`Registry`] addressable by index or label.
//!
//! ```ignore
//! let device = Device::open(&DeviceFilter::default())?;
//! let wavegen = device.analog_output()?;
//! wavegen.channel("ch1")?.setup(&WaveformSetup {
//!     function: Some(Function::Sine),
//!     frequency: Some(1e3),
//!     amplitude: Some(1.0),
//!     start: true,
//!     ..Default::default()
//! })?;
//!
//! let scope = device.analog_input()?;
//! let setup = RecordSetup {
//!     sample_rate: Some(1e6),
//!     length: Some(0.01),
//!     configure: true,
//!     start: true,
//!     ..Default::default()
//! };
//! let recording = scope.record(&setup, None)?.into_recording();
//! ```

pub mod analog_input;
pub mod analog_io;
pub mod analog_output;
pub mod analog_recorder;
pub mod application;
pub mod device;
pub mod device_info;
pub mod digital_input;
pub mod digital_io;
pub mod digital_output;
pub mod digital_recorder;
pub mod helpers;
pub mod protocols;
pub mod registry;
pub mod specialized;
pub mod unit;

pub use analog_input::*;
pub use analog_io::*;
pub use analog_output::*;
pub use analog_recorder::*;
pub use application::*;
pub use device::*;
pub use device_info::*;
pub use digital_input::*;
pub use digital_io::*;
pub use digital_output::*;
pub use digital_recorder::*;
pub use helpers::*;
pub use protocols::*;
pub use registry::*;
pub use specialized::*;
pub use unit::*;

pub use dwf_backend;
pub use dwf_backend::constants::*;
pub use dwf_backend::{AddressingError, CanFrame, Dwf, DwfError, EntryPoints, Result, UsageError};
