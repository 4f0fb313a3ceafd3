//! Static digital I/O (`FDwfDigitalIO*`) entry points.
//!
//! All masks are 64-bit; bit `i` corresponds to DIO line `i`.

use libc::c_ulonglong;

use crate::dwf::Dwf;
use crate::ffi::*;

impl Dwf {
    dwf_fn! {
        digital_io_reset(hdwf: Hdwf) = FDwfDigitalIOReset;
        digital_io_configure(hdwf: Hdwf) = FDwfDigitalIOConfigure;
        digital_io_status(hdwf: Hdwf) = FDwfDigitalIOStatus;
        digital_io_output_enable_info(hdwf: Hdwf) -> c_ulonglong = FDwfDigitalIOOutputEnableInfo64;
        digital_io_output_enable_set(hdwf: Hdwf, output_enable: c_ulonglong) = FDwfDigitalIOOutputEnableSet64;
        digital_io_output_enable_get(hdwf: Hdwf) -> c_ulonglong = FDwfDigitalIOOutputEnableGet64;
        digital_io_output_info(hdwf: Hdwf) -> c_ulonglong = FDwfDigitalIOOutputInfo64;
        digital_io_output_set(hdwf: Hdwf, output: c_ulonglong) = FDwfDigitalIOOutputSet64;
        digital_io_output_get(hdwf: Hdwf) -> c_ulonglong = FDwfDigitalIOOutputGet64;
        digital_io_input_info(hdwf: Hdwf) -> c_ulonglong = FDwfDigitalIOInputInfo64;
        /// Input levels captured by the last [`Dwf::digital_io_status`].
        digital_io_input_status(hdwf: Hdwf) -> c_ulonglong = FDwfDigitalIOInputStatus64;
    }
}
