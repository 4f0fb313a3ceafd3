//! Static analog I/O (`FDwfAnalogIO*`) entry points: power supplies, voltmeters and the
//! device's internal monitors.
//!
//! Channels and nodes are discovered at runtime; each node reports its own name and unit.

use libc::{c_char, c_double, c_int};

use crate::dwf::{string_from_buffer, Dwf};
use crate::error::Result;
use crate::ffi::*;

impl Dwf {
    dwf_fn! {
        analog_io_reset(hdwf: Hdwf) = FDwfAnalogIOReset;
        analog_io_configure(hdwf: Hdwf) = FDwfAnalogIOConfigure;
        /// Reads the current node values from the device; required before any node status.
        analog_io_status(hdwf: Hdwf) = FDwfAnalogIOStatus;
        /// Whether the master enable can be set and whether it can be read back.
        analog_io_enable_info(hdwf: Hdwf) -> (set: c_int, status: c_int) = FDwfAnalogIOEnableInfo;
        analog_io_enable_set(hdwf: Hdwf, master_enable: c_int) = FDwfAnalogIOEnableSet;
        analog_io_enable_get(hdwf: Hdwf) -> c_int = FDwfAnalogIOEnableGet;
        analog_io_enable_status(hdwf: Hdwf) -> c_int = FDwfAnalogIOEnableStatus;
        analog_io_channel_count(hdwf: Hdwf) -> c_int = FDwfAnalogIOChannelCount;
        analog_io_channel_info(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfAnalogIOChannelInfo;
        analog_io_channel_node_info(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int) -> DwfAnalogIO = FDwfAnalogIOChannelNodeInfo;
        analog_io_channel_node_set_info(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int) -> (min: c_double, max: c_double, steps: c_int) = FDwfAnalogIOChannelNodeSetInfo;
        analog_io_channel_node_set(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int, value: c_double) = FDwfAnalogIOChannelNodeSet;
        analog_io_channel_node_get(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int) -> c_double = FDwfAnalogIOChannelNodeGet;
        analog_io_channel_node_status_info(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int) -> (min: c_double, max: c_double, steps: c_int) = FDwfAnalogIOChannelNodeStatusInfo;
        analog_io_channel_node_status(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int) -> c_double = FDwfAnalogIOChannelNodeStatus;
    }

    /// Returns the `(name, label)` pair of a channel, e.g. `("Positive Supply", "V+")`.
    pub fn analog_io_channel_name(&self, hdwf: Hdwf, idx_channel: c_int) -> Result<(String, String)> {
        let mut name = [0u8; NAME_BUFFER_SIZE];
        let mut label = [0u8; LABEL_BUFFER_SIZE];
        dwf_call!(
            self,
            FDwfAnalogIOChannelName(
                hdwf,
                idx_channel,
                name.as_mut_ptr() as *mut c_char,
                label.as_mut_ptr() as *mut c_char
            )
        )?;
        Ok((string_from_buffer(&name), string_from_buffer(&label)))
    }

    /// Returns the `(name, units)` pair of a channel node, e.g. `("Voltage", "V")`.
    pub fn analog_io_channel_node_name(
        &self,
        hdwf: Hdwf,
        idx_channel: c_int,
        idx_node: c_int,
    ) -> Result<(String, String)> {
        let mut name = [0u8; NAME_BUFFER_SIZE];
        let mut units = [0u8; LABEL_BUFFER_SIZE];
        dwf_call!(
            self,
            FDwfAnalogIOChannelNodeName(
                hdwf,
                idx_channel,
                idx_node,
                name.as_mut_ptr() as *mut c_char,
                units.as_mut_ptr() as *mut c_char
            )
        )?;
        Ok((string_from_buffer(&name), string_from_buffer(&units)))
    }
}
