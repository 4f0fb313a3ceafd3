//! Waveform generator (`FDwfAnalogOut*`) entry points.
//!
//! Channel level calls take `idx_channel`; node level calls additionally take the
//! [`DwfAnalogOutNode`] (carrier, FM or AM). Passing `-1` as channel addresses every channel.

use libc::{c_double, c_int, c_uint};

use crate::dwf::Dwf;
use crate::error::Result;
use crate::ffi::*;

impl Dwf {
    dwf_fn! {
        analog_out_count(hdwf: Hdwf) -> c_int = FDwfAnalogOutCount;
        analog_out_master_set(hdwf: Hdwf, idx_channel: c_int, idx_master: c_int) = FDwfAnalogOutMasterSet;
        analog_out_master_get(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfAnalogOutMasterGet;
        analog_out_trigger_source_set(hdwf: Hdwf, idx_channel: c_int, source: DwfTrigSrc) = FDwfAnalogOutTriggerSourceSet;
        analog_out_trigger_source_get(hdwf: Hdwf, idx_channel: c_int) -> DwfTrigSrc = FDwfAnalogOutTriggerSourceGet;
        analog_out_trigger_slope_set(hdwf: Hdwf, idx_channel: c_int, slope: DwfTriggerSlope) = FDwfAnalogOutTriggerSlopeSet;
        analog_out_trigger_slope_get(hdwf: Hdwf, idx_channel: c_int) -> DwfTriggerSlope = FDwfAnalogOutTriggerSlopeGet;
        analog_out_run_info(hdwf: Hdwf, idx_channel: c_int) -> (min: c_double, max: c_double) = FDwfAnalogOutRunInfo;
        analog_out_run_set(hdwf: Hdwf, idx_channel: c_int, run: c_double) = FDwfAnalogOutRunSet;
        analog_out_run_get(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogOutRunGet;
        analog_out_run_status(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogOutRunStatus;
        analog_out_wait_info(hdwf: Hdwf, idx_channel: c_int) -> (min: c_double, max: c_double) = FDwfAnalogOutWaitInfo;
        analog_out_wait_set(hdwf: Hdwf, idx_channel: c_int, wait: c_double) = FDwfAnalogOutWaitSet;
        analog_out_wait_get(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogOutWaitGet;
        analog_out_repeat_info(hdwf: Hdwf, idx_channel: c_int) -> (min: c_int, max: c_int) = FDwfAnalogOutRepeatInfo;
        analog_out_repeat_set(hdwf: Hdwf, idx_channel: c_int, repeat: c_int) = FDwfAnalogOutRepeatSet;
        analog_out_repeat_get(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfAnalogOutRepeatGet;
        analog_out_repeat_status(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfAnalogOutRepeatStatus;
        analog_out_repeat_trigger_set(hdwf: Hdwf, idx_channel: c_int, repeat_trigger: c_int) = FDwfAnalogOutRepeatTriggerSet;
        analog_out_repeat_trigger_get(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfAnalogOutRepeatTriggerGet;
        analog_out_limitation_info(hdwf: Hdwf, idx_channel: c_int) -> (min: c_double, max: c_double) = FDwfAnalogOutLimitationInfo;
        analog_out_limitation_set(hdwf: Hdwf, idx_channel: c_int, limit: c_double) = FDwfAnalogOutLimitationSet;
        analog_out_limitation_get(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogOutLimitationGet;
        analog_out_mode_set(hdwf: Hdwf, idx_channel: c_int, mode: DwfAnalogOutMode) = FDwfAnalogOutModeSet;
        analog_out_mode_get(hdwf: Hdwf, idx_channel: c_int) -> DwfAnalogOutMode = FDwfAnalogOutModeGet;
        analog_out_idle_info(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfAnalogOutIdleInfo;
        analog_out_idle_set(hdwf: Hdwf, idx_channel: c_int, idle: DwfAnalogOutIdle) = FDwfAnalogOutIdleSet;
        analog_out_idle_get(hdwf: Hdwf, idx_channel: c_int) -> DwfAnalogOutIdle = FDwfAnalogOutIdleGet;
        analog_out_reset(hdwf: Hdwf, idx_channel: c_int) = FDwfAnalogOutReset;
        analog_out_configure(hdwf: Hdwf, idx_channel: c_int, start: c_int) = FDwfAnalogOutConfigure;
        analog_out_status(hdwf: Hdwf, idx_channel: c_int) -> DwfState = FDwfAnalogOutStatus;
    }

    dwf_fn! {
        /// Bit field of the nodes available on `idx_channel`.
        analog_out_node_info(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfAnalogOutNodeInfo;
        analog_out_node_enable_set(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, enable: c_int) = FDwfAnalogOutNodeEnableSet;
        analog_out_node_enable_get(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> c_int = FDwfAnalogOutNodeEnableGet;
        /// Bit field of the waveform functions supported by the node.
        analog_out_node_function_info(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> c_uint = FDwfAnalogOutNodeFunctionInfo;
        analog_out_node_function_set(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, function: DwfFunc) = FDwfAnalogOutNodeFunctionSet;
        analog_out_node_function_get(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> DwfFunc = FDwfAnalogOutNodeFunctionGet;
        analog_out_node_frequency_info(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> (min: c_double, max: c_double) = FDwfAnalogOutNodeFrequencyInfo;
        analog_out_node_frequency_set(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, frequency: c_double) = FDwfAnalogOutNodeFrequencySet;
        analog_out_node_frequency_get(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> c_double = FDwfAnalogOutNodeFrequencyGet;
        analog_out_node_amplitude_info(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> (min: c_double, max: c_double) = FDwfAnalogOutNodeAmplitudeInfo;
        analog_out_node_amplitude_set(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, amplitude: c_double) = FDwfAnalogOutNodeAmplitudeSet;
        analog_out_node_amplitude_get(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> c_double = FDwfAnalogOutNodeAmplitudeGet;
        analog_out_node_offset_info(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> (min: c_double, max: c_double) = FDwfAnalogOutNodeOffsetInfo;
        analog_out_node_offset_set(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, offset: c_double) = FDwfAnalogOutNodeOffsetSet;
        analog_out_node_offset_get(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> c_double = FDwfAnalogOutNodeOffsetGet;
        analog_out_node_symmetry_info(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> (min: c_double, max: c_double) = FDwfAnalogOutNodeSymmetryInfo;
        analog_out_node_symmetry_set(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, symmetry: c_double) = FDwfAnalogOutNodeSymmetrySet;
        analog_out_node_symmetry_get(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> c_double = FDwfAnalogOutNodeSymmetryGet;
        analog_out_node_phase_info(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> (min: c_double, max: c_double) = FDwfAnalogOutNodePhaseInfo;
        analog_out_node_phase_set(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, phase: c_double) = FDwfAnalogOutNodePhaseSet;
        analog_out_node_phase_get(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> c_double = FDwfAnalogOutNodePhaseGet;
        /// Minimum and maximum number of custom data samples.
        analog_out_node_data_info(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> (min: c_int, max: c_int) = FDwfAnalogOutNodeDataInfo;
        /// Play mode buffer state: free space, lost and corrupted samples.
        analog_out_node_play_status(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode) -> (free: c_int, lost: c_int, corrupted: c_int) = FDwfAnalogOutNodePlayStatus;
    }

    /// Sets the custom waveform samples of a node, normalized to -1..+1.
    pub fn analog_out_node_data_set(
        &self,
        hdwf: Hdwf,
        idx_channel: c_int,
        node: DwfAnalogOutNode,
        data: &[c_double],
    ) -> Result<()> {
        dwf_call!(
            self,
            FDwfAnalogOutNodeDataSet(
                hdwf,
                idx_channel,
                node,
                data.as_ptr() as *mut c_double,
                data.len() as c_int
            )
        )
    }

    /// Streams further samples to a node running in play mode.
    pub fn analog_out_node_play_data(
        &self,
        hdwf: Hdwf,
        idx_channel: c_int,
        node: DwfAnalogOutNode,
        data: &[c_double],
    ) -> Result<()> {
        dwf_call!(
            self,
            FDwfAnalogOutNodePlayData(
                hdwf,
                idx_channel,
                node,
                data.as_ptr() as *mut c_double,
                data.len() as c_int
            )
        )
    }
}
