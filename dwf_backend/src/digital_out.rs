//! Pattern generator (`FDwfDigitalOut*`) entry points.
//!
//! Each output channel is driven by a clock divider followed by a low/high counter pair.

use libc::{c_double, c_int, c_uint, c_void};

use crate::dwf::Dwf;
use crate::error::Result;
use crate::ffi::*;

impl Dwf {
    dwf_fn! {
        digital_out_reset(hdwf: Hdwf) = FDwfDigitalOutReset;
        digital_out_configure(hdwf: Hdwf, start: c_int) = FDwfDigitalOutConfigure;
        digital_out_status(hdwf: Hdwf) -> DwfState = FDwfDigitalOutStatus;
        digital_out_internal_clock_info(hdwf: Hdwf) -> c_double = FDwfDigitalOutInternalClockInfo;
        digital_out_trigger_source_set(hdwf: Hdwf, source: DwfTrigSrc) = FDwfDigitalOutTriggerSourceSet;
        digital_out_trigger_source_get(hdwf: Hdwf) -> DwfTrigSrc = FDwfDigitalOutTriggerSourceGet;
        digital_out_trigger_slope_set(hdwf: Hdwf, slope: DwfTriggerSlope) = FDwfDigitalOutTriggerSlopeSet;
        digital_out_trigger_slope_get(hdwf: Hdwf) -> DwfTriggerSlope = FDwfDigitalOutTriggerSlopeGet;
        digital_out_run_info(hdwf: Hdwf) -> (min: c_double, max: c_double) = FDwfDigitalOutRunInfo;
        digital_out_run_set(hdwf: Hdwf, run: c_double) = FDwfDigitalOutRunSet;
        digital_out_run_get(hdwf: Hdwf) -> c_double = FDwfDigitalOutRunGet;
        digital_out_run_status(hdwf: Hdwf) -> c_double = FDwfDigitalOutRunStatus;
        digital_out_wait_info(hdwf: Hdwf) -> (min: c_double, max: c_double) = FDwfDigitalOutWaitInfo;
        digital_out_wait_set(hdwf: Hdwf, wait: c_double) = FDwfDigitalOutWaitSet;
        digital_out_wait_get(hdwf: Hdwf) -> c_double = FDwfDigitalOutWaitGet;
        digital_out_repeat_info(hdwf: Hdwf) -> (min: c_uint, max: c_uint) = FDwfDigitalOutRepeatInfo;
        digital_out_repeat_set(hdwf: Hdwf, repeat: c_uint) = FDwfDigitalOutRepeatSet;
        digital_out_repeat_get(hdwf: Hdwf) -> c_uint = FDwfDigitalOutRepeatGet;
        digital_out_repeat_status(hdwf: Hdwf) -> c_uint = FDwfDigitalOutRepeatStatus;
        digital_out_repeat_trigger_set(hdwf: Hdwf, repeat_trigger: c_int) = FDwfDigitalOutRepeatTriggerSet;
        digital_out_repeat_trigger_get(hdwf: Hdwf) -> c_int = FDwfDigitalOutRepeatTriggerGet;
        digital_out_count(hdwf: Hdwf) -> c_int = FDwfDigitalOutCount;
    }

    dwf_fn! {
        digital_out_enable_set(hdwf: Hdwf, idx_channel: c_int, enable: c_int) = FDwfDigitalOutEnableSet;
        digital_out_enable_get(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfDigitalOutEnableGet;
        digital_out_output_info(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfDigitalOutOutputInfo;
        digital_out_output_set(hdwf: Hdwf, idx_channel: c_int, output: DwfDigitalOutOutput) = FDwfDigitalOutOutputSet;
        digital_out_output_get(hdwf: Hdwf, idx_channel: c_int) -> DwfDigitalOutOutput = FDwfDigitalOutOutputGet;
        digital_out_type_info(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfDigitalOutTypeInfo;
        digital_out_type_set(hdwf: Hdwf, idx_channel: c_int, output_type: DwfDigitalOutType) = FDwfDigitalOutTypeSet;
        digital_out_type_get(hdwf: Hdwf, idx_channel: c_int) -> DwfDigitalOutType = FDwfDigitalOutTypeGet;
        digital_out_idle_info(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfDigitalOutIdleInfo;
        digital_out_idle_set(hdwf: Hdwf, idx_channel: c_int, idle: DwfDigitalOutIdle) = FDwfDigitalOutIdleSet;
        digital_out_idle_get(hdwf: Hdwf, idx_channel: c_int) -> DwfDigitalOutIdle = FDwfDigitalOutIdleGet;
        digital_out_divider_info(hdwf: Hdwf, idx_channel: c_int) -> (min: c_uint, max: c_uint) = FDwfDigitalOutDividerInfo;
        digital_out_divider_init_set(hdwf: Hdwf, idx_channel: c_int, divider: c_uint) = FDwfDigitalOutDividerInitSet;
        digital_out_divider_init_get(hdwf: Hdwf, idx_channel: c_int) -> c_uint = FDwfDigitalOutDividerInitGet;
        digital_out_divider_set(hdwf: Hdwf, idx_channel: c_int, divider: c_uint) = FDwfDigitalOutDividerSet;
        digital_out_divider_get(hdwf: Hdwf, idx_channel: c_int) -> c_uint = FDwfDigitalOutDividerGet;
        digital_out_counter_info(hdwf: Hdwf, idx_channel: c_int) -> (min: c_uint, max: c_uint) = FDwfDigitalOutCounterInfo;
        digital_out_counter_init_set(hdwf: Hdwf, idx_channel: c_int, high: c_int, counter: c_uint) = FDwfDigitalOutCounterInitSet;
        /// Initial level (non-zero for high) and initial counter value.
        digital_out_counter_init_get(hdwf: Hdwf, idx_channel: c_int) -> (high: c_int, counter: c_uint) = FDwfDigitalOutCounterInitGet;
        digital_out_counter_set(hdwf: Hdwf, idx_channel: c_int, low: c_uint, high: c_uint) = FDwfDigitalOutCounterSet;
        digital_out_counter_get(hdwf: Hdwf, idx_channel: c_int) -> (low: c_uint, high: c_uint) = FDwfDigitalOutCounterGet;
        digital_out_repetition_info(hdwf: Hdwf, idx_channel: c_int) -> c_uint = FDwfDigitalOutRepetitionInfo;
        digital_out_repetition_set(hdwf: Hdwf, idx_channel: c_int, repetition: c_uint) = FDwfDigitalOutRepetitionSet;
        digital_out_repetition_get(hdwf: Hdwf, idx_channel: c_int) -> c_uint = FDwfDigitalOutRepetitionGet;
        digital_out_data_info(hdwf: Hdwf, idx_channel: c_int) -> c_uint = FDwfDigitalOutDataInfo;
    }

    /// Loads `bit_count` bits of custom pattern, packed LSB first into `bits`.
    pub fn digital_out_data_set(
        &self,
        hdwf: Hdwf,
        idx_channel: c_int,
        bits: &[u8],
        bit_count: c_uint,
    ) -> Result<()> {
        dwf_call!(
            self,
            FDwfDigitalOutDataSet(hdwf, idx_channel, bits.as_ptr() as *mut c_void, bit_count)
        )
    }
}
