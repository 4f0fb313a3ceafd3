//! Logic analyzer (`FDwfDigitalIn*`) entry points.

use libc::{c_double, c_int, c_uint, c_void};

use crate::dwf::Dwf;
use crate::error::Result;
use crate::ffi::*;

/// Integer word a logic analyzer sample is stored in.
///
/// The sample format (8, 16 or 32 bits) selected with
/// [`Dwf::digital_in_sample_format_set`] decides which word type a caller must use.
pub trait SampleWord: Copy + Default + 'static {
    const BITS: u32;
}

impl SampleWord for u8 {
    const BITS: u32 = 8;
}

impl SampleWord for u16 {
    const BITS: u32 = 16;
}

impl SampleWord for u32 {
    const BITS: u32 = 32;
}

impl Dwf {
    dwf_fn! {
        digital_in_reset(hdwf: Hdwf) = FDwfDigitalInReset;
        digital_in_configure(hdwf: Hdwf, reconfigure: c_int, start: c_int) = FDwfDigitalInConfigure;
        digital_in_status(hdwf: Hdwf, read_data: c_int) -> DwfState = FDwfDigitalInStatus;
        digital_in_status_samples_left(hdwf: Hdwf) -> c_int = FDwfDigitalInStatusSamplesLeft;
        digital_in_status_samples_valid(hdwf: Hdwf) -> c_int = FDwfDigitalInStatusSamplesValid;
        digital_in_status_index_write(hdwf: Hdwf) -> c_int = FDwfDigitalInStatusIndexWrite;
        digital_in_status_auto_triggered(hdwf: Hdwf) -> c_int = FDwfDigitalInStatusAutoTriggered;
        /// Samples available, lost and corrupted since the previous status in record mode.
        digital_in_status_record(hdwf: Hdwf) -> (available: c_int, lost: c_int, corrupted: c_int) = FDwfDigitalInStatusRecord;
        digital_in_internal_clock_info(hdwf: Hdwf) -> c_double = FDwfDigitalInInternalClockInfo;
        digital_in_clock_source_info(hdwf: Hdwf) -> c_int = FDwfDigitalInClockSourceInfo;
        digital_in_clock_source_set(hdwf: Hdwf, source: DwfDigitalInClockSource) = FDwfDigitalInClockSourceSet;
        digital_in_clock_source_get(hdwf: Hdwf) -> DwfDigitalInClockSource = FDwfDigitalInClockSourceGet;
        digital_in_divider_info(hdwf: Hdwf) -> c_uint = FDwfDigitalInDividerInfo;
        digital_in_divider_set(hdwf: Hdwf, divider: c_uint) = FDwfDigitalInDividerSet;
        digital_in_divider_get(hdwf: Hdwf) -> c_uint = FDwfDigitalInDividerGet;
        digital_in_bits_info(hdwf: Hdwf) -> c_int = FDwfDigitalInBitsInfo;
        digital_in_sample_format_set(hdwf: Hdwf, bits: c_int) = FDwfDigitalInSampleFormatSet;
        digital_in_sample_format_get(hdwf: Hdwf) -> c_int = FDwfDigitalInSampleFormatGet;
        digital_in_input_order_set(hdwf: Hdwf, dio_first: c_int) = FDwfDigitalInInputOrderSet;
        digital_in_buffer_size_info(hdwf: Hdwf) -> c_int = FDwfDigitalInBufferSizeInfo;
        digital_in_buffer_size_set(hdwf: Hdwf, size: c_int) = FDwfDigitalInBufferSizeSet;
        digital_in_buffer_size_get(hdwf: Hdwf) -> c_int = FDwfDigitalInBufferSizeGet;
        digital_in_sample_mode_info(hdwf: Hdwf) -> c_int = FDwfDigitalInSampleModeInfo;
        digital_in_sample_mode_set(hdwf: Hdwf, mode: DwfDigitalInSampleMode) = FDwfDigitalInSampleModeSet;
        digital_in_sample_mode_get(hdwf: Hdwf) -> DwfDigitalInSampleMode = FDwfDigitalInSampleModeGet;
        digital_in_sample_sensible_set(hdwf: Hdwf, mask: c_uint) = FDwfDigitalInSampleSensibleSet;
        digital_in_sample_sensible_get(hdwf: Hdwf) -> c_uint = FDwfDigitalInSampleSensibleGet;
        digital_in_acquisition_mode_info(hdwf: Hdwf) -> c_int = FDwfDigitalInAcquisitionModeInfo;
        digital_in_acquisition_mode_set(hdwf: Hdwf, mode: DwfAcqMode) = FDwfDigitalInAcquisitionModeSet;
        digital_in_acquisition_mode_get(hdwf: Hdwf) -> DwfAcqMode = FDwfDigitalInAcquisitionModeGet;
    }

    dwf_fn! {
        digital_in_trigger_source_set(hdwf: Hdwf, source: DwfTrigSrc) = FDwfDigitalInTriggerSourceSet;
        digital_in_trigger_source_get(hdwf: Hdwf) -> DwfTrigSrc = FDwfDigitalInTriggerSourceGet;
        digital_in_trigger_slope_set(hdwf: Hdwf, slope: DwfTriggerSlope) = FDwfDigitalInTriggerSlopeSet;
        digital_in_trigger_slope_get(hdwf: Hdwf) -> DwfTriggerSlope = FDwfDigitalInTriggerSlopeGet;
        digital_in_trigger_position_info(hdwf: Hdwf) -> c_uint = FDwfDigitalInTriggerPositionInfo;
        digital_in_trigger_position_set(hdwf: Hdwf, samples_after_trigger: c_uint) = FDwfDigitalInTriggerPositionSet;
        digital_in_trigger_position_get(hdwf: Hdwf) -> c_uint = FDwfDigitalInTriggerPositionGet;
        digital_in_trigger_prefill_set(hdwf: Hdwf, samples_before_trigger: c_uint) = FDwfDigitalInTriggerPrefillSet;
        digital_in_trigger_prefill_get(hdwf: Hdwf) -> c_uint = FDwfDigitalInTriggerPrefillGet;
        digital_in_trigger_auto_timeout_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfDigitalInTriggerAutoTimeoutInfo;
        digital_in_trigger_auto_timeout_set(hdwf: Hdwf, timeout: c_double) = FDwfDigitalInTriggerAutoTimeoutSet;
        digital_in_trigger_auto_timeout_get(hdwf: Hdwf) -> c_double = FDwfDigitalInTriggerAutoTimeoutGet;
        /// Pins usable for each detector: `(level_low, level_high, edge_rise, edge_fall)`.
        digital_in_trigger_info(hdwf: Hdwf) -> (level_low: c_uint, level_high: c_uint, edge_rise: c_uint, edge_fall: c_uint) = FDwfDigitalInTriggerInfo;
        digital_in_trigger_set(hdwf: Hdwf, level_low: c_uint, level_high: c_uint, edge_rise: c_uint, edge_fall: c_uint) = FDwfDigitalInTriggerSet;
        digital_in_trigger_get(hdwf: Hdwf) -> (level_low: c_uint, level_high: c_uint, edge_rise: c_uint, edge_fall: c_uint) = FDwfDigitalInTriggerGet;
        digital_in_trigger_reset_set(hdwf: Hdwf, level_low: c_uint, level_high: c_uint, edge_rise: c_uint, edge_fall: c_uint) = FDwfDigitalInTriggerResetSet;
        digital_in_trigger_count_set(hdwf: Hdwf, count: c_int, restart: c_int) = FDwfDigitalInTriggerCountSet;
        digital_in_trigger_length_set(hdwf: Hdwf, min: c_double, max: c_double, idx_sync: c_int) = FDwfDigitalInTriggerLengthSet;
        digital_in_trigger_match_set(hdwf: Hdwf, pin: c_int, mask: c_uint, value: c_uint, bit_stuffing: c_int) = FDwfDigitalInTriggerMatchSet;
    }

    /// Copies acquired samples starting at `idx_sample` into `data`.
    pub fn digital_in_status_data2<W: SampleWord>(
        &self,
        hdwf: Hdwf,
        data: &mut [W],
        idx_sample: c_int,
    ) -> Result<()> {
        let bytes = std::mem::size_of_val(data) as c_int;
        dwf_call!(
            self,
            FDwfDigitalInStatusData2(hdwf, data.as_mut_ptr() as *mut c_void, idx_sample, bytes)
        )
    }

    /// Copies the noise samples starting at `idx_sample` into `data`.
    pub fn digital_in_status_noise2<W: SampleWord>(
        &self,
        hdwf: Hdwf,
        data: &mut [W],
        idx_sample: c_int,
    ) -> Result<()> {
        let bytes = std::mem::size_of_val(data) as c_int;
        dwf_call!(
            self,
            FDwfDigitalInStatusNoise2(hdwf, data.as_mut_ptr() as *mut c_void, idx_sample, bytes)
        )
    }
}
