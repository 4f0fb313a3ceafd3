//! Oscilloscope (`FDwfAnalogIn*`) entry points.

use libc::{c_double, c_int, c_short};

use crate::dwf::Dwf;
use crate::error::Result;
use crate::ffi::*;

impl Dwf {
    dwf_fn! {
        analog_in_reset(hdwf: Hdwf) = FDwfAnalogInReset;
        analog_in_configure(hdwf: Hdwf, reconfigure: c_int, start: c_int) = FDwfAnalogInConfigure;
        analog_in_trigger_force(hdwf: Hdwf) = FDwfAnalogInTriggerForce;
        /// Reads the acquisition state, fetching the sample buffer when `read_data` is set.
        analog_in_status(hdwf: Hdwf, read_data: c_int) -> DwfState = FDwfAnalogInStatus;
        analog_in_status_samples_left(hdwf: Hdwf) -> c_int = FDwfAnalogInStatusSamplesLeft;
        analog_in_status_samples_valid(hdwf: Hdwf) -> c_int = FDwfAnalogInStatusSamplesValid;
        analog_in_status_index_write(hdwf: Hdwf) -> c_int = FDwfAnalogInStatusIndexWrite;
        analog_in_status_auto_triggered(hdwf: Hdwf) -> c_int = FDwfAnalogInStatusAutoTriggered;
        analog_in_status_sample(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogInStatusSample;
        /// Record mode counters: samples available, lost and corrupted since the last status.
        analog_in_status_record(hdwf: Hdwf) -> (available: c_int, lost: c_int, corrupted: c_int) = FDwfAnalogInStatusRecord;
        analog_in_record_length_set(hdwf: Hdwf, length: c_double) = FDwfAnalogInRecordLengthSet;
        analog_in_record_length_get(hdwf: Hdwf) -> c_double = FDwfAnalogInRecordLengthGet;

        analog_in_frequency_info(hdwf: Hdwf) -> (min: c_double, max: c_double) = FDwfAnalogInFrequencyInfo;
        analog_in_frequency_set(hdwf: Hdwf, frequency: c_double) = FDwfAnalogInFrequencySet;
        analog_in_frequency_get(hdwf: Hdwf) -> c_double = FDwfAnalogInFrequencyGet;
        analog_in_bits_info(hdwf: Hdwf) -> c_int = FDwfAnalogInBitsInfo;
        analog_in_buffer_size_info(hdwf: Hdwf) -> (min: c_int, max: c_int) = FDwfAnalogInBufferSizeInfo;
        analog_in_buffer_size_set(hdwf: Hdwf, size: c_int) = FDwfAnalogInBufferSizeSet;
        analog_in_buffer_size_get(hdwf: Hdwf) -> c_int = FDwfAnalogInBufferSizeGet;
        analog_in_noise_size_info(hdwf: Hdwf) -> c_int = FDwfAnalogInNoiseSizeInfo;
        analog_in_noise_size_set(hdwf: Hdwf, size: c_int) = FDwfAnalogInNoiseSizeSet;
        analog_in_noise_size_get(hdwf: Hdwf) -> c_int = FDwfAnalogInNoiseSizeGet;
        analog_in_acquisition_mode_info(hdwf: Hdwf) -> c_int = FDwfAnalogInAcquisitionModeInfo;
        analog_in_acquisition_mode_set(hdwf: Hdwf, mode: DwfAcqMode) = FDwfAnalogInAcquisitionModeSet;
        analog_in_acquisition_mode_get(hdwf: Hdwf) -> DwfAcqMode = FDwfAnalogInAcquisitionModeGet;

        analog_in_channel_count(hdwf: Hdwf) -> c_int = FDwfAnalogInChannelCount;
        analog_in_channel_enable_set(hdwf: Hdwf, idx_channel: c_int, enable: c_int) = FDwfAnalogInChannelEnableSet;
        analog_in_channel_enable_get(hdwf: Hdwf, idx_channel: c_int) -> c_int = FDwfAnalogInChannelEnableGet;
        analog_in_channel_filter_info(hdwf: Hdwf) -> c_int = FDwfAnalogInChannelFilterInfo;
        analog_in_channel_filter_set(hdwf: Hdwf, idx_channel: c_int, filter: DwfFilter) = FDwfAnalogInChannelFilterSet;
        analog_in_channel_filter_get(hdwf: Hdwf, idx_channel: c_int) -> DwfFilter = FDwfAnalogInChannelFilterGet;
        analog_in_channel_range_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfAnalogInChannelRangeInfo;
        analog_in_channel_range_set(hdwf: Hdwf, idx_channel: c_int, range: c_double) = FDwfAnalogInChannelRangeSet;
        analog_in_channel_range_get(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogInChannelRangeGet;
        analog_in_channel_offset_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfAnalogInChannelOffsetInfo;
        analog_in_channel_offset_set(hdwf: Hdwf, idx_channel: c_int, offset: c_double) = FDwfAnalogInChannelOffsetSet;
        analog_in_channel_offset_get(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogInChannelOffsetGet;
        analog_in_channel_attenuation_set(hdwf: Hdwf, idx_channel: c_int, attenuation: c_double) = FDwfAnalogInChannelAttenuationSet;
        analog_in_channel_attenuation_get(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogInChannelAttenuationGet;
        analog_in_channel_bandwidth_set(hdwf: Hdwf, idx_channel: c_int, bandwidth: c_double) = FDwfAnalogInChannelBandwidthSet;
        analog_in_channel_bandwidth_get(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogInChannelBandwidthGet;
        analog_in_channel_impedance_set(hdwf: Hdwf, idx_channel: c_int, impedance: c_double) = FDwfAnalogInChannelImpedanceSet;
        analog_in_channel_impedance_get(hdwf: Hdwf, idx_channel: c_int) -> c_double = FDwfAnalogInChannelImpedanceGet;
        analog_in_channel_coupling_info(hdwf: Hdwf) -> c_int = FDwfAnalogInChannelCouplingInfo;
        analog_in_channel_coupling_set(hdwf: Hdwf, idx_channel: c_int, coupling: DwfAnalogCoupling) = FDwfAnalogInChannelCouplingSet;
        analog_in_channel_coupling_get(hdwf: Hdwf, idx_channel: c_int) -> DwfAnalogCoupling = FDwfAnalogInChannelCouplingGet;
    }

    dwf_fn! {
        analog_in_trigger_source_set(hdwf: Hdwf, source: DwfTrigSrc) = FDwfAnalogInTriggerSourceSet;
        analog_in_trigger_source_get(hdwf: Hdwf) -> DwfTrigSrc = FDwfAnalogInTriggerSourceGet;
        analog_in_trigger_position_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfAnalogInTriggerPositionInfo;
        analog_in_trigger_position_set(hdwf: Hdwf, position: c_double) = FDwfAnalogInTriggerPositionSet;
        analog_in_trigger_position_get(hdwf: Hdwf) -> c_double = FDwfAnalogInTriggerPositionGet;
        analog_in_trigger_position_status(hdwf: Hdwf) -> c_double = FDwfAnalogInTriggerPositionStatus;
        analog_in_trigger_auto_timeout_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfAnalogInTriggerAutoTimeoutInfo;
        analog_in_trigger_auto_timeout_set(hdwf: Hdwf, timeout: c_double) = FDwfAnalogInTriggerAutoTimeoutSet;
        analog_in_trigger_auto_timeout_get(hdwf: Hdwf) -> c_double = FDwfAnalogInTriggerAutoTimeoutGet;
        analog_in_trigger_hold_off_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfAnalogInTriggerHoldOffInfo;
        analog_in_trigger_hold_off_set(hdwf: Hdwf, hold_off: c_double) = FDwfAnalogInTriggerHoldOffSet;
        analog_in_trigger_hold_off_get(hdwf: Hdwf) -> c_double = FDwfAnalogInTriggerHoldOffGet;
        analog_in_trigger_type_info(hdwf: Hdwf) -> c_int = FDwfAnalogInTriggerTypeInfo;
        analog_in_trigger_type_set(hdwf: Hdwf, trigger_type: DwfTrigType) = FDwfAnalogInTriggerTypeSet;
        analog_in_trigger_type_get(hdwf: Hdwf) -> DwfTrigType = FDwfAnalogInTriggerTypeGet;
        analog_in_trigger_channel_info(hdwf: Hdwf) -> (min: c_int, max: c_int) = FDwfAnalogInTriggerChannelInfo;
        analog_in_trigger_channel_set(hdwf: Hdwf, idx_channel: c_int) = FDwfAnalogInTriggerChannelSet;
        analog_in_trigger_channel_get(hdwf: Hdwf) -> c_int = FDwfAnalogInTriggerChannelGet;
        analog_in_trigger_filter_info(hdwf: Hdwf) -> c_int = FDwfAnalogInTriggerFilterInfo;
        analog_in_trigger_filter_set(hdwf: Hdwf, filter: DwfFilter) = FDwfAnalogInTriggerFilterSet;
        analog_in_trigger_filter_get(hdwf: Hdwf) -> DwfFilter = FDwfAnalogInTriggerFilterGet;
        analog_in_trigger_level_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfAnalogInTriggerLevelInfo;
        analog_in_trigger_level_set(hdwf: Hdwf, level: c_double) = FDwfAnalogInTriggerLevelSet;
        analog_in_trigger_level_get(hdwf: Hdwf) -> c_double = FDwfAnalogInTriggerLevelGet;
        analog_in_trigger_hysteresis_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfAnalogInTriggerHysteresisInfo;
        analog_in_trigger_hysteresis_set(hdwf: Hdwf, hysteresis: c_double) = FDwfAnalogInTriggerHysteresisSet;
        analog_in_trigger_hysteresis_get(hdwf: Hdwf) -> c_double = FDwfAnalogInTriggerHysteresisGet;
        analog_in_trigger_condition_info(hdwf: Hdwf) -> c_int = FDwfAnalogInTriggerConditionInfo;
        analog_in_trigger_condition_set(hdwf: Hdwf, condition: DwfTriggerSlope) = FDwfAnalogInTriggerConditionSet;
        analog_in_trigger_condition_get(hdwf: Hdwf) -> DwfTriggerSlope = FDwfAnalogInTriggerConditionGet;
        analog_in_trigger_length_info(hdwf: Hdwf) -> (min: c_double, max: c_double, steps: c_double) = FDwfAnalogInTriggerLengthInfo;
        analog_in_trigger_length_set(hdwf: Hdwf, length: c_double) = FDwfAnalogInTriggerLengthSet;
        analog_in_trigger_length_get(hdwf: Hdwf) -> c_double = FDwfAnalogInTriggerLengthGet;
        analog_in_trigger_length_condition_info(hdwf: Hdwf) -> c_int = FDwfAnalogInTriggerLengthConditionInfo;
        analog_in_trigger_length_condition_set(hdwf: Hdwf, condition: DwfTrigLen) = FDwfAnalogInTriggerLengthConditionSet;
        analog_in_trigger_length_condition_get(hdwf: Hdwf) -> DwfTrigLen = FDwfAnalogInTriggerLengthConditionGet;

        analog_in_sampling_source_set(hdwf: Hdwf, source: DwfTrigSrc) = FDwfAnalogInSamplingSourceSet;
        analog_in_sampling_source_get(hdwf: Hdwf) -> DwfTrigSrc = FDwfAnalogInSamplingSourceGet;
        analog_in_sampling_slope_set(hdwf: Hdwf, slope: DwfTriggerSlope) = FDwfAnalogInSamplingSlopeSet;
        analog_in_sampling_slope_get(hdwf: Hdwf) -> DwfTriggerSlope = FDwfAnalogInSamplingSlopeGet;
        analog_in_sampling_delay_set(hdwf: Hdwf, delay: c_double) = FDwfAnalogInSamplingDelaySet;
        analog_in_sampling_delay_get(hdwf: Hdwf) -> c_double = FDwfAnalogInSamplingDelayGet;
    }

    /// Copies `data.len()` volts of channel `idx_channel`, starting at buffer index `idx_data`.
    pub fn analog_in_status_data2(
        &self,
        hdwf: Hdwf,
        idx_channel: c_int,
        data: &mut [c_double],
        idx_data: c_int,
    ) -> Result<()> {
        dwf_call!(
            self,
            FDwfAnalogInStatusData2(
                hdwf,
                idx_channel,
                data.as_mut_ptr(),
                idx_data,
                data.len() as c_int
            )
        )
    }

    /// Raw ADC samples of channel `idx_channel`.
    pub fn analog_in_status_data16(
        &self,
        hdwf: Hdwf,
        idx_channel: c_int,
        data: &mut [c_short],
        idx_data: c_int,
    ) -> Result<()> {
        dwf_call!(
            self,
            FDwfAnalogInStatusData16(
                hdwf,
                idx_channel,
                data.as_mut_ptr(),
                idx_data,
                data.len() as c_int
            )
        )
    }

    /// Noise buffer (minimum and maximum per sample) of channel `idx_channel`.
    pub fn analog_in_status_noise2(
        &self,
        hdwf: Hdwf,
        idx_channel: c_int,
        min: &mut [c_double],
        max: &mut [c_double],
        idx_data: c_int,
    ) -> Result<()> {
        let count = min.len().min(max.len()) as c_int;
        dwf_call!(
            self,
            FDwfAnalogInStatusNoise2(
                hdwf,
                idx_channel,
                min.as_mut_ptr(),
                max.as_mut_ptr(),
                idx_data,
                count
            )
        )
    }

    /// Discrete input ranges supported by the device (at most 32).
    pub fn analog_in_channel_range_steps(&self, hdwf: Hdwf) -> Result<Vec<c_double>> {
        let mut steps = [0.0 as c_double; 32];
        let mut count: c_int = 0;
        dwf_call!(
            self,
            FDwfAnalogInChannelRangeSteps(hdwf, steps.as_mut_ptr(), &mut count)
        )?;
        Ok(steps[..count.clamp(0, 32) as usize].to_vec())
    }
}
