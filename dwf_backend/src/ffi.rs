//! Runtime binding to the Digilent WaveForms `dwf` C library.
//!
//! ## Overview
//!
//! The WaveForms runtime ships as a shared library (`dwf.dll`, `libdwf.so` or the
//! `dwf.framework` bundle on macOS). Instead of linking against it at build time, the library is
//! opened when a [`Dwf`](crate::Dwf) instance is created and every `FDwf*` entry point is
//! resolved by name into an [`EntryPoints`] table. Entry points that an older runtime does not
//! export stay `None`; calling them yields [`DwfError::MissingEntryPoint`] instead of failing
//! the whole load.
//!
//! Every entry point returns a C `int` which is non-zero on success. Output parameters are
//! passed as raw pointers; the safe wrappers on [`Dwf`](crate::Dwf) turn them into return
//! values.
//!
//! ## Types
//!
//! The type aliases below mirror the typedefs of the vendor header `dwf.h` so that each
//! signature in [`EntryPoints`] reads like its C declaration. Enumerated values are available as
//! typed Rust enums in [`constants`](crate::constants).
//!
//! ## Testing
//!
//! [`EntryPoints`] implements `Default` with every entry point unset, which lets tests plug in
//! `extern "C"` functions of their own and drive the rest of the stack without hardware.

use libc::{c_char, c_double, c_int, c_short, c_uchar, c_uint, c_ulonglong, c_ushort, c_void};
use libloading::Library;

use crate::error::{DwfError, Result};

pub type Hdwf = c_int;
pub const HDWF_NONE: Hdwf = 0;

pub type DwfEnumFilter = c_int;
pub const ENUMFILTER_ALL: DwfEnumFilter = 0;
pub const ENUMFILTER_TYPE: DwfEnumFilter = 0x8000000;
pub const ENUMFILTER_USB: DwfEnumFilter = 0x0000001;
pub const ENUMFILTER_NETWORK: DwfEnumFilter = 0x0000002;
pub const ENUMFILTER_AXI: DwfEnumFilter = 0x0000004;
pub const ENUMFILTER_REMOTE: DwfEnumFilter = 0x1000000;
pub const ENUMFILTER_AUDIO: DwfEnumFilter = 0x2000000;
pub const ENUMFILTER_DEMO: DwfEnumFilter = 0x4000000;

pub type DwfDeci = c_int;
pub const DECI_ANALOG_IN_CHANNEL_COUNT: DwfDeci = 1;
pub const DECI_ANALOG_OUT_CHANNEL_COUNT: DwfDeci = 2;
pub const DECI_ANALOG_IO_CHANNEL_COUNT: DwfDeci = 3;
pub const DECI_DIGITAL_IN_CHANNEL_COUNT: DwfDeci = 4;
pub const DECI_DIGITAL_OUT_CHANNEL_COUNT: DwfDeci = 5;
pub const DECI_DIGITAL_IO_CHANNEL_COUNT: DwfDeci = 6;
pub const DECI_ANALOG_IN_BUFFER_SIZE: DwfDeci = 7;
pub const DECI_ANALOG_OUT_BUFFER_SIZE: DwfDeci = 8;
pub const DECI_DIGITAL_IN_BUFFER_SIZE: DwfDeci = 9;
pub const DECI_DIGITAL_OUT_BUFFER_SIZE: DwfDeci = 10;
pub const DECI_TEXT_INFO: DwfDeci = -2;

pub type DwfDevId = c_int;
pub type DwfDevVer = c_int;
pub type DwfTrigSrc = c_uchar;
pub type DwfState = c_uchar;
pub type DwfAcqMode = c_int;
pub type DwfFilter = c_int;
pub type DwfTrigType = c_int;
pub type DwfTriggerSlope = c_int;
pub type DwfTrigLen = c_int;
pub type DwfErc = c_int;
pub type DwfFunc = c_uchar;
pub type DwfAnalogIO = c_uchar;
pub type DwfAnalogOutNode = c_int;
pub type DwfAnalogOutMode = c_int;
pub type DwfAnalogOutIdle = c_int;
pub type DwfDigitalInClockSource = c_int;
pub type DwfDigitalInSampleMode = c_int;
pub type DwfDigitalOutOutput = c_int;
pub type DwfDigitalOutType = c_int;
pub type DwfDigitalOutIdle = c_int;
pub type DwfParam = c_int;
pub type DwfAnalogCoupling = c_int;

/// Size of the buffers the driver fills with names, serial numbers and versions.
pub const NAME_BUFFER_SIZE: usize = 32;
/// Size of the buffer for configuration text info.
pub const TEXT_INFO_BUFFER_SIZE: usize = 128;
/// Size of the buffer for analog IO labels and units.
pub const LABEL_BUFFER_SIZE: usize = 16;
/// Size of the buffer for the last error message.
pub const ERROR_BUFFER_SIZE: usize = 512;

macro_rules! entry_points {
    ($( $name:ident ( $($arg:ident : $ty:ty),* ); )*) => {
        /// Table of `FDwf*` functions resolved from the runtime library.
        #[allow(non_snake_case)]
        #[derive(Default, Clone, Copy)]
        pub struct EntryPoints {
            $( pub $name: Option<unsafe extern "C" fn($($ty),*) -> c_int>, )*
        }

        impl EntryPoints {
            /// Looks up every entry point in `library`. Symbols that cannot be found are left unset.
            pub fn resolve(library: &Library) -> Self {
                Self {
                    $(
                        $name: unsafe {
                            library.get::<unsafe extern "C" fn($($ty),*) -> c_int>(
                                concat!(stringify!($name), "\0").as_bytes(),
                            )
                        }
                        .ok()
                        .map(|symbol| *symbol),
                    )*
                }
            }

            /// Names of the entry points that are not available.
            pub fn missing(&self) -> Vec<&'static str> {
                let mut names = Vec::new();
                $( if self.$name.is_none() { names.push(stringify!($name)); } )*
                names
            }

            /// Number of entry points known to this binding.
            pub fn count(&self) -> usize {
                [$(stringify!($name)),*].len()
            }
        }
    };
}

entry_points! {
    FDwfGetLastError(pdwferc: *mut DwfErc);
    FDwfGetLastErrorMsg(sz_error: *mut c_char);
    FDwfGetVersion(sz_version: *mut c_char);
    FDwfParamSet(param: DwfParam, value: c_int);
    FDwfParamGet(param: DwfParam, pvalue: *mut c_int);
    FDwfEnum(enumfilter: DwfEnumFilter, pc_device: *mut c_int);
    FDwfEnumDeviceType(idx_device: c_int, p_device_id: *mut DwfDevId, p_device_revision: *mut DwfDevVer);
    FDwfEnumDeviceIsOpened(idx_device: c_int, pf_is_used: *mut c_int);
    FDwfEnumUserName(idx_device: c_int, sz_user_name: *mut c_char);
    FDwfEnumDeviceName(idx_device: c_int, sz_device_name: *mut c_char);
    FDwfEnumSN(idx_device: c_int, sz_sn: *mut c_char);
    FDwfEnumConfig(idx_device: c_int, pc_config: *mut c_int);
    FDwfEnumConfigInfo(idx_device: c_int, info: DwfDeci, pv: *mut c_void);
    FDwfDeviceOpen(idx_device: c_int, phdwf: *mut Hdwf);
    FDwfDeviceConfigOpen(idx_dev: c_int, idx_cfg: c_int, phdwf: *mut Hdwf);
    FDwfDeviceClose(hdwf: Hdwf);
    FDwfDeviceCloseAll();
    FDwfDeviceAutoConfigureSet(hdwf: Hdwf, f_auto_configure: c_int);
    FDwfDeviceAutoConfigureGet(hdwf: Hdwf, pf_auto_configure: *mut c_int);
    FDwfDeviceReset(hdwf: Hdwf);
    FDwfDeviceEnableSet(hdwf: Hdwf, f_enable: c_int);
    FDwfDeviceTriggerInfo(hdwf: Hdwf, pfstrigsrc: *mut c_int);
    FDwfDeviceTriggerSet(hdwf: Hdwf, idx_pin: c_int, trigsrc: DwfTrigSrc);
    FDwfDeviceTriggerGet(hdwf: Hdwf, idx_pin: c_int, ptrigsrc: *mut DwfTrigSrc);
    FDwfDeviceTriggerPC(hdwf: Hdwf);
    FDwfDeviceTriggerSlopeInfo(hdwf: Hdwf, pfsslope: *mut c_int);
    FDwfDeviceParamSet(hdwf: Hdwf, param: DwfParam, value: c_int);
    FDwfDeviceParamGet(hdwf: Hdwf, param: DwfParam, pvalue: *mut c_int);
    FDwfAnalogInReset(hdwf: Hdwf);
    FDwfAnalogInConfigure(hdwf: Hdwf, f_reconfigure: c_int, f_start: c_int);
    FDwfAnalogInTriggerForce(hdwf: Hdwf);
    FDwfAnalogInStatus(hdwf: Hdwf, f_read_data: c_int, psts: *mut DwfState);
    FDwfAnalogInStatusSamplesLeft(hdwf: Hdwf, pc_samples_left: *mut c_int);
    FDwfAnalogInStatusSamplesValid(hdwf: Hdwf, pc_samples_valid: *mut c_int);
    FDwfAnalogInStatusIndexWrite(hdwf: Hdwf, pidx_write: *mut c_int);
    FDwfAnalogInStatusAutoTriggered(hdwf: Hdwf, pf_auto: *mut c_int);
    FDwfAnalogInStatusData2(hdwf: Hdwf, idx_channel: c_int, rgd_volt_data: *mut c_double, idx_data: c_int, cd_data: c_int);
    FDwfAnalogInStatusData16(hdwf: Hdwf, idx_channel: c_int, rgu16_data: *mut c_short, idx_data: c_int, cd_data: c_int);
    FDwfAnalogInStatusNoise2(hdwf: Hdwf, idx_channel: c_int, rgd_min: *mut c_double, rgd_max: *mut c_double, idx_data: c_int, cd_data: c_int);
    FDwfAnalogInStatusSample(hdwf: Hdwf, idx_channel: c_int, pd_volt_sample: *mut c_double);
    FDwfAnalogInStatusRecord(hdwf: Hdwf, pcd_data_available: *mut c_int, pcd_data_lost: *mut c_int, pcd_data_corrupt: *mut c_int);
    FDwfAnalogInRecordLengthSet(hdwf: Hdwf, s_length: c_double);
    FDwfAnalogInRecordLengthGet(hdwf: Hdwf, ps_length: *mut c_double);
    FDwfAnalogInFrequencyInfo(hdwf: Hdwf, phz_min: *mut c_double, phz_max: *mut c_double);
    FDwfAnalogInFrequencySet(hdwf: Hdwf, hz_frequency: c_double);
    FDwfAnalogInFrequencyGet(hdwf: Hdwf, phz_frequency: *mut c_double);
    FDwfAnalogInBitsInfo(hdwf: Hdwf, pn_bits: *mut c_int);
    FDwfAnalogInBufferSizeInfo(hdwf: Hdwf, pn_size_min: *mut c_int, pn_size_max: *mut c_int);
    FDwfAnalogInBufferSizeSet(hdwf: Hdwf, n_size: c_int);
    FDwfAnalogInBufferSizeGet(hdwf: Hdwf, pn_size: *mut c_int);
    FDwfAnalogInNoiseSizeInfo(hdwf: Hdwf, pn_size_max: *mut c_int);
    FDwfAnalogInNoiseSizeSet(hdwf: Hdwf, n_size: c_int);
    FDwfAnalogInNoiseSizeGet(hdwf: Hdwf, pn_size: *mut c_int);
    FDwfAnalogInAcquisitionModeInfo(hdwf: Hdwf, pfsacqmode: *mut c_int);
    FDwfAnalogInAcquisitionModeSet(hdwf: Hdwf, acqmode: DwfAcqMode);
    FDwfAnalogInAcquisitionModeGet(hdwf: Hdwf, pacqmode: *mut DwfAcqMode);
    FDwfAnalogInChannelCount(hdwf: Hdwf, pc_channel: *mut c_int);
    FDwfAnalogInChannelEnableSet(hdwf: Hdwf, idx_channel: c_int, f_enable: c_int);
    FDwfAnalogInChannelEnableGet(hdwf: Hdwf, idx_channel: c_int, pf_enable: *mut c_int);
    FDwfAnalogInChannelFilterInfo(hdwf: Hdwf, pfsfilter: *mut c_int);
    FDwfAnalogInChannelFilterSet(hdwf: Hdwf, idx_channel: c_int, filter: DwfFilter);
    FDwfAnalogInChannelFilterGet(hdwf: Hdwf, idx_channel: c_int, pfilter: *mut DwfFilter);
    FDwfAnalogInChannelRangeInfo(hdwf: Hdwf, pvolts_min: *mut c_double, pvolts_max: *mut c_double, pn_steps: *mut c_double);
    FDwfAnalogInChannelRangeSteps(hdwf: Hdwf, rg_volts_step: *mut c_double, pn_steps: *mut c_int);
    FDwfAnalogInChannelRangeSet(hdwf: Hdwf, idx_channel: c_int, volts_range: c_double);
    FDwfAnalogInChannelRangeGet(hdwf: Hdwf, idx_channel: c_int, pvolts_range: *mut c_double);
    FDwfAnalogInChannelOffsetInfo(hdwf: Hdwf, pvolts_min: *mut c_double, pvolts_max: *mut c_double, pn_steps: *mut c_double);
    FDwfAnalogInChannelOffsetSet(hdwf: Hdwf, idx_channel: c_int, volt_offset: c_double);
    FDwfAnalogInChannelOffsetGet(hdwf: Hdwf, idx_channel: c_int, pvolt_offset: *mut c_double);
    FDwfAnalogInChannelAttenuationSet(hdwf: Hdwf, idx_channel: c_int, x_attenuation: c_double);
    FDwfAnalogInChannelAttenuationGet(hdwf: Hdwf, idx_channel: c_int, px_attenuation: *mut c_double);
    FDwfAnalogInChannelBandwidthSet(hdwf: Hdwf, idx_channel: c_int, hz: c_double);
    FDwfAnalogInChannelBandwidthGet(hdwf: Hdwf, idx_channel: c_int, phz: *mut c_double);
    FDwfAnalogInChannelImpedanceSet(hdwf: Hdwf, idx_channel: c_int, ohms: c_double);
    FDwfAnalogInChannelImpedanceGet(hdwf: Hdwf, idx_channel: c_int, pohms: *mut c_double);
    FDwfAnalogInChannelCouplingInfo(hdwf: Hdwf, pfscoupling: *mut c_int);
    FDwfAnalogInChannelCouplingSet(hdwf: Hdwf, idx_channel: c_int, coupling: DwfAnalogCoupling);
    FDwfAnalogInChannelCouplingGet(hdwf: Hdwf, idx_channel: c_int, pcoupling: *mut DwfAnalogCoupling);
    FDwfAnalogInTriggerSourceSet(hdwf: Hdwf, trigsrc: DwfTrigSrc);
    FDwfAnalogInTriggerSourceGet(hdwf: Hdwf, ptrigsrc: *mut DwfTrigSrc);
    FDwfAnalogInTriggerPositionInfo(hdwf: Hdwf, psec_min: *mut c_double, psec_max: *mut c_double, pn_steps: *mut c_double);
    FDwfAnalogInTriggerPositionSet(hdwf: Hdwf, sec_position: c_double);
    FDwfAnalogInTriggerPositionGet(hdwf: Hdwf, psec_position: *mut c_double);
    FDwfAnalogInTriggerPositionStatus(hdwf: Hdwf, psec_position: *mut c_double);
    FDwfAnalogInTriggerAutoTimeoutInfo(hdwf: Hdwf, psec_min: *mut c_double, psec_max: *mut c_double, pn_steps: *mut c_double);
    FDwfAnalogInTriggerAutoTimeoutSet(hdwf: Hdwf, sec_timeout: c_double);
    FDwfAnalogInTriggerAutoTimeoutGet(hdwf: Hdwf, psec_timeout: *mut c_double);
    FDwfAnalogInTriggerHoldOffInfo(hdwf: Hdwf, psec_min: *mut c_double, psec_max: *mut c_double, pn_step: *mut c_double);
    FDwfAnalogInTriggerHoldOffSet(hdwf: Hdwf, sec_hold_off: c_double);
    FDwfAnalogInTriggerHoldOffGet(hdwf: Hdwf, psec_hold_off: *mut c_double);
    FDwfAnalogInTriggerTypeInfo(hdwf: Hdwf, pfstrigtype: *mut c_int);
    FDwfAnalogInTriggerTypeSet(hdwf: Hdwf, trigtype: DwfTrigType);
    FDwfAnalogInTriggerTypeGet(hdwf: Hdwf, ptrigtype: *mut DwfTrigType);
    FDwfAnalogInTriggerChannelInfo(hdwf: Hdwf, pidx_min: *mut c_int, pidx_max: *mut c_int);
    FDwfAnalogInTriggerChannelSet(hdwf: Hdwf, idx_channel: c_int);
    FDwfAnalogInTriggerChannelGet(hdwf: Hdwf, pidx_channel: *mut c_int);
    FDwfAnalogInTriggerFilterInfo(hdwf: Hdwf, pfsfilter: *mut c_int);
    FDwfAnalogInTriggerFilterSet(hdwf: Hdwf, filter: DwfFilter);
    FDwfAnalogInTriggerFilterGet(hdwf: Hdwf, pfilter: *mut DwfFilter);
    FDwfAnalogInTriggerLevelInfo(hdwf: Hdwf, pvolts_min: *mut c_double, pvolts_max: *mut c_double, pn_steps: *mut c_double);
    FDwfAnalogInTriggerLevelSet(hdwf: Hdwf, volts_level: c_double);
    FDwfAnalogInTriggerLevelGet(hdwf: Hdwf, pvolts_level: *mut c_double);
    FDwfAnalogInTriggerHysteresisInfo(hdwf: Hdwf, pvolts_min: *mut c_double, pvolts_max: *mut c_double, pn_steps: *mut c_double);
    FDwfAnalogInTriggerHysteresisSet(hdwf: Hdwf, volts_level: c_double);
    FDwfAnalogInTriggerHysteresisGet(hdwf: Hdwf, pvolts_hysteresis: *mut c_double);
    FDwfAnalogInTriggerConditionInfo(hdwf: Hdwf, pfstrigcond: *mut c_int);
    FDwfAnalogInTriggerConditionSet(hdwf: Hdwf, trigcond: DwfTriggerSlope);
    FDwfAnalogInTriggerConditionGet(hdwf: Hdwf, ptrigcond: *mut DwfTriggerSlope);
    FDwfAnalogInTriggerLengthInfo(hdwf: Hdwf, psec_min: *mut c_double, psec_max: *mut c_double, pn_steps: *mut c_double);
    FDwfAnalogInTriggerLengthSet(hdwf: Hdwf, sec_length: c_double);
    FDwfAnalogInTriggerLengthGet(hdwf: Hdwf, psec_length: *mut c_double);
    FDwfAnalogInTriggerLengthConditionInfo(hdwf: Hdwf, pfstriglen: *mut c_int);
    FDwfAnalogInTriggerLengthConditionSet(hdwf: Hdwf, triglen: DwfTrigLen);
    FDwfAnalogInTriggerLengthConditionGet(hdwf: Hdwf, ptriglen: *mut DwfTrigLen);
    FDwfAnalogInSamplingSourceSet(hdwf: Hdwf, trigsrc: DwfTrigSrc);
    FDwfAnalogInSamplingSourceGet(hdwf: Hdwf, ptrigsrc: *mut DwfTrigSrc);
    FDwfAnalogInSamplingSlopeSet(hdwf: Hdwf, slope: DwfTriggerSlope);
    FDwfAnalogInSamplingSlopeGet(hdwf: Hdwf, pslope: *mut DwfTriggerSlope);
    FDwfAnalogInSamplingDelaySet(hdwf: Hdwf, sec: c_double);
    FDwfAnalogInSamplingDelayGet(hdwf: Hdwf, psec: *mut c_double);
    FDwfAnalogOutCount(hdwf: Hdwf, pc_channel: *mut c_int);
    FDwfAnalogOutMasterSet(hdwf: Hdwf, idx_channel: c_int, idx_master: c_int);
    FDwfAnalogOutMasterGet(hdwf: Hdwf, idx_channel: c_int, pidx_master: *mut c_int);
    FDwfAnalogOutTriggerSourceSet(hdwf: Hdwf, idx_channel: c_int, trigsrc: DwfTrigSrc);
    FDwfAnalogOutTriggerSourceGet(hdwf: Hdwf, idx_channel: c_int, ptrigsrc: *mut DwfTrigSrc);
    FDwfAnalogOutTriggerSlopeSet(hdwf: Hdwf, idx_channel: c_int, slope: DwfTriggerSlope);
    FDwfAnalogOutTriggerSlopeGet(hdwf: Hdwf, idx_channel: c_int, pslope: *mut DwfTriggerSlope);
    FDwfAnalogOutRunInfo(hdwf: Hdwf, idx_channel: c_int, psec_min: *mut c_double, psec_max: *mut c_double);
    FDwfAnalogOutRunSet(hdwf: Hdwf, idx_channel: c_int, sec_run: c_double);
    FDwfAnalogOutRunGet(hdwf: Hdwf, idx_channel: c_int, psec_run: *mut c_double);
    FDwfAnalogOutRunStatus(hdwf: Hdwf, idx_channel: c_int, psec_run: *mut c_double);
    FDwfAnalogOutWaitInfo(hdwf: Hdwf, idx_channel: c_int, psec_min: *mut c_double, psec_max: *mut c_double);
    FDwfAnalogOutWaitSet(hdwf: Hdwf, idx_channel: c_int, sec_wait: c_double);
    FDwfAnalogOutWaitGet(hdwf: Hdwf, idx_channel: c_int, psec_wait: *mut c_double);
    FDwfAnalogOutRepeatInfo(hdwf: Hdwf, idx_channel: c_int, pn_min: *mut c_int, pn_max: *mut c_int);
    FDwfAnalogOutRepeatSet(hdwf: Hdwf, idx_channel: c_int, c_repeat: c_int);
    FDwfAnalogOutRepeatGet(hdwf: Hdwf, idx_channel: c_int, pc_repeat: *mut c_int);
    FDwfAnalogOutRepeatStatus(hdwf: Hdwf, idx_channel: c_int, pc_repeat: *mut c_int);
    FDwfAnalogOutRepeatTriggerSet(hdwf: Hdwf, idx_channel: c_int, f_repeat_trigger: c_int);
    FDwfAnalogOutRepeatTriggerGet(hdwf: Hdwf, idx_channel: c_int, pf_repeat_trigger: *mut c_int);
    FDwfAnalogOutLimitationInfo(hdwf: Hdwf, idx_channel: c_int, p_min: *mut c_double, p_max: *mut c_double);
    FDwfAnalogOutLimitationSet(hdwf: Hdwf, idx_channel: c_int, limit: c_double);
    FDwfAnalogOutLimitationGet(hdwf: Hdwf, idx_channel: c_int, plimit: *mut c_double);
    FDwfAnalogOutModeSet(hdwf: Hdwf, idx_channel: c_int, mode: DwfAnalogOutMode);
    FDwfAnalogOutModeGet(hdwf: Hdwf, idx_channel: c_int, pmode: *mut DwfAnalogOutMode);
    FDwfAnalogOutIdleInfo(hdwf: Hdwf, idx_channel: c_int, pfsidle: *mut c_int);
    FDwfAnalogOutIdleSet(hdwf: Hdwf, idx_channel: c_int, idle: DwfAnalogOutIdle);
    FDwfAnalogOutIdleGet(hdwf: Hdwf, idx_channel: c_int, pidle: *mut DwfAnalogOutIdle);
    FDwfAnalogOutNodeInfo(hdwf: Hdwf, idx_channel: c_int, pfsnode: *mut c_int);
    FDwfAnalogOutNodeEnableSet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, f_mode: c_int);
    FDwfAnalogOutNodeEnableGet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, pf_mode: *mut c_int);
    FDwfAnalogOutNodeFunctionInfo(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, pfsfunc: *mut c_uint);
    FDwfAnalogOutNodeFunctionSet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, func: DwfFunc);
    FDwfAnalogOutNodeFunctionGet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, pfunc: *mut DwfFunc);
    FDwfAnalogOutNodeFrequencyInfo(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, phz_min: *mut c_double, phz_max: *mut c_double);
    FDwfAnalogOutNodeFrequencySet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, hz_frequency: c_double);
    FDwfAnalogOutNodeFrequencyGet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, phz_frequency: *mut c_double);
    FDwfAnalogOutNodeAmplitudeInfo(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, p_min: *mut c_double, p_max: *mut c_double);
    FDwfAnalogOutNodeAmplitudeSet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, v_amplitude: c_double);
    FDwfAnalogOutNodeAmplitudeGet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, pv_amplitude: *mut c_double);
    FDwfAnalogOutNodeOffsetInfo(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, p_min: *mut c_double, p_max: *mut c_double);
    FDwfAnalogOutNodeOffsetSet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, v_offset: c_double);
    FDwfAnalogOutNodeOffsetGet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, pv_offset: *mut c_double);
    FDwfAnalogOutNodeSymmetryInfo(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, ppercentage_min: *mut c_double, ppercentage_max: *mut c_double);
    FDwfAnalogOutNodeSymmetrySet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, percentage_symmetry: c_double);
    FDwfAnalogOutNodeSymmetryGet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, ppercentage_symmetry: *mut c_double);
    FDwfAnalogOutNodePhaseInfo(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, pdegree_min: *mut c_double, pdegree_max: *mut c_double);
    FDwfAnalogOutNodePhaseSet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, degree_phase: c_double);
    FDwfAnalogOutNodePhaseGet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, pdegree_phase: *mut c_double);
    FDwfAnalogOutNodeDataInfo(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, pn_samples_min: *mut c_int, pn_samples_max: *mut c_int);
    FDwfAnalogOutNodeDataSet(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, rgd_data: *mut c_double, cd_data: c_int);
    FDwfAnalogOutReset(hdwf: Hdwf, idx_channel: c_int);
    FDwfAnalogOutConfigure(hdwf: Hdwf, idx_channel: c_int, f_start: c_int);
    FDwfAnalogOutStatus(hdwf: Hdwf, idx_channel: c_int, psts: *mut DwfState);
    FDwfAnalogOutNodePlayStatus(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, cd_data_free: *mut c_int, cd_data_lost: *mut c_int, cd_data_corrupted: *mut c_int);
    FDwfAnalogOutNodePlayData(hdwf: Hdwf, idx_channel: c_int, node: DwfAnalogOutNode, rgd_data: *mut c_double, cd_data: c_int);
    FDwfAnalogIOReset(hdwf: Hdwf);
    FDwfAnalogIOConfigure(hdwf: Hdwf);
    FDwfAnalogIOStatus(hdwf: Hdwf);
    FDwfAnalogIOEnableInfo(hdwf: Hdwf, pf_set: *mut c_int, pf_status: *mut c_int);
    FDwfAnalogIOEnableSet(hdwf: Hdwf, f_master_enable: c_int);
    FDwfAnalogIOEnableGet(hdwf: Hdwf, pf_master_enable: *mut c_int);
    FDwfAnalogIOEnableStatus(hdwf: Hdwf, pf_master_enable: *mut c_int);
    FDwfAnalogIOChannelCount(hdwf: Hdwf, pn_channel: *mut c_int);
    FDwfAnalogIOChannelName(hdwf: Hdwf, idx_channel: c_int, sz_name: *mut c_char, sz_label: *mut c_char);
    FDwfAnalogIOChannelInfo(hdwf: Hdwf, idx_channel: c_int, pn_nodes: *mut c_int);
    FDwfAnalogIOChannelNodeName(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int, sz_node_name: *mut c_char, sz_node_units: *mut c_char);
    FDwfAnalogIOChannelNodeInfo(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int, panalogio: *mut DwfAnalogIO);
    FDwfAnalogIOChannelNodeSetInfo(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int, pmin: *mut c_double, pmax: *mut c_double, pn_steps: *mut c_int);
    FDwfAnalogIOChannelNodeSet(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int, value: c_double);
    FDwfAnalogIOChannelNodeGet(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int, pvalue: *mut c_double);
    FDwfAnalogIOChannelNodeStatusInfo(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int, pmin: *mut c_double, pmax: *mut c_double, pn_steps: *mut c_int);
    FDwfAnalogIOChannelNodeStatus(hdwf: Hdwf, idx_channel: c_int, idx_node: c_int, pvalue: *mut c_double);
    FDwfDigitalIOReset(hdwf: Hdwf);
    FDwfDigitalIOConfigure(hdwf: Hdwf);
    FDwfDigitalIOStatus(hdwf: Hdwf);
    FDwfDigitalIOOutputEnableInfo64(hdwf: Hdwf, pfs_output_enable_mask: *mut c_ulonglong);
    FDwfDigitalIOOutputEnableSet64(hdwf: Hdwf, fs_output_enable: c_ulonglong);
    FDwfDigitalIOOutputEnableGet64(hdwf: Hdwf, pfs_output_enable: *mut c_ulonglong);
    FDwfDigitalIOOutputInfo64(hdwf: Hdwf, pfs_output_mask: *mut c_ulonglong);
    FDwfDigitalIOOutputSet64(hdwf: Hdwf, fs_output: c_ulonglong);
    FDwfDigitalIOOutputGet64(hdwf: Hdwf, pfs_output: *mut c_ulonglong);
    FDwfDigitalIOInputInfo64(hdwf: Hdwf, pfs_input_mask: *mut c_ulonglong);
    FDwfDigitalIOInputStatus64(hdwf: Hdwf, pfs_input: *mut c_ulonglong);
    FDwfDigitalInReset(hdwf: Hdwf);
    FDwfDigitalInConfigure(hdwf: Hdwf, f_reconfigure: c_int, f_start: c_int);
    FDwfDigitalInStatus(hdwf: Hdwf, f_read_data: c_int, psts: *mut DwfState);
    FDwfDigitalInStatusSamplesLeft(hdwf: Hdwf, pc_samples_left: *mut c_int);
    FDwfDigitalInStatusSamplesValid(hdwf: Hdwf, pc_samples_valid: *mut c_int);
    FDwfDigitalInStatusIndexWrite(hdwf: Hdwf, pidx_write: *mut c_int);
    FDwfDigitalInStatusAutoTriggered(hdwf: Hdwf, pf_auto: *mut c_int);
    FDwfDigitalInStatusData2(hdwf: Hdwf, rg_data: *mut c_void, idx_sample: c_int, count_of_data_bytes: c_int);
    FDwfDigitalInStatusNoise2(hdwf: Hdwf, rg_data: *mut c_void, idx_sample: c_int, count_of_data_bytes: c_int);
    FDwfDigitalInStatusRecord(hdwf: Hdwf, pcd_data_available: *mut c_int, pcd_data_lost: *mut c_int, pcd_data_corrupt: *mut c_int);
    FDwfDigitalInInternalClockInfo(hdwf: Hdwf, phz_freq: *mut c_double);
    FDwfDigitalInClockSourceInfo(hdwf: Hdwf, pfs_dwf_digital_in_clock_source: *mut c_int);
    FDwfDigitalInClockSourceSet(hdwf: Hdwf, v: DwfDigitalInClockSource);
    FDwfDigitalInClockSourceGet(hdwf: Hdwf, pv: *mut DwfDigitalInClockSource);
    FDwfDigitalInDividerInfo(hdwf: Hdwf, pdiv_max: *mut c_uint);
    FDwfDigitalInDividerSet(hdwf: Hdwf, div: c_uint);
    FDwfDigitalInDividerGet(hdwf: Hdwf, pdiv: *mut c_uint);
    FDwfDigitalInBitsInfo(hdwf: Hdwf, pn_bits: *mut c_int);
    FDwfDigitalInSampleFormatSet(hdwf: Hdwf, n_bits: c_int);
    FDwfDigitalInSampleFormatGet(hdwf: Hdwf, pn_bits: *mut c_int);
    FDwfDigitalInInputOrderSet(hdwf: Hdwf, f_dio_first: c_int);
    FDwfDigitalInBufferSizeInfo(hdwf: Hdwf, pn_size_max: *mut c_int);
    FDwfDigitalInBufferSizeSet(hdwf: Hdwf, n_size: c_int);
    FDwfDigitalInBufferSizeGet(hdwf: Hdwf, pn_size: *mut c_int);
    FDwfDigitalInSampleModeInfo(hdwf: Hdwf, pfs_dwf_digital_in_sample_mode: *mut c_int);
    FDwfDigitalInSampleModeSet(hdwf: Hdwf, v: DwfDigitalInSampleMode);
    FDwfDigitalInSampleModeGet(hdwf: Hdwf, pv: *mut DwfDigitalInSampleMode);
    FDwfDigitalInSampleSensibleSet(hdwf: Hdwf, fs: c_uint);
    FDwfDigitalInSampleSensibleGet(hdwf: Hdwf, pfs: *mut c_uint);
    FDwfDigitalInAcquisitionModeInfo(hdwf: Hdwf, pfsacqmode: *mut c_int);
    FDwfDigitalInAcquisitionModeSet(hdwf: Hdwf, acqmode: DwfAcqMode);
    FDwfDigitalInAcquisitionModeGet(hdwf: Hdwf, pacqmode: *mut DwfAcqMode);
    FDwfDigitalInTriggerSourceSet(hdwf: Hdwf, trigsrc: DwfTrigSrc);
    FDwfDigitalInTriggerSourceGet(hdwf: Hdwf, ptrigsrc: *mut DwfTrigSrc);
    FDwfDigitalInTriggerSlopeSet(hdwf: Hdwf, slope: DwfTriggerSlope);
    FDwfDigitalInTriggerSlopeGet(hdwf: Hdwf, pslope: *mut DwfTriggerSlope);
    FDwfDigitalInTriggerPositionInfo(hdwf: Hdwf, pn_samples_after_trigger_max: *mut c_uint);
    FDwfDigitalInTriggerPositionSet(hdwf: Hdwf, c_samples_after_trigger: c_uint);
    FDwfDigitalInTriggerPositionGet(hdwf: Hdwf, pc_samples_after_trigger: *mut c_uint);
    FDwfDigitalInTriggerPrefillSet(hdwf: Hdwf, c_samples_before_trigger: c_uint);
    FDwfDigitalInTriggerPrefillGet(hdwf: Hdwf, pc_samples_before_trigger: *mut c_uint);
    FDwfDigitalInTriggerAutoTimeoutInfo(hdwf: Hdwf, psec_min: *mut c_double, psec_max: *mut c_double, pn_steps: *mut c_double);
    FDwfDigitalInTriggerAutoTimeoutSet(hdwf: Hdwf, sec_timeout: c_double);
    FDwfDigitalInTriggerAutoTimeoutGet(hdwf: Hdwf, psec_timeout: *mut c_double);
    FDwfDigitalInTriggerInfo(hdwf: Hdwf, pfs_level_low: *mut c_uint, pfs_level_high: *mut c_uint, pfs_edge_rise: *mut c_uint, pfs_edge_fall: *mut c_uint);
    FDwfDigitalInTriggerSet(hdwf: Hdwf, fs_level_low: c_uint, fs_level_high: c_uint, fs_edge_rise: c_uint, fs_edge_fall: c_uint);
    FDwfDigitalInTriggerGet(hdwf: Hdwf, pfs_level_low: *mut c_uint, pfs_level_high: *mut c_uint, pfs_edge_rise: *mut c_uint, pfs_edge_fall: *mut c_uint);
    FDwfDigitalInTriggerResetSet(hdwf: Hdwf, fs_level_low: c_uint, fs_level_high: c_uint, fs_edge_rise: c_uint, fs_edge_fall: c_uint);
    FDwfDigitalInTriggerCountSet(hdwf: Hdwf, c_count: c_int, f_restart: c_int);
    FDwfDigitalInTriggerLengthSet(hdwf: Hdwf, sec_min: c_double, sec_max: c_double, idx_sync: c_int);
    FDwfDigitalInTriggerMatchSet(hdwf: Hdwf, i_pin: c_int, fs_mask: c_uint, fs_value: c_uint, c_bit_stuffing: c_int);
    FDwfDigitalOutReset(hdwf: Hdwf);
    FDwfDigitalOutConfigure(hdwf: Hdwf, f_start: c_int);
    FDwfDigitalOutStatus(hdwf: Hdwf, psts: *mut DwfState);
    FDwfDigitalOutInternalClockInfo(hdwf: Hdwf, phz_freq: *mut c_double);
    FDwfDigitalOutTriggerSourceSet(hdwf: Hdwf, trigsrc: DwfTrigSrc);
    FDwfDigitalOutTriggerSourceGet(hdwf: Hdwf, ptrigsrc: *mut DwfTrigSrc);
    FDwfDigitalOutRunInfo(hdwf: Hdwf, psec_min: *mut c_double, psec_max: *mut c_double);
    FDwfDigitalOutRunSet(hdwf: Hdwf, sec_run: c_double);
    FDwfDigitalOutRunGet(hdwf: Hdwf, psec_run: *mut c_double);
    FDwfDigitalOutRunStatus(hdwf: Hdwf, psec_run: *mut c_double);
    FDwfDigitalOutWaitInfo(hdwf: Hdwf, psec_min: *mut c_double, psec_max: *mut c_double);
    FDwfDigitalOutWaitSet(hdwf: Hdwf, sec_wait: c_double);
    FDwfDigitalOutWaitGet(hdwf: Hdwf, psec_wait: *mut c_double);
    FDwfDigitalOutRepeatInfo(hdwf: Hdwf, pn_min: *mut c_uint, pn_max: *mut c_uint);
    FDwfDigitalOutRepeatSet(hdwf: Hdwf, c_repeat: c_uint);
    FDwfDigitalOutRepeatGet(hdwf: Hdwf, pc_repeat: *mut c_uint);
    FDwfDigitalOutRepeatStatus(hdwf: Hdwf, pc_repeat: *mut c_uint);
    FDwfDigitalOutTriggerSlopeSet(hdwf: Hdwf, slope: DwfTriggerSlope);
    FDwfDigitalOutTriggerSlopeGet(hdwf: Hdwf, pslope: *mut DwfTriggerSlope);
    FDwfDigitalOutRepeatTriggerSet(hdwf: Hdwf, f_repeat_trigger: c_int);
    FDwfDigitalOutRepeatTriggerGet(hdwf: Hdwf, pf_repeat_trigger: *mut c_int);
    FDwfDigitalOutCount(hdwf: Hdwf, pc_channel: *mut c_int);
    FDwfDigitalOutEnableSet(hdwf: Hdwf, idx_channel: c_int, f_enable: c_int);
    FDwfDigitalOutEnableGet(hdwf: Hdwf, idx_channel: c_int, pf_enable: *mut c_int);
    FDwfDigitalOutOutputInfo(hdwf: Hdwf, idx_channel: c_int, pfs_dwf_digital_out_output: *mut c_int);
    FDwfDigitalOutOutputSet(hdwf: Hdwf, idx_channel: c_int, v: DwfDigitalOutOutput);
    FDwfDigitalOutOutputGet(hdwf: Hdwf, idx_channel: c_int, pv: *mut DwfDigitalOutOutput);
    FDwfDigitalOutTypeInfo(hdwf: Hdwf, idx_channel: c_int, pfs_dwf_digital_out_type: *mut c_int);
    FDwfDigitalOutTypeSet(hdwf: Hdwf, idx_channel: c_int, v: DwfDigitalOutType);
    FDwfDigitalOutTypeGet(hdwf: Hdwf, idx_channel: c_int, pv: *mut DwfDigitalOutType);
    FDwfDigitalOutIdleInfo(hdwf: Hdwf, idx_channel: c_int, pfs_dwf_digital_out_idle: *mut c_int);
    FDwfDigitalOutIdleSet(hdwf: Hdwf, idx_channel: c_int, v: DwfDigitalOutIdle);
    FDwfDigitalOutIdleGet(hdwf: Hdwf, idx_channel: c_int, pv: *mut DwfDigitalOutIdle);
    FDwfDigitalOutDividerInfo(hdwf: Hdwf, idx_channel: c_int, v_min: *mut c_uint, v_max: *mut c_uint);
    FDwfDigitalOutDividerInitSet(hdwf: Hdwf, idx_channel: c_int, v: c_uint);
    FDwfDigitalOutDividerInitGet(hdwf: Hdwf, idx_channel: c_int, pv: *mut c_uint);
    FDwfDigitalOutDividerSet(hdwf: Hdwf, idx_channel: c_int, v: c_uint);
    FDwfDigitalOutDividerGet(hdwf: Hdwf, idx_channel: c_int, pv: *mut c_uint);
    FDwfDigitalOutCounterInfo(hdwf: Hdwf, idx_channel: c_int, v_min: *mut c_uint, v_max: *mut c_uint);
    FDwfDigitalOutCounterInitSet(hdwf: Hdwf, idx_channel: c_int, f_high: c_int, v: c_uint);
    FDwfDigitalOutCounterInitGet(hdwf: Hdwf, idx_channel: c_int, pf_high: *mut c_int, pv: *mut c_uint);
    FDwfDigitalOutCounterSet(hdwf: Hdwf, idx_channel: c_int, v_low: c_uint, v_high: c_uint);
    FDwfDigitalOutCounterGet(hdwf: Hdwf, idx_channel: c_int, pv_low: *mut c_uint, pv_high: *mut c_uint);
    FDwfDigitalOutRepetitionInfo(hdwf: Hdwf, idx_channel: c_int, pn_max: *mut c_uint);
    FDwfDigitalOutRepetitionSet(hdwf: Hdwf, idx_channel: c_int, c_repeat: c_uint);
    FDwfDigitalOutRepetitionGet(hdwf: Hdwf, idx_channel: c_int, pc_repeat: *mut c_uint);
    FDwfDigitalOutDataInfo(hdwf: Hdwf, idx_channel: c_int, pcount_of_bits_max: *mut c_uint);
    FDwfDigitalOutDataSet(hdwf: Hdwf, idx_channel: c_int, rg_bits: *mut c_void, count_of_bits: c_uint);
    FDwfDigitalUartReset(hdwf: Hdwf);
    FDwfDigitalUartRateSet(hdwf: Hdwf, hz: c_double);
    FDwfDigitalUartBitsSet(hdwf: Hdwf, c_bits: c_int);
    FDwfDigitalUartParitySet(hdwf: Hdwf, parity: c_int);
    FDwfDigitalUartPolaritySet(hdwf: Hdwf, polarity: c_int);
    FDwfDigitalUartStopSet(hdwf: Hdwf, c_bit: c_double);
    FDwfDigitalUartTxSet(hdwf: Hdwf, idx_channel: c_int);
    FDwfDigitalUartRxSet(hdwf: Hdwf, idx_channel: c_int);
    FDwfDigitalUartTx(hdwf: Hdwf, sz_tx: *mut c_char, c_tx: c_int);
    FDwfDigitalUartRx(hdwf: Hdwf, sz_rx: *mut c_char, c_rx: c_int, pc_rx: *mut c_int, p_parity: *mut c_int);
    FDwfDigitalSpiReset(hdwf: Hdwf);
    FDwfDigitalSpiFrequencySet(hdwf: Hdwf, hz: c_double);
    FDwfDigitalSpiClockSet(hdwf: Hdwf, idx_channel: c_int);
    FDwfDigitalSpiDataSet(hdwf: Hdwf, idx_dq: c_int, idx_channel: c_int);
    FDwfDigitalSpiIdleSet(hdwf: Hdwf, idx_dq: c_int, idle: DwfDigitalOutIdle);
    FDwfDigitalSpiModeSet(hdwf: Hdwf, i_mode: c_int);
    FDwfDigitalSpiOrderSet(hdwf: Hdwf, f_msbfirst: c_int);
    FDwfDigitalSpiDelaySet(hdwf: Hdwf, c_start: c_int, c_cmd: c_int, c_word: c_int, c_stop: c_int);
    FDwfDigitalSpiSelectSet(hdwf: Hdwf, idx_select: c_int, f_idle: c_int);
    FDwfDigitalSpiSelect(hdwf: Hdwf, idx_channel: c_int, level: c_int);
    FDwfDigitalSpiWriteRead(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_tx: *mut c_uchar, c_tx: c_int, rg_rx: *mut c_uchar, c_rx: c_int);
    FDwfDigitalSpiWriteRead16(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_tx: *mut c_ushort, c_tx: c_int, rg_rx: *mut c_ushort, c_rx: c_int);
    FDwfDigitalSpiWriteRead32(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_tx: *mut c_uint, c_tx: c_int, rg_rx: *mut c_uint, c_rx: c_int);
    FDwfDigitalSpiRead(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_rx: *mut c_uchar, c_rx: c_int);
    FDwfDigitalSpiReadOne(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, p_rx: *mut c_uint);
    FDwfDigitalSpiRead16(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_rx: *mut c_ushort, c_rx: c_int);
    FDwfDigitalSpiRead32(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_rx: *mut c_uint, c_rx: c_int);
    FDwfDigitalSpiWrite(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_tx: *mut c_uchar, c_tx: c_int);
    FDwfDigitalSpiWriteOne(hdwf: Hdwf, c_dq: c_int, c_bits: c_int, v_tx: c_uint);
    FDwfDigitalSpiWrite16(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_tx: *mut c_ushort, c_tx: c_int);
    FDwfDigitalSpiWrite32(hdwf: Hdwf, c_dq: c_int, c_bit_per_word: c_int, rg_tx: *mut c_uint, c_tx: c_int);
    FDwfDigitalI2cReset(hdwf: Hdwf);
    FDwfDigitalI2cClear(hdwf: Hdwf, pf_free: *mut c_int);
    FDwfDigitalI2cStretchSet(hdwf: Hdwf, f_enable: c_int);
    FDwfDigitalI2cRateSet(hdwf: Hdwf, hz: c_double);
    FDwfDigitalI2cReadNakSet(hdwf: Hdwf, f_nak_last_read_byte: c_int);
    FDwfDigitalI2cSclSet(hdwf: Hdwf, idx_channel: c_int);
    FDwfDigitalI2cSdaSet(hdwf: Hdwf, idx_channel: c_int);
    FDwfDigitalI2cTimeoutSet(hdwf: Hdwf, sec: c_double);
    FDwfDigitalI2cWriteRead(hdwf: Hdwf, adr8bits: c_uchar, rgb_tx: *mut c_uchar, c_tx: c_int, rg_rx: *mut c_uchar, c_rx: c_int, p_nak: *mut c_int);
    FDwfDigitalI2cRead(hdwf: Hdwf, adr8bits: c_uchar, rgb_rx: *mut c_uchar, c_rx: c_int, p_nak: *mut c_int);
    FDwfDigitalI2cWrite(hdwf: Hdwf, adr8bits: c_uchar, rgb_tx: *mut c_uchar, c_tx: c_int, p_nak: *mut c_int);
    FDwfDigitalI2cWriteOne(hdwf: Hdwf, adr8bits: c_uchar, b_tx: c_uchar, p_nak: *mut c_int);
    FDwfDigitalCanReset(hdwf: Hdwf);
    FDwfDigitalCanRateSet(hdwf: Hdwf, hz: c_double);
    FDwfDigitalCanPolaritySet(hdwf: Hdwf, f_high: c_int);
    FDwfDigitalCanTxSet(hdwf: Hdwf, idx_channel: c_int);
    FDwfDigitalCanRxSet(hdwf: Hdwf, idx_channel: c_int);
    FDwfDigitalCanTx(hdwf: Hdwf, v_id: c_int, f_extended: c_int, f_remote: c_int, c_dlc: c_int, rg_tx: *mut c_uchar);
    FDwfDigitalCanRx(hdwf: Hdwf, pv_id: *mut c_int, pf_extended: *mut c_int, pf_remote: *mut c_int, pc_dlc: *mut c_int, rg_rx: *mut c_uchar, c_rx: c_int, pv_status: *mut c_int);
}

/// Platform default location of the WaveForms runtime library.
pub fn default_library_path() -> &'static str {
    if cfg!(target_os = "windows") {
        "dwf.dll"
    } else if cfg!(target_os = "macos") {
        "/Library/Frameworks/dwf.framework/dwf"
    } else {
        "libdwf.so"
    }
}

/// Resolves the path of the runtime library, honoring the `DWF_LIBRARY` environment override.
pub fn library_path() -> String {
    std::env::var("DWF_LIBRARY").unwrap_or_else(|_| default_library_path().to_string())
}

/// Opens the runtime library at `path` and resolves its entry points.
pub fn load_library(path: &str) -> Result<(Library, EntryPoints)> {
    log::info!("Loading library: {}", path);
    let library = unsafe { Library::new(path) }.map_err(|err| {
        log::error!(
            "Failed to load Digilent WaveForms runtime components. \
             You may need to reinstall the WaveForms software: {}",
            err
        );
        DwfError::Library(format!("{}: {}", path, err))
    })?;
    let entry_points = EntryPoints::resolve(&library);
    let missing = entry_points.missing();
    if !missing.is_empty() {
        log::debug!(
            "{} of {} entry points are not exported by {}",
            missing.len(),
            entry_points.count(),
            path
        );
    }
    Ok((library, entry_points))
}
