//! Analog input (oscilloscope) unit.
//!
//! [`AnalogInput`] holds the acquisition settings shared by all channels, an
//! [`AnalogInputTrigger`] and a [`Registry`] of [`AnalogInputChannel`]s labeled `ch1`, `ch2`, ...
//!
//! ## Acquisitions
//!
//! The instrument goes through the driver's state machine (ready, armed, triggered, done). A
//! setup with `start == false` leaves it ready; `start == true` arms it. Sample buffers are
//! transferred from the device by [`AnalogInput::read_status`] with `read_data == true`; reading
//! samples before such a status read fails with [`UsageError::StatusNotRead`]. Reconfiguring or
//! resetting the instrument invalidates the transferred data again.
//!
//! ## High-level setups
//!
//! [`AnalogInput::setup_acquisition`], [`AnalogInput::single`], [`AnalogInput::scan_shift`],
//! [`AnalogInput::scan_screen`] and [`AnalogInput::record`] validate their options first, apply
//! the options that are set, then configure the instrument when `configure` or `start` is set.
//! A failing native call aborts the remaining steps; settings applied before it are kept.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use dwf_backend::*;
use libc::c_int;
use ndarray::{Array1, Array2};

use crate::analog_recorder::{AnalogRecorder, AnalogRecording};
use crate::helpers::wait_for_state;
use crate::registry::{Address, Registry};
use crate::unit::*;

/// Whether the instrument waits for a trigger (`Normal`) or also acquires after a timeout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerMode {
    Normal,
    Auto,
}

impl FromStr for TriggerMode {
    type Err = DwfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "normal" => Ok(TriggerMode::Normal),
            "auto" => Ok(TriggerMode::Auto),
            _ => Err(DwfError::invalid_option(
                "mode",
                format!("'{}' is not one of: normal, auto", s),
            )),
        }
    }
}

impl fmt::Display for TriggerMode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            TriggerMode::Normal => write!(f, "normal"),
            TriggerMode::Auto => write!(f, "auto"),
        }
    }
}

/// Options of [`AnalogInputChannel::setup`]. Unset options leave the current setting.
#[derive(Debug, Clone)]
pub struct ChannelSetup {
    /// Input range in volts.
    pub range: Option<f64>,
    /// Offset in volts.
    pub offset: Option<f64>,
    pub coupling: Option<Coupling>,
    /// Bandwidth in Hz.
    pub bandwidth: Option<f64>,
    pub attenuation: Option<f64>,
    /// Input impedance in ohms.
    pub impedance: Option<f64>,
    pub filter: Option<FilterMode>,
    /// Default `true`.
    pub enabled: bool,
}

impl Default for ChannelSetup {
    fn default() -> Self {
        Self {
            range: None,
            offset: None,
            coupling: None,
            bandwidth: None,
            attenuation: None,
            impedance: None,
            filter: None,
            enabled: true,
        }
    }
}

impl ChannelSetup {
    fn validate(&self) -> Result<()> {
        if matches!(self.range, Some(range) if range <= 0.0) {
            return Err(DwfError::invalid_option("range", "must be positive"));
        }
        if matches!(self.attenuation, Some(attenuation) if attenuation <= 0.0) {
            return Err(DwfError::invalid_option("attenuation", "must be positive"));
        }
        Ok(())
    }
}

/// Options shared by the trigger setups. Unset options leave the current setting.
#[derive(Debug, Clone, Default)]
pub struct TriggerSetup {
    /// Slope for edge triggers, polarity for pulse triggers, entering or exiting for window
    /// triggers.
    pub condition: Option<TriggerSlope>,
    /// Pulse and transition triggers only.
    pub length_condition: Option<TriggerLengthCondition>,
    /// Pulse, transition and window triggers only. Seconds.
    pub length: Option<f64>,
    /// Volts.
    pub level: Option<f64>,
    /// Volts.
    pub hysteresis: Option<f64>,
    /// Horizontal trigger position in seconds.
    pub position: Option<f64>,
    /// Seconds.
    pub hold_off: Option<f64>,
    pub mode: Option<TriggerMode>,
}

impl TriggerSetup {
    fn validate(&self, trigger_type: TriggerType) -> Result<()> {
        if trigger_type == TriggerType::Edge && (self.length.is_some() || self.length_condition.is_some()) {
            return Err(DwfError::invalid_option("length", "edge triggers have no length"));
        }
        if trigger_type == TriggerType::Window && self.length_condition.is_some() {
            return Err(DwfError::invalid_option(
                "length_condition",
                "window triggers have no length condition",
            ));
        }
        if matches!(self.length, Some(length) if length < 0.0) {
            return Err(DwfError::invalid_option("length", "must not be negative"));
        }
        if matches!(self.hysteresis, Some(hysteresis) if hysteresis < 0.0) {
            return Err(DwfError::invalid_option("hysteresis", "must not be negative"));
        }
        if matches!(self.hold_off, Some(hold_off) if hold_off < 0.0) {
            return Err(DwfError::invalid_option("hold_off", "must not be negative"));
        }
        Ok(())
    }
}

/// Options of [`AnalogInput::setup_acquisition`].
#[derive(Debug, Clone, Default)]
pub struct AcquisitionSetup {
    pub mode: Option<AcquisitionMode>,
    /// Hz.
    pub sample_rate: Option<f64>,
    pub buffer_size: Option<usize>,
    /// Seconds, record mode only.
    pub record_length: Option<f64>,
    /// Push the settings to the device. Default `false`.
    pub configure: bool,
    /// Start the acquisition. Default `false`.
    pub start: bool,
}

impl AcquisitionSetup {
    pub(crate) fn validate(&self) -> Result<()> {
        if matches!(self.sample_rate, Some(rate) if !(rate > 0.0)) {
            return Err(DwfError::invalid_option("sample_rate", "must be positive"));
        }
        if matches!(self.record_length, Some(length) if !(length >= 0.0)) {
            return Err(DwfError::invalid_option("record_length", "must not be negative"));
        }
        Ok(())
    }
}

/// Options of [`AnalogInput::record`].
#[derive(Debug, Clone, Default)]
pub struct RecordSetup {
    /// Hz.
    pub sample_rate: Option<f64>,
    /// Seconds. The recording holds `round(length * sample_rate)` samples per channel.
    pub length: Option<f64>,
    pub buffer_size: Option<usize>,
    pub configure: bool,
    /// Run the recording to completion before returning.
    pub start: bool,
    /// Stop polling after this long, keeping the samples received so far.
    pub timeout: Option<std::time::Duration>,
}

/// Trigger detector of the analog input unit.
pub struct AnalogInputTrigger {
    session: Arc<Session>,
}

impl BaseUnit for AnalogInputTrigger {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl AnalogInputTrigger {
    pub fn source(&self) -> Result<TriggerSource> {
        TriggerSource::try_from(self.dwf().analog_in_trigger_source_get(self.hdwf()?)?)
    }

    pub fn set_source(&self, source: TriggerSource) -> Result<()> {
        self.dwf().analog_in_trigger_source_set(self.hdwf()?, source.raw())
    }

    /// `(min, max, steps)` of the trigger position, in seconds.
    pub fn position_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().analog_in_trigger_position_info(self.hdwf()?)
    }

    pub fn position(&self) -> Result<f64> {
        self.dwf().analog_in_trigger_position_get(self.hdwf()?)
    }

    pub fn set_position(&self, position: f64) -> Result<()> {
        self.dwf().analog_in_trigger_position_set(self.hdwf()?, position)
    }

    /// Trigger position of the last acquisition.
    pub fn actual_position(&self) -> Result<f64> {
        self.dwf().analog_in_trigger_position_status(self.hdwf()?)
    }

    pub fn auto_timeout_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().analog_in_trigger_auto_timeout_info(self.hdwf()?)
    }

    pub fn auto_timeout(&self) -> Result<f64> {
        self.dwf().analog_in_trigger_auto_timeout_get(self.hdwf()?)
    }

    /// Zero disables the auto trigger.
    pub fn set_auto_timeout(&self, timeout: f64) -> Result<()> {
        self.dwf().analog_in_trigger_auto_timeout_set(self.hdwf()?, timeout)
    }

    pub fn hold_off_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().analog_in_trigger_hold_off_info(self.hdwf()?)
    }

    pub fn hold_off(&self) -> Result<f64> {
        self.dwf().analog_in_trigger_hold_off_get(self.hdwf()?)
    }

    pub fn set_hold_off(&self, hold_off: f64) -> Result<()> {
        self.dwf().analog_in_trigger_hold_off_set(self.hdwf()?, hold_off)
    }

    pub fn type_info(&self) -> Result<Vec<TriggerType>> {
        Ok(TriggerType::from_bits(bits(self.dwf().analog_in_trigger_type_info(self.hdwf()?)?)))
    }

    pub fn trigger_type(&self) -> Result<TriggerType> {
        TriggerType::try_from(self.dwf().analog_in_trigger_type_get(self.hdwf()?)?)
    }

    pub fn set_trigger_type(&self, trigger_type: TriggerType) -> Result<()> {
        self.dwf().analog_in_trigger_type_set(self.hdwf()?, trigger_type.raw())
    }

    pub fn channel_info(&self) -> Result<(c_int, c_int)> {
        self.dwf().analog_in_trigger_channel_info(self.hdwf()?)
    }

    pub fn channel(&self) -> Result<usize> {
        Ok(self.dwf().analog_in_trigger_channel_get(self.hdwf()?)?.max(0) as usize)
    }

    pub fn set_channel(&self, index: usize) -> Result<()> {
        self.dwf().analog_in_trigger_channel_set(self.hdwf()?, index as c_int)
    }

    pub fn filter_info(&self) -> Result<Vec<FilterMode>> {
        Ok(FilterMode::from_bits(bits(self.dwf().analog_in_trigger_filter_info(self.hdwf()?)?)))
    }

    pub fn filter(&self) -> Result<FilterMode> {
        FilterMode::try_from(self.dwf().analog_in_trigger_filter_get(self.hdwf()?)?)
    }

    pub fn set_filter(&self, filter: FilterMode) -> Result<()> {
        self.dwf().analog_in_trigger_filter_set(self.hdwf()?, filter.raw())
    }

    pub fn level_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().analog_in_trigger_level_info(self.hdwf()?)
    }

    pub fn level(&self) -> Result<f64> {
        self.dwf().analog_in_trigger_level_get(self.hdwf()?)
    }

    pub fn set_level(&self, level: f64) -> Result<()> {
        self.dwf().analog_in_trigger_level_set(self.hdwf()?, level)
    }

    pub fn hysteresis_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().analog_in_trigger_hysteresis_info(self.hdwf()?)
    }

    pub fn hysteresis(&self) -> Result<f64> {
        self.dwf().analog_in_trigger_hysteresis_get(self.hdwf()?)
    }

    pub fn set_hysteresis(&self, hysteresis: f64) -> Result<()> {
        self.dwf().analog_in_trigger_hysteresis_set(self.hdwf()?, hysteresis)
    }

    pub fn condition_info(&self) -> Result<Vec<TriggerSlope>> {
        Ok(TriggerSlope::from_bits(bits(self.dwf().analog_in_trigger_condition_info(self.hdwf()?)?)))
    }

    pub fn condition(&self) -> Result<TriggerSlope> {
        TriggerSlope::try_from(self.dwf().analog_in_trigger_condition_get(self.hdwf()?)?)
    }

    pub fn set_condition(&self, condition: TriggerSlope) -> Result<()> {
        self.dwf().analog_in_trigger_condition_set(self.hdwf()?, condition.raw())
    }

    pub fn length_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().analog_in_trigger_length_info(self.hdwf()?)
    }

    pub fn length(&self) -> Result<f64> {
        self.dwf().analog_in_trigger_length_get(self.hdwf()?)
    }

    pub fn set_length(&self, length: f64) -> Result<()> {
        self.dwf().analog_in_trigger_length_set(self.hdwf()?, length)
    }

    pub fn length_condition_info(&self) -> Result<Vec<TriggerLengthCondition>> {
        Ok(TriggerLengthCondition::from_bits(bits(
            self.dwf().analog_in_trigger_length_condition_info(self.hdwf()?)?,
        )))
    }

    pub fn length_condition(&self) -> Result<TriggerLengthCondition> {
        TriggerLengthCondition::try_from(self.dwf().analog_in_trigger_length_condition_get(self.hdwf()?)?)
    }

    pub fn set_length_condition(&self, condition: TriggerLengthCondition) -> Result<()> {
        self.dwf().analog_in_trigger_length_condition_set(self.hdwf()?, condition.raw())
    }

    /// Source of the sample clock when sampling on an external signal.
    pub fn sampling_source(&self) -> Result<TriggerSource> {
        TriggerSource::try_from(self.dwf().analog_in_sampling_source_get(self.hdwf()?)?)
    }

    pub fn set_sampling_source(&self, source: TriggerSource) -> Result<()> {
        self.dwf().analog_in_sampling_source_set(self.hdwf()?, source.raw())
    }

    pub fn sampling_slope(&self) -> Result<TriggerSlope> {
        TriggerSlope::try_from(self.dwf().analog_in_sampling_slope_get(self.hdwf()?)?)
    }

    pub fn set_sampling_slope(&self, slope: TriggerSlope) -> Result<()> {
        self.dwf().analog_in_sampling_slope_set(self.hdwf()?, slope.raw())
    }

    pub fn sampling_delay(&self) -> Result<f64> {
        self.dwf().analog_in_sampling_delay_get(self.hdwf()?)
    }

    pub fn set_sampling_delay(&self, delay: f64) -> Result<()> {
        self.dwf().analog_in_sampling_delay_set(self.hdwf()?, delay)
    }
}

/// One oscilloscope channel.
pub struct AnalogInputChannel {
    session: Arc<Session>,
    index: usize,
}

impl BaseUnit for AnalogInputChannel {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl BaseChannel for AnalogInputChannel {
    fn index(&self) -> usize {
        self.index
    }
}

impl AnalogInputChannel {
    pub fn enabled(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().analog_in_channel_enable_get(self.hdwf()?, self.raw_index())?))
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.dwf()
            .analog_in_channel_enable_set(self.hdwf()?, self.raw_index(), to_cbool(enabled))
    }

    /// ADC resolution in bits.
    pub fn adc_bits(&self) -> Result<c_int> {
        self.dwf().analog_in_bits_info(self.hdwf()?)
    }

    pub fn filter_info(&self) -> Result<Vec<FilterMode>> {
        Ok(FilterMode::from_bits(bits(self.dwf().analog_in_channel_filter_info(self.hdwf()?)?)))
    }

    pub fn filter(&self) -> Result<FilterMode> {
        FilterMode::try_from(self.dwf().analog_in_channel_filter_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_filter(&self, filter: FilterMode) -> Result<()> {
        self.dwf()
            .analog_in_channel_filter_set(self.hdwf()?, self.raw_index(), filter.raw())
    }

    /// Discrete ranges the device supports, in volts.
    pub fn range_steps(&self) -> Result<Vec<f64>> {
        self.dwf().analog_in_channel_range_steps(self.hdwf()?)
    }

    pub fn range_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().analog_in_channel_range_info(self.hdwf()?)
    }

    pub fn range(&self) -> Result<f64> {
        self.dwf().analog_in_channel_range_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_range(&self, range: f64) -> Result<()> {
        self.dwf().analog_in_channel_range_set(self.hdwf()?, self.raw_index(), range)
    }

    pub fn offset_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().analog_in_channel_offset_info(self.hdwf()?)
    }

    pub fn offset(&self) -> Result<f64> {
        self.dwf().analog_in_channel_offset_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_offset(&self, offset: f64) -> Result<()> {
        self.dwf().analog_in_channel_offset_set(self.hdwf()?, self.raw_index(), offset)
    }

    pub fn attenuation(&self) -> Result<f64> {
        self.dwf().analog_in_channel_attenuation_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_attenuation(&self, attenuation: f64) -> Result<()> {
        self.dwf()
            .analog_in_channel_attenuation_set(self.hdwf()?, self.raw_index(), attenuation)
    }

    pub fn bandwidth(&self) -> Result<f64> {
        self.dwf().analog_in_channel_bandwidth_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_bandwidth(&self, bandwidth: f64) -> Result<()> {
        self.dwf()
            .analog_in_channel_bandwidth_set(self.hdwf()?, self.raw_index(), bandwidth)
    }

    pub fn impedance(&self) -> Result<f64> {
        self.dwf().analog_in_channel_impedance_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_impedance(&self, impedance: f64) -> Result<()> {
        self.dwf()
            .analog_in_channel_impedance_set(self.hdwf()?, self.raw_index(), impedance)
    }

    pub fn coupling_info(&self) -> Result<Vec<Coupling>> {
        Ok(Coupling::from_bits(bits(self.dwf().analog_in_channel_coupling_info(self.hdwf()?)?)))
    }

    pub fn coupling(&self) -> Result<Coupling> {
        Coupling::try_from(self.dwf().analog_in_channel_coupling_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_coupling(&self, coupling: Coupling) -> Result<()> {
        self.dwf()
            .analog_in_channel_coupling_set(self.hdwf()?, self.raw_index(), coupling.raw())
    }

    /// Last ADC conversion, in volts. Updated by every status read, with or without data.
    pub fn get_sample(&self) -> Result<f64> {
        self.dwf().analog_in_status_sample(self.hdwf()?, self.raw_index())
    }

    /// All valid samples of the last transferred acquisition, in volts.
    pub fn get_data(&self) -> Result<Array1<f64>> {
        self.ensure_status_read()?;
        let count = self.valid_samples()?;
        self.get_data_range(0, count)
    }

    /// `count` samples starting at buffer position `first`, in volts.
    pub fn get_data_range(&self, first: usize, count: usize) -> Result<Array1<f64>> {
        self.ensure_status_read()?;
        let mut samples = vec![0.0; count];
        self.dwf()
            .analog_in_status_data2(self.hdwf()?, self.raw_index(), &mut samples, first as c_int)?;
        Ok(Array1::from_vec(samples))
    }

    /// Raw signed 16-bit ADC values of the valid samples.
    pub fn get_raw_data(&self) -> Result<Array1<i16>> {
        self.ensure_status_read()?;
        let mut samples = vec![0i16; self.valid_samples()?];
        self.dwf()
            .analog_in_status_data16(self.hdwf()?, self.raw_index(), &mut samples, 0)?;
        Ok(Array1::from_vec(samples))
    }

    /// Noise buffer as an `n x 2` array of `(min, max)` pairs.
    pub fn get_noise(&self) -> Result<Array2<f64>> {
        self.ensure_status_read()?;
        let count = self.valid_samples()?;
        let mut min = vec![0.0; count];
        let mut max = vec![0.0; count];
        self.dwf()
            .analog_in_status_noise2(self.hdwf()?, self.raw_index(), &mut min, &mut max, 0)?;
        let mut noise = Array2::zeros((count, 2));
        for (i, (lo, hi)) in min.into_iter().zip(max).enumerate() {
            noise[[i, 0]] = lo;
            noise[[i, 1]] = hi;
        }
        Ok(noise)
    }

    /// Applies the channel options that are set, then the enabled flag.
    pub fn setup(&self, setup: &ChannelSetup) -> Result<()> {
        setup.validate()?;
        if let Some(range) = setup.range {
            self.set_range(range)?;
        }
        if let Some(offset) = setup.offset {
            self.set_offset(offset)?;
        }
        if let Some(coupling) = setup.coupling {
            self.set_coupling(coupling)?;
        }
        if let Some(bandwidth) = setup.bandwidth {
            self.set_bandwidth(bandwidth)?;
        }
        if let Some(attenuation) = setup.attenuation {
            self.set_attenuation(attenuation)?;
        }
        if let Some(impedance) = setup.impedance {
            self.set_impedance(impedance)?;
        }
        if let Some(filter) = setup.filter {
            self.set_filter(filter)?;
        }
        self.set_enabled(setup.enabled)
    }

    fn valid_samples(&self) -> Result<usize> {
        Ok(self.dwf().analog_in_status_samples_valid(self.hdwf()?)?.max(0) as usize)
    }

    fn ensure_status_read(&self) -> Result<()> {
        if self.session.status_flag(Acquisition::AnalogIn).load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(UsageError::StatusNotRead.into())
        }
    }
}

/// Analog input unit.
pub struct AnalogInput {
    session: Arc<Session>,
    trigger: AnalogInputTrigger,
    channels: Registry<AnalogInputChannel>,
}

impl BaseUnit for AnalogInput {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl AnalogInput {
    pub(crate) fn new(session: Arc<Session>, channel_count: usize) -> Self {
        let channels = Registry::from_fn(
            channel_count,
            |i| format!("ch{}", i + 1),
            |i| AnalogInputChannel {
                session: session.clone(),
                index: i,
            },
        );
        Self {
            trigger: AnalogInputTrigger {
                session: session.clone(),
            },
            session,
            channels,
        }
    }

    pub fn trigger(&self) -> &AnalogInputTrigger {
        &self.trigger
    }

    pub fn channels(&self) -> &Registry<AnalogInputChannel> {
        &self.channels
    }

    /// Mutable access to the channel registry, for relabeling.
    pub fn channels_(&mut self) -> &mut Registry<AnalogInputChannel> {
        &mut self.channels
    }

    pub fn channel<'a>(&self, address: impl Into<Address<'a>>) -> Result<&AnalogInputChannel> {
        self.channels.get(address)
    }

    pub fn reset(&self) -> Result<()> {
        self.invalidate_data();
        self.dwf().analog_in_reset(self.hdwf()?)
    }

    /// Pushes the settings to the device (`reconfigure`) and optionally starts an acquisition.
    pub fn configure(&self, reconfigure: bool, start: bool) -> Result<()> {
        self.invalidate_data();
        self.dwf()
            .analog_in_configure(self.hdwf()?, to_cbool(reconfigure), to_cbool(start))
    }

    pub fn force_trigger(&self) -> Result<()> {
        self.dwf().analog_in_trigger_force(self.hdwf()?)
    }

    /// Reads the instrument state; with `read_data` the sample buffers are transferred as well.
    pub fn read_status(&self, read_data: bool) -> Result<State> {
        let state = State::try_from(self.dwf().analog_in_status(self.hdwf()?, to_cbool(read_data))?)?;
        if read_data {
            self.session
                .status_flag(Acquisition::AnalogIn)
                .store(true, Ordering::Release);
        }
        Ok(state)
    }

    /// Polls the status, every millisecond, until the instrument reports `state`.
    pub fn wait_for_status(&self, state: State, read_data: bool) -> Result<()> {
        wait_for_state(state, || self.read_status(read_data))
    }

    pub fn remaining_samples(&self) -> Result<usize> {
        Ok(self.dwf().analog_in_status_samples_left(self.hdwf()?)?.max(0) as usize)
    }

    pub fn valid_samples(&self) -> Result<usize> {
        Ok(self.dwf().analog_in_status_samples_valid(self.hdwf()?)?.max(0) as usize)
    }

    /// Buffer write position in scan screen mode.
    pub fn write_index(&self) -> Result<usize> {
        Ok(self.dwf().analog_in_status_index_write(self.hdwf()?)?.max(0) as usize)
    }

    pub fn auto_triggered(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().analog_in_status_auto_triggered(self.hdwf()?)?))
    }

    /// `(available, lost, corrupted)` sample counts of the last record mode status read.
    pub fn record_status(&self) -> Result<(usize, usize, usize)> {
        let (available, lost, corrupted) = self.dwf().analog_in_status_record(self.hdwf()?)?;
        Ok((available.max(0) as usize, lost.max(0) as usize, corrupted.max(0) as usize))
    }

    pub fn record_length(&self) -> Result<f64> {
        self.dwf().analog_in_record_length_get(self.hdwf()?)
    }

    pub fn set_record_length(&self, length: f64) -> Result<()> {
        self.dwf().analog_in_record_length_set(self.hdwf()?, length)
    }

    pub fn frequency_info(&self) -> Result<(f64, f64)> {
        self.dwf().analog_in_frequency_info(self.hdwf()?)
    }

    /// Sample rate in Hz.
    pub fn frequency(&self) -> Result<f64> {
        self.dwf().analog_in_frequency_get(self.hdwf()?)
    }

    pub fn set_frequency(&self, frequency: f64) -> Result<()> {
        self.dwf().analog_in_frequency_set(self.hdwf()?, frequency)
    }

    pub fn buffer_size_info(&self) -> Result<(usize, usize)> {
        let (min, max) = self.dwf().analog_in_buffer_size_info(self.hdwf()?)?;
        Ok((min.max(0) as usize, max.max(0) as usize))
    }

    pub fn buffer_size(&self) -> Result<usize> {
        Ok(self.dwf().analog_in_buffer_size_get(self.hdwf()?)?.max(0) as usize)
    }

    pub fn set_buffer_size(&self, size: usize) -> Result<()> {
        self.dwf().analog_in_buffer_size_set(self.hdwf()?, size as c_int)
    }

    pub fn noise_buffer_size_max(&self) -> Result<usize> {
        Ok(self.dwf().analog_in_noise_size_info(self.hdwf()?)?.max(0) as usize)
    }

    pub fn noise_buffer_size(&self) -> Result<usize> {
        Ok(self.dwf().analog_in_noise_size_get(self.hdwf()?)?.max(0) as usize)
    }

    pub fn set_noise_buffer_size(&self, size: usize) -> Result<()> {
        self.dwf().analog_in_noise_size_set(self.hdwf()?, size as c_int)
    }

    pub fn acquisition_mode_info(&self) -> Result<Vec<AcquisitionMode>> {
        Ok(AcquisitionMode::from_bits(bits(
            self.dwf().analog_in_acquisition_mode_info(self.hdwf()?)?,
        )))
    }

    pub fn acquisition_mode(&self) -> Result<AcquisitionMode> {
        AcquisitionMode::try_from(self.dwf().analog_in_acquisition_mode_get(self.hdwf()?)?)
    }

    pub fn set_acquisition_mode(&self, mode: AcquisitionMode) -> Result<()> {
        self.dwf().analog_in_acquisition_mode_set(self.hdwf()?, mode.raw())
    }

    /// Sets up a channel, addressed by index or label.
    pub fn setup_channel<'a>(&self, address: impl Into<Address<'a>>, setup: &ChannelSetup) -> Result<()> {
        self.channel(address)?.setup(setup)
    }

    /// Triggers when the signal of `channel` crosses the level on the given slope.
    pub fn setup_edge_trigger<'a>(&self, channel: impl Into<Address<'a>>, setup: &TriggerSetup) -> Result<()> {
        self.setup_trigger(TriggerType::Edge, channel.into(), setup)
    }

    /// Triggers on a positive or negative pulse of a given width.
    pub fn setup_pulse_trigger<'a>(&self, channel: impl Into<Address<'a>>, setup: &TriggerSetup) -> Result<()> {
        self.setup_trigger(TriggerType::Pulse, channel.into(), setup)
    }

    /// Triggers on a rising or falling transition of a given duration.
    pub fn setup_transition_trigger<'a>(
        &self,
        channel: impl Into<Address<'a>>,
        setup: &TriggerSetup,
    ) -> Result<()> {
        self.setup_trigger(TriggerType::Transition, channel.into(), setup)
    }

    /// Triggers when the signal enters or leaves the window around the level.
    pub fn setup_window_trigger<'a>(&self, channel: impl Into<Address<'a>>, setup: &TriggerSetup) -> Result<()> {
        self.setup_trigger(TriggerType::Window, channel.into(), setup)
    }

    fn setup_trigger(&self, trigger_type: TriggerType, channel: Address, setup: &TriggerSetup) -> Result<()> {
        setup.validate(trigger_type)?;
        let channel = self.channels.index_of(channel)?;
        let trigger = &self.trigger;
        trigger.set_source(TriggerSource::DetectorAnalogIn)?;
        trigger.set_trigger_type(trigger_type)?;
        trigger.set_channel(channel)?;
        if let Some(condition) = setup.condition {
            trigger.set_condition(condition)?;
        }
        if let Some(length_condition) = setup.length_condition {
            trigger.set_length_condition(length_condition)?;
        }
        if let Some(length) = setup.length {
            trigger.set_length(length)?;
        }
        if let Some(level) = setup.level {
            trigger.set_level(level)?;
        }
        if let Some(hysteresis) = setup.hysteresis {
            trigger.set_hysteresis(hysteresis)?;
        }
        if let Some(position) = setup.position {
            trigger.set_position(position)?;
        }
        if let Some(hold_off) = setup.hold_off {
            trigger.set_hold_off(hold_off)?;
        }
        match setup.mode {
            Some(TriggerMode::Normal) => trigger.set_auto_timeout(0.0),
            Some(TriggerMode::Auto) => trigger.set_auto_timeout(1.0),
            None => Ok(()),
        }
    }

    pub fn setup_acquisition(&self, setup: &AcquisitionSetup) -> Result<()> {
        setup.validate()?;
        if let Some(mode) = setup.mode {
            self.set_acquisition_mode(mode)?;
        }
        if let Some(sample_rate) = setup.sample_rate {
            self.set_frequency(sample_rate)?;
        }
        if let Some(buffer_size) = setup.buffer_size {
            self.set_buffer_size(buffer_size)?;
        }
        if let Some(record_length) = setup.record_length {
            self.set_record_length(record_length)?;
        }
        if setup.configure || setup.start {
            self.configure(setup.configure, setup.start)?;
        }
        Ok(())
    }

    /// Single buffer acquisition. `continuous` rearms the instrument after the data is read.
    ///
    /// When started, blocks until the acquisition is done and returns the samples of the
    /// enabled channels.
    pub fn single(
        &self,
        sample_rate: Option<f64>,
        buffer_size: Option<usize>,
        continuous: bool,
        configure: bool,
        start: bool,
    ) -> Result<Option<AnalogRecording>> {
        let mode = if continuous {
            AcquisitionMode::Single
        } else {
            AcquisitionMode::Single1
        };
        self.setup_acquisition(&AcquisitionSetup {
            mode: Some(mode),
            sample_rate,
            buffer_size,
            record_length: None,
            configure,
            start,
        })?;
        if !start {
            return Ok(None);
        }
        self.wait_for_status(State::Done, true)?;
        self.snapshot().map(Some)
    }

    pub fn scan_shift(
        &self,
        sample_rate: Option<f64>,
        buffer_size: Option<usize>,
        configure: bool,
        start: bool,
    ) -> Result<()> {
        self.setup_acquisition(&AcquisitionSetup {
            mode: Some(AcquisitionMode::ScanShift),
            sample_rate,
            buffer_size,
            record_length: None,
            configure,
            start,
        })
    }

    pub fn scan_screen(
        &self,
        sample_rate: Option<f64>,
        buffer_size: Option<usize>,
        configure: bool,
        start: bool,
    ) -> Result<()> {
        self.setup_acquisition(&AcquisitionSetup {
            mode: Some(AcquisitionMode::ScanScreen),
            sample_rate,
            buffer_size,
            record_length: None,
            configure,
            start,
        })
    }

    /// Sets up record mode and returns a recorder. With `start`, the recording runs to
    /// completion first; `callback` is called after every chunk and stops it by returning false.
    pub fn record(
        &self,
        setup: &RecordSetup,
        callback: Option<&mut dyn FnMut(&AnalogRecorder) -> bool>,
    ) -> Result<AnalogRecorder<'_>> {
        self.setup_acquisition(&AcquisitionSetup {
            mode: Some(AcquisitionMode::Record),
            sample_rate: setup.sample_rate,
            buffer_size: setup.buffer_size,
            record_length: setup.length,
            configure: setup.configure,
            start: false,
        })?;
        let mut recorder = AnalogRecorder::new(self);
        recorder.set_timeout(setup.timeout);
        if setup.start {
            recorder.record(callback)?;
        }
        Ok(recorder)
    }

    /// Copies the valid samples of every enabled channel from the last transferred buffer.
    pub fn snapshot(&self) -> Result<AnalogRecording> {
        let mut samples = Vec::with_capacity(self.channels.len());
        for channel in &self.channels {
            samples.push(if channel.enabled()? {
                Some(channel.get_data()?)
            } else {
                None
            });
        }
        Ok(AnalogRecording::new(
            self.channels.labels().to_vec(),
            samples,
            self.frequency()?,
            Default::default(),
        ))
    }

    fn invalidate_data(&self) {
        self.session
            .status_flag(Acquisition::AnalogIn)
            .store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn edge_triggers_reject_length_options() {
        let setup = TriggerSetup {
            length: Some(1e-6),
            ..Default::default()
        };
        assert!(setup.validate(TriggerType::Pulse).is_ok());
        assert!(matches!(
            setup.validate(TriggerType::Edge),
            Err(DwfError::InvalidOption { option: "length", .. })
        ));
    }

    #[test]
    fn acquisition_options_are_checked_before_any_call() {
        let setup = AcquisitionSetup {
            sample_rate: Some(0.0),
            ..Default::default()
        };
        assert!(matches!(
            setup.validate(),
            Err(DwfError::InvalidOption { option: "sample_rate", .. })
        ));

        let setup = AcquisitionSetup {
            record_length: Some(0.0),
            ..Default::default()
        };
        assert!(setup.validate().is_ok());
    }

    #[test]
    fn channel_setup_enables_by_default() {
        assert!(ChannelSetup::default().enabled);
        let setup = ChannelSetup {
            range: Some(-5.0),
            ..Default::default()
        };
        assert!(setup.validate().is_err());
    }
}
