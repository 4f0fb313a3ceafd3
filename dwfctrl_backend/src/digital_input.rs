//! Digital input (logic analyzer) unit.
//!
//! [`DigitalInput`] owns a [`DigitalInputClock`], a [`DigitalInputTrigger`] and one
//! [`DigitalInputChannel`] per sampled line, labeled `dio0`, `dio1`, ...
//!
//! The sample rate is the internal clock divided by the clock divider. Samples are words of the
//! configured sample format (8, 16 or 32 bits); see [`DigitalSamples`].
//!
//! ## Triggers
//!
//! The trigger detector works on four pin masks: low level, high level, rising edge and falling
//! edge. A [`PinCondition`] sets the bits of one line in these masks. Pulse triggers (glitch,
//! timeout, more, length) combine a level condition with a reset condition on the opposite edge
//! and a length window; counter triggers fire after a number of matching conditions.
//!
//! As with the analog input, samples can only be read after [`DigitalInput::read_status`] with
//! `read_data == true`.

use std::fmt;
use std::str::FromStr;
use std::sync::atomic::Ordering;
use std::sync::Arc;

use dwf_backend::*;
use libc::{c_int, c_uint};
use ndarray::Array1;

use crate::digital_recorder::{DigitalRecorder, DigitalSamples, SampleWidth};
use crate::helpers::wait_for_state;
use crate::registry::{Address, Registry};
use crate::unit::*;

/// Trigger condition of a single line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PinCondition {
    Ignore,
    Low,
    High,
    Rise,
    Fall,
    /// Either edge.
    Edge,
}

impl FromStr for PinCondition {
    type Err = DwfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "ignore" => Ok(PinCondition::Ignore),
            "low" => Ok(PinCondition::Low),
            "high" => Ok(PinCondition::High),
            "rise" | "rising" => Ok(PinCondition::Rise),
            "fall" | "falling" => Ok(PinCondition::Fall),
            "edge" => Ok(PinCondition::Edge),
            _ => Err(DwfError::invalid_option(
                "condition",
                format!("'{}' is not one of: ignore, low, high, rise, fall, edge", s),
            )),
        }
    }
}

impl fmt::Display for PinCondition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            PinCondition::Ignore => "ignore",
            PinCondition::Low => "low",
            PinCondition::High => "high",
            PinCondition::Rise => "rise",
            PinCondition::Fall => "fall",
            PinCondition::Edge => "edge",
        };
        write!(f, "{}", name)
    }
}

/// Pulse polarity of the pulse triggers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    Positive,
    Negative,
}

impl FromStr for Polarity {
    type Err = DwfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pos" | "positive" => Ok(Polarity::Positive),
            "neg" | "negative" => Ok(Polarity::Negative),
            _ => Err(DwfError::invalid_option(
                "polarity",
                format!("'{}' is not one of: positive, negative", s),
            )),
        }
    }
}

/// The four pin masks of the trigger detector; bit `i` is line `i`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TriggerMask {
    pub low: u32,
    pub high: u32,
    pub rise: u32,
    pub fall: u32,
}

impl From<(c_uint, c_uint, c_uint, c_uint)> for TriggerMask {
    fn from((low, high, rise, fall): (c_uint, c_uint, c_uint, c_uint)) -> Self {
        Self { low, high, rise, fall }
    }
}

fn line_bit(line: usize) -> u32 {
    u32::try_from(line).ok().and_then(|line| 1u32.checked_shl(line)).unwrap_or(0)
}

impl TriggerMask {
    /// Replaces the condition of `line`, keeping the other lines.
    pub fn with_condition(self, line: usize, condition: PinCondition) -> Self {
        let bit = line_bit(line);
        let mut mask = Self {
            low: self.low & !bit,
            high: self.high & !bit,
            rise: self.rise & !bit,
            fall: self.fall & !bit,
        };
        match condition {
            PinCondition::Ignore => {}
            PinCondition::Low => mask.low |= bit,
            PinCondition::High => mask.high |= bit,
            PinCondition::Rise => mask.rise |= bit,
            PinCondition::Fall => mask.fall |= bit,
            PinCondition::Edge => {
                mask.rise |= bit;
                mask.fall |= bit;
            }
        }
        mask
    }

    /// Condition currently set for `line`.
    pub fn condition(&self, line: usize) -> PinCondition {
        let bit = line_bit(line);
        match (self.low & bit != 0, self.high & bit != 0, self.rise & bit != 0, self.fall & bit != 0) {
            (true, _, _, _) => PinCondition::Low,
            (_, true, _, _) => PinCondition::High,
            (_, _, true, true) => PinCondition::Edge,
            (_, _, true, false) => PinCondition::Rise,
            (_, _, false, true) => PinCondition::Fall,
            _ => PinCondition::Ignore,
        }
    }

    /// Conditions the detector supports for `line`, given the mask returned by
    /// [`DigitalInputTrigger::mask_info`].
    pub fn supported_conditions(&self, line: usize) -> Vec<PinCondition> {
        let bit = line_bit(line);
        let mut conditions = vec![PinCondition::Ignore];
        if self.low & bit != 0 {
            conditions.push(PinCondition::Low);
        }
        if self.high & bit != 0 {
            conditions.push(PinCondition::High);
        }
        if self.rise & bit != 0 {
            conditions.push(PinCondition::Rise);
        }
        if self.fall & bit != 0 {
            conditions.push(PinCondition::Fall);
        }
        if self.rise & self.fall & bit != 0 {
            conditions.push(PinCondition::Edge);
        }
        conditions
    }
}

/// Options of [`DigitalInput::setup_trigger`]. Unset options leave the current setting.
#[derive(Debug, Clone, Default)]
pub struct DigitalTriggerSetup {
    pub source: Option<TriggerSource>,
    pub slope: Option<TriggerSlope>,
    /// Samples acquired after the trigger.
    pub position: Option<usize>,
    /// Samples acquired before the trigger, record mode only.
    pub prefill: Option<usize>,
    /// Seconds; zero disables the auto trigger.
    pub auto_timeout: Option<f64>,
}

/// Options of [`DigitalInput::setup_acquisition`]. Unset options leave the current setting.
#[derive(Debug, Clone, Default)]
pub struct DigitalAcquisitionSetup {
    pub mode: Option<AcquisitionMode>,
    /// Hz.
    pub sample_rate: Option<f64>,
    /// Bits per sample: 8, 16 or 32.
    pub sample_format: Option<c_int>,
    pub buffer_size: Option<usize>,
    /// Samples acquired after the trigger.
    pub position: Option<usize>,
    /// Samples acquired before the trigger, record mode only.
    pub prefill: Option<usize>,
    /// Push the settings to the device. Default `false`.
    pub configure: bool,
    /// Start the acquisition. Default `false`.
    pub start: bool,
}

impl DigitalAcquisitionSetup {
    fn validate(&self) -> Result<()> {
        if matches!(self.sample_rate, Some(rate) if !(rate > 0.0)) {
            return Err(DwfError::invalid_option("sample_rate", "must be positive"));
        }
        if let Some(format) = self.sample_format {
            if ![8, 16, 32].contains(&format) {
                return Err(DwfError::invalid_option(
                    "sample_format",
                    format!("{} is not one of: 8, 16, 32", format),
                ));
            }
        }
        Ok(())
    }
}

/// Options of [`DigitalInput::record`].
#[derive(Debug, Clone, Default)]
pub struct DigitalRecordSetup {
    /// Hz.
    pub sample_rate: Option<f64>,
    pub sample_format: Option<c_int>,
    /// Lines whose changes are recorded, for compression.
    pub sample_sensible: Option<u32>,
    /// Samples acquired after the trigger.
    pub sample_count: Option<usize>,
    /// Samples acquired before the trigger.
    pub prefill: Option<usize>,
    pub configure: bool,
    /// Run the recording to completion before returning.
    pub start: bool,
    /// Stop polling after this long, keeping the samples received so far.
    pub timeout: Option<std::time::Duration>,
}

/// Sample clock of the digital input unit.
pub struct DigitalInputClock {
    session: Arc<Session>,
}

impl BaseUnit for DigitalInputClock {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl DigitalInputClock {
    /// Internal clock in Hz.
    pub fn frequency(&self) -> Result<f64> {
        self.dwf().digital_in_internal_clock_info(self.hdwf()?)
    }

    pub fn source_info(&self) -> Result<Vec<DigitalInClockSource>> {
        Ok(DigitalInClockSource::from_bits(bits(
            self.dwf().digital_in_clock_source_info(self.hdwf()?)?,
        )))
    }

    pub fn source(&self) -> Result<DigitalInClockSource> {
        DigitalInClockSource::try_from(self.dwf().digital_in_clock_source_get(self.hdwf()?)?)
    }

    pub fn set_source(&self, source: DigitalInClockSource) -> Result<()> {
        self.dwf().digital_in_clock_source_set(self.hdwf()?, source.raw())
    }

    pub fn divider_max(&self) -> Result<u32> {
        self.dwf().digital_in_divider_info(self.hdwf()?)
    }

    pub fn divider(&self) -> Result<u32> {
        self.dwf().digital_in_divider_get(self.hdwf()?)
    }

    pub fn set_divider(&self, divider: u32) -> Result<()> {
        self.dwf().digital_in_divider_set(self.hdwf()?, divider)
    }
}

/// Trigger detector of the digital input unit.
pub struct DigitalInputTrigger {
    session: Arc<Session>,
}

impl BaseUnit for DigitalInputTrigger {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl DigitalInputTrigger {
    pub fn source(&self) -> Result<TriggerSource> {
        TriggerSource::try_from(self.dwf().digital_in_trigger_source_get(self.hdwf()?)?)
    }

    pub fn set_source(&self, source: TriggerSource) -> Result<()> {
        self.dwf().digital_in_trigger_source_set(self.hdwf()?, source.raw())
    }

    pub fn slope(&self) -> Result<TriggerSlope> {
        TriggerSlope::try_from(self.dwf().digital_in_trigger_slope_get(self.hdwf()?)?)
    }

    pub fn set_slope(&self, slope: TriggerSlope) -> Result<()> {
        self.dwf().digital_in_trigger_slope_set(self.hdwf()?, slope.raw())
    }

    pub fn position_max(&self) -> Result<usize> {
        Ok(self.dwf().digital_in_trigger_position_info(self.hdwf()?)? as usize)
    }

    /// Samples acquired after the trigger.
    pub fn position(&self) -> Result<usize> {
        Ok(self.dwf().digital_in_trigger_position_get(self.hdwf()?)? as usize)
    }

    pub fn set_position(&self, samples: usize) -> Result<()> {
        self.dwf()
            .digital_in_trigger_position_set(self.hdwf()?, samples as c_uint)
    }

    /// Samples acquired before arming, record mode only.
    pub fn prefill(&self) -> Result<usize> {
        Ok(self.dwf().digital_in_trigger_prefill_get(self.hdwf()?)? as usize)
    }

    pub fn set_prefill(&self, samples: usize) -> Result<()> {
        self.dwf()
            .digital_in_trigger_prefill_set(self.hdwf()?, samples as c_uint)
    }

    /// `(min, max, steps)` of the auto trigger timeout.
    pub fn auto_timeout_info(&self) -> Result<(f64, f64, f64)> {
        self.dwf().digital_in_trigger_auto_timeout_info(self.hdwf()?)
    }

    pub fn auto_timeout(&self) -> Result<f64> {
        self.dwf().digital_in_trigger_auto_timeout_get(self.hdwf()?)
    }

    pub fn set_auto_timeout(&self, timeout: f64) -> Result<()> {
        self.dwf().digital_in_trigger_auto_timeout_set(self.hdwf()?, timeout)
    }

    /// Lines usable by each detector.
    pub fn mask_info(&self) -> Result<TriggerMask> {
        Ok(self.dwf().digital_in_trigger_info(self.hdwf()?)?.into())
    }

    pub fn mask(&self) -> Result<TriggerMask> {
        Ok(self.dwf().digital_in_trigger_get(self.hdwf()?)?.into())
    }

    pub fn set_mask(&self, mask: TriggerMask) -> Result<()> {
        self.dwf()
            .digital_in_trigger_set(self.hdwf()?, mask.low, mask.high, mask.rise, mask.fall)
    }

    /// Condition that resets the pulse length and counter detectors.
    pub fn set_reset_mask(&self, mask: TriggerMask) -> Result<()> {
        self.dwf()
            .digital_in_trigger_reset_set(self.hdwf()?, mask.low, mask.high, mask.rise, mask.fall)
    }

    pub fn set_counter(&self, count: c_int, restart: bool) -> Result<()> {
        self.dwf()
            .digital_in_trigger_count_set(self.hdwf()?, count, to_cbool(restart))
    }

    /// Pulse length window in seconds. `max == 0` means no upper bound; `max < 0` triggers as
    /// soon as `min` is exceeded.
    pub fn set_length(&self, min: f64, max: f64, sync_mode: c_int) -> Result<()> {
        self.dwf()
            .digital_in_trigger_length_set(self.hdwf()?, min, max, sync_mode)
    }

    /// Serial pattern match on `pin`.
    pub fn set_match(&self, pin: c_int, mask: u32, value: u32, bit_stuffing: c_int) -> Result<()> {
        self.dwf()
            .digital_in_trigger_match_set(self.hdwf()?, pin, mask, value, bit_stuffing)
    }
}

/// One sampled line.
pub struct DigitalInputChannel {
    session: Arc<Session>,
    index: usize,
}

impl BaseUnit for DigitalInputChannel {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl BaseChannel for DigitalInputChannel {
    fn index(&self) -> usize {
        self.index
    }
}

impl DigitalInputChannel {
    fn trigger(&self) -> DigitalInputTrigger {
        DigitalInputTrigger {
            session: self.session.clone(),
        }
    }

    pub fn supported_conditions(&self) -> Result<Vec<PinCondition>> {
        Ok(self.trigger().mask_info()?.supported_conditions(self.index))
    }

    pub fn trigger_condition(&self) -> Result<PinCondition> {
        Ok(self.trigger().mask()?.condition(self.index))
    }

    /// Sets the trigger condition of this line, keeping the conditions of the other lines.
    pub fn setup_trigger(&self, condition: PinCondition) -> Result<()> {
        let trigger = self.trigger();
        let mask = trigger.mask()?;
        trigger.set_mask(mask.with_condition(self.index, condition))
    }

    /// Sets the detector reset condition to this line only.
    pub fn setup_reset_trigger(&self, condition: PinCondition) -> Result<()> {
        self.trigger()
            .set_reset_mask(TriggerMask::default().with_condition(self.index, condition))
    }
}

/// Digital input unit.
pub struct DigitalInput {
    session: Arc<Session>,
    clock: DigitalInputClock,
    trigger: DigitalInputTrigger,
    channels: Registry<DigitalInputChannel>,
}

impl BaseUnit for DigitalInput {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl DigitalInput {
    pub(crate) fn new(session: Arc<Session>, channel_count: usize) -> Self {
        let channels = Registry::from_fn(
            channel_count.min(32),
            |i| format!("dio{}", i),
            |i| DigitalInputChannel {
                session: session.clone(),
                index: i,
            },
        );
        Self {
            clock: DigitalInputClock {
                session: session.clone(),
            },
            trigger: DigitalInputTrigger {
                session: session.clone(),
            },
            session,
            channels,
        }
    }

    pub fn clock(&self) -> &DigitalInputClock {
        &self.clock
    }

    pub fn trigger(&self) -> &DigitalInputTrigger {
        &self.trigger
    }

    pub fn channels(&self) -> &Registry<DigitalInputChannel> {
        &self.channels
    }

    pub fn channels_(&mut self) -> &mut Registry<DigitalInputChannel> {
        &mut self.channels
    }

    pub fn channel<'a>(&self, address: impl Into<Address<'a>>) -> Result<&DigitalInputChannel> {
        self.channels.get(address)
    }

    /// Places the DIO lines before the DIN lines in the sample word (Digital Discovery).
    pub fn set_dio_first(&self, dio_first: bool) -> Result<()> {
        self.dwf()
            .digital_in_input_order_set(self.hdwf()?, to_cbool(dio_first))
    }

    pub fn reset(&self) -> Result<()> {
        self.invalidate_data();
        self.dwf().digital_in_reset(self.hdwf()?)
    }

    pub fn configure(&self, reconfigure: bool, start: bool) -> Result<()> {
        self.invalidate_data();
        self.dwf()
            .digital_in_configure(self.hdwf()?, to_cbool(reconfigure), to_cbool(start))
    }

    /// Reads the instrument state; with `read_data` the sample buffer is transferred as well.
    pub fn read_status(&self, read_data: bool) -> Result<State> {
        let state = State::try_from(self.dwf().digital_in_status(self.hdwf()?, to_cbool(read_data))?)?;
        if read_data {
            self.session
                .status_flag(Acquisition::DigitalIn)
                .store(true, Ordering::Release);
        }
        Ok(state)
    }

    pub fn wait_for_status(&self, state: State, read_data: bool) -> Result<()> {
        wait_for_state(state, || self.read_status(read_data))
    }

    pub fn remaining_samples(&self) -> Result<usize> {
        Ok(self.dwf().digital_in_status_samples_left(self.hdwf()?)?.max(0) as usize)
    }

    pub fn valid_samples(&self) -> Result<usize> {
        Ok(self.dwf().digital_in_status_samples_valid(self.hdwf()?)?.max(0) as usize)
    }

    pub fn write_index(&self) -> Result<usize> {
        Ok(self.dwf().digital_in_status_index_write(self.hdwf()?)?.max(0) as usize)
    }

    pub fn auto_triggered(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().digital_in_status_auto_triggered(self.hdwf()?)?))
    }

    /// `(available, lost, corrupted)` sample counts of the last record mode status read.
    pub fn record_status(&self) -> Result<(usize, usize, usize)> {
        let (available, lost, corrupted) = self.dwf().digital_in_status_record(self.hdwf()?)?;
        Ok((available.max(0) as usize, lost.max(0) as usize, corrupted.max(0) as usize))
    }

    /// Internal clock divided by the clock divider.
    pub fn sample_rate(&self) -> Result<f64> {
        let divider = self.clock.divider()?.max(1);
        Ok(self.clock.frequency()? / f64::from(divider))
    }

    /// Sets the divider closest to `sample_rate`.
    pub fn set_sample_rate(&self, sample_rate: f64) -> Result<()> {
        let divider = (self.clock.frequency()? / sample_rate).round_ties_even().max(1.0);
        self.clock.set_divider(divider.min(f64::from(u32::MAX)) as u32)
    }

    /// Bits per sample.
    pub fn sample_format(&self) -> Result<c_int> {
        self.dwf().digital_in_sample_format_get(self.hdwf()?)
    }

    pub fn set_sample_format(&self, bits: c_int) -> Result<()> {
        self.dwf().digital_in_sample_format_set(self.hdwf()?, bits)
    }

    pub fn buffer_size_max(&self) -> Result<usize> {
        Ok(self.dwf().digital_in_buffer_size_info(self.hdwf()?)?.max(0) as usize)
    }

    pub fn buffer_size(&self) -> Result<usize> {
        Ok(self.dwf().digital_in_buffer_size_get(self.hdwf()?)?.max(0) as usize)
    }

    pub fn set_buffer_size(&self, size: usize) -> Result<()> {
        self.dwf().digital_in_buffer_size_set(self.hdwf()?, size as c_int)
    }

    pub fn sample_mode_info(&self) -> Result<Vec<DigitalInSampleMode>> {
        Ok(DigitalInSampleMode::from_bits(bits(
            self.dwf().digital_in_sample_mode_info(self.hdwf()?)?,
        )))
    }

    pub fn sample_mode(&self) -> Result<DigitalInSampleMode> {
        DigitalInSampleMode::try_from(self.dwf().digital_in_sample_mode_get(self.hdwf()?)?)
    }

    pub fn set_sample_mode(&self, mode: DigitalInSampleMode) -> Result<()> {
        self.dwf().digital_in_sample_mode_set(self.hdwf()?, mode.raw())
    }

    /// Lines whose changes are stored in record mode.
    pub fn sample_sensible(&self) -> Result<u32> {
        self.dwf().digital_in_sample_sensible_get(self.hdwf()?)
    }

    pub fn set_sample_sensible(&self, mask: u32) -> Result<()> {
        self.dwf().digital_in_sample_sensible_set(self.hdwf()?, mask)
    }

    pub fn acquisition_mode_info(&self) -> Result<Vec<AcquisitionMode>> {
        Ok(AcquisitionMode::from_bits(bits(
            self.dwf().digital_in_acquisition_mode_info(self.hdwf()?)?,
        )))
    }

    pub fn acquisition_mode(&self) -> Result<AcquisitionMode> {
        AcquisitionMode::try_from(self.dwf().digital_in_acquisition_mode_get(self.hdwf()?)?)
    }

    pub fn set_acquisition_mode(&self, mode: AcquisitionMode) -> Result<()> {
        self.dwf().digital_in_acquisition_mode_set(self.hdwf()?, mode.raw())
    }

    /// All valid samples of the last transferred buffer.
    pub fn get_data(&self) -> Result<DigitalSamples> {
        self.ensure_status_read()?;
        self.get_data_range(0, self.valid_samples()?)
    }

    pub fn get_data_range(&self, first: usize, count: usize) -> Result<DigitalSamples> {
        self.fetch(first, count, false)
    }

    /// Noise samples of the last transferred buffer, in noise sample mode.
    pub fn get_noise(&self) -> Result<DigitalSamples> {
        self.ensure_status_read()?;
        self.get_noise_range(0, self.valid_samples()?)
    }

    pub fn get_noise_range(&self, first: usize, count: usize) -> Result<DigitalSamples> {
        self.fetch(first, count, true)
    }

    fn fetch(&self, first: usize, count: usize, noise: bool) -> Result<DigitalSamples> {
        self.ensure_status_read()?;
        let hdwf = self.hdwf()?;
        Ok(match SampleWidth::from_format(self.sample_format()?)? {
            SampleWidth::U8 => DigitalSamples::U8(self.fetch_words(hdwf, first, count, noise)?),
            SampleWidth::U16 => DigitalSamples::U16(self.fetch_words(hdwf, first, count, noise)?),
            SampleWidth::U32 => DigitalSamples::U32(self.fetch_words(hdwf, first, count, noise)?),
        })
    }

    fn fetch_words<W: SampleWord>(&self, hdwf: Hdwf, first: usize, count: usize, noise: bool) -> Result<Array1<W>> {
        let mut words = vec![W::default(); count];
        if count > 0 {
            if noise {
                self.dwf().digital_in_status_noise2(hdwf, &mut words, first as c_int)?;
            } else {
                self.dwf().digital_in_status_data2(hdwf, &mut words, first as c_int)?;
            }
        }
        Ok(Array1::from_vec(words))
    }

    pub fn setup_trigger(&self, setup: &DigitalTriggerSetup) -> Result<()> {
        if let Some(source) = setup.source {
            self.trigger.set_source(source)?;
        }
        if let Some(slope) = setup.slope {
            self.trigger.set_slope(slope)?;
        }
        if let Some(position) = setup.position {
            self.trigger.set_position(position)?;
        }
        if let Some(prefill) = setup.prefill {
            self.trigger.set_prefill(prefill)?;
        }
        if let Some(timeout) = setup.auto_timeout {
            self.trigger.set_auto_timeout(timeout)?;
        }
        Ok(())
    }

    /// Triggers on an edge of one line. The other lines are ignored.
    pub fn setup_edge_trigger<'a>(&self, channel: impl Into<Address<'a>>, edge: PinCondition) -> Result<()> {
        if !matches!(edge, PinCondition::Rise | PinCondition::Fall | PinCondition::Edge) {
            return Err(DwfError::invalid_option("edge", format!("'{}' is not an edge", edge)));
        }
        self.setup_condition_trigger(channel, edge)
    }

    /// Triggers on a level of one line. The other lines are ignored.
    pub fn setup_level_trigger<'a>(&self, channel: impl Into<Address<'a>>, level: PinCondition) -> Result<()> {
        if !matches!(level, PinCondition::Low | PinCondition::High) {
            return Err(DwfError::invalid_option("level", format!("'{}' is not a level", level)));
        }
        self.setup_condition_trigger(channel, level)
    }

    fn setup_condition_trigger<'a>(&self, channel: impl Into<Address<'a>>, condition: PinCondition) -> Result<()> {
        let line = self.channels.index_of(channel)?;
        self.trigger.set_source(TriggerSource::DetectorDigitalIn)?;
        self.trigger
            .set_mask(TriggerMask::default().with_condition(line, condition))
    }

    /// Triggers on a pulse shorter than `less_than` seconds.
    pub fn setup_glitch_trigger<'a>(
        &self,
        channel: impl Into<Address<'a>>,
        polarity: Polarity,
        less_than: f64,
    ) -> Result<()> {
        self.setup_pulse_trigger(channel, polarity, 0.0, less_than)
    }

    /// Triggers once a pulse lasts `more_than` seconds, without waiting for its end.
    pub fn setup_timeout_trigger<'a>(
        &self,
        channel: impl Into<Address<'a>>,
        polarity: Polarity,
        more_than: f64,
    ) -> Result<()> {
        self.setup_pulse_trigger(channel, polarity, more_than, 0.0)
    }

    /// Triggers at the end of a pulse longer than `more_than` seconds.
    pub fn setup_more_trigger<'a>(
        &self,
        channel: impl Into<Address<'a>>,
        polarity: Polarity,
        more_than: f64,
    ) -> Result<()> {
        self.setup_pulse_trigger(channel, polarity, more_than, -1.0)
    }

    /// Triggers on a pulse of `length` to `length + hysteresis` seconds.
    pub fn setup_length_trigger<'a>(
        &self,
        channel: impl Into<Address<'a>>,
        polarity: Polarity,
        length: f64,
        hysteresis: f64,
    ) -> Result<()> {
        self.setup_pulse_trigger(channel, polarity, length, length + hysteresis)
    }

    fn setup_pulse_trigger<'a>(
        &self,
        channel: impl Into<Address<'a>>,
        polarity: Polarity,
        min_length: f64,
        max_length: f64,
    ) -> Result<()> {
        let line = self.channels.index_of(channel)?;
        let (level, reset) = match polarity {
            Polarity::Positive => (PinCondition::High, PinCondition::Rise),
            Polarity::Negative => (PinCondition::Low, PinCondition::Fall),
        };
        self.trigger.set_source(TriggerSource::DetectorDigitalIn)?;
        self.trigger
            .set_mask(TriggerMask::default().with_condition(line, level))?;
        self.trigger
            .set_reset_mask(TriggerMask::default().with_condition(line, reset))?;
        self.trigger.set_length(min_length, max_length, 0)?;
        self.trigger.set_counter(1, false)
    }

    /// Triggers after `max_counter` occurrences of `condition` on `channel`; `reset_condition` on
    /// `reset_channel` restarts the count.
    pub fn setup_counter_trigger<'a, 'b>(
        &self,
        channel: impl Into<Address<'a>>,
        condition: PinCondition,
        reset_channel: impl Into<Address<'b>>,
        reset_condition: PinCondition,
        max_counter: c_int,
    ) -> Result<()> {
        let channel = self.channels.get(channel)?;
        let reset_channel = self.channels.get(reset_channel)?;
        self.trigger.set_source(TriggerSource::DetectorDigitalIn)?;
        channel.setup_trigger(condition)?;
        reset_channel.setup_reset_trigger(reset_condition)?;
        self.trigger.set_counter(max_counter, false)
    }

    pub fn setup_acquisition(&self, setup: &DigitalAcquisitionSetup) -> Result<()> {
        setup.validate()?;
        if let Some(mode) = setup.mode {
            self.set_acquisition_mode(mode)?;
        }
        if let Some(sample_rate) = setup.sample_rate {
            self.set_sample_rate(sample_rate)?;
        }
        if let Some(format) = setup.sample_format {
            self.set_sample_format(format)?;
        }
        if let Some(buffer_size) = setup.buffer_size {
            self.set_buffer_size(buffer_size)?;
        }
        if let Some(position) = setup.position {
            self.trigger.set_position(position)?;
        }
        if let Some(prefill) = setup.prefill {
            self.trigger.set_prefill(prefill)?;
        }
        if setup.configure || setup.start {
            self.configure(setup.configure, setup.start)?;
        }
        Ok(())
    }

    /// Single buffer acquisition. When started, blocks until done and returns the samples.
    pub fn single(
        &self,
        sample_rate: Option<f64>,
        sample_format: Option<c_int>,
        buffer_size: Option<usize>,
        position: Option<usize>,
        continuous: bool,
        configure: bool,
        start: bool,
    ) -> Result<Option<DigitalSamples>> {
        let mode = if continuous {
            AcquisitionMode::Single
        } else {
            AcquisitionMode::Single1
        };
        self.setup_acquisition(&DigitalAcquisitionSetup {
            mode: Some(mode),
            sample_rate,
            sample_format,
            buffer_size,
            position,
            prefill: None,
            configure,
            start,
        })?;
        if !start {
            return Ok(None);
        }
        self.wait_for_status(State::Done, true)?;
        self.get_data().map(Some)
    }

    /// Sets up record mode for `prefill + sample_count` samples and returns a recorder. With
    /// `start`, the recording runs to completion first.
    pub fn record(
        &self,
        setup: &DigitalRecordSetup,
        callback: Option<&mut dyn FnMut(&DigitalRecorder) -> bool>,
    ) -> Result<DigitalRecorder<'_>> {
        if let Some(mask) = setup.sample_sensible {
            self.set_sample_sensible(mask)?;
        }
        self.setup_acquisition(&DigitalAcquisitionSetup {
            mode: Some(AcquisitionMode::Record),
            sample_rate: setup.sample_rate,
            sample_format: setup.sample_format,
            buffer_size: None,
            position: setup.sample_count,
            prefill: setup.prefill,
            configure: setup.configure,
            start: false,
        })?;
        let mut recorder = DigitalRecorder::new(self);
        recorder.set_timeout(setup.timeout);
        if setup.start {
            recorder.record(callback)?;
        }
        Ok(recorder)
    }

    /// Streams samples to `callback` until it returns false. Each call sees the newly available
    /// samples through [`DigitalRecorder::chunk`].
    pub fn stream(
        &self,
        sample_rate: Option<f64>,
        sample_format: Option<c_int>,
        sample_sensible: Option<u32>,
        callback: &mut dyn FnMut(&DigitalRecorder) -> bool,
    ) -> Result<DigitalRecorder<'_>> {
        self.trigger.set_prefill(0)?;
        self.trigger.set_position(0)?;
        if let Some(mask) = sample_sensible {
            self.set_sample_sensible(mask)?;
        }
        self.setup_acquisition(&DigitalAcquisitionSetup {
            mode: Some(AcquisitionMode::Record),
            sample_rate,
            sample_format,
            ..Default::default()
        })?;
        let mut recorder = DigitalRecorder::new(self);
        recorder.stream(callback)?;
        Ok(recorder)
    }

    fn ensure_status_read(&self) -> Result<()> {
        if self.session.status_flag(Acquisition::DigitalIn).load(Ordering::Acquire) {
            Ok(())
        } else {
            Err(UsageError::StatusNotRead.into())
        }
    }

    fn invalidate_data(&self) {
        self.session
            .status_flag(Acquisition::DigitalIn)
            .store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conditions_replace_the_line_bits() {
        let mask = TriggerMask {
            low: 0b0011,
            high: 0,
            rise: 0b0100,
            fall: 0,
        };
        let mask = mask.with_condition(0, PinCondition::Edge);
        assert_eq!(
            mask,
            TriggerMask {
                low: 0b0010,
                high: 0,
                rise: 0b0101,
                fall: 0b0001,
            }
        );
        assert_eq!(mask.condition(0), PinCondition::Edge);
        assert_eq!(mask.condition(1), PinCondition::Low);
        assert_eq!(mask.condition(2), PinCondition::Rise);
        assert_eq!(mask.condition(3), PinCondition::Ignore);
        assert_eq!(mask.with_condition(1, PinCondition::Ignore).low, 0);
    }

    #[test]
    fn supported_conditions_follow_the_info_mask() {
        let info = TriggerMask {
            low: 0b1,
            high: 0b1,
            rise: 0b11,
            fall: 0b11,
        };
        assert_eq!(
            info.supported_conditions(1),
            vec![PinCondition::Ignore, PinCondition::Rise, PinCondition::Fall, PinCondition::Edge]
        );
        assert_eq!(info.supported_conditions(0).len(), 6);
    }

    #[test]
    fn parses_conditions_and_polarities() {
        assert_eq!("rising".parse::<PinCondition>().unwrap(), PinCondition::Rise);
        assert_eq!("Edge".parse::<PinCondition>().unwrap(), PinCondition::Edge);
        assert!("toggle".parse::<PinCondition>().is_err());
        assert_eq!("neg".parse::<Polarity>().unwrap(), Polarity::Negative);
        assert!(matches!(
            "up".parse::<Polarity>(),
            Err(DwfError::InvalidOption { option: "polarity", .. })
        ));
    }
}
