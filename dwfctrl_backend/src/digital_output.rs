//! Digital output (pattern generator) unit.
//!
//! Every channel is clocked by the internal clock through a divider. In pulse mode a low/high
//! counter pair then shapes the output: the line stays low for `low` and high for `high` divided
//! clock ticks. Before the first period the channel waits `initial_divider` system clock ticks and
//! then `initial_counter` divided ticks at the initial level.
//!
//! The high-level setups ([`DigitalOutputChannel::setup_clock`],
//! [`DigitalOutputChannel::setup_pulse`], ...) derive these register values from frequencies and
//! durations. The arithmetic lives in [`PulseTiming`] so that it can be checked without a device.

use std::sync::Arc;

use dwf_backend::*;
use libc::c_uint;

use crate::helpers::{pack_bits, wait_for_state};
use crate::registry::{Address, Registry};
use crate::unit::*;

/// Clock and counter limits of a channel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimingLimits {
    /// Internal clock in Hz.
    pub clock_frequency: f64,
    pub counter_max: u32,
    pub divider_max: u32,
}

/// Register values of a pulse mode channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PulseTiming {
    pub divider: u32,
    pub low_counter: u32,
    pub high_counter: u32,
    pub initial_divider: u32,
    pub initial_counter: u32,
    pub initial_high: bool,
}

impl PulseTiming {
    /// Square wave of `frequency` Hz with `duty_cycle` percent high time, shifted by `phase`
    /// degrees and started after `delay` seconds.
    pub fn clock(limits: &TimingLimits, frequency: f64, duty_cycle: f64, phase: f64, delay: f64) -> Result<Self> {
        if !(frequency > 0.0) {
            return Err(DwfError::invalid_option("frequency", "must be positive"));
        }
        if !(0.0..=100.0).contains(&duty_cycle) {
            return Err(DwfError::invalid_option("duty_cycle", "must be between 0 and 100 percent"));
        }
        let system_clock = limits.clock_frequency;
        let divider = (system_clock / frequency / f64::from(limits.counter_max.max(1))).ceil().max(1.0);
        let clock = system_clock / divider;

        let total_counter = (clock / frequency).round_ties_even();
        let high_counter = (total_counter * duty_cycle / 100.0).round_ties_even();
        let low_counter = total_counter - high_counter;

        let low_time = low_counter / clock;
        let total_time = total_counter / clock;
        let phase_delay = if total_time > 0.0 {
            (total_time * phase / 360.0).rem_euclid(total_time)
        } else {
            0.0
        };
        let (initial_high, delay) = if phase_delay < low_time {
            (false, delay + low_time - phase_delay)
        } else {
            (true, delay + total_time - phase_delay)
        };
        let (initial_divider, initial_counter) = split_delay(limits, clock, delay);
        Ok(Self {
            divider: to_register(divider),
            low_counter: to_register(low_counter),
            high_counter: to_register(high_counter),
            initial_divider,
            initial_counter,
            initial_high,
        })
    }

    /// Pulse train of `low` and `high` seconds, started after `delay` seconds at the initial level.
    pub fn pulse(limits: &TimingLimits, low: f64, high: f64, delay: f64, initial_high: bool) -> Result<Self> {
        if !(low >= 0.0) {
            return Err(DwfError::invalid_option("low", "must not be negative"));
        }
        if !(high >= 0.0) {
            return Err(DwfError::invalid_option("high", "must not be negative"));
        }
        if !(low + high > 0.0) {
            return Err(DwfError::invalid_option("low", "low + high must be positive"));
        }
        let system_clock = limits.clock_frequency;
        let divider = (system_clock * low.max(high) / f64::from(limits.counter_max.max(1)))
            .ceil()
            .max(1.0);
        let clock = system_clock / divider;
        let delay = delay + if initial_high { high } else { low };
        let (initial_divider, initial_counter) = split_delay(limits, clock, delay);
        Ok(Self {
            divider: to_register(divider),
            low_counter: to_register((low * clock).round_ties_even()),
            high_counter: to_register((high * clock).round_ties_even()),
            initial_divider,
            initial_counter,
            initial_high,
        })
    }
}

/// Splits a start delay into the initial divider (system clock ticks) and initial counter
/// (divided clock ticks). The counter covers whatever exceeds the divider range.
fn split_delay(limits: &TimingLimits, clock: f64, delay: f64) -> (u32, u32) {
    let system_clock = limits.clock_frequency;
    let max_delay = f64::from(limits.divider_max.saturating_sub(1)) / system_clock;
    let (initial_counter, delay) = if delay > max_delay {
        let counter = (1.0 + ((delay - max_delay) * clock).round_ties_even()).min(f64::from(limits.counter_max));
        (counter, delay - counter / clock)
    } else {
        (1.0, delay)
    };
    let initial_divider = (delay * system_clock).round_ties_even().min(f64::from(limits.divider_max));
    (to_register(initial_divider), to_register(initial_counter))
}

fn to_register(value: f64) -> u32 {
    value.max(0.0).min(f64::from(u32::MAX)) as u32
}

/// Options of [`DigitalOutputChannel::setup`]. Unset options leave the current setting.
#[derive(Debug, Clone)]
pub struct PatternSetup {
    pub output_type: Option<DigitalOutType>,
    pub output_mode: Option<DigitalOutMode>,
    pub idle_state: Option<DigitalOutIdle>,
    pub divider: Option<u32>,
    /// `(low, high)` counters.
    pub counter: Option<(u32, u32)>,
    pub initial_divider: Option<u32>,
    /// Initial counter; defaults to zero when only `initial_high` is set.
    pub initial_counter: Option<u32>,
    /// Initial level; defaults to low when only `initial_counter` is set.
    pub initial_high: Option<bool>,
    /// Zero repeats forever.
    pub repetition: Option<u32>,
    /// Default `true`.
    pub enabled: bool,
    /// Push the settings to the device. Default `false`.
    pub configure: bool,
    /// Start the generator. Default `false`.
    pub start: bool,
}

impl Default for PatternSetup {
    fn default() -> Self {
        Self {
            output_type: None,
            output_mode: None,
            idle_state: None,
            divider: None,
            counter: None,
            initial_divider: None,
            initial_counter: None,
            initial_high: None,
            repetition: None,
            enabled: true,
            configure: false,
            start: false,
        }
    }
}

/// Options shared by the high-level channel setups.
#[derive(Debug, Clone)]
pub struct OutputOptions {
    pub output_mode: Option<DigitalOutMode>,
    pub idle_state: Option<DigitalOutIdle>,
    /// Zero repeats forever. Default 0.
    pub repetition: u32,
    /// Default `true`.
    pub enabled: bool,
    pub configure: bool,
    pub start: bool,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            output_mode: None,
            idle_state: None,
            repetition: 0,
            enabled: true,
            configure: false,
            start: false,
        }
    }
}

impl OutputOptions {
    fn pattern(&self, output_type: DigitalOutType) -> PatternSetup {
        PatternSetup {
            output_type: Some(output_type),
            output_mode: self.output_mode,
            idle_state: self.idle_state,
            repetition: Some(self.repetition),
            enabled: self.enabled,
            configure: self.configure,
            start: self.start,
            ..Default::default()
        }
    }
}

/// Options of [`DigitalOutput::setup`].
#[derive(Debug, Clone, Default)]
pub struct GeneratorSetup {
    /// Seconds; zero runs forever.
    pub run_length: Option<f64>,
    /// Seconds before each run.
    pub wait_length: Option<f64>,
    /// Zero repeats forever.
    pub repeat_count: Option<u32>,
    pub configure: bool,
    pub start: bool,
}

/// One pattern generator channel.
pub struct DigitalOutputChannel {
    session: Arc<Session>,
    index: usize,
}

impl BaseUnit for DigitalOutputChannel {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl BaseChannel for DigitalOutputChannel {
    fn index(&self) -> usize {
        self.index
    }
}

impl DigitalOutputChannel {
    pub fn enabled(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().digital_out_enable_get(self.hdwf()?, self.raw_index())?))
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.dwf()
            .digital_out_enable_set(self.hdwf()?, self.raw_index(), to_cbool(enabled))
    }

    pub fn output_mode_info(&self) -> Result<Vec<DigitalOutMode>> {
        Ok(DigitalOutMode::from_bits(bits(
            self.dwf().digital_out_output_info(self.hdwf()?, self.raw_index())?,
        )))
    }

    pub fn output_mode(&self) -> Result<DigitalOutMode> {
        DigitalOutMode::try_from(self.dwf().digital_out_output_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_output_mode(&self, mode: DigitalOutMode) -> Result<()> {
        self.dwf()
            .digital_out_output_set(self.hdwf()?, self.raw_index(), mode.raw())
    }

    pub fn output_type_info(&self) -> Result<Vec<DigitalOutType>> {
        Ok(DigitalOutType::from_bits(bits(
            self.dwf().digital_out_type_info(self.hdwf()?, self.raw_index())?,
        )))
    }

    pub fn output_type(&self) -> Result<DigitalOutType> {
        DigitalOutType::try_from(self.dwf().digital_out_type_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_output_type(&self, output_type: DigitalOutType) -> Result<()> {
        self.dwf()
            .digital_out_type_set(self.hdwf()?, self.raw_index(), output_type.raw())
    }

    pub fn idle_state_info(&self) -> Result<Vec<DigitalOutIdle>> {
        Ok(DigitalOutIdle::from_bits(bits(
            self.dwf().digital_out_idle_info(self.hdwf()?, self.raw_index())?,
        )))
    }

    pub fn idle_state(&self) -> Result<DigitalOutIdle> {
        DigitalOutIdle::try_from(self.dwf().digital_out_idle_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_idle_state(&self, idle: DigitalOutIdle) -> Result<()> {
        self.dwf()
            .digital_out_idle_set(self.hdwf()?, self.raw_index(), idle.raw())
    }

    /// `(min, max)` clock divider.
    pub fn divider_info(&self) -> Result<(u32, u32)> {
        self.dwf().digital_out_divider_info(self.hdwf()?, self.raw_index())
    }

    pub fn initial_divider(&self) -> Result<u32> {
        self.dwf().digital_out_divider_init_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_initial_divider(&self, divider: u32) -> Result<()> {
        self.dwf()
            .digital_out_divider_init_set(self.hdwf()?, self.raw_index(), divider)
    }

    pub fn divider(&self) -> Result<u32> {
        self.dwf().digital_out_divider_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_divider(&self, divider: u32) -> Result<()> {
        self.dwf()
            .digital_out_divider_set(self.hdwf()?, self.raw_index(), divider)
    }

    /// `(min, max)` counter value.
    pub fn counter_info(&self) -> Result<(u32, u32)> {
        self.dwf().digital_out_counter_info(self.hdwf()?, self.raw_index())
    }

    /// `(high, counter)`: initial level and initial counter.
    pub fn initial_state(&self) -> Result<(bool, u32)> {
        let (high, counter) = self
            .dwf()
            .digital_out_counter_init_get(self.hdwf()?, self.raw_index())?;
        Ok((from_cbool(high), counter))
    }

    pub fn set_initial_state(&self, high: bool, counter: u32) -> Result<()> {
        self.dwf()
            .digital_out_counter_init_set(self.hdwf()?, self.raw_index(), to_cbool(high), counter)
    }

    /// `(low, high)` counters.
    pub fn counter(&self) -> Result<(u32, u32)> {
        self.dwf().digital_out_counter_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_counter(&self, low: u32, high: u32) -> Result<()> {
        self.dwf()
            .digital_out_counter_set(self.hdwf()?, self.raw_index(), low, high)
    }

    pub fn repetition_max(&self) -> Result<u32> {
        self.dwf().digital_out_repetition_info(self.hdwf()?, self.raw_index())
    }

    pub fn repetition(&self) -> Result<u32> {
        self.dwf().digital_out_repetition_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_repetition(&self, repetition: u32) -> Result<()> {
        self.dwf()
            .digital_out_repetition_set(self.hdwf()?, self.raw_index(), repetition)
    }

    /// Longest custom pattern in bits.
    pub fn max_bits(&self) -> Result<u32> {
        self.dwf().digital_out_data_info(self.hdwf()?, self.raw_index())
    }

    /// Loads a custom pattern, first bit first.
    pub fn set_custom_bits(&self, pattern: &[bool]) -> Result<()> {
        let packed = pack_bits(pattern);
        self.dwf()
            .digital_out_data_set(self.hdwf()?, self.raw_index(), &packed, pattern.len() as c_uint)
    }

    pub fn timing_limits(&self) -> Result<TimingLimits> {
        Ok(TimingLimits {
            clock_frequency: self.dwf().digital_out_internal_clock_info(self.hdwf()?)?,
            counter_max: self.counter_info()?.1,
            divider_max: self.divider_info()?.1,
        })
    }

    pub fn setup(&self, setup: &PatternSetup) -> Result<()> {
        if let Some(output_type) = setup.output_type {
            self.set_output_type(output_type)?;
        }
        if let Some(mode) = setup.output_mode {
            self.set_output_mode(mode)?;
        }
        if let Some(idle) = setup.idle_state {
            self.set_idle_state(idle)?;
        }
        if let Some(divider) = setup.divider {
            self.set_divider(divider)?;
        }
        if let Some((low, high)) = setup.counter {
            self.set_counter(low, high)?;
        }
        if let Some(divider) = setup.initial_divider {
            self.set_initial_divider(divider)?;
        }
        if setup.initial_high.is_some() || setup.initial_counter.is_some() {
            self.set_initial_state(
                setup.initial_high.unwrap_or(false),
                setup.initial_counter.unwrap_or(0),
            )?;
        }
        if let Some(repetition) = setup.repetition {
            self.set_repetition(repetition)?;
        }
        self.set_enabled(setup.enabled)?;
        if setup.configure || setup.start {
            self.dwf()
                .digital_out_configure(self.hdwf()?, to_cbool(setup.start))?;
        }
        Ok(())
    }

    /// Holds the line at a constant level.
    pub fn setup_constant(&self, high: bool, options: &OutputOptions) -> Result<()> {
        self.setup(&PatternSetup {
            counter: Some((0, 0)),
            initial_counter: Some(0),
            initial_high: Some(high),
            repetition: None,
            ..options.pattern(DigitalOutType::Pulse)
        })
    }

    /// Square wave; see [`PulseTiming::clock`].
    pub fn setup_clock(
        &self,
        frequency: f64,
        duty_cycle: f64,
        phase: f64,
        delay: f64,
        options: &OutputOptions,
    ) -> Result<()> {
        let timing = PulseTiming::clock(&self.timing_limits()?, frequency, duty_cycle, phase, delay)?;
        self.setup_timing(&timing, options)
    }

    /// Pulse train; see [`PulseTiming::pulse`].
    pub fn setup_pulse(
        &self,
        low: f64,
        high: f64,
        delay: f64,
        initial_high: bool,
        options: &OutputOptions,
    ) -> Result<()> {
        let timing = PulseTiming::pulse(&self.timing_limits()?, low, high, delay, initial_high)?;
        self.setup_timing(&timing, options)
    }

    fn setup_timing(&self, timing: &PulseTiming, options: &OutputOptions) -> Result<()> {
        log::debug!("Digital out channel {}: {:?}", self.index, timing);
        self.setup(&PatternSetup {
            divider: Some(timing.divider),
            counter: Some((timing.low_counter, timing.high_counter)),
            initial_divider: Some(timing.initial_divider),
            initial_counter: Some(timing.initial_counter),
            initial_high: Some(timing.initial_high),
            ..options.pattern(DigitalOutType::Pulse)
        })
    }

    /// Random bits at `frequency` bits per second.
    pub fn setup_random(&self, frequency: f64, delay: f64, options: &OutputOptions) -> Result<()> {
        if !(frequency > 0.0) {
            return Err(DwfError::invalid_option("frequency", "must be positive"));
        }
        let limits = self.timing_limits()?;
        let divider = (limits.clock_frequency / frequency / f64::from(limits.counter_max.max(1)))
            .ceil()
            .max(1.0);
        let clock = limits.clock_frequency / divider;
        let total_counter = to_register((clock / frequency).round_ties_even());
        self.setup(&PatternSetup {
            divider: Some(to_register(divider)),
            counter: Some((total_counter, total_counter)),
            initial_counter: Some(to_register((delay * clock).round_ties_even())),
            ..options.pattern(DigitalOutType::Random)
        })
    }

    /// Plays `pattern` at `frequency` bits per second.
    pub fn setup_custom(&self, frequency: f64, pattern: &[bool], delay: f64, options: &OutputOptions) -> Result<()> {
        if !(frequency > 0.0) {
            return Err(DwfError::invalid_option("frequency", "must be positive"));
        }
        let max_bits = self.max_bits()?;
        if pattern.len() > max_bits as usize {
            return Err(DwfError::invalid_option(
                "pattern",
                format!("{} bits exceed the {} bit buffer", pattern.len(), max_bits),
            ));
        }
        let system_clock = self.dwf().digital_out_internal_clock_info(self.hdwf()?)?;
        let divider = (system_clock / frequency).ceil().max(1.0);
        let clock = system_clock / divider;
        self.set_custom_bits(pattern)?;
        self.setup(&PatternSetup {
            divider: Some(to_register(divider)),
            counter: Some((1, 1)),
            initial_counter: Some(to_register((delay * clock).round_ties_even())),
            ..options.pattern(DigitalOutType::Custom)
        })
    }
}

/// Digital output unit.
pub struct DigitalOutput {
    session: Arc<Session>,
    channels: Registry<DigitalOutputChannel>,
}

impl BaseUnit for DigitalOutput {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl DigitalOutput {
    pub(crate) fn new(session: Arc<Session>, channel_count: usize) -> Self {
        let channels = Registry::from_fn(
            channel_count,
            |i| format!("dio{}", i),
            |i| DigitalOutputChannel {
                session: session.clone(),
                index: i,
            },
        );
        Self { session, channels }
    }

    pub fn channels(&self) -> &Registry<DigitalOutputChannel> {
        &self.channels
    }

    pub fn channels_(&mut self) -> &mut Registry<DigitalOutputChannel> {
        &mut self.channels
    }

    pub fn channel<'a>(&self, address: impl Into<Address<'a>>) -> Result<&DigitalOutputChannel> {
        self.channels.get(address)
    }

    /// Internal clock in Hz.
    pub fn clock_frequency(&self) -> Result<f64> {
        self.dwf().digital_out_internal_clock_info(self.hdwf()?)
    }

    pub fn trigger_source(&self) -> Result<TriggerSource> {
        TriggerSource::try_from(self.dwf().digital_out_trigger_source_get(self.hdwf()?)?)
    }

    pub fn set_trigger_source(&self, source: TriggerSource) -> Result<()> {
        self.dwf().digital_out_trigger_source_set(self.hdwf()?, source.raw())
    }

    pub fn trigger_slope(&self) -> Result<TriggerSlope> {
        TriggerSlope::try_from(self.dwf().digital_out_trigger_slope_get(self.hdwf()?)?)
    }

    pub fn set_trigger_slope(&self, slope: TriggerSlope) -> Result<()> {
        self.dwf().digital_out_trigger_slope_set(self.hdwf()?, slope.raw())
    }

    /// Wait for the trigger in every wait-run repeat cycle.
    pub fn repeat_trigger(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().digital_out_repeat_trigger_get(self.hdwf()?)?))
    }

    pub fn set_repeat_trigger(&self, repeat_trigger: bool) -> Result<()> {
        self.dwf()
            .digital_out_repeat_trigger_set(self.hdwf()?, to_cbool(repeat_trigger))
    }

    pub fn run_info(&self) -> Result<(f64, f64)> {
        self.dwf().digital_out_run_info(self.hdwf()?)
    }

    pub fn run_length(&self) -> Result<f64> {
        self.dwf().digital_out_run_get(self.hdwf()?)
    }

    pub fn set_run_length(&self, run: f64) -> Result<()> {
        self.dwf().digital_out_run_set(self.hdwf()?, run)
    }

    pub fn run_status(&self) -> Result<f64> {
        self.dwf().digital_out_run_status(self.hdwf()?)
    }

    pub fn wait_info(&self) -> Result<(f64, f64)> {
        self.dwf().digital_out_wait_info(self.hdwf()?)
    }

    pub fn wait_length(&self) -> Result<f64> {
        self.dwf().digital_out_wait_get(self.hdwf()?)
    }

    pub fn set_wait_length(&self, wait: f64) -> Result<()> {
        self.dwf().digital_out_wait_set(self.hdwf()?, wait)
    }

    pub fn repeat_info(&self) -> Result<(u32, u32)> {
        self.dwf().digital_out_repeat_info(self.hdwf()?)
    }

    pub fn repeat_count(&self) -> Result<u32> {
        self.dwf().digital_out_repeat_get(self.hdwf()?)
    }

    pub fn set_repeat_count(&self, repeat: u32) -> Result<()> {
        self.dwf().digital_out_repeat_set(self.hdwf()?, repeat)
    }

    pub fn repeat_status(&self) -> Result<u32> {
        self.dwf().digital_out_repeat_status(self.hdwf()?)
    }

    pub fn reset(&self) -> Result<()> {
        self.dwf().digital_out_reset(self.hdwf()?)
    }

    pub fn configure(&self, start: bool) -> Result<()> {
        self.dwf().digital_out_configure(self.hdwf()?, to_cbool(start))
    }

    pub fn read_status(&self) -> Result<State> {
        State::try_from(self.dwf().digital_out_status(self.hdwf()?)?)
    }

    pub fn wait_for_status(&self, state: State) -> Result<()> {
        wait_for_state(state, || self.read_status())
    }

    pub fn setup_trigger(&self, source: Option<TriggerSource>, slope: Option<TriggerSlope>) -> Result<()> {
        if let Some(source) = source {
            self.set_trigger_source(source)?;
        }
        if let Some(slope) = slope {
            self.set_trigger_slope(slope)?;
        }
        Ok(())
    }

    pub fn setup(&self, setup: &GeneratorSetup) -> Result<()> {
        if let Some(run) = setup.run_length {
            self.set_run_length(run)?;
        }
        if let Some(wait) = setup.wait_length {
            self.set_wait_length(wait)?;
        }
        if let Some(repeat) = setup.repeat_count {
            self.set_repeat_count(repeat)?;
        }
        if setup.configure || setup.start {
            self.configure(setup.start)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LIMITS: TimingLimits = TimingLimits {
        clock_frequency: 100e6,
        counter_max: 32767,
        divider_max: 0x7FFF_FFFF,
    };

    #[test]
    fn clock_divides_down_to_the_counter_range() {
        let timing = PulseTiming::clock(&LIMITS, 1e3, 50.0, 0.0, 0.0).unwrap();
        assert_eq!(timing.divider, 4);
        assert_eq!((timing.low_counter, timing.high_counter), (12500, 12500));
        assert!(!timing.initial_high);
        assert_eq!(timing.initial_counter, 1);
        assert_eq!(timing.initial_divider, 50000);
    }

    #[test]
    fn clock_phase_moves_the_start() {
        let quarter = PulseTiming::clock(&LIMITS, 1e3, 50.0, 90.0, 0.0).unwrap();
        assert!(!quarter.initial_high);
        assert_eq!(quarter.initial_divider, 25000);

        let three_quarters = PulseTiming::clock(&LIMITS, 1e3, 50.0, 270.0, 0.0).unwrap();
        assert!(three_quarters.initial_high);
        assert_eq!(three_quarters.initial_divider, 25000);
    }

    #[test]
    fn clock_counters_round_half_to_even() {
        let limits = TimingLimits {
            counter_max: 32768,
            divider_max: 65536,
            ..LIMITS
        };
        let timing = PulseTiming::clock(&limits, 20e6, 50.0, 0.0, 0.0).unwrap();
        assert_eq!(timing.divider, 1);
        assert_eq!((timing.low_counter, timing.high_counter), (3, 2));

        let timing = PulseTiming::clock(&limits, 100e6 / 7.0, 50.0, 0.0, 0.0).unwrap();
        assert_eq!((timing.low_counter, timing.high_counter), (3, 4));
    }

    #[test]
    fn long_delays_spill_into_the_initial_counter() {
        let limits = TimingLimits {
            divider_max: 1000,
            ..LIMITS
        };
        let timing = PulseTiming::clock(&limits, 1e3, 50.0, 0.0, 0.0).unwrap();
        assert_eq!(timing.initial_counter, 12251);
        assert_eq!(timing.initial_divider, 996);
    }

    #[test]
    fn pulse_counters_follow_the_durations() {
        let timing = PulseTiming::pulse(&LIMITS, 1e-3, 2e-3, 0.0, false).unwrap();
        assert_eq!(timing.divider, 7);
        assert_eq!((timing.low_counter, timing.high_counter), (14286, 28571));
        assert_eq!(timing.initial_divider, 100000);
        assert_eq!(timing.initial_counter, 1);
    }

    #[test]
    fn rejects_invalid_timing() {
        assert!(matches!(
            PulseTiming::clock(&LIMITS, 0.0, 50.0, 0.0, 0.0),
            Err(DwfError::InvalidOption { option: "frequency", .. })
        ));
        assert!(matches!(
            PulseTiming::clock(&LIMITS, 1e3, 150.0, 0.0, 0.0),
            Err(DwfError::InvalidOption { option: "duty_cycle", .. })
        ));
        assert!(PulseTiming::pulse(&LIMITS, 0.0, 0.0, 0.0, false).is_err());
        assert!(PulseTiming::pulse(&LIMITS, -1e-3, 1e-3, 0.0, false).is_err());
    }
}
