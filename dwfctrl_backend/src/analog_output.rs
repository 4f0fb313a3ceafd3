//! Analog output (arbitrary waveform generator) unit.
//!
//! Every [`AnalogOutputChannel`] owns the nodes the device reports for it: the carrier, and on
//! most devices an FM and an AM node modulating it. Nodes are kept in a [`Registry`] labeled by
//! node type (`carrier`, `fm`, `am`) and can also be looked up with
//! [`AnalogOutputChannel::node_of_type`].
//!
//! Channel level settings (trigger, run, wait and repeat timing, idle output, ...) apply to all
//! nodes of the channel. [`AnalogOutputChannel::setup`], [`AnalogOutputChannel::setup_am`] and
//! [`AnalogOutputChannel::setup_fm`] configure one node in one call.

use std::sync::Arc;

use dwf_backend::*;
use dwf_backend::ffi;
use libc::c_int;

use crate::helpers::wait_for_state;
use crate::registry::{Address, Registry};
use crate::unit::*;

/// Options of the node setups. Unset options leave the current setting.
#[derive(Debug, Clone)]
pub struct WaveformSetup {
    pub function: Option<Function>,
    /// Hz.
    pub frequency: Option<f64>,
    /// Volts for the carrier, percent for the modulation nodes.
    pub amplitude: Option<f64>,
    /// Volts for the carrier, percent for the modulation nodes.
    pub offset: Option<f64>,
    /// Percent.
    pub symmetry: Option<f64>,
    /// Degrees.
    pub phase: Option<f64>,
    /// Custom waveform samples, normalized to -1..+1.
    pub data_samples: Option<Vec<f64>>,
    /// Default `true`.
    pub enabled: bool,
    /// Push the settings to the device. Default `false`.
    pub configure: bool,
    /// Start the generator. Default `false`.
    pub start: bool,
}

impl Default for WaveformSetup {
    fn default() -> Self {
        Self {
            function: None,
            frequency: None,
            amplitude: None,
            offset: None,
            symmetry: None,
            phase: None,
            data_samples: None,
            enabled: true,
            configure: false,
            start: false,
        }
    }
}

impl WaveformSetup {
    fn validate(&self) -> Result<()> {
        if matches!(self.frequency, Some(frequency) if frequency < 0.0) {
            return Err(DwfError::invalid_option("frequency", "must not be negative"));
        }
        if matches!(self.symmetry, Some(symmetry) if !(0.0..=100.0).contains(&symmetry)) {
            return Err(DwfError::invalid_option("symmetry", "must be between 0 and 100 percent"));
        }
        if let Some(samples) = &self.data_samples {
            if samples.iter().any(|sample| !(-1.0..=1.0).contains(sample)) {
                return Err(DwfError::invalid_option("data_samples", "samples must be within -1..+1"));
            }
        }
        Ok(())
    }
}

macro_rules! node_parameter {
    ($(#[$meta:meta])* $name:ident, $set:ident, $info:ident => $native_get:ident, $native_set:ident, $native_info:ident) => {
        $(#[$meta])*
        pub fn $name(&self) -> Result<f64> {
            self.dwf().$native_get(self.hdwf()?, self.channel, self.raw_node())
        }

        pub fn $set(&self, value: f64) -> Result<()> {
            self.dwf().$native_set(self.hdwf()?, self.channel, self.raw_node(), value)
        }

        /// `(min, max)` accepted by the node.
        pub fn $info(&self) -> Result<(f64, f64)> {
            self.dwf().$native_info(self.hdwf()?, self.channel, self.raw_node())
        }
    };
}

/// A carrier or modulation node of an analog output channel.
pub struct AnalogOutputNode {
    session: Arc<Session>,
    channel: c_int,
    node: dwf_backend::AnalogOutNode,
}

impl BaseUnit for AnalogOutputNode {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl AnalogOutputNode {
    pub fn node_type(&self) -> dwf_backend::AnalogOutNode {
        self.node
    }

    fn raw_node(&self) -> ffi::DwfAnalogOutNode {
        self.node.raw()
    }

    pub fn enabled(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().analog_out_node_enable_get(
            self.hdwf()?,
            self.channel,
            self.raw_node(),
        )?))
    }

    pub fn set_enabled(&self, enabled: bool) -> Result<()> {
        self.dwf()
            .analog_out_node_enable_set(self.hdwf()?, self.channel, self.raw_node(), to_cbool(enabled))
    }

    pub fn function_info(&self) -> Result<Vec<Function>> {
        let bits = self
            .dwf()
            .analog_out_node_function_info(self.hdwf()?, self.channel, self.raw_node())?;
        Ok(Function::from_bits(u64::from(bits)))
    }

    pub fn function(&self) -> Result<Function> {
        Function::try_from(self.dwf().analog_out_node_function_get(
            self.hdwf()?,
            self.channel,
            self.raw_node(),
        )?)
    }

    pub fn set_function(&self, function: Function) -> Result<()> {
        self.dwf()
            .analog_out_node_function_set(self.hdwf()?, self.channel, self.raw_node(), function.raw())
    }

    node_parameter! {
        /// Hz.
        frequency, set_frequency, frequency_info =>
        analog_out_node_frequency_get, analog_out_node_frequency_set, analog_out_node_frequency_info
    }
    node_parameter! {
        amplitude, set_amplitude, amplitude_info =>
        analog_out_node_amplitude_get, analog_out_node_amplitude_set, analog_out_node_amplitude_info
    }
    node_parameter! {
        offset, set_offset, offset_info =>
        analog_out_node_offset_get, analog_out_node_offset_set, analog_out_node_offset_info
    }
    node_parameter! {
        /// Percent.
        symmetry, set_symmetry, symmetry_info =>
        analog_out_node_symmetry_get, analog_out_node_symmetry_set, analog_out_node_symmetry_info
    }
    node_parameter! {
        /// Degrees.
        phase, set_phase, phase_info =>
        analog_out_node_phase_get, analog_out_node_phase_set, analog_out_node_phase_info
    }

    /// `(min, max)` number of custom data samples.
    pub fn data_samples_info(&self) -> Result<(usize, usize)> {
        let (min, max) = self
            .dwf()
            .analog_out_node_data_info(self.hdwf()?, self.channel, self.raw_node())?;
        Ok((min.max(0) as usize, max.max(0) as usize))
    }

    /// Play mode buffer state: `(free, lost, corrupted)` samples.
    pub fn play_status(&self) -> Result<(usize, usize, usize)> {
        let (free, lost, corrupted) = self
            .dwf()
            .analog_out_node_play_status(self.hdwf()?, self.channel, self.raw_node())?;
        Ok((free.max(0) as usize, lost.max(0) as usize, corrupted.max(0) as usize))
    }

    /// Custom waveform samples, or the prefill of a play mode buffer.
    pub fn set_data_samples(&self, samples: &[f64]) -> Result<()> {
        self.dwf()
            .analog_out_node_data_set(self.hdwf()?, self.channel, self.raw_node(), samples)
    }

    /// Streams further samples to a node in play mode.
    pub fn set_play_samples(&self, samples: &[f64]) -> Result<()> {
        self.dwf()
            .analog_out_node_play_data(self.hdwf()?, self.channel, self.raw_node(), samples)
    }

    fn apply(&self, setup: &WaveformSetup) -> Result<()> {
        if let Some(function) = setup.function {
            self.set_function(function)?;
        }
        if let Some(frequency) = setup.frequency {
            self.set_frequency(frequency)?;
        }
        if let Some(amplitude) = setup.amplitude {
            self.set_amplitude(amplitude)?;
        }
        if let Some(offset) = setup.offset {
            self.set_offset(offset)?;
        }
        if let Some(symmetry) = setup.symmetry {
            self.set_symmetry(symmetry)?;
        }
        if let Some(phase) = setup.phase {
            self.set_phase(phase)?;
        }
        if let Some(samples) = &setup.data_samples {
            self.set_data_samples(samples)?;
        }
        self.set_enabled(setup.enabled)
    }
}

/// One waveform generator channel.
pub struct AnalogOutputChannel {
    session: Arc<Session>,
    index: usize,
    nodes: Registry<AnalogOutputNode>,
}

impl BaseUnit for AnalogOutputChannel {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl BaseChannel for AnalogOutputChannel {
    fn index(&self) -> usize {
        self.index
    }
}

impl AnalogOutputChannel {
    fn new(session: Arc<Session>, index: usize) -> Result<Self> {
        let available = session
            .dwf()
            .analog_out_node_info(session.hdwf()?, index as c_int)?;
        let nodes = dwf_backend::AnalogOutNode::from_bits(bits(available))
            .into_iter()
            .map(|node| {
                (
                    node.name().to_string(),
                    AnalogOutputNode {
                        session: session.clone(),
                        channel: index as c_int,
                        node,
                    },
                )
            });
        Ok(Self {
            nodes: Registry::new(nodes),
            session,
            index,
        })
    }

    pub fn nodes(&self) -> &Registry<AnalogOutputNode> {
        &self.nodes
    }

    pub fn nodes_(&mut self) -> &mut Registry<AnalogOutputNode> {
        &mut self.nodes
    }

    /// Node by position or label.
    pub fn node<'a>(&self, address: impl Into<Address<'a>>) -> Result<&AnalogOutputNode> {
        self.nodes.get(address)
    }

    /// Node by type, independent of its current label.
    pub fn node_of_type(&self, node: dwf_backend::AnalogOutNode) -> Result<&AnalogOutputNode> {
        self.nodes
            .iter()
            .find(|candidate| candidate.node == node)
            .ok_or_else(|| DwfError::Unsupported(format!("the {} node on channel {}", node, self.index + 1)))
    }

    pub fn trigger_source(&self) -> Result<TriggerSource> {
        TriggerSource::try_from(self.dwf().analog_out_trigger_source_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_trigger_source(&self, source: TriggerSource) -> Result<()> {
        self.dwf()
            .analog_out_trigger_source_set(self.hdwf()?, self.raw_index(), source.raw())
    }

    pub fn trigger_slope(&self) -> Result<TriggerSlope> {
        TriggerSlope::try_from(self.dwf().analog_out_trigger_slope_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_trigger_slope(&self, slope: TriggerSlope) -> Result<()> {
        self.dwf()
            .analog_out_trigger_slope_set(self.hdwf()?, self.raw_index(), slope.raw())
    }

    /// Index of the channel this one is synchronized to.
    pub fn master(&self) -> Result<usize> {
        Ok(self.dwf().analog_out_master_get(self.hdwf()?, self.raw_index())?.max(0) as usize)
    }

    pub fn set_master(&self, master: usize) -> Result<()> {
        self.dwf()
            .analog_out_master_set(self.hdwf()?, self.raw_index(), master as c_int)
    }

    pub fn run_info(&self) -> Result<(f64, f64)> {
        self.dwf().analog_out_run_info(self.hdwf()?, self.raw_index())
    }

    /// Run length in seconds; zero runs forever.
    pub fn run_length(&self) -> Result<f64> {
        self.dwf().analog_out_run_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_run_length(&self, run: f64) -> Result<()> {
        self.dwf().analog_out_run_set(self.hdwf()?, self.raw_index(), run)
    }

    /// Remaining run time of the current cycle.
    pub fn run_status(&self) -> Result<f64> {
        self.dwf().analog_out_run_status(self.hdwf()?, self.raw_index())
    }

    pub fn wait_info(&self) -> Result<(f64, f64)> {
        self.dwf().analog_out_wait_info(self.hdwf()?, self.raw_index())
    }

    pub fn wait_length(&self) -> Result<f64> {
        self.dwf().analog_out_wait_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_wait_length(&self, wait: f64) -> Result<()> {
        self.dwf().analog_out_wait_set(self.hdwf()?, self.raw_index(), wait)
    }

    pub fn repeat_info(&self) -> Result<(c_int, c_int)> {
        self.dwf().analog_out_repeat_info(self.hdwf()?, self.raw_index())
    }

    /// Zero repeats forever.
    pub fn repeat_count(&self) -> Result<c_int> {
        self.dwf().analog_out_repeat_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_repeat_count(&self, repeat: c_int) -> Result<()> {
        self.dwf().analog_out_repeat_set(self.hdwf()?, self.raw_index(), repeat)
    }

    pub fn repeat_status(&self) -> Result<c_int> {
        self.dwf().analog_out_repeat_status(self.hdwf()?, self.raw_index())
    }

    /// Wait for a trigger before every repetition.
    pub fn repeat_trigger(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().analog_out_repeat_trigger_get(self.hdwf()?, self.raw_index())?))
    }

    pub fn set_repeat_trigger(&self, repeat_trigger: bool) -> Result<()> {
        self.dwf()
            .analog_out_repeat_trigger_set(self.hdwf()?, self.raw_index(), to_cbool(repeat_trigger))
    }

    pub fn limitation_info(&self) -> Result<(f64, f64)> {
        self.dwf().analog_out_limitation_info(self.hdwf()?, self.raw_index())
    }

    /// Voltage or current limit, depending on the mode.
    pub fn limitation(&self) -> Result<f64> {
        self.dwf().analog_out_limitation_get(self.hdwf()?, self.raw_index())
    }

    pub fn set_limitation(&self, limit: f64) -> Result<()> {
        self.dwf()
            .analog_out_limitation_set(self.hdwf()?, self.raw_index(), limit)
    }

    pub fn mode(&self) -> Result<AnalogOutMode> {
        AnalogOutMode::try_from(self.dwf().analog_out_mode_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_mode(&self, mode: AnalogOutMode) -> Result<()> {
        self.dwf()
            .analog_out_mode_set(self.hdwf()?, self.raw_index(), mode.raw())
    }

    pub fn idle_info(&self) -> Result<Vec<AnalogOutIdle>> {
        Ok(AnalogOutIdle::from_bits(bits(
            self.dwf().analog_out_idle_info(self.hdwf()?, self.raw_index())?,
        )))
    }

    pub fn idle(&self) -> Result<AnalogOutIdle> {
        AnalogOutIdle::try_from(self.dwf().analog_out_idle_get(self.hdwf()?, self.raw_index())?)
    }

    pub fn set_idle(&self, idle: AnalogOutIdle) -> Result<()> {
        self.dwf()
            .analog_out_idle_set(self.hdwf()?, self.raw_index(), idle.raw())
    }

    pub fn reset(&self) -> Result<()> {
        self.dwf().analog_out_reset(self.hdwf()?, self.raw_index())
    }

    /// Pushes the settings to the device and optionally starts the generator.
    pub fn configure(&self, start: bool) -> Result<()> {
        self.dwf()
            .analog_out_configure(self.hdwf()?, self.raw_index(), to_cbool(start))
    }

    /// Applies changed settings to a running generator without restarting it.
    pub fn apply(&self) -> Result<()> {
        self.dwf().analog_out_configure(self.hdwf()?, self.raw_index(), 3)
    }

    pub fn read_status(&self) -> Result<State> {
        State::try_from(self.dwf().analog_out_status(self.hdwf()?, self.raw_index())?)
    }

    pub fn wait_for_status(&self, state: State) -> Result<()> {
        wait_for_state(state, || self.read_status())
    }

    /// Sets up the carrier node.
    pub fn setup(&self, setup: &WaveformSetup) -> Result<()> {
        self.setup_node(dwf_backend::AnalogOutNode::Carrier, setup)
    }

    /// Sets up the amplitude modulation node.
    pub fn setup_am(&self, setup: &WaveformSetup) -> Result<()> {
        self.setup_node(dwf_backend::AnalogOutNode::Am, setup)
    }

    /// Sets up the frequency modulation node.
    pub fn setup_fm(&self, setup: &WaveformSetup) -> Result<()> {
        self.setup_node(dwf_backend::AnalogOutNode::Fm, setup)
    }

    fn setup_node(&self, node: dwf_backend::AnalogOutNode, setup: &WaveformSetup) -> Result<()> {
        setup.validate()?;
        self.node_of_type(node)?.apply(setup)?;
        if setup.configure || setup.start {
            self.configure(setup.start)?;
        }
        Ok(())
    }
}

/// Analog output unit.
pub struct AnalogOutput {
    session: Arc<Session>,
    channels: Registry<AnalogOutputChannel>,
}

impl BaseUnit for AnalogOutput {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl AnalogOutput {
    pub(crate) fn new(session: Arc<Session>, channel_count: usize) -> Result<Self> {
        let channels = (0..channel_count)
            .map(|i| Ok((format!("ch{}", i + 1), AnalogOutputChannel::new(session.clone(), i)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            session,
            channels: Registry::new(channels),
        })
    }

    pub fn channels(&self) -> &Registry<AnalogOutputChannel> {
        &self.channels
    }

    pub fn channels_(&mut self) -> &mut Registry<AnalogOutputChannel> {
        &mut self.channels
    }

    pub fn channel<'a>(&self, address: impl Into<Address<'a>>) -> Result<&AnalogOutputChannel> {
        self.channels.get(address)
    }

    pub fn channel_<'a>(&mut self, address: impl Into<Address<'a>>) -> Result<&mut AnalogOutputChannel> {
        self.channels.get_mut(address)
    }

    /// Stops and resets every channel.
    pub fn reset(&self) -> Result<()> {
        for channel in &self.channels {
            channel.reset()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn waveform_options_are_validated() {
        assert!(WaveformSetup::default().validate().is_ok());
        let setup = WaveformSetup {
            symmetry: Some(120.0),
            ..Default::default()
        };
        assert!(matches!(
            setup.validate(),
            Err(DwfError::InvalidOption { option: "symmetry", .. })
        ));
        let setup = WaveformSetup {
            data_samples: Some(vec![0.0, 0.5, -1.5]),
            ..Default::default()
        };
        assert!(setup.validate().is_err());
    }
}
