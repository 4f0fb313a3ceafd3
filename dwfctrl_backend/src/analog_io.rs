//! Analog IO unit: power supplies, voltage references and the device's internal monitors.
//!
//! Channels and their nodes are discovered when the device is opened. Channels are labeled with
//! the short label the driver reports (`"V+"`, `"USB"`, ...); nodes with the node name
//! (`"Enable"`, `"Voltage"`, ...). Node values written with [`AnalogIoNode::set_value`] take
//! effect after [`AnalogIo::configure`] unless the device applies them immediately; readings
//! returned by [`AnalogIoNode::status`] reflect the last [`AnalogIo::read_status`].

use std::sync::Arc;

use dwf_backend::*;
use libc::c_int;

use crate::registry::{Address, Registry};
use crate::unit::*;

/// Value range of a node: `min`, `max` and the number of discrete steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NodeRange {
    pub min: f64,
    pub max: f64,
    pub steps: usize,
}

impl From<(f64, f64, c_int)> for NodeRange {
    fn from((min, max, steps): (f64, f64, c_int)) -> Self {
        Self {
            min,
            max,
            steps: steps.max(0) as usize,
        }
    }
}

/// A settable or readable quantity of an analog IO channel.
pub struct AnalogIoNode {
    session: Arc<Session>,
    channel: c_int,
    index: usize,
    name: String,
    unit: String,
}

impl BaseUnit for AnalogIoNode {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl AnalogIoNode {
    pub fn index(&self) -> usize {
        self.index
    }

    /// Name reported by the driver, e.g. `"Voltage"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit of the node value, e.g. `"V"`.
    pub fn unit(&self) -> &str {
        &self.unit
    }

    fn raw_node(&self) -> c_int {
        self.index as c_int
    }

    pub fn node_type(&self) -> Result<AnalogIoNodeType> {
        AnalogIoNodeType::try_from(self.dwf().analog_io_channel_node_info(
            self.hdwf()?,
            self.channel,
            self.raw_node(),
        )?)
    }

    /// Range accepted by [`AnalogIoNode::set_value`]. `max == min` for read-only nodes.
    pub fn value_info(&self) -> Result<NodeRange> {
        Ok(self
            .dwf()
            .analog_io_channel_node_set_info(self.hdwf()?, self.channel, self.raw_node())?
            .into())
    }

    pub fn value(&self) -> Result<f64> {
        self.dwf()
            .analog_io_channel_node_get(self.hdwf()?, self.channel, self.raw_node())
    }

    pub fn set_value(&self, value: f64) -> Result<()> {
        self.dwf()
            .analog_io_channel_node_set(self.hdwf()?, self.channel, self.raw_node(), value)
    }

    pub fn status_info(&self) -> Result<NodeRange> {
        Ok(self
            .dwf()
            .analog_io_channel_node_status_info(self.hdwf()?, self.channel, self.raw_node())?
            .into())
    }

    /// Value measured by the last [`AnalogIo::read_status`].
    pub fn status(&self) -> Result<f64> {
        self.dwf()
            .analog_io_channel_node_status(self.hdwf()?, self.channel, self.raw_node())
    }
}

/// One analog IO channel, e.g. a power supply.
pub struct AnalogIoChannel {
    session: Arc<Session>,
    index: usize,
    name: String,
    nodes: Registry<AnalogIoNode>,
}

impl BaseUnit for AnalogIoChannel {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl BaseChannel for AnalogIoChannel {
    fn index(&self) -> usize {
        self.index
    }
}

impl AnalogIoChannel {
    fn new(session: Arc<Session>, index: usize) -> Result<(String, Self)> {
        let dwf = session.dwf();
        let hdwf = session.hdwf()?;
        let channel = index as c_int;
        let (name, label) = dwf.analog_io_channel_name(hdwf, channel)?;
        let node_count = dwf.analog_io_channel_info(hdwf, channel)?.max(0) as usize;
        let mut nodes = Vec::with_capacity(node_count);
        for node in 0..node_count {
            let (node_name, unit) = dwf.analog_io_channel_node_name(hdwf, channel, node as c_int)?;
            nodes.push((
                node_name.clone(),
                AnalogIoNode {
                    session: session.clone(),
                    channel,
                    index: node,
                    name: node_name,
                    unit,
                },
            ));
        }
        log::debug!("Analog IO channel {} '{}' ({}): {} nodes", index, label, name, node_count);
        Ok((
            label,
            Self {
                nodes: Registry::new(nodes),
                session,
                index,
                name,
            },
        ))
    }

    /// Long name reported by the driver, e.g. `"Positive Supply"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn nodes(&self) -> &Registry<AnalogIoNode> {
        &self.nodes
    }

    pub fn nodes_(&mut self) -> &mut Registry<AnalogIoNode> {
        &mut self.nodes
    }

    pub fn node<'a>(&self, address: impl Into<Address<'a>>) -> Result<&AnalogIoNode> {
        self.nodes.get(address)
    }
}

/// Analog IO unit.
pub struct AnalogIo {
    session: Arc<Session>,
    channels: Registry<AnalogIoChannel>,
}

impl BaseUnit for AnalogIo {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl AnalogIo {
    pub(crate) fn new(session: Arc<Session>, channel_count: usize) -> Result<Self> {
        let channels = (0..channel_count)
            .map(|i| AnalogIoChannel::new(session.clone(), i))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            session,
            channels: Registry::new(channels),
        })
    }

    pub fn channels(&self) -> &Registry<AnalogIoChannel> {
        &self.channels
    }

    pub fn channels_(&mut self) -> &mut Registry<AnalogIoChannel> {
        &mut self.channels
    }

    pub fn channel<'a>(&self, address: impl Into<Address<'a>>) -> Result<&AnalogIoChannel> {
        self.channels.get(address)
    }

    /// Shorthand for `channel(channel)?.node(node)`.
    pub fn node<'a, 'b>(
        &self,
        channel: impl Into<Address<'a>>,
        node: impl Into<Address<'b>>,
    ) -> Result<&AnalogIoNode> {
        self.channel(channel)?.node(node)
    }

    pub fn reset(&self) -> Result<()> {
        self.dwf().analog_io_reset(self.hdwf()?)
    }

    pub fn configure(&self) -> Result<()> {
        self.dwf().analog_io_configure(self.hdwf()?)
    }

    /// Reads the node readings from the device.
    pub fn read_status(&self) -> Result<()> {
        self.dwf().analog_io_status(self.hdwf()?)
    }

    /// Whether the master enable can be set.
    pub fn master_enable_can_set(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().analog_io_enable_info(self.hdwf()?)?.0))
    }

    /// Whether the master enable status can be read back.
    pub fn master_enable_can_read(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().analog_io_enable_info(self.hdwf()?)?.1))
    }

    pub fn master_enable(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().analog_io_enable_get(self.hdwf()?)?))
    }

    pub fn set_master_enable(&self, enabled: bool) -> Result<()> {
        self.dwf().analog_io_enable_set(self.hdwf()?, to_cbool(enabled))
    }

    /// Actual master enable state, e.g. false after an over-current shutdown.
    pub fn master_enable_status(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().analog_io_enable_status(self.hdwf()?)?))
    }
}
