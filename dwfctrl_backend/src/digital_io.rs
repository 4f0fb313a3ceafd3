//! Static digital IO unit.
//!
//! The native interface works on 64-bit masks where bit `i` is DIO line `i`. Each
//! [`DigitalIoChannel`] is one line, labeled `dio0`, `dio1`, ..., and reads or updates its bit
//! of the mask.

use std::sync::Arc;

use dwf_backend::*;

use crate::registry::{Address, Registry};
use crate::unit::*;

/// One DIO line.
pub struct DigitalIoChannel {
    session: Arc<Session>,
    index: usize,
}

impl BaseUnit for DigitalIoChannel {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl BaseChannel for DigitalIoChannel {
    fn index(&self) -> usize {
        self.index
    }
}

impl DigitalIoChannel {
    fn mask(&self) -> u64 {
        1u64 << self.index
    }

    fn with_bit(&self, state: u64, value: bool) -> u64 {
        if value {
            state | self.mask()
        } else {
            state & !self.mask()
        }
    }

    /// Whether the line is driven as an output.
    pub fn output_enabled(&self) -> Result<bool> {
        Ok(self.dwf().digital_io_output_enable_get(self.hdwf()?)? & self.mask() != 0)
    }

    pub fn set_output_enabled(&self, enabled: bool) -> Result<()> {
        let hdwf = self.hdwf()?;
        let state = self.dwf().digital_io_output_enable_get(hdwf)?;
        self.dwf()
            .digital_io_output_enable_set(hdwf, self.with_bit(state, enabled))
    }

    pub fn can_read(&self) -> Result<bool> {
        Ok(self.dwf().digital_io_input_info(self.hdwf()?)? & self.mask() != 0)
    }

    pub fn can_write(&self) -> Result<bool> {
        Ok(self.dwf().digital_io_output_info(self.hdwf()?)? & self.mask() != 0)
    }

    pub fn output_state(&self) -> Result<bool> {
        Ok(self.dwf().digital_io_output_get(self.hdwf()?)? & self.mask() != 0)
    }

    pub fn set_output_state(&self, high: bool) -> Result<()> {
        let hdwf = self.hdwf()?;
        let state = self.dwf().digital_io_output_get(hdwf)?;
        self.dwf().digital_io_output_set(hdwf, self.with_bit(state, high))
    }

    /// Level captured by the last [`DigitalIo::read_status`].
    pub fn input_state(&self) -> Result<bool> {
        Ok(self.dwf().digital_io_input_status(self.hdwf()?)? & self.mask() != 0)
    }

    /// Sets the output enable and level of the line; `configure` pushes them to the device.
    pub fn setup(&self, output_enabled: Option<bool>, state: Option<bool>, configure: bool) -> Result<()> {
        if let Some(enabled) = output_enabled {
            self.set_output_enabled(enabled)?;
        }
        if let Some(state) = state {
            self.set_output_state(state)?;
        }
        if configure {
            self.dwf().digital_io_configure(self.hdwf()?)?;
        }
        Ok(())
    }
}

/// Digital IO unit.
pub struct DigitalIo {
    session: Arc<Session>,
    channels: Registry<DigitalIoChannel>,
}

impl BaseUnit for DigitalIo {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl DigitalIo {
    pub(crate) fn new(session: Arc<Session>, channel_count: usize) -> Self {
        let channels = Registry::from_fn(
            channel_count.min(64),
            |i| format!("dio{}", i),
            |i| DigitalIoChannel {
                session: session.clone(),
                index: i,
            },
        );
        Self { session, channels }
    }

    pub fn channels(&self) -> &Registry<DigitalIoChannel> {
        &self.channels
    }

    pub fn channels_(&mut self) -> &mut Registry<DigitalIoChannel> {
        &mut self.channels
    }

    pub fn channel<'a>(&self, address: impl Into<Address<'a>>) -> Result<&DigitalIoChannel> {
        self.channels.get(address)
    }

    pub fn reset(&self) -> Result<()> {
        self.dwf().digital_io_reset(self.hdwf()?)
    }

    pub fn configure(&self) -> Result<()> {
        self.dwf().digital_io_configure(self.hdwf()?)
    }

    /// Reads the input levels of all lines from the device.
    pub fn read_status(&self) -> Result<()> {
        self.dwf().digital_io_status(self.hdwf()?)
    }

    /// Lines that can be enabled as outputs.
    pub fn output_enable_mask(&self) -> Result<u64> {
        self.dwf().digital_io_output_enable_info(self.hdwf()?)
    }

    pub fn output_enable(&self) -> Result<u64> {
        self.dwf().digital_io_output_enable_get(self.hdwf()?)
    }

    pub fn set_output_enable(&self, mask: u64) -> Result<()> {
        self.dwf().digital_io_output_enable_set(self.hdwf()?, mask)
    }

    /// Lines that can be written.
    pub fn output_state_mask(&self) -> Result<u64> {
        self.dwf().digital_io_output_info(self.hdwf()?)
    }

    pub fn output_state(&self) -> Result<u64> {
        self.dwf().digital_io_output_get(self.hdwf()?)
    }

    pub fn set_output_state(&self, state: u64) -> Result<()> {
        self.dwf().digital_io_output_set(self.hdwf()?, state)
    }

    /// Lines that can be read.
    pub fn input_state_mask(&self) -> Result<u64> {
        self.dwf().digital_io_input_info(self.hdwf()?)
    }

    pub fn input_state(&self) -> Result<u64> {
        self.dwf().digital_io_input_status(self.hdwf()?)
    }
}
