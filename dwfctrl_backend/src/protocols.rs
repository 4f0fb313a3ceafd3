//! Serial protocol engines running on the digital lines.
//!
//! The engines share the DIO lines with the digital IO, input and output units. Pins are DIO
//! indices. Every engine keeps the pins and settings it was last set up with, since the driver
//! offers no way to read them back.

use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use dwf_backend::*;
use libc::{c_int, c_uchar, c_uint, c_ushort};

use crate::unit::*;

/// UART parity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Parity {
    None,
    Odd,
    Even,
    /// Parity bit always high.
    Mark,
    /// Parity bit always low.
    Space,
}

impl Parity {
    fn raw(self) -> c_int {
        match self {
            Parity::None => 0,
            Parity::Odd => 1,
            Parity::Even => 2,
            Parity::Mark => 3,
            Parity::Space => 4,
        }
    }
}

impl FromStr for Parity {
    type Err = DwfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "n" | "no" | "none" => Ok(Parity::None),
            "o" | "odd" => Ok(Parity::Odd),
            "e" | "even" => Ok(Parity::Even),
            "m" | "mark" => Ok(Parity::Mark),
            "s" | "space" => Ok(Parity::Space),
            _ => Err(DwfError::invalid_option(
                "parity",
                format!("'{}' is not one of: none, odd, even, mark, space", s),
            )),
        }
    }
}

impl fmt::Display for Parity {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let name = match self {
            Parity::None => "none",
            Parity::Odd => "odd",
            Parity::Even => "even",
            Parity::Mark => "mark",
            Parity::Space => "space",
        };
        write!(f, "{}", name)
    }
}

/// Options of [`Uart::setup`].
#[derive(Debug, Clone)]
pub struct UartSetup {
    /// Receive pin; the receiver is started when set.
    pub pin_rx: Option<usize>,
    /// Transmit pin; the transmitter is started when set.
    pub pin_tx: Option<usize>,
    /// Baud rate. Default 9600.
    pub rate: f64,
    /// Default 8.
    pub data_bits: u32,
    /// Default 1.
    pub stop_bits: f64,
    /// Default [`Parity::None`].
    pub parity: Parity,
    /// Inverted line levels. Default `false`.
    pub inverted: bool,
}

impl Default for UartSetup {
    fn default() -> Self {
        Self {
            pin_rx: None,
            pin_tx: None,
            rate: 9600.0,
            data_bits: 8,
            stop_bits: 1.0,
            parity: Parity::None,
            inverted: false,
        }
    }
}

fn pin(option: &'static str, pin: usize) -> Result<c_int> {
    c_int::try_from(pin).map_err(|_| DwfError::invalid_option(option, format!("pin {} is out of range", pin)))
}

/// UART engine.
pub struct Uart {
    session: Arc<Session>,
    setup: Option<UartSetup>,
}

impl BaseUnit for Uart {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl Uart {
    /// Settings of the last [`Uart::setup`], `None` after a reset.
    pub fn current_setup(&self) -> Option<&UartSetup> {
        self.setup.as_ref()
    }

    pub fn reset(&mut self) -> Result<()> {
        self.dwf().uart_reset(self.hdwf()?)?;
        self.setup = None;
        Ok(())
    }

    pub fn setup(&mut self, setup: &UartSetup) -> Result<()> {
        if !(setup.rate > 0.0) {
            return Err(DwfError::invalid_option("rate", "must be positive"));
        }
        let hdwf = self.hdwf()?;
        let dwf = self.dwf();
        if let Some(rx) = setup.pin_rx {
            dwf.uart_rx_set(hdwf, pin("pin_rx", rx)?)?;
        }
        if let Some(tx) = setup.pin_tx {
            dwf.uart_tx_set(hdwf, pin("pin_tx", tx)?)?;
        }
        dwf.uart_rate_set(hdwf, setup.rate)?;
        dwf.uart_bits_set(hdwf, setup.data_bits as c_int)?;
        dwf.uart_stop_set(hdwf, setup.stop_bits)?;
        dwf.uart_parity_set(hdwf, setup.parity.raw())?;
        dwf.uart_polarity_set(hdwf, to_cbool(setup.inverted))?;
        if setup.pin_rx.is_some() {
            dwf.uart_rx(hdwf, &mut [])?;
        }
        if setup.pin_tx.is_some() {
            dwf.uart_tx(hdwf, &[])?;
        }
        self.setup = Some(setup.clone());
        Ok(())
    }

    /// Bytes received since the last read, up to `buffer_size`, and the parity error flag.
    pub fn read(&self, buffer_size: usize) -> Result<(Vec<u8>, bool)> {
        let mut buffer = vec![0u8; buffer_size];
        let (received, parity) = self.dwf().uart_rx(self.hdwf()?, &mut buffer)?;
        buffer.truncate(received);
        Ok((buffer, parity != 0))
    }

    pub fn write(&self, data: &[u8]) -> Result<()> {
        self.dwf().uart_tx(self.hdwf()?, data)
    }
}

/// Data line arrangement of an SPI transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpiLines {
    /// One bidirectional line (SISO, three-wire).
    ThreeWire,
    /// MOSI on DQ0, MISO on DQ1.
    Standard,
    Dual,
    Quad,
}

impl SpiLines {
    fn raw(self) -> c_int {
        match self {
            SpiLines::ThreeWire => 0,
            SpiLines::Standard => 1,
            SpiLines::Dual => 2,
            SpiLines::Quad => 3,
        }
    }
}

/// Chip select level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectLevel {
    Low,
    High,
    /// High impedance.
    Released,
}

impl SelectLevel {
    fn raw(self) -> c_int {
        match self {
            SelectLevel::Low => 0,
            SelectLevel::High => 1,
            SelectLevel::Released => -1,
        }
    }
}

impl FromStr for SelectLevel {
    type Err = DwfError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "low" => Ok(SelectLevel::Low),
            "h" | "high" => Ok(SelectLevel::High),
            "z" | "release" | "released" => Ok(SelectLevel::Released),
            _ => Err(DwfError::invalid_option(
                "level",
                format!("'{}' is not one of: low, high, release", s),
            )),
        }
    }
}

/// Word types of the SPI buffer transfers.
pub trait SpiWord: Copy + Default {
    const BITS: u32;

    fn read(dwf: &Dwf, hdwf: Hdwf, lines: c_int, bits: c_int, rx: &mut [Self]) -> Result<()>;
    fn write(dwf: &Dwf, hdwf: Hdwf, lines: c_int, bits: c_int, tx: &[Self]) -> Result<()>;
    fn write_read(dwf: &Dwf, hdwf: Hdwf, lines: c_int, bits: c_int, tx: &[Self], rx: &mut [Self]) -> Result<()>;
}

macro_rules! spi_word {
    ($word:ty, $bits:expr, $read:ident, $write:ident, $write_read:ident) => {
        impl SpiWord for $word {
            const BITS: u32 = $bits;

            fn read(dwf: &Dwf, hdwf: Hdwf, lines: c_int, bits: c_int, rx: &mut [Self]) -> Result<()> {
                dwf.$read(hdwf, lines, bits, rx)
            }

            fn write(dwf: &Dwf, hdwf: Hdwf, lines: c_int, bits: c_int, tx: &[Self]) -> Result<()> {
                dwf.$write(hdwf, lines, bits, tx)
            }

            fn write_read(
                dwf: &Dwf,
                hdwf: Hdwf,
                lines: c_int,
                bits: c_int,
                tx: &[Self],
                rx: &mut [Self],
            ) -> Result<()> {
                dwf.$write_read(hdwf, lines, bits, tx, rx)
            }
        }
    };
}

spi_word!(c_uchar, 8, spi_read, spi_write, spi_write_read);
spi_word!(c_ushort, 16, spi_read16, spi_write16, spi_write_read16);
spi_word!(c_uint, 32, spi_read32, spi_write32, spi_write_read32);

/// Options of [`Spi::setup`].
#[derive(Debug, Clone)]
pub struct SpiSetup {
    pub lines: SpiLines,
    pub pin_clock: usize,
    /// DQ0 to DQ3 pins. Standard mode uses DQ0 as MOSI and DQ1 as MISO.
    pub pin_data: [Option<usize>; 4],
    pub pin_select: Option<usize>,
    /// Clock frequency in Hz; unchanged when `None`.
    pub frequency: Option<f64>,
    /// SPI mode 0 to 3: polarity in bit 1, phase in bit 0. Default 0.
    pub mode: u8,
    /// Default `true`.
    pub msb_first: bool,
}

impl SpiSetup {
    /// MOSI/MISO wiring.
    pub fn standard(pin_clock: usize, pin_mosi: usize, pin_miso: Option<usize>) -> Self {
        Self {
            lines: SpiLines::Standard,
            pin_clock,
            pin_data: [Some(pin_mosi), pin_miso, None, None],
            pin_select: None,
            frequency: None,
            mode: 0,
            msb_first: true,
        }
    }

    pub fn three_wire(pin_clock: usize, pin_siso: usize) -> Self {
        Self {
            lines: SpiLines::ThreeWire,
            pin_data: [Some(pin_siso), None, None, None],
            ..Self::standard(pin_clock, pin_siso, None)
        }
    }

    pub fn dual(pin_clock: usize, pin_dq0: usize, pin_dq1: usize) -> Self {
        Self {
            lines: SpiLines::Dual,
            pin_data: [Some(pin_dq0), Some(pin_dq1), None, None],
            ..Self::standard(pin_clock, pin_dq0, None)
        }
    }

    pub fn quad(pin_clock: usize, pin_data: [usize; 4]) -> Self {
        Self {
            lines: SpiLines::Quad,
            pin_data: pin_data.map(Some),
            ..Self::standard(pin_clock, pin_data[0], None)
        }
    }

    pub fn with_select(self, pin_select: usize) -> Self {
        Self {
            pin_select: Some(pin_select),
            ..self
        }
    }

    pub fn with_frequency(self, frequency: f64) -> Self {
        Self {
            frequency: Some(frequency),
            ..self
        }
    }
}

/// SPI master engine.
pub struct Spi {
    session: Arc<Session>,
    lines: SpiLines,
    pin_select: Option<usize>,
}

impl BaseUnit for Spi {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl Spi {
    /// Line arrangement used when a transfer does not name one.
    pub fn lines(&self) -> SpiLines {
        self.lines
    }

    pub fn pin_select(&self) -> Option<usize> {
        self.pin_select
    }

    pub fn reset(&mut self) -> Result<()> {
        self.dwf().spi_reset(self.hdwf()?)?;
        self.lines = SpiLines::Standard;
        self.pin_select = None;
        Ok(())
    }

    pub fn setup(&mut self, setup: &SpiSetup) -> Result<()> {
        if setup.mode > 3 {
            return Err(DwfError::invalid_option("mode", "must be between 0 and 3"));
        }
        let hdwf = self.hdwf()?;
        let dwf = self.dwf();
        dwf.spi_clock_set(hdwf, pin("pin_clock", setup.pin_clock)?)?;
        for (dq, data) in setup.pin_data.iter().enumerate() {
            if let Some(data) = data {
                dwf.spi_data_set(hdwf, dq as c_int, pin("pin_data", *data)?)?;
            }
        }
        if let Some(frequency) = setup.frequency {
            dwf.spi_frequency_set(hdwf, frequency)?;
        }
        dwf.spi_mode_set(hdwf, c_int::from(setup.mode))?;
        dwf.spi_order_set(hdwf, to_cbool(setup.msb_first))?;
        self.lines = setup.lines;
        if setup.pin_select.is_some() {
            self.pin_select = setup.pin_select;
        }
        Ok(())
    }

    /// Idle level of data line `dq`.
    pub fn set_idle(&self, dq: usize, idle: DigitalOutIdle) -> Result<()> {
        self.dwf().spi_idle_set(self.hdwf()?, dq as c_int, idle.raw())
    }

    /// Delays in clock periods: before the first word, after the command word, between words
    /// and after the last word.
    pub fn set_delays(&self, start: u32, command: u32, word: u32, stop: u32) -> Result<()> {
        self.dwf().spi_delay_set(
            self.hdwf()?,
            start as c_int,
            command as c_int,
            word as c_int,
            stop as c_int,
        )
    }

    /// Assigns a select pin the engine drives automatically, with its idle level.
    pub fn set_auto_select(&self, pin_select: usize, idle_high: bool) -> Result<()> {
        self.dwf()
            .spi_select_set(self.hdwf()?, pin("pin_select", pin_select)?, to_cbool(idle_high))
    }

    /// Drives a chip select line; `pin_select` defaults to the configured one.
    pub fn select(&self, level: SelectLevel, pin_select: Option<usize>) -> Result<()> {
        let select = pin_select
            .or(self.pin_select)
            .ok_or_else(|| DwfError::invalid_option("pin_select", "no select pin is configured"))?;
        self.dwf()
            .spi_select(self.hdwf()?, pin("pin_select", select)?, level.raw())
    }

    fn transfer_args(&self, lines: Option<SpiLines>, bits_per_word: u32, max_bits: u32) -> Result<(c_int, c_int)> {
        if bits_per_word == 0 || bits_per_word > max_bits {
            return Err(DwfError::invalid_option(
                "bits_per_word",
                format!("must be between 1 and {}", max_bits),
            ));
        }
        Ok((lines.unwrap_or(self.lines).raw(), bits_per_word as c_int))
    }

    /// Receives one word of up to 32 bits.
    pub fn read_one(&self, lines: Option<SpiLines>, bits_per_word: u32) -> Result<u32> {
        let (lines, bits) = self.transfer_args(lines, bits_per_word, 32)?;
        self.dwf().spi_read_one(self.hdwf()?, lines, bits)
    }

    /// Transmits one word of up to 32 bits.
    pub fn write_one(&self, word: u32, lines: Option<SpiLines>, bits_per_word: u32) -> Result<()> {
        let (lines, bits) = self.transfer_args(lines, bits_per_word, 32)?;
        self.dwf().spi_write_one(self.hdwf()?, lines, bits, word)
    }

    /// Receives `count` words. The word type picks the 8, 16 or 32-bit transfer.
    pub fn read<W: SpiWord>(&self, count: usize, lines: Option<SpiLines>, bits_per_word: u32) -> Result<Vec<W>> {
        let (lines, bits) = self.transfer_args(lines, bits_per_word, W::BITS)?;
        let mut rx = vec![W::default(); count];
        W::read(self.dwf(), self.hdwf()?, lines, bits, &mut rx)?;
        Ok(rx)
    }

    pub fn write<W: SpiWord>(&self, words: &[W], lines: Option<SpiLines>, bits_per_word: u32) -> Result<()> {
        let (lines, bits) = self.transfer_args(lines, bits_per_word, W::BITS)?;
        W::write(self.dwf(), self.hdwf()?, lines, bits, words)
    }

    /// Transmits `words`, then receives `count` words.
    pub fn write_read<W: SpiWord>(
        &self,
        words: &[W],
        count: usize,
        lines: Option<SpiLines>,
        bits_per_word: u32,
    ) -> Result<Vec<W>> {
        let (lines, bits) = self.transfer_args(lines, bits_per_word, W::BITS)?;
        let mut rx = vec![W::default(); count];
        W::write_read(self.dwf(), self.hdwf()?, lines, bits, words, &mut rx)?;
        Ok(rx)
    }
}

/// Options of [`I2c::setup`].
#[derive(Debug, Clone)]
pub struct I2cSetup {
    pub pin_scl: usize,
    pub pin_sda: usize,
    /// Bus rate in Hz; unchanged when `None` (driver default 100 kHz).
    pub rate: Option<f64>,
    /// NAK the last byte of a read.
    pub read_nak: Option<bool>,
    /// Allow clock stretching.
    pub stretch: Option<bool>,
    /// Bus timeout in seconds.
    pub timeout: Option<f64>,
}

impl I2cSetup {
    pub fn new(pin_scl: usize, pin_sda: usize) -> Self {
        Self {
            pin_scl,
            pin_sda,
            rate: None,
            read_nak: None,
            stretch: None,
            timeout: None,
        }
    }
}

/// Result of an I2C transfer: the bytes read and the index of the first byte that was not
/// acknowledged, `None` when every byte was.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct I2cTransfer {
    pub data: Vec<u8>,
    pub nak: Option<usize>,
}

fn nak_index(nak: c_int) -> Option<usize> {
    (nak > 0).then(|| nak as usize)
}

/// I2C master engine.
pub struct I2c {
    session: Arc<Session>,
}

impl BaseUnit for I2c {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl I2c {
    pub fn reset(&self) -> Result<()> {
        self.dwf().i2c_reset(self.hdwf()?)
    }

    pub fn setup(&self, setup: &I2cSetup) -> Result<()> {
        let hdwf = self.hdwf()?;
        let dwf = self.dwf();
        dwf.i2c_scl_set(hdwf, pin("pin_scl", setup.pin_scl)?)?;
        dwf.i2c_sda_set(hdwf, pin("pin_sda", setup.pin_sda)?)?;
        if let Some(rate) = setup.rate {
            dwf.i2c_rate_set(hdwf, rate)?;
        }
        if let Some(read_nak) = setup.read_nak {
            dwf.i2c_read_nak_set(hdwf, to_cbool(read_nak))?;
        }
        if let Some(stretch) = setup.stretch {
            dwf.i2c_stretch_set(hdwf, to_cbool(stretch))?;
        }
        if let Some(timeout) = setup.timeout {
            dwf.i2c_timeout_set(hdwf, timeout)?;
        }
        Ok(())
    }

    /// Releases a stuck bus. Returns `true` when both lines are high afterwards.
    pub fn clear(&self) -> Result<bool> {
        Ok(from_cbool(self.dwf().i2c_clear(self.hdwf()?)?))
    }

    /// Writes a single byte; returns the NAK index.
    pub fn write_one(&self, address: u8, byte: u8) -> Result<Option<usize>> {
        Ok(nak_index(self.dwf().i2c_write_one(self.hdwf()?, address, byte)?))
    }

    pub fn read(&self, address: u8, count: usize) -> Result<I2cTransfer> {
        let mut data = vec![0u8; count];
        let nak = self.dwf().i2c_read(self.hdwf()?, address, &mut data)?;
        Ok(I2cTransfer {
            data,
            nak: nak_index(nak),
        })
    }

    /// Returns the NAK index.
    pub fn write(&self, address: u8, data: &[u8]) -> Result<Option<usize>> {
        Ok(nak_index(self.dwf().i2c_write(self.hdwf()?, address, data)?))
    }

    /// Writes `data` then reads `count` bytes with a repeated start.
    pub fn write_read(&self, address: u8, data: &[u8], count: usize) -> Result<I2cTransfer> {
        let mut rx = vec![0u8; count];
        let nak = self.dwf().i2c_write_read(self.hdwf()?, address, data, &mut rx)?;
        Ok(I2cTransfer {
            data: rx,
            nak: nak_index(nak),
        })
    }
}

/// Options of [`Can::setup`].
#[derive(Debug, Clone, Default)]
pub struct CanSetup {
    pub pin_rx: Option<usize>,
    pub pin_tx: Option<usize>,
    /// Bit rate in Hz; unchanged when `None`.
    pub rate: Option<f64>,
    /// Inverted polarity. Default `false`.
    pub inverted: bool,
}

/// CAN engine.
pub struct Can {
    session: Arc<Session>,
}

impl BaseUnit for Can {
    fn session(&self) -> &Arc<Session> {
        &self.session
    }
}

impl Can {
    pub fn reset(&self) -> Result<()> {
        self.dwf().can_reset(self.hdwf()?)
    }

    /// Applies the settings and starts the receiver and transmitter.
    pub fn setup(&self, setup: &CanSetup) -> Result<()> {
        let hdwf = self.hdwf()?;
        let dwf = self.dwf();
        if let Some(rx) = setup.pin_rx {
            dwf.can_rx_set(hdwf, pin("pin_rx", rx)?)?;
        }
        if let Some(tx) = setup.pin_tx {
            dwf.can_tx_set(hdwf, pin("pin_tx", tx)?)?;
        }
        if let Some(rate) = setup.rate {
            dwf.can_rate_set(hdwf, rate)?;
        }
        dwf.can_polarity_set(hdwf, to_cbool(setup.inverted))?;
        dwf.can_rx(hdwf)?;
        dwf.can_tx(hdwf, -1, false, false, &[])
    }

    /// Polls for a received frame. The payload holds `dlc` bytes; `status` 0 means no frame.
    pub fn read(&self) -> Result<CanFrame> {
        self.dwf().can_rx(self.hdwf()?)
    }

    pub fn write(&self, id: u32, extended: bool, remote: bool, data: &[u8]) -> Result<()> {
        if data.len() > 8 {
            return Err(DwfError::invalid_option("data", "a CAN frame carries at most 8 bytes"));
        }
        let id = c_int::try_from(id).map_err(|_| DwfError::invalid_option("id", "out of range"))?;
        self.dwf().can_tx(self.hdwf()?, id, extended, remote, data)
    }
}

/// The protocol engines of a device.
pub struct Protocols {
    uart: Uart,
    spi: Spi,
    i2c: I2c,
    can: Can,
}

impl Protocols {
    pub(crate) fn new(session: Arc<Session>) -> Self {
        Self {
            uart: Uart {
                session: session.clone(),
                setup: None,
            },
            spi: Spi {
                session: session.clone(),
                lines: SpiLines::Standard,
                pin_select: None,
            },
            i2c: I2c {
                session: session.clone(),
            },
            can: Can { session },
        }
    }

    pub fn uart(&self) -> &Uart {
        &self.uart
    }

    pub fn uart_(&mut self) -> &mut Uart {
        &mut self.uart
    }

    pub fn spi(&self) -> &Spi {
        &self.spi
    }

    pub fn spi_(&mut self) -> &mut Spi {
        &mut self.spi
    }

    pub fn i2c(&self) -> &I2c {
        &self.i2c
    }

    pub fn can(&self) -> &Can {
        &self.can
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_parity_names() {
        assert_eq!("n".parse::<Parity>().unwrap(), Parity::None);
        assert_eq!("Odd".parse::<Parity>().unwrap(), Parity::Odd);
        assert_eq!("e".parse::<Parity>().unwrap().raw(), 2);
        assert!(matches!(
            "x".parse::<Parity>(),
            Err(DwfError::InvalidOption { option: "parity", .. })
        ));
    }

    #[test]
    fn parses_select_levels() {
        assert_eq!("z".parse::<SelectLevel>().unwrap().raw(), -1);
        assert_eq!("low".parse::<SelectLevel>().unwrap(), SelectLevel::Low);
        assert_eq!("H".parse::<SelectLevel>().unwrap(), SelectLevel::High);
    }

    #[test]
    fn spi_wiring_presets() {
        let quad = SpiSetup::quad(0, [1, 2, 3, 4]).with_select(5);
        assert_eq!(quad.lines.raw(), 3);
        assert_eq!(quad.pin_data, [Some(1), Some(2), Some(3), Some(4)]);
        assert_eq!(quad.pin_select, Some(5));
        assert!(quad.msb_first);

        let three_wire = SpiSetup::three_wire(0, 1);
        assert_eq!(three_wire.lines, SpiLines::ThreeWire);
        assert_eq!(three_wire.pin_data, [Some(1), None, None, None]);
    }

    #[test]
    fn nak_zero_means_acknowledged() {
        assert_eq!(nak_index(0), None);
        assert_eq!(nak_index(2), Some(2));
    }
}
