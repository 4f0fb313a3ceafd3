//! Protocol engines built on the digital lines: UART, SPI, I2C and CAN
//! (`FDwfDigitalUart*`, `FDwfDigitalSpi*`, `FDwfDigitalI2c*`, `FDwfDigitalCan*`).

use libc::{c_char, c_double, c_int, c_uchar, c_uint, c_ushort};

use crate::dwf::Dwf;
use crate::error::Result;
use crate::ffi::*;

/// A frame received by the CAN engine.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CanFrame {
    pub id: c_int,
    pub extended: bool,
    pub remote: bool,
    pub data: Vec<u8>,
    /// Receiver status: 0 no data, 1 data received, 2 bit stuffing error, 3 CRC error.
    pub status: c_int,
}

// SPI transfers exist in 8, 16 and 32-bit word flavours that differ only in the buffer type.
macro_rules! spi_transfers {
    ($word:ty, $write_read:ident = $nwr:ident, $read:ident = $nr:ident, $write:ident = $nw:ident) => {
        pub fn $write_read(
            &self,
            hdwf: Hdwf,
            dq: c_int,
            bits_per_word: c_int,
            tx: &[$word],
            rx: &mut [$word],
        ) -> Result<()> {
            dwf_call!(
                self,
                $nwr(
                    hdwf,
                    dq,
                    bits_per_word,
                    tx.as_ptr() as *mut $word,
                    tx.len() as c_int,
                    rx.as_mut_ptr(),
                    rx.len() as c_int
                )
            )
        }

        pub fn $read(&self, hdwf: Hdwf, dq: c_int, bits_per_word: c_int, rx: &mut [$word]) -> Result<()> {
            dwf_call!(self, $nr(hdwf, dq, bits_per_word, rx.as_mut_ptr(), rx.len() as c_int))
        }

        pub fn $write(&self, hdwf: Hdwf, dq: c_int, bits_per_word: c_int, tx: &[$word]) -> Result<()> {
            dwf_call!(
                self,
                $nw(hdwf, dq, bits_per_word, tx.as_ptr() as *mut $word, tx.len() as c_int)
            )
        }
    };
}

impl Dwf {
    dwf_fn! {
        uart_reset(hdwf: Hdwf) = FDwfDigitalUartReset;
        uart_rate_set(hdwf: Hdwf, hz: c_double) = FDwfDigitalUartRateSet;
        uart_bits_set(hdwf: Hdwf, bits: c_int) = FDwfDigitalUartBitsSet;
        /// 0 none, 1 odd, 2 even, 3 mark (high), 4 space (low).
        uart_parity_set(hdwf: Hdwf, parity: c_int) = FDwfDigitalUartParitySet;
        uart_polarity_set(hdwf: Hdwf, polarity: c_int) = FDwfDigitalUartPolaritySet;
        uart_stop_set(hdwf: Hdwf, stop_bits: c_double) = FDwfDigitalUartStopSet;
        uart_tx_set(hdwf: Hdwf, idx_channel: c_int) = FDwfDigitalUartTxSet;
        uart_rx_set(hdwf: Hdwf, idx_channel: c_int) = FDwfDigitalUartRxSet;
    }

    pub fn uart_tx(&self, hdwf: Hdwf, data: &[u8]) -> Result<()> {
        dwf_call!(
            self,
            FDwfDigitalUartTx(hdwf, data.as_ptr() as *mut c_char, data.len() as c_int)
        )
    }

    /// Reads up to `rx.len()` received bytes, returning the count and the parity error flag.
    ///
    /// An empty `rx` starts the receiver and discards anything pending.
    pub fn uart_rx(&self, hdwf: Hdwf, rx: &mut [u8]) -> Result<(usize, c_int)> {
        let mut received: c_int = 0;
        let mut parity: c_int = 0;
        dwf_call!(
            self,
            FDwfDigitalUartRx(
                hdwf,
                rx.as_mut_ptr() as *mut c_char,
                rx.len() as c_int,
                &mut received,
                &mut parity
            )
        )?;
        Ok(((received.max(0) as usize).min(rx.len()), parity))
    }

    dwf_fn! {
        spi_reset(hdwf: Hdwf) = FDwfDigitalSpiReset;
        spi_frequency_set(hdwf: Hdwf, hz: c_double) = FDwfDigitalSpiFrequencySet;
        spi_clock_set(hdwf: Hdwf, idx_channel: c_int) = FDwfDigitalSpiClockSet;
        spi_data_set(hdwf: Hdwf, idx_dq: c_int, idx_channel: c_int) = FDwfDigitalSpiDataSet;
        spi_idle_set(hdwf: Hdwf, idx_dq: c_int, idle: DwfDigitalOutIdle) = FDwfDigitalSpiIdleSet;
        /// Clock polarity in bit 1, phase in bit 0.
        spi_mode_set(hdwf: Hdwf, mode: c_int) = FDwfDigitalSpiModeSet;
        spi_order_set(hdwf: Hdwf, msb_first: c_int) = FDwfDigitalSpiOrderSet;
        spi_delay_set(hdwf: Hdwf, start: c_int, cmd: c_int, word: c_int, stop: c_int) = FDwfDigitalSpiDelaySet;
        spi_select_set(hdwf: Hdwf, idx_select: c_int, idle: c_int) = FDwfDigitalSpiSelectSet;
        spi_select(hdwf: Hdwf, idx_channel: c_int, level: c_int) = FDwfDigitalSpiSelect;
        spi_read_one(hdwf: Hdwf, dq: c_int, bits_per_word: c_int) -> c_uint = FDwfDigitalSpiReadOne;
        spi_write_one(hdwf: Hdwf, dq: c_int, bits: c_int, word: c_uint) = FDwfDigitalSpiWriteOne;
    }

    spi_transfers!(c_uchar, spi_write_read = FDwfDigitalSpiWriteRead, spi_read = FDwfDigitalSpiRead, spi_write = FDwfDigitalSpiWrite);
    spi_transfers!(c_ushort, spi_write_read16 = FDwfDigitalSpiWriteRead16, spi_read16 = FDwfDigitalSpiRead16, spi_write16 = FDwfDigitalSpiWrite16);
    spi_transfers!(c_uint, spi_write_read32 = FDwfDigitalSpiWriteRead32, spi_read32 = FDwfDigitalSpiRead32, spi_write32 = FDwfDigitalSpiWrite32);

    dwf_fn! {
        i2c_reset(hdwf: Hdwf) = FDwfDigitalI2cReset;
        /// Releases a stuck bus; returns non-zero when both lines read high afterwards.
        i2c_clear(hdwf: Hdwf) -> c_int = FDwfDigitalI2cClear;
        i2c_stretch_set(hdwf: Hdwf, enable: c_int) = FDwfDigitalI2cStretchSet;
        i2c_rate_set(hdwf: Hdwf, hz: c_double) = FDwfDigitalI2cRateSet;
        i2c_read_nak_set(hdwf: Hdwf, nak_last_read_byte: c_int) = FDwfDigitalI2cReadNakSet;
        i2c_scl_set(hdwf: Hdwf, idx_channel: c_int) = FDwfDigitalI2cSclSet;
        i2c_sda_set(hdwf: Hdwf, idx_channel: c_int) = FDwfDigitalI2cSdaSet;
        i2c_timeout_set(hdwf: Hdwf, seconds: c_double) = FDwfDigitalI2cTimeoutSet;
        i2c_write_one(hdwf: Hdwf, address: c_uchar, byte: c_uchar) -> c_int = FDwfDigitalI2cWriteOne;
    }

    /// Writes `tx` then reads `rx.len()` bytes in one transaction; returns the NAK index
    /// (0 when every byte was acknowledged).
    pub fn i2c_write_read(&self, hdwf: Hdwf, address: c_uchar, tx: &[u8], rx: &mut [u8]) -> Result<c_int> {
        let mut nak: c_int = 0;
        dwf_call!(
            self,
            FDwfDigitalI2cWriteRead(
                hdwf,
                address,
                tx.as_ptr() as *mut c_uchar,
                tx.len() as c_int,
                rx.as_mut_ptr(),
                rx.len() as c_int,
                &mut nak
            )
        )?;
        Ok(nak)
    }

    pub fn i2c_read(&self, hdwf: Hdwf, address: c_uchar, rx: &mut [u8]) -> Result<c_int> {
        let mut nak: c_int = 0;
        dwf_call!(
            self,
            FDwfDigitalI2cRead(hdwf, address, rx.as_mut_ptr(), rx.len() as c_int, &mut nak)
        )?;
        Ok(nak)
    }

    pub fn i2c_write(&self, hdwf: Hdwf, address: c_uchar, tx: &[u8]) -> Result<c_int> {
        let mut nak: c_int = 0;
        dwf_call!(
            self,
            FDwfDigitalI2cWrite(hdwf, address, tx.as_ptr() as *mut c_uchar, tx.len() as c_int, &mut nak)
        )?;
        Ok(nak)
    }

    dwf_fn! {
        can_reset(hdwf: Hdwf) = FDwfDigitalCanReset;
        can_rate_set(hdwf: Hdwf, hz: c_double) = FDwfDigitalCanRateSet;
        can_polarity_set(hdwf: Hdwf, high: c_int) = FDwfDigitalCanPolaritySet;
        can_tx_set(hdwf: Hdwf, idx_channel: c_int) = FDwfDigitalCanTxSet;
        can_rx_set(hdwf: Hdwf, idx_channel: c_int) = FDwfDigitalCanRxSet;
    }

    /// Sends a frame with up to 8 data bytes. `id` of -1 only starts the transmitter.
    pub fn can_tx(&self, hdwf: Hdwf, id: c_int, extended: bool, remote: bool, data: &[u8]) -> Result<()> {
        let mut payload = [0u8; 8];
        let dlc = data.len().min(8);
        payload[..dlc].copy_from_slice(&data[..dlc]);
        dwf_call!(
            self,
            FDwfDigitalCanTx(
                hdwf,
                id,
                extended as c_int,
                remote as c_int,
                dlc as c_int,
                payload.as_mut_ptr()
            )
        )
    }

    /// Polls the receiver for a frame.
    pub fn can_rx(&self, hdwf: Hdwf) -> Result<CanFrame> {
        let mut id: c_int = 0;
        let mut extended: c_int = 0;
        let mut remote: c_int = 0;
        let mut dlc: c_int = 0;
        let mut status: c_int = 0;
        let mut payload = [0u8; 8];
        dwf_call!(
            self,
            FDwfDigitalCanRx(
                hdwf,
                &mut id,
                &mut extended,
                &mut remote,
                &mut dlc,
                payload.as_mut_ptr(),
                payload.len() as c_int,
                &mut status
            )
        )?;
        Ok(CanFrame {
            id,
            extended: extended != 0,
            remote: remote != 0,
            data: payload[..dlc.clamp(0, 8) as usize].to_vec(),
            status,
        })
    }
}
