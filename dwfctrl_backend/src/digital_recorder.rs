//! Record and stream mode acquisition of the digital input unit.
//!
//! Logic analyzer samples are words of 8, 16 or 32 bits, one bit per line, depending on the
//! sample format of the instrument. [`DigitalSamples`] keeps the native word width.
//!
//! A record fills a ring buffer of `prefill + position` samples and unwraps it into a
//! [`DigitalRecording`] once done. A stream keeps no history: every chunk the device makes
//! available is handed to the callback through [`DigitalRecorder::chunk`].

use std::time::{Duration, Instant};

use dwf_backend::{Dwf, DwfError, Hdwf, Result, SampleWord, State};
use libc::c_int;
use ndarray::Array1;

use crate::digital_input::DigitalInput;
use crate::helpers::{unwrap_ring, Chunk, RecordCounters, RingCursor};
use crate::unit::BaseUnit;

/// Word width of logic analyzer samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SampleWidth {
    U8,
    U16,
    U32,
}

impl SampleWidth {
    /// Smallest word holding `bits` sampled lines.
    pub fn from_format(bits: c_int) -> Result<Self> {
        match bits {
            1..=8 => Ok(SampleWidth::U8),
            9..=16 => Ok(SampleWidth::U16),
            17..=32 => Ok(SampleWidth::U32),
            _ => Err(DwfError::invalid_option(
                "sample_format",
                format!("{} bits is not one of: 8, 16, 32", bits),
            )),
        }
    }

    pub fn bits(self) -> u32 {
        match self {
            SampleWidth::U8 => u8::BITS,
            SampleWidth::U16 => u16::BITS,
            SampleWidth::U32 => u32::BITS,
        }
    }
}

/// Logic analyzer samples in their native word width.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DigitalSamples {
    U8(Array1<u8>),
    U16(Array1<u16>),
    U32(Array1<u32>),
}

impl DigitalSamples {
    pub(crate) fn empty(width: SampleWidth) -> Self {
        match width {
            SampleWidth::U8 => DigitalSamples::U8(Array1::zeros(0)),
            SampleWidth::U16 => DigitalSamples::U16(Array1::zeros(0)),
            SampleWidth::U32 => DigitalSamples::U32(Array1::zeros(0)),
        }
    }

    pub fn width(&self) -> SampleWidth {
        match self {
            DigitalSamples::U8(_) => SampleWidth::U8,
            DigitalSamples::U16(_) => SampleWidth::U16,
            DigitalSamples::U32(_) => SampleWidth::U32,
        }
    }

    pub fn len(&self) -> usize {
        match self {
            DigitalSamples::U8(samples) => samples.len(),
            DigitalSamples::U16(samples) => samples.len(),
            DigitalSamples::U32(samples) => samples.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Samples widened to 32 bits.
    pub fn to_u32(&self) -> Array1<u32> {
        match self {
            DigitalSamples::U8(samples) => samples.mapv(u32::from),
            DigitalSamples::U16(samples) => samples.mapv(u32::from),
            DigitalSamples::U32(samples) => samples.clone(),
        }
    }

    /// Levels of one line over time.
    pub fn line(&self, line: usize) -> Result<Array1<bool>> {
        let width = self.width().bits() as usize;
        if line >= width {
            return Err(dwf_backend::AddressingError::IndexOutOfRange { index: line, len: width }.into());
        }
        Ok(self.to_u32().mapv(|word| word & (1 << line) != 0))
    }
}

/// Samples captured by a digital recording.
#[derive(Debug, Clone)]
pub struct DigitalRecording {
    data: DigitalSamples,
    noise: Option<DigitalSamples>,
    sample_rate: f64,
    counters: RecordCounters,
}

impl DigitalRecording {
    pub fn data(&self) -> &DigitalSamples {
        &self.data
    }

    /// Noise (glitch) samples, present when the unit sampled in noise mode.
    pub fn noise(&self) -> Option<&DigitalSamples> {
        self.noise.as_ref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn counters(&self) -> &RecordCounters {
        &self.counters
    }
}

enum SampleBuffer {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl SampleBuffer {
    fn new(width: SampleWidth, size: usize) -> Self {
        match width {
            SampleWidth::U8 => SampleBuffer::U8(vec![0; size]),
            SampleWidth::U16 => SampleBuffer::U16(vec![0; size]),
            SampleWidth::U32 => SampleBuffer::U32(vec![0; size]),
        }
    }

    fn fetch(&mut self, dwf: &Dwf, hdwf: Hdwf, chunk: Chunk, noise: bool) -> Result<()> {
        match self {
            SampleBuffer::U8(buffer) => fetch_chunk(dwf, hdwf, buffer, chunk, noise),
            SampleBuffer::U16(buffer) => fetch_chunk(dwf, hdwf, buffer, chunk, noise),
            SampleBuffer::U32(buffer) => fetch_chunk(dwf, hdwf, buffer, chunk, noise),
        }
    }

    fn unwrap(self, index: usize) -> DigitalSamples {
        match self {
            SampleBuffer::U8(buffer) => DigitalSamples::U8(Array1::from_vec(unwrap_ring(buffer, index))),
            SampleBuffer::U16(buffer) => DigitalSamples::U16(Array1::from_vec(unwrap_ring(buffer, index))),
            SampleBuffer::U32(buffer) => DigitalSamples::U32(Array1::from_vec(unwrap_ring(buffer, index))),
        }
    }
}

fn fetch_chunk<W: SampleWord>(dwf: &Dwf, hdwf: Hdwf, buffer: &mut [W], chunk: Chunk, noise: bool) -> Result<()> {
    let target = &mut buffer[chunk.offset..chunk.offset + chunk.len];
    if noise {
        dwf.digital_in_status_noise2(hdwf, target, chunk.source as c_int)
    } else {
        dwf.digital_in_status_data2(hdwf, target, chunk.source as c_int)
    }
}

/// Drives a record or stream mode acquisition of a [`DigitalInput`].
pub struct DigitalRecorder<'a> {
    unit: &'a DigitalInput,
    width: SampleWidth,
    acquire_noise: bool,
    cursor: RingCursor,
    data_buffer: Option<SampleBuffer>,
    noise_buffer: Option<SampleBuffer>,
    counters: RecordCounters,
    is_setup: bool,
    started_at: Option<Instant>,
    timeout: Option<Duration>,
    chunk: Option<DigitalSamples>,
    noise_chunk: Option<DigitalSamples>,
    recording: Option<DigitalRecording>,
}

impl<'a> DigitalRecorder<'a> {
    pub fn new(unit: &'a DigitalInput) -> Self {
        Self {
            unit,
            width: SampleWidth::U8,
            acquire_noise: false,
            cursor: RingCursor::default(),
            data_buffer: None,
            noise_buffer: None,
            counters: RecordCounters::default(),
            is_setup: false,
            started_at: None,
            timeout: None,
            chunk: None,
            noise_chunk: None,
            recording: None,
        }
    }

    pub fn set_timeout(&mut self, timeout: Option<Duration>) {
        self.timeout = timeout;
    }

    pub fn status(&self) -> State {
        self.counters.status
    }

    pub fn requested_samples(&self) -> usize {
        self.counters.requested_samples
    }

    pub fn total_samples(&self) -> usize {
        self.counters.total_samples
    }

    pub fn lost_samples(&self) -> usize {
        self.counters.lost_samples
    }

    pub fn corrupted_samples(&self) -> usize {
        self.counters.corrupted_samples
    }

    /// Samples of the last streamed chunk.
    pub fn chunk(&self) -> Option<&DigitalSamples> {
        self.chunk.as_ref()
    }

    /// Noise samples of the last streamed chunk, in noise sample mode.
    pub fn noise_chunk(&self) -> Option<&DigitalSamples> {
        self.noise_chunk.as_ref()
    }

    pub fn recording(&self) -> Option<&DigitalRecording> {
        self.recording.as_ref()
    }

    pub fn into_recording(self) -> Option<DigitalRecording> {
        self.recording
    }

    /// Starts the recording and blocks until it is complete.
    ///
    /// `callback` is called after every processed chunk; returning false stops the recording.
    pub fn record(
        &mut self,
        mut callback: Option<&mut dyn FnMut(&DigitalRecorder) -> bool>,
    ) -> Result<&DigitalRecording> {
        if !self.is_setup {
            self.start()?;
        }
        if self.is_setup {
            loop {
                let again_status = self.process_chunk()?;
                let again_user = match callback.as_mut() {
                    Some(callback) => callback(&*self),
                    None => true,
                };
                if !again_status || !again_user || self.timed_out() {
                    break;
                }
            }
            self.finalize()?;
        }
        let recording = match self.recording.take() {
            Some(recording) => recording,
            None => self.empty_recording()?,
        };
        Ok(&*self.recording.insert(recording))
    }

    /// Processes one recording chunk without blocking. Returns true while more data is expected.
    pub fn process(&mut self) -> Result<bool> {
        if !self.is_setup {
            self.start()?;
        }
        if !self.is_setup {
            if self.recording.is_none() {
                self.recording = Some(self.empty_recording()?);
            }
            return Ok(false);
        }
        let again = self.process_chunk()? && !self.timed_out();
        if !again {
            self.finalize()?;
        }
        Ok(again)
    }

    /// Starts streaming and blocks until the callback returns false or the device is done.
    pub fn stream(&mut self, callback: &mut dyn FnMut(&DigitalRecorder) -> bool) -> Result<()> {
        self.counters = RecordCounters::default();
        self.recording = None;
        self.width = SampleWidth::from_format(self.unit.sample_format()?)?;
        self.acquire_noise = self.unit.sample_mode()? == dwf_backend::DigitalInSampleMode::Noise;
        self.unit.configure(false, true)?;
        loop {
            let status = self.unit.read_status(true)?;
            let (available, lost, corrupted) = self.unit.record_status()?;
            self.counters.update(status, available, lost, corrupted);
            self.chunk = Some(self.unit.get_data_range(0, available)?);
            self.noise_chunk = if self.acquire_noise {
                Some(self.unit.get_noise_range(0, available)?)
            } else {
                None
            };
            if status == State::Done || !callback(&*self) {
                break;
            }
        }
        self.counters.status = State::Done;
        Ok(())
    }

    fn start(&mut self) -> Result<()> {
        self.setup()?;
        if self.is_setup {
            self.unit.configure(false, true)?;
            self.started_at = Some(Instant::now());
        }
        Ok(())
    }

    fn setup(&mut self) -> Result<()> {
        self.counters = RecordCounters::default();
        self.recording = None;
        self.width = SampleWidth::from_format(self.unit.sample_format()?)?;
        self.acquire_noise = self.unit.sample_mode()? == dwf_backend::DigitalInSampleMode::Noise;
        let trigger = self.unit.trigger();
        let buffer_size = trigger.prefill()? + trigger.position()?;
        if buffer_size == 0 {
            log::info!("Record: nothing to record");
            return Ok(());
        }
        self.counters.requested_samples = buffer_size;
        self.cursor = RingCursor::new(buffer_size);
        self.data_buffer = Some(SampleBuffer::new(self.width, buffer_size));
        self.noise_buffer = if self.acquire_noise {
            Some(SampleBuffer::new(self.width, buffer_size))
        } else {
            None
        };
        self.is_setup = true;
        Ok(())
    }

    fn process_chunk(&mut self) -> Result<bool> {
        let status = self.unit.read_status(true)?;
        let (available, lost, corrupted) = self.unit.record_status()?;
        self.counters.update(status, available, lost, corrupted);
        self.cursor.skip(lost);
        let dwf = self.unit.dwf();
        let hdwf = self.unit.hdwf()?;
        for chunk in self.cursor.take(available) {
            if let Some(buffer) = self.data_buffer.as_mut() {
                buffer.fetch(dwf, hdwf, chunk, false)?;
            }
            if let Some(buffer) = self.noise_buffer.as_mut() {
                buffer.fetch(dwf, hdwf, chunk, true)?;
            }
        }
        Ok(status != State::Done)
    }

    fn finalize(&mut self) -> Result<()> {
        let index = self.cursor.index();
        let data = match self.data_buffer.take() {
            Some(buffer) => buffer.unwrap(index),
            None => DigitalSamples::empty(self.width),
        };
        let noise = self.noise_buffer.take().map(|buffer| buffer.unwrap(index));
        self.recording = Some(DigitalRecording {
            data,
            noise,
            sample_rate: self.unit.sample_rate()?,
            counters: self.counters,
        });
        self.is_setup = false;
        log::info!(
            "Record: {} samples, {} lost, {} corrupted",
            self.counters.total_samples,
            self.counters.lost_samples,
            self.counters.corrupted_samples
        );
        Ok(())
    }

    // A zero-length request records nothing.
    fn empty_recording(&self) -> Result<DigitalRecording> {
        Ok(DigitalRecording {
            data: DigitalSamples::empty(self.width),
            noise: self.acquire_noise.then(|| DigitalSamples::empty(self.width)),
            sample_rate: self.unit.sample_rate()?,
            counters: RecordCounters::default(),
        })
    }

    fn timed_out(&self) -> bool {
        match (self.timeout, self.started_at) {
            (Some(timeout), Some(started_at)) => started_at.elapsed() >= timeout,
            _ => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    #[test]
    fn sample_width_follows_the_format() {
        assert_eq!(SampleWidth::from_format(8).unwrap(), SampleWidth::U8);
        assert_eq!(SampleWidth::from_format(16).unwrap(), SampleWidth::U16);
        assert_eq!(SampleWidth::from_format(24).unwrap(), SampleWidth::U32);
        assert!(matches!(
            SampleWidth::from_format(64),
            Err(DwfError::InvalidOption { option: "sample_format", .. })
        ));
    }

    #[test]
    fn extracts_a_line() {
        let samples = DigitalSamples::U8(array![0b01, 0b10, 0b11, 0b00]);
        assert_eq!(samples.line(0).unwrap(), array![true, false, true, false]);
        assert_eq!(samples.line(1).unwrap(), array![false, true, true, false]);
        assert!(samples.line(8).is_err());
    }

    #[test]
    fn ring_buffers_unwrap_oldest_first() {
        let buffer = SampleBuffer::U16(vec![3, 4, 1, 2]);
        assert_eq!(buffer.unwrap(2), DigitalSamples::U16(array![1, 2, 3, 4]));
    }
}
