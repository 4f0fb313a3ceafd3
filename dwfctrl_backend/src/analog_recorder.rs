//! Record mode acquisition of the analog input unit.
//!
//! In record mode the device streams samples continuously; every status read reports how many
//! new samples are available and how many were lost or corrupted because they were not fetched
//! in time. [`AnalogRecorder`] copies the available samples of every enabled channel into a ring
//! buffer sized to the requested length, and once the device reports done (or the callback or the
//! timeout stops the recording) unwraps it into an immutable [`AnalogRecording`].

use std::time::{Duration, Instant};

use dwf_backend::{Result, State};
use libc::c_int;
use ndarray::{Array1, Array2};

use crate::analog_input::AnalogInput;
use crate::helpers::{unwrap_ring, RecordCounters, RingCursor};
use crate::registry::{Address, Registry};
use crate::unit::BaseUnit;

/// Samples per channel captured by a recording or a single acquisition.
///
/// Disabled channels have no samples. The snapshot never changes after construction.
#[derive(Debug, Clone)]
pub struct AnalogRecording {
    channels: Registry<Option<Array1<f64>>>,
    sample_rate: f64,
    counters: RecordCounters,
}

impl AnalogRecording {
    pub(crate) fn new(
        labels: Vec<String>,
        samples: Vec<Option<Array1<f64>>>,
        sample_rate: f64,
        counters: RecordCounters,
    ) -> Self {
        Self {
            channels: Registry::new(labels.into_iter().zip(samples)),
            sample_rate,
            counters,
        }
    }

    /// Samples of a channel, addressed by index or label; `None` if the channel was disabled.
    pub fn channel<'a>(&self, address: impl Into<Address<'a>>) -> Result<Option<&Array1<f64>>> {
        Ok(self.channels.get(address)?.as_ref())
    }

    pub fn channel_count(&self) -> usize {
        self.channels.len()
    }

    /// Sample count of the enabled channels.
    pub fn len(&self) -> usize {
        self.channels.iter().flatten().map(|samples| samples.len()).next().unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_rate(&self) -> f64 {
        self.sample_rate
    }

    pub fn counters(&self) -> &RecordCounters {
        &self.counters
    }

    /// Enabled channels stacked into a `channels x samples` array.
    pub fn to_array(&self) -> Array2<f64> {
        let rows: Vec<&Array1<f64>> = self.channels.iter().flatten().collect();
        let mut array = Array2::zeros((rows.len(), self.len()));
        for (mut row, samples) in array.outer_iter_mut().zip(rows) {
            row.assign(samples);
        }
        array
    }
}

/// Drives a record mode acquisition of an [`AnalogInput`].
pub struct AnalogRecorder<'a> {
    unit: &'a AnalogInput,
    cursor: RingCursor,
    buffers: Vec<Option<Vec<f64>>>,
    counters: RecordCounters,
    is_setup: bool,
    started_at: Option<Instant>,
    timeout: Option<Duration>,
    recording: Option<AnalogRecording>,
}

impl<'a> AnalogRecorder<'a> {
    pub fn new(unit: &'a AnalogInput) -> Self {
        Self {
            unit,
            cursor: RingCursor::default(),
            buffers: Vec::new(),
            counters: RecordCounters::default(),
            is_setup: false,
            started_at: None,
            timeout: None,
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

    /// The finished recording, available once [`AnalogRecorder::record`] returned or
    /// [`AnalogRecorder::process`] returned false.
    pub fn recording(&self) -> Option<&AnalogRecording> {
        self.recording.as_ref()
    }

    pub fn into_recording(self) -> Option<AnalogRecording> {
        self.recording
    }

    /// Starts the recording and blocks until it is complete.
    ///
    /// `callback` is called after every processed chunk; returning false stops the recording.
    pub fn record(&mut self, mut callback: Option<&mut dyn FnMut(&AnalogRecorder) -> bool>) -> Result<&AnalogRecording> {
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
            None => empty_recording(self.unit)?,
        };
        Ok(&*self.recording.insert(recording))
    }

    /// Processes one chunk without blocking. Returns true while more data is expected.
    ///
    /// Must be called often enough for the device buffer not to overflow; samples that are not
    /// fetched in time are counted as lost.
    pub fn process(&mut self) -> Result<bool> {
        if !self.is_setup {
            self.start()?;
        }
        if !self.is_setup {
            if self.recording.is_none() {
                self.recording = Some(empty_recording(self.unit)?);
            }
            return Ok(false);
        }
        let again = self.process_chunk()? && !self.timed_out();
        if !again {
            self.finalize()?;
        }
        Ok(again)
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
        let buffer_size = (self.unit.record_length()? * self.unit.frequency()?).round_ties_even();
        let buffer_size = if buffer_size > 0.0 { buffer_size as usize } else { 0 };
        if buffer_size == 0 {
            log::info!("Record: nothing to record");
            return Ok(());
        }
        self.counters.requested_samples = buffer_size;
        self.cursor = RingCursor::new(buffer_size);
        self.buffers = Vec::with_capacity(self.unit.channels().len());
        for channel in self.unit.channels() {
            self.buffers
                .push(if channel.enabled()? { Some(vec![0.0; buffer_size]) } else { None });
        }
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
            for (index, buffer) in self.buffers.iter_mut().enumerate() {
                if let Some(buffer) = buffer {
                    dwf.analog_in_status_data2(
                        hdwf,
                        index as c_int,
                        &mut buffer[chunk.offset..chunk.offset + chunk.len],
                        chunk.source as c_int,
                    )?;
                }
            }
        }
        Ok(status != State::Done)
    }

    fn finalize(&mut self) -> Result<()> {
        let index = self.cursor.index();
        let samples = std::mem::take(&mut self.buffers)
            .into_iter()
            .map(|buffer| buffer.map(|buffer| Array1::from_vec(unwrap_ring(buffer, index))))
            .collect();
        self.recording = Some(AnalogRecording::new(
            self.unit.channels().labels().to_vec(),
            samples,
            self.unit.frequency()?,
            self.counters,
        ));
        self.is_setup = false;
        log::info!(
            "Record: {} samples, {} lost, {} corrupted",
            self.counters.total_samples,
            self.counters.lost_samples,
            self.counters.corrupted_samples
        );
        Ok(())
    }

    fn timed_out(&self) -> bool {
        match (self.timeout, self.started_at) {
            (Some(timeout), Some(started_at)) => started_at.elapsed() >= timeout,
            _ => false,
        }
    }
}

// A zero-length request records nothing: every enabled channel gets an empty sequence.
fn empty_recording(unit: &AnalogInput) -> Result<AnalogRecording> {
    let samples = unit
        .channels()
        .iter()
        .map(|channel| Ok(if channel.enabled()? { Some(Array1::zeros(0)) } else { None }))
        .collect::<Result<Vec<_>>>()?;
    Ok(AnalogRecording::new(
        unit.channels().labels().to_vec(),
        samples,
        unit.frequency()?,
        RecordCounters::default(),
    ))
}
