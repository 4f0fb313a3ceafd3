//! Small utilities shared by the functional units and recorders.

use std::thread;
use std::time::Duration;

use dwf_backend::{Result, State};

/// Interval between two status polls while waiting for an acquisition or generator state.
pub const POLL_INTERVAL: Duration = Duration::from_millis(1);

/// Calls `read_status` until it reports `state`.
pub fn wait_for_state(state: State, mut read_status: impl FnMut() -> Result<State>) -> Result<()> {
    loop {
        if read_status()? == state {
            return Ok(());
        }
        thread::sleep(POLL_INTERVAL);
    }
}

/// Packs a bit sequence into bytes, least significant bit first.
pub fn pack_bits(bits: &[bool]) -> Vec<u8> {
    let mut bytes = vec![0u8; (bits.len() + 7) / 8];
    for (i, _) in bits.iter().enumerate().filter(|(_, bit)| **bit) {
        bytes[i / 8] |= 1 << (i % 8);
    }
    bytes
}

/// Write cursor of a fixed-size ring buffer filled by record mode acquisitions.
///
/// The driver reports per status read how many samples became available and how many were lost.
/// Lost samples advance the cursor without data so that the final buffer keeps its time base.
#[derive(Debug, Clone, Copy, Default)]
pub(crate) struct RingCursor {
    size: usize,
    index: usize,
}

/// One contiguous copy from the driver buffer into the ring buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Chunk {
    /// Position in the ring buffer.
    pub offset: usize,
    /// Position in the driver's newly available samples.
    pub source: usize,
    pub len: usize,
}

impl RingCursor {
    pub fn new(size: usize) -> Self {
        Self { size, index: 0 }
    }

    pub fn skip(&mut self, lost: usize) {
        if self.size > 0 {
            self.index = (self.index + lost) % self.size;
        }
    }

    /// Splits `available` samples into chunks that do not wrap and advances past them.
    pub fn take(&mut self, mut available: usize) -> Vec<Chunk> {
        let mut chunks = Vec::new();
        if self.size == 0 {
            return chunks;
        }
        let mut source = 0;
        while available > 0 {
            let len = available.min(self.size - self.index);
            chunks.push(Chunk {
                offset: self.index,
                source,
                len,
            });
            self.index = (self.index + len) % self.size;
            source += len;
            available -= len;
        }
        chunks
    }

    pub fn index(&self) -> usize {
        self.index
    }
}

/// Rotates a ring buffer so that the oldest sample, at `index`, comes first.
pub(crate) fn unwrap_ring<T>(mut buffer: Vec<T>, index: usize) -> Vec<T> {
    if index > 0 && index < buffer.len() {
        buffer.rotate_left(index);
    }
    buffer
}

/// Running totals of a record mode acquisition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordCounters {
    /// Last state read from the instrument.
    pub status: State,
    pub requested_samples: usize,
    /// Samples produced by the instrument, including lost ones.
    pub total_samples: usize,
    pub lost_samples: usize,
    pub corrupted_samples: usize,
}

impl Default for RecordCounters {
    fn default() -> Self {
        Self {
            status: State::Ready,
            requested_samples: 0,
            total_samples: 0,
            lost_samples: 0,
            corrupted_samples: 0,
        }
    }
}

impl RecordCounters {
    pub(crate) fn update(&mut self, status: State, available: usize, lost: usize, corrupted: usize) {
        self.status = status;
        self.total_samples += lost + available;
        self.lost_samples += lost;
        self.corrupted_samples += corrupted;
        if lost > 0 || corrupted > 0 {
            log::warn!("Record: {} samples lost, {} samples corrupted", lost, corrupted);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn packs_bits_lsb_first() {
        assert_eq!(pack_bits(&[true, false, true, true]), vec![0b1101]);
        assert_eq!(
            pack_bits(&[false, false, false, false, false, false, false, false, true]),
            vec![0, 1]
        );
        assert!(pack_bits(&[]).is_empty());
    }

    #[test]
    fn ring_cursor_splits_at_the_wrap() {
        let mut cursor = RingCursor::new(8);
        cursor.skip(6);
        let chunks = cursor.take(5);
        assert_eq!(
            chunks,
            vec![
                Chunk { offset: 6, source: 0, len: 2 },
                Chunk { offset: 0, source: 2, len: 3 },
            ]
        );
        assert_eq!(cursor.index(), 3);
    }

    #[test]
    fn zero_sized_ring_takes_nothing() {
        let mut cursor = RingCursor::new(0);
        cursor.skip(3);
        assert!(cursor.take(10).is_empty());
    }

    #[test]
    fn ring_is_unwrapped_oldest_first() {
        assert_eq!(unwrap_ring(vec![4, 5, 1, 2, 3], 2), vec![1, 2, 3, 4, 5]);
        assert_eq!(unwrap_ring(vec![1, 2, 3], 0), vec![1, 2, 3]);
    }
}
