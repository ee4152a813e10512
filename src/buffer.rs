use std::collections::VecDeque;

/// Coarse fill level of an [`AdmissionBuffer`], for queue-fill indicators.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BufferLoad {
    /// At most half full.
    Normal,
    /// More than half full.
    High,
    /// More than 80% full; the next chatty burst will likely be partly rejected.
    Critical,
}

/// Bounded FIFO queue of sub-requests waiting for a free server.
///
/// Each entry is the tick at which the sub-request arrived. The length never exceeds the capacity: [`try_admit()`]
/// refuses entries once full and nothing is ever evicted to make room.
///
/// [`try_admit()`]: AdmissionBuffer::try_admit
#[derive(Clone, Debug)]
pub struct AdmissionBuffer {
    queue: VecDeque<u64>,
    capacity: usize,
}

impl AdmissionBuffer {
    /// Construct an empty buffer holding at most `capacity` sub-requests.
    pub fn new(capacity: usize) -> Self {
        Self {
            queue: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Append a sub-request that arrived at `arrival_time`. Returns `false`, leaving the buffer untouched, if full.
    pub fn try_admit(&mut self, arrival_time: u64) -> bool {
        if self.is_full() {
            return false;
        }
        self.queue.push_back(arrival_time);
        true
    }

    /// Remove and return the arrival time of the oldest waiting sub-request.
    pub fn pop_oldest(&mut self) -> Option<u64> {
        self.queue.pop_front()
    }

    /// Number of sub-requests currently waiting.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// Most sub-requests the buffer will ever hold at once.
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether no sub-request is waiting.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Whether the next admission attempt would be rejected.
    pub fn is_full(&self) -> bool {
        self.queue.len() >= self.capacity
    }

    /// Fraction of capacity in use, in `[0, 1]`.
    pub fn fill_ratio(&self) -> f64 {
        self.queue.len() as f64 / self.capacity.max(1) as f64
    }

    /// Classify the current fill ratio.
    pub fn load(&self) -> BufferLoad {
        let ratio = self.fill_ratio();
        if ratio > 0.8 {
            BufferLoad::Critical
        } else if ratio > 0.5 {
            BufferLoad::High
        } else {
            BufferLoad::Normal
        }
    }

    /// Arrival times of the waiting sub-requests, oldest first.
    pub fn iter(&self) -> impl Iterator<Item = &u64> + '_ {
        self.queue.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn admission_stops_at_capacity() {
        let mut buffer = AdmissionBuffer::new(3);
        let admitted: Vec<bool> = (0..5).map(|t| buffer.try_admit(t)).collect();
        assert_eq!(vec![true, true, true, false, false], admitted, "unexpected admission pattern");
        assert_eq!(3, buffer.len());
        assert!(buffer.is_full());
    }

    #[test]
    fn entries_leave_in_arrival_order() {
        let mut buffer = AdmissionBuffer::new(4);
        for t in [7, 7, 9, 12] {
            assert!(buffer.try_admit(t));
        }
        let drained: Vec<u64> = std::iter::from_fn(|| buffer.pop_oldest()).collect();
        assert_eq!(vec![7, 7, 9, 12], drained, "buffer is not FIFO");
        assert!(buffer.is_empty());
    }

    #[test]
    fn rejected_entry_does_not_displace_queued_ones() {
        let mut buffer = AdmissionBuffer::new(2);
        buffer.try_admit(1);
        buffer.try_admit(2);
        assert!(!buffer.try_admit(3));
        assert_eq!(vec![1, 2], buffer.iter().copied().collect::<Vec<_>>());
    }

    #[test]
    fn load_follows_fill_ratio() {
        let mut buffer = AdmissionBuffer::new(10);
        let mut levels = Vec::new();
        for t in 0..10 {
            buffer.try_admit(t);
            levels.push(buffer.load());
        }
        assert_eq!(BufferLoad::Normal, levels[4], "half full should still be normal");
        assert_eq!(BufferLoad::High, levels[5]);
        assert_eq!(BufferLoad::High, levels[7], "80% full should still be high");
        assert_eq!(BufferLoad::Critical, levels[8]);
        assert_eq!(1.0, buffer.fill_ratio());
    }
}
