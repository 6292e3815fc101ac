//! Counter-based flush trigger for the consolidation stream.

/// Fixed-size batching window: signals a flush on every Nth ingested
/// order id, counting from zero.
///
/// The reference implementation initialized its counter to 1 but reset it
/// to 0 after a flush, giving the first window a different size from the
/// rest. This policy deliberately uses uniform windows instead.
///
/// There is no time-based flush and no backpressure signal to the inbound
/// side; this counter is the stream's only scheduling logic.
#[derive(Debug)]
pub struct BatchPolicy {
    batch_size: usize,
    ingested: usize,
}

impl BatchPolicy {
    /// Creates a policy that flushes every `batch_size` ingests.
    ///
    /// `batch_size` must be at least 1; configuration validation enforces
    /// this before a policy is ever constructed.
    pub fn new(batch_size: usize) -> Self {
        debug_assert!(batch_size >= 1);
        Self {
            batch_size,
            ingested: 0,
        }
    }

    /// Records one successfully ingested order id. Returns `true` when
    /// the window is full and the aggregator should be flushed now.
    pub fn record_ingest(&mut self) -> bool {
        self.ingested += 1;
        if self.ingested == self.batch_size {
            self.ingested = 0;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flushes_on_every_nth_ingest() {
        let mut policy = BatchPolicy::new(3);
        let flushes: Vec<bool> = (0..9).map(|_| policy.record_ingest()).collect();
        assert_eq!(
            flushes,
            [false, false, true, false, false, true, false, false, true]
        );
    }

    #[test]
    fn batch_size_one_flushes_every_time() {
        let mut policy = BatchPolicy::new(1);
        assert!(policy.record_ingest());
        assert!(policy.record_ingest());
    }

    #[test]
    fn window_is_uniform_after_first_flush() {
        let mut policy = BatchPolicy::new(2);
        assert!(!policy.record_ingest());
        assert!(policy.record_ingest());
        assert!(!policy.record_ingest());
        assert!(policy.record_ingest());
    }
}
