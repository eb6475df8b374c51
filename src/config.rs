//! Tuning parameters for sequenced collections.

/// Controls when sequence numbers are compacted and which iterator
/// strategy is used.
///
/// None of these values affect the order a collection yields; they only
/// trade renumbering work against iteration cost.
///
/// ```
/// use champ_collections::SequenceConfig;
///
/// let config = SequenceConfig::default().with_bucket_factor(2);
/// assert_eq!(config.bucket_factor, 2);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SequenceConfig {
    /// Renumber once `last - first` exceeds `renumber_factor * size + renumber_slack`.
    pub renumber_factor: u32,
    /// Additive slack for the density check, so tiny collections do not
    /// renumber on every removal.
    pub renumber_slack: u32,
    /// Iterate with buckets while `last - first <= bucket_factor * size`,
    /// otherwise with a heap. `0` always selects the heap.
    pub bucket_factor: u32,
    /// Counters are renumbered before a new sequence number would leave
    /// `[-counter_limit, counter_limit]`. Values below 1 act as 1.
    pub counter_limit: i32,
}

impl SequenceConfig {
    /// Default renumber factor.
    pub const DEFAULT_RENUMBER_FACTOR: u32 = 8;
    /// Default renumber slack.
    pub const DEFAULT_RENUMBER_SLACK: u32 = 32;
    /// Default bucket factor.
    pub const DEFAULT_BUCKET_FACTOR: u32 = 4;
    /// Default counter limit: the full `i32` range minus the guard value.
    pub const DEFAULT_COUNTER_LIMIT: i32 = i32::MAX - 1;

    /// Returns the default configuration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            renumber_factor: Self::DEFAULT_RENUMBER_FACTOR,
            renumber_slack: Self::DEFAULT_RENUMBER_SLACK,
            bucket_factor: Self::DEFAULT_BUCKET_FACTOR,
            counter_limit: Self::DEFAULT_COUNTER_LIMIT,
        }
    }

    /// Sets [`renumber_factor`](Self::renumber_factor).
    #[must_use]
    pub const fn with_renumber_factor(mut self, factor: u32) -> Self {
        self.renumber_factor = factor;
        self
    }

    /// Sets [`renumber_slack`](Self::renumber_slack).
    #[must_use]
    pub const fn with_renumber_slack(mut self, slack: u32) -> Self {
        self.renumber_slack = slack;
        self
    }

    /// Sets [`bucket_factor`](Self::bucket_factor).
    #[must_use]
    pub const fn with_bucket_factor(mut self, factor: u32) -> Self {
        self.bucket_factor = factor;
        self
    }

    /// Sets [`counter_limit`](Self::counter_limit), clamped to at least 1.
    #[must_use]
    pub const fn with_counter_limit(mut self, limit: i32) -> Self {
        self.counter_limit = if limit < 1 { 1 } else { limit };
        self
    }

    /// [`counter_limit`](Self::counter_limit) clamped to at least 1, so
    /// that negating it cannot overflow.
    pub(crate) const fn effective_counter_limit(&self) -> i32 {
        if self.counter_limit < 1 { 1 } else { self.counter_limit }
    }
}

impl Default for SequenceConfig {
    fn default() -> Self {
        Self::new()
    }
}
