/// Reference instant from which the time field of every ID is measured.
///
/// An epoch is fixed at generator construction and becomes part of the
/// generator's identity. All generators that are expected to produce
/// comparable IDs must share the same epoch, and the epoch must precede
/// every issuance instant (the time field is 41 bits and non-negative).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Epoch(i64);

/// The conventional Twitter snowflake epoch: 2010-11-04 01:42:54.657 UTC.
pub const TWITTER_EPOCH: Epoch = Epoch::from_unix_millis(1_288_834_974_657);

impl Default for Epoch {
    fn default() -> Self {
        TWITTER_EPOCH
    }
}

impl Epoch {
    /// Creates an epoch from milliseconds since the Unix epoch.
    pub const fn from_unix_millis(ms: i64) -> Self {
        Self(ms)
    }

    /// Returns the epoch as milliseconds since the Unix epoch.
    pub const fn unix_millis(&self) -> i64 {
        self.0
    }

    /// Milliseconds elapsed between this epoch and the given Unix timestamp.
    pub(crate) const fn elapsed(&self, unix_ms: i64) -> i64 {
        unix_ms - self.0
    }
}
