use {crate::epoch::TWITTER_EPOCH, chrono::Utc, parking_lot::RwLock};

/// Provides the current timestamp in milliseconds since the Unix epoch.
pub trait TimestampSource {
    /// Returns the current timestamp in milliseconds since the Unix epoch.
    fn current_millis(&self) -> i64;
}

/// Implementation of the `TimestampSource` trait using UTC.
#[derive(Debug, Default)]
pub struct UtcClock;

impl TimestampSource for UtcClock {
    fn current_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

/// Implementation of the `TimestampSource` trait using a manual timestamp.
///
/// Useful for testing purposes: the clock only moves when told to, so
/// same-millisecond and backward-jump behavior can be exercised
/// deterministically.
#[derive(Debug)]
pub struct ManualClock {
    /// The current timestamp in milliseconds since the Unix epoch.
    millis: RwLock<i64>,
}

impl Default for ManualClock {
    fn default() -> Self {
        Self::new(TWITTER_EPOCH.unix_millis())
    }
}

impl TimestampSource for ManualClock {
    fn current_millis(&self) -> i64 {
        let r = self.millis.read();
        *r
    }
}

impl ManualClock {
    /// Creates a new `ManualClock` with the specified timestamp.
    pub fn new(millis: i64) -> Self {
        Self {
            millis: RwLock::new(millis),
        }
    }

    /// Sets the current timestamp.
    pub fn set_current_millis(&self, millis: i64) {
        let mut w = self.millis.write();
        *w = millis;
    }

    /// Advances the current timestamp by the given number of milliseconds.
    pub fn advance(&self, millis: i64) {
        let mut w = self.millis.write();
        *w += millis;
    }
}
