use {
    crate::{
        epoch::Epoch,
        error::{FlakeError, FlakeResult},
        id::{NODE_MAX, SEQUENCE_MAX, SnowflakeId},
        source::{TimestampSource, UtcClock},
    },
    md5::{Digest, Md5},
    parking_lot::Mutex,
};

/// Outcome of a single, non-blocking issuance attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IssueStatus {
    /// A fresh ID was issued.
    Ready { id: SnowflakeId },
    /// The generator is exhausted for the current millisecond, or the clock
    /// has moved backwards. `yield_for` is the number of milliseconds the
    /// clock must advance before an attempt can succeed.
    Pending { yield_for: i64 },
}

/// Mutable issuance state, guarded by the generator's mutex.
#[derive(Debug)]
struct State {
    /// Unix timestamp (ms) observed at the most recent issuance.
    last_millis: i64,
    /// Sequence counter within `last_millis`.
    sequence: u64,
}

/// Per-producer Snowflake ID generator.
///
/// A generator owns the issuance state for one logical producer and
/// serializes all issuance through an internal mutex, so it can be shared
/// across threads (behind an `Arc`) and hammered concurrently: exactly one
/// issuance happens at a time, and for a non-decreasing clock the issued IDs
/// are strictly increasing integers.
///
/// Uniqueness across producers rests on every concurrently running generator
/// having a distinct node id. That is a caller obligation: nothing here
/// coordinates between processes or hosts.
///
/// # Example
///
/// ```
/// use flake_gen::SnowflakeGenerator;
///
/// let g = SnowflakeGenerator::new(1).unwrap();
///
/// let a = g.next_id();
/// let b = g.next_id();
/// assert!(a < b);
/// assert_eq!(a.node_id(), 1);
/// ```
#[derive(Debug)]
pub struct SnowflakeGenerator<S = UtcClock>
where
    S: TimestampSource,
{
    node_id: u64,
    epoch: Epoch,
    state: Mutex<State>,
    source: S,
}

impl SnowflakeGenerator<UtcClock> {
    /// Creates a generator for the given node id, reading the UTC wall
    /// clock and measuring time from [`TWITTER_EPOCH`](crate::TWITTER_EPOCH).
    pub fn new(node_id: u64) -> FlakeResult<Self> {
        Self::with_epoch(node_id, Epoch::default())
    }

    /// Creates a generator with an explicit epoch.
    ///
    /// The epoch must precede every issuance instant: the time field of an
    /// ID is a non-negative 41-bit value.
    pub fn with_epoch(node_id: u64, epoch: Epoch) -> FlakeResult<Self> {
        Self::with_source(node_id, epoch, UtcClock)
    }

    /// Creates a generator whose node id is derived from the machine's
    /// hostname: the MD5 digest of the name, truncated to the low 10 bits.
    ///
    /// This is a convenience, not a uniqueness guarantee — truncating the
    /// hash to 10 bits can collide across hosts.
    pub fn from_host_identity() -> FlakeResult<Self> {
        Self::from_host_identity_with_epoch(Epoch::default())
    }

    /// Same as [`from_host_identity`](Self::from_host_identity), with an
    /// explicit epoch.
    pub fn from_host_identity_with_epoch(epoch: Epoch) -> FlakeResult<Self> {
        let name = hostname::get().map_err(FlakeError::HostLookup)?;
        let digest = Md5::digest(name.as_encoded_bytes());

        let mut word = [0u8; 8];
        word.copy_from_slice(&digest[..8]);
        let node_id = u64::from_be_bytes(word) & NODE_MAX;

        Self::with_epoch(node_id, epoch)
    }
}

impl<S> SnowflakeGenerator<S>
where
    S: TimestampSource,
{
    /// Creates a generator with an explicit clock source.
    ///
    /// Useful for testing with a [`ManualClock`](crate::ManualClock), or for
    /// plugging in a monotonic time source.
    pub fn with_source(node_id: u64, epoch: Epoch, source: S) -> FlakeResult<Self> {
        if node_id > NODE_MAX {
            return Err(FlakeError::NodeIdExceedsMax(node_id, NODE_MAX));
        }

        Ok(Self {
            node_id,
            epoch,
            state: Mutex::new(State {
                last_millis: 0,
                sequence: 0,
            }),
            source,
        })
    }

    /// Node id encoded into every ID this generator issues.
    pub fn node_id(&self) -> u64 {
        self.node_id
    }

    /// Epoch this generator measures time from.
    pub fn epoch(&self) -> Epoch {
        self.epoch
    }

    /// Clock source used by this generator.
    pub fn clock(&self) -> &S {
        &self.source
    }

    /// Issues a fresh ID, blocking if necessary.
    ///
    /// The only blocking behavior is a spin that re-samples the clock, taken
    /// when more than 4096 IDs are requested within one millisecond or when
    /// the clock has jumped backwards; in both cases the call returns as
    /// soon as the clock advances past the last issuance. There is no bound
    /// or timeout: with a frozen clock (e.g. a stalled
    /// [`ManualClock`](crate::ManualClock)) this spins forever — use
    /// [`try_next_id`](Self::try_next_id) in that situation.
    pub fn next_id(&self) -> SnowflakeId {
        loop {
            match self.try_next_id() {
                IssueStatus::Ready { id } => return id,
                IssueStatus::Pending { .. } => std::hint::spin_loop(),
            }
        }
    }

    /// Attempts a single issuance without blocking.
    ///
    /// Returns [`IssueStatus::Pending`] when the sequence for the current
    /// millisecond is exhausted, or when the sampled clock is behind the
    /// last issuance. A backward jump never produces an ID: issuance defers
    /// until the clock recovers, which keeps IDs from a single generator
    /// strictly increasing even across clock regressions.
    pub fn try_next_id(&self) -> IssueStatus {
        let now = self.source.current_millis();

        let mut state = self.state.lock();
        if now == state.last_millis {
            if state.sequence < SEQUENCE_MAX {
                state.sequence += 1;
                IssueStatus::Ready {
                    id: self.compose(now, state.sequence),
                }
            } else {
                IssueStatus::Pending { yield_for: 1 }
            }
        } else if now > state.last_millis {
            state.last_millis = now;
            state.sequence = 0;
            IssueStatus::Ready {
                id: self.compose(now, 0),
            }
        } else {
            IssueStatus::Pending {
                yield_for: state.last_millis - now,
            }
        }
    }

    fn compose(&self, now: i64, sequence: u64) -> SnowflakeId {
        SnowflakeId::from_parts(self.epoch.elapsed(now) as u64, self.node_id, sequence)
    }
}
