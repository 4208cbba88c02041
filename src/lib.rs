//! Thread-safe Snowflake ID generator and codec.
//!
//! Generates globally unique, roughly time-ordered 63-bit identifiers
//! across many independent producers with no coordination service. Each ID
//! packs three fields, most significant first:
//!
//! - 41 bits — milliseconds elapsed since a configurable [`Epoch`],
//! - 10 bits — node id of the issuing [`SnowflakeGenerator`],
//! - 12 bits — per-millisecond sequence counter.
//!
//! A single generator serializes issuance behind a mutex and, for a
//! non-decreasing clock, issues strictly increasing integers. Uniqueness
//! across producers requires distinct node ids, which callers must arrange
//! themselves ([`SnowflakeGenerator::from_host_identity()`] offers a
//! best-effort hostname-derived id).
//!
//! # Example
//!
//! ```
//! use flake_gen::{SnowflakeGenerator, SnowflakeId};
//!
//! let g = SnowflakeGenerator::new(42).unwrap();
//!
//! let id = g.next_id();
//! assert_eq!(id.node_id(), 42);
//!
//! // IDs round-trip through their textual forms.
//! let parsed: SnowflakeId = id.to_decimal().parse().unwrap();
//! assert_eq!(parsed, id);
//! ```

pub mod error;

mod epoch;
mod generator;
mod id;
#[cfg(feature = "serde")]
mod serde;
mod source;

pub use {
    epoch::{Epoch, TWITTER_EPOCH},
    generator::{IssueStatus, SnowflakeGenerator},
    id::{NODE_MAX, SEQUENCE_MAX, SnowflakeId},
    source::{ManualClock, TimestampSource, UtcClock},
};
