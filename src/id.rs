use {
    crate::{
        epoch::Epoch,
        error::{FlakeError, FlakeResult},
    },
    base64::{Engine as _, engine::general_purpose::STANDARD},
    std::{fmt, str::FromStr},
};

/// Number of bits to represent elapsed time in milliseconds since the epoch.
const TIME_BITS: u8 = 41;

/// Number of bits to represent the node (producer) id.
const NODE_BITS: u8 = 10;

/// Number of bits to represent the per-millisecond sequence counter.
const SEQUENCE_BITS: u8 = 12;

/// Maximum value for the node id.
pub const NODE_MAX: u64 = (1 << NODE_BITS) - 1;

/// Maximum value for the sequence counter.
pub const SEQUENCE_MAX: u64 = (1 << SEQUENCE_BITS) - 1;

/// Maximum value for the elapsed time field.
const TIME_MAX: u64 = (1 << TIME_BITS) - 1;

const NODE_SHIFT: u8 = SEQUENCE_BITS;
const TIME_SHIFT: u8 = NODE_BITS + SEQUENCE_BITS;

const BASE36_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Snowflake ID.
///
/// This is a wrapper around the raw `u64` data of an issued ID.
///
/// The ID is a 63-bit non-negative integer. The upper 41 bits represent the
/// time of issuance in milliseconds since the generator's [`Epoch`], the next
/// 10 bits the node id of the issuing generator, and the lower 12 bits the
/// sequence counter that disambiguates IDs issued within the same
/// millisecond.
///
/// Normally, you don't need to worry about the details of the
/// representation: obtain IDs from
/// [`SnowflakeGenerator::next_id()`](crate::SnowflakeGenerator::next_id()),
/// and use [`node_id()`](Self::node_id()), [`sequence()`](Self::sequence())
/// and [`timestamp_millis()`](Self::timestamp_millis()) to get the packed
/// fields back.
///
/// The decoding accessors are total: they accept any 63-bit value, whether
/// or not it was produced by a real issuance.
///
/// Raw integer ordering is issuance ordering for IDs from a single
/// generator, so `u64` comparison (via [`as_u64()`](Self::as_u64())) and the
/// derived `Ord` are meaningful.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SnowflakeId(u64);

impl fmt::Display for SnowflakeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<SnowflakeId> for u64 {
    fn from(id: SnowflakeId) -> Self {
        id.0
    }
}

impl From<u64> for SnowflakeId {
    fn from(raw: u64) -> Self {
        Self::from_raw(raw)
    }
}

impl FromStr for SnowflakeId {
    type Err = FlakeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self(s.parse::<u64>()?))
    }
}

impl SnowflakeId {
    /// Creates an ID from its raw `u64` representation.
    pub const fn from_raw(raw: u64) -> Self {
        Self(raw)
    }

    /// Packs the three fields into an ID.
    ///
    /// Out-of-range inputs are masked to their field width.
    pub(crate) const fn from_parts(elapsed_ms: u64, node_id: u64, sequence: u64) -> Self {
        Self(
            (elapsed_ms & TIME_MAX) << TIME_SHIFT
                | (node_id & NODE_MAX) << NODE_SHIFT
                | (sequence & SEQUENCE_MAX),
        )
    }

    /// Returns the raw `u64` value of the ID.
    pub const fn as_u64(&self) -> u64 {
        self.0
    }

    /// Milliseconds elapsed between the epoch and the issuance instant.
    pub const fn elapsed_millis(&self) -> u64 {
        self.0 >> TIME_SHIFT
    }

    /// Issuance instant as a Unix timestamp in milliseconds, resolved
    /// against the epoch the issuing generator was constructed with.
    pub const fn timestamp_millis(&self, epoch: Epoch) -> i64 {
        self.elapsed_millis() as i64 + epoch.unix_millis()
    }

    /// Node id of the issuing generator.
    pub const fn node_id(&self) -> u64 {
        (self.0 >> NODE_SHIFT) & NODE_MAX
    }

    /// Sequence counter within the issuance millisecond.
    pub const fn sequence(&self) -> u64 {
        self.0 & SEQUENCE_MAX
    }

    /// Returns the ID as a decimal string.
    pub fn to_decimal(&self) -> String {
        self.0.to_string()
    }

    /// Parses an ID from a decimal string.
    pub fn from_decimal(s: &str) -> FlakeResult<Self> {
        s.parse()
    }

    /// Returns the ID as a base-2 string.
    pub fn to_base2(&self) -> String {
        format!("{:b}", self.0)
    }

    /// Parses an ID from a base-2 string.
    pub fn from_base2(s: &str) -> FlakeResult<Self> {
        Ok(Self(u64::from_str_radix(s, 2)?))
    }

    /// Returns the ID as a lowercase base-36 string.
    pub fn to_base36(&self) -> String {
        let mut n = self.0;
        if n == 0 {
            return "0".to_string();
        }
        // 13 base-36 digits cover the full u64 range.
        let mut buf = [0u8; 13];
        let mut i = buf.len();
        while n > 0 {
            i -= 1;
            buf[i] = BASE36_ALPHABET[(n % 36) as usize];
            n /= 36;
        }
        // Digits are taken from an ASCII alphabet.
        String::from_utf8_lossy(&buf[i..]).into_owned()
    }

    /// Parses an ID from a base-36 string (case-insensitive).
    pub fn from_base36(s: &str) -> FlakeResult<Self> {
        Ok(Self(u64::from_str_radix(s, 36)?))
    }

    /// Returns the UTF-8 bytes of the decimal string.
    ///
    /// This is deliberately *not* a fixed-width binary encoding of the raw
    /// integer: the result is between 1 and 19 bytes long.
    pub fn to_bytes(&self) -> Vec<u8> {
        self.to_decimal().into_bytes()
    }

    /// Returns the standard base64 encoding of the decimal string's bytes.
    pub fn to_base64(&self) -> String {
        STANDARD.encode(self.to_bytes())
    }

    /// Parses an ID from its base64 form: decodes to the decimal string
    /// first, then parses that.
    pub fn from_base64(s: &str) -> FlakeResult<Self> {
        let bytes = STANDARD.decode(s)?;
        let decimal = std::str::from_utf8(&bytes)?;
        decimal.parse()
    }
}
