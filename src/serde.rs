//! Structured (de)serialization of [`SnowflakeId`].
//!
//! IDs serialize as their *quoted decimal string* rather than as a native
//! integer: 63-bit values overflow the 53-bit mantissa of IEEE-754 doubles,
//! so numeric representations silently lose precision in JSON consumers.

use {
    crate::id::SnowflakeId,
    serde::{Deserialize, Deserializer, Serialize, Serializer, de},
    std::fmt,
};

impl Serialize for SnowflakeId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(&self.to_decimal())
    }
}

impl<'de> Deserialize<'de> for SnowflakeId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct DecimalVisitor;

        impl de::Visitor<'_> for DecimalVisitor {
            type Value = SnowflakeId;

            fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
                formatter.write_str("a decimal string holding a snowflake ID")
            }

            fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
            where
                E: de::Error,
            {
                SnowflakeId::from_decimal(v).map_err(de::Error::custom)
            }
        }

        deserializer.deserialize_str(DecimalVisitor)
    }
}
