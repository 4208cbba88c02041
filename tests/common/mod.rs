// Conventional Twitter snowflake epoch: 2010-11-04 01:42:54.657 UTC, in
// milliseconds since the Unix epoch. Scenario tests pin field values against
// a manual clock positioned relative to this instant.
pub const EPOCH: i64 = 1_288_834_974_657;
