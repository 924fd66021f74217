//! Reporting groups
//!
//! Attendance is collected from a fixed set of six groups, identified by the
//! strings "1" through "6" both in chat commands and in the persisted record.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Number of groups that report in every round
pub const GROUP_COUNT: usize = 6;

/// Identifier of one reporting group (1..=6)
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct GroupId(u8);

impl GroupId {
    /// All groups, in reporting order
    pub const ALL: [GroupId; GROUP_COUNT] = [
        GroupId(1),
        GroupId(2),
        GroupId(3),
        GroupId(4),
        GroupId(5),
        GroupId(6),
    ];

    /// Build a group id, returning `None` outside 1..=6
    pub fn new(number: u8) -> Option<Self> {
        if (1..=GROUP_COUNT as u8).contains(&number) {
            Some(Self(number))
        } else {
            None
        }
    }

    /// Group number as written in commands
    pub fn number(self) -> u8 {
        self.0
    }

    /// Zero-based slot index
    pub(crate) fn index(self) -> usize {
        usize::from(self.0 - 1)
    }
}

impl fmt::Display for GroupId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned when a string does not name one of the six groups
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown group: {0:?}")]
pub struct UnknownGroup(pub String);

impl FromStr for GroupId {
    type Err = UnknownGroup;

    /// Only the exact strings "1".."6" are accepted ("01", "+1" are not)
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|group| group.to_string() == s)
            .ok_or_else(|| UnknownGroup(s.to_string()))
    }
}

impl Serialize for GroupId {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GroupId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
