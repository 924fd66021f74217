//! Attendance round state
//!
//! Every group is either pending or has reported a count. The round is
//! complete once all six groups have reported.

use super::group::{GroupId, GROUP_COUNT};
use serde::de::{IgnoredAny, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Report status of a single group
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GroupStatus {
    Pending,
    Reported(u32),
}

impl From<Option<u32>> for GroupStatus {
    fn from(value: Option<u32>) -> Self {
        match value {
            Some(count) => GroupStatus::Reported(count),
            None => GroupStatus::Pending,
        }
    }
}

/// Counts reported so far in the current round
///
/// Persisted as a flat JSON object keyed by group id, with `null` for groups
/// that have not reported yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttendanceState {
    slots: [Option<u32>; GROUP_COUNT],
}

impl AttendanceState {
    /// A fresh round with every group pending
    pub fn new() -> Self {
        Self::default()
    }

    /// Count reported by a group, if any
    pub fn get(&self, group: GroupId) -> Option<u32> {
        self.slots[group.index()]
    }

    pub fn status(&self, group: GroupId) -> GroupStatus {
        self.get(group).into()
    }

    /// Record a group's count, replacing any earlier report in this round.
    /// Returns the previous value.
    pub fn record(&mut self, group: GroupId, count: u32) -> Option<u32> {
        self.slots[group.index()].replace(count)
    }

    /// Iterate over every group and its current value, in group order
    pub fn iter(&self) -> impl Iterator<Item = (GroupId, Option<u32>)> + '_ {
        GroupId::ALL.into_iter().map(move |group| (group, self.get(group)))
    }

    /// Number of groups that have reported
    pub fn reported(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_complete(&self) -> bool {
        self.slots.iter().all(Option::is_some)
    }

    pub fn is_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Snapshot of a completed round, or `None` while any group is pending
    pub fn summary(&self) -> Option<Summary> {
        let mut counts = [(GroupId::ALL[0], 0u32); GROUP_COUNT];
        for (slot, (group, value)) in counts.iter_mut().zip(self.iter()) {
            *slot = (group, value?);
        }
        let total = counts.iter().map(|(_, count)| u64::from(*count)).sum();
        Some(Summary { counts, total })
    }

    /// Put every group back to pending for the next round
    pub fn reset(&mut self) {
        self.slots = [None; GROUP_COUNT];
    }
}

/// Totals of a completed round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Summary {
    /// Count per group, in group order
    pub counts: [(GroupId, u32); GROUP_COUNT],
    /// Sum of all counts
    pub total: u64,
}

impl Serialize for AttendanceState {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut map = serializer.serialize_map(Some(GROUP_COUNT))?;
        for (group, value) in self.iter() {
            map.serialize_entry(&group, &value)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for AttendanceState {
    /// Missing group keys load as pending and unknown keys are skipped.
    /// A group value that is neither null nor a `u32` is an error.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct StateVisitor;

        impl<'de> Visitor<'de> for StateVisitor {
            type Value = AttendanceState;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of group ids to null or a non-negative count")
            }

            fn visit_map<A>(self, mut access: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut state = AttendanceState::new();
                while let Some(key) = access.next_key::<String>()? {
                    match key.parse::<GroupId>() {
                        Ok(group) => {
                            if let Some(count) = access.next_value::<Option<u32>>()? {
                                state.record(group, count);
                            }
                        }
                        Err(_) => {
                            access.next_value::<IgnoredAny>()?;
                        }
                    }
                }
                Ok(state)
            }
        }

        deserializer.deserialize_map(StateVisitor)
    }
}
