pub mod attendance;
pub mod group;

pub use attendance::{AttendanceState, GroupStatus, Summary};
pub use group::{GroupId, UnknownGroup, GROUP_COUNT};
