//! # Backend records
//!
//! Explicit row types for every table the client reads. Rows are requested with
//! explicit column lists and decoded with `deny_unknown_fields`, so a schema change
//! on the server surfaces as a decode error instead of silently shifting data.
//!
//! | Module | Records |
//! |--------|---------|
//! | [`user`] | [`UserInfo`] from the auth service, [`UserSummary`] for search results |
//! | [`profile`] | [`ProfileRow`] from `profiles` |
//! | [`exercise`] | [`ExerciseLogRow`] from `exercise_logs`, with its category invariant |
//! | [`friend`] | [`FriendRequestRow`] and the privacy-preserving [`FriendRequestDisplay`] |

pub mod exercise;
pub mod friend;
pub mod profile;
pub mod user;

pub use exercise::ExerciseLogRow;
pub use friend::{FriendRequestDisplay, FriendRequestRow, FriendRequestStatus, RequestDirection};
pub use profile::ProfileRow;
pub use user::{UserInfo, UserSummary};
