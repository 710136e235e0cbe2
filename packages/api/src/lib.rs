//! # API crate: typed access to the hosted fitness backend
//!
//! The screens in `ui` never build requests themselves. They validate a draft
//! with the `forms` crate and hand the resulting payload to a [`Backend`].
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`backend`] | The [`Backend`] trait every screen talks to |
//! | [`rest`] | [`RestBackend`]: REST gateway and auth service client, with table fallback for missing procedures |
//! | [`memory`] | [`MemoryBackend`]: in-process implementation used by tests and offline builds |
//! | [`models`] | Row types decoded from the backend and the friend request projection |
//! | [`settings`] | Connection settings from `config.toml`, `.env` and `BACKEND_*` variables |
//! | [`error`] | [`ApiError`] and its conversion into a form-level error |
//!
//! ## Calls
//!
//! - **Account**: `register`
//! - **Profile**: `get_profile`, `update_profile`
//! - **Exercise log**: `create_exercise_log`, `update_exercise_log`
//! - **Friends**: `list_friend_requests`, `search_users`

pub mod backend;
pub mod error;
pub mod memory;
pub mod models;
pub mod rest;
pub mod settings;

pub use backend::Backend;
pub use error::ApiError;
pub use memory::MemoryBackend;
pub use models::{
    ExerciseLogRow, FriendRequestDisplay, FriendRequestRow, FriendRequestStatus, ProfileRow,
    RequestDirection, UserInfo, UserSummary,
};
pub use rest::RestBackend;
pub use settings::Settings;
