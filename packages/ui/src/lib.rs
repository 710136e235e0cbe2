//! This crate contains the form screens shared by every platform.
//!
//! Components read the backend client and form settings from context, so the
//! app must be wrapped in [`ClientProvider`].

mod client;
pub use client::{use_client, AppClient, ClientContext, ClientProvider};

mod task;
pub use task::use_cancellation;

mod form_status;
pub use form_status::FormStatus;

mod numeric_input;
pub use numeric_input::NumericInput;

mod register_form;
pub use register_form::RegisterForm;

mod profile_form;
pub use profile_form::ProfileForm;

mod exercise_log_form;
pub use exercise_log_form::ExerciseLogForm;

mod friend_requests;
pub use friend_requests::FriendRequestList;

mod user_search;
pub use user_search::UserSearch;
