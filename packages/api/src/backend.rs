use std::future::Future;

use forms::{ExerciseLogPayload, ProfilePayload, RegistrationPayload};

use crate::error::ApiError;
use crate::models::{ExerciseLogRow, FriendRequestRow, ProfileRow, UserInfo, UserSummary};

/// Async interface to the hosted backend.
///
/// Every call takes an already-validated payload from the `forms` crate.
/// Implementations: [`crate::RestBackend`] for the real service and
/// [`crate::MemoryBackend`] for tests and offline use.
pub trait Backend {
    fn register(
        &self,
        payload: &RegistrationPayload,
    ) -> impl Future<Output = Result<UserInfo, ApiError>>;

    fn get_profile(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Option<ProfileRow>, ApiError>>;

    fn update_profile(
        &self,
        user_id: &str,
        payload: &ProfilePayload,
    ) -> impl Future<Output = Result<ProfileRow, ApiError>>;

    fn create_exercise_log(
        &self,
        user_id: &str,
        payload: &ExerciseLogPayload,
    ) -> impl Future<Output = Result<ExerciseLogRow, ApiError>>;

    fn update_exercise_log(
        &self,
        log_id: &str,
        payload: &ExerciseLogPayload,
    ) -> impl Future<Output = Result<ExerciseLogRow, ApiError>>;

    fn list_friend_requests(
        &self,
        user_id: &str,
    ) -> impl Future<Output = Result<Vec<FriendRequestRow>, ApiError>>;

    fn search_users(
        &self,
        query: &str,
    ) -> impl Future<Output = Result<Vec<UserSummary>, ApiError>>;
}
