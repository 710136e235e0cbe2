use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use chrono::Utc;
use forms::{ExerciseLogPayload, ProfilePayload, RegistrationPayload};

use crate::backend::Backend;
use crate::error::ApiError;
use crate::models::{ExerciseLogRow, FriendRequestRow, ProfileRow, UserInfo, UserSummary};

/// Calls kept for [`MemoryBackend::calls`]; older ones are dropped.
const CALL_HISTORY: usize = 64;

/// In-memory Backend for tests and offline use.
///
/// Writes go through the same payload → row mapping as the REST client, so a
/// test can assert on exactly what would have been stored.
#[derive(Clone, Debug, Default)]
pub struct MemoryBackend {
    state: Arc<Mutex<MemoryState>>,
}

#[derive(Debug, Default)]
struct MemoryState {
    next_id: u64,
    accounts: HashMap<String, String>,
    profiles: HashMap<String, ProfileRow>,
    logs: HashMap<String, ExerciseLogRow>,
    friend_requests: Vec<FriendRequestRow>,
    calls: Vec<String>,
    fail_next: Option<String>,
}

impl MemoryState {
    fn next_id(&mut self, prefix: &str) -> String {
        self.next_id += 1;
        format!("{}-{}", prefix, self.next_id)
    }

    /// Record the call and consume a pending injected failure.
    fn enter(&mut self, call: &str) -> Result<(), ApiError> {
        if self.calls.len() == CALL_HISTORY {
            self.calls.remove(0);
        }
        self.calls.push(call.to_string());
        match self.fail_next.take() {
            Some(message) => Err(ApiError::Status {
                status: 500,
                message,
            }),
            None => Ok(()),
        }
    }
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    fn state(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Make the next call fail with `message` as the server's wording.
    pub fn fail_next(&self, message: impl Into<String>) {
        self.state().fail_next = Some(message.into());
    }

    /// Names of the most recent calls, oldest first.
    pub fn calls(&self) -> Vec<String> {
        self.state().calls.clone()
    }

    pub fn insert_profile(&self, row: ProfileRow) {
        self.state().profiles.insert(row.id.clone(), row);
    }

    pub fn insert_friend_request(&self, row: FriendRequestRow) {
        self.state().friend_requests.push(row);
    }

    pub fn exercise_log(&self, log_id: &str) -> Option<ExerciseLogRow> {
        self.state().logs.get(log_id).cloned()
    }

    pub fn exercise_logs(&self) -> Vec<ExerciseLogRow> {
        let mut logs: Vec<_> = self.state().logs.values().cloned().collect();
        logs.sort_by(|a, b| a.logged_at.cmp(&b.logged_at).then(a.id.cmp(&b.id)));
        logs
    }
}

impl Backend for MemoryBackend {
    async fn register(&self, payload: &RegistrationPayload) -> Result<UserInfo, ApiError> {
        let mut state = self.state();
        state.enter("register")?;
        if state.accounts.contains_key(&payload.email) {
            return Err(ApiError::Status {
                status: 409,
                message: "User already registered".to_string(),
            });
        }
        let id = state.next_id("user");
        state.accounts.insert(payload.email.clone(), id.clone());
        state
            .profiles
            .insert(id.clone(), ProfileRow::empty(&id, Utc::now()));
        Ok(UserInfo {
            id,
            email: Some(payload.email.clone()),
        })
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRow>, ApiError> {
        let mut state = self.state();
        state.enter("get_profile")?;
        Ok(state.profiles.get(user_id).cloned())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        payload: &ProfilePayload,
    ) -> Result<ProfileRow, ApiError> {
        let mut state = self.state();
        state.enter("update_profile")?;
        let row = state
            .profiles
            .entry(user_id.to_string())
            .or_insert_with(|| ProfileRow::empty(user_id, Utc::now()));
        row.apply(payload, Utc::now());
        Ok(row.clone())
    }

    async fn create_exercise_log(
        &self,
        user_id: &str,
        payload: &ExerciseLogPayload,
    ) -> Result<ExerciseLogRow, ApiError> {
        let mut state = self.state();
        state.enter("create_exercise_log")?;
        let id = state.next_id("log");
        let row = ExerciseLogRow::from_payload(id.clone(), user_id.to_string(), payload, Utc::now())
            .check_variant()?;
        state.logs.insert(id, row.clone());
        Ok(row)
    }

    async fn update_exercise_log(
        &self,
        log_id: &str,
        payload: &ExerciseLogPayload,
    ) -> Result<ExerciseLogRow, ApiError> {
        let mut state = self.state();
        state.enter("update_exercise_log")?;
        let existing = state.logs.get(log_id).ok_or(ApiError::NotFound)?;
        let row = ExerciseLogRow::from_payload(
            existing.id.clone(),
            existing.user_id.clone(),
            payload,
            existing.logged_at,
        )
        .check_variant()?;
        state.logs.insert(log_id.to_string(), row.clone());
        Ok(row)
    }

    async fn list_friend_requests(&self, user_id: &str) -> Result<Vec<FriendRequestRow>, ApiError> {
        let mut state = self.state();
        state.enter("list_friend_requests")?;
        let mut rows: Vec<_> = state
            .friend_requests
            .iter()
            .filter(|r| r.requester_id == user_id || r.addressee_id == user_id)
            .cloned()
            .collect();
        rows.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(rows)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        let mut state = self.state();
        state.enter("search_users")?;
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(Vec::new());
        }
        let mut users: Vec<_> = state
            .profiles
            .values()
            .filter(|p| {
                p.display_name
                    .as_deref()
                    .is_some_and(|n| n.to_lowercase().contains(&needle))
            })
            .map(|p| UserSummary {
                id: p.id.clone(),
                display_name: p.display_name.clone(),
            })
            .collect();
        users.sort_by(|a, b| a.display_name.cmp(&b.display_name));
        users.truncate(20);
        Ok(users)
    }
}
