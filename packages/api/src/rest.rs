//! # REST client for the hosted database
//!
//! [`RestBackend`] talks to the database's REST gateway and auth service:
//!
//! | Call | Primary route | Fallback |
//! |------|---------------|----------|
//! | `register` | `POST /auth/v1/signup` | — |
//! | `get_profile` | `GET /rest/v1/profiles?id=eq.{id}` | — |
//! | `update_profile` | `POST /rest/v1/rpc/update_profile` | `PATCH /rest/v1/profiles?id=eq.{id}` |
//! | `create_exercise_log` | `POST /rest/v1/exercise_logs` | — |
//! | `update_exercise_log` | `PATCH /rest/v1/exercise_logs?id=eq.{id}` | — |
//! | `list_friend_requests` | `POST /rest/v1/rpc/get_friend_requests` | `GET /rest/v1/friend_requests?or=(...)` |
//! | `search_users` | `GET /rest/v1/profiles?display_name=ilike.*q*` | — |
//!
//! Remote procedures are not deployed in every environment. When the gateway
//! answers 404 for a procedure (code `PGRST202`), the call is repeated as the
//! equivalent table request. Row-level security applies to both paths, so the
//! fallback grants nothing the procedure would not.
//!
//! Table reads always send an explicit `select=` column list matching the row
//! types in [`crate::models`], which decode with `deny_unknown_fields`.

use std::sync::{Arc, PoisonError, RwLock};
#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

use forms::{ExerciseLogPayload, ProfilePayload, RegistrationPayload};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::backend::Backend;
use crate::error::{status_error, ApiError, ErrorBody};
use crate::models::{ExerciseLogRow, FriendRequestRow, ProfileRow, UserInfo, UserSummary};
use crate::settings::Settings;

const MISSING_PROCEDURE_CODES: &[&str] = &["PGRST202", "42883"];
const SEARCH_LIMIT: &str = "20";

/// HTTP client bound to one backend project.
///
/// Clones share the session: once `register` receives an access token, every
/// clone sends it as the bearer instead of the anon key.
#[derive(Clone, Debug)]
pub struct RestBackend {
    http: reqwest::Client,
    base_url: String,
    key: String,
    access_token: Arc<RwLock<Option<String>>>,
}

#[derive(Serialize)]
struct UpdateProfileArgs<'a> {
    p_user_id: &'a str,
    #[serde(flatten)]
    profile: &'a ProfilePayload,
}

#[derive(Serialize)]
struct UserArgs<'a> {
    p_user_id: &'a str,
}

#[derive(Serialize)]
struct NewExerciseLog<'a> {
    user_id: &'a str,
    #[serde(flatten)]
    log: &'a ExerciseLogPayload,
}

/// The auth service returns either the user itself or a session wrapping it.
#[derive(Deserialize)]
struct SignupResponse {
    #[serde(default)]
    user: Option<UserInfo>,
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    email: Option<String>,
    /// Absent when the project requires email confirmation before sign-in.
    #[serde(default)]
    access_token: Option<String>,
}

impl RestBackend {
    pub fn new(settings: &Settings) -> Result<Self, ApiError> {
        let builder = reqwest::Client::builder();
        #[cfg(not(target_arch = "wasm32"))]
        let builder = builder.timeout(Duration::from_secs(settings.timeout));

        Ok(Self {
            http: builder.build()?,
            base_url: settings.base_url().to_string(),
            key: settings.key.clone(),
            access_token: Arc::default(),
        })
    }

    /// Send the signed-in user's access token so row-level security sees them.
    pub fn set_access_token(&self, token: Option<String>) {
        *self
            .access_token
            .write()
            .unwrap_or_else(PoisonError::into_inner) = token;
    }

    pub fn access_token(&self) -> Option<String> {
        self.access_token
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let bearer = self.access_token().unwrap_or_else(|| self.key.clone());
        self.http
            .request(method, format!("{}/{}", self.base_url, path))
            .header("apikey", &self.key)
            .bearer_auth(bearer)
    }

    fn table(&self, method: Method, table: &str, columns: &str) -> RequestBuilder {
        self.request(method, &format!("rest/v1/{}", table))
            .query(&[("select", columns)])
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let response = request.send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            let err = status_error(status.as_u16(), &body);
            tracing::error!(status = status.as_u16(), "backend request failed: {}", err);
            return Err(err);
        }
        Ok(serde_json::from_str(&body)?)
    }

    /// Write request that returns exactly one row.
    async fn single<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ApiError> {
        let rows: Vec<T> = self
            .send(request.header("Prefer", "return=representation"))
            .await?;
        rows.into_iter().next().ok_or(ApiError::NotFound)
    }

    /// Call a remote procedure. `Ok(None)` means the procedure does not exist.
    async fn rpc<T: DeserializeOwned>(
        &self,
        name: &str,
        args: &impl Serialize,
    ) -> Result<Option<T>, ApiError> {
        let response = self
            .request(Method::POST, &format!("rest/v1/rpc/{}", name))
            .json(args)
            .send()
            .await?;
        let status = response.status();
        let body = response.text().await?;
        if status == StatusCode::NOT_FOUND && is_missing_procedure(&body) {
            tracing::warn!(procedure = name, "remote procedure missing, falling back to table request");
            return Ok(None);
        }
        if !status.is_success() {
            let err = status_error(status.as_u16(), &body);
            tracing::error!(procedure = name, status = status.as_u16(), "rpc failed: {}", err);
            return Err(err);
        }
        Ok(Some(serde_json::from_str(&body)?))
    }
}

fn is_missing_procedure(body: &str) -> bool {
    match ErrorBody::parse(body).code() {
        Some(code) => MISSING_PROCEDURE_CODES.contains(&code.as_str()),
        None => true,
    }
}

/// Strip characters with meaning in gateway filter syntax.
fn search_pattern(query: &str) -> Option<String> {
    let cleaned: String = query
        .chars()
        .filter(|c| !matches!(c, ',' | '(' | ')' | '*' | '%' | '.' | ':'))
        .collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        None
    } else {
        Some(format!("ilike.*{}*", cleaned))
    }
}

impl Backend for RestBackend {
    async fn register(&self, payload: &RegistrationPayload) -> Result<UserInfo, ApiError> {
        let response: SignupResponse = self
            .send(self.request(Method::POST, "auth/v1/signup").json(payload))
            .await?;
        let user = match response.user {
            Some(user) => user,
            None => match response.id {
                Some(id) => UserInfo {
                    id,
                    email: response.email,
                },
                None => {
                    return Err(ApiError::Shape("sign-up response without a user".to_string()))
                }
            },
        };
        if let Some(token) = response.access_token {
            self.set_access_token(Some(token));
        }
        tracing::info!(user = %user.id, "account registered");
        Ok(user)
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRow>, ApiError> {
        let rows: Vec<ProfileRow> = self
            .send(
                self.table(Method::GET, "profiles", ProfileRow::COLUMNS)
                    .query(&[("id", format!("eq.{}", user_id))]),
            )
            .await?;
        Ok(rows.into_iter().next())
    }

    async fn update_profile(
        &self,
        user_id: &str,
        payload: &ProfilePayload,
    ) -> Result<ProfileRow, ApiError> {
        let args = UpdateProfileArgs {
            p_user_id: user_id,
            profile: payload,
        };
        let row = match self.rpc::<ProfileRow>("update_profile", &args).await? {
            Some(row) => row,
            None => {
                self.single(
                    self.table(Method::PATCH, "profiles", ProfileRow::COLUMNS)
                        .query(&[("id", format!("eq.{}", user_id))])
                        .json(payload),
                )
                .await?
            }
        };
        tracing::info!(user = %user_id, "profile updated");
        Ok(row)
    }

    async fn create_exercise_log(
        &self,
        user_id: &str,
        payload: &ExerciseLogPayload,
    ) -> Result<ExerciseLogRow, ApiError> {
        let body = NewExerciseLog {
            user_id,
            log: payload,
        };
        let row: ExerciseLogRow = self
            .single(
                self.table(Method::POST, "exercise_logs", ExerciseLogRow::COLUMNS)
                    .json(&body),
            )
            .await?;
        tracing::info!(log = %row.id, "exercise log created");
        row.check_variant()
    }

    async fn update_exercise_log(
        &self,
        log_id: &str,
        payload: &ExerciseLogPayload,
    ) -> Result<ExerciseLogRow, ApiError> {
        let row: ExerciseLogRow = self
            .single(
                self.table(Method::PATCH, "exercise_logs", ExerciseLogRow::COLUMNS)
                    .query(&[("id", format!("eq.{}", log_id))])
                    .json(payload),
            )
            .await?;
        tracing::info!(log = %row.id, "exercise log updated");
        row.check_variant()
    }

    async fn list_friend_requests(&self, user_id: &str) -> Result<Vec<FriendRequestRow>, ApiError> {
        let args = UserArgs { p_user_id: user_id };
        if let Some(rows) = self.rpc("get_friend_requests", &args).await? {
            return Ok(rows);
        }
        self.send(
            self.table(Method::GET, "friend_requests", FriendRequestRow::COLUMNS)
                .query(&[
                    (
                        "or",
                        format!("(requester_id.eq.{0},addressee_id.eq.{0})", user_id),
                    ),
                    ("order", "created_at.desc".to_string()),
                ]),
        )
        .await
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        let Some(pattern) = search_pattern(query) else {
            return Ok(Vec::new());
        };
        self.send(
            self.table(Method::GET, "profiles", UserSummary::COLUMNS)
                .query(&[("display_name", pattern.as_str()), ("limit", SEARCH_LIMIT)]),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::FriendRequestStatus;
    use forms::{DistanceUnit, ExerciseCategory, HeightUnit, WeightUnit};
    use httpmock::prelude::*;
    use serde_json::json;

    fn backend(server: &MockServer) -> RestBackend {
        RestBackend::new(&Settings {
            url: server.base_url(),
            key: "anon".to_string(),
            timeout: 5,
        })
        .unwrap()
    }

    fn profile_json() -> serde_json::Value {
        json!({
            "id": "u1",
            "display_name": "Sam",
            "height_cm": 182.88,
            "weight_lb": 154.32,
            "height_unit": "ft_in",
            "weight_unit": "kg",
            "distance_unit": "km",
            "daily_step_goal": 10000,
            "date_of_birth": null,
            "updated_at": "2026-10-01T12:00:00Z"
        })
    }

    fn profile_payload() -> ProfilePayload {
        ProfilePayload {
            height_cm: 182.88,
            weight_lb: 154.32,
            height_unit: HeightUnit::FtIn,
            weight_unit: WeightUnit::Kg,
            distance_unit: DistanceUnit::Km,
            daily_step_goal: Some(10_000),
            date_of_birth: None,
        }
    }

    #[tokio::test]
    async fn test_update_profile_uses_rpc() {
        let server = MockServer::start_async().await;
        let rpc = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/rpc/update_profile")
                    .header("apikey", "anon")
                    .header("authorization", "Bearer anon");
                then.status(200).json_body(profile_json());
            })
            .await;

        let row = backend(&server)
            .update_profile("u1", &profile_payload())
            .await
            .unwrap();
        rpc.assert_async().await;
        assert_eq!(row.height_cm, Some(182.88));
    }

    #[tokio::test]
    async fn test_update_profile_falls_back_when_rpc_missing() {
        let server = MockServer::start_async().await;
        let rpc = server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/rpc/update_profile");
                then.status(404).json_body(json!({
                    "code": "PGRST202",
                    "message": "Could not find the function public.update_profile"
                }));
            })
            .await;
        let patch = server
            .mock_async(|when, then| {
                when.method(PATCH)
                    .path("/rest/v1/profiles")
                    .query_param("id", "eq.u1")
                    .query_param("select", ProfileRow::COLUMNS)
                    .header("prefer", "return=representation");
                then.status(200).json_body(json!([profile_json()]));
            })
            .await;

        let row = backend(&server)
            .update_profile("u1", &profile_payload())
            .await
            .unwrap();
        rpc.assert_async().await;
        patch.assert_async().await;
        assert_eq!(row.id, "u1");
    }

    #[tokio::test]
    async fn test_rpc_error_other_than_missing_is_surfaced() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/rpc/update_profile");
                then.status(403).json_body(json!({
                    "code": "42501",
                    "message": "new row violates row-level security policy"
                }));
            })
            .await;

        let err = backend(&server)
            .update_profile("u1", &profile_payload())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "new row violates row-level security policy");
    }

    #[tokio::test]
    async fn test_create_exercise_log_rejects_unexpected_shape() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/rest/v1/exercise_logs");
                then.status(201).json_body(json!([{
                    "id": "log-1",
                    "user_id": "u1",
                    "name": "Bench press",
                    "category": "strength",
                    "minutes": null,
                    "sets": 4,
                    "distance_km": null,
                    "reps_min": 8,
                    "reps_max": 12,
                    "intensity": null,
                    "notes": null,
                    "logged_at": "2026-10-01T07:30:00Z",
                    "calories": 120
                }]));
            })
            .await;

        let payload = ExerciseLogPayload {
            name: "Bench press".to_string(),
            category: ExerciseCategory::Strength,
            minutes: None,
            sets: Some(4),
            distance_km: None,
            reps_min: Some(8),
            reps_max: Some(12),
            intensity: None,
            notes: None,
        };
        let err = backend(&server)
            .create_exercise_log("u1", &payload)
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Decode(_)));
    }

    #[tokio::test]
    async fn test_register_reads_nested_user() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(200).json_body(json!({
                    "access_token": "jwt",
                    "user": { "id": "u9", "email": "someone@example.com", "aud": "authenticated" }
                }));
            })
            .await;

        let user = backend(&server)
            .register(&RegistrationPayload {
                email: "someone@example.com".to_string(),
                password: "Tr0ub4dor&9!".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, "u9");
        assert_eq!(user.email.as_deref(), Some("someone@example.com"));
    }

    #[tokio::test]
    async fn test_signup_token_is_sent_on_later_writes() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/auth/v1/signup")
                    .header("authorization", "Bearer anon");
                then.status(200).json_body(json!({
                    "access_token": "jwt-u1",
                    "user": { "id": "u1", "email": "someone@example.com" }
                }));
            })
            .await;
        let rpc = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/rpc/update_profile")
                    .header("apikey", "anon")
                    .header("authorization", "Bearer jwt-u1");
                then.status(200).json_body(profile_json());
            })
            .await;

        let backend = backend(&server);
        let user = backend
            .register(&RegistrationPayload {
                email: "someone@example.com".to_string(),
                password: "Tr0ub4dor&9!".to_string(),
            })
            .await
            .unwrap();
        // The context hands out clones; they share the session.
        let shared = backend.clone();
        shared.update_profile(&user.id, &profile_payload()).await.unwrap();
        rpc.assert_async().await;
        assert_eq!(backend.access_token().as_deref(), Some("jwt-u1"));
    }

    #[tokio::test]
    async fn test_signup_without_session_keeps_anon_key() {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/auth/v1/signup");
                then.status(200)
                    .json_body(json!({ "id": "u2", "email": "someone@example.com" }));
            })
            .await;

        let backend = backend(&server);
        let user = backend
            .register(&RegistrationPayload {
                email: "someone@example.com".to_string(),
                password: "Tr0ub4dor&9!".to_string(),
            })
            .await
            .unwrap();
        assert_eq!(user.id, "u2");
        assert_eq!(backend.access_token(), None);
    }

    #[tokio::test]
    async fn test_friend_requests_fall_back_to_table() {
        let server = MockServer::start_async().await;
        let rpc = server
            .mock_async(|when, then| {
                when.method(POST)
                    .path("/rest/v1/rpc/get_friend_requests")
                    .json_body(json!({ "p_user_id": "me" }));
                then.status(404).json_body(json!({
                    "code": "PGRST202",
                    "message": "Could not find the function public.get_friend_requests"
                }));
            })
            .await;
        let table = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/friend_requests")
                    .query_param("select", FriendRequestRow::COLUMNS)
                    .query_param("or", "(requester_id.eq.me,addressee_id.eq.me)")
                    .query_param("order", "created_at.desc");
                then.status(200).json_body(json!([
                    {
                        "id": "fr-2",
                        "requester_id": "alex",
                        "addressee_id": "me",
                        "requester_name": "Alex",
                        "addressee_name": "Me",
                        "status": "pending",
                        "created_at": "2026-10-02T09:00:00Z"
                    },
                    {
                        "id": "fr-1",
                        "requester_id": "me",
                        "addressee_id": "jordan",
                        "requester_name": "Me",
                        "addressee_name": "Jordan",
                        "status": "accepted",
                        "created_at": "2026-10-01T09:00:00Z"
                    }
                ]));
            })
            .await;

        let rows = backend(&server).list_friend_requests("me").await.unwrap();
        rpc.assert_async().await;
        table.assert_async().await;
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].id, "fr-2");
        assert_eq!(rows[1].status, FriendRequestStatus::Accepted);
    }

    #[tokio::test]
    async fn test_search_sends_sanitized_pattern() {
        let server = MockServer::start_async().await;
        let search = server
            .mock_async(|when, then| {
                when.method(GET)
                    .path("/rest/v1/profiles")
                    .query_param("select", UserSummary::COLUMNS)
                    .query_param("display_name", "ilike.*Sam*")
                    .query_param("limit", "20");
                then.status(200)
                    .json_body(json!([{ "id": "u3", "display_name": "Sammy" }]));
            })
            .await;

        let users = backend(&server).search_users(" Sam*, ").await.unwrap();
        search.assert_async().await;
        assert_eq!(users.len(), 1);
        assert_eq!(users[0].display_name(), "Sammy");
    }

    #[tokio::test]
    async fn test_search_with_blank_query_skips_request() {
        let server = MockServer::start_async().await;
        let users = backend(&server).search_users(" ** ").await.unwrap();
        assert!(users.is_empty());
    }

    #[test]
    fn test_search_pattern() {
        assert_eq!(search_pattern("Sam"), Some("ilike.*Sam*".to_string()));
        assert_eq!(search_pattern("a,b(c)"), Some("ilike.*abc*".to_string()));
        assert_eq!(search_pattern("  "), None);
    }

    #[test]
    fn test_missing_procedure_detection() {
        assert!(is_missing_procedure(r#"{"code":"PGRST202","message":"Could not find"}"#));
        assert!(is_missing_procedure(""));
        assert!(!is_missing_procedure(r#"{"code":"PGRST116","message":"no rows"}"#));
    }
}
