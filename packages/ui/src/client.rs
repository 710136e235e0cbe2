//! Backend client context for the form screens.
//!
//! The launcher builds one [`AppClient`] from [`api::Settings`] and hands it to
//! [`ClientProvider`]; screens reach it with [`use_client`].
//! - **Configured** (non-empty key): [`api::RestBackend`]
//! - **Unconfigured**: [`api::MemoryBackend`], so the screens stay usable offline

use api::{
    ApiError, Backend, ExerciseLogRow, FriendRequestRow, MemoryBackend, ProfileRow, RestBackend,
    Settings, UserInfo, UserSummary,
};
use dioxus::prelude::*;
use forms::{ExerciseLogPayload, FormSettings, ProfilePayload, RegistrationPayload};

#[derive(Clone, Debug)]
pub enum AppClient {
    Rest(RestBackend),
    Memory(MemoryBackend),
}

impl AppClient {
    pub fn from_settings(settings: &Settings) -> Result<Self, ApiError> {
        if settings.key.is_empty() {
            tracing::warn!("no backend key configured, using in-memory backend");
            return Ok(Self::Memory(MemoryBackend::new()));
        }
        tracing::info!(url = %settings.base_url(), "using REST backend");
        Ok(Self::Rest(RestBackend::new(settings)?))
    }
}

macro_rules! delegate {
    ($self:ident, $backend:ident => $call:expr) => {
        match $self {
            AppClient::Rest($backend) => $call,
            AppClient::Memory($backend) => $call,
        }
    };
}

impl Backend for AppClient {
    async fn register(&self, payload: &RegistrationPayload) -> Result<UserInfo, ApiError> {
        delegate!(self, b => b.register(payload).await)
    }

    async fn get_profile(&self, user_id: &str) -> Result<Option<ProfileRow>, ApiError> {
        delegate!(self, b => b.get_profile(user_id).await)
    }

    async fn update_profile(
        &self,
        user_id: &str,
        payload: &ProfilePayload,
    ) -> Result<ProfileRow, ApiError> {
        delegate!(self, b => b.update_profile(user_id, payload).await)
    }

    async fn create_exercise_log(
        &self,
        user_id: &str,
        payload: &ExerciseLogPayload,
    ) -> Result<ExerciseLogRow, ApiError> {
        delegate!(self, b => b.create_exercise_log(user_id, payload).await)
    }

    async fn update_exercise_log(
        &self,
        log_id: &str,
        payload: &ExerciseLogPayload,
    ) -> Result<ExerciseLogRow, ApiError> {
        delegate!(self, b => b.update_exercise_log(log_id, payload).await)
    }

    async fn list_friend_requests(&self, user_id: &str) -> Result<Vec<FriendRequestRow>, ApiError> {
        delegate!(self, b => b.list_friend_requests(user_id).await)
    }

    async fn search_users(&self, query: &str) -> Result<Vec<UserSummary>, ApiError> {
        delegate!(self, b => b.search_users(query).await)
    }
}

/// Everything a form screen needs from its surroundings.
#[derive(Clone)]
pub struct ClientContext {
    pub client: AppClient,
    pub settings: FormSettings,
    /// The signed-in user, set after registration.
    pub user: Signal<Option<UserInfo>>,
}

impl ClientContext {
    pub fn user_id(&self) -> Option<String> {
        self.user.read().as_ref().map(|u| u.id.clone())
    }
}

pub fn use_client() -> ClientContext {
    use_context::<ClientContext>()
}

/// Provides the backend client, form settings and session to its children.
#[component]
pub fn ClientProvider(backend: Settings, settings: FormSettings, children: Element) -> Element {
    let user = use_signal(|| Option::<UserInfo>::None);

    use_context_provider(move || {
        let client = AppClient::from_settings(&backend).unwrap_or_else(|e| {
            tracing::error!("Failed to build backend client: {}", e);
            AppClient::Memory(MemoryBackend::new())
        });
        ClientContext {
            client,
            settings,
            user,
        }
    });

    rsx! {
        {children}
    }
}
