//! # Submit state machine
//!
//! Each form owns a [`FormState`] that moves through
//!
//! ```text
//! Editing ──submit──▶ Validating ──ok──▶ Submitting ──ok──▶ Success
//!    ▲                    │                  │
//!    └──── first error ───┘                  └──err──▶ Failed (editable)
//! ```
//!
//! Validation is synchronous and fail-fast: the first failing field becomes the
//! single displayed error and no backend call is made. A backend failure keeps
//! the server message verbatim and leaves the form editable; there is no
//! automatic retry.
//!
//! Backend calls run under a [`CancellationToken`] owned by the component that
//! started them. [`run_cancellable`] drops the call when the token fires, and
//! [`submit`] leaves the state untouched in that case, so a response arriving
//! after the screen went away is discarded instead of applied.

use std::fmt::Display;
use std::future::Future;

use tokio_util::sync::CancellationToken;

use crate::error::FormError;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum FormPhase {
    #[default]
    Editing,
    Validating,
    Submitting,
    Success,
    Failed,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormState {
    phase: FormPhase,
    error: Option<FormError>,
}

impl FormState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// The message to show under the form, if any.
    pub fn error(&self) -> Option<&FormError> {
        self.error.as_ref()
    }

    pub fn is_submitting(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn is_editable(&self) -> bool {
        matches!(
            self.phase,
            FormPhase::Editing | FormPhase::Failed | FormPhase::Success
        )
    }

    /// A field changed. Leaves `Failed`/`Success`; the last error stays visible
    /// until the next submit attempt.
    pub fn edit(&mut self) {
        if self.is_editable() {
            self.phase = FormPhase::Editing;
        }
    }

    /// Run validation for a submit attempt.
    ///
    /// Returns the payload and enters `Submitting` when validation passes. Returns
    /// `None` when the form is already submitting or validation fails; in the
    /// latter case the error is recorded and the form is back in `Editing`.
    pub fn begin_submit<T>(
        &mut self,
        validate: impl FnOnce() -> Result<T, FormError>,
    ) -> Option<T> {
        if !self.is_editable() {
            tracing::debug!("submit ignored while {:?}", self.phase);
            return None;
        }
        self.phase = FormPhase::Validating;
        self.error = None;
        match validate() {
            Ok(payload) => {
                self.phase = FormPhase::Submitting;
                Some(payload)
            }
            Err(err) => {
                tracing::debug!(field = ?err.field(), "validation rejected submit");
                self.phase = FormPhase::Editing;
                self.error = Some(err);
                None
            }
        }
    }

    /// Record the backend outcome of the submission in flight.
    pub fn finish<E: Display>(&mut self, result: Result<(), E>) {
        if self.phase != FormPhase::Submitting {
            return;
        }
        match result {
            Ok(()) => {
                self.phase = FormPhase::Success;
                self.error = None;
            }
            Err(err) => {
                let message = err.to_string();
                tracing::error!("submit failed: {}", message);
                self.phase = FormPhase::Failed;
                self.error = Some(FormError::Backend(message));
            }
        }
    }
}

/// Result of a call raced against a cancellation token.
#[derive(Clone, Debug, PartialEq)]
pub enum Submission<T> {
    Completed(T),
    Cancelled,
}

impl<T> Submission<T> {
    pub fn completed(self) -> Option<T> {
        match self {
            Submission::Completed(value) => Some(value),
            Submission::Cancelled => None,
        }
    }
}

/// Await `fut` unless `token` is cancelled first (or already).
pub async fn run_cancellable<F: Future>(token: &CancellationToken, fut: F) -> Submission<F::Output> {
    if token.is_cancelled() {
        return Submission::Cancelled;
    }
    let output = tokio::select! {
        biased;
        _ = token.cancelled() => return Submission::Cancelled,
        output = fut => output,
    };
    if token.is_cancelled() {
        Submission::Cancelled
    } else {
        Submission::Completed(output)
    }
}

/// Validate, call the backend and record the outcome on `state`.
///
/// Returns the backend's value on success. Nothing is called when validation
/// fails, and `state` is left as-is when the call is cancelled.
pub async fn submit<T, R, E, Fut>(
    state: &mut FormState,
    token: &CancellationToken,
    validate: impl FnOnce() -> Result<T, FormError>,
    call: impl FnOnce(T) -> Fut,
) -> Option<R>
where
    Fut: Future<Output = Result<R, E>>,
    E: Display,
{
    let payload = state.begin_submit(validate)?;
    match run_cancellable(token, call(payload)).await {
        Submission::Cancelled => {
            tracing::debug!("submission cancelled, result discarded");
            None
        }
        Submission::Completed(Ok(value)) => {
            state.finish::<E>(Ok(()));
            Some(value)
        }
        Submission::Completed(Err(err)) => {
            state.finish(Err(err));
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Field;
    use std::cell::Cell;

    #[test]
    fn test_validation_failure_blocks_and_returns_to_editing() {
        let mut state = FormState::new();
        let payload: Option<()> =
            state.begin_submit(|| Err(FormError::RequiredField(Field::ExerciseName)));
        assert!(payload.is_none());
        assert_eq!(state.phase(), FormPhase::Editing);
        assert_eq!(
            state.error(),
            Some(&FormError::RequiredField(Field::ExerciseName))
        );
    }

    #[test]
    fn test_double_submit_is_ignored() {
        let mut state = FormState::new();
        assert_eq!(state.begin_submit(|| Ok(1)), Some(1));
        assert!(state.is_submitting());
        let called = Cell::new(false);
        let second = state.begin_submit(|| {
            called.set(true);
            Ok(2)
        });
        assert_eq!(second, None);
        assert!(!called.get());
    }

    #[test]
    fn test_backend_failure_is_editable_with_verbatim_message() {
        let mut state = FormState::new();
        state.begin_submit(|| Ok(()));
        state.finish(Err("row-level security violation"));
        assert_eq!(state.phase(), FormPhase::Failed);
        assert_eq!(
            state.error().map(|e| e.to_string()),
            Some("row-level security violation".to_string())
        );
        state.edit();
        assert_eq!(state.phase(), FormPhase::Editing);
        assert!(state.begin_submit(|| Ok(())).is_some());
        assert_eq!(state.error(), None);
    }

    #[test]
    fn test_finish_outside_submitting_is_ignored() {
        let mut state = FormState::new();
        state.finish::<String>(Ok(()));
        assert_eq!(state.phase(), FormPhase::Editing);
    }

    #[tokio::test]
    async fn test_submit_success() {
        let mut state = FormState::new();
        let token = CancellationToken::new();
        let result = submit(
            &mut state,
            &token,
            || Ok(21),
            |n| async move { Ok::<_, String>(n * 2) },
        )
        .await;
        assert_eq!(result, Some(42));
        assert_eq!(state.phase(), FormPhase::Success);
    }

    #[tokio::test]
    async fn test_submit_skips_call_on_validation_error() {
        let mut state = FormState::new();
        let token = CancellationToken::new();
        let called = Cell::new(false);
        let result = submit(
            &mut state,
            &token,
            || Err::<(), _>(FormError::ConfirmationMismatch),
            |_| {
                called.set(true);
                async { Ok::<_, String>(()) }
            },
        )
        .await;
        assert_eq!(result, None);
        assert!(!called.get());
        assert_eq!(state.error(), Some(&FormError::ConfirmationMismatch));
    }

    #[tokio::test]
    async fn test_cancelled_submission_is_discarded() {
        let mut state = FormState::new();
        let token = CancellationToken::new();
        token.cancel();
        let result = submit(
            &mut state,
            &token,
            || Ok(()),
            |_| async { Ok::<_, String>("stale") },
        )
        .await;
        assert_eq!(result, None);
        assert_eq!(state.phase(), FormPhase::Submitting);
        assert_eq!(state.error(), None);
    }

    #[tokio::test]
    async fn test_cancel_while_in_flight() {
        let token = CancellationToken::new();
        let child = token.clone();
        let slow = async {
            tokio::time::sleep(std::time::Duration::from_secs(60)).await;
            "late"
        };
        let (outcome, _) = tokio::join!(run_cancellable(&child, slow), async {
            token.cancel();
        });
        assert_eq!(outcome, Submission::Cancelled);
    }
}
