//! Component-scoped async helpers.

use std::time::Duration;

use dioxus::prelude::*;
use forms::CancellationToken;

/// A token cancelled when the calling component unmounts.
///
/// Backend calls raced against it through `forms::form::run_cancellable`
/// never write into signals of a screen that is gone.
pub fn use_cancellation() -> CancellationToken {
    let token = use_hook(CancellationToken::new);
    use_drop({
        let token = token.clone();
        move || token.cancel()
    });
    token
}

pub async fn sleep(duration: Duration) {
    #[cfg(target_arch = "wasm32")]
    gloo_timers::future::sleep(duration).await;
    #[cfg(not(target_arch = "wasm32"))]
    tokio::time::sleep(duration).await;
}

/// Wall-clock milliseconds, for cooldown bookkeeping.
pub fn now_ms() -> u64 {
    chrono::Utc::now().timestamp_millis().max(0) as u64
}

pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
