//! Fire-and-forget pause used between loading and feature setup.

use std::time::Duration;

/// Suspend the current task for `duration`. Zero returns immediately.
#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    if !duration.is_zero() {
        tokio::time::sleep(duration).await;
    }
}

/// Suspend the current task for `duration` using the page's timer queue.
#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    if duration.is_zero() {
        return;
    }
    let millis = i32::try_from(duration.as_millis()).unwrap_or(i32::MAX);
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, millis);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}
