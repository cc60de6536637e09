//! Platform timers: tokio on native, `setTimeout` in the browser

use crate::error::{MintError, Result};
use futures::future::{self, Either};
use std::future::Future;
use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(d: Duration) { tokio::time::sleep(d).await }

#[cfg(target_arch = "wasm32")]
pub async fn sleep(d: Duration) {
    let ms = d.as_millis().min(i32::MAX as u128) as i32;
    let promise = js_sys::Promise::new(&mut |resolve, _reject| {
        if let Some(window) = web_sys::window() {
            let _ = window.set_timeout_with_callback_and_timeout_and_arguments_0(&resolve, ms);
        }
    });
    let _ = wasm_bindgen_futures::JsFuture::from(promise).await;
}

/// Race `fut` against a timer. Losing the race drops `fut`.
pub async fn timeout<F: Future>(operation: &'static str, after: Duration, fut: F) -> Result<F::Output> {
    let fut = std::pin::pin!(fut);
    let delay = std::pin::pin!(sleep(after));
    match future::select(fut, delay).await {
        Either::Left((out, _)) => Ok(out),
        Either::Right(_) => Err(MintError::CallTimedOut { operation, after }),
    }
}
