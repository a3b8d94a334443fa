//! Top-level fault barrier.
//!
//! The application future runs in its own task. If it panics, the panic is
//! caught at the join point and reported as a [`Fault`] with a generic
//! message and a hint to start again, instead of leaving a half-printed
//! screen behind.

use std::future::Future;
use thiserror::Error;
use tracing::error;

/// Message shown when the application crashed.
pub const FAULT_MESSAGE: &str = "Something went wrong while running the inventory console.";

/// Suggested recovery.
pub const RELOAD_HINT: &str = "Restart the application to reload the inventory.";

#[derive(Debug, Error)]
pub enum Fault {
    /// The application task panicked.
    #[error("{FAULT_MESSAGE} {RELOAD_HINT}")]
    Crashed { detail: String },

    /// The application task was cancelled before it finished.
    #[error("The application was stopped before it finished. {RELOAD_HINT}")]
    Cancelled,
}

/// Runs `app` behind the fault barrier.
pub async fn guard<F, T>(app: F) -> Result<T, Fault>
where
    F: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    match tokio::spawn(app).await {
        Ok(value) => Ok(value),
        Err(e) if e.is_panic() => {
            let payload = e.into_panic();
            let detail = payload
                .downcast_ref::<&str>()
                .map(|s| s.to_string())
                .or_else(|| payload.downcast_ref::<String>().cloned())
                .unwrap_or_else(|| "unknown panic".to_string());
            error!(%detail, "Application crashed");
            Err(Fault::Crashed { detail })
        }
        Err(e) => {
            error!(error = %e, "Application task cancelled");
            Err(Fault::Cancelled)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_guard_passes_results_through() {
        assert_eq!(guard(async { 42 }).await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_guard_turns_panic_into_fault() {
        let result = guard(async {
            if true {
                panic!("mount point missing");
            }
        })
        .await;

        match result {
            Err(Fault::Crashed { detail }) => assert_eq!(detail, "mount point missing"),
            other => panic!("expected a crash, got {other:?}"),
        }
    }
}
