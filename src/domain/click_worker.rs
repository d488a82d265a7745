//! Background worker that applies click increments.

use std::sync::Arc;

use chrono::Utc;
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::MappingRepository;
use crate::domain::store_error::StoreError;

/// Drains the click channel until every sender has been dropped.
///
/// Each event results in exactly one [`MappingRepository::increment_clicks`]
/// call. Failures are logged and discarded: counting is best-effort and is
/// never retried.
pub async fn run_click_worker(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<dyn MappingRepository>,
) {
    while let Some(event) = rx.recv().await {
        record_click(repository.as_ref(), &event).await;
    }

    debug!("Click channel closed, worker exiting");
}

/// Applies a single click increment, swallowing (but logging) failures.
///
/// Returns whether the increment was stored.
pub async fn record_click<R: MappingRepository + ?Sized>(repository: &R, event: &ClickEvent) -> bool {
    let result = repository.increment_clicks(&event.code).await;
    let queued_ms = event.queue_delay_ms(Utc::now());

    match result {
        Ok(()) => {
            debug!(code = %event.code, queued_ms, "Click recorded");
            true
        }
        Err(StoreError::NotFound) => {
            debug!(code = %event.code, "Click for a mapping that no longer exists");
            false
        }
        Err(e) => {
            warn!(
                code = %event.code,
                clicked_at = %event.clicked_at,
                queued_ms,
                error = %e,
                "Failed to record click"
            );
            false
        }
    }
}
