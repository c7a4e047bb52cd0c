//! # Async Tasks
//!
//! Background work spawned on the Tokio runtime. Every task reports back
//! through an [`AppEvent`] and then wakes the egui thread.

pub mod export;
pub mod market;

use crate::app::events::AppEvent;
use crate::core::service::MarketDataService;
use crate::services::MarketQueries;
use async_channel::Sender;
use once_cell::sync::OnceCell;
use std::sync::Arc;

/// Handle used to wake the egui thread once an event is queued.
///
/// The egui context only exists after the window is created, so it is
/// attached late; until then repaint requests are dropped.
#[derive(Clone, Default)]
pub struct RepaintSignal(Arc<OnceCell<egui::Context>>);

impl RepaintSignal {
    pub fn attach(&self, ctx: &egui::Context) {
        let _ = self.0.set(ctx.clone());
    }

    pub fn request(&self) {
        if let Some(ctx) = self.0.get() {
            ctx.request_repaint();
        }
    }
}

/// Everything a task needs, cloned into each spawned future.
#[derive(Clone)]
pub(crate) struct TaskContext {
    pub api: Arc<dyn MarketDataService>,
    pub queries: MarketQueries,
    pub event_tx: Sender<AppEvent>,
    pub repaint: RepaintSignal,
}

impl TaskContext {
    pub(crate) async fn send(&self, event: AppEvent) {
        if self.event_tx.send(event).await.is_err() {
            tracing::warn!("Event channel closed - dropping task result");
        }
        self.repaint.request();
    }
}
