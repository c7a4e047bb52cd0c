//! # Export Task
//!
//! Writes an already-serialized CSV to disk off the UI thread.

use crate::app::events::AppEvent;
use crate::app::tasks::TaskContext;
use crate::services::export::save_csv;
use std::path::PathBuf;
use tokio::spawn;

pub(crate) fn write_csv(ctx: &TaskContext, path: PathBuf, contents: String) {
    let ctx = ctx.clone();
    spawn(async move {
        let result = save_csv(path, contents).await;
        ctx.send(AppEvent::ExportResult(result)).await;
    });
}
