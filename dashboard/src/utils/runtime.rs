//! Process-wide Tokio runtime
//!
//! eframe owns the main thread, so background work runs on a runtime built
//! once at startup. `main` enters it before creating the app, which lets
//! `tokio::spawn` be called from the egui thread.
//!
//! ```rust,no_run
//! let runtime = dashboard::utils::runtime::runtime().unwrap();
//! let _guard = runtime.enter();
//! ```

use once_cell::sync::OnceCell;
use tokio::runtime::{Builder, Runtime};

static TOKIO_RT: OnceCell<Runtime> = OnceCell::new();

/// Shared multi-threaded runtime, built on first use.
pub fn runtime() -> std::io::Result<&'static Runtime> {
    TOKIO_RT.get_or_try_init(|| {
        Builder::new_multi_thread()
            .enable_all()
            .thread_name("flux-worker")
            .build()
    })
}
