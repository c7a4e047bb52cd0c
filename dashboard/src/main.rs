//! Crypto Flux - native cryptocurrency market dashboard.
//!
//! Startup order: logging, configuration, Tokio runtime, then the eframe
//! window on the main thread.

use dashboard::app::App;
use dashboard::core::DashboardConfig;
use dashboard::ui;
use dashboard::ui::theme::Theme;
use dashboard::ui::widgets::icons::initialize_material_icons;
use dashboard::ui::widgets::notifications::NotificationManager;
use dashboard::utils::runtime;
use std::time::Duration;

const APP_TITLE: &str = "Crypto Flux";
/// Repaint at least this often so stale queries refetch without user input
const IDLE_REPAINT: Duration = Duration::from_secs(1);

struct FluxApp {
    app: App,
    notifications: NotificationManager,
}

impl FluxApp {
    fn new(cc: &eframe::CreationContext<'_>, config: DashboardConfig) -> Self {
        Theme::apply(&cc.egui_ctx);
        initialize_material_icons(&cc.egui_ctx);

        let app = App::new(config);
        app.attach_context(&cc.egui_ctx);

        Self {
            app,
            notifications: NotificationManager::new(),
        }
    }
}

impl eframe::App for FluxApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let search_pending = self.app.on_tick();

        ui::render(ctx, &mut self.app, &mut self.notifications);

        let immediate = std::mem::take(&mut self.app.state.write().needs_immediate_repaint);
        if immediate {
            ctx.request_repaint();
        } else {
            let wake = search_pending.map_or(IDLE_REPAINT, |delay| delay.min(IDLE_REPAINT));
            ctx.request_repaint_after(wake);
        }
    }
}

fn main() -> eframe::Result<()> {
    dashboard::debug::init();

    let config = DashboardConfig::from_env();
    tracing::info!(
        api = %config.api_base_url,
        currency = %config.vs_currency,
        coins = config.coins_per_page,
        "Starting Crypto Flux"
    );

    let runtime = match runtime::runtime() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!(error = %e, "Failed to create Tokio runtime");
            eprintln!("Failed to create Tokio runtime: {}", e);
            std::process::exit(1);
        }
    };
    let _guard = runtime.enter();

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title(APP_TITLE)
            .with_inner_size([1280.0, 860.0])
            .with_min_inner_size([960.0, 640.0]),
        ..Default::default()
    };

    eframe::run_native(
        APP_TITLE,
        options,
        Box::new(move |cc| Ok(Box::new(FluxApp::new(cc, config)))),
    )
}
