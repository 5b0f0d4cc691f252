mod api;
mod app;
mod config;
mod error;
mod event;
mod session;
mod theme;
mod ui;

use api::ChatApi;
use app::MentorApp;
use config::Config;
use eframe::egui;
use session::store::ChatStore;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

fn init_tracing(config: &Config) {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => match config.log_level.parse::<EnvFilter>() {
            Ok(filter) => filter,
            Err(err) => {
                eprintln!(
                    "WARN: MENTOR_LOG='{}' is not a valid tracing filter ({err}); falling back to 'info'",
                    config.log_level
                );
                EnvFilter::new("info")
            }
        },
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(true)
        .init();
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = Config::from_env();
    init_tracing(&config);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .thread_name("mentor-chat-runtime")
        .build()?;

    let api = ChatApi::new(&config)?;
    info!(api = %api.base_url(), version = env!("CARGO_PKG_VERSION"), "mentor-chat starting");

    let store = ChatStore::new(Arc::new(api), runtime.handle().clone());
    let mut app = MentorApp::new(store);
    let _runtime = runtime;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("AI Student Mentor")
            .with_inner_size([960.0, 780.0])
            .with_min_inner_size([640.0, 560.0]),
        ..Default::default()
    };

    eframe::run_native(
        "AI Student Mentor",
        native_options,
        Box::new(move |creation_context| {
            app.attach(&creation_context.egui_ctx);
            Ok(Box::new(app))
        }),
    )?;

    Ok(())
}
