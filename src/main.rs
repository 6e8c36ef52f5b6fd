pub mod carousel;
pub mod config;
pub mod page;
pub mod ui;

use crate::carousel::SlideSet;
use crate::config::PortfolioConfig;
use crate::page::ThemeStore;
use crate::ui::PortfolioUI;
use color_eyre::{eyre::eyre, Result};
use tracing::{info, Level};
use tracing_subscriber::FmtSubscriber;

#[tokio::main]
async fn main() -> Result<()> {
    setup()?;

    let config_dir = config::app_config_dir()?;
    let config = PortfolioConfig::load_or_create(&config_dir).await?;

    // An empty slide list is the one fatal configuration error
    let slides = SlideSet::initialize(config.slides.clone())
        .map_err(|e| eyre!("Failed to build carousel: {}", e))?;

    let theme_store = ThemeStore::in_dir(&config_dir);
    let theme = theme_store.load().await;
    let runtime = tokio::runtime::Handle::current();

    info!("Starting portfolio UI");
    let native_options = eframe::NativeOptions::default();

    eframe::run_native(
        "Portfolio",
        native_options,
        Box::new(move |cc| {
            Ok(Box::new(PortfolioUI::new(
                cc,
                config,
                slides,
                theme,
                theme_store,
                runtime,
            )))
        }),
    )
    .map_err(|e| eyre!("UI terminated with error: {}", e))?;

    Ok(())
}

fn setup() -> Result<()> {
    if std::env::var("RUST_LIB_BACKTRACE").is_err() {
        std::env::set_var("RUST_LIB_BACKTRACE", "0")
    }
    color_eyre::install()?;
    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info")
    }
    setup_logging_env();
    Ok(())
}

fn setup_logging_env() {
    FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .pretty()
        .init();
}
