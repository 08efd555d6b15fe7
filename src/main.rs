//! Vantage demo
//!
//! Scripted open/close run over a few demo window prefabs, stepping the
//! frame pump the way a game loop would. Useful for eyeballing transition
//! logs while developing.

use anyhow::Result;
use clap::Parser;
use log::{error, info};
use std::time::Duration;

use vantage::assets::UI_WINDOW_CATEGORY;
use vantage::window::{ContainerSlot, ShowStyle, WindowViewSpec};
use vantage::{FrameTweenDriver, PrefabCatalog, PrefabDef, UiConfig, WindowManager};

#[derive(Parser)]
#[command(name = "vantage-demo")]
#[command(about = "Scripted window open/close demo for the Vantage UI window manager")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "~/.config/vantage/vantage.toml")]
    config: String,

    /// Enable debug logging
    #[arg(short, long)]
    debug: bool,

    /// Disable transition animations (every window opens/closes instantly)
    #[arg(long)]
    no_effects: bool,

    /// Frame step in milliseconds
    #[arg(long, default_value_t = 16)]
    frame_ms: u64,
}

fn demo_catalog() -> Result<PrefabCatalog> {
    let mut catalog = PrefabCatalog::new();

    catalog.register(
        UI_WINDOW_CATEGORY,
        "Shop",
        PrefabDef {
            window_view: Some(WindowViewSpec {
                container: ContainerSlot::Center,
                show_style: ShowStyle::Normal,
                duration_ms: None,
                easing: None,
            }),
        },
    )?;

    catalog.register(
        UI_WINDOW_CATEGORY,
        "Inventory",
        PrefabDef {
            window_view: Some(WindowViewSpec {
                container: ContainerSlot::Center,
                show_style: ShowStyle::FromLeft,
                duration_ms: Some(400),
                easing: None,
            }),
        },
    )?;

    catalog.register(
        UI_WINDOW_CATEGORY,
        "Forge",
        PrefabDef {
            window_view: Some(WindowViewSpec {
                container: ContainerSlot::Center,
                show_style: ShowStyle::CenterToBig,
                duration_ms: Some(250),
                easing: None,
            }),
        },
    )?;

    Ok(catalog)
}

fn step(windows: &mut WindowManager, frames: u32, frame_ms: u64) {
    for _ in 0..frames {
        windows.update(Duration::from_millis(frame_ms));
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    if cli.debug {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("debug")).init();
    } else {
        env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    }

    info!("Starting Vantage demo (version {})", vantage::VERSION);

    // Load configuration
    let mut config = match UiConfig::load(&cli.config) {
        Ok(config) => {
            info!("Configuration loaded from: {}", cli.config);
            config
        }
        Err(e) => {
            error!("Failed to load configuration: {}", e);
            info!("Using default configuration");
            UiConfig::default()
        }
    };

    if cli.no_effects {
        config.animations.enabled = false;
        info!("Transition animations disabled via CLI flag");
    }

    let mut windows = WindowManager::new(
        &config,
        Box::new(demo_catalog()?),
        Box::new(FrameTweenDriver::new()),
    )?;

    windows.open_window("Shop", None);
    windows.open_window("Inventory", None);
    windows.open_window(
        "Forge",
        Some(Box::new(|| info!("Forge open transition finished"))),
    );
    info!("Windows open: {}", windows.open_window_count());

    // Let the open transitions play out
    step(&mut windows, 40, cli.frame_ms);

    windows.close_window("Shop");
    info!(
        "Closed Shop (instant); windows open: {}",
        windows.open_window_count()
    );

    windows.close_window("Inventory");
    info!(
        "Closing Inventory (slide-out); windows open: {}",
        windows.open_window_count()
    );
    step(&mut windows, 40, cli.frame_ms);
    info!(
        "Inventory rewind finished; windows open: {}",
        windows.open_window_count()
    );

    windows.close_all_windows();
    info!("Demo complete; windows open: {}", windows.open_window_count());

    Ok(())
}
