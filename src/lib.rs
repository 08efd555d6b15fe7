//! # Vantage — window lifecycle management for game-client UIs
//!
//! Vantage opens and closes named UI windows, animates their transitions,
//! and tracks which windows are currently active. It is a thin orchestration
//! layer over a scene graph, a tweening driver, and a resource loader.
//!
//! ## Architecture
//!
//! - `window`: the window manager core (registry + transition dispatch)
//! - `scene`: view nodes, transforms, and container slots
//! - `assets`: prefab catalog and the resource-loader seam
//! - `layer`: draw-order assignment
//! - `tween`: frame-stepped animation driver with easing curves
//! - `config`: TOML configuration parsing and validation
//!
//! ## Usage
//!
//! ```
//! use vantage::{FrameTweenDriver, PrefabCatalog, PrefabDef, UiConfig, WindowManager};
//! use vantage::assets::UI_WINDOW_CATEGORY;
//! use vantage::window::{ContainerSlot, ShowStyle, WindowViewSpec};
//!
//! # fn main() -> anyhow::Result<()> {
//! let mut catalog = PrefabCatalog::new();
//! catalog.register(
//!     UI_WINDOW_CATEGORY,
//!     "Shop",
//!     PrefabDef {
//!         window_view: Some(WindowViewSpec {
//!             container: ContainerSlot::Center,
//!             show_style: ShowStyle::Normal,
//!             duration_ms: None,
//!             easing: None,
//!         }),
//!     },
//! )?;
//!
//! let config = UiConfig::default();
//! let mut windows = WindowManager::new(
//!     &config,
//!     Box::new(catalog),
//!     Box::new(FrameTweenDriver::new()),
//! )?;
//!
//! let view = windows.open_window("Shop", None);
//! assert!(view.is_some());
//! assert_eq!(windows.open_window_count(), 1);
//!
//! windows.close_window("Shop");
//! assert_eq!(windows.open_window_count(), 0);
//! # Ok(())
//! # }
//! ```

pub mod assets;
pub mod config;
pub mod layer;
pub mod scene;
pub mod tween;
pub mod window;

// Re-export main types for easy access
pub use assets::{AssetError, PrefabCatalog, PrefabDef, ResourceLoader};
pub use config::UiConfig;
pub use layer::LayerService;
pub use scene::Scene;
pub use tween::{EasingCurve, FrameTweenDriver, TweenDriver};
pub use window::{ShowStyle, WindowManager, WindowViewSpec};

// Re-export common error types
pub use anyhow::{Context, Error, Result};

/// Version information for Vantage
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");
