//! Window lifecycle management
//!
//! This module implements the window manager core:
//! - A registry mapping logical window names to their instantiated views
//! - Open/close transitions dispatched per show style
//! - Rewind-triggered destruction, so a closing window is released only
//!   once its close animation has played back to the start pose
//!
//! The manager composes three services: a resource loader for view
//! instantiation, a layer service for draw ordering, and a tween driver for
//! transitions. It is constructed explicitly and owned by the caller; there
//! is no global registry.

use anyhow::Result;
use cgmath::Vector3;
use log::{debug, info, warn};
use std::collections::HashMap;
use std::time::Duration;

use crate::assets::{ResourceLoader, UI_WINDOW_CATEGORY};
use crate::config::{UiConfig, WindowConfig};
use crate::layer::LayerService;
use crate::scene::Scene;
use crate::tween::{EasingCurve, TweenDriver, TweenEnd, TweenId, TweenProperty, TweenSpec};

#[cfg(test)]
mod tests;

/// Parent container a window view attaches under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContainerSlot {
    Center,
}

/// Animation preset governing how a window appears and disappears
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShowStyle {
    /// Appear and disappear instantly
    Normal,
    /// Scale up from zero in place; close scales back down
    CenterToBig,
    FromTop,
    FromDown,
    FromLeft,
    FromRight,
}

/// Transition resolved from a show style, carrying its animation endpoints
#[derive(Debug, Clone, Copy, PartialEq)]
enum Transition {
    Instant,
    Scale { from: Vector3<f32>, to: Vector3<f32> },
    Slide { from: Vector3<f32>, to: Vector3<f32> },
}

impl ShowStyle {
    fn transition(self, config: &WindowConfig) -> Transition {
        let v = config.slide_vertical_offset;
        let h = config.slide_horizontal_offset;
        let origin = Vector3::new(0.0, 0.0, 0.0);

        match self {
            Self::Normal => Transition::Instant,
            Self::CenterToBig => Transition::Scale {
                from: origin,
                to: Vector3::new(1.0, 1.0, 1.0),
            },
            Self::FromTop => Transition::Slide {
                from: Vector3::new(0.0, v, 0.0),
                to: origin,
            },
            Self::FromDown => Transition::Slide {
                from: Vector3::new(0.0, -v, 0.0),
                to: origin,
            },
            Self::FromLeft => Transition::Slide {
                from: Vector3::new(-h, 0.0, 0.0),
                to: origin,
            },
            Self::FromRight => Transition::Slide {
                from: Vector3::new(h, 0.0, 0.0),
                to: origin,
            },
        }
    }
}

/// Window-view capability a prefab declares about itself: where it attaches,
/// how it transitions, and its animation timing. The manager reads this from
/// the loaded view rather than taking it as a parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct WindowViewSpec {
    pub container: ContainerSlot,
    pub show_style: ShowStyle,
    /// Transition duration in milliseconds; `None` uses the configured default
    pub duration_ms: Option<u32>,
    /// Easing curve; `None` uses the configured default
    pub easing: Option<EasingCurve>,
}

/// Callback fired each time a window's open transition reaches its end pose
pub type OnComplete = Box<dyn FnMut()>;

/// One currently-open window
struct WindowEntry {
    name: String,
    view: u64,
    style: ShowStyle,
    duration: Duration,
    easing: EasingCurve,
    /// Lazily created on first open, replayed forward/backward afterwards
    tween: Option<TweenId>,
    /// Close transition in flight; destruction pending on rewind
    closing: bool,
    on_complete: Option<OnComplete>,
}

enum TransitionOutcome {
    /// Entry stays registered (open, or close animation in flight)
    Kept,
    /// Close was instantaneous; destroy the entry now
    DestroyNow,
}

/// Registry of open windows plus the services realizing their transitions
pub struct WindowManager {
    config: UiConfig,
    scene: Scene,
    loader: Box<dyn ResourceLoader>,
    layers: LayerService,
    driver: Box<dyn TweenDriver>,
    windows: HashMap<String, WindowEntry>,
}

impl WindowManager {
    /// Create a window manager from validated configuration and the loader
    /// and tween driver it composes
    pub fn new(
        config: &UiConfig,
        loader: Box<dyn ResourceLoader>,
        driver: Box<dyn TweenDriver>,
    ) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            config: config.clone(),
            scene: Scene::new(),
            loader,
            layers: LayerService::new(&config.window),
            driver,
            windows: HashMap::new(),
        })
    }

    /// Open the named window, returning its view handle
    ///
    /// Empty names and failed loads yield `None` without touching the
    /// registry. Opening an already-open window reassigns its layer and
    /// returns the existing view without reloading or replaying the open
    /// transition; if its close animation is still rewinding, the pending
    /// destruction is cancelled and the transition replays forward.
    pub fn open_window(&mut self, name: &str, on_complete: Option<OnComplete>) -> Option<u64> {
        if name.is_empty() {
            return None;
        }

        if let Some(entry) = self.windows.get_mut(name) {
            if entry.closing {
                entry.closing = false;
                self.scene.set_active(entry.view, true);
                if let Some(tween) = entry.tween {
                    self.driver.play_forward(tween);
                }
                debug!("Window '{}' reopened mid-close", name);
            }
            let view = entry.view;
            self.layers.assign_layer(&mut self.scene, view);
            return Some(view);
        }

        let view = self.loader.load(&mut self.scene, UI_WINDOW_CATEGORY, name)?;

        let spec = match self.scene.node(view).and_then(|n| n.window_view.clone()) {
            Some(spec) => spec,
            None => {
                warn!("Loaded object '{}' lacks a window view; releasing it", name);
                self.scene.despawn(view);
                return None;
            }
        };

        let parent = self.scene.container(spec.container);
        self.scene.set_parent(view, parent);
        if let Some(node) = self.scene.node_mut(view) {
            node.transform.reset();
            node.active = false;
        }

        let style = if self.config.animations.enabled {
            spec.show_style
        } else {
            ShowStyle::Normal
        };
        let duration = Duration::from_millis(u64::from(
            spec.duration_ms
                .unwrap_or(self.config.animations.default_duration),
        ));
        let easing = spec
            .easing
            .or_else(|| EasingCurve::from_name(&self.config.animations.default_curve))
            .unwrap_or(EasingCurve::EaseOut);

        let mut entry = WindowEntry {
            name: name.to_string(),
            view,
            style,
            duration,
            easing,
            tween: None,
            closing: false,
            on_complete,
        };

        Self::run_transition(
            &mut self.scene,
            self.driver.as_mut(),
            &self.config.window,
            &mut entry,
            true,
        );
        self.windows.insert(name.to_string(), entry);
        self.layers.assign_layer(&mut self.scene, view);

        info!("Opened window '{}' ({:?})", name, style);
        Some(view)
    }

    /// Close the named window; a no-op for names not currently open
    ///
    /// Normal-style windows are destroyed synchronously. Tweened styles play
    /// their transition backwards and are destroyed when it rewinds to the
    /// start pose, during a later [`WindowManager::update`].
    pub fn close_window(&mut self, name: &str) {
        let outcome = {
            let entry = match self.windows.get_mut(name) {
                Some(entry) => entry,
                None => return,
            };

            let outcome = Self::run_transition(
                &mut self.scene,
                self.driver.as_mut(),
                &self.config.window,
                entry,
                false,
            );
            if let TransitionOutcome::Kept = outcome {
                entry.closing = true;
                debug!("Window '{}' closing, destruction pending rewind", name);
            }
            outcome
        };

        if let TransitionOutcome::DestroyNow = outcome {
            self.destroy_window(name);
        }
    }

    /// Destroy every open window immediately
    ///
    /// Unlike [`WindowManager::close_window`] this plays no close animations:
    /// all views are despawned and all tweens killed on the spot.
    pub fn close_all_windows(&mut self) {
        let names: Vec<String> = self.windows.keys().cloned().collect();
        for name in &names {
            self.destroy_window(name);
        }
        if !names.is_empty() {
            info!("Closed all windows ({})", names.len());
        }
    }

    /// Number of windows currently registered, closing ones included
    pub fn open_window_count(&self) -> usize {
        self.windows.len()
    }

    /// Whether the named window is registered
    pub fn is_open(&self, name: &str) -> bool {
        self.windows.contains_key(name)
    }

    /// View handle of the named window, if open
    pub fn window_view(&self, name: &str) -> Option<u64> {
        self.windows.get(name).map(|entry| entry.view)
    }

    /// Scene the manager renders windows into
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// Advance transitions by one frame
    ///
    /// Applies the interpolated transform values to the scene, fires open
    /// completion callbacks, and destroys windows whose close transition
    /// reached its rewind point.
    pub fn update(&mut self, dt: Duration) {
        for update in self.driver.advance(dt) {
            if let Some(node) = self.scene.node_mut(update.target) {
                match update.property {
                    TweenProperty::LocalPosition => node.transform.local_position = update.value,
                    TweenProperty::LocalScale => node.transform.local_scale = update.value,
                }
            }

            match update.end {
                Some(TweenEnd::Completed) => {
                    if let Some(entry) = self
                        .windows
                        .values_mut()
                        .find(|e| e.tween == Some(update.tween))
                    {
                        if !entry.closing {
                            debug!("Window '{}' open transition completed", entry.name);
                            if let Some(callback) = entry.on_complete.as_mut() {
                                callback();
                            }
                        }
                    }
                }
                Some(TweenEnd::Rewound) => {
                    let name = self
                        .windows
                        .iter()
                        .find(|(_, e)| e.tween == Some(update.tween))
                        .map(|(name, _)| name.clone());
                    if let Some(name) = name {
                        self.destroy_window(&name);
                    }
                }
                None => {}
            }
        }
    }

    /// Dispatch one open/close transition for an entry
    fn run_transition(
        scene: &mut Scene,
        driver: &mut dyn TweenDriver,
        config: &WindowConfig,
        entry: &mut WindowEntry,
        is_open: bool,
    ) -> TransitionOutcome {
        let (property, from, to) = match entry.style.transition(config) {
            Transition::Instant => {
                if is_open {
                    scene.set_active(entry.view, true);
                    return TransitionOutcome::Kept;
                }
                return TransitionOutcome::DestroyNow;
            }
            Transition::Scale { from, to } => (TweenProperty::LocalScale, from, to),
            Transition::Slide { from, to } => (TweenProperty::LocalPosition, from, to),
        };

        scene.set_active(entry.view, true);
        if is_open {
            if let Some(node) = scene.node_mut(entry.view) {
                match property {
                    TweenProperty::LocalPosition => node.transform.local_position = from,
                    TweenProperty::LocalScale => node.transform.local_scale = from,
                }
            }
        }

        let tween = *entry.tween.get_or_insert_with(|| {
            driver.create(TweenSpec {
                target: entry.view,
                property,
                from,
                to,
                duration: entry.duration,
                easing: entry.easing,
            })
        });

        if is_open {
            driver.play_forward(tween);
        } else {
            driver.play_backwards(tween);
        }

        TransitionOutcome::Kept
    }

    /// Remove an entry from the registry and release its view and tween
    fn destroy_window(&mut self, name: &str) {
        if let Some(entry) = self.windows.remove(name) {
            if let Some(tween) = entry.tween {
                self.driver.kill(tween);
            }
            self.scene.despawn(entry.view);
            info!("Destroyed window '{}'", entry.name);
        }
    }
}
