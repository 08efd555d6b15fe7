//! Frame-stepped tweening for window transitions
//!
//! This module provides the animation driver behind window open/close
//! transitions:
//! - Easing curves and timing functions
//! - Pausable, replayable tween handles (forward and backward playback)
//! - Completed/rewound end events delivered through an explicit frame pump
//!
//! Tweens are not tasks; they are state advanced once per frame by
//! [`TweenDriver::advance`], which returns the interpolated property values
//! and end events for the caller to apply. Nothing here runs off the host
//! game loop.

use cgmath::Vector3;
use log::{debug, trace};
use std::collections::HashMap;
use std::time::Duration;


/// Handle to a tween owned by a driver
pub type TweenId = u64;

/// Easing curves for transition timing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EasingCurve {
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
    BounceOut,
    BackOut,
}

impl EasingCurve {
    /// Parse a configuration curve name
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "linear" => Some(Self::Linear),
            "ease-in" => Some(Self::EaseIn),
            "ease-out" => Some(Self::EaseOut),
            "ease-in-out" => Some(Self::EaseInOut),
            "bounce-out" => Some(Self::BounceOut),
            "back-out" => Some(Self::BackOut),
            _ => None,
        }
    }

    /// Apply the curve to a raw progress value in [0, 1]
    pub fn apply(self, progress: f32) -> f32 {
        let t = progress.clamp(0.0, 1.0);

        match self {
            Self::Linear => t,
            Self::EaseIn => t * t,
            Self::EaseOut => 1.0 - (1.0 - t) * (1.0 - t),
            Self::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
            Self::BounceOut => {
                if t < 1.0 / 2.75 {
                    7.5625 * t * t
                } else if t < 2.0 / 2.75 {
                    let t = t - 1.5 / 2.75;
                    7.5625 * t * t + 0.75
                } else if t < 2.5 / 2.75 {
                    let t = t - 2.25 / 2.75;
                    7.5625 * t * t + 0.9375
                } else {
                    let t = t - 2.625 / 2.75;
                    7.5625 * t * t + 0.984375
                }
            }
            Self::BackOut => {
                let s = 1.70158;
                let t = t - 1.0;
                t * t * ((s + 1.0) * t + s) + 1.0
            }
        }
    }
}

/// Transform property a tween interpolates
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenProperty {
    LocalPosition,
    LocalScale,
}

/// Parameters for a new tween
#[derive(Debug, Clone)]
pub struct TweenSpec {
    /// Scene view the interpolated value applies to
    pub target: u64,
    pub property: TweenProperty,
    pub from: Vector3<f32>,
    pub to: Vector3<f32>,
    pub duration: Duration,
    pub easing: EasingCurve,
}

/// How a tween run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TweenEnd {
    /// Forward playback reached the end pose
    Completed,
    /// Backward playback reached the start pose
    Rewound,
}

/// One interpolated value produced by a frame advance
#[derive(Debug, Clone)]
pub struct TweenUpdate {
    pub tween: TweenId,
    pub target: u64,
    pub property: TweenProperty,
    pub value: Vector3<f32>,
    pub end: Option<TweenEnd>,
}

/// Playback direction of an active tween
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlayDirection {
    Forward,
    Backward,
}

/// Animation driver contract consumed by the window manager
///
/// Tweens are created paused at their start pose and are never auto-killed:
/// the same handle is replayed forward and backward across repeated
/// open/close cycles until explicitly killed.
pub trait TweenDriver {
    /// Create a paused tween at progress zero
    fn create(&mut self, spec: TweenSpec) -> TweenId;

    /// Resume playback toward the end pose
    fn play_forward(&mut self, id: TweenId);

    /// Resume playback toward the start pose
    fn play_backwards(&mut self, id: TweenId);

    /// Release the tween; unknown ids are ignored
    fn kill(&mut self, id: TweenId);

    /// Current playback direction, `None` when paused or unknown
    fn direction(&self, id: TweenId) -> Option<PlayDirection>;

    /// Advance all playing tweens by `dt` and collect their updates
    fn advance(&mut self, dt: Duration) -> Vec<TweenUpdate>;
}

struct TweenState {
    spec: TweenSpec,
    progress: f32,
    direction: Option<PlayDirection>,
}

/// Frame-stepped tween driver used in production
pub struct FrameTweenDriver {
    tweens: HashMap<TweenId, TweenState>,
    next_id: TweenId,
}

impl FrameTweenDriver {
    pub fn new() -> Self {
        Self {
            tweens: HashMap::new(),
            next_id: 1,
        }
    }

    /// Number of tweens currently held, playing or paused
    pub fn tween_count(&self) -> usize {
        self.tweens.len()
    }

    /// Number of tweens currently playing in either direction
    pub fn playing_count(&self) -> usize {
        self.tweens
            .values()
            .filter(|t| t.direction.is_some())
            .count()
    }

    fn sample(state: &TweenState) -> Vector3<f32> {
        let eased = state.spec.easing.apply(state.progress);
        state.spec.from + (state.spec.to - state.spec.from) * eased
    }
}

impl Default for FrameTweenDriver {
    fn default() -> Self {
        Self::new()
    }
}

impl TweenDriver for FrameTweenDriver {
    fn create(&mut self, spec: TweenSpec) -> TweenId {
        let id = self.next_id;
        self.next_id += 1;

        debug!(
            "Created tween {} for view {} ({:?}, {:?})",
            id, spec.target, spec.property, spec.duration
        );

        self.tweens.insert(
            id,
            TweenState {
                spec,
                progress: 0.0,
                direction: None,
            },
        );

        id
    }

    fn play_forward(&mut self, id: TweenId) {
        if let Some(tween) = self.tweens.get_mut(&id) {
            tween.direction = Some(PlayDirection::Forward);
            trace!("Tween {} playing forward from {:.3}", id, tween.progress);
        }
    }

    fn play_backwards(&mut self, id: TweenId) {
        if let Some(tween) = self.tweens.get_mut(&id) {
            tween.direction = Some(PlayDirection::Backward);
            trace!("Tween {} playing backwards from {:.3}", id, tween.progress);
        }
    }

    fn kill(&mut self, id: TweenId) {
        if self.tweens.remove(&id).is_some() {
            debug!("Killed tween {}", id);
        }
    }

    fn direction(&self, id: TweenId) -> Option<PlayDirection> {
        self.tweens.get(&id).and_then(|t| t.direction)
    }

    fn advance(&mut self, dt: Duration) -> Vec<TweenUpdate> {
        let mut updates = Vec::new();

        for (id, tween) in self.tweens.iter_mut() {
            let direction = match tween.direction {
                Some(d) => d,
                None => continue,
            };

            let step = (dt.as_secs_f32() / tween.spec.duration.as_secs_f32().max(f32::EPSILON))
                .max(0.0);

            // A tween resumed at a boundary still reports its end event on the
            // next advance, so a close requested before the first frame of the
            // open transition still reaches the rewind point.
            let end = match direction {
                PlayDirection::Forward => {
                    tween.progress = (tween.progress + step).min(1.0);
                    (tween.progress >= 1.0).then_some(TweenEnd::Completed)
                }
                PlayDirection::Backward => {
                    tween.progress = (tween.progress - step).max(0.0);
                    (tween.progress <= 0.0).then_some(TweenEnd::Rewound)
                }
            };

            if end.is_some() {
                tween.direction = None;
            }

            updates.push(TweenUpdate {
                tween: *id,
                target: tween.spec.target,
                property: tween.spec.property,
                value: Self::sample(tween),
                end,
            });
        }

        updates
    }
}
