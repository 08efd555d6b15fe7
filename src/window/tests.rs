//! Unit tests for the window manager
//!
//! Lifecycle and transition-dispatch tests run against a scripted tween
//! driver so the tests can fire completed/rewound events on demand; the
//! integration suite exercises the real frame-stepped driver instead.

use super::*;
use crate::assets::{PrefabCatalog, PrefabDef};
use crate::tween::{PlayDirection, TweenUpdate};
use anyhow::Result;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

#[derive(Default)]
struct ScriptedState {
    next_id: TweenId,
    specs: HashMap<TweenId, TweenSpec>,
    directions: HashMap<TweenId, Option<PlayDirection>>,
    forward_plays: Vec<TweenId>,
    backward_plays: Vec<TweenId>,
    killed: Vec<TweenId>,
    queued: Vec<TweenUpdate>,
}

/// Shared handle to a scripted driver's state, kept by the test while the
/// manager owns the driver itself
#[derive(Clone, Default)]
struct Scripted(Rc<RefCell<ScriptedState>>);

impl Scripted {
    fn driver(&self) -> Box<dyn TweenDriver> {
        Box::new(ScriptedDriver(self.0.clone()))
    }

    fn only_tween(&self) -> (TweenId, TweenSpec) {
        let state = self.0.borrow();
        assert_eq!(state.specs.len(), 1, "expected exactly one tween");
        let (id, spec) = state.specs.iter().next().unwrap();
        (*id, spec.clone())
    }

    fn tween_count(&self) -> usize {
        self.0.borrow().specs.len()
    }

    fn forward_plays(&self) -> usize {
        self.0.borrow().forward_plays.len()
    }

    fn backward_plays(&self) -> usize {
        self.0.borrow().backward_plays.len()
    }

    fn was_killed(&self, id: TweenId) -> bool {
        self.0.borrow().killed.contains(&id)
    }

    /// Queue an end event for delivery on the next manager update
    fn fire(&self, id: TweenId, end: TweenEnd) {
        let mut state = self.0.borrow_mut();
        let spec = state.specs.get(&id).expect("unknown tween").clone();
        let value = match end {
            TweenEnd::Completed => spec.to,
            TweenEnd::Rewound => spec.from,
        };
        state.queued.push(TweenUpdate {
            tween: id,
            target: spec.target,
            property: spec.property,
            value,
            end: Some(end),
        });
    }
}

struct ScriptedDriver(Rc<RefCell<ScriptedState>>);

impl TweenDriver for ScriptedDriver {
    fn create(&mut self, spec: TweenSpec) -> TweenId {
        let mut state = self.0.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.specs.insert(id, spec);
        state.directions.insert(id, None);
        id
    }

    fn play_forward(&mut self, id: TweenId) {
        let mut state = self.0.borrow_mut();
        state.forward_plays.push(id);
        state.directions.insert(id, Some(PlayDirection::Forward));
    }

    fn play_backwards(&mut self, id: TweenId) {
        let mut state = self.0.borrow_mut();
        state.backward_plays.push(id);
        state.directions.insert(id, Some(PlayDirection::Backward));
    }

    fn kill(&mut self, id: TweenId) {
        let mut state = self.0.borrow_mut();
        state.killed.push(id);
        state.specs.remove(&id);
        state.directions.remove(&id);
    }

    fn direction(&self, id: TweenId) -> Option<PlayDirection> {
        self.0.borrow().directions.get(&id).copied().flatten()
    }

    fn advance(&mut self, _dt: Duration) -> Vec<TweenUpdate> {
        std::mem::take(&mut self.0.borrow_mut().queued)
    }
}

struct CountingLoader {
    inner: PrefabCatalog,
    loads: Rc<Cell<u32>>,
}

impl ResourceLoader for CountingLoader {
    fn load(&mut self, scene: &mut Scene, category: &str, name: &str) -> Option<u64> {
        self.loads.set(self.loads.get() + 1);
        self.inner.load(scene, category, name)
    }
}

fn view_spec(show_style: ShowStyle, duration_ms: u32) -> WindowViewSpec {
    WindowViewSpec {
        container: ContainerSlot::Center,
        show_style,
        duration_ms: Some(duration_ms),
        easing: Some(EasingCurve::EaseOut),
    }
}

fn demo_catalog() -> PrefabCatalog {
    let mut catalog = PrefabCatalog::new();
    for (name, style) in [
        ("Shop", ShowStyle::Normal),
        ("Inventory", ShowStyle::FromLeft),
        ("Forge", ShowStyle::CenterToBig),
        ("Mail", ShowStyle::FromTop),
    ] {
        catalog
            .register(
                UI_WINDOW_CATEGORY,
                name,
                PrefabDef {
                    window_view: Some(view_spec(style, 300)),
                },
            )
            .unwrap();
    }
    // A prefab without the window-view capability
    catalog
        .register(UI_WINDOW_CATEGORY, "Ghost", PrefabDef { window_view: None })
        .unwrap();
    catalog
}

fn scripted_manager() -> (WindowManager, Scripted) {
    let scripted = Scripted::default();
    let manager = WindowManager::new(
        &UiConfig::default(),
        Box::new(demo_catalog()),
        scripted.driver(),
    )
    .unwrap();
    (manager, scripted)
}

#[test]
fn test_close_unopened_window_is_noop() {
    let (mut windows, _) = scripted_manager();

    windows.close_window("Shop");
    windows.close_window("NeverRegistered");
    assert_eq!(windows.open_window_count(), 0);
}

#[test]
fn test_empty_name_never_mutates_registry() {
    let (mut windows, scripted) = scripted_manager();

    assert_eq!(windows.open_window("", None), None);
    assert_eq!(windows.open_window_count(), 0);
    assert_eq!(scripted.tween_count(), 0);
}

#[test]
fn test_unknown_prefab_returns_none() {
    let (mut windows, _) = scripted_manager();

    assert_eq!(windows.open_window("NoSuchWindow", None), None);
    assert_eq!(windows.open_window_count(), 0);
}

#[test]
fn test_missing_capability_releases_loaded_view() {
    let (mut windows, _) = scripted_manager();
    let baseline = windows.scene().node_count();

    assert_eq!(windows.open_window("Ghost", None), None);
    assert_eq!(windows.open_window_count(), 0);
    // The freshly loaded view was despawned, not leaked
    assert_eq!(windows.scene().node_count(), baseline);
}

#[test]
fn test_open_increments_count_once() {
    let (mut windows, _) = scripted_manager();

    let first = windows.open_window("Shop", None);
    assert!(first.is_some());
    assert_eq!(windows.open_window_count(), 1);

    let second = windows.open_window("Shop", None);
    assert_eq!(second, first);
    assert_eq!(windows.open_window_count(), 1);
}

#[test]
fn test_open_attaches_under_center_container() {
    let (mut windows, _) = scripted_manager();

    let view = windows.open_window("Shop", None).unwrap();
    let node = windows.scene().node(view).unwrap();
    let container = windows.scene().container(ContainerSlot::Center);

    assert_eq!(node.parent, container);
    assert!(node.active);
    assert_eq!(node.name, "Shop");
}

#[test]
fn test_reopen_skips_reload_but_reassigns_layer() {
    let loads = Rc::new(Cell::new(0));
    let scripted = Scripted::default();
    let loader = CountingLoader {
        inner: demo_catalog(),
        loads: loads.clone(),
    };
    let mut windows =
        WindowManager::new(&UiConfig::default(), Box::new(loader), scripted.driver()).unwrap();

    let view = windows.open_window("Shop", None).unwrap();
    assert_eq!(loads.get(), 1);
    let first_order = windows.scene().node(view).unwrap().sort_order;

    windows.open_window("Shop", None);
    assert_eq!(loads.get(), 1);
    let second_order = windows.scene().node(view).unwrap().sort_order;
    assert!(second_order > first_order);

    // No open transition was replayed for the Normal style either way
    assert_eq!(scripted.tween_count(), 0);
}

#[test]
fn test_layer_orders_rise_across_windows() {
    let (mut windows, _) = scripted_manager();
    let config = UiConfig::default();

    let shop = windows.open_window("Shop", None).unwrap();
    let inventory = windows.open_window("Inventory", None).unwrap();

    let shop_order = windows.scene().node(shop).unwrap().sort_order;
    let inventory_order = windows.scene().node(inventory).unwrap().sort_order;
    assert_eq!(shop_order, config.window.base_order);
    assert!(inventory_order > shop_order);
}

#[test]
fn test_normal_close_destroys_synchronously() {
    let (mut windows, _) = scripted_manager();

    let view = windows.open_window("Shop", None).unwrap();
    windows.close_window("Shop");

    assert_eq!(windows.open_window_count(), 0);
    assert!(!windows.scene().contains(view));
}

#[test]
fn test_slide_open_creates_offscreen_tween() {
    let (mut windows, scripted) = scripted_manager();
    let config = UiConfig::default();

    let view = windows.open_window("Inventory", None).unwrap();
    let (_, spec) = scripted.only_tween();

    assert_eq!(spec.target, view);
    assert_eq!(spec.property, TweenProperty::LocalPosition);
    assert!((spec.from.x - (-config.window.slide_horizontal_offset)).abs() < f32::EPSILON);
    assert!(spec.to.x.abs() < f32::EPSILON);
    assert_eq!(spec.duration, Duration::from_millis(300));
    assert_eq!(scripted.forward_plays(), 1);

    // The view starts at the off-screen pose, activated
    let node = windows.scene().node(view).unwrap();
    assert!(node.active);
    assert!((node.transform.local_position.x - spec.from.x).abs() < f32::EPSILON);
}

#[test]
fn test_from_top_slides_on_vertical_axis() {
    let (mut windows, scripted) = scripted_manager();
    let config = UiConfig::default();

    windows.open_window("Mail", None).unwrap();
    let (_, spec) = scripted.only_tween();

    assert!((spec.from.y - config.window.slide_vertical_offset).abs() < f32::EPSILON);
    assert!(spec.from.x.abs() < f32::EPSILON);
}

#[test]
fn test_center_to_big_scales_from_zero() {
    let (mut windows, scripted) = scripted_manager();

    let view = windows.open_window("Forge", None).unwrap();
    let (_, spec) = scripted.only_tween();

    assert_eq!(spec.property, TweenProperty::LocalScale);
    assert!(spec.from.x.abs() < f32::EPSILON);
    assert!((spec.to.x - 1.0).abs() < f32::EPSILON);

    let node = windows.scene().node(view).unwrap();
    assert!(node.transform.local_scale.x.abs() < f32::EPSILON);
}

#[test]
fn test_tweened_close_waits_for_rewind() {
    let (mut windows, scripted) = scripted_manager();

    let view = windows.open_window("Inventory", None).unwrap();
    let (tween, _) = scripted.only_tween();

    windows.close_window("Inventory");
    // Entry stays registered until the reverse animation rewinds
    assert_eq!(windows.open_window_count(), 1);
    assert_eq!(scripted.backward_plays(), 1);
    assert!(windows.scene().contains(view));

    scripted.fire(tween, TweenEnd::Rewound);
    windows.update(Duration::from_millis(16));

    assert_eq!(windows.open_window_count(), 0);
    assert!(!windows.scene().contains(view));
    assert!(scripted.was_killed(tween));
}

#[test]
fn test_close_reuses_tween_instead_of_recreating() {
    let (mut windows, scripted) = scripted_manager();

    windows.open_window("Inventory", None);
    let (tween, _) = scripted.only_tween();

    windows.close_window("Inventory");
    windows.open_window("Inventory", None);
    windows.close_window("Inventory");

    // Still the single lazily created tween, replayed in both directions
    assert_eq!(scripted.tween_count(), 1);
    assert_eq!(scripted.only_tween().0, tween);
    assert_eq!(scripted.forward_plays(), 2);
    assert_eq!(scripted.backward_plays(), 2);
}

#[test]
fn test_reopen_mid_close_cancels_pending_destroy() {
    let (mut windows, scripted) = scripted_manager();

    let view = windows.open_window("Inventory", None).unwrap();
    let (tween, _) = scripted.only_tween();
    windows.close_window("Inventory");

    let reopened = windows.open_window("Inventory", None);
    assert_eq!(reopened, Some(view));
    assert_eq!(windows.open_window_count(), 1);
    assert_eq!(scripted.forward_plays(), 2);

    // The forward run completing again must not destroy the window
    scripted.fire(tween, TweenEnd::Completed);
    windows.update(Duration::from_millis(16));
    assert_eq!(windows.open_window_count(), 1);
    assert!(windows.scene().contains(view));
}

#[test]
fn test_on_complete_fires_each_forward_completion() {
    let (mut windows, scripted) = scripted_manager();
    let completions = Rc::new(Cell::new(0u32));

    let counter = completions.clone();
    windows.open_window(
        "Forge",
        Some(Box::new(move || counter.set(counter.get() + 1))),
    );
    let (tween, _) = scripted.only_tween();

    scripted.fire(tween, TweenEnd::Completed);
    windows.update(Duration::from_millis(16));
    assert_eq!(completions.get(), 1);

    // Close, reopen mid-close, complete again
    windows.close_window("Forge");
    windows.open_window("Forge", None);
    scripted.fire(tween, TweenEnd::Completed);
    windows.update(Duration::from_millis(16));
    assert_eq!(completions.get(), 2);
}

#[test]
fn test_on_complete_suppressed_while_closing() {
    let (mut windows, scripted) = scripted_manager();
    let completions = Rc::new(Cell::new(0u32));

    let counter = completions.clone();
    windows.open_window(
        "Forge",
        Some(Box::new(move || counter.set(counter.get() + 1))),
    );
    let (tween, _) = scripted.only_tween();

    windows.close_window("Forge");
    scripted.fire(tween, TweenEnd::Completed);
    windows.update(Duration::from_millis(16));

    assert_eq!(completions.get(), 0);
    assert_eq!(windows.open_window_count(), 1);
}

#[test]
fn test_tween_updates_write_through_to_scene() {
    let (mut windows, scripted) = scripted_manager();

    let view = windows.open_window("Inventory", None).unwrap();
    let (tween, spec) = scripted.only_tween();

    // Mid-flight value, no end event
    scripted.0.borrow_mut().queued.push(TweenUpdate {
        tween,
        target: view,
        property: spec.property,
        value: cgmath::Vector3::new(-700.0, 0.0, 0.0),
        end: None,
    });
    windows.update(Duration::from_millis(16));

    let node = windows.scene().node(view).unwrap();
    assert!((node.transform.local_position.x - (-700.0)).abs() < f32::EPSILON);
    assert_eq!(windows.open_window_count(), 1);
}

#[test]
fn test_close_all_windows_destroys_everything_immediately() {
    let (mut windows, scripted) = scripted_manager();

    let shop = windows.open_window("Shop", None).unwrap();
    let inventory = windows.open_window("Inventory", None).unwrap();
    let (tween, _) = scripted.only_tween();

    // Inventory's close animation is mid-rewind when everything is torn down
    windows.close_window("Inventory");
    windows.close_all_windows();

    assert_eq!(windows.open_window_count(), 0);
    assert!(!windows.scene().contains(shop));
    assert!(!windows.scene().contains(inventory));
    assert!(scripted.was_killed(tween));

    // Idempotent on an empty registry
    windows.close_all_windows();
    assert_eq!(windows.open_window_count(), 0);
}

#[test]
fn test_disabled_animations_degrade_to_instant() -> Result<()> {
    let mut config = UiConfig::default();
    config.animations.enabled = false;

    let scripted = Scripted::default();
    let mut windows =
        WindowManager::new(&config, Box::new(demo_catalog()), scripted.driver())?;

    let view = windows.open_window("Inventory", None).unwrap();
    assert_eq!(scripted.tween_count(), 0);
    assert!(windows.scene().node(view).unwrap().active);

    windows.close_window("Inventory");
    assert_eq!(windows.open_window_count(), 0);
    assert!(!windows.scene().contains(view));
    Ok(())
}

#[test]
fn test_invalid_config_rejected_at_construction() {
    let mut config = UiConfig::default();
    config.animations.default_curve = "wobble".to_string();

    let result = WindowManager::new(
        &config,
        Box::new(demo_catalog()),
        Scripted::default().driver(),
    );
    assert!(result.is_err());
}
