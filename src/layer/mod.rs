//! Draw-order assignment for window views
//!
//! Every open or re-open stamps the view with the next order value, so the
//! most recently raised window always draws above the rest.

use log::trace;

use crate::config::WindowConfig;
use crate::scene::Scene;

/// Z-order service consumed by the window manager
pub struct LayerService {
    next_order: i32,
    step: i32,
}

impl LayerService {
    pub fn new(config: &WindowConfig) -> Self {
        Self {
            next_order: config.base_order,
            step: config.order_step,
        }
    }

    /// Stamp `view` with the next sort order, bringing it above all views
    /// assigned before it
    pub fn assign_layer(&mut self, scene: &mut Scene, view: u64) {
        if let Some(node) = scene.node_mut(view) {
            node.sort_order = self.next_order;
            trace!("View {} raised to sort order {}", view, self.next_order);
            self.next_order += self.step;
        }
    }

    /// Order value the next assignment will use
    pub fn next_order(&self) -> i32 {
        self.next_order
    }
}
