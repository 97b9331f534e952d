#![forbid(unsafe_code)]

//! Zoom transition state machine.
//!
//! Keeps three geometry snapshots per node: `base` (the partition output,
//! never mutated by zooming), `current` (what is on screen), and `target`
//! (where the active focus wants every arc). Focusing a node recomputes all
//! targets from `base` and starts one shared fixed-duration clock; every
//! node interpolates from its pre-trigger `current` in lockstep. A fresh
//! focus mid-flight supersedes the running tween, starting from whatever
//! `current` values are live. Nothing is queued.

use std::f64::consts::TAU;
use std::time::Duration;

use sunviz_core::{Hierarchy, NodeId};

use crate::partition::{ArcRect, Partition};

/// Fixed zoom animation length.
pub const ZOOM_DURATION: Duration = Duration::from_millis(750);

/// Shared linear clock for one zoom animation.
#[derive(Debug, Clone, Copy)]
struct Tween {
    elapsed: Duration,
    duration: Duration,
}

impl Tween {
    fn new(duration: Duration) -> Self {
        Self {
            elapsed: Duration::ZERO,
            duration: if duration.is_zero() {
                Duration::from_nanos(1)
            } else {
                duration
            },
        }
    }

    fn tick(&mut self, dt: Duration) {
        self.elapsed = self.elapsed.saturating_add(dt);
    }

    fn progress(&self) -> f64 {
        (self.elapsed.as_secs_f64() / self.duration.as_secs_f64()).clamp(0.0, 1.0)
    }

    fn is_complete(&self) -> bool {
        self.elapsed >= self.duration
    }
}

/// Animated focus state over a partitioned tree.
#[derive(Debug, Clone)]
pub struct ZoomState {
    base: Vec<ArcRect>,
    depths: Vec<usize>,
    from: Vec<ArcRect>,
    current: Vec<ArcRect>,
    target: Vec<ArcRect>,
    focus: NodeId,
    tween: Option<Tween>,
}

impl ZoomState {
    /// Seed from a fresh layout: `current == target == base`, root focused,
    /// machine stable.
    pub fn new(tree: &Hierarchy, partition: &Partition) -> Self {
        let base: Vec<ArcRect> = tree.ids().map(|id| partition.arc(id)).collect();
        let depths: Vec<usize> = tree.ids().map(|id| partition.depth(id)).collect();
        Self {
            from: base.clone(),
            current: base.clone(),
            target: base.clone(),
            base,
            depths,
            focus: tree.root(),
            tween: None,
        }
    }

    pub fn focus(&self) -> NodeId {
        self.focus
    }

    /// True while an animation is in flight.
    pub fn is_transitioning(&self) -> bool {
        self.tween.is_some()
    }

    /// On-screen geometry for `id`.
    pub fn current(&self, id: NodeId) -> ArcRect {
        self.current[id.index()]
    }

    /// End-state geometry for `id` under the active focus.
    pub fn target(&self, id: NodeId) -> ArcRect {
        self.target[id.index()]
    }

    /// Focus `node`: it becomes the full-circle innermost ring. Recomputes
    /// every target from base geometry and restarts the shared clock from
    /// the live `current` snapshots.
    pub fn zoom_to(&mut self, node: NodeId) {
        let p = self.base[node.index()];
        let p_depth = self.depths[node.index()] as f64;
        let span = p.angular_width();

        for i in 0..self.base.len() {
            let d = self.base[i];
            let fraction = |x: f64| {
                if span > 0.0 {
                    ((x - p.x0) / span).clamp(0.0, 1.0)
                } else {
                    0.0
                }
            };
            self.from[i] = self.current[i];
            self.target[i] = ArcRect {
                x0: fraction(d.x0) * TAU,
                x1: fraction(d.x1) * TAU,
                y0: (d.y0 - p_depth).max(0.0),
                y1: (d.y1 - p_depth).max(0.0),
            };
        }

        self.focus = node;
        self.tween = Some(Tween::new(ZOOM_DURATION));
    }

    /// Climb one level: focus the current focus's parent. A no-op when the
    /// root is already focused; returns whether a transition started.
    pub fn ascend(&mut self, tree: &Hierarchy) -> bool {
        match tree.node(self.focus).parent {
            Some(parent) => {
                self.zoom_to(parent);
                true
            }
            None => false,
        }
    }

    /// Advance the shared clock. Returns true when geometry moved (the
    /// caller should redraw). On completion `current` snaps exactly to
    /// `target` and the machine returns to stable.
    pub fn tick(&mut self, dt: Duration) -> bool {
        let Some(mut tween) = self.tween else {
            return false;
        };
        tween.tick(dt);
        let t = tween.progress();
        for i in 0..self.current.len() {
            self.current[i] = self.from[i].lerp(&self.target[i], t);
        }
        if tween.is_complete() {
            self.current.copy_from_slice(&self.target);
            self.tween = None;
        } else {
            self.tween = Some(tween);
        }
        true
    }
}
