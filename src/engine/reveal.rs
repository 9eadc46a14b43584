//! One-shot reveal-on-scroll.
//!
//! Each observed element moves from unseen to visible exactly once, the
//! first time enough of it overlaps the trigger region. Leaving the
//! viewport never hides it again.

use std::collections::HashMap;
use std::hash::Hash;
use std::time::{Duration, Instant};

/// Fade length once an element's delay has elapsed.
pub const REVEAL_FADE: Duration = Duration::from_millis(300);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RevealOptions {
    /// Fraction of the element that must overlap the trigger region.
    pub threshold: f32,
    /// Rows cut from the bottom of the viewport.
    pub bottom_margin: u16,
}

impl Default for RevealOptions {
    fn default() -> Self {
        Self { threshold: 0.1, bottom_margin: 2 }
    }
}

/// Vertical span in page rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Extent {
    pub top: u16,
    pub height: u16,
}

impl Extent {
    pub fn new(top: u16, height: u16) -> Self {
        Self { top, height }
    }

    fn bottom(&self) -> u32 {
        self.top as u32 + self.height as u32
    }
}

/// Share of `element` inside the viewport after the bottom margin is cut.
pub fn intersection_ratio(element: Extent, viewport: Extent, options: &RevealOptions) -> f32 {
    if element.height == 0 {
        return 0.0;
    }
    let root_top = viewport.top as u32;
    let root_bottom = viewport.bottom().saturating_sub(options.bottom_margin as u32).max(root_top);
    let top = (element.top as u32).max(root_top);
    let bottom = element.bottom().min(root_bottom);
    if bottom <= top {
        return 0.0;
    }
    (bottom - top) as f32 / element.height as f32
}

pub fn is_intersecting(element: Extent, viewport: Extent, options: &RevealOptions) -> bool {
    let ratio = intersection_ratio(element, viewport, options);
    ratio > 0.0 && ratio >= options.threshold
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RevealPhase {
    Hidden,
    Fading,
    Shown,
}

#[derive(Debug)]
pub struct RevealTracker<K> {
    /// Observed elements and their stagger delay.
    observed: HashMap<K, Duration>,
    /// Elements that already fired, with the instant they did.
    triggered: HashMap<K, Instant>,
}

impl<K: Eq + Hash + Clone> Default for RevealTracker<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: Eq + Hash + Clone> RevealTracker<K> {
    pub fn new() -> Self {
        Self {
            observed: HashMap::new(),
            triggered: HashMap::new(),
        }
    }

    /// Start watching an element. Re-observing keeps its existing state.
    pub fn observe(&mut self, key: K, delay: Duration) {
        self.observed.entry(key).or_insert(delay);
    }

    /// Feed one intersection observation. Returns true only on the
    /// unseen -> visible transition.
    pub fn on_intersection(&mut self, key: &K, intersecting: bool, now: Instant) -> bool {
        if !intersecting || !self.observed.contains_key(key) || self.triggered.contains_key(key) {
            return false;
        }
        self.triggered.insert(key.clone(), now);
        true
    }

    pub fn is_triggered(&self, key: &K) -> bool {
        self.triggered.contains_key(key)
    }

    pub fn phase(&self, key: &K, now: Instant) -> RevealPhase {
        let (Some(at), Some(delay)) = (self.triggered.get(key), self.observed.get(key)) else {
            return RevealPhase::Hidden;
        };
        let shown_at = *at + *delay;
        if now < shown_at {
            RevealPhase::Hidden
        } else if now < shown_at + REVEAL_FADE {
            RevealPhase::Fading
        } else {
            RevealPhase::Shown
        }
    }

    /// Drop elements that no longer exist (e.g. replaced cards).
    pub fn retain(&mut self, mut keep: impl FnMut(&K) -> bool) {
        self.observed.retain(|k, _| keep(k));
        self.triggered.retain(|k, _| keep(k));
    }

    pub fn observed_len(&self) -> usize {
        self.observed.len()
    }
}
