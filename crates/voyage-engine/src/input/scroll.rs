use std::cell::Cell;
use std::rc::Rc;

use log::debug;

/// Maps a raw document scroll offset onto progress 0..1.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScrollTracker {
    /// Scroll distance in px covering the whole journey.
    distance: f32,
}

impl ScrollTracker {
    pub fn new(distance: f32) -> Self {
        Self { distance }
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// `offset / distance`, clamped to [0, 1]. Non-finite offsets map to `None`.
    pub fn progress_for_offset(&self, offset: f32) -> Option<f32> {
        if !offset.is_finite() || !(self.distance > 0.0) {
            return None;
        }
        Some((offset / self.distance).clamp(0.0, 1.0))
    }
}

/// Single-slot cell shared between the page and the engine.
/// Written by the page, read once per frame. Last value wins.
#[derive(Debug)]
struct ScrollChannel {
    progress: Cell<f32>,
    attached: Cell<bool>,
    tracker: ScrollTracker,
}

/// Page-side handle for pushing scroll progress into a scene.
///
/// Cheap to clone. Once the engine tears down its listener every setter
/// returns `false` and the value is dropped.
#[derive(Debug, Clone)]
pub struct ScrollBinding {
    channel: Rc<ScrollChannel>,
}

impl ScrollBinding {
    /// Publish a progress value. Out-of-range values are clamped, NaN is
    /// ignored. Returns whether the value was accepted.
    pub fn set_progress(&self, progress: f32) -> bool {
        if !self.channel.attached.get() {
            debug!("scroll signal {progress} after teardown, ignored");
            return false;
        }
        if progress.is_nan() {
            debug!("scroll signal NaN ignored");
            return false;
        }
        let clamped = progress.clamp(0.0, 1.0);
        if clamped != progress {
            debug!("scroll signal {progress} clamped to {clamped}");
        }
        self.channel.progress.set(clamped);
        true
    }

    /// Publish a raw scroll offset in px.
    pub fn set_scroll_offset(&self, offset: f32) -> bool {
        match self.channel.tracker.progress_for_offset(offset) {
            Some(progress) => self.set_progress(progress),
            None => {
                debug!("scroll offset {offset} ignored");
                false
            }
        }
    }

    pub fn is_attached(&self) -> bool {
        self.channel.attached.get()
    }
}

/// Engine-side end of the channel. Detaches on drop, so the binding is
/// released on every exit path.
#[derive(Debug)]
pub(crate) struct ScrollListener {
    channel: Rc<ScrollChannel>,
}

impl ScrollListener {
    pub(crate) fn new(tracker: ScrollTracker) -> (Self, ScrollBinding) {
        let channel = Rc::new(ScrollChannel {
            progress: Cell::new(0.0),
            attached: Cell::new(true),
            tracker,
        });
        let binding = ScrollBinding {
            channel: Rc::clone(&channel),
        };
        (Self { channel }, binding)
    }

    /// Latest published progress.
    pub(crate) fn progress(&self) -> f32 {
        self.channel.progress.get()
    }

    /// Another handle to the same channel.
    pub(crate) fn binding(&self) -> ScrollBinding {
        ScrollBinding {
            channel: Rc::clone(&self.channel),
        }
    }
}

impl Drop for ScrollListener {
    fn drop(&mut self) {
        self.channel.attached.set(false);
    }
}
