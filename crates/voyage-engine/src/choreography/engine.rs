use log::{debug, info};

use crate::api::types::CameraPose;
use crate::choreography::timeline::ScrollTimeline;
use crate::input::scroll::{ScrollBinding, ScrollListener, ScrollTracker};

/// Drives the camera from scroll progress.
///
/// Owned by exactly one scene. The listener half of the scroll channel lives
/// here; dropping or tearing down the engine detaches every binding the page
/// holds.
#[derive(Debug)]
pub struct ChoreographyEngine {
    timeline: ScrollTimeline,
    tracker: ScrollTracker,
    listener: Option<ScrollListener>,
    /// 0.0 = camera locked to scroll, towards 1.0 = camera lags behind.
    scrub: f32,
    /// Progress the camera is currently showing.
    displayed: f32,
    suspended: bool,
    torn_down: bool,
}

impl ChoreographyEngine {
    pub fn new(timeline: ScrollTimeline, tracker: ScrollTracker) -> Self {
        Self {
            timeline,
            tracker,
            listener: None,
            scrub: 0.0,
            displayed: 0.0,
            suspended: false,
            torn_down: false,
        }
    }

    /// Scrub smoothing factor, clamped to [0, 0.99].
    pub fn with_scrub(mut self, scrub: f32) -> Self {
        self.scrub = if scrub.is_finite() { scrub.clamp(0.0, 0.99) } else { 0.0 };
        self
    }

    /// Acquire the scroll binding. Calling again while attached hands out
    /// another handle to the same channel. After teardown the returned
    /// binding is already detached.
    pub fn attach(&mut self) -> ScrollBinding {
        if self.torn_down {
            debug!("attach after teardown, handing out a detached binding");
            let (listener, binding) = ScrollListener::new(self.tracker);
            drop(listener);
            return binding;
        }
        match &self.listener {
            Some(listener) => listener.binding(),
            None => {
                let (listener, binding) = ScrollListener::new(self.tracker);
                self.listener = Some(listener);
                binding
            }
        }
    }

    /// Stop following scroll. Signals keep being recorded.
    pub fn suspend(&mut self) {
        if !self.suspended {
            debug!("choreography suspended at {:.4}", self.displayed);
        }
        self.suspended = true;
    }

    /// Follow scroll again, jumping straight to the latest progress.
    pub fn resume(&mut self) {
        if !self.suspended {
            return;
        }
        self.suspended = false;
        if let Some(target) = self.target() {
            self.displayed = target;
        }
        debug!("choreography resumed at {:.4}", self.displayed);
    }

    /// Latest progress published by the page.
    pub fn target(&self) -> Option<f32> {
        self.listener.as_ref().map(ScrollListener::progress)
    }

    /// Advance the displayed progress towards the target.
    /// `None` while detached, suspended or torn down.
    pub fn sample(&mut self, dt: f32) -> Option<f32> {
        if self.suspended {
            return None;
        }
        let target = self.target()?;
        if self.scrub <= 0.0 {
            self.displayed = target;
        } else {
            let dt = if dt.is_finite() { dt.max(0.0) } else { 0.0 };
            let factor = 1.0 - self.scrub.powf(dt * 60.0);
            self.displayed += (target - self.displayed) * factor;
        }
        Some(self.displayed)
    }

    /// Camera pose for this frame, see [`Self::sample`].
    pub fn pose(&mut self, dt: f32) -> Option<CameraPose> {
        let progress = self.sample(dt)?;
        Some(self.timeline.pose_at(progress))
    }

    /// Pose at the progress currently displayed, without advancing.
    pub fn current_pose(&self) -> CameraPose {
        self.timeline.pose_at(self.displayed)
    }

    /// Release the scroll binding. Safe to call any number of times; returns
    /// whether this call did the work.
    pub fn teardown(&mut self) -> bool {
        if self.torn_down {
            return false;
        }
        self.torn_down = true;
        self.listener = None;
        info!("choreography torn down at progress {:.4}", self.displayed);
        true
    }

    pub fn is_attached(&self) -> bool {
        self.listener.is_some()
    }

    pub fn is_suspended(&self) -> bool {
        self.suspended
    }

    pub fn is_torn_down(&self) -> bool {
        self.torn_down
    }

    pub fn progress(&self) -> f32 {
        self.displayed
    }

    pub fn timeline(&self) -> &ScrollTimeline {
        &self.timeline
    }
}
