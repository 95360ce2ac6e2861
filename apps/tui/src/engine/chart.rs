use std::time::Duration;

/// Length of the grow-in animation played on an animated render.
pub const ANIMATION_DURATION: Duration = Duration::from_millis(400);
const MAX_FRAME_DELTA: Duration = Duration::from_millis(250);

/// Render pass requested from a chart instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateMode {
    /// Replay the entry animation.
    Animated,
    /// Draw the final state straight away.
    Quiet,
}

/// Render bookkeeping for a chart instance.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderState {
    revision: u64,
    last_mode: Option<UpdateMode>,
    progress: f64,
}

impl RenderState {
    pub const fn new() -> Self {
        Self {
            revision: 0,
            last_mode: None,
            progress: 1.0,
        }
    }

    pub fn request(&mut self, mode: UpdateMode) {
        self.revision += 1;
        self.last_mode = Some(mode);
        self.progress = match mode {
            UpdateMode::Animated => 0.0,
            UpdateMode::Quiet => 1.0,
        };
    }

    /// Advances a running animation. Long frame gaps are clamped so a stalled
    /// loop does not skip the animation entirely.
    pub fn advance(&mut self, delta: Duration) {
        if self.progress >= 1.0 {
            return;
        }
        let step = delta.min(MAX_FRAME_DELTA).as_secs_f64() / ANIMATION_DURATION.as_secs_f64();
        self.progress = (self.progress + step).min(1.0);
    }

    /// Number of render passes requested so far.
    pub const fn revision(&self) -> u64 {
        self.revision
    }

    pub const fn last_mode(&self) -> Option<UpdateMode> {
        self.last_mode
    }

    /// 0.0 at the start of an animation, 1.0 once settled.
    pub const fn progress(&self) -> f64 {
        self.progress
    }

    pub fn is_animating(&self) -> bool {
        self.progress < 1.0
    }
}

impl Default for RenderState {
    fn default() -> Self {
        Self::new()
    }
}

/// The panel a chart is mounted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChartContainer {
    Mounted,
    /// Content replaced by a failure notice; nothing can be re-mounted.
    Failed(String),
}

impl ChartContainer {
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }

    pub fn notice(&self) -> Option<&str> {
        match self {
            Self::Mounted => None,
            Self::Failed(notice) => Some(notice),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quiet_render_settles_immediately() {
        let mut render = RenderState::new();
        render.request(UpdateMode::Quiet);

        assert_eq!(render.revision(), 1);
        assert!(!render.is_animating());
    }

    #[test]
    fn animated_render_runs_to_completion() {
        let mut render = RenderState::new();
        render.request(UpdateMode::Animated);
        assert!(render.is_animating());

        render.advance(Duration::from_millis(200));
        assert!((render.progress() - 0.5).abs() < 1e-9);

        render.advance(Duration::from_millis(200));
        assert!(!render.is_animating());
    }

    #[test]
    fn large_frame_gap_is_clamped() {
        let mut render = RenderState::new();
        render.request(UpdateMode::Animated);
        render.advance(Duration::from_secs(30));

        assert!((render.progress() - 0.625).abs() < 1e-9);
    }
}
