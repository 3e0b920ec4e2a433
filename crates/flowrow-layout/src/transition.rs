//! Animated height transitions.

use std::time::Duration;

use flowrow_core::Animation;

/// Height of the flow container, possibly mid-transition.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct HeightTransition {
    from: f64,
    to: f64,
    started: Duration,
    animation: Option<Animation>,
}

impl HeightTransition {
    /// A settled height.
    pub fn settled(height: f64) -> Self {
        Self {
            from: height,
            to: height,
            started: Duration::ZERO,
            animation: None,
        }
    }

    /// Move towards `target`, starting from wherever the height is at `now`.
    /// Without an animation the change applies immediately.
    pub fn retarget(&mut self, target: f64, now: Duration, animation: Option<Animation>) {
        let target = target.max(0.0);
        if target == self.to {
            return;
        }
        let current = self.value(now);
        *self = match animation {
            Some(animation) => Self {
                from: current,
                to: target,
                started: now,
                animation: Some(animation),
            },
            None => Self::settled(target),
        };
    }

    /// Displayed height at `now`.
    pub fn value(&self, now: Duration) -> f64 {
        match &self.animation {
            Some(animation) => {
                let t = animation.progress(now.saturating_sub(self.started));
                self.from + (self.to - self.from) * t
            }
            None => self.to,
        }
    }

    /// Height the transition ends at.
    pub fn target(&self) -> f64 {
        self.to
    }

    pub fn is_settled(&self, now: Duration) -> bool {
        match &self.animation {
            Some(animation) => now.saturating_sub(self.started) >= animation.duration,
            None => true,
        }
    }
}
