//! Animation descriptors for height transitions.

use std::time::Duration;

/// Timing curve of an animation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Curve {
    #[default]
    Linear,
    EaseIn,
    EaseOut,
    EaseInOut,
}

impl Curve {
    /// Map linear progress `t` in [0, 1] through the curve.
    pub fn apply(self, t: f64) -> f64 {
        let t = t.clamp(0.0, 1.0);
        match self {
            Curve::Linear => t,
            Curve::EaseIn => t * t,
            Curve::EaseOut => t * (2.0 - t),
            Curve::EaseInOut => {
                if t < 0.5 {
                    2.0 * t * t
                } else {
                    -1.0 + (4.0 - 2.0 * t) * t
                }
            }
        }
    }
}

/// A transition style: curve plus duration.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Animation {
    pub curve: Curve,
    pub duration: Duration,
}

impl Animation {
    pub fn new(curve: Curve, duration: Duration) -> Self {
        Self { curve, duration }
    }

    pub fn linear(duration: Duration) -> Self {
        Self::new(Curve::Linear, duration)
    }

    pub fn ease_in_out(duration: Duration) -> Self {
        Self::new(Curve::EaseInOut, duration)
    }

    /// Eased progress after `elapsed`, in [0, 1].
    pub fn progress(&self, elapsed: Duration) -> f64 {
        if self.duration.is_zero() || elapsed >= self.duration {
            return 1.0;
        }
        self.curve
            .apply(elapsed.as_secs_f64() / self.duration.as_secs_f64())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linear_progress() {
        let animation = Animation::linear(Duration::from_millis(200));
        assert!((animation.progress(Duration::ZERO)).abs() < 0.001);
        assert!((animation.progress(Duration::from_millis(100)) - 0.5).abs() < 0.001);
        assert!((animation.progress(Duration::from_millis(400)) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_zero_duration_completes_immediately() {
        let animation = Animation::ease_in_out(Duration::ZERO);
        assert!((animation.progress(Duration::ZERO) - 1.0).abs() < 0.001);
    }

    #[test]
    fn test_curve_endpoints() {
        for curve in [Curve::Linear, Curve::EaseIn, Curve::EaseOut, Curve::EaseInOut] {
            assert!(curve.apply(0.0).abs() < 0.001);
            assert!((curve.apply(1.0) - 1.0).abs() < 0.001);
        }
        assert!((Curve::EaseInOut.apply(0.5) - 0.5).abs() < 0.001);
    }
}
