// Easing curves used by the reveal, pop and tally effects.

use std::f64::consts::PI;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ease {
    /// Cubic deceleration.
    Power2Out,
    /// Quartic deceleration.
    Power3Out,
    /// Overshoots past 1 by `overshoot` before settling.
    BackOut(f64),
    ElasticOut { amplitude: f64, period: f64 },
}

impl Ease {
    /// Map linear progress `t` (clamped to 0..=1) to eased progress.
    /// Every curve starts at exactly 0 and ends at exactly 1.
    pub fn apply(&self, t: f64) -> f64 {
        if t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }

        match *self {
            Ease::Power2Out => 1.0 - (1.0 - t).powi(3),
            Ease::Power3Out => 1.0 - (1.0 - t).powi(4),
            Ease::BackOut(overshoot) => {
                let p = t - 1.0;
                p * p * ((overshoot + 1.0) * p + overshoot) + 1.0
            }
            Ease::ElasticOut { amplitude, period } => {
                let amplitude = amplitude.max(1.0);
                let angular = 2.0 * PI / period;
                let phase = (1.0 / amplitude).asin() / angular;
                amplitude * 2f64.powf(-10.0 * t) * ((t - phase) * angular).sin() + 1.0
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CURVES: [Ease; 4] = [
        Ease::Power2Out,
        Ease::Power3Out,
        Ease::BackOut(1.2),
        Ease::ElasticOut {
            amplitude: 1.0,
            period: 0.3,
        },
    ];

    #[test]
    fn test_endpoints_are_exact() {
        for ease in CURVES {
            assert_eq!(ease.apply(0.0), 0.0, "{:?}", ease);
            assert_eq!(ease.apply(1.0), 1.0, "{:?}", ease);
            assert_eq!(ease.apply(1.5), 1.0, "{:?}", ease);
        }
    }

    #[test]
    fn test_power_out_is_monotonic_and_decelerating() {
        let samples: Vec<f64> = (0..=100).map(|i| Ease::Power2Out.apply(i as f64 / 100.0)).collect();
        assert!(samples.windows(2).all(|w| w[1] >= w[0]));
        // Front-loaded: more than half done at the midpoint
        assert!(Ease::Power2Out.apply(0.5) > 0.5);
    }

    #[test]
    fn test_back_out_overshoots() {
        let peak = (1..100)
            .map(|i| Ease::BackOut(1.2).apply(i as f64 / 100.0))
            .fold(f64::MIN, f64::max);
        assert!(peak > 1.0);
    }
}
