//! Spring physics
//!
//! Springs drive the mobile menu items and any tween eased with
//! [`Easing::Spring`](crate::Easing::Spring). A tween has a fixed duration, so
//! the spring response is normalized: progress `0..1` maps onto the time the
//! spring needs to settle within 0.1% of its target.

use serde::Serialize;

/// Configuration for a spring animation
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct SpringConfig {
    pub stiffness: f32,
    pub damping: f32,
    pub mass: f32,
}

impl SpringConfig {
    pub fn new(stiffness: f32, damping: f32, mass: f32) -> Self {
        Self {
            stiffness,
            damping,
            mass,
        }
    }

    /// A gentle, slow spring (good for page transitions)
    pub fn gentle() -> Self {
        Self::new(120.0, 14.0, 1.0)
    }

    /// A wobbly spring with overshoot (used by the mobile menu items)
    pub fn wobbly() -> Self {
        Self::new(100.0, 10.0, 1.0)
    }

    /// A stiff, snappy spring (good for buttons)
    pub fn stiff() -> Self {
        Self::new(400.0, 30.0, 1.0)
    }

    /// Calculate critical damping for this spring's stiffness and mass
    pub fn critical_damping(&self) -> f32 {
        2.0 * (self.stiffness * self.mass).sqrt()
    }

    /// Check if the spring is underdamped (will oscillate)
    pub fn is_underdamped(&self) -> bool {
        self.damping < self.critical_damping()
    }

    fn natural_frequency(&self) -> f32 {
        (self.stiffness / self.mass).sqrt()
    }

    fn damping_ratio(&self) -> f32 {
        self.damping / self.critical_damping()
    }

    /// Exponential decay rate of the slowest mode
    fn decay_rate(&self) -> f32 {
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();
        if zeta < 1.0 {
            zeta * w0
        } else {
            w0 * (zeta - (zeta * zeta - 1.0).max(0.0).sqrt())
        }
    }

    /// Time for a 0 → 1 step response to settle within 0.1%
    pub fn settle_duration_ms(&self) -> f32 {
        let rate = self.decay_rate();
        if rate <= f32::EPSILON {
            return 0.0;
        }
        (1000.0f32).ln() / rate * 1000.0
    }

    /// Step response at `t` seconds after release, starting at rest at 0 with target 1
    pub fn step_response(&self, t: f32) -> f32 {
        if t <= 0.0 {
            return 0.0;
        }
        let w0 = self.natural_frequency();
        let zeta = self.damping_ratio();

        if (zeta - 1.0).abs() < 1e-4 {
            1.0 - (-w0 * t).exp() * (1.0 + w0 * t)
        } else if zeta < 1.0 {
            let wd = w0 * (1.0 - zeta * zeta).sqrt();
            let envelope = (-zeta * w0 * t).exp();
            1.0 - envelope * ((wd * t).cos() + (zeta * w0 / wd) * (wd * t).sin())
        } else {
            let root = (zeta * zeta - 1.0).sqrt();
            let r1 = -w0 * (zeta - root);
            let r2 = -w0 * (zeta + root);
            1.0 + (r2 * (r1 * t).exp() - r1 * (r2 * t).exp()) / (r1 - r2)
        }
    }

    /// Step response with time normalized to the settle duration
    pub fn normalized_response(&self, progress: f32) -> f32 {
        if progress >= 1.0 {
            return 1.0;
        }
        self.step_response(progress * self.settle_duration_ms() / 1000.0)
    }
}

impl Default for SpringConfig {
    fn default() -> Self {
        Self::stiff()
    }
}

/// A free-running spring integrated with RK4
///
/// The reference for [`SpringConfig::step_response`], and usable directly for
/// values that chase a moving goal.
#[derive(Clone, Copy, Debug)]
pub struct Spring {
    config: SpringConfig,
    value: f32,
    velocity: f32,
    target: f32,
}

impl Spring {
    pub fn new(config: SpringConfig, initial: f32) -> Self {
        Self {
            config,
            value: initial,
            velocity: 0.0,
            target: initial,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn target(&self) -> f32 {
        self.target
    }

    pub fn set_target(&mut self, target: f32) {
        self.target = target;
    }

    /// Within a tenth of a pixel of the target with negligible velocity
    pub fn is_settled(&self) -> bool {
        const EPSILON: f32 = 0.1;
        const VELOCITY_EPSILON: f32 = 1.0;

        (self.value - self.target).abs() < EPSILON && self.velocity.abs() < VELOCITY_EPSILON
    }

    /// Advance the simulation by `dt` seconds
    pub fn step(&mut self, dt: f32) {
        if self.is_settled() {
            self.value = self.target;
            self.velocity = 0.0;
            return;
        }

        let k1_v = self.acceleration(self.value, self.velocity);
        let k1_x = self.velocity;

        let k2_v = self.acceleration(
            self.value + k1_x * dt * 0.5,
            self.velocity + k1_v * dt * 0.5,
        );
        let k2_x = self.velocity + k1_v * dt * 0.5;

        let k3_v = self.acceleration(
            self.value + k2_x * dt * 0.5,
            self.velocity + k2_v * dt * 0.5,
        );
        let k3_x = self.velocity + k2_v * dt * 0.5;

        let k4_v = self.acceleration(self.value + k3_x * dt, self.velocity + k3_v * dt);
        let k4_x = self.velocity + k3_v * dt;

        self.velocity += (k1_v + 2.0 * k2_v + 2.0 * k3_v + k4_v) * dt / 6.0;
        self.value += (k1_x + 2.0 * k2_x + 2.0 * k3_x + k4_x) * dt / 6.0;
    }

    fn acceleration(&self, x: f32, v: f32) -> f32 {
        let spring_force = -self.config.stiffness * (x - self.target);
        let damping_force = -self.config.damping * v;
        (spring_force + damping_force) / self.config.mass
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_spring_settles_to_target() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(100.0);

        for _ in 0..120 {
            spring.step(1.0 / 60.0);
        }

        assert!(spring.is_settled());
        assert!((spring.value() - 100.0).abs() < 0.1);
    }

    #[test]
    fn test_analytic_response_matches_integration() {
        for config in [
            SpringConfig::wobbly(),
            SpringConfig::stiff(),
            SpringConfig::new(100.0, 20.0, 1.0),
            SpringConfig::new(100.0, 40.0, 1.0),
        ] {
            let mut spring = Spring::new(config, 0.0);
            spring.set_target(1.0);
            let dt = 1.0 / 240.0;
            for frame in 1..=120 {
                spring.step(dt);
                let analytic = config.step_response(frame as f32 * dt);
                assert!(
                    (spring.value() - analytic).abs() < 0.01 || spring.is_settled(),
                    "{config:?} frame {frame}: {} vs {analytic}",
                    spring.value()
                );
            }
        }
    }

    #[test]
    fn test_normalized_response_endpoints() {
        let config = SpringConfig::wobbly();
        assert_eq!(config.normalized_response(0.0), 0.0);
        assert_eq!(config.normalized_response(1.0), 1.0);
        assert!((config.normalized_response(0.999) - 1.0).abs() < 0.01);
    }

    #[test]
    fn test_wobbly_overshoots() {
        let config = SpringConfig::wobbly();
        assert!(config.is_underdamped());
        let peak = (1..100)
            .map(|i| config.normalized_response(i as f32 / 100.0))
            .fold(0.0f32, f32::max);
        assert!(peak > 1.0);
    }

    #[test]
    fn test_spring_rk4_stability() {
        let mut spring = Spring::new(SpringConfig::stiff(), 0.0);
        spring.set_target(1000.0);

        for _ in 0..100 {
            spring.step(0.1);
            assert!(spring.value() < 2000.0);
            assert!(spring.value() > -500.0);
        }
    }
}
