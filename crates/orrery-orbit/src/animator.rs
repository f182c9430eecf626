//! Per-frame angle advance.
//!
//! Every frame tick adds each body's spin rate to its self angle and, for
//! planets, its orbit rate to its orbit angle. The star only spins.

use std::f32::consts::TAU;

use orrery_bodies::{AngularRates, BodyKind, BodyState, SolarSystem};

use crate::error::AnimatorError;

/// What happens to an angle after each tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AngleWrap {
    /// Keep angles in `[0, 2π)`.
    #[default]
    Tau,
    /// Let angles grow without bound.
    Unbounded,
}

impl AngleWrap {
    /// `Tau` when `wrap` is set, otherwise `Unbounded`.
    pub fn from_flag(wrap: bool) -> Self {
        if wrap { Self::Tau } else { Self::Unbounded }
    }

    fn apply(self, angle: f32) -> f32 {
        match self {
            Self::Unbounded => angle,
            Self::Tau => {
                let wrapped = angle.rem_euclid(TAU);
                // rem_euclid of a tiny negative rounds up to TAU in f32.
                if wrapped >= TAU { 0.0 } else { wrapped }
            }
        }
    }
}

/// Advance one body by `ticks` frame ticks.
///
/// Applied as `ticks` single-tick additions so the result is identical to
/// calling this once per frame.
pub fn advance(
    state: BodyState,
    rates: AngularRates,
    kind: BodyKind,
    ticks: u32,
    wrap: AngleWrap,
) -> BodyState {
    let orbit_rate = match kind {
        BodyKind::Star => 0.0,
        BodyKind::Planet => rates.orbit,
    };

    let mut next = state;
    for _ in 0..ticks {
        next.self_angle = wrap.apply(next.self_angle + rates.spin);
        next.orbit_angle = wrap.apply(next.orbit_angle + orbit_rate);
    }
    next
}

/// Drives every body's [`BodyState`] forward, one frame tick at a time.
#[derive(Debug, Clone, Default)]
pub struct Animator {
    wrap: AngleWrap,
    paused: bool,
    ticks: u64,
}

impl Animator {
    pub fn new(wrap: AngleWrap) -> Self {
        Self {
            wrap,
            paused: false,
            ticks: 0,
        }
    }

    pub fn wrap(&self) -> AngleWrap {
        self.wrap
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.paused = paused;
    }

    /// Flip the pause flag and return the new value.
    pub fn toggle_pause(&mut self) -> bool {
        self.paused = !self.paused;
        self.paused
    }

    /// Ticks applied since construction. Paused ticks are not counted.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Apply one frame tick to every body.
    pub fn advance(
        &mut self,
        system: &SolarSystem,
        states: &mut [BodyState],
    ) -> Result<(), AnimatorError> {
        self.advance_by(system, states, 1)
    }

    /// Apply `ticks` frame ticks to every body.
    ///
    /// `states` must hold one entry per body in [`SolarSystem::bodies`]
    /// order. A paused animator checks the length and changes nothing.
    pub fn advance_by(
        &mut self,
        system: &SolarSystem,
        states: &mut [BodyState],
        ticks: u32,
    ) -> Result<(), AnimatorError> {
        let expected = system.body_count();
        if states.len() != expected {
            return Err(AnimatorError::StateCountMismatch {
                expected,
                got: states.len(),
            });
        }
        if self.paused || ticks == 0 {
            return Ok(());
        }

        for (body, state) in system.bodies().zip(states.iter_mut()) {
            *state = advance(*state, body.rates(), body.kind(), ticks, self.wrap);
        }
        self.ticks += u64::from(ticks);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orrery_bodies::solar_system;

    #[test]
    fn test_sun_after_250_ticks() {
        let system = solar_system().unwrap();
        let mut states = system.initial_states();
        let mut animator = Animator::default();
        animator.advance_by(&system, &mut states, 250).unwrap();

        assert!((states[0].self_angle - 1.0).abs() < 1e-4);
        assert_eq!(states[0].orbit_angle, 0.0);
    }

    #[test]
    fn test_earth_full_orbit_returns_near_start() {
        let system = solar_system().unwrap();
        let earth = system.find("Earth").unwrap();
        let state = advance(
            BodyState::default(),
            earth.rates(),
            earth.kind(),
            628,
            AngleWrap::Unbounded,
        );
        assert!((state.orbit_angle - 6.28).abs() < 1e-3);
        // 628 * 0.01 is just short of a full turn.
        assert!((state.orbit_angle.cos() - 1.0).abs() < 1e-3);
        assert!(state.orbit_angle.sin().abs() < 1e-2);
    }

    #[test]
    fn test_multi_tick_matches_single_ticks() {
        let rates = AngularRates::new(0.0009, 0.038);
        let mut stepped = BodyState::default();
        for _ in 0..500 {
            stepped = advance(stepped, rates, BodyKind::Planet, 1, AngleWrap::Tau);
        }
        let batched = advance(
            BodyState::default(),
            rates,
            BodyKind::Planet,
            500,
            AngleWrap::Tau,
        );
        assert_eq!(stepped, batched);
    }

    #[test]
    fn test_zero_ticks_is_identity() {
        let state = BodyState::new(1.5, 2.5);
        let next = advance(
            state,
            AngularRates::new(0.1, 0.2),
            BodyKind::Planet,
            0,
            AngleWrap::Tau,
        );
        assert_eq!(state, next);
    }

    #[test]
    fn test_star_ignores_orbit_rate() {
        let next = advance(
            BodyState::default(),
            AngularRates::new(0.5, 0.1),
            BodyKind::Star,
            3,
            AngleWrap::Unbounded,
        );
        assert_eq!(next.orbit_angle, 0.0);
        assert!((next.self_angle - 0.3).abs() < 1e-6);
    }

    #[test]
    fn test_wrap_keeps_angles_in_range() {
        let rates = AngularRates::new(0.7, -0.9);
        let mut state = BodyState::default();
        for _ in 0..1000 {
            state = advance(state, rates, BodyKind::Planet, 1, AngleWrap::Tau);
            assert!((0.0..TAU).contains(&state.orbit_angle));
            assert!((0.0..TAU).contains(&state.self_angle));
        }
    }

    #[test]
    fn test_wrap_and_unbounded_agree_on_sin_cos() {
        let rates = AngularRates::new(0.04, 0.02);
        let wrapped = advance(
            BodyState::default(),
            rates,
            BodyKind::Planet,
            400,
            AngleWrap::Tau,
        );
        let raw = advance(
            BodyState::default(),
            rates,
            BodyKind::Planet,
            400,
            AngleWrap::Unbounded,
        );
        assert!(raw.orbit_angle > TAU);
        assert!((wrapped.orbit_angle.sin() - raw.orbit_angle.sin()).abs() < 1e-3);
        assert!((wrapped.orbit_angle.cos() - raw.orbit_angle.cos()).abs() < 1e-3);
    }

    #[test]
    fn test_negative_rate_reverses() {
        let next = advance(
            BodyState::default(),
            AngularRates::new(-0.1, 0.0),
            BodyKind::Planet,
            1,
            AngleWrap::Unbounded,
        );
        assert!((next.orbit_angle + 0.1).abs() < 1e-6);
    }

    #[test]
    fn test_paused_animator_leaves_states() {
        let system = solar_system().unwrap();
        let mut states = system.initial_states();
        let mut animator = Animator::default();
        animator.advance(&system, &mut states).unwrap();
        let before = states.clone();

        assert!(animator.toggle_pause());
        animator.advance_by(&system, &mut states, 100).unwrap();
        assert_eq!(states, before);
        assert_eq!(animator.ticks(), 1);

        animator.set_paused(false);
        animator.advance(&system, &mut states).unwrap();
        assert_ne!(states, before);
        assert_eq!(animator.ticks(), 2);
    }

    #[test]
    fn test_state_count_mismatch() {
        let system = solar_system().unwrap();
        let mut states = vec![BodyState::default(); 3];
        let err = Animator::default()
            .advance(&system, &mut states)
            .unwrap_err();
        assert_eq!(
            err,
            AnimatorError::StateCountMismatch {
                expected: 10,
                got: 3
            }
        );
    }

    #[test]
    fn test_every_planet_moves_each_tick() {
        let system = solar_system().unwrap();
        let mut states = system.initial_states();
        Animator::new(AngleWrap::Tau)
            .advance(&system, &mut states)
            .unwrap();
        for (body, state) in system.planets().iter().zip(&states[1..]) {
            assert_eq!(state.orbit_angle, body.rates().orbit, "{}", body.name());
            assert_eq!(state.self_angle, body.rates().spin, "{}", body.name());
        }
    }

    #[test]
    fn test_wrap_from_flag() {
        assert_eq!(AngleWrap::from_flag(true), AngleWrap::Tau);
        assert_eq!(AngleWrap::from_flag(false), AngleWrap::Unbounded);
    }
}
