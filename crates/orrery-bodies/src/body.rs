//! Body records and the per-body animation state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::BodyError;

/// Opaque texture handle, keyed by the texture's file name.
///
/// The asset collaborator resolves keys to pixels; the model never looks
/// inside them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TextureKey(String);

impl TextureKey {
    /// Create a key from a file name such as `"earth.jpg"`.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The file name this key refers to.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextureKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether a body is the central star or something that orbits it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BodyKind {
    /// The central light source. Spins in place, never orbits.
    Star,
    /// Orbits the origin at its orbit radius.
    Planet,
}

/// Per-tick angular increments in radians.
///
/// Negative rates reverse direction.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct AngularRates {
    /// Orbit angle increment per frame tick.
    pub orbit: f32,
    /// Self-rotation increment per frame tick.
    pub spin: f32,
}

impl AngularRates {
    pub fn new(orbit: f32, spin: f32) -> Self {
        Self { orbit, spin }
    }

    /// Rates for a body that only spins.
    pub fn spin_only(spin: f32) -> Self {
        Self { orbit: 0.0, spin }
    }
}

/// A flat ring around a body, given as a validated annulus.
#[derive(Debug, Clone, PartialEq)]
pub struct Annulus {
    inner_radius: f32,
    outer_radius: f32,
    texture: TextureKey,
}

impl Annulus {
    pub fn inner_radius(&self) -> f32 {
        self.inner_radius
    }

    pub fn outer_radius(&self) -> f32 {
        self.outer_radius
    }

    pub fn texture(&self) -> &TextureKey {
        &self.texture
    }
}

/// Optional ring descriptor.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Ring {
    #[default]
    None,
    Annulus(Annulus),
}

impl Ring {
    /// Build a ring, rejecting radii that violate `0 <= inner < outer`.
    pub fn annulus(
        inner_radius: f32,
        outer_radius: f32,
        texture: TextureKey,
    ) -> Result<Self, BodyError> {
        let valid = inner_radius.is_finite()
            && outer_radius.is_finite()
            && inner_radius >= 0.0
            && inner_radius < outer_radius;
        if !valid {
            return Err(BodyError::InvalidRing {
                inner: inner_radius,
                outer: outer_radius,
            });
        }
        Ok(Self::Annulus(Annulus {
            inner_radius,
            outer_radius,
            texture,
        }))
    }

    /// The annulus, if this body has a ring.
    pub fn as_annulus(&self) -> Option<&Annulus> {
        match self {
            Ring::None => None,
            Ring::Annulus(annulus) => Some(annulus),
        }
    }

    pub fn is_some(&self) -> bool {
        matches!(self, Ring::Annulus(_))
    }
}

/// Static descriptor of one body. Immutable once built.
#[derive(Debug, Clone, PartialEq)]
pub struct CelestialBody {
    name: String,
    kind: BodyKind,
    mean_radius: f32,
    texture: TextureKey,
    orbit_radius: f32,
    ring: Ring,
    rates: AngularRates,
}

impl CelestialBody {
    /// Build a planet orbiting the origin.
    pub fn planet(
        name: impl Into<String>,
        mean_radius: f32,
        texture: TextureKey,
        orbit_radius: f32,
        rates: AngularRates,
        ring: Ring,
    ) -> Result<Self, BodyError> {
        Self::validated(Self {
            name: name.into(),
            kind: BodyKind::Planet,
            mean_radius,
            texture,
            orbit_radius,
            ring,
            rates,
        })
    }

    /// Build the central star. Its orbit radius and orbit rate are zero.
    pub fn star(
        name: impl Into<String>,
        mean_radius: f32,
        texture: TextureKey,
        spin_rate: f32,
    ) -> Result<Self, BodyError> {
        Self::validated(Self {
            name: name.into(),
            kind: BodyKind::Star,
            mean_radius,
            texture,
            orbit_radius: 0.0,
            ring: Ring::None,
            rates: AngularRates::spin_only(spin_rate),
        })
    }

    fn validated(body: Self) -> Result<Self, BodyError> {
        if !(body.mean_radius.is_finite() && body.mean_radius > 0.0) {
            return Err(BodyError::InvalidRadius {
                name: body.name,
                radius: body.mean_radius,
            });
        }
        if !(body.orbit_radius.is_finite() && body.orbit_radius >= 0.0) {
            return Err(BodyError::InvalidOrbitRadius {
                name: body.name,
                orbit_radius: body.orbit_radius,
            });
        }
        if !(body.rates.orbit.is_finite() && body.rates.spin.is_finite()) {
            return Err(BodyError::InvalidRate { name: body.name });
        }
        Ok(body)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> BodyKind {
        self.kind
    }

    pub fn mean_radius(&self) -> f32 {
        self.mean_radius
    }

    pub fn texture(&self) -> &TextureKey {
        &self.texture
    }

    /// Distance from the origin along +X at orbit angle zero.
    pub fn orbit_radius(&self) -> f32 {
        self.orbit_radius
    }

    pub fn ring(&self) -> &Ring {
        &self.ring
    }

    pub fn rates(&self) -> AngularRates {
        self.rates
    }
}

/// Current angles of one body. The animator is the single writer.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BodyState {
    /// Angle of the body's orbit group around the Y axis.
    pub orbit_angle: f32,
    /// Angle of the body's own spin around its local Y axis.
    pub self_angle: f32,
}

impl BodyState {
    pub fn new(orbit_angle: f32, self_angle: f32) -> Self {
        Self {
            orbit_angle,
            self_angle,
        }
    }
}

/// Inverted sphere enclosing the scene, sampling a panoramic texture.
#[derive(Debug, Clone, PartialEq)]
pub struct Background {
    radius: f32,
    texture: TextureKey,
}

impl Background {
    pub fn new(radius: f32, texture: TextureKey) -> Result<Self, BodyError> {
        if !(radius.is_finite() && radius > 0.0) {
            return Err(BodyError::InvalidBackground(radius));
        }
        Ok(Self { radius, texture })
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn texture(&self) -> &TextureKey {
        &self.texture
    }
}

/// The full body table: one star, its planets, and an optional background.
///
/// Body order is stable. State slices follow [`SolarSystem::bodies`]: the
/// star first, then the planets in table order.
#[derive(Debug, Clone, PartialEq)]
pub struct SolarSystem {
    sun: CelestialBody,
    planets: Vec<CelestialBody>,
    background: Option<Background>,
}

impl SolarSystem {
    pub fn new(
        sun: CelestialBody,
        planets: Vec<CelestialBody>,
        background: Option<Background>,
    ) -> Result<Self, BodyError> {
        if planets.is_empty() {
            return Err(BodyError::NoPlanets);
        }
        Ok(Self {
            sun,
            planets,
            background,
        })
    }

    pub fn sun(&self) -> &CelestialBody {
        &self.sun
    }

    pub fn planets(&self) -> &[CelestialBody] {
        &self.planets
    }

    pub fn background(&self) -> Option<&Background> {
        self.background.as_ref()
    }

    /// Star first, then planets.
    pub fn bodies(&self) -> impl Iterator<Item = &CelestialBody> {
        std::iter::once(&self.sun).chain(self.planets.iter())
    }

    /// Number of bodies including the star.
    pub fn body_count(&self) -> usize {
        1 + self.planets.len()
    }

    /// Zeroed states, one per body, in [`bodies`](Self::bodies) order.
    pub fn initial_states(&self) -> Vec<BodyState> {
        vec![BodyState::default(); self.body_count()]
    }

    /// Look a body up by name, ignoring ASCII case.
    pub fn find(&self, name: &str) -> Option<&CelestialBody> {
        self.bodies().find(|b| b.name.eq_ignore_ascii_case(name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tex(name: &str) -> TextureKey {
        TextureKey::new(name)
    }

    #[test]
    fn test_ring_rejects_inverted_radii() {
        assert!(Ring::annulus(20.0, 10.0, tex("r.png")).is_err());
        assert!(Ring::annulus(10.0, 10.0, tex("r.png")).is_err());
        assert!(Ring::annulus(-1.0, 10.0, tex("r.png")).is_err());
        assert!(Ring::annulus(f32::NAN, 10.0, tex("r.png")).is_err());
    }

    #[test]
    fn test_ring_accepts_valid_annulus() {
        let ring = Ring::annulus(10.0, 20.0, tex("saturn_ring.png")).unwrap();
        let annulus = ring.as_annulus().unwrap();
        assert!(annulus.inner_radius() < annulus.outer_radius());
        assert_eq!(annulus.texture().as_str(), "saturn_ring.png");
    }

    #[test]
    fn test_planet_rejects_non_positive_radius() {
        let err = CelestialBody::planet(
            "Nil",
            0.0,
            tex("nil.jpg"),
            10.0,
            AngularRates::default(),
            Ring::None,
        )
        .unwrap_err();
        assert!(matches!(err, BodyError::InvalidRadius { .. }));
    }

    #[test]
    fn test_planet_rejects_negative_orbit_radius() {
        let err = CelestialBody::planet(
            "Inside",
            1.0,
            tex("x.jpg"),
            -5.0,
            AngularRates::default(),
            Ring::None,
        )
        .unwrap_err();
        assert!(matches!(err, BodyError::InvalidOrbitRadius { .. }));
    }

    #[test]
    fn test_planet_rejects_infinite_rate() {
        let err = CelestialBody::planet(
            "Spinner",
            1.0,
            tex("x.jpg"),
            5.0,
            AngularRates::new(0.01, f32::INFINITY),
            Ring::None,
        )
        .unwrap_err();
        assert!(matches!(err, BodyError::InvalidRate { .. }));
    }

    #[test]
    fn test_negative_rates_are_allowed() {
        let body = CelestialBody::planet(
            "Retro",
            1.0,
            tex("x.jpg"),
            5.0,
            AngularRates::new(-0.01, -0.02),
            Ring::None,
        );
        assert!(body.is_ok());
    }

    #[test]
    fn test_star_has_no_orbit() {
        let sun = CelestialBody::star("Sun", 15.0, tex("sun.jpg"), 0.004).unwrap();
        assert_eq!(sun.kind(), BodyKind::Star);
        assert_eq!(sun.orbit_radius(), 0.0);
        assert_eq!(sun.rates().orbit, 0.0);
        assert!(!sun.ring().is_some());
    }

    #[test]
    fn test_system_requires_planets() {
        let sun = CelestialBody::star("Sun", 15.0, tex("sun.jpg"), 0.004).unwrap();
        assert!(matches!(
            SolarSystem::new(sun, Vec::new(), None),
            Err(BodyError::NoPlanets)
        ));
    }

    #[test]
    fn test_background_rejects_zero_radius() {
        assert!(Background::new(0.0, tex("stars.jpg")).is_err());
        assert!(Background::new(800.0, tex("stars.jpg")).is_ok());
    }
}
