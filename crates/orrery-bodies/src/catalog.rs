//! The built-in solar system table.
//!
//! Sizes and distances are display units, not astronomical ones; rates are
//! radians per frame tick.

use crate::body::{AngularRates, Background, CelestialBody, Ring, SolarSystem, TextureKey};
use crate::error::BodyError;

/// Sun self-rotation per frame tick.
pub const SUN_SPIN_RATE: f32 = 0.004;

/// Sun mean radius.
pub const SUN_RADIUS: f32 = 15.0;

/// Radius of the background starfield sphere.
pub const BACKGROUND_RADIUS: f32 = 800.0;

struct PlanetRow {
    name: &'static str,
    radius: f32,
    orbit_radius: f32,
    orbit_rate: f32,
    spin_rate: f32,
    ring: Option<(f32, f32)>,
}

const PLANETS: [PlanetRow; 9] = [
    PlanetRow {
        name: "Mercury",
        radius: 3.2,
        orbit_radius: 28.0,
        orbit_rate: 0.004,
        spin_rate: 0.004,
        ring: None,
    },
    PlanetRow {
        name: "Venus",
        radius: 5.8,
        orbit_radius: 44.0,
        orbit_rate: 0.015,
        spin_rate: 0.002,
        ring: None,
    },
    PlanetRow {
        name: "Earth",
        radius: 6.0,
        orbit_radius: 62.0,
        orbit_rate: 0.01,
        spin_rate: 0.02,
        ring: None,
    },
    PlanetRow {
        name: "Mars",
        radius: 4.0,
        orbit_radius: 78.0,
        orbit_rate: 0.008,
        spin_rate: 0.018,
        ring: None,
    },
    PlanetRow {
        name: "Jupiter",
        radius: 12.0,
        orbit_radius: 100.0,
        orbit_rate: 0.002,
        spin_rate: 0.04,
        ring: None,
    },
    PlanetRow {
        name: "Saturn",
        radius: 10.0,
        orbit_radius: 138.0,
        orbit_rate: 0.0009,
        spin_rate: 0.038,
        ring: Some((10.0, 20.0)),
    },
    PlanetRow {
        name: "Uranus",
        radius: 7.0,
        orbit_radius: 176.0,
        orbit_rate: 0.0004,
        spin_rate: 0.03,
        ring: Some((7.0, 12.0)),
    },
    PlanetRow {
        name: "Neptune",
        radius: 7.0,
        orbit_radius: 200.0,
        orbit_rate: 0.0001,
        spin_rate: 0.032,
        ring: None,
    },
    PlanetRow {
        name: "Pluto",
        radius: 2.8,
        orbit_radius: 216.0,
        orbit_rate: 0.0007,
        spin_rate: 0.008,
        ring: None,
    },
];

/// Texture file name for a body, e.g. `"Earth"` -> `"earth.jpg"`.
pub fn body_texture(name: &str) -> TextureKey {
    TextureKey::new(format!("{}.jpg", name.to_ascii_lowercase()))
}

/// Texture file name for a body's ring, e.g. `"Saturn"` -> `"saturn_ring.png"`.
pub fn ring_texture(name: &str) -> TextureKey {
    TextureKey::new(format!("{}_ring.png", name.to_ascii_lowercase()))
}

/// Build the Sun, Mercury..Pluto, and the starfield background.
pub fn solar_system() -> Result<SolarSystem, BodyError> {
    let sun = CelestialBody::star("Sun", SUN_RADIUS, body_texture("sun"), SUN_SPIN_RATE)?;

    let planets = PLANETS
        .iter()
        .map(|row| {
            let ring = match row.ring {
                Some((inner, outer)) => Ring::annulus(inner, outer, ring_texture(row.name))?,
                None => Ring::None,
            };
            CelestialBody::planet(
                row.name,
                row.radius,
                body_texture(row.name),
                row.orbit_radius,
                AngularRates::new(row.orbit_rate, row.spin_rate),
                ring,
            )
        })
        .collect::<Result<Vec<_>, _>>()?;

    let background = Background::new(BACKGROUND_RADIUS, TextureKey::new("stars.jpg"))?;

    SolarSystem::new(sun, planets, Some(background))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BodyKind;

    #[test]
    fn test_nine_planets_in_order() {
        let system = solar_system().unwrap();
        let names: Vec<&str> = system.planets().iter().map(|p| p.name()).collect();
        assert_eq!(
            names,
            [
                "Mercury", "Venus", "Earth", "Mars", "Jupiter", "Saturn", "Uranus", "Neptune",
                "Pluto"
            ]
        );
        assert_eq!(system.body_count(), 10);
    }

    #[test]
    fn test_only_saturn_and_uranus_have_rings() {
        let system = solar_system().unwrap();
        let ringed: Vec<&str> = system
            .planets()
            .iter()
            .filter(|p| p.ring().is_some())
            .map(|p| p.name())
            .collect();
        assert_eq!(ringed, ["Saturn", "Uranus"]);

        let saturn = system.find("saturn").unwrap();
        let annulus = saturn.ring().as_annulus().unwrap();
        assert_eq!(annulus.inner_radius(), 10.0);
        assert_eq!(annulus.outer_radius(), 20.0);
        assert_eq!(annulus.texture().as_str(), "saturn_ring.png");
    }

    #[test]
    fn test_sun_spins_only() {
        let system = solar_system().unwrap();
        let sun = system.sun();
        assert_eq!(sun.kind(), BodyKind::Star);
        assert_eq!(sun.rates().spin, SUN_SPIN_RATE);
        assert_eq!(sun.rates().orbit, 0.0);
        assert_eq!(sun.texture().as_str(), "sun.jpg");
    }

    #[test]
    fn test_earth_constants() {
        let system = solar_system().unwrap();
        let earth = system.find("Earth").unwrap();
        assert_eq!(earth.mean_radius(), 6.0);
        assert_eq!(earth.orbit_radius(), 62.0);
        assert_eq!(earth.rates(), AngularRates::new(0.01, 0.02));
        assert_eq!(earth.texture().as_str(), "earth.jpg");
    }

    #[test]
    fn test_no_negative_rates_in_catalog() {
        let system = solar_system().unwrap();
        for body in system.bodies() {
            assert!(body.rates().orbit >= 0.0, "{}", body.name());
            assert!(body.rates().spin >= 0.0, "{}", body.name());
        }
    }

    #[test]
    fn test_background_encloses_outermost_orbit() {
        let system = solar_system().unwrap();
        let background = system.background().unwrap();
        let outermost = system
            .planets()
            .iter()
            .map(|p| p.orbit_radius() + p.mean_radius())
            .fold(0.0_f32, f32::max);
        assert!(background.radius() > outermost);
        assert_eq!(background.texture().as_str(), "stars.jpg");
    }
}
