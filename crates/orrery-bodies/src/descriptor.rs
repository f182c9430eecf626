//! Serializable body tables.
//!
//! A [`SystemDescriptor`] is the on-disk (RON) form of a [`SolarSystem`].
//! Converting it validates every body the same way the constructors do.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::body::{AngularRates, Background, CelestialBody, Ring, SolarSystem, TextureKey};
use crate::error::BodyError;

/// A whole body table as written in a `.ron` file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SystemDescriptor {
    pub sun: BodyDescriptor,
    pub planets: Vec<BodyDescriptor>,
    #[serde(default)]
    pub background: Option<BackgroundDescriptor>,
}

/// One body. The sun ignores `orbit_radius`, `orbit_rate` and `ring`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyDescriptor {
    pub name: String,
    pub radius: f32,
    pub texture: TextureKey,
    #[serde(default)]
    pub orbit_radius: f32,
    #[serde(default)]
    pub orbit_rate: f32,
    pub spin_rate: f32,
    #[serde(default)]
    pub ring: Option<RingDescriptor>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RingDescriptor {
    pub inner_radius: f32,
    pub outer_radius: f32,
    pub texture: TextureKey,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BackgroundDescriptor {
    pub radius: f32,
    pub texture: TextureKey,
}

impl BodyDescriptor {
    fn into_star(self) -> Result<CelestialBody, BodyError> {
        if self.orbit_radius != 0.0 || self.orbit_rate != 0.0 || self.ring.is_some() {
            log::warn!(
                "Sun '{}' orbit and ring fields are ignored; the star only spins",
                self.name
            );
        }
        CelestialBody::star(self.name, self.radius, self.texture, self.spin_rate)
    }

    fn into_planet(self) -> Result<CelestialBody, BodyError> {
        let ring = match self.ring {
            Some(ring) => Ring::annulus(ring.inner_radius, ring.outer_radius, ring.texture)?,
            None => Ring::None,
        };
        CelestialBody::planet(
            self.name,
            self.radius,
            self.texture,
            self.orbit_radius,
            AngularRates::new(self.orbit_rate, self.spin_rate),
            ring,
        )
    }

    fn from_body(body: &CelestialBody) -> Self {
        Self {
            name: body.name().to_string(),
            radius: body.mean_radius(),
            texture: body.texture().clone(),
            orbit_radius: body.orbit_radius(),
            orbit_rate: body.rates().orbit,
            spin_rate: body.rates().spin,
            ring: body.ring().as_annulus().map(|a| RingDescriptor {
                inner_radius: a.inner_radius(),
                outer_radius: a.outer_radius(),
                texture: a.texture().clone(),
            }),
        }
    }
}

impl SystemDescriptor {
    /// Validate and build the runtime body table.
    pub fn into_system(self) -> Result<SolarSystem, BodyError> {
        let sun = self.sun.into_star()?;
        let planets = self
            .planets
            .into_iter()
            .map(BodyDescriptor::into_planet)
            .collect::<Result<Vec<_>, _>>()?;
        let background = self
            .background
            .map(|bg| Background::new(bg.radius, bg.texture))
            .transpose()?;
        SolarSystem::new(sun, planets, background)
    }
}

impl SolarSystem {
    /// Parse and validate a RON body table.
    pub fn from_ron_str(source: &str) -> Result<Self, BodyError> {
        let descriptor: SystemDescriptor = ron::from_str(source)?;
        descriptor.into_system()
    }

    /// Load a RON body table from disk.
    pub fn load(path: &Path) -> Result<Self, BodyError> {
        let source = std::fs::read_to_string(path).map_err(|source| BodyError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let system = Self::from_ron_str(&source)?;
        log::info!(
            "Loaded body table from {} ({} planets)",
            path.display(),
            system.planets().len()
        );
        Ok(system)
    }

    /// The serializable form of this table.
    pub fn to_descriptor(&self) -> SystemDescriptor {
        SystemDescriptor {
            sun: BodyDescriptor::from_body(self.sun()),
            planets: self.planets().iter().map(BodyDescriptor::from_body).collect(),
            background: self.background().map(|bg| BackgroundDescriptor {
                radius: bg.radius(),
                texture: bg.texture().clone(),
            }),
        }
    }
}
