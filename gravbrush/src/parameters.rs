//! Run parameters, loadable from YAML.
//!
//! Every field has a default, so a file only needs to name what it changes:
//!
//! ```yaml
//! width: 1920
//! height: 1080
//! algorithm: spatial_tree   # or "pairwise"
//! ring_bodies: 500
//! seed: 42
//! brush:
//!   style: scatter          # or "point"
//!   count: 25
//!   spread: 40
//!   color: "#ff8800"
//! ```
//!
//! Physical constants are not configurable; see [`crate::constants`].

use std::{fs::File, io::BufReader, path::Path};

use serde::Deserialize;

use crate::{
    brush::{BrushConfig, BrushStyle},
    constants::{RING_BODIES, SUN_MASS},
    error::{Error, Result},
    sim::Algorithm,
};

/// Initial brush state. Bounds are checked by [`BrushConfig::from_parameters`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrushParameters {
    pub size: u32,
    pub spread: u32,
    pub count: u32,
    pub density: u32,
    pub style: BrushStyle,
    /// `#rrggbb`
    pub color: String,
    pub rainbow: bool,
}

impl Default for BrushParameters {
    fn default() -> Self {
        Self {
            size: 5,
            spread: 30,
            count: 10,
            density: 1,
            style: BrushStyle::Point,
            color: "#0000ff".to_owned(),
            rainbow: false,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SimParameters {
    /// Width of the simulated region. Bodies further than the cull padding outside
    /// `[0, width] x [0, height]` are removed.
    pub width: f64,
    pub height: f64,
    pub algorithm: Algorithm,
    /// Orbiters placed on the initial ring around the sun.
    pub ring_bodies: usize,
    pub sun_mass: f64,
    /// Seed for every random draw of the run. `None` seeds from the OS.
    pub seed: Option<u64>,
    pub brush: BrushParameters,
}

impl Default for SimParameters {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            algorithm: Algorithm::default(),
            ring_bodies: RING_BODIES,
            sun_mass: SUN_MASS,
            seed: None,
            brush: BrushParameters::default(),
        }
    }
}

impl SimParameters {
    pub fn from_yaml_str(yaml: &str) -> Result<Self> {
        let params: Self = serde_yaml::from_str(yaml)?;
        params.validate()?;
        Ok(params)
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let reader = BufReader::new(File::open(path)?);
        let params: Self = serde_yaml::from_reader(reader)?;
        params.validate()?;
        Ok(params)
    }

    pub fn validate(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("sun_mass", self.sun_mass),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(Error::InvalidParam(format!(
                    "{name} must be positive and finite, got {value}"
                )));
            }
        }
        BrushConfig::from_parameters(&self.brush)?;
        Ok(())
    }
}
