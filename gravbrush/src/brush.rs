use std::f64::consts::TAU;

use cgmath::{Point2, Vector2, Vector3};
use log::debug;
use rand::Rng;
use serde::Deserialize;

use crate::{
    constants::{BRUSH_MASS_PER_SIZE, BRUSH_MAX, BRUSH_MIN, MAX_DENSITY},
    error::{Error, Result},
    parameters::BrushParameters,
    sim::{Bodies, NewBody},
};

/// Colors sampled per body while rainbow mode is on.
pub const RAINBOW: [[f32; 3]; 7] = [
    [1.0, 0.0, 0.0],
    [1.0, 0.5, 0.0],
    [1.0, 1.0, 0.0],
    [0.0, 1.0, 0.0],
    [0.0, 0.0, 1.0],
    [0.29, 0.0, 0.51],
    [0.56, 0.0, 1.0],
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BrushStyle {
    /// One body per emission, exactly at the pointer.
    #[default]
    Point,
    /// `count` bodies spread uniformly in angle around the pointer.
    Scatter,
}

/// A single live update of the brush, as sent by a settings widget.
#[derive(Debug, Clone, PartialEq)]
pub enum BrushSetting {
    Size(u32),
    Spread(u32),
    Count(u32),
    Density(u32),
    Style(BrushStyle),
    Color(Vector3<f32>),
    /// `#rrggbb`, as produced by a color picker.
    ColorHex(String),
    Rainbow(bool),
}

/// Parse a `#rrggbb` string into an RGB triple in `[0, 1]`.
pub fn parse_hex_color(input: &str) -> Result<Vector3<f32>> {
    let invalid = || Error::InvalidColor(input.to_owned());
    let hex = input.trim().strip_prefix('#').ok_or_else(invalid)?;
    if hex.len() != 6 || !hex.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(invalid());
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .map(|c| c as f32 / 255.0)
            .map_err(|_| invalid())
    };
    Ok(Vector3::new(channel(0)?, channel(2)?, channel(4)?))
}

fn check_point(at: Point2<f64>) -> Result<()> {
    if at.x.is_finite() && at.y.is_finite() {
        Ok(())
    } else {
        let msg = format!("pointer position must be finite, got {at:?}");
        Err(Error::InvalidBody(msg))
    }
}

fn check_range(field: &'static str, value: u32, min: u32, max: u32) -> Result<u32> {
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(Error::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Brush settings. Every setter validates before storing, so a rejected update leaves the
/// previous value in place.
#[derive(Debug, Clone, PartialEq)]
pub struct BrushConfig {
    size: u32,
    spread: u32,
    count: u32,
    density: u32,
    style: BrushStyle,
    color: Vector3<f32>,
    rainbow: bool,
}

impl Default for BrushConfig {
    fn default() -> Self {
        Self {
            size: 5,
            spread: 30,
            count: 10,
            density: 1,
            style: BrushStyle::Point,
            color: Vector3::new(0.0, 0.0, 1.0),
            rainbow: false,
        }
    }
}

impl BrushConfig {
    pub fn from_parameters(params: &BrushParameters) -> Result<Self> {
        let mut config = Self::default();
        config.set_size(params.size)?;
        config.set_spread(params.spread)?;
        config.set_count(params.count)?;
        config.set_density(params.density)?;
        config.set_style(params.style);
        config.set_color(parse_hex_color(&params.color)?);
        config.set_rainbow(params.rainbow);
        Ok(config)
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    pub fn spread(&self) -> u32 {
        self.spread
    }

    pub fn count(&self) -> u32 {
        self.count
    }

    pub fn density(&self) -> u32 {
        self.density
    }

    pub fn style(&self) -> BrushStyle {
        self.style
    }

    pub fn color(&self) -> Vector3<f32> {
        self.color
    }

    pub fn rainbow(&self) -> bool {
        self.rainbow
    }

    pub fn set_size(&mut self, size: u32) -> Result<()> {
        self.size = check_range("size", size, BRUSH_MIN, BRUSH_MAX)?;
        Ok(())
    }

    pub fn set_spread(&mut self, spread: u32) -> Result<()> {
        self.spread = check_range("spread", spread, BRUSH_MIN, BRUSH_MAX)?;
        Ok(())
    }

    pub fn set_count(&mut self, count: u32) -> Result<()> {
        self.count = check_range("count", count, BRUSH_MIN, BRUSH_MAX)?;
        Ok(())
    }

    pub fn set_density(&mut self, density: u32) -> Result<()> {
        self.density = check_range("density", density, 1, MAX_DENSITY - 1)?;
        Ok(())
    }

    pub fn set_style(&mut self, style: BrushStyle) {
        self.style = style;
    }

    pub fn set_color(&mut self, color: Vector3<f32>) {
        self.color = color;
    }

    pub fn set_rainbow(&mut self, rainbow: bool) {
        self.rainbow = rainbow;
    }

    pub fn apply(&mut self, setting: BrushSetting) -> Result<()> {
        match setting {
            BrushSetting::Size(v) => self.set_size(v),
            BrushSetting::Spread(v) => self.set_spread(v),
            BrushSetting::Count(v) => self.set_count(v),
            BrushSetting::Density(v) => self.set_density(v),
            BrushSetting::Style(style) => {
                self.set_style(style);
                Ok(())
            }
            BrushSetting::Color(color) => {
                self.set_color(color);
                Ok(())
            }
            BrushSetting::ColorHex(hex) => {
                self.set_color(parse_hex_color(&hex)?);
                Ok(())
            }
            BrushSetting::Rainbow(on) => {
                self.set_rainbow(on);
                Ok(())
            }
        }
    }

    /// Brush color, or a fresh palette sample in rainbow mode.
    fn pick_color(&self, rng: &mut impl Rng) -> Vector3<f32> {
        if self.rainbow {
            RAINBOW[rng.random_range(0..RAINBOW.len())].into()
        } else {
            self.color
        }
    }
}

/// Modular counter letting `density` out of every `MAX_DENSITY` calls through.
#[derive(Debug, Clone, Default)]
pub struct DensityThrottle {
    counter: u32,
}

impl DensityThrottle {
    pub fn density_count(&mut self, density: u32) -> bool {
        self.counter = (self.counter + density) % MAX_DENSITY;
        self.counter < density
    }

    pub fn reset(&mut self) {
        self.counter = 0;
    }

    pub fn counter(&self) -> u32 {
        self.counter
    }
}

/// Turns pointer activity into new bodies.
#[derive(Debug, Clone, Default)]
pub struct BrushEmitter {
    config: BrushConfig,
    throttle: DensityThrottle,
    active: bool,
}

impl BrushEmitter {
    pub fn new(config: BrushConfig) -> Self {
        Self {
            config,
            ..Default::default()
        }
    }

    pub fn config(&self) -> &BrushConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut BrushConfig {
        &mut self.config
    }

    /// Whether a press is in progress.
    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn throttle(&self) -> &DensityThrottle {
        &self.throttle
    }

    /// Start a stroke. A press always paints; it still advances the throttle. A press at a
    /// non-finite position is rejected without starting a stroke.
    pub fn press(
        &mut self,
        at: Point2<f64>,
        bodies: &mut Bodies,
        rng: &mut impl Rng,
    ) -> Result<usize> {
        check_point(at)?;
        self.active = true;
        self.throttle.density_count(self.config.density);
        self.spawn(at, bodies, rng)
    }

    /// Continue a stroke. Paints only during an active press while the host reports a drag,
    /// and only when the throttle lets this call through.
    pub fn drag(
        &mut self,
        at: Point2<f64>,
        dragging: bool,
        bodies: &mut Bodies,
        rng: &mut impl Rng,
    ) -> Result<usize> {
        if !(self.active && dragging) {
            return Ok(0);
        }
        check_point(at)?;
        if self.throttle.density_count(self.config.density) {
            self.spawn(at, bodies, rng)
        } else {
            Ok(0)
        }
    }

    pub fn release(&mut self) {
        self.active = false;
        self.throttle.reset();
    }

    /// Insert one brush dab at `at`, returning the number of bodies added.
    pub fn spawn(&self, at: Point2<f64>, bodies: &mut Bodies, rng: &mut impl Rng) -> Result<usize> {
        let max_mass = self.config.size as f64 * BRUSH_MASS_PER_SIZE;
        match self.config.style {
            BrushStyle::Point => {
                let color = self.config.pick_color(rng);
                bodies.insert(NewBody::at_rest(at, max_mass, color), rng)?;
                Ok(1)
            }
            BrushStyle::Scatter => {
                let spread = self.config.spread as f64;
                for _ in 0..self.config.count {
                    let angle = rng.random_range(0.0..TAU);
                    let radius = rng.random_range(0.0..=spread);
                    let pos = at + Vector2::new(angle.cos(), angle.sin()) * radius;
                    // Masses must stay strictly positive.
                    let mass = rng.random_range(0.0..max_mass).max(f64::MIN_POSITIVE);
                    let color = self.config.pick_color(rng);
                    bodies.insert(NewBody::at_rest(pos, mass, color), rng)?;
                }
                debug!("scattered {} bodies around {:?}", self.config.count, at);
                Ok(self.config.count as usize)
            }
        }
    }
}
