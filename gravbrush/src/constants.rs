// PHYSICAL
/// Gravitational constant, in simulation units.
pub const G: f64 = 0.1;
/// Added to the squared distance of every pair to keep the force finite near zero separation.
pub const SOFTENING: f64 = 0.1;

// SIMULATION
/// Target physics steps per second.
pub const TICK_RATE: f64 = 60.0;
/// Minimum wall-clock time between two steps, in milliseconds.
pub const TICK_INTERVAL_MS: f64 = 1000.0 / TICK_RATE;
/// Margin around the simulated region inside which bodies survive culling.
pub const CULL_PADDING: f64 = 200.0;
/// Number of step durations kept for the rolling average.
pub const DIAGNOSTICS_WINDOW: usize = 10;

// BRUSH
/// Length of one density throttle cycle. Density must stay strictly below it.
pub const MAX_DENSITY: u32 = 100;
/// Mass given per unit of brush size.
pub const BRUSH_MASS_PER_SIZE: f64 = 30.0;
/// Inclusive bounds of the size, spread and count brush settings.
pub const BRUSH_MIN: u32 = 1;
pub const BRUSH_MAX: u32 = 100;

// PRESETS
/// Mass of the fixed body in the default scenario.
pub const SUN_MASS: f64 = 1000.0;
/// Number of orbiters placed on the initial ring.
pub const RING_BODIES: usize = 300;
/// Ring orbiters get a mass in `[1, 1 + RING_MASS_SPREAD)`.
pub const RING_MASS_SPREAD: f64 = 30.0;
/// Radius is `cbrt(mass)` scaled by a random factor in this range.
pub const RADIUS_JITTER: std::ops::Range<f64> = 1.0..3.0;
