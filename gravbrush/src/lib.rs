pub mod brush;
pub mod constants;
pub mod diagnostics;
pub mod error;
pub mod input;
pub mod objects;
pub mod parameters;
pub mod presets;
pub mod sim;
pub mod simulator;

pub use brush::{BrushConfig, BrushEmitter, BrushSetting, BrushStyle, DensityThrottle};
pub use diagnostics::Diagnostics;
pub use error::{Error, Result};
pub use input::{InputEvent, Tool};
pub use objects::{BodyInstance, Snapshot};
pub use parameters::{BrushParameters, SimParameters};
pub use sim::{
    Algorithm, Bodies, Body, BodyId, ForceField, NewBody, PairwiseField, SpatialTreeField,
};
pub use simulator::{AlgorithmSelection, Simulator};
