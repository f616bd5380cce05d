use std::{fmt::Display, time::Instant};

use cgmath::{Point2, Vector2, Zero};
use log::{debug, info, warn};
use rand::{SeedableRng, rngs::StdRng};

use crate::{
    brush::{BrushConfig, BrushEmitter},
    constants::{CULL_PADDING, TICK_INTERVAL_MS},
    diagnostics::Diagnostics,
    error::{Error, Result},
    input::{InputEvent, InputQueue, Tool},
    objects::Snapshot,
    parameters::SimParameters,
    presets,
    sim::{
        Algorithm, Bodies, ForceField, NewBody, PairwiseField, SpatialTreeField,
        integrator::integrate,
    },
};

/// Force algorithm as last requested by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AlgorithmSelection {
    Known(Algorithm),
    /// Token that matched no algorithm. Steps skip force computation while this is selected.
    Unrecognized(String),
}

impl AlgorithmSelection {
    pub fn from_token(token: &str) -> Self {
        match token.parse() {
            Ok(algorithm) => AlgorithmSelection::Known(algorithm),
            Err(_) => AlgorithmSelection::Unrecognized(token.to_owned()),
        }
    }
}

impl Display for AlgorithmSelection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AlgorithmSelection::Known(algorithm) => write!(f, "{algorithm}"),
            AlgorithmSelection::Unrecognized(token) => write!(f, "unrecognized({token:?})"),
        }
    }
}

/// All mutable state of a run, owned by one [`Simulator`].
#[derive(Debug)]
pub struct SimulationState {
    pub bodies: Bodies,
    pub brush: BrushEmitter,
    pub tool: Tool,
    pub paused: bool,
    pub algorithm: AlgorithmSelection,
    rng: StdRng,
}

/// Fixed-tick scheduler around one [`SimulationState`].
pub struct Simulator {
    state: SimulationState,
    width: f64,
    height: f64,
    pairwise: PairwiseField,
    spatial: SpatialTreeField,
    acc: Vec<Vector2<f64>>,
    events: InputQueue,
    last_step: Option<f64>,
    diagnostics: Diagnostics,
    snapshot: Snapshot,
}

impl Simulator {
    /// Start from the sun and its orbiting ring.
    pub fn new(params: &SimParameters) -> Result<Self> {
        let mut rng = seeded_rng(params.seed);
        let initial = presets::sun_and_ring(params, &mut rng);
        Self::with_rng(params, initial, rng)
    }

    /// Start from an explicit population. Exactly one body must be fixed.
    pub fn from_bodies(params: &SimParameters, initial: Vec<NewBody>) -> Result<Self> {
        Self::with_rng(params, initial, seeded_rng(params.seed))
    }

    fn with_rng(params: &SimParameters, initial: Vec<NewBody>, mut rng: StdRng) -> Result<Self> {
        params.validate()?;
        let fixed = initial.iter().filter(|b| b.fixed).count();
        if fixed != 1 {
            return Err(Error::FixedBodyCount(fixed));
        }

        let mut bodies = Bodies::new();
        for body in initial {
            bodies.insert(body, &mut rng)?;
        }

        let state = SimulationState {
            bodies,
            brush: BrushEmitter::new(BrushConfig::from_parameters(&params.brush)?),
            tool: Tool::default(),
            paused: false,
            algorithm: AlgorithmSelection::Known(params.algorithm),
            rng,
        };

        let mut sim = Self {
            state,
            width: params.width,
            height: params.height,
            pairwise: PairwiseField,
            spatial: SpatialTreeField::new(),
            acc: Vec::new(),
            events: InputQueue::default(),
            last_step: None,
            diagnostics: Diagnostics::new(),
            snapshot: Snapshot::default(),
        };
        sim.diagnostics.update_particle_count(sim.state.bodies.len());
        sim.snapshot.refresh(sim.state.bodies.as_slice(), 0);
        info!(
            "simulation ready: {} bodies in {}x{}, {} force field",
            sim.state.bodies.len(),
            sim.width,
            sim.height,
            sim.state.algorithm
        );
        Ok(sim)
    }

    /// Queue input for the next executed step.
    pub fn push_event(&mut self, event: InputEvent) {
        self.events.push(event);
    }

    pub fn pending_events(&self) -> usize {
        self.events.len()
    }

    /// Host frame callback. Runs at most one step, and only when a full tick interval has
    /// passed since the last one. Late frames are not caught up. The very first call only
    /// records the reference time. Returns whether a step ran.
    pub fn frame(&mut self, timestamp_ms: f64) -> bool {
        if !timestamp_ms.is_finite() {
            warn!("ignoring non-finite frame timestamp {timestamp_ms}");
            return false;
        }
        let last = *self.last_step.get_or_insert(timestamp_ms);
        if timestamp_ms - last < TICK_INTERVAL_MS {
            return false;
        }
        self.last_step = Some(timestamp_ms);
        self.step();
        true
    }

    /// Run one physics step unconditionally.
    pub fn step(&mut self) {
        self.drain_events();

        let start = Instant::now();
        if !self.state.paused {
            self.acc.clear();
            self.acc.resize(self.state.bodies.len(), Vector2::zero());

            let field: Option<&mut dyn ForceField> = match &self.state.algorithm {
                AlgorithmSelection::Known(Algorithm::Pairwise) => Some(&mut self.pairwise),
                AlgorithmSelection::Known(Algorithm::SpatialTree) => Some(&mut self.spatial),
                AlgorithmSelection::Unrecognized(token) => {
                    warn!("unknown force algorithm {token:?}, bodies drift this step");
                    None
                }
            };
            if let Some(field) = field {
                field.accumulate(self.state.bodies.as_slice(), &mut self.acc);
            }
            integrate(self.state.bodies.as_mut_slice(), &mut self.acc);
        }
        let culled = self.cull();
        let elapsed = start.elapsed();

        self.diagnostics.update_time(elapsed);
        self.diagnostics.update_particle_count(self.state.bodies.len());
        self.snapshot
            .refresh(self.state.bodies.as_slice(), self.diagnostics.steps());
        debug!(
            "step {}: {} bodies, {} culled, {:?}",
            self.diagnostics.steps(),
            self.state.bodies.len(),
            culled,
            elapsed
        );
    }

    /// Remove every non-fixed body beyond the padded region. Returns how many went.
    fn cull(&mut self) -> usize {
        let (min_x, max_x) = (-CULL_PADDING, self.width + CULL_PADDING);
        let (min_y, max_y) = (-CULL_PADDING, self.height + CULL_PADDING);
        let before = self.state.bodies.len();
        self.state.bodies.retain(|b| {
            b.fixed
                || ((min_x..=max_x).contains(&b.pos.x) && (min_y..=max_y).contains(&b.pos.y))
        });
        before - self.state.bodies.len()
    }

    fn drain_events(&mut self) {
        while let Some(event) = self.events.pop() {
            if let Err(e) = self.handle_event(event) {
                warn!("input event rejected: {e}");
            }
        }
    }

    fn handle_event(&mut self, event: InputEvent) -> Result<()> {
        let state = &mut self.state;
        match event {
            InputEvent::Press { x, y } => {
                if state.tool == Tool::Brush {
                    state
                        .brush
                        .press(Point2::new(x, y), &mut state.bodies, &mut state.rng)?;
                }
            }
            InputEvent::Move { x, y, dragging } => {
                if state.tool == Tool::Brush {
                    state.brush.drag(
                        Point2::new(x, y),
                        dragging,
                        &mut state.bodies,
                        &mut state.rng,
                    )?;
                }
            }
            InputEvent::Release => {
                if state.tool == Tool::Brush {
                    state.brush.release();
                }
            }
            InputEvent::SelectTool(tool) => state.tool = tool,
            InputEvent::Brush(setting) => state.brush.config_mut().apply(setting)?,
            InputEvent::SelectAlgorithm(token) => {
                state.algorithm = AlgorithmSelection::from_token(&token);
                if let AlgorithmSelection::Unrecognized(_) = state.algorithm {
                    return Err(Error::UnknownAlgorithm(token));
                }
            }
            InputEvent::SetPaused(paused) => state.paused = paused,
            InputEvent::TogglePause => state.paused = !state.paused,
        }
        Ok(())
    }

    pub fn set_paused(&mut self, paused: bool) {
        self.state.paused = paused;
    }

    pub fn set_algorithm(&mut self, algorithm: Algorithm) {
        self.state.algorithm = AlgorithmSelection::Known(algorithm);
    }

    pub fn state(&self) -> &SimulationState {
        &self.state
    }

    pub fn bodies(&self) -> &Bodies {
        &self.state.bodies
    }

    pub fn is_paused(&self) -> bool {
        self.state.paused
    }

    pub fn algorithm(&self) -> &AlgorithmSelection {
        &self.state.algorithm
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn diagnostics(&self) -> &Diagnostics {
        &self.diagnostics
    }

    /// Simulated region as `(width, height)`.
    pub fn region(&self) -> (f64, f64) {
        (self.width, self.height)
    }
}

fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    }
}
