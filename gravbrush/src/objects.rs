use crate::sim::Body;

/// What a renderer needs to draw one body. Laid out for direct upload as an instance buffer.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct BodyInstance {
    pub pos: [f32; 2],
    pub radius: f32,
    /// 1 for the fixed body, 0 otherwise.
    pub fixed: u32,
    pub color: [f32; 3],
}

impl From<&Body> for BodyInstance {
    fn from(body: &Body) -> Self {
        Self {
            pos: [body.pos.x as f32, body.pos.y as f32],
            radius: body.radius as f32,
            fixed: u32::from(body.fixed),
            color: body.color.into(),
        }
    }
}

/// Render-ready copy of the body collection, in collection order.
#[derive(Debug, Clone, Default)]
pub struct Snapshot {
    instances: Vec<BodyInstance>,
    step: u64,
}

impl Snapshot {
    pub fn refresh(&mut self, bodies: &[Body], step: u64) {
        self.instances.clear();
        self.instances.extend(bodies.iter().map(BodyInstance::from));
        self.step = step;
    }

    pub fn instances(&self) -> &[BodyInstance] {
        &self.instances
    }

    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Number of steps executed when this snapshot was taken.
    pub fn step(&self) -> u64 {
        self.step
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }
}
