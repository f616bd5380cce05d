use std::f64::consts::TAU;

use cgmath::{Point2, Vector2, Vector3};
use rand::Rng;

use crate::{
    constants::{G, RING_MASS_SPREAD},
    parameters::SimParameters,
    sim::NewBody,
};

pub fn sun_color() -> Vector3<f32> {
    Vector3::new(1.0, 1.0, 0.0)
}

pub fn ring_color() -> Vector3<f32> {
    Vector3::new(0.0, 0.0, 1.0)
}

/// The fixed body, at the center of the region.
pub fn sun(params: &SimParameters) -> NewBody {
    NewBody::fixed(
        Point2::new(params.width / 2.0, params.height / 2.0),
        params.sun_mass,
        sun_color(),
    )
}

/// Sun plus `ring_bodies` orbiters spaced evenly on a circle of radius `width / 4`, each
/// launched at circular-orbit speed.
pub fn sun_and_ring(params: &SimParameters, rng: &mut impl Rng) -> Vec<NewBody> {
    let sun = sun(params);
    let center = sun.pos;
    let distance = params.width / 4.0;
    let speed = (G * params.sun_mass / distance).sqrt();

    let mut bodies = Vec::with_capacity(params.ring_bodies + 1);
    bodies.push(sun);
    for i in 0..params.ring_bodies {
        let angle = i as f64 / params.ring_bodies as f64 * TAU;
        let (sin, cos) = angle.sin_cos();
        let mass = rng.random_range(0.0..RING_MASS_SPREAD) + 1.0;
        bodies.push(
            NewBody::at_rest(
                center + Vector2::new(cos, sin) * distance,
                mass,
                ring_color(),
            )
            .with_velocity(Vector2::new(-sin, cos) * speed),
        );
    }
    bodies
}

#[cfg(test)]
mod tests {
    use cgmath::InnerSpace;
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;

    #[test]
    fn ring_orbits_the_single_sun() {
        let params = SimParameters::default();
        let bodies = sun_and_ring(&params, &mut StdRng::seed_from_u64(0));
        assert_eq!(bodies.len(), params.ring_bodies + 1);
        assert_eq!(bodies.iter().filter(|b| b.fixed).count(), 1);

        let center = bodies[0].pos;
        let expected_speed = (G * params.sun_mass / (params.width / 4.0)).sqrt();
        for body in &bodies[1..] {
            let rel = body.pos - center;
            assert!((rel.magnitude() - params.width / 4.0).abs() < 1e-9);
            // Tangential launch.
            assert!(rel.dot(body.vel).abs() < 1e-9);
            assert!((body.vel.magnitude() - expected_speed).abs() < 1e-12);
            assert!(body.mass >= 1.0 && body.mass < 31.0);
        }
    }
}
