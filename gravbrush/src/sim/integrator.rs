use cgmath::{Vector2, Zero};

use crate::sim::Body;

/// Semi-implicit Euler with a unit time step: velocity first, then position from the new
/// velocity. Fixed bodies are skipped. The acceleration buffer is zeroed for the next step.
pub fn integrate(bodies: &mut [Body], acc: &mut [Vector2<f64>]) {
    debug_assert_eq!(bodies.len(), acc.len());
    for (body, acc) in bodies.iter_mut().zip(acc.iter_mut()) {
        if !body.fixed {
            body.vel += *acc;
            body.pos += body.vel;
        }
        *acc = Vector2::zero();
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{Point2, Vector2, Vector3, Zero};
    use rand::{SeedableRng, rngs::StdRng};

    use super::integrate;
    use crate::sim::{Bodies, NewBody};

    #[test]
    fn velocity_is_updated_before_position() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut bodies = Bodies::new();
        bodies
            .insert(
                NewBody::at_rest(Point2::new(1.0, 2.0), 1.0, Vector3::new(1.0, 1.0, 1.0))
                    .with_velocity(Vector2::new(0.5, 0.0)),
                &mut rng,
            )
            .unwrap();
        let mut acc = vec![Vector2::new(0.25, -1.0)];
        integrate(bodies.as_mut_slice(), &mut acc);

        let body = &bodies.as_slice()[0];
        assert_eq!(body.vel, Vector2::new(0.75, -1.0));
        assert_eq!(body.pos, Point2::new(1.75, 1.0));
        assert_eq!(acc[0], Vector2::zero());
    }

    #[test]
    fn fixed_body_never_moves() {
        let mut rng = StdRng::seed_from_u64(0);
        let mut bodies = Bodies::new();
        bodies
            .insert(
                NewBody::fixed(Point2::new(3.0, 3.0), 1000.0, Vector3::new(1.0, 1.0, 0.0))
                    .with_velocity(Vector2::new(9.0, 9.0)),
                &mut rng,
            )
            .unwrap();
        let mut acc = vec![Vector2::new(100.0, 100.0)];
        integrate(bodies.as_mut_slice(), &mut acc);

        let body = &bodies.as_slice()[0];
        assert_eq!(body.pos, Point2::new(3.0, 3.0));
        assert_eq!(body.vel, Vector2::new(9.0, 9.0));
    }
}
