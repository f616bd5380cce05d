use cgmath::Vector2;

use crate::sim::Body;

pub fn iter(bodies: &[Body], out_buffer: &mut [Vector2<f64>]) {
    debug_assert_eq!(bodies.len(), out_buffer.len());
    for (body, out) in bodies.iter().zip(out_buffer.iter_mut()) {
        if body.fixed {
            continue;
        }
        for other in bodies {
            // Self is skipped by identity inside get_acc_towards.
            body.get_acc_towards(other, out);
        }
    }
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Point2, Vector2, Vector3, Zero};
    use rand::{SeedableRng, rngs::StdRng};

    use super::iter;
    use crate::{
        constants::{G, SOFTENING},
        sim::{Bodies, NewBody},
    };

    fn grey() -> Vector3<f32> {
        Vector3::new(0.5, 0.5, 0.5)
    }

    fn at(x: f64, y: f64, mass: f64) -> NewBody {
        NewBody::at_rest(Point2::new(x, y), mass, grey())
    }

    #[test]
    fn single_body_feels_nothing() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bodies = Bodies::new();
        bodies.insert(at(10.0, 10.0, 50.0), &mut rng).unwrap();
        let mut out = vec![Vector2::zero(); 1];
        iter(bodies.as_slice(), &mut out);
        assert_eq!(out[0], Vector2::zero());
    }

    #[test]
    fn two_body_magnitude_matches_force_law() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bodies = Bodies::new();
        let (m1, m2, d) = (3.0, 11.0, 7.5);
        bodies.insert(at(0.0, 0.0, m1), &mut rng).unwrap();
        bodies.insert(at(d, 0.0, m2), &mut rng).unwrap();

        let mut out = vec![Vector2::zero(); 2];
        iter(bodies.as_slice(), &mut out);

        let expected = G * m1 * m2 / (d * d + SOFTENING) / m1;
        assert!((out[0].magnitude() - expected).abs() < 1e-12);
        assert!(out[0].x > 0.0 && out[1].x < 0.0);
        // Equal and opposite forces.
        assert!((out[0] * m1 + out[1] * m2).magnitude() < 1e-12);
    }

    #[test]
    fn fixed_slots_are_untouched() {
        let mut rng = StdRng::seed_from_u64(7);
        let mut bodies = Bodies::new();
        let sun = NewBody::fixed(Point2::new(0.0, 0.0), 1000.0, grey());
        bodies.insert(sun, &mut rng).unwrap();
        bodies.insert(at(5.0, 0.0, 1.0), &mut rng).unwrap();
        let mut out = vec![Vector2::zero(); 2];
        iter(bodies.as_slice(), &mut out);
        assert_eq!(out[0], Vector2::zero());
        assert!(out[1].x < 0.0);
    }

    #[test]
    fn self_is_excluded_even_with_duplicates_by_position() {
        // Two distinct bodies stacked on the same spot plus a third one: each stacked body
        // only feels the third.
        let mut rng = StdRng::seed_from_u64(8);
        let mut bodies = Bodies::new();
        for _ in 0..2 {
            bodies.insert(at(0.0, 0.0, 2.0), &mut rng).unwrap();
        }
        bodies.insert(at(4.0, 0.0, 6.0), &mut rng).unwrap();
        let mut out = vec![Vector2::zero(); 3];
        iter(bodies.as_slice(), &mut out);

        let expected = G * 6.0 / (16.0 + SOFTENING);
        assert!((out[0].x - expected).abs() < 1e-12);
        assert!((out[1].x - expected).abs() < 1e-12);
    }
}
