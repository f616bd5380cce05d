use cgmath::{Vector2, Zero};

use crate::sim::{
    Body,
    spatial_tree::tree::{KdTree, NodeId},
};

pub mod tree;

pub fn iter(bodies: &[Body], out: &mut [Vector2<f64>], tree: &mut KdTree) {
    debug_assert_eq!(bodies.len(), out.len());
    tree.rebuild(bodies);
    let root = tree.root_id();
    for (body, out_acc) in bodies.iter().zip(out.iter_mut()) {
        if body.fixed {
            continue;
        }
        *out_acc += compute_forces(tree, bodies, body, root);
    }
}

/// Acceleration on `body` from the nodes on a single root-to-leaf path.
///
/// Each node contributes its own body directly, then the walk continues into the child on the
/// query's side of the split. The other child is never visited, so this only matches the
/// pairwise sum when the path happens to cover every other body.
pub fn compute_forces(
    tree: &KdTree,
    bodies: &[Body],
    body: &Body,
    node: Option<NodeId>,
) -> Vector2<f64> {
    let Some(id) = node else {
        return Vector2::zero();
    };
    let node = tree.get(id);
    let other = &bodies[node.body];

    let mut acc = Vector2::zero();
    body.get_acc_towards(other, &mut acc);

    let axis = node.axis();
    let next = if axis.coord(&body.pos) < axis.coord(&other.pos) {
        node.left
    } else {
        node.right
    };
    acc + compute_forces(tree, bodies, body, next)
}

#[cfg(test)]
mod tests {
    use cgmath::{InnerSpace, Point2, Vector2, Vector3, Zero};
    use rand::{SeedableRng, rngs::StdRng};

    use super::*;
    use crate::sim::{Bodies, ForceField, NewBody, PairwiseField, SpatialTreeField};

    fn bodies_at(points: &[(f64, f64, f64)]) -> Bodies {
        let mut rng = StdRng::seed_from_u64(99);
        let mut bodies = Bodies::new();
        for &(x, y, m) in points {
            bodies
                .insert(
                    NewBody::at_rest(Point2::new(x, y), m, Vector3::new(1.0, 1.0, 1.0)),
                    &mut rng,
                )
                .unwrap();
        }
        bodies
    }

    fn run(field: &mut impl ForceField, bodies: &Bodies) -> Vec<Vector2<f64>> {
        let mut out = vec![Vector2::zero(); bodies.len()];
        field.accumulate(bodies.as_slice(), &mut out);
        out
    }

    #[test]
    fn two_bodies_match_pairwise() {
        let bodies = bodies_at(&[(40.0, 10.0, 5.0), (12.0, 30.0, 20.0)]);
        let tree = run(&mut SpatialTreeField::new(), &bodies);
        let exact = run(&mut PairwiseField, &bodies);
        for (a, b) in tree.iter().zip(exact.iter()) {
            assert!((*a - *b).magnitude() < 1e-12, "{a:?} != {b:?}");
            assert!(a.magnitude() > 0.0);
        }
    }

    #[test]
    fn collinear_triple_skips_the_far_side() {
        // Sorted on x the middle body is the root, the outer ones are its children. The left
        // body descends left into itself and never sees the right body.
        let bodies = bodies_at(&[(0.0, 0.0, 1.0), (10.0, 0.0, 1.0), (20.0, 0.0, 1.0)]);
        let tree = run(&mut SpatialTreeField::new(), &bodies);
        let exact = run(&mut PairwiseField, &bodies);

        let mut only_middle = Vector2::zero();
        let slice = bodies.as_slice();
        slice[0].get_acc_towards(&slice[1], &mut only_middle);
        assert!((tree[0] - only_middle).magnitude() < 1e-12);
        assert!((tree[0] - exact[0]).magnitude() > 1e-6);
    }

    #[test]
    fn fixed_bodies_attract_but_are_not_queried() {
        let mut rng = StdRng::seed_from_u64(4);
        let mut bodies = Bodies::new();
        bodies
            .insert(
                NewBody::fixed(Point2::new(0.0, 0.0), 1000.0, Vector3::new(1.0, 1.0, 0.0)),
                &mut rng,
            )
            .unwrap();
        bodies
            .insert(
                NewBody::at_rest(Point2::new(50.0, 0.0), 1.0, Vector3::new(0.0, 0.0, 1.0)),
                &mut rng,
            )
            .unwrap();
        let out = run(&mut SpatialTreeField::new(), &bodies);
        assert_eq!(out[0], Vector2::zero());
        assert!(out[1].x < 0.0);
    }
}
