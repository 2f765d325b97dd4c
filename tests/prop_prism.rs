use proptest::prelude::*;
use spacetree::constants::PRISM_MAXLEVEL;
use spacetree::Prism;

fn arb_prism() -> impl Strategy<Value = Prism> {
    (0i32..=6).prop_flat_map(|level| {
        (0..(1u64 << (3 * level))).prop_map(move |id| Prism::from_linear_id(id, level))
    })
}

proptest! {
    #[test]
    fn prism_parent_child_roundtrip(p in arb_prism(), k in 0usize..8) {
        prop_assume!(p.level() < PRISM_MAXLEVEL);
        let c = p.child(k);
        prop_assert_eq!(c.parent(), p);
        prop_assert_eq!(c.child_id(), k);
        // The child decomposes into the factor children.
        prop_assert_eq!(c.tri, p.tri.child(k % 4));
        prop_assert_eq!(c.line, p.line.child(k / 4));
    }

    #[test]
    fn prism_linear_id_roundtrip(p in arb_prism()) {
        prop_assert_eq!(Prism::from_linear_id(p.linear_id(p.level()), p.level()), p);
        prop_assert!(p.is_inside_root());
    }

    #[test]
    fn prism_children_are_monotone(p in arb_prism()) {
        prop_assume!(p.level() < PRISM_MAXLEVEL);
        let base = 8 * p.linear_id(p.level());
        for (k, c) in p.children().iter().enumerate() {
            prop_assert_eq!(c.linear_id(p.level() + 1), base + k as u64);
        }
    }

    // The carry discipline of the product curve advances the id by one.
    #[test]
    fn prism_successor_is_sfc_step(p in arb_prism()) {
        prop_assume!(p.level() > 0);
        let id = p.linear_id(p.level());
        prop_assume!(id + 1 < 1u64 << (3 * p.level()));
        prop_assert_eq!(p.successor(p.level()).linear_id(p.level()), id + 1);
    }

    #[test]
    fn prism_family_recognition(p in arb_prism(), i in 0usize..8, j in 0usize..8) {
        prop_assume!(p.level() < PRISM_MAXLEVEL);
        let fam = p.children();
        prop_assert!(Prism::is_family(&fam));
        if i != j {
            let mut bad = fam;
            bad.swap(i, j);
            prop_assert!(!Prism::is_family(&bad));
        }
    }

    #[test]
    fn prism_face_involution(p in arb_prism(), face in 0usize..5) {
        let (n, nf) = p.face_neighbour(face);
        if n.is_inside_root() {
            let (back, bf) = n.face_neighbour(nf);
            prop_assert_eq!(back, p);
            prop_assert_eq!(bf, face);
        } else {
            prop_assert!(p.is_root_boundary(face));
        }
    }

    #[test]
    fn prism_nca_is_deepest(p1 in arb_prism(), p2 in arb_prism()) {
        let r = p1.nearest_common_ancestor(&p2);
        prop_assert!(r.tri.is_ancestor_of(&p1.tri));
        prop_assert!(r.tri.is_ancestor_of(&p2.tri));
        prop_assert_eq!(p1.line.ancestor(r.level()), r.line);
        prop_assert_eq!(p2.line.ancestor(r.level()), r.line);
        if r.level() < p1.level().min(p2.level()) {
            prop_assert_ne!(p1.ancestor(r.level() + 1), p2.ancestor(r.level() + 1));
        }
    }

    #[test]
    fn prism_descendant_interval(p in arb_prism(), path in proptest::collection::vec(0usize..8, 0..5)) {
        let mut d = p;
        for &k in &path {
            if d.level() == PRISM_MAXLEVEL {
                break;
            }
            d = d.child(k);
        }
        let id = d.linear_id(PRISM_MAXLEVEL);
        prop_assert!(p.first_descendant().linear_id(PRISM_MAXLEVEL) <= id);
        prop_assert!(id <= p.last_descendant().linear_id(PRISM_MAXLEVEL));
    }

    // Base vertices sit at the lower line endpoint, top vertices at the
    // upper one, both over the triangle's corners.
    #[test]
    fn prism_vertex_coords_decompose(p in arb_prism(), v in 0usize..6) {
        let c = p.vertex_coords(v);
        let xy = p.tri.vertex_coords(v % 3);
        prop_assert_eq!([c[0], c[1]], xy);
        prop_assert_eq!(c[2], p.line.vertex_coord(v / 3));
    }
}
