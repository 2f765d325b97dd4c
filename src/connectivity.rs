//! Lookup tables for the Bey refinement of triangles and tetrahedra.
//!
//! The tables encode the red refinement of J. Bey ("Tetrahedral grid
//! refinement", Computing 55, 1995) restricted to the Kuhn simplices of the
//! unit square/cube, together with the tetrahedral Morton index of
//! Burstedde and Holke ("A tetrahedral space-filling curve for
//! nonconforming adaptive meshes", SIAM J. Sci. Comput. 38, 2016).
//!
//! Naming convention: `cid` is the cube id of an element (which subcube of
//! the parent cube its anchor lies in), `Iloc` the child's local index in
//! SFC order, `bey` the child number in Bey's original ordering.

/// Parent type of a triangle with given cube id and type.
pub const TRI_CID_TYPE_TO_PARENTTYPE: [[u8; 2]; 4] =
    [[0, 1], [0, 0], [1, 1], [0, 1]];

/// Type of the Bey child `bey` of a triangle of given type.
pub const TRI_TYPE_OF_CHILD: [[u8; 4]; 2] = [[0, 0, 0, 1], [1, 1, 1, 0]];

/// Bey child number of the child with local index `Iloc` of a triangle of
/// given type.
pub const TRI_INDEX_TO_BEY_NUMBER: [[u8; 4]; 2] = [[0, 1, 3, 2], [0, 3, 1, 2]];

/// Parent vertex towards which a Bey child's anchor is shifted.
pub const TRI_BEYID_TO_VERTEX: [usize; 4] = [0, 1, 2, 1];

/// Local index of a triangle with given type and cube id.
pub const TRI_TYPE_CID_TO_ILOC: [[u8; 4]; 2] = [[0, 1, 1, 3], [0, 2, 2, 3]];

/// Type of the child with local index `Iloc` of a triangle of given type.
pub const TRI_PARENTTYPE_ILOC_TO_TYPE: [[u8; 4]; 2] =
    [[0, 0, 1, 0], [1, 0, 1, 1]];

/// Cube id of the child with local index `Iloc` of a triangle of given type.
pub const TRI_PARENTTYPE_ILOC_TO_CID: [[u8; 4]; 2] =
    [[0, 1, 1, 3], [0, 2, 2, 3]];

/// Parent type of a tetrahedron with given cube id and type.
pub const TET_CID_TYPE_TO_PARENTTYPE: [[u8; 6]; 8] = [
    [0, 1, 2, 3, 4, 5],
    [0, 1, 1, 1, 0, 0],
    [2, 2, 2, 3, 3, 3],
    [1, 1, 2, 2, 2, 1],
    [5, 5, 4, 4, 4, 5],
    [0, 0, 0, 5, 5, 5],
    [4, 3, 3, 3, 4, 4],
    [0, 1, 2, 3, 4, 5],
];

/// Type of the Bey child `bey` of a tetrahedron of given type.
pub const TET_TYPE_OF_CHILD: [[u8; 8]; 6] = [
    [0, 0, 0, 0, 4, 5, 2, 1],
    [1, 1, 1, 1, 3, 2, 5, 0],
    [2, 2, 2, 2, 0, 1, 4, 3],
    [3, 3, 3, 3, 5, 4, 1, 2],
    [4, 4, 4, 4, 2, 3, 0, 5],
    [5, 5, 5, 5, 1, 0, 3, 4],
];

/// Bey child number of the child with local index `Iloc` of a tetrahedron
/// of given type.
pub const TET_INDEX_TO_BEY_NUMBER: [[u8; 8]; 6] = [
    [0, 1, 4, 5, 2, 7, 6, 3],
    [0, 1, 5, 4, 7, 2, 6, 3],
    [0, 4, 5, 1, 2, 7, 6, 3],
    [0, 1, 5, 4, 6, 7, 2, 3],
    [0, 4, 5, 1, 6, 2, 7, 3],
    [0, 5, 4, 1, 6, 7, 2, 3],
];

/// Parent vertex towards which a Bey child's anchor is shifted.
pub const TET_BEYID_TO_VERTEX: [usize; 8] = [0, 1, 2, 3, 1, 1, 2, 2];

/// Local index of a tetrahedron with given type and cube id.
pub const TET_TYPE_CID_TO_ILOC: [[u8; 8]; 6] = [
    [0, 1, 1, 4, 1, 4, 4, 7],
    [0, 1, 2, 5, 2, 5, 4, 7],
    [0, 2, 3, 4, 1, 6, 5, 7],
    [0, 3, 1, 5, 2, 4, 6, 7],
    [0, 2, 2, 6, 3, 5, 5, 7],
    [0, 3, 3, 6, 3, 6, 6, 7],
];

/// Type of the child with local index `Iloc` of a tetrahedron of given type.
pub const TET_PARENTTYPE_ILOC_TO_TYPE: [[u8; 8]; 6] = [
    [0, 0, 4, 5, 0, 1, 2, 0],
    [1, 1, 2, 3, 0, 1, 5, 1],
    [2, 0, 1, 2, 2, 3, 4, 2],
    [3, 3, 4, 5, 1, 2, 3, 3],
    [4, 2, 3, 4, 0, 4, 5, 4],
    [5, 0, 1, 5, 3, 4, 5, 5],
];

/// Cube id of the child with local index `Iloc` of a tetrahedron of given
/// type.
pub const TET_PARENTTYPE_ILOC_TO_CID: [[u8; 8]; 6] = [
    [0, 1, 1, 1, 5, 5, 5, 7],
    [0, 1, 1, 1, 3, 3, 3, 7],
    [0, 2, 2, 2, 3, 3, 3, 7],
    [0, 2, 2, 2, 6, 6, 6, 7],
    [0, 4, 4, 4, 6, 6, 6, 7],
    [0, 4, 4, 4, 5, 5, 5, 7],
];

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_tri_iloc_tables_are_inverse() {
        for pt in 0..2 {
            for iloc in 0..4 {
                let ct = TRI_PARENTTYPE_ILOC_TO_TYPE[pt][iloc] as usize;
                let cid = TRI_PARENTTYPE_ILOC_TO_CID[pt][iloc] as usize;
                assert_eq!(TRI_TYPE_CID_TO_ILOC[ct][cid] as usize, iloc);
                assert_eq!(TRI_CID_TYPE_TO_PARENTTYPE[cid][ct] as usize, pt);
            }
        }
    }

    #[test]
    fn test_tet_iloc_tables_are_inverse() {
        for pt in 0..6 {
            for iloc in 0..8 {
                let ct = TET_PARENTTYPE_ILOC_TO_TYPE[pt][iloc] as usize;
                let cid = TET_PARENTTYPE_ILOC_TO_CID[pt][iloc] as usize;
                assert_eq!(TET_TYPE_CID_TO_ILOC[ct][cid] as usize, iloc);
                assert_eq!(TET_CID_TYPE_TO_PARENTTYPE[cid][ct] as usize, pt);
            }
        }
    }

    #[test]
    fn test_tri_bey_agrees_with_iloc_order() {
        for pt in 0..2 {
            for iloc in 0..4 {
                let bey = TRI_INDEX_TO_BEY_NUMBER[pt][iloc] as usize;
                assert_eq!(
                    TRI_TYPE_OF_CHILD[pt][bey],
                    TRI_PARENTTYPE_ILOC_TO_TYPE[pt][iloc]
                );
            }
        }
    }

    #[test]
    fn test_tet_bey_agrees_with_iloc_order() {
        for pt in 0..6 {
            for iloc in 0..8 {
                let bey = TET_INDEX_TO_BEY_NUMBER[pt][iloc] as usize;
                assert_eq!(
                    TET_TYPE_OF_CHILD[pt][bey],
                    TET_PARENTTYPE_ILOC_TO_TYPE[pt][iloc]
                );
            }
        }
    }

    #[test]
    fn test_iloc_is_bijective_per_parent() {
        for pt in 0..2 {
            let mut seen = [false; 4];
            for &bey in TRI_INDEX_TO_BEY_NUMBER[pt].iter() {
                assert!(!seen[bey as usize]);
                seen[bey as usize] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
        for pt in 0..6 {
            let mut seen = [false; 8];
            for &bey in TET_INDEX_TO_BEY_NUMBER[pt].iter() {
                assert!(!seen[bey as usize]);
                seen[bey as usize] = true;
            }
            assert!(seen.iter().all(|&s| s));
        }
    }

    #[test]
    fn test_child_zero_keeps_type() {
        // The Iloc-0 child sits at the parent's anchor with the parent's
        // type; the first-descendant padding in the linear id depends on it.
        for pt in 0..2 {
            assert_eq!(TRI_INDEX_TO_BEY_NUMBER[pt][0], 0);
            assert_eq!(TRI_PARENTTYPE_ILOC_TO_CID[pt][0], 0);
            assert_eq!(TRI_PARENTTYPE_ILOC_TO_TYPE[pt][0] as usize, pt);
        }
        for pt in 0..6 {
            assert_eq!(TET_INDEX_TO_BEY_NUMBER[pt][0], 0);
            assert_eq!(TET_PARENTTYPE_ILOC_TO_CID[pt][0], 0);
            assert_eq!(TET_PARENTTYPE_ILOC_TO_TYPE[pt][0] as usize, pt);
        }
    }
}
