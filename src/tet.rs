//! The 3D simplex kernel: Bey-refined tetrahedra.
//!
//! A tetrahedron is one of the six Kuhn tetrahedra of an axis-aligned
//! cube; the type records which one. Refinement follows Bey's red rule,
//! the SFC is the tetrahedral Morton order of Burstedde and Holke.

use bytemuck::{Pod, Zeroable};

use crate::connectivity::*;
use crate::constants::{TET_CHILDREN, TET_FACES, TET_MAXLEVEL, TET_ROOT_LEN};

/// A tetrahedron, encoded by its anchor, level and type.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Tet {
    /// Anchor x coordinate.
    pub x: i32,
    /// Anchor y coordinate.
    pub y: i32,
    /// Anchor z coordinate.
    pub z: i32,
    /// Refinement level.
    pub level: i32,
    /// Type of the tetrahedron, 0 through 5.
    pub ty: i32,
}

/// Edge length of the enclosing cube at the given level.
const fn len(level: i32) -> i32 {
    1 << (TET_MAXLEVEL - level)
}

impl Tet {
    /// The level-0 tetrahedron of type 0 covering the root.
    pub fn root() -> Self {
        Tet::default()
    }

    /// Cube id of the ancestor at `level`. Level 0 has cube id 0.
    pub fn cube_id(&self, level: i32) -> usize {
        assert!((0..=TET_MAXLEVEL).contains(&level));
        if level == 0 {
            return 0;
        }
        let h = len(level);
        let mut id = 0;
        if self.x & h != 0 {
            id |= 1;
        }
        if self.y & h != 0 {
            id |= 2;
        }
        if self.z & h != 0 {
            id |= 4;
        }
        id
    }

    /// Type this tetrahedron would have at `level <= self.level`, by
    /// walking the parent-type table upward. Runs in O(self.level - level).
    pub fn type_at(&self, level: i32) -> i32 {
        assert!((0..=self.level).contains(&level));
        if level == self.level {
            return self.ty;
        }
        if level == 0 {
            // The root tetrahedron has type 0.
            return 0;
        }
        let mut ty = self.ty;
        let mut i = self.level;
        while i > level {
            let cid = self.cube_id(i);
            ty = TET_CID_TYPE_TO_PARENTTYPE[cid][ty as usize] as i32;
            i -= 1;
        }
        ty
    }

    /// The parent tetrahedron. `self` must not be the root.
    pub fn parent(&self) -> Tet {
        assert!(self.level > 0);
        let h = len(self.level);
        let cid = self.cube_id(self.level);
        Tet {
            x: self.x & !h,
            y: self.y & !h,
            z: self.z & !h,
            level: self.level - 1,
            ty: TET_CID_TYPE_TO_PARENTTYPE[cid][self.ty as usize] as i32,
        }
    }

    /// The ancestor at `level`. The type follows from three sign tests on
    /// the pairwise differences of the in-cube coordinates: each test
    /// rules out half of the six candidate types, with `self.ty` breaking
    /// ties. Exactly one candidate survives.
    pub fn ancestor(&self, level: i32) -> Tet {
        assert!((0..=self.level).contains(&level));
        let mask = len(level) - 1;
        let dx = self.x & mask;
        let dy = self.y & mask;
        let dz = self.z & mask;
        let mut possible = [true; 6];

        let diff_xy = dx - dy;
        if diff_xy > 0 || (diff_xy == 0 && matches!(self.ty, 0 | 1 | 5)) {
            possible[2] = false;
            possible[3] = false;
            possible[4] = false;
        } else {
            possible[0] = false;
            possible[1] = false;
            possible[5] = false;
        }

        let diff_xz = dx - dz;
        if diff_xz > 0 || (diff_xz == 0 && matches!(self.ty, 0 | 1 | 2)) {
            possible[3] = false;
            possible[4] = false;
            possible[5] = false;
        } else {
            possible[0] = false;
            possible[1] = false;
            possible[2] = false;
        }

        let diff_yz = dy - dz;
        if diff_yz > 0 || (diff_yz == 0 && matches!(self.ty, 1 | 2 | 3)) {
            possible[0] = false;
            possible[4] = false;
            possible[5] = false;
        } else {
            possible[1] = false;
            possible[2] = false;
            possible[3] = false;
        }

        let ty = possible.iter().position(|&p| p).unwrap() as i32;
        debug_assert_eq!(possible.iter().filter(|&&p| p).count(), 1);
        Tet {
            x: self.x & !mask,
            y: self.y & !mask,
            z: self.z & !mask,
            level,
            ty,
        }
    }

    /// Coordinates of vertex 0 through 3. Vertex 0 is the anchor, 1 and 2
    /// follow the type's axis pair, 3 is the far cube corner.
    pub fn vertex_coords(&self, vertex: usize) -> [i32; 3] {
        assert!(vertex < 4);
        let h = len(self.level);
        let ei = (self.ty / 2) as usize;
        let ej = (ei + if self.ty % 2 == 0 { 2 } else { 1 }) % 3;
        let mut c = [self.x, self.y, self.z];
        match vertex {
            0 => {}
            1 => c[ei] += h,
            2 => {
                c[ei] += h;
                c[ej] += h;
            }
            _ => {
                c[0] += h;
                c[1] += h;
                c[2] += h;
            }
        }
        c
    }

    /// Coordinates of all four vertices at once.
    pub fn all_vertex_coords(&self) -> [[i32; 3]; 4] {
        core::array::from_fn(|v| self.vertex_coords(v))
    }

    /// The child with the given local index in SFC order.
    pub fn child(&self, childid: usize) -> Tet {
        assert!(self.level < TET_MAXLEVEL);
        assert!(childid < TET_CHILDREN);
        let bey = TET_INDEX_TO_BEY_NUMBER[self.ty as usize][childid] as usize;
        let (x, y, z) = if bey == 0 {
            (self.x, self.y, self.z)
        } else {
            let v = self.vertex_coords(TET_BEYID_TO_VERTEX[bey]);
            (
                (self.x + v[0]) >> 1,
                (self.y + v[1]) >> 1,
                (self.z + v[2]) >> 1,
            )
        };
        Tet {
            x,
            y,
            z,
            level: self.level + 1,
            ty: TET_TYPE_OF_CHILD[self.ty as usize][bey] as i32,
        }
    }

    /// All eight children in SFC order.
    pub fn children(&self) -> [Tet; 8] {
        core::array::from_fn(|k| self.child(k))
    }

    /// The sibling with the given child id.
    pub fn sibling(&self, sibid: usize) -> Tet {
        assert!(sibid < TET_CHILDREN);
        self.parent().child(sibid)
    }

    /// Position of this tetrahedron among its siblings.
    pub fn child_id(&self) -> usize {
        TET_TYPE_CID_TO_ILOC[self.ty as usize][self.cube_id(self.level)] as usize
    }

    /// Child id of the ancestor at `level`.
    pub fn ancestor_id(&self, level: i32) -> usize {
        assert!((0..=self.level).contains(&level));
        TET_TYPE_CID_TO_ILOC[self.type_at(level) as usize][self.cube_id(level)]
            as usize
    }

    /// Whether `fam` is the full, correctly ordered family of one parent.
    pub fn is_family(fam: &[Tet; 8]) -> bool {
        let level = fam[0].level;
        if level == 0 || fam.iter().any(|t| t.level != level) {
            return false;
        }
        if fam[0].child_id() != 0 {
            return false;
        }
        let parent = fam[0].parent();
        (0..TET_CHILDREN).all(|k| parent.child(k) == fam[k])
    }

    /// Neighbour across face `face`, and the neighbour's face towards
    /// `self`. The result may lie outside the root tetrahedron; the
    /// caller checks with [`Tet::is_inside_root`].
    pub fn face_neighbour(&self, face: usize) -> (Tet, usize) {
        assert!(face < TET_FACES);
        let h = len(self.level);
        let mut c = [self.x, self.y, self.z];
        // Work modulo six without negative intermediates.
        let mut tn = self.ty + 6;
        let ret;
        if face == 1 || face == 2 {
            let mut sign = if tn % 2 == 0 { 1 } else { -1 };
            sign *= if face % 2 == 0 { 1 } else { -1 };
            tn += sign;
            ret = face;
        } else if face == 0 {
            // Types 0,1 step +x, types 2,3 step +y, types 4,5 step +z.
            c[(self.ty / 2) as usize] += h;
            tn += if tn % 2 == 0 { 4 } else { 2 };
            ret = 3;
        } else {
            // Types 1,2 step -z, types 3,4 step -x, types 5,0 step -y.
            c[(((tn + 3) % 6) / 2) as usize] -= h;
            tn += if tn % 2 == 0 { 2 } else { 4 };
            ret = 0;
        }
        (
            Tet {
                x: c[0],
                y: c[1],
                z: c[2],
                level: self.level,
                ty: tn % 6,
            },
            ret,
        )
    }

    /// Whether the tetrahedron lies inside the root tetrahedron.
    pub fn is_inside_root(&self) -> bool {
        (0..TET_ROOT_LEN).contains(&self.x)
            && self.y >= 0
            && self.z >= 0
            && self.z <= self.x
            && self.y <= self.z
            // On the y == z plane only types 0, 4, 5 occur.
            && (self.y != self.z || self.ty == 0 || self.ty >= 4)
            // On the x == z plane only types 0, 1, 2 occur.
            && (self.x != self.z || self.ty <= 2)
    }

    /// Whether `self` is an ancestor of `other` (or equal to it).
    pub fn is_ancestor_of(&self, other: &Tet) -> bool {
        self.level <= other.level && other.ancestor(self.level) == *self
    }

    /// Whether `self` and `other` are children of the same parent.
    pub fn is_sibling_of(&self, other: &Tet) -> bool {
        if self.level == 0 {
            return other.level == 0
                && self.x == other.x
                && self.y == other.y
                && self.z == other.z;
        }
        self.level == other.level && self.parent() == other.parent()
    }

    /// Whether `self` is the parent of `other`.
    pub fn is_parent_of(&self, other: &Tet) -> bool {
        other.level == self.level + 1 && other.parent() == *self
    }

    /// Nearest common ancestor of two tetrahedra. As in 2D, the deepest
    /// shared cube may hold the two lineages in different types, in which
    /// case the result is coarsened until the ancestors agree.
    pub fn nearest_common_ancestor(&self, other: &Tet) -> Tet {
        let exclor =
            (self.x ^ other.x) | (self.y ^ other.y) | (self.z ^ other.z);
        let maxlevel = 32 - (exclor as u32).leading_zeros() as i32;
        let mut level = (TET_MAXLEVEL - maxlevel).min(self.level).min(other.level);
        let mut a1 = self.ancestor(level);
        let mut a2 = other.ancestor(level);
        while a1.ty != a2.ty {
            level -= 1;
            a1 = a1.ancestor(level);
            a2 = a2.ancestor(level);
        }
        a1
    }

    /// Linear SFC id at `level`: three bits of local index per level from
    /// the root down, padded with zero digits past `self.level`.
    pub fn linear_id(&self, level: i32) -> u64 {
        assert!((0..=TET_MAXLEVEL).contains(&level));
        let lev = level.min(self.level);
        let mut exponent = if level > self.level {
            3 * (level - self.level)
        } else {
            0
        };
        let mut ty = self.type_at(lev) as usize;
        let mut id = 0u64;
        let mut i = lev;
        while i > 0 {
            let cid = self.cube_id(i);
            id |= (TET_TYPE_CID_TO_ILOC[ty][cid] as u64) << exponent;
            exponent += 3;
            ty = TET_CID_TYPE_TO_PARENTTYPE[cid][ty] as usize;
            i -= 1;
        }
        id
    }

    /// The level-`level` tetrahedron with the given linear id.
    pub fn from_linear_id(id: u64, level: i32) -> Tet {
        assert!((0..=TET_MAXLEVEL).contains(&level));
        assert!(id < 1u64 << (3 * level));
        let mut t = Tet {
            x: 0,
            y: 0,
            z: 0,
            level,
            ty: 0,
        };
        let mut ty = 0usize;
        for i in 1..=level {
            let local = ((id >> (3 * (level - i))) & 7) as usize;
            let cid = TET_PARENTTYPE_ILOC_TO_CID[ty][local];
            ty = TET_PARENTTYPE_ILOC_TO_TYPE[ty][local] as usize;
            let h = 1 << (TET_MAXLEVEL - i);
            if cid & 1 != 0 {
                t.x |= h;
            }
            if cid & 2 != 0 {
                t.y |= h;
            }
            if cid & 4 != 0 {
                t.z |= h;
            }
        }
        t.ty = ty as i32;
        t
    }

    /// The next tetrahedron along the level-`level` SFC. The caller
    /// checks that `self` is not the last element.
    pub fn successor(&self, level: i32) -> Tet {
        let mut s = *self;
        succ_pred(self, &mut s, level, 1);
        s
    }

    /// The previous tetrahedron along the level-`level` SFC. The caller
    /// checks that `self` is not the first element.
    pub fn predecessor(&self, level: i32) -> Tet {
        let mut s = *self;
        succ_pred(self, &mut s, level, -1);
        s
    }

    /// First descendant at the deepest level.
    pub fn first_descendant(&self) -> Tet {
        Tet::from_linear_id(self.linear_id(TET_MAXLEVEL), TET_MAXLEVEL)
    }

    /// Last descendant at the deepest level.
    pub fn last_descendant(&self) -> Tet {
        let exponent = 3 * (TET_MAXLEVEL - self.level);
        let id = (self.linear_id(self.level) << exponent) | ((1u64 << exponent) - 1);
        Tet::from_linear_id(id, TET_MAXLEVEL)
    }
}

/// Step `increment` positions (+1 or -1) along the uniform level-`level`
/// SFC, carrying a wrapped local index to the next-coarser level.
fn succ_pred(t: &Tet, s: &mut Tet, level: i32, increment: i32) {
    assert!((1..=t.level).contains(&level));
    assert!(increment.abs() < TET_CHILDREN as i32);
    if increment == 0 {
        return;
    }
    let cid = t.cube_id(level);
    let ty = t.type_at(level) as usize;
    let local = TET_TYPE_CID_TO_ILOC[ty][cid] as i32;
    let local = ((local + TET_CHILDREN as i32 + increment) % TET_CHILDREN as i32) as usize;
    let wrapped = if increment > 0 {
        local == 0
    } else {
        local == TET_CHILDREN - 1
    };
    let parent_ty = if wrapped {
        succ_pred(t, s, level - 1, increment.signum());
        s.ty as usize
    } else {
        TET_CID_TYPE_TO_PARENTTYPE[cid][ty] as usize
    };
    let new_ty = TET_PARENTTYPE_ILOC_TO_TYPE[parent_ty][local];
    let new_cid = TET_PARENTTYPE_ILOC_TO_CID[parent_ty][local];
    s.ty = new_ty as i32;
    s.level = level;
    let h = 1 << (TET_MAXLEVEL - level);
    s.x = if new_cid & 1 != 0 { s.x | h } else { s.x & !h };
    s.y = if new_cid & 2 != 0 { s.y | h } else { s.y & !h };
    s.z = if new_cid & 4 != 0 { s.z | h } else { s.z & !h };
}
