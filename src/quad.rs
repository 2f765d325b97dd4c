//! The 2D Morton kernel: axis-aligned quadrilaterals.

use bytemuck::{Pod, Zeroable};

use crate::constants::{QUAD_FACES, QUAD_MAXLEVEL, QUAD_ROOT_LEN};

/// Metadata describing how a quadrant is embedded as the face of a
/// hexahedral tree. It takes no part in the refinement algebra and is
/// copied verbatim on every operation.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Surround {
    /// Dimension of the embedding tree, or -1 if the quadrant is not
    /// embedded.
    pub tdim: i32,
    /// Normal axis of the embedding face.
    pub tnormal: i32,
    /// Coordinate along the normal axis.
    pub tcoord: i32,
}

impl Default for Surround {
    fn default() -> Self {
        Surround {
            tdim: -1,
            tnormal: 0,
            tcoord: 0,
        }
    }
}

/// A quadrant, anchored at its minimal corner in a grid of
/// `QUAD_ROOT_LEN * QUAD_ROOT_LEN` cells.
#[repr(C)]
#[derive(Clone, Copy, Debug, PartialEq, Eq, Pod, Zeroable)]
pub struct Quad {
    /// Anchor x coordinate.
    pub x: i32,
    /// Anchor y coordinate.
    pub y: i32,
    /// Refinement level.
    pub level: i32,
    /// Face-embedding metadata, carried along unchanged.
    pub surround: Surround,
}

/// Edge length of a quadrant at the given level.
const fn len(level: i32) -> i32 {
    1 << (QUAD_MAXLEVEL - level)
}

impl Quad {
    /// The level-0 quadrant covering the root square.
    pub fn root() -> Self {
        Quad {
            x: 0,
            y: 0,
            level: 0,
            surround: Surround::default(),
        }
    }

    /// Morton child id: bit 0 selects the upper x half, bit 1 the upper
    /// y half.
    pub fn child(&self, childid: usize) -> Quad {
        assert!(self.level < QUAD_MAXLEVEL);
        assert!(childid < 4);
        let h = len(self.level + 1);
        Quad {
            x: if childid & 1 != 0 { self.x | h } else { self.x },
            y: if childid & 2 != 0 { self.y | h } else { self.y },
            level: self.level + 1,
            surround: self.surround,
        }
    }

    /// All four children in Morton order.
    pub fn children(&self) -> [Quad; 4] {
        [self.child(0), self.child(1), self.child(2), self.child(3)]
    }

    /// The parent quadrant. `self` must not be the root.
    pub fn parent(&self) -> Quad {
        assert!(self.level > 0);
        let h = len(self.level);
        Quad {
            x: self.x & !h,
            y: self.y & !h,
            level: self.level - 1,
            surround: self.surround,
        }
    }

    /// The sibling with the given child id.
    pub fn sibling(&self, sibid: usize) -> Quad {
        self.parent().child(sibid)
    }

    /// Position of this quadrant among its siblings.
    pub fn child_id(&self) -> usize {
        assert!(self.level > 0);
        let h = len(self.level);
        let mut id = 0;
        if self.x & h != 0 {
            id |= 1;
        }
        if self.y & h != 0 {
            id |= 2;
        }
        id
    }

    /// The ancestor at `level`, obtained by masking the low coordinate
    /// bits.
    pub fn ancestor(&self, level: i32) -> Quad {
        assert!((0..=self.level).contains(&level));
        let mask = len(level) - 1;
        Quad {
            x: self.x & !mask,
            y: self.y & !mask,
            level,
            surround: self.surround,
        }
    }

    /// Morton index at `level`: the child ids from the root down,
    /// two bits per level. For `level > self.level` the id is padded with
    /// zero digits (the id of the first descendant); below `self.level` it
    /// is the ancestor's id.
    pub fn linear_id(&self, level: i32) -> u64 {
        assert!((0..=QUAD_MAXLEVEL).contains(&level));
        let lev = level.min(self.level);
        let mut id = 0u64;
        for i in 1..=lev {
            let h = len(i);
            let mut digit = 0u64;
            if self.x & h != 0 {
                digit |= 1;
            }
            if self.y & h != 0 {
                digit |= 2;
            }
            id |= digit << (2 * (lev - i));
        }
        if level > self.level {
            id <<= 2 * (level - self.level);
        }
        id
    }

    /// The level-`level` quadrant with the given Morton index.
    pub fn from_linear_id(id: u64, level: i32) -> Quad {
        assert!((0..=QUAD_MAXLEVEL).contains(&level));
        assert!(id < 1u64 << (2 * level));
        let mut q = Quad {
            x: 0,
            y: 0,
            level,
            surround: Surround::default(),
        };
        for i in 1..=level {
            let digit = (id >> (2 * (level - i))) & 3;
            let h = len(i);
            if digit & 1 != 0 {
                q.x |= h;
            }
            if digit & 2 != 0 {
                q.y |= h;
            }
        }
        q
    }

    /// The next quadrant along the level-`level` SFC. The caller checks
    /// that `self` is not the last element of the uniform refinement.
    pub fn successor(&self, level: i32) -> Quad {
        let id = self.linear_id(level);
        debug_assert!(id + 1 < 1u64 << (2 * level));
        let mut s = Quad::from_linear_id(id + 1, level);
        s.surround = self.surround;
        s
    }

    /// First descendant at the deepest level.
    pub fn first_descendant(&self) -> Quad {
        Quad {
            x: self.x,
            y: self.y,
            level: QUAD_MAXLEVEL,
            surround: self.surround,
        }
    }

    /// Last descendant at the deepest level.
    pub fn last_descendant(&self) -> Quad {
        let d = len(self.level) - 1;
        Quad {
            x: self.x + d,
            y: self.y + d,
            level: QUAD_MAXLEVEL,
            surround: self.surround,
        }
    }

    /// Nearest common ancestor of two quadrants.
    pub fn nearest_common_ancestor(&self, other: &Quad) -> Quad {
        let exclor = (self.x ^ other.x) | (self.y ^ other.y);
        let maxlevel = 32 - (exclor as u32).leading_zeros() as i32;
        let level = (QUAD_MAXLEVEL - maxlevel).min(self.level).min(other.level);
        self.ancestor(level)
    }

    /// Face neighbour across face `face` (0: -x, 1: +x, 2: -y, 3: +y).
    /// Returns the neighbour and the neighbour's face towards `self`. The
    /// neighbour may lie outside the root square.
    pub fn face_neighbour(&self, face: usize) -> (Quad, usize) {
        assert!(face < QUAD_FACES);
        let h = len(self.level);
        let mut n = *self;
        match face {
            0 => n.x -= h,
            1 => n.x += h,
            2 => n.y -= h,
            _ => n.y += h,
        }
        (n, face ^ 1)
    }

    /// Whether the quadrant lies inside the root square.
    pub fn is_inside_root(&self) -> bool {
        (0..QUAD_ROOT_LEN).contains(&self.x) && (0..QUAD_ROOT_LEN).contains(&self.y)
    }

    /// Whether `fam` is the full, correctly ordered family of one parent.
    pub fn is_family(fam: &[Quad; 4]) -> bool {
        let level = fam[0].level;
        if level == 0 || fam.iter().any(|q| q.level != level) {
            return false;
        }
        let parent = fam[0].parent();
        (0..4).all(|k| {
            let c = parent.child(k);
            c.x == fam[k].x && c.y == fam[k].y
        })
    }

    /// Coordinates of the corner `vertex` in Morton vertex order.
    pub fn vertex_coords(&self, vertex: usize) -> [i32; 2] {
        assert!(vertex < 4);
        let h = len(self.level);
        [
            self.x + if vertex & 1 != 0 { h } else { 0 },
            self.y + if vertex & 2 != 0 { h } else { 0 },
        ]
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_parent_child_roundtrip() {
        let q = Quad::from_linear_id(0b1001_0110, 4);
        for childid in 0..4 {
            let c = q.child(childid);
            assert_eq!(c.parent(), q);
            assert_eq!(c.child_id(), childid);
        }
    }

    #[test]
    fn test_linear_id_roundtrip() {
        for level in 0..5 {
            for id in 0..(1u64 << (2 * level)) {
                let q = Quad::from_linear_id(id, level);
                assert_eq!(q.linear_id(level), id);
            }
        }
    }

    #[test]
    fn test_linear_id_interleaves() {
        // x = 0b01100..., y = 0b10001...: digits (y,x) from the top are
        // 10 01 01 00 10.
        let q = Quad {
            x: 0b01100 << (QUAD_MAXLEVEL - 5),
            y: 0b10001 << (QUAD_MAXLEVEL - 5),
            level: 5,
            surround: Surround::default(),
        };
        assert_eq!(q.linear_id(5), 0b10_01_01_00_10);
    }

    #[test]
    fn test_successor_matches_id() {
        let level = 4;
        for id in 0..(1u64 << (2 * level)) - 1 {
            let q = Quad::from_linear_id(id, level);
            assert_eq!(q.successor(level).linear_id(level), id + 1);
        }
    }

    #[test]
    fn test_face_neighbour_involution() {
        for id in 0..(1u64 << 6) {
            let q = Quad::from_linear_id(id, 3);
            for face in 0..4 {
                let (n, nf) = q.face_neighbour(face);
                if n.is_inside_root() {
                    let (back, bf) = n.face_neighbour(nf);
                    assert_eq!(back, q);
                    assert_eq!(bf, face);
                }
            }
        }
    }

    #[test]
    fn test_nca_of_descendants() {
        let q = Quad::from_linear_id(7, 2);
        let c0 = q.child(0).child(3);
        let c3 = q.child(3);
        assert_eq!(c0.nearest_common_ancestor(&c3), q);
    }

    #[test]
    fn test_family() {
        let q = Quad::from_linear_id(9, 3);
        assert!(Quad::is_family(&q.children()));
        let mut fam = q.children();
        fam.swap(1, 2);
        assert!(!Quad::is_family(&fam));
    }

    #[test]
    fn test_surround_is_carried() {
        let mut q = Quad::root();
        q.surround = Surround {
            tdim: 3,
            tnormal: 1,
            tcoord: 42,
        };
        assert_eq!(q.child(2).surround, q.surround);
        assert_eq!(q.child(2).parent().surround, q.surround);
        assert_eq!(q.child(1).successor(1).surround, q.surround);
    }

    #[test]
    fn test_descendant_interval() {
        let q = Quad::from_linear_id(5, 3);
        let first = q.first_descendant();
        let last = q.last_descendant();
        assert_eq!(first.linear_id(QUAD_MAXLEVEL), q.linear_id(QUAD_MAXLEVEL));
        let shift = 2 * (QUAD_MAXLEVEL - 3);
        assert_eq!(
            last.linear_id(QUAD_MAXLEVEL),
            (q.linear_id(3) << shift) | ((1u64 << shift) - 1)
        );
    }
}
