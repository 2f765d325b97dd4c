//! The prism kernel: the tensor product of a triangle and a line.
//!
//! A prism stores one triangle (the base) and one line (the vertical
//! extent) at a shared level. Every structural operation decomposes into
//! one call per factor; the product SFC runs the triangle Morton order
//! fastest, so each level contributes the digit `line_bit * 4 + tri_iloc`.

use bytemuck::{Pod, Zeroable};

use crate::constants::{PRISM_CHILDREN, PRISM_FACES, PRISM_MAXLEVEL};
use crate::line::Line;
use crate::tri::Tri;

/// A prism, encoded by its triangle and line factors.
#[repr(C)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Pod, Zeroable)]
pub struct Prism {
    /// The base triangle.
    pub tri: Tri,
    /// The vertical line.
    pub line: Line,
}

/// Edge length of a prism at the given level.
const fn len(level: i32) -> i32 {
    1 << (PRISM_MAXLEVEL - level)
}

impl Prism {
    /// The level-0 prism over the root triangle.
    pub fn root() -> Self {
        Prism::default()
    }

    /// Refinement level. Both factors carry the same level.
    pub fn level(&self) -> i32 {
        debug_assert_eq!(self.tri.level, self.line.level);
        self.line.level
    }

    /// The child with the given id: triangle child `childid mod 4`,
    /// line child `childid div 4`.
    pub fn child(&self, childid: usize) -> Prism {
        assert!(childid < PRISM_CHILDREN);
        Prism {
            tri: self.tri.child(childid % 4),
            line: self.line.child(childid / 4),
        }
    }

    /// All eight children in SFC order.
    pub fn children(&self) -> [Prism; 8] {
        core::array::from_fn(|k| self.child(k))
    }

    /// The parent prism, one factor at a time.
    pub fn parent(&self) -> Prism {
        Prism {
            tri: self.tri.parent(),
            line: self.line.parent(),
        }
    }

    /// The sibling with the given child id.
    pub fn sibling(&self, sibid: usize) -> Prism {
        self.parent().child(sibid)
    }

    /// Position of this prism among its siblings.
    pub fn child_id(&self) -> usize {
        4 * self.line.child_id() + self.tri.child_id()
    }

    /// The ancestor at `level`, one factor at a time.
    pub fn ancestor(&self, level: i32) -> Prism {
        Prism {
            tri: self.tri.ancestor(level),
            line: self.line.ancestor(level),
        }
    }

    /// Linear SFC id at `level`: per level the 3-bit digit combines the
    /// line child bit (high) with the triangle local index (low).
    pub fn linear_id(&self, level: i32) -> u64 {
        assert!((0..=PRISM_MAXLEVEL).contains(&level));
        let tid = self.tri.linear_id(level);
        let lid = self.line.linear_id(level);
        let mut id = 0u64;
        for i in 0..level {
            let digit = ((tid >> (2 * i)) & 3) | (((lid >> i) & 1) << 2);
            id |= digit << (3 * i);
        }
        id
    }

    /// The level-`level` prism with the given linear id.
    pub fn from_linear_id(id: u64, level: i32) -> Prism {
        assert!((0..=PRISM_MAXLEVEL).contains(&level));
        assert!(id < 1u64 << (3 * level));
        let mut tid = 0u64;
        let mut lid = 0u64;
        for i in 0..level {
            let digit = (id >> (3 * i)) & 7;
            tid |= (digit & 3) << (2 * i);
            lid |= ((digit >> 2) & 1) << i;
        }
        Prism {
            tri: Tri::from_linear_id(tid, level),
            line: Line::from_linear_id(lid, level),
        }
    }

    /// The next prism along the level-`level` SFC, by the product carry
    /// discipline: step the triangle; when it wraps, reset it and step the
    /// line; when both wrap, carry into the parent and descend to its
    /// first child. `level` must equal the prism's level, and the caller
    /// checks that `self` is not the last element.
    pub fn successor(&self, level: i32) -> Prism {
        assert!(level >= 1 && level == self.level());
        let tri_cid = self.tri.child_id();
        let line_cid = self.line.child_id();
        if tri_cid == 3 && line_cid == 1 {
            self.parent().successor(level - 1).child(0)
        } else if tri_cid == 3 {
            Prism {
                tri: self.tri.parent().child(0),
                line: self.line.successor(level),
            }
        } else {
            Prism {
                tri: self.tri.successor(level),
                line: self.line,
            }
        }
    }

    /// First descendant at the deepest level.
    pub fn first_descendant(&self) -> Prism {
        Prism {
            tri: self.tri.first_descendant(),
            line: self.line.first_descendant(PRISM_MAXLEVEL),
        }
    }

    /// Last descendant at the deepest level.
    pub fn last_descendant(&self) -> Prism {
        Prism {
            tri: self.tri.last_descendant(),
            line: self.line.last_descendant(PRISM_MAXLEVEL),
        }
    }

    /// Nearest common ancestor: the shallower of the two factor NCAs
    /// decides the level.
    pub fn nearest_common_ancestor(&self, other: &Prism) -> Prism {
        let tri_nca = self.tri.nearest_common_ancestor(&other.tri);
        let exclor = self.line.x ^ other.line.x;
        let maxlevel = 32 - (exclor as u32).leading_zeros() as i32;
        let line_level = (PRISM_MAXLEVEL - maxlevel)
            .min(self.line.level)
            .min(other.line.level);
        self.ancestor(tri_nca.level.min(line_level))
    }

    /// Whether `fam` is the full, correctly ordered family of one parent:
    /// two stacked triangle families over the two line children.
    pub fn is_family(fam: &[Prism; 8]) -> bool {
        let level = fam[0].level();
        if level == 0
            || fam
                .iter()
                .any(|p| p.tri.level != level || p.line.level != level)
        {
            return false;
        }
        if fam[0].child_id() != 0 {
            return false;
        }
        let parent = fam[0].parent();
        (0..PRISM_CHILDREN).all(|k| parent.child(k) == fam[k])
    }

    /// Coordinates of vertex 0 through 5: the base triangle's vertices at
    /// the lower line endpoint, then at the upper one.
    pub fn vertex_coords(&self, vertex: usize) -> [i32; 3] {
        assert!(vertex < 6);
        let xy = self.tri.vertex_coords(vertex % 3);
        [xy[0], xy[1], self.line.vertex_coord(vertex / 3)]
    }

    /// Neighbour across face `face`: faces 0 through 2 are the side
    /// quadrilaterals over the triangle's edges, 3 the bottom cap, 4 the
    /// top cap. Returns the neighbour and its face towards `self`.
    pub fn face_neighbour(&self, face: usize) -> (Prism, usize) {
        assert!(face < PRISM_FACES);
        if face < 3 {
            let (tri, nf) = self.tri.face_neighbour(face);
            (
                Prism {
                    tri,
                    line: self.line,
                },
                nf,
            )
        } else {
            let h = len(self.level());
            let mut line = self.line;
            if face == 3 {
                line.x -= h;
            } else {
                line.x += h;
            }
            (
                Prism {
                    tri: self.tri,
                    line,
                },
                7 - face,
            )
        }
    }

    /// Whether the prism lies inside the root prism.
    pub fn is_inside_root(&self) -> bool {
        self.tri.is_inside_root() && self.line.is_inside_root()
    }

    /// Whether face `face` lies on the boundary of the root prism.
    pub fn is_root_boundary(&self, face: usize) -> bool {
        !self.face_neighbour(face).0.is_inside_root()
    }
}
