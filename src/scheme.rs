//! The per-class capability set consumed by the forest.
//!
//! A [`Scheme`] bundles every element operation of one class behind a
//! class-agnostic surface: the forest holds one scheme per class in use
//! and passes opaque [`Element`] values back and forth. All preconditions
//! are contractual; violations panic.

use std::cell::RefCell;
use std::cmp::Ordering;
use std::mem::size_of;

use log::debug;

use crate::eclass::Eclass;
use crate::element::Element;
use crate::hex::Hex;
use crate::pool::{ElementPool, ElementRef};
use crate::prism::Prism;
use crate::quad::Quad;
use crate::tet::Tet;
use crate::tri::Tri;

/// The capability set of one element class.
///
/// The scheme owns an element pool as its allocation context. The pool is
/// single-threaded; the element operations themselves are pure and may be
/// called from any thread on separately owned elements.
pub struct Scheme {
    eclass: Eclass,
    pool: RefCell<ElementPool>,
}

impl Scheme {
    /// Create the scheme for the given element class.
    pub fn new(eclass: Eclass) -> Scheme {
        debug!("new element scheme for class {:?}", eclass);
        Scheme {
            eclass,
            pool: RefCell::new(ElementPool::new(eclass)),
        }
    }

    /// The class this scheme serves.
    pub fn eclass(&self) -> Eclass {
        self.eclass
    }

    /// Size in bytes of the class's element record.
    pub fn size(&self) -> usize {
        match self.eclass {
            Eclass::Quad => size_of::<Quad>(),
            Eclass::Hex => size_of::<Hex>(),
            Eclass::Tri => size_of::<Tri>(),
            Eclass::Tet => size_of::<Tet>(),
            Eclass::Prism => size_of::<Prism>(),
        }
    }

    /// Deepest admissible refinement level.
    pub fn maxlevel(&self) -> i32 {
        self.eclass.maxlevel()
    }

    /// Class of the child with the given child id.
    pub fn child_eclass(&self, childid: usize) -> Eclass {
        self.eclass.child_eclass(childid)
    }

    /// Edge length of the root element in integer coordinates.
    pub fn root_len(&self) -> i32 {
        self.eclass.root_len()
    }

    /// Refinement level of an element.
    pub fn level(&self, elem: &Element) -> i32 {
        self.check_class(elem);
        match elem {
            Element::Quad(q) => q.level,
            Element::Hex(h) => h.level,
            Element::Tri(t) => t.level,
            Element::Tet(t) => t.level,
            Element::Prism(p) => p.level(),
        }
    }

    /// Copy `source` into `dest`.
    pub fn copy(&self, source: &Element, dest: &mut Element) {
        self.check_class(source);
        *dest = *source;
    }

    /// Order two elements along the SFC. Both are lifted to the greater of
    /// the two levels; an ancestor compares equal to its first descendant.
    pub fn compare(&self, elem1: &Element, elem2: &Element) -> Ordering {
        let maxlevel = self.level(elem1).max(self.level(elem2));
        self.linear_id(elem1, maxlevel)
            .cmp(&self.linear_id(elem2, maxlevel))
    }

    /// Write the parent of `elem` into `parent`.
    pub fn parent(&self, elem: &Element, parent: &mut Element) {
        self.check_class(elem);
        *parent = match elem {
            Element::Quad(q) => Element::Quad(q.parent()),
            Element::Hex(h) => Element::Hex(h.parent()),
            Element::Tri(t) => Element::Tri(t.parent()),
            Element::Tet(t) => Element::Tet(t.parent()),
            Element::Prism(p) => Element::Prism(p.parent()),
        };
    }

    /// Write the sibling with child id `sibid` into `sibling`.
    pub fn sibling(&self, elem: &Element, sibid: usize, sibling: &mut Element) {
        self.check_class(elem);
        *sibling = match elem {
            Element::Quad(q) => Element::Quad(q.sibling(sibid)),
            Element::Hex(h) => Element::Hex(h.sibling(sibid)),
            Element::Tri(t) => Element::Tri(t.sibling(sibid)),
            Element::Tet(t) => Element::Tet(t.sibling(sibid)),
            Element::Prism(p) => Element::Prism(p.sibling(sibid)),
        };
    }

    /// Write the child with the given id into `child`.
    pub fn child(&self, elem: &Element, childid: usize, child: &mut Element) {
        self.check_class(elem);
        *child = match elem {
            Element::Quad(q) => Element::Quad(q.child(childid)),
            Element::Hex(h) => Element::Hex(h.child(childid)),
            Element::Tri(t) => Element::Tri(t.child(childid)),
            Element::Tet(t) => Element::Tet(t.child(childid)),
            Element::Prism(p) => Element::Prism(p.child(childid)),
        };
    }

    /// Write all children into `children`, which must hold exactly
    /// `CHILDREN` slots.
    pub fn children(&self, elem: &Element, children: &mut [Element]) {
        assert_eq!(children.len(), self.eclass.children());
        for (k, slot) in children.iter_mut().enumerate() {
            self.child(elem, k, slot);
        }
    }

    /// Position of an element among its siblings.
    pub fn child_id(&self, elem: &Element) -> usize {
        self.check_class(elem);
        match elem {
            Element::Quad(q) => q.child_id(),
            Element::Hex(h) => h.child_id(),
            Element::Tri(t) => t.child_id(),
            Element::Tet(t) => t.child_id(),
            Element::Prism(p) => p.child_id(),
        }
    }

    /// Whether `fam` is the full family of one parent in SFC order. The
    /// slice must hold exactly `CHILDREN` elements.
    pub fn is_family(&self, fam: &[Element]) -> bool {
        assert_eq!(fam.len(), self.eclass.children());
        match self.eclass {
            Eclass::Quad => {
                Quad::is_family(&core::array::from_fn(|k| *fam[k].as_quad()))
            }
            Eclass::Hex => Hex::is_family(&core::array::from_fn(|k| *fam[k].as_hex())),
            Eclass::Tri => Tri::is_family(&core::array::from_fn(|k| *fam[k].as_tri())),
            Eclass::Tet => Tet::is_family(&core::array::from_fn(|k| *fam[k].as_tet())),
            Eclass::Prism => {
                Prism::is_family(&core::array::from_fn(|k| *fam[k].as_prism()))
            }
        }
    }

    /// Write the neighbour across `face` into `neighbour` and return the
    /// neighbour's face towards `elem`. The result may lie outside the
    /// root; the caller checks with [`Scheme::inside_root`].
    pub fn face_neighbour(
        &self,
        elem: &Element,
        face: usize,
        neighbour: &mut Element,
    ) -> usize {
        self.check_class(elem);
        let (n, nf) = match elem {
            Element::Quad(q) => {
                let (n, nf) = q.face_neighbour(face);
                (Element::Quad(n), nf)
            }
            Element::Hex(h) => {
                let (n, nf) = h.face_neighbour(face);
                (Element::Hex(n), nf)
            }
            Element::Tri(t) => {
                let (n, nf) = t.face_neighbour(face);
                (Element::Tri(n), nf)
            }
            Element::Tet(t) => {
                let (n, nf) = t.face_neighbour(face);
                (Element::Tet(n), nf)
            }
            Element::Prism(p) => {
                let (n, nf) = p.face_neighbour(face);
                (Element::Prism(n), nf)
            }
        };
        *neighbour = n;
        nf
    }

    /// Write the nearest common ancestor of `elem1` and `elem2` into
    /// `nca`.
    pub fn nearest_common_ancestor(
        &self,
        elem1: &Element,
        elem2: &Element,
        nca: &mut Element,
    ) {
        self.check_class(elem1);
        *nca = match elem1 {
            Element::Quad(q) => {
                Element::Quad(q.nearest_common_ancestor(elem2.as_quad()))
            }
            Element::Hex(h) => Element::Hex(h.nearest_common_ancestor(elem2.as_hex())),
            Element::Tri(t) => Element::Tri(t.nearest_common_ancestor(elem2.as_tri())),
            Element::Tet(t) => Element::Tet(t.nearest_common_ancestor(elem2.as_tet())),
            Element::Prism(p) => {
                Element::Prism(p.nearest_common_ancestor(elem2.as_prism()))
            }
        };
    }

    /// Boundary elements of `elem`. Not implemented for any class; the
    /// face trees need schemes of the face classes first.
    pub fn boundary(&self, _elem: &Element, _boundary: &mut [Element]) {
        unimplemented!("boundary elements of class {:?}", self.eclass);
    }

    /// Overwrite `elem` with the level-`level` element of the given
    /// linear id.
    pub fn set_linear_id(&self, elem: &mut Element, level: i32, id: u64) {
        self.check_class(elem);
        *elem = match self.eclass {
            Eclass::Quad => {
                let mut q = Quad::from_linear_id(id, level);
                // A quad initialized by id is a plain 2D quadrant.
                q.surround.tdim = 2;
                Element::Quad(q)
            }
            Eclass::Hex => Element::Hex(Hex::from_linear_id(id, level)),
            Eclass::Tri => Element::Tri(Tri::from_linear_id(id, level)),
            Eclass::Tet => Element::Tet(Tet::from_linear_id(id, level)),
            Eclass::Prism => Element::Prism(Prism::from_linear_id(id, level)),
        };
    }

    /// Linear SFC id of `elem` at `level`.
    pub fn linear_id(&self, elem: &Element, level: i32) -> u64 {
        self.check_class(elem);
        match elem {
            Element::Quad(q) => q.linear_id(level),
            Element::Hex(h) => h.linear_id(level),
            Element::Tri(t) => t.linear_id(level),
            Element::Tet(t) => t.linear_id(level),
            Element::Prism(p) => p.linear_id(level),
        }
    }

    /// Write the first descendant at the deepest level into `desc`.
    pub fn first_descendant(&self, elem: &Element, desc: &mut Element) {
        self.check_class(elem);
        *desc = match elem {
            Element::Quad(q) => Element::Quad(q.first_descendant()),
            Element::Hex(h) => Element::Hex(h.first_descendant()),
            Element::Tri(t) => Element::Tri(t.first_descendant()),
            Element::Tet(t) => Element::Tet(t.first_descendant()),
            Element::Prism(p) => Element::Prism(p.first_descendant()),
        };
    }

    /// Write the last descendant at the deepest level into `desc`.
    pub fn last_descendant(&self, elem: &Element, desc: &mut Element) {
        self.check_class(elem);
        *desc = match elem {
            Element::Quad(q) => Element::Quad(q.last_descendant()),
            Element::Hex(h) => Element::Hex(h.last_descendant()),
            Element::Tri(t) => Element::Tri(t.last_descendant()),
            Element::Tet(t) => Element::Tet(t.last_descendant()),
            Element::Prism(p) => Element::Prism(p.last_descendant()),
        };
    }

    /// Write the level-`level` successor of `elem` into `succ`. The
    /// caller checks beforehand that `elem` is not the last element of
    /// the uniform refinement.
    pub fn successor(&self, elem: &Element, level: i32, succ: &mut Element) {
        self.check_class(elem);
        *succ = match elem {
            Element::Quad(q) => Element::Quad(q.successor(level)),
            Element::Hex(h) => Element::Hex(h.successor(level)),
            Element::Tri(t) => Element::Tri(t.successor(level)),
            Element::Tet(t) => Element::Tet(t.successor(level)),
            Element::Prism(p) => Element::Prism(p.successor(level)),
        };
    }

    /// Anchor coordinates of `elem`, zero-padded to three entries.
    pub fn anchor(&self, elem: &Element) -> [i32; 3] {
        self.check_class(elem);
        match elem {
            Element::Quad(q) => [q.x, q.y, 0],
            Element::Hex(h) => [h.x, h.y, h.z],
            Element::Tri(t) => [t.x, t.y, 0],
            Element::Tet(t) => [t.x, t.y, t.z],
            Element::Prism(p) => [p.tri.x, p.tri.y, p.line.x],
        }
    }

    /// Whether `elem` lies inside the root element of its tree.
    pub fn inside_root(&self, elem: &Element) -> bool {
        self.check_class(elem);
        match elem {
            Element::Quad(q) => q.is_inside_root(),
            Element::Hex(h) => h.is_inside_root(),
            Element::Tri(t) => t.is_inside_root(),
            Element::Tet(t) => t.is_inside_root(),
            Element::Prism(p) => p.is_inside_root(),
        }
    }

    /// Allocate an element from the scheme's pool, initialized to the
    /// root element.
    pub fn new_element(&self) -> ElementRef {
        self.pool.borrow_mut().allocate()
    }

    /// Return an element to the scheme's pool.
    pub fn destroy_element(&self, elem: ElementRef) {
        self.pool.borrow_mut().release(elem);
    }

    /// Copy a pooled element out.
    pub fn element(&self, elem: ElementRef) -> Element {
        *self.pool.borrow().get(elem)
    }

    /// Overwrite a pooled element.
    pub fn set_element(&self, elem: ElementRef, value: Element) {
        self.check_class(&value);
        *self.pool.borrow_mut().get_mut(elem) = value;
    }

    /// Number of live pooled elements.
    pub fn live_elements(&self) -> usize {
        self.pool.borrow().live()
    }

    fn check_class(&self, elem: &Element) {
        assert!(
            elem.eclass() == self.eclass,
            "element class mismatch: scheme {:?}, element {:?}",
            self.eclass,
            elem.eclass()
        );
    }
}

impl Drop for Scheme {
    fn drop(&mut self) {
        debug!(
            "dropping {:?} scheme with {} live elements",
            self.eclass,
            self.pool.borrow().live()
        );
    }
}
