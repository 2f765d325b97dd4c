//! A slab allocator for element storage, used as the scheme context.

use log::trace;

use crate::eclass::Eclass;
use crate::element::Element;

/// Handle to an element slot inside an [`ElementPool`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ElementRef(usize);

/// A grow-only slab of elements with a free list. Freed slots are reused
/// before the slab grows. The pool is single-threaded; callers serialize
/// allocation and release.
pub struct ElementPool {
    eclass: Eclass,
    slots: Vec<Element>,
    free: Vec<usize>,
}

impl ElementPool {
    /// Create an empty pool for elements of the given class.
    pub fn new(eclass: Eclass) -> Self {
        ElementPool {
            eclass,
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// The element class this pool serves.
    pub fn eclass(&self) -> Eclass {
        self.eclass
    }

    /// Allocate a slot, initialized to the root element of the class.
    pub fn allocate(&mut self) -> ElementRef {
        if let Some(index) = self.free.pop() {
            self.slots[index] = Element::root(self.eclass);
            return ElementRef(index);
        }
        let index = self.slots.len();
        self.slots.push(Element::root(self.eclass));
        trace!(
            "pool({:?}) grew to {} slots",
            self.eclass,
            self.slots.len()
        );
        ElementRef(index)
    }

    /// Return a slot to the pool. The handle must not be used afterwards.
    pub fn release(&mut self, elem: ElementRef) {
        assert!(elem.0 < self.slots.len());
        debug_assert!(!self.free.contains(&elem.0), "double release");
        self.free.push(elem.0);
    }

    /// Read access to a slot.
    pub fn get(&self, elem: ElementRef) -> &Element {
        &self.slots[elem.0]
    }

    /// Write access to a slot.
    pub fn get_mut(&mut self, elem: ElementRef) -> &mut Element {
        &mut self.slots[elem.0]
    }

    /// Number of live elements.
    pub fn live(&self) -> usize {
        self.slots.len() - self.free.len()
    }
}
