//! The tagged element value passed across the scheme interface.

use crate::eclass::Eclass;
use crate::hex::Hex;
use crate::prism::Prism;
use crate::quad::Quad;
use crate::tet::Tet;
use crate::tri::Tri;

/// One element of one class. The forest treats values of this type as
/// opaque; the owning scheme interprets the concrete record.
///
/// Holding the class tag in the value keeps every scheme operation
/// monomorphic: each arm of a match compiles to a direct call into the
/// class kernel.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Element {
    /// A quadrilateral element.
    Quad(Quad),
    /// A hexahedral element.
    Hex(Hex),
    /// A triangle element.
    Tri(Tri),
    /// A tetrahedral element.
    Tet(Tet),
    /// A prism element.
    Prism(Prism),
}

impl Element {
    /// The root element of the given class.
    pub fn root(eclass: Eclass) -> Element {
        match eclass {
            Eclass::Quad => Element::Quad(Quad::root()),
            Eclass::Hex => Element::Hex(Hex::root()),
            Eclass::Tri => Element::Tri(Tri::root()),
            Eclass::Tet => Element::Tet(Tet::root()),
            Eclass::Prism => Element::Prism(Prism::root()),
        }
    }

    /// The class tag of this element.
    pub fn eclass(&self) -> Eclass {
        match self {
            Element::Quad(_) => Eclass::Quad,
            Element::Hex(_) => Eclass::Hex,
            Element::Tri(_) => Eclass::Tri,
            Element::Tet(_) => Eclass::Tet,
            Element::Prism(_) => Eclass::Prism,
        }
    }

    /// The quadrilateral record. The element must be a quad.
    pub fn as_quad(&self) -> &Quad {
        match self {
            Element::Quad(q) => q,
            _ => panic!("element class mismatch: expected quad, got {:?}", self.eclass()),
        }
    }

    /// The hexahedral record. The element must be a hex.
    pub fn as_hex(&self) -> &Hex {
        match self {
            Element::Hex(h) => h,
            _ => panic!("element class mismatch: expected hex, got {:?}", self.eclass()),
        }
    }

    /// The triangle record. The element must be a triangle.
    pub fn as_tri(&self) -> &Tri {
        match self {
            Element::Tri(t) => t,
            _ => panic!("element class mismatch: expected tri, got {:?}", self.eclass()),
        }
    }

    /// The tetrahedral record. The element must be a tetrahedron.
    pub fn as_tet(&self) -> &Tet {
        match self {
            Element::Tet(t) => t,
            _ => panic!("element class mismatch: expected tet, got {:?}", self.eclass()),
        }
    }

    /// The prism record. The element must be a prism.
    pub fn as_prism(&self) -> &Prism {
        match self {
            Element::Prism(p) => p,
            _ => panic!("element class mismatch: expected prism, got {:?}", self.eclass()),
        }
    }

    /// The record as raw bytes: the in-memory bit-pack of the concrete
    /// class record, without the class tag.
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            Element::Quad(q) => bytemuck::bytes_of(q),
            Element::Hex(h) => bytemuck::bytes_of(h),
            Element::Tri(t) => bytemuck::bytes_of(t),
            Element::Tet(t) => bytemuck::bytes_of(t),
            Element::Prism(p) => bytemuck::bytes_of(p),
        }
    }

    /// Rebuild an element of the given class from the bytes produced by
    /// [`Element::as_bytes`]. The slice length must match the class record.
    pub fn from_bytes(eclass: Eclass, bytes: &[u8]) -> Element {
        match eclass {
            Eclass::Quad => Element::Quad(bytemuck::pod_read_unaligned(bytes)),
            Eclass::Hex => Element::Hex(bytemuck::pod_read_unaligned(bytes)),
            Eclass::Tri => Element::Tri(bytemuck::pod_read_unaligned(bytes)),
            Eclass::Tet => Element::Tet(bytemuck::pod_read_unaligned(bytes)),
            Eclass::Prism => Element::Prism(bytemuck::pod_read_unaligned(bytes)),
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_byte_roundtrip() {
        for eclass in [
            Eclass::Quad,
            Eclass::Hex,
            Eclass::Tri,
            Eclass::Tet,
            Eclass::Prism,
        ] {
            let el = Element::root(eclass);
            let bytes = el.as_bytes().to_vec();
            assert_eq!(Element::from_bytes(eclass, &bytes), el);
        }
    }

    #[test]
    #[should_panic(expected = "class mismatch")]
    fn test_class_mismatch_is_fatal() {
        Element::root(Eclass::Quad).as_tet();
    }
}
