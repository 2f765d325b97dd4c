//! Compile-time limits of the element classes.

/// Deepest refinement level of a quadrilateral tree.
pub const QUAD_MAXLEVEL: i32 = 30;
/// Deepest refinement level of a hexahedral tree. `8^level` must stay
/// representable in a `u64` linear id, which caps the level at 19.
pub const HEX_MAXLEVEL: i32 = 19;
/// Deepest refinement level of a triangle tree.
pub const TRI_MAXLEVEL: i32 = 21;
/// Deepest refinement level of a tetrahedral tree.
pub const TET_MAXLEVEL: i32 = 21;
/// Deepest refinement level of a prism tree.
pub const PRISM_MAXLEVEL: i32 = 21;
/// Deepest refinement level of a line tree. The line is the vertical
/// factor of the prism and shares its limit.
pub const LINE_MAXLEVEL: i32 = 21;

/// Edge length of the root quadrant in integer coordinates.
pub const QUAD_ROOT_LEN: i32 = 1 << QUAD_MAXLEVEL;
/// Edge length of the root hexahedron in integer coordinates.
pub const HEX_ROOT_LEN: i32 = 1 << HEX_MAXLEVEL;
/// Edge length of the root triangle in integer coordinates.
pub const TRI_ROOT_LEN: i32 = 1 << TRI_MAXLEVEL;
/// Edge length of the root tetrahedron in integer coordinates.
pub const TET_ROOT_LEN: i32 = 1 << TET_MAXLEVEL;
/// Edge length of the root prism in integer coordinates.
pub const PRISM_ROOT_LEN: i32 = 1 << PRISM_MAXLEVEL;
/// Edge length of the root line in integer coordinates.
pub const LINE_ROOT_LEN: i32 = 1 << LINE_MAXLEVEL;

/// Number of children of a quadrant.
pub const QUAD_CHILDREN: usize = 4;
/// Number of children of a hexahedron.
pub const HEX_CHILDREN: usize = 8;
/// Number of children of a triangle.
pub const TRI_CHILDREN: usize = 4;
/// Number of children of a tetrahedron.
pub const TET_CHILDREN: usize = 8;
/// Number of children of a prism.
pub const PRISM_CHILDREN: usize = 8;
/// Number of children of a line.
pub const LINE_CHILDREN: usize = 2;

/// Number of faces of a triangle.
pub const TRI_FACES: usize = 3;
/// Number of faces of a tetrahedron.
pub const TET_FACES: usize = 4;
/// Number of faces of a quadrant.
pub const QUAD_FACES: usize = 4;
/// Number of faces of a hexahedron.
pub const HEX_FACES: usize = 6;
/// Number of faces of a prism.
pub const PRISM_FACES: usize = 5;
