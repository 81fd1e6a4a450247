use crate::element::{FH, VH};

#[derive(Debug)]
pub enum Error {
    // Mesh store.
    /// A face referenced a vertex index that is not in the mesh.
    OutOfBoundsVertex(VH),
    /// A face handle that is not in the mesh.
    OutOfBoundsFace(FH),
    // Topology queries.
    /// The midpoint of zero vertices is undefined.
    EmptyMidpoint,
    // Subdivision.
    /// An edge with a number of incident faces other than two. The mesh is
    /// either not closed, or not manifold.
    NonManifoldEdge(VH, VH),
    /// A vertex with no incident faces cannot be repositioned.
    ZeroValenceVertex(VH),
}
