/*!
This is a subdivision library for meshes composed solely of quadrilateral
faces, following a generalized [Catmull-Clark
scheme](https://en.wikipedia.org/wiki/Catmull%E2%80%93Clark_subdivision_surface).

# Overview

+ A flat quad-list datastructure is used to represent the mesh: an ordered
  list of vertex positions, and an ordered list of faces referencing four
  vertices each in winding order. Adjacency (faces sharing an edge, vertices
  connected by an edge) is inferred by topology queries over the face list.

+ The generic mesh type [`QuadMeshT<DIM, A>`] can be used with custom
  geometric types. To use it with your own vector and scalar types, provide
  an implementation of [`Adaptor`] that tells this crate how to work with
  them. [`FloatScalarAdaptor`] is required by the subdivision engine, and
  [`VectorNormalizeAdaptor`] by some geometric utilities.

+ A subdivision pass creates one face point per face, one edge point per
  edge (memoized so the two faces sharing an edge agree on it), repositions
  the original vertices by a valence-weighted average, and replaces every
  quad with four. The vertex weighting is a configuration choice; see
  [`VertexWeighting`]. Input meshes must be closed and manifold; violations
  are reported as errors and leave the mesh unmodified.

+ The flattened homogeneous vertex buffer produced by
  [`QuadMeshT::to_vertex_buffer`](mesh::QuadMeshT::to_vertex_buffer) is the
  contract with downstream rendering consumers. This crate itself does no
  rendering and no I/O.

+ Optionally, this crate provides builtin adaptor implementations and
  concrete mesh types that can be used without any boilerplate. These use
  the [`glam`](https://crates.io/crates/glam) crate and can be found in the
  [`quadsub_glam`] module. The `use_glam` feature is required by these.
  These builtin types include [`QuadMeshF32`](quadsub_glam::QuadMeshF32)
  and [`QuadMeshF64`](quadsub_glam::QuadMeshF64).
*/

mod check;
mod element;
mod error;
mod mesh;
mod primitive;
mod subdiv;
mod topol;

#[cfg(feature = "use_glam")]
pub mod quadsub_glam;

pub use element::{EdgeKey, FH, Handle, VH};
pub use error::Error;
pub use mesh::{Adaptor, FloatScalarAdaptor, QuadMeshT, VectorNormalizeAdaptor};
pub use subdiv::VertexWeighting;
