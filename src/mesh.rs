use crate::{
    element::{FH, Handle, VH},
    error::Error,
};
use std::ops::{Add, Div, Mul};

/// The adaptor that tells this crate how to work with a given vector type.
///
/// The mesh store is generic over the geometric types used to represent
/// vertex positions. Implement this trait to use your own vector and scalar
/// types. Built-in implementations backed by
/// [`glam`](https://docs.rs/glam/latest/glam/) are available behind the
/// `use_glam` feature.
pub trait Adaptor<const DIM: usize>
where
    Self::Vector: Default + Clone + Copy,
    Self::Scalar: Default + Clone + Copy,
{
    type Vector;
    type Scalar;

    fn vector(coords: [Self::Scalar; DIM]) -> Self::Vector;

    fn zero_vector() -> Self::Vector;

    fn vector_coord(v: &Self::Vector, i: usize) -> Self::Scalar;
}

/// Adaptor for scalars that can be converted to and from floating point
/// numbers. This is required by algorithms that use numerical constants,
/// such as the subdivision weights.
pub trait FloatScalarAdaptor<const DIM: usize>: Adaptor<DIM> {
    fn scalarf32(val: f32) -> Self::Scalar;

    fn scalarf64(val: f64) -> Self::Scalar;
}

/// Adaptor for vector types that can be normalized. Required by geometric
/// utilities such as [`spherize`](crate::mesh::QuadMeshT::spherize).
pub trait VectorNormalizeAdaptor<const DIM: usize>: Adaptor<DIM> {
    fn normalized_vec(v: Self::Vector) -> Self::Vector;
}

/// A mesh composed solely of quadrilateral faces.
///
/// Vertices are identified by their insertion order. New vertices are always
/// appended, so handles remain stable as the mesh grows. Faces reference
/// vertices by handle, four per face, in a consistent winding order. This is
/// the only type in this crate that owns mesh data; topology queries and the
/// subdivision engine all work through it.
pub struct QuadMeshT<const DIM: usize, A>
where
    A: Adaptor<DIM>,
{
    points: Vec<A::Vector>,
    faces: Vec<[VH; 4]>,
}

impl<const DIM: usize, A> Default for QuadMeshT<DIM, A>
where
    A: Adaptor<DIM>,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<const DIM: usize, A> QuadMeshT<DIM, A>
where
    A: Adaptor<DIM>,
{
    pub fn new() -> Self {
        QuadMeshT {
            points: Vec::new(),
            faces: Vec::new(),
        }
    }

    pub fn with_capacity(nverts: usize, nfaces: usize) -> Self {
        QuadMeshT {
            points: Vec::with_capacity(nverts),
            faces: Vec::with_capacity(nfaces),
        }
    }

    pub fn num_vertices(&self) -> usize {
        self.points.len()
    }

    pub fn num_faces(&self) -> usize {
        self.faces.len()
    }

    pub fn vertices(&self) -> impl Iterator<Item = VH> {
        (0..(self.points.len() as u32)).map(VH::from)
    }

    pub fn faces(&self) -> impl Iterator<Item = FH> {
        (0..(self.faces.len() as u32)).map(FH::from)
    }

    /// Check if this vertex is valid for this mesh.
    ///
    /// The index has to be less than the number of vertices in the mesh.
    pub fn is_valid_vertex(&self, v: VH) -> bool {
        (v.index() as usize) < self.points.len()
    }

    pub fn point(&self, v: VH) -> Result<A::Vector, Error> {
        self.points
            .get(v.index() as usize)
            .copied()
            .ok_or(Error::OutOfBoundsVertex(v))
    }

    /// The positions of all vertices, indexed by vertex handle.
    pub fn points(&self) -> &[A::Vector] {
        &self.points
    }

    pub fn face_vertices(&self, f: FH) -> Result<[VH; 4], Error> {
        self.faces
            .get(f.index() as usize)
            .copied()
            .ok_or(Error::OutOfBoundsFace(f))
    }

    /// The vertices of all faces, indexed by face handle.
    pub fn face_list(&self) -> &[[VH; 4]] {
        &self.faces
    }

    /// Add a vertex at the given position and return its handle.
    pub fn add_vertex(&mut self, pos: A::Vector) -> VH {
        let vi: VH = (self.points.len() as u32).into();
        self.points.push(pos);
        vi
    }

    /// Add a quadrilateral face. The vertices must be given in winding
    /// order. Every index must reference an existing vertex, otherwise this
    /// fails with [`Error::OutOfBoundsVertex`] and the mesh is not modified.
    pub fn add_quad_face(&mut self, v0: VH, v1: VH, v2: VH, v3: VH) -> Result<FH, Error> {
        for v in [v0, v1, v2, v3] {
            if !self.is_valid_vertex(v) {
                return Err(Error::OutOfBoundsVertex(v));
            }
        }
        let fi: FH = (self.faces.len() as u32).into();
        self.faces.push([v0, v1, v2, v3]);
        Ok(fi)
    }

    /// Replace the entire mesh state in one step. The subdivision engine
    /// builds the refined mesh in scratch buffers and swaps it in here, so
    /// that a failed pass leaves the mesh untouched.
    pub(crate) fn replace(&mut self, points: Vec<A::Vector>, faces: Vec<[VH; 4]>) {
        debug_assert!(
            faces
                .iter()
                .flatten()
                .all(|v| (v.index() as usize) < points.len())
        );
        self.points = points;
        self.faces = faces;
    }
}

impl<const DIM: usize, A> QuadMeshT<DIM, A>
where
    A: FloatScalarAdaptor<DIM>,
{
    /// Flatten the mesh into a vertex buffer of homogeneous coordinates.
    ///
    /// For every face, for each of its four vertices in winding order, this
    /// emits the vertex coordinates followed by a `1.0`. This is the layout
    /// expected by rendering consumers that draw the faces as quads. The
    /// mesh is not modified; calling this twice yields identical buffers.
    pub fn to_vertex_buffer(&self) -> Vec<A::Scalar> {
        let mut buf = Vec::with_capacity(self.faces.len() * 4 * (DIM + 1));
        for quad in &self.faces {
            for v in quad {
                let pos = &self.points[v.index() as usize];
                for i in 0..DIM {
                    buf.push(A::vector_coord(pos, i));
                }
                buf.push(A::scalarf64(1.0));
            }
        }
        buf
    }
}

impl<const DIM: usize, A> QuadMeshT<DIM, A>
where
    A: VectorNormalizeAdaptor<DIM>,
    A::Vector: Mul<A::Scalar, Output = A::Vector>,
{
    /// Snap all vertices onto a sphere of the given radius centered at the
    /// origin. Combined with repeated subdivision of a cube, this produces
    /// increasingly fine sphere approximations.
    pub fn spherize(&mut self, radius: A::Scalar) {
        for pos in &mut self.points {
            *pos = A::normalized_vec(*pos) * radius;
        }
    }
}

impl<const DIM: usize, A> QuadMeshT<DIM, A>
where
    A: FloatScalarAdaptor<DIM>,
    A::Vector: Add<Output = A::Vector> + Div<A::Scalar, Output = A::Vector>,
{
    /// Compute the centroid of a face from the given positions. The `points`
    /// must represent the positions of the vertices.
    ///
    /// Taking the positions as a slice lets hot loops reuse one borrow
    /// across many faces.
    pub fn calc_face_centroid(&self, f: FH, points: &[A::Vector]) -> A::Vector {
        let quad = self.faces[f.index() as usize];
        let total = quad
            .iter()
            .fold(A::zero_vector(), |total, v| total + points[v.index() as usize]);
        total / A::scalarf64(4.0)
    }
}
