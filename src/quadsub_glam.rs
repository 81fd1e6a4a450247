/*!
This is an optional module that is enabled by the `use_glam` feature. It
provides mesh types that can be used out of the box, that use
[`glam`](https://docs.rs/glam/latest/glam/) to represent the geometry.
*/

use crate::mesh::{self, Adaptor, FloatScalarAdaptor, VectorNormalizeAdaptor};

/// Built-in adaptor for meshes that use 32-bit floating point numbers to
/// represent the geometry of the mesh.
///
/// This uses [`glam`](https://docs.rs/glam/latest/glam/) to represent the
/// geometry.
pub struct BuiltInAdaptorF32 {}

impl Adaptor<3> for BuiltInAdaptorF32 {
    type Vector = glam::Vec3;
    type Scalar = f32;

    fn vector(coords: [Self::Scalar; 3]) -> Self::Vector {
        glam::vec3(coords[0], coords[1], coords[2])
    }

    fn zero_vector() -> Self::Vector {
        glam::Vec3::splat(0.)
    }

    fn vector_coord(v: &Self::Vector, i: usize) -> Self::Scalar {
        v[i]
    }
}

impl FloatScalarAdaptor<3> for BuiltInAdaptorF32 {
    fn scalarf32(val: f32) -> Self::Scalar {
        val
    }

    fn scalarf64(val: f64) -> Self::Scalar {
        val as f32
    }
}

impl VectorNormalizeAdaptor<3> for BuiltInAdaptorF32 {
    fn normalized_vec(v: Self::Vector) -> Self::Vector {
        v.normalize()
    }
}

/// Built-in adaptor for meshes that use 64-bit floating point numbers to
/// represent the geometry of the mesh.
///
/// This uses [`glam`](https://docs.rs/glam/latest/glam/) to represent the
/// geometry.
pub struct BuiltInAdaptorF64 {}

impl Adaptor<3> for BuiltInAdaptorF64 {
    type Vector = glam::DVec3;
    type Scalar = f64;

    fn vector(coords: [Self::Scalar; 3]) -> Self::Vector {
        glam::dvec3(coords[0], coords[1], coords[2])
    }

    fn zero_vector() -> Self::Vector {
        glam::DVec3::splat(0.)
    }

    fn vector_coord(v: &Self::Vector, i: usize) -> Self::Scalar {
        v[i]
    }
}

impl FloatScalarAdaptor<3> for BuiltInAdaptorF64 {
    fn scalarf32(val: f32) -> Self::Scalar {
        val as f64
    }

    fn scalarf64(val: f64) -> Self::Scalar {
        val
    }
}

impl VectorNormalizeAdaptor<3> for BuiltInAdaptorF64 {
    fn normalized_vec(v: Self::Vector) -> Self::Vector {
        v.normalize()
    }
}

/// Quad mesh type that uses 32 bit floating point numbers to represent the
/// geometry.
///
/// This uses [`glam`](https://docs.rs/glam/latest/glam/) to represent the
/// geometry.
pub type QuadMeshF32 = mesh::QuadMeshT<3, BuiltInAdaptorF32>;

/// Quad mesh type that uses 64 bit floating point numbers to represent the
/// geometry.
///
/// This uses [`glam`](https://docs.rs/glam/latest/glam/) to represent the
/// geometry.
pub type QuadMeshF64 = mesh::QuadMeshT<3, BuiltInAdaptorF64>;
