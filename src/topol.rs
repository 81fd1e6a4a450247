/*!
Read-only topology queries over the quad list.

The mesh store keeps no connectivity beyond the faces themselves, so these
queries infer adjacency by scanning the face list. They never mutate the
mesh; the subdivision engine is built entirely on top of them.
*/

use crate::{
    element::{FH, VH},
    error::Error,
    mesh::{Adaptor, FloatScalarAdaptor, QuadMeshT},
};
use std::ops::{Add, Div};

impl<const DIM: usize, A> QuadMeshT<DIM, A>
where
    A: Adaptor<DIM>,
{
    /// Every face whose vertex set contains all of the given vertices, in
    /// face order.
    ///
    /// With a single vertex this enumerates the faces incident to it. With
    /// the two endpoints of an edge it finds the faces sharing that edge,
    /// which for a closed manifold quad mesh is exactly two faces.
    pub fn faces_containing<'a>(&'a self, verts: &'a [VH]) -> impl Iterator<Item = FH> + 'a {
        self.face_list()
            .iter()
            .enumerate()
            .filter(|(_, quad)| verts.iter().all(|v| quad.contains(v)))
            .map(|(fi, _)| FH::from(fi as u32))
    }

    /// The number of faces incident to the vertex.
    pub fn vertex_valence(&self, v: VH) -> usize {
        self.faces_containing(&[v]).count()
    }

    /// The vertices connected to `v` by an edge.
    ///
    /// In every face containing `v`, its cyclic predecessor and successor
    /// are edge neighbors. The union over all such faces is returned without
    /// duplicates, in no particular order.
    pub fn edge_adjacent_vertices(&self, v: VH) -> Vec<VH> {
        let mut neighbors = Vec::new();
        for quad in self.face_list() {
            if let Some(i) = quad.iter().position(|&qv| qv == v) {
                for nv in [quad[(i + 3) % 4], quad[(i + 1) % 4]] {
                    if !neighbors.contains(&nv) {
                        neighbors.push(nv);
                    }
                }
            }
        }
        neighbors
    }
}

impl<const DIM: usize, A> QuadMeshT<DIM, A>
where
    A: FloatScalarAdaptor<DIM>,
    A::Vector: Add<Output = A::Vector> + Div<A::Scalar, Output = A::Vector>,
{
    /// The arithmetic mean of the positions of the given vertices.
    ///
    /// Fails with [`Error::EmptyMidpoint`] when given no vertices, and with
    /// [`Error::OutOfBoundsVertex`] when a vertex is not in the mesh.
    pub fn midpoint(&self, verts: &[VH]) -> Result<A::Vector, Error> {
        if verts.is_empty() {
            return Err(Error::EmptyMidpoint);
        }
        let mut total = A::zero_vector();
        for v in verts {
            total = total + self.point(*v)?;
        }
        Ok(total / A::scalarf64(verts.len() as f64))
    }
}

#[cfg(test)]
mod test {
    use crate::{element::VH, error::Error, quadsub_glam::QuadMeshF32};

    #[test]
    fn t_midpoint() {
        let mut mesh = QuadMeshF32::new();
        let a = mesh.add_vertex(glam::vec3(0.0, 0.0, 0.0));
        let b = mesh.add_vertex(glam::vec3(2.0, 4.0, -2.0));
        assert_eq!(
            glam::vec3(1.0, 2.0, -1.0),
            mesh.midpoint(&[a, b]).expect("Cannot compute midpoint")
        );
        assert_eq!(
            glam::vec3(2.0, 4.0, -2.0),
            mesh.midpoint(&[b]).expect("Cannot compute midpoint")
        );
    }

    #[test]
    fn t_midpoint_of_nothing() {
        let mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        assert!(matches!(mesh.midpoint(&[]), Err(Error::EmptyMidpoint)));
    }

    #[test]
    fn t_cube_faces_containing_vertex() {
        let mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        // Every corner of a cube touches exactly three faces.
        for v in mesh.vertices() {
            assert_eq!(3, mesh.faces_containing(&[v]).count());
            assert_eq!(3, mesh.vertex_valence(v));
        }
    }

    #[test]
    fn t_cube_faces_containing_edge() {
        let mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        // Every edge of a closed quad mesh is shared by exactly two faces.
        for quad in mesh.face_list() {
            for i in 0..4 {
                let (a, b) = (quad[i], quad[(i + 1) % 4]);
                assert_eq!(2, mesh.faces_containing(&[a, b]).count());
            }
        }
    }

    #[test]
    fn t_cube_edge_adjacent_vertices() {
        let mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        let mut neighbors = mesh.edge_adjacent_vertices(0.into());
        neighbors.sort();
        assert_eq!(vec![VH::from(1), VH::from(3), VH::from(4)], neighbors);
    }
}
