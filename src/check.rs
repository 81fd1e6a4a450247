use crate::{
    element::EdgeKey,
    error::Error,
    mesh::{Adaptor, QuadMeshT},
};
use std::collections::HashMap;

impl<const DIM: usize, A> QuadMeshT<DIM, A>
where
    A: Adaptor<DIM>,
{
    /// Check the mesh for topological errors.
    ///
    /// Every face must reference existing vertices, and every edge must be
    /// shared by exactly two faces. The latter is what the subdivision
    /// engine relies on; a mesh with boundary or non-manifold edges fails
    /// this check with [`Error::NonManifoldEdge`].
    pub fn check_topology(&self) -> Result<(), Error> {
        let mut edge_faces: HashMap<EdgeKey, usize> = HashMap::new();
        for quad in self.face_list() {
            for i in 0..4 {
                let (a, b) = (quad[i], quad[(i + 1) % 4]);
                for v in [a, b] {
                    if !self.is_valid_vertex(v) {
                        return Err(Error::OutOfBoundsVertex(v));
                    }
                }
                *edge_faces.entry(EdgeKey::new(a, b)).or_insert(0) += 1;
            }
        }
        match edge_faces.iter().find(|&(_, &count)| count != 2) {
            Some((key, _)) => {
                let (a, b) = key.vertices();
                Err(Error::NonManifoldEdge(a, b))
            }
            None => Ok(()),
        }
    }
}

#[cfg(test)]
mod test {
    use crate::{error::Error, quadsub_glam::QuadMeshF32};

    #[test]
    fn t_cube_topology() {
        let mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        mesh.check_topology().expect("Topological errors found");
    }

    #[test]
    fn t_overshared_edge_topology() {
        // Duplicating a face gives its edges three incident faces, which is
        // just as fatal as a boundary edge.
        let mut mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        let [a, b, c, d] = mesh.face_vertices(0.into()).expect("Cannot read face");
        mesh.add_quad_face(a, b, c, d).expect("Cannot add face");
        assert!(matches!(
            mesh.check_topology(),
            Err(Error::NonManifoldEdge(_, _))
        ));
    }

    #[test]
    fn t_open_mesh_topology() {
        // A cube with one face missing has four boundary edges.
        let cube = QuadMeshF32::unit_cube().expect("Cannot create cube");
        let mut mesh = QuadMeshF32::new();
        for &p in cube.points() {
            mesh.add_vertex(p);
        }
        for &[a, b, c, d] in &cube.face_list()[..cube.num_faces() - 1] {
            mesh.add_quad_face(a, b, c, d).expect("Cannot add face");
        }
        assert!(matches!(
            mesh.check_topology(),
            Err(Error::NonManifoldEdge(_, _))
        ));
    }
}
