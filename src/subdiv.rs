use crate::{
    element::{EdgeKey, Handle, VH},
    error::Error,
    mesh::{FloatScalarAdaptor, QuadMeshT},
};
use std::{
    collections::HashMap,
    marker::PhantomData,
    ops::{Add, Div, Mul},
};

/// The weighting used to reposition original vertices during a subdivision
/// pass.
///
/// An original vertex of valence `n` moves to `w1 * p + w2 * favg + w3 *
/// eavg`, where `p` is its old position, `favg` the mean of the face points
/// of its incident faces, and `eavg` the mean of the edge points of its
/// incident edges. The schemes differ only in how `(w1, w2, w3)` depend on
/// `n`.
#[derive(Copy, Clone, PartialEq, Eq, Debug, Default)]
pub enum VertexWeighting {
    /// The classic Catmull-Clark weights: `((n - 3) / n, 1 / n, 2 / n)`.
    CatmullClark,
    /// A softened variant that keeps more of the original position:
    /// `((n - 2.5) / n, 1 / n, 1.5 / n)`.
    #[default]
    Relaxed,
    /// Weights falling off with the square of the valence:
    /// `((4n - 7) / 4n, 1 / 4n^2, 1 / 2n^2)`. Unlike the other two schemes
    /// these do not sum to one, so the surface shrinks toward the origin.
    Quartic,
}

impl VertexWeighting {
    /// The weights `(w1, w2, w3)` for a vertex of valence `n`.
    pub fn weights(self, n: f64) -> (f64, f64, f64) {
        match self {
            VertexWeighting::CatmullClark => ((n - 3.0) / n, 1.0 / n, 2.0 / n),
            VertexWeighting::Relaxed => ((n - 2.5) / n, 1.0 / n, 1.5 / n),
            VertexWeighting::Quartic => (
                (4.0 * n - 7.0) / (4.0 * n),
                1.0 / (4.0 * n * n),
                1.0 / (2.0 * n * n),
            ),
        }
    }
}

/// Pass-scoped memo of edge points, keyed by the canonical vertex pair of
/// each edge. An edge shared by two faces is visited twice while walking the
/// face list, but its edge point must only be created once.
struct EdgePointCache {
    map: HashMap<EdgeKey, VH>,
}

impl EdgePointCache {
    fn with_capacity(nedges: usize) -> Self {
        EdgePointCache {
            map: HashMap::with_capacity(nedges),
        }
    }

    fn contains(&self, a: VH, b: VH) -> bool {
        self.map.contains_key(&EdgeKey::new(a, b))
    }

    fn insert(&mut self, a: VH, b: VH, point: VH) {
        let prev = self.map.insert(EdgeKey::new(a, b), point);
        debug_assert!(prev.is_none());
    }

    fn get(&self, a: VH, b: VH) -> Result<VH, Error> {
        // A missing entry means the edge never appeared while walking the
        // faces, i.e. the input topology is broken.
        self.map
            .get(&EdgeKey::new(a, b))
            .copied()
            .ok_or(Error::NonManifoldEdge(a, b))
    }

    fn len(&self) -> usize {
        self.map.len()
    }
}

/// This struct doesn't contain any data. It exists to provide a scope inside
/// its `impl` where the trait bounds are imposed once, shared by all the
/// stage functions of the subdivision pass.
struct QuadScheme<const DIM: usize, A>(PhantomData<A>);

impl<const DIM: usize, A> QuadScheme<DIM, A>
where
    A: FloatScalarAdaptor<DIM>,
    A::Vector: Add<Output = A::Vector>
        + Div<A::Scalar, Output = A::Vector>
        + Mul<A::Scalar, Output = A::Vector>,
{
    /// Append one face point per face, at the centroid of its four
    /// vertices. Returns the face-index-aligned list of the new vertices.
    fn calc_face_points(mesh: &QuadMeshT<DIM, A>, points: &mut Vec<A::Vector>) -> Vec<VH> {
        let mut face_points = Vec::with_capacity(mesh.num_faces());
        for f in mesh.faces() {
            let centroid = mesh.calc_face_centroid(f, points);
            let vi: VH = (points.len() as u32).into();
            points.push(centroid);
            face_points.push(vi);
        }
        face_points
    }

    /// Append one edge point per edge, at the mean of the edge's endpoints
    /// and the face points of the two faces sharing the edge. Visiting an
    /// edge again from its other face is a no-op.
    fn calc_edge_points(
        mesh: &QuadMeshT<DIM, A>,
        face_points: &[VH],
        points: &mut Vec<A::Vector>,
    ) -> Result<EdgePointCache, Error> {
        let mut cache = EdgePointCache::with_capacity(mesh.num_faces() * 2);
        for quad in mesh.face_list() {
            for i in 0..4 {
                let (a, b) = (quad[i], quad[(i + 1) % 4]);
                if cache.contains(a, b) {
                    continue;
                }
                let ends = [a, b];
                let mut shared = mesh.faces_containing(&ends);
                let (fa, fb) = match (shared.next(), shared.next(), shared.next()) {
                    (Some(fa), Some(fb), None) => (fa, fb),
                    _ => return Err(Error::NonManifoldEdge(a, b)),
                };
                let pos = (points[a.index() as usize]
                    + points[b.index() as usize]
                    + points[face_points[fa.index() as usize].index() as usize]
                    + points[face_points[fb.index() as usize].index() as usize])
                    * A::scalarf64(0.25);
                let vi: VH = (points.len() as u32).into();
                points.push(pos);
                cache.insert(a, b, vi);
            }
        }
        debug_assert_eq!(cache.len(), mesh.num_faces() * 2);
        Ok(cache)
    }

    /// Move every original vertex to the weighted combination of its old
    /// position, the mean of its incident face points, and the mean of its
    /// incident edge points. Face and edge points are read from the scratch
    /// buffer and are never written here, so all inputs are pre-pass state.
    fn calc_vertex_positions(
        mesh: &QuadMeshT<DIM, A>,
        weighting: VertexWeighting,
        face_points: &[VH],
        edge_points: &EdgePointCache,
        points: &mut [A::Vector],
    ) -> Result<(), Error> {
        for v in mesh.vertices() {
            let vi = v.index() as usize;
            let mut favg = A::zero_vector();
            let mut n = 0usize;
            for f in mesh.faces_containing(&[v]) {
                favg = favg + points[face_points[f.index() as usize].index() as usize];
                n += 1;
            }
            if n == 0 {
                return Err(Error::ZeroValenceVertex(v));
            }
            let favg = favg / A::scalarf64(n as f64);
            let neighbors = mesh.edge_adjacent_vertices(v);
            let mut eavg = A::zero_vector();
            for nv in &neighbors {
                eavg = eavg + points[edge_points.get(v, *nv)?.index() as usize];
            }
            let eavg = eavg / A::scalarf64(neighbors.len() as f64);
            let (w1, w2, w3) = weighting.weights(n as f64);
            points[vi] = points[vi] * A::scalarf64(w1)
                + favg * A::scalarf64(w2)
                + eavg * A::scalarf64(w3);
        }
        Ok(())
    }

    /// Build the refined quad list. Every old face yields four quads, one
    /// per corner, each wound the same way as the source face:
    /// `(face point, previous edge point, corner, next edge point)`.
    fn build_faces(
        mesh: &QuadMeshT<DIM, A>,
        face_points: &[VH],
        edge_points: &EdgePointCache,
    ) -> Result<Vec<[VH; 4]>, Error> {
        let mut faces = Vec::with_capacity(mesh.num_faces() * 4);
        for (quad, fp) in mesh.face_list().iter().zip(face_points) {
            for i in 0..4 {
                let prev = quad[(i + 3) % 4];
                let p = quad[i];
                let next = quad[(i + 1) % 4];
                faces.push([*fp, edge_points.get(prev, p)?, p, edge_points.get(p, next)?]);
            }
        }
        Ok(faces)
    }
}

impl<const DIM: usize, A> QuadMeshT<DIM, A>
where
    A: FloatScalarAdaptor<DIM>,
    A::Vector: Add<Output = A::Vector>
        + Div<A::Scalar, Output = A::Vector>
        + Mul<A::Scalar, Output = A::Vector>,
{
    /// Subdivide the mesh with the default vertex weighting.
    ///
    /// Subdivisions are carried out for the given number of `iterations`.
    /// Each iteration quadruples the face count and smooths the shape
    /// toward the limit surface of the generalized [Catmull-Clark
    /// scheme](https://en.wikipedia.org/wiki/Catmull%E2%80%93Clark_subdivision_surface).
    /// The mesh must be closed, manifold, and all-quad.
    ///
    /// ```rust
    /// use quadsub::quadsub_glam::QuadMeshF32;
    ///
    /// let mut mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
    /// assert_eq!((8, 6), (mesh.num_vertices(), mesh.num_faces()));
    /// mesh.subdivide(1).expect("Subdivision failed");
    /// // The mesh now has more faces.
    /// assert_eq!((26, 24), (mesh.num_vertices(), mesh.num_faces()));
    /// mesh.check_topology().expect("Topological errors found");
    /// ```
    pub fn subdivide(&mut self, iterations: usize) -> Result<(), Error> {
        self.subdivide_with(iterations, VertexWeighting::default())
    }

    /// Subdivide the mesh with the given vertex weighting.
    ///
    /// Each iteration runs one full pass: face points, edge points, vertex
    /// repositioning, and the rebuilt quad list. A pass is built in scratch
    /// buffers and committed at the end, so a failing pass (e.g. a
    /// [`Error::NonManifoldEdge`] on an open mesh) leaves the mesh exactly
    /// as it was.
    pub fn subdivide_with(
        &mut self,
        iterations: usize,
        weighting: VertexWeighting,
    ) -> Result<(), Error> {
        for _ in 0..iterations {
            // Scratch positions for the whole pass. Face and edge points are
            // appended after the original vertices, then the originals are
            // repositioned in place.
            let mut points = self.points().to_vec();
            points.reserve(self.num_faces() * 3);
            let face_points = QuadScheme::<DIM, A>::calc_face_points(self, &mut points);
            let edge_points =
                QuadScheme::<DIM, A>::calc_edge_points(self, &face_points, &mut points)?;
            QuadScheme::<DIM, A>::calc_vertex_positions(
                self,
                weighting,
                &face_points,
                &edge_points,
                &mut points,
            )?;
            let faces = QuadScheme::<DIM, A>::build_faces(self, &face_points, &edge_points)?;
            self.replace(points, faces);
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::VertexWeighting;
    use crate::{element::VH, error::Error, quadsub_glam::QuadMeshF32};

    fn open_cube() -> QuadMeshF32 {
        let cube = QuadMeshF32::unit_cube().expect("Cannot create cube");
        let mut mesh = QuadMeshF32::new();
        for &p in cube.points() {
            mesh.add_vertex(p);
        }
        for &[a, b, c, d] in &cube.face_list()[..cube.num_faces() - 1] {
            mesh.add_quad_face(a, b, c, d).expect("Cannot add face");
        }
        mesh
    }

    #[test]
    fn t_cube_subdivide() {
        let mut mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        mesh.subdivide(1).expect("Subdivision failed");
        // 8 old vertices + 6 face points + 12 edge points. The edge-point
        // count doubling the face count confirms each edge was refined
        // exactly once.
        assert_eq!(26, mesh.num_vertices());
        assert_eq!(24, mesh.num_faces());
        mesh.check_topology().expect("Topological errors found");
    }

    #[test]
    fn t_cube_subdivide_twice() {
        let mut mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        mesh.subdivide(2).expect("Subdivision failed");
        assert_eq!(98, mesh.num_vertices());
        assert_eq!(96, mesh.num_faces());
        mesh.check_topology().expect("Topological errors found");
    }

    #[test]
    fn t_cube_vertex_buffer_sizes() {
        let mut mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        mesh.subdivide(1).expect("Subdivision failed");
        assert_eq!(24 * 4 * 4, mesh.to_vertex_buffer().len());
        mesh.subdivide(1).expect("Subdivision failed");
        assert_eq!(96 * 4 * 4, mesh.to_vertex_buffer().len());
    }

    #[test]
    fn t_cube_corner_positions() {
        // A cube corner has valence 3. With the default weights the three
        // averages work out to move every corner to +/- 19/36 per
        // coordinate; the classic Catmull-Clark weights give +/- 4/9.
        let mut mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        mesh.subdivide(1).expect("Subdivision failed");
        let corner = mesh.point(0.into()).expect("Cannot read point");
        assert!((corner - glam::Vec3::splat(-19.0 / 36.0)).length() < 1e-6);

        let mut mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        mesh.subdivide_with(1, VertexWeighting::CatmullClark)
            .expect("Subdivision failed");
        let corner = mesh.point(0.into()).expect("Cannot read point");
        assert!((corner - glam::Vec3::splat(-4.0 / 9.0)).length() < 1e-6);
    }

    #[test]
    fn t_cube_first_subface() {
        // The first old face is (0, 4, 7, 3). Its face point is vertex 8,
        // and the edge points of its edges (0,4) and (0,3) are created
        // first and fourth, i.e. vertices 14 and 17. The first refined quad
        // is centered on corner 0.
        let mut mesh = QuadMeshF32::unit_cube().expect("Cannot create cube");
        mesh.subdivide(1).expect("Subdivision failed");
        assert_eq!(
            [VH::from(8), VH::from(17), VH::from(0), VH::from(14)],
            mesh.face_vertices(0.into()).expect("Cannot read face")
        );
    }

    #[test]
    fn t_weights_sum_to_one() {
        for weighting in [VertexWeighting::CatmullClark, VertexWeighting::Relaxed] {
            for n in 1..=16 {
                let (w1, w2, w3) = weighting.weights(n as f64);
                assert!(
                    (w1 + w2 + w3 - 1.0).abs() < 1e-12,
                    "{weighting:?} weights do not sum to 1 for valence {n}"
                );
            }
        }
    }

    #[test]
    fn t_open_mesh_subdivide_fails() {
        let mut mesh = open_cube();
        let points_before = mesh.points().to_vec();
        let faces_before = mesh.face_list().to_vec();
        assert!(matches!(
            mesh.subdivide(1),
            Err(Error::NonManifoldEdge(_, _))
        ));
        // A failed pass must not leave partial state behind.
        assert_eq!(points_before, mesh.points());
        assert_eq!(faces_before, mesh.face_list());
    }

    #[test]
    fn t_weighting_changes_shape_not_topology() {
        let mut relaxed = QuadMeshF32::unit_cube().expect("Cannot create cube");
        relaxed.subdivide(1).expect("Subdivision failed");
        let mut classic = QuadMeshF32::unit_cube().expect("Cannot create cube");
        classic
            .subdivide_with(1, VertexWeighting::CatmullClark)
            .expect("Subdivision failed");
        assert_eq!(relaxed.face_list(), classic.face_list());
        assert_ne!(
            relaxed.point(0.into()).expect("Cannot read point"),
            classic.point(0.into()).expect("Cannot read point")
        );
    }
}
