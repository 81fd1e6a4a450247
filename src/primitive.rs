use crate::{
    error::Error,
    mesh::{Adaptor, FloatScalarAdaptor, QuadMeshT},
};

impl<A> QuadMeshT<3, A>
where
    A: Adaptor<3>,
{
    /// Makes a box with the following topology, spanning from the min point
    /// to the max point. All faces are wound to face outward.
    ///
    ///  ```text
    ///       5-----------6
    ///      /|          /|
    ///     / |         / |
    ///    4-----------7  |
    ///    |  |        |  |
    ///    |  1--------|--2
    ///    | /         | /
    ///    |/          |/
    ///    0-----------3
    ///  ```
    pub fn quad_box(min: A::Vector, max: A::Vector) -> Result<Self, Error> {
        const BOX_POS: [(bool, bool, bool); 8] = [
            (false, false, false),
            (false, false, true),
            (true, false, true),
            (true, false, false),
            (false, true, false),
            (false, true, true),
            (true, true, true),
            (true, true, false),
        ];
        const BOX_IDX: [(u32, u32, u32, u32); 6] = [
            (0, 4, 7, 3),
            (1, 2, 6, 5),
            (0, 1, 5, 4),
            (3, 7, 6, 2),
            (0, 3, 2, 1),
            (4, 5, 6, 7),
        ];
        let mut qbox = Self::with_capacity(8, 6);
        for &(xf, yf, zf) in BOX_POS.iter() {
            qbox.add_vertex(A::vector([
                A::vector_coord(if xf { &max } else { &min }, 0),
                A::vector_coord(if yf { &max } else { &min }, 1),
                A::vector_coord(if zf { &max } else { &min }, 2),
            ]));
        }
        for (a, b, c, d) in BOX_IDX {
            qbox.add_quad_face(a.into(), b.into(), c.into(), d.into())?;
        }
        Ok(qbox)
    }

    /// Create a cube of size 2 centered at the origin, spanning from
    /// (-1, -1, -1) to (1, 1, 1). This is the canonical seed mesh for
    /// subdivision.
    pub fn unit_cube() -> Result<Self, Error>
    where
        A: FloatScalarAdaptor<3>,
    {
        Self::quad_box(
            A::vector([A::scalarf64(-1.0); 3]),
            A::vector([A::scalarf64(1.0); 3]),
        )
    }
}
