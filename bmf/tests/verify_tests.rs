use bmf::mesh::*;
use bmf::*;

// Quad with material 1 followed by a triangle with material 5.
fn two_shapes() -> BinaryMesh16 {
    #[rustfmt::skip]
    let vertices = vec![
        0.0, 0.0, 0.0,
        1.0, 0.0, 0.0,
        1.0, 1.0, 0.0,
        0.0, 1.0, 0.0,
        3.0, 0.0, 1.0,
        4.0, 0.0, 1.0,
        3.0, 2.0, 2.0,
    ];
    let shapes = vec![
        Shape { index_offset: 0, index_count: 6, vertex_offset: 0, vertex_count: 4, material_id: 1, ..Default::default() },
        Shape { index_offset: 6, index_count: 3, vertex_offset: 4, vertex_count: 3, material_id: 5, ..Default::default() },
    ];
    let mut mesh = BinaryMesh16::new(Attributes::POSITION, vertices, vec![0, 1, 2, 2, 3, 0, 0, 1, 2], shapes);
    mesh.generate_bounding_volumes().unwrap();
    mesh
}

fn verify_reason(result: Result<()>) -> (&'static str, Option<usize>) {
    match result {
        Err(Error::Verify { reason, shape }) => (reason, shape),
        other => panic!("expected a verification error, got {other:?}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn valid_mesh() {
        let mesh = two_shapes();
        mesh.verify().unwrap();
        assert_eq!(mesh.num_triangles(), 3);
        assert_eq!(mesh.summed_indices(), vec![0, 1, 2, 2, 3, 0, 4, 5, 6]);
        assert_eq!(mesh.material_id_per_triangle(), vec![1, 1, 5]);
    }

    #[rstest]
    #[case::partial_triangle(|m: &mut BinaryMesh16| m.indices_mut().push(0), "indices are not a multiple of 3", None)]
    #[case::partial_vertex(|m: &mut BinaryMesh16| m.vertices_mut().push(0.0), "vertices are not a multiple of the underlying attribute element stride", None)]
    #[case::vertex_offset(|m: &mut BinaryMesh16| m.shapes_mut()[1].vertex_offset = 5, "shape vertex offset is not tightly packed", Some(1))]
    #[case::index_offset_alignment(|m: &mut BinaryMesh16| m.shapes_mut()[0].index_offset = 1, "shape index offset is not a multiple of 3", Some(0))]
    #[case::index_offset_range(|m: &mut BinaryMesh16| m.shapes_mut()[1].index_offset = 9, "shape index offset out of range", Some(1))]
    #[case::index_count_alignment(|m: &mut BinaryMesh16| m.shapes_mut()[1].index_count = 2, "shape index count is not a multiple of 3", Some(1))]
    #[case::index_count_range(|m: &mut BinaryMesh16| m.shapes_mut()[1].index_count = 6, "shape index count out of range", Some(1))]
    #[case::zero_index_count(|m: &mut BinaryMesh16| m.shapes_mut()[0].index_count = 0, "shape zero index count", Some(0))]
    #[case::zero_vertex_count(|m: &mut BinaryMesh16| m.shapes_mut()[1].vertex_count = 0, "shape zero vertex count", Some(1))]
    #[case::vertex_count(|m: &mut BinaryMesh16| m.shapes_mut()[0].vertex_count = 5, "shape invalid vertex count", Some(0))]
    #[case::index_range(|m: &mut BinaryMesh16| { m.indices_mut()[8] = 3; m.shapes_mut()[1].vertex_count = 4 }, "shape index out of range", Some(1))]
    #[case::shape_box(|m: &mut BinaryMesh16| m.shapes_mut()[0].bbox.max.x += 1.0, "shape bounding box not correct", Some(0))]
    #[case::shape_sphere(|m: &mut BinaryMesh16| m.shapes_mut()[1].sphere.radius *= 2.0, "shape bounding sphere not correct", Some(1))]
    #[case::no_shapes(|m: &mut BinaryMesh16| m.shapes_mut().clear(), "no shapes", None)]
    #[case::global_box(|m: &mut BinaryMesh16| m.bounding_box_mut().min.y -= 1.0, "global bounding box not correct", None)]
    #[case::global_sphere(|m: &mut BinaryMesh16| m.bounding_sphere_mut().radius += 1.0, "global bounding sphere not correct", None)]
    fn broken_mesh(#[case] corrupt: fn(&mut BinaryMesh16), #[case] reason: &str, #[case] shape: Option<usize>) {
        let mut mesh = two_shapes();
        corrupt(&mut mesh);
        assert_eq!(verify_reason(mesh.verify()), (reason, shape));
    }

    #[rstest]
    #[case::empty(Attributes::empty(), "no attributes provided")]
    #[case::unknown(Attributes::from_bits_retain(1 << 20), "non existent attribute flags were set")]
    #[case::unknown_and_known(Attributes::POSITION | Attributes::from_bits_retain(1 << 31), "non existent attribute flags were set")]
    fn broken_attributes(#[case] attributes: Attributes, #[case] reason: &str) {
        let mesh = BinaryMesh32::new(attributes, vec![0.0; 9], vec![0, 1, 2], vec![Shape::covering(3, 3)]);
        assert_eq!(verify_reason(mesh.verify()), (reason, None));

        let billboards = BillboardMesh::new(attributes, vec![0.0; 9]);
        assert_eq!(verify_reason(billboards.verify()), (reason, None));
    }

    #[test]
    fn volumes_are_not_checked_without_positions() {
        let mesh = BinaryMesh16::new(Attributes::TEXCOORD0, vec![0.0; 6], vec![0, 1, 2], vec![Shape::covering(3, 3)]);
        mesh.verify().unwrap();
    }

    #[test]
    fn billboards() {
        let attributes = Attributes::POSITION | Attributes::WIDTH;
        let mut mesh = BillboardMesh::new(attributes, vec![0.0, 0.0, 0.0, 1.0, 2.0, 0.0, 0.0, 1.0]);
        assert_eq!(verify_reason(mesh.verify()), ("global bounding box not correct", None));

        mesh.generate_bounding_volumes().unwrap();
        mesh.verify().unwrap();

        mesh.vertices_mut().clear();
        assert_eq!(verify_reason(mesh.verify()), ("no vertices", None));
    }

    #[test]
    fn error_message_names_the_shape() {
        let mut mesh = two_shapes();
        mesh.shapes_mut()[1].vertex_count = 0;
        assert_eq!(mesh.verify().unwrap_err().to_string(), "shape zero vertex count for shape 1");
    }
}
