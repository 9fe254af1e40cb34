use amira::{Atom, Kind, Vec3Array};

fn init_logging() {
    let _ = stderrlog::new().verbosity(4).init();
}

#[test]
fn parse_ascii_tetrahedron() {
    init_logging();
    let doc = amira::read("tests/data/tetrahedron.surf").unwrap();

    assert_eq!(doc.info.kind, Some(Kind::HyperSurface));
    assert_eq!(doc.info.version, Some("0.1"));
    assert!(!doc.info.is_binary);
    assert!(amira::is_hypersurface(&doc));

    // data[0].Parameters.Materials.Exterior.id == 1
    let parameters = doc.data[0]
        .as_block()
        .and_then(|block| block.get("Parameters"))
        .and_then(Atom::as_block)
        .expect("a Parameters block");
    let exterior = parameters
        .get("Materials")
        .and_then(Atom::as_block)
        .and_then(|materials| materials.get("Exterior"))
        .and_then(Atom::as_block)
        .expect("an Exterior material");
    assert_eq!(exterior.get("id").and_then(Atom::as_int), Some(1));

    let vertices = doc.data[1]
        .as_block()
        .and_then(|block| block.get("Vertices"))
        .and_then(Atom::as_vec3)
        .expect("a Vertices array");
    assert_eq!(vertices.shape(), [4, 3]);
    match vertices {
        Vec3Array::Float(rows) => assert_eq!(rows[0], [-1.0, -1.0, -1.0]),
        Vec3Array::Int(_) => panic!("Vertices must hold floats"),
    }

    let triangles = doc.data[2]
        .as_block()
        .and_then(|block| block.get("Triangles"))
        .and_then(Atom::as_vec3)
        .expect("a Triangles array");
    assert_eq!(triangles.shape(), [4, 3]);
    match triangles {
        Vec3Array::Int(rows) => {
            assert_eq!(rows, &vec![[1, 2, 3], [3, 2, 4], [4, 2, 1], [1, 3, 4]]);
        }
        Vec3Array::Float(_) => panic!("Triangles must hold ints"),
    }

    // the locator methods agree with the by-hand traversal
    assert_eq!(doc.vertices(), Some(vertices));
    assert_eq!(doc.triangles(), Some(triangles));
}

#[test]
fn materials_keep_declaration_order() {
    let input = b"# HyperSurface 0.1 ASCII\n\
\n\
Parameters {\n\
    Materials {\n\
        Exterior {\n\
        }\n\
        Inside {\n\
        }\n\
        Tumor {\n\
        }\n\
    }\n\
}\n";
    let doc = amira::read_stream(input).unwrap();
    let materials = doc
        .parameters()
        .and_then(|parameters| parameters.get("Materials"))
        .and_then(Atom::as_block)
        .expect("a Materials block");
    let names: Vec<&str> = materials.keys().collect();
    assert_eq!(names, ["Exterior", "Inside", "Tumor"]);

    // ids are guessed by position when none are declared
    let table = doc.materials().unwrap();
    let ids: Vec<Option<i64>> = table.iter().map(|material| material.id).collect();
    assert_eq!(ids, [Some(1), Some(2), Some(3)]);
}

#[test]
fn explicit_ids_stop_the_guessing() {
    let input = b"# HyperSurface 0.1 ASCII\n\
\n\
Parameters {\n\
    Materials {\n\
        Exterior {\n\
        }\n\
        Inside {\n\
            id 5\n\
        }\n\
        Tumor {\n\
        }\n\
    }\n\
}\n";
    let doc = amira::read_stream(input).unwrap();
    let ids: Vec<Option<i64>> = doc
        .materials()
        .unwrap()
        .iter()
        .map(|material| material.id)
        .collect();
    assert_eq!(ids, [Some(1), Some(5), None]);
}

#[test]
fn colliding_ids_are_rejected() {
    let input = b"# HyperSurface 0.1 ASCII\n\
\n\
Parameters {\n\
    Materials {\n\
        Exterior {\n\
            id 1\n\
        }\n\
        Inside {\n\
            id 1\n\
        }\n\
    }\n\
}\n";
    let doc = amira::read_stream(input).unwrap();
    match doc.materials() {
        Err(amira::Error::DuplicateKey { key, block }) => {
            assert_eq!(key, "1");
            assert_eq!(block, "Materials");
        }
        other => panic!("expected colliding ids to fail, got {:?}", other),
    }
}

#[test]
fn empty_materials_block() {
    let input = b"# HyperSurface 0.1 ASCII\n\
Parameters {\n\
    Materials {\n\
    }\n\
}\n";
    let doc = amira::read_stream(input).unwrap();
    let materials = doc
        .parameters()
        .and_then(|parameters| parameters.get("Materials"))
        .and_then(Atom::as_block)
        .expect("a Materials block");
    assert!(materials.is_empty());
    assert!(doc.materials().unwrap().is_empty());
}

#[test]
fn binary_hypersurface_arrays_are_big_endian() {
    init_logging();
    let mut input = b"# HyperSurface 0.1 BINARY\nVertices 2\n".to_vec();
    for value in [-1.0f32, -1.0, -1.0, 0.25, 0.5, 2.0] {
        input.extend_from_slice(&value.to_be_bytes());
    }
    input.extend_from_slice(b"\nTriangles 1\n");
    for value in [1i32, 2, 3] {
        input.extend_from_slice(&value.to_be_bytes());
    }
    input.push(b'\n');

    let doc = amira::read_stream(&input).unwrap();
    assert_eq!(doc.info.kind, Some(Kind::HyperSurface));
    assert!(doc.info.is_binary);
    assert_eq!(
        doc.vertices(),
        Some(&Vec3Array::Float(vec![
            [-1.0, -1.0, -1.0],
            [0.25, 0.5, 2.0],
        ]))
    );
    assert_eq!(doc.triangles(), Some(&Vec3Array::Int(vec![[1, 2, 3]])));
}

#[test]
fn unknown_header_still_parses() {
    let input = b"# FooMesh 9.9\nParameters {\n    foo 1\n}\n";
    let doc = amira::read_stream(input).unwrap();
    assert_eq!(doc.info.kind, None);
    assert_eq!(doc.info.version, None);
    assert!(!doc.info.is_binary);
    assert_eq!(
        doc.parameters().and_then(|p| p.get("foo")).and_then(Atom::as_int),
        Some(1)
    );
}

#[test]
fn read_surf_rejects_lattice_files() {
    let path = std::env::temp_dir().join(format!("amira-not-a-surf-{}.am", std::process::id()));
    std::fs::write(&path, b"# AmiraMesh 3D ASCII 2.0\ndefine Lattice 1 1 1\n").unwrap();
    let result = amira::read_surf(&path);
    std::fs::remove_file(&path).unwrap();
    match result {
        Err(amira::Error::Malformed(_)) => {}
        other => panic!("expected a malformed error, got {:?}", other),
    }
}

#[test]
fn read_surf_returns_the_data() {
    let data = amira::read_surf("tests/data/tetrahedron.surf").unwrap();
    assert_eq!(data.len(), 3);
    assert!(data[0].as_block().unwrap().contains_key("Parameters"));
}

#[test]
fn parsing_is_deterministic() {
    let input = std::fs::read("tests/data/tetrahedron.surf").unwrap();
    let first = amira::read_stream(&input).unwrap();
    let second = amira::read_stream(&input).unwrap();
    assert_eq!(first, second);
}
