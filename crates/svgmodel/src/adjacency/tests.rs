use super::*;
use crate::error::GeomError;
use crate::geom::{Loop, Path};
use crate::key::{KeyPart, ShapeId};
use crate::spatial::ShapesCanvas;
use nalgebra::vector;

fn rect(x0: f64, y0: f64, w: f64, h: f64) -> Path {
    Path::new(vec![Loop::new(vec![
        vector![x0, y0],
        vector![x0 + w, y0],
        vector![x0 + w, y0 + h],
        vector![x0, y0 + h],
    ])
    .unwrap()])
}

fn id(s: &str) -> ShapeId {
    ShapeId::name(s)
}

fn layout() -> Vec<(ShapeId, Path)> {
    vec![
        (id("A"), rect(0.0, 0.0, 1.0, 1.0)),
        // 0.2 to the right of A.
        (id("B"), rect(1.2, 0.0, 1.0, 1.0)),
        (id("C"), rect(5.0, 0.0, 1.0, 1.0)),
        // 0.3 above A; only diagonal to B.
        (id("D"), rect(0.0, 1.3, 1.0, 1.0)),
    ]
}

fn refs(shapes: &[(ShapeId, Path)]) -> impl Iterator<Item = (&ShapeId, &Path)> {
    shapes.iter().map(|(i, p)| (i, p))
}

#[test]
fn stretch_finds_side_neighbours_only() {
    let shapes = layout();
    let adj = extract_adjacent_shapes(refs(&shapes), 0.5).unwrap();
    let pairs: Vec<(&ShapeId, &ShapeId)> = adj.iter().map(|e| (&e.source, &e.target)).collect();
    assert_eq!(pairs, vec![(&id("A"), &id("B")), (&id("A"), &id("D"))]);
    assert!(adj.contains(&id("B"), &id("A")));
    assert!(!adj.contains(&id("B"), &id("D")));
    assert!(!adj.contains(&id("A"), &id("A")));
}

#[test]
fn stretch_distance_controls_reach() {
    let shapes = layout();
    assert!(extract_adjacent_shapes(refs(&shapes), 0.1).unwrap().is_empty());
    let wide = extract_adjacent_shapes(refs(&shapes), 3.5).unwrap();
    assert!(wide.contains(&id("B"), &id("C")));
}

#[test]
fn touching_shapes_are_adjacent_without_stretch() {
    let shapes = vec![
        (ShapeId::int(2), rect(1.0, 0.0, 1.0, 1.0)),
        (ShapeId::int(1), rect(0.0, 0.0, 1.0, 1.0)),
    ];
    let adj = extract_adjacent_shapes(refs(&shapes), 0.0).unwrap();
    assert_eq!(adj.len(), 1);
    assert_eq!(adj.edges()[0].source, ShapeId::int(1));
    assert_eq!(adj.edges()[0].target, ShapeId::int(2));
}

#[test]
fn stretch_rejects_composite_keys_and_bad_distance() {
    let key = ShapeId::composite(vec![KeyPart::Int(1), KeyPart::Text("x".into())]).unwrap();
    let shapes = vec![(key, rect(0.0, 0.0, 1.0, 1.0))];
    assert!(matches!(
        extract_adjacent_shapes(refs(&shapes), 0.5),
        Err(GeomError::AmbiguousShapeKey { parts: 2, .. })
    ));
    assert!(matches!(
        shape_centers(refs(&shapes)),
        Err(GeomError::AmbiguousShapeKey { .. })
    ));
    let shapes = layout();
    for bad in [-1.0, f64::NAN, f64::INFINITY] {
        assert!(matches!(
            extract_adjacent_shapes(refs(&shapes), bad),
            Err(GeomError::InvalidConfig { .. })
        ));
    }
}

#[test]
fn empty_paths_are_skipped() {
    let mut shapes = layout();
    shapes.push((id("E"), Path::new(Vec::new())));
    let adj = extract_adjacent_shapes(refs(&shapes), 0.5).unwrap();
    assert_eq!(adj.len(), 2);
    let centers = shape_centers(refs(&shapes)).unwrap();
    assert_eq!(centers.len(), 4);
    assert!((centers[&id("B")] - vector![1.7, 0.5]).norm() < 1e-12);
}

#[test]
fn adjacency_matrix_is_symmetric_over_sorted_keys() {
    let shapes = layout();
    let adj = extract_adjacent_shapes(refs(&shapes), 0.5).unwrap();
    let (m, keys) = adj.matrix();
    assert_eq!(keys, vec![id("A"), id("B"), id("D")]);
    assert_eq!(m.nrows(), 3);
    assert_eq!(m, m.transpose());
    assert_eq!(m[(0, 1)], 1);
    assert_eq!(m[(0, 2)], 1);
    assert_eq!(m[(1, 2)], 0);
    assert_eq!(m.diagonal().sum(), 0);
}

#[test]
fn edge_list_is_canonical_and_deduplicated() {
    let list = AdjacencyList::from_edges(
        [("b", "a"), ("a", "b"), ("c", "a")]
            .into_iter()
            .filter_map(|(s, t)| AdjacencyEdge::new(id(s), id(t))),
    );
    assert_eq!(list.len(), 2);
    assert_eq!(list.edges()[0], AdjacencyEdge::new(id("a"), id("b")).unwrap());
    assert_eq!(list.edges()[1].target, id("c"));
    assert!(AdjacencyEdge::new(id("a"), id("a")).is_none());
    let json = serde_json::to_string(&list).unwrap();
    assert!(json.contains("\"source\""));
}

#[test]
fn connector_from_path_data() {
    let c = Connector::from_path_data(Some("w1".into()), "M 0.5,0.5 L 1.5,0.5 H 2.5").unwrap();
    assert_eq!(c.start, vector![0.5, 0.5]);
    assert_eq!(c.end, vector![2.5, 0.5]);
    let c = Connector::from_path_data(None, "M0.5 0.5 v2").unwrap();
    assert_eq!(c.end, vector![0.5, 2.5]);
    let c = Connector::from_path_data(None, "M0,0 V3 H4").unwrap();
    assert_eq!(c.end, vector![4.0, 3.0]);
    assert!(matches!(
        Connector::from_path_data(None, "L 1,1"),
        Err(GeomError::CommandOrder { index: 0, .. })
    ));
    assert!(matches!(
        Connector::from_path_data(None, "M 1,1"),
        Err(GeomError::EmptyGeometry { .. })
    ));
    assert!(matches!(
        Connector::from_path_data(None, "M 1,1 C 2,2 3,3 4,4"),
        Err(GeomError::UnsupportedCommand { letter: 'C', .. })
    ));
}

#[test]
fn connections_resolve_through_the_canvas() {
    let shapes = vec![
        (id("A"), rect(0.0, 0.0, 1.0, 1.0)),
        (id("B"), rect(2.0, 0.0, 1.0, 1.0)),
    ];
    let canvas = ShapesCanvas::new(shapes, None, 0.0).unwrap();
    let connectors = vec![
        Connector::new(Some("ab".into()), vector![0.5, 0.5], vector![2.5, 0.5]),
        Connector::new(Some("ba".into()), vector![2.5, 0.2], vector![0.2, 0.2]),
        Connector::new(Some("gap".into()), vector![0.5, 0.5], vector![1.5, 0.5]),
        Connector::new(Some("self".into()), vector![0.1, 0.1], vector![0.9, 0.9]),
    ];
    let records = extract_connection_records(&canvas, &connectors);
    assert_eq!(records.len(), 2);
    let expected = AdjacencyEdge::new(id("A"), id("B")).unwrap();
    assert!(records.iter().all(|c| c.edge == expected));
    assert_eq!(records[0].connector.as_deref(), Some("ab"));
    assert_eq!(records[1].connector.as_deref(), Some("ba"));
    let list = extract_connections(&canvas, &connectors);
    assert_eq!(list.edges(), &[expected]);
}

#[test]
fn connectors_both_ways_give_one_edge() {
    let shapes = vec![
        (id("A"), rect(0.0, 0.0, 1.0, 1.0)),
        (id("B"), rect(2.0, 0.0, 1.0, 1.0)),
        (id("C"), rect(4.0, 0.0, 1.0, 1.0)),
    ];
    let canvas = ShapesCanvas::new(shapes, None, 0.0).unwrap();
    let connectors = vec![
        Connector::new(Some("c1".into()), vector![0.5, 0.5], vector![2.5, 0.5]),
        Connector::new(Some("c2".into()), vector![2.5, 0.5], vector![0.5, 0.5]),
        Connector::new(Some("c3".into()), vector![0.4, 0.6], vector![2.6, 0.4]),
        Connector::new(Some("c4".into()), vector![4.5, 0.5], vector![2.5, 0.5]),
    ];
    let list = extract_connections(&canvas, &connectors);
    let pairs: Vec<(&ShapeId, &ShapeId)> = list.iter().map(|e| (&e.source, &e.target)).collect();
    assert_eq!(pairs, vec![(&id("A"), &id("B")), (&id("B"), &id("C"))]);
    assert!(list.contains(&id("B"), &id("A")));
}
