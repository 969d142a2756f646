use super::*;
use crate::error::GeomError;
use nalgebra::vector;

fn cfg() -> TraceCfg {
    TraceCfg::default()
}

#[test]
fn square_round_trip() {
    let loops = parse_path("M 0,0 L 10,0 L 10,10 L 0,10 Z", &cfg()).unwrap();
    assert_eq!(loops.len(), 1);
    assert_eq!(loops[0].len(), 4);
    assert!((loops[0].area() - 100.0).abs() < 1e-12);
}

#[test]
fn relative_line_is_unsupported() {
    let err = parse_path_data("M 0,0 l 5,5").unwrap_err();
    assert_eq!(err, GeomError::UnsupportedCommand { letter: 'l', pos: 6 });
    for d in ["M 0 0 C 1 1 2 2 3 3", "m 0 0", "M 0 0 L 1 1 L 1 0 z", "M 0 0 A 1 1 0 0 1 2 2"] {
        assert!(
            matches!(parse_path_data(d), Err(GeomError::UnsupportedCommand { .. })),
            "{d}"
        );
    }
}

#[test]
fn two_point_loop_is_degenerate() {
    let err = parse_path("M 0,0 L 1,1 Z", &cfg()).unwrap_err();
    assert_eq!(err, GeomError::DegenerateLoop { vertices: 2 });
}

#[test]
fn tokens_commas_and_exponents() {
    let cmds = parse_path_data("M1e1,-2.5E-1L10-5h-.5v+2Z").unwrap();
    assert_eq!(
        cmds,
        vec![
            PathCommand::Move { x: 10.0, y: -0.25 },
            PathCommand::Line { x: 10.0, y: -5.0 },
            PathCommand::Horizontal { value: -0.5, relative: true },
            PathCommand::Vertical { value: 2.0, relative: true },
            PathCommand::Close,
        ]
    );
}

#[test]
fn misplaced_commas_and_bad_numbers() {
    for d in [
        ", M 0 0",
        "M, 0 0",
        "M 0,,0",
        "M 0 0, L 1 1",
        "M 1.2.3 0",
        "M - 0",
        "M 1e 0",
        "M 1e999 0",
        "1 2",
        "M 0 0 # 1 1",
    ] {
        assert!(matches!(parse_path_data(d), Err(GeomError::Syntax { .. })), "{d}");
    }
}

#[test]
fn arity_is_checked() {
    for d in ["M 0", "M 0 0 L", "M 0 0 L 1 1 2", "M 0 0 H", "M 0 0 Z 1"] {
        assert!(matches!(parse_path_data(d), Err(GeomError::Syntax { .. })), "{d}");
    }
}

#[test]
fn extra_pairs_repeat_the_command() {
    let cmds = parse_path_data("M 0 0 1 0 1 1 H 2 3").unwrap();
    assert_eq!(
        cmds,
        vec![
            PathCommand::Move { x: 0.0, y: 0.0 },
            PathCommand::Line { x: 1.0, y: 0.0 },
            PathCommand::Line { x: 1.0, y: 1.0 },
            PathCommand::Horizontal { value: 2.0, relative: false },
            PathCommand::Horizontal { value: 3.0, relative: false },
        ]
    );
}

#[test]
fn trailing_line_to_start_becomes_close() {
    let cmds = parse_path_data("M 0,0 L 4,0 L 4,4 L 0,0").unwrap();
    assert_eq!(cmds.last(), Some(&PathCommand::Close));
    let loops = parse_path("M 0,0 L 4,0 L 4,4 L 0,0", &TraceCfg { require_close: true }).unwrap();
    assert_eq!(loops[0].len(), 3);
}

#[test]
fn horizontal_and_vertical_moves() {
    let loops = parse_path("M 1 1 H 5 v 3 h -4 Z", &cfg()).unwrap();
    let mut got = loops[0].vertices().to_vec();
    got.sort_by(|a, b| a.x.total_cmp(&b.x).then(a.y.total_cmp(&b.y)));
    assert_eq!(
        got,
        vec![vector![1.0, 1.0], vector![1.0, 4.0], vector![5.0, 1.0], vector![5.0, 4.0]]
    );
}

#[test]
fn implicit_close_at_end_and_at_move() {
    let loops = parse_path("M 0 0 L 2 0 L 2 2 M 5 5 L 6 5 L 6 6", &cfg()).unwrap();
    assert_eq!(loops.len(), 2);
    assert!((loops[0].area() - 2.0).abs() < 1e-12);
    assert!((loops[1].area() - 0.5).abs() < 1e-12);
}

#[test]
fn short_open_loop_is_dropped_at_move() {
    let loops = parse_path("M 9 9 M 0 0 L 1 0 L 0 1 Z", &cfg()).unwrap();
    assert_eq!(loops.len(), 1);
    let err = parse_path("M 0 0 L 1 0 L 0 1 Z M 4 4 L 5 5", &cfg()).unwrap_err();
    assert_eq!(err, GeomError::DegenerateLoop { vertices: 2 });
}

#[test]
fn require_close_rejects_open_loops() {
    let strict = TraceCfg { require_close: true };
    let err = parse_path("M 0 0 L 2 0 L 2 2", &strict).unwrap_err();
    assert_eq!(err, GeomError::UnclosedLoop { vertices: 3 });
    let err = parse_path("M 0 0 L 2 0 L 2 2 M 5 5 L 6 5 L 6 6 Z", &strict).unwrap_err();
    assert_eq!(err, GeomError::UnclosedLoop { vertices: 3 });
    let err = parse_path("M 0,0 L 5,5 M 10,10 L 20,10 L 20,20 Z", &strict).unwrap_err();
    assert_eq!(err, GeomError::UnclosedLoop { vertices: 2 });
    assert_eq!(parse_path("M 0,0 L 5,5 M 10,10 L 20,10 L 20,20 Z", &cfg()).unwrap().len(), 1);
}

#[test]
fn drawing_after_close_starts_at_previous_start() {
    let loops = parse_path("M 0 0 L 2 0 L 2 2 Z L 0 -2 L 2 -2 Z", &cfg()).unwrap();
    assert_eq!(loops.len(), 2);
    assert!(loops[1].vertices().contains(&vector![0.0, 0.0]));
}

#[test]
fn drawing_before_move_is_rejected() {
    let err = parse_path("L 1 1 L 2 2 Z", &cfg()).unwrap_err();
    assert!(matches!(err, GeomError::CommandOrder { index: 0, .. }));
}

#[test]
fn duplicate_vertices_collapse_on_close() {
    let loops = parse_path("M 0 0 L 0 0 L 3 0 L 3 0 L 3 3 L 0 0 Z", &cfg()).unwrap();
    assert_eq!(loops[0].len(), 3);
}

#[test]
fn polygon_points() {
    let l = loop_from_points("0,0 4,0 4,3 0,3").unwrap();
    assert_eq!(l.len(), 4);
    assert!((l.area() - 12.0).abs() < 1e-12);
    assert_eq!(parse_points("1 2, 3 4").unwrap(), vec![vector![1.0, 2.0], vector![3.0, 4.0]]);
    assert!(matches!(parse_points("0,0 1"), Err(GeomError::Syntax { .. })));
    assert!(matches!(loop_from_points("0,0 1,1"), Err(GeomError::DegenerateLoop { .. })));
}

#[test]
fn builder_exposes_closed_loops() {
    let mut b = LoopBuilder::new(cfg());
    for c in parse_path_data("M 0 0 L 1 0 L 1 1 Z M 3 3").unwrap() {
        b.push(c).unwrap();
    }
    assert_eq!(b.loops().len(), 1);
    assert!(matches!(b.finish(), Err(GeomError::DegenerateLoop { vertices: 1 })));
}
