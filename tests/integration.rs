// Integration tests (native) for the `circuit-pulse` crate.
// These avoid the browser host and drive the engines through their public
// Rust API so they run under `cargo test` on the host.

use std::collections::HashSet;

use circuit_pulse::graph::generate::{GenParams, ambient_graph};
use circuit_pulse::render::{FrameStats, RecordingPainter};
use circuit_pulse::{
    AmbientScene, ClickOutcome, EngineConfig, NodeKind, Point, Puzzle, PuzzleScene, Scene,
    ScoreTier, SessionState,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

// Node centres for the default 600×400 board: three rows at y = 100/200/300,
// sources at x = 120, processors at x = 300, sinks at x = 480.
fn source(row: u32) -> Point {
    Point::new(120.0, 100.0 * (row + 1) as f64)
}
fn processor(row: u32) -> Point {
    Point::new(300.0, 100.0 * (row + 1) as f64)
}
fn sink(row: u32) -> Point {
    Point::new(480.0, 100.0 * (row + 1) as f64)
}

fn started() -> Puzzle {
    let mut p = Puzzle::new(EngineConfig::default());
    p.start(600.0, 400.0).unwrap();
    p
}

fn link(p: &mut Puzzle, a: Point, b: Point) -> ClickOutcome {
    p.click(a);
    p.click(b)
}

#[test]
fn generated_edges_stay_inside_link_radius() {
    let config = EngineConfig::default();
    for seed in 0..20 {
        let params = GenParams::for_surface(1024.0, 768.0, &config);
        let graph = ambient_graph(&params, &mut SmallRng::seed_from_u64(seed));
        assert_eq!(graph.node_count(), params.node_count());
        for e in graph.edges() {
            let (a, b) = graph.endpoints(e).unwrap();
            assert!(a.distance(b) < params.max_radius, "seed {seed}");
            assert!(e.valid);
            assert_ne!(e.from, e.to);
        }
    }
}

#[test]
fn generated_graphs_have_no_duplicate_pairs() {
    let config = EngineConfig::default();
    for seed in 0..20 {
        let params = GenParams::for_surface(1920.0, 1080.0, &config);
        let graph = ambient_graph(&params, &mut SmallRng::seed_from_u64(seed));
        let mut seen = HashSet::new();
        for e in graph.edges() {
            let key = (e.from.min(e.to), e.from.max(e.to));
            assert!(seen.insert(key), "seed {seed} repeated pair {key:?}");
        }
    }
}

#[test]
fn repeated_clicks_never_duplicate_an_edge() {
    let mut p = started();
    let targets = [source(0), processor(1), sink(2), processor(0), source(2), sink(0)];
    for round in 0..3 {
        for (i, &a) in targets.iter().enumerate() {
            let b = targets[(i + round + 1) % targets.len()];
            link(&mut p, a, b);
        }
    }
    let mut seen = HashSet::new();
    for e in p.graph().edges() {
        assert!(seen.insert((e.from.min(e.to), e.from.max(e.to))));
    }
}

#[test]
fn full_chain_scores_base_then_bonus() {
    let mut p = started();
    let first = link(&mut p, source(0), processor(0));
    assert_eq!(first.points(), 10);
    let second = link(&mut p, processor(0), sink(0));
    assert_eq!(second.points(), 30);
    assert!(matches!(second, ClickOutcome::Connected { chain: true, .. }));
    assert_eq!(p.score(), 40);
}

#[test]
fn processor_to_sink_without_source_is_invalid() {
    let mut p = started();
    let outcome = link(&mut p, processor(1), sink(1));
    match outcome {
        ClickOutcome::Connected { edge, points, chain } => {
            assert!(!edge.valid);
            assert_eq!(points, 0);
            assert!(!chain);
        }
        other => panic!("unexpected outcome {other:?}"),
    }
    assert_eq!(p.score(), 0);
}

#[test]
fn reversed_direction_is_recorded_but_invalid() {
    let mut p = started();
    let outcome = link(&mut p, processor(0), source(0));
    assert!(matches!(outcome, ClickOutcome::Connected { edge, .. } if !edge.valid));
    // the pair is now taken in either direction
    assert!(matches!(
        link(&mut p, source(0), processor(0)),
        ClickOutcome::Duplicate { .. }
    ));
    assert_eq!(p.score(), 0);
}

#[test]
fn countdown_reports_final_score_once() {
    let mut p = started();
    link(&mut p, source(0), processor(0));
    let mut reports = Vec::new();
    for _ in 0..70 {
        if let Some(score) = p.tick() {
            reports.push(score);
        }
    }
    assert_eq!(reports, vec![10]);
    assert_eq!(p.state(), SessionState::Ended);
    assert_eq!(p.remaining_seconds(), 0);
    // clicks after the round are ignored
    assert_eq!(p.click(source(1)), ClickOutcome::Missed);
}

#[test]
fn round_can_be_replayed_after_reset() {
    let mut p = started();
    assert!(p.start(600.0, 400.0).is_err());
    for _ in 0..60 {
        p.tick();
    }
    p.reset().unwrap();
    assert_eq!(p.state(), SessionState::Idle);
    assert!(p.reset().is_err());
    p.start(600.0, 400.0).unwrap();
    assert_eq!(p.score(), 0);
    assert_eq!(p.remaining_seconds(), 60);
    assert_eq!(p.graph().edge_count(), 0);
    assert_eq!(
        p.graph().nodes().filter(|n| n.kind == NodeKind::Sink).count(),
        3
    );
}

#[test]
fn tiers_follow_score_thresholds() {
    assert_eq!(ScoreTier::for_score(0), ScoreTier::Novice);
    assert_eq!(ScoreTier::for_score(49), ScoreTier::Novice);
    assert_eq!(ScoreTier::for_score(50), ScoreTier::Proficient);
    assert_eq!(ScoreTier::for_score(100), ScoreTier::Expert);
}

#[test]
fn ambient_scene_survives_zero_size_resize() {
    let mut scene = AmbientScene::with_rng(EngineConfig::default(), SmallRng::seed_from_u64(3));
    scene.resize(0, 0);
    let mut painter = RecordingPainter::new();
    assert_eq!(scene.draw(&mut painter, 0.5), FrameStats::default());

    scene.resize(800, 600);
    let mut painter = RecordingPainter::new();
    let stats = scene.draw(&mut painter, 0.5);
    assert_eq!(stats.nodes, 19);
    assert_eq!(stats.pulses, stats.edges);
}

#[test]
fn puzzle_scene_draws_board_at_surface_size() {
    let mut scene = PuzzleScene::new(EngineConfig::default());
    scene.resize(900, 600);
    scene.start().unwrap();
    let mut painter = RecordingPainter::new();
    let stats = scene.draw(&mut painter, 0.0);
    assert_eq!(stats.nodes, 9);
    assert_eq!(stats.edges, 0);
    // resizing mid-round keeps the board
    let before: Vec<_> = scene.puzzle().graph().nodes().map(|n| n.pos).collect();
    scene.resize(300, 300);
    let after: Vec<_> = scene.puzzle().graph().nodes().map(|n| n.pos).collect();
    assert_eq!(before, after);
}
