//! Timed, scored puzzle round.
//!
//! `Puzzle` bundles the session state machine with the round's graph and the
//! interaction controller so that a start, a tick or a click is one atomic
//! update. The host drives `tick` from a one-second timer and forwards the
//! final score returned by the last tick to its completion callback.

use std::fmt;

use crate::config::EngineConfig;
use crate::error::SessionError;
use crate::graph::layout::puzzle_graph;
use crate::graph::{Graph, NodeId, Point};
use crate::interaction::{ClickOutcome, Controller};
use crate::render::{Frame, FrameStats, GraphStyle, Painter, render_graph};
use crate::scene::Scene;
use crate::viewport::{ResizePolicy, Viewport};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    #[default]
    Idle,
    Active,
    Ended,
}

impl SessionState {
    pub fn as_str(self) -> &'static str {
        match self {
            SessionState::Idle => "idle",
            SessionState::Active => "active",
            SessionState::Ended => "ended",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// End-of-round rating shown next to the final score.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScoreTier {
    Novice,
    Proficient,
    Expert,
}

impl ScoreTier {
    pub fn for_score(score: u32) -> Self {
        match score {
            100.. => ScoreTier::Expert,
            50.. => ScoreTier::Proficient,
            _ => ScoreTier::Novice,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            ScoreTier::Expert => "Amazing! You're a natural at AI systems architecture!",
            ScoreTier::Proficient => {
                "Great job! You've demonstrated good understanding of AI connections."
            }
            ScoreTier::Novice => "Good effort! With practice, you'll master AI system design.",
        }
    }
}

pub struct Puzzle {
    config: EngineConfig,
    state: SessionState,
    score: u32,
    remaining: u32,
    graph: Graph,
    controller: Controller,
}

impl Puzzle {
    pub fn new(config: EngineConfig) -> Self {
        let controller = Controller::new(&config);
        Self {
            remaining: config.session_seconds,
            config,
            state: SessionState::Idle,
            score: 0,
            graph: Graph::new(),
            controller,
        }
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn remaining_seconds(&self) -> u32 {
        self.remaining
    }

    pub fn selected_node(&self) -> Option<NodeId> {
        self.controller.selected_node()
    }

    pub fn graph(&self) -> &Graph {
        &self.graph
    }

    /// Begin a round laid out for a `width` × `height` surface. Valid from
    /// `Idle` or `Ended`.
    pub fn start(&mut self, width: f64, height: f64) -> Result<(), SessionError> {
        if self.state == SessionState::Active {
            return Err(self.reject("start"));
        }
        self.graph = puzzle_graph(width, height, self.config.nodes_per_column);
        self.controller.reset(&mut self.graph);
        self.score = 0;
        self.remaining = self.config.session_seconds;
        self.state = SessionState::Active;
        tracing::info!(
            nodes = self.graph.node_count(),
            seconds = self.remaining,
            "puzzle round started"
        );
        Ok(())
    }

    /// One timer second. Returns the final score exactly once, on the tick that
    /// ends the round; `None` otherwise (including outside `Active`).
    pub fn tick(&mut self) -> Option<u32> {
        if self.state != SessionState::Active {
            return None;
        }
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining > 0 {
            return None;
        }
        self.state = SessionState::Ended;
        self.controller.reset(&mut self.graph);
        tracing::info!(score = self.score, "puzzle round ended");
        Some(self.score)
    }

    /// Forward a click; ignored unless a round is running.
    pub fn click(&mut self, at: Point) -> ClickOutcome {
        if self.state != SessionState::Active {
            return ClickOutcome::Missed;
        }
        let outcome = self.controller.click(&mut self.graph, at);
        self.score += outcome.points();
        if let ClickOutcome::Connected { edge, points, chain } = outcome {
            tracing::debug!(
                from = edge.from,
                to = edge.to,
                valid = edge.valid,
                points,
                chain,
                "connection attempt"
            );
        }
        outcome
    }

    /// Return from `Ended` to `Idle`, dropping the finished round's graph.
    pub fn reset(&mut self) -> Result<(), SessionError> {
        if self.state != SessionState::Ended {
            return Err(self.reject("reset"));
        }
        self.state = SessionState::Idle;
        self.score = 0;
        self.remaining = self.config.session_seconds;
        self.graph = Graph::new();
        self.controller.reset(&mut self.graph);
        Ok(())
    }

    fn reject(&self, action: &'static str) -> SessionError {
        tracing::debug!(state = %self.state, action, "session transition rejected");
        SessionError::InvalidTransition {
            from: self.state,
            action,
        }
    }

    pub fn tier(&self) -> ScoreTier {
        ScoreTier::for_score(self.score)
    }
}

/// A puzzle bound to a drawing surface. Resizing mid-round keeps the layout;
/// the next `start` lays the board out for the current size.
pub struct PuzzleScene {
    puzzle: Puzzle,
    viewport: Viewport,
    style: GraphStyle,
}

impl PuzzleScene {
    pub fn new(config: EngineConfig) -> Self {
        Self {
            puzzle: Puzzle::new(config),
            viewport: Viewport::default(),
            style: GraphStyle::interactive(),
        }
    }

    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    pub fn viewport(&self) -> Viewport {
        self.viewport
    }

    pub fn start(&mut self) -> Result<(), SessionError> {
        let (w, h) = self.viewport.size_f64();
        self.puzzle.start(w, h)
    }

    pub fn reset(&mut self) -> Result<(), SessionError> {
        self.puzzle.reset()
    }

    pub fn tick(&mut self) -> Option<u32> {
        self.puzzle.tick()
    }

    pub fn click(&mut self, at: Point) -> ClickOutcome {
        self.puzzle.click(at)
    }
}

impl Scene for PuzzleScene {
    const RESIZE_POLICY: ResizePolicy = ResizePolicy::KeepLayout;

    fn resize(&mut self, width: u32, height: u32) {
        self.viewport.resize(width, height);
    }

    fn draw<P: Painter>(&mut self, painter: &mut P, time_s: f64) -> FrameStats {
        let (width, height) = self.viewport.size_f64();
        let frame = Frame { width, height, time_s };
        let speed = self.puzzle.config.pulse_speed;
        render_graph(painter, &self.puzzle.graph, &self.style, frame, speed)
    }
}
