//! Circuit Pulse core crate.
//!
//! Node-graph engines drawn on a 2d canvas: an ambient circuit background, a
//! drifting particle field and a timed connect-the-nodes puzzle. The engines
//! themselves are plain Rust and draw through [`render::Painter`]; the `host`
//! module binds them to page canvases and exposes the JS entrypoints.

use wasm_bindgen::prelude::*;

pub mod ambient;
pub mod config;
pub mod drift;
pub mod error;
pub mod graph;
pub mod host;
pub mod interaction;
pub mod pulse;
pub mod render;
pub mod scene;
pub mod session;
pub mod viewport;

pub use ambient::AmbientScene;
pub use config::{DriftConfig, EngineConfig};
pub use drift::DriftField;
pub use error::{EngineError, SessionError};
pub use graph::{Edge, Graph, Node, NodeId, NodeKind, Point};
pub use host::mount::{AmbientHandle, DriftHandle, PuzzleHandle, mount_ambient, mount_drift};
pub use interaction::{ClickOutcome, Controller, Selection};
pub use scene::Scene;
pub use session::{Puzzle, PuzzleScene, ScoreTier, SessionState};
pub use viewport::{ResizePolicy, Viewport};

// Optional small allocator for size (feature gated)
#[cfg(feature = "wee_alloc")]
#[global_allocator]
static ALLOC: wee_alloc::WeeAlloc = wee_alloc::WeeAlloc::INIT;

#[wasm_bindgen(start)]
pub fn wasm_start() {
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
    init_tracing();
}

/// Route `tracing` events to the browser console and performance timeline.
fn init_tracing() {
    use tracing_subscriber::fmt::format::Pretty;
    use tracing_subscriber::prelude::*;
    use tracing_web::{MakeWebConsoleWriter, performance_layer};

    let fmt_layer = tracing_subscriber::fmt::layer()
        .with_ansi(false)
        .without_time() // no std::time in browsers
        .with_writer(MakeWebConsoleWriter::new());
    let perf_layer = performance_layer().with_details_from_fields(Pretty::default());

    // A host page may load the module more than once; keep the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(fmt_layer)
        .with(perf_layer)
        .try_init();
}
