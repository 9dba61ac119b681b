//! Mounting scenes onto page canvases and tearing them down again.
//!
//! A mounted scene owns three scheduling handles: the frame loop, the window
//! resize listener and (for the puzzle) a one-second countdown plus a click
//! listener. `unmount` releases all of them; callbacks that still fire after
//! teardown find the `alive` flag cleared and do nothing.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use gloo_events::EventListener;
use gloo_timers::callback::Interval;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{CanvasRenderingContext2d, Event, EventTarget, HtmlCanvasElement, MouseEvent, window};

use super::canvas::{apply_size, find_canvas, mark_static, measure};
use super::frame::FrameLoop;
use crate::ambient::AmbientScene;
use crate::config::{DriftConfig, EngineConfig, from_json};
use crate::drift::DriftField;
use crate::error::{EngineError, SessionError};
use crate::graph::Point;
use crate::interaction::ClickOutcome;
use crate::scene::Scene;
use crate::session::{PuzzleScene, SessionState};
use crate::viewport::SizeSource;

/// A scene attached to a canvas, redrawn every display frame.
pub struct Mounted<S: Scene + 'static> {
    scene: Rc<RefCell<S>>,
    canvas: HtmlCanvasElement,
    source: SizeSource,
    alive: Rc<Cell<bool>>,
    frame: Option<FrameLoop>,
    listeners: Vec<EventListener>,
}

impl<S: Scene + 'static> Mounted<S> {
    pub fn mount(canvas_id: &str, scene: S, source: SizeSource) -> Result<Self, EngineError> {
        let (canvas, ctx) = find_canvas(canvas_id)?;
        let win = window().ok_or(EngineError::NoWindow)?;
        let scene = Rc::new(RefCell::new(scene));
        let alive = Rc::new(Cell::new(true));

        let (w, h) = measure(&canvas, source);
        apply_size(&canvas, w, h);
        scene.borrow_mut().resize(w, h);

        let resize = {
            let canvas = canvas.clone();
            let scene = scene.clone();
            let alive = alive.clone();
            EventListener::new(&win, "resize", move |_| {
                if !alive.get() {
                    return;
                }
                let (w, h) = measure(&canvas, source);
                apply_size(&canvas, w, h);
                if let Ok(mut s) = scene.try_borrow_mut() {
                    s.resize(w, h);
                }
            })
        };

        let frame = {
            let scene = scene.clone();
            let alive = alive.clone();
            let mut ctx: CanvasRenderingContext2d = ctx;
            FrameLoop::start(move |ts| {
                if !alive.get() {
                    return;
                }
                if let Ok(mut s) = scene.try_borrow_mut() {
                    s.draw(&mut ctx, ts / 1_000.0);
                }
            })?
        };

        tracing::info!(canvas = canvas_id, width = w, height = h, policy = ?S::RESIZE_POLICY, "scene mounted");
        Ok(Self {
            scene,
            canvas,
            source,
            alive,
            frame: Some(frame),
            listeners: vec![resize],
        })
    }

    pub fn scene(&self) -> &Rc<RefCell<S>> {
        &self.scene
    }

    pub fn canvas(&self) -> &HtmlCanvasElement {
        &self.canvas
    }

    /// Re-measure the surface now and hand the size to the scene.
    pub fn fit(&self) {
        let (w, h) = measure(&self.canvas, self.source);
        apply_size(&self.canvas, w, h);
        if let Ok(mut s) = self.scene.try_borrow_mut() {
            s.resize(w, h);
        }
    }

    pub fn is_mounted(&self) -> bool {
        self.alive.get()
    }

    /// Keep an extra listener alive for as long as the scene is mounted.
    pub fn listen(
        &mut self,
        target: &EventTarget,
        event: &'static str,
        callback: impl FnMut(&Event) + 'static,
    ) {
        self.listeners.push(EventListener::new(target, event, callback));
    }

    pub fn unmount(&mut self) {
        if !self.alive.replace(false) {
            return;
        }
        if let Some(mut frame) = self.frame.take() {
            frame.cancel();
        }
        self.listeners.clear();
        tracing::info!(canvas = %self.canvas.id(), "scene unmounted");
    }
}

impl<S: Scene + 'static> Drop for Mounted<S> {
    fn drop(&mut self) {
        self.unmount();
    }
}

// --- Puzzle host ---------------------------------------------------------------

struct PuzzleHost {
    mounted: RefCell<Mounted<PuzzleScene>>,
    countdown: RefCell<Option<Interval>>,
    on_complete: js_sys::Function,
}

/// Browser binding for the puzzle: clicks, countdown and completion callback.
pub struct PuzzleMount {
    host: Rc<PuzzleHost>,
}

impl PuzzleMount {
    pub fn mount(
        canvas_id: &str,
        scene: PuzzleScene,
        on_complete: js_sys::Function,
    ) -> Result<Self, EngineError> {
        let mounted = Mounted::mount(canvas_id, scene, SizeSource::Container)?;
        let host = Rc::new(PuzzleHost {
            mounted: RefCell::new(mounted),
            countdown: RefCell::new(None),
            on_complete,
        });

        let weak = Rc::downgrade(&host);
        let target: EventTarget = host.mounted.borrow().canvas().clone().into();
        host.mounted.borrow_mut().listen(&target, "click", move |event| {
            let Some(host) = weak.upgrade() else {
                return;
            };
            let Some(mouse) = event.dyn_ref::<MouseEvent>() else {
                return;
            };
            let at = Point::new(mouse.offset_x() as f64, mouse.offset_y() as f64);
            host.click(at);
        });
        Ok(Self { host })
    }

    pub fn start(&self) -> Result<(), SessionError> {
        self.host.start()
    }

    pub fn reset(&self) -> Result<(), SessionError> {
        self.host.with_scene(|s| s.reset()).unwrap_or(Ok(()))
    }

    pub fn with_scene<T>(&self, f: impl FnOnce(&mut PuzzleScene) -> T) -> Option<T> {
        self.host.with_scene(f)
    }

    pub fn unmount(&self) {
        self.host.countdown.borrow_mut().take();
        if let Ok(mut m) = self.host.mounted.try_borrow_mut() {
            m.unmount();
        }
    }
}

impl Drop for PuzzleMount {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl PuzzleHost {
    fn alive(&self) -> bool {
        self.mounted
            .try_borrow()
            .map(|m| m.is_mounted())
            .unwrap_or(false)
    }

    fn with_scene<T>(&self, f: impl FnOnce(&mut PuzzleScene) -> T) -> Option<T> {
        if !self.alive() {
            return None;
        }
        let mounted = self.mounted.try_borrow().ok()?;
        let mut scene = mounted.scene().try_borrow_mut().ok()?;
        Some(f(&mut scene))
    }

    fn start(self: &Rc<Self>) -> Result<(), SessionError> {
        // The container may have been hidden (0×0) when mounted or last resized.
        if let Ok(mounted) = self.mounted.try_borrow() {
            if mounted.is_mounted() {
                mounted.fit();
            }
        }
        let Some(result) = self.with_scene(|s| s.start()) else {
            return Ok(()); // torn down
        };
        result?;
        let weak = Rc::downgrade(self);
        let interval = Interval::new(1_000, move || {
            if let Some(host) = weak.upgrade() {
                host.on_second();
            }
        });
        // replaces (and cancels) any countdown left over from an earlier round
        *self.countdown.borrow_mut() = Some(interval);
        Ok(())
    }

    fn on_second(&self) {
        let Some(finished) = self.with_scene(|s| s.tick()).flatten() else {
            return;
        };
        // Round over: release the countdown, then report outside any borrow.
        self.countdown.borrow_mut().take();
        if let Err(err) = self
            .on_complete
            .call1(&JsValue::NULL, &JsValue::from(finished))
        {
            tracing::warn!(?err, "completion callback failed");
        }
    }

    fn click(&self, at: Point) {
        let outcome = self.with_scene(|s| s.click(at));
        if let Some(ClickOutcome::Duplicate { from, to }) = outcome {
            tracing::debug!(from, to, "duplicate connection ignored");
        }
    }
}

// --- JS entrypoints -------------------------------------------------------------

fn mount_failed(canvas_id: &str, err: EngineError) -> JsValue {
    tracing::warn!(canvas = canvas_id, %err, "mount failed, showing static fallback");
    mark_static(canvas_id);
    err.into()
}

/// Ambient circuit background bound to a canvas. Dropping it unmounts.
#[wasm_bindgen]
pub struct AmbientHandle {
    inner: Mounted<AmbientScene>,
}

#[wasm_bindgen]
impl AmbientHandle {
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> usize {
        self.inner
            .scene()
            .try_borrow()
            .map(|s| s.graph().node_count())
            .unwrap_or(0)
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}

/// Mount the ambient circuit background on `canvas_id`, sized to the window.
#[wasm_bindgen(js_name = mountAmbient)]
pub fn mount_ambient(canvas_id: &str, config_json: Option<String>) -> Result<AmbientHandle, JsValue> {
    let config: EngineConfig =
        from_json(config_json.as_deref()).map_err(|e| mount_failed(canvas_id, e))?;
    let inner = Mounted::mount(canvas_id, AmbientScene::new(config), SizeSource::Window)
        .map_err(|e| mount_failed(canvas_id, e))?;
    Ok(AmbientHandle { inner })
}

/// Drifting particle field bound to a canvas.
#[wasm_bindgen]
pub struct DriftHandle {
    inner: Mounted<DriftField>,
}

#[wasm_bindgen]
impl DriftHandle {
    #[wasm_bindgen(js_name = particleCount)]
    pub fn particle_count(&self) -> usize {
        self.inner
            .scene()
            .try_borrow()
            .map(|s| s.particles().len())
            .unwrap_or(0)
    }

    pub fn unmount(&mut self) {
        self.inner.unmount();
    }
}

#[wasm_bindgen(js_name = mountDrift)]
pub fn mount_drift(canvas_id: &str, config_json: Option<String>) -> Result<DriftHandle, JsValue> {
    let config: DriftConfig =
        from_json(config_json.as_deref()).map_err(|e| mount_failed(canvas_id, e))?;
    let inner = Mounted::mount(canvas_id, DriftField::new(config), SizeSource::Window)
        .map_err(|e| mount_failed(canvas_id, e))?;
    Ok(DriftHandle { inner })
}

/// Connect-the-nodes puzzle bound to a canvas, sized to its container.
///
/// `on_complete` is called once per round with the final score when the
/// countdown reaches zero.
#[wasm_bindgen]
pub struct PuzzleHandle {
    inner: PuzzleMount,
}

#[wasm_bindgen]
impl PuzzleHandle {
    #[wasm_bindgen(constructor)]
    pub fn mount(
        canvas_id: &str,
        on_complete: js_sys::Function,
        config_json: Option<String>,
    ) -> Result<PuzzleHandle, JsValue> {
        let config: EngineConfig =
            from_json(config_json.as_deref()).map_err(|e| mount_failed(canvas_id, e))?;
        let inner = PuzzleMount::mount(canvas_id, PuzzleScene::new(config), on_complete)
            .map_err(|e| mount_failed(canvas_id, e))?;
        Ok(PuzzleHandle { inner })
    }

    pub fn start(&self) -> Result<(), JsValue> {
        Ok(self.inner.start()?)
    }

    pub fn reset(&self) -> Result<(), JsValue> {
        Ok(self.inner.reset()?)
    }

    pub fn score(&self) -> u32 {
        self.inner.with_scene(|s| s.puzzle().score()).unwrap_or(0)
    }

    #[wasm_bindgen(js_name = remainingSeconds)]
    pub fn remaining_seconds(&self) -> u32 {
        self.inner
            .with_scene(|s| s.puzzle().remaining_seconds())
            .unwrap_or(0)
    }

    /// "idle", "active" or "ended".
    pub fn state(&self) -> String {
        self.inner
            .with_scene(|s| s.puzzle().state())
            .unwrap_or(SessionState::Ended)
            .as_str()
            .to_string()
    }

    #[wasm_bindgen(js_name = selectedNode)]
    pub fn selected_node(&self) -> Option<u32> {
        self.inner.with_scene(|s| s.puzzle().selected_node()).flatten()
    }

    #[wasm_bindgen(js_name = tierMessage)]
    pub fn tier_message(&self) -> String {
        self.inner
            .with_scene(|s| s.puzzle().tier().message())
            .unwrap_or_default()
            .to_string()
    }

    pub fn unmount(&self) {
        self.inner.unmount();
    }
}
