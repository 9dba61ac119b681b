use std::cell::{Cell, RefCell};
use std::rc::Rc;

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::window;

use crate::error::EngineError;

type FrameCallback = Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>>;

/// Self-rescheduling `requestAnimationFrame` task.
///
/// The callback re-requests a frame after every tick until `cancel` is called
/// (or the loop is dropped), which cancels the pending frame and releases the
/// closure. The closure only holds a weak reference to itself, so nothing
/// outlives the `FrameLoop`.
pub struct FrameLoop {
    callback: FrameCallback,
    pending: Rc<Cell<Option<i32>>>,
    running: Rc<Cell<bool>>,
}

impl FrameLoop {
    /// Start calling `tick` with the frame timestamp (ms) once per display frame.
    pub fn start(mut tick: impl FnMut(f64) + 'static) -> Result<Self, EngineError> {
        let win = window().ok_or(EngineError::NoWindow)?;
        let callback: FrameCallback = Rc::new(RefCell::new(None));
        let pending = Rc::new(Cell::new(None));
        let running = Rc::new(Cell::new(true));

        let weak = Rc::downgrade(&callback);
        let pending_in = pending.clone();
        let running_in = running.clone();
        *callback.borrow_mut() = Some(Closure::wrap(Box::new(move |ts: f64| {
            pending_in.set(None);
            if !running_in.get() {
                return;
            }
            tick(ts);
            let (Some(cb), Some(w)) = (weak.upgrade(), window()) else {
                return;
            };
            if let Some(closure) = cb.borrow().as_ref() {
                if let Ok(id) = w.request_animation_frame(closure.as_ref().unchecked_ref()) {
                    pending_in.set(Some(id));
                }
            }
        }) as Box<dyn FnMut(f64)>));

        if let Some(closure) = callback.borrow().as_ref() {
            let id = win.request_animation_frame(closure.as_ref().unchecked_ref())?;
            pending.set(Some(id));
        }
        Ok(Self {
            callback,
            pending,
            running,
        })
    }

    /// Stop the loop. Safe to call more than once.
    pub fn cancel(&mut self) {
        self.running.set(false);
        if let (Some(id), Some(w)) = (self.pending.take(), window()) {
            let _ = w.cancel_animation_frame(id);
        }
        self.callback.borrow_mut().take();
    }
}

impl Drop for FrameLoop {
    fn drop(&mut self) {
        self.cancel();
    }
}
