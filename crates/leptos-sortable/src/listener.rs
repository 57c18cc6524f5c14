//! Scoped DOM event listeners
//!
//! A `ListenerGuard` registers a callback on an `EventTarget` and removes
//! it again when dropped.

use log::trace;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;

pub struct ListenerGuard {
    target: web_sys::EventTarget,
    event: &'static str,
    callback: Closure<dyn FnMut(web_sys::Event)>,
}

impl ListenerGuard {
    /// Listen for `event` on `target`. Events that are not an `E` are skipped.
    /// Returns `None` if the browser refused the registration.
    pub fn new<E, F>(target: &web_sys::EventTarget, event: &'static str, mut handler: F) -> Option<Self>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |ev: web_sys::Event| {
            if let Ok(ev) = ev.dyn_into::<E>() {
                handler(ev);
            }
        });
        target
            .add_event_listener_with_callback(event, callback.as_ref().unchecked_ref())
            .ok()?;
        Some(Self {
            target: target.clone(),
            event,
            callback,
        })
    }

    /// Listen on the current document
    pub fn on_document<E, F>(event: &'static str, handler: F) -> Option<Self>
    where
        E: JsCast + 'static,
        F: FnMut(E) + 'static,
    {
        let doc = web_sys::window()?.document()?;
        Self::new(&doc, event, handler)
    }
}

impl Drop for ListenerGuard {
    fn drop(&mut self) {
        if let Err(err) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            trace!("[SORT] could not remove {} listener: {:?}", self.event, err);
        }
    }
}
