//! Browser adapters for the theme runtime.
//!
//! SYSTEM CONTEXT
//! ==============
//! The `theme` crate owns preference resolution, the bus, and toggle
//! reconciliation. This module binds its traits to the browser:
//! `localStorage` for the durable preference, `matchMedia` for the ambient
//! color scheme, a class on `<html>` as the projection, and the microtask
//! queue for deferred verification. It also renders the inline pre-paint
//! script that the server puts in the document head.
//!
//! TRADE-OFFS
//! ==========
//! Adapters hold no JS handles and look the window up on every call, which
//! keeps them `Send + Sync` for Leptos context at the cost of a lookup per
//! access. Without `hydrate` every browser call degrades to a no-op or an
//! unavailable-storage error so SSR rendering stays deterministic.

use std::sync::Arc;

use theme::{
    HandlerError, PreferenceBackend, Scheduler, StorageError, Subscription, SystemScheme, Task, ThemeChange,
    ThemeConfig, ThemeProjection, ThemeRuntime,
};

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

/// Media query for the ambient dark color scheme.
pub const PREFERS_DARK_QUERY: &str = "(prefers-color-scheme: dark)";

// =============================================================================
// ADAPTERS
// =============================================================================

/// `window.localStorage` preference backend.
#[derive(Clone, Copy, Debug, Default)]
pub struct LocalStorageBackend;

impl PreferenceBackend for LocalStorageBackend {
    fn load(&self, key: &str) -> Result<Option<String>, StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .get_item(key)
                .map_err(|err| StorageError::Unavailable(js_reason(&err)))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::Unavailable(format!("no browser storage to read {key}")))
        }
    }

    fn save(&self, key: &str, value: &str) -> Result<(), StorageError> {
        #[cfg(feature = "hydrate")]
        {
            local_storage()?
                .set_item(key, value)
                .map_err(|err| StorageError::WriteRejected { key: key.to_owned(), reason: js_reason(&err) })
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(StorageError::WriteRejected { key: key.to_owned(), reason: format!("no browser storage for {value}") })
        }
    }
}

/// Ambient color scheme read from `matchMedia`.
#[derive(Clone, Copy, Debug, Default)]
pub struct MediaQueryScheme;

impl SystemScheme for MediaQueryScheme {
    fn prefers_dark(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            web_sys::window()
                .and_then(|w| w.match_media(PREFERS_DARK_QUERY).ok().flatten())
                .is_some_and(|mq| mq.matches())
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }
}

/// Class marker on the document root element.
#[derive(Clone, Debug)]
pub struct DocumentRootProjection {
    class: String,
}

impl DocumentRootProjection {
    pub fn new(class: impl Into<String>) -> Self {
        Self { class: class.into() }
    }

    #[must_use]
    pub fn class(&self) -> &str {
        &self.class
    }
}

impl ThemeProjection for DocumentRootProjection {
    fn is_dark(&self) -> bool {
        #[cfg(feature = "hydrate")]
        {
            document_root().is_some_and(|root| root.class_list().contains(&self.class))
        }
        #[cfg(not(feature = "hydrate"))]
        {
            false
        }
    }

    fn set_dark(&self, dark: bool) {
        #[cfg(feature = "hydrate")]
        {
            let Some(root) = document_root() else {
                log::warn!("no document root; cannot mark theme");
                return;
            };
            let classes = root.class_list();
            let result = if dark { classes.add_1(&self.class) } else { classes.remove_1(&self.class) };
            if let Err(err) = result {
                log::warn!("failed to update root class {}: {}", self.class, js_reason(&err));
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            log::trace!("root class {} -> {dark} skipped outside the browser", self.class);
        }
    }
}

/// Runs deferred work on the browser microtask queue.
///
/// Outside the browser there is no event loop to defer onto, so tasks run
/// inline.
#[derive(Clone, Copy, Debug, Default)]
pub struct MicrotaskScheduler;

impl Scheduler for MicrotaskScheduler {
    fn defer(&self, task: Task) {
        #[cfg(feature = "hydrate")]
        {
            leptos::task::spawn_local(async move { task() });
        }
        #[cfg(not(feature = "hydrate"))]
        {
            task();
        }
    }
}

// =============================================================================
// RUNTIME
// =============================================================================

/// Start the session's theme runtime.
///
/// In the browser this wires every adapter, bridges the bus to a window
/// event, and installs the root-class and color-scheme observers. Elsewhere
/// it returns an in-memory runtime.
pub fn start_runtime(config: ThemeConfig) -> ThemeRuntime {
    #[cfg(feature = "hydrate")]
    {
        let projection = DocumentRootProjection::new(config.dark_class.clone());
        let runtime = ThemeRuntime::builder(config)
            .backend(Arc::new(LocalStorageBackend))
            .system(Arc::new(MediaQueryScheme))
            .projection(Arc::new(projection))
            .scheduler(Arc::new(MicrotaskScheduler))
            .start();
        install_event_bridge(&runtime);
        observe_root_class(runtime.clone());
        observe_system_scheme(runtime.clone());
        runtime
    }
    #[cfg(not(feature = "hydrate"))]
    {
        ThemeRuntime::builder(config).scheduler(Arc::new(MicrotaskScheduler)).start()
    }
}

/// Re-broadcast every bus change as a window `CustomEvent`.
///
/// The event is named by `change_event` and carries the serialized
/// [`ThemeChange`] as its `detail`, for scripts outside the Leptos tree.
pub fn install_event_bridge(runtime: &ThemeRuntime) -> Subscription {
    let event_name = runtime.config().change_event.clone();
    runtime.bus().subscribe(move |change: &ThemeChange| {
        let detail = event_detail(change).map_err(|err| HandlerError::Rejected(err.to_string()))?;
        dispatch_change(&event_name, &detail)
    })
}

/// JSON payload for the broadcast event.
///
/// # Errors
///
/// Returns the serializer error if the change cannot be encoded.
pub fn event_detail(change: &ThemeChange) -> Result<String, serde_json::Error> {
    serde_json::to_string(change)
}

fn dispatch_change(event_name: &str, detail: &str) -> Result<(), HandlerError> {
    #[cfg(feature = "hydrate")]
    {
        let window = web_sys::window().ok_or(HandlerError::Detached)?;
        let init = web_sys::CustomEventInit::new();
        let value = js_sys::JSON::parse(detail).map_err(|err| HandlerError::Rejected(js_reason(&err)))?;
        init.set_detail(&value);
        let event = web_sys::CustomEvent::new_with_event_init_dict(event_name, &init)
            .map_err(|err| HandlerError::Rejected(js_reason(&err)))?;
        window.dispatch_event(&event).map_err(|err| HandlerError::Rejected(js_reason(&err)))?;
        Ok(())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        log::trace!("{event_name} {detail}");
        Ok(())
    }
}

#[cfg(feature = "hydrate")]
fn observe_root_class(runtime: ThemeRuntime) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(root) = document_root() else {
        return;
    };
    let callback = Closure::<dyn FnMut(js_sys::Array, web_sys::MutationObserver)>::new(move |_records, _observer| {
        if runtime.reconcile() {
            log::debug!("root class changed outside the toggle; republished");
        }
    });
    match web_sys::MutationObserver::new(callback.as_ref().unchecked_ref()) {
        Ok(observer) => {
            let init = web_sys::MutationObserverInit::new();
            init.set_attributes(true);
            init.set_attribute_filter(&js_sys::Array::of1(&wasm_bindgen::JsValue::from_str("class")));
            if let Err(err) = observer.observe_with_options(&root, &init) {
                log::warn!("root class observer not attached: {}", js_reason(&err));
            }
        }
        Err(err) => log::warn!("MutationObserver unavailable: {}", js_reason(&err)),
    }
    callback.forget();
}

#[cfg(feature = "hydrate")]
fn observe_system_scheme(runtime: ThemeRuntime) {
    use wasm_bindgen::JsCast;
    use wasm_bindgen::closure::Closure;

    let Some(query) = web_sys::window().and_then(|w| w.match_media(PREFERS_DARK_QUERY).ok().flatten()) else {
        return;
    };
    let callback = Closure::<dyn FnMut(web_sys::Event)>::new(move |_event| {
        if runtime.system_scheme_changed() {
            log::debug!("followed system color scheme change");
        }
    });
    if let Err(err) = query.add_event_listener_with_callback("change", callback.as_ref().unchecked_ref()) {
        log::warn!("color scheme listener not attached: {}", js_reason(&err));
    }
    callback.forget();
}

#[cfg(feature = "hydrate")]
fn local_storage() -> Result<web_sys::Storage, StorageError> {
    let window = web_sys::window().ok_or_else(|| StorageError::Unavailable("no window".to_owned()))?;
    match window.local_storage() {
        Ok(Some(storage)) => Ok(storage),
        Ok(None) => Err(StorageError::Unavailable("localStorage disabled".to_owned())),
        Err(err) => Err(StorageError::Unavailable(js_reason(&err))),
    }
}

#[cfg(feature = "hydrate")]
fn document_root() -> Option<web_sys::Element> {
    web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element())
}

#[cfg(feature = "hydrate")]
fn js_reason(err: &wasm_bindgen::JsValue) -> String {
    err.as_string().unwrap_or_else(|| format!("{err:?}"))
}

// =============================================================================
// PRE-PAINT SCRIPT
// =============================================================================

/// Inline script that marks the root before first paint.
///
/// Mirrors the runtime's decoding: a stored `"true"` is dark, any other
/// non-empty value is light, and an absent or empty value defers to the
/// ambient scheme. Storage access that throws falls back to the ambient
/// scheme; if that also throws the page stays light.
pub fn pre_paint_script(config: &ThemeConfig) -> String {
    let key = js_literal(&config.storage_key);
    let class = js_literal(&config.dark_class);
    let query = js_literal(PREFERS_DARK_QUERY);
    format!(
        "(function(){{\
var ambient=function(){{try{{return window.matchMedia({query}).matches;}}catch(e){{return false;}}}};\
var dark;\
try{{var stored=window.localStorage.getItem({key});dark=stored===\"true\"||(!stored&&ambient());}}\
catch(e){{dark=ambient();}}\
if(dark){{document.documentElement.classList.add({class});}}\
}})();"
    )
}

/// JSON string literal that is also safe inside a `<script>` element.
fn js_literal(value: &str) -> String {
    match serde_json::to_string(value) {
        Ok(literal) => literal.replace("</", "<\\/"),
        Err(err) => {
            log::warn!("pre-paint literal fell back to empty: {err}");
            "\"\"".to_owned()
        }
    }
}
