//! Browser bridge. One scene per page, driven by the JavaScript renderer:
//!
//! ```text
//! voyage_init(config, catalog, manifest)   once, throws on a bad catalog/config
//! voyage_scroll(px) / voyage_set_progress  on every scroll event
//! voyage_tick(dt)                           every requestAnimationFrame
//! voyage_frame_ptr / voyage_frame_len       read the frame buffer
//! voyage_teardown()                         on page exit
//! ```

pub mod runner;

use std::cell::RefCell;

use wasm_bindgen::prelude::*;

pub use runner::SceneRunner;

thread_local! {
    static RUNNER: RefCell<Option<SceneRunner>> = const { RefCell::new(None) };
}

/// Run `f` against the live runner. `None` before init.
fn with_runner<R>(f: impl FnOnce(&mut SceneRunner) -> R) -> Option<R> {
    RUNNER.with(|cell| cell.borrow_mut().as_mut().map(f))
}

/// Suppress or restore document scrolling while the overhead view is shown.
fn apply_scroll_lock(locked: bool) {
    let Some(body) = web_sys::window()
        .and_then(|w| w.document())
        .and_then(|d| d.body())
    else {
        return;
    };
    let style = body.style();
    let result = if locked {
        style.set_property("overflow", "hidden")
    } else {
        style.remove_property("overflow").map(|_| ())
    };
    if result.is_err() {
        log::warn!("could not update document scroll lock");
    }
}

fn sync_scroll_lock() {
    if let Some(Some(locked)) = with_runner(|r| r.take_lock_change()) {
        apply_scroll_lock(locked);
    }
}

/// Build the scene. Empty strings select the defaults (built-in catalog, no
/// textures). A malformed catalog or config is thrown as a JS error.
#[wasm_bindgen]
pub fn voyage_init(config_json: &str, catalog_json: &str, manifest_json: &str) -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    let _ = console_log::init_with_level(log::Level::Info);

    // Tear down any previous scene first so its lock is released.
    voyage_teardown();

    let seed = (js_sys::Math::random() * u32::MAX as f64) as u64;
    let runner = SceneRunner::new(config_json, catalog_json, manifest_json, Some(seed))
        .map_err(|e| JsValue::from(js_sys::Error::new(&e.to_string())))?;

    RUNNER.with(|cell| {
        *cell.borrow_mut() = Some(runner);
    });
    log::info!("voyage: initialized");
    Ok(())
}

/// Advance one frame. Returns false before init and after teardown.
#[wasm_bindgen]
pub fn voyage_tick(dt: f32) -> bool {
    let ticked = with_runner(|r| r.tick(dt)).unwrap_or(false);
    sync_scroll_lock();
    ticked
}

/// Raw document scroll offset in px.
#[wasm_bindgen]
pub fn voyage_scroll(offset: f32) -> bool {
    with_runner(|r| r.set_scroll_offset(offset)).unwrap_or(false)
}

#[wasm_bindgen]
pub fn voyage_set_progress(progress: f32) -> bool {
    with_runner(|r| r.set_progress(progress)).unwrap_or(false)
}

/// Returns the new view mode code (0 = scroll, 1 = overhead).
#[wasm_bindgen]
pub fn voyage_toggle_view() -> f32 {
    let code = with_runner(|r| r.toggle_view()).unwrap_or(0.0);
    sync_scroll_lock();
    code
}

#[wasm_bindgen]
pub fn voyage_set_view(code: f32) -> f32 {
    let code = with_runner(|r| r.set_view(code)).unwrap_or(0.0);
    sync_scroll_lock();
    code
}

/// Release the scroll binding and restore scrolling. Safe to call repeatedly.
#[wasm_bindgen]
pub fn voyage_teardown() -> bool {
    let done = with_runner(|r| r.teardown()).unwrap_or(false);
    sync_scroll_lock();
    done
}

// ---- Data accessors ----

#[wasm_bindgen]
pub fn voyage_frame_ptr() -> *const f32 {
    with_runner(|r| r.frame_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn voyage_frame_len() -> u32 {
    with_runner(|r| r.frame_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn voyage_stars_ptr() -> *const f32 {
    with_runner(|r| r.stars_ptr()).unwrap_or(std::ptr::null())
}

#[wasm_bindgen]
pub fn voyage_stars_len() -> u32 {
    with_runner(|r| r.stars_len()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn voyage_star_count() -> u32 {
    with_runner(|r| r.star_count()).unwrap_or(0)
}

// ---- Texture load list ----

#[wasm_bindgen]
pub fn voyage_texture_count() -> u32 {
    with_runner(|r| r.texture_count()).unwrap_or(0)
}

#[wasm_bindgen]
pub fn voyage_texture_path(handle: u32) -> Option<String> {
    with_runner(|r| r.texture_path(handle)).flatten()
}

#[wasm_bindgen]
pub fn voyage_texture_kind(handle: u32) -> Option<u32> {
    with_runner(|r| r.texture_kind(handle)).flatten()
}
