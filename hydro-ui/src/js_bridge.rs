//! Typed wrappers around JS interop via `js_sys::eval()`.
//!
//! Plotly, Leaflet (with markercluster) and flatpickr are loaded from their
//! CDNs at startup. `assets/js/dashboard.js` holds the glue and exposes
//! `window.hydro`. Calls made before the libraries and containers are ready
//! are queued and replayed in order.
//!
//! Values cross the boundary as JSON literals, which are valid JS
//! expressions, so nothing needs quoting by hand.

use serde::Serialize;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsValue;

static DASHBOARD_JS: &str = include_str!("../assets/js/dashboard.js");

const SCRIPTS: [&str; 4] = [
    "https://cdn.plot.ly/plotly-2.35.2.min.js",
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js",
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/leaflet.markercluster.js",
    "https://cdn.jsdelivr.net/npm/flatpickr",
];

const STYLES: [&str; 4] = [
    "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css",
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.css",
    "https://unpkg.com/leaflet.markercluster@1.5.3/dist/MarkerCluster.Default.css",
    "https://cdn.jsdelivr.net/npm/flatpickr/dist/flatpickr.min.css",
];

/// Execute arbitrary JS, wrapping in try/catch to avoid panics.
pub fn call_js(code: &str) {
    let wrapped = format!(
        "try {{ {} }} catch(e) {{ console.warn('[hydro] JS call failed:', e); }}",
        code
    );
    let _ = js_sys::eval(&wrapped);
}

/// Run `code` now if the glue is loaded, otherwise once it is.
pub fn call_when_ready(code: &str) {
    call_js(&format!(
        r#"
        if (window.__hydroReady) {{
            {code}
        }} else {{
            (window.__hydroQueue = window.__hydroQueue || []).push(function() {{ {code} }});
        }}
        "#
    ));
}

/// JSON literal for `value`, or `null` if it cannot be serialized.
pub fn js_literal<T: Serialize + ?Sized>(value: &T) -> String {
    match serde_json::to_string(value) {
        Ok(json) => json,
        Err(e) => {
            log::error!("Failed to serialize value for JS: {e}");
            "null".to_string()
        }
    }
}

/// Load the libraries and the glue. Call once at app startup.
///
/// The queue is flushed once every library is defined and every element in
/// `container_ids` is in the DOM.
pub fn init_dashboard(container_ids: &[&str]) {
    let loaders: String = SCRIPTS
        .iter()
        .map(|src| format!("hydroEnsureScript({});", js_literal(src)))
        .chain(
            STYLES
                .iter()
                .map(|href| format!("hydroEnsureStyle({});", js_literal(href))),
        )
        .collect();

    // The glue only touches the libraries when called, so it can be
    // evaluated before they arrive.
    let _ = js_sys::eval(DASHBOARD_JS);
    call_js(&loaders);

    let ids = js_literal(container_ids);
    let init_js = format!(
        r#"
        (function() {{
            var ids = {ids};
            var waitForLibs = setInterval(function() {{
                if (typeof Plotly === 'undefined' ||
                    typeof L === 'undefined' ||
                    typeof flatpickr === 'undefined' ||
                    !ids.every(function(id) {{ return document.getElementById(id); }})) {{
                    return;
                }}
                clearInterval(waitForLibs);
                window.__hydroReady = true;
                var queue = window.__hydroQueue || [];
                window.__hydroQueue = [];
                queue.forEach(function(call) {{
                    try {{ call(); }} catch(e) {{ console.error('[hydro] queued call failed:', e); }}
                }});
                console.log('[hydro] dashboard widgets initialized');
            }}, 100);
        }})();
        "#
    );
    let _ = js_sys::eval(&init_js);
}

pub fn plot(container_id: &str, traces_json: &str, layout_json: &str) {
    call_when_ready(&format!(
        "window.hydro.plot({}, {traces_json}, {layout_json});",
        js_literal(container_id)
    ));
}

/// Create the map in `container_id` if needed and move it to the view.
pub fn set_map_view(container_id: &str, lat: f64, lon: f64, zoom: u8) {
    call_when_ready(&format!(
        "window.hydro.initMap({}, {lat}, {lon}, {zoom}); window.hydro.setView({lat}, {lon}, {zoom});",
        js_literal(container_id)
    ));
}

pub fn add_stations(collection_json: &str, style_json: &str) {
    call_when_ready(&format!(
        "window.hydro.addStations({collection_json}, {style_json});"
    ));
}

pub fn style_marker(station_id: &str, style_json: &str) {
    call_when_ready(&format!(
        "window.hydro.styleMarker({}, {style_json});",
        js_literal(station_id)
    ));
}

pub fn init_range_picker(input_id: &str) {
    call_when_ready(&format!(
        "window.hydro.initPicker({});",
        js_literal(input_id)
    ));
}

pub fn set_picker_bounds(range_json: &str) {
    call_when_ready(&format!("window.hydro.setPickerBounds({range_json});"));
}

pub fn clear_picker() {
    call_when_ready("window.hydro.clearPicker();");
}

fn install_callback(name: &str, callback: &JsValue) {
    let Some(window) = web_sys::window() else {
        log::error!("No window to install {name} on");
        return;
    };
    if let Err(e) = js_sys::Reflect::set(window.as_ref(), &JsValue::from_str(name), callback) {
        log::error!("Failed to install {name}: {e:?}");
    }
}

/// Call `callback` with the station id whenever a marker is clicked.
pub fn on_marker_click(callback: impl Fn(String) + 'static) {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn Fn(String)>);
    install_callback("__hydroMarkerClick", closure.as_ref());
    closure.forget();
}

/// Call `callback` with both picked dates (`YYYY-MM-DD`) whenever the
/// range picker has a complete range.
pub fn on_range_change(callback: impl Fn(String, String) + 'static) {
    let closure = Closure::wrap(Box::new(callback) as Box<dyn Fn(String, String)>);
    install_callback("__hydroRangeChange", closure.as_ref());
    closure.forget();
}
