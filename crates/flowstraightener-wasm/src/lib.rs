#![deny(warnings)]
#![deny(clippy::all)]
#![deny(clippy::pedantic)]
#![deny(clippy::nursery)]
#![deny(missing_docs)]
#![deny(unsafe_code)]
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![deny(clippy::panic)]
#![deny(clippy::indexing_slicing)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! Flow-straightener WASM module: hex-packed hole layout and face preview.

pub mod error;
pub mod geometry;
pub mod layout;

use std::cell::RefCell;

use serde::Serialize;
use wasm_bindgen::prelude::*;

use crate::geometry::{
    saturate_u32, BoundingBox, GeometryBuilder, PreviewGeometry, PreviewKind,
    DEFAULT_CIRCLE_SEGMENTS,
};
use crate::layout::{LayoutParameters, LayoutResult};

/// Layout and preview retained from the last successful [`compute_layout`].
#[derive(Debug, Clone)]
struct Retained {
    layout: LayoutResult,
    preview: PreviewGeometry,
    region_areas: Vec<f64>,
}

thread_local! {
    static LAST_LAYOUT: RefCell<Option<Retained>> = const { RefCell::new(None) };
}

fn store_layout(retained: Retained) {
    LAST_LAYOUT.with(|l| {
        *l.borrow_mut() = Some(retained);
    });
}

/// Metadata returned to JavaScript for a computed layout.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LayoutMeta {
    /// Diameter shared by every hole.
    pub hole_diameter: f64,
    /// Radius shared by every hole.
    pub hole_radius: f64,
    /// Center spacing within a row.
    pub pitch_x: f64,
    /// Center spacing between rows.
    pub pitch_y: f64,
    /// Largest allowed distance from the disk center to a hole center.
    pub max_center_radius: f64,
    /// Number of holes.
    pub hole_count: u32,
    /// Largest number of holes in a single row.
    pub widest_row: u32,
    /// Extrusion depth passed through for the consumer.
    pub part_thickness: f64,
    /// Whether the preview mesh shows the web or only the holes.
    pub preview: PreviewKind,
    /// Bounding box of the preview mesh.
    pub bounds: BoundingBox,
    /// Number of preview vertices.
    pub vertex_count: u32,
    /// Number of preview triangle indices.
    pub index_count: u32,
    /// Number of warnings.
    pub warning_count: u32,
    /// Warning messages.
    pub warnings: Vec<String>,
}

#[cfg(target_arch = "wasm32")]
fn log_warnings(warnings: &[String]) {
    for warning in warnings {
        web_sys::console::warn_1(&JsValue::from_str(warning));
    }
}

#[cfg(not(target_arch = "wasm32"))]
const fn log_warnings(_warnings: &[String]) {}

/// Initialize the WASM module. Sets up the panic hook for debugging.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// Return the input form defaults as a `JsValue`.
///
/// # Errors
///
/// Returns a descriptive error string if serialization fails.
#[wasm_bindgen]
pub fn default_parameters() -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(&LayoutParameters::default())
        .map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Compute a flow-straightener layout from a parameters object.
///
/// Returns `LayoutMeta` as a `JsValue` via `serde-wasm-bindgen`.
/// The layout and its preview are stored internally; retrieve them with
/// [`get_centers`], [`get_positions`], [`get_indices`] and
/// [`get_region_areas`].
///
/// # Errors
///
/// Returns a descriptive error string if the parameters are malformed or the
/// requested geometry is infeasible.
#[wasm_bindgen]
pub fn compute_layout(params: JsValue) -> Result<JsValue, JsValue> {
    let params: LayoutParameters =
        serde_wasm_bindgen::from_value(params).map_err(|e| JsValue::from_str(&e.to_string()))?;
    let meta = compute_layout_internal(&params).map_err(|e| JsValue::from_str(&e))?;

    log_warnings(&meta.warnings);
    serde_wasm_bindgen::to_value(&meta).map_err(|e| JsValue::from_str(&e.to_string()))
}

/// Internal layout logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn compute_layout_internal(params: &LayoutParameters) -> Result<LayoutMeta, String> {
    params.validate_form_range().map_err(|e| e.to_string())?;
    let layout = layout::compute(params).map_err(|e| e.to_string())?;

    let mut builder = GeometryBuilder::new();
    let widest_row = layout.widest_row_len();
    if saturate_u32(widest_row) < params.holes_across {
        builder.warn(format!(
            "widest row holds {widest_row} hole(s); {} requested",
            params.holes_across
        ));
    }

    let preview_kind = geometry::build_preview(
        &mut builder,
        &layout,
        params.disk_diameter,
        DEFAULT_CIRCLE_SEGMENTS,
    )
    .map_err(|e| e.to_string())?;
    let preview = builder.build();
    let region_areas =
        geometry::face_region_areas(&layout, params.disk_diameter, DEFAULT_CIRCLE_SEGMENTS);

    let meta = LayoutMeta {
        hole_diameter: layout.hole_diameter,
        hole_radius: layout.hole_radius(),
        pitch_x: layout.pitch_x,
        pitch_y: layout.pitch_y,
        max_center_radius: layout.max_center_radius,
        hole_count: saturate_u32(layout.centers.len()),
        widest_row: saturate_u32(widest_row),
        part_thickness: params.part_thickness,
        preview: preview_kind,
        bounds: preview.bounds,
        vertex_count: preview.vertex_count,
        index_count: saturate_u32(preview.indices.len()),
        warning_count: saturate_u32(preview.warnings.len()),
        warnings: preview.warnings.clone(),
    };

    store_layout(Retained {
        layout,
        preview,
        region_areas,
    });

    Ok(meta)
}

/// Retrieve the hole centers of the last computed layout.
///
/// Returns a flat `[x0, y0, x1, y1, ...]` array in row-major order.
/// Returns an empty array if no layout has been computed yet.
#[wasm_bindgen]
pub fn get_centers() -> Vec<f64> {
    LAST_LAYOUT.with(|l| {
        l.borrow().as_ref().map_or_else(Vec::new, |r| {
            let mut flat = Vec::with_capacity(r.layout.centers.len() * 2);
            for c in &r.layout.centers {
                flat.push(c.x);
                flat.push(c.y);
            }
            flat
        })
    })
}

/// Retrieve the preview position buffer for the last computed layout.
///
/// Returns a copy of the interleaved `[x0, y0, x1, y1, ...]` positions.
/// Returns an empty array if no layout has been computed yet.
#[wasm_bindgen]
pub fn get_positions() -> Vec<f32> {
    LAST_LAYOUT.with(|l| {
        l.borrow()
            .as_ref()
            .map_or_else(Vec::new, |r| r.preview.positions.clone())
    })
}

/// Retrieve the preview index buffer for the last computed layout.
///
/// Returns a copy of the triangle-list indices.
/// Returns an empty array if no layout has been computed yet.
#[wasm_bindgen]
pub fn get_indices() -> Vec<u32> {
    LAST_LAYOUT.with(|l| {
        l.borrow()
            .as_ref()
            .map_or_else(Vec::new, |r| r.preview.indices.clone())
    })
}

/// Retrieve the drilled-face region areas for the last computed layout.
///
/// One area per hole in center order, followed by the web area.
/// Returns an empty array if no layout has been computed yet.
#[wasm_bindgen]
pub fn get_region_areas() -> Vec<f64> {
    LAST_LAYOUT.with(|l| {
        l.borrow()
            .as_ref()
            .map_or_else(Vec::new, |r| r.region_areas.clone())
    })
}

/// Whether a face region of `area` is a hole cut-out for `hole_radius`.
#[wasm_bindgen]
pub fn is_hole_region(area: f64, hole_radius: f64) -> bool {
    layout::is_hole_region(area, hole_radius)
}

/// Select the hole regions among measured face `areas`.
///
/// Classifies against the hole radius of the last computed layout and
/// returns the indices of the regions to cut.
///
/// # Errors
///
/// Returns a descriptive error string if no layout has been computed or no
/// region is hole-sized.
#[wasm_bindgen]
pub fn select_hole_regions(areas: Vec<f64>) -> Result<Vec<u32>, JsValue> {
    select_hole_regions_internal(&areas).map_err(|e| JsValue::from_str(&e))
}

/// Internal selection logic shared between the wasm export and native tests.
#[doc(hidden)]
pub fn select_hole_regions_internal(areas: &[f64]) -> Result<Vec<u32>, String> {
    LAST_LAYOUT.with(|l| {
        let borrowed = l.borrow();
        let retained = borrowed
            .as_ref()
            .ok_or_else(|| "no layout computed".to_string())?;
        let selected =
            layout::select_hole_regions(&retained.layout, areas).map_err(|e| e.to_string())?;
        Ok(selected.into_iter().map(saturate_u32).collect())
    })
}
