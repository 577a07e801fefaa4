//! Drilled-face preview: circle outlines, region areas and web triangulation.
//!
//! Hole outlines are inscribed polygons rotated half a segment off the x
//! axis; the disk outline is a circumscribed polygon. With that placement no
//! hole vertex lands on a neighbouring hole or on the disk edge, even with a
//! zero ligament or a zero perimeter ring, so every ring passed to `earclip`
//! is disjoint from the others.
//!
//! Earcut bridges every hole into the outer ring, which grows much faster
//! than the hole count. Above [`WEB_PREVIEW_HOLE_BUDGET`] holes the preview
//! falls back to fan-triangulated hole outlines.

use std::f64::consts::{PI, TAU};

use serde::Serialize;

use crate::error::GeometryError;
use crate::layout::LayoutResult;

use super::types::{GeometryBuilder, Point};

/// Segment count used for circle outlines when the caller has no preference.
pub const DEFAULT_CIRCLE_SEGMENTS: u32 = 64;

/// Segment count for hole outlines in the hole-only preview.
pub const HOLE_PREVIEW_SEGMENTS: u32 = 16;

/// Largest hole count for which the web is triangulated as one polygon.
pub const WEB_PREVIEW_HOLE_BUDGET: usize = 256;

const MIN_CIRCLE_SEGMENTS: u32 = 8;
const COVERAGE_TOLERANCE: f64 = 1e-6;

/// What the preview mesh covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum PreviewKind {
    /// Solid material between the disk edge and the holes.
    Web,
    /// The hole cut-outs only.
    Holes,
}

/// Inscribed polygon of a hole, vertices offset half a segment from the x axis.
///
/// Points run counter-clockwise as an open ring.
pub fn hole_outline(center: Point, radius: f64, segments: u32) -> Vec<Point> {
    ring_points(center, radius, segments)
}

/// Circumscribed polygon of the disk, centered on the origin.
///
/// Every edge touches the true disk circle, so the polygon contains every
/// inscribed hole outline.
pub fn disk_outline(disk_diameter: f64, segments: u32) -> Vec<Point> {
    let segments = segments.max(MIN_CIRCLE_SEGMENTS);
    let radius = disk_diameter / 2.0 / (PI / f64::from(segments)).cos();
    ring_points(Point::new(0.0, 0.0), radius, segments)
}

fn ring_points(center: Point, radius: f64, segments: u32) -> Vec<Point> {
    let segments = segments.max(MIN_CIRCLE_SEGMENTS);
    (0..segments)
        .map(|i| {
            let angle = TAU * (f64::from(i) + 0.5) / f64::from(segments);
            Point::new(
                radius.mul_add(angle.cos(), center.x),
                radius.mul_add(angle.sin(), center.y),
            )
        })
        .collect()
}

/// Absolute area of a simple polygon given as an open ring.
pub fn polygon_area(points: &[Point]) -> f64 {
    let Some(&last) = points.last() else {
        return 0.0;
    };
    let mut prev = last;
    let mut twice_area = 0.0;
    for &p in points {
        twice_area += prev.x.mul_add(p.y, -(p.x * prev.y));
        prev = p;
    }
    (twice_area / 2.0).abs()
}

/// Areas of the regions the hole outlines split the disk face into.
///
/// One entry per hole, in center order, followed by the web area.
pub fn face_region_areas(layout: &LayoutResult, disk_diameter: f64, segments: u32) -> Vec<f64> {
    let hole_area = polygon_area(&hole_outline(
        Point::new(0.0, 0.0),
        layout.hole_radius(),
        segments,
    ));
    let mut areas = vec![hole_area; layout.centers.len()];

    let disk_area = polygon_area(&disk_outline(disk_diameter, segments));
    #[allow(clippy::cast_precision_loss)]
    let web_area = (layout.centers.len() as f64).mul_add(-hole_area, disk_area);
    areas.push(web_area);
    areas
}

/// Builds the preview mesh for `layout`, choosing the web or hole-only form
/// by hole count.
///
/// # Errors
///
/// Propagates errors from [`triangulate_face`].
pub fn build_preview(
    builder: &mut GeometryBuilder,
    layout: &LayoutResult,
    disk_diameter: f64,
    segments: u32,
) -> Result<PreviewKind, GeometryError> {
    let hole_count = layout.centers.len();
    if hole_count > WEB_PREVIEW_HOLE_BUDGET {
        builder.warn(format!(
            "{hole_count} holes exceed the web preview budget of {WEB_PREVIEW_HOLE_BUDGET}; \
             previewing hole outlines only"
        ));
        triangulate_holes(builder, layout, HOLE_PREVIEW_SEGMENTS);
        return Ok(PreviewKind::Holes);
    }

    triangulate_face(builder, layout, disk_diameter, segments)?;
    Ok(PreviewKind::Web)
}

/// Fan-triangulates every hole outline.
pub fn triangulate_holes(builder: &mut GeometryBuilder, layout: &LayoutResult, segments: u32) {
    warn_low_segments(builder, segments);
    let hole_radius = layout.hole_radius();
    for &center in &layout.centers {
        builder.push_polygon_fan(&hole_outline(center, hole_radius, segments));
    }
}

/// Triangulates the web between the disk outline and the hole outlines.
///
/// Triangles are only emitted when their total area matches the web area;
/// otherwise the face is skipped with a warning.
///
/// # Errors
///
/// Returns [`GeometryError::DegenerateGeometry`] if the disk diameter is not
/// positive, or [`GeometryError::RegionError`] if vertex index arithmetic
/// overflows. An empty triangulation is reported as a warning.
pub fn triangulate_face(
    builder: &mut GeometryBuilder,
    layout: &LayoutResult,
    disk_diameter: f64,
    segments: u32,
) -> Result<(), GeometryError> {
    if !(disk_diameter.is_finite() && disk_diameter > 0.0) {
        return Err(GeometryError::DegenerateGeometry(format!(
            "disk diameter {disk_diameter} cannot be tessellated"
        )));
    }
    warn_low_segments(builder, segments);

    let outer = disk_outline(disk_diameter, segments);
    let hole_radius = layout.hole_radius();

    let vertex_total = outer.len() * (layout.centers.len() + 1);
    let mut flat = Vec::with_capacity(vertex_total * 2);
    let mut hole_starts = Vec::with_capacity(layout.centers.len());

    push_ring(&mut flat, &outer);
    for &center in &layout.centers {
        hole_starts.push(flat.len() / 2);
        push_ring(&mut flat, &hole_outline(center, hole_radius, segments));
    }

    let indices = earclip::earcut::earcut(&flat, &hole_starts, 2);
    if indices.is_empty() {
        builder.warn("earclip produced no triangles for drilled face; skipping".to_string());
        return Ok(());
    }

    let web_area = face_region_areas(layout, disk_diameter, segments)
        .last()
        .copied()
        .unwrap_or_default();
    let covered = triangles_area(&flat, &indices);
    if (covered - web_area).abs() > COVERAGE_TOLERANCE * web_area {
        builder.warn(format!(
            "drilled face triangulation covers {covered}, web is {web_area}; skipping"
        ));
        return Ok(());
    }

    let base_vertex = emit_vertices(builder, &flat);
    emit_triangles(builder, &indices, base_vertex)
}

fn warn_low_segments(builder: &mut GeometryBuilder, segments: u32) {
    if segments < MIN_CIRCLE_SEGMENTS {
        builder.warn(format!(
            "circle segment count {segments} below minimum; using {MIN_CIRCLE_SEGMENTS}"
        ));
    }
}

fn push_ring(flat: &mut Vec<f64>, ring: &[Point]) {
    for p in ring {
        flat.push(p.x);
        flat.push(p.y);
    }
}

fn vertex_at(flat: &[f64], idx: usize) -> Option<Point> {
    let x = *flat.get(idx * 2)?;
    let y = *flat.get(idx * 2 + 1)?;
    Some(Point::new(x, y))
}

/// Total area of the earclip triangles, skipping any with out-of-range indices.
fn triangles_area(flat: &[f64], indices: &[usize]) -> f64 {
    indices
        .chunks_exact(3)
        .filter_map(|tri| {
            let [ia, ib, ic] = *tri else {
                return None;
            };
            let corners = [
                vertex_at(flat, ia)?,
                vertex_at(flat, ib)?,
                vertex_at(flat, ic)?,
            ];
            Some(polygon_area(&corners))
        })
        .sum()
}

/// Push all vertices from the flat coordinate buffer and return the first vertex index.
fn emit_vertices(builder: &mut GeometryBuilder, flat: &[f64]) -> u32 {
    let mut first: Option<u32> = None;
    for pair in flat.chunks_exact(2) {
        if let [x, y] = *pair {
            let idx = builder.push_vertex(x, y);
            if first.is_none() {
                first = Some(idx);
            }
        }
    }
    first.unwrap_or(0)
}

/// Convert earclip triangle indices (relative to the flat buffer) into
/// `GeometryBuilder` triangle calls using the base vertex offset.
fn emit_triangles(
    builder: &mut GeometryBuilder,
    indices: &[usize],
    base_vertex: u32,
) -> Result<(), GeometryError> {
    for tri in indices.chunks_exact(3) {
        if let [ia, ib, ic] = *tri {
            let a = offset_index(base_vertex, ia)?;
            let b = offset_index(base_vertex, ib)?;
            let c = offset_index(base_vertex, ic)?;
            builder.push_triangle(a, b, c);
        }
    }
    Ok(())
}

fn offset_index(base: u32, offset: usize) -> Result<u32, GeometryError> {
    let offset_u32 =
        u32::try_from(offset).map_err(|_| GeometryError::RegionError("index overflow".into()))?;
    base.checked_add(offset_u32)
        .ok_or_else(|| GeometryError::RegionError("vertex index overflow".into()))
}
