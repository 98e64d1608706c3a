use cavalier_contours::core::math::Vector2;
use cavalier_contours::polyline::{PlineVertex, seg_arc_radius_and_center};
use skadis_geometry::{ClosedPolyline, Point};
use skadis_layout::{Layer, Layout};

use crate::dxf::{Arc, Dxf, Entity, LayerDef, Line, LwPolyline, Point2};

const EPS: f64 = 1e-9;

#[derive(Debug, thiserror::Error)]
pub enum DxfGeomError {
    #[error("polyline on layer {layer} must be closed with at least 2 vertices")]
    InvalidPolyline { layer: Layer },
}

/// How polylines are expressed in the drawing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DxfFlavor {
    /// One closed LWPOLYLINE per polyline, bulges copied verbatim.
    #[default]
    Polyline,
    /// Every segment as its own LINE or ARC entity.
    Segments,
}

pub fn dxf_from_layout(layout: &Layout, flavor: DxfFlavor) -> Result<Dxf, DxfGeomError> {
    let layers = Layer::ALL
        .iter()
        .map(|l| LayerDef {
            name: l.name().to_string(),
            color: l.color_index(),
        })
        .collect();

    let mut entities: Vec<Entity> = Vec::new();
    for (layer, pline) in layout.polylines() {
        entities.extend(entities_from_polyline(pline, layer, flavor)?);
    }
    Ok(Dxf { layers, entities })
}

pub fn entities_from_polyline(
    pline: &ClosedPolyline,
    layer: Layer,
    flavor: DxfFlavor,
) -> Result<Vec<Entity>, DxfGeomError> {
    if !pline.is_closed() || pline.vertex_count() < 2 {
        return Err(DxfGeomError::InvalidPolyline { layer });
    }

    match flavor {
        DxfFlavor::Polyline => Ok(vec![Entity::LwPolyline(LwPolyline {
            layer: layer.name().to_string(),
            vertices: pline.points().map(point2).collect(),
            bulges: pline.bulges().collect(),
            closed: true,
        })]),
        DxfFlavor::Segments => Ok(pline
            .edges()
            .filter_map(|(seg, end)| {
                if seg.is_straight() {
                    if seg.point.distance_to(end) <= EPS {
                        return None;
                    }
                    return Some(Entity::Line(Line {
                        layer: layer.name().to_string(),
                        start: point2(seg.point),
                        end: point2(end),
                    }));
                }

                let v1 = PlineVertex::new(seg.point.x, seg.point.y, seg.bulge);
                let v2 = PlineVertex::new(end.x, end.y, 0.0);
                let (radius, center) = seg_arc_radius_and_center(v1, v2);
                let (start_angle_deg, end_angle_deg) = arc_angles_for_segment(v1, v2, center);
                Some(Entity::Arc(Arc {
                    layer: layer.name().to_string(),
                    center: Point2 {
                        x: center.x,
                        y: center.y,
                    },
                    radius: radius.abs(),
                    start_angle_deg,
                    end_angle_deg,
                }))
            })
            .collect()),
    }
}

fn point2(p: Point) -> Point2 {
    Point2 { x: p.x, y: p.y }
}

fn arc_angles_for_segment(
    v1: PlineVertex<f64>,
    v2: PlineVertex<f64>,
    center: Vector2<f64>,
) -> (f64, f64) {
    let a1 = angle_deg(center, v1.pos());
    let a2 = angle_deg(center, v2.pos());

    if v1.bulge < 0.0 {
        // CW arc from v1->v2 equals CCW arc from v2->v1.
        (a2, a1)
    } else {
        (a1, a2)
    }
}

fn angle_deg(center: Vector2<f64>, p: Vector2<f64>) -> f64 {
    let deg = (p.y - center.y).atan2(p.x - center.x).to_degrees();
    // Snap -0.0 and tiny negatives from round-off onto 0.
    if deg < 0.0 && deg > -EPS {
        return 0.0;
    }
    deg.rem_euclid(360.0)
}
