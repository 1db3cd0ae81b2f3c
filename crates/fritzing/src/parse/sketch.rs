//! `.fz` reader.

use super::*;
use crate::types::*;
use crate::view;
use roxmltree::{Document, Node};

pub(crate) fn parse_sketch(xml: &str) -> Result<Sketch> {
    let doc = Document::parse(xml)?;
    let root = module_root(&doc)?;

    let mut sketch = Sketch {
        fritzing_version: optional_attr(&root, "fritzingVersion"),
        ..Default::default()
    };

    for node in root.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "views" => {
                for view_node in children(&node, "view") {
                    sketch.set_view(parse_view_settings(&view_node)?);
                }
            }
            "boards" => {
                for board in children(&node, "board") {
                    sketch.boards.push(parse_board(&board));
                }
            }
            "programs" => {
                for program in children(&node, "program") {
                    sketch.programs.push(parse_program(&program));
                }
            }
            "instances" => {
                for instance in children(&node, "instance") {
                    sketch.set_instance(parse_instance(&instance)?);
                }
            }
            _ => {}
        }
    }

    Ok(sketch)
}

fn parse_view_settings(node: &Node) -> Result<SketchViewSettings> {
    let suffixed = required_attr(node, "name", "view")?;
    let name = view::strip_suffix(&suffixed).to_string();

    // The pcb view is recognized by its bare name alone; no other marker.
    let pcb = (name == "pcb").then(|| PcbViewSettings {
        ar_hole_size: optional_attr(node, "arHoleSize"),
        ar_trace_width: optional_attr(node, "arTraceWidth"),
        ar_ring_width: optional_attr(node, "arRingWidth"),
        keepout_drc: optional_attr(node, "keepoutDRC"),
        keepout_gpg: optional_attr(node, "keepoutGPG"),
    });

    Ok(SketchViewSettings {
        name,
        background_color: optional_attr(node, "backgroundColor"),
        grid_size: optional_attr(node, "gridSize"),
        show_grid: optional_bool01(node, "showGrid")?,
        align_to_grid: optional_bool01(node, "alignToGrid")?,
        view_from_below: optional_bool01(node, "viewFromBelow")?,
        pcb,
    })
}

fn parse_board(node: &Node) -> Board {
    Board {
        module_id: optional_attr(node, "moduleId"),
        title: optional_attr(node, "title"),
        instance: optional_attr(node, "instance"),
        width: optional_attr(node, "width"),
        height: optional_attr(node, "height"),
    }
}

fn parse_program(node: &Node) -> Program {
    Program {
        pid: optional_attr(node, "pid"),
        language: optional_attr(node, "language"),
        author: optional_attr(node, "author"),
        path: element_text(node),
    }
}

fn parse_instance(node: &Node) -> Result<Instance> {
    let mut instance = Instance::new(
        required_attr(node, "moduleIdRef", "instance")?,
        required_attr(node, "modelIndex", "instance")?,
    );
    instance.path = optional_attr(node, "path");
    instance.flipped_smd = optional_booltf(node, "flippedSMD")?;

    for child_node in node.children().filter(|n| n.is_element()) {
        match child_node.tag_name().name() {
            "title" => instance.title = Some(element_text(&child_node)),
            "text" => instance.text = Some(element_text(&child_node)),
            "properties" => {
                for prop in children(&child_node, "property") {
                    instance.set_property(Property {
                        name: required_attr(&prop, "name", "property")?,
                        value: optional_attr(&prop, "value").unwrap_or_default(),
                    });
                }
            }
            "localConnectors" => {
                for local in children(&child_node, "localConnector") {
                    instance.local_connectors.push(LocalConnector {
                        id: required_attr(&local, "id", "localConnector")?,
                        name: optional_attr(&local, "name"),
                    });
                }
            }
            "views" => {
                for view_node in child_node.children().filter(|n| n.is_element()) {
                    instance.set_view(parse_instance_view(&view_node)?);
                }
            }
            _ => {}
        }
    }

    Ok(instance)
}

fn parse_instance_view(node: &Node) -> Result<InstanceViewSettings> {
    // Presence of a wireExtras child is the sole signal that this view is a
    // wire view; there is no separate type tag in the format.
    let wire_extras = child(node, "wireExtras")
        .map(|extras| parse_wire_extras(&extras))
        .transpose()?;

    let geometry_node =
        child(node, "geometry").ok_or(crate::FritzingError::MissingElement("geometry"))?;
    let geometry = match wire_extras {
        Some(extras) => InstanceGeometry::Wire {
            geometry: parse_wire_geometry(&geometry_node)?,
            extras,
        },
        None => parse_plain_geometry(&geometry_node)?,
    };

    let mut settings = InstanceViewSettings::new(
        view::strip_suffix(node.tag_name().name()).to_string(),
        geometry,
    );
    settings.layer = optional_attr(node, "layer");
    settings.locked = optional_booltf(node, "locked")?;
    settings.bottom = optional_booltf(node, "bottom")?;

    if let Some(hidden) = child(node, "layerHidden") {
        settings.layer_hidden = optional_attr(&hidden, "layer");
    }
    if let Some(title) = child(node, "titleGeometry") {
        settings.title_geometry = Some(parse_title_geometry(&title)?);
    }
    if let Some(connectors) = child(node, "connectors") {
        for conn in children(&connectors, "connector") {
            settings.set_connector(parse_instance_connector(&conn)?);
        }
    }

    Ok(settings)
}

fn parse_plain_geometry(node: &Node) -> Result<InstanceGeometry> {
    let geometry = parse_geometry(node)?;
    let transform = child(node, "transform")
        .map(|t| parse_transform(&t))
        .transpose()?;
    Ok(InstanceGeometry::Plain {
        geometry,
        transform,
    })
}

fn parse_geometry(node: &Node) -> Result<Geometry> {
    Ok(Geometry {
        x: f64_or(node, "x", 0.0)?,
        y: f64_or(node, "y", 0.0)?,
        z: f64_or(node, "z", 0.0)?,
    })
}

fn parse_wire_geometry(node: &Node) -> Result<WireGeometry> {
    Ok(WireGeometry {
        x: f64_or(node, "x", 0.0)?,
        y: f64_or(node, "y", 0.0)?,
        z: f64_or(node, "z", 0.0)?,
        x1: f64_or(node, "x1", 0.0)?,
        y1: f64_or(node, "y1", 0.0)?,
        x2: f64_or(node, "x2", 0.0)?,
        y2: f64_or(node, "y2", 0.0)?,
        wire_flags: optional_i64(node, "wireFlags")?.unwrap_or(0),
    })
}

fn parse_transform(node: &Node) -> Result<Transform> {
    // Omitted entries default to the identity matrix.
    Ok(Transform {
        m11: f64_or(node, "m11", 1.0)?,
        m12: f64_or(node, "m12", 0.0)?,
        m13: f64_or(node, "m13", 0.0)?,
        m21: f64_or(node, "m21", 0.0)?,
        m22: f64_or(node, "m22", 1.0)?,
        m23: f64_or(node, "m23", 0.0)?,
        m31: f64_or(node, "m31", 0.0)?,
        m32: f64_or(node, "m32", 0.0)?,
        m33: f64_or(node, "m33", 1.0)?,
    })
}

fn parse_title_geometry(node: &Node) -> Result<TitleGeometry> {
    let mut title = TitleGeometry {
        visible: optional_booltf(node, "visible")?,
        x: optional_f64(node, "x")?,
        y: optional_f64(node, "y")?,
        z: optional_f64(node, "z")?,
        x_offset: optional_f64(node, "xOffset")?,
        y_offset: optional_f64(node, "yOffset")?,
        text_color: optional_attr(node, "textColor"),
        font_size: optional_attr(node, "fontSize"),
        visible_properties: Vec::new(),
    };
    for key in children(node, "displayKey") {
        title.visible_properties.push(element_text(&key));
    }
    Ok(title)
}

fn parse_wire_extras(node: &Node) -> Result<WireExtras> {
    Ok(WireExtras {
        mils: optional_f64(node, "mils")?,
        color: optional_attr(node, "color"),
        opacity: optional_f64(node, "opacity")?,
        banded: optional_bool01(node, "banded")?,
        bezier: child(node, "bezier")
            .map(|b| parse_optional_bezier(&b))
            .transpose()?
            .flatten(),
    })
}

/// A `bezier` element without control points is the placeholder written for
/// an uncurved leg step; it parses to `None`.
fn parse_optional_bezier(node: &Node) -> Result<Option<Bezier>> {
    if child(node, "cp0").is_none() && child(node, "cp1").is_none() {
        return Ok(None);
    }
    parse_bezier(node).map(Some)
}

fn parse_bezier(node: &Node) -> Result<Bezier> {
    let cp0 = child(node, "cp0").ok_or(crate::FritzingError::MissingElement("cp0"))?;
    let cp1 = child(node, "cp1").ok_or(crate::FritzingError::MissingElement("cp1"))?;
    Ok(Bezier {
        cp0: parse_point(&cp0)?,
        cp1: parse_point(&cp1)?,
    })
}

fn parse_point(node: &Node) -> Result<Point> {
    Ok(Point {
        x: f64_or(node, "x", 0.0)?,
        y: f64_or(node, "y", 0.0)?,
    })
}

fn parse_instance_connector(node: &Node) -> Result<InstanceConnector> {
    let mut connector = InstanceConnector::new(required_attr(node, "connectorId", "connector")?);
    connector.layer = optional_attr(node, "layer");

    if let Some(geometry) = child(node, "geometry") {
        connector.geometry = Some(parse_geometry(&geometry)?);
    }
    if let Some(leg) = child(node, "leg") {
        connector.leg = parse_leg(&leg)?;
    }
    if let Some(connects) = child(node, "connects") {
        for connect in children(&connects, "connect") {
            connector.connects_to.push(InstanceConnectorReference {
                connector_id: required_attr(&connect, "connectorId", "connect")?,
                model_index: required_attr(&connect, "modelIndex", "connect")?,
                layer: optional_attr(&connect, "layer"),
            });
        }
    }

    Ok(connector)
}

/// Re-pairs the two parallel arrays under `<leg>` by position. Divergent
/// lengths mean the document was not produced by a conforming writer and are
/// rejected rather than silently mis-paired.
fn parse_leg(node: &Node) -> Result<Vec<PointBezierPair>> {
    let points = children(node, "point")
        .map(|p| parse_point(&p))
        .collect::<Result<Vec<_>>>()?;
    let beziers = children(node, "bezier")
        .map(|b| parse_optional_bezier(&b))
        .collect::<Result<Vec<_>>>()?;

    if points.len() != beziers.len() {
        return Err(crate::FritzingError::InvalidAttribute(format!(
            "leg has {} points but {} bezier slots",
            points.len(),
            beziers.len()
        )));
    }

    Ok(points
        .into_iter()
        .zip(beziers)
        .map(|(point, bezier)| PointBezierPair { point, bezier })
        .collect())
}
