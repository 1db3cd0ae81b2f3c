//! `.fz` writer.

use super::*;
use crate::types::*;
use crate::view;

pub(crate) fn write_sketch(sketch: &Sketch) -> Result<String> {
    let mut out = Emitter::new();
    out.decl()?;

    let mut module = BytesStart::new("module");
    opt_attr(
        &mut module,
        "fritzingVersion",
        sketch.fritzing_version.as_deref(),
    );
    out.start(module)?;

    if !sketch.view_settings.is_empty() {
        out.start(BytesStart::new("views"))?;
        for settings in &sketch.view_settings {
            write_view_settings(&mut out, settings)?;
        }
        out.end("views")?;
    }

    if !sketch.boards.is_empty() {
        out.start(BytesStart::new("boards"))?;
        for board in &sketch.boards {
            write_board(&mut out, board)?;
        }
        out.end("boards")?;
    }

    if !sketch.programs.is_empty() {
        out.start(BytesStart::new("programs"))?;
        for program in &sketch.programs {
            write_program(&mut out, program)?;
        }
        out.end("programs")?;
    }

    if !sketch.instances.is_empty() {
        out.start(BytesStart::new("instances"))?;
        for instance in &sketch.instances {
            write_instance(&mut out, instance)?;
        }
        out.end("instances")?;
    }

    out.end("module")?;
    out.finish()
}

fn write_view_settings(out: &mut Emitter, settings: &SketchViewSettings) -> Result<()> {
    let mut el = BytesStart::new("view");
    el.push_attribute(("name", view::append_suffix(&settings.name).as_str()));
    opt_attr(
        &mut el,
        "backgroundColor",
        settings.background_color.as_deref(),
    );
    opt_attr(&mut el, "gridSize", settings.grid_size.as_deref());
    opt_attr_bool01(&mut el, "showGrid", settings.show_grid);
    opt_attr_bool01(&mut el, "alignToGrid", settings.align_to_grid);
    opt_attr_bool01(&mut el, "viewFromBelow", settings.view_from_below);
    if let Some(pcb) = &settings.pcb {
        opt_attr(&mut el, "arHoleSize", pcb.ar_hole_size.as_deref());
        opt_attr(&mut el, "arTraceWidth", pcb.ar_trace_width.as_deref());
        opt_attr(&mut el, "arRingWidth", pcb.ar_ring_width.as_deref());
        opt_attr(&mut el, "keepoutDRC", pcb.keepout_drc.as_deref());
        opt_attr(&mut el, "keepoutGPG", pcb.keepout_gpg.as_deref());
    }
    out.empty(el)
}

fn write_board(out: &mut Emitter, board: &Board) -> Result<()> {
    let mut el = BytesStart::new("board");
    opt_attr(&mut el, "moduleId", board.module_id.as_deref());
    opt_attr(&mut el, "title", board.title.as_deref());
    opt_attr(&mut el, "instance", board.instance.as_deref());
    opt_attr(&mut el, "width", board.width.as_deref());
    opt_attr(&mut el, "height", board.height.as_deref());
    out.empty(el)
}

fn write_program(out: &mut Emitter, program: &Program) -> Result<()> {
    let mut el = BytesStart::new("program");
    opt_attr(&mut el, "pid", program.pid.as_deref());
    opt_attr(&mut el, "language", program.language.as_deref());
    opt_attr(&mut el, "author", program.author.as_deref());
    if program.path.is_empty() {
        out.empty(el)
    } else {
        out.start(el)?;
        out.text(&program.path)?;
        out.end("program")
    }
}

fn write_instance(out: &mut Emitter, instance: &Instance) -> Result<()> {
    let mut el = BytesStart::new("instance");
    el.push_attribute(("moduleIdRef", instance.module_id_ref.as_str()));
    el.push_attribute(("modelIndex", instance.model_index.as_str()));
    opt_attr(&mut el, "path", instance.path.as_deref());
    opt_attr_booltf(&mut el, "flippedSMD", instance.flipped_smd);
    out.start(el)?;

    out.opt_text_element("title", instance.title.as_deref())?;
    out.opt_text_element("text", instance.text.as_deref())?;

    if !instance.properties.is_empty() {
        out.start(BytesStart::new("properties"))?;
        for property in &instance.properties {
            let mut el = BytesStart::new("property");
            el.push_attribute(("name", property.name.as_str()));
            el.push_attribute(("value", property.value.as_str()));
            out.empty(el)?;
        }
        out.end("properties")?;
    }

    if !instance.local_connectors.is_empty() {
        out.start(BytesStart::new("localConnectors"))?;
        for local in &instance.local_connectors {
            let mut el = BytesStart::new("localConnector");
            el.push_attribute(("id", local.id.as_str()));
            opt_attr(&mut el, "name", local.name.as_deref());
            out.empty(el)?;
        }
        out.end("localConnectors")?;
    }

    if !instance.view_settings.is_empty() {
        out.start(BytesStart::new("views"))?;
        for settings in &instance.view_settings {
            write_instance_view(out, settings)?;
        }
        out.end("views")?;
    }

    out.end("instance")
}

fn write_instance_view(out: &mut Emitter, settings: &InstanceViewSettings) -> Result<()> {
    let tag = view::append_suffix(&settings.name);
    let mut el = BytesStart::new(tag.as_str());
    opt_attr(&mut el, "layer", settings.layer.as_deref());
    opt_attr_booltf(&mut el, "locked", settings.locked);
    opt_attr_booltf(&mut el, "bottom", settings.bottom);
    out.start(el)?;

    match &settings.geometry {
        InstanceGeometry::Plain {
            geometry,
            transform,
        } => {
            let mut el = BytesStart::new("geometry");
            attr_f64(&mut el, "x", geometry.x);
            attr_f64(&mut el, "y", geometry.y);
            attr_f64(&mut el, "z", geometry.z);
            match transform {
                Some(transform) => {
                    out.start(el)?;
                    write_transform(out, transform)?;
                    out.end("geometry")?;
                }
                None => out.empty(el)?,
            }
        }
        InstanceGeometry::Wire { geometry, extras } => {
            let mut el = BytesStart::new("geometry");
            attr_f64(&mut el, "x", geometry.x);
            attr_f64(&mut el, "y", geometry.y);
            attr_f64(&mut el, "z", geometry.z);
            attr_f64(&mut el, "x1", geometry.x1);
            attr_f64(&mut el, "y1", geometry.y1);
            attr_f64(&mut el, "x2", geometry.x2);
            attr_f64(&mut el, "y2", geometry.y2);
            el.push_attribute(("wireFlags", geometry.wire_flags.to_string().as_str()));
            out.empty(el)?;
            write_wire_extras(out, extras)?;
        }
    }

    if let Some(title) = &settings.title_geometry {
        write_title_geometry(out, title)?;
    }
    if let Some(layer) = &settings.layer_hidden {
        let mut el = BytesStart::new("layerHidden");
        el.push_attribute(("layer", layer.as_str()));
        out.empty(el)?;
    }
    if !settings.connectors.is_empty() {
        out.start(BytesStart::new("connectors"))?;
        for connector in &settings.connectors {
            write_instance_connector(out, connector)?;
        }
        out.end("connectors")?;
    }

    out.end(&tag)
}

fn write_transform(out: &mut Emitter, transform: &Transform) -> Result<()> {
    let mut el = BytesStart::new("transform");
    attr_f64(&mut el, "m11", transform.m11);
    attr_f64(&mut el, "m12", transform.m12);
    attr_f64(&mut el, "m13", transform.m13);
    attr_f64(&mut el, "m21", transform.m21);
    attr_f64(&mut el, "m22", transform.m22);
    attr_f64(&mut el, "m23", transform.m23);
    attr_f64(&mut el, "m31", transform.m31);
    attr_f64(&mut el, "m32", transform.m32);
    attr_f64(&mut el, "m33", transform.m33);
    out.empty(el)
}

/// The wireExtras element doubles as the wire-view discriminator, so it is
/// written even when every field is absent.
fn write_wire_extras(out: &mut Emitter, extras: &WireExtras) -> Result<()> {
    let mut el = BytesStart::new("wireExtras");
    opt_attr_f64(&mut el, "mils", extras.mils);
    opt_attr(&mut el, "color", extras.color.as_deref());
    opt_attr_f64(&mut el, "opacity", extras.opacity);
    opt_attr_bool01(&mut el, "banded", extras.banded);
    match &extras.bezier {
        Some(bezier) => {
            out.start(el)?;
            write_bezier(out, bezier)?;
            out.end("wireExtras")
        }
        None => out.empty(el),
    }
}

fn write_bezier(out: &mut Emitter, bezier: &Bezier) -> Result<()> {
    out.start(BytesStart::new("bezier"))?;
    write_point(out, "cp0", bezier.cp0)?;
    write_point(out, "cp1", bezier.cp1)?;
    out.end("bezier")
}

fn write_point(out: &mut Emitter, name: &str, point: Point) -> Result<()> {
    let mut el = BytesStart::new(name);
    attr_f64(&mut el, "x", point.x);
    attr_f64(&mut el, "y", point.y);
    out.empty(el)
}

fn write_title_geometry(out: &mut Emitter, title: &TitleGeometry) -> Result<()> {
    let mut el = BytesStart::new("titleGeometry");
    opt_attr_booltf(&mut el, "visible", title.visible);
    opt_attr_f64(&mut el, "x", title.x);
    opt_attr_f64(&mut el, "y", title.y);
    opt_attr_f64(&mut el, "z", title.z);
    opt_attr_f64(&mut el, "xOffset", title.x_offset);
    opt_attr_f64(&mut el, "yOffset", title.y_offset);
    opt_attr(&mut el, "textColor", title.text_color.as_deref());
    opt_attr(&mut el, "fontSize", title.font_size.as_deref());

    if title.visible_properties.is_empty() {
        return out.empty(el);
    }
    out.start(el)?;
    for name in &title.visible_properties {
        out.text_element("displayKey", name)?;
    }
    out.end("titleGeometry")
}

fn write_instance_connector(out: &mut Emitter, connector: &InstanceConnector) -> Result<()> {
    let mut el = BytesStart::new("connector");
    el.push_attribute(("connectorId", connector.id.as_str()));
    opt_attr(&mut el, "layer", connector.layer.as_deref());
    out.start(el)?;

    if let Some(geometry) = connector.geometry {
        let mut el = BytesStart::new("geometry");
        attr_f64(&mut el, "x", geometry.x);
        attr_f64(&mut el, "y", geometry.y);
        attr_f64(&mut el, "z", geometry.z);
        out.empty(el)?;
    }

    if !connector.leg.is_empty() {
        // Two parallel positional arrays: every point gets a bezier slot,
        // an uncurved step as an empty placeholder element.
        out.start(BytesStart::new("leg"))?;
        for pair in &connector.leg {
            write_point(out, "point", pair.point)?;
        }
        for pair in &connector.leg {
            match &pair.bezier {
                Some(bezier) => write_bezier(out, bezier)?,
                None => out.empty(BytesStart::new("bezier"))?,
            }
        }
        out.end("leg")?;
    }

    if !connector.connects_to.is_empty() {
        out.start(BytesStart::new("connects"))?;
        for reference in &connector.connects_to {
            let mut el = BytesStart::new("connect");
            el.push_attribute(("connectorId", reference.connector_id.as_str()));
            el.push_attribute(("modelIndex", reference.model_index.as_str()));
            opt_attr(&mut el, "layer", reference.layer.as_deref());
            out.empty(el)?;
        }
        out.end("connects")?;
    }

    out.end("connector")
}
