//! `.fzp` writer.

use super::*;
use crate::types::*;
use crate::view;

pub(crate) fn write_part(part: &Part) -> Result<String> {
    let mut out = Emitter::new();
    out.decl()?;
    write_module(&mut out, part)?;
    out.finish()
}

pub(crate) fn write_module(out: &mut Emitter, part: &Part) -> Result<()> {
    let mut module = BytesStart::new("module");
    module.push_attribute(("moduleId", part.module_id.as_str()));
    opt_attr(
        &mut module,
        "fritzingVersion",
        part.fritzing_version.as_deref(),
    );
    opt_attr(&mut module, "referenceFile", part.reference_file.as_deref());
    opt_attr(&mut module, "replacedBy", part.replaced_by.as_deref());
    opt_attr(&mut module, "defaultUnits", part.default_units.as_deref());
    out.start(module)?;

    out.opt_text_element("version", part.version.as_deref())?;
    out.opt_text_element("author", part.author.as_deref())?;
    out.opt_text_element("title", part.title.as_deref())?;
    out.opt_text_element("label", part.label.as_deref())?;
    out.opt_text_element("url", part.url.as_deref())?;
    out.opt_text_element("date", part.date.as_deref())?;
    out.opt_text_element("description", part.description.as_deref())?;
    out.opt_text_element("taxonomy", part.taxonomy.as_deref())?;
    out.opt_text_element("language", part.language.as_deref())?;
    out.opt_text_element("family", part.family.as_deref())?;
    out.opt_text_element("variant", part.variant.as_deref())?;

    if !part.tags.is_empty() {
        out.start(BytesStart::new("tags"))?;
        for tag in &part.tags {
            out.text_element("tag", tag)?;
        }
        out.end("tags")?;
    }

    if !part.properties.is_empty() {
        out.start(BytesStart::new("properties"))?;
        for property in &part.properties {
            write_property(out, property)?;
        }
        out.end("properties")?;
    }

    if !part.view_settings.is_empty() {
        out.start(BytesStart::new("views"))?;
        for settings in &part.view_settings {
            write_view_settings(out, settings)?;
        }
        out.end("views")?;
    }

    if !part.connectors.is_empty() || part.ignore_terminal_points.is_some() {
        let mut el = BytesStart::new("connectors");
        opt_attr_booltf(&mut el, "ignoreTerminalPoints", part.ignore_terminal_points);
        out.start(el)?;
        for connector in &part.connectors {
            write_connector(out, connector)?;
        }
        out.end("connectors")?;
    }

    if !part.buses.is_empty() {
        out.start(BytesStart::new("buses"))?;
        for bus in &part.buses {
            write_bus(out, bus)?;
        }
        out.end("buses")?;
    }

    if !part.subparts.is_empty() {
        out.start(BytesStart::new("subparts"))?;
        for subpart in &part.subparts {
            write_subpart(out, subpart)?;
        }
        out.end("subparts")?;
    }

    out.end("module")
}

fn write_property(out: &mut Emitter, property: &PartProperty) -> Result<()> {
    let mut el = BytesStart::new("property");
    el.push_attribute(("name", property.name.as_str()));
    opt_attr_booltf(&mut el, "showInLabel", property.show_in_label);
    out.start(el)?;
    out.text(&property.value)?;
    out.end("property")
}

fn write_view_settings(out: &mut Emitter, settings: &PartViewSettings) -> Result<()> {
    let tag = view::append_suffix(&settings.name);
    let mut el = BytesStart::new(tag.as_str());
    opt_attr_booltf(&mut el, "flipHorizontal", settings.flip_horizontal);
    opt_attr_booltf(&mut el, "flipVertical", settings.flip_vertical);

    if settings.image.is_none() && settings.layers.is_empty() {
        return out.empty(el);
    }

    out.start(el)?;
    let mut layers = BytesStart::new("layers");
    opt_attr(&mut layers, "image", settings.image.as_deref());
    if settings.layers.is_empty() {
        out.empty(layers)?;
    } else {
        out.start(layers)?;
        for layer in &settings.layers {
            let mut el = BytesStart::new("layer");
            el.push_attribute(("layerId", layer.id.as_str()));
            opt_attr_booltf(&mut el, "sticky", layer.sticky);
            out.empty(el)?;
        }
        out.end("layers")?;
    }
    out.end(&tag)
}

fn write_connector(out: &mut Emitter, connector: &PartConnector) -> Result<()> {
    let mut el = BytesStart::new("connector");
    el.push_attribute(("id", connector.id.as_str()));
    opt_attr(&mut el, "name", connector.name.as_deref());
    opt_attr(&mut el, "type", connector.kind.as_deref());
    opt_attr(&mut el, "replacedBy", connector.replaced_by.as_deref());

    let no_children = connector.description.is_none()
        && connector.erc.is_none()
        && connector.view_settings.is_empty();
    if no_children {
        return out.empty(el);
    }

    out.start(el)?;
    out.opt_text_element("description", connector.description.as_deref())?;
    if let Some(erc) = &connector.erc {
        write_erc(out, erc)?;
    }
    if !connector.view_settings.is_empty() {
        out.start(BytesStart::new("views"))?;
        for settings in &connector.view_settings {
            write_connector_view(out, settings)?;
        }
        out.end("views")?;
    }
    out.end("connector")
}

fn write_erc(out: &mut Emitter, erc: &Erc) -> Result<()> {
    let mut el = BytesStart::new("erc");
    opt_attr(&mut el, "etype", erc.kind.as_deref());
    opt_attr(&mut el, "ignore", erc.ignore.as_deref());

    if erc.voltage.is_none() && erc.current.is_none() {
        return out.empty(el);
    }

    out.start(el)?;
    if let Some(value) = erc.voltage {
        let mut voltage = BytesStart::new("voltage");
        attr_f64(&mut voltage, "value", value);
        out.empty(voltage)?;
    }
    if let Some(current) = &erc.current {
        let mut el = BytesStart::new("current");
        opt_attr(&mut el, "flow", current.flow.as_deref());
        opt_attr_f64(&mut el, "valueMax", current.value_max);
        out.empty(el)?;
    }
    out.end("erc")
}

fn write_connector_view(out: &mut Emitter, settings: &PartConnectorViewSettings) -> Result<()> {
    let tag = view::append_suffix(&settings.name);
    let el = BytesStart::new(tag.as_str());
    if settings.layer_settings.is_empty() {
        return out.empty(el);
    }

    out.start(el)?;
    for layer in &settings.layer_settings {
        let mut p = BytesStart::new("p");
        p.push_attribute(("layer", layer.layer.as_str()));
        opt_attr(&mut p, "svgId", layer.svg_id.as_deref());
        opt_attr(&mut p, "terminalId", layer.terminal_id.as_deref());
        opt_attr(&mut p, "legId", layer.leg_id.as_deref());
        opt_attr_booltf(&mut p, "disabled", layer.disabled);
        out.empty(p)?;
    }
    out.end(&tag)
}

fn write_bus(out: &mut Emitter, bus: &Bus) -> Result<()> {
    let mut el = BytesStart::new("bus");
    el.push_attribute(("id", bus.id.as_str()));
    if bus.node_members.is_empty() {
        return out.empty(el);
    }

    out.start(el)?;
    for member in &bus.node_members {
        let mut node = BytesStart::new("nodeMember");
        node.push_attribute(("connectorId", member.as_str()));
        out.empty(node)?;
    }
    out.end("bus")
}

fn write_subpart(out: &mut Emitter, subpart: &Subpart) -> Result<()> {
    let mut el = BytesStart::new("subpart");
    el.push_attribute(("id", subpart.id.as_str()));
    opt_attr(&mut el, "label", subpart.label.as_deref());
    if subpart.connector_ids.is_empty() {
        return out.empty(el);
    }

    out.start(el)?;
    out.start(BytesStart::new("connectors"))?;
    for id in &subpart.connector_ids {
        let mut conn = BytesStart::new("connector");
        conn.push_attribute(("id", id.as_str()));
        out.empty(conn)?;
    }
    out.end("connectors")?;
    out.end("subpart")
}
