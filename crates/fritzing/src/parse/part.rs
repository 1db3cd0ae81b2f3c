//! `.fzp` reader.

use super::*;
use crate::types::*;
use crate::view;
use roxmltree::{Document, Node};

pub(crate) fn parse_part(xml: &str) -> Result<Part> {
    let doc = Document::parse(xml)?;
    let root = module_root(&doc)?;
    parse_module(&root)
}

pub(crate) fn parse_module(root: &Node) -> Result<Part> {
    let mut part = Part::new(required_attr(root, "moduleId", "module")?);
    part.fritzing_version = optional_attr(root, "fritzingVersion");
    part.reference_file = optional_attr(root, "referenceFile");
    part.replaced_by = optional_attr(root, "replacedBy");
    part.default_units = optional_attr(root, "defaultUnits");

    for node in root.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "version" => part.version = Some(element_text(&node)),
            "author" => part.author = Some(element_text(&node)),
            "title" => part.title = Some(element_text(&node)),
            "label" => part.label = Some(element_text(&node)),
            "url" => part.url = Some(element_text(&node)),
            "date" => part.date = Some(element_text(&node)),
            "description" => part.description = Some(element_text(&node)),
            "taxonomy" => part.taxonomy = Some(element_text(&node)),
            "language" => part.language = Some(element_text(&node)),
            "family" => part.family = Some(element_text(&node)),
            "variant" => part.variant = Some(element_text(&node)),
            "tags" => {
                for tag in children(&node, "tag") {
                    part.add_tag(element_text(&tag));
                }
            }
            "properties" => {
                for prop in children(&node, "property") {
                    part.set_property(parse_property(&prop)?);
                }
            }
            "views" => {
                for view_node in node.children().filter(|n| n.is_element()) {
                    part.set_view(parse_view_settings(&view_node)?);
                }
            }
            "connectors" => {
                part.ignore_terminal_points = optional_booltf(&node, "ignoreTerminalPoints")?;
                for conn in children(&node, "connector") {
                    part.set_connector(parse_connector(&conn)?);
                }
            }
            "buses" => {
                for bus in children(&node, "bus") {
                    part.set_bus(parse_bus(&bus)?);
                }
            }
            "subparts" => {
                for subpart in children(&node, "subpart") {
                    part.set_subpart(parse_subpart(&subpart)?);
                }
            }
            _ => {}
        }
    }

    Ok(part)
}

fn parse_property(node: &Node) -> Result<PartProperty> {
    Ok(PartProperty {
        name: required_attr(node, "name", "property")?,
        value: element_text(node),
        show_in_label: optional_booltf(node, "showInLabel")?,
    })
}

fn parse_view_settings(node: &Node) -> Result<PartViewSettings> {
    let mut settings = PartViewSettings {
        name: view::strip_suffix(node.tag_name().name()).to_string(),
        flip_horizontal: optional_booltf(node, "flipHorizontal")?,
        flip_vertical: optional_booltf(node, "flipVertical")?,
        ..Default::default()
    };

    if let Some(layers) = child(node, "layers") {
        settings.image = optional_attr(&layers, "image");
        for layer in children(&layers, "layer") {
            settings.set_layer(PartLayer {
                id: required_attr(&layer, "layerId", "layer")?,
                sticky: optional_booltf(&layer, "sticky")?,
            });
        }
    }

    Ok(settings)
}

fn parse_connector(node: &Node) -> Result<PartConnector> {
    let mut connector = PartConnector::new(required_attr(node, "id", "connector")?);
    connector.name = optional_attr(node, "name");
    connector.kind = optional_attr(node, "type");
    connector.replaced_by = optional_attr(node, "replacedBy");
    connector.description = child_text(node, "description");

    if let Some(erc) = child(node, "erc") {
        connector.erc = Some(parse_erc(&erc)?);
    }

    if let Some(views) = child(node, "views") {
        for view_node in views.children().filter(|n| n.is_element()) {
            connector.set_view(parse_connector_view(&view_node)?);
        }
    }

    Ok(connector)
}

fn parse_erc(node: &Node) -> Result<Erc> {
    let mut erc = Erc {
        kind: optional_attr(node, "etype"),
        ignore: optional_attr(node, "ignore"),
        ..Default::default()
    };

    if let Some(voltage) = child(node, "voltage") {
        erc.voltage = optional_f64(&voltage, "value")?;
    }
    if let Some(current) = child(node, "current") {
        erc.current = Some(Current {
            flow: optional_attr(&current, "flow"),
            value_max: optional_f64(&current, "valueMax")?,
        });
    }

    Ok(erc)
}

fn parse_connector_view(node: &Node) -> Result<PartConnectorViewSettings> {
    let mut settings = PartConnectorViewSettings {
        name: view::strip_suffix(node.tag_name().name()).to_string(),
        layer_settings: Vec::new(),
    };

    for p in children(node, "p") {
        settings.set_layer(PartConnectorLayerSettings {
            layer: required_attr(&p, "layer", "p")?,
            svg_id: optional_attr(&p, "svgId"),
            terminal_id: optional_attr(&p, "terminalId"),
            leg_id: optional_attr(&p, "legId"),
            disabled: optional_booltf(&p, "disabled")?,
        });
    }

    Ok(settings)
}

fn parse_bus(node: &Node) -> Result<Bus> {
    let mut bus = Bus {
        id: required_attr(node, "id", "bus")?,
        node_members: Vec::new(),
    };
    for member in children(node, "nodeMember") {
        bus.add_member(required_attr(&member, "connectorId", "nodeMember")?);
    }
    Ok(bus)
}

fn parse_subpart(node: &Node) -> Result<Subpart> {
    let mut subpart = Subpart {
        id: required_attr(node, "id", "subpart")?,
        label: optional_attr(node, "label"),
        connector_ids: Vec::new(),
    };
    if let Some(connectors) = child(node, "connectors") {
        for conn in children(&connectors, "connector") {
            subpart.add_connector(required_attr(&conn, "id", "connector")?);
        }
    }
    Ok(subpart)
}
