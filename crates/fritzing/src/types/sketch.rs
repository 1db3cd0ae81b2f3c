//! Typed model of a circuit project (`.fz`).

use crate::types::primitives::{Bezier, Geometry, Point, PointBezierPair, Property, Transform};

/// A circuit-design project, the root document of a `.fz` file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Sketch {
    pub fritzing_version: Option<String>,
    pub programs: Vec<Program>,
    pub boards: Vec<Board>,
    /// Deduplicated by bare view name.
    pub view_settings: Vec<SketchViewSettings>,
    /// Deduplicated by `model_index`.
    pub instances: Vec<Instance>,
}

impl Sketch {
    pub fn view(&self, name: &str) -> Option<&SketchViewSettings> {
        self.view_settings.iter().find(|v| v.name == name)
    }

    pub fn instance(&self, model_index: &str) -> Option<&Instance> {
        self.instances.iter().find(|i| i.model_index == model_index)
    }

    pub fn set_view(&mut self, view: SketchViewSettings) {
        match self.view_settings.iter_mut().find(|v| v.name == view.name) {
            Some(existing) => *existing = view,
            None => self.view_settings.push(view),
        }
    }

    pub fn set_instance(&mut self, instance: Instance) {
        match self
            .instances
            .iter_mut()
            .find(|i| i.model_index == instance.model_index)
        {
            Some(existing) => *existing = instance,
            None => self.instances.push(instance),
        }
    }
}

/// An attached program (firmware source) reference. `path` is the element's
/// own text content, so it has no absent state distinct from empty: a
/// childless `<program/>` and `<program></program>` are the same XML
/// document, and both mean an empty path.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Program {
    pub pid: Option<String>,
    pub language: Option<String>,
    pub author: Option<String>,
    pub path: String,
}

/// A board placed in the project. Width and height are dimension strings
/// (`"3.5in"`), kept verbatim.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Board {
    pub module_id: Option<String>,
    pub title: Option<String>,
    pub instance: Option<String>,
    pub width: Option<String>,
    pub height: Option<String>,
}

/// Display settings for one view of a sketch. The `pcb` view (selected
/// purely by its bare name being the literal `"pcb"`) additionally carries
/// autorouting parameters.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SketchViewSettings {
    /// Bare view name; serialized with the `View` suffix appended.
    pub name: String,
    pub background_color: Option<String>,
    pub grid_size: Option<String>,
    pub show_grid: Option<bool>,
    pub align_to_grid: Option<bool>,
    pub view_from_below: Option<bool>,
    /// Present exactly when `name == "pcb"`.
    pub pcb: Option<PcbViewSettings>,
}

/// Autorouting parameters of the PCB view, kept as verbatim dimension
/// strings.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PcbViewSettings {
    pub ar_hole_size: Option<String>,
    pub ar_trace_width: Option<String>,
    pub ar_ring_width: Option<String>,
    pub keepout_drc: Option<String>,
    pub keepout_gpg: Option<String>,
}

/// A placement of a part within a sketch. `module_id_ref` is a foreign key
/// to a [`crate::Part::module_id`]; `path` is a hint-only file path, not
/// authoritative.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Instance {
    pub module_id_ref: String,
    /// String-typed unique placement id within the sketch.
    pub model_index: String,
    pub path: Option<String>,
    pub title: Option<String>,
    pub text: Option<String>,
    pub flipped_smd: Option<bool>,
    /// Deduplicated by name.
    pub properties: Vec<Property>,
    /// Intra-instance connectors, no external references.
    pub local_connectors: Vec<LocalConnector>,
    /// Deduplicated by bare view name.
    pub view_settings: Vec<InstanceViewSettings>,
}

impl Instance {
    pub fn new(module_id_ref: impl Into<String>, model_index: impl Into<String>) -> Self {
        Self {
            module_id_ref: module_id_ref.into(),
            model_index: model_index.into(),
            ..Default::default()
        }
    }

    pub fn view(&self, name: &str) -> Option<&InstanceViewSettings> {
        self.view_settings.iter().find(|v| v.name == name)
    }

    pub fn set_view(&mut self, view: InstanceViewSettings) {
        match self.view_settings.iter_mut().find(|v| v.name == view.name) {
            Some(existing) => *existing = view,
            None => self.view_settings.push(view),
        }
    }

    pub fn property(&self, name: &str) -> Option<&Property> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn set_property(&mut self, property: Property) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct LocalConnector {
    pub id: String,
    pub name: Option<String>,
}

/// Per-view state of an instance.
#[derive(Debug, Clone, PartialEq)]
pub struct InstanceViewSettings {
    /// Bare view name.
    pub name: String,
    pub layer: Option<String>,
    pub geometry: InstanceGeometry,
    pub title_geometry: Option<TitleGeometry>,
    pub locked: Option<bool>,
    pub bottom: Option<bool>,
    /// Layer name hidden in the PCB silkscreen.
    pub layer_hidden: Option<String>,
    /// Deduplicated by connector id.
    pub connectors: Vec<InstanceConnector>,
}

impl InstanceViewSettings {
    pub fn new(name: impl Into<String>, geometry: InstanceGeometry) -> Self {
        Self {
            name: name.into(),
            layer: None,
            geometry,
            title_geometry: None,
            locked: None,
            bottom: None,
            layer_hidden: None,
            connectors: Vec::new(),
        }
    }

    pub fn connector(&self, id: &str) -> Option<&InstanceConnector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    pub fn set_connector(&mut self, connector: InstanceConnector) {
        match self.connectors.iter_mut().find(|c| c.id == connector.id) {
            Some(existing) => *existing = connector,
            None => self.connectors.push(connector),
        }
    }
}

/// Geometry of an instance view: a plain placement with an optional affine
/// transform, or a wire with endpoint offsets, flag bits, and rendering
/// extras. Tagged variant, not a hierarchy; the serializer matches on it
/// exhaustively, and the parser picks the wire variant solely from the
/// presence of a `wireExtras` child in the XML.
#[derive(Debug, Clone, PartialEq)]
pub enum InstanceGeometry {
    Plain {
        geometry: Geometry,
        transform: Option<Transform>,
    },
    Wire {
        geometry: WireGeometry,
        extras: WireExtras,
    },
}

impl Default for InstanceGeometry {
    fn default() -> Self {
        InstanceGeometry::Plain {
            geometry: Geometry::default(),
            transform: None,
        }
    }
}

/// Wire placement: endpoints `(x1, y1)` / `(x2, y2)` are offsets from the
/// base `(x, y)`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WireGeometry {
    pub x: f64,
    pub y: f64,
    pub z: f64,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// Bit-flag field, preserved verbatim.
    pub wire_flags: i64,
}

/// Wire rendering extras (thickness in mils, color, opacity, banding, and an
/// optional bezier for breadboard-view curvature).
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WireExtras {
    pub mils: Option<f64>,
    pub color: Option<String>,
    pub opacity: Option<f64>,
    pub banded: Option<bool>,
    pub bezier: Option<Bezier>,
}

/// Placement and visibility of the floating instance-title label.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TitleGeometry {
    pub visible: Option<bool>,
    pub x: Option<f64>,
    pub y: Option<f64>,
    pub z: Option<f64>,
    pub x_offset: Option<f64>,
    pub y_offset: Option<f64>,
    pub text_color: Option<String>,
    pub font_size: Option<String>,
    /// Property names forced visible in the label, in order. When non-empty
    /// this overrides the part-level `show_in_label` flags in consumers; the
    /// model stores both without computing the precedence.
    pub visible_properties: Vec<String>,
}

/// Concrete per-instance state of a part connector in one view.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceConnector {
    pub id: String,
    pub layer: Option<String>,
    pub geometry: Option<Geometry>,
    /// Bendable-leg trace, in order. See [`PointBezierPair`] for the
    /// parallel-array pairing rule.
    pub leg: Vec<PointBezierPair>,
    /// Wiring-topology edges. Directed per endpoint; a real connection is
    /// expected to appear symmetrically at both ends, but that is a
    /// convention the model does not enforce.
    pub connects_to: Vec<InstanceConnectorReference>,
}

impl InstanceConnector {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn push_leg_point(&mut self, point: Point, bezier: Option<Bezier>) {
        self.leg.push(PointBezierPair { point, bezier });
    }
}

/// One edge of the wiring graph: a remote connector id plus the owning
/// instance's `model_index`. Never resolved at parse time.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct InstanceConnectorReference {
    pub connector_id: String,
    pub model_index: String,
    pub layer: Option<String>,
}
