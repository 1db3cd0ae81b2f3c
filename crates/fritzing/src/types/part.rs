//! Typed model of a reusable component definition (`.fzp`).
//!
//! All optional fields distinguish "absent" (`None`) from "present but
//! empty/false/zero" (`Some`); the codec emits nothing at all for `None`.
//! Keyed collections stay insertion-ordered `Vec`s; the `set_*` mutators
//! replace an existing entry with the same key in place.

/// A reusable component definition, the root document of a `.fzp` file.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Part {
    pub module_id: String,
    pub fritzing_version: Option<String>,
    pub reference_file: Option<String>,
    /// Obsolescence pointer to the module that supersedes this one.
    pub replaced_by: Option<String>,
    pub default_units: Option<String>,
    pub version: Option<String>,
    pub author: Option<String>,
    pub title: Option<String>,
    pub label: Option<String>,
    pub url: Option<String>,
    pub date: Option<String>,
    pub description: Option<String>,
    pub taxonomy: Option<String>,
    pub language: Option<String>,
    pub family: Option<String>,
    pub variant: Option<String>,
    pub ignore_terminal_points: Option<bool>,
    /// Deduplicated by equality, insertion order preserved.
    pub tags: Vec<String>,
    /// Deduplicated by name.
    pub properties: Vec<PartProperty>,
    /// Deduplicated by bare view name (breadboard/icon/pcb/schematic).
    pub view_settings: Vec<PartViewSettings>,
    /// Deduplicated by connector id.
    pub connectors: Vec<PartConnector>,
    /// Deduplicated by bus id.
    pub buses: Vec<Bus>,
    /// Deduplicated by subpart id.
    pub subparts: Vec<Subpart>,
}

impl Part {
    pub fn new(module_id: impl Into<String>) -> Self {
        Self {
            module_id: module_id.into(),
            ..Default::default()
        }
    }

    pub fn property(&self, name: &str) -> Option<&PartProperty> {
        self.properties.iter().find(|p| p.name == name)
    }

    pub fn view(&self, name: &str) -> Option<&PartViewSettings> {
        self.view_settings.iter().find(|v| v.name == name)
    }

    pub fn connector(&self, id: &str) -> Option<&PartConnector> {
        self.connectors.iter().find(|c| c.id == id)
    }

    pub fn bus(&self, id: &str) -> Option<&Bus> {
        self.buses.iter().find(|b| b.id == id)
    }

    pub fn subpart(&self, id: &str) -> Option<&Subpart> {
        self.subparts.iter().find(|s| s.id == id)
    }

    /// Adds a tag unless an equal tag is already present.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    pub fn set_property(&mut self, property: PartProperty) {
        match self.properties.iter_mut().find(|p| p.name == property.name) {
            Some(existing) => *existing = property,
            None => self.properties.push(property),
        }
    }

    pub fn set_view(&mut self, view: PartViewSettings) {
        match self.view_settings.iter_mut().find(|v| v.name == view.name) {
            Some(existing) => *existing = view,
            None => self.view_settings.push(view),
        }
    }

    pub fn set_connector(&mut self, connector: PartConnector) {
        match self.connectors.iter_mut().find(|c| c.id == connector.id) {
            Some(existing) => *existing = connector,
            None => self.connectors.push(connector),
        }
    }

    pub fn set_bus(&mut self, bus: Bus) {
        match self.buses.iter_mut().find(|b| b.id == bus.id) {
            Some(existing) => *existing = bus,
            None => self.buses.push(bus),
        }
    }

    pub fn set_subpart(&mut self, subpart: Subpart) {
        match self.subparts.iter_mut().find(|s| s.id == subpart.id) {
            Some(existing) => *existing = subpart,
            None => self.subparts.push(subpart),
        }
    }
}

/// Part-level property. `show_in_label` flags the property for label
/// rendering; a per-instance `visible_properties` override (when non-empty)
/// takes precedence in consumers, but both are stored verbatim here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartProperty {
    pub name: String,
    pub value: String,
    pub show_in_label: Option<bool>,
}

/// Rendering settings for one view of a part.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartViewSettings {
    /// Bare view name (`breadboard`, `icon`, `pcb`, `schematic`, ...).
    pub name: String,
    /// SVG image path relative to the part's resource root.
    pub image: Option<String>,
    pub flip_horizontal: Option<bool>,
    pub flip_vertical: Option<bool>,
    /// Deduplicated by layer id.
    pub layers: Vec<PartLayer>,
}

impl PartViewSettings {
    pub fn layer(&self, id: &str) -> Option<&PartLayer> {
        self.layers.iter().find(|l| l.id == id)
    }

    pub fn set_layer(&mut self, layer: PartLayer) {
        match self.layers.iter_mut().find(|l| l.id == layer.id) {
            Some(existing) => *existing = layer,
            None => self.layers.push(layer),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartLayer {
    pub id: String,
    pub sticky: Option<bool>,
}

/// A named point of electrical contact, defined abstractly on the part.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartConnector {
    pub id: String,
    pub name: Option<String>,
    /// XML attribute `type` (e.g. `male`, `female`, `pad`).
    pub kind: Option<String>,
    pub description: Option<String>,
    pub replaced_by: Option<String>,
    pub erc: Option<Erc>,
    /// Deduplicated by bare view name.
    pub view_settings: Vec<PartConnectorViewSettings>,
}

impl PartConnector {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn view(&self, name: &str) -> Option<&PartConnectorViewSettings> {
        self.view_settings.iter().find(|v| v.name == name)
    }

    pub fn set_view(&mut self, view: PartConnectorViewSettings) {
        match self.view_settings.iter_mut().find(|v| v.name == view.name) {
            Some(existing) => *existing = view,
            None => self.view_settings.push(view),
        }
    }
}

/// Electric-rule-check metadata. Preserved verbatim for external tooling;
/// never evaluated here.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Erc {
    /// XML attribute `etype`.
    pub kind: Option<String>,
    pub voltage: Option<f64>,
    pub current: Option<Current>,
    pub ignore: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Current {
    pub flow: Option<String>,
    pub value_max: Option<f64>,
}

/// Per-view layer bindings of a part connector.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartConnectorViewSettings {
    pub name: String,
    /// Deduplicated by layer name.
    pub layer_settings: Vec<PartConnectorLayerSettings>,
}

impl PartConnectorViewSettings {
    pub fn layer(&self, name: &str) -> Option<&PartConnectorLayerSettings> {
        self.layer_settings.iter().find(|l| l.layer == name)
    }

    pub fn set_layer(&mut self, settings: PartConnectorLayerSettings) {
        match self
            .layer_settings
            .iter_mut()
            .find(|l| l.layer == settings.layer)
        {
            Some(existing) => *existing = settings,
            None => self.layer_settings.push(settings),
        }
    }
}

/// Binding of a connector to one SVG layer. `terminal_id` and `leg_id` are
/// mutually exclusive by format convention; the model stores whatever the
/// document says.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PartConnectorLayerSettings {
    pub layer: String,
    pub svg_id: Option<String>,
    pub terminal_id: Option<String>,
    pub leg_id: Option<String>,
    pub disabled: Option<bool>,
}

/// Internal electrical connection grouping several of a part's connectors.
/// Members are connector-id foreign keys, resolved (if at all) by the caller
/// against [`Part::connector`].
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Bus {
    pub id: String,
    pub node_members: Vec<String>,
}

impl Bus {
    pub fn add_member(&mut self, connector_id: impl Into<String>) {
        let id = connector_id.into();
        if !self.node_members.contains(&id) {
            self.node_members.push(id);
        }
    }
}

/// Spatial grouping of a part's connectors into a sub-region, e.g. one half
/// of a dual op-amp package. Connector ids are unresolved foreign keys.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Subpart {
    pub id: String,
    pub label: Option<String>,
    pub connector_ids: Vec<String>,
}

impl Subpart {
    pub fn add_connector(&mut self, connector_id: impl Into<String>) {
        let id = connector_id.into();
        if !self.connector_ids.contains(&id) {
            self.connector_ids.push(id);
        }
    }
}
