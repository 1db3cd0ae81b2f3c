use fritzing::*;

fn full_sketch() -> Sketch {
    let mut sketch = Sketch {
        fritzing_version: Some("0.9.3".into()),
        ..Default::default()
    };

    sketch.programs.push(Program {
        pid: Some("p1".into()),
        language: Some("arduino".into()),
        author: Some("ada".into()),
        path: "firmware/blink.ino".into(),
    });
    sketch.boards.push(Board {
        module_id: Some("rectangle-pcb".into()),
        title: Some("Rectangular PCB".into()),
        instance: Some("PCB1".into()),
        width: Some("5.6cm".into()),
        height: Some("3.7cm".into()),
    });

    sketch.set_view(SketchViewSettings {
        name: "breadboard".into(),
        background_color: Some("#f2f2f2".into()),
        grid_size: Some("0.1in".into()),
        show_grid: Some(true),
        align_to_grid: Some(false),
        view_from_below: None,
        pcb: None,
    });
    sketch.set_view(SketchViewSettings {
        name: "pcb".into(),
        background_color: Some("#a0a0a0".into()),
        grid_size: Some("0.05in".into()),
        show_grid: Some(false),
        align_to_grid: Some(false),
        view_from_below: Some(false),
        pcb: Some(PcbViewSettings {
            ar_hole_size: Some("0.4mm".into()),
            ar_trace_width: Some("24mil".into()),
            ar_ring_width: Some("0.3mm".into()),
            keepout_drc: Some("0.01in".into()),
            keepout_gpg: Some("0.01in".into()),
        }),
    });

    let mut led = Instance::new("5mmColorLEDModuleID", "3");
    led.path = Some("parts/led.fzp".into());
    led.title = Some("LED1".into());
    led.properties.push(Property::new("color", "red"));
    led.local_connectors.push(LocalConnector {
        id: "connector0".into(),
        name: Some("anode".into()),
    });

    let mut led_view = InstanceViewSettings::new(
        "breadboard",
        InstanceGeometry::Plain {
            geometry: Geometry::new(71.5, 24.0, 2.5),
            transform: Some(Transform {
                m11: 0.0,
                m12: 1.0,
                m21: -1.0,
                m22: 0.0,
                ..Transform::IDENTITY
            }),
        },
    );
    led_view.layer = Some("breadboard".into());
    led_view.locked = Some(false);
    led_view.title_geometry = Some(TitleGeometry {
        visible: Some(true),
        x: Some(80.0),
        y: Some(10.0),
        z: Some(5.5),
        x_offset: Some(8.5),
        y_offset: Some(-14.0),
        text_color: Some("#000000".into()),
        font_size: Some("9".into()),
        visible_properties: vec!["color".into(), "package".into()],
    });

    let mut pin = InstanceConnector::new("connector0");
    pin.layer = Some("breadboard".into());
    pin.geometry = Some(Geometry::new(0.0, 2.0, 0.0));
    pin.push_leg_point(Point::new(0.0, 0.0), None);
    pin.push_leg_point(
        Point::new(5.0, 5.0),
        Some(Bezier {
            cp0: Point::new(1.0, 1.0),
            cp1: Point::new(4.0, 4.0),
        }),
    );
    pin.connects_to.push(InstanceConnectorReference {
        connector_id: "connector1".into(),
        model_index: "7".into(),
        layer: Some("breadboard".into()),
    });
    led_view.set_connector(pin);
    led.set_view(led_view);
    sketch.set_instance(led);

    let mut wire = Instance::new("WireModuleID", "7");
    wire.title = Some("Wire1".into());
    let mut wire_view = InstanceViewSettings::new(
        "breadboard",
        InstanceGeometry::Wire {
            geometry: WireGeometry {
                x: 100.0,
                y: 50.0,
                z: 3.5,
                x1: 0.0,
                y1: 0.0,
                x2: 28.5,
                y2: -12.0,
                wire_flags: 32,
            },
            extras: WireExtras {
                mils: Some(2.25),
                color: Some("#418dd9".into()),
                opacity: Some(1.0),
                banded: Some(false),
                bezier: Some(Bezier {
                    cp0: Point::new(3.0, 3.0),
                    cp1: Point::new(20.0, -8.0),
                }),
            },
        },
    );
    wire_view.layer = Some("breadboardWire".into());
    wire_view.bottom = Some(false);
    let mut end = InstanceConnector::new("connector1");
    end.connects_to.push(InstanceConnectorReference {
        connector_id: "connector0".into(),
        model_index: "3".into(),
        layer: Some("breadboard".into()),
    });
    wire_view.set_connector(end);
    wire.set_view(wire_view);
    sketch.set_instance(wire);

    sketch
}

#[test]
fn full_sketch_round_trips() {
    let sketch = full_sketch();
    let xml = sketch.serialize().unwrap();
    let reparsed = Sketch::parse(&xml).unwrap();
    assert_eq!(reparsed, sketch);
}

// The worked example from the format notes: one board, one breadboard view,
// zero instances.
#[test]
fn board_and_view_attribute_encoding() {
    let mut sketch = Sketch {
        fritzing_version: Some("0.9.3".into()),
        ..Default::default()
    };
    sketch.boards.push(Board {
        module_id: Some("b1".into()),
        title: Some("Board1".into()),
        instance: Some("i1".into()),
        width: Some("3.5in".into()),
        height: Some("2.5in".into()),
    });
    sketch.set_view(SketchViewSettings {
        name: "breadboard".into(),
        show_grid: Some(true),
        align_to_grid: Some(false),
        ..Default::default()
    });

    let xml = sketch.serialize().unwrap();
    assert!(xml.contains(r#"moduleId="b1""#));
    assert!(xml.contains(r#"name="breadboardView" showGrid="1" alignToGrid="0""#));

    let reparsed = Sketch::parse(&xml).unwrap();
    assert_eq!(reparsed, sketch);
}

#[test]
fn leg_serializes_parallel_arrays_with_placeholders() {
    let sketch = full_sketch();
    let xml = sketch.serialize().unwrap();

    let leg_start = xml.find("<leg>").unwrap();
    let leg_end = xml.find("</leg>").unwrap();
    let leg = &xml[leg_start..leg_end];

    assert_eq!(leg.matches("<point ").count(), 2);
    // two slots: one empty placeholder, one real bezier, in that order
    let placeholder = leg.find("<bezier/>").unwrap();
    let real = leg.find("<bezier>").unwrap();
    assert!(placeholder < real);

    let reparsed = Sketch::parse(&xml).unwrap();
    let leg = &reparsed
        .instance("3")
        .unwrap()
        .view("breadboard")
        .unwrap()
        .connector("connector0")
        .unwrap()
        .leg;
    assert_eq!(leg.len(), 2);
    assert_eq!(leg[0].bezier, None);
    assert_eq!(leg[1].bezier.unwrap().cp0, Point::new(1.0, 1.0));
}

#[test]
fn mismatched_leg_arrays_are_rejected() {
    let xml = r#"<module fritzingVersion="0.9.3">
  <instances>
    <instance moduleIdRef="m" modelIndex="1">
      <views>
        <breadboardView layer="breadboard">
          <geometry x="0" y="0" z="0"/>
          <connectors>
            <connector connectorId="connector0">
              <leg>
                <point x="0" y="0"/>
                <point x="1" y="1"/>
                <bezier/>
              </leg>
            </connector>
          </connectors>
        </breadboardView>
      </views>
    </instance>
  </instances>
</module>"#;

    assert!(matches!(
        Sketch::parse(xml),
        Err(FritzingError::InvalidAttribute(_))
    ));
}

#[test]
fn wire_discrimination_is_by_wire_extras_presence() {
    let sketch = full_sketch();
    let xml = sketch.serialize().unwrap();
    let reparsed = Sketch::parse(&xml).unwrap();

    match &reparsed.instance("7").unwrap().view("breadboard").unwrap().geometry {
        InstanceGeometry::Wire { geometry, extras } => {
            assert_eq!(geometry.x2, 28.5);
            assert_eq!(geometry.wire_flags, 32);
            assert_eq!(extras.banded, Some(false));
        }
        InstanceGeometry::Plain { .. } => panic!("wireExtras child should force a wire view"),
    }
    match &reparsed.instance("3").unwrap().view("breadboard").unwrap().geometry {
        InstanceGeometry::Plain { transform, .. } => {
            assert_eq!(transform.unwrap().m12, 1.0);
        }
        InstanceGeometry::Wire { .. } => panic!("no wireExtras child means a plain view"),
    }
}

#[test]
fn pcb_view_is_selected_by_bare_name() {
    let xml = r#"<module fritzingVersion="0.9.3">
  <views>
    <view name="pcbView" arHoleSize="0.4mm" arTraceWidth="24mil"/>
    <view name="schematicView" showGrid="1"/>
  </views>
</module>"#;

    let sketch = Sketch::parse(xml).unwrap();
    let pcb = sketch.view("pcb").unwrap().pcb.as_ref().unwrap();
    assert_eq!(pcb.ar_hole_size.as_deref(), Some("0.4mm"));
    assert_eq!(pcb.ar_trace_width.as_deref(), Some("24mil"));
    assert!(sketch.view("schematic").unwrap().pcb.is_none());
}

#[test]
fn boolean_spellings_are_per_field() {
    let sketch = full_sketch();
    let xml = sketch.serialize().unwrap();

    // sketch-level view flags use 1/0
    assert!(xml.contains(r#"showGrid="1""#));
    assert!(xml.contains(r#"alignToGrid="0""#));
    assert!(xml.contains(r#"banded="0""#));
    // instance flags use true/false
    assert!(xml.contains(r#"locked="false""#));
    assert!(xml.contains(r#"bottom="false""#));
    assert!(xml.contains(r#"visible="true""#));

    // generic truthy coercion is rejected on parse
    let bad = r#"<module><views><view name="breadboardView" showGrid="true"/></views></module>"#;
    assert!(matches!(
        Sketch::parse(bad),
        Err(FritzingError::InvalidAttribute(_))
    ));
}

#[test]
fn connection_references_stay_unresolved() {
    let mut sketch = full_sketch();
    // point the wire at an instance that does not exist; this must parse
    sketch.instances[1].view_settings[0].connectors[0].connects_to[0].model_index = "99".into();

    let xml = sketch.serialize().unwrap();
    let reparsed = Sketch::parse(&xml).unwrap();
    let reference = &reparsed.instance("7").unwrap().view("breadboard").unwrap().connectors[0]
        .connects_to[0];
    assert_eq!(reference.model_index, "99");
    assert!(reparsed.instance("99").is_none());
}

#[test]
fn empty_program_path_round_trips() {
    let mut sketch = Sketch::default();
    sketch.programs.push(Program {
        pid: Some("p1".into()),
        language: Some("arduino".into()),
        author: None,
        path: String::new(),
    });

    let xml = sketch.serialize().unwrap();
    assert!(xml.contains(r#"<program pid="p1" language="arduino"/>"#));

    let reparsed = Sketch::parse(&xml).unwrap();
    assert_eq!(reparsed, sketch);
    assert_eq!(reparsed.programs[0].path, "");
}

#[test]
fn duplicate_instance_property_collapses_to_last() {
    let xml = r#"<module>
  <instances>
    <instance moduleIdRef="m" modelIndex="1">
      <properties>
        <property name="color" value="red"/>
        <property name="package" value="5mm"/>
        <property name="color" value="blue"/>
      </properties>
      <views><breadboardView><geometry x="0" y="0" z="0"/></breadboardView></views>
    </instance>
  </instances>
</module>"#;

    let sketch = Sketch::parse(xml).unwrap();
    let instance = sketch.instance("1").unwrap();
    assert_eq!(instance.properties.len(), 2);
    assert_eq!(instance.property("color").unwrap().value, "blue");
    assert_eq!(instance.property("package").unwrap().value, "5mm");
}

#[test]
fn duplicate_model_index_collapses_to_last() {
    let xml = r#"<module>
  <instances>
    <instance moduleIdRef="a" modelIndex="1">
      <views><breadboardView><geometry x="0" y="0" z="0"/></breadboardView></views>
    </instance>
    <instance moduleIdRef="b" modelIndex="1">
      <views><breadboardView><geometry x="1" y="1" z="1"/></breadboardView></views>
    </instance>
  </instances>
</module>"#;

    let sketch = Sketch::parse(xml).unwrap();
    assert_eq!(sketch.instances.len(), 1);
    assert_eq!(sketch.instances[0].module_id_ref, "b");
}
