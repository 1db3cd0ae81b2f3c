use fritzing::{Part, Sketch, SketchViewSettings};
use fritzing_archive::*;
use std::io::Write;

fn sample_part(module_id: &str, title: &str) -> Part {
    let mut part = Part::new(module_id);
    part.fritzing_version = Some("0.9.3".into());
    part.title = Some(title.into());
    part
}

fn sample_sketch() -> Sketch {
    let mut sketch = Sketch {
        fritzing_version: Some("0.9.3".into()),
        ..Default::default()
    };
    sketch.set_view(SketchViewSettings {
        name: "breadboard".into(),
        show_grid: Some(true),
        ..Default::default()
    });
    sketch
}

/// Hand-rolled archive for failure-injection tests.
fn zip_of(entries: &[(&str, &[u8])]) -> Vec<u8> {
    let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));
    for (name, bytes) in entries {
        writer
            .start_file(*name, zip::write::FileOptions::<()>::default())
            .unwrap();
        writer.write_all(bytes).unwrap();
    }
    writer.finish().unwrap().into_inner()
}

#[test]
fn part_bin_round_trips_in_order() {
    let mut bin = PartBin::new();
    bin.insert("led", sample_part("led-module", "LED")).unwrap();
    bin.insert("resistor", sample_part("resistor-module", "Resistor"))
        .unwrap();

    let bytes = bin.to_zip().unwrap();
    let reparsed = PartBin::from_zip(&bytes).unwrap();

    assert_eq!(reparsed, bin);
    let keys: Vec<_> = reparsed.iter().map(|(n, _)| n).collect();
    assert_eq!(keys, vec!["led", "resistor"]);
    assert_eq!(reparsed.get("led").unwrap().module_id, "led-module");
}

#[test]
fn sketch_bundle_round_trips_primaries_and_auxiliaries() {
    let mut bundle = SketchBundle::new();
    bundle
        .insert_primary("project.fz", sample_sketch())
        .unwrap();
    bundle
        .insert_auxiliary("breadboard.png", vec![0x89, 0x50, 0x4e, 0x47])
        .unwrap();
    bundle
        .insert_auxiliary("firmware/blink.ino", b"void loop() {}".to_vec())
        .unwrap();

    let bytes = bundle.to_zip().unwrap();
    let reparsed = SketchBundle::from_zip(&bytes).unwrap();

    assert_eq!(reparsed.primary_count(), 1);
    assert_eq!(reparsed.auxiliary_count(), 2);
    assert_eq!(reparsed.primary("project.fz").unwrap(), &sample_sketch());
    assert_eq!(
        reparsed.auxiliary("breadboard.png").unwrap(),
        &[0x89, 0x50, 0x4e, 0x47]
    );
    assert_eq!(
        reparsed.auxiliary("firmware/blink.ino").unwrap(),
        b"void loop() {}"
    );
}

#[test]
fn part_bundle_classifies_by_fzp_suffix() {
    let mut bundle = PartBundle::new();
    bundle
        .insert_primary("led.fzp", sample_part("led-module", "LED"))
        .unwrap();
    bundle
        .insert_auxiliary("svg.breadboard.led.svg", b"<svg/>".to_vec())
        .unwrap();

    let bytes = bundle.to_zip().unwrap();
    let reparsed = PartBundle::from_zip(&bytes).unwrap();

    assert_eq!(reparsed.primary_count(), 1);
    assert_eq!(reparsed.auxiliary_count(), 1);
    assert_eq!(reparsed.primary("led.fzp").unwrap().module_id, "led-module");
}

#[test]
fn part_bin_bundle_nests_bins() {
    let mut bin = PartBin::new();
    bin.insert("led", sample_part("led-module", "LED")).unwrap();

    let mut bundle = PartBinBundle::new();
    bundle.insert_primary("core.fzb", bin.clone()).unwrap();
    bundle
        .insert_auxiliary("icon.png", vec![1, 2, 3])
        .unwrap();

    let bytes = bundle.to_zip().unwrap();
    let reparsed = PartBinBundle::from_zip(&bytes).unwrap();

    assert_eq!(reparsed.primary("core.fzb").unwrap(), &bin);
    assert_eq!(reparsed.auxiliary("icon.png").unwrap(), &[1, 2, 3]);
}

#[test]
fn empty_entry_fails_the_whole_parse() {
    let good = sample_sketch().serialize().unwrap();
    let bytes = zip_of(&[
        ("project.fz", good.as_bytes()),
        ("notes.txt", b""),
        ("readme.md", b"fine"),
    ]);

    match SketchBundle::from_zip(&bytes) {
        Err(ArchiveError::EmptyEntry { name }) => assert_eq!(name, "notes.txt"),
        other => panic!("expected EmptyEntry, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn empty_primary_entry_is_also_fatal() {
    let bytes = zip_of(&[("project.fz", b"")]);
    assert!(matches!(
        SketchBundle::from_zip(&bytes),
        Err(ArchiveError::EmptyEntry { .. })
    ));
}

#[test]
fn bad_primary_document_names_the_entry() {
    let bytes = zip_of(&[("broken.fz", b"<not-a-module/>")]);
    match SketchBundle::from_zip(&bytes) {
        Err(ArchiveError::Document { name, .. }) => assert_eq!(name, "broken.fz"),
        other => panic!("expected Document error, got {:?}", other.map(|_| ())),
    }
}

#[test]
fn non_utf8_primary_is_rejected() {
    let bytes = zip_of(&[("bad.fz", &[0xff, 0xfe, 0x00, 0x01])]);
    assert!(matches!(
        SketchBundle::from_zip(&bytes),
        Err(ArchiveError::Utf8 { .. })
    ));
}

#[test]
fn zip_files_round_trip_through_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("project.fzz");

    let mut bundle = SketchBundle::new();
    bundle
        .insert_primary("project.fz", sample_sketch())
        .unwrap();
    bundle.to_zip_file(&path).unwrap();

    let reparsed = SketchBundle::from_zip_file(&path).unwrap();
    assert_eq!(reparsed.primary_count(), 1);
}
