use std::collections::BTreeMap;
use std::fs;

use feed_ingest::{
    CategoryFile, IngestError, parse_input_overrides, read_source_table, resolve_inputs,
};
use feed_model::Category;
use tempfile::TempDir;

#[test]
fn loads_staged_categories_and_reports_missing_ones() {
    let dir = TempDir::new().expect("temp dir");
    fs::write(
        dir.path().join("Natural.csv"),
        "ReportNo,shape,markupPrice\n1111,ROUND,1000\n2222,OVAL,\n",
    )
    .expect("write natural");
    fs::write(
        dir.path().join("gemstones.csv"),
        "\u{feff}ReportNo,gemType\nG-1,Sapphire\n",
    )
    .expect("write gemstones");

    let inputs = resolve_inputs(
        &CategoryFile::default_layout(),
        dir.path(),
        &BTreeMap::new(),
    );
    let loaded: Vec<_> = inputs
        .iter()
        .map(|input| (input.category, read_source_table(&input.path)))
        .collect();

    let (category, natural) = &loaded[0];
    assert_eq!(*category, Category::Natural);
    let natural = natural.as_ref().expect("natural table");
    assert_eq!(natural.len(), 2);
    assert_eq!(natural.row(1).expect("row").get("markupPrice"), "");

    assert!(matches!(
        loaded[1].1,
        Err(IngestError::FileNotFound { .. })
    ));

    let gemstones = loaded[2].1.as_ref().expect("gemstone table");
    assert!(gemstones.has_column("ReportNo"));
    assert_eq!(gemstones.row(0).expect("row").get("gemType"), "Sapphire");
}

#[test]
fn override_paths_are_read_instead_of_staged_files() {
    let staging = TempDir::new().expect("staging dir");
    let elsewhere = TempDir::new().expect("override dir");
    fs::write(
        staging.path().join("Labgrown.csv"),
        "stockId\nSTAGED\n",
    )
    .expect("write staged");
    let override_path = elsewhere.path().join("lab.csv");
    fs::write(&override_path, "stockId\nOVERRIDE\n").expect("write override");

    let entry = format!("lab-grown={}", override_path.display());
    let overrides = parse_input_overrides(&[entry]).expect("parse overrides");
    let inputs = resolve_inputs(
        &CategoryFile::default_layout(),
        staging.path(),
        &overrides,
    );

    let lab = inputs
        .iter()
        .find(|input| input.category == Category::LabGrown)
        .expect("lab-grown input");
    assert_eq!(lab.path, override_path);
    let table = read_source_table(&lab.path).expect("read override");
    assert_eq!(table.row(0).expect("row").get("stockId"), "OVERRIDE");
}
