use std::time::{SystemTime, UNIX_EPOCH};

use quickmenu_core::catalog::{
    flatten, load_catalog, parse_catalog_json5, CatalogSource, DirSource, FixtureSource, MenuNode,
};

#[test]
fn fixture_flattens_to_expected_paths() {
    let entries = load_catalog(&FixtureSource).unwrap();
    let paths: Vec<&str> = entries.iter().map(|e| e.path()).collect();
    assert_eq!(
        paths,
        vec![
            "3D/Axis",
            "3D/Camera",
            "3D/CameraTracker",
            "3D/Geometry/Card",
            "Draw/Rectangle",
            "Draw/Text",
            "Transform/Move2D",
            "Transform/MatchMove",
        ]
    );
}

#[test]
fn flatten_drops_dividers_hidden_items_and_accelerators() {
    let tree = MenuNode::group(
        "Nodes",
        vec![
            MenuNode::group(
                "&Edit",
                vec![
                    MenuNode::leaf("Cu&t"),
                    MenuNode::leaf(""),
                    MenuNode::leaf("@;&CopyBranch"),
                    MenuNode::leaf("Copy"),
                ],
            ),
            MenuNode::leaf("Standalone"),
        ],
    );

    let entries = flatten(&tree);
    let paths: Vec<&str> = entries.iter().map(|e| e.path()).collect();
    assert_eq!(paths, vec!["Edit/Cut", "Edit/Copy", "Standalone"]);
}

#[test]
fn flatten_of_empty_tree_is_empty_not_an_error() {
    let tree = MenuNode::group("Nodes", Vec::new());
    assert!(flatten(&tree).is_empty());
}

#[test]
fn duplicate_leaves_stay_distinct_entries() {
    let tree = MenuNode::group(
        "Nodes",
        vec![MenuNode::group(
            "Draw",
            vec![MenuNode::leaf("Text"), MenuNode::leaf("Text")],
        )],
    );

    let entries = flatten(&tree);
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0], entries[1]);
}

#[test]
fn json5_definition_parses_groups_and_leaves() {
    let text = r#"{
        // node menu, hand maintained
        "3D": {
            Axis: null,
            Geometry: { Card: null },
        },
        Draw: { Text: null },
    }"#;

    let tree = parse_catalog_json5(text).unwrap();
    let paths: Vec<String> = flatten(&tree)
        .iter()
        .map(|e| e.path().to_string())
        .collect();
    assert_eq!(paths, vec!["3D/Axis", "3D/Geometry/Card", "Draw/Text"]);
}

#[test]
fn json5_rejects_malformed_definitions() {
    assert!(parse_catalog_json5("{ unclosed").is_err());
    assert!(parse_catalog_json5("[1, 2, 3]").is_err());
}

#[test]
fn directory_source_maps_folders_to_groups() {
    let unique = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap()
        .as_nanos();
    let root = std::env::temp_dir().join(format!("quickmenu-dir-source-{unique}"));
    std::fs::create_dir_all(root.join("3D/Geometry")).unwrap();
    std::fs::create_dir_all(root.join("Draw")).unwrap();
    std::fs::create_dir_all(root.join(".git")).unwrap();
    std::fs::write(root.join("3D/Axis.nk"), b"").unwrap();
    std::fs::write(root.join("3D/Geometry/Card.nk"), b"").unwrap();
    std::fs::write(root.join("Draw/Text.nk"), b"").unwrap();
    std::fs::write(root.join(".hidden"), b"").unwrap();
    std::fs::write(root.join(".git/config"), b"").unwrap();

    let source = DirSource::new(&root);
    assert_eq!(source.source_name(), "directory");
    let entries = load_catalog(&source).unwrap();
    let paths: Vec<&str> = entries.iter().map(|e| e.path()).collect();
    assert_eq!(
        paths,
        vec!["3D/Axis.nk", "3D/Geometry/Card.nk", "Draw/Text.nk"]
    );

    std::fs::remove_dir_all(&root).unwrap();
}

#[test]
fn missing_catalog_file_is_a_reported_error() {
    let source = quickmenu_core::catalog::Json5FileSource::new("/no/such/catalog.json5");
    let error = load_catalog(&source).unwrap_err();
    assert!(error.to_string().contains("failed to read catalog file"));
}
