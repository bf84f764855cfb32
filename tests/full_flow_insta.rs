use mijia_configs::{
    generate_configs,
    settings::{FilePair, NamesConfig, Settings, SmartHomeConfig},
    smarthome::ITEMS_FILE_NAME,
};

#[test]
fn smarthome_items_snapshot() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("jsondb");
    let output = dir.path().join("generated");
    std::fs::create_dir(&input).unwrap();
    std::fs::write(input.join(ITEMS_FILE_NAME), "{}").unwrap();
    std::fs::write(dir.path().join("names.conf"), "AA:BB:CC:DD:EE:FF=Kitchen\n").unwrap();

    let settings = Settings {
        names: NamesConfig {
            input: Some(dir.path().join("names.conf")),
        },
        smarthome: SmartHomeConfig {
            jsondb: FilePair {
                input: Some(input),
                output: Some(output.clone()),
            },
        },
        ..Default::default()
    };

    let generate_result = generate_configs(&settings);

    assert!(
        generate_result.is_ok(),
        "Error generating configs: {:?}",
        generate_result.err()
    );

    let text = std::fs::read_to_string(output.join(ITEMS_FILE_NAME)).unwrap();
    let text = text.trim_end();

    insta::assert_snapshot!("smarthome_items", text);
}
