use pipeplan::core::assembler::PipelineAssembler;
use pipeplan::core::interfaces::ConfigSink;
use pipeplan::core::models::{BuildConfiguration, BuildMode, ModeResolution};
use pipeplan::infrastructure::{FileSink, TokioFileSystemService};
use pipeplan::utils::{CliOverrides, ConfigLoader, PipeplanError, CONFIG_FILE_NAME};
use std::path::PathBuf;
use std::sync::Arc;

fn write_config(root: &std::path::Path, content: &str) {
    std::fs::write(root.join(CONFIG_FILE_NAME), content).unwrap();
}

#[test]
fn test_config_file_reshapes_layout() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_config(
        temp_dir.path(),
        r#"{
            "context": "app",
            "outdir": "public",
            "entry": "./main.js",
            "templates": { "secondary": "./views/signup.html", "secondaryFilename": "signup.html" },
            "assetsDir": "static",
            "devServerPort": 3000
        }"#,
    );

    let file_config = ConfigLoader::load_from_file(temp_dir.path()).unwrap();
    let settings = ConfigLoader::merge_with_cli(
        file_config,
        temp_dir.path().to_path_buf(),
        &CliOverrides::default(),
    );

    let config = PipelineAssembler::new(settings.layout)
        .with_port(settings.port)
        .assemble(BuildMode::Development);

    assert_eq!(config.context, temp_dir.path().join("app"));
    assert_eq!(config.output.path, temp_dir.path().join("public"));
    assert_eq!(config.entry["main"][1], "./main.js");
    assert_eq!(config.dev_server.port, 3000);

    let json = serde_json::to_value(&config).unwrap();
    assert_eq!(json["plugins"][1]["filename"], "signup.html");
    assert_eq!(json["plugins"][1]["template"], "./views/signup.html");
    assert_eq!(
        PathBuf::from(json["plugins"][3]["patterns"][0]["to"].as_str().unwrap()),
        temp_dir.path().join("public/static")
    );
}

#[test]
fn test_strict_mode_from_file() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_config(temp_dir.path(), r#"{"strictMode": true}"#);

    let file_config = ConfigLoader::load_from_file(temp_dir.path()).unwrap();
    let settings = ConfigLoader::merge_with_cli(
        file_config,
        temp_dir.path().to_path_buf(),
        &CliOverrides::default(),
    );
    assert_eq!(settings.resolution, ModeResolution::Strict);

    let err = PipelineAssembler::new(settings.layout)
        .with_resolution(settings.resolution)
        .assemble_from_flag(Some("prod"))
        .unwrap_err();
    assert!(matches!(err, PipeplanError::InvalidMode(_)));
}

#[test]
fn test_malformed_config_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    write_config(temp_dir.path(), "{ not json");

    let err = ConfigLoader::load_from_file(temp_dir.path()).unwrap_err();
    let detailed = err.format_detailed();
    assert!(detailed.contains("Failed to parse pipeplan.config.json"));
    assert!(detailed.contains(CONFIG_FILE_NAME));
}

#[tokio::test]
async fn test_file_sink_writes_compact_json() {
    let temp_dir = tempfile::tempdir().unwrap();
    let out = temp_dir.path().join("build/pipeline.json");
    let config = PipelineAssembler::new(Default::default()).assemble(BuildMode::Production);

    FileSink::new(Arc::new(TokioFileSystemService), out.clone())
        .emit(&config, false)
        .await
        .unwrap();

    let written = std::fs::read_to_string(&out).unwrap();
    assert_eq!(written.lines().count(), 1);

    let parsed: BuildConfiguration = serde_json::from_str(&written).unwrap();
    assert_eq!(parsed.mode, BuildMode::Production);
    assert_eq!(parsed.plugins.len(), 6);
}
