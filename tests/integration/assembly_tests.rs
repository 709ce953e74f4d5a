use pipeplan::core::assembler::{
    assemble, resolve_filename_template, resolve_loader_chain, resolve_optimization_policy,
    resolve_plugin_list, PipelineAssembler,
};
use pipeplan::core::layout::ProjectLayout;
use pipeplan::core::matchers::ExtensionGroup;
use pipeplan::core::models::*;
use pipeplan::utils::PipeplanError;
use rstest::rstest;

#[test]
fn test_development_scenario() {
    let config = assemble(BuildMode::Development, &ProjectLayout::default());

    assert!(config.dev_server.hot, "hot reload should be on in development");
    assert_eq!(config.dev_server.port, 8080);
    assert_eq!(config.plugins.len(), 5);
    assert!(config.optimization.minimizers.is_empty());
    assert!(config.optimization.split_chunks_enabled());
    assert_eq!(config.devtool, Devtool::SourceMap);
    assert_eq!(config.output.filename.as_str(), "[name].js");
}

#[test]
fn test_production_scenario() {
    let config = assemble(BuildMode::Production, &ProjectLayout::default());

    assert!(!config.dev_server.hot, "hot reload should be off in production");
    assert_eq!(config.dev_server.port, 8080);
    assert_eq!(config.plugins.len(), 6);
    assert_eq!(config.plugins.last(), Some(&PluginDescriptor::BundleAnalysis));
    assert_eq!(config.optimization.minimizers.len(), 2);
    assert_eq!(config.devtool, Devtool::None);

    let templates = config.filename_templates();
    assert_eq!(templates.len(), 2, "output and css extraction templates");
    for template in templates {
        assert!(
            template.has_hash_segment(),
            "{} should carry a build hash",
            template
        );
    }
}

#[rstest]
#[case(BuildMode::Development)]
#[case(BuildMode::Production)]
fn test_assemble_is_idempotent(#[case] mode: BuildMode) {
    let layout = ProjectLayout::for_root("/srv/app");
    let first = assemble(mode, &layout);
    let second = assemble(mode, &layout);

    assert_eq!(first, second);
    assert_eq!(first.to_json(false).unwrap(), second.to_json(false).unwrap());
}

#[rstest]
#[case(BuildMode::Development)]
#[case(BuildMode::Production)]
fn test_assemble_composes_resolvers(#[case] mode: BuildMode) {
    let layout = ProjectLayout::default();
    let config = assemble(mode, &layout);

    assert_eq!(config.optimization, resolve_optimization_policy(mode));
    assert_eq!(config.plugins, resolve_plugin_list(mode, &layout));
    assert_eq!(config.output.filename, resolve_filename_template(mode, "js"));
    for rule in &config.module.rules {
        assert_eq!(rule.chain, resolve_loader_chain(rule.group, mode));
    }
}

#[test]
fn test_minimizer_order() {
    let policy = resolve_optimization_policy(BuildMode::Production);
    assert_eq!(
        policy.minimizers,
        vec![
            MinimizerDescriptor::StyleMinifier,
            MinimizerDescriptor::ScriptMinifier
        ]
    );
    assert_eq!(
        policy.minimizers[1].plugin_name(),
        "terser-webpack-plugin"
    );
}

#[test]
fn test_plugin_lists_share_a_prefix() {
    let layout = ProjectLayout::default();
    let dev = resolve_plugin_list(BuildMode::Development, &layout);
    let prod = resolve_plugin_list(BuildMode::Production, &layout);

    // CSS extraction filename differs by mode; every other base plugin is identical
    assert_eq!(dev[..4], prod[..4]);
    assert!(matches!(dev[4], PluginDescriptor::CssExtract { .. }));
    assert!(matches!(prod[4], PluginDescriptor::CssExtract { .. }));
}

#[test]
fn test_copy_rules_target_assets_dir() {
    let layout = ProjectLayout::for_root("/srv/app");
    let plugins = resolve_plugin_list(BuildMode::Development, &layout);

    let patterns = plugins
        .iter()
        .find_map(|plugin| match plugin {
            PluginDescriptor::CopyAssets { patterns } => Some(patterns),
            _ => None,
        })
        .expect("copy plugin present");

    assert_eq!(patterns.len(), 2);
    assert_eq!(
        patterns[0].from,
        std::path::PathBuf::from("/srv/app/src/favicon.ico")
    );
    assert_eq!(
        patterns[1].from,
        std::path::PathBuf::from("/srv/app/src/assets/images/user-icon.svg")
    );
    for rule in patterns {
        assert_eq!(rule.to, std::path::PathBuf::from("/srv/app/dist/assets"));
    }
}

#[rstest]
#[case("src/app/index.js", Some(ExtensionGroup::Script))]
#[case("node_modules/react/index.js", None)]
#[case("src/theme.sass", Some(ExtensionGroup::Scss))]
#[case("src/fonts/inter.woff", Some(ExtensionGroup::Font))]
#[case("src/data/rows.csv", Some(ExtensionGroup::Csv))]
#[case("src/app/index.ts", None)]
fn test_rule_for(#[case] path: &str, #[case] expected: Option<ExtensionGroup>) {
    let config = assemble(BuildMode::Development, &ProjectLayout::default());
    let rule = config.rule_for(path).unwrap();
    assert_eq!(rule.map(|r| r.group), expected);
}

#[test]
fn test_unrecognized_flag_becomes_production() {
    // A typo silently selects production; this pins that behavior
    let assembler = PipelineAssembler::new(ProjectLayout::default());
    let config = assembler.assemble_from_flag(Some("devlopment")).unwrap();

    assert_eq!(config.mode, BuildMode::Production);
    assert_eq!(config.plugins.len(), 6);
    assert!(!config.dev_server.hot);
}

#[test]
fn test_unset_flag_becomes_production() {
    let assembler = PipelineAssembler::new(ProjectLayout::default());
    let config = assembler.assemble_from_flag(None).unwrap();
    assert_eq!(config.mode, BuildMode::Production);
}

#[test]
fn test_strict_resolution_surfaces_invalid_mode() {
    let assembler =
        PipelineAssembler::new(ProjectLayout::default()).with_resolution(ModeResolution::Strict);

    let err = assembler.assemble_from_flag(Some("devlopment")).unwrap_err();
    assert!(matches!(err, PipeplanError::InvalidMode(ref raw) if raw == "devlopment"));
}

#[test]
fn test_json_shape() {
    let config = assemble(BuildMode::Development, &ProjectLayout::default());
    let json: serde_json::Value = serde_json::from_str(&config.to_json(true).unwrap()).unwrap();

    assert_eq!(json["mode"], "development");
    assert_eq!(json["devServer"]["port"], 8080);
    assert_eq!(json["devServer"]["hot"], true);
    assert_eq!(json["devtool"], "source-map");
    assert_eq!(json["optimization"]["splitChunks"]["chunks"], "all");
    assert_eq!(json["entry"]["main"][0], "@babel/polyfill");
    assert_eq!(json["module"]["rules"][1]["test"], r"\.s[ac]ss$");
    assert_eq!(json["module"]["rules"][1]["use"][2]["loader"], "sass-loader");
    assert_eq!(json["module"]["rules"][6]["exclude"], "node_modules");
    assert_eq!(json["plugins"][1]["filename"], "reg.html");
}
