use clitutor_catalog::{Catalog, Difficulty};

fn load_fixture() -> Catalog {
    let document = include_str!("data/catalog_fixture.json");
    Catalog::from_json_str(document).expect("load catalog from fixture")
}

#[test]
fn fixture_loads_with_first_definition_kept() {
    let catalog = load_fixture();
    assert_eq!(catalog.commands().len(), 3);
    let version = catalog.find("tool-version").expect("tool-version present");
    assert_eq!(version.output, "tool v1.0.0");
    assert_eq!(version.difficulty, Difficulty::Beginner);
    assert_eq!(catalog.shadowed().len(), 1);
    assert_eq!(catalog.shadowed()[0].output, "tool v2.0.0");
}

#[test]
fn lint_reports_shadowed_and_dangling() {
    let catalog = load_fixture();
    let lint = catalog.lint();
    assert!(!lint.is_clean());
    assert_eq!(lint.shadowed.len(), 1);
    assert_eq!(lint.shadowed[0].id, "tool-version");
    assert!(lint.orphaned.is_empty());
    assert_eq!(lint.dangling.len(), 1, "dangling: {:?}", lint.dangling);
    assert_eq!(lint.dangling[0].reference, "tool config");

    let rendered = lint.to_string();
    assert!(rendered.contains("tool-help -> tool config"), "rendered: {rendered}");
}

#[test]
fn categories_hold_filtered_commands_in_order() {
    let catalog = load_fixture();
    let basic: Vec<_> = catalog.commands_in("basic").map(|command| command.id.as_str()).collect();
    assert_eq!(basic, vec!["tool-help", "tool-version"]);
    assert_eq!(catalog.commands_in("pipeline").count(), 1);
    assert_eq!(catalog.total_command_count(), 3);
}

#[test]
fn embedded_catalog_matches_known_shape() {
    let catalog = Catalog::from_embedded().expect("embedded catalog");
    let ids: Vec<_> = catalog.categories().iter().map(|category| category.id.as_str()).collect();
    assert_eq!(ids, vec!["basic", "chat", "generation", "analysis", "flags", "pipeline"]);

    let counts: Vec<_> = catalog
        .categories()
        .iter()
        .map(|category| catalog.commands_in(&category.id).count())
        .collect();
    assert_eq!(counts, vec![16, 6, 1, 1, 15, 5]);
    assert_eq!(catalog.total_command_count(), 44);
    assert_eq!(catalog.shadowed().len(), 11);

    let shadowed_ids: Vec<_> = catalog.shadowed().iter().map(|command| command.id.as_str()).collect();
    for id in ["claude-update", "claude-mcp", "claude-add-dir"] {
        assert!(shadowed_ids.contains(&id), "{id} should be reported as shadowed");
    }
}

#[test]
fn help_command_carries_canned_output() {
    let catalog = Catalog::from_embedded().expect("embedded catalog");
    let help = catalog.resolve("claude --help").expect("resolve by display name");
    assert_eq!(help.id, "claude-help");
    assert_eq!(help.example, "claude --help");
    assert!(help.output.ends_with("--verbose   Enable verbose output"));
}
