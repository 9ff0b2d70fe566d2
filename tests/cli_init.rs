mod common;

use common::TestSite;

#[test]
fn init_scaffolds_starter_tree() {
    let site = TestSite::empty();

    let result = site.run(&["init"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(site.path("plinth.toml").exists());
    assert!(site.path("index.md").exists());
    assert!(site.path("_layouts/default.html").exists());
    assert!(site.path("_scripts/deploy.sh").exists());
    assert!(site.path("assets/.keep").exists());
    assert!(site.path("images/.keep").exists());
}

#[test]
fn init_refuses_existing_site() {
    let site = TestSite::scaffolded();

    let result = site.run(&["init"]);

    assert!(!result.success);
    assert!(result.stderr.contains("--force"));
}

#[test]
fn init_force_rescaffolds() {
    let site = TestSite::scaffolded();
    site.write("index.md", "clobbered");

    let result = site.run(&["init", "--force"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(site.read("index.md").contains("Welcome"));
}

#[test]
fn init_refuses_populated_non_site_directory() {
    let site = TestSite::empty();
    site.write("unrelated.txt", "already here");

    let result = site.run(&["init"]);

    assert!(!result.success);
}

#[test]
fn init_json_emits_complete_event() {
    let site = TestSite::empty();

    let result = site.run(&["init", "--json"]);

    assert!(result.success);
    assert!(result.stdout.contains("\"event\":\"complete\""));
    assert!(result.stdout.contains("\"command\":\"init\""));
}

#[test]
fn init_into_named_subdirectory() {
    let site = TestSite::empty();

    let result = site.run(&["init", "my-site"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(site.path("my-site/plinth.toml").exists());
    assert!(site.path("my-site/_scripts/deploy.sh").exists());
}
