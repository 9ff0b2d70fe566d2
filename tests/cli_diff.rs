mod common;

use common::TestSite;

#[test]
fn diff_reports_new_files_before_first_build() {
    let site = TestSite::scaffolded();

    let result = site.run(&["diff"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(result.stdout.contains("New files"));
    assert!(result.stdout.contains("index.html"));
}

#[test]
fn diff_reports_unchanged_after_build() {
    let site = TestSite::scaffolded();
    site.run(&["build"]);

    let result = site.run(&["diff"]);

    assert!(result.success);
    assert!(result.stdout.contains("0 new, 0 modified"));
}

#[test]
fn diff_reports_modified_pages() {
    let site = TestSite::scaffolded();
    site.run(&["build"]);
    site.write("index.md", "+++\ntitle = \"Changed\"\n+++\n\n# Changed\n");

    let result = site.run(&["diff"]);

    assert!(result.success);
    assert!(result.stdout.contains("Modified files"));
    assert!(result.stdout.contains("index.html"));
}

#[test]
fn diff_verbose_shows_unified_diff() {
    let site = TestSite::scaffolded();
    site.run(&["build"]);
    site.write("index.md", "+++\ntitle = \"Changed\"\n+++\n\n# Changed\n");

    let result = site.run(&["diff", "-v"]);

    assert!(result.success);
    assert!(result.stdout.contains("--- a/index.html"));
    assert!(result.stdout.contains("+++ b/index.html"));
}

#[test]
fn diff_never_writes() {
    let site = TestSite::scaffolded();

    let before = site.file_listing();
    site.run(&["diff"]);
    let after = site.file_listing();

    assert_eq!(before, after);
}

#[test]
fn diff_json_emits_counts() {
    let site = TestSite::scaffolded();

    let result = site.run(&["diff", "--json"]);

    assert!(result.success);
    assert!(result.stdout.contains("\"event\":\"diff\""));
    assert!(result.stdout.contains("\"new\":"));
}
