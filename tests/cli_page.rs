mod common;

use common::TestSite;

#[test]
fn page_new_creates_markdown_with_frontmatter() {
    let site = TestSite::scaffolded();

    let result = site.run(&["page", "new", "about"]);

    assert!(result.success, "{}", result.combined_output());
    let content = site.read("about.md");
    assert!(content.starts_with("+++"));
    assert!(content.contains("title = \"about\""));
}

#[test]
fn page_new_directory() {
    let site = TestSite::scaffolded();

    let result = site.run(&["page", "new", "blog", "--directory"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(site.path("blog").is_dir());
}

#[test]
fn page_new_under_parent_dir() {
    let site = TestSite::scaffolded();
    site.run(&["page", "new", "blog", "--directory"]);

    let result = site.run(&["page", "new", "first-post", "--dir", "blog"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(site.path("blog/first-post.md").exists());
}

#[test]
fn page_new_rejects_duplicates() {
    let site = TestSite::scaffolded();

    let result = site.run(&["page", "new", "index.md"]);

    assert!(!result.success);
    assert!(result.stderr.contains("already exists"));
}

#[test]
fn page_new_rejects_escaping_parent() {
    let site = TestSite::scaffolded();

    let result = site.run(&["page", "new", "evil", "--dir", "../outside"]);

    assert!(!result.success);
    assert!(result.stderr.contains("escapes the site root"));
}

#[test]
fn page_mv_renames_in_place() {
    let site = TestSite::scaffolded();
    site.run(&["page", "new", "draft"]);

    let result = site.run(&["page", "mv", "draft.md", "published.md"]);

    assert!(result.success, "{}", result.combined_output());
    assert!(!site.path("draft.md").exists());
    assert!(site.path("published.md").exists());
}

#[test]
fn page_rm_requires_yes() {
    let site = TestSite::scaffolded();
    site.run(&["page", "new", "doomed"]);

    let refused = site.run(&["page", "rm", "doomed.md"]);
    assert!(!refused.success);
    assert!(refused.stderr.contains("--yes"));
    assert!(site.path("doomed.md").exists());

    let confirmed = site.run(&["page", "rm", "doomed.md", "--yes"]);
    assert!(confirmed.success, "{}", confirmed.combined_output());
    assert!(!site.path("doomed.md").exists());
}

#[test]
fn page_rm_missing_page_fails() {
    let site = TestSite::scaffolded();

    let result = site.run(&["page", "rm", "ghost.md", "--yes"]);

    assert!(!result.success);
    assert!(result.stderr.contains("page not found"));
}

#[test]
fn page_new_json_emits_event() {
    let site = TestSite::scaffolded();

    let result = site.run(&["page", "new", "about", "--json"]);

    assert!(result.success);
    assert!(result.stdout.contains("\"event\":\"page_new\""));
    assert!(result.stdout.contains("about.md"));
}
