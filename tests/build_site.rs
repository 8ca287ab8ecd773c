//! End-to-end tests: run the compiled binary against `fixtures/site`.

use std::fs;
use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use tempfile::TempDir;

// ---------------------------------------------------------------------------
// Setup helpers
// ---------------------------------------------------------------------------

fn fixture_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("fixtures/site")
}

/// Copy the fixture site so a test can break parts of it.
fn fixture_copy() -> TempDir {
    let tmp = TempDir::new().unwrap();
    copy_dir_recursive(&fixture_dir(), tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());
        if src_path.is_dir() {
            fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

fn run(args: &[&str], source: &Path, output: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_simple-folio"))
        .args(args)
        .arg("--source")
        .arg(source)
        .arg("--output")
        .arg(output)
        .output()
        .expect("failed to run simple-folio")
}

fn build(source: &Path) -> TempDir {
    let out = TempDir::new().unwrap();
    let result = run(&["build"], source, out.path());
    assert!(
        result.status.success(),
        "build failed: {}",
        String::from_utf8_lossy(&result.stderr)
    );
    out
}

fn read(dir: &Path, page: &str) -> String {
    fs::read_to_string(dir.join(page)).unwrap_or_else(|e| panic!("missing {page}: {e}"))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[test]
fn build_writes_every_page() {
    let out = build(&fixture_dir());
    for page in ["index.html", "about.html", "projects/index.html"] {
        assert!(out.path().join(page).is_file(), "{page} missing");
    }
}

#[test]
fn home_page_has_profile_and_visible_projects() {
    let out = build(&fixture_dir());
    let html = read(out.path(), "index.html");

    assert!(html.contains("<title>Home | Jane Doe</title>"));
    assert!(html.contains(
        "<h1>Jane Doe</h1><p>Builder of things</p><p>I write software for small teams.</p>"
    ));
    assert!(html.contains(r#"<h4 class="chip-group-label">Infrastructure</h4>"#));

    assert_eq!(html.matches(r#"<article class="card project">"#).count(), 3);
    assert!(!html.contains("Old Experiment"));
    let tracker = html.find("Tiny Tracker").unwrap();
    let recipes = html.find("Recipe Box").unwrap();
    let dotfiles = html.find("Dotfiles").unwrap();
    assert!(tracker < recipes && recipes < dotfiles);

    assert!(html.contains(r#"<a href="projects/index.html">All projects</a>"#));
}

#[test]
fn home_page_marks_home_link() {
    let out = build(&fixture_dir());
    let html = read(out.path(), "index.html");
    assert_eq!(html.matches(r#"aria-current="page""#).count(), 1);
    assert!(html.contains(r#"<a href="index.html" class="active" aria-current="page">Home</a>"#));
    assert!(html.contains(r#"<a href="https://github.com/janedoe">GitHub</a>"#));
}

#[test]
fn nested_page_rewrites_links_and_assets() {
    let out = build(&fixture_dir());
    let html = read(out.path(), "projects/index.html");

    assert!(html.contains(r#"<a href="../index.html">Home</a>"#));
    assert!(html.contains(
        r#"<a href="../projects/index.html" class="active" aria-current="page">Projects</a>"#
    ));
    assert!(html.contains(r#"src="../images/2.svg""#));
    assert!(html.contains(r#"href="../assets/site-"#));
    assert!(!html.contains("more-projects"));
}

#[test]
fn large_galleries_become_carousels() {
    let out = build(&fixture_dir());
    let html = read(out.path(), "index.html");
    assert_eq!(html.matches("data-carousel ").count(), 1);
    assert!(html.contains(r#"data-count="5""#));
    // Recipe Box: "image" plus one entry in "images"
    assert_eq!(html.matches(r#"<div class="project-images">"#).count(), 1);
}

#[test]
fn markdown_page_body() {
    let out = build(&fixture_dir());
    let html = read(out.path(), "about.html");
    assert!(html.contains(r#"<section class="card page-body">"#));
    assert!(html.contains("<strong>small, dependable tools</strong>"));
    assert!(html.contains(r#"class="active" aria-current="page">About</a>"#));
}

#[test]
fn reveal_settings_come_from_config() {
    let out = build(&fixture_dir());
    let html = read(out.path(), "index.html");
    assert!(html.contains(r#"data-reveal-duration="0.4s""#));
    assert!(html.contains(r#"data-reveal-threshold="0.1""#));
}

#[test]
fn static_files_copied_and_sources_consumed() {
    let out = build(&fixture_dir());
    assert!(out.path().join("images/1.svg").is_file());
    assert!(out.path().join("images/showcase.svg").is_file());
    for consumed in ["config.toml", "nav.html", "projects.json", "about_me.json", "about.md"] {
        assert!(!out.path().join(consumed).exists(), "{consumed} was copied");
    }

    let assets: Vec<_> = fs::read_dir(out.path().join("assets"))
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    assert!(assets.iter().any(|a| a.starts_with("site-") && a.ends_with(".css")));
    assert!(assets.iter().any(|a| a.starts_with("site-") && a.ends_with(".js")));
}

#[test]
fn missing_projects_show_error_message() {
    let site = fixture_copy();
    fs::remove_file(site.path().join("projects.json")).unwrap();
    let out = build(site.path());

    let html = read(out.path(), "index.html");
    assert!(html.contains(
        r#"<div id="projects-container"><p class="error">Error loading projects. Please try again later.</p></div>"#
    ));
}

#[test]
fn missing_profile_keeps_placeholders() {
    let site = fixture_copy();
    fs::write(site.path().join("about_me.json"), "{ broken").unwrap();
    let out = build(site.path());

    let html = read(out.path(), "index.html");
    assert!(html.contains("<h1>Hi, I'm Jane</h1><p>Loading profile...</p>"));
    assert!(html.contains("Skills are loading..."));
}

#[test]
fn missing_nav_leaves_pages_headerless() {
    let site = fixture_copy();
    fs::remove_file(site.path().join("nav.html")).unwrap();
    let out = build(site.path());

    let html = read(out.path(), "index.html");
    assert!(!html.contains("<header"));
    assert!(html.contains("Tiny Tracker"));
}

#[test]
fn build_report_on_stdout() {
    let out = TempDir::new().unwrap();
    let result = run(&["build"], &fixture_dir(), out.path());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("001 Home \u{2192} index.html"));
    assert!(stdout.contains("Projects: 3 shown, 1 hidden (projects.json)"));
    assert!(stdout.contains("Projects: 3 shown, 1 hidden (../projects.json)"));
    assert!(stdout.contains("Generated 3 pages"));
}

#[test]
fn check_writes_nothing() {
    let parent = TempDir::new().unwrap();
    let out = parent.path().join("dist");
    let result = run(&["check"], &fixture_dir(), &out);

    assert!(result.status.success());
    assert!(!out.exists());
    let stdout = String::from_utf8_lossy(&result.stdout);
    assert!(stdout.contains("Checked 3 pages"));
}

#[test]
fn invalid_config_fails() {
    let site = fixture_copy();
    fs::write(site.path().join("config.toml"), "[reveal]\nthreshold = 2.0\n").unwrap();
    let out = TempDir::new().unwrap();
    let result = run(&["build"], site.path(), out.path());
    assert!(!result.status.success());
}

#[test]
fn config_overlay_overrides_site_config() {
    let tmp = TempDir::new().unwrap();
    let overlay = tmp.path().join("preview.toml");
    fs::write(&overlay, "[projects]\nmore_href = \"\"\n").unwrap();
    let out = TempDir::new().unwrap();

    let result = Command::new(env!("CARGO_BIN_EXE_simple-folio"))
        .arg("build")
        .arg("--source")
        .arg(fixture_dir())
        .arg("--output")
        .arg(out.path())
        .arg("--config")
        .arg(&overlay)
        .output()
        .unwrap();
    assert!(result.status.success());

    let html = read(out.path(), "index.html");
    assert!(!html.contains("more-projects"));
}

#[test]
fn gen_config_is_valid_toml() {
    let out = TempDir::new().unwrap();
    let result = run(&["gen-config"], &fixture_dir(), out.path());
    assert!(result.status.success());
    let text = String::from_utf8(result.stdout).unwrap();
    let value: toml::Value = toml::from_str(&text).unwrap();
    assert!(value.get("pages").is_some());
}
