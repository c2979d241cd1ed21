use std::process::Command;

use tempfile::tempdir;

fn write(dir: &std::path::Path, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, content).unwrap();
    path
}

const MENU_FIXTURE: &str = r#"[
    {"Id": 1, "Title": "Home", "URL": {"Url": "https://intra/sites/team", "Description": "Home"}, "Icon": "home", "VolgordeID": 2},
    {"Id": 2, "Title": "About", "URL": "/sites/team/about", "VolgordeID": 1},
    {"Id": 3, "Title": "Handbook", "ParentID1": 2, "Note": "/sites/team/handbook"}
]"#;

#[test]
fn test_render_writes_a_complete_page() {
    let dir = tempdir().unwrap();
    let bin = env!("CARGO_BIN_EXE_atrium");
    let config = write(
        dir.path(),
        "atrium.toml",
        "[branding]\ntheme = \"green\"\n\n[calendar]\nenabled = false\n",
    );
    let fixture = write(dir.path(), "menu.json", MENU_FIXTURE);
    let out = dir.path().join("page.html");

    let output = Command::new(bin)
        .current_dir(dir.path())
        .args(["render", "--config"])
        .arg(&config)
        .arg("--fixture")
        .arg(&fixture)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(
        output.status.success(),
        "render failed:\n{}",
        String::from_utf8_lossy(&output.stderr)
    );

    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.starts_with("<!DOCTYPE html>"));
    assert!(html.contains("class=\"theme-green\""));
    assert!(html.contains("--color-base:#006400"));
    assert!(html.contains("border-brand-green"));
    // ordering value wins over input order
    let about = html.find(">About<").unwrap();
    let home = html.find(">Home<").unwrap();
    assert!(about < home);
    // note column resolved the child link
    assert!(html.contains("href=\"/sites/team/handbook\""));
}

#[test]
fn test_render_embedded_forces_parent_targets() {
    let dir = tempdir().unwrap();
    let bin = env!("CARGO_BIN_EXE_atrium");
    let fixture = write(dir.path(), "menu.json", MENU_FIXTURE);
    let out = dir.path().join("page.html");

    let output = Command::new(bin)
        .current_dir(dir.path())
        .args(["render", "--embedded", "--fixture"])
        .arg(&fixture)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("iframe-mode"));
    assert!(html.contains("target=\"_parent\""));
}

#[test]
fn test_render_reports_structural_diagnostics_on_stderr() {
    let dir = tempdir().unwrap();
    let bin = env!("CARGO_BIN_EXE_atrium");
    let fixture = write(
        dir.path(),
        "menu.json",
        r#"[
            {"Id": 1, "Title": "A"},
            {"Id": 2, "Title": "B", "ParentID1": 1},
            {"Id": 3, "Title": "C", "ParentID1": 2},
            {"Id": 4, "Title": "D", "ParentID1": 3},
            {"Id": 5, "Title": "Orphan", "ParentID1": 99}
        ]"#,
    );
    let out = dir.path().join("page.html");

    let output = Command::new(bin)
        .current_dir(dir.path())
        .args(["render", "--fixture"])
        .arg(&fixture)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("\"D\" exceeds maximum depth of 3"));
    assert!(stderr.contains("Parent item 99 not found for Orphan"));

    // the page still renders, with D dropped and the orphan promoted
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(!html.contains(">D<"));
    assert!(html.contains(">Orphan<"));
}

#[test]
fn test_render_body_attributes_override_theme() {
    let dir = tempdir().unwrap();
    let bin = env!("CARGO_BIN_EXE_atrium");
    let fixture = write(dir.path(), "menu.json", MENU_FIXTURE);
    let body = write(
        dir.path(),
        "host.html",
        r#"<body class="theme-red" data-max-menu-depth="2">"#,
    );
    let out = dir.path().join("page.html");

    let output = Command::new(bin)
        .current_dir(dir.path())
        .args(["render", "--fixture"])
        .arg(&fixture)
        .arg("--body")
        .arg(&body)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains("class=\"theme-red\""));
    assert!(html.contains("--color-base:#800000"));
}

#[test]
fn test_render_events_fixture_populates_the_calendar() {
    let dir = tempdir().unwrap();
    let bin = env!("CARGO_BIN_EXE_atrium");
    let fixture = write(dir.path(), "menu.json", MENU_FIXTURE);
    let events = write(
        dir.path(),
        "events.json",
        r#"{"d": {"results": [
            {"Id": 1, "Title": "Kickoff", "EventDate": "2025-03-10T09:00:00", "EndDate": "2025-03-10T10:00:00", "Category": "Vergadering", "Location": "Room 1"}
        ]}}"#,
    );
    let out = dir.path().join("page.html");

    let output = Command::new(bin)
        .current_dir(dir.path())
        .args(["render", "--fixture"])
        .arg(&fixture)
        .arg("--events-fixture")
        .arg(&events)
        .arg("--out")
        .arg(&out)
        .output()
        .unwrap();

    assert!(output.status.success());
    let html = std::fs::read_to_string(&out).unwrap();
    assert!(html.contains(">Planning</h2>"));
    assert!(html.contains(">Kickoff</div>"));
    assert!(html.contains("10 mrt"));
    assert!(html.contains("09:00-10:00"));
    assert!(html.contains("Room 1"));
}
