use std::{fs, path::Path};

use tempfile::tempdir;

use classcanvas::{CanvasError, anchor::Direction, semantic::RelationshipKind};
use classcanvas_cli::{Args, Command, run_with_output};

fn args(store: &Path, command: Command) -> Args {
    Args {
        store: Some(store.to_string_lossy().to_string()),
        config: None,
        log_level: "off".to_string(),
        command,
    }
}

/// Runs one command and returns what it printed
fn run_command(args: &Args) -> Result<String, CanvasError> {
    let mut out = Vec::new();
    run_with_output(args, &mut out)?;
    Ok(String::from_utf8(out).expect("CLI output is UTF-8"))
}

#[test]
fn e2e_fresh_store_routes_example_diagram() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = temp_dir.path().join("store");

    let output = run_command(&args(&store, Command::Routes)).unwrap();
    assert_eq!(
        output.trim(),
        "e1 association 1 -> 2 [e -> w] M 320 220 L 410 220 L 410 220 L 500 220"
    );

    // Read-only commands never create the store
    assert!(!store.exists());
}

#[test]
fn e2e_edit_session_is_persisted() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = temp_dir.path().join("store");

    let id = run_command(&args(
        &store,
        Command::AddNode {
            name: "Invoice".to_string(),
            kind: "class".parse().unwrap(),
            x: 503.0,
            y: 397.0,
        },
    ))
    .unwrap();
    assert_eq!(id.trim(), "n-1");

    let edge = run_command(&args(
        &store,
        Command::Connect {
            from: "2".to_string(),
            to: "n-1".to_string(),
            kind: RelationshipKind::Composition,
            start_anchor: None,
            end_anchor: None,
            start_mult: "1".to_string(),
            end_mult: "1..*".to_string(),
        },
    ))
    .unwrap();
    assert_eq!(edge.trim(), "e-1");

    let routes = run_command(&args(&store, Command::Routes)).unwrap();
    assert!(routes.contains("e1 association 1 -> 2 [e -> w]"));
    assert!(routes.contains(
        "e-1 composition 2 -> n-1 [s -> n] M 610 290 L 610 345 L 610 345 L 610 400"
    ));

    let svg_path = temp_dir.path().join("diagram.svg");
    run_command(&args(
        &store,
        Command::Render {
            output: svg_path.to_string_lossy().to_string(),
        },
    ))
    .unwrap();
    let svg = fs::read_to_string(&svg_path).unwrap();
    assert!(svg.contains("Invoice"));
    assert!(svg.contains("1 — 1..*"));
    assert!(svg.contains("Composition"));

    // Removing the node drops the edge attached to it
    run_command(&args(
        &store,
        Command::RemoveNode {
            node: "n-1".to_string(),
        },
    ))
    .unwrap();
    let routes = run_command(&args(&store, Command::Routes)).unwrap();
    assert!(!routes.contains("e-1"));

    let cleared = run_command(&args(&store, Command::Clear)).unwrap();
    assert!(cleared.starts_with("Cleared"));
    assert!(!store.join("uml_nodes_v7.json").exists());
}

#[test]
fn e2e_pinned_anchor_is_honored() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = temp_dir.path().join("store");

    run_command(&args(
        &store,
        Command::Connect {
            from: "2".to_string(),
            to: "1".to_string(),
            kind: RelationshipKind::Dependency,
            start_anchor: Some(Direction::N),
            end_anchor: None,
            start_mult: String::new(),
            end_mult: String::new(),
        },
    ))
    .unwrap();

    let routes = run_command(&args(&store, Command::Routes)).unwrap();
    assert!(routes.contains("e-1 dependency 2 -> 1 [n -> "));
}

#[test]
fn e2e_move_and_query_anchors() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = temp_dir.path().join("store");

    let moved = run_command(&args(
        &store,
        Command::Move {
            node: "1".to_string(),
            x: 95.0,
            y: -12.0,
        },
    ))
    .unwrap();
    assert_eq!(moved.trim(), "1 100 -20");

    let anchors = run_command(&args(
        &store,
        Command::Anchors {
            node: "1".to_string(),
        },
    ))
    .unwrap();
    let lines: Vec<_> = anchors.lines().collect();
    assert_eq!(lines.len(), 8);
    assert!(lines.contains(&"n 210 -20"));
    assert!(lines.contains(&"nw 100 -20"));

    let nearest = run_command(&args(
        &store,
        Command::Nearest {
            node: "1".to_string(),
            x: 330.0,
            y: 130.0,
        },
    ))
    .unwrap();
    assert_eq!(nearest.trim(), "se 320 120");
}

#[test]
fn e2e_explicit_config_is_applied() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = temp_dir.path().join("store");
    let config_path = temp_dir.path().join("config.toml");
    fs::write(&config_path, "[canvas]\ngrid_size = 50\n").unwrap();

    let mut add = args(
        &store,
        Command::AddNode {
            name: "Gateway".to_string(),
            kind: "interface".parse().unwrap(),
            x: 530.0,
            y: 380.0,
        },
    );
    add.config = Some(config_path.to_string_lossy().to_string());
    run_command(&add).unwrap();

    let anchors = run_command(&args(
        &store,
        Command::Anchors {
            node: "n-1".to_string(),
        },
    ))
    .unwrap();
    assert!(anchors.lines().any(|line| line == "n 660 400"));
}

#[test]
fn e2e_invalid_commands_fail() {
    let temp_dir = tempdir().expect("Failed to create temp directory");
    let store = temp_dir.path().join("store");

    let missing = run_command(&args(
        &store,
        Command::Anchors {
            node: "ghost".to_string(),
        },
    ));
    assert!(matches!(missing, Err(CanvasError::NodeNotFound(_))));

    let self_loop = run_command(&args(
        &store,
        Command::Connect {
            from: "1".to_string(),
            to: "1".to_string(),
            kind: RelationshipKind::Association,
            start_anchor: None,
            end_anchor: None,
            start_mult: String::new(),
            end_mult: String::new(),
        },
    ));
    assert!(matches!(self_loop, Err(CanvasError::Validation(_))));

    let mut bad_config = args(&store, Command::Routes);
    bad_config.config = Some(temp_dir.path().join("absent.toml").to_string_lossy().to_string());
    assert!(run_command(&bad_config).is_err());

    // Failed edits leave nothing behind
    assert!(!store.exists());
}
