use std::{
    env,
    f64::consts::TAU,
    fs,
    path::PathBuf,
    process::{Command, Output},
};

fn norm_newlines(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "")
}

fn run(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_shape_cli"))
        .args(args)
        .env_remove("RUST_LOG")
        .output()
        .unwrap()
}

fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join(format!("shape_cli_{}_{}", name, std::process::id()));
    fs::create_dir_all(&dir).unwrap();
    dir
}

fn circle_points(n: usize) -> Vec<(f64, f64)> {
    (0..n)
        .map(|i| {
            let angle = TAU * i as f64 / n as f64;
            (150.0 + 85.0 * angle.cos(), 150.0 + 85.0 * angle.sin())
        })
        .collect()
}

fn write_board(dir: &PathBuf) -> PathBuf {
    let path = dir.join("board.json");
    fs::write(
        &path,
        r#"{ "boards": { "circle": [
            { "rank": 1, "name": "Mina", "score": 99.95, "avatar": "🦊" },
            { "rank": 2, "name": "Jun", "score": 80.0, "avatar": "🐼" }
        ] } }"#,
    )
    .unwrap();
    path
}

#[test]
fn help_mentions_subcommands() {
    let output = run(&["--help"]);

    assert!(output.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("Usage: shape_cli <COMMAND>"));
    for sub in ["score", "rank", "guide", "simulate", "board"] {
        assert!(stdout.contains(sub), "help is missing {sub}");
    }
}

#[test]
fn score_perfect_circle_prints_record() {
    let dir = scratch_dir("score");
    let path = dir.join("path.json");
    let points: Vec<serde_json::Value> = circle_points(60)
        .into_iter()
        .map(|(x, y)| serde_json::json!({ "x": x, "y": y }))
        .collect();
    fs::write(&path, serde_json::to_string(&points).unwrap()).unwrap();
    let board = write_board(&dir);

    let output = run(&[
        "score",
        path.to_str().unwrap(),
        "--shape",
        "circle",
        "--elapsed-ms",
        "3000",
        "--board",
        board.to_str().unwrap(),
    ]);

    assert!(output.status.success());
    let record: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(record["shape"], "circle");
    assert_eq!(record["score"], 99.9);
    assert_eq!(record["rank"], 2);
    assert_eq!(record["tier"], "perfect");
    assert_eq!(record["completeness"], 1.0);
    assert_eq!(record["point_count"], 60);
}

#[test]
fn unknown_shape_is_rejected_by_argument_parsing() {
    let output = run(&["guide", "--shape", "hexagon"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(2));
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("unknown shape 'hexagon'"));
}

#[test]
fn score_missing_path_file_is_reported() {
    let missing = env::temp_dir().join(format!("shape_cli_missing_path_{}.json", std::process::id()));
    let _ = fs::remove_file(&missing);

    let output = run(&["score", missing.to_str().unwrap(), "--shape", "star"]);

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("Error: failed to read path:"));
    assert!(stderr.contains("Caused by:"));
}

#[test]
fn rank_uses_strictly_better_count() {
    let dir = scratch_dir("rank");
    let board = write_board(&dir);

    let output = run(&["rank", "85", "--shape", "circle", "--board", board.to_str().unwrap()]);
    assert!(output.status.success());
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "2");

    // No entries for this shape in the file.
    let output = run(&["rank", "10", "--shape", "umbrella", "--board", board.to_str().unwrap()]);
    assert_eq!(String::from_utf8_lossy(&output.stdout).trim(), "1");
}

#[test]
fn guide_prints_outline_points() {
    let output = run(&["guide", "--shape", "circle", "--samples", "32"]);

    assert!(output.status.success());
    let points: Vec<serde_json::Value> = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(points.len(), 33);
    assert!(points[0].get("x").is_some());
    assert!(points[0].get("y").is_some());
}

#[test]
fn simulate_replays_round_to_results() {
    let dir = scratch_dir("simulate");
    let tape_path = dir.join("tape.json");

    let pts = circle_points(40);
    let mut events = vec![serde_json::json!({ "t_ms": 500.0, "kind": "down", "x": 1.0, "y": 1.0 })];
    for (i, (x, y)) in pts.iter().enumerate() {
        let kind = if i == 0 { "down" } else { "move" };
        events.push(serde_json::json!({ "t_ms": 3000.0 + i as f64 * 25.0, "kind": kind, "x": x, "y": y }));
    }
    events.push(serde_json::json!({ "t_ms": 4000.0, "kind": "up" }));
    let tape = serde_json::json!({ "shape": "circle", "events": events });
    fs::write(&tape_path, serde_json::to_string(&tape).unwrap()).unwrap();
    let board = write_board(&dir);

    let output = run(&["simulate", tape_path.to_str().unwrap(), "--board", board.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("Simulation Start (circle, 42 events)"));
    assert!(stdout.contains("countdown 3"));
    assert!(stdout.contains("countdown 1"));
    assert!(stdout.contains("| drawing"));
    assert!(stdout.contains("| results"));
    assert!(stdout.contains("score 99.9, rank 2, 40 points"));
    assert!(stdout.contains("\"elapsed_ms\": 1000.0"));
}

#[test]
fn simulate_delivers_same_time_samples_together() {
    let dir = scratch_dir("simulate_batch");
    let tape_path = dir.join("tape.json");

    let mut events = Vec::new();
    for (i, (x, y)) in circle_points(40).iter().enumerate() {
        let kind = if i == 0 { "down" } else { "move" };
        events.push(serde_json::json!({ "t_ms": 3000.0, "kind": kind, "x": x, "y": y }));
    }
    events.push(serde_json::json!({ "t_ms": 3500.0, "kind": "up" }));
    let tape = serde_json::json!({ "shape": "circle", "events": events });
    fs::write(&tape_path, serde_json::to_string(&tape).unwrap()).unwrap();
    let board = write_board(&dir);

    let output = run(&["simulate", tape_path.to_str().unwrap(), "--board", board.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("score 99.9, rank 2, 40 points"));
    assert!(stdout.contains("\"point_count\": 40"));
    assert!(stdout.contains("\"elapsed_ms\": 500.0"));
}

#[test]
fn simulate_unreleased_stroke_times_out() {
    let dir = scratch_dir("simulate_timeout");
    let tape_path = dir.join("tape.json");
    let config_path = dir.join("config.json");

    fs::write(
        &tape_path,
        r#"{ "shape": "square", "events": [
            { "t_ms": 3000.0, "kind": "down", "x": 95.0, "y": 95.0 },
            { "t_ms": 3100.0, "kind": "move", "x": 120.0, "y": 95.0 }
        ] }"#,
    )
    .unwrap();
    fs::write(&config_path, r#"{ "round": { "draw_budget_ms": { "square": 2000 } } }"#).unwrap();

    let output = run(&["simulate", tape_path.to_str().unwrap(), "--config", config_path.to_str().unwrap()]);

    assert!(output.status.success());
    let stdout = norm_newlines(&String::from_utf8_lossy(&output.stdout));
    assert!(stdout.contains("| timeout"));
    assert!(stdout.contains("2 points discarded"));
    assert!(stdout.trim_end().ends_with("timeout"));
}

#[test]
fn invalid_config_is_reported() {
    let dir = scratch_dir("bad_config");
    let config_path = dir.join("config.json");
    fs::write(&config_path, r#"{ "round": { "elapsed_poll_ms": 0 } }"#).unwrap();

    let output = run(&["guide", "--shape", "star", "--config", config_path.to_str().unwrap()]);

    assert_eq!(output.status.code(), Some(1));
    let stderr = norm_newlines(&String::from_utf8_lossy(&output.stderr));
    assert!(stderr.contains("Error: failed to load config:"));
    assert!(stderr.contains("elapsed_poll_ms must be > 0"));
}

#[test]
fn board_writes_mock_leaderboard() {
    let dir = scratch_dir("board");
    let out_path = dir.join("mock.json");

    let output = run(&["board", "--seed", "9", "--per-shape", "4", "-o", out_path.to_str().unwrap()]);

    assert!(output.status.success());
    let v: serde_json::Value = serde_json::from_str(&fs::read_to_string(&out_path).unwrap()).unwrap();
    let boards = v["boards"].as_object().unwrap();
    assert_eq!(boards.len(), 6);
    assert_eq!(boards["diamond"].as_array().unwrap().len(), 4);
}
