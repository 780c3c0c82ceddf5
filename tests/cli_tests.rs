//! End-to-end tests for the boundreach binary

use std::io::Write;
use std::process::Command;

fn binary() -> Command {
    Command::new(env!("CARGO_BIN_EXE_boundreach"))
}

fn chain_graph() -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, "4\n1 AC\n2 G\n3 TTT\nA\n").unwrap();
    file.flush().unwrap();
    file
}

#[test]
fn test_query_command_prints_results() {
    let graph = chain_graph();
    let output = binary()
        .args(["query", "-g"])
        .arg(graph.path())
        .args(["-l", "1", "-u", "2", "-p", "0,2", "-p", "0,3", "-p", "1,3"])
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines, vec!["0\t2\ttrue", "0\t3\tfalse", "1\t3\ttrue"]);
}

#[test]
fn test_run_command_json_report() {
    let graph = chain_graph();
    let output = binary()
        .args(["run", "-g"])
        .arg(graph.path())
        .args(["-l", "0", "-u", "3", "--queries", "20", "--seed", "4", "--json"])
        .output()
        .expect("Failed to run binary");

    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["graph_nodes"], 4);
    assert_eq!(report["results"].as_array().unwrap().len(), 20);
    assert_eq!(report["config"]["window"]["d_low"], 0);
}

#[test]
fn test_inverted_window_exits_nonzero() {
    let graph = chain_graph();
    let output = binary()
        .args(["run", "-g"])
        .arg(graph.path())
        .args(["-l", "5", "-u", "2"])
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("Invalid configuration"));
}

#[test]
fn test_unknown_format_exits_nonzero() {
    let graph = chain_graph();
    let output = binary()
        .args(["stats", "-g"])
        .arg(graph.path())
        .args(["-m", "vg"])
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("invalid graph format"));
}

#[test]
fn test_out_of_range_pair_exits_nonzero() {
    let graph = chain_graph();
    let output = binary()
        .args(["query", "-g"])
        .arg(graph.path())
        .args(["-l", "1", "-u", "2", "-p", "4,0"])
        .output()
        .expect("Failed to run binary");

    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("out of range"));
}
