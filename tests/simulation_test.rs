use std::process::Command;

fn run_binary(args: &[&str]) -> std::process::Output {
    Command::new(env!("CARGO_BIN_EXE_grid_traffic_sim"))
        .args(args)
        .env("RUST_LOG", "warn,grid_traffic_sim=info")
        .output()
        .expect("Failed to execute simulation")
}

/// Test that the simulation runs with defaults and prints its report
#[test]
fn test_default_simulation_runs() {
    let output = run_binary(&[]);
    assert!(
        output.status.success(),
        "Simulation failed. stderr: {}",
        String::from_utf8_lossy(&output.stderr)
    );

    let stdout = String::from_utf8_lossy(&output.stdout);
    for expected in [
        "Simulation Report (Single Run)",
        "Grid size: 4x4",
        "Duration ticks: 1000",
        "NS green: 20, EW green: 20",
        "Completed trips:",
        "Throughput per tick:",
        "Mean travel time (ticks):",
        "Mean vehicles in system (sampled):",
    ] {
        assert!(stdout.contains(expected), "Missing '{}' in:\n{}", expected, stdout);
    }

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(
        stderr.contains("Simulation complete"),
        "Completion was not logged. stderr: {}",
        stderr
    );
}

/// Test that a seeded run prints the same report twice
#[test]
fn test_seeded_runs_match() {
    let args = ["--grid-size", "3", "--ticks", "300", "--seed", "7"];
    let first = run_binary(&args);
    let second = run_binary(&args);
    assert!(first.status.success());
    assert_eq!(first.stdout, second.stdout);
}

/// Test that completed trips are a positive number for the default scenario
#[test]
fn test_completed_trips_reported() {
    let output = run_binary(&["--ticks", "500"]);
    assert!(output.status.success());

    let stdout = String::from_utf8_lossy(&output.stdout);
    let line = stdout
        .lines()
        .find(|line| line.starts_with("Completed trips:"))
        .expect("Could not find 'Completed trips' line");
    let completed: u64 = line
        .trim_start_matches("Completed trips:")
        .trim()
        .parse()
        .expect("Could not parse completed count");
    assert!(completed > 0, "No trips completed");
}

/// Test that an invalid configuration exits with an error
#[test]
fn test_invalid_arrival_rate_fails() {
    let output = run_binary(&["--arrival-rate", "1.5"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("arrival rate"), "stderr: {}", stderr);
}

/// Test that an overflowing signal cycle is reported instead of panicking
#[test]
fn test_overflowing_signal_cycle_fails() {
    let output = run_binary(&["--ns-green", "18446744073709551615", "--ew-green", "1"]);
    assert!(!output.status.success());
    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("signal cycle length overflows"), "stderr: {}", stderr);
    assert!(!stderr.contains("panicked"), "stderr: {}", stderr);
}
