//! Runs of the `salescope` binary itself.

use std::process::Command;

#[test]
fn missing_input_exits_with_failure_and_plain_message() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("sales_data.csv");

    let output = Command::new(env!("CARGO_BIN_EXE_salescope"))
        .arg("--input")
        .arg(&missing)
        .arg("--no-charts")
        .output()
        .unwrap();

    assert!(!output.status.success());
    assert_eq!(output.status.code(), Some(1));

    let stderr = String::from_utf8_lossy(&output.stderr);
    assert!(stderr.contains("was not found"), "{stderr}");
    assert!(!stderr.contains("Caused by"), "{stderr}");
    assert!(!stderr.contains("analysis of"), "{stderr}");
    assert!(output.stdout.is_empty());
}

#[test]
fn example_input_exits_successfully() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("sales_data.csv");
    std::fs::write(
        &input,
        "Date,Region,Quantity,Total_Sales\n\
         2024-01-01,East,2,100\n\
         2024-01-02,West,3,150\n\
         2024-01-03,East,1,50\n",
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_salescope"))
        .arg("--input")
        .arg(&input)
        .arg("--no-charts")
        .output()
        .unwrap();

    assert!(output.status.success());
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.contains("West with average sales of 150.00"), "{stdout}");
}
