//! Command files run end to end through the async runner

use virtual_parking::command::{CommandRouter, Outcome};
use virtual_parking::config::{OutputFormat, RunConfig};
use virtual_parking::runner;

const SAMPLE: &str = "\
Create_parking_lot 6
Park KA-01-HH-1234 driver_age 21
Park PB-01-HH-1234 driver_age 21
Slot_numbers_for_driver_of_age 21
Park PB-01-TG-2341 driver_age 40
Slot_number_for_car_with_number PB-01-HH-1234
Leave 2
Park HR-29-TG-3098 driver_age 39
Vehicle_registration_number_for_driver_of_age 18
";

const EXPECTED: &str = "\
Created parking of 6 slots
Car with vehicle registration number KA-01-HH-1234 has been parked at slot number 1
Car with vehicle registration number PB-01-HH-1234 has been parked at slot number 2
1,2
Car with vehicle registration number PB-01-TG-2341 has been parked at slot number 3
2
Slot number 2 vacated, the car with vehicle registration number PB-01-HH-1234 left the space, the driver of the car was of age 21
Car with vehicle registration number HR-29-TG-3098 has been parked at slot number 2
No parked car matches the query
";

#[tokio::test]
async fn test_sample_file() {
    let path = std::env::temp_dir().join(format!("parking_sample_{}.txt", std::process::id()));
    tokio::fs::write(&path, SAMPLE).await.unwrap();

    let mut router = CommandRouter::new();
    let mut out = Vec::new();
    let summary = runner::run_file(&path, &mut out, &mut router, &RunConfig::default())
        .await
        .expect("run should succeed");

    assert_eq!(String::from_utf8(out).unwrap(), EXPECTED);
    assert_eq!(summary.lines, 9);
    assert_eq!(summary.failures, 0);

    let stats = summary.stats.expect("lot was created");
    assert_eq!(stats.capacity, 6);
    assert_eq!(stats.occupied, 3);

    std::fs::remove_file(path).ok();
}

#[tokio::test]
async fn test_missing_file_is_io_error() {
    let path = std::env::temp_dir().join("parking_no_such_input.txt");
    let mut router = CommandRouter::new();
    let mut out = Vec::new();

    let err = runner::run_file(&path, &mut out, &mut router, &RunConfig::default())
        .await
        .unwrap_err();
    assert!(!err.is_recoverable());
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_negative_capacity_then_valid_stream() {
    let input = "Create_parking_lot -6\nCreate_parking_lot 3\nPark KA-01-HH-1234 driver_age 21\n";
    let mut router = CommandRouter::new();
    let mut out = Vec::new();

    let summary = runner::run(input.as_bytes(), &mut out, &mut router, &RunConfig::default())
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Number of Parking slots should be a Positive integer");
    assert_eq!(lines[1], "Created parking of 3 slots");
    assert_eq!(summary.failures, 1);
    assert_eq!(summary.stats.map(|s| s.occupied), Some(1));
}

#[tokio::test]
async fn test_oversized_capacity_does_not_end_stream() {
    let input = "\
Create_parking_lot 18446744073709551615
Create_parking_lot 99999999999999999999999
Park KA-01-HH-1234 driver_age 21
Create_parking_lot 2
Park KA-01-HH-1234 driver_age 21
";
    let mut router = CommandRouter::new();
    let mut out = Vec::new();

    let summary = runner::run(input.as_bytes(), &mut out, &mut router, &RunConfig::default())
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines.len(), 5);
    assert_eq!(lines[0], "Number of Parking slots should be a Positive integer");
    assert_eq!(lines[1], "Number of Parking slots should be a Positive integer");
    assert_eq!(lines[2], "Parking lot has not been created");
    assert_eq!(lines[3], "Created parking of 2 slots");
    assert!(!summary.stopped_early);
    assert_eq!(summary.failures, 3);

    let stats = summary.stats.expect("lot was created");
    assert_eq!(stats.capacity, 2);
    assert_eq!(stats.occupied, 1);
}

#[tokio::test]
async fn test_large_capacity_stream_allocates_on_demand() {
    let input = "\
Create_parking_lot 1000000000000
Park KA-01-HH-1234 driver_age 21
Park PB-01-HH-1234 driver_age 21
Leave 1
Leave 1000000000000
Park HR-29-TG-3098 driver_age 39
";
    let mut router = CommandRouter::new();
    let mut out = Vec::new();

    let summary = runner::run(input.as_bytes(), &mut out, &mut router, &RunConfig::default())
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let lines: Vec<&str> = text.lines().collect();
    assert_eq!(lines[0], "Created parking of 1000000000000 slots");
    assert_eq!(lines[4], "Parking space 1000000000000 is already Empty");
    assert!(lines[5].ends_with("parked at slot number 1"));
    assert_eq!(summary.failures, 1);

    let stats = summary.stats.expect("lot was created");
    assert_eq!(stats.occupied, 2);
    assert_eq!(stats.available, 1_000_000_000_000 - 2);
}

#[tokio::test]
async fn test_json_stream_is_line_delimited() {
    let config = RunConfig {
        output: OutputFormat::Json,
        ..RunConfig::default()
    };
    let mut router = CommandRouter::new();
    let mut out = Vec::new();

    runner::run(SAMPLE.as_bytes(), &mut out, &mut router, &config)
        .await
        .unwrap();

    let text = String::from_utf8(out).unwrap();
    let values: Vec<serde_json::Value> = text
        .lines()
        .map(|line| serde_json::from_str(line).expect("one JSON object per line"))
        .collect();

    assert_eq!(values.len(), 9);
    assert_eq!(values[3]["outcome"], "slots_for_age");
    assert_eq!(values[3]["slots"], serde_json::json!([1, 2]));
    assert_eq!(values[8]["registrations"], serde_json::json!([]));
}

#[test]
fn test_router_is_usable_without_runner() {
    let mut router = CommandRouter::new();
    router.dispatch_line("Create_parking_lot 3");
    for code in ["AA-11-BB-1111", "AA-11-BB-2222", "AA-11-BB-3333"] {
        router.dispatch_line(&format!("Park {} driver_age 30", code));
    }
    router.dispatch_line("Leave 2");

    match router.dispatch_line("Park AA-11-BB-4444 driver_age 31") {
        Outcome::Parked { slot, .. } => assert_eq!(slot.get(), 2),
        other => panic!("expected park, got {}", other),
    }
}
