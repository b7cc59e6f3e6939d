use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::{prelude::PredicateBooleanExt, str::contains};

fn cli(home: &assert_fs::TempDir) -> Command {
    let mut cmd = Command::cargo_bin("tailor_booking_cli").unwrap();
    cmd.env("TAILOR_BOOKING_CLI_SCRIPT", "1")
        .env("TAILOR_BOOKING_HOME", home.path())
        .env("RUST_LOG", "off");
    cmd
}

#[test]
fn script_mode_books_and_stores_an_order() {
    let home = assert_fs::TempDir::new().unwrap();
    let script = "\
start bespoke-suit tailor-3
set color \"midnight blue\"
next
fabric linen
next
set date 2026-12-01
next
next
measure chest 99
done-measurements
review
next
exit
";

    cli(&home)
        .write_stdin(script)
        .assert()
        .success()
        .stdout(
            contains("Booking bespoke-suit with tailor-3")
                .and(contains("Opened MeasurementsInput"))
                .and(contains("midnight blue"))
                .and(contains("$190.00"))
                .and(contains("Booking submitted -> OrderDetail")),
        );

    home.child("orders").assert(predicates::path::is_dir());
    let entries: Vec<_> = std::fs::read_dir(home.path().join("orders"))
        .unwrap()
        .collect();
    assert_eq!(entries.len(), 1);
}

#[test]
fn unknown_command_suggests_nearest() {
    let home = assert_fs::TempDir::new().unwrap();
    cli(&home)
        .write_stdin("reviw\nexit\n")
        .assert()
        .success()
        .stderr(contains("Unknown command `reviw`"))
        .stdout(contains("Did you mean `review`?"));
}

#[test]
fn errors_are_reported_without_ending_the_session() {
    let home = assert_fs::TempDir::new().unwrap();
    cli(&home)
        .write_stdin("next\nstart svc t-1\nfabric denim\nstatus\nexit\n")
        .assert()
        .success()
        .stderr(contains("No booking in progress").and(contains("unknown fabric `denim`")))
        .stdout(contains("Step 1/5: Design details"));
}

#[test]
fn config_file_overrides_prices() {
    let home = assert_fs::TempDir::new().unwrap();
    home.child("config.json")
        .write_str(r#"{"currency":"GBP","base_price":80.0,"urgent_fee":20.0}"#)
        .unwrap();

    cli(&home)
        .write_stdin("start shirt t-2\nset urgent on\nexit\n")
        .assert()
        .success()
        .stdout(contains("Total: £100.00"));
}
