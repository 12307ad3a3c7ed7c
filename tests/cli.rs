use std::path::Path;

use assert_cmd::Command;
use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;
use tempfile::tempdir;

fn hotdish(store: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("hotdish");
    cmd.env_remove("HOTDISH_DEMO_PRO")
        .env_remove("HOTDISH_STORE")
        .env_remove("HOTDISH_CHECKOUT_URL")
        .arg("--store")
        .arg(store);
    cmd
}

#[test]
fn schedule_prints_backward_schedule() {
    let dir = tempdir().expect("tempdir");
    hotdish(&dir.path().join("plans.json"))
        .args(["schedule", "--serve", "18:00", "--dish", "Turkey:20:180"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start 14:40"))
        .stdout(predicate::str::contains("finish 18:00"))
        .stdout(predicate::str::contains("200 min"));
}

#[test]
fn schedule_orders_dishes_by_start_time() {
    let dir = tempdir().expect("tempdir");
    hotdish(&dir.path().join("plans.json"))
        .args([
            "schedule",
            "--serve",
            "18:00",
            "--dish",
            "B:5:10",
            "--dish",
            "A:10:30",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("start 17:20"))
        .stdout(predicate::str::contains("start 17:45"))
        .stdout(predicate::str::is_match("(?s)A.*17:20.*B.*17:45").expect("regex"));
}

#[test]
fn dish_without_cook_time_is_excluded() {
    let dir = tempdir().expect("tempdir");
    hotdish(&dir.path().join("plans.json"))
        .args(["schedule", "--dish", "Green Salad:10:0"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Add at least one dish with a cook time",
        ));
}

#[test]
fn presets_lists_quick_add_entries() {
    let dir = tempdir().expect("tempdir");
    hotdish(&dir.path().join("plans.json"))
        .arg("presets")
        .assert()
        .success()
        .stdout(predicate::str::contains("Roast Turkey"))
        .stdout(predicate::str::contains("Pumpkin Pie"));
}

#[test]
fn plan_commands_are_pro_gated() {
    let dir = tempdir().expect("tempdir");
    hotdish(&dir.path().join("plans.json"))
        .args(["plan", "list"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("requires Pro"));
}

#[test]
fn plan_save_then_list_round_trips() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("plans.json");

    hotdish(&store)
        .args([
            "--demo-pro",
            "plan",
            "save",
            "Thanksgiving",
            "--serve",
            "17:00",
            "--dish",
            "Turkey:20:180",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Saved plan 'Thanksgiving'"));

    hotdish(&store)
        .args(["--demo-pro", "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Thanksgiving — 1 dishes · serve @ 17:00"));

    hotdish(&store)
        .args(["--demo-pro", "plan", "show", "Thanksgiving"])
        .assert()
        .success()
        .stdout(predicate::str::contains("start 13:40"));

    hotdish(&store)
        .args(["--demo-pro", "plan", "delete", "Thanksgiving"])
        .assert()
        .success();

    hotdish(&store)
        .args(["--demo-pro", "plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved plans yet"));
}

#[test]
fn import_rejects_text_without_a_plan() {
    let dir = tempdir().expect("tempdir");
    hotdish(&dir.path().join("plans.json"))
        .args(["--demo-pro", "import", "--text", "just some chat message"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("could not read a valid plan"));
}

#[test]
fn share_then_import_round_trips_through_the_binary() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("plans.json");

    let share = hotdish(&store)
        .args([
            "--demo-pro",
            "share",
            "--serve",
            "17:30",
            "--dish",
            "Stuffing:15:45",
        ])
        .output()
        .expect("run share");
    assert!(share.status.success());
    let message = String::from_utf8(share.stdout).expect("utf8");
    assert!(message.contains("hotdish-plan"));

    hotdish(&store)
        .args(["--demo-pro", "import"])
        .write_stdin(message)
        .assert()
        .success()
        .stdout(predicate::str::contains("serve @ 17:30"))
        .stdout(predicate::str::contains("Stuffing"));
}

#[test]
fn activate_unlocks_pro_without_demo_flag() {
    let dir = tempdir().expect("tempdir");
    let store = dir.path().join("plans.json");

    hotdish(&store).arg("activate").assert().success();

    hotdish(&store)
        .args(["plan", "list"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No saved plans yet"));
}

#[test]
fn upgrade_without_checkout_config_surfaces_the_payload() {
    let dir = tempdir().expect("tempdir");
    hotdish(&dir.path().join("plans.json"))
        .arg("upgrade")
        .assert()
        .failure()
        .stderr(predicate::str::contains("checkout_error"))
        .stderr(predicate::str::contains("Missing HOTDISH_CHECKOUT_URL"));
}

#[test]
fn upgrade_with_config_prints_redirect() {
    let dir = tempdir().expect("tempdir");
    hotdish(&dir.path().join("plans.json"))
        .env("HOTDISH_CHECKOUT_URL", "https://pay.example/hotdish")
        .args(["upgrade", "--email", "cook@example.com"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "https://pay.example/hotdish?email=cook@example.com",
        ));
}
