use assert_cmd::Command;
use predicates::prelude::*;

#[test]
fn demo_drains_all_jobs() {
    Command::cargo_bin("workpool-demo")
        .unwrap()
        .args(["--threads", "2", "--jobs", "5"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "5 of 5 jobs executed on 2 workers, 0 abandoned",
        ));
}

#[test]
fn demo_with_zero_workers_abandons_the_queue() {
    Command::cargo_bin("workpool-demo")
        .unwrap()
        .args(["--threads", "0", "--jobs", "3"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "0 of 3 jobs executed on 0 workers, 3 abandoned",
        ));
}
