use assert_cmd::Command;
use mockito::{Matcher, Server};
use predicates::prelude::*;
use serde_json::json;
use std::path::Path;
use tempfile::tempdir;

fn base_cmd(home: &Path) -> Command {
    let mut cmd = Command::new(assert_cmd::cargo::cargo_bin!("groupme"));
    cmd.env("HOME", home)
        .env_remove("GROUPME_TOKEN")
        .env_remove("GROUPME_GROUPS")
        .env_remove("GROUPME_API_BASE");
    cmd
}

fn server_cmd(home: &Path, server: &Server) -> Command {
    let mut cmd = base_cmd(home);
    cmd.args([
        "--api-base",
        &server.url(),
        "--insecure",
        "--token",
        "T",
        "--groups",
        "100,200",
    ]);
    cmd
}

fn mock_group(server: &mut Server, id: &str, name: &str, members: serde_json::Value) {
    server
        .mock("GET", format!("/groups/{id}").as_str())
        .match_query(Matcher::UrlEncoded("token".into(), "T".into()))
        .match_header("x-access-token", "T")
        .with_status(200)
        .with_body(json!({"response": {"name": name, "members": members}}).to_string())
        .create();
}

#[test]
fn config_set_persists_settings() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["config", "set", "--token", "secret-token", "--groups", "100, 200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Settings saved."));

    base_cmd(home_dir.path())
        .args(["config", "show"])
        .assert()
        .success()
        .stdout(predicate::str::contains("****oken"))
        .stdout(predicate::str::contains("100,200"))
        .stdout(predicate::str::contains("secret-token").not());
}

#[test]
fn users_merges_groups_per_user() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_group(
        &mut server,
        "100",
        "GroupOneName",
        json!([{"user_id": "u1", "nickname": "Alice", "roles": ["owner"], "id": "m1"}]),
    );
    mock_group(
        &mut server,
        "200",
        "GroupTwoName",
        json!([
            {"user_id": "u1", "nickname": "Alice", "roles": [], "id": "m2"},
            {"user_id": "u2", "nickname": "Bob", "id": "m3"}
        ]),
    );

    server_cmd(home_dir.path(), &server)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "GroupOneName (owner), GroupTwoName (User)",
        ))
        .stdout(predicate::str::contains("Bob"));
}

#[test]
fn users_uses_stored_settings() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_group(
        &mut server,
        "100",
        "Crew",
        json!([{"user_id": "u1", "nickname": "Alice", "id": "m1"}]),
    );

    base_cmd(home_dir.path())
        .args([
            "config",
            "set",
            "--token",
            "T",
            "--groups",
            "100",
            "--api-base",
            &server.url(),
        ])
        .assert()
        .success();

    base_cmd(home_dir.path())
        .args(["--insecure", "users", "--format", "json"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"nickname\": \"Alice\""))
        .stdout(predicate::str::contains("Crew (User)"));
}

#[test]
fn users_reports_failed_group_and_keeps_others() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_group(
        &mut server,
        "100",
        "Crew",
        json!([{"user_id": "u1", "nickname": "Alice", "id": "m1"}]),
    );
    server
        .mock("GET", "/groups/200")
        .match_query(Matcher::Any)
        .with_status(500)
        .with_body(json!({"meta": {"errors": ["internal"]}}).to_string())
        .create();

    server_cmd(home_dir.path(), &server)
        .arg("users")
        .assert()
        .success()
        .stdout(predicate::str::contains("Alice"))
        .stderr(predicate::str::contains("warning: group 200 skipped"))
        .stderr(predicate::function(|stderr: &str| {
            stderr.matches("200").count() == 1
        }));
}

#[test]
fn users_without_token_is_refused() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("API token is not configured"));
}

#[test]
fn plain_http_requires_insecure() {
    let home_dir = tempdir().expect("tempdir");

    base_cmd(home_dir.path())
        .args(["--api-base", "http://127.0.0.1:9", "--token", "T", "users"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("refusing to use http://"));
}

#[test]
fn remove_with_nickname_readds_member() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_group(
        &mut server,
        "100",
        "Crew",
        json!([{"user_id": "u1", "nickname": "Alice", "id": "m1"}]),
    );
    server
        .mock("POST", "/groups/100/members/m1/remove")
        .match_query(Matcher::UrlEncoded("token".into(), "T".into()))
        .with_status(200)
        .create();
    server
        .mock("POST", "/groups/100/members/add")
        .match_query(Matcher::UrlEncoded("token".into(), "T".into()))
        .match_body(Matcher::Json(
            json!({"members": [{"user_id": "u1", "nickname": "Bob"}]}),
        ))
        .with_status(202)
        .create();

    server_cmd(home_dir.path(), &server)
        .args(["remove", "u1", "--group", "100", "--nickname", "Bob"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "User successfully removed from group 100.",
        ))
        .stdout(predicate::str::contains("User re-added to group 100 as Bob."));
}

#[test]
fn remove_non_member_is_not_a_failure() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    mock_group(&mut server, "200", "Two", json!([]));

    server_cmd(home_dir.path(), &server)
        .args(["remove", "u1", "--group", "200"])
        .assert()
        .success()
        .stdout(predicate::str::contains("User is not a member of group 200."))
        .stderr(predicate::str::is_empty());
}

#[test]
fn rename_rejects_long_nickname() {
    let home_dir = tempdir().expect("tempdir");
    let server = Server::new();
    let nickname = "x".repeat(51);

    server_cmd(home_dir.path(), &server)
        .args(["rename", "u1", &nickname])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Rejected: validation error"));
}

#[test]
fn invite_by_phone_reports_api_error() {
    let home_dir = tempdir().expect("tempdir");
    let mut server = Server::new();
    server
        .mock("POST", "/groups/100/members/add")
        .match_query(Matcher::Any)
        .match_body(Matcher::Json(
            json!({"members": [{"phone_number": "+15550100", "nickname": "Newbie"}]}),
        ))
        .with_status(202)
        .create();
    server
        .mock("POST", "/groups/200/members/add")
        .match_query(Matcher::Any)
        .with_status(400)
        .with_body(json!({"meta": {"errors": ["group is full"]}}).to_string())
        .create();

    server_cmd(home_dir.path(), &server)
        .args(["invite", "--phone", "+15550100", "--nickname", "Newbie"])
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "User successfully added to group 100 as Newbie.",
        ))
        .stdout(predicate::str::contains(
            "Error adding user to group 200: api error (400): group is full",
        ));
}
