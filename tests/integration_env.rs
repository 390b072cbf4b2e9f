// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the environment store.
//!
//! The built binary is the child process: `envgate env get KEY...` reports
//! what a child actually inherited.

use std::sync::Arc;

use envgate::core::env::store::EnvStore;
use envgate::core::permissions::Permissions;
use envgate::core::platform::Platform;
use envgate::core::process::builder::{ProcessBuilder, ProcessOutput};

const BIN: &str = env!("CARGO_BIN_EXE_envgate");

fn inherited_store() -> EnvStore {
    EnvStore::from_process(Arc::new(Permissions::allow_all()), Platform::host())
}

async fn envgate(store: &EnvStore, args: &[&str]) -> ProcessOutput {
    ProcessBuilder::new(BIN)
        .args(args)
        .run(&Permissions::allow_all(), store)
        .await
        .expect("envgate should spawn")
}

/// Values a child sees for `keys`, in order.
async fn child_get(store: &EnvStore, keys: &[&str]) -> Vec<Option<String>> {
    let mut args = vec!["--allow-env", "env", "get"];
    args.extend_from_slice(keys);
    let output = envgate(store, &args).await;
    assert!(
        output.success(),
        "child failed: {}",
        String::from_utf8_lossy(output.stderr())
    );
    serde_json::from_slice(output.stdout()).expect("child should print a JSON array")
}

fn stderr(output: &ProcessOutput) -> String {
    String::from_utf8_lossy(output.stderr()).into_owned()
}

// =============================================================================
// Child inheritance
// =============================================================================

#[tokio::test]
async fn env_set_is_visible_to_child() {
    let store = inherited_store();
    store.set("EG_TEST_SET", "hello world").unwrap();
    store.set("EG_TEST_EMPTY", "").unwrap();

    assert_eq!(
        child_get(&store, &["EG_TEST_SET", "EG_TEST_EMPTY", "EG_TEST_UNSET"]).await,
        [Some("hello world".to_string()), Some(String::new()), None]
    );
}

#[tokio::test]
async fn env_delete_is_visible_to_child() {
    let store = inherited_store();
    store.set("EG_TEST_DELETE", "x").unwrap();
    store.delete("EG_TEST_DELETE").unwrap();
    store.delete("EG_TEST_DELETE").unwrap();

    assert_eq!(child_get(&store, &["EG_TEST_DELETE"]).await, [None]);
}

#[tokio::test]
async fn env_non_ascii_round_trips_through_child() {
    let store = inherited_store();
    store.set("EG_TEST_ÜNÏCODE", "µ ǅ 日本").unwrap();

    assert_eq!(
        child_get(&store, &["EG_TEST_ÜNÏCODE"]).await,
        [Some("µ ǅ 日本".to_string())]
    );
}

#[cfg(not(windows))]
#[tokio::test]
async fn env_keys_are_case_sensitive() {
    let store = inherited_store();
    store.set("EG_TEST_CASE", "upper").unwrap();
    store.set("eg_test_case", "lower").unwrap();

    assert_eq!(
        child_get(&store, &["EG_TEST_CASE", "eg_test_case", "Eg_Test_Case"]).await,
        [Some("upper".to_string()), Some("lower".to_string()), None]
    );
}

#[cfg(windows)]
#[tokio::test]
async fn env_keys_fold_ascii_case() {
    let store = inherited_store();
    store.set("eg_test_fold", "1").unwrap();
    store.set("Eg_Test_Fold", "2").unwrap();

    assert_eq!(store.get("EG_TEST_FOLD").unwrap().as_deref(), Some("2"));
    assert_eq!(
        child_get(&store, &["eg_test_fold", "Eg_Test_Fold", "EG_TEST_FOLD"]).await,
        [Some("2".to_string()), Some("2".to_string()), Some("2".to_string())]
    );
}

#[cfg(windows)]
#[tokio::test]
async fn env_micro_sign_and_capital_mu_are_distinct() {
    let store = inherited_store();
    store.set("EG_TEST_\u{00B5}", "micro").unwrap();
    store.set("EG_TEST_\u{039C}", "mu").unwrap();

    assert_eq!(
        child_get(&store, &["EG_TEST_\u{00B5}", "EG_TEST_\u{039C}"]).await,
        [Some("micro".to_string()), Some("mu".to_string())]
    );
}

#[cfg(windows)]
#[tokio::test]
async fn env_dz_digraph_follows_native_folding() {
    let store = inherited_store();
    store.set("EG_TEST_\u{01C6}", "lower").unwrap();
    store.set("EG_TEST_\u{01C5}", "title").unwrap();
    store.set("EG_TEST_\u{01C4}", "upper").unwrap();

    assert_eq!(
        child_get(
            &store,
            &["EG_TEST_\u{01C6}", "EG_TEST_\u{01C5}", "EG_TEST_\u{01C4}"]
        )
        .await,
        [
            Some("upper".to_string()),
            Some("title".to_string()),
            Some("upper".to_string())
        ]
    );
}

// =============================================================================
// Validation and permissions, through the CLI
// =============================================================================

#[tokio::test]
async fn env_get_without_permission_fails() {
    let output = envgate(&inherited_store(), &["env", "get", "PATH"]).await;
    assert_eq!(output.exit_code(), 1);
    assert!(output.stdout().is_empty());
    assert!(
        stderr(&output)
            .contains(r#"Requires env access to "PATH", run again with the --allow-env flag"#),
        "unexpected stderr: {}",
        stderr(&output)
    );
}

#[tokio::test]
async fn env_scoped_grant_allows_only_listed_keys() {
    let store = inherited_store();
    store.set("EG_TEST_SCOPED", "ok").unwrap();

    let allowed = envgate(&store, &["--allow-env=EG_TEST_SCOPED", "env", "get", "EG_TEST_SCOPED"]).await;
    assert!(allowed.success(), "{}", stderr(&allowed));
    assert_eq!(String::from_utf8_lossy(allowed.stdout()).trim(), r#"["ok"]"#);

    let denied = envgate(&store, &["--allow-env=EG_TEST_SCOPED", "env", "list"]).await;
    assert!(!denied.success());
    assert!(stderr(&denied).contains("Requires env access, run again with the --allow-env flag"));
}

#[tokio::test]
async fn env_get_rejects_invalid_keys() {
    let store = inherited_store();
    let output = envgate(&store, &["--allow-env", "env", "get", "A=B"]).await;
    assert!(!output.success());
    assert!(stderr(&output).contains(r#"Key contains invalid characters: "=""#));

    let output = envgate(&store, &["--allow-env", "env", "get", ""]).await;
    assert!(!output.success());
    assert!(stderr(&output).contains("Key is an empty string"));
}

#[tokio::test]
async fn env_validation_precedes_permission() {
    let output = envgate(&inherited_store(), &["env", "get", "A=B"]).await;
    assert!(!output.success());
    assert!(stderr(&output).contains("Key contains invalid characters"));
    assert!(!stderr(&output).contains("Requires env access"));
}

#[tokio::test]
async fn env_list_matches_store() {
    let store = inherited_store();
    store.set("EG_TEST_LIST", "listed").unwrap();

    let output = envgate(&store, &["--allow-env", "env", "list"]).await;
    assert!(output.success(), "{}", stderr(&output));

    let listed: std::collections::BTreeMap<String, String> =
        serde_json::from_slice(output.stdout()).unwrap();
    assert_eq!(listed.get("EG_TEST_LIST").map(String::as_str), Some("listed"));
}
