// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::io::Write;
use std::path::PathBuf;

use super::Config;
use super::loader::{ConfigLoader, Source};
use super::types::GrantSpec;
use crate::core::permissions::{Capability, Grant, PermissionGate, SysFacet, SysFacets};
use crate::core::platform::Platform;
use crate::logging::LogLevel;

#[test]
fn test_default_config_denies_everything() {
    let config = Config::default();
    assert_eq!(config.log.level, LogLevel::INFO);

    let perms = config.permissions(Platform::posix()).unwrap();
    assert!(perms.check(&Capability::env()).is_err());
    assert!(perms.check(&Capability::Sys(SysFacet::Uid)).is_err());
    assert!(perms.check(&Capability::Run(PathBuf::from("sh"))).is_err());
}

#[test]
fn test_grant_spec_scopes() {
    let cases = vec![
        ("false", GrantSpec::Flag(false).scopes()),
        ("true", GrantSpec::Flag(true).scopes()),
        (
            "list",
            GrantSpec::List(vec!["PATH".into(), " HOME ".into(), String::new()]).scopes(),
        ),
        ("csv", GrantSpec::Csv("PATH, HOME,".into()).scopes()),
        ("blank csv", GrantSpec::Csv(" , ".into()).scopes()),
    ];
    insta::assert_debug_snapshot!(cases, @r#"
    [
        (
            "false",
            None,
        ),
        (
            "true",
            Some(
                [],
            ),
        ),
        (
            "list",
            Some(
                [
                    "PATH",
                    "HOME",
                ],
            ),
        ),
        (
            "csv",
            Some(
                [
                    "PATH",
                    "HOME",
                ],
            ),
        ),
        (
            "blank csv",
            None,
        ),
    ]
    "#);
}

#[test]
fn test_config_parse() {
    let toml = r#"
[log]
level = 4
json = true

[permissions]
allow_env = ["PATH", "HOME"]
allow_sys = "hostname,uid"
allow_run = true
"#;
    let config = Config::parse(toml).unwrap();
    assert_eq!(config.log.level, LogLevel::DEBUG);
    assert!(config.log.json);

    let perms = config.permissions(Platform::posix()).unwrap();
    assert_eq!(
        perms.env_grant(),
        &Grant::Some(vec!["PATH".to_string(), "HOME".to_string()])
    );
    assert_eq!(perms.sys_grant(), SysFacets::HOSTNAME | SysFacets::UID);
    assert_eq!(perms.read_grant(), &Grant::None);
    assert!(perms.run_grant().is_all());
    assert!(perms.check(&Capability::env_var("PATH")).is_ok());
    assert!(perms.check(&Capability::env_var("USER")).is_err());
    assert!(perms.check(&Capability::env()).is_err());
    assert!(perms.check(&Capability::Sys(SysFacet::Hostname)).is_ok());
    assert!(perms.check(&Capability::Sys(SysFacet::Gid)).is_err());
    assert!(perms.check(&Capability::Run(PathBuf::from("/bin/sh"))).is_ok());
}

#[cfg(unix)]
#[test]
fn test_run_grants_are_resolved_paths() {
    let config = Config::parse(
        r#"
[permissions]
allow_run = ["tools/build", "/opt/bin/deploy"]
"#,
    )
    .unwrap();

    let cwd = std::env::current_dir().unwrap();
    let perms = config.permissions(Platform::posix()).unwrap();
    assert_eq!(
        perms.run_grant(),
        &Grant::Some(vec![
            cwd.join("tools").join("build"),
            PathBuf::from("/opt/bin/deploy"),
        ])
    );
    assert!(perms.check(&Capability::Run(cwd.join("tools/build"))).is_ok());
    assert!(
        perms
            .check(&Capability::Run(PathBuf::from("/elsewhere/tools/build")))
            .is_err()
    );
}

#[test]
fn test_allow_all_overrides_scopes() {
    let config = Config::parse(
        r#"
[permissions]
allow_all = true
allow_env = "PATH"
"#,
    )
    .unwrap();
    let perms = config.permissions(Platform::posix()).unwrap();
    assert!(perms.check(&Capability::env()).is_ok());
    assert!(perms.check(&Capability::Sys(SysFacet::SystemMemoryInfo)).is_ok());
}

#[test]
fn test_unknown_sys_facet_is_rejected() {
    let err = Config::parse("[permissions]\nallow_sys = \"hostname,cpus\"\n").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'allow_sys' in section '[permissions]': unknown sys facet 'cpus', expected one of: hostname, osRelease, loadavg, systemMemoryInfo, uid, gid"
    );
}

#[test]
fn test_unknown_field_is_rejected() {
    assert!(Config::parse("[permissions]\nallow_net = true\n").is_err());
    assert!(Config::parse("[logging]\nlevel = 3\n").is_err());
}

#[test]
fn test_log_level_out_of_range() {
    let err = Config::parse("[log]\nlevel = 9\n").unwrap_err();
    assert!(
        err.to_string().contains("log level must be 0-5, got 9"),
        "unexpected error: {err}"
    );
}

#[test]
fn test_read_scopes_are_absolute() {
    let config = Config::parse("[permissions]\nallow_read = \"relative/dir\"\n").unwrap();
    let perms = config.permissions(Platform::posix()).unwrap();

    let inside = std::path::absolute("relative/dir/file").unwrap();
    assert!(perms.check(&Capability::read_blind(inside, "x")).is_ok());
}

#[test]
fn test_file_layers_override_in_order() {
    let mut base = tempfile::NamedTempFile::new().unwrap();
    writeln!(base, "[log]\nlevel = 1\n[permissions]\nallow_env = true").unwrap();
    let mut over = tempfile::NamedTempFile::new().unwrap();
    writeln!(over, "[log]\nlevel = 5").unwrap();

    let config = ConfigLoader::new()
        .file(base.path())
        .file(over.path())
        .build()
        .unwrap();

    assert_eq!(config.log.level, LogLevel::TRACE);
    assert_eq!(config.permissions.allow_env, GrantSpec::Flag(true));
}

#[test]
fn test_missing_required_file_fails() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("missing.toml");

    assert!(ConfigLoader::new().file(&missing).build().is_err());

    let loader = ConfigLoader::new().working_dir_file(&missing);
    assert!(loader.sources().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_set_override_wins() {
    let config = ConfigLoader::new()
        .inline("[permissions]\nallow_sys = false\n")
        .set("permissions.allow_sys", "uid,gid")
        .unwrap()
        .build()
        .unwrap();
    assert_eq!(config.permissions.allow_sys.to_string(), "uid,gid");
}

#[test]
fn test_format_sources() {
    let dir = tempfile::tempdir().unwrap();
    let local = dir.path().join("envgate.toml");
    std::fs::write(&local, "[log]\nlevel = 3\n").unwrap();

    let loader = ConfigLoader::new()
        .working_dir_file(&local)
        .inline("[log]\njson = true\n")
        .set("permissions.allow_env", true)
        .unwrap()
        .set("log.level", 5)
        .unwrap();

    let lines = loader.format_sources();
    assert_eq!(lines[0], format!("1. [cwd] {}", local.display()));
    insta::assert_debug_snapshot!(&lines[1..], @r#"
    [
        "2. [inline] <toml>",
        "3. [flags] permissions.allow_env, log.level",
    ]
    "#);

    let config = loader.build().unwrap();
    assert_eq!(config.log.level, LogLevel::TRACE);
    assert!(config.log.json);
}

#[test]
fn test_env_layer_recorded_only_when_set() {
    // No variable carries this prefix, so nothing is listed.
    let loader = ConfigLoader::new().env("ENVGATE_UNUSED_PREFIX_FOR_TESTS");
    assert!(loader.sources().is_empty());
    assert!(loader.build().is_ok());
}

#[test]
fn test_layered_without_files() {
    let overrides = vec![("permissions.allow_sys".to_string(), config::Value::from("uid"))];
    let loader = ConfigLoader::layered(&[], overrides).unwrap();
    assert!(matches!(
        loader.sources().last(),
        Some(Source::Flags(keys)) if keys == &["permissions.allow_sys"]
    ));
}

#[test]
fn test_format_options() {
    let config = Config::parse(
        r#"
[permissions]
allow_env = ["PATH"]
allow_run = true
"#,
    )
    .unwrap();
    insta::assert_snapshot!(config.format_options().join("\n"), @r"
    log.file               = none
    log.json               = false
    log.level              = 3
    permissions.allow_env  = PATH
    permissions.allow_read = denied
    permissions.allow_run  = all
    permissions.allow_sys  = denied
    ");
}
