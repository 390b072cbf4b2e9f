// envgate: permission-gated host environment access
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{
    Capability, Grant, PermissionDenied, PermissionGate, PermissionState, Permissions, Prompter,
    SysFacet, SysFacets, resolve_program,
};
use crate::core::test_utils::{capture_logs, case_insensitive_platform};
use crate::core::platform::Platform;

#[derive(Debug)]
struct CountingPrompter {
    answer: bool,
    asked: AtomicUsize,
}

impl Prompter for CountingPrompter {
    fn prompt(&self, _capability: &Capability) -> bool {
        self.asked.fetch_add(1, Ordering::SeqCst);
        self.answer
    }
}

fn prompter(answer: bool) -> Arc<CountingPrompter> {
    Arc::new(CountingPrompter {
        answer,
        asked: AtomicUsize::new(0),
    })
}

#[test]
fn test_capability_descriptors() {
    let caps = [
        Capability::env(),
        Capability::env_var("PATH"),
        Capability::Sys(SysFacet::SystemMemoryInfo),
        Capability::read_blind("/usr/bin/envgate", "exec_path"),
        Capability::Read {
            path: PathBuf::from("/etc/hosts"),
            blind: None,
        },
        Capability::Run(PathBuf::from("/bin/sh")),
    ];

    insta::assert_debug_snapshot!(caps.map(|c| c.to_string()), @r#"
    [
        "env",
        "env:PATH",
        "sys:systemMemoryInfo",
        "read:<exec_path>",
        "read:/etc/hosts",
        "run:/bin/sh",
    ]
    "#);
}

#[test]
fn test_denial_messages_name_the_flag() {
    let messages = [
        Capability::env(),
        Capability::read_blind("/usr/bin/envgate", "exec_path"),
        Capability::Read {
            path: PathBuf::from("/etc/hosts"),
            blind: None,
        },
        Capability::Run(PathBuf::from("/bin/sh")),
    ]
    .map(|c| PermissionDenied::new(c).to_string());

    insta::assert_debug_snapshot!(messages, @r#"
    [
        "Requires env access, run again with the --allow-env flag",
        "Requires read access to <exec_path>, run again with the --allow-read flag",
        "Requires read access to \"/etc/hosts\", run again with the --allow-read flag",
        "Requires run access to \"/bin/sh\", run again with the --allow-run flag",
    ]
    "#);

    let denied = PermissionDenied::new(Capability::Sys(SysFacet::Uid));
    assert_eq!(denied.hint(), "--allow-sys");
    assert_eq!(denied.capability(), &Capability::Sys(SysFacet::Uid));
}

#[test]
fn test_deny_all_and_allow_all() {
    let caps = [
        Capability::env(),
        Capability::env_var("HOME"),
        Capability::Sys(SysFacet::Hostname),
        Capability::read_blind("/bin/envgate", "exec_path"),
        Capability::Run(PathBuf::from("/bin/sh")),
    ];

    let deny = Permissions::deny_all();
    let allow = Permissions::allow_all();
    for cap in &caps {
        assert!(deny.check(cap).is_err(), "{cap} should be denied");
        assert!(allow.check(cap).is_ok(), "{cap} should be allowed");
    }
}

#[test]
fn test_scoped_env_uses_platform_comparator() {
    let posix = Permissions::builder()
        .env(Grant::Some(vec!["Path".to_string()]))
        .platform(Platform::posix())
        .build();
    assert!(posix.check(&Capability::env_var("Path")).is_ok());
    assert!(posix.check(&Capability::env_var("PATH")).is_err());
    assert!(posix.check(&Capability::env()).is_err());

    let folding = Permissions::builder()
        .env(Grant::Some(vec!["Path".to_string()]))
        .platform(case_insensitive_platform())
        .build();
    assert!(folding.check(&Capability::env_var("PATH")).is_ok());
}

#[test]
fn test_sys_facets_are_independent() {
    let permissions = Permissions::builder()
        .sys([SysFacet::Hostname, SysFacet::Uid].into_iter().collect())
        .build();

    assert_eq!(permissions.sys_grant(), SysFacets::HOSTNAME | SysFacets::UID);
    assert!(permissions.check(&Capability::Sys(SysFacet::Hostname)).is_ok());
    assert!(permissions.check(&Capability::Sys(SysFacet::Uid)).is_ok());
    assert!(permissions.check(&Capability::Sys(SysFacet::Gid)).is_err());
}

#[test]
fn test_read_grant_covers_descendants() {
    let permissions = Permissions::builder()
        .read(Grant::Some(vec![PathBuf::from("/opt/tools")]))
        .build();

    let read = |p: &str| Capability::Read {
        path: PathBuf::from(p),
        blind: None,
    };
    assert!(permissions.check(&read("/opt/tools")).is_ok());
    assert!(permissions.check(&read("/opt/tools/bin/envgate")).is_ok());
    assert!(permissions.check(&read("/opt/toolsmith")).is_err());
}

#[test]
fn test_run_grant_matches_paths_not_names() {
    let permissions = Permissions::builder()
        .run(Grant::Some(vec![
            PathBuf::from("cargo"),
            PathBuf::from("/usr/bin/git"),
        ]))
        .build();

    let run = |p: &str| Capability::Run(PathBuf::from(p));
    assert!(permissions.check(&run("/usr/bin/git")).is_ok());
    assert!(permissions.check(&run("/usr/local/bin/git")).is_err());
    assert!(permissions.check(&run("/home/me/.cargo/bin/cargo")).is_err());
}

#[cfg(unix)]
#[test]
fn test_bare_name_grant_does_not_cover_other_files() {
    let sh = resolve_program(Path::new("sh"), Some(OsStr::new("/bin")), Path::new("/"));
    assert_eq!(sh, PathBuf::from("/bin/sh"));

    let permissions = Permissions::builder()
        .run(Grant::Some(vec![sh.clone()]))
        .build();
    assert!(permissions.check(&Capability::Run(sh)).is_ok());
    assert!(
        permissions
            .check(&Capability::Run(PathBuf::from("/tmp/elsewhere/sh")))
            .is_err()
    );
}

#[cfg(unix)]
#[test]
fn test_path_grant_covers_bare_name_invocation() {
    let permissions = Permissions::builder()
        .run(Grant::Some(vec![PathBuf::from("/bin/sh")]))
        .build();

    let program = resolve_program(Path::new("sh"), Some(OsStr::new("/bin")), Path::new("/"));
    assert!(permissions.check(&Capability::Run(program)).is_ok());
}

#[test]
fn test_resolve_program_anchors_relative_paths() {
    let cwd = std::env::current_dir().unwrap();
    assert_eq!(
        resolve_program(Path::new("tools/run"), None, &cwd),
        cwd.join("tools").join("run")
    );

    let absolute = cwd.join("bin").join("tool");
    assert_eq!(resolve_program(&absolute, None, &cwd), absolute);

    // Not on the (empty) search path: left as typed.
    assert_eq!(
        resolve_program(Path::new("no-such-program-xyz"), Some(OsStr::new("")), &cwd),
        PathBuf::from("no-such-program-xyz")
    );
}

#[test]
fn test_prompt_collapses_to_binary_outcome() {
    let yes = prompter(true);
    let permissions = Permissions::builder().prompter(yes.clone()).build();
    let cap = Capability::Sys(SysFacet::LoadAvg);

    assert_eq!(permissions.state(&cap), PermissionState::Prompt);
    assert!(permissions.check(&cap).is_ok());
    assert_eq!(yes.asked.load(Ordering::SeqCst), 1);

    let no = prompter(false);
    let permissions = Permissions::builder()
        .prompter(no.clone())
        .sys(SysFacets::LOADAVG)
        .build();
    assert_eq!(permissions.state(&cap), PermissionState::Granted);
    assert!(permissions.check(&cap).is_ok());
    assert!(permissions.check(&Capability::env()).is_err());
    // Granted capabilities never reach the prompter.
    assert_eq!(no.asked.load(Ordering::SeqCst), 1);
}

#[test]
fn test_without_prompter_prompt_is_denied() {
    let permissions = Permissions::deny_all();
    assert_eq!(
        permissions.state(&Capability::env()),
        PermissionState::Denied
    );
}

#[test]
fn test_denial_is_logged() {
    let permissions = Permissions::deny_all();
    let logs = capture_logs(|| {
        let _ = permissions.check(&Capability::Sys(SysFacet::Hostname));
    });
    assert!(logs.contains("permission denied"), "logs: {logs}");
    assert!(logs.contains("sys:hostname"), "logs: {logs}");
}

#[test]
fn test_grant_from_values() {
    assert_eq!(Grant::<String>::from_values(vec![]), Grant::All);
    assert_eq!(
        Grant::from_values(vec!["PATH".to_string()]),
        Grant::Some(vec!["PATH".to_string()])
    );
}

#[test]
fn test_sys_facet_names_round_trip() {
    for facet in SysFacet::ALL {
        assert_eq!(facet.name().parse::<SysFacet>().unwrap(), facet);
    }
    insta::assert_snapshot!(
        "uptime".parse::<SysFacet>().unwrap_err().to_string(),
        @"invalid value for 'allow_sys' in section '[permissions]': unknown sys facet 'uptime', expected one of: hostname, osRelease, loadavg, systemMemoryInfo, uid, gid"
    );
}
