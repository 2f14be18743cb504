use sysinfo::System;

use crate::config::AuditConfig;

/// Outcome of one environment precondition.
#[derive(Debug, Clone)]
pub struct CheckOutcome {
    pub name: &'static str,
    pub passed: bool,
    pub detail: String,
}

/// Results of the startup environment checks, gathered before any
/// collection work starts.
#[derive(Debug, Clone)]
pub struct PreflightReport {
    pub checks: Vec<CheckOutcome>,
}

impl PreflightReport {
    pub fn passed(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Multi-line description of every failed check.
    pub fn failures(&self) -> String {
        self.checks
            .iter()
            .filter(|c| !c.passed)
            .map(|c| format!("{}: {}", c.name, c.detail))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Runs the environment checks the audit requires: enough free memory for
/// the traversals, a working directory inside an install content directory,
/// and an unprivileged user.
pub fn run(config: &AuditConfig) -> PreflightReport {
    let mut sys = System::new();
    sys.refresh_memory();

    let cwd = std::env::current_dir()
        .map(|p| p.display().to_string())
        .unwrap_or_default();
    let user = std::env::var("USER")
        .or_else(|_| std::env::var("USERNAME"))
        .unwrap_or_default();

    PreflightReport {
        checks: vec![
            memory_check(sys.available_memory(), config.min_free_memory_bytes),
            working_directory_check(&cwd, &config.live_content_root, &config.staging_content_root),
            privilege_check(&user),
        ],
    }
}

fn memory_check(available: u64, required: u64) -> CheckOutcome {
    CheckOutcome {
        name: "free memory",
        passed: available >= required,
        detail: format!("{available} bytes available, {required} required"),
    }
}

fn working_directory_check(cwd: &str, live_root: &str, staging_root: &str) -> CheckOutcome {
    let passed = is_install_dir(cwd, live_root) || is_install_dir(cwd, staging_root);
    CheckOutcome {
        name: "working directory",
        passed,
        detail: if passed {
            cwd.to_string()
        } else {
            format!("{cwd} is not inside an install content directory")
        },
    }
}

fn privilege_check(user: &str) -> CheckOutcome {
    CheckOutcome {
        name: "privilege",
        passed: user != "root",
        detail: format!("running as '{user}'"),
    }
}

/// True when `cwd` is `<root>/<install>` or deeper, with a non-empty
/// install component.
fn is_install_dir(cwd: &str, root: &str) -> bool {
    let Some(rest) = cwd.strip_prefix(root) else {
        return false;
    };
    let Some(rest) = rest.strip_prefix('/') else {
        return false;
    };
    rest.split('/').next().is_some_and(|segment| !segment.is_empty())
}
