#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rci() -> Command {
    cargo_bin_cmd!("rcheckin")
}

/// Isolated set of paths for one test, under the system temp dir.
pub struct TestEnv {
    pub root: PathBuf,
    pub config: String,
    pub logs: String,
    pub settings: String,
}

impl TestEnv {
    /// Fresh directory (any previous content is removed)
    pub fn new(name: &str) -> Self {
        let mut root = env::temp_dir();
        root.push(format!("rcheckin_test_{name}"));
        fs::remove_dir_all(&root).ok();
        fs::create_dir_all(&root).expect("create test dir");

        let s = |p: PathBuf| p.to_string_lossy().to_string();
        Self {
            config: s(root.join("rcheckin.conf")),
            logs: s(root.join("logs")),
            settings: s(root.join("settings.json")),
            root,
        }
    }

    /// Global flags pointing every path into this env, followed by `args`.
    pub fn cmd(&self, args: &[&str]) -> Command {
        let mut c = rci();
        c.env("NO_COLOR", "1")
            .args([
                "--config",
                &self.config,
                "--logs-dir",
                &self.logs,
                "--settings",
                &self.settings,
            ])
            .args(args);
        c
    }

    pub fn ledger_file(&self, date: &str) -> PathBuf {
        PathBuf::from(&self.logs).join(format!("attendance_{date}.xlsx"))
    }

    /// Output file path inside the env, removed if present
    pub fn out(&self, name: &str) -> String {
        let p = self.root.join(name);
        fs::remove_file(&p).ok();
        p.to_string_lossy().to_string()
    }
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
