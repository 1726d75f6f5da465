// Shared fixtures for integration tests.
//
// Each test gets its own temporary dotfiles root and fake home, plus an
// executor that never touches the real system.
#![allow(
    dead_code,
    clippy::expect_used,
    clippy::unwrap_used,
    clippy::must_use_candidate
)]

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use anyhow::{Result, bail};
use tempfile::TempDir;

use zdot::config::{Config, profiles};
use zdot::exec::{ExecResult, Executor};
use zdot::logging::{Log, Logger};
use zdot::platform::{Os, Platform};
use zdot::tasks::Context;

/// A throwaway dotfiles repository plus a fake home directory.
#[derive(Debug)]
pub struct IntegrationTestContext {
    root: TempDir,
    home: TempDir,
}

impl IntegrationTestContext {
    /// Dotfiles root containing `conf/` and `symlinks/`.
    pub fn root(&self) -> &Path {
        self.root.path()
    }

    /// Fake `$HOME`.
    pub fn home(&self) -> &Path {
        self.home.path()
    }

    /// Resolve `profile` for `os` and load every config file.
    pub fn load_config(&self, profile: &str, os: Os) -> Config {
        let profile = profiles::resolve(profile, &self.root().join("conf"), &Platform::new(os))
            .expect("resolve profile");
        Config::load(self.root(), profile).expect("load config")
    }

    /// Task context rooted at the fake home.
    pub fn task_context(
        &self,
        config: Config,
        os: Os,
        dry_run: bool,
        executor: Arc<dyn Executor>,
    ) -> (Context, Arc<Logger>) {
        let log = Arc::new(Logger::new("integration"));
        let ctx = Context {
            config: Arc::new(config),
            platform: Arc::new(Platform::new(os)),
            log: Arc::clone(&log) as Arc<dyn Log>,
            dry_run,
            home: self.home().to_path_buf(),
            executor,
        };
        (ctx, log)
    }
}

/// Builder for [`IntegrationTestContext`].
#[derive(Debug, Default)]
pub struct TestContextBuilder {
    files: Vec<(String, String)>,
    sources: Vec<(String, String)>,
}

impl TestContextBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace a file under `conf/`.
    #[must_use]
    pub fn with_config_file(mut self, name: &str, content: &str) -> Self {
        self.files.retain(|(n, _)| n != name);
        self.files.push((name.to_string(), content.to_string()));
        self
    }

    /// Add a file under `symlinks/`.
    #[must_use]
    pub fn with_symlink_source(mut self, path: &str, content: &str) -> Self {
        self.sources.push((path.to_string(), content.to_string()));
        self
    }

    pub fn build(self) -> IntegrationTestContext {
        let root = tempfile::tempdir().expect("create root");
        let home = tempfile::tempdir().expect("create home");
        setup_minimal_repo(root.path());
        for (name, content) in &self.files {
            write(&root.path().join("conf").join(name), content);
        }
        for (path, content) in &self.sources {
            write(&root.path().join("symlinks").join(path), content);
        }
        IntegrationTestContext { root, home }
    }
}

/// Lay down `conf/profiles.toml` and a single `zshrc` symlink.
pub fn setup_minimal_repo(root: &Path) {
    write(
        &root.join("conf/profiles.toml"),
        "[base]\n\n[server]\ninclude = [\"server\"]\n",
    );
    write(&root.join("conf/symlinks.toml"), "[base]\nsymlinks = [\"zshrc\"]\n");
    write(&root.join("symlinks/zshrc"), "eval \"$(zdot init zsh)\"\n");
}

fn write(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(path, content).expect("write file");
}

/// Executor answering from a script and recording every call.
///
/// `which` succeeds for the listed programs only; commands without a
/// scripted answer fail.
#[derive(Debug, Default)]
pub struct ScriptedExecutor {
    programs: Vec<String>,
    answers: Vec<(String, String)>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_programs(mut self, programs: &[&str]) -> Self {
        self.programs = programs.iter().map(|p| (*p).to_string()).collect();
        self
    }

    /// Answer `command` (program and args joined by spaces) with `stdout`.
    #[must_use]
    pub fn answer(mut self, command: &str, stdout: &str) -> Self {
        self.answers.push((command.to_string(), stdout.to_string()));
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn lookup(&self, program: &str, args: &[&str]) -> ExecResult {
        let line = std::iter::once(program)
            .chain(args.iter().copied())
            .collect::<Vec<_>>()
            .join(" ");
        self.calls.lock().unwrap().push(line.clone());
        let answer = self.answers.iter().find(|(c, _)| *c == line);
        ExecResult {
            stdout: answer.map(|(_, out)| out.clone()).unwrap_or_default(),
            stderr: String::new(),
            success: answer.is_some(),
            code: Some(i32::from(answer.is_none())),
        }
    }
}

impl Executor for ScriptedExecutor {
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        let result = self.lookup(program, args);
        if !result.success {
            bail!("{program} failed");
        }
        Ok(result)
    }

    fn run_unchecked(&self, program: &str, args: &[&str]) -> Result<ExecResult> {
        Ok(self.lookup(program, args))
    }

    fn run_interactive(&self, program: &str, args: &[&str]) -> Result<()> {
        self.run(program, args).map(|_| ())
    }

    fn which(&self, program: &str) -> bool {
        self.programs.iter().any(|p| p == program)
    }
}

/// Create `path` (and parents) as an empty file and return it.
pub fn touch(path: PathBuf) -> PathBuf {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("create parent");
    }
    fs::write(&path, "").expect("touch");
    path
}
