//! Tasks: link `symlinks/` into place, and undo it.
use anyhow::Result;
use std::path::{Path, PathBuf};

use super::{Context, ProcessOpts, Task, TaskResult, process_resources, process_resources_remove};
use crate::config::symlinks::Symlink;
use crate::resources::symlink::SymlinkResource;

/// Create symlinks from symlinks/ into place.
#[derive(Debug)]
pub struct InstallSymlinks;

impl Task for InstallSymlinks {
    fn name(&self) -> &'static str {
        "Install symlinks"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.symlinks.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources(ctx, resources(ctx), &ProcessOpts::abort("link"))
    }
}

/// Replace installed symlinks with copies of their sources.
#[derive(Debug)]
pub struct UninstallSymlinks;

impl Task for UninstallSymlinks {
    fn name(&self) -> &'static str {
        "Remove symlinks"
    }

    fn should_run(&self, ctx: &Context) -> bool {
        !ctx.config.symlinks.is_empty()
    }

    fn run(&self, ctx: &Context) -> Result<TaskResult> {
        process_resources_remove(ctx, resources(ctx), "unlink")
    }
}

fn resources(ctx: &Context) -> Vec<SymlinkResource> {
    let symlinks_dir = ctx.symlinks_dir();
    ctx.config
        .symlinks
        .iter()
        .map(|s| SymlinkResource::new(symlinks_dir.join(&s.source), compute_target(&ctx.home, s)))
        .collect()
}

/// Compute where a symlink lands.
///
/// Without an explicit target, `zshrc` maps to `$HOME/.zshrc` and
/// `ssh/config` to `$HOME/.ssh/config`. Explicit targets are taken as-is
/// when absolute and joined to `$HOME` otherwise.
fn compute_target(home: &Path, symlink: &Symlink) -> PathBuf {
    match &symlink.target {
        Some(target) if Path::new(target).is_absolute() => PathBuf::from(target),
        Some(target) => home.join(target),
        None => home.join(format!(".{}", symlink.source)),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::logging::TaskStatus;
    use crate::tasks::execute;
    use crate::tasks::test_helpers::{empty_config, make_static_context};

    fn link(source: &str, target: Option<&str>) -> Symlink {
        Symlink {
            source: source.to_string(),
            target: target.map(ToString::to_string),
        }
    }

    #[test]
    fn target_for_zshrc() {
        let home = PathBuf::from("/home/user");
        assert_eq!(
            compute_target(&home, &link("zshrc", None)),
            PathBuf::from("/home/user/.zshrc")
        );
    }

    #[test]
    fn target_for_ssh_config() {
        let home = PathBuf::from("/home/user");
        assert_eq!(
            compute_target(&home, &link("ssh/config", None)),
            PathBuf::from("/home/user/.ssh/config")
        );
    }

    #[test]
    fn absolute_explicit_target_is_kept() {
        let home = PathBuf::from("/home/user");
        assert_eq!(
            compute_target(
                &home,
                &link("etc/ssh/sshd_config", Some("/etc/ssh/sshd_config"))
            ),
            PathBuf::from("/etc/ssh/sshd_config")
        );
    }

    #[test]
    fn relative_explicit_target_joins_home() {
        let home = PathBuf::from("/home/user");
        assert_eq!(
            compute_target(
                &home,
                &link("config/oh-my-posh/zdot.omp.json", Some("Library/zdot.omp.json"))
            ),
            PathBuf::from("/home/user/Library/zdot.omp.json")
        );
    }

    #[test]
    fn should_run_false_without_symlinks() {
        let (ctx, _log) = make_static_context(empty_config(PathBuf::from("/tmp")));
        assert!(!InstallSymlinks.should_run(&ctx));
        assert!(!UninstallSymlinks.should_run(&ctx));
    }

    #[cfg(unix)]
    #[test]
    fn install_then_uninstall_round_trip() {
        let root = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("symlinks/ssh")).unwrap();
        std::fs::write(root.path().join("symlinks/zshrc"), "eval").unwrap();
        std::fs::write(root.path().join("symlinks/ssh/config"), "Host *").unwrap();

        let mut config = empty_config(root.path().to_path_buf());
        config.symlinks = vec![link("zshrc", None), link("ssh/config", None)];
        let (mut ctx, log) = make_static_context(config);
        ctx.home = home.path().to_path_buf();

        execute(&InstallSymlinks, &ctx);
        let zshrc = home.path().join(".zshrc");
        assert_eq!(
            std::fs::read_link(&zshrc).unwrap(),
            root.path().join("symlinks/zshrc")
        );
        assert!(home.path().join(".ssh/config").is_symlink());

        execute(&UninstallSymlinks, &ctx);
        assert!(!zshrc.is_symlink());
        assert_eq!(std::fs::read_to_string(&zshrc).unwrap(), "eval");

        let statuses: Vec<TaskStatus> = log.task_entries().iter().map(|e| e.status).collect();
        assert_eq!(statuses, [TaskStatus::Ok, TaskStatus::Ok]);
    }

    #[cfg(unix)]
    #[test]
    fn dry_run_changes_nothing() {
        let root = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("symlinks")).unwrap();
        std::fs::write(root.path().join("symlinks/zshrc"), "eval").unwrap();

        let mut config = empty_config(root.path().to_path_buf());
        config.symlinks = vec![link("zshrc", None)];
        let (mut ctx, _log) = make_static_context(config);
        ctx.home = home.path().to_path_buf();
        ctx.dry_run = true;

        let result = InstallSymlinks.run(&ctx).unwrap();
        assert!(matches!(result, TaskResult::DryRun));
        assert!(home.path().join(".zshrc").symlink_metadata().is_err());
    }

    #[cfg(unix)]
    #[test]
    fn real_directory_target_is_left_alone() {
        let root = tempfile::tempdir().unwrap();
        let home = tempfile::tempdir().unwrap();
        std::fs::create_dir_all(root.path().join("symlinks")).unwrap();
        std::fs::write(root.path().join("symlinks/zshrc"), "eval").unwrap();
        std::fs::create_dir(home.path().join(".zshrc")).unwrap();

        let mut config = empty_config(root.path().to_path_buf());
        config.symlinks = vec![link("zshrc", None)];
        let (mut ctx, _log) = make_static_context(config);
        ctx.home = home.path().to_path_buf();

        InstallSymlinks.run(&ctx).unwrap();
        assert!(home.path().join(".zshrc").is_dir());
        assert!(!home.path().join(".zshrc").is_symlink());
    }
}
