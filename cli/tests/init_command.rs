#![allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
//! Integration tests for the script printed by `zdot init`.
//!
//! Plugin candidates point into the fake home so "installed" simply means
//! the file exists.

mod common;

use std::path::Path;

use zdot::config::{Config, profiles};
use zdot::platform::{Os, Platform};
use zdot::shell::Shell;
use zdot::shell::init::{InitContext, PROMPT_HOOK, render};

use common::{IntegrationTestContext, ScriptedExecutor, TestContextBuilder, touch};

fn plugins_toml(candidates: &[&str]) -> String {
    let list = candidates
        .iter()
        .map(|c| format!("\"{c}\""))
        .collect::<Vec<_>>()
        .join(", ");
    format!("[base]\nplugins = [{{ name = \"autosuggestions\", candidates = [{list}] }}]\n")
}

fn render_for(
    ctx: &IntegrationTestContext,
    shell: Shell,
    os: Os,
    executor: &ScriptedExecutor,
    lookup: &dyn Fn(&str) -> Option<String>,
) -> String {
    let config = ctx.load_config("base", os);
    let platform = Platform::new(os);
    render(
        &config,
        shell,
        &InitContext {
            platform: &platform,
            executor,
            home: Some(ctx.home()),
            lookup,
        },
    )
}

fn no_env(_: &str) -> Option<String> {
    None
}

fn source_lines(script: &str) -> Vec<&str> {
    script.lines().filter(|l| l.starts_with("source ")).collect()
}

fn source_of(path: &Path) -> String {
    format!("source '{}'", path.display())
}

// ---------------------------------------------------------------------------
// Plugin resolution
// ---------------------------------------------------------------------------

#[test]
fn first_existing_candidate_is_sourced_once() {
    let ctx = TestContextBuilder::new()
        .with_config_file(
            "plugins.toml",
            &plugins_toml(&["~/a/plugin.zsh", "~/b/plugin.zsh", "$(brew --prefix)/c.zsh"]),
        )
        .build();
    let b = touch(ctx.home().join("b/plugin.zsh"));
    touch(ctx.home().join("c.zsh"));
    let executor = ScriptedExecutor::new().answer("brew --prefix", &ctx.home().to_string_lossy());

    let script = render_for(&ctx, Shell::Zsh, Os::MacOs, &executor, &no_env);

    assert_eq!(source_lines(&script), vec![source_of(&b).as_str()]);
    assert!(
        executor.calls().is_empty(),
        "later candidates must not be expanded: {:?}",
        executor.calls()
    );
}

#[test]
fn no_existing_candidate_emits_nothing() {
    let ctx = TestContextBuilder::new()
        .with_config_file("plugins.toml", &plugins_toml(&["~/a/plugin.zsh", "~/b/plugin.zsh"]))
        .build();

    let script = render_for(&ctx, Shell::Zsh, Os::Linux, &ScriptedExecutor::new(), &no_env);

    assert!(source_lines(&script).is_empty());
    assert!(!script.contains("# plugins"));
}

#[test]
fn single_existing_candidate_found_at_any_position() {
    let candidates = ["~/p0/plugin.zsh", "~/p1/plugin.zsh", "~/p2/plugin.zsh"];
    for position in 0..candidates.len() {
        let ctx = TestContextBuilder::new()
            .with_config_file("plugins.toml", &plugins_toml(&candidates))
            .build();
        let installed = touch(ctx.home().join(format!("p{position}/plugin.zsh")));

        let script = render_for(&ctx, Shell::Zsh, Os::Linux, &ScriptedExecutor::new(), &no_env);

        assert_eq!(
            source_lines(&script),
            vec![source_of(&installed).as_str()],
            "candidate at position {position}"
        );
    }
}

#[test]
fn failed_substitution_falls_through_to_next_candidate() {
    let ctx = TestContextBuilder::new()
        .with_config_file(
            "plugins.toml",
            &plugins_toml(&["$(brew --prefix)/plugin.zsh", "$MISSING_VAR/plugin.zsh", "~/plugin.zsh"]),
        )
        .build();
    let fallback = touch(ctx.home().join("plugin.zsh"));
    let executor = ScriptedExecutor::new();

    let script = render_for(&ctx, Shell::Zsh, Os::MacOs, &executor, &no_env);

    assert_eq!(source_lines(&script), vec![source_of(&fallback).as_str()]);
    assert_eq!(executor.calls(), vec!["brew --prefix"]);
}

#[test]
fn bash_skips_zsh_only_plugins() {
    let ctx = TestContextBuilder::new()
        .with_config_file(
            "plugins.toml",
            r#"[base]
plugins = [
  { name = "autosuggestions", candidates = ["~/zsh-only.zsh"] },
  { name = "fzf", candidates = ["~/fzf.sh"], shells = ["zsh", "bash"] },
]
"#,
        )
        .build();
    touch(ctx.home().join("zsh-only.zsh"));
    let fzf = touch(ctx.home().join("fzf.sh"));

    let script = render_for(&ctx, Shell::Bash, Os::Linux, &ScriptedExecutor::new(), &no_env);

    assert_eq!(source_lines(&script), vec![source_of(&fzf).as_str()]);
}

#[test]
fn shipped_config_sources_no_zsh_scripts_in_bash() {
    let root = Path::new(env!("CARGO_MANIFEST_DIR")).parent().unwrap();
    let platform = Platform::new(Os::Linux);
    let profile = profiles::resolve("base", &root.join("conf"), &platform).unwrap();
    let config = Config::load(root, profile).unwrap();
    let home = tempfile::tempdir().unwrap();
    touch(home.path().join(".fzf.zsh"));
    touch(home.path().join(".zsh/plugins/zsh-autosuggestions/zsh-autosuggestions.zsh"));
    let fzf_bash = touch(home.path().join(".fzf.bash"));
    let home_var = home.path().to_string_lossy().into_owned();
    let lookup = move |name: &str| (name == "HOME").then(|| home_var.clone());

    let script = render(
        &config,
        Shell::Bash,
        &InitContext {
            platform: &platform,
            executor: &ScriptedExecutor::new(),
            home: Some(home.path()),
            lookup: &lookup,
        },
    );

    let sources = source_lines(&script);
    assert!(sources.contains(&source_of(&fzf_bash).as_str()), "{script}");
    assert!(
        sources.iter().all(|l| !l.ends_with(".zsh'")),
        "bash sourced a zsh script: {sources:?}"
    );
}

// ---------------------------------------------------------------------------
// Environment
// ---------------------------------------------------------------------------

#[test]
fn conditional_editor_follows_the_environment() {
    let ctx = TestContextBuilder::new()
        .with_config_file(
            "env.toml",
            r#"[base]
vars = [
  { name = "EDITOR", value = "code --wait", when_env = "TERM_PROGRAM", equals = "vscode" },
  { name = "EDITOR", value = "nvim" },
]
"#,
        )
        .build();
    let executor = ScriptedExecutor::new();

    let vscode = |name: &str| (name == "TERM_PROGRAM").then(|| "vscode".to_string());
    let script = render_for(&ctx, Shell::Zsh, Os::Linux, &executor, &vscode);
    assert!(script.contains("export EDITOR=\"code --wait\"\n"));
    assert!(!script.contains("nvim"));

    let script = render_for(&ctx, Shell::Zsh, Os::Linux, &executor, &no_env);
    assert!(script.contains("export EDITOR=\"nvim\"\n"));
}

#[test]
fn exported_variable_feeds_plugin_candidates() {
    let ctx = TestContextBuilder::new()
        .with_config_file(
            "env.toml",
            "[base]\nvars = [{ name = \"ZSH_CUSTOM\", value = \"$HOME/.zsh\" }]\n",
        )
        .with_config_file("plugins.toml", &plugins_toml(&["$ZSH_CUSTOM/plugin.zsh"]))
        .build();
    let installed = touch(ctx.home().join(".zsh/plugin.zsh"));
    let home = ctx.home().to_string_lossy().into_owned();
    let lookup = move |name: &str| (name == "HOME").then(|| home.clone());

    let script = render_for(&ctx, Shell::Zsh, Os::Linux, &ScriptedExecutor::new(), &lookup);

    assert!(script.contains("export ZSH_CUSTOM=\"$HOME/.zsh\"\n"));
    assert_eq!(source_lines(&script), vec![source_of(&installed).as_str()]);
}

// ---------------------------------------------------------------------------
// Prompt
// ---------------------------------------------------------------------------

#[test]
fn prompt_hook_registered_and_theme_loaded() {
    let ctx = TestContextBuilder::new()
        .with_config_file("prompt.toml", "[base]\ntheme = \"config/oh-my-posh/zdot.omp.json\"\n")
        .build();

    let script = render_for(&ctx, Shell::Zsh, Os::Linux, &ScriptedExecutor::new(), &no_env);

    assert!(script.contains(&format!("add-zsh-hook precmd {PROMPT_HOOK}\n")));
    let hook = script.find(&format!("{PROMPT_HOOK}()")).unwrap();
    let posh = script.find("oh-my-posh 'init' 'zsh' '--config'").unwrap();
    assert!(hook < posh);
    let theme = ctx.root().join("symlinks/config/oh-my-posh/zdot.omp.json");
    assert!(script.contains(&format!("'{}'", theme.display())));
}

#[test]
fn script_starts_with_header_and_exports_root() {
    let ctx = TestContextBuilder::new().build();

    let script = render_for(&ctx, Shell::Zsh, Os::Linux, &ScriptedExecutor::new(), &no_env);

    assert!(script.starts_with(&format!("# zdot {} init for zsh (profile: base)\n", zdot::version())));
    assert!(script.contains(&format!("export ZDOT_ROOT=\"{}\"\n", ctx.root().display())));
    assert!(script.contains("export ZDOT_PROFILE=\"base\"\n"));
}
