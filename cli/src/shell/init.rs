//! Assembles the script printed by `zdot init <shell>`.
use std::collections::HashMap;
use std::path::{Path, PathBuf};

use super::Shell;
use super::emit::{Emitter, quote_posix_single};
use super::expand::Expander;
use super::functions::LsFlavor;
use super::resolver::first_existing;
use crate::config::{Config, env};
use crate::exec::Executor;
use crate::platform::Platform;
use crate::prompt::Layout;

/// Name of the precmd function exporting the prompt width variables.
pub const PROMPT_HOOK: &str = "_zdot_prompt_layout";

/// Variable carrying the current [`Layout`] name.
pub const LAYOUT_VAR: &str = "ZDOT_PROMPT_LAYOUT";

/// Width assumed when the shell has not set `$COLUMNS`.
const FALLBACK_COLUMNS: u16 = 80;

/// Machine facts the init script depends on.
pub struct InitContext<'a> {
    /// Current platform.
    pub platform: &'a Platform,
    /// Executor for `$(…)` expansion and PATH lookups.
    pub executor: &'a dyn Executor,
    /// Home directory for `~`.
    pub home: Option<&'a Path>,
    /// Environment lookup.
    pub lookup: &'a dyn Fn(&str) -> Option<String>,
}

impl std::fmt::Debug for InitContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InitContext")
            .field("platform", &self.platform)
            .field("executor", &self.executor)
            .field("home", &self.home)
            .finish_non_exhaustive()
    }
}

/// Render the init script for `shell`.
#[must_use]
pub fn render(config: &Config, shell: Shell, ctx: &InitContext<'_>) -> String {
    let emitter = Emitter::new(shell);
    let mut out = String::new();

    emitter.header(
        &mut out,
        &format!(
            "zdot {} init for {shell} (profile: {})",
            crate::version(),
            config.profile.name
        ),
    );
    emitter.export(&mut out, "ZDOT_ROOT", &config.root.to_string_lossy());
    emitter.export(&mut out, "ZDOT_PROFILE", &config.profile.name);

    let overlay = emit_env(&emitter, &mut out, config, ctx);
    emit_plugins(&emitter, &mut out, config, shell, ctx, &overlay);

    emitter.blank(&mut out);
    emitter.comment(&mut out, "helpers");
    let flavor = LsFlavor::detect(ctx.platform, ctx.executor);
    emitter.function(&mut out, "ls", &flavor.wrapper_body());

    emit_prompt(&emitter, &mut out, config, shell);
    out
}

/// Export the selected env entries and return their values as seen by later
/// expansions.
fn emit_env(
    emitter: &Emitter,
    out: &mut String,
    config: &Config,
    ctx: &InitContext<'_>,
) -> HashMap<String, String> {
    let selected = env::select(&config.env, ctx.lookup);
    let mut overlay: HashMap<String, String> = HashMap::new();
    if selected.is_empty() {
        return overlay;
    }

    emitter.blank(out);
    emitter.comment(out, "environment");
    for var in selected {
        emitter.export(out, &var.name, &var.value);
        if var.value.contains("$(") {
            continue;
        }
        let lookup = |name: &str| overlay.get(name).cloned().or_else(|| (ctx.lookup)(name));
        let expanded = Expander::new(ctx.home, &lookup, ctx.executor).expand(&var.value);
        if let Ok(value) = expanded {
            overlay.insert(var.name.clone(), value.to_string_lossy().into_owned());
        }
    }
    overlay
}

fn emit_plugins(
    emitter: &Emitter,
    out: &mut String,
    config: &Config,
    shell: Shell,
    ctx: &InitContext<'_>,
    overlay: &HashMap<String, String>,
) {
    let lookup = |name: &str| overlay.get(name).cloned().or_else(|| (ctx.lookup)(name));
    let expander = Expander::new(ctx.home, &lookup, ctx.executor);

    let mut activated_names: Vec<&str> = Vec::new();
    let mut activated_paths: Vec<PathBuf> = Vec::new();
    let mut lines = String::new();

    for plugin in config.plugins.iter().filter(|p| p.supports(shell.name())) {
        if activated_names.contains(&plugin.name.as_str()) {
            tracing::debug!("plugin {} already activated", plugin.name);
            continue;
        }
        match first_existing(&plugin.candidates, |c| expander.expand(c)) {
            Some(path) if activated_paths.contains(&path) => {
                tracing::debug!("plugin {} resolves to an already sourced file", plugin.name);
            }
            Some(path) => {
                tracing::debug!("plugin {} -> {}", plugin.name, path.display());
                emitter.source(&mut lines, &path.to_string_lossy());
                activated_names.push(&plugin.name);
                activated_paths.push(path);
            }
            None => tracing::debug!("plugin {} not installed", plugin.name),
        }
    }

    if !lines.is_empty() {
        emitter.blank(out);
        emitter.comment(out, "plugins");
        out.push_str(&lines);
    }
}

fn emit_prompt(emitter: &Emitter, out: &mut String, config: &Config, shell: Shell) {
    emitter.blank(out);
    emitter.comment(out, "prompt");
    emitter.function(out, PROMPT_HOOK, &layout_hook_body(&config.prompt.columns_var));
    emitter.precmd_hook(out, PROMPT_HOOK);
    out.push_str(PROMPT_HOOK);
    out.push('\n');

    if let Some(theme) = &config.prompt.theme {
        let path = config.symlinks_dir().join(theme);
        emitter.init_eval_if_exists(
            out,
            "oh-my-posh",
            &[
                "init".to_string(),
                shell.name().to_string(),
                "--config".to_string(),
                path.to_string_lossy().into_owned(),
            ],
        );
    }
}

/// Shell statements mapping `$COLUMNS` onto the [`Layout`] tiers.
fn layout_hook_body(columns_var: &str) -> Vec<String> {
    let columns = format!("${{COLUMNS:-{FALLBACK_COLUMNS}}}");
    let mut body = vec![format!("export {columns_var}=\"{columns}\"")];
    let mut first = true;
    for (min, layout) in Layout::TIERS {
        let assign = format!("  export {LAYOUT_VAR}={}", quote_posix_single(layout.name()));
        if min == 0 {
            body.push("else".to_string());
        } else {
            let keyword = if first { "if" } else { "elif" };
            body.push(format!("{keyword} [ \"{columns}\" -ge {min} ]; then"));
            first = false;
        }
        body.push(assign);
    }
    body.push("fi".to_string());
    body
}
