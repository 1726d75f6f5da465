//! macOS dock layout resource driven by `dockutil` and `defaults`.
use anyhow::Result;

use super::{Applicable, Resource, ResourceChange, ResourceState};
use crate::config::dock::DockConfig;
use crate::error::ResourceError;
use crate::exec::Executor;

/// Dock preferences domain.
pub const DOCK_DOMAIN: &str = "com.apple.dock";

/// The whole dock layout as a single resource.
///
/// Applying always rebuilds the dock from scratch so the final order matches
/// the configuration exactly.
#[derive(Debug)]
pub struct DockResource<'a> {
    config: &'a DockConfig,
    executor: &'a dyn Executor,
}

impl<'a> DockResource<'a> {
    /// Create a dock resource for `config`.
    #[must_use]
    pub const fn new(config: &'a DockConfig, executor: &'a dyn Executor) -> Self {
        Self { config, executor }
    }

    /// The exact command sequence [`apply`](Applicable::apply) runs.
    #[must_use]
    pub fn plan(&self) -> Vec<Vec<String>> {
        let mut commands = vec![owned(&["dockutil", "--remove", "all", "--no-restart"])];
        for app in &self.config.apps {
            commands.push(owned(&["dockutil", "--add", app.as_str(), "--no-restart"]));
        }
        for pref in &self.config.preferences {
            let value = if pref.value { "true" } else { "false" };
            commands.push(owned(&[
                "defaults", "write", DOCK_DOMAIN, pref.key.as_str(), "-bool", value,
            ]));
        }
        commands.push(owned(&["killall", "Dock"]));
        commands
    }

    /// Persistent app paths currently in the dock, left to right.
    fn current_apps(&self) -> Result<Option<Vec<String>>> {
        let result = self.executor.run_unchecked("dockutil", &["--list"])?;
        if !result.success {
            return Ok(None);
        }
        Ok(Some(parse_dockutil_list(&result.stdout)))
    }

    /// Preference keys whose current value differs from the desired one.
    fn drifted_preferences(&self) -> Result<Vec<String>> {
        let mut drifted = Vec::new();
        for pref in &self.config.preferences {
            let result = self
                .executor
                .run_unchecked("defaults", &["read", DOCK_DOMAIN, &pref.key])?;
            let current = result.success.then(|| parse_defaults_bool(&result.stdout));
            if current.flatten() != Some(pref.value) {
                drifted.push(pref.key.clone());
            }
        }
        Ok(drifted)
    }
}

impl Applicable for DockResource<'_> {
    fn description(&self) -> String {
        format!(
            "dock: {} apps, {} preferences",
            self.config.apps.len(),
            self.config.preferences.len()
        )
    }

    fn apply(&self) -> Result<ResourceChange> {
        for command in self.plan() {
            let Some((program, args)) = command.split_first() else {
                continue;
            };
            let args: Vec<&str> = args.iter().map(String::as_str).collect();
            // killall exits non-zero when Dock is not running, which is harmless.
            if program == "killall" {
                self.executor.run_unchecked(program, &args)?;
                continue;
            }
            self.executor
                .run(program, &args)
                .map_err(|e| ResourceError::ToolFailed {
                    tool: program.clone(),
                    message: format!("{} ({e})", command.join(" ")),
                })?;
        }
        Ok(ResourceChange::Applied)
    }
}

impl Resource for DockResource<'_> {
    fn current_state(&self) -> Result<ResourceState> {
        let Some(apps) = self.current_apps()? else {
            return Ok(ResourceState::Missing);
        };
        let desired: Vec<String> = self
            .config
            .apps
            .iter()
            .map(|a| normalize_app_path(a))
            .collect();
        let drifted = self.drifted_preferences()?;

        if apps == desired && drifted.is_empty() {
            return Ok(ResourceState::Correct);
        }

        let mut current = Vec::new();
        if apps != desired {
            current.push(format!("apps [{}]", apps.join(", ")));
        }
        if !drifted.is_empty() {
            current.push(format!("preferences differ: {}", drifted.join(", ")));
        }
        Ok(ResourceState::Incorrect {
            current: current.join("; "),
        })
    }
}

fn owned(words: &[&str]) -> Vec<String> {
    words.iter().map(ToString::to_string).collect()
}

/// Parse `dockutil --list` output into persistent app paths.
///
/// Each line is tab-separated: label, `file://` URL, section, plist path.
fn parse_dockutil_list(stdout: &str) -> Vec<String> {
    stdout
        .lines()
        .filter_map(|line| {
            let mut fields = line.split('\t');
            let _label = fields.next()?;
            let url = fields.next()?;
            let section = fields.next()?;
            (section == "persistentApps").then(|| {
                let path = url.strip_prefix("file://").unwrap_or(url);
                normalize_app_path(&percent_decode(path))
            })
        })
        .collect()
}

/// Parse `defaults read` output for a boolean key.
fn parse_defaults_bool(stdout: &str) -> Option<bool> {
    match stdout.trim() {
        "1" | "true" | "YES" => Some(true),
        "0" | "false" | "NO" => Some(false),
        _ => None,
    }
}

fn normalize_app_path(path: &str) -> String {
    path.trim_end_matches('/').to_string()
}

/// Decode `%XX` escapes in a file URL path.
fn percent_decode(s: &str) -> String {
    let bytes = s.as_bytes();
    let mut out = Vec::with_capacity(bytes.len());
    let mut i = 0;
    while let Some(&b) = bytes.get(i) {
        if b == b'%'
            && let Some(hex) = s.get(i + 1..i + 3)
            && let Ok(decoded) = u8::from_str_radix(hex, 16)
        {
            out.push(decoded);
            i += 3;
            continue;
        }
        out.push(b);
        i += 1;
    }
    String::from_utf8_lossy(&out).into_owned()
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use crate::config::dock::DockPreference;
    use crate::resources::test_helpers::RecordingExecutor;

    fn layout() -> DockConfig {
        DockConfig {
            apps: vec![
                "/Applications/Safari.app".to_string(),
                "/Applications/Visual Studio Code.app".to_string(),
            ],
            preferences: vec![DockPreference {
                key: "show-recents".to_string(),
                value: false,
            }],
        }
    }

    const LIST: &str = "Safari\tfile:///Applications/Safari.app/\tpersistentApps\t/Users/u/Library/Preferences/com.apple.dock.plist\n\
Visual Studio Code\tfile:///Applications/Visual%20Studio%20Code.app/\tpersistentApps\t/Users/u/Library/Preferences/com.apple.dock.plist\n\
Downloads\tfile:///Users/u/Downloads/\tpersistentOthers\t/Users/u/Library/Preferences/com.apple.dock.plist\n";

    #[test]
    fn apply_runs_commands_in_exact_order() {
        let config = layout();
        let executor = RecordingExecutor::new();
        let resource = DockResource::new(&config, &executor);
        assert_eq!(resource.apply().unwrap(), ResourceChange::Applied);
        assert_eq!(
            executor.calls(),
            [
                "dockutil --remove all --no-restart",
                "dockutil --add /Applications/Safari.app --no-restart",
                "dockutil --add /Applications/Visual Studio Code.app --no-restart",
                "defaults write com.apple.dock show-recents -bool false",
                "killall Dock",
            ]
        );
    }

    #[test]
    fn apply_twice_produces_same_sequence() {
        let config = layout();
        let executor = RecordingExecutor::new();
        let resource = DockResource::new(&config, &executor);
        resource.apply().unwrap();
        let first = executor.calls();
        resource.apply().unwrap();
        let all = executor.calls();
        assert_eq!(&all[first.len()..], first.as_slice());
    }

    #[test]
    fn failing_dockutil_is_tool_failure() {
        let config = layout();
        let executor = RecordingExecutor::new().respond("dockutil --add", false, "");
        let err = DockResource::new(&config, &executor).apply().unwrap_err();
        let typed = err.downcast_ref::<ResourceError>().expect("resource error");
        assert!(matches!(typed, ResourceError::ToolFailed { tool, .. } if tool == "dockutil"));
        assert_eq!(executor.calls().len(), 2, "stops at the first failure");
    }

    #[test]
    fn killall_failure_is_ignored() {
        let config = DockConfig::default();
        let executor = RecordingExecutor::new().respond("killall", false, "");
        assert!(DockResource::new(&config, &executor).apply().is_ok());
    }

    #[test]
    fn correct_when_layout_and_preferences_match() {
        let config = layout();
        let executor = RecordingExecutor::new()
            .respond("dockutil --list", true, LIST)
            .respond("defaults read", true, "0\n");
        let state = DockResource::new(&config, &executor).current_state().unwrap();
        assert_eq!(state, ResourceState::Correct);
    }

    #[test]
    fn incorrect_when_order_differs() {
        let mut config = layout();
        config.apps.reverse();
        let executor = RecordingExecutor::new()
            .respond("dockutil --list", true, LIST)
            .respond("defaults read", true, "0\n");
        let state = DockResource::new(&config, &executor).current_state().unwrap();
        assert!(matches!(state, ResourceState::Incorrect { current } if current.starts_with("apps [")));
    }

    #[test]
    fn incorrect_when_preference_unset() {
        let config = layout();
        let executor = RecordingExecutor::new()
            .respond("dockutil --list", true, LIST)
            .respond("defaults read", false, "");
        let state = DockResource::new(&config, &executor).current_state().unwrap();
        assert!(
            matches!(state, ResourceState::Incorrect { current } if current.contains("show-recents"))
        );
    }

    #[test]
    fn missing_when_dockutil_list_fails() {
        let config = layout();
        let executor = RecordingExecutor::new().respond("dockutil --list", false, "");
        let state = DockResource::new(&config, &executor).current_state().unwrap();
        assert_eq!(state, ResourceState::Missing);
    }

    #[test]
    fn parse_list_decodes_and_filters() {
        assert_eq!(
            parse_dockutil_list(LIST),
            [
                "/Applications/Safari.app",
                "/Applications/Visual Studio Code.app"
            ]
        );
    }

    #[test]
    fn percent_decode_leaves_invalid_escapes() {
        assert_eq!(percent_decode("a%20b%zz%"), "a b%zz%");
    }
}
