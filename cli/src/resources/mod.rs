//! Idempotent resource primitives (check + apply pattern).
pub mod chmod;
pub mod dock;
pub mod helpers;
pub mod symlink;

use anyhow::Result;

/// Minimal interface for resources that can be described, applied, and removed.
pub trait Applicable {
    /// Human-readable description of this resource.
    fn description(&self) -> String;

    /// Apply the resource change.
    ///
    /// # Errors
    ///
    /// Returns an error if the resource cannot be applied due to I/O failures,
    /// permission issues, or a failing external tool.
    fn apply(&self) -> Result<ResourceChange>;

    /// Remove the resource, undoing a previous `apply()`.
    ///
    /// # Errors
    ///
    /// Returns an error if removal fails or is not supported for this
    /// resource type.
    fn remove(&self) -> Result<ResourceChange> {
        anyhow::bail!(
            "operation 'remove' is not supported for resource '{}'",
            self.description()
        )
    }
}

/// State of a resource.
///
/// # Examples
///
/// ```
/// use zdot::resources::ResourceState;
///
/// let wrong = ResourceState::Incorrect { current: "/other/path".into() };
/// assert_ne!(wrong, ResourceState::Correct);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceState {
    /// Resource does not exist or is not present.
    Missing,
    /// Resource exists and matches the desired state.
    Correct,
    /// Resource exists but does not match the desired state.
    Incorrect {
        /// The current value of the resource.
        current: String,
    },
    /// Resource cannot be applied (e.g., target is a real directory).
    Invalid {
        /// Reason why the resource cannot be applied.
        reason: String,
    },
}

/// Result of applying a resource change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceChange {
    /// Resource was created or updated.
    Applied,
    /// Resource was already correct (no change needed).
    AlreadyCorrect,
    /// Resource was skipped.
    Skipped {
        /// Reason why the resource was skipped.
        reason: String,
    },
}

/// Resources that can determine their own state before applying.
pub trait Resource: Applicable {
    /// Check the current state of the resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the state cannot be determined.
    fn current_state(&self) -> Result<ResourceState>;

    /// Determine if the resource needs to be changed.
    ///
    /// # Errors
    ///
    /// Propagates errors from [`current_state`](Self::current_state).
    fn needs_change(&self) -> Result<bool> {
        Ok(matches!(
            self.current_state()?,
            ResourceState::Missing | ResourceState::Incorrect { .. }
        ))
    }
}

/// Shared test helpers for resource unit tests.
#[cfg(test)]
pub mod test_helpers {
    use crate::exec::{ExecResult, Executor};
    use std::collections::VecDeque;
    use std::sync::{
        Arc, Mutex,
        atomic::{AtomicUsize, Ordering},
    };

    /// A configurable mock executor.
    ///
    /// Maintains a queue of `(success, stdout)` responses consumed in FIFO
    /// order. When the queue is empty any call fails with
    /// `"unexpected call"`.
    #[derive(Debug)]
    pub struct MockExecutor {
        responses: Mutex<VecDeque<(bool, String)>>,
        which_all: bool,
        which_programs: Vec<String>,
        call_count: Arc<AtomicUsize>,
    }

    impl MockExecutor {
        /// Create a mock with a single successful response.
        #[must_use]
        pub fn ok(stdout: &str) -> Self {
            Self::with_responses(vec![(true, stdout.to_string())])
        }

        /// Create a mock with a single failed response (empty stdout).
        #[must_use]
        pub fn fail() -> Self {
            Self::with_responses(vec![(false, String::new())])
        }

        /// Create a mock from an ordered list of `(success, stdout)` pairs.
        #[must_use]
        pub fn with_responses(responses: Vec<(bool, String)>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                which_all: false,
                which_programs: Vec::new(),
                call_count: Arc::new(AtomicUsize::new(0)),
            }
        }

        /// Set the value returned by every [`Executor::which`] call.
        #[must_use]
        pub const fn with_which(mut self, result: bool) -> Self {
            self.which_all = result;
            self
        }

        /// Report only `programs` as present on PATH.
        #[must_use]
        pub fn with_programs(mut self, programs: &[&str]) -> Self {
            self.which_programs = programs.iter().map(ToString::to_string).collect();
            self
        }

        /// Return the total number of executor calls made so far.
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.call_count.load(Ordering::SeqCst)
        }

        fn next(&self) -> (bool, String) {
            self.call_count.fetch_add(1, Ordering::SeqCst);
            self.responses.lock().map_or_else(
                |_| (false, "mutex poisoned".to_string()),
                |mut guard| {
                    guard
                        .pop_front()
                        .unwrap_or_else(|| (false, "unexpected call".to_string()))
                },
            )
        }
    }

    impl Executor for MockExecutor {
        fn run(&self, _: &str, _: &[&str]) -> anyhow::Result<ExecResult> {
            let (success, stdout) = self.next();
            if success {
                Ok(ExecResult {
                    stdout,
                    stderr: String::new(),
                    success: true,
                    code: Some(0),
                })
            } else {
                anyhow::bail!("mock command failed")
            }
        }

        fn run_unchecked(&self, _: &str, _: &[&str]) -> anyhow::Result<ExecResult> {
            let (success, stdout) = self.next();
            Ok(ExecResult {
                stdout,
                stderr: String::new(),
                success,
                code: Some(i32::from(!success)),
            })
        }

        fn run_interactive(&self, program: &str, args: &[&str]) -> anyhow::Result<()> {
            self.run(program, args).map(|_| ())
        }

        fn which(&self, program: &str) -> bool {
            self.which_all || self.which_programs.iter().any(|p| p == program)
        }
    }

    /// An executor that records every command line and answers by prefix.
    ///
    /// Commands without a scripted response succeed with empty stdout.
    #[derive(Debug, Default)]
    pub struct RecordingExecutor {
        calls: Mutex<Vec<String>>,
        responses: Vec<(String, bool, String)>,
        programs: Vec<String>,
    }

    impl RecordingExecutor {
        /// Empty recorder; `which` reports nothing installed.
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        /// Report `programs` as present on PATH.
        #[must_use]
        pub fn with_programs(mut self, programs: &[&str]) -> Self {
            self.programs = programs.iter().map(ToString::to_string).collect();
            self
        }

        /// Answer command lines starting with `prefix`.
        #[must_use]
        pub fn respond(mut self, prefix: &str, success: bool, stdout: &str) -> Self {
            self.responses
                .push((prefix.to_string(), success, stdout.to_string()));
            self
        }

        /// Every command line run so far, in order.
        #[must_use]
        pub fn calls(&self) -> Vec<String> {
            self.calls.lock().map_or_else(|_| vec![], |g| g.clone())
        }

        fn record(&self, program: &str, args: &[&str]) -> ExecResult {
            let line = std::iter::once(program)
                .chain(args.iter().copied())
                .collect::<Vec<_>>()
                .join(" ");
            let (success, stdout) = self
                .responses
                .iter()
                .find(|(prefix, _, _)| line.starts_with(prefix.as_str()))
                .map_or((true, String::new()), |(_, ok, out)| (*ok, out.clone()));
            if let Ok(mut calls) = self.calls.lock() {
                calls.push(line);
            }
            ExecResult {
                stdout,
                stderr: String::new(),
                success,
                code: Some(i32::from(!success)),
            }
        }
    }

    impl Executor for RecordingExecutor {
        fn run(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            let result = self.record(program, args);
            if !result.success {
                anyhow::bail!("{program} failed");
            }
            Ok(result)
        }

        fn run_unchecked(&self, program: &str, args: &[&str]) -> anyhow::Result<ExecResult> {
            Ok(self.record(program, args))
        }

        fn run_interactive(&self, program: &str, args: &[&str]) -> anyhow::Result<()> {
            self.run(program, args).map(|_| ())
        }

        fn which(&self, program: &str) -> bool {
            self.programs.iter().any(|p| p == program)
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;

    struct TestResource {
        state: ResourceState,
    }

    impl Applicable for TestResource {
        fn description(&self) -> String {
            "test resource".to_string()
        }

        fn apply(&self) -> Result<ResourceChange> {
            Ok(ResourceChange::Applied)
        }
    }

    impl Resource for TestResource {
        fn current_state(&self) -> Result<ResourceState> {
            Ok(self.state.clone())
        }
    }

    #[test]
    fn needs_change_for_missing_or_incorrect() {
        for state in [
            ResourceState::Missing,
            ResourceState::Incorrect {
                current: "wrong".to_string(),
            },
        ] {
            assert!(TestResource { state }.needs_change().unwrap());
        }
    }

    #[test]
    fn no_change_for_correct_or_invalid() {
        for state in [
            ResourceState::Correct,
            ResourceState::Invalid {
                reason: "directory exists".to_string(),
            },
        ] {
            assert!(!TestResource { state }.needs_change().unwrap());
        }
    }

    #[test]
    fn default_remove_returns_error() {
        let resource = TestResource {
            state: ResourceState::Correct,
        };
        let err = resource.remove().unwrap_err();
        assert!(err.to_string().contains("not supported"));
        assert!(err.to_string().contains("test resource"));
    }
}
