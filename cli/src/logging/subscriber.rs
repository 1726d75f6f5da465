//! Tracing subscriber: zdot console format plus the log file layer.
use std::fmt::Write as _;
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;
use tracing::field::{Field, Visit};
use tracing_subscriber::filter::LevelFilter;

use super::types::{DRY_RUN_TARGET, STAGE_TARGET, Surface};
use super::utils::{log_file_path, strip_ansi, utc_now};

/// `hooks.log` is started over once it grows past this many bytes.
const HOOK_LOG_LIMIT: u64 = 256 * 1024;

/// The kinds of line zdot prints, told apart by level and target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Kind {
    Stage,
    DryRun,
    Error,
    Warn,
    Info,
    Debug,
}

impl Kind {
    fn of(event: &tracing::Event<'_>) -> Self {
        let meta = event.metadata();
        match (*meta.level(), meta.target()) {
            (Level::ERROR, _) => Self::Error,
            (Level::WARN, _) => Self::Warn,
            (Level::INFO, STAGE_TARGET) => Self::Stage,
            (Level::INFO, DRY_RUN_TARGET) => Self::DryRun,
            (Level::INFO, _) => Self::Info,
            _ => Self::Debug,
        }
    }

    fn console(self, msg: &str) -> String {
        match self {
            Self::Stage => format!("\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m"),
            Self::DryRun => format!("  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            Self::Error => format!("\x1b[31mERROR\x1b[0m {msg}"),
            Self::Warn => format!("\x1b[33mWARN\x1b[0m  {msg}"),
            Self::Info => format!("  {msg}"),
            Self::Debug => format!("  \x1b[2m{msg}\x1b[0m"),
        }
    }

    const fn file_prefix(self) -> &'static str {
        match self {
            Self::Stage => "==> ",
            Self::DryRun => "    [dry run] ",
            Self::Error => "    [error] ",
            Self::Warn => "    [warn] ",
            Self::Info => "    ",
            Self::Debug => "    [debug] ",
        }
    }
}

/// The `message` field of an event.
#[derive(Default)]
struct Message(String);

impl Visit for Message {
    fn record_str(&mut self, field: &Field, value: &str) {
        if field.name() == "message" {
            value.clone_into(&mut self.0);
        }
    }

    fn record_debug(&mut self, field: &Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.0.clear();
            let _ = write!(self.0, "{value:?}");
        }
    }
}

fn message(event: &tracing::Event<'_>) -> String {
    let mut visitor = Message::default();
    event.record(&mut visitor);
    visitor.0
}

/// Appends every event to the log file, uncolored and timestamped.
///
/// Hook lines carry `<command>[<pid>]` since several shells may write at
/// once.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
    tag: String,
}

impl FileLayer {
    /// Open the log file for `command`. `None` when the cache directory is
    /// unusable; logging then stays console-only.
    pub(super) fn new(surface: Surface, command: &str) -> Option<Self> {
        let path = log_file_path(surface, command)?;
        let tag = match surface {
            Surface::Terminal => {
                let rule = "=".repeat(42);
                let header = format!(
                    "{rule}\nzdot {} {}\n{rule}\n",
                    crate::version(),
                    utc_now("%Y-%m-%d %H:%M:%S")
                );
                fs::write(&path, header).ok()?;
                String::new()
            }
            Surface::Hook => {
                if fs::metadata(&path).is_ok_and(|m| m.len() > HOOK_LOG_LIMIT) {
                    fs::remove_file(&path).ok()?;
                }
                format!("{command}[{}] ", std::process::id())
            }
        };
        let file = fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .ok()?;
        Some(Self {
            file: Mutex::new(file),
            tag,
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(&self, event: &tracing::Event<'_>, _ctx: tracing_subscriber::layer::Context<'_, S>) {
        let kind = Kind::of(event);
        let line = format!(
            "[{}] {}{}{}",
            utc_now("%H:%M:%S"),
            self.tag,
            kind.file_prefix(),
            strip_ansi(&message(event))
        );
        if let Ok(mut file) = self.file.lock() {
            writeln!(file, "{line}").ok();
        }
    }
}

/// Console format: one colored line per event, no level or target columns.
struct ZdotFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ZdotFormatter
where
    S: tracing::Subscriber + for<'a> tracing_subscriber::registry::LookupSpan<'a>,
    N: for<'a> tracing_subscriber::fmt::FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        _ctx: &tracing_subscriber::fmt::FmtContext<'_, S, N>,
        mut writer: tracing_subscriber::fmt::format::Writer<'_>,
        event: &tracing::Event<'_>,
    ) -> std::fmt::Result {
        writeln!(writer, "{}", Kind::of(event).console(&message(event)))
    }
}

const fn console_level(surface: Surface, verbose: bool) -> LevelFilter {
    match (surface, verbose) {
        (_, true) => LevelFilter::DEBUG,
        (Surface::Terminal, false) => LevelFilter::INFO,
        (Surface::Hook, false) => LevelFilter::WARN,
    }
}

/// Install the global subscriber. Call once, first thing in `main`.
pub fn init_subscriber(verbose: bool, command: &str, surface: Surface) {
    use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt as _};
    use tracing_subscriber::{Layer as _, fmt, layer::SubscriberExt as _, util::SubscriberInitExt as _};

    let writer = match surface {
        Surface::Terminal => BoxMakeWriter::new(
            std::io::stderr
                .with_max_level(Level::WARN)
                .and(std::io::stdout.with_min_level(Level::INFO)),
        ),
        Surface::Hook => BoxMakeWriter::new(std::io::stderr),
    };
    let console = fmt::layer()
        .event_format(ZdotFormatter)
        .with_writer(writer)
        .with_filter(console_level(surface, verbose));
    let file = FileLayer::new(surface, command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry().with(console).with(file).init();
}
