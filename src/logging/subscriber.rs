//! Tracing subscriber setup: console formatter, log file layer, and initialisation.
use std::fs;
use std::io::Write as _;
use std::sync::Mutex;

use tracing::Level;

use super::utils::{HEADER_TIME_FORMAT, LINE_TIME_FORMAT, log_file_path, now};

/// Event targets the [`Logger`](super::Logger) uses to tag envsetup output.
pub(super) mod target {
    /// Section header.
    pub const HEADING: &str = "envsetup::heading";
    /// Link table row for a link that was made.
    pub const LINKED: &str = "envsetup::link";
    /// Link table row under `--dry-run`.
    pub const PLANNED: &str = "envsetup::link::planned";
    /// Rendered import-time report.
    pub const REPORT: &str = "envsetup::report";
    /// Pointer to the log file itself; console only.
    pub const LOG_FILE: &str = "envsetup::log_file";
}

/// Extracts the `message` field from a [`tracing::Event`].
#[derive(Default)]
struct MessageExtractor {
    message: String,
}

impl tracing::field::Visit for MessageExtractor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn std::fmt::Debug) {
        if field.name() == "message" {
            self.message = format!("{value:?}");
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = value.to_string();
        }
    }
}

fn message_of(event: &tracing::Event<'_>) -> String {
    let mut extractor = MessageExtractor::default();
    event.record(&mut extractor);
    extractor.message
}

/// Tag written in front of a log file line, by event kind.
fn file_tag(level: Level, target: &str) -> &'static str {
    match (level, target) {
        (Level::INFO, target::HEADING) => "==> ",
        (Level::INFO, target::LINKED) => "    [link] ",
        (Level::INFO, target::PLANNED) => "    [planned] ",
        (Level::INFO, target::REPORT) => "    [report] ",
        (Level::ERROR, _) => "    [error] ",
        (Level::WARN, _) => "    [warn] ",
        (Level::DEBUG | Level::TRACE, _) => "    [debug] ",
        _ => "    ",
    }
}

/// Render one event as log file lines; a multi-line message gets one
/// timestamped, tagged line per message line.
fn file_lines(ts: &str, level: Level, target: &str, msg: &str) -> String {
    let tag = file_tag(level, target);
    msg.lines()
        .map(|line| format!("[{ts}] {tag}{line}\n"))
        .collect()
}

/// A [`tracing_subscriber::Layer`] that appends events to the per-command
/// log file with a timestamp and a tag naming the kind of output.
///
/// Receives events at `DEBUG` level and above regardless of the console
/// verbosity setting.
#[derive(Debug)]
pub(super) struct FileLayer {
    file: Mutex<fs::File>,
}

impl FileLayer {
    /// Create the log file for `command`, truncating an earlier run, and
    /// write a run header.
    ///
    /// Returns `None` if no log directory can be determined or the file
    /// cannot be written.
    pub(super) fn new(command: &str) -> Option<Self> {
        let path = log_file_path(command)?;
        fs::create_dir_all(path.parent()?).ok()?;
        let version =
            option_env!("ENVSETUP_VERSION").unwrap_or(concat!("dev-", env!("CARGO_PKG_VERSION")));
        let header = format!(
            "==========================================\n\
             envsetup {version} {command} {}\n\
             ==========================================\n",
            now(HEADER_TIME_FORMAT),
        );
        fs::write(&path, header).ok()?;
        let file = fs::OpenOptions::new().append(true).open(&path).ok()?;
        Some(Self {
            file: Mutex::new(file),
        })
    }
}

impl<S: tracing::Subscriber> tracing_subscriber::Layer<S> for FileLayer {
    fn on_event(
        &self,
        event: &tracing::Event<'_>,
        _ctx: tracing_subscriber::layer::Context<'_, S>,
    ) {
        let metadata = event.metadata();
        if metadata.target() == target::LOG_FILE {
            return;
        }
        let lines = file_lines(
            &now(LINE_TIME_FORMAT),
            *metadata.level(),
            metadata.target(),
            &message_of(event),
        );
        if let Ok(mut f) = self.file.lock() {
            f.write_all(lines.as_bytes()).ok();
        }
    }
}

/// A [`tracing_subscriber::fmt::FormatEvent`] for envsetup's console output.
///
/// Link rows are indented under their heading, dry-run rows are flagged,
/// and an import-time report is printed as-is after a blank line.
struct ConsoleFormatter;

impl<S, N> tracing_subscriber::fmt::FormatEvent<S, N> for ConsoleFormatter
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
        let metadata = event.metadata();
        let msg = message_of(event);

        match (*metadata.level(), metadata.target()) {
            (Level::ERROR, _) => writeln!(writer, "\x1b[31mERROR\x1b[0m {msg}"),
            (Level::WARN, _) => writeln!(writer, "\x1b[33mWARN\x1b[0m  {msg}"),
            (Level::INFO, target::HEADING) => {
                writeln!(writer, "\x1b[1;34m==>\x1b[0m \x1b[1m{msg}\x1b[0m")
            }
            (Level::INFO, target::PLANNED) => writeln!(writer, "  \x1b[33m[DRY RUN]\x1b[0m {msg}"),
            (Level::INFO, target::REPORT) => writeln!(writer, "\n{msg}"),
            (Level::INFO, target::LOG_FILE) => writeln!(writer, "\x1b[2mlog: {msg}\x1b[0m"),
            (Level::INFO, _) => writeln!(writer, "  {msg}"),
            _ => writeln!(writer, "  \x1b[2m{msg}\x1b[0m"),
        }
    }
}

/// Initialise the global [`tracing`] subscriber.
///
/// Sets up a console subscriber for envsetup's output style and a file
/// subscriber that writes all events (including `debug`) to
/// `$XDG_CACHE_HOME/envsetup/<command>.log`.
/// Must be called once at program startup, before any logging.
pub fn init_subscriber(verbose: bool, command: &str) {
    use tracing_subscriber::fmt::writer::MakeWriterExt as _;
    use tracing_subscriber::{
        Layer as _, filter::LevelFilter, fmt, layer::SubscriberExt as _,
        util::SubscriberInitExt as _,
    };

    let console_level = if verbose {
        LevelFilter::DEBUG
    } else {
        LevelFilter::INFO
    };

    let make_writer = std::io::stderr
        .with_max_level(Level::WARN)
        .and(std::io::stdout.with_min_level(Level::INFO));

    let console_layer = fmt::layer()
        .event_format(ConsoleFormatter)
        .with_writer(make_writer)
        .with_filter(console_level);

    let file_layer = FileLayer::new(command).map(|l| l.with_filter(LevelFilter::DEBUG));

    tracing_subscriber::registry()
        .with(console_layer)
        .with(file_layer)
        .init();
}
