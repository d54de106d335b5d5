use anyhow::{Context, Result};
use chrono::Local;
use std::{
    fs::File,
    io::{self, IsTerminal, Write},
    path::Path,
    sync::OnceLock,
};
use tracing::{Event, Level, Subscriber};
use tracing_subscriber::{
    EnvFilter, Registry,
    fmt::{
        self, FmtContext, MakeWriter,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    reload,
    util::SubscriberInitExt,
};

/// Filter used when neither `RUST_LOG` nor the configuration says otherwise.
/// Kept quiet so quotes on stdout are not drowned out.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

static LEVEL_HANDLE: OnceLock<reload::Handle<EnvFilter, Registry>> = OnceLock::new();
static LOG_FILE: OnceLock<File> = OnceLock::new();

// --- Formatter ---

/// `LEVEL target: fields`, prefixed with a local timestamp for the log file.
struct LineFormat {
    timestamps: bool,
}

fn level_color(level: &Level) -> &'static str {
    match *level {
        Level::ERROR => "1;31",
        Level::WARN => "1;33",
        Level::INFO => "32",
        Level::DEBUG => "34",
        Level::TRACE => "35",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();

        if self.timestamps {
            write!(writer, "{} ", Local::now().format("%Y-%m-%d %H:%M:%S%.3f"))?;
        }
        if writer.has_ansi_escapes() {
            write!(writer, "\x1b[{}m{:>5}\x1b[0m ", level_color(meta.level()), meta.level())?;
        } else {
            write!(writer, "{:>5} ", meta.level())?;
        }
        write!(writer, "{}: ", meta.target())?;

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

// --- Log file ---

/// Writes to [`LOG_FILE`] once the configuration has opened it; until then
/// events are discarded.
struct LateFile;

struct LateFileWriter(Option<&'static File>);

impl Write for LateFileWriter {
    fn write(
        &mut self,
        buf: &[u8],
    ) -> io::Result<usize> {
        match self.0 {
            Some(mut file) => file.write(buf),
            None => Ok(buf.len()),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self.0 {
            Some(mut file) => file.flush(),
            None => Ok(()),
        }
    }
}

impl<'a> MakeWriter<'a> for LateFile {
    type Writer = LateFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LateFileWriter(LOG_FILE.get())
    }
}

// --- Public API ---

/// Replaces the active log filter.
/// Accepts a bare level ("warn", "debug", ...) or any EnvFilter directive.
pub fn set_log_level(directive: &str) -> Result<()> {
    let handle = LEVEL_HANDLE.get().context("logging not yet initialized")?;
    let filter = EnvFilter::try_new(directive)
        .with_context(|| format!("invalid log level '{directive}'"))?;
    handle.reload(filter).context("filter reload failed")
}

/// Starts appending log output to `path`. Only one log file can be opened
/// per run; the directory must already exist.
pub fn enable_file_logging(path: &Path) -> Result<()> {
    let file = File::options()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("cannot open log file '{}'", path.display()))?;

    LOG_FILE
        .set(file)
        .map_err(|_| anyhow::anyhow!("log file already open"))
}

/// Initializes logging. Call once at startup.
///
/// Events go to stderr, colored when it is a terminal, and to the log file
/// once [`enable_file_logging`] has opened one. The level starts at
/// `RUST_LOG` or [`DEFAULT_LOG_LEVEL`] and can be replaced with
/// [`set_log_level`].
pub fn init_logging() {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_LEVEL));
    let (level_filter, handle) = reload::Layer::new(filter);

    let stderr_layer = fmt::layer()
        .event_format(LineFormat { timestamps: false })
        .with_ansi(io::stderr().is_terminal())
        .with_writer(io::stderr);

    let file_layer = fmt::layer()
        .event_format(LineFormat { timestamps: true })
        .with_ansi(false)
        .with_writer(LateFile);

    if tracing_subscriber::registry()
        .with(level_filter)
        .with(stderr_layer)
        .with(file_layer)
        .try_init()
        .is_ok()
    {
        let _ = LEVEL_HANDLE.set(handle);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn enable_file_logging_reports_unopenable_path() {
        let err = enable_file_logging(Path::new("/nonexistent-dir/installment.log")).unwrap_err();

        assert!(err.to_string().contains("cannot open log file"));
    }

    #[test]
    fn level_colors_are_distinct() {
        let levels = [Level::ERROR, Level::WARN, Level::INFO, Level::DEBUG, Level::TRACE];
        let mut colors: Vec<_> = levels.iter().map(level_color).collect();
        colors.sort_unstable();
        colors.dedup();

        assert_eq!(colors.len(), levels.len());
    }
}
