use std::{
    io::Write,
    sync::{Mutex, MutexGuard, OnceLock, PoisonError},
};

use core::str::FromStr;

use termcolor::{WriteColor, StandardStream, ColorChoice};

pub use termcolor::{ColorSpec, Color};

use compact_str::CompactString;

use vortex_mem::{GrowVec, HashTable, StackArray};

use crate::*;

use fmt::{LogSpec, SegmentSpec};

/// Handle to a format registered with [`custom_fmt`].
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct CustomFmt(usize);

#[repr(i8)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Debug)]
pub enum Level {
    Always = -1,
    Error = 0,
    Warn = 1,
    Info = 2,
    Debug = 3,
    Trace = 4,
}

const LEVEL_COUNT: usize = 6;

impl Level {

    #[inline(always)]
    fn index(self) -> usize {
        (self as i8 + 1) as usize
    }
}

pub enum LevelFmt {
    Always,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
    Other(CustomFmt, Level),
}

impl FromStr for Level {

    type Err = ();

    fn from_str(s: &str) -> core::result::Result<Self, Self::Err> {
        if s.eq_ignore_ascii_case("error") {
            Ok(Self::Error)
        } else if s.eq_ignore_ascii_case("warn") {
            Ok(Self::Warn)
        } else if s.eq_ignore_ascii_case("info") {
            Ok(Self::Info)
        } else if s.eq_ignore_ascii_case("debug") {
            Ok(Self::Debug)
        } else if s.eq_ignore_ascii_case("trace") {
            Ok(Self::Trace)
        } else {
            Err(())
        }
    }
}

/// Level filters parsed from a `RUST_LOG` style string.
pub struct Filters {
    pub base_level: Level,
    pub target_levels: HashTable<CompactString, Level>,
}

impl Filters {

    /// Parses comma separated `level` or `target=level` directives.
    ///
    /// Directives with an unknown level are skipped. A target named twice
    /// keeps the less verbose level, and the last bare level wins.
    pub fn parse(directives: &str) -> Result<Self> {
        let mut filters = Self {
            base_level: Level::Error,
            target_levels: HashTable::new(),
        };
        for arg in directives.split(',') {
            let (target, level) = match arg.split_once('=') {
                Some((target, level)) => (Some(target.trim()), level.trim()),
                None => (None, arg.trim()),
            };
            let Ok(level) = Level::from_str(level) else {
                continue
            };
            match target {
                Some(target) => {
                    if let Some(entry) = filters.target_levels.get_mut(target) {
                        *entry = (*entry).min(level);
                    } else {
                        filters.target_levels.insert(CompactString::new(target), level)?;
                    }
                },
                None => filters.base_level = level,
            }
        }
        Ok(filters)
    }

    /// Finds the level of `target` or its closest `::` parent.
    pub fn target_level(&self, target: &str) -> Level {
        let mut substr = target;
        if let Some(&level) = self.target_levels.get(substr) {
            return level
        }
        while let Some(i) = substr.rfind("::") {
            substr = &substr[0..i];
            if let Some(&level) = self.target_levels.get(substr) {
                return level
            }
        }
        return self.base_level
    }
}

pub(crate) struct Logger<W> {
    sink: W,
    fmts: StackArray<LogFmt, LEVEL_COUNT>,
    custom_fmts: GrowVec<LogFmt>,
    filters: Filters,
}

impl<W: WriteColor> Logger<W> {

    pub(crate) fn new(sink: W, filters: Filters) -> Result<Self> {
        let fmts = StackArray::from_array([
            LogFmt::level_default(Level::Always)?,
            LogFmt::level_default(Level::Error)?,
            LogFmt::level_default(Level::Warn)?,
            LogFmt::level_default(Level::Info)?,
            LogFmt::level_default(Level::Debug)?,
            LogFmt::level_default(Level::Trace)?,
        ]);
        Ok(Self {
            sink,
            fmts,
            custom_fmts: GrowVec::empty(),
            filters,
        })
    }

    fn level_fmt(&mut self, level: Level) -> &mut LogFmt {
        &mut self.fmts[level.index()]
    }

    fn add_custom_fmt(&mut self, fmt: LogFmt) -> Result<CustomFmt> {
        self.custom_fmts.push(fmt)?;
        Ok(CustomFmt(self.custom_fmts.len() - 1))
    }

    fn log(&mut self, target: &str, level: LevelFmt, msg: core::fmt::Arguments) -> Result<bool> {
        let (level, fmt) = match level {
            LevelFmt::Always => (Level::Always, &self.fmts[Level::Always.index()]),
            LevelFmt::Error => (Level::Error, &self.fmts[Level::Error.index()]),
            LevelFmt::Warn => (Level::Warn, &self.fmts[Level::Warn.index()]),
            LevelFmt::Info => (Level::Info, &self.fmts[Level::Info.index()]),
            LevelFmt::Debug => (Level::Debug, &self.fmts[Level::Debug.index()]),
            LevelFmt::Trace => (Level::Trace, &self.fmts[Level::Trace.index()]),
            LevelFmt::Other(fmt, level) => (level, self.custom_fmts.get(fmt.0)?),
        };
        if self.filters.target_level(target) < level {
            return Ok(false)
        }
        for segment in fmt {
            match segment {
                SegmentSpec::Message(spec) => {
                    write_colored(&mut self.sink, spec, |w| write!(w, "{}", msg))?;
                },
                SegmentSpec::Target(spec) => {
                    write_colored(&mut self.sink, spec, |w| w.write_all(target.as_bytes()))?;
                },
                SegmentSpec::Text(text, spec) => {
                    write_colored(&mut self.sink, spec, |w| w.write_all(text.as_bytes()))?;
                },
            }
        }
        self.sink.write_all(b"\n")?;
        Ok(true)
    }
}

fn write_colored<W: WriteColor>(
    sink: &mut W,
    spec: &LogSpec,
    f: impl FnOnce(&mut W) -> std::io::Result<()>,
) -> std::io::Result<()>
{
    if let Some(color_spec) = &spec.color_spec {
        sink.set_color(color_spec)?;
        f(sink)?;
        sink.reset()
    } else {
        f(sink)
    }
}

static LOGGER: OnceLock<Mutex<Logger<StandardStream>>> = OnceLock::new();

/// Initializes the global logger from `RUST_LOG`. Later calls do nothing.
pub fn init() -> Result<()> {
    if LOGGER.get().is_some() { return Ok(()) }
    let directives = std::env::var("RUST_LOG").unwrap_or_default();
    let logger = Logger::new(
        StandardStream::stderr(ColorChoice::Auto),
        Filters::parse(&directives)?,
    )?;
    let _ = LOGGER.set(Mutex::new(logger));
    Ok(())
}

fn lock() -> Result<MutexGuard<'static, Logger<StandardStream>>> {
    let logger = LOGGER.get().ok_or(LogError::NotInitialized)?;
    Ok(logger.lock().unwrap_or_else(PoisonError::into_inner))
}

/// Rebuilds the format of `level` with `f`.
pub fn level_fmt(
    level: Level,
    f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>,
) -> Result<()>
{
    let mut logger = lock()?;
    let mut builder = LogFmtBuilder::new(logger.level_fmt(level));
    f(&mut builder)
}

#[inline(always)]
pub fn error_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    level_fmt(Level::Error, f)
}

#[inline(always)]
pub fn warn_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    level_fmt(Level::Warn, f)
}

#[inline(always)]
pub fn info_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    level_fmt(Level::Info, f)
}

#[inline(always)]
pub fn debug_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    level_fmt(Level::Debug, f)
}

#[inline(always)]
pub fn trace_fmt(f: impl FnOnce(&mut LogFmtBuilder) -> Result<()>) -> Result<()> {
    level_fmt(Level::Trace, f)
}

#[inline(always)]
pub fn custom_fmt(fmt: LogFmt) -> Result<CustomFmt> {
    lock()?.add_custom_fmt(fmt)
}

/// Writes one record. Returns `Ok(false)` when the record was filtered out
/// or the logger is not initialized.
#[inline(always)]
pub fn log(target: &str, level: LevelFmt, args: core::fmt::Arguments) -> Result<bool> {
    match lock() {
        Ok(mut logger) => logger.log(target, level, args),
        Err(LogError::NotInitialized) => Ok(false),
        Err(err) => Err(err),
    }
}

#[macro_export]
macro_rules! always {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Always, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! error {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Error, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! warn {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Warn, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! info {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Info, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! debug {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Debug, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[macro_export]
macro_rules! trace {
    ($fmt:expr $(, $arg:expr)* $(,)?) => {
        $crate::log(module_path!(), $crate::LevelFmt::Trace, format_args!($fmt, $($arg),*))
            .unwrap_or(false)
    };
}

#[cfg(test)]
mod tests {
    use termcolor::Buffer;

    use super::*;

    fn logger(directives: &str) -> Logger<Buffer> {
        Logger::new(Buffer::no_color(), Filters::parse(directives).unwrap()).unwrap()
    }

    fn output(logger: &Logger<Buffer>) -> &str {
        core::str::from_utf8(logger.sink.as_slice()).unwrap()
    }

    #[test]
    fn parses_base_and_targets() {
        let filters = Filters::parse("info, app::net = trace,bogus=loud,app::net=debug").unwrap();
        assert_eq!(filters.base_level, Level::Info);
        assert_eq!(filters.target_levels.len(), 1);
        assert_eq!(filters.target_level("app::net"), Level::Debug);
        assert_eq!(filters.target_level("app::net::tcp"), Level::Debug);
        assert_eq!(filters.target_level("app"), Level::Info);
    }

    #[test]
    fn empty_directives_default_to_error() {
        let filters = Filters::parse("").unwrap();
        assert_eq!(filters.base_level, Level::Error);
        assert!(filters.target_levels.is_empty());
    }

    #[test]
    fn filters_by_level() {
        let mut logger = logger("warn");
        assert_eq!(logger.log("app", LevelFmt::Info, format_args!("hidden")).unwrap(), false);
        assert_eq!(logger.log("app", LevelFmt::Warn, format_args!("shown {}", 1)).unwrap(), true);
        assert_eq!(logger.log("app", LevelFmt::Always, format_args!("always")).unwrap(), true);
        assert_eq!(output(&logger), "warn [app] shown 1\nlog [app] always\n");
    }

    #[test]
    fn custom_fmt_is_used() {
        let mut logger = logger("trace");
        let mut fmt = LogFmt::default();
        LogFmtBuilder::new(&mut fmt)
            .text(">> ", |spec| spec).unwrap()
            .message(|spec| spec).unwrap();
        let handle = logger.add_custom_fmt(fmt).unwrap();
        assert!(logger.log("app", LevelFmt::Other(handle, Level::Debug), format_args!("hi")).unwrap());
        assert_eq!(output(&logger), ">> hi\n");
    }

    #[test]
    fn unknown_custom_fmt_errors() {
        let mut logger = logger("trace");
        let result = logger.log("app", LevelFmt::Other(CustomFmt(3), Level::Info), format_args!("x"));
        assert!(matches!(result, Err(LogError::VecError(_))));
    }

    #[test]
    fn replaced_level_fmt() {
        let mut logger = logger("info");
        LogFmtBuilder::new(logger.level_fmt(Level::Info))
            .target(|spec| spec).unwrap()
            .text(": ", |spec| spec).unwrap()
            .message(|spec| spec).unwrap();
        logger.log("app::db", LevelFmt::Info, format_args!("ready")).unwrap();
        assert_eq!(output(&logger), "app::db: ready\n");
    }
}
