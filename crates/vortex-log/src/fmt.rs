//! Per-level output formats.
//!
//! A [`LogFmt`] is a list of segments written in order, each optionally
//! colored. [`LogFmtBuilder`] replaces the segments of an existing format.

use compact_str::CompactString;

use vortex_mem::GrowVec;

use crate::{Color, ColorSpec, Level, Result};

#[derive(Default)]
pub struct LogFmt {
    segments: GrowVec<SegmentSpec>,
}

impl LogFmt {

    /// The format used for `level` until it is replaced, e.g.
    /// `warn [my_crate::module] message`.
    pub fn level_default(level: Level) -> Result<Self> {
        let (name, color) = match level {
            Level::Always => ("log", None),
            Level::Error => ("error", Some(Color::Red)),
            Level::Warn => ("warn", Some(Color::Yellow)),
            Level::Info => ("info", Some(Color::Green)),
            Level::Debug => ("debug", Some(Color::Blue)),
            Level::Trace => ("trace", Some(Color::Magenta)),
        };
        let mut fmt = Self::default();
        LogFmtBuilder::new(&mut fmt)
            .text(name, |spec| match color {
                Some(color) => spec.with_color_spec(|c| { c.set_fg(Some(color)).set_bold(true); }),
                None => spec.with_color_spec(|c| { c.set_bold(true); }),
            })?
            .text(" [", |spec| spec)?
            .target(|spec| spec.with_color_spec(|c| { c.set_dimmed(true); }))?
            .text("] ", |spec| spec)?
            .message(|spec| spec)?;
        Ok(fmt)
    }

    #[inline(always)]
    pub fn len(&self) -> usize {
        self.segments.len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    fn clear(&mut self) {
        self.segments.clear();
    }
}

impl<'a> IntoIterator for &'a LogFmt {

    type Item = &'a SegmentSpec;
    type IntoIter = vortex_mem::Iter<'a, SegmentSpec>;

    fn into_iter(self) -> Self::IntoIter {
        self.segments.iter()
    }
}

#[derive(Default, Clone)]
pub struct LogSpec {
    pub color_spec: Option<ColorSpec>,
}

impl LogSpec {

    #[inline(always)]
    pub fn with_color_spec(mut self, f: impl FnOnce(&mut ColorSpec)) -> Self {
        let color_spec = self.color_spec.insert(ColorSpec::new());
        f(color_spec);
        self
    }
}

pub enum SegmentSpec {
    Message(LogSpec),
    Target(LogSpec),
    Text(CompactString, LogSpec),
}

impl SegmentSpec {

    #[inline(always)]
    pub fn spec(&self) -> &LogSpec {
        match self {
            Self::Message(spec) | Self::Target(spec) | Self::Text(_, spec) => spec,
        }
    }
}

pub struct LogFmtBuilder<'a> {
    fmt: &'a mut LogFmt,
}

impl<'a> LogFmtBuilder<'a> {

    /// Clears `fmt` and starts building it from scratch.
    #[inline(always)]
    pub fn new(fmt: &'a mut LogFmt) -> Self {
        fmt.clear();
        Self {
            fmt,
        }
    }

    /// Appends the formatted log message.
    #[inline(always)]
    pub fn message(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push(SegmentSpec::Message(f(Default::default())))?;
        Ok(self)
    }

    /// Appends the module path the message was logged from.
    #[inline(always)]
    pub fn target(&mut self, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push(SegmentSpec::Target(f(Default::default())))?;
        Ok(self)
    }

    #[inline(always)]
    pub fn text(&mut self, text: &str, f: impl FnOnce(LogSpec) -> LogSpec) -> Result<&mut Self> {
        self.fmt.segments.push(SegmentSpec::Text(CompactString::new(text), f(Default::default())))?;
        Ok(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builder_replaces_segments() {
        let mut fmt = LogFmt::level_default(Level::Info).unwrap();
        assert_eq!(fmt.len(), 5);
        LogFmtBuilder::new(&mut fmt)
            .message(|spec| spec)
            .unwrap();
        assert_eq!(fmt.len(), 1);
        assert!(matches!(fmt.into_iter().next(), Some(SegmentSpec::Message(_))));
    }

    #[test]
    fn default_formats_color_level_name() {
        let fmt = LogFmt::level_default(Level::Error).unwrap();
        let first = fmt.into_iter().next().unwrap();
        let color = first.spec().color_spec.as_ref().unwrap();
        assert_eq!(color.fg(), Some(&Color::Red));
        assert!(color.bold());
    }
}
