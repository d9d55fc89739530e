//! Sweep progress events and the sinks that consume them.
//!
//! The sweeper never prints. It hands every [`SweepEvent`] to an
//! [`EventSink`]; [`ConsoleSink`] renders them for humans and [`MemorySink`]
//! keeps them for inspection.

use crate::summary::SweepSummary;
use console::style;
use shared_utils::{format_bytes, format_size_change};
use std::io::{self, Stdout, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SweepEvent {
    Started {
        dir: PathBuf,
        eligible: usize,
    },
    Updated {
        source: PathBuf,
        derived: PathBuf,
        source_bytes: u64,
        derived_bytes: u64,
    },
    Skipped {
        source: PathBuf,
        derived: PathBuf,
    },
    Failed {
        source: PathBuf,
        reason: String,
    },
    Finished {
        summary: SweepSummary,
    },
}

pub trait EventSink {
    fn emit(&mut self, event: &SweepEvent);
}

/// Records events in emission order.
#[derive(Debug, Default)]
pub struct MemorySink {
    pub events: Vec<SweepEvent>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// File names of the sources with an `Updated` event.
    pub fn updated_names(&self) -> Vec<String> {
        self.names(|event| match event {
            SweepEvent::Updated { source, .. } => Some(source),
            _ => None,
        })
    }

    pub fn skipped_names(&self) -> Vec<String> {
        self.names(|event| match event {
            SweepEvent::Skipped { source, .. } => Some(source),
            _ => None,
        })
    }

    pub fn failed_names(&self) -> Vec<String> {
        self.names(|event| match event {
            SweepEvent::Failed { source, .. } => Some(source),
            _ => None,
        })
    }

    fn names<F>(&self, pick: F) -> Vec<String>
    where
        F: Fn(&SweepEvent) -> Option<&PathBuf>,
    {
        self.events
            .iter()
            .filter_map(pick)
            .map(|path| file_name(path))
            .collect()
    }
}

impl EventSink for MemorySink {
    fn emit(&mut self, event: &SweepEvent) {
        self.events.push(event.clone());
    }
}

/// Line-oriented progress and the closing summary block.
pub struct ConsoleSink<W: Write = Stdout> {
    out: W,
}

impl ConsoleSink<Stdout> {
    pub fn stdout() -> Self {
        Self { out: io::stdout() }
    }
}

impl<W: Write> ConsoleSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn write_event(&mut self, event: &SweepEvent) -> io::Result<()> {
        match event {
            SweepEvent::Started { dir, eligible } => {
                writeln!(
                    self.out,
                    "🔍 Checking {} images in {}...",
                    eligible,
                    dir.display()
                )
            }
            SweepEvent::Updated {
                source,
                derived,
                source_bytes,
                derived_bytes,
            } => {
                writeln!(
                    self.out,
                    "{} {} → {} ({} → {}, {})",
                    style("✅ Generated/updated:").green(),
                    file_name(source),
                    file_name(derived),
                    format_bytes(*source_bytes),
                    format_bytes(*derived_bytes),
                    format_size_change(*source_bytes, *derived_bytes)
                )
            }
            SweepEvent::Skipped { source, .. } => {
                writeln!(
                    self.out,
                    "{} {} (webp is up to date)",
                    style("⏭️  Skipped:").dim(),
                    file_name(source)
                )
            }
            SweepEvent::Failed { source, reason } => {
                writeln!(
                    self.out,
                    "{} {}, reason: {}",
                    style("❌ Failed:").red(),
                    file_name(source),
                    reason
                )
            }
            SweepEvent::Finished { summary } => self.write_summary(summary),
        }
    }

    fn write_summary(&mut self, summary: &SweepSummary) -> io::Result<()> {
        writeln!(self.out)?;
        writeln!(self.out, "📊 Results:")?;
        writeln!(self.out, "✅ Generated/updated: {}", summary.updated)?;
        writeln!(self.out, "⏭️  Skipped: {}", summary.skipped)?;
        writeln!(self.out, "❌ Failed: {}", summary.failed)?;
        if summary.updated > 0 {
            writeln!(
                self.out,
                "💾 Size: {} → {} ({})",
                format_bytes(summary.bytes_in),
                format_bytes(summary.bytes_out),
                format_size_change(summary.bytes_in, summary.bytes_out)
            )?;
        }
        if !summary.errors.is_empty() {
            writeln!(self.out, "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━")?;
            for (path, error) in &summary.errors {
                writeln!(self.out, "   {} → {}", path.display(), error)?;
            }
        }
        writeln!(self.out, "🎉 Done!")
    }
}

impl<W: Write> EventSink for ConsoleSink<W> {
    fn emit(&mut self, event: &SweepEvent) {
        if let Err(e) = self.write_event(event).and_then(|_| self.out.flush()) {
            tracing::warn!(error = %e, "Failed to write progress line");
        }
    }
}

fn file_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string())
}
