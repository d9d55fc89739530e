//! Conversion sweep over one image directory.
//!
//! For every JPEG/PNG directly inside the directory there is exactly one
//! `<stem>.webp` candidate. It is regenerated when it is missing or strictly
//! older than its source, otherwise left alone. Encodes go to a temporary file
//! in the same directory that is renamed into place only on success, so a
//! failed encode never leaves a truncated `.webp` behind.

use crate::codec::WebpCodec;
use crate::config::{SweepConfig, OUTPUT_EXTENSION, SOURCE_EXTENSIONS};
use crate::error::{CodecError, Result, SweepError};
use crate::events::{EventSink, SweepEvent};
use crate::freshness::{derived_path, Freshness};
use crate::summary::SweepSummary;
use shared_utils::collect_files;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info};

pub struct Sweeper<'a> {
    config: SweepConfig,
    codec: &'a dyn WebpCodec,
}

impl<'a> Sweeper<'a> {
    pub fn new(config: SweepConfig, codec: &'a dyn WebpCodec) -> Self {
        Self { config, codec }
    }

    /// One full pass. Only a missing (or non-directory) image dir is an
    /// error; per-file failures are counted in the returned summary.
    pub fn run(&self, sink: &mut dyn EventSink) -> Result<SweepSummary> {
        let dir = &self.config.image_dir;
        check_image_dir(dir)?;

        let sources = self.eligible_sources();
        info!(
            dir = %dir.display(),
            eligible = sources.len(),
            codec = self.codec.name(),
            quality = self.config.encode.quality,
            method = self.config.encode.method,
            "Sweep started"
        );
        sink.emit(&SweepEvent::Started {
            dir: dir.clone(),
            eligible: sources.len(),
        });

        let start = Instant::now();
        let mut summary = SweepSummary::new();
        for source in &sources {
            self.process(source, &mut summary, sink);
        }

        info!(
            updated = summary.updated,
            skipped = summary.skipped,
            failed = summary.failed,
            duration_secs = start.elapsed().as_secs_f64(),
            "Sweep finished"
        );
        sink.emit(&SweepEvent::Finished {
            summary: summary.clone(),
        });

        Ok(summary)
    }

    /// Direct children with a source extension, sorted by file name.
    pub fn eligible_sources(&self) -> Vec<PathBuf> {
        collect_files(&self.config.image_dir, SOURCE_EXTENSIONS)
    }

    fn process(&self, source: &Path, summary: &mut SweepSummary, sink: &mut dyn EventSink) {
        let derived = derived_path(source, OUTPUT_EXTENSION);
        let freshness = Freshness::evaluate(source, &derived);

        if !freshness.needs_regeneration() {
            debug!(source = %source.display(), "Derived image is up to date");
            summary.record_skipped();
            sink.emit(&SweepEvent::Skipped {
                source: source.to_path_buf(),
                derived,
            });
            return;
        }

        debug!(source = %source.display(), ?freshness, "Regenerating derived image");
        match self.regenerate(source, &derived) {
            Ok(derived_bytes) => {
                let source_bytes = fs::metadata(source).map(|m| m.len()).unwrap_or(0);
                info!(
                    source = %source.display(),
                    derived = %derived.display(),
                    source_bytes,
                    derived_bytes,
                    "Derived image written"
                );
                summary.record_updated(source_bytes, derived_bytes);
                sink.emit(&SweepEvent::Updated {
                    source: source.to_path_buf(),
                    derived,
                    source_bytes,
                    derived_bytes,
                });
            }
            Err(e) => {
                let reason = e.to_string();
                // shown on stdout by the sink, kept below the stderr level
                info!(source = %source.display(), error = %reason, "Conversion failed");
                summary.record_failed(source.to_path_buf(), reason.clone());
                sink.emit(&SweepEvent::Failed {
                    source: source.to_path_buf(),
                    reason,
                });
            }
        }
    }

    /// Encodes into a hidden sibling temp file, then renames it over
    /// `derived`. The temp file is removed on every failure path.
    fn regenerate(&self, source: &Path, derived: &Path) -> std::result::Result<u64, CodecError> {
        let dir = derived.parent().unwrap_or_else(|| Path::new("."));
        let temp = tempfile::Builder::new()
            .prefix(".img-webp-")
            .suffix(".webp.tmp")
            .tempfile_in(dir)?;

        self.codec.encode(source, temp.path(), self.config.encode)?;

        let derived_bytes = fs::metadata(temp.path())?.len();
        if derived_bytes == 0 {
            return Err(CodecError::EmptyOutput);
        }
        // temp files are created owner-only; the copy is served like its source
        fs::set_permissions(temp.path(), fs::metadata(source)?.permissions())?;
        temp.persist(derived).map_err(|e| CodecError::Io(e.error))?;
        Ok(derived_bytes)
    }
}

/// Fails unless `dir` exists and is a directory. Touches nothing on disk.
pub fn check_image_dir(dir: &Path) -> Result<()> {
    if !dir.exists() {
        debug!(dir = %dir.display(), "Image directory does not exist");
        return Err(SweepError::DirectoryNotFound {
            path: dir.to_path_buf(),
        });
    }
    if !dir.is_dir() {
        debug!(dir = %dir.display(), "Image path is not a directory");
        return Err(SweepError::NotADirectory {
            path: dir.to_path_buf(),
        });
    }
    Ok(())
}
