//! img_webp - keeps a WebP copy next to every JPEG/PNG in an image directory.
//!
//! A sweep lists the directory (non-recursive), and for each source image
//! regenerates `<stem>.webp` when it is missing or older than the source.
//! Per-file failures are counted and reported; only a missing directory
//! aborts the run.

pub mod codec;
pub mod config;
pub mod error;
pub mod events;
pub mod freshness;
pub mod summary;
pub mod sweeper;

pub use codec::{detect_codec, CwebpCodec, ImageCrateCodec, WebpCodec};
pub use config::{default_image_dir, EncodeParams, SweepConfig, OUTPUT_EXTENSION, SOURCE_EXTENSIONS};
pub use error::{CodecError, SweepError};
pub use events::{ConsoleSink, EventSink, MemorySink, SweepEvent};
pub use freshness::{derived_path, Freshness};
pub use summary::SweepSummary;
pub use sweeper::{check_image_dir, Sweeper};
