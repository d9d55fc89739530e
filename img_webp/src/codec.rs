//! WebP encoders.
//!
//! [`WebpCodec`] is the single seam between the sweeper and pixel work:
//! decode `input`, encode WebP into `output`, report success or the reason
//! it failed. Calls are synchronous with no timeout.

use crate::config::EncodeParams;
use crate::error::CodecError;
use image::codecs::webp::WebPEncoder;
use image::{DynamicImage, ExtendedColorType, ImageEncoder};
use shared_utils::{execute_external_command, safe_path_arg};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use tracing::{debug, warn};

pub trait WebpCodec {
    fn name(&self) -> &'static str;

    fn encode(&self, input: &Path, output: &Path, params: EncodeParams) -> Result<(), CodecError>;
}

/// libwebp's `cwebp` command-line encoder.
#[derive(Debug, Clone)]
pub struct CwebpCodec {
    program: String,
}

impl CwebpCodec {
    pub const TOOL: &'static str = "cwebp";

    pub fn new() -> Self {
        Self::with_program(Self::TOOL)
    }

    /// Runs `program` instead of `cwebp` from `PATH`.
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    pub fn is_available() -> bool {
        which::which(Self::TOOL).is_ok()
    }

    fn build_args(input: &Path, output: &Path, params: EncodeParams) -> Vec<String> {
        vec![
            "-q".to_string(),
            params.quality.to_string(),
            "-m".to_string(),
            params.method.to_string(),
            "-quiet".to_string(),
            safe_path_arg(input).into_owned(),
            "-o".to_string(),
            safe_path_arg(output).into_owned(),
        ]
    }
}

impl Default for CwebpCodec {
    fn default() -> Self {
        Self::new()
    }
}

impl WebpCodec for CwebpCodec {
    fn name(&self) -> &'static str {
        Self::TOOL
    }

    fn encode(&self, input: &Path, output: &Path, params: EncodeParams) -> Result<(), CodecError> {
        let args = Self::build_args(input, output, params);
        let result = execute_external_command(&self.program, &args)?;

        if !result.success() {
            return Err(CodecError::ToolFailed {
                tool: self.program.clone(),
                exit_code: result.exit_code,
                stderr: result.stderr,
            });
        }
        Ok(())
    }
}

/// Pure-Rust fallback on the `image` crate.
///
/// The crate's WebP encoder is lossless only, so `quality` and `method` are
/// accepted but have no effect on the output.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageCrateCodec;

impl WebpCodec for ImageCrateCodec {
    fn name(&self) -> &'static str {
        "image-rs (lossless)"
    }

    fn encode(&self, input: &Path, output: &Path, params: EncodeParams) -> Result<(), CodecError> {
        debug!(
            input = %input.display(),
            quality = params.quality,
            method = params.method,
            "Lossless WebP encode, quality/method not applicable"
        );

        let img = image::ImageReader::open(input)?
            .with_guessed_format()?
            .decode()?;

        let mut writer = BufWriter::new(File::create(output)?);
        write_lossless_webp(&img, &mut writer)?;
        writer.into_inner().map_err(|e| e.into_error())?.sync_all()?;
        Ok(())
    }
}

/// Encodes `img` as lossless WebP and flushes `writer`, so a short write
/// (full disk, closed pipe) surfaces as an error instead of on drop.
fn write_lossless_webp<W: Write>(img: &DynamicImage, writer: &mut W) -> Result<(), CodecError> {
    let encoder = WebPEncoder::new_lossless(&mut *writer);

    match img {
        DynamicImage::ImageRgb8(_) | DynamicImage::ImageLuma8(_) => {
            let rgb = img.to_rgb8();
            encoder.write_image(
                rgb.as_raw(),
                rgb.width(),
                rgb.height(),
                ExtendedColorType::Rgb8,
            )?;
        }
        _ => {
            let rgba = img.to_rgba8();
            encoder.write_image(
                rgba.as_raw(),
                rgba.width(),
                rgba.height(),
                ExtendedColorType::Rgba8,
            )?;
        }
    }

    writer.flush()?;
    Ok(())
}

/// `cwebp` when it is on `PATH`, otherwise the lossless `image` fallback.
pub fn detect_codec() -> Box<dyn WebpCodec> {
    if CwebpCodec::is_available() {
        Box::new(CwebpCodec::new())
    } else {
        warn!("cwebp not found in PATH, falling back to lossless WebP via the image crate");
        Box::new(ImageCrateCodec)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{Rgb, RgbImage, Rgba, RgbaImage};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_cwebp_args_carry_fixed_params() {
        let args = CwebpCodec::build_args(
            Path::new("/img/a.jpg"),
            Path::new("/img/.a.webp.tmp"),
            EncodeParams::default(),
        );
        assert_eq!(
            args,
            vec!["-q", "85", "-m", "6", "-quiet", "/img/a.jpg", "-o", "/img/.a.webp.tmp"]
        );
    }

    #[test]
    fn test_cwebp_args_guard_dash_paths() {
        let args = CwebpCodec::build_args(
            Path::new("-a.jpg"),
            Path::new("-a.webp"),
            EncodeParams::default(),
        );
        assert!(args.contains(&"./-a.jpg".to_string()));
        assert!(args.contains(&"./-a.webp".to_string()));
    }

    #[test]
    fn test_cwebp_missing_program_is_io_error() {
        let temp = TempDir::new().unwrap();
        let codec = CwebpCodec::with_program("cwebp_does_not_exist_xyz");
        let err = codec
            .encode(
                &temp.path().join("a.jpg"),
                &temp.path().join("a.webp"),
                EncodeParams::default(),
            )
            .unwrap_err();
        assert!(matches!(err, CodecError::Io(_)));
    }

    #[cfg(unix)]
    #[test]
    fn test_cwebp_nonzero_exit_is_tool_failed() {
        let temp = TempDir::new().unwrap();
        let codec = CwebpCodec::with_program("false");
        let err = codec
            .encode(
                &temp.path().join("a.jpg"),
                &temp.path().join("a.webp"),
                EncodeParams::default(),
            )
            .unwrap_err();
        match err {
            CodecError::ToolFailed { tool, exit_code, .. } => {
                assert_eq!(tool, "false");
                assert_eq!(exit_code, Some(1));
            }
            other => panic!("expected ToolFailed, got {:?}", other),
        }
    }

    #[test]
    fn test_image_codec_encodes_jpeg() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("photo.jpg");
        let output = temp.path().join("photo.webp");
        RgbImage::from_pixel(16, 12, Rgb([200, 40, 10]))
            .save(&input)
            .unwrap();

        ImageCrateCodec
            .encode(&input, &output, EncodeParams::default())
            .unwrap();

        let bytes = fs::read(&output).unwrap();
        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(&bytes[8..12], b"WEBP");

        let decoded = image::open(&output).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (16, 12));
    }

    #[test]
    fn test_image_codec_keeps_alpha() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("icon.png");
        let output = temp.path().join("icon.webp");
        RgbaImage::from_pixel(4, 4, Rgba([0, 0, 255, 128]))
            .save(&input)
            .unwrap();

        ImageCrateCodec
            .encode(&input, &output, EncodeParams::default())
            .unwrap();

        let decoded = image::open(&output).unwrap().to_rgba8();
        assert_eq!(decoded.get_pixel(0, 0), &Rgba([0, 0, 255, 128]));
    }

    /// Accepts nothing, like a device with no space left.
    struct FullDisk;

    impl Write for FullDisk {
        fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
            Err(std::io::Error::other("no space left on device"))
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_buffered_write_error_is_reported() {
        let img = DynamicImage::ImageRgb8(RgbImage::from_pixel(4, 4, Rgb([9, 9, 9])));
        // small enough to sit in the buffer until the final flush
        let mut writer = BufWriter::new(FullDisk);

        let err = write_lossless_webp(&img, &mut writer).unwrap_err();

        assert!(
            err.to_string().contains("no space left on device"),
            "unexpected error: {}",
            err
        );
    }

    #[test]
    fn test_image_codec_rejects_corrupt_input() {
        let temp = TempDir::new().unwrap();
        let input = temp.path().join("broken.jpeg");
        fs::write(&input, b"definitely not a jpeg").unwrap();

        let err = ImageCrateCodec
            .encode(&input, &temp.path().join("broken.webp"), EncodeParams::default())
            .unwrap_err();
        assert!(matches!(err, CodecError::Image(_)));
    }
}
