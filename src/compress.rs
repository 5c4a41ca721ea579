use crate::{Error, Single, WorkItem};
use anyhow::{bail, Context};
use img_parts::{jpeg::Jpeg, Bytes, ImageEXIF, ImageICC};
use std::fs;
use tracing::debug;
use turbojpeg::{decompress_image, Compressor, Image, PixelFormat, Subsamp::Sub2x2};

#[derive(Debug, Clone, Copy)]
struct ValidQuality(u8);
impl ValidQuality {
    fn val(&self) -> i32 {
        i32::from(self.0)
    }
}
impl TryFrom<u8> for ValidQuality {
    type Error = Error;
    fn try_from(value: u8) -> Result<Self, Self::Error> {
        if (1..=100).contains(&value) {
            Ok(Self(value))
        } else {
            Err(Error::Codec(format!(
                "quality must be between 1 and 100, got {value}"
            )))
        }
    }
}
/// Compression-related work.
#[derive(Debug, Clone)]
pub(crate) struct Compress {
    bytes: Vec<u8>,
    quality: u8,
    preserve_metadata: bool,
}
impl Compress {
    /// Creates a new compression task.
    pub(crate) fn new(bytes: Vec<u8>, quality: u8) -> Self {
        Self {
            bytes,
            quality,
            preserve_metadata: true,
        }
    }
    pub(crate) fn with_metadata(self, preserve_metadata: bool) -> Self {
        Self {
            preserve_metadata,
            ..self
        }
    }
    /// Decodes the image into 8-bit RGB and re-encodes it with
    /// [turbojpeg](https://github.com/honzasp/rust-turbojpeg), optionally carrying EXIF/ICC data over.
    pub(crate) fn compress(self) -> Result<Vec<u8>, Error> {
        let quality = ValidQuality::try_from(self.quality)?;
        let preserve_metadata = self.preserve_metadata;
        let compressed = CompressImage::new(self.bytes, quality)
            .compress()
            .map_err(|e| Error::Codec(format!("{e:#}")))?;
        if !preserve_metadata {
            return Ok(compressed.compressed_bytes);
        }
        compressed
            .into_preserve_exif()
            .preserve_exif()
            .map_err(|e| Error::Codec(format!("{e:#}")))
    }
}
/// Reads `item`'s input, compresses it with [`Single`], and writes (or overwrites) its output.
pub fn compress_file(item: &WorkItem, preserve_metadata: bool) -> Result<(), Error> {
    let input = item.input_path();
    let bytes = fs::read(input).map_err(|e| Error::Io {
        path: input.to_path_buf(),
        reason: e.to_string(),
    })?;
    let original_len = bytes.len();
    let compressed = Single::from_bytes(&bytes)
        .with_quality(item.quality())
        .with_metadata(preserve_metadata)
        .build()
        .compress()?;
    debug!(
        input = %input.display(),
        original_len,
        compressed_len = compressed.len(),
        "compressed"
    );
    let output = item.output_path();
    fs::write(output, compressed).map_err(|e| Error::Io {
        path: output.to_path_buf(),
        reason: e.to_string(),
    })
}
/// Bytes before and after compression.
struct PreserveExif {
    original_bytes: Vec<u8>,
    compressed_bytes: Vec<u8>,
}
impl PreserveExif {
    /// Parse EXIF and ICC segments from the original bytes and write them
    /// into the compressed bytes.
    ///
    /// An original whose segments cannot be parsed is returned without metadata.
    fn preserve_exif(self) -> anyhow::Result<Vec<u8>> {
        let Ok(original) = Jpeg::from_bytes(Bytes::from(self.original_bytes)) else {
            debug!("source segments unreadable, skipping metadata");
            return Ok(self.compressed_bytes);
        };
        let (exif, icc_profile) = (original.exif(), original.icc_profile());
        if exif.is_none() && icc_profile.is_none() {
            return Ok(self.compressed_bytes);
        }
        let mut compressed = Jpeg::from_bytes(Bytes::from(self.compressed_bytes))
            .context("encoder produced an unparsable JPEG")?;
        compressed.set_exif(exif);
        compressed.set_icc_profile(icc_profile);
        let bytes = compressed.encoder().bytes().to_vec();
        if bytes.is_empty() {
            bail!("metadata re-encoding produced no data");
        }
        Ok(bytes)
    }
}
struct CompressImage {
    bytes: Vec<u8>,
    compressed_bytes: Vec<u8>,
    q: ValidQuality,
}
impl CompressImage {
    /// Creates a new image to be compressed.
    fn new(bytes: Vec<u8>, q: ValidQuality) -> Self {
        Self {
            q,
            bytes,
            compressed_bytes: Default::default(),
        }
    }
    /// Compresses the image, retaining original and compressed bytes. Returns self.
    fn compress(mut self) -> anyhow::Result<Self> {
        let image = decode_rgb(&self.bytes)?;
        let (width, height) = image.dimensions();
        let width = usize::try_from(width)?;
        let pixels = Image {
            pixels: image.as_raw().as_slice(),
            width,
            pitch: width * PixelFormat::RGB.size(),
            height: usize::try_from(height)?,
            format: PixelFormat::RGB,
        };
        let mut compressor = Compressor::new().context("cannot create encoder")?;
        compressor.set_quality(self.q.val())?;
        compressor.set_subsamp(Sub2x2)?;
        compressor.set_optimize(true)?;
        self.compressed_bytes = compressor
            .compress_to_vec(pixels)
            .context("cannot encode image")?;
        Ok(self)
    }
    /// Produce PreserveExif.
    fn into_preserve_exif(self) -> PreserveExif {
        PreserveExif {
            original_bytes: self.bytes,
            compressed_bytes: self.compressed_bytes,
        }
    }
}
/// Decodes any JPEG into 8-bit RGB.
///
/// turbojpeg handles the common cases. Color modes it cannot convert (CMYK, YCCK)
/// go through the `image` decoder instead.
fn decode_rgb(bytes: &[u8]) -> anyhow::Result<image::RgbImage> {
    let decoded: Result<image::RgbImage, turbojpeg::Error> = decompress_image(bytes);
    match decoded {
        Ok(image) => Ok(image),
        Err(turbo_err) => {
            let fallback = image::load_from_memory(bytes)
                .with_context(|| format!("cannot decode source image ({turbo_err})"))?;
            Ok(fallback.to_rgb8())
        }
    }
}
