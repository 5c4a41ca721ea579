use crate::{Compress, Error, QUALITY};
/// Creates a new Single struct for compressing single images.
#[derive(Debug, Clone)]
pub struct SingleBuilder<'a> {
    bytes_slice: &'a [u8],
    quality: u8,
    preserve_metadata: bool,
}
impl<'a> SingleBuilder<'a> {
    /// Specifies the quality of the compressed image, 1 to 100.
    /// Defaults to 85.
    ///
    /// **This method is optional**.
    pub fn with_quality(self, quality: u8) -> SingleBuilder<'a> {
        SingleBuilder { quality, ..self }
    }
    /// Whether EXIF and ICC data are carried over. Defaults to true.
    ///
    /// **This method is optional**.
    pub fn with_metadata(self, preserve_metadata: bool) -> SingleBuilder<'a> {
        SingleBuilder {
            preserve_metadata,
            ..self
        }
    }
    /// Builds a new Single with custom configurations.
    /// # Example
    /// ```
    /// use jpegbatch::Single;
    /// fn main() {
    ///     let bytes: Vec<u8> = Vec::new();
    ///     let _build = Single::from_bytes(bytes.as_slice()).build();
    /// }
    /// ```
    pub fn build(self) -> Single<'a> {
        Single {
            bytes_slice: self.bytes_slice,
            quality: self.quality,
            preserve_metadata: self.preserve_metadata,
        }
    }
}
/// Single image compressions, entirely in memory.
#[derive(Debug, Clone)]
pub struct Single<'a> {
    bytes_slice: &'a [u8],
    quality: u8,
    preserve_metadata: bool,
}
impl<'a> Single<'a> {
    /// Creates a single image compression task from a given byte slice. Returns a [`SingleBuilder`].
    pub fn from_bytes(bytes_slice: &'a [u8]) -> SingleBuilder<'a> {
        SingleBuilder {
            bytes_slice,
            quality: QUALITY,
            preserve_metadata: true,
        }
    }
    /// Compress a single image.
    /// # Example
    /// ```
    /// use jpegbatch::Single;
    /// use image::{RgbImage, ImageFormat::Jpeg};
    /// use std::io::Cursor;
    /// fn main() -> Result<(), Box<dyn std::error::Error>> {
    ///     let mut bytes = Vec::new();
    ///     let img = RgbImage::new(200, 200);
    ///     img.write_to(&mut Cursor::new(&mut bytes), Jpeg)?;
    ///     let _result: Vec<u8> = Single::from_bytes(bytes.as_slice())
    ///         .with_quality(80)
    ///         .build()
    ///         .compress()?;
    ///     Ok(())
    /// }
    /// ```
    pub fn compress(self) -> Result<Vec<u8>, Error> {
        Compress::new(self.bytes_slice.to_vec(), self.quality)
            .with_metadata(self.preserve_metadata)
            .compress()
    }
}
