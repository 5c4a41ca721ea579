use crate::{Error, DEVICE, OUTPUT_DIR_NAME, QUALITY};
use std::path::{Path, PathBuf};
/// Where compressed images are written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputMode {
    /// Write `<dir>/<filename>`. The directory is created if it does not exist.
    Separate(PathBuf),
    /// Write `<source>/compressed_<filename>` next to the original.
    InPlace,
}
/// Configuration of a single batch run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    source: PathBuf,
    output_mode: OutputMode,
    quality: u8,
    workers: usize,
    preserve_metadata: bool,
}
impl Config {
    /// Creates a configuration for the given source directory.
    ///
    /// Defaults:
    /// - output goes to `<source>/compressed_images`.
    /// - quality is 85.
    /// - 4 worker threads.
    /// - EXIF and ICC data are carried over.
    pub fn new<P: AsRef<Path>>(source: P) -> Self {
        let source = source.as_ref().to_path_buf();
        Self {
            output_mode: OutputMode::Separate(source.join(OUTPUT_DIR_NAME)),
            source,
            quality: QUALITY,
            workers: DEVICE,
            preserve_metadata: true,
        }
    }
    /// Specifies the quality of compressed images, 1 to 100.
    pub fn with_quality(self, quality: u8) -> Config {
        Config { quality, ..self }
    }
    /// Specifies the number of worker threads.
    pub fn with_workers(self, workers: usize) -> Config {
        Config { workers, ..self }
    }
    /// Writes compressed images into `dir` instead of the default output directory.
    pub fn with_output_dir<P: AsRef<Path>>(self, dir: P) -> Config {
        Config {
            output_mode: OutputMode::Separate(dir.as_ref().to_path_buf()),
            ..self
        }
    }
    /// Writes compressed images next to their originals with a `compressed_` prefix.
    pub fn in_place(self) -> Config {
        Config {
            output_mode: OutputMode::InPlace,
            ..self
        }
    }
    /// Whether EXIF and ICC data of the originals are copied to the outputs.
    pub fn with_metadata(self, preserve_metadata: bool) -> Config {
        Config {
            preserve_metadata,
            ..self
        }
    }
    /// Rejects values the codec or the pool cannot work with.
    pub fn validate(&self) -> Result<(), Error> {
        if !(1..=100).contains(&self.quality) {
            return Err(Error::Config(format!(
                "quality must be between 1 and 100, got {}",
                self.quality
            )));
        }
        if self.workers == 0 {
            return Err(Error::Config(
                "number of workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }
    /// Source directory.
    pub fn source(&self) -> &Path {
        &self.source
    }
    /// Output addressing mode.
    pub fn output_mode(&self) -> &OutputMode {
        &self.output_mode
    }
    /// Compression quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }
    /// Worker pool size.
    pub fn workers(&self) -> usize {
        self.workers
    }
    /// Whether metadata is preserved.
    pub fn preserve_metadata(&self) -> bool {
        self.preserve_metadata
    }
}
