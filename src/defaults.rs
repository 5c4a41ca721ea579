/// Default compression quality.
pub const QUALITY: u8 = 85;
/// Default amount of worker threads.
pub const DEVICE: usize = 4;
/// Name of the output directory created inside the source directory.
pub const OUTPUT_DIR_NAME: &str = "compressed_images";
/// Filename prefix used when compressing in place.
pub const IN_PLACE_PREFIX: &str = "compressed_";
/// Extensions (lowercase) picked up by the enumerator.
pub const EXTENSIONS: [&str; 2] = ["jpg", "jpeg"];
