#![warn(missing_docs)]
//! Batch JPEG compression on a fixed-size pool of worker threads, powered by [turbojpeg](https://github.com/honzasp/rust-turbojpeg).
//!
//! Every image is decoded to 8-bit RGB and re-encoded with 2x2 chroma subsampling and
//! optimized Huffman tables. [EXIF](https://en.wikipedia.org/wiki/Exif) and ICC data of the
//! original are carried over through the [img_parts](https://docs.rs/img-parts/latest/img_parts/) crate unless turned off.
//!
//! A failing image never stops a batch: it becomes a failed [`Outcome`] and shows up in the
//! [`BatchSummary`]. Only a source directory that cannot be read, an output directory that
//! cannot be created, or an invalid [`Config`] abort a run.
//!
//! # Building `turbojpeg`
//! `turbojpeg-sys` needs `cmake`, a C compiler, and NASM (see [`turbojpeg`]'s [requirements](https://github.com/honzasp/rust-turbojpeg?tab=readme-ov-file#requirements)).
//!
//! # Examples
//!
//! `with_` methods are optional.
//!
//! ## Compress a whole directory with [`Batch`]
//!```no_run
//! use jpegbatch::{Batch, Config};
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::new("./photos").with_quality(80).with_workers(8);
//!     let summary = Batch::new(config).run(|outcome| println!("{outcome}"))?;
//!     println!("{} of {} compressed", summary.succeeded, summary.total);
//!     Ok(())
//! }
//!```
//!
//! ## Single image compressions with [`Single`]
//!```
//! use jpegbatch::Single;
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//! # use image::{RgbImage, ImageFormat::Jpeg};
//! # use std::io::Cursor;
//!     let mut vec: Vec<u8> = Vec::new();
//! # let img = RgbImage::new(100, 100);
//! # img.write_to(&mut Cursor::new(&mut vec), Jpeg)?;
//!     let _result: Vec<u8> = Single::from_bytes(&vec)
//!         .with_quality(80)
//!         .build()
//!         .compress()?;
//!     Ok(())
//! }
//!```
//!
//! ## Your own work items with [`Parallel`]
//! [`Parallel`] yields outcomes in completion order, not in the order items were passed in.
//!```no_run
//! use jpegbatch::{Parallel, WorkItem};
//! let items = vec![
//!     WorkItem::new("a.jpg", "small/a.jpg", 70),
//!     WorkItem::new("b.jpg", "small/b.jpg", 70),
//! ];
//! for outcome in Parallel::from_vec(items).with_device(2).build() {
//!     println!("{outcome}");
//! }
//!```
//!
//! [`turbojpeg`]: https://github.com/honzasp/rust-turbojpeg
mod batch;
mod bulk;
mod compress;
mod config;
mod defaults;
mod error;
mod outcome;
mod single;
mod task;

pub(crate) use self::compress::Compress;
pub use self::defaults::{DEVICE, EXTENSIONS, IN_PLACE_PREFIX, OUTPUT_DIR_NAME, QUALITY};
pub use self::{
    batch::Batch,
    bulk::{Parallel, ParallelBuilder, ParallelIntoIterator},
    compress::compress_file,
    config::{Config, OutputMode},
    error::Error,
    outcome::{BatchSummary, Outcome},
    single::{Single, SingleBuilder},
    task::{Tasks, WorkItem},
};
