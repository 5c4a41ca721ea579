use crate::{Config, Error, OutputMode, EXTENSIONS, IN_PLACE_PREFIX};
use std::ffi::{OsStr, OsString};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::debug;
/// One unit of compression work: where to read, where to write, and at which quality.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct WorkItem {
    input_path: PathBuf,
    output_path: PathBuf,
    quality: u8,
}
impl WorkItem {
    /// Creates a new WorkItem.
    pub fn new<I, O>(input_path: I, output_path: O, quality: u8) -> Self
    where
        I: Into<PathBuf>,
        O: Into<PathBuf>,
    {
        Self {
            input_path: input_path.into(),
            output_path: output_path.into(),
            quality,
        }
    }
    /// Image to read.
    pub fn input_path(&self) -> &Path {
        &self.input_path
    }
    /// Destination of the compressed image.
    pub fn output_path(&self) -> &Path {
        &self.output_path
    }
    /// Compression quality.
    pub fn quality(&self) -> u8 {
        self.quality
    }
}
/// Obtain tasks from a source directory.
pub struct Tasks;
impl Tasks {
    /// Lists the JPEG files directly inside the configured source directory and pairs each
    /// with its output path.
    ///
    /// The source is read before anything is touched, so a missing source never leaves
    /// an output directory behind. In [`OutputMode::Separate`] the output directory
    /// (and its parents) is created before this returns.
    ///
    /// In [`OutputMode::InPlace`] files already carrying the `compressed_` prefix are
    /// skipped: they are outputs of an earlier run and may be the output of another item.
    ///
    /// Items come out in directory listing order, which is platform dependent.
    pub fn enumerate(config: &Config) -> Result<Vec<WorkItem>, Error> {
        let source = config.source();
        let names = Tasks::get_tasks(source)?;
        let output_dir = match config.output_mode() {
            OutputMode::Separate(dir) => {
                Tasks::create_output_dir(dir)?;
                Some(dir.as_path())
            }
            OutputMode::InPlace => None,
        };
        let items = names
            .into_iter()
            .filter(|name| output_dir.is_some() || !is_prefixed(name))
            .map(|name| {
                let output_path = match output_dir {
                    Some(dir) => dir.join(&name),
                    None => {
                        let mut prefixed = OsString::from(IN_PLACE_PREFIX);
                        prefixed.push(&name);
                        source.join(prefixed)
                    }
                };
                WorkItem::new(source.join(&name), output_path, config.quality())
            })
            .collect::<Vec<_>>();
        debug!(source = %source.display(), found = items.len(), "enumerated");
        Ok(items)
    }
    /// Names of the regular files in `dir` with a JPEG extension.
    fn get_tasks(dir: &Path) -> Result<Vec<OsString>, Error> {
        let enumeration_err = |e: std::io::Error| Error::Enumeration {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        };
        let mut names = Vec::new();
        for dent in fs::read_dir(dir).map_err(enumeration_err)? {
            let direntry = dent.map_err(enumeration_err)?;
            let path = direntry.path();
            if !path.is_file() || !is_jpeg(&path) {
                continue;
            }
            names.push(direntry.file_name());
        }
        Ok(names)
    }
    fn create_output_dir(dir: &Path) -> Result<(), Error> {
        fs::create_dir_all(dir).map_err(|e| Error::OutputDir {
            path: dir.to_path_buf(),
            reason: e.to_string(),
        })
    }
}
fn is_prefixed(name: &OsStr) -> bool {
    name.as_encoded_bytes()
        .starts_with(IN_PLACE_PREFIX.as_bytes())
}
fn is_jpeg(path: &Path) -> bool {
    path.extension()
        .and_then(OsStr::to_str)
        .map(|ext| {
            EXTENSIONS
                .iter()
                .any(|accepted| ext.eq_ignore_ascii_case(accepted))
        })
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempdir::TempDir;

    fn touch(dir: &Path, name: &str) {
        fs::write(dir.join(name), b"").unwrap();
    }

    #[test]
    fn extension_filter_is_case_insensitive() {
        assert!(is_jpeg(Path::new("a.jpg")));
        assert!(is_jpeg(Path::new("b.JPEG")));
        assert!(is_jpeg(Path::new("c.JpG")));
        assert!(!is_jpeg(Path::new("d.png")));
        assert!(!is_jpeg(Path::new("jpg")));
        assert!(!is_jpeg(Path::new("e.jpg.txt")));
    }

    #[test]
    fn separate_mode_paths() {
        let source = TempDir::new("source").unwrap();
        touch(source.path(), "a.jpg");
        touch(source.path(), "b.JPEG");
        touch(source.path(), "notes.txt");
        fs::create_dir(source.path().join("folder.jpg")).unwrap();
        let out = source.path().join("nested").join("out");
        let config = Config::new(source.path()).with_output_dir(&out).with_quality(60);

        let mut items = Tasks::enumerate(&config).unwrap();
        items.sort();
        assert!(out.is_dir());
        assert_eq!(
            items,
            vec![
                WorkItem::new(source.path().join("a.jpg"), out.join("a.jpg"), 60),
                WorkItem::new(source.path().join("b.JPEG"), out.join("b.JPEG"), 60),
            ]
        );
    }

    #[test]
    fn in_place_mode_paths() {
        let source = TempDir::new("source").unwrap();
        touch(source.path(), "photo.jpg");
        let config = Config::new(source.path()).in_place();

        let items = Tasks::enumerate(&config).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(
            items[0].output_path(),
            source.path().join("compressed_photo.jpg")
        );
        assert!(!source.path().join("compressed_images").exists());
    }

    #[test]
    fn in_place_skips_earlier_outputs() {
        let source = TempDir::new("source").unwrap();
        touch(source.path(), "a.jpg");
        touch(source.path(), "compressed_a.jpg");
        touch(source.path(), "compressed_b.jpg");
        let items = Tasks::enumerate(&Config::new(source.path()).in_place()).unwrap();
        assert_eq!(
            items,
            vec![WorkItem::new(
                source.path().join("a.jpg"),
                source.path().join("compressed_a.jpg"),
                85
            )]
        );
        let inputs = items.iter().map(WorkItem::input_path).collect::<Vec<_>>();
        assert!(items
            .iter()
            .all(|item| !inputs.contains(&item.output_path())));
    }

    #[test]
    fn separate_mode_keeps_prefixed_names() {
        let source = TempDir::new("source").unwrap();
        touch(source.path(), "compressed_a.jpg");
        let out = source.path().join("out");
        let items = Tasks::enumerate(&Config::new(source.path()).with_output_dir(&out)).unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].output_path(), out.join("compressed_a.jpg"));
    }

    #[cfg(unix)]
    #[test]
    fn non_utf8_names_are_kept() {
        use std::os::unix::ffi::OsStrExt;
        let source = TempDir::new("source").unwrap();
        let latin1 = OsStr::from_bytes(b"caf\xe9.jpg");
        touch(source.path(), "ok.jpg");
        fs::write(source.path().join(latin1), b"").unwrap();

        let items = Tasks::enumerate(&Config::new(source.path()).in_place()).unwrap();
        assert_eq!(items.len(), 2);
        let mut expected = OsString::from("compressed_");
        expected.push(latin1);
        assert!(items
            .iter()
            .any(|item| item.output_path() == source.path().join(&expected)));
    }

    #[test]
    fn empty_directory_is_not_an_error() {
        let source = TempDir::new("source").unwrap();
        touch(source.path(), "readme.md");
        let items = Tasks::enumerate(&Config::new(source.path())).unwrap();
        assert!(items.is_empty());
    }

    #[test]
    fn missing_source_creates_nothing() {
        let root = TempDir::new("root").unwrap();
        let missing = root.path().join("missing");
        let out = root.path().join("out");
        let config = Config::new(&missing).with_output_dir(&out);

        let err = Tasks::enumerate(&config).unwrap_err();
        assert!(matches!(err, Error::Enumeration { .. }));
        assert!(!out.exists());
    }

    #[test]
    fn output_dir_blocked_by_file() {
        let source = TempDir::new("source").unwrap();
        touch(source.path(), "a.jpg");
        touch(source.path(), "blocker");
        let config = Config::new(source.path()).with_output_dir(source.path().join("blocker"));

        let err = Tasks::enumerate(&config).unwrap_err();
        assert!(matches!(err, Error::OutputDir { .. }));
    }
}
