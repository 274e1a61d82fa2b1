use std::ffi::OsStr;
use std::path::{Path, PathBuf};

use image::DynamicImage;
use tracing::debug;

use crate::error::{FrameError, Result, SourceError};

/// File extensions picked up from the source directory. Matching is exact,
/// so mixed-case spellings such as `.Jpg` are ignored.
pub const SUPPORTED_EXTENSIONS: [&str; 6] = ["jpg", "jpeg", "png", "JPG", "JPEG", "PNG"];

/// Ordered list of photos making up one slideshow
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageSource {
    dir: PathBuf,
    images: Vec<PathBuf>,
}

impl ImageSource {
    /// Scan `dir` (non-recursively) for supported images.
    ///
    /// Paths are sorted lexicographically, so `img10.jpg` comes before
    /// `img2.jpg`; zero-pad file names to get numeric ordering.
    pub fn scan<P: AsRef<Path>>(dir: P) -> Result<Self> {
        let dir = dir.as_ref();

        if !dir.is_dir() {
            return Err(SourceError::DirectoryNotFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        let mut images = Vec::new();
        for entry in std::fs::read_dir(dir)? {
            let path = entry?.path();
            if path.is_file() && Self::is_supported(&path) {
                images.push(path);
            } else {
                debug!("Skipping {:?}", path);
            }
        }
        images.sort();

        if images.is_empty() {
            return Err(SourceError::NoImagesFound {
                path: dir.display().to_string(),
            }
            .into());
        }

        debug!("Found {} images in {:?}", images.len(), dir);
        Ok(Self {
            dir: dir.to_path_buf(),
            images,
        })
    }

    /// Check whether a path carries one of the supported extensions.
    /// Dotfiles are skipped the same way a shell glob would skip them.
    pub fn is_supported<P: AsRef<Path>>(path: P) -> bool {
        let path = path.as_ref();
        // Compared as OsStr so names that are not valid UTF-8 still match
        let name = match path.file_name() {
            Some(name) => name,
            None => return false,
        };
        if name.to_string_lossy().starts_with('.') {
            return false;
        }

        path.extension().map_or(false, |ext| {
            SUPPORTED_EXTENSIONS
                .iter()
                .any(|supported| ext == OsStr::new(supported))
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn images(&self) -> &[PathBuf] {
        &self.images
    }

    pub fn len(&self) -> usize {
        self.images.len()
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PathBuf> {
        self.images.iter()
    }
}

/// Decode one photo from disk
pub fn load_image<P: AsRef<Path>>(path: P) -> Result<DynamicImage> {
    let path = path.as_ref();
    image::open(path).map_err(|e| {
        FrameError::DecodeFailed {
            path: path.display().to_string(),
            reason: e.to_string(),
        }
        .into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SlideshowError;
    use image::{Rgb, RgbImage};
    use tempfile::tempdir;

    fn touch_image(dir: &Path, name: &str) {
        RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]))
            .save(dir.join(name))
            .unwrap();
    }

    #[test]
    fn test_lexicographic_not_numeric_order() {
        let dir = tempdir().unwrap();
        touch_image(dir.path(), "img2.jpg");
        touch_image(dir.path(), "img10.jpg");
        touch_image(dir.path(), "img1.png");

        let source = ImageSource::scan(dir.path()).unwrap();
        let names: Vec<_> = source
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();

        assert_eq!(names, vec!["img1.png", "img10.jpg", "img2.jpg"]);
    }

    #[test]
    fn test_extension_set() {
        assert!(ImageSource::is_supported("a.jpg"));
        assert!(ImageSource::is_supported("a.JPEG"));
        assert!(ImageSource::is_supported("a.PNG"));
        assert!(!ImageSource::is_supported("a.Jpg"));
        assert!(!ImageSource::is_supported("a.gif"));
        assert!(!ImageSource::is_supported("notes.txt"));
        assert!(!ImageSource::is_supported(".hidden.jpg"));
    }

    #[cfg(unix)]
    #[test]
    fn test_non_utf8_file_name_is_listed() {
        use std::os::unix::ffi::OsStrExt;

        let dir = tempdir().unwrap();
        let name = OsStr::from_bytes(b"caf\xe9.jpg");
        let path = dir.path().join(name);
        RgbImage::from_pixel(4, 4, Rgb([10, 20, 30]))
            .save_with_format(&path, image::ImageFormat::Jpeg)
            .unwrap();

        assert!(ImageSource::is_supported(&path));
        let source = ImageSource::scan(dir.path()).unwrap();
        assert_eq!(source.images(), &[path][..]);
        assert!(load_image(&source.images()[0]).is_ok());
    }

    #[test]
    fn test_missing_directory() {
        let dir = tempdir().unwrap();
        let missing = dir.path().join("nope");

        let err = ImageSource::scan(&missing).unwrap_err();
        assert!(matches!(
            err,
            SlideshowError::Source(SourceError::DirectoryNotFound { .. })
        ));
        assert!(err.to_string().contains("nope"));
    }

    #[test]
    fn test_directory_without_images() {
        let dir = tempdir().unwrap();
        std::fs::write(dir.path().join("readme.txt"), "hi").unwrap();
        std::fs::create_dir(dir.path().join("nested.jpg")).unwrap();

        let err = ImageSource::scan(dir.path()).unwrap_err();
        assert!(matches!(
            err,
            SlideshowError::Source(SourceError::NoImagesFound { .. })
        ));
    }

    #[test]
    fn test_undecodable_image() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"not a jpeg").unwrap();

        let err = load_image(&path).unwrap_err();
        assert!(matches!(
            err,
            SlideshowError::Frame(FrameError::DecodeFailed { .. })
        ));
    }
}
