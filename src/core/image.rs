//! # Image Resolution
//!
//! Event images are opaque locators. An `ImageSource` decides whether a
//! locator resolves; the UI only ever asks "did it load?" through an
//! `ImageState` owned by a single rendering instance (one card, or the detail
//! overlay). A failure is never propagated past that instance.

use std::fmt;
use std::fs;
use std::path::PathBuf;

/// What the UI needs to know about an image that did resolve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageInfo {
    pub file_name: String,
    pub size_bytes: u64,
}

#[derive(Debug)]
pub enum ImageError {
    /// Locator scheme this source can't fetch (e.g. `https://`)
    Unsupported(String),
    NotFound(PathBuf),
    Io(std::io::Error),
}

impl fmt::Display for ImageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageError::Unsupported(locator) => write!(f, "unsupported image locator: {locator}"),
            ImageError::NotFound(path) => write!(f, "image not found: {}", path.display()),
            ImageError::Io(e) => write!(f, "image I/O error: {e}"),
        }
    }
}

impl std::error::Error for ImageError {}

/// Resolves image locators.
pub trait ImageSource {
    fn resolve(&self, locator: &str) -> Result<ImageInfo, ImageError>;
}

/// Resolves locators as files, relative to an optional asset directory.
///
/// Leading slashes are stripped when an asset directory is set, so
/// `/img/a.png` resolves to `<asset_dir>/img/a.png`.
pub struct FileImageSource {
    asset_dir: Option<PathBuf>,
}

impl FileImageSource {
    pub fn new(asset_dir: Option<PathBuf>) -> Self {
        Self { asset_dir }
    }

    fn path_for(&self, locator: &str) -> PathBuf {
        match &self.asset_dir {
            Some(dir) => dir.join(locator.trim_start_matches('/')),
            None => PathBuf::from(locator),
        }
    }
}

impl ImageSource for FileImageSource {
    fn resolve(&self, locator: &str) -> Result<ImageInfo, ImageError> {
        if locator.contains("://") {
            return Err(ImageError::Unsupported(locator.to_string()));
        }

        let path = self.path_for(locator);
        let metadata = match fs::metadata(&path) {
            Ok(m) => m,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ImageError::NotFound(path));
            }
            Err(e) => return Err(ImageError::Io(e)),
        };
        if !metadata.is_file() {
            return Err(ImageError::NotFound(path));
        }

        let file_name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| locator.to_string());

        Ok(ImageInfo {
            file_name,
            size_bytes: metadata.len(),
        })
    }
}

/// Per-instance image load state.
///
/// Each card and the detail overlay own one of these. Nothing else reads or
/// writes it, so one instance failing never changes another.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImageState {
    info: Option<ImageInfo>,
    load_failed: bool,
}

impl ImageState {
    /// Attempts to resolve `locator`, recording a failure locally.
    pub fn load(source: &dyn ImageSource, locator: &str) -> Self {
        let mut state = Self::default();
        match source.resolve(locator) {
            Ok(info) => state.info = Some(info),
            Err(_) => state.report_load_failure(),
        }
        state
    }

    pub fn has_load_failed(&self) -> bool {
        self.load_failed
    }

    /// Switches this instance to its fallback visual.
    pub fn report_load_failure(&mut self) {
        self.load_failed = true;
        self.info = None;
    }

    /// The resolved image, unless loading failed.
    pub fn info(&self) -> Option<&ImageInfo> {
        self.info.as_ref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_resolves_file_under_asset_dir() {
        let dir = tempfile::tempdir().unwrap();
        let img_dir = dir.path().join("img");
        fs::create_dir_all(&img_dir).unwrap();
        let mut file = fs::File::create(img_dir.join("poster.png")).unwrap();
        file.write_all(b"not really a png").unwrap();

        let source = FileImageSource::new(Some(dir.path().to_path_buf()));
        let info = source.resolve("/img/poster.png").unwrap();
        assert_eq!(info.file_name, "poster.png");
        assert_eq!(info.size_bytes, 16);
    }

    #[test]
    fn test_missing_file_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let source = FileImageSource::new(Some(dir.path().to_path_buf()));
        let err = source.resolve("/api/placeholder/800/600").unwrap_err();
        assert!(matches!(err, ImageError::NotFound(_)));
    }

    #[test]
    fn test_directory_is_not_an_image() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("folder")).unwrap();
        let source = FileImageSource::new(Some(dir.path().to_path_buf()));
        assert!(matches!(
            source.resolve("folder"),
            Err(ImageError::NotFound(_))
        ));
    }

    #[test]
    fn test_remote_locator_unsupported() {
        let source = FileImageSource::new(None);
        let err = source.resolve("https://example.com/a.png").unwrap_err();
        assert!(matches!(err, ImageError::Unsupported(_)));
        assert!(err.to_string().contains("https://example.com/a.png"));
    }

    #[test]
    fn test_image_state_records_failure() {
        let source = FileImageSource::new(None);
        let state = ImageState::load(&source, "/definitely/not/here.png");
        assert!(state.has_load_failed());
        assert!(state.info().is_none());
    }

    #[test]
    fn test_report_load_failure_switches_to_fallback() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.png"), b"x").unwrap();
        let source = FileImageSource::new(Some(dir.path().to_path_buf()));

        let mut state = ImageState::load(&source, "a.png");
        assert!(!state.has_load_failed());
        assert!(state.info().is_some());

        state.report_load_failure();
        assert!(state.has_load_failed());
        assert!(state.info().is_none());
    }
}
