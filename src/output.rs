//! PNG output and output directory management

use image::RgbaImage;
use std::io;
use std::path::{Path, PathBuf};

/// Error type for output operations
#[derive(Debug)]
pub enum OutputError {
    /// IO error during file operations
    Io(io::Error),
    /// Image encoding error
    Image(image::ImageError),
    /// The output directory already holds a recorded run
    AlreadyRecorded(PathBuf),
}

impl std::fmt::Display for OutputError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputError::Io(e) => write!(f, "IO error: {}", e),
            OutputError::Image(e) => write!(f, "Image error: {}", e),
            OutputError::AlreadyRecorded(path) => write!(
                f,
                "output directory {} already exists, delete it to record again",
                path.display()
            ),
        }
    }
}

impl std::error::Error for OutputError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OutputError::Io(e) => Some(e),
            OutputError::Image(e) => Some(e),
            OutputError::AlreadyRecorded(_) => None,
        }
    }
}

impl From<io::Error> for OutputError {
    fn from(e: io::Error) -> Self {
        OutputError::Io(e)
    }
}

impl From<image::ImageError> for OutputError {
    fn from(e: image::ImageError) -> Self {
        OutputError::Image(e)
    }
}

/// Save an RGBA image to a PNG file.
///
/// # Arguments
///
/// * `image` - The image to save
/// * `path` - The output file path
///
/// # Returns
///
/// * `Ok(())` on success
/// * `Err(OutputError)` on failure
pub fn save_png(image: &RgbaImage, path: &Path) -> Result<(), OutputError> {
    // Create parent directories if they don't exist
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }

    image.save(path)?;
    Ok(())
}

/// Claim an output directory for a new recording.
///
/// A run writes into a directory that did not exist when it started. If the
/// directory is already present it belongs to an earlier recording and the
/// claim fails without touching its contents.
pub fn claim_dir(path: &Path) -> Result<(), OutputError> {
    if path.exists() {
        return Err(OutputError::AlreadyRecorded(path.to_path_buf()));
    }
    std::fs::create_dir_all(path)?;
    Ok(())
}

/// Remove a partially written output directory.
///
/// Used when a run fails after claiming its directory, so a half-finished
/// recording does not block the next attempt. Cleanup failures are ignored.
pub fn discard_dir(path: &Path) {
    let _ = std::fs::remove_dir_all(path);
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;
    use tempfile::tempdir;

    #[test]
    fn test_save_png_basic() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("test.png");

        // Create a simple 2x2 image
        let mut image = RgbaImage::new(2, 2);
        image.put_pixel(0, 0, Rgba([255, 0, 0, 255])); // Red
        image.put_pixel(1, 0, Rgba([0, 255, 0, 255])); // Green
        image.put_pixel(0, 1, Rgba([0, 0, 255, 255])); // Blue
        image.put_pixel(1, 1, Rgba([0, 0, 0, 0])); // Transparent

        let result = save_png(&image, &path);
        assert!(result.is_ok());
        assert!(path.exists());

        // Read it back and verify
        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.width(), 2);
        assert_eq!(loaded.height(), 2);
        assert_eq!(*loaded.get_pixel(0, 0), Rgba([255, 0, 0, 255]));
        assert_eq!(*loaded.get_pixel(1, 0), Rgba([0, 255, 0, 255]));
        assert_eq!(*loaded.get_pixel(0, 1), Rgba([0, 0, 255, 255]));
        assert_eq!(*loaded.get_pixel(1, 1), Rgba([0, 0, 0, 0]));
    }

    #[test]
    fn test_save_png_creates_parent_dirs() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested/dirs/test.png");

        let image = RgbaImage::new(1, 1);
        let result = save_png(&image, &path);

        assert!(result.is_ok());
        assert!(path.exists());
    }

    #[test]
    fn test_claim_dir_creates_fresh_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("13.2->13.3");

        let result = claim_dir(&target);
        assert!(result.is_ok());
        assert!(target.is_dir());
    }

    #[test]
    fn test_claim_dir_creates_intermediate_dirs() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("EmojisOverTime/Apple");

        let result = claim_dir(&target);
        assert!(result.is_ok());
        assert!(target.is_dir());
    }

    #[test]
    fn test_claim_dir_rejects_existing_directory() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("recorded");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("kept.png"), b"sentinel").unwrap();

        let err = claim_dir(&target).unwrap_err();
        match err {
            OutputError::AlreadyRecorded(path) => assert_eq!(path, target),
            other => panic!("expected AlreadyRecorded, got {:?}", other),
        }

        // The earlier recording is left untouched
        assert_eq!(std::fs::read(target.join("kept.png")).unwrap(), b"sentinel");
    }

    #[test]
    fn test_already_recorded_message_names_directory() {
        let err = OutputError::AlreadyRecorded(PathBuf::from("/tmp/out/13.2->13.3"));
        let message = err.to_string();
        assert!(message.contains("/tmp/out/13.2->13.3"));
        assert!(message.contains("delete it to record again"));
    }

    #[test]
    fn test_discard_dir_removes_contents() {
        let dir = tempdir().unwrap();
        let target = dir.path().join("partial");
        std::fs::create_dir(&target).unwrap();
        std::fs::write(target.join("half.png"), b"partial").unwrap();

        discard_dir(&target);
        assert!(!target.exists());
    }

    #[test]
    fn test_discard_dir_ignores_missing_directory() {
        let dir = tempdir().unwrap();
        discard_dir(&dir.path().join("never-claimed"));
    }
}
