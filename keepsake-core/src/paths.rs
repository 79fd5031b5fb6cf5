use std::path::{Path, PathBuf};

pub const DATA_FILE: &str = "data.json";
pub const EMBEDDED_DATA_FILE: &str = "data.js";
pub const IMAGES_DIR: &str = "images";
pub const STATE_FILE: &str = "state.json";

pub fn data_path(root: &Path) -> PathBuf {
    root.join(DATA_FILE)
}

pub fn embedded_data_path(root: &Path) -> PathBuf {
    root.join(EMBEDDED_DATA_FILE)
}

/// `{root}/images/{filename}`
pub fn image_path(root: &Path, filename: &str) -> PathBuf {
    root.join(IMAGES_DIR).join(filename)
}

pub fn state_path(root: &Path) -> PathBuf {
    root.join(STATE_FILE)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paths_hang_off_the_gallery_root() {
        let root = Path::new("/srv/gallery");
        assert_eq!(data_path(root), Path::new("/srv/gallery/data.json"));
        assert_eq!(embedded_data_path(root), Path::new("/srv/gallery/data.js"));
        assert_eq!(
            image_path(root, "20260101.webp"),
            Path::new("/srv/gallery/images/20260101.webp")
        );
        assert_eq!(state_path(root), Path::new("/srv/gallery/state.json"));
    }
}
