// 🖼️ Assets - resolve illustrative images under the assets directory
//
// The terminal cannot draw images; the UI reports which file a page would
// show and whether it is present.

use std::path::{Path, PathBuf};

use crate::locations::{Location, RouteTable};

#[derive(Debug, Clone, PartialEq)]
pub enum MapPreview {
    /// Route has an image and the file exists
    Image(PathBuf),

    /// Route has an image name but the file is missing
    Missing(PathBuf),

    /// No image registered for this pair
    NoImage { start: Location, end: Location },
}

#[derive(Debug, Clone)]
pub struct Assets {
    base_dir: PathBuf,
}

impl Assets {
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Self {
        Assets {
            base_dir: base_dir.as_ref().to_path_buf(),
        }
    }

    pub fn base_dir(&self) -> &Path {
        &self.base_dir
    }

    pub fn path(&self, filename: &str) -> PathBuf {
        self.base_dir.join(filename)
    }

    pub fn exists(&self, filename: &str) -> bool {
        self.path(filename).is_file()
    }

    pub fn route_map(&self, routes: &RouteTable, start: Location, end: Location) -> MapPreview {
        match routes.route_image(start, end) {
            Some(file) => {
                let path = self.path(file);
                if path.is_file() {
                    MapPreview::Image(path)
                } else {
                    tracing::debug!(?path, "route image not found");
                    MapPreview::Missing(path)
                }
            }
            None => MapPreview::NoImage { start, end },
        }
    }
}
