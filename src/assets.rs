//! Image preloading.
//!
//! Every distinct image path gets one iced handle, created up front so the
//! view never touches the filesystem. Natural dimensions are probed off the
//! UI thread and only used to size the hover preview.

use iced::widget::image::Handle;
use neonfolio_core::Size;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Largest preview popup.
pub const MAX_PREVIEW: Size = Size {
    width: 480.0,
    height: 360.0,
};
/// Used when an image cannot be probed.
pub const FALLBACK_PREVIEW: Size = Size {
    width: 400.0,
    height: 300.0,
};

pub fn preview_size(natural: Option<Size>) -> Size {
    natural
        .map(|size| size.fit_within(MAX_PREVIEW))
        .unwrap_or(FALLBACK_PREVIEW)
}

/// Read image headers for each distinct path.
pub fn probe_dimensions(paths: Vec<PathBuf>) -> Vec<(PathBuf, Option<Size>)> {
    let mut seen = HashMap::new();
    for path in paths {
        if seen.contains_key(&path) {
            continue;
        }
        let size = match image::image_dimensions(&path) {
            Ok((width, height)) => Some(Size::new(width as f32, height as f32)),
            Err(err) => {
                warn!(path = %path.display(), "Could not read image dimensions: {err}");
                None
            }
        };
        seen.insert(path, size);
    }
    debug!(count = seen.len(), "Probed image dimensions");
    seen.into_iter().collect()
}

#[derive(Debug, Default)]
pub struct ImageCache {
    handles: HashMap<PathBuf, Handle>,
    sizes: HashMap<PathBuf, Option<Size>>,
}

impl ImageCache {
    pub fn preload<'a>(paths: impl IntoIterator<Item = &'a Path>) -> Self {
        let mut handles = HashMap::new();
        for path in paths {
            handles
                .entry(path.to_path_buf())
                .or_insert_with(|| Handle::from_path(path));
        }
        Self {
            handles,
            sizes: HashMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.handles.len()
    }

    pub fn handle(&self, path: &Path) -> Option<Handle> {
        self.handles.get(path).cloned()
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.handles.keys().cloned().collect()
    }

    pub fn record_sizes(&mut self, probed: Vec<(PathBuf, Option<Size>)>) {
        self.sizes.extend(probed);
    }

    pub fn preview_size(&self, path: &Path) -> Size {
        preview_size(self.sizes.get(path).copied().flatten())
    }
}
