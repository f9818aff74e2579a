//! Fullscreen image viewer with page scroll lock.

use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewerClick {
    /// The dark area around the image.
    Backdrop,
    /// The image itself; never closes the viewer.
    Content,
    CloseButton,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewerEffect<S> {
    Open(S),
    Close,
    LockScroll,
    UnlockScroll,
}

#[derive(Debug)]
pub struct FullscreenViewer<S> {
    showing: Option<S>,
}

impl<S> Default for FullscreenViewer<S> {
    fn default() -> Self {
        Self { showing: None }
    }
}

impl<S: Clone> FullscreenViewer<S> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_open(&self) -> bool {
        self.showing.is_some()
    }

    pub fn showing(&self) -> Option<&S> {
        self.showing.as_ref()
    }

    /// Opening over an open viewer swaps the image and keeps the lock.
    pub fn open(&mut self, source: S) -> Vec<ViewerEffect<S>> {
        let was_open = self.showing.replace(source.clone()).is_some();
        debug!(was_open, "viewer open");
        let mut effects = vec![ViewerEffect::Open(source)];
        if !was_open {
            effects.push(ViewerEffect::LockScroll);
        }
        effects
    }

    pub fn close(&mut self) -> Vec<ViewerEffect<S>> {
        if self.showing.take().is_none() {
            return Vec::new();
        }
        debug!("viewer closed");
        vec![ViewerEffect::Close, ViewerEffect::UnlockScroll]
    }

    pub fn on_escape(&mut self) -> Vec<ViewerEffect<S>> {
        self.close()
    }

    pub fn on_click(&mut self, target: ViewerClick) -> Vec<ViewerEffect<S>> {
        match target {
            ViewerClick::Backdrop | ViewerClick::CloseButton => self.close(),
            ViewerClick::Content => Vec::new(),
        }
    }
}
