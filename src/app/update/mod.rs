use std::path::PathBuf;

mod appearance;
mod core;
#[cfg(test)]
mod fixtures;
mod frame;
mod navigation;
mod pointer;
mod scroll;

/// Describes work that must be performed outside the pure reducer.
#[derive(Debug, Clone, PartialEq)]
pub(super) enum Effect {
    /// Snap the page scrollable to an absolute offset.
    ScrollTo(f32),
    ProbeImages(Vec<PathBuf>),
}
