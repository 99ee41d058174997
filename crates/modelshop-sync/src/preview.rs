//! Preview scene boundary
//!
//! The renderer sits outside this crate; it receives either a
//! resolved asset URL or an instruction to draw its built-in
//! placeholder scene. A renderer that fails to load the asset
//! degrades on its own side; nothing here can crash from it.

/// What the preview pane should display
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PreviewScene {
    /// Render the asset at the given URL
    Asset {
        /// Public URL of the primary asset
        url: String,
        /// Display name for the overlay
        name: String,
    },
    /// No model is selected; render the placeholder scene
    Placeholder,
}

impl PreviewScene {
    /// Whether this is the placeholder scene
    pub fn is_placeholder(&self) -> bool {
        matches!(self, PreviewScene::Placeholder)
    }
}
