//! Full-screen image preview overlay state.

/// Overlay showing one image at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImagePreview {
    src: Option<String>,
}

impl ImagePreview {
    /// Open on image activation. Replaces any open image.
    pub fn open(&mut self, src: impl Into<String>) {
        self.src = Some(src.into());
    }

    pub fn close(&mut self) {
        self.src = None;
    }

    /// Click on the backdrop around the image.
    pub fn click_backdrop(&mut self) {
        self.close();
    }

    pub fn is_open(&self) -> bool {
        self.src.is_some()
    }

    pub fn src(&self) -> Option<&str> {
        self.src.as_deref()
    }
}
