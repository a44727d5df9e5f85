//! Rendering boundary
//!
//! The shadow root owns the card's markup. Styles inside it are scoped with
//! `:host` selectors, and the host page can only read the markup as a whole;
//! there is no way to reach in and restyle or patch individual nodes.

/// Encapsulated markup of one card
#[derive(Debug, Default)]
pub struct ShadowRoot {
    inner_html: String,
    click_listener: bool,
}

impl ShadowRoot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current markup
    pub fn inner_html(&self) -> &str {
        &self.inner_html
    }

    /// Replace the markup wholesale
    pub(crate) fn set_inner_html(&mut self, html: String) {
        self.inner_html = html;
    }

    /// Install the delegated click listener; returns false if already installed
    pub(crate) fn install_click_listener(&mut self) -> bool {
        !std::mem::replace(&mut self.click_listener, true)
    }

    pub fn has_click_listener(&self) -> bool {
        self.click_listener
    }
}
