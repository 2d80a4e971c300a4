//! The page's single image overlay.
//!
//! ```text
//!            open(src, caption)
//!   Closed ─────────────────────▶ Open { src, caption }
//!     ▲                              │  open(..) replaces content
//!     │  CloseButton                 │
//!     │  Background (target = overlay itself)
//!     └───────── Escape ◀────────────┘
//! ```
//!
//! Pages are generated with the overlay closed. In the browser the embedded
//! `static/site.js` drives the markup produced by [`Lightbox::render`] and
//! must mirror [`Lightbox::open`] and [`Lightbox::handle`], including what a
//! close clears. `tests/browser_site.rs` checks the script against these
//! transitions. Triggers carry `data-lightbox-src` and
//! `data-lightbox-caption` attributes and get one listener each.

use maud::{Markup, html};

/// Element ids shared by the overlay markup and the page script.
pub const OVERLAY_ID: &str = "lightbox";
pub const IMAGE_ID: &str = "lightboxImage";
pub const CAPTION_ID: &str = "lightboxCaption";
pub const CLOSE_ID: &str = "lightboxClose";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Lightbox {
    #[default]
    Closed,
    Open {
        src: String,
        caption: String,
    },
}

/// Input events that can close the overlay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LightboxEvent {
    CloseButton,
    /// A click inside the overlay. Only a click whose target is the overlay
    /// element itself (the backdrop) closes it.
    Click { on_backdrop: bool },
    Key(Key),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Key {
    Escape,
    Other,
}

impl Lightbox {
    pub fn new() -> Self {
        Self::Closed
    }

    /// Show `src` with `caption`, replacing whatever is displayed.
    pub fn open(&mut self, src: impl Into<String>, caption: impl Into<String>) {
        *self = Lightbox::Open {
            src: src.into(),
            caption: caption.into(),
        };
    }

    pub fn close(&mut self) {
        *self = Lightbox::Closed;
    }

    /// Apply an input event. Returns true if the overlay closed.
    pub fn handle(&mut self, event: LightboxEvent) -> bool {
        if !self.is_open() {
            return false;
        }
        let closes = match event {
            LightboxEvent::CloseButton => true,
            LightboxEvent::Click { on_backdrop } => on_backdrop,
            LightboxEvent::Key(key) => key == Key::Escape,
        };
        if closes {
            self.close();
        }
        closes
    }

    pub fn is_open(&self) -> bool {
        matches!(self, Lightbox::Open { .. })
    }

    /// Displayed image source; empty when closed.
    pub fn src(&self) -> &str {
        match self {
            Lightbox::Open { src, .. } => src,
            Lightbox::Closed => "",
        }
    }

    /// Displayed caption; empty when closed.
    pub fn caption(&self) -> &str {
        match self {
            Lightbox::Open { caption, .. } => caption,
            Lightbox::Closed => "",
        }
    }

    /// Overlay markup for the current state.
    pub fn render(&self) -> Markup {
        let open = self.is_open();
        let aria_hidden = if open { "false" } else { "true" };
        html! {
            div.lightbox.open[open] id=(OVERLAY_ID) aria-hidden=(aria_hidden) role="dialog" aria-modal="true" {
                div.lightbox-content {
                    button.lightbox-close id=(CLOSE_ID) type="button" aria-label="Close" { "×" }
                    img id=(IMAGE_ID) src=(self.src()) alt="";
                    p.lightbox-caption id=(CAPTION_ID) { (self.caption()) }
                }
            }
        }
    }
}
