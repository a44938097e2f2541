//! Wiring between the host's events and the engine.
//!
//! [`Linkline`] is the one object that owns the overlay, the link registry
//! and the hover session. The host constructs it once per page and routes
//! every relevant event through [`Linkline::dispatch`].

use linkline_common::warning::{clear_warnings, warn_once};
use linkline_dom::{Document, NodeId};

use crate::overlay::Overlay;
use crate::registry::LinkRegistry;
use crate::session::HoverSession;

/// Tunables.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    /// Margin added around the hovered link's box to form the hit region.
    pub hit_region_pad: f32,
    /// Bound on the ancestor walk that detects fixed positioning.
    pub max_ancestor_depth: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hit_region_pad: 2.0,
            max_ancestor_depth: 512,
        }
    }
}

/// Host events the engine reacts to.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Event {
    /// `DOMContentLoaded`: attach handlers and create the overlay.
    Ready,
    /// `load`: the document may have grown.
    Load,
    /// `resize` on the window.
    Resize,
    /// `mouseenter` on `target`.
    PointerEnter {
        /// Element entered.
        target: NodeId,
    },
    /// `mousemove` at viewport coordinates.
    PointerMove {
        /// Horizontal viewport coordinate.
        x: f32,
        /// Vertical viewport coordinate.
        y: f32,
    },
    /// `mouseleave` on `target`.
    PointerLeave {
        /// Element left.
        target: NodeId,
    },
    /// `click` on `target`.
    Click {
        /// Element activated.
        target: NodeId,
    },
    /// `scroll` on the window; the new offset is read from the document.
    Scroll,
}

/// A link the host should follow after the hit region was activated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// The hovered link's target string.
    pub href: String,
}

/// Owner of the overlay, registry and session for one page.
#[derive(Debug)]
pub struct Linkline {
    overlay: Overlay,
    registry: LinkRegistry,
    session: HoverSession,
}

impl Linkline {
    /// Engine with default [`Config`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    /// Engine with explicit tunables.
    #[must_use]
    pub fn with_config(config: Config) -> Self {
        Self {
            overlay: Overlay::new(),
            registry: LinkRegistry::new(),
            session: HoverSession::new(config.hit_region_pad, config.max_ancestor_depth),
        }
    }

    /// The overlay.
    #[must_use]
    pub const fn overlay(&self) -> &Overlay {
        &self.overlay
    }

    /// The link registry.
    #[must_use]
    pub const fn registry(&self) -> &LinkRegistry {
        &self.registry
    }

    /// The hover session.
    #[must_use]
    pub const fn session(&self) -> &HoverSession {
        &self.session
    }

    /// Re-runs handler attachment so links inserted since [`Event::Ready`]
    /// are covered.
    pub fn reattach(&mut self, doc: &Document) {
        self.registry.attach_hover_handlers(doc, &self.overlay);
    }

    /// Routes one host event. Returns a navigation when the hit region's
    /// link was activated.
    pub fn dispatch(&mut self, doc: &mut Document, event: Event) -> Option<Navigation> {
        match event {
            Event::Ready => {
                clear_warnings();
                let _ = self.overlay.ensure_initialized(doc);
                self.registry.attach_hover_handlers(doc, &self.overlay);
            }
            Event::Load | Event::Resize => {
                let _ = self.overlay.ensure_initialized(doc);
            }
            Event::PointerEnter { target } => {
                if !self.registry.handles(target) {
                    return None;
                }
                if let Err(err) = self.session.enter(doc, &mut self.overlay, target) {
                    warn_once("Linkline", &format!("hover ignored: {err}"));
                }
            }
            Event::PointerMove { x, y } => {
                let _ = self.session.pointer_moved(doc, &mut self.overlay, x, y);
            }
            Event::PointerLeave { target } => {
                if self.is_hit_region(target) {
                    self.session.leave(doc, &mut self.overlay);
                }
            }
            Event::Click { target } => {
                if self.is_hit_region(target) {
                    return self
                        .session
                        .activate(doc, &mut self.overlay)
                        .map(|href| Navigation { href });
                }
            }
            Event::Scroll => self.session.scroll(doc, &self.overlay),
        }
        None
    }

    fn is_hit_region(&self, target: NodeId) -> bool {
        self.overlay
            .nodes()
            .is_some_and(|nodes| target == nodes.hit_region || target == nodes.hit_region_link)
    }
}

impl Default for Linkline {
    fn default() -> Self {
        Self::new()
    }
}
