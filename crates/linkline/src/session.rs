//! The hover session state machine.
//!
//! ```text
//!            hover-entry(L)                    scroll
//!   ┌──────┐ ─────────────▶ ┌────────┐ ◀────────────────┐
//!   │ Idle │                │ Active │ ─────────────────┘
//!   └──────┘ ◀───────────── └────────┘
//!        leave / activate / early exit
//! ```
//!
//! A hover entry while `Active` exits the current session before building
//! the next one, so at most one session exists at any time. The scroll
//! listener lives exactly as long as the `Active` state.

use linkline_common::warning::warn_once;
use linkline_dom::{ClientRect, Document, NodeId, ScrollOffset};

use crate::error::{LinklineError, Result};
use crate::geometry::{self, AnchorMode, AnchoredRect, DocumentPoint};
use crate::overlay::Overlay;
use crate::registry;
use crate::subscription::OneShot;

/// Why a session ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitReason {
    /// The pointer left the hit region.
    Leave,
    /// The hit region's link was activated.
    Activated,
    /// The first pointer move after entry was already outside the link.
    EarlyExit,
    /// A hover entry on another link replaced the session.
    Replaced,
}

/// A line drawn for the current session.
#[derive(Debug, Clone, PartialEq)]
pub struct DrawnLine {
    /// The `<line>` node in the overlay layer.
    pub node: NodeId,
    /// The link the far end points at.
    pub target: NodeId,
    /// Center of the hovered link.
    pub from: DocumentPoint,
    /// Center of the target link.
    pub to: DocumentPoint,
    /// The target is fixed-positioned; `to` follows the scroll offset.
    pub fixed_endpoint: bool,
}

/// State of a live highlight.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveSession {
    /// The hovered link.
    pub hovered: NodeId,
    /// Its target string.
    pub href: String,
    /// Its box and anchoring at entry.
    pub anchor: AnchoredRect,
    /// Its center in document coordinates.
    pub center: DocumentPoint,
    /// Scroll offset the line endpoints are currently valid for.
    pub baseline: ScrollOffset,
    /// Lines drawn to every other link with the same target.
    pub lines: Vec<DrawnLine>,
    early_exit: OneShot<ClientRect>,
}

/// `Idle` or `Active`.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// Nothing highlighted; the overlay is hidden and holds no lines.
    #[default]
    Idle,
    /// A link is highlighted.
    Active(ActiveSession),
}

/// Drives highlight episodes against one overlay.
#[derive(Debug)]
pub struct HoverSession {
    state: SessionState,
    last_exit: Option<ExitReason>,
    hit_region_pad: f32,
    max_ancestor_depth: usize,
}

impl HoverSession {
    /// An idle session padding hit regions by `hit_region_pad`.
    #[must_use]
    pub const fn new(hit_region_pad: f32, max_ancestor_depth: usize) -> Self {
        Self {
            state: SessionState::Idle,
            last_exit: None,
            hit_region_pad,
            max_ancestor_depth,
        }
    }

    /// Current state.
    #[must_use]
    pub const fn state(&self) -> &SessionState {
        &self.state
    }

    /// How the most recent session ended.
    #[must_use]
    pub const fn last_exit(&self) -> Option<ExitReason> {
        self.last_exit
    }

    /// Whether a link is highlighted.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self.state, SessionState::Active(_))
    }

    /// Whether the scroll listener is registered. Only while `Active`.
    #[must_use]
    pub const fn listens_for_scroll(&self) -> bool {
        self.is_active()
    }

    /// The hovered link of the active session.
    #[must_use]
    pub const fn hovered(&self) -> Option<NodeId> {
        match &self.state {
            SessionState::Active(active) => Some(active.hovered),
            SessionState::Idle => None,
        }
    }

    /// Lines of the active session; empty when idle.
    #[must_use]
    pub fn lines(&self) -> &[DrawnLine] {
        match &self.state {
            SessionState::Active(active) => active.lines.as_slice(),
            SessionState::Idle => &[],
        }
    }

    /// Idle → Active on hover entry over `link`.
    ///
    /// Any active session is torn down first, even if building the new one
    /// fails.
    ///
    /// # Errors
    ///
    /// [`LinklineError::NotAHyperlink`] if `link` is not an `a`/`area` element, and
    /// [`LinklineError::StaleElement`] if it is detached or not laid out.
    /// The session is `Idle` afterwards in both cases. A link whose `href`
    /// is empty or was removed still enters: it just has no targets.
    pub fn enter(
        &mut self,
        doc: &mut Document,
        overlay: &mut Overlay,
        link: NodeId,
    ) -> Result<()> {
        if self.is_active() {
            self.exit(doc, overlay, ExitReason::Replaced);
        }

        let href = doc
            .tree()
            .as_element(link)
            .filter(|e| e.is_link_element())
            .ok_or(LinklineError::NotAHyperlink(link))?
            .href()
            .unwrap_or_default()
            .to_string();
        let anchor = geometry::measure(doc, link, self.max_ancestor_depth)?;
        let scroll = doc.scroll();
        let center = geometry::center_of(anchor.rect, scroll);

        let mut lines = Vec::new();
        for target in registry::same_target_links(doc, overlay, link, &href) {
            let measured = match geometry::measure(doc, target, self.max_ancestor_depth) {
                Ok(measured) => measured,
                Err(err) => {
                    warn_once("Session", &format!("{err}; no line drawn"));
                    continue;
                }
            };
            let to = geometry::center_of(measured.rect, scroll);
            let fixed_endpoint = measured.mode == AnchorMode::Fixed;
            let node = overlay.draw_line(doc, center, to, fixed_endpoint);
            lines.push(DrawnLine {
                node,
                target,
                from: center,
                to,
                fixed_endpoint,
            });
        }

        let region = geometry::buffered_rect(
            geometry::document_rect(anchor.rect, scroll),
            self.hit_region_pad,
        );
        overlay.position_hit_region(doc, region);
        overlay.set_hit_target(doc, &href);

        let mut early_exit = OneShot::new();
        early_exit.register(anchor.rect);

        #[cfg(feature = "session-trace")]
        eprintln!(
            "[SESSION] enter {link:?} href={href:?} lines={} hovered={}",
            lines.len(),
            anchor.mode
        );

        self.state = SessionState::Active(ActiveSession {
            hovered: link,
            href,
            anchor,
            center,
            baseline: scroll,
            lines,
            early_exit,
        });
        overlay.show(doc);
        Ok(())
    }

    /// Active: shifts the far end of every fixed-endpoint line by the scroll
    /// delta since the last tick.
    ///
    /// The hovered end is left alone even when the hovered link is itself
    /// fixed-positioned. While a line's target is out of the document its
    /// drawn line is left as is, but the delta is still tracked so the line
    /// is right again once the target returns.
    pub fn scroll(&mut self, doc: &mut Document, overlay: &Overlay) {
        let SessionState::Active(active) = &mut self.state else {
            return;
        };
        let now = doc.scroll();
        let dx = now.x - active.baseline.x;
        let dy = now.y - active.baseline.y;

        for line in active.lines.iter_mut().filter(|line| line.fixed_endpoint) {
            line.to = DocumentPoint {
                x: line.to.x + dx,
                y: line.to.y + dy,
            };
            if !doc.tree().is_connected(line.target) {
                warn_once(
                    "Session",
                    &format!(
                        "{}; scroll adjustment skipped",
                        LinklineError::StaleElement(line.target)
                    ),
                );
                continue;
            }
            if let Err(err) = overlay.move_line(doc, line.node, line.from, line.to) {
                warn_once("Session", &format!("{err}; scroll adjustment skipped"));
            }
        }
        active.baseline = now;
    }

    /// Active: the first pointer move after entry ends the session if it is
    /// outside the hovered link's unbuffered box (viewport coordinates).
    ///
    /// Covers the pointer leaving the link before the hit region could see
    /// it leave. Returns whether the session ended.
    pub fn pointer_moved(
        &mut self,
        doc: &mut Document,
        overlay: &mut Overlay,
        x: f32,
        y: f32,
    ) -> bool {
        let SessionState::Active(active) = &mut self.state else {
            return false;
        };
        match active.early_exit.fire() {
            Some(rect) if !rect.contains(x, y) => {
                self.exit(doc, overlay, ExitReason::EarlyExit);
                true
            }
            _ => false,
        }
    }

    /// Active → Idle: the pointer left the hit region.
    pub fn leave(&mut self, doc: &mut Document, overlay: &mut Overlay) {
        if self.is_active() {
            self.exit(doc, overlay, ExitReason::Leave);
        }
    }

    /// Active → Idle: the hit region's link was activated. Returns the
    /// target to follow.
    pub fn activate(&mut self, doc: &mut Document, overlay: &mut Overlay) -> Option<String> {
        let href = match &self.state {
            SessionState::Active(active) => active.href.clone(),
            SessionState::Idle => return None,
        };
        self.exit(doc, overlay, ExitReason::Activated);
        Some(href)
    }

    fn exit(&mut self, doc: &mut Document, overlay: &mut Overlay, reason: ExitReason) {
        #[cfg(feature = "session-trace")]
        eprintln!("[SESSION] exit {:?} ({reason:?})", self.hovered());

        overlay.hide(doc);
        self.state = SessionState::Idle;
        self.last_exit = Some(reason);
    }
}
