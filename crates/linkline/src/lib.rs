//! Hover highlighting of hyperlinks that share a target.
//!
//! Hovering a link draws a line from its center to the center of every other
//! link with the same `href`, on an SVG layer covering the whole document.
//! The highlight stays up while the pointer is over a slightly enlarged hit
//! region placed over the hovered link, and goes away when the pointer
//! leaves it or the hit region is clicked.
//!
//! # Scope
//!
//! - **Geometry** - viewport boxes to document points and hit regions,
//!   fixed-position detection
//! - **Overlay** - the persistent drawing layer and hit region
//! - **Session** - the `Idle`/`Active` state machine, scroll tracking
//! - **Registry** - hyperlink enumeration and same-target lookup
//! - **Bootstrap** - the [`Linkline`] owner that routes host events
//!
//! # Example
//!
//! ```
//! use linkline::{Event, Linkline};
//! use linkline_dom::{ClientRect, Document, Size};
//!
//! let mut doc = Document::new(Size::new(800.0, 600.0));
//! let body = doc.body().unwrap();
//! let a = doc.append_element(body, "a", &[("href", "/x")]);
//! let b = doc.append_element(body, "a", &[("href", "/x")]);
//! doc.set_layout(a, ClientRect { top: 0.0, left: 0.0, bottom: 20.0, right: 100.0 });
//! doc.set_layout(b, ClientRect { top: 200.0, left: 0.0, bottom: 220.0, right: 100.0 });
//!
//! let mut engine = Linkline::new();
//! let _ = engine.dispatch(&mut doc, Event::Ready);
//! let _ = engine.dispatch(&mut doc, Event::PointerEnter { target: a });
//! assert_eq!(engine.overlay().lines(&doc).len(), 1);
//! ```

pub mod bootstrap;
pub mod error;
pub mod geometry;
pub mod markers;
pub mod overlay;
pub mod registry;
pub mod session;
pub mod snapshot;
pub mod subscription;

pub use bootstrap::{Config, Event, Linkline, Navigation};
pub use error::{LinklineError, Result};
pub use geometry::{AnchorMode, AnchoredRect, DocumentPoint, Rect};
pub use markers::Marker;
pub use overlay::Overlay;
pub use session::{ExitReason, HoverSession, SessionState};
pub use snapshot::{OverlaySnapshot, render_svg};
