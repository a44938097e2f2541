//! Errors raised inside the engine.
//!
//! None of these reach the host: the bootstrap reports them as warnings and
//! leaves the hover session idle.

use linkline_dom::NodeId;
use thiserror::Error;

/// Failure of a single engine step.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LinklineError {
    /// The node was removed from the document, or was never laid out.
    #[error("node {0:?} is not part of the laid-out document")]
    StaleElement(NodeId),
    /// The node is not an `a`/`area` element.
    #[error("node {0:?} is not a hyperlink")]
    NotAHyperlink(NodeId),
    /// The overlay layer was removed from the document by the host.
    #[error("overlay layer is not attached to the document")]
    OverlayMissing,
}

/// Result alias for engine steps.
pub type Result<T> = std::result::Result<T, LinklineError>;
