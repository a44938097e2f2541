//! Structural markers placed on overlay nodes.
//!
//! These are the hooks external stylesheets target; their spelling never
//! changes while a page is alive.

use strum_macros::{Display, EnumIter, IntoStaticStr};

/// An id or class name carried by an overlay node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumIter, IntoStaticStr)]
pub enum Marker {
    /// `id` of the drawing layer.
    #[strum(serialize = "-linkline-layer")]
    Layer,
    /// `id` of the link wrapping the hit region.
    #[strum(serialize = "-linkline-hitbox-link")]
    HitRegionLink,
    /// `id` of the hit region.
    #[strum(serialize = "-linkline-hitbox")]
    HitRegion,
    /// `class` of every drawn line.
    #[strum(serialize = "-linkline-linkline")]
    Line,
    /// Additional `class` of lines whose far end is scroll-adjusted.
    #[strum(serialize = "-linkline-fixed-endpoint")]
    FixedEndpoint,
}

impl Marker {
    /// The marker text.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        self.into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use strum::IntoEnumIterator;

    use super::*;

    #[test]
    fn test_markers_are_unique_and_prefixed() {
        let names: HashSet<&str> = Marker::iter().map(Marker::as_str).collect();
        assert_eq!(names.len(), Marker::iter().count());
        assert!(names.iter().all(|n| n.starts_with("-linkline-")));
        assert_eq!(Marker::Layer.to_string(), "-linkline-layer");
    }
}
