//! Single-use subscriptions.

/// A listener that fires at most once.
///
/// Registering arms it with a payload; the first [`OneShot::fire`] hands the
/// payload out and leaves it disarmed, so later events fall through.
#[derive(Debug, Clone, PartialEq)]
pub struct OneShot<T> {
    armed: Option<T>,
}

impl<T> OneShot<T> {
    /// A disarmed subscription.
    #[must_use]
    pub const fn new() -> Self {
        Self { armed: None }
    }

    /// Arms the subscription, replacing any earlier registration.
    pub fn register(&mut self, payload: T) {
        self.armed = Some(payload);
    }

    /// Takes the payload if armed. Deregisters in the same step.
    pub const fn fire(&mut self) -> Option<T> {
        self.armed.take()
    }

    /// Deregisters without firing.
    pub fn cancel(&mut self) {
        self.armed = None;
    }

    /// Whether a registration is pending.
    #[must_use]
    pub const fn is_armed(&self) -> bool {
        self.armed.is_some()
    }
}

impl<T> Default for OneShot<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fires_once() {
        let mut shot = OneShot::new();
        shot.register(7);

        assert_eq!(shot.fire(), Some(7));
        assert_eq!(shot.fire(), None);
        assert!(!shot.is_armed());
    }

    #[test]
    fn test_cancel_disarms() {
        let mut shot = OneShot::new();
        shot.register("a");
        shot.register("b");
        assert!(shot.is_armed());

        shot.cancel();

        assert_eq!(shot.fire(), None);
    }
}
