use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// A node in the anchor graph.
///
/// Implementations must not form cycles through the anchors they depend on:
/// [`AnchorNode::value`] recurses into its dependencies and would never return.
pub trait AnchorNode {
    /// Current coordinate, recomputed from the leaves on every call.
    fn value(&self) -> f32;

    /// Tries to make future [`AnchorNode::value`] calls return `value`. Anchors that
    /// can not be inverted ignore the request or approximate it.
    fn request_value(&self, value: f32);
}

/// Shared handle to a single coordinate of the layout.
///
/// Cloning an anchor shares the node, so the same anchor may serve as the edge
/// of one area and the base of several others.
#[derive(Clone)]
pub struct Anchor {
    node: Rc<dyn AnchorNode>,
}

impl Anchor {
    pub fn new<N>(node: N) -> Self
    where
        N: AnchorNode + 'static,
    {
        Self {
            node: Rc::new(node),
        }
    }

    /// A leaf holding `value`; requests overwrite it.
    pub fn absolute(value: f32) -> Self {
        Self::new(AbsoluteAnchor {
            value: Cell::new(value),
        })
    }

    /// A fresh absolute anchor at `0.0`. Areas use it for edges that were not set.
    pub fn zero() -> Self {
        Self::absolute(0.0)
    }

    /// `base + offset`; requests move the base.
    pub fn offset(base: &Anchor, offset: f32) -> Self {
        Self::new(OffsetAnchor {
            base: base.clone(),
            offset,
        })
    }

    /// Linear interpolation between `from` (fraction `0.0`) and `to` (fraction `1.0`).
    pub fn relative(from: &Anchor, to: &Anchor, fraction: f32) -> Self {
        Self::new(RelativeAnchor {
            from: from.clone(),
            to: to.clone(),
            fraction,
        })
    }

    /// `preferred`, clamped into `[min, max]`.
    pub fn limited(min: &Anchor, max: &Anchor, preferred: &Anchor) -> Self {
        Self::new(LimitedAnchor {
            min: min.clone(),
            max: max.clone(),
            preferred: preferred.clone(),
        })
    }

    pub fn value(&self) -> f32 {
        self.node.value()
    }

    pub fn request_value(&self, value: f32) {
        self.node.request_value(value);
    }

    /// Whether both handles refer to the same node.
    pub fn ptr_eq(&self, other: &Anchor) -> bool {
        Rc::ptr_eq(&self.node, &other.node)
    }
}

impl Default for Anchor {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Debug for Anchor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Anchor")
            .field("value", &self.value())
            .finish()
    }
}

struct AbsoluteAnchor {
    value: Cell<f32>,
}

impl AnchorNode for AbsoluteAnchor {
    fn value(&self) -> f32 {
        self.value.get()
    }

    fn request_value(&self, value: f32) {
        self.value.set(value);
    }
}

struct OffsetAnchor {
    base: Anchor,
    offset: f32,
}

impl AnchorNode for OffsetAnchor {
    fn value(&self) -> f32 {
        self.base.value() + self.offset
    }

    fn request_value(&self, value: f32) {
        self.base.request_value(value - self.offset);
    }
}

struct RelativeAnchor {
    from: Anchor,
    to: Anchor,
    fraction: f32,
}

impl AnchorNode for RelativeAnchor {
    fn value(&self) -> f32 {
        let from = self.from.value();
        from + (self.to.value() - from) * self.fraction
    }

    // Only the degenerate fractions resolve to a single dependency.
    fn request_value(&self, value: f32) {
        if self.fraction == 0.0 {
            self.from.request_value(value);
        } else if self.fraction == 1.0 {
            self.to.request_value(value);
        }
    }
}

struct LimitedAnchor {
    min: Anchor,
    max: Anchor,
    preferred: Anchor,
}

impl AnchorNode for LimitedAnchor {
    // Not `f32::clamp`: a min above max must yield max instead of panicking.
    fn value(&self) -> f32 {
        self.preferred
            .value()
            .max(self.min.value())
            .min(self.max.value())
    }

    fn request_value(&self, value: f32) {
        self.preferred.request_value(value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absolute_anchor_takes_requested_value() {
        let anchor = Anchor::absolute(3.0);
        assert_eq!(anchor.value(), 3.0);
        anchor.request_value(-7.5);
        assert_eq!(anchor.value(), -7.5);
    }

    #[test]
    fn repeated_reads_are_stable() {
        let left = Anchor::absolute(10.0);
        let right = Anchor::offset(&left, 90.0);
        let center = Anchor::relative(&left, &right, 0.5);
        let limited = Anchor::limited(&left, &right, &Anchor::offset(&center, 100.0));

        let first = (center.value(), limited.value());
        for _ in 0..10 {
            assert_eq!((center.value(), limited.value()), first);
        }
        assert_eq!(first, (55.0, 100.0));
    }

    #[test]
    fn offset_round_trip_moves_base() {
        let base = Anchor::absolute(40.0);
        let offset = Anchor::offset(&base, 25.0);
        assert_eq!(offset.value(), 65.0);

        offset.request_value(100.0);
        assert_eq!(offset.value(), 100.0);
        assert_eq!(base.value(), 75.0);
    }

    #[test]
    fn offset_round_trip_respects_base_constraints() {
        let min = Anchor::absolute(0.0);
        let max = Anchor::absolute(50.0);
        let base = Anchor::limited(&min, &max, &Anchor::absolute(20.0));
        let offset = Anchor::offset(&base, 10.0);

        offset.request_value(30.0);
        assert_eq!(offset.value(), 30.0);
        offset.request_value(500.0);
        assert_eq!(offset.value(), 60.0);
    }

    #[test]
    fn relative_anchor_interpolates() {
        let from = Anchor::absolute(100.0);
        let to = Anchor::absolute(300.0);
        let quarter = Anchor::relative(&from, &to, 0.25);
        assert_eq!(quarter.value(), 150.0);

        to.request_value(500.0);
        assert_eq!(quarter.value(), 200.0);
    }

    #[test]
    fn relative_anchor_ignores_requests_between_ends() {
        let from = Anchor::absolute(0.0);
        let to = Anchor::absolute(100.0);
        let half = Anchor::relative(&from, &to, 0.5);

        half.request_value(80.0);
        assert_eq!(half.value(), 50.0);
        assert_eq!(from.value(), 0.0);
        assert_eq!(to.value(), 100.0);
    }

    #[test]
    fn relative_anchor_forwards_at_the_ends() {
        let from = Anchor::absolute(0.0);
        let to = Anchor::absolute(100.0);
        let at_from = Anchor::relative(&from, &to, 0.0);
        let at_to = Anchor::relative(&from, &to, 1.0);

        at_from.request_value(20.0);
        assert_eq!(from.value(), 20.0);
        at_to.request_value(80.0);
        assert_eq!(to.value(), 80.0);
        assert_eq!(at_from.value(), 20.0);
        assert_eq!(at_to.value(), 80.0);
    }

    #[test]
    fn limited_anchor_clamps_requests() {
        let limited = Anchor::limited(
            &Anchor::absolute(0.0),
            &Anchor::absolute(10.0),
            &Anchor::absolute(0.0),
        );

        limited.request_value(15.0);
        assert_eq!(limited.value(), 10.0);
        limited.request_value(-5.0);
        assert_eq!(limited.value(), 0.0);
        limited.request_value(5.0);
        assert_eq!(limited.value(), 5.0);
    }

    #[test]
    fn limited_anchor_keeps_unclamped_request_on_preferred() {
        let preferred = Anchor::absolute(0.0);
        let limited = Anchor::limited(&Anchor::absolute(0.0), &Anchor::absolute(10.0), &preferred);

        limited.request_value(15.0);
        assert_eq!(preferred.value(), 15.0);
    }

    #[test]
    fn limited_anchor_with_inverted_bounds_yields_max() {
        let limited = Anchor::limited(
            &Anchor::absolute(20.0),
            &Anchor::absolute(10.0),
            &Anchor::absolute(15.0),
        );
        assert_eq!(limited.value(), 10.0);
    }

    #[test]
    fn custom_nodes_join_the_graph() {
        struct Doubled(Anchor);

        impl AnchorNode for Doubled {
            fn value(&self) -> f32 {
                self.0.value() * 2.0
            }

            fn request_value(&self, value: f32) {
                self.0.request_value(value / 2.0);
            }
        }

        let base = Anchor::absolute(4.0);
        let doubled = Anchor::new(Doubled(base.clone()));
        let shifted = Anchor::offset(&doubled, 1.0);
        assert_eq!(shifted.value(), 9.0);

        shifted.request_value(21.0);
        assert_eq!(base.value(), 10.0);
    }

    #[test]
    fn clones_share_the_node() {
        let anchor = Anchor::absolute(1.0);
        let shared = anchor.clone();
        shared.request_value(2.0);
        assert_eq!(anchor.value(), 2.0);
        assert!(anchor.ptr_eq(&shared));
        assert!(!anchor.ptr_eq(&Anchor::absolute(2.0)));
    }
}
