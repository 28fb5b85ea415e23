use std::cmp::Ordering;
use std::fmt::Debug;

/// Numeric type usable as an edge weight and path distance.
///
/// `INFINITY` is the sentinel stored for nodes the solver never reaches.
/// For `f32`/`f64` it is the IEEE positive infinity of that type, for
/// integer types it is `MAX`. Path lengths saturate at the sentinel, so an
/// integer path that would overflow reads as unreachable rather than wrapping,
/// and a path of length exactly `MAX` also reads as unreached.
pub trait Weight: Copy + PartialOrd + Debug {
    /// Distance of the start node.
    const ZERO: Self;
    /// Distance recorded for unreached nodes.
    const INFINITY: Self;

    /// True if the value may be stored on an edge: non-negative and not NaN.
    fn is_valid(self) -> bool;

    /// Length of a path extended by one edge, saturating at `INFINITY`.
    fn accumulate(self, edge: Self) -> Self;

    /// Total ordering for the priority queue.
    fn total_cmp(&self, other: &Self) -> Ordering;

    fn is_infinite(self) -> bool {
        self.total_cmp(&Self::INFINITY) == Ordering::Equal
    }
}

macro_rules! float_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0.0;
            const INFINITY: Self = <$t>::INFINITY;

            fn is_valid(self) -> bool {
                // NaN fails this comparison too
                self >= 0.0
            }

            fn accumulate(self, edge: Self) -> Self {
                self + edge
            }

            fn total_cmp(&self, other: &Self) -> Ordering {
                <$t>::total_cmp(self, other)
            }
        }
    )*};
}

macro_rules! unsigned_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0;
            const INFINITY: Self = <$t>::MAX;

            fn is_valid(self) -> bool {
                true
            }

            fn accumulate(self, edge: Self) -> Self {
                self.saturating_add(edge)
            }

            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }
        }
    )*};
}

macro_rules! signed_weight {
    ($($t:ty),*) => {$(
        impl Weight for $t {
            const ZERO: Self = 0;
            const INFINITY: Self = <$t>::MAX;

            fn is_valid(self) -> bool {
                self >= 0
            }

            fn accumulate(self, edge: Self) -> Self {
                self.saturating_add(edge)
            }

            fn total_cmp(&self, other: &Self) -> Ordering {
                Ord::cmp(self, other)
            }
        }
    )*};
}

float_weight!(f32, f64);
unsigned_weight!(u8, u16, u32, u64, usize);
signed_weight!(i32, i64);
