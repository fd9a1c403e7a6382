//! Resource types and the four-component stock vector.

use std::fmt;
use std::ops::{Add, AddAssign, Index, IndexMut};

/// One of the four resource types moved through the network.
///
/// `A` and `B` are upkeep resources (drawn every PM); `C` and `D` are consumed
/// by operations.  All four must be positive for a spoke to run an operation.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Resource {
    A,
    B,
    C,
    D,
}

impl Resource {
    pub const ALL: [Resource; 4] = [Resource::A, Resource::B, Resource::C, Resource::D];

    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Resource::A => "A",
            Resource::B => "B",
            Resource::C => "C",
            Resource::D => "D",
        }
    }
}

impl fmt::Display for Resource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Non-negative unit counts for each resource, indexed by [`Resource`].
///
/// Unsigned storage makes a negative balance unrepresentable; callers that
/// might underflow use [`Stock::saturating_sub`] and report the clamp.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Stock(pub [u32; 4]);

impl Stock {
    pub const ZERO: Stock = Stock([0; 4]);

    #[inline]
    pub const fn new(a: u32, b: u32, c: u32, d: u32) -> Self {
        Stock([a, b, c, d])
    }

    /// Same amount of every resource.
    #[inline]
    pub const fn splat(n: u32) -> Self {
        Stock([n; 4])
    }

    #[inline]
    pub fn get(&self, r: Resource) -> u32 {
        self.0[r.index()]
    }

    #[inline]
    pub fn set(&mut self, r: Resource, n: u32) {
        self.0[r.index()] = n;
    }

    /// Sum of all four components.
    #[inline]
    pub fn total(&self) -> u32 {
        self.0.iter().sum()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.0.iter().all(|&n| n == 0)
    }

    /// `true` when every component is positive (the operation gate).
    #[inline]
    pub fn all_positive(&self) -> bool {
        self.0.iter().all(|&n| n > 0)
    }

    /// Component-wise subtraction clamped at zero.
    ///
    /// Returns the clamped result and the total number of units that could
    /// not be withdrawn (zero when `other <= self` component-wise).
    pub fn saturating_sub(self, other: Stock) -> (Stock, u32) {
        let mut out = self;
        let mut shortfall = 0;
        for r in Resource::ALL {
            let (have, want) = (self.get(r), other.get(r));
            out.set(r, have.saturating_sub(want));
            shortfall += want.saturating_sub(have);
        }
        (out, shortfall)
    }

    /// Component-wise minimum.
    pub fn min(self, other: Stock) -> Stock {
        let mut out = self;
        for r in Resource::ALL {
            out.set(r, self.get(r).min(other.get(r)));
        }
        out
    }

    /// Iterator of `(resource, units)` pairs in A, B, C, D order.
    pub fn iter(&self) -> impl Iterator<Item = (Resource, u32)> + '_ {
        Resource::ALL.into_iter().map(|r| (r, self.get(r)))
    }
}

impl Index<Resource> for Stock {
    type Output = u32;
    #[inline]
    fn index(&self, r: Resource) -> &u32 {
        &self.0[r.index()]
    }
}

impl IndexMut<Resource> for Stock {
    #[inline]
    fn index_mut(&mut self, r: Resource) -> &mut u32 {
        &mut self.0[r.index()]
    }
}

impl Add for Stock {
    type Output = Stock;
    fn add(self, rhs: Stock) -> Stock {
        let mut out = self;
        out += rhs;
        out
    }
}

impl AddAssign for Stock {
    fn add_assign(&mut self, rhs: Stock) {
        for r in Resource::ALL {
            self[r] = self[r].saturating_add(rhs[r]);
        }
    }
}

impl fmt::Display for Stock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let [a, b, c, d] = self.0;
        write!(f, "A{a} B{b} C{c} D{d}")
    }
}
