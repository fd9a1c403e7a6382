//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into `Vec`s, but callers should prefer `.index()`.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID".
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }

        impl From<$name> for usize {
            #[inline(always)]
            fn from(id: $name) -> usize {
                id.0 as usize
            }
        }

        impl TryFrom<usize> for $name {
            type Error = std::num::TryFromIntError;
            fn try_from(n: usize) -> Result<$name, Self::Error> {
                <$inner>::try_from(n).map($name)
            }
        }
    };
}

typed_id! {
    /// Index of a spoke in the ledger and the distance model (`node = spoke + 1`).
    pub struct SpokeId(u32);
}

typed_id! {
    /// Index of an aircraft in the fleet store.  Dispatch visits idle
    /// aircraft in ascending `AircraftId` order.
    pub struct AircraftId(u32);
}

/// A node of the hub-and-spoke network.
///
/// The distance model numbers the hub as node 0 and spoke `i` as node `i + 1`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum NodeRef {
    Hub,
    Spoke(SpokeId),
}

impl NodeRef {
    /// Row/column of this node in the distance matrix.
    #[inline]
    pub fn node_index(self) -> usize {
        match self {
            NodeRef::Hub => 0,
            NodeRef::Spoke(s) => s.index() + 1,
        }
    }

    #[inline]
    pub fn spoke(self) -> Option<SpokeId> {
        match self {
            NodeRef::Hub => None,
            NodeRef::Spoke(s) => Some(s),
        }
    }

    #[inline]
    pub fn is_hub(self) -> bool {
        matches!(self, NodeRef::Hub)
    }
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Hub => f.write_str("HUB"),
            // Spokes are labelled 1-based, matching the operator-facing names.
            NodeRef::Spoke(s) => write!(f, "S{}", s.0 + 1),
        }
    }
}
