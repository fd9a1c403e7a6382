//! `al-spatial`: the static distance model.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                   |
//! |--------------|------------------------------------------------------------|
//! | [`distance`] | `DistanceModel` (dense matrix + p90 normalizer)            |
//! | [`error`]    | `SpatialError`, `SpatialResult<T>`                         |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `serde` | Propagates serde derives to `al-core` layout types.          |

pub mod distance;
pub mod error;


pub use distance::DistanceModel;
pub use error::{SpatialError, SpatialResult};
