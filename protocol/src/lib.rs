#![deny(unreachable_pub)]

// Public modules that make up the wire surface shared by the panel crates.
pub mod envelope;
pub mod models;
pub mod notification;

// Convenience prelude that re-exports the full public API of the submodules.
pub mod prelude {
    pub use crate::envelope::*;
    pub use crate::models::*;
    pub use crate::notification::*;
}
