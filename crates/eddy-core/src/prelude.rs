//! Convenience re-exports for common eddy-core types.
//!
//! ```rust
//! use eddy_core::prelude::*;
//! ```

pub use crate::Cardinal;
pub use crate::EddyError;
pub use crate::Field;
pub use crate::Result;
pub use crate::{Complex, ComplexD, ComplexF};
pub use crate::{Real, RealD, RealF};
