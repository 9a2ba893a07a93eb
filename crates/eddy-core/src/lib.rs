//! # eddy-core
//!
//! Scalar layer for the eddy Clifford algebra engine.
//!
//! Provides:
//! - The [`Field`] trait every coefficient type implements
//! - Generic real and complex fields over `f32` / `f64`
//! - [`Cardinal`] unit tags that keep incompatible scalars apart
//! - The workspace-wide [`EddyError`] and [`Result`] alias

pub mod cardinal;
pub mod complex;
pub mod error;
pub mod field;
pub mod prelude;
pub mod real;

pub use cardinal::Cardinal;
pub use complex::{Complex, ComplexD, ComplexF};
pub use error::EddyError;
pub use field::Field;
pub use real::{Real, RealD, RealF};

pub type Result<T> = std::result::Result<T, EddyError>;
