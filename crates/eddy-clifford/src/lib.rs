//! # eddy-clifford
//!
//! Clifford algebra structure for up to 14 generators with any ±1 signature.
//!
//! Provides:
//! - Blades as generator bitmasks with positional sort keys
//! - The canonical (Eddington) basis of all 2^n blades, grade-ordered
//! - Blade product reduction with permutation-parity and metric signs
//! - Precomputed geometric product tables, cached per signature
//! - Multivectors over any [`eddy_core::Field`] with dense, sparse and
//!   parallel multiplication

pub mod basis;
pub mod blade;
pub mod cache;
pub mod config;
pub mod duet;
pub mod engine;
pub mod generator;
pub mod monad;
pub mod product;
pub mod scale;
pub mod sign;
pub mod signature;

pub use basis::Basis;
pub use blade::Blade;
pub use cache::{AlgebraCache, CacheStats};
pub use config::{EngineConfig, Strategy};
pub use duet::BladeDuet;
pub use generator::{Generator, MAX_GENERATORS};
pub use monad::Monad;
pub use product::ProductTable;
pub use scale::Scale;
pub use sign::Sign;
pub use signature::Signature;
