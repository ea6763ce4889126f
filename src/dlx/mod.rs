//! The dancing links (DLX) exact-cover engine.
//!
//! [`Matrix`] is the sole public type: a toroidal sparse matrix of
//! primary/optional columns and rows, with cover/uncover link surgery and
//! an Algorithm X search driver built on top of it.

mod matrix;

pub use matrix::Matrix;
