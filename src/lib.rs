//! An [exact cover] solver library using Knuth's [dancing links (DLX)] technique.
//!
//! [exact cover]: https://en.wikipedia.org/wiki/Exact_cover
//! [dancing links (DLX)]: https://en.wikipedia.org/wiki/Dancing_Links
//!
//! # Concept
//!
//! Many puzzle-like problems — polyomino packing, Sudoku, the N-queens
//! problem — can be modeled as exact cover problems: find a set of rows
//! from a 0/1 matrix such that every required column is covered by exactly
//! one chosen row. This crate implements the solver itself: an efficient
//! DLX engine operating purely on column indices and row indices. Mapping
//! a concrete puzzle onto those indices, and rendering solutions back into
//! domain terms, is left to the caller.
//!
//! # Basic example
//!
//! ```
//! use dlx_cover::Matrix;
//!
//! // Knuth's worked example: 7 primary columns, rows A..F.
//! let mut matrix = Matrix::new(7, 0).unwrap();
//! matrix.add_row(&[0, 3, 6]).unwrap(); // A
//! matrix.add_row(&[0, 3]).unwrap();    // B
//! matrix.add_row(&[3, 4, 6]).unwrap(); // C
//! matrix.add_row(&[2, 4, 5]).unwrap(); // D
//! matrix.add_row(&[1, 2, 5, 6]).unwrap(); // E
//! matrix.add_row(&[1, 6]).unwrap();    // F
//!
//! let solution = matrix.first_solution().expect("has a solution");
//! let mut sorted = solution.clone();
//! sorted.sort_unstable();
//! assert_eq!(sorted, vec![1, 3, 5]); // rows B, D, F
//! ```

pub mod dlx;
pub mod error;

pub use dlx::Matrix;
pub use error::DlxError;
