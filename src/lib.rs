//! Color-Stack Puzzle Solver Library
//!
//! Solves a fixed-height stack of colored cubes: each layer is rotated in
//! place until every lateral side of the stack (front, back, left, right)
//! shows each palette color exactly once.
//!
//! [`cube`] models a single layer's orientation and the two generator
//! moves; [`stack`] holds the puzzle configuration and the win condition;
//! [`solver`] runs the stepwise backtracking search; [`session`] adds
//! cancellation control around a background search.

pub mod cube;
pub mod session;
pub mod solver;
pub mod stack;

pub use session::Session;
pub use solver::{Report, Search, SolveOutcome, Step};
