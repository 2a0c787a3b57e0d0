//! State module for tracking crawl progress
//!
//! # Components
//!
//! - `ProblemOutcome`: the terminal state each discovered problem ends up in

mod outcome;

pub use outcome::ProblemOutcome;
