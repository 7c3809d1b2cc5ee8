pub mod app;
pub mod generators;
pub mod graph;
pub mod heap;
pub mod maze;
pub mod solvers;

use thiserror::Error;

/// An algorithm name that matches no known generator or solver.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown {family} algorithm: {name}")]
pub struct ParseAlgorithmError {
    family: &'static str,
    name: String,
}

impl ParseAlgorithmError {
    fn new(family: &'static str, name: &str) -> Self {
        ParseAlgorithmError {
            family,
            name: name.to_string(),
        }
    }
}
