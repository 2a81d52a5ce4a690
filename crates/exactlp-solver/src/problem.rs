use thiserror::Error;

use crate::rational::{Rational, RationalError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SolveError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),
    #[error("Arithmetic error: {0}")]
    Arithmetic(#[from] RationalError),
    #[error("Simplex did not converge after {iterations} iterations")]
    DidNotConverge { iterations: usize },
}

/// A linear program in equality form: maximize `c x` subject to `A x = b`, `x >= 0`.
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Problem {
    /// Constraint matrix A, row-major (m rows of n coefficients)
    constraints: Vec<Vec<Rational>>,
    /// Right-hand side b (length m)
    rhs: Vec<Rational>,
    /// Objective coefficients c (length n)
    objective: Vec<Rational>,
}

impl Problem {
    pub fn new(
        constraints: Vec<Vec<Rational>>,
        rhs: Vec<Rational>,
        objective: Vec<Rational>,
    ) -> Result<Self, SolveError> {
        let m = constraints.len();
        let n = objective.len();

        if m == 0 {
            return Err(SolveError::InvalidInput("no constraint rows".to_string()));
        }
        if n == 0 {
            return Err(SolveError::InvalidInput("no variables".to_string()));
        }
        if let Some((i, row)) = constraints.iter().enumerate().find(|(_, row)| row.len() != n) {
            return Err(SolveError::InvalidInput(format!(
                "row {} has {} coefficients, expected {}",
                i + 1,
                row.len(),
                n
            )));
        }
        if rhs.len() != m {
            return Err(SolveError::InvalidInput(format!(
                "right-hand side has {} entries, expected {}",
                rhs.len(),
                m
            )));
        }
        if m > n {
            return Err(SolveError::InvalidInput(format!(
                "{} constraints exceed {} variables",
                m, n
            )));
        }

        Ok(Self {
            constraints,
            rhs,
            objective,
        })
    }

    pub fn constraints(&self) -> &[Vec<Rational>] {
        &self.constraints
    }

    pub fn rhs(&self) -> &[Rational] {
        &self.rhs
    }

    pub fn objective(&self) -> &[Rational] {
        &self.objective
    }

    pub fn num_rows(&self) -> usize {
        self.constraints.len()
    }

    pub fn num_columns(&self) -> usize {
        self.objective.len()
    }
}
