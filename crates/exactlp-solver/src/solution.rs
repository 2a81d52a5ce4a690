use std::fmt;

use crate::rational::Rational;

/// Outcome of a solve
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    /// A unique optimal basis was found
    Optimal,
    /// The optimum is attained, but an alternate optimal basis exists
    InfiniteOptimal,
    /// No basis satisfies the equality constraints and nonnegativity
    NotFeasible,
    /// The objective grows without bound along an improving direction
    Unbounded,
}

impl Status {
    pub fn name(self) -> &'static str {
        match self {
            Status::Optimal => "Optimal",
            Status::InfiniteOptimal => "Infinite Optimal",
            Status::NotFeasible => "Not Feasible",
            Status::Unbounded => "Unbounded",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A basic variable and its value
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Assignment {
    /// 1-based variable index
    pub variable: usize,
    pub value: Rational,
}

/// The result of solving a problem
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Answer {
    pub status: Status,
    /// Basic variables in basis order
    pub assignments: Vec<Assignment>,
    /// Objective value; `Rational::MIN` when not feasible
    pub objective: Rational,
}

impl Answer {
    pub fn not_feasible() -> Self {
        Self {
            status: Status::NotFeasible,
            assignments: Vec::new(),
            objective: Rational::MIN,
        }
    }

    pub fn is_feasible(&self) -> bool {
        self.status != Status::NotFeasible
    }

    /// Value of the 1-based `variable`, zero when it is not basic.
    pub fn value_of(&self, variable: usize) -> Rational {
        self.assignments
            .iter()
            .find(|a| a.variable == variable)
            .map(|a| a.value)
            .unwrap_or(Rational::ZERO)
    }
}
