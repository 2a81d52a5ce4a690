mod enumerate;
mod gauss;
mod problem;
mod rational;
mod simplex;
mod solution;

pub use enumerate::Enumerator;
pub use gauss::gaussian_elimination;
pub use problem::{Problem, SolveError};
pub use rational::{ParseRationalError, Rational, RationalError};
pub use simplex::Simplex;
pub use solution::{Answer, Assignment, Status};
