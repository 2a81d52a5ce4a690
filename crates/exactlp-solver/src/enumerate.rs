use log::{debug, info};

use crate::gauss::gaussian_elimination;
use crate::problem::{Problem, SolveError};
use crate::rational::Rational;
use crate::solution::{Answer, Assignment, Status};

/// Exhaustive solver that evaluates every basic solution.
///
/// Every choice of `m` columns out of `n` is tried as a basis, in increasing
/// column order, and the best feasible objective is kept. The cost is
/// `C(n, m)` eliminations, so this is only practical for small problems, where
/// it serves as an oracle for [`Simplex`](crate::Simplex).
#[derive(Debug, Default, Clone, Copy)]
pub struct Enumerator;

impl Enumerator {
    pub fn new() -> Self {
        Self
    }

    pub fn solve(&self, problem: &Problem) -> Result<Answer, SolveError> {
        let mut search = Search {
            problem,
            slots: vec![0; problem.num_rows()],
            evaluated: 0,
        };
        let best = search.descend(0, 0)?.unwrap_or_else(Answer::not_feasible);
        info!(
            "Enumerated {} bases: {} (z = {})",
            search.evaluated, best.status, best.objective
        );
        Ok(best)
    }
}

struct Search<'a> {
    problem: &'a Problem,
    /// Chosen column per depth; only `slots[..depth]` is meaningful.
    slots: Vec<usize>,
    evaluated: usize,
}

impl Search<'_> {
    /// Explore every completion of the `depth` columns already chosen, taking
    /// further columns from `next` onwards. Returns `None` for a branch that
    /// cannot reach a full basis.
    fn descend(&mut self, depth: usize, next: usize) -> Result<Option<Answer>, SolveError> {
        let m = self.problem.num_rows();
        let n = self.problem.num_columns();

        if depth + (n - next) < m {
            return Ok(None);
        }
        if depth == m {
            return self.evaluate().map(Some);
        }

        let mut best: Option<Answer> = None;
        for col in next..n {
            self.slots[depth] = col;
            let Some(candidate) = self.descend(depth + 1, col + 1)? else {
                continue;
            };
            best = match best {
                Some(current) if !improves(&candidate, &current) => Some(current),
                _ => Some(candidate),
            };
        }
        Ok(best)
    }

    fn evaluate(&mut self) -> Result<Answer, SolveError> {
        self.evaluated += 1;
        let a = self.problem.constraints();
        let c = self.problem.objective();

        let mut basis: Vec<Vec<Rational>> = a
            .iter()
            .map(|row| self.slots.iter().map(|&col| row[col]).collect())
            .collect();
        let mut values = self.problem.rhs().to_vec();

        let consistent = gaussian_elimination(&mut basis, &mut values)?;
        if !consistent || values.iter().any(Rational::is_negative) || !self.reproduces_rhs(&values)? {
            debug!("Basis {:?}: not feasible", self.columns());
            return Ok(Answer::not_feasible());
        }

        let mut objective = Rational::ZERO;
        let mut assignments = Vec::with_capacity(values.len());
        for (&col, &value) in self.slots.iter().zip(&values) {
            objective = objective.checked_add(value.checked_mul(c[col])?)?;
            assignments.push(Assignment {
                variable: col + 1,
                value,
            });
        }
        debug!("Basis {:?}: z = {}", self.columns(), objective);

        Ok(Answer {
            status: Status::Optimal,
            assignments,
            objective,
        })
    }

    /// Singular bases can leave values that do not belong to their columns;
    /// accept only values that satisfy the original rows.
    fn reproduces_rhs(&self, values: &[Rational]) -> Result<bool, SolveError> {
        for (row, &rhs) in self.problem.constraints().iter().zip(self.problem.rhs()) {
            let mut lhs = Rational::ZERO;
            for (&col, &value) in self.slots.iter().zip(values) {
                lhs = lhs.checked_add(row[col].checked_mul(value)?)?;
            }
            if lhs != rhs {
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn columns(&self) -> Vec<usize> {
        self.slots.iter().map(|col| col + 1).collect()
    }
}

/// Maximization with ties resolved in favour of the earlier basis.
fn improves(candidate: &Answer, current: &Answer) -> bool {
    candidate.is_feasible() && (!current.is_feasible() || candidate.objective > current.objective)
}
