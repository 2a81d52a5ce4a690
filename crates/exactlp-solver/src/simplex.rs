use log::{debug, info};

use crate::gauss::adjust;
use crate::problem::{Problem, SolveError};
use crate::rational::{Rational, RationalError};
use crate::solution::{Answer, Assignment, Status};

/// Tableau simplex solver for problems in equality form
#[derive(Debug, Clone)]
pub struct Simplex {
    /// Maximum pivots (across both phases) before giving up
    max_iterations: usize,
}

impl Default for Simplex {
    fn default() -> Self {
        Self {
            max_iterations: 10000,
        }
    }
}

impl Simplex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_max_iterations(mut self, max: usize) -> Self {
        self.max_iterations = max;
        self
    }

    /// Solve the problem, starting from the basis formed by its last `m` columns.
    ///
    /// When those columns cannot be brought into a feasible identity basis, a
    /// first basis is searched with artificial columns (phase 1).
    pub fn solve(&self, problem: &Problem) -> Result<Answer, SolveError> {
        let objective = problem.objective();
        let mut iterations = 0;

        let mut tableau = match Tableau::from_trailing_basis(problem)? {
            Some(tableau) => tableau,
            None => {
                info!("Trailing columns do not give a feasible basis, running phase 1");
                match self.phase1(problem, &mut iterations)? {
                    Some(tableau) => tableau,
                    None => return Ok(Answer::not_feasible()),
                }
            }
        };

        let status = match self.iterate(&mut tableau, objective, &mut iterations)? {
            Outcome::Optimal { alternate: false } => Status::Optimal,
            Outcome::Optimal { alternate: true } => Status::InfiniteOptimal,
            Outcome::Unbounded => Status::Unbounded,
        };
        let z = tableau.objective_value(objective)?;
        info!("Simplex finished after {} pivots: {} (z = {})", iterations, status, z);

        Ok(Answer {
            status,
            assignments: tableau.assignments(),
            objective: z,
        })
    }

    /// Pivot until no non-basic column has a positive reduced cost, or until
    /// one proves the objective unbounded.
    fn iterate(
        &self,
        tableau: &mut Tableau,
        cost: &[Rational],
        iterations: &mut usize,
    ) -> Result<Outcome, SolveError> {
        loop {
            let mut entering: Option<(usize, Rational)> = None;
            let mut alternate = false;

            for col in 0..cost.len() {
                if tableau.is_basic(col) {
                    continue;
                }
                let sigma = tableau.reduced_cost(cost, col)?;
                if sigma.is_positive() {
                    if tableau.a.iter().all(|row| !row[col].is_positive()) {
                        debug!("Column {} improves without bound", col + 1);
                        return Ok(Outcome::Unbounded);
                    }
                    // Dantzig's rule, first occurrence on ties
                    if entering.is_none_or(|(_, best)| sigma > best) {
                        entering = Some((col, sigma));
                    }
                } else if sigma.is_zero() {
                    alternate = true;
                }
            }

            let Some((col, sigma)) = entering else {
                return Ok(Outcome::Optimal { alternate });
            };
            let row = tableau.leaving_row(col)?;

            if *iterations >= self.max_iterations {
                return Err(SolveError::DidNotConverge {
                    iterations: *iterations,
                });
            }
            debug!(
                "Pivot {}: column {} (sigma = {}) replaces column {} in row {}",
                *iterations + 1,
                col + 1,
                sigma,
                tableau.basis[row] + 1,
                row + 1
            );
            tableau.pivot(row, col)?;
            *iterations += 1;
        }
    }

    /// Find a feasible basis by maximizing minus the sum of one artificial
    /// column per row. Returns `None` if the problem is infeasible.
    fn phase1(&self, problem: &Problem, iterations: &mut usize) -> Result<Option<Tableau>, SolveError> {
        let m = problem.num_rows();
        let n = problem.num_columns();

        let mut a = Vec::with_capacity(m);
        let mut b = Vec::with_capacity(m);
        for (i, (row, &rhs)) in problem.constraints().iter().zip(problem.rhs()).enumerate() {
            // Artificials start at b, which must be nonnegative
            let flip = rhs.is_negative();
            let mut extended = row
                .iter()
                .map(|&value| if flip { value.checked_neg() } else { Ok(value) })
                .collect::<Result<Vec<_>, _>>()?;
            extended.extend((0..m).map(|k| if k == i { Rational::ONE } else { Rational::ZERO }));
            a.push(extended);
            b.push(if flip { rhs.checked_neg()? } else { rhs });
        }

        let mut tableau = Tableau {
            a,
            b,
            basis: (n..n + m).collect(),
        };
        let cost: Vec<Rational> = (0..n + m)
            .map(|col| if col < n { Rational::ZERO } else { Rational::from(-1) })
            .collect();

        self.iterate(&mut tableau, &cost, iterations)?;
        let infeasibility = tableau.objective_value(&cost)?;
        if infeasibility.is_negative() {
            info!("Phase 1 optimum is {}, problem is not feasible", infeasibility);
            return Ok(None);
        }

        tableau.drive_out_artificials(n)?;
        Ok(Some(tableau))
    }
}

enum Outcome {
    Optimal { alternate: bool },
    Unbounded,
}

struct Tableau {
    a: Vec<Vec<Rational>>,
    b: Vec<Rational>,
    /// Column occupying each row of the basis
    basis: Vec<usize>,
}

impl Tableau {
    /// Use columns `n - m .. n` as the basis, row `i` holding column `n - m + i`.
    fn from_trailing_basis(problem: &Problem) -> Result<Option<Self>, RationalError> {
        let m = problem.num_rows();
        let n = problem.num_columns();

        let mut tableau = Tableau {
            a: problem.constraints().to_vec(),
            b: problem.rhs().to_vec(),
            basis: (n - m..n).collect(),
        };
        for row in 0..m {
            let col = n - m + row;
            if tableau.a[row][col].is_zero() {
                return Ok(None);
            }
            tableau.pivot(row, col)?;
        }
        if tableau.b.iter().any(Rational::is_negative) {
            return Ok(None);
        }
        Ok(Some(tableau))
    }

    fn is_basic(&self, col: usize) -> bool {
        self.basis.contains(&col)
    }

    fn objective_value(&self, cost: &[Rational]) -> Result<Rational, RationalError> {
        self.basis
            .iter()
            .zip(&self.b)
            .try_fold(Rational::ZERO, |z, (&col, &value)| {
                z.checked_add(cost[col].checked_mul(value)?)
            })
    }

    fn reduced_cost(&self, cost: &[Rational], col: usize) -> Result<Rational, RationalError> {
        self.basis
            .iter()
            .zip(&self.a)
            .try_fold(cost[col], |sigma, (&basic, row)| {
                sigma.checked_sub(cost[basic].checked_mul(row[col])?)
            })
    }

    /// Minimum-ratio test over rows with a positive entry in `col`. Equal
    /// ratios go to the row whose basic column has the smallest index.
    fn leaving_row(&self, col: usize) -> Result<usize, SolveError> {
        let mut best: Option<(usize, Rational)> = None;
        for (row, values) in self.a.iter().enumerate() {
            if !values[col].is_positive() {
                continue;
            }
            let ratio = self.b[row].checked_div(values[col])?;
            if ratio.is_negative() {
                continue;
            }
            let better = match best {
                None => true,
                Some((current, min)) => {
                    ratio < min || (ratio == min && self.basis[row] < self.basis[current])
                }
            };
            if better {
                best = Some((row, ratio));
            }
        }
        best.map(|(row, _)| row).ok_or_else(|| {
            SolveError::InvalidInput(format!("no row bounds entering column {}", col + 1))
        })
    }

    fn pivot(&mut self, row: usize, col: usize) -> Result<(), RationalError> {
        self.basis[row] = col;
        adjust(&mut self.a, &mut self.b, row, col)
    }

    /// Replace basic artificial columns (all at level zero) with original
    /// columns, drop rows that have no original column left, then remove the
    /// artificial columns.
    fn drive_out_artificials(&mut self, n: usize) -> Result<(), RationalError> {
        let mut row = 0;
        while row < self.basis.len() {
            if self.basis[row] < n {
                row += 1;
                continue;
            }
            match (0..n).find(|&col| !self.a[row][col].is_zero()) {
                Some(col) => {
                    self.pivot(row, col)?;
                    row += 1;
                }
                None => {
                    debug!("Dropping redundant row {}", row + 1);
                    self.a.remove(row);
                    self.b.remove(row);
                    self.basis.remove(row);
                }
            }
        }
        for values in &mut self.a {
            values.truncate(n);
        }
        Ok(())
    }

    fn assignments(&self) -> Vec<Assignment> {
        self.basis
            .iter()
            .zip(&self.b)
            .map(|(&col, &value)| Assignment {
                variable: col + 1,
                value,
            })
            .collect()
    }
}
