use crate::rational::{Rational, RationalError};

/// Row-reduce `a` and `b` around the pivot at (`row`, `col`).
///
/// The pivot row is divided by the pivot value, then the pivot column is
/// eliminated from every other row. The pivot entry must be nonzero.
pub(crate) fn adjust(
    a: &mut [Vec<Rational>],
    b: &mut [Rational],
    row: usize,
    col: usize,
) -> Result<(), RationalError> {
    let pivot = a[row][col];
    for value in a[row].iter_mut() {
        *value = value.checked_div(pivot)?;
    }
    b[row] = b[row].checked_div(pivot)?;

    let pivot_row = a[row].clone();
    let pivot_rhs = b[row];
    for i in 0..a.len() {
        if i == row || a[i][col].is_zero() {
            continue;
        }
        let ratio = a[i][col];
        for (value, &p) in a[i].iter_mut().zip(&pivot_row) {
            *value = value.checked_sub(p.checked_mul(ratio)?)?;
        }
        b[i] = b[i].checked_sub(pivot_rhs.checked_mul(ratio)?)?;
    }
    Ok(())
}

/// Solve the square system `a x = b` in place.
///
/// Returns `Ok(false)` when the system is inconsistent. On `Ok(true)`, `b`
/// holds the solved value for each column of `a`, in column order. Columns
/// without a usable pivot are skipped rather than treated as an error, so
/// redundant rows (all zero, with a zero right-hand side) are accepted.
pub fn gaussian_elimination(a: &mut [Vec<Rational>], b: &mut [Rational]) -> Result<bool, RationalError> {
    let m = a.len();

    for k in 0..m {
        // Only rows below the pivot row are candidates.
        let mut below = k + 1;
        while below < m && a[k][k].is_zero() {
            a.swap(k, below);
            b.swap(k, below);
            below += 1;
        }
        if a[k][k].is_zero() {
            continue;
        }
        adjust(a, b, k, k)?;
    }

    for i in (1..m).rev() {
        if b[i].is_zero() {
            continue;
        }
        let ratio = b[i];
        for j in (0..i).rev() {
            b[j] = b[j].checked_sub(ratio.checked_mul(a[j][i])?)?;
            a[j][i] = Rational::ZERO;
        }
    }

    let inconsistent = a
        .iter()
        .zip(b.iter())
        .any(|(row, rhs)| row.iter().all(Rational::is_zero) && !rhs.is_zero());
    Ok(!inconsistent)
}
