use exactlp_solver::{
    Answer, Enumerator, Problem, Rational, RationalError, Simplex, SolveError, Status,
};
use proptest::prelude::*;

fn init() {
    let _ = env_logger::builder().is_test(true).try_init();
}

fn ints(values: &[i64]) -> Vec<Rational> {
    values.iter().copied().map(Rational::from).collect()
}

fn problem(a: &[&[i64]], b: &[i64], c: &[i64]) -> Problem {
    Problem::new(a.iter().map(|&row| ints(row)).collect(), ints(b), ints(c)).unwrap()
}

fn dot(row: &[Rational], answer: &Answer) -> Rational {
    row.iter().enumerate().fold(Rational::ZERO, |acc, (j, &coef)| {
        acc.checked_add(coef.checked_mul(answer.value_of(j + 1)).unwrap())
            .unwrap()
    })
}

#[test]
fn slack_form_instance_agrees() {
    init();
    let problem = problem(&[&[1, 1, 1, 0], &[1, 0, 0, 1]], &[4, 2], &[3, 2, 0, 0]);
    let naive = Enumerator::new().solve(&problem).unwrap();
    let simplex = Simplex::new().solve(&problem).unwrap();

    assert_eq!(naive.status, Status::Optimal);
    assert_eq!(simplex.status, Status::Optimal);
    assert_eq!(naive.objective, Rational::from(10));
    assert_eq!(simplex.objective, naive.objective);
    for variable in 1..=4 {
        assert_eq!(naive.value_of(variable), simplex.value_of(variable));
    }
}

#[test]
fn contradictory_instance_is_not_feasible_for_both() {
    init();
    let problem = problem(&[&[1, 0], &[1, 0]], &[1, 2], &[1, 1]);
    assert_eq!(Enumerator::new().solve(&problem).unwrap(), Answer::not_feasible());
    assert_eq!(Simplex::new().solve(&problem).unwrap(), Answer::not_feasible());
}

#[test]
fn phase1_instance_agrees() {
    init();
    let problem = problem(&[&[1, 1, 0], &[0, 1, 1]], &[3, 1], &[1, 3, 1]);
    let naive = Enumerator::new().solve(&problem).unwrap();
    let simplex = Simplex::new().solve(&problem).unwrap();
    assert_eq!(naive.objective, Rational::from(5));
    assert_eq!(simplex.objective, naive.objective);
}

#[test]
fn overflow_is_reported_by_both() {
    init();
    // The optimum is x1 = x2 = 1, whose objective 1/MAX + 1/(MAX - 1) has a
    // denominator beyond i64.
    let a = vec![ints(&[1, 0, 1, 0]), ints(&[0, 1, 0, 1])];
    let c = vec![
        Rational::new(1, i64::MAX).unwrap(),
        Rational::new(1, i64::MAX - 1).unwrap(),
        Rational::ZERO,
        Rational::ZERO,
    ];
    let problem = Problem::new(a, ints(&[1, 1]), c).unwrap();

    let overflow = Err(SolveError::Arithmetic(RationalError::ArithmeticOverflow));
    assert_eq!(Enumerator::new().solve(&problem), overflow);
    assert_eq!(Simplex::new().solve(&problem), overflow);
}

#[test]
fn solving_does_not_touch_the_problem() {
    let problem = problem(&[&[2, 1, 1, 0], &[1, 3, 0, 1]], &[4, 6], &[1, 1, 0, 0]);
    let before = problem.clone();
    Enumerator::new().solve(&problem).unwrap();
    Simplex::new().solve(&problem).unwrap();
    assert_eq!(problem, before);
}

/// `[P | I] x = b` with positive `P` and nonnegative `b`: feasible at the
/// slack basis and bounded in every variable.
fn bounded_slack_problem() -> impl Strategy<Value = Problem> {
    (1usize..=3, 1usize..=3).prop_flat_map(|(m, k)| {
        (
            prop::collection::vec(prop::collection::vec(1i64..=5, k), m),
            prop::collection::vec(0i64..=10, m),
            prop::collection::vec(-3i64..=5, k),
        )
            .prop_map(move |(p, b, c)| {
                let a = p
                    .into_iter()
                    .enumerate()
                    .map(|(i, mut row)| {
                        row.extend((0..m).map(|j| i64::from(i == j)));
                        ints(&row)
                    })
                    .collect();
                let mut c = ints(&c);
                c.extend(std::iter::repeat_n(Rational::ZERO, m));
                Problem::new(a, ints(&b), c).unwrap()
            })
    })
}

proptest! {
    #[test]
    fn enumerator_and_simplex_agree(problem in bounded_slack_problem()) {
        let naive = Enumerator::new().solve(&problem).unwrap();
        let simplex = Simplex::new().solve(&problem);
        prop_assume!(!matches!(simplex, Err(SolveError::DidNotConverge { .. })));
        let simplex = simplex.unwrap();

        prop_assert_eq!(naive.status, Status::Optimal);
        prop_assert!(matches!(simplex.status, Status::Optimal | Status::InfiniteOptimal));
        prop_assert_eq!(simplex.objective, naive.objective);

        for (row, &rhs) in problem.constraints().iter().zip(problem.rhs()) {
            prop_assert_eq!(dot(row, &simplex), rhs);
        }
        prop_assert!(simplex.assignments.iter().all(|a| !a.value.is_negative()));
        prop_assert_eq!(dot(problem.objective(), &simplex), simplex.objective);
    }
}
