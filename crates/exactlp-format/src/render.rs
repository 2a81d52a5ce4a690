use exactlp_solver::{Answer, Problem};

/// Status line, one `x_<i> = <value>` line per basic variable, then `z = <value>`.
pub fn render_answer(answer: &Answer) -> String {
    let mut out = format!("{}\n", answer.status);
    for assignment in &answer.assignments {
        out.push_str(&format!("x_{} = {}\n", assignment.variable, assignment.value));
    }
    out.push_str(&format!("z = {}\n", answer.objective));
    out
}

/// The objective row followed by each row of A with its entry of b.
pub fn render_problem(problem: &Problem) -> String {
    let objective: Vec<String> = problem.objective().iter().map(|c| c.to_string()).collect();
    let mut out = format!("coefficient:\n{}\nA and b:\n", objective.join("\t"));

    for (row, rhs) in problem.constraints().iter().zip(problem.rhs()) {
        for entry in row {
            out.push_str(&format!("{}\t", entry));
        }
        out.push_str(&format!("\t\t{}\n", rhs));
    }
    out
}
