use clap::{Parser, Subcommand, ValueEnum};
use exactlp_solver::{Answer, Enumerator, Problem, Simplex};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "exactlp")]
#[command(about = "Exact rational linear programming", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Solve one or more problem files
    Solve {
        /// The files to solve, in order
        #[arg(required = true)]
        files: Vec<PathBuf>,
        /// Which solver to run
        #[arg(short, long, value_enum, default_value_t = Method::Both)]
        method: Method,
        /// Pivot limit for the simplex solver
        #[arg(long, default_value_t = 10_000)]
        max_iterations: usize,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = Format::Pretty)]
        format: Format,
        /// Print the problem before solving it
        #[arg(long)]
        show_input: bool,
    },
    /// Check a problem file for errors
    Check {
        /// The file to check
        file: PathBuf,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Method {
    Naive,
    Simplex,
    Both,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Format {
    Pretty,
    Json,
}

struct Options {
    method: Method,
    max_iterations: usize,
    format: Format,
    show_input: bool,
}

fn read_problem(file: &Path) -> Result<Problem, String> {
    let source = std::fs::read_to_string(file).map_err(|e| format!("Error reading file: {}", e))?;
    exactlp_format::Parser::parse(&source).map_err(|e| format!("Parse error: {}", e))
}

fn print_answer(file: &Path, method: &str, answer: &Answer, format: Format) {
    match format {
        Format::Pretty => {
            println!("{}:", method);
            print!("{}", exactlp_format::render_answer(answer));
        }
        Format::Json => {
            let value = serde_json::json!({
                "file": file.display().to_string(),
                "method": method,
                "answer": answer,
            });
            println!("{}", value);
        }
    }
}

fn solve_file(file: &Path, options: &Options) -> Result<(), String> {
    let problem = read_problem(file)?;
    log::info!(
        "{}: {} constraints, {} variables",
        file.display(),
        problem.num_rows(),
        problem.num_columns()
    );

    if options.format == Format::Pretty {
        println!("== {} ==", file.display());
    }
    if options.show_input {
        match options.format {
            Format::Pretty => print!("{}", exactlp_format::render_problem(&problem)),
            Format::Json => println!(
                "{}",
                serde_json::json!({ "file": file.display().to_string(), "problem": &problem })
            ),
        }
    }

    if matches!(options.method, Method::Naive | Method::Both) {
        let answer = Enumerator::new()
            .solve(&problem)
            .map_err(|e| format!("naive: {}", e))?;
        print_answer(file, "naive", &answer, options.format);
    }
    if matches!(options.method, Method::Simplex | Method::Both) {
        let answer = Simplex::new()
            .with_max_iterations(options.max_iterations)
            .solve(&problem)
            .map_err(|e| format!("simplex: {}", e))?;
        print_answer(file, "simplex", &answer, options.format);
    }
    Ok(())
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Solve {
            files,
            method,
            max_iterations,
            format,
            show_input,
        } => {
            let options = Options {
                method,
                max_iterations,
                format,
                show_input,
            };

            let mut failed = false;
            for file in &files {
                if let Err(e) = solve_file(file, &options) {
                    eprintln!("✗ {}: {}", file.display(), e);
                    failed = true;
                }
            }
            if failed {
                std::process::exit(1);
            }
        }
        Commands::Check { file } => match read_problem(&file) {
            Ok(problem) => {
                println!("✓ {} is valid", file.display());
                println!("  {} constraints", problem.num_rows());
                println!("  {} variables", problem.num_columns());
            }
            Err(e) => {
                eprintln!("✗ {} has errors:", file.display());
                eprintln!("  {}", e);
                std::process::exit(1);
            }
        },
    }
}
