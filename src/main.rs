use std::{
    collections::HashMap,
    io::{self, BufRead, Write},
    process::ExitCode,
    sync::Arc,
};

use clap::{Parser, ValueEnum};
use dynexpr::{EvalConfig, Evaluator, Function, Functions, Value, Variables};
use tracing_subscriber::EnvFilter;

/// dynexpr evaluates small, dynamically typed expressions such as
/// `price * 1.2 > 100 && "sale" in tags`.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Binds a variable before evaluation. The right-hand side is itself an
    /// expression and may use variables bound earlier.
    #[arg(short, long = "var", value_name = "NAME=EXPR")]
    vars: Vec<String>,

    /// Rejects results of the given type.
    #[arg(long, value_enum)]
    reject: Vec<ResultType>,

    /// Starts an interactive session. The previous result is available as
    /// `ans`.
    #[arg(short, long)]
    interactive: bool,

    /// Logs evaluation steps to stderr. `RUST_LOG` selects a filter when
    /// this flag is absent.
    #[arg(long)]
    verbose: bool,

    /// The expression to evaluate.
    expression: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum ResultType {
    Nil,
    Bool,
    Integer,
    Float,
    String,
    Array,
    Object,
}

impl ResultType {
    const fn disable(self, config: &mut EvalConfig) {
        match self {
            Self::Nil => config.nil_result = false,
            Self::Bool => config.bool_result = false,
            Self::Integer => config.integer_result = false,
            Self::Float => config.float_result = false,
            Self::String => config.string_result = false,
            Self::Array => config.array_result = false,
            Self::Object => config.object_result = false,
        }
    }
}

/// Functions available to expressions typed on the command line.
///
/// `len` counts bytes for strings, matching the byte offsets used by
/// indexing and slicing.
fn demo_functions() -> Functions {
    let len: Function = Arc::new(|args: &[Value]| match args {
        [Value::Text(s)] => Ok(Value::Integer(count(s.len()))),
        [Value::Array(a)] => Ok(Value::Integer(count(a.len()))),
        [Value::Record(r)] => Ok(Value::Integer(count(r.len()))),
        [other] => Err(format!("cannot take the length of {}", other.type_name())),
        _ => Err(format!("expected 1 argument, got {}", args.len())),
    });
    let type_of: Function = Arc::new(|args: &[Value]| match args {
        [value] => Ok(Value::from(value.type_name())),
        _ => Err(format!("expected 1 argument, got {}", args.len())),
    });
    let random: Function = Arc::new(|args: &[Value]| match args {
        [] => Ok(Value::Real(rand::random::<f64>())),
        _ => Err(format!("expected no arguments, got {}", args.len())),
    });

    HashMap::from([("len".to_string(), len),
                   ("type".to_string(), type_of),
                   ("rand".to_string(), random)])
}

fn count(n: usize) -> i64 {
    i64::try_from(n).unwrap_or(i64::MAX)
}

/// Variables describing the host platform.
fn platform_variables() -> Variables {
    HashMap::from([("os".to_string(), Value::from(std::env::consts::OS)),
                   ("arch".to_string(), Value::from(std::env::consts::ARCH))])
}

/// Evaluates every `NAME=EXPR` binding in order, on top of the platform
/// variables.
fn bind_variables(evaluator: &Evaluator,
                  bindings: &[String],
                  functions: &Functions)
                  -> Result<Variables, String> {
    let mut variables = platform_variables();
    for binding in bindings {
        let Some((name, source)) = binding.split_once('=') else {
            return Err(format!("invalid binding {binding:?}, expected NAME=EXPR"));
        };
        let value = evaluator.evaluate(source, &variables, functions)
                             .map_err(|e| format!("{name}: {e}"))?;
        variables.insert(name.trim().to_string(), value);
    }
    Ok(variables)
}

fn repl(evaluator: &Evaluator, mut variables: Variables, functions: &Functions) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            writeln!(stdout)?;
            return Ok(());
        }
        let source = line.trim();
        if source.is_empty() {
            continue;
        }

        match evaluator.evaluate(source, &variables, functions) {
            Ok(value) => {
                writeln!(stdout, "{value}")?;
                variables.insert("ans".to_string(), value);
            },
            Err(e) => eprintln!("{e}"),
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();

    // Enabled by --verbose or RUST_LOG.
    if args.verbose || std::env::var("RUST_LOG").is_ok() {
        let filter = if args.verbose {
            EnvFilter::new("trace")
        } else {
            EnvFilter::from_default_env()
        };
        tracing_subscriber::fmt().with_env_filter(filter)
                                 .with_writer(io::stderr)
                                 .with_ansi(false)
                                 .init();
    }

    let mut config = EvalConfig::default();
    for result_type in &args.reject {
        result_type.disable(&mut config);
    }
    let evaluator = Evaluator::with_config(config);
    let functions = demo_functions();

    // Bindings are evaluated without the rejections.
    let variables = match bind_variables(&Evaluator::new(), &args.vars, &functions) {
        Ok(variables) => variables,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        },
    };

    if args.interactive {
        return match repl(&evaluator, variables, &functions) {
            Ok(()) => ExitCode::SUCCESS,
            Err(e) => {
                eprintln!("{e}");
                ExitCode::FAILURE
            },
        };
    }

    let Some(expression) = args.expression else {
        eprintln!("Nothing to evaluate. Pass an expression or use --interactive.");
        return ExitCode::FAILURE;
    };

    match evaluator.evaluate(&expression, &variables, &functions) {
        Ok(value) => {
            println!("{value}");
            ExitCode::SUCCESS
        },
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn eval(source: &str) -> Value {
        let functions = demo_functions();
        let variables = bind_variables(&Evaluator::new(), &[], &functions).unwrap();
        Evaluator::new().evaluate(source, &variables, &functions).unwrap()
    }

    #[test]
    fn len_counts_bytes_so_slices_round_trip() {
        assert_eq!(eval(r#"len("é")"#), Value::Integer(2));
        assert_eq!(eval(r#""héllo"[:len("héllo")]"#), Value::from("héllo"));
        assert_eq!(eval("len([1, 2, 3]) + len({\"a\": 1})"), Value::Integer(4));
    }

    #[test]
    fn rand_is_in_unit_interval() {
        assert_eq!(eval("rand() >= 0 && rand() < 1"), Value::Bool(true));
    }

    #[test]
    fn platform_variables_are_bound() {
        assert_eq!(eval("os"), Value::from(std::env::consts::OS));
        assert_eq!(eval("arch"), Value::from(std::env::consts::ARCH));
    }

    #[test]
    fn bindings_see_earlier_bindings() {
        let functions = demo_functions();
        let bindings = ["xs=[3, 1, 2]".to_string(), "n = len(xs)".to_string()];
        let variables = bind_variables(&Evaluator::new(), &bindings, &functions).unwrap();
        assert_eq!(variables["n"], Value::Integer(3));
        assert!(bind_variables(&Evaluator::new(), &["nope".to_string()], &functions).is_err());
    }
}
