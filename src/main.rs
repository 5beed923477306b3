use clap::Parser;
use expression_interpreter::context::Context;
use expression_interpreter::errors::{EvalError, Result};
use expression_interpreter::options::{EvalOptions, OverflowMode};
use expression_interpreter::{Evaluator, Expr};
use tracing::Level;

/// Simple runner: bind variables and evaluate one expression tree.
#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Args {
    /// Bind a variable, e.g. `--set x=5` (repeatable)
    #[arg(long = "set", value_name = "NAME=VALUE")]
    set: Vec<String>,
    /// Bindings as a JSON object, e.g. '{"x":5,"y":8}'
    #[arg(long)]
    vars: Option<String>,
    /// Expression tree as JSON, e.g. '{"add":[{"var":"x"},{"var":"y"}]}'.
    /// Defaults to ((x + y) - z) * a
    #[arg(long)]
    tree: Option<String>,
    /// Integer overflow policy
    #[arg(long, value_enum, default_value_t = OverflowMode::Checked)]
    overflow: OverflowMode,
    /// Log evaluation details to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn parse_binding(raw: &str) -> Result<(String, i64)> {
    let (name, value) = raw
        .split_once('=')
        .ok_or_else(|| EvalError::InvalidInput(format!("expected NAME=VALUE, got `{raw}`")))?;
    let name = name.trim();
    if name.is_empty() {
        return Err(EvalError::InvalidInput(format!("missing variable name in `{raw}`")));
    }
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|e| EvalError::InvalidInput(format!("bad value for `{name}`: {e}")))?;
    Ok((name.to_string(), value))
}

fn demo_tree() -> Expr {
    Expr::multiply(
        Expr::subtract(Expr::add(Expr::var("x"), Expr::var("y")), Expr::var("z")),
        Expr::var("a"),
    )
}

fn build_context(args: &Args) -> Result<Context> {
    let mut ctx = match args.vars.as_deref() {
        Some(json) => serde_json::from_str::<Context>(json)
            .map_err(|e| EvalError::InvalidInput(format!("bad --vars JSON: {e}")))?,
        None => Context::new(),
    };
    for raw in &args.set {
        let (name, value) = parse_binding(raw)?;
        ctx.set(name, value);
    }
    if ctx.is_empty() && args.tree.is_none() {
        ctx.extend([("a", 2), ("x", 5), ("y", 8), ("z", 2)]);
    }
    Ok(ctx)
}

fn run(args: &Args) -> Result<i64> {
    let ctx = build_context(args)?;
    let expr = match args.tree.as_deref() {
        Some(json) => serde_json::from_str::<Expr>(json)
            .map_err(|e| EvalError::InvalidInput(format!("bad --tree JSON: {e}")))?,
        None => demo_tree(),
    };
    tracing::info!(%expr, bound = ?ctx.names(), "evaluating");

    let evaluator = Evaluator::new(EvalOptions::default().with_overflow(args.overflow));
    evaluator.evaluate(&expr, &ctx)
}

fn main() {
    // Parse CLI arguments.
    let args = Args::parse();

    tracing_subscriber::fmt()
        .with_max_level(if args.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(std::io::stderr)
        .init();

    match run(&args) {
        Ok(value) => println!("Result: {value}"),
        Err(e) => {
            eprintln!("{e}");
            std::process::exit(1);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn parses_bindings() {
        assert_eq!(parse_binding("x=5").unwrap(), ("x".to_string(), 5));
        assert_eq!(parse_binding(" y = -8").unwrap(), ("y".to_string(), -8));
        assert!(parse_binding("x").is_err());
        assert!(parse_binding("x=five").is_err());
        assert!(matches!(parse_binding("=5"), Err(EvalError::InvalidInput(_))));
        assert!(matches!(parse_binding("  =5"), Err(EvalError::InvalidInput(_))));
    }

    #[test]
    fn demo_defaults_evaluate_to_22() {
        let args = Args::parse_from(["exint"]);
        assert_eq!(run(&args), Ok(22));
    }

    #[test]
    fn explicit_tree_gets_no_default_bindings() {
        let args = Args::parse_from(["exint", "--tree", r#"{"var":"a"}"#]);
        assert_eq!(run(&args), Err(EvalError::UnboundVariable("a".into())));
    }

    #[test]
    fn set_overrides_vars_json() {
        let args = Args::parse_from([
            "exint",
            "--vars",
            r#"{"x":3}"#,
            "--set",
            "x=4",
            "--tree",
            r#"{"multiply":[{"var":"x"},{"var":"x"}]}"#,
        ]);
        assert_eq!(run(&args), Ok(16));
    }

    #[test]
    fn malformed_tree_json_is_invalid_input() {
        let args = Args::parse_from(["exint", "--tree", r#"{"divide":[]}"#]);
        assert!(matches!(run(&args), Err(EvalError::InvalidInput(_))));

        let args = Args::parse_from(["exint", "--tree", "not json"]);
        assert!(matches!(run(&args), Err(EvalError::InvalidInput(_))));
    }

    #[test]
    fn malformed_vars_json_is_invalid_input() {
        let args = Args::parse_from(["exint", "--vars", r#"{"x":"five"}"#]);
        assert!(matches!(run(&args), Err(EvalError::InvalidInput(_))));

        let args = Args::parse_from(["exint", "--vars", "[1, 2]"]);
        assert!(matches!(run(&args), Err(EvalError::InvalidInput(_))));
    }

    #[test]
    fn malformed_set_is_invalid_input() {
        let args = Args::parse_from(["exint", "--set", "=5"]);
        assert!(matches!(run(&args), Err(EvalError::InvalidInput(_))));
    }
}
