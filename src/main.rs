use clap::{Args, Parser, Subcommand};
use keycalc::{history::History, number::format_number, *};
use miette::{IntoDiagnostic, Report};
use std::io::{self, Write};

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Evaluate one expression and print the result.
    Eval {
        #[command(flatten)]
        engine: EngineArgs,
        expression: String,
    },
    /// Print the tokens of an expression.
    Tokenize {
        #[arg(long, value_enum, default_value_t = Grammar::Compact)]
        grammar: Grammar,
        expression: String,
    },
    /// Read expressions from stdin until `exit`.
    Repl {
        #[command(flatten)]
        engine: EngineArgs,
    },
}

#[derive(Args, Debug)]
struct EngineArgs {
    #[arg(long, value_enum, default_value_t = Grammar::Compact)]
    grammar: Grammar,
    /// Override the grammar's division-by-zero policy.
    #[arg(long, value_enum)]
    div_zero: Option<DivisionByZero>,
    /// Override the grammar's missing-operand policy.
    #[arg(long, value_enum)]
    missing_operands: Option<MissingOperands>,
}

impl EngineArgs {
    fn evaluator(&self) -> Evaluator {
        let mut config = EvalConfig::new(self.grammar);
        if let Some(policy) = self.div_zero {
            config = config.with_division_by_zero(policy);
        }
        if let Some(policy) = self.missing_operands {
            config = config.with_missing_operands(policy);
        }
        Evaluator::new(config)
    }
}

fn init_logging() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("keycalc=warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr).with_target(false).without_time())
        .with(filter)
        .init();
}

fn main() -> miette::Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { engine, expression } => {
            let value = engine
                .evaluator()
                .evaluate(&expression)
                .map_err(|err| Report::new(err).with_source_code(expression.clone()))?;
            println!("{}", format_number(value));
        }
        Commands::Tokenize {
            grammar,
            expression,
        } => {
            for token in Lexer::new(&expression, grammar) {
                println!("{:?}", token);
            }
        }
        Commands::Repl { engine } => {
            let evaluator = engine.evaluator();
            let mut history = History::new();

            loop {
                print!("calc> ");
                io::stdout().flush().into_diagnostic()?;

                let mut input = String::new();
                if io::stdin().read_line(&mut input).into_diagnostic()? == 0 {
                    break;
                }
                let input = input.trim();
                if input.is_empty() {
                    continue;
                }
                if input.eq_ignore_ascii_case("exit") {
                    break;
                }
                if input.eq_ignore_ascii_case("history") {
                    println!("{history}");
                    continue;
                }

                match evaluator.evaluate_to_string(input) {
                    Ok(result) => {
                        println!("{result}");
                        history.push(input, result);
                    }
                    Err(err) => eprintln!("{:?}", Report::new(err).with_source_code(input.to_string())),
                }
            }
        }
    }

    Ok(())
}
