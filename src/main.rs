use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser as ClapParser;

use letlang::ParsingContext;
use letlang::lexer::lex;
use letlang::parser::OperatorSpec;

#[derive(ClapParser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Source file to parse
    input: PathBuf,

    /// Operator table, one `<symbol> <precedence> <left|right|none>` per line
    #[arg(short, long)]
    operators: Option<PathBuf>,

    /// Print the syntax tree instead of the re-formatted source
    #[arg(long)]
    ast: bool,

    /// Print the token stream and stop
    #[arg(long)]
    tokens: bool,
}

fn load_operators(path: Option<&PathBuf>) -> anyhow::Result<OperatorSpec> {
    match path {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading operator table {}", path.display()))?;
            let spec = text
                .parse::<OperatorSpec>()
                .with_context(|| format!("invalid operator table {}", path.display()))?;
            Ok(spec)
        }
        None => Ok(OperatorSpec::standard()),
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();

    let operators = load_operators(args.operators.as_ref())?;
    log::info!("using {} operators", operators.len());
    let context = ParsingContext::new(operators)?;

    let source = fs::read_to_string(&args.input)
        .with_context(|| format!("reading {}", args.input.display()))?;
    let tokens = lex(&source)?;

    if args.tokens {
        for token in &tokens {
            println!("{}", token.describe());
        }
        return Ok(());
    }

    let program = context
        .parse(tokens)
        .with_context(|| format!("parsing {}", args.input.display()))?;

    if args.ast {
        println!("{program:#?}");
    } else {
        println!("{program}");
    }

    Ok(())
}
