//! aritlex command-line scanner

use aritlex_error::{Diagnostics, DiagnosticRenderer, LexError, SourceFile};
use aritlex_lexer::{
    classify::classify, Lexer, PayloadOverflow, ScanOptions, Token,
    TokenBuffer, TokenKind, UnknownInput,
};
use clap::{Args, Parser, Subcommand, ValueEnum};
use std::fs;
use std::path::PathBuf;
use std::process;

#[derive(Parser)]
#[command(name = "aritlex")]
#[command(version)]
#[command(about = "Arithmetic expression scanner", long_about = None)]
struct Cli {
    /// More logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prints the tokens of a file or an inline expression
    Lex(LexArgs),

    /// Prints the dispatch class of every byte of an expression (debug)
    Classify {
        #[arg(value_name = "EXPR")]
        expr: String,
    },
}

#[derive(Args)]
struct LexArgs {
    /// Input file
    #[arg(value_name = "FILE", required_unless_present = "expr", conflicts_with = "expr")]
    input: Option<PathBuf>,

    /// Expression to scan instead of a file
    #[arg(short, long, value_name = "EXPR")]
    expr: Option<String>,

    /// Scan into a buffer of this many tokens instead of streaming
    #[arg(short, long, value_name = "N")]
    capacity: Option<usize>,

    /// What to do with characters that start no token
    #[arg(short, long, value_enum, default_value = "skip")]
    unknown: UnknownArg,

    /// Truncate over-long names and strings instead of failing
    #[arg(long)]
    truncate: bool,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    format: Format,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum UnknownArg {
    Skip,
    Error,
    Reject,
}

impl From<UnknownArg> for UnknownInput {
    fn from(arg: UnknownArg) -> Self {
        match arg {
            UnknownArg::Skip => UnknownInput::Skip,
            UnknownArg::Error => UnknownInput::EmitError,
            UnknownArg::Reject => UnknownInput::Reject,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
enum Format {
    #[default]
    Table,
    Json,
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Lex(args) => run_lex(args),
        Commands::Classify { expr } => {
            for (offset, byte) in expr.bytes().enumerate() {
                println!(
                    "  {:4}  {:<6}  {}",
                    offset,
                    aritlex_error::describe_byte(byte),
                    classify(byte).as_str()
                );
            }
        }
    }
}

fn run_lex(args: LexArgs) {
    let (name, source) = match (&args.expr, &args.input) {
        (Some(expr), _) => ("<expr>".to_string(), expr.clone().into_bytes()),
        (None, Some(path)) => match fs::read(path) {
            Ok(bytes) => (path.display().to_string(), bytes),
            Err(e) => {
                eprintln!("Error reading file: {}", e);
                process::exit(1);
            }
        },
        (None, None) => {
            eprintln!("Error: pass a FILE or --expr");
            process::exit(2);
        }
    };

    let overflow = if args.truncate {
        PayloadOverflow::Truncate
    } else {
        PayloadOverflow::Reject
    };
    let options = ScanOptions::new()
        .with_unknown(args.unknown.into())
        .with_overflow(overflow);
    tracing::debug!(?options, input = %name, bytes = source.len(), "scanning");

    // The scanner works on raw bytes; the lossy text is only for display
    let file = SourceFile::new(name, String::from_utf8_lossy(&source).into_owned());

    match scan_source(&source, args.capacity, options) {
        Ok((tokens, warnings)) => {
            print_tokens(&tokens, args.format);
            if !warnings.is_empty() {
                eprintln!("{}", warnings.render(&file));
            }
        }
        Err(error) => {
            let renderer = DiagnosticRenderer::new(&file);
            eprintln!("{}", renderer.render(&error.to_diagnostic()));
            process::exit(1);
        }
    }
}

/// Scans into a buffer of `capacity` tokens, or as a stream without one
fn scan_source(
    source: &[u8],
    capacity: Option<usize>,
    options: ScanOptions,
) -> Result<(Vec<Token>, Diagnostics), LexError> {
    match capacity {
        Some(capacity) => scan_buffered(source, capacity, options),
        None => scan_streaming(source, options),
    }
}

fn scan_buffered(
    source: &[u8],
    capacity: usize,
    options: ScanOptions,
) -> Result<(Vec<Token>, Diagnostics), LexError> {
    let mut buffer = TokenBuffer::with_capacity(capacity);
    let mut lexer = Lexer::with_options(source, options);
    let count = lexer.fill(&mut buffer)?;
    tracing::debug!(count, capacity, "buffer filled");
    Ok((buffer.into_vec(), lexer.take_diagnostics()))
}

fn scan_streaming(source: &[u8], options: ScanOptions) -> Result<(Vec<Token>, Diagnostics), LexError> {
    let mut lexer = Lexer::with_options(source, options);
    let tokens = lexer.by_ref().collect::<Result<Vec<_>, _>>()?;
    Ok((tokens, lexer.take_diagnostics()))
}

fn print_tokens(tokens: &[Token], format: Format) {
    match format {
        Format::Table => {
            for token in tokens {
                let display = match &token.kind {
                    TokenKind::Eof => String::new(),
                    kind => kind.to_string(),
                };
                println!(
                    "  {:4}:{:<3}  {:<12}  {}",
                    token.span.start.line,
                    token.span.start.column,
                    token.kind.name(),
                    display
                );
            }
            println!("\nTotal: {} tokens", tokens.len());
        }
        Format::Json => match serde_json::to_string_pretty(tokens) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("Error serializing tokens: {}", e);
                process::exit(1);
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn kinds(tokens: &[Token]) -> Vec<TokenKind> {
        tokens.iter().map(|t| t.kind.clone()).collect()
    }

    #[test]
    fn test_invalid_utf8_byte_reaches_the_scanner() {
        let options = ScanOptions::new().with_unknown(UnknownInput::EmitError);
        for capacity in [None, Some(8)] {
            let (tokens, _) = scan_source(b"x \xE9 y", capacity, options).unwrap();
            assert_eq!(
                kinds(&tokens),
                vec![
                    TokenKind::Name("x".into()),
                    TokenKind::Error(0xE9),
                    TokenKind::Name("y".into()),
                    TokenKind::Eof
                ]
            );
        }
    }

    #[test]
    fn test_non_utf8_string_is_bounded_by_raw_length() {
        let mut source = vec![b'"'];
        source.extend(std::iter::repeat(0xE9).take(50));
        source.push(b'"');

        let (tokens, warnings) = scan_source(&source, Some(4), ScanOptions::default()).unwrap();
        assert_eq!(
            kinds(&tokens),
            vec![
                TokenKind::StringLit("\u{FFFD}".repeat(50)),
                TokenKind::Eof
            ]
        );
        assert!(warnings.is_empty());
        assert_eq!(tokens[0].span.len(), 52);
    }

    #[test]
    fn test_skipped_bytes_are_reported_as_warnings() {
        let (tokens, warnings) = scan_source(b"1 \xE9 2", None, ScanOptions::default()).unwrap();
        assert_eq!(tokens.len(), 3);
        assert_eq!(warnings.len(), 1);

        let file = SourceFile::new("<expr>", "1 \u{FFFD} 2");
        assert!(warnings.render(&file).contains("skipped character 0xE9"));
    }
}
