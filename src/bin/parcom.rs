//! Command-line interface for parcom
//! Parses text with one of the ready-made grammars and prints the result.
//!
//! Usage:
//!   parcom parse `<input>` [--grammar `<name>`] [--rule `<rule>`] [--format `<format>`]
//!   parcom parse --file `<path>`                   - Parse the contents of a file
//!   parcom grammar [--grammar `<name>`]            - Print a grammar's rules
//!   parcom formats                               - List output formats and grammars
//!
//! Settings come from the embedded defaults, then `parcom.toml` in the working
//! directory, then `--config <file>`, then flags.
//! `RUST_LOG` controls logging; `-v` raises the default level to debug, `-vv` to trace.

use clap::{Arg, ArgAction, ArgMatches, Command};
use parcom::config::{Loader, OutputConfig, ParcomConfig, LOCAL_CONFIG};
use parcom::formats::{FormatError, FormatRegistry, TreevizFormatter};
use parcom::grammars::{self, lambda, number};
use parcom::{Grammar, GrammarError, ToSnapshot};
use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
enum CliError {
    #[error("no parse")]
    NoParse,
    #[error("unknown grammar '{0}' (available: {1})")]
    UnknownGrammar(String, String),
    #[error("grammar has no rule named '{0}'")]
    UnknownRule(String),
    #[error("error reading {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("configuration error: {0}")]
    Config(#[from] config::ConfigError),
    #[error(transparent)]
    Grammar(#[from] GrammarError),
    #[error(transparent)]
    Format(#[from] FormatError),
}

fn main() {
    let matches = Command::new("parcom")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Parse text with combinator grammars")
        .subcommand_required(true)
        .arg_required_else_help(true)
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .short('v')
                .help("Increase logging (-v debug, -vv trace)")
                .action(ArgAction::Count)
                .global(true),
        )
        .arg(
            Arg::new("config")
                .long("config")
                .short('c')
                .help("Configuration file layered over the built-in defaults")
                .global(true),
        )
        .subcommand(
            Command::new("parse")
                .about("Parse input and print the result")
                .allow_negative_numbers(true)
                .arg(
                    Arg::new("input")
                        .help("Text to parse")
                        .required_unless_present("file")
                        .conflicts_with("file")
                        .index(1),
                )
                .arg(
                    Arg::new("file")
                        .long("file")
                        .short('i')
                        .help("Read the text to parse from a file"),
                )
                .arg(grammar_arg())
                .arg(
                    Arg::new("rule")
                        .long("rule")
                        .short('r')
                        .help("Parse with this rule instead of the grammar's root"),
                )
                .arg(
                    Arg::new("format")
                        .long("format")
                        .short('f')
                        .help("Output format (treeviz, json, yaml, value)"),
                ),
        )
        .subcommand(
            Command::new("grammar")
                .about("Print the rules of a grammar")
                .arg(grammar_arg()),
        )
        .subcommand(Command::new("formats").about("List output formats and grammars"))
        .get_matches();

    init_logging(matches.get_count("verbose"));

    let result = match matches.subcommand() {
        Some(("parse", parse_matches)) => handle_parse_command(&matches, parse_matches),
        Some(("grammar", grammar_matches)) => handle_grammar_command(&matches, grammar_matches),
        Some(("formats", _)) => {
            handle_formats_command();
            Ok(())
        }
        _ => unreachable!(),
    };

    if let Err(e) = result {
        match e {
            CliError::NoParse => eprintln!("{}", e),
            _ => eprintln!("Error: {}", e),
        }
        std::process::exit(1);
    }
}

fn grammar_arg() -> Arg {
    Arg::new("grammar")
        .long("grammar")
        .short('g')
        .help("Grammar to use (lambda, number)")
}

fn init_logging(verbosity: u8) {
    let default_level = match verbosity {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .format_timestamp(None)
        .init();
}

/// Build the configuration from defaults, the optional file, and flags
fn load_config(root: &ArgMatches, sub: &ArgMatches) -> Result<ParcomConfig, CliError> {
    let mut loader = Loader::new().with_optional_file(LOCAL_CONFIG);
    if let Some(path) = sub
        .get_one::<String>("config")
        .or_else(|| root.get_one::<String>("config"))
    {
        loader = loader.with_file(path);
    }

    for (arg, key) in [
        ("grammar", "parse.grammar"),
        ("rule", "parse.rule"),
        ("format", "output.format"),
    ] {
        if let Ok(Some(value)) = sub.try_get_one::<String>(arg) {
            loader = loader.set_override(key, value.as_str())?;
        }
    }

    Ok(loader.build()?)
}

/// Handle the parse command
fn handle_parse_command(root: &ArgMatches, sub: &ArgMatches) -> Result<(), CliError> {
    let config = load_config(root, sub)?;

    let source = match sub.get_one::<String>("file") {
        Some(path) => std::fs::read_to_string(path).map_err(|source| CliError::Io {
            path: PathBuf::from(path),
            source,
        })?,
        None => sub.get_one::<String>("input").cloned().unwrap_or_default(),
    };
    let input = config.parse.prepare(&source);
    let rule = config.parse.rule.as_deref();

    let output = match config.parse.grammar.as_str() {
        "lambda" => render(&lambda::grammar()?, rule, input, &config.output)?,
        "number" => render(&number::grammar()?, rule, input, &config.output)?,
        other => return Err(unknown_grammar(other)),
    };

    print!("{}", output);
    Ok(())
}

fn render<T: ToSnapshot>(
    grammar: &Grammar<T>,
    rule: Option<&str>,
    input: &str,
    output: &OutputConfig,
) -> Result<String, CliError> {
    let rule = rule.unwrap_or(grammar.root());
    if grammar.rule(rule).is_none() {
        return Err(CliError::UnknownRule(rule.to_string()));
    }

    let node = grammar.parse_rule(rule, input).ok_or(CliError::NoParse)?;

    let mut registry = FormatRegistry::with_defaults();
    registry.register(TreevizFormatter::new(output.label_width));
    Ok(registry.serialize(&node.to_snapshot(), &output.format)?)
}

/// Handle the grammar command
fn handle_grammar_command(root: &ArgMatches, sub: &ArgMatches) -> Result<(), CliError> {
    let config = load_config(root, sub)?;
    let listing = match config.parse.grammar.as_str() {
        "lambda" => lambda::grammar()?.to_string(),
        "number" => number::grammar()?.to_string(),
        other => return Err(unknown_grammar(other)),
    };
    print!("{}", listing);
    Ok(())
}

/// Handle the formats command
fn handle_formats_command() {
    let registry = FormatRegistry::with_defaults();

    println!("Available output formats:\n");
    for name in registry.list_formats() {
        if let Some(formatter) = registry.get(&name) {
            println!("  {}", name);
            println!("    {}", formatter.description());
        }
    }

    println!("\nAvailable grammars:\n");
    for name in grammars::GRAMMAR_NAMES {
        println!("  {}", name);
        println!("    {}", grammars::describe(name).unwrap_or_default());
    }
}

fn unknown_grammar(name: &str) -> CliError {
    CliError::UnknownGrammar(name.to_string(), grammars::GRAMMAR_NAMES.join(", "))
}
