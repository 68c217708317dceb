//! Formulate CLI - natural language <-> propositional logic.
//!
//! Single binary that provides:
//! - `formulate formula` - translate a sentence into a CPC formula
//! - `formulate sentence` - translate a CPC formula into a sentence
//! - `formulate suggest` - propose atomic propositions for a sentence
//! - `formulate repl` - interactive session with an editable meanings table

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::{fmt, EnvFilter};

use formulate_core::{
    check_model_formula, extract_symbols, is_valid_formula, GroqClient, MeaningTable,
    TranslateError, Translator, TranslatorConfig,
};

#[derive(Parser)]
#[command(name = "formulate")]
#[command(about = "Natural language <-> propositional logic translator", version)]
struct Cli {
    /// Configuration file
    #[arg(short, long, global = true, default_value = "formulate.yaml")]
    config: PathBuf,

    /// Meanings table file
    #[arg(short, long, global = true, default_value = "meanings.yaml")]
    meanings: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Translate a natural-language sentence into a CPC formula
    Formula {
        /// Sentence to translate
        sentence: String,
    },

    /// Translate a CPC formula into a natural-language sentence
    Sentence {
        /// Formula to translate
        formula: String,
    },

    /// Suggest atomic propositions for a sentence and merge them into the table
    Suggest {
        /// Sentence to analyze
        sentence: String,
    },

    /// Interactive session
    Repl,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();

    // Configuration and credential are resolved before anything else is
    // built; a missing credential halts here.
    let mut config = TranslatorConfig::load_or_default(&cli.config)?;
    config.resolve_credential()?;
    tracing::debug!(model = %config.model, api_url = %config.api_url, "Configuration resolved");

    let client = GroqClient::new(&config)?;

    match cli.command {
        Commands::Formula { sentence } => {
            run_formula(&config, &client, &cli.meanings, &sentence).await
        }
        Commands::Sentence { formula } => {
            run_sentence(&config, &client, &cli.meanings, &formula).await
        }
        Commands::Suggest { sentence } => {
            run_suggest(&config, &client, &cli.meanings, &sentence).await
        }
        Commands::Repl => run_repl(&config, &client, &cli.meanings).await,
    }
}

/// Load the meanings table, seeding placeholders when no file exists yet.
fn load_table(path: &Path) -> Result<MeaningTable> {
    if path.exists() {
        Ok(MeaningTable::load(path)?)
    } else {
        Ok(MeaningTable::seeded())
    }
}

async fn run_formula(
    config: &TranslatorConfig,
    client: &GroqClient,
    meanings_path: &Path,
    sentence: &str,
) -> Result<()> {
    if sentence.trim().is_empty() {
        anyhow::bail!("sentence is empty; type a sentence to translate");
    }

    let table = load_table(meanings_path)?;
    let translator = Translator::new(config, client);
    let formula = translator.nl_to_cpc(sentence, &table).await?;

    println!("{formula}");

    match check_model_formula(&formula) {
        Ok(()) => {
            let symbols = extract_symbols(&formula);
            if !symbols.is_empty() {
                println!("symbols: {}", symbols.join(", "));
            }
        }
        Err(err) => eprintln!("warning: {err}"),
    }

    Ok(())
}

async fn run_sentence(
    config: &TranslatorConfig,
    client: &GroqClient,
    meanings_path: &Path,
    formula: &str,
) -> Result<()> {
    if formula.trim().is_empty() {
        anyhow::bail!("formula is empty; type a formula to translate");
    }
    if !is_valid_formula(formula) {
        return Err(TranslateError::InvalidFormula.into());
    }

    let table = load_table(meanings_path)?;
    let translator = Translator::new(config, client);
    let sentence = translator.cpc_to_nl(formula, &table).await?;

    println!("{sentence}");
    Ok(())
}

async fn run_suggest(
    config: &TranslatorConfig,
    client: &GroqClient,
    meanings_path: &Path,
    sentence: &str,
) -> Result<()> {
    if sentence.trim().is_empty() {
        anyhow::bail!("sentence is empty; type a sentence to analyze");
    }

    let mut table = load_table(meanings_path)?;
    let translator = Translator::new(config, client);
    let parse = translator.suggest_propositions(sentence).await?;

    if parse.meanings.is_empty() {
        println!("No propositions were suggested.");
        return Ok(());
    }

    println!("Suggested propositions:");
    for (symbol, description) in &parse.meanings {
        println!("  {symbol} = \"{description}\"");
    }
    if parse.skipped > 0 {
        println!("  ({} malformed suggestion lines dropped)", parse.skipped);
    }

    let merged = table.merge_suggestions(parse.meanings);
    if merged > 0 {
        table.save(meanings_path)?;
        println!("Merged {merged} propositions into {}", meanings_path.display());
    }

    Ok(())
}

async fn run_repl(
    config: &TranslatorConfig,
    client: &GroqClient,
    meanings_path: &Path,
) -> Result<()> {
    let mut table = load_table(meanings_path)?;
    let translator = Translator::new(config, client);

    println!("Formulate interactive session");
    print_repl_help();

    let stdin = std::io::stdin();
    let mut line = String::new();

    loop {
        print!("> ");
        std::io::stdout().flush()?;

        line.clear();
        if stdin.read_line(&mut line)? == 0 {
            break;
        }

        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        let (command, rest) = match input.split_once(char::is_whitespace) {
            Some((command, rest)) => (command, rest.trim()),
            None => (input, ""),
        };

        if matches!(command, "quit" | "exit") {
            break;
        }

        // An endpoint failure aborts the current action only; the session
        // and its table survive untouched.
        if let Err(err) = repl_action(&translator, &mut table, command, rest).await {
            eprintln!("error: {err:#}");
        }
    }

    Ok(())
}

async fn repl_action(
    translator: &Translator<'_>,
    table: &mut MeaningTable,
    command: &str,
    rest: &str,
) -> Result<()> {
    match command {
        "help" => print_repl_help(),

        "table" => {
            if table.is_empty() {
                println!("(empty)");
            }
            for (symbol, description) in table.iter() {
                println!("  {symbol} = \"{description}\"");
            }
        }

        "set" => {
            let Some((symbol, description)) = rest.split_once(char::is_whitespace) else {
                anyhow::bail!("usage: set <symbol> <description>");
            };
            table.set(symbol.trim(), description.trim());
        }

        "unset" => {
            if rest.is_empty() {
                anyhow::bail!("usage: unset <symbol>");
            }
            if table.remove(rest).is_none() {
                println!("no entry for {rest}");
            }
        }

        "formula" => {
            if rest.is_empty() {
                anyhow::bail!("usage: formula <sentence>");
            }
            let formula = translator.nl_to_cpc(rest, table).await?;
            println!("{formula}");
            if let Err(err) = check_model_formula(&formula) {
                eprintln!("warning: {err}");
            }
        }

        "sentence" => {
            if rest.is_empty() {
                anyhow::bail!("usage: sentence <formula>");
            }
            if !is_valid_formula(rest) {
                return Err(TranslateError::InvalidFormula.into());
            }
            let sentence = translator.cpc_to_nl(rest, table).await?;
            println!("{sentence}");
        }

        "suggest" => {
            if rest.is_empty() {
                anyhow::bail!("usage: suggest <sentence>");
            }
            let parse = translator.suggest_propositions(rest).await?;
            if parse.meanings.is_empty() {
                println!("No propositions were suggested.");
                return Ok(());
            }
            for (symbol, description) in &parse.meanings {
                println!("  {symbol} = \"{description}\"");
            }
            if parse.skipped > 0 {
                println!("  ({} malformed suggestion lines dropped)", parse.skipped);
            }
            let merged = table.merge_suggestions(parse.meanings);
            println!("merged {merged} propositions into the session table");
        }

        _ => println!("unknown command: {command} (try 'help')"),
    }

    Ok(())
}

fn print_repl_help() {
    println!("Commands:");
    println!("  formula <sentence>           translate a sentence into a formula");
    println!("  sentence <formula>           translate a formula into a sentence");
    println!("  suggest <sentence>           suggest propositions and merge them");
    println!("  set <symbol> <description>   add or replace a table entry");
    println!("  unset <symbol>               remove a table entry");
    println!("  table                        show the meanings table");
    println!("  help                         show this help");
    println!("  quit                         leave the session");
}
