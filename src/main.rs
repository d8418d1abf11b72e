//! Prints the Huffman code of every symbol of an alphabet, with the
//! alphabet's entropy and the code's average length.

use std::error::Error;

use clap::Parser;
use log::{info, LevelFilter};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};

use huffman_table::{stats, Alphabet, CodeTable, Encoded, Strategy};

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Cli {
    /// Symbols as NAME=PROBABILITY pairs. Defaults to a five-symbol example.
    #[clap(parse(try_from_str = parse_pair))]
    symbols: Vec<(String, f64)>,

    /// Take the symbols and their frequencies from the grapheme clusters of TEXT
    #[clap(long, conflicts_with = "symbols")]
    text: Option<String>,

    /// Re-sort the whole forest before each merge instead of using a heap
    #[clap(long)]
    sorted: bool,

    /// Log more (-v info, -vv debug, -vvv trace)
    #[clap(short, long, parse(from_occurrences))]
    verbose: u64,
}

fn parse_pair(s: &str) -> Result<(String, f64), Box<dyn Error + Send + Sync + 'static>> {
    let at = s
        .rfind('=')
        .ok_or_else(|| format!("expected NAME=PROBABILITY, got `{}`", s))?;
    Ok((s[..at].to_string(), s[at + 1..].parse()?))
}

fn bits(code: &Encoded) -> String {
    code.iter().map(|b| if *b { '1' } else { '0' }).collect()
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    let level = match cli.verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    TermLogger::init(
        level,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )?;

    let alphabet = match (cli.text, cli.symbols.is_empty()) {
        (Some(text), _) => Alphabet::from_text(&text)?,
        (None, true) => Alphabet::new(vec![
            ("a1", 0.15),
            ("a2", 0.04),
            ("a3", 0.26),
            ("a4", 0.05),
            ("a5", 0.5),
        ])?,
        (None, false) => Alphabet::new(cli.symbols)?,
    };
    let strategy = if cli.sorted {
        Strategy::SortedForest
    } else {
        Strategy::Heap
    };
    info!("building {} symbols with {:?}", alphabet.len(), strategy);

    let table = CodeTable::build_with(&alphabet, strategy)?;
    for symbol in &alphabet {
        println!("code for {} is: {}", symbol.id, bits(&table.code_for(&symbol.id)?));
    }
    println!("Entropy = {:.6}", stats::entropy(&alphabet));
    println!(
        "Average length = {:.6}",
        stats::average_length(&table, &alphabet)?
    );
    Ok(())
}
