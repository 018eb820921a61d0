use anyhow::{Context, bail};
use chrono::Local;
use clap::Parser;
use simplify_rs::{Metric, Simplifier, VocabTable};
use std::fs::{self, File};
use std::io::{self, BufRead, BufReader, Read};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Replace words with their nearest match from a restricted vocabulary", long_about = None)]
struct Args {
    /// Set verbosity level
    #[arg(short, long, default_value_t = 1)]
    verbose: i32,

    /// Comma-separated word embeddings file (word,v1,v2,...)
    #[arg(long, value_name = "FILE")]
    embeddings: PathBuf,

    /// Replacement word list, one word per line
    #[arg(long, value_name = "FILE")]
    replacements: PathBuf,

    /// Similarity metric: dot-product, cosine or euclidean
    #[arg(short, long, default_value_t = Metric::DotProduct)]
    metric: Metric,

    /// Output file (if not provided, writes to stdout)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Input text file (if not provided, reads from stdin)
    #[arg(value_name = "FILE")]
    input: Option<PathBuf>,
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    // Catch a bad output path before doing any work, so a failed run
    // cannot leave a half-written result behind.
    if let Some(output) = &args.output {
        if let Some(dir) = output.parent() {
            if !dir.as_os_str().is_empty() && !dir.is_dir() {
                bail!("output directory not found: {}", dir.display());
            }
        }
    }

    let embeddings = VocabTable::from_csv_file(&args.embeddings)
        .with_context(|| format!("reading embeddings from {}", args.embeddings.display()))?;
    if args.verbose > 0 {
        eprintln!(
            "loaded {} embeddings ({} dimensions)",
            embeddings.len(),
            embeddings.dims()
        );
    }

    let replacements = VocabTable::from_word_list_file(&args.replacements, &embeddings)
        .with_context(|| format!("reading replacement words from {}", args.replacements.display()))?;
    if args.verbose > 0 {
        eprintln!("loaded {} replacement words", replacements.len());
    }
    if replacements.is_empty() {
        eprintln!("Warning: no replacement word has an embedding; text will pass through unchanged");
    }

    let simplifier = Simplifier::new(embeddings, replacements)?;

    let mut text = String::new();
    let mut reader: Box<dyn BufRead> = match &args.input {
        Some(path) => {
            let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
            Box::new(BufReader::new(file))
        }
        None => Box::new(BufReader::new(io::stdin())),
    };
    reader.read_to_string(&mut text)?;

    let word_count = text.split_whitespace().count();
    let simplified = simplifier.process_text(args.metric, &text)?;

    match &args.output {
        Some(path) => fs::write(path, simplified + "\n")
            .with_context(|| format!("writing {}", path.display()))?,
        None => println!("{simplified}"),
    }

    if args.verbose > 0 {
        let time_str = Local::now().format("%x - %I:%M.%S%p");
        eprintln!(
            "{time_str}, simplified {word_count} words using the {} metric",
            args.metric
        );
    }

    Ok(())
}
