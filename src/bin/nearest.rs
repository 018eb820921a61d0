use anyhow::Context;
use clap::Parser;
use simplify_rs::{Metric, Simplifier, VocabTable};
use std::io::{self, Write};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(author, version, about = "Rank the nearest replacement words interactively", long_about = None)]
struct Args {
    /// Comma-separated word embeddings file (word,v1,v2,...)
    #[arg(long, value_name = "FILE")]
    embeddings: PathBuf,

    /// Replacement word list, one word per line
    #[arg(long, value_name = "FILE")]
    replacements: PathBuf,

    /// Similarity metric: dot-product, cosine or euclidean
    #[arg(short, long, default_value_t = Metric::Cosine)]
    metric: Metric,

    /// Number of candidates to show
    #[arg(short = 'n', long, default_value_t = 10)]
    top: usize,
}

fn get_input() -> io::Result<String> {
    let mut s = String::new();
    io::stdin().read_line(&mut s)?;
    Ok(s.trim().to_string())
}

fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let embeddings = VocabTable::from_csv_file(&args.embeddings)
        .with_context(|| format!("reading embeddings from {}", args.embeddings.display()))?;
    let replacements = VocabTable::from_word_list_file(&args.replacements, &embeddings)
        .with_context(|| format!("reading replacement words from {}", args.replacements.display()))?;
    let simplifier = Simplifier::new(embeddings, replacements)?;

    println!(
        "Nearest Replacements Tool - {} candidates, {} metric - Type 'EXIT' to quit\n",
        simplifier.replacements().len(),
        args.metric
    );
    loop {
        print!("Enter a word: ");
        io::stdout().flush()?;
        let word = get_input()?;
        if word == "EXIT" {
            println!("Goodbye!");
            break;
        }
        if word.is_empty() {
            println!("No word was input. Try again");
            continue;
        }
        if simplifier.replacements().contains(&word) {
            println!("'{word}' is already in the replacement vocabulary");
            continue;
        }
        if simplifier.embeddings().get(&word).is_none() {
            println!("'{word}' is out of vocabulary");
            continue;
        }

        let ranked = simplifier.rank_replacements(args.metric, &word, args.top)?;
        if ranked.is_empty() {
            println!("No candidates!");
            continue;
        }

        println!("\nNearest replacements for '{word}':");
        println!("{:>4} {:>10} Word", "Rank", "Score");
        println!("{}", "-".repeat(30));
        for (i, (candidate, score)) in ranked.iter().enumerate() {
            println!("{:4}: {:10.6} {candidate}", i + 1, score);
        }
        println!();
    }

    Ok(())
}
