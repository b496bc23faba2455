use clap::{Parser, Subcommand};
use dr_core::summary::{genre_counts, CategorySums};
use dr_core::constants::TOP_CATEGORY_COUNT;
use dr_core::tokenizer::tokenize;
use dr_core::{CoreConfig, DashboardContext, Dataset};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "dr")]
#[command(about = "Disaster response dataset and classifier CLI")]
struct Cli {
    /// SQLite database holding the message table
    #[arg(long, global = true)]
    database: Option<PathBuf>,
    /// Message table name
    #[arg(long, global = true)]
    table: Option<String>,
    /// Serialized classifier
    #[arg(long, global = true)]
    model: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print message counts per genre and the top categories by genre
    Summary,
    /// Classify a message and print the label of every category
    Classify {
        /// Message text
        query: String,
    },
    /// Print the tokens the classifier sees for a message
    Tokenize {
        /// Message text
        text: String,
    },
    /// List category columns
    Categories,
}

impl Cli {
    /// Flags win over `DR_*` environment variables, which win over the defaults.
    fn config(&self) -> Result<CoreConfig, dr_core::DashboardError> {
        self.config_with(|var| std::env::var(var).ok())
    }

    fn config_with(
        &self,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<CoreConfig, dr_core::DashboardError> {
        let path_or_env = |flag: &Option<PathBuf>, var: &str| {
            flag.as_ref()
                .map(|p| p.display().to_string())
                .or_else(|| env(var))
        };

        CoreConfig::from_values(
            path_or_env(&self.database, "DR_DATABASE_PATH"),
            self.table.clone().or_else(|| env("DR_TABLE_NAME")),
            path_or_env(&self.model, "DR_MODEL_PATH"),
        )
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match &cli.command {
        Commands::Summary => {
            let dataset = Dataset::load(&cli.config()?)?;

            println!("Messages per genre ({} total):", dataset.len());
            for (genre, count) in genre_counts(&dataset) {
                println!("  {genre:<12} {count:>8}");
            }

            let sums = CategorySums::compute(&dataset);
            println!();
            println!("Top {TOP_CATEGORY_COUNT} categories by genre:");
            print!("  {:<24}", "category");
            for genre in &sums.genres {
                print!(" {genre:>10}");
            }
            println!(" {:>10}", "total");
            for c in sums.top(TOP_CATEGORY_COUNT) {
                print!("  {:<24}", dataset.categories()[c]);
                for value in &sums.by_category[c] {
                    print!(" {value:>10}");
                }
                println!(" {:>10}", sums.total(c));
            }
        }
        Commands::Classify { query } => {
            let ctx = DashboardContext::load(&cli.config()?)?;
            let result = ctx.classify(query)?;
            for label in &result.labels {
                println!("{:<24} {}", label.category, label.label);
            }
        }
        Commands::Tokenize { text } => {
            for token in tokenize(text) {
                println!("{token}");
            }
        }
        Commands::Categories => {
            let dataset = Dataset::load(&cli.config()?)?;
            if dataset.categories().is_empty() {
                println!("No categories found.");
            } else {
                for category in dataset.categories() {
                    println!("{category}");
                }
            }
        }
    }

    Ok(())
}
