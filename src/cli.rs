use clap::{Parser, Subcommand};

use crate::goals::Goal;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Run the meal-plan optimization API server
    Serve {
        /// Address to bind
        #[arg(long, default_value = "127.0.0.1")]
        host: String,
        /// Port to listen on
        #[arg(long, default_value_t = 3001)]
        port: u16,
    },
    /// Generate a week of meals from the catalog and print macro breakdowns
    Plan {
        /// Path to the recipe catalog JSON document
        #[arg(short, long, default_value = "data/meals.json")]
        catalog: String,
        /// Fitness goal; scales servings and sets target macro ratios
        #[arg(short, long, value_enum, default_value_t = Goal::Maintenance)]
        goal: Goal,
        /// Allergen to avoid (repeatable)
        #[arg(short, long = "allergen")]
        allergens: Vec<String>,
        /// Seed for a reproducible plan; omit to draw from entropy
        #[arg(long)]
        seed: Option<u64>,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}
