mod assets;
mod catalog;
mod generate;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "socdeck")]
#[command(about = "Compose branded social media reports as PPTX decks")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Generate a report for one customer and month.
    Generate {
        /// Customer id from the customer directory.
        #[arg(long)]
        customer: String,
        /// Target month as YYYY-MM.
        #[arg(long)]
        month: String,
        /// Restrict to these platforms (repeatable). Defaults to all enabled.
        #[arg(long = "platform")]
        platforms: Vec<String>,
        /// Free-text notes shown on the summary slide.
        #[arg(long)]
        notes: Option<String>,
        /// Output directory; overrides `SOCDECK_OUTPUT_DIR`.
        #[arg(long)]
        output: Option<std::path::PathBuf>,
        /// Print the module outcomes as JSON.
        #[arg(long)]
        json: bool,
    },
    /// List the slide module catalog in render order.
    Modules {
        /// Only show modules that run for these platforms (repeatable).
        #[arg(long = "platform")]
        platforms: Vec<String>,
    },
    /// Fetch every logo and thumbnail URL once and report which are usable.
    CheckAssets {
        /// Limit the check to one customer's logo and accounts.
        #[arg(long)]
        customer: Option<String>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = socdeck_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
    tracing::debug!(env = %config.env, "configuration loaded");

    match cli.command {
        Commands::Generate {
            customer,
            month,
            platforms,
            notes,
            output,
            json,
        } => {
            let args = generate::GenerateArgs {
                customer: &customer,
                month: &month,
                platforms: &platforms,
                notes: notes.as_deref(),
                output: output.as_deref(),
                json,
            };
            generate::run_generate(&config, &args).await
        }
        Commands::Modules { platforms } => catalog::run_modules(&platforms),
        Commands::CheckAssets { customer } => {
            assets::run_check_assets(&config, customer.as_deref()).await
        }
    }
}

#[cfg(test)]
mod tests;
