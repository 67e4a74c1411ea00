use clap::{Parser, Subcommand};
use stampinator::error::Result;

mod cli;

#[derive(Parser)]
#[command(name = "stampinator")]
#[command(version = "0.1.0")]
#[command(about = "Add formatted timestamp fields to GraphQL types built from Postgres tables", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate example configuration
    Init {
        /// Output config file path (if not specified, outputs to stdout)
        #[arg(long)]
        output: Option<String>,
    },

    /// Print the GraphQL schema generated for the configured tables
    Schema {
        /// Config file path
        #[arg(long, default_value = "stampinator.toml")]
        config: String,
    },

    /// Print the SQL and bound parameters for one field selection
    Plan {
        /// Config file path
        #[arg(long, default_value = "stampinator.toml")]
        config: String,

        /// Table name as it appears in the config
        #[arg(long)]
        table: String,

        /// GraphQL field name, e.g. createdAtFormatted
        #[arg(long)]
        field: String,

        /// Response alias for the field
        #[arg(long)]
        alias: Option<String>,

        /// Postgres formatting pattern
        #[arg(long)]
        format: Option<String>,

        /// Timezone to format the date in
        #[arg(long)]
        tz: Option<String>,
    },

    /// Print the DDL for public.date_format_tz
    InstallSql,
}

fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into())
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Init { output } => {
            cli::init::run(output)?;
        }
        Commands::Schema { config } => {
            cli::schema::run(config)?;
        }
        Commands::Plan { config, table, field, alias, format, tz } => {
            cli::plan::run(config, table, field, alias, format, tz)?;
        }
        Commands::InstallSql => {
            print!("{}", stampinator::formatted::DATE_FORMAT_TZ_FUNCTION);
        }
    }

    Ok(())
}
