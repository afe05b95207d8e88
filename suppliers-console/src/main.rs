//! Suppliers console - terminal form for the suppliers REST API
//!
//! # Commands
//!
//! - `suppliers-console create --name <N> --category <C>` - create a supplier
//! - `suppliers-console retrieve <ID>` - load a supplier into the form
//! - `suppliers-console search --category <C>` - list matching suppliers
//! - `suppliers-console shell` - interactive form that keeps its fields between commands

use std::process::ExitCode;

use clap::{Args, Parser, Subcommand};
use suppliers_console::{shell, FormField, HttpSupplierApi, SupplierForm};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "suppliers-console")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Base URL of the suppliers service
    #[arg(long, global = true, env = "SUPPLIERS_URL", default_value = "http://localhost:8080")]
    base_url: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct SupplierFields {
    #[arg(long)]
    name: String,

    #[arg(long)]
    category: String,

    /// true or false
    #[arg(long, default_value_t = false, action = clap::ArgAction::Set)]
    available: bool,

    #[arg(long)]
    status: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a supplier
    Create {
        #[command(flatten)]
        fields: SupplierFields,
    },

    /// Retrieve a supplier by id
    Retrieve { id: String },

    /// Replace a supplier's fields
    Update {
        id: String,

        #[command(flatten)]
        fields: SupplierFields,
    },

    /// Delete a supplier by id
    Delete { id: String },

    /// Search suppliers; omitted filters match everything
    Search {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        category: Option<String>,

        /// Only available suppliers
        #[arg(long)]
        available: bool,

        #[arg(long)]
        status: Option<String>,
    },

    /// Interactive form
    Shell,
}

impl SupplierFields {
    fn apply(self, form: &mut SupplierForm) {
        form.set(FormField::Name, self.name);
        form.set(FormField::Category, self.category);
        form.set(FormField::Available, self.available.to_string());
        form.set(FormField::Status, self.status.unwrap_or_default());
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let default_filter = if cli.verbose {
        "suppliers_console=debug"
    } else {
        "suppliers_console=warn"
    };
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let api = HttpSupplierApi::new(&cli.base_url)?;
    tracing::debug!("Using suppliers service at {}", api.base_url());

    let mut form = SupplierForm::new();
    let result = match cli.command {
        Commands::Create { fields } => {
            fields.apply(&mut form);
            form.create(&api).await
        }
        Commands::Retrieve { id } => {
            form.set(FormField::Id, id);
            form.retrieve(&api).await
        }
        Commands::Update { id, fields } => {
            form.set(FormField::Id, id);
            fields.apply(&mut form);
            form.update(&api).await
        }
        Commands::Delete { id } => {
            form.set(FormField::Id, id);
            form.delete(&api).await
        }
        Commands::Search {
            name,
            category,
            available,
            status,
        } => {
            form.set(FormField::Name, name.unwrap_or_default());
            form.set(FormField::Category, category.unwrap_or_default());
            form.set(FormField::Available, if available { "true" } else { "" });
            form.set(FormField::Status, status.unwrap_or_default());
            form.search(&api).await
        }
        Commands::Shell => {
            let stdin = tokio::io::BufReader::new(tokio::io::stdin());
            shell::run(&api, &mut form, stdin, tokio::io::stdout()).await?;
            return Ok(ExitCode::SUCCESS);
        }
    };

    print!("{}", form);
    match result {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(err) => {
            tracing::debug!("Operation failed: {}", err);
            Ok(ExitCode::FAILURE)
        }
    }
}
