//! `jobboard` CLI entry-point.
//!
//! Available sub-commands, one per company repository operation:
//! - `list`   — list companies, optionally filtered.
//! - `get`    — show one company with its jobs.
//! - `create` — add a company.
//! - `update` — change some fields of a company.
//! - `remove` — delete a company.

use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use db::repository::companies;
use db::{Company, CompanyFilter, CompanyUpdate};
use serde_json::Value;
use tracing::{error, info};

#[derive(Parser)]
#[command(name = "jobboard", about = "Manage companies in the job board database", version)]
struct Cli {
    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    #[arg(long, env = "DATABASE_MAX_CONNECTIONS", default_value_t = 5)]
    max_connections: u32,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List companies, ordered by name when any filter is given.
    List {
        /// Case-insensitive substring of the company name.
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        min_employees: Option<i32>,
        #[arg(long)]
        max_employees: Option<i32>,
    },
    /// Show a company and its jobs.
    Get { handle: String },
    /// Add a new company.
    Create {
        #[arg(long)]
        handle: String,
        #[command(flatten)]
        fields: CompanyFields,
    },
    /// Change only the given fields of a company.
    Update {
        handle: String,
        #[command(flatten)]
        fields: CompanyFields,
    },
    /// Delete a company.
    Remove { handle: String },
}

#[derive(Args)]
struct CompanyFields {
    #[arg(long)]
    name: Option<String>,
    #[arg(long)]
    description: Option<String>,
    #[arg(long)]
    num_employees: Option<i32>,
    #[arg(long)]
    logo_url: Option<String>,
}

impl CompanyFields {
    fn into_company(self, handle: String) -> anyhow::Result<Company> {
        Ok(Company {
            handle,
            name: self.name.context("--name is required")?,
            description: self.description.context("--description is required")?,
            num_employees: self.num_employees,
            logo_url: self.logo_url,
        })
    }

    fn into_update(self) -> CompanyUpdate {
        CompanyUpdate {
            name: self.name,
            description: self.description,
            num_employees: self.num_employees,
            logo_url: self.logo_url,
        }
    }
}

async fn run(cli: Cli) -> anyhow::Result<Value> {
    let store = db::pool::connect_store(&cli.database_url, cli.max_connections)
        .await
        .context("failed to connect to database")?;

    let output = match cli.command {
        Command::List {
            name,
            min_employees,
            max_employees,
        } => {
            let filter = CompanyFilter {
                name,
                min_employees,
                max_employees,
            };
            serde_json::to_value(companies::find_all(&store, &filter).await?)?
        }
        Command::Get { handle } => serde_json::to_value(companies::get(&store, &handle).await?)?,
        Command::Create { handle, fields } => {
            let data = fields.into_company(handle)?;
            let company = companies::create(&store, &data).await?;
            info!(handle = %company.handle, "company created");
            serde_json::to_value(company)?
        }
        Command::Update { handle, fields } => {
            let company = companies::update(&store, &handle, &fields.into_update()).await?;
            serde_json::to_value(company)?
        }
        Command::Remove { handle } => {
            companies::remove(&store, &handle).await?;
            info!(%handle, "company removed");
            serde_json::json!({ "deleted": handle })
        }
    };

    Ok(output)
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => match serde_json::to_string_pretty(&output) {
            Ok(text) => println!("{text}"),
            Err(e) => {
                error!("cannot render output: {e}");
                std::process::exit(1);
            }
        },
        Err(e) => {
            let status = e
                .downcast_ref::<db::DbError>()
                .map(db::DbError::status_code)
                .unwrap_or(500);
            error!(status, "{e:#}");
            std::process::exit(1);
        }
    }
}
