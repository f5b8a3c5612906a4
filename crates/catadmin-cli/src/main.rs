mod editor;
mod products;

use catadmin_client::{CatalogClient, Session};
use catadmin_core::ImageHost;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use editor::FormArgs;

#[derive(Debug, Parser)]
#[command(name = "catadmin")]
#[command(about = "Product catalog administration")]
struct Cli {
    /// Bearer token for catalog changes (defaults to `CATADMIN_TOKEN`)
    #[arg(long, global = true)]
    token: Option<String>,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List products, optionally filtered by name
    List {
        /// Case-insensitive substring of the product name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show every field of one product
    Show { id: String },
    /// List a product's image URLs with their form indices
    Images { id: String },
    /// Delete a product
    Delete {
        id: String,
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
    /// Create a product
    Add {
        #[command(flatten)]
        form: FormArgs,
    },
    /// Edit a stored product
    Edit {
        id: String,
        #[command(flatten)]
        form: FormArgs,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = catadmin_core::load_app_config()?;

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(env = %config.env, api = %config.api_base_url, "loaded configuration");

    let client = CatalogClient::new(&config)?;
    let host = ImageHost::new(&config.image_host);
    let session = Session::from_optional(cli.token.or_else(|| config.token.clone()));

    match cli.command {
        Commands::List { search } => {
            products::run_list(&client, &session, &host, search.as_deref()).await?;
        }
        Commands::Show { id } => products::run_show(&client, &session, &id).await?,
        Commands::Images { id } => products::run_images(&client, &session, &host, &id).await?,
        Commands::Delete { id, yes } => products::run_delete(&client, &session, &id, yes).await?,
        Commands::Add { form } => editor::run_add(&client, &session, &form).await?,
        Commands::Edit { id, form } => {
            editor::run_edit(&client, &session, &host, &id, &form).await?;
        }
    }

    Ok(())
}
