use clap::{Parser, Subcommand, ValueEnum};

#[derive(Parser)]
#[command(name = "octofhir")]
#[command(about = "OctoFHIR CLI: talk to any FHIR server")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// FHIR base URL (overrides config and OCTOFHIR_URL env var)
    #[arg(short, long, global = true, env = "OCTOFHIR_URL")]
    pub server: Option<String>,

    /// Config profile name
    #[arg(short, long, global = true, env = "OCTOFHIR_PROFILE", default_value = "default")]
    pub profile: String,

    /// Output format
    #[arg(short, long, global = true)]
    pub format: Option<OutputFormat>,

    /// Log requests (same as RUST_LOG=debug)
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Clone, Copy, ValueEnum, Default)]
pub enum OutputFormat {
    #[default]
    Json,
    Table,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Store credentials for a FHIR server
    Login(LoginArgs),
    /// Remove stored credentials
    Logout,
    /// Show current auth info
    Whoami,
    /// Read a resource by reference (e.g. Patient/123)
    Get(GetArgs),
    /// GET an absolute URL (e.g. a bundle next link)
    FetchUrl(FetchUrlArgs),
    /// Search for resources
    Search(SearchArgs),
    /// Create a resource (transaction bundles go to the server root)
    Create(CreateArgs),
    /// Update a resource; the body must carry its id
    Update(UpdateArgs),
    /// Conditional update: PUT to the type endpoint with search params
    Upsert(UpsertArgs),
    /// Delete a resource
    Delete(DeleteArgs),
    /// Get server CapabilityStatement
    Metadata,
    /// Manage CLI configuration
    Config(ConfigArgs),
}

#[derive(clap::Args)]
pub struct LoginArgs {
    /// Username (Basic auth)
    #[arg(short, long, conflicts_with = "token")]
    pub username: Option<String>,
    /// Password (Basic auth)
    #[arg(long, requires = "username")]
    pub password: Option<String>,
    /// Access token obtained elsewhere (Bearer auth)
    #[arg(long)]
    pub token: Option<String>,
}

#[derive(clap::Args)]
pub struct GetArgs {
    /// Resource reference (e.g. Patient/123)
    pub reference: String,
    /// Query parameters as key=value pairs (e.g. _summary=true)
    pub params: Vec<String>,
}

#[derive(clap::Args)]
pub struct FetchUrlArgs {
    /// Absolute URL
    pub url: String,
}

#[derive(clap::Args)]
pub struct SearchArgs {
    /// Resource type (e.g. Patient)
    pub resource_type: String,
    /// Search parameters as key=value pairs; repeat a key for several values
    pub params: Vec<String>,
    /// Number of results per page
    #[arg(long)]
    pub count: Option<u32>,
    /// Use POST {type}/_search with a form body
    #[arg(long)]
    pub post: bool,
    /// Print only the resources of the result bundle
    #[arg(long)]
    pub resources: bool,
}

#[derive(clap::Args)]
pub struct CreateArgs {
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
    /// Post to this absolute URL instead of the type endpoint
    #[arg(long)]
    pub url: Option<String>,
}

#[derive(clap::Args)]
pub struct UpdateArgs {
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct UpsertArgs {
    /// Identifying search parameters as key=value pairs (e.g. identifier=mrn|123)
    pub params: Vec<String>,
    /// Path to JSON file (reads from stdin if omitted)
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(clap::Args)]
pub struct DeleteArgs {
    /// Resource reference (e.g. Patient/123)
    pub reference: String,
}

#[derive(clap::Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand)]
pub enum ConfigCommands {
    /// Show current config
    Show,
    /// Set config value
    Set(ConfigSetArgs),
}

#[derive(clap::Args)]
pub struct ConfigSetArgs {
    /// Key to set (server, format, post_encoding)
    pub key: String,
    /// Value
    pub value: String,
}
