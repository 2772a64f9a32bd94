use clap::{Args, Parser, Subcommand};

use crate::ops::ids::IdKey;
use crate::ops::nav::NavPolicy;

#[derive(Parser)]
#[command(name = "sd", about = concat!("[>] stride v", env!("CARGO_PKG_VERSION"), " - step through your task queue"), version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as JSON
    #[arg(long, global = true)]
    pub json: bool,

    /// Run against a different session directory
    #[arg(short = 'C', long = "session-dir", global = true)]
    pub session_dir: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new stride session in the current directory
    Init(InitArgs),
    /// Manage the persisted id lists
    Ids(IdsCmd),
    /// Step to the next id
    Next(StepArgs),
    /// Step to the previous id
    Prev(StepArgs),
    /// Show or change the tracked route
    Route(RouteCmd),
    /// View or change session configuration
    Config(ConfigCmd),
}

// ---------------------------------------------------------------------------
// Init args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct InitArgs {
    /// Session name (default: inferred from directory name)
    #[arg(long)]
    pub name: Option<String>,
    /// Edge policy to write into the config (default: bounded)
    #[arg(long, value_enum)]
    pub policy: Option<NavPolicy>,
    /// Reinitialize even if stride/ already exists
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Id list args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct IdsCmd {
    #[command(subcommand)]
    pub action: IdsAction,
}

#[derive(Subcommand)]
pub enum IdsAction {
    /// Replace a list with a newline-delimited block of ids
    Set(IdsSetArgs),
    /// Print a list in order
    List(IdsListArgs),
    /// Remove both lists (task-exit cleanup)
    Clear,
}

#[derive(Args)]
pub struct IdsSetArgs {
    /// Which list to replace
    #[arg(value_enum)]
    pub key: IdKey,
    /// Read the block from this file instead of stdin
    #[arg(long)]
    pub file: Option<String>,
}

#[derive(Args)]
pub struct IdsListArgs {
    /// Which list to print
    #[arg(value_enum)]
    pub key: IdKey,
}

// ---------------------------------------------------------------------------
// Step args (next/prev)
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct StepArgs {
    /// Step from this id instead of the one tracked in the route
    #[arg(long)]
    pub id: Option<String>,
    /// Which list to step through
    #[arg(long, value_enum, default_value = "data_id")]
    pub key: IdKey,
    /// Override the configured edge policy for this step
    #[arg(long, value_enum)]
    pub policy: Option<NavPolicy>,
}

// ---------------------------------------------------------------------------
// Route args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct RouteCmd {
    #[command(subcommand)]
    pub action: RouteAction,
}

#[derive(Subcommand)]
pub enum RouteAction {
    /// Show the tracked route and its derived fields
    Show,
    /// Replace the tracked route with a URL
    Set(RouteSetArgs),
    /// Merge query parameters into the tracked route
    Update(RouteUpdateArgs),
    /// Forget the tracked route
    Clear,
}

#[derive(Args)]
pub struct RouteSetArgs {
    /// URL (path plus optional query string)
    pub url: String,
}

#[derive(Args)]
pub struct RouteUpdateArgs {
    /// KEY=VALUE pairs; an empty VALUE removes the key
    #[arg(required = true)]
    pub pairs: Vec<String>,
}

// ---------------------------------------------------------------------------
// Config args
// ---------------------------------------------------------------------------

#[derive(Args)]
pub struct ConfigCmd {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Set the edge policy in session.toml
    Policy(PolicyArgs),
}

#[derive(Args)]
pub struct PolicyArgs {
    #[arg(value_enum)]
    pub policy: NavPolicy,
}
