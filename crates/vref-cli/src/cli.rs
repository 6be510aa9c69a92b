use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "vref",
    about = "Encode and decode hash-encoded virtual references",
    version,
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[arg(long, global = true, default_value = "text")]
    pub format: OutputFormat,

    /// Hash store configuration (TOML), overlaid on the built-in tables
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Subcommand)]
pub enum Command {
    /// Decode a complete reference
    Decode(DecodeArgs),
    /// Decode a single resource run (e.g. "4-abc123")
    DecodeResource(DecodeArgs),
    /// Encode a node reference as a resource run
    EncodeNode(EncodeNodeArgs),
    /// Encode a classpath or repository path as a resource run
    EncodePath(EncodePathArgs),
    /// Encode a virtual reference
    EncodeVirtual(EncodeVirtualArgs),
    /// List the configured hash stores
    Stores,
}

#[derive(Args)]
pub struct DecodeArgs {
    pub encoded: String,
}

#[derive(Args)]
pub struct EncodeNodeArgs {
    /// Node reference, e.g. workspace://SpacesStore/<uuid>
    pub node: String,
}

#[derive(Args)]
#[group(required = true, multiple = false)]
pub struct EncodePathArgs {
    #[arg(long)]
    pub classpath: Option<String>,
    #[arg(long)]
    pub repository: Option<String>,
}

#[derive(Args)]
pub struct EncodeVirtualArgs {
    /// Classpath location of the template
    #[arg(long)]
    pub template: String,
    /// Path inside the template
    #[arg(long, default_value = "/")]
    pub template_path: String,
    /// The actual node the template is applied to
    #[arg(long)]
    pub node: String,
}
