use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `TaskBridge` - chat-driven todo assistant.
#[derive(Parser, Debug)]
#[command(name = "taskbridge")]
#[command(author = "theonlyhennygod")]
#[command(version = "0.1.0")]
#[command(about = "Bridge natural-language commands to a remote Todo API.", long_about = None)]
pub struct Cli {
    /// Path to config file (default: ./taskbridge.toml when present)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the chat gateway server
    Serve {
        /// Port to listen on (use 0 for a random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Run a single chat command and print the reply
    Chat {
        /// The chat message, e.g. "add buy milk"
        #[arg(short, long)]
        message: String,

        /// Bearer token for the Todo backend
        #[arg(short, long)]
        token: String,
    },
}
