use std::path::PathBuf;

use clap::{Parser, Subcommand};

use stream_gateway::directory::{Channel, ChannelDirectory, SqliteDirectory};
use stream_gateway::upstream::directory_prefix;

#[derive(Parser)]
#[command(name = "channel-cli")]
#[command(about = "Manage the stream gateway's channel directory", long_about = None)]
struct Cli {
    /// SQLite channel store used by the gateway.
    #[arg(short, long, default_value = "channels.db", env = "STREAM_GATEWAY_DB")]
    db: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a channel or replace its upstream URL
    Add {
        code: String,
        upstream_url: String,
    },
    /// Remove a channel
    Remove { code: String },
    /// Show one channel
    Show { code: String },
    /// List all channels as JSON
    List,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let directory = SqliteDirectory::open(&cli.db)?;

    match cli.command {
        Commands::Add { code, upstream_url } => {
            // Reject URLs the gateway could not derive a directory from.
            let prefix = directory_prefix(&upstream_url)?;
            directory.upsert(&Channel::new(code.clone(), upstream_url))?;
            println!("Saved {code} (upstream directory {prefix})");
        }
        Commands::Remove { code } => {
            if directory.remove(&code)? {
                println!("Removed {code}");
            } else {
                eprintln!("No channel {code}");
                std::process::exit(1);
            }
        }
        Commands::Show { code } => match directory.find_by_code(&code)? {
            Some(channel) => println!("{}", serde_json::to_string_pretty(&channel)?),
            None => {
                eprintln!("No channel {code}");
                std::process::exit(1);
            }
        },
        Commands::List => {
            let channels = directory.list()?;
            println!("{}", serde_json::to_string_pretty(&channels)?);
        }
    }

    Ok(())
}
