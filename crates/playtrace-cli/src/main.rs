mod logging;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use playtrace_core::Config;

#[derive(Parser)]
#[command(name = "playtrace")]
#[command(about = "QA test case, test run and test suite tracker", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the REST API server
    Serve {
        /// Address to bind
        #[arg(long)]
        host: Option<String>,
        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
        /// Directory with the built browser client to serve
        #[arg(long)]
        static_dir: Option<PathBuf>,
        /// Open the browser once the server is up
        #[arg(long)]
        open: bool,
        /// Config file to use instead of the default locations
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the default configuration
    Config,
}

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve {
            host,
            port,
            static_dir,
            open,
            config,
        } => {
            let mut config = match config {
                Some(path) => Config::from_file(path)?,
                None => Config::load()?,
            };

            // CLI flags win over every config source
            if let Some(host) = host {
                config.server.host = host;
            }
            if let Some(port) = port {
                config.server.port = port;
            }
            if static_dir.is_some() {
                config.server.static_dir = static_dir;
            }
            if open {
                config.server.open_browser = true;
            }

            logging::init(&config.log)?;
            serve::start_server(config.server).await?;
        }
        Commands::Config => {
            print!("{}", Config::default_config_string());
        }
    }

    Ok(())
}
