#![allow(unused)]

use crate::prelude::*;
use clap::Parser;

mod error;
mod mcp;
mod page;
mod prelude;

#[derive(Debug, clap::Parser)]
#[command(
    author,
    version,
    about,
    long_about = "SEO analysis for web pages, as a CLI and as an MCP server"
)]
pub struct App {
    #[command(subcommand)]
    pub command: SubCommands,

    #[clap(flatten)]
    global: Global,
}

#[derive(Debug, Clone, clap::Args)]
pub struct Global {
    /// HTTP timeout in seconds for page fetches
    #[clap(long, env = "SEOTOOLS_TIMEOUT", global = true, default_value = "30")]
    timeout: u64,

    /// User-Agent header sent with page fetches
    #[clap(
        long,
        env = "SEOTOOLS_USER_AGENT",
        global = true,
        default_value = concat!("seotools/", env!("CARGO_PKG_VERSION"))
    )]
    user_agent: String,

    /// Whether to display additional information.
    #[clap(long, env = "SEOTOOLS_VERBOSE", global = true, default_value = "false")]
    verbose: bool,
}

#[derive(Debug, clap::Parser)]
pub enum SubCommands {
    /// Analyze web pages for SEO quality
    #[clap(name = "page")]
    Page(crate::page::App),

    /// Model Context Protocol server
    #[clap(name = "mcp")]
    Mcp(crate::mcp::App),
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    color_eyre::install()?;

    let app = App::parse();

    match app.command {
        SubCommands::Page(sub_app) => crate::page::run(sub_app, app.global).await,
        SubCommands::Mcp(sub_app) => crate::mcp::run(sub_app, app.global).await,
    }
    .map_err(|err: color_eyre::eyre::Report| eyre!(err))
}
