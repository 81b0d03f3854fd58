use crate::prelude::*;

#[derive(Debug, clap::Parser)]
#[command(name = "mcp")]
#[command(about = "Serve the SEO analysis tools over the Model Context Protocol")]
pub struct App {
    #[command(subcommand)]
    pub command: Commands,
}

/// Both transports expose the same two tools (`seo_analyze_page` and
/// `seo_analyze_headings`); they differ only in how the JSON-RPC messages
/// travel.
#[derive(Debug, clap::Subcommand)]
pub enum Commands {
    /// Serve over stdio, for clients that spawn the server as a child process
    #[clap(name = "stdio")]
    Stdio,

    /// Serve over HTTP with Server-Sent Events
    #[clap(name = "sse")]
    Sse(SseOptions),
}

#[derive(Debug, clap::Args)]
pub struct SseOptions {
    /// Port to listen on
    #[arg(short, long, env = "SEOTOOLS_MCP_PORT", default_value = "3000")]
    pub port: u16,

    /// Host to bind to
    #[arg(long, env = "SEOTOOLS_MCP_HOST", default_value = "127.0.0.1")]
    pub host: String,
}

impl SseOptions {
    pub fn addr(&self) -> String {
        f!("{}:{}", self.host, self.port)
    }
}
