use crate::prelude::{eprintln, *};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Serve the SEO tools over stdio: one JSON-RPC message per line in, one
/// response per line out. Diagnostics go to stderr so stdout stays a clean
/// protocol stream.
pub async fn run_stdio(global: crate::Global) -> Result<()> {
    if global.verbose {
        eprintln!("Serving SEO tools over stdio (one JSON-RPC message per line)");
        eprintln!();
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    while let Some(line) = lines.next_line().await? {
        let request = line.trim();
        if request.is_empty() {
            continue;
        }

        if global.verbose {
            eprintln!("--> {request}");
        }

        let response = super::handle_request(request, &global).await;
        let mut payload = serde_json::to_string(&response)?;

        if global.verbose {
            eprintln!("<-- {payload}");
        }

        payload.push('\n');
        stdout.write_all(payload.as_bytes()).await?;
        stdout.flush().await?;
    }

    Ok(())
}
