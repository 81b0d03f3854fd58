use crate::prelude::{eprintln, *};
use serde::Deserialize;

use super::{text_result, JsonRpcError};

/// Arguments for the `seo_analyze_page` tool.
#[derive(Debug, Deserialize)]
pub struct AnalyzePageArgs {
    pub url: String,
    pub keyword: Option<String>,
    #[serde(default)]
    pub skip_content: bool,
}

/// Arguments for the `seo_analyze_headings` tool.
#[derive(Debug, Deserialize)]
pub struct AnalyzeHeadingsArgs {
    pub url: String,
    pub keyword: Option<String>,
}

pub async fn handle_analyze_page(
    args: AnalyzePageArgs,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!(
            "Calling seo_analyze_page: url={}, keyword={:?}, skip_content={}",
            args.url, args.keyword, args.skip_content
        );
    }

    // Call the page module's data function
    let report =
        crate::page::analyze_page_data(args.url, args.keyword, args.skip_content, global)
            .await
            .map_err(|e| JsonRpcError::internal(f!("Tool execution error: {e}")))?;

    text_result(&report)
}

pub async fn handle_analyze_headings(
    args: AnalyzeHeadingsArgs,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    if global.verbose {
        eprintln!(
            "Calling seo_analyze_headings: url={}, keyword={:?}",
            args.url, args.keyword
        );
    }

    // Call the page module's data function
    let headings = crate::page::analyze_headings_data(args.url, args.keyword, global)
        .await
        .map_err(|e| JsonRpcError::internal(f!("Tool execution error: {e}")))?;

    text_result(&headings)
}
