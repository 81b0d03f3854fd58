mod page;

use serde::{Deserialize, Serialize};

pub use super::JsonRpcError;

/// A tool advertised to the MCP client.
#[derive(Debug, Serialize)]
pub struct Tool {
    pub name: String,
    pub description: String,
    #[serde(rename = "inputSchema")]
    pub input_schema: serde_json::Value,
}

// MCP Protocol types for tools
#[derive(Debug, Serialize)]
pub struct ServerInfo {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Serialize)]
pub struct ServerCapabilities {
    pub tools: Option<ToolsCapability>,
}

#[derive(Debug, Serialize)]
pub struct ToolsCapability {}

#[derive(Debug, Serialize)]
pub struct InitializeResult {
    #[serde(rename = "protocolVersion")]
    pub protocol_version: String,
    pub capabilities: ServerCapabilities,
    #[serde(rename = "serverInfo")]
    pub server_info: ServerInfo,
}

#[derive(Debug, Serialize)]
pub struct ToolsList {
    pub tools: Vec<Tool>,
}

#[derive(Debug, Serialize)]
pub struct CallToolResult {
    pub content: Vec<Content>,
    #[serde(rename = "isError", skip_serializing_if = "Option::is_none")]
    pub is_error: Option<bool>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type")]
pub enum Content {
    #[serde(rename = "text")]
    Text { text: String },
}

/// The registered SEO tools. `tools/call` params deserialize straight into
/// the matching typed argument struct; an unknown name fails
/// deserialization and surfaces as invalid params.
#[derive(Debug, Deserialize)]
#[serde(tag = "name", content = "arguments", rename_all = "snake_case")]
pub enum ToolCall {
    SeoAnalyzePage(page::AnalyzePageArgs),
    SeoAnalyzeHeadings(page::AnalyzeHeadingsArgs),
}

pub fn handle_initialize() -> Result<serde_json::Value, JsonRpcError> {
    let result = InitializeResult {
        protocol_version: "2024-11-05".to_string(),
        capabilities: ServerCapabilities {
            tools: Some(ToolsCapability {}),
        },
        server_info: ServerInfo {
            name: "seotools".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        },
    };

    serde_json::to_value(result).map_err(JsonRpcError::internal)
}

pub fn handle_tools_list() -> Result<serde_json::Value, JsonRpcError> {
    let tools = vec![
        Tool {
            name: "seo_analyze_page".to_string(),
            description: "Run a full SEO analysis of a web page. Fetches the page, extracts title, meta description, canonical URL, robots directive, Open Graph tags, headings, images, links, and body word count, detects issues per category, and returns a composite 0-100 score with a per-category breakdown (title, meta, headings, images, links, technical).".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the page to analyze (e.g., 'https://example.com/pricing')"
                    },
                    "keyword": {
                        "type": "string",
                        "description": "Target keyword to check against the page headings (optional). When provided, the analysis reports whether the keyword appears in the H1 and which H2 headings mention it."
                    },
                    "skip_content": {
                        "type": "boolean",
                        "description": "Skip the body content (word count) analysis; the content signal then scores a neutral value (default: false)"
                    }
                },
                "required": ["url"]
            }),
        },
        Tool {
            name: "seo_analyze_headings".to_string(),
            description: "Analyze the heading hierarchy (H1-H6) of a web page. Fetches the page, reconstructs the nested heading tree from the flat document order, counts headings per level, and detects structural issues: missing or multiple H1, empty headings, skipped levels, and a first heading that is not an H1. Optionally checks whether a target keyword appears in the headings.".to_string(),
            input_schema: serde_json::json!({
                "type": "object",
                "properties": {
                    "url": {
                        "type": "string",
                        "description": "URL of the page to analyze"
                    },
                    "keyword": {
                        "type": "string",
                        "description": "Target keyword to check against the headings (optional)"
                    }
                },
                "required": ["url"]
            }),
        },
    ];

    serde_json::to_value(ToolsList { tools }).map_err(JsonRpcError::internal)
}

pub async fn handle_tools_call(
    params: Option<serde_json::Value>,
    global: &crate::Global,
) -> Result<serde_json::Value, JsonRpcError> {
    let call: ToolCall = serde_json::from_value(params.unwrap_or(serde_json::Value::Null))
        .map_err(JsonRpcError::invalid_params)?;

    match call {
        ToolCall::SeoAnalyzePage(args) => page::handle_analyze_page(args, global).await,
        ToolCall::SeoAnalyzeHeadings(args) => page::handle_analyze_headings(args, global).await,
    }
}

/// Wrap a serializable tool payload in the MCP text-content result shape.
pub fn text_result<T: Serialize>(payload: &T) -> Result<serde_json::Value, JsonRpcError> {
    let text = serde_json::to_string_pretty(payload)
        .map_err(|e| JsonRpcError::internal(format!("serializing tool payload: {e}")))?;

    let result = CallToolResult {
        content: vec![Content::Text { text }],
        is_error: None,
    };

    serde_json::to_value(result).map_err(JsonRpcError::internal)
}
