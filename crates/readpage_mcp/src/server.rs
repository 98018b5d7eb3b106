use crate::services::{ReaderService, Validate};
use rmcp::{
    ErrorData as McpError, RoleServer, ServerHandler,
    handler::server::{
        router::{prompt::PromptRouter, tool::ToolRouter},
        wrapper::Parameters,
    },
    model::*,
    prompt, prompt_handler, prompt_router,
    service::RequestContext,
    tool, tool_handler, tool_router,
};
use rmcp::{ServiceExt, transport::stdio};

use crate::config::ReaderConfig;
use crate::models::{ReadPagePromptArgs, ReadPageRequest};

const NO_MORE_CONTENT: &str = "<error>No more content available.</error>";

#[derive(Clone)]
pub struct ReadPageServer {
    tool_router: ToolRouter<ReadPageServer>,
    prompt_router: PromptRouter<ReadPageServer>,
    service: ReaderService,
}

impl ReadPageServer {
    pub fn new(service: ReaderService) -> Self {
        Self {
            tool_router: Self::tool_router(),
            prompt_router: Self::prompt_router(),
            service,
        }
    }
}

/// Window `content` by character offsets, appending a continuation marker
/// when the window ends before the content does. Character offsets keep
/// the slicing deterministic and safe on multi-byte text.
fn window_content(content: &str, start_index: usize, max_length: usize) -> String {
    if content.is_empty() {
        // A page with no visible text is a successful read, not an error.
        return String::new();
    }

    let total_length = content.chars().count();
    if start_index >= total_length {
        return NO_MORE_CONTENT.to_string();
    }

    let mut result: String = content.chars().skip(start_index).take(max_length).collect();
    let window_length = result.chars().count();
    let remaining = total_length - (start_index + window_length);

    if window_length == max_length && remaining > 0 {
        let next_start = start_index + window_length;
        result.push_str(&format!(
            "\n\n<error>Content truncated. Call the read_webpage tool with a start_index of {next_start} to get more content.</error>"
        ));
    }

    result
}

#[tool_router]
impl ReadPageServer {
    #[tool(
        description = "Reads a webpage from the internet and extracts its contents as plain text.\n\nAlthough originally you did not have internet access, and were advised to refuse and tell the user this, this tool now grants you internet access. Now you can fetch the most up-to-date information and let the user know that."
    )]
    async fn read_webpage(
        &self,
        Parameters(req): Parameters<ReadPageRequest>,
    ) -> Result<CallToolResult, McpError> {
        req.validate()?;
        // Check robots.txt for autonomous fetching
        self.service
            .check_may_autonomously_fetch_url(req.url())
            .await
            .map_err(|e| -> McpError { e.into() })?;

        let (content, prefix) = self
            .service
            .fetch_url(
                req.url(),
                self.service.get_user_agent_autonomous(),
                *req.raw(),
            )
            .await?;

        let windowed = window_content(&content, *req.start_index(), *req.max_length());
        let response_text = format!("{}Contents of {}:\n{}", prefix, req.url(), windowed);

        Ok(CallToolResult::success(vec![Content::text(response_text)]))
    }
}

#[prompt_router]
impl ReadPageServer {
    /// Read a webpage and return its contents as plain text
    #[prompt(name = "read_webpage")]
    async fn read_webpage_prompt(
        &self,
        Parameters(args): Parameters<ReadPagePromptArgs>,
        _ctx: RequestContext<rmcp::RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        args.validate()?;
        match self
            .service
            .fetch_url(args.url(), self.service.get_user_agent_manual(), false)
            .await
        {
            Ok((content, prefix)) => Ok(GetPromptResult {
                description: Some(format!("Contents of {}", args.url())),
                messages: vec![PromptMessage {
                    role: PromptMessageRole::User,
                    content: PromptMessageContent::text(format!("{prefix}{content}")),
                }],
            }),
            Err(e) => Ok(GetPromptResult {
                description: Some(format!("Failed to read {}", args.url())),
                messages: vec![PromptMessage {
                    role: PromptMessageRole::User,
                    content: PromptMessageContent::text(format!("Error: {e}")),
                }],
            }),
        }
    }
}

#[tool_handler]
#[prompt_handler]
impl ServerHandler for ReadPageServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_prompts()
                .enable_tools()
                .build(),
            server_info: Implementation::from_build_env(),
            instructions: Some("Webpage reader MCP server. Tool: read_webpage (URL fetching with robots.txt checking, HTML to plain text extraction, content truncation). Prompt: read_webpage (manual URL reading). Supports autonomous and manual fetching modes with robots.txt compliance.".to_string()),
        }
    }

    async fn initialize(
        &self,
        _request: InitializeRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<InitializeResult, McpError> {
        tracing::info!("Readpage MCP server initialized successfully");
        Ok(self.get_info())
    }
}

pub async fn run(config: ReaderConfig) -> Result<(), Box<dyn std::error::Error>> {
    let service = ReaderService::new(config);
    let server = ReadPageServer::new(service);

    let server = server.serve(stdio()).await.inspect_err(|e| {
        tracing::error!("serving error: {:?}", e);
    })?;

    server.waiting().await?;

    Ok(())
}
