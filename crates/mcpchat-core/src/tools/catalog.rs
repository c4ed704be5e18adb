//! Tool catalog for model tool calling

use std::collections::HashSet;

use serde_json::Value;

use crate::logging::Logger;
use crate::mcp::{McpError, McpResult, McpTool, McpToolResult, RawContent, ToolProvider};
use crate::types::{Tool, ToolCall, ToolResult, ToolResultContent};

/// Ordered, immutable set of tools fetched from the provider
#[derive(Debug, Clone, Default)]
pub struct ToolCatalog {
    tools: Vec<Tool>,
}

impl ToolCatalog {
    /// Query the provider's listing and map every tool
    ///
    /// An empty or duplicated tool name makes the listing malformed.
    pub async fn fetch(provider: &dyn ToolProvider, logger: &dyn Logger) -> McpResult<Self> {
        let listed = provider.list_tools().await?;
        let catalog = Self::from_mcp_tools(listed)?;
        logger.info(&format!(
            "[ToolCatalog] Fetched {} tools: {}",
            catalog.len(),
            catalog.names().join(", ")
        ));
        Ok(catalog)
    }

    /// Build a catalog from an MCP listing
    pub fn from_mcp_tools(listed: Vec<McpTool>) -> McpResult<Self> {
        let mut seen = HashSet::with_capacity(listed.len());
        let mut tools = Vec::with_capacity(listed.len());

        for tool in listed {
            let tool = Self::map_tool(tool);
            if tool.name.is_empty() {
                return Err(McpError::Protocol("tool listing contains an unnamed tool".into()));
            }
            if !seen.insert(tool.name.clone()) {
                return Err(McpError::Protocol(format!(
                    "tool listing contains '{}' more than once",
                    tool.name
                )));
            }
            tools.push(tool);
        }

        Ok(Self { tools })
    }

    fn map_tool(tool: McpTool) -> Tool {
        Tool {
            name: tool.name.to_string(),
            description: tool.description.map(|d| d.to_string()).unwrap_or_default(),
            // input_schema is Arc<JsonObject>
            input_schema: Value::Object(tool.input_schema.as_ref().clone()),
        }
    }

    pub fn get(&self, name: &str) -> Option<&Tool> {
        self.tools.iter().find(|t| t.name == name)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn names(&self) -> Vec<&str> {
        self.tools.iter().map(|t| t.name.as_str()).collect()
    }

    /// Tools in the shape sent to the model, in provider order
    pub fn llm_tools(&self) -> &[Tool] {
        &self.tools
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Map a provider call result onto the tool-result block for `call`
    pub fn into_tool_result(call: &ToolCall, result: McpToolResult) -> ToolResult {
        let mut content: Vec<ToolResultContent> = result
            .content
            .into_iter()
            .map(|part| match part.raw {
                RawContent::Text(t) => ToolResultContent::text(t.text),
                RawContent::Image(i) => ToolResultContent::image(i.data, i.mime_type),
                other => ToolResultContent::text(
                    serde_json::to_string(&other).unwrap_or_else(|e| format!("[unrenderable content: {}]", e)),
                ),
            })
            .collect();

        if content.is_empty() {
            if let Some(structured) = result.structured_content {
                content.push(ToolResultContent::text(structured.to_string()));
            }
        }

        if result.is_error.unwrap_or(false) {
            ToolResult::error(&call.id, content)
        } else {
            ToolResult::success(&call.id, content)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::NoOpLogger;
    use crate::mcp::{McpContent, MockToolProvider};
    use serde_json::json;
    use std::sync::Arc;

    fn mcp_tool(name: &str) -> McpTool {
        let mut schema = serde_json::Map::new();
        schema.insert("type".into(), json!("object"));
        McpTool::new(name.to_string(), format!("{} tool", name), Arc::new(schema))
    }

    #[tokio::test]
    async fn test_fetch_preserves_order_without_filtering() {
        let provider = MockToolProvider::new()
            .with_tool("browser_navigate", "Navigate to a URL")
            .with_tool("browser_take_screenshot", "Take a screenshot")
            .with_tool("browser_click", "Click an element");

        let catalog = ToolCatalog::fetch(&provider, &NoOpLogger::new()).await.unwrap();

        assert_eq!(
            catalog.names(),
            vec!["browser_navigate", "browser_take_screenshot", "browser_click"]
        );
        assert_eq!(catalog.len(), 3);
        assert_eq!(catalog.get("browser_click").unwrap().description, "Click an element");
        assert_eq!(catalog.llm_tools()[0].input_schema, json!({ "type": "object" }));
    }

    #[tokio::test]
    async fn test_fetch_failure_propagates() {
        let provider = MockToolProvider::new().with_list_error("server exited");
        let result = ToolCatalog::fetch(&provider, &NoOpLogger::new()).await;
        assert!(result.is_err());
    }

    #[test]
    fn test_duplicate_names_rejected() {
        let result = ToolCatalog::from_mcp_tools(vec![mcp_tool("a"), mcp_tool("b"), mcp_tool("a")]);
        assert!(matches!(result, Err(McpError::Protocol(msg)) if msg.contains("'a'")));
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = ToolCatalog::from_mcp_tools(vec![mcp_tool("")]);
        assert!(matches!(result, Err(McpError::Protocol(_))));
    }

    #[test]
    fn test_missing_description_maps_to_empty() {
        let mut tool = mcp_tool("snapshot");
        tool.description = None;
        let catalog = ToolCatalog::from_mcp_tools(vec![tool]).unwrap();
        assert_eq!(catalog.get("snapshot").unwrap().description, "");
        assert!(catalog.contains("snapshot"));
        assert!(!catalog.contains("missing"));
    }

    #[test]
    fn test_into_tool_result_maps_parts() {
        let call = ToolCall::new("toolu_1", "browser_take_screenshot", json!({}));
        let result = McpToolResult::success(vec![
            McpContent::text("Took a screenshot"),
            McpContent::image("iVBORw0KGgo=", "image/png"),
        ]);

        let mapped = ToolCatalog::into_tool_result(&call, result);

        assert_eq!(mapped.tool_use_id, "toolu_1");
        assert!(!mapped.is_error);
        assert_eq!(
            mapped.content,
            vec![
                ToolResultContent::text("Took a screenshot"),
                ToolResultContent::image("iVBORw0KGgo=", "image/png"),
            ]
        );
    }

    #[test]
    fn test_into_tool_result_keeps_error_flag() {
        let call = ToolCall::new("toolu_2", "browser_click", json!({ "ref": "e1" }));
        let result = McpToolResult::error(vec![McpContent::text("Element not found")]);

        let mapped = ToolCatalog::into_tool_result(&call, result);

        assert!(mapped.is_error);
        assert_eq!(mapped.content[0].to_text(), "Element not found");
    }
}
