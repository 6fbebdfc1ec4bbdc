// Tool trait and the registry the dispatcher looks tools up in

use crate::error::ToolError;
use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::schema::ValidatedInput;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Check raw arguments against the input schema, substituting defaults
    fn validate(&self, arguments: &Value) -> Result<ValidatedInput, ToolError>;

    /// Execute the tool with validated arguments
    async fn execute(&self, input: ValidatedInput) -> Result<CallToolResult, ToolError>;
}

/// Tool registry for managing available tools
///
/// Listing preserves registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    index: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            index: HashMap::new(),
        }
    }

    /// Register a tool
    ///
    /// Re-registering a name replaces the earlier tool in place.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        match self.index.get(&name) {
            Some(&slot) => {
                tracing::warn!(tool = %name, "Tool registered twice, replacing earlier definition");
                self.tools[slot] = tool;
            }
            None => {
                self.index.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.index.get(name).map(|&slot| self.tools[slot].clone())
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Look up, validate and run one invocation.
    pub async fn call(&self, name: &str, arguments: &Value) -> Result<CallToolResult, ToolError> {
        let tool = self
            .get(name)
            .ok_or_else(|| ToolError::UnknownTool(name.to_string()))?;
        let input = tool.validate(arguments)?;
        tool.execute(input).await
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}
