// Tool trait, credit metadata and the dispatching registry

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use tracing::{info, warn};

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments
    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult>;

    /// Remote credits one invocation spends
    fn credits(&self) -> CreditUsage {
        CreditUsage::Free
    }
}

/// How a tool is billed by the remote service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreditUsage {
    /// No credits consumed
    Free,
    /// Fixed number of credited calls per invocation
    PerCall(u32),
    /// Credited calls for each item in the input list
    PerItem(u32),
}

impl fmt::Display for CreditUsage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Free => write!(f, "free"),
            Self::PerCall(n) => write!(f, "{} credited call(s)", n),
            Self::PerItem(n) => write!(f, "{} credited call(s) per item", n),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),
}

/// Registry of available tools, listed in registration order.
pub struct ToolRegistry {
    tools: Vec<Arc<dyn Tool>>,
    by_name: HashMap<String, usize>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: Vec::new(),
            by_name: HashMap::new(),
        }
    }

    /// Register a tool. A second tool with the same name replaces the first
    /// in place, so each name maps to exactly one tool.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let name = tool.schema().name;
        match self.by_name.get(&name) {
            Some(&index) => {
                warn!(tool = %name, "Replacing previously registered tool");
                self.tools[index] = tool;
            }
            None => {
                self.by_name.insert(name, self.tools.len());
                self.tools.push(tool);
            }
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.by_name.get(name).map(|&index| self.tools[index].clone())
    }

    /// List all tool schemas
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        self.tools.iter().map(|t| t.schema()).collect()
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.by_name.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }

    /// Run the named tool. Every failure, including an unknown name, comes
    /// back as an error-flagged result rather than an `Err`.
    pub async fn call(&self, name: &str, arguments: serde_json::Value) -> CallToolResult {
        let arguments = if arguments.is_null() {
            serde_json::json!({})
        } else {
            arguments
        };

        let outcome = match self.get(name) {
            Some(tool) => {
                info!(tool = %name, credits = %tool.credits(), "Calling tool");
                tool.execute(arguments).await
            }
            None => Err(DispatchError::UnknownTool(name.to_string()).into()),
        };

        match outcome {
            Ok(result) => result,
            Err(e) => {
                let message = format!("{:#}", e);
                warn!(tool = %name, error = %message, "Tool call failed");
                CallToolResult::error(message)
            }
        }
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Render a tool's output as pretty-printed JSON text.
pub fn json_result<T: Serialize>(value: &T) -> Result<CallToolResult> {
    Ok(CallToolResult::text(serde_json::to_string_pretty(value)?))
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: serde_json::Value, required: Vec<&str>) -> serde_json::Value {
    serde_json::json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_number(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "number",
        "description": description
    })
}

pub fn json_schema_boolean(description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "boolean",
        "description": description
    })
}

pub fn json_schema_array(items: serde_json::Value, description: &str) -> serde_json::Value {
    serde_json::json!({
        "type": "array",
        "items": items,
        "description": description
    })
}

/// Array of strings, the most common argument shape in the catalogue.
pub fn json_schema_string_list(description: &str) -> serde_json::Value {
    json_schema_array(serde_json::json!({"type": "string"}), description)
}

/// Add a `default` to an existing property schema.
pub fn with_default(mut schema: serde_json::Value, default: serde_json::Value) -> serde_json::Value {
    if let Some(object) = schema.as_object_mut() {
        object.insert("default".to_string(), default);
    }
    schema
}
