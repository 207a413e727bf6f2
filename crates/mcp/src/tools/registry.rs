// MCP tool trait, registry and JSON schema helpers

use crate::protocol::{CallToolResult, ToolSchema};
use anyhow::Result;
use leadmagic_sdk::{FieldKind, InputSchema};
use serde_json::{json, Map, Value};
use std::collections::HashMap;
use std::sync::Arc;

/// Tool executor trait
#[async_trait::async_trait]
pub trait Tool: Send + Sync {
    /// Get the tool schema for MCP
    fn schema(&self) -> ToolSchema;

    /// Execute the tool with given arguments.
    ///
    /// Per-call failures are returned as an error result, not as `Err`.
    async fn execute(&self, arguments: Value) -> Result<CallToolResult>;
}

/// Tool registry for managing available tools
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self {
            tools: HashMap::new(),
        }
    }

    /// Register a tool. A tool with the same name is replaced.
    pub fn register(&mut self, tool: Arc<dyn Tool>) {
        let schema = tool.schema();
        if self.tools.insert(schema.name.clone(), tool).is_some() {
            tracing::warn!(tool = %schema.name, "Replaced previously registered tool");
        }
    }

    /// Get a tool by name
    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    /// List all tool schemas, sorted by name
    pub fn list_schemas(&self) -> Vec<ToolSchema> {
        let mut schemas: Vec<_> = self.tools.values().map(|t| t.schema()).collect();
        schemas.sort_by(|a, b| a.name.cmp(&b.name));
        schemas
    }

    /// Check if a tool exists
    pub fn contains(&self, name: &str) -> bool {
        self.tools.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.tools.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tools.is_empty()
    }
}

impl Default for ToolRegistry {
    fn default() -> Self {
        Self::new()
    }
}

// Helper functions for creating tool schemas

pub fn json_schema_object(properties: Value, required: Vec<&str>) -> Value {
    json!({
        "type": "object",
        "properties": properties,
        "required": required
    })
}

pub fn json_schema_string(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

pub fn json_schema_integer(description: &str) -> Value {
    json!({
        "type": "integer",
        "description": description
    })
}

/// Render an SDK input schema as the MCP `inputSchema` object.
pub fn input_schema_json(schema: &InputSchema) -> Value {
    let mut properties = Map::new();
    let mut required = Vec::new();

    for field in schema.fields() {
        let mut property = match &field.kind {
            FieldKind::String => json_schema_string(field.description),
            FieldKind::Email => {
                let mut p = json_schema_string(field.description);
                p["format"] = json!("email");
                p
            }
            FieldKind::Url => {
                let mut p = json_schema_string(field.description);
                p["format"] = json!("uri");
                p
            }
            FieldKind::Integer { min, max } => {
                let mut p = json_schema_integer(field.description);
                if let Some(min) = min {
                    p["minimum"] = json!(min);
                }
                if let Some(max) = max {
                    p["maximum"] = json!(max);
                }
                p
            }
            FieldKind::Enum(values) => {
                let mut p = json_schema_string(field.description);
                p["enum"] = json!(values);
                p
            }
        };
        if let Some(default) = &field.default {
            property["default"] = default.clone();
        }
        if field.required {
            required.push(field.name);
        }
        properties.insert(field.name.to_string(), property);
    }

    let mut object = json_schema_object(Value::Object(properties), required);
    let groups: Vec<Value> = schema
        .any_of_groups()
        .iter()
        .map(|group| {
            let alternatives: Vec<Value> = group
                .iter()
                .map(|name| json!({ "required": [name] }))
                .collect();
            json!({ "anyOf": alternatives })
        })
        .collect();
    match groups.len() {
        0 => {}
        1 => {
            if let Some(group) = groups.into_iter().next() {
                object["anyOf"] = group["anyOf"].clone();
            }
        }
        _ => object["allOf"] = Value::Array(groups),
    }
    object
}
