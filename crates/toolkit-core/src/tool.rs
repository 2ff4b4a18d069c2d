//! Tool trait definition

use crate::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Trait for tools that an orchestration framework can call
///
/// Each tool provides a name, a description and a JSON schema for its input.
#[async_trait]
pub trait Tool: Send + Sync {
    /// Execute the tool with given parameters
    ///
    /// # Arguments
    ///
    /// * `params` - Tool input as JSON value (should match input_schema)
    ///
    /// # Returns
    ///
    /// Tool output as JSON value
    async fn execute(&self, params: Value) -> Result<Value>;

    /// Get the tool's name
    ///
    /// Must be unique within a ToolRegistry
    fn name(&self) -> &str;

    /// Get the tool's description
    fn description(&self) -> &str;

    /// Get the tool's input schema (JSON Schema format)
    ///
    /// # Example
    ///
    /// ```
    /// use serde_json::json;
    ///
    /// let schema = json!({
    ///     "type": "object",
    ///     "properties": {
    ///         "ticker": { "type": "string" }
    ///     },
    ///     "required": ["ticker"]
    /// });
    /// ```
    fn input_schema(&self) -> Value;

    /// Execute the tool and fold any failure into an error-shaped value
    ///
    /// Frameworks that consume plain values get either the success payload or
    /// `{"error": "...", "kind": "..."}`.
    async fn invoke(&self, params: Value) -> Value {
        match self.execute(params).await {
            Ok(value) => value,
            Err(err) => {
                tracing::warn!(tool = self.name(), kind = err.kind(), "Tool failed: {err}");
                err.to_payload()
            },
        }
    }
}
