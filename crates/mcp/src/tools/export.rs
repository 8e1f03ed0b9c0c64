// CSV export of previously fetched records

use crate::protocol::{CallToolResult, ToolSchema};
use crate::tools::{json_schema_array, json_schema_object, json_schema_string_list, Tool};
use anyhow::{Context, Result};
use apollo_core::ExportCsvArgs;

/// Tool to render records as CSV text. Makes no remote call.
pub struct ExportCsvTool;

impl ExportCsvTool {
    pub fn new() -> Self {
        Self
    }
}

impl Default for ExportCsvTool {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Tool for ExportCsvTool {
    fn schema(&self) -> ToolSchema {
        ToolSchema {
            name: "export_to_csv".to_string(),
            description: "Export search or enrichment results to CSV text. Nested objects and arrays are written as JSON. FREE - no API call.".to_string(),
            input_schema: json_schema_object(
                serde_json::json!({
                    "data": json_schema_array(
                        serde_json::json!({"type": "object"}),
                        "Records to export (e.g., the people or organizations array of a search)"
                    ),
                    "columns": json_schema_string_list("Columns to include, in order (default: keys of the first record)")
                }),
                vec!["data"],
            ),
        }
    }

    async fn execute(&self, arguments: serde_json::Value) -> Result<CallToolResult> {
        let args: ExportCsvArgs = serde_json::from_value(arguments)
            .context("Invalid arguments for export_to_csv")?;

        let csv = args.render().context("Failed to render CSV")?;
        Ok(CallToolResult::text(csv))
    }
}
