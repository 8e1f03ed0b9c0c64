pub mod companies;
pub mod export;
pub mod people;
mod registry;

pub use companies::{
    BulkEnrichCompaniesTool, EnrichCompanyByNameTool, EnrichCompanyTool, SearchCompaniesTool,
};
pub use export::ExportCsvTool;
pub use people::{EnrichPersonTool, SearchPeopleTool};
pub use registry::{
    json_result, json_schema_array, json_schema_boolean, json_schema_number, json_schema_object,
    json_schema_string, json_schema_string_list, with_default, CreditUsage, DispatchError, Tool,
    ToolRegistry,
};

use apollo_sdk::ApolloClient;
use std::sync::Arc;

/// Build the registry holding the full Apollo catalogue, in listing order.
pub fn apollo_tools(client: ApolloClient) -> ToolRegistry {
    let mut registry = ToolRegistry::new();

    // People
    registry.register(Arc::new(SearchPeopleTool::new(client.clone())));
    registry.register(Arc::new(EnrichPersonTool::new(client.clone())));

    // Companies
    registry.register(Arc::new(SearchCompaniesTool::new(client.clone())));
    registry.register(Arc::new(EnrichCompanyTool::new(client.clone())));
    registry.register(Arc::new(EnrichCompanyByNameTool::new(client.clone())));
    registry.register(Arc::new(BulkEnrichCompaniesTool::new(client)));

    // Export
    registry.register(Arc::new(ExportCsvTool::new()));

    registry
}
