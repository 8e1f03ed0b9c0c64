// Core, I/O-free logic for the Apollo MCP server: request shaping,
// advisory warnings and CSV export

pub mod advisor;
pub mod csv;
pub mod mapper;
pub mod normalize;
pub mod types;

pub use advisor::{advise, is_global_company, AdviceContext};
pub use self::csv::{to_csv, ExportCsvArgs};
pub use mapper::{
    BulkResolveArgs, EnrichCompanyArgs, EnrichPersonArgs, HttpMethod, RemoteRequest,
    ResolveCompanyArgs, SearchCompaniesArgs, SearchPeopleArgs,
};
pub use normalize::{detect_accents, has_accents, strip_accents, AccentCheck};
pub use types::{BulkEntry, BulkResolution, CompanyResolution, EntryStatus, Warnings};
