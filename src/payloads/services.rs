//! Externally deployed companion services.
//!
//! Only their URLs live here; the services run elsewhere.

use clap::ValueEnum;

/// POST `{"docs": [..], "query": ".."}`, answers `{"matches": [top three docs]}`.
pub const DOCS_SIMILARITY_ENDPOINT: &str = "https://tds-project-2-ga3-7.vercel.app/similarity";

/// GET `?q=<employee query>`, answers `{"name": .., "arguments": "<json>"}`.
pub const EMPLOYEE_QUERIES_ENDPOINT: &str = "https://tds-project-2-ga3-8.vercel.app/execute";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Service {
    /// Semantic document search ranked by embedding similarity.
    Docs,
    /// Employee query to function-call mapping.
    Employee,
}

impl Service {
    pub const ALL: [Service; 2] = [Service::Docs, Service::Employee];

    pub fn endpoint(self) -> &'static str {
        match self {
            Service::Docs => DOCS_SIMILARITY_ENDPOINT,
            Service::Employee => EMPLOYEE_QUERIES_ENDPOINT,
        }
    }
}
