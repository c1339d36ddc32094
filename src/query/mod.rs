//! Query parameters of the `query` command and their display labels.

pub mod builder;
pub mod complement;
pub mod labels;
pub mod parameters;
pub mod rfc;

pub use builder::QueryBuilder;
pub use complement::Complement;
pub use parameters::{
    DocumentStatus, DocumentType, DownloadType, Period, PeriodQuery, QueryMode, QueryParameters,
    RequestType,
};
pub use rfc::Rfc;
