//! Typed query request sent to the service.
use chrono::NaiveDateTime;
use uuid::Uuid;

use super::{complement::Complement, rfc::Rfc};

/// Whether the query targets documents issued or received by the credential owner.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DownloadType {
    #[default]
    Issued,
    Received,
}

/// Kind of package the service prepares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RequestType {
    #[default]
    Metadata,
    Xml,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentStatus {
    #[default]
    Undefined,
    Active,
    Cancelled,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentType {
    #[default]
    Undefined,
    Ingreso,
    Egreso,
    Traslado,
    Pago,
    Nomina,
}

/// Closed date-time interval with `start <= end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Period {
    start: NaiveDateTime,
    end: NaiveDateTime,
}

impl Period {
    /// Returns `None` when `end` is before `start`.
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Option<Self> {
        (start <= end).then_some(Self { start, end })
    }

    pub fn start(&self) -> NaiveDateTime {
        self.start
    }

    pub fn end(&self) -> NaiveDateTime {
        self.end
    }
}

/// Filters of a query over a period.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodQuery {
    pub period: Period,
    pub download_type: DownloadType,
    pub rfc_match: Option<Rfc>,
    pub document_type: DocumentType,
    pub document_status: DocumentStatus,
    pub complement: Complement,
    pub rfc_on_behalf: Option<Rfc>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryMode {
    Period(PeriodQuery),
    Uuid(Uuid),
}

/// Complete query request; exactly one mode is active.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryParameters {
    pub mode: QueryMode,
    pub request_type: RequestType,
}

impl QueryParameters {
    pub fn period(query: PeriodQuery, request_type: RequestType) -> Self {
        Self {
            mode: QueryMode::Period(query),
            request_type,
        }
    }

    pub fn uuid(uuid: Uuid, request_type: RequestType) -> Self {
        Self {
            mode: QueryMode::Uuid(uuid),
            request_type,
        }
    }

    /// Rules the service would reject, as user-facing messages.
    ///
    /// Queries by UUID carry no period and always pass.
    pub fn validate(&self, now: NaiveDateTime) -> Vec<String> {
        let QueryMode::Period(query) = &self.mode else {
            return Vec::new();
        };

        let mut messages = Vec::new();
        if query.period.start() >= query.period.end() {
            messages.push(format!(
                "The start of the period ({}) must be before its end ({})",
                query.period.start(),
                query.period.end()
            ));
        }
        if query.period.start() > now {
            messages.push(format!(
                "The start of the period ({}) cannot be in the future",
                query.period.start()
            ));
        }
        if query.download_type == DownloadType::Received
            && self.request_type == RequestType::Xml
            && query.document_status != DocumentStatus::Active
        {
            messages.push(
                "XML requests of received documents must ask only for active documents (estado vigentes)"
                    .to_string(),
            );
        }
        messages
    }
}
