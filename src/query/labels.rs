//! Spanish display labels for the command output.
use uuid::Uuid;

use super::{
    complement::Complement,
    parameters::{DocumentStatus, DocumentType, DownloadType, RequestType},
    rfc::Rfc,
};
use crate::service::endpoints::ServiceType;

/// Label for an unset filter.
pub const ANY: &str = "(cualquiera)";

pub fn service_type(value: ServiceType) -> &'static str {
    match value {
        ServiceType::Cfdi => "Cfdi",
        ServiceType::Retenciones => "Retenciones",
    }
}

pub fn request_type(value: RequestType) -> &'static str {
    match value {
        RequestType::Metadata => "Metadata",
        RequestType::Xml => "XML",
    }
}

pub fn download_type(value: DownloadType) -> &'static str {
    match value {
        DownloadType::Issued => "Emitidos",
        DownloadType::Received => "Recibidos",
    }
}

pub fn document_type(value: DocumentType) -> &'static str {
    match value {
        DocumentType::Undefined => ANY,
        DocumentType::Ingreso => "Ingreso",
        DocumentType::Egreso => "Egreso",
        DocumentType::Traslado => "Traslado",
        DocumentType::Pago => "Pago",
        DocumentType::Nomina => "Nómina",
    }
}

pub fn document_status(value: DocumentStatus) -> &'static str {
    match value {
        DocumentStatus::Undefined => ANY,
        DocumentStatus::Active => "Vigentes",
        DocumentStatus::Cancelled => "Canceladas",
    }
}

pub fn complement(value: &Complement) -> String {
    match value {
        Complement::Undefined => ANY.to_string(),
        Complement::Known { code, label, .. } => format!("({code}) {label}"),
    }
}

/// Label of an optional RFC filter (`rfc` and `tercero`).
pub fn rfc(value: Option<&Rfc>) -> String {
    value.map_or_else(|| ANY.to_string(), |rfc| rfc.to_string())
}

pub fn uuid(value: Option<&Uuid>) -> String {
    value.map_or_else(|| ANY.to_string(), Uuid::to_string)
}
