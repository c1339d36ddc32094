//! Raw option strings to [`QueryParameters`].
use std::collections::BTreeMap;

use chrono::{NaiveDate, NaiveDateTime};
use tracing::debug;
use uuid::Uuid;

use super::{
    complement::Complement,
    parameters::{
        DocumentStatus, DocumentType, DownloadType, Period, PeriodQuery, QueryParameters,
        RequestType,
    },
    rfc::Rfc,
};
use crate::{lib::errors::InputError, service::endpoints::ServiceType};

const DATE_TIME_FORMATS: &[&str] = &["%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M"];
const DATE_FORMAT: &str = "%Y-%m-%d";

/// Builds query parameters from the `query` command options.
///
/// Keys are the option names (`desde`, `hasta`, `tipo`, ...). A missing key
/// takes the option default; a key present with an empty value is validated
/// as given.
pub struct QueryBuilder<'a> {
    options: &'a BTreeMap<String, String>,
    service_type: ServiceType,
}

impl<'a> QueryBuilder<'a> {
    pub fn new(options: &'a BTreeMap<String, String>, service_type: ServiceType) -> Self {
        Self {
            options,
            service_type,
        }
    }

    /// Build the parameters, failing on the first invalid option.
    pub fn build(&self) -> Result<QueryParameters, InputError> {
        let by_uuid = !self.option("uuid", "").is_empty();

        let period = self.build_period(by_uuid)?;
        let request_type = self.build_request_type()?;
        let download_type = self.build_download_type()?;
        let rfc_match = self.build_rfc("rfc")?;
        let document_status = self.build_document_status()?;
        let document_type = self.build_document_type()?;
        let uuid = self.build_uuid()?;
        let complement = self.build_complement()?;
        let rfc_on_behalf = self.build_rfc("tercero")?;

        let parameters = match (uuid, period) {
            (Some(uuid), _) => QueryParameters::uuid(uuid, request_type),
            (None, Some(period)) => QueryParameters::period(
                PeriodQuery {
                    period,
                    download_type,
                    rfc_match,
                    document_type,
                    document_status,
                    complement,
                    rfc_on_behalf,
                },
                request_type,
            ),
            // build_period only yields no period when a uuid was given
            (None, None) => return Err(InputError::MissingRequiredOption { field: "desde" }),
        };
        debug!(
            target: "descarga_masiva::query",
            by_uuid = uuid.is_some(),
            request_type = ?parameters.request_type,
            "Built query parameters"
        );
        Ok(parameters)
    }

    /// Period bounds; `None` only when querying by UUID without dates.
    pub fn build_period(&self, by_uuid: bool) -> Result<Option<Period>, InputError> {
        let since = self.build_date_time("desde", by_uuid)?;
        let until = self.build_date_time("hasta", by_uuid)?;
        match (since, until) {
            (Some(since), Some(until)) => Period::new(since, until).map(Some).ok_or_else(|| {
                InputError::invalid(
                    "hasta",
                    "The period between \"desde\" and \"hasta\" is not valid",
                )
            }),
            _ => Ok(None),
        }
    }

    fn build_date_time(
        &self,
        name: &'static str,
        optional: bool,
    ) -> Result<Option<NaiveDateTime>, InputError> {
        let value = self.option(name, "");
        if value.is_empty() && optional {
            return Ok(None);
        }
        parse_date_time(value).map(Some).ok_or_else(|| {
            InputError::invalid(
                name,
                format!("The option \"{name}\" could not be interpreted as a date"),
            )
        })
    }

    pub fn build_request_type(&self) -> Result<RequestType, InputError> {
        match self.option("paquete", "metadata").to_lowercase().as_str() {
            "metadata" => Ok(RequestType::Metadata),
            "xml" => Ok(RequestType::Xml),
            _ => Err(InputError::invalid(
                "paquete",
                "The option \"paquete\" must be \"xml\" or \"metadata\"",
            )),
        }
    }

    pub fn build_download_type(&self) -> Result<DownloadType, InputError> {
        match self.option("tipo", "emitidos").to_lowercase().as_str() {
            "recibidos" => Ok(DownloadType::Received),
            "emitidos" => Ok(DownloadType::Issued),
            _ => Err(InputError::invalid(
                "tipo",
                "The option \"tipo\" must be \"recibidos\" or \"emitidos\"",
            )),
        }
    }

    pub fn build_document_status(&self) -> Result<DocumentStatus, InputError> {
        match self.option("estado", "").to_lowercase().as_str() {
            "" => Ok(DocumentStatus::Undefined),
            "vigentes" => Ok(DocumentStatus::Active),
            "canceladas" => Ok(DocumentStatus::Cancelled),
            _ => Err(InputError::invalid(
                "estado",
                "When given, the option \"estado\" must be \"vigentes\" or \"canceladas\"",
            )),
        }
    }

    pub fn build_document_type(&self) -> Result<DocumentType, InputError> {
        let value = self.option("documento", "").replace(['ó', 'Ó'], "o");
        match value.to_lowercase().as_str() {
            "" => Ok(DocumentType::Undefined),
            "ingreso" => Ok(DocumentType::Ingreso),
            "egreso" => Ok(DocumentType::Egreso),
            "traslado" => Ok(DocumentType::Traslado),
            "pago" => Ok(DocumentType::Pago),
            "nomina" => Ok(DocumentType::Nomina),
            _ => Err(InputError::invalid(
                "documento",
                "When given, the option \"documento\" must be \"ingreso\", \"egreso\", \"traslado\", \"pago\" or \"nómina\"",
            )),
        }
    }

    pub fn build_uuid(&self) -> Result<Option<Uuid>, InputError> {
        let value = self.option("uuid", "");
        if value.is_empty() {
            return Ok(None);
        }
        parse_hyphenated_uuid(value).map(Some).ok_or_else(|| {
            InputError::invalid(
                "uuid",
                "When given, the option \"uuid\" must contain a valid UUID",
            )
        })
    }

    pub fn build_complement(&self) -> Result<Complement, InputError> {
        let value = self.option("complemento", "");
        Complement::lookup(self.service_type, value).ok_or_else(|| {
            let service = match self.service_type {
                ServiceType::Cfdi => "Cfdi",
                ServiceType::Retenciones => "Retenciones",
            };
            InputError::invalid(
                "complemento",
                format!("The option \"complemento\" of {service} has an invalid value"),
            )
        })
    }

    /// RFC filter stored under `name` (`rfc` or `tercero`).
    pub fn build_rfc(&self, name: &'static str) -> Result<Option<Rfc>, InputError> {
        let value = self.option(name, "");
        if value.is_empty() {
            return Ok(None);
        }
        Rfc::parse(value).map(Some).map_err(|err| {
            InputError::invalid(
                name,
                format!("The option \"{name}\" has an invalid value: {err}"),
            )
        })
    }

    fn option(&self, name: &str, default: &'a str) -> &str {
        self.options.get(name).map(String::as_str).unwrap_or(default)
    }
}

/// Parse one of the accepted date or date-time layouts; a bare date means midnight.
pub fn parse_date_time(value: &str) -> Option<NaiveDateTime> {
    let value = value.trim().to_uppercase();
    DATE_TIME_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(&value, format).ok())
        .or_else(|| {
            NaiveDate::parse_from_str(&value, DATE_FORMAT)
                .ok()
                .and_then(|date| date.and_hms_opt(0, 0, 0))
        })
}

fn parse_hyphenated_uuid(value: &str) -> Option<Uuid> {
    let value = value.trim();
    // Uuid::parse_str also takes simple, braced and urn forms
    if value.len() != 36 {
        return None;
    }
    Uuid::parse_str(value).ok()
}
