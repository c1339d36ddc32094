use crate::lib::errors::InputError;

/// Which document family the web service handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ServiceType {
    #[default]
    Cfdi,
    Retenciones,
}

impl ServiceType {
    /// Parse the `servicio` option (case-insensitive).
    pub fn parse_option(value: &str) -> Result<Self, InputError> {
        match value.to_lowercase().as_str() {
            "cfdi" => Ok(Self::Cfdi),
            "retenciones" => Ok(Self::Retenciones),
            _ => Err(InputError::invalid(
                "servicio",
                "The option \"servicio\" is not valid, it must be \"cfdi\" or \"retenciones\"",
            )),
        }
    }

    pub const fn as_str(&self) -> &'static str {
        match self {
            ServiceType::Cfdi => "cfdi",
            ServiceType::Retenciones => "retenciones",
        }
    }
}

/// Endpoint set of one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
    service_type: ServiceType,
    pub authenticate: &'static str,
    pub query: &'static str,
    pub verify: &'static str,
    pub download: &'static str,
}

impl ServiceEndpoints {
    pub const fn cfdi() -> Self {
        Self {
            service_type: ServiceType::Cfdi,
            authenticate: "https://cfdidescargamasivasolicitud.clouda.sat.gob.mx/Autenticacion/Autenticacion.svc",
            query: "https://cfdidescargamasivasolicitud.clouda.sat.gob.mx/SolicitaDescargaService.svc",
            verify: "https://cfdidescargamasivasolicitud.clouda.sat.gob.mx/VerificaSolicitudDescargaService.svc",
            download: "https://cfdidescargamasiva.clouda.sat.gob.mx/DescargaMasivaService.svc",
        }
    }

    pub const fn retenciones() -> Self {
        Self {
            service_type: ServiceType::Retenciones,
            authenticate: "https://retendescargamasivasolicitud.clouda.sat.gob.mx/Autenticacion/Autenticacion.svc",
            query: "https://retendescargamasivasolicitud.clouda.sat.gob.mx/SolicitaDescargaService.svc",
            verify: "https://retendescargamasivasolicitud.clouda.sat.gob.mx/VerificaSolicitudDescargaService.svc",
            download: "https://retendescargamasiva.clouda.sat.gob.mx/DescargaMasivaService.svc",
        }
    }

    pub const fn for_service(service_type: ServiceType) -> Self {
        match service_type {
            ServiceType::Cfdi => Self::cfdi(),
            ServiceType::Retenciones => Self::retenciones(),
        }
    }

    pub const fn service_type(&self) -> ServiceType {
        self.service_type
    }
}
