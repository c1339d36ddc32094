//! Complement codes accepted by the query filter, per service.
use crate::service::endpoints::ServiceType;

/// `(code, label)` pairs for CFDI complements, sorted by code.
pub const CFDI_COMPLEMENTS: &[(&str, &str)] = &[
    ("acreditamientoieps10", "Acreditamiento de IEPS 1.0"),
    ("aerolineas", "Aerolíneas 1.0"),
    ("cartaporte10", "Carta Porte 1.0"),
    ("cartaporte20", "Carta Porte 2.0"),
    ("cartaporte30", "Carta Porte 3.0"),
    ("cartaporte31", "Carta Porte 3.1"),
    ("certificadodestruccion", "Certificado de destrucción 1.0"),
    ("cfdiregistrofiscal", "CFDI Registro fiscal 1.0"),
    ("comercioexterior10", "Comercio Exterior 1.0"),
    ("comercioexterior11", "Comercio Exterior 1.1"),
    ("comercioexterior20", "Comercio Exterior 2.0"),
    ("consumodecombustibles", "Consumo de combustibles 1.0"),
    ("consumodecombustibles11", "Consumo de combustibles 1.1"),
    ("detallista", "Detallista"),
    ("divisas", "Divisas 1.0"),
    ("donat11", "Donatarias 1.1"),
    ("ecc11", "Estado de cuenta de combustibles 1.1"),
    ("ecc12", "Estado de cuenta de combustibles 1.2"),
    ("gastoshidrocarburos10", "Gastos Hidrocarburos 1.0"),
    ("iedu", "Instituciones educativas privadas 1.0"),
    ("implocal", "Impuestos locales 1.0"),
    ("ine11", "INE 1.1"),
    ("ingresoshidrocarburos", "Ingresos Hidrocarburos 1.0"),
    ("leyendasfisc", "Leyendas fiscales 1.0"),
    ("nomina11", "Nómina 1.1"),
    ("nomina12", "Nómina 1.2"),
    ("notariospublicos", "Notarios públicos 1.0"),
    ("obrasarteantiguedades", "Obras de arte plásticas y antigüedades 1.0"),
    ("pagoenespecie", "Pago en especie 1.0"),
    ("pagos10", "Recepción de pagos 1.0"),
    ("pagos20", "Recepción de pagos 2.0"),
    ("pfic", "Persona física integrante de coordinado 1.0"),
    (
        "renovacionysustitucionvehiculos",
        "Renovación y sustitución de vehículos 1.0",
    ),
    (
        "servicioparcialconstruccion",
        "Servicios parciales de construcción 1.0",
    ),
    ("spei", "SPEI"),
    ("terceros11", "Terceros 1.1"),
    ("turistapasajeroextranjero", "Turista pasajero extranjero 1.0"),
    ("valesdedespensa", "Vales de despensa 1.0"),
    ("vehiculousado", "Vehículo usado 1.0"),
    ("ventavehiculos11", "Venta de vehículos 1.1"),
];

/// `(code, label)` pairs for Retenciones complements, sorted by code.
pub const RETENCIONES_COMPLEMENTS: &[(&str, &str)] = &[
    ("arrendamientoenfideicomiso", "Arrendamiento en fideicomiso"),
    ("dividendos", "Dividendos"),
    ("enajenaciondeacciones", "Enajenación de acciones"),
    ("fideicomisonoempresarial", "Fideicomiso no empresarial"),
    ("intereses", "Intereses"),
    ("intereseshipotecarios", "Intereses hipotecarios"),
    ("operacionesconderivados", "Operaciones con derivados"),
    ("pagosaextranjeros", "Pagos a extranjeros"),
    ("planesderetiro10", "Planes de retiro 1.0"),
    ("planesderetiro11", "Planes de retiro 1.1"),
    ("premios", "Premios"),
    ("sectorfinanciero", "Sector Financiero"),
    (
        "serviciosplataformastecnologicas",
        "Servicios Plataformas Tecnológicas",
    ),
];

/// Complement table of a service.
pub fn complements_for(service: ServiceType) -> &'static [(&'static str, &'static str)] {
    match service {
        ServiceType::Cfdi => CFDI_COMPLEMENTS,
        ServiceType::Retenciones => RETENCIONES_COMPLEMENTS,
    }
}

/// Complement filter of a period query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Complement {
    /// No complement filter.
    #[default]
    Undefined,
    Known {
        service: ServiceType,
        code: &'static str,
        label: &'static str,
    },
}

impl Complement {
    /// Look `code` up in the table of `service`. Empty means no filter.
    ///
    /// Matching is exact and case-sensitive. Returns `None` when the code is
    /// not part of the table.
    pub fn lookup(service: ServiceType, code: &str) -> Option<Self> {
        if code.is_empty() {
            return Some(Self::Undefined);
        }
        complements_for(service)
            .iter()
            .find(|(known, _)| *known == code)
            .map(|&(code, label)| Self::Known {
                service,
                code,
                label,
            })
    }

    /// Code sent to the service; empty when undefined.
    pub fn code(&self) -> &'static str {
        match self {
            Complement::Undefined => "",
            Complement::Known { code, .. } => code,
        }
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, Complement::Undefined)
    }
}
