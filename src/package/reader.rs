use std::{
    collections::BTreeMap,
    fs::File,
    io::Read,
    path::{Path, PathBuf},
    sync::OnceLock,
};

use regex::Regex;
use serde::Serialize;
use tracing::{debug, warn};
use zip::ZipArchive;

use crate::lib::errors::PackageError;

const METADATA_EXTENSION: &str = ".txt";
const XML_EXTENSION: &str = ".xml";
const METADATA_SEPARATOR: char = '~';

/// One row of a metadata package keyed by column name (`uuid`, `rfcEmisor`, ...).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct MetadataItem {
    values: BTreeMap<String, String>,
}

impl MetadataItem {
    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }

    pub fn uuid(&self) -> &str {
        self.get("uuid").unwrap_or_default()
    }

}

/// XML document of a CFDI package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CfdiDocument {
    /// Lower-case fiscal folio of the document.
    pub uuid: String,
    /// Entry bytes as stored; the declared encoding is not always UTF-8.
    pub content: Vec<u8>,
}

/// Open ZIP package downloaded from the service.
pub struct PackageReader {
    path: PathBuf,
    archive: ZipArchive<File>,
}

impl PackageReader {
    pub fn open(path: &Path) -> Result<Self, PackageError> {
        if !path.is_file() {
            return Err(PackageError::NotFound {
                path: path.to_path_buf(),
            });
        }
        let file = File::open(path).map_err(|source| PackageError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        let archive = ZipArchive::new(file).map_err(|source| PackageError::Zip {
            path: path.to_path_buf(),
            source,
        })?;
        debug!(
            target: "descarga_masiva::package",
            path = %path.display(),
            entries = archive.len(),
            "Opened package"
        );
        Ok(Self {
            path: path.to_path_buf(),
            archive,
        })
    }

    /// Rows of every metadata table in the package.
    pub fn metadata(&mut self) -> Result<Vec<MetadataItem>, PackageError> {
        let tables = self.entries_with_extension(METADATA_EXTENSION)?;
        if tables.is_empty() {
            return Err(PackageError::MissingMetadata {
                path: self.path.clone(),
            });
        }
        Ok(tables
            .iter()
            .flat_map(|(_, contents)| parse_metadata(&String::from_utf8_lossy(contents)))
            .collect())
    }

    /// XML documents of the package, in archive order.
    pub fn cfdis(&mut self) -> Result<Vec<CfdiDocument>, PackageError> {
        let documents = self
            .entries_with_extension(XML_EXTENSION)?
            .into_iter()
            .filter_map(|(name, content)| match document_uuid(&name, &content) {
                Some(uuid) => Some(CfdiDocument { uuid, content }),
                None => {
                    warn!(
                        target: "descarga_masiva::package",
                        entry = %name,
                        "Skipping XML entry without a UUID"
                    );
                    None
                }
            })
            .collect();
        Ok(documents)
    }

    fn entries_with_extension(
        &mut self,
        extension: &str,
    ) -> Result<Vec<(String, Vec<u8>)>, PackageError> {
        let mut entries = Vec::new();
        for index in 0..self.archive.len() {
            let mut entry = self
                .archive
                .by_index(index)
                .map_err(|source| PackageError::Zip {
                    path: self.path.clone(),
                    source,
                })?;
            let name = entry.name().to_string();
            if entry.is_dir() || !name.to_lowercase().ends_with(extension) {
                continue;
            }
            let mut contents = Vec::new();
            entry
                .read_to_end(&mut contents)
                .map_err(|source| PackageError::Entry {
                    path: self.path.clone(),
                    entry: name.clone(),
                    source,
                })?;
            entries.push((name, contents));
        }
        Ok(entries)
    }
}

/// Parse a `~` separated table whose first non-empty line is the header.
///
/// Header names become lower camel case keys; rows with fewer fields than the
/// header get empty values for the missing columns.
pub fn parse_metadata(contents: &str) -> Vec<MetadataItem> {
    let mut lines = contents
        .trim_start_matches('\u{feff}')
        .lines()
        .map(|line| line.trim_end_matches('\r'))
        .filter(|line| !line.trim().is_empty());

    let Some(header) = lines.next() else {
        return Vec::new();
    };
    let columns: Vec<String> = header
        .split(METADATA_SEPARATOR)
        .map(|name| lower_first(name.trim()))
        .collect();

    lines
        .map(|line| {
            let mut fields = line.split(METADATA_SEPARATOR);
            let values = columns
                .iter()
                .map(|column| {
                    let value = fields.next().unwrap_or_default().trim().to_string();
                    (column.clone(), value)
                })
                .collect();
            MetadataItem { values }
        })
        .collect()
}

fn lower_first(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first.to_lowercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn tfd_uuid_pattern() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r#"TimbreFiscalDigital\b[^>]*?\bUUID\s*=\s*["']([0-9A-Fa-f-]{36})["']"#)
            .expect("timbre pattern is a valid regex")
    })
}

/// UUID of the fiscal stamp, falling back to the entry file name.
fn document_uuid(entry_name: &str, content: &[u8]) -> Option<String> {
    let text = String::from_utf8_lossy(content);
    if let Some(captures) = tfd_uuid_pattern().captures(&text) {
        return captures.get(1).map(|m| m.as_str().to_lowercase());
    }
    let stem = Path::new(entry_name).file_stem()?.to_str()?;
    uuid::Uuid::parse_str(stem)
        .ok()
        .map(|uuid| uuid.hyphenated().to_string())
}
