use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use tera::Tera;

use super::filters;
use crate::error::{error_chain, RepositoryError};
use crate::models::{CommandBody, ConfigType, ParameterSpec, TemplateEntry, TemplateInfo, Vendor};

/// A compiled command template for one (vendor, config type) pair
pub struct Template {
    vendor: Vendor,
    config_type: ConfigType,
    description: String,
    parameters: BTreeMap<String, ParameterSpec>,
    example: Map<String, Value>,
    engine: Tera,
    names: Vec<String>,
}

impl Template {
    /// Compile an entry's command body. Text bodies become one template;
    /// legacy line lists become one template per line, rendered in order.
    pub fn compile(
        vendor: Vendor,
        config_type: ConfigType,
        entry: TemplateEntry,
    ) -> Result<Self, RepositoryError> {
        let mut engine = Tera::default();
        filters::register(&mut engine);

        let sources: Vec<(String, String)> = match entry.commands {
            CommandBody::Text(text) => vec![("body".to_string(), text)],
            CommandBody::Lines(lines) => lines
                .into_iter()
                .enumerate()
                .map(|(i, line)| (format!("line-{}", i), line))
                .collect(),
        };

        let mut names = Vec::with_capacity(sources.len());
        for (name, source) in sources {
            engine
                .add_raw_template(&name, &source)
                .map_err(|e| RepositoryError::Invalid {
                    vendor,
                    config_type,
                    message: error_chain(&e),
                })?;
            names.push(name);
        }

        Ok(Self {
            vendor,
            config_type,
            description: entry.description,
            parameters: entry.parameters,
            example: entry.example,
            engine,
            names,
        })
    }

    pub fn vendor(&self) -> Vendor {
        self.vendor
    }

    pub fn config_type(&self) -> ConfigType {
        self.config_type
    }

    pub fn parameters(&self) -> &BTreeMap<String, ParameterSpec> {
        &self.parameters
    }

    pub fn example(&self) -> &Map<String, Value> {
        &self.example
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            description: self.description.clone(),
            parameters: self.parameters.clone(),
            example: self.example.clone(),
        }
    }

    pub(super) fn engine(&self) -> &Tera {
        &self.engine
    }

    pub(super) fn compiled_names(&self) -> &[String] {
        &self.names
    }
}

impl std::fmt::Debug for Template {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Template")
            .field("vendor", &self.vendor)
            .field("config_type", &self.config_type)
            .field("parts", &self.names.len())
            .finish()
    }
}

/// TemplateRepository holds every compiled template, keyed by vendor and
/// config type. It is built once at startup and is read-only afterwards.
#[derive(Debug, Default)]
pub struct TemplateRepository {
    templates: BTreeMap<(Vendor, ConfigType), Template>,
}

impl TemplateRepository {
    pub fn empty() -> Self {
        Self::default()
    }

    /// Load `<dir>/<vendor>.yaml` for each vendor. A missing or unreadable
    /// document is logged and leaves that vendor with no config types.
    pub fn load(dir: impl AsRef<Path>, vendors: &[Vendor]) -> Self {
        let dir = dir.as_ref();
        let mut repo = Self::empty();

        for &vendor in vendors {
            let path = document_path(dir, vendor);
            if !path.exists() {
                tracing::warn!("No template document for {} at {}", vendor, path.display());
                continue;
            }

            let result = std::fs::read_to_string(&path)
                .map_err(|source| RepositoryError::Io {
                    path: path.display().to_string(),
                    source,
                })
                .and_then(|content| repo.load_document(vendor, &path.display().to_string(), &content));

            match result {
                Ok(count) => tracing::info!("Loaded {} templates for {}", count, vendor),
                Err(e) => tracing::error!("Skipping templates for {}: {}", vendor, e),
            }
        }

        repo
    }

    /// Parse one vendor document and add its entries. Unknown config types
    /// and broken entries are logged and skipped; only a document that is
    /// not a mapping at all is an error. Returns the number of entries added.
    pub fn load_document(
        &mut self,
        vendor: Vendor,
        source: &str,
        content: &str,
    ) -> Result<usize, RepositoryError> {
        if content.trim().is_empty() {
            return Ok(0);
        }

        let document: BTreeMap<String, serde_yaml::Value> =
            serde_yaml::from_str(content).map_err(|e| RepositoryError::Parse {
                path: source.to_string(),
                source: e,
            })?;

        let mut added = 0;
        for (key, value) in document {
            let config_type = match key.parse::<ConfigType>() {
                Ok(ct) => ct,
                Err(e) => {
                    tracing::warn!("{}: ignoring entry: {}", source, e);
                    continue;
                }
            };

            let entry: TemplateEntry = match serde_yaml::from_value(value) {
                Ok(entry) => entry,
                Err(e) => {
                    tracing::warn!("{}: ignoring malformed entry {}: {}", source, key, e);
                    continue;
                }
            };

            match Template::compile(vendor, config_type, entry) {
                Ok(template) => {
                    self.templates.insert((vendor, config_type), template);
                    added += 1;
                }
                Err(e) => tracing::error!("{}: {}", source, e),
            }
        }

        Ok(added)
    }

    /// Vendors with at least one template, in declaration order
    pub fn vendors(&self) -> Vec<Vendor> {
        Vendor::ALL
            .into_iter()
            .filter(|&v| self.templates.keys().any(|(vendor, _)| *vendor == v))
            .collect()
    }

    /// Config types available for a vendor, in declaration order
    pub fn config_types(&self, vendor: Vendor) -> Vec<ConfigType> {
        self.templates
            .keys()
            .filter(|(v, _)| *v == vendor)
            .map(|(_, ct)| *ct)
            .collect()
    }

    pub fn get(&self, vendor: Vendor, config_type: ConfigType) -> Result<&Template, RepositoryError> {
        self.templates
            .get(&(vendor, config_type))
            .ok_or(RepositoryError::MissingTemplate {
                vendor,
                config_type,
            })
    }

    pub fn info(&self, vendor: Vendor, config_type: ConfigType) -> Result<TemplateInfo, RepositoryError> {
        self.get(vendor, config_type).map(Template::info)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Template> {
        self.templates.values()
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}

fn document_path(dir: &Path, vendor: Vendor) -> PathBuf {
    dir.join(format!("{}.yaml", vendor.id()))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
static_route:
  description: Static routes
  parameters:
    destination:
      description: Destination network
      example: 192.168.0.0/24
      required: true
    next_hop:
      description: Next hop address
      required: true
  example:
    destination: 192.168.0.0/24
    next_hop: 10.0.0.1
  commands: |
    ip route-static {{ destination_network }} {{ destination_mask }} {{ next_hop }}
acl_config:
  description: Not a known config type
  commands: "acl 3000"
vlan_management:
  description: Broken entry without commands
bfd_config:
  description: Broken template syntax
  commands: "bfd {{ session_name "
"#;

    #[test]
    fn test_load_document_skips_bad_entries() {
        let mut repo = TemplateRepository::empty();
        let added = repo.load_document(Vendor::Huawei, "huawei.yaml", DOC).unwrap();

        assert_eq!(added, 1);
        assert_eq!(repo.vendors(), vec![Vendor::Huawei]);
        assert_eq!(repo.config_types(Vendor::Huawei), vec![ConfigType::StaticRoute]);
        assert!(repo.config_types(Vendor::Cisco).is_empty());
    }

    #[test]
    fn test_info_and_missing_template() {
        let mut repo = TemplateRepository::empty();
        repo.load_document(Vendor::Huawei, "huawei.yaml", DOC).unwrap();

        let info = repo.info(Vendor::Huawei, ConfigType::StaticRoute).unwrap();
        assert_eq!(info.description, "Static routes");
        assert!(info.parameters["destination"].required);
        assert_eq!(info.example["next_hop"], "10.0.0.1");

        let err = repo.get(Vendor::Huawei, ConfigType::OspfConfig).unwrap_err();
        assert!(matches!(err, RepositoryError::MissingTemplate { .. }));
    }

    #[test]
    fn test_non_mapping_document_is_an_error() {
        let mut repo = TemplateRepository::empty();
        let err = repo
            .load_document(Vendor::Cisco, "cisco.yaml", "- just\n- a list\n")
            .unwrap_err();
        assert!(matches!(err, RepositoryError::Parse { .. }));
        assert!(repo.is_empty());
    }

    #[test]
    fn test_load_from_directory_with_missing_documents() {
        let dir = std::env::temp_dir().join(format!("switchgen-test-{}", uuid::Uuid::new_v4()));
        std::fs::create_dir_all(&dir).unwrap();
        std::fs::write(dir.join("h3c.yaml"), DOC).unwrap();

        let repo = TemplateRepository::load(&dir, &Vendor::ALL);
        assert_eq!(repo.vendors(), vec![Vendor::H3c]);
        assert_eq!(repo.len(), 1);
        assert!(repo.config_types(Vendor::Huawei).is_empty());

        std::fs::remove_dir_all(&dir).unwrap();
    }
}
