use uuid::Uuid;

use crate::error::GenerateError;
use crate::models::{
    ConfigType, ConfigTypeEntry, ParameterSet, RawParameters, TemplateInfo, Vendor, VendorEntry,
};
use crate::pipeline::Pipeline;
use crate::templates::{self, TemplateRepository};
use crate::utils::config_summary;
use crate::validate::Validator;

/// Result of a successful generation
#[derive(Debug, Clone)]
pub struct Generated {
    pub commands: Vec<String>,
    pub parameters: ParameterSet,
}

/// ConfigGenerator ties validation, normalization and rendering together.
/// It is immutable once built and shared behind an `Arc`.
#[derive(Debug)]
pub struct ConfigGenerator {
    repository: TemplateRepository,
    validator: Validator,
    pipeline: Pipeline,
}

impl ConfigGenerator {
    pub fn new(repository: TemplateRepository, pipeline: Pipeline) -> Self {
        Self {
            repository,
            validator: Validator::with_expander(pipeline.expander().clone()),
            pipeline,
        }
    }

    pub fn repository(&self) -> &TemplateRepository {
        &self.repository
    }

    pub fn vendors(&self) -> Vec<VendorEntry> {
        self.repository
            .vendors()
            .into_iter()
            .map(|vendor| VendorEntry {
                value: vendor,
                name: vendor.display_name(),
                config_type_count: self.repository.config_types(vendor).len(),
            })
            .collect()
    }

    pub fn config_types(&self, vendor: Vendor) -> Vec<ConfigTypeEntry> {
        self.repository
            .config_types(vendor)
            .into_iter()
            .map(|ct| ConfigTypeEntry {
                value: ct,
                name: ct.display_name(),
            })
            .collect()
    }

    pub fn template_info(
        &self,
        vendor: Vendor,
        config_type: ConfigType,
    ) -> Result<TemplateInfo, GenerateError> {
        self.repository
            .info(vendor, config_type)
            .map_err(|_| GenerateError::Unsupported {
                vendor,
                config_type,
            })
    }

    pub fn validate(
        &self,
        vendor: Vendor,
        config_type: ConfigType,
        raw: &RawParameters,
    ) -> (bool, Vec<String>) {
        self.validator.validate(config_type, vendor, raw)
    }

    /// Validate, normalize and render one request
    pub fn generate(
        &self,
        vendor: Vendor,
        config_type: ConfigType,
        raw: &RawParameters,
    ) -> Result<Generated, GenerateError> {
        let request_id = Uuid::new_v4();

        let template = self
            .repository
            .get(vendor, config_type)
            .map_err(|_| GenerateError::Unsupported {
                vendor,
                config_type,
            })?;

        let (ok, errors) = self.validator.validate(config_type, vendor, raw);
        if !ok {
            tracing::info!(
                "[{}] Rejected {}/{}: {} validation errors",
                request_id,
                vendor,
                config_type,
                errors.len()
            );
            return Err(GenerateError::Validation(errors));
        }

        let parameters = self
            .pipeline
            .normalize(config_type, vendor, raw)
            .inspect_err(|e| {
                tracing::info!("[{}] Rejected {}/{}: {}", request_id, vendor, config_type, e)
            })?;

        let commands = templates::render(template, &parameters).inspect_err(|e| {
            tracing::error!("[{}] {}", request_id, e);
        })?;

        if commands.is_empty() {
            tracing::warn!(
                "[{}] {}/{} rendered no commands",
                request_id,
                vendor,
                config_type
            );
            return Err(GenerateError::Empty);
        }

        tracing::info!(
            "[{}] Generated {} commands ({})",
            request_id,
            commands.len(),
            config_summary(vendor, config_type, &parameters)
        );

        Ok(Generated {
            commands,
            parameters,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const DOC: &str = r#"
vlan_management:
  description: VLANs
  example:
    vlan_id: "10"
  commands: |
    {% if is_batch %}
    vlan batch {{ vlan_batch }}
    {% else %}
    vlan {{ vlan_id }}
    {% endif %}
static_route:
  description: Broken on purpose
  commands: |
    ip route-static {{ destination }} {{ missing_key }}
port_aggregation:
  description: Renders nothing
  commands: |
    {% if never_set %}interface {{ lag_interface }}{% endif %}
"#;

    fn generator() -> ConfigGenerator {
        let mut repo = TemplateRepository::empty();
        repo.load_document(Vendor::Huawei, "huawei.yaml", DOC).unwrap();
        ConfigGenerator::new(repo, Pipeline::default())
    }

    fn raw(pairs: &[(&str, &str)]) -> RawParameters {
        RawParameters::from_pairs(pairs.iter().copied())
    }

    #[test]
    fn test_generate_success() {
        let out = generator()
            .generate(Vendor::Huawei, ConfigType::VlanManagement, &raw(&[("vlan_id", "10-12")]))
            .unwrap();
        assert_eq!(out.commands, vec!["vlan batch 10 to 12"]);
        assert_eq!(out.parameters.text("vlan_batch").as_deref(), Some("10 to 12"));
    }

    #[test]
    fn test_generate_error_strata() {
        let gen = generator();

        let err = gen
            .generate(Vendor::Huawei, ConfigType::VlanManagement, &raw(&[("vlan_id", "0")]))
            .unwrap_err();
        assert!(matches!(err, GenerateError::Validation(ref e) if e.len() == 1));

        let err = gen
            .generate(Vendor::Cisco, ConfigType::VlanManagement, &raw(&[("vlan_id", "10")]))
            .unwrap_err();
        assert!(matches!(err, GenerateError::Unsupported { .. }));

        let err = gen
            .generate(
                Vendor::Huawei,
                ConfigType::StaticRoute,
                &raw(&[("destination", "10.0.0.0/8"), ("next_hop", "10.0.0.1")]),
            )
            .unwrap_err();
        assert!(matches!(err, GenerateError::Render(_)));

        let err = gen
            .generate(Vendor::Huawei, ConfigType::PortAggregation, &raw(&[("interfaces", "GE0/0/1")]))
            .unwrap_err();
        assert!(matches!(err, GenerateError::Empty));
    }

    #[test]
    fn test_oversized_port_range_is_rejected() {
        use crate::utils::ports::{ExpandBounds, PortExpander};

        let mut repo = TemplateRepository::empty();
        repo.load_document(
            Vendor::Huawei,
            "huawei.yaml",
            r#"
interface_config:
  commands: |
    {% for port in port_list %}
    interface {{ port }}
    {% endfor %}
"#,
        )
        .unwrap();
        let gen = ConfigGenerator::new(
            repo,
            Pipeline::new(PortExpander::new(ExpandBounds {
                max_members: 4,
                ..ExpandBounds::default()
            })),
        );
        let params = |interface: &str| {
            raw(&[("interface", interface), ("port_mode", "access"), ("vlan_id", "10")])
        };

        let err = gen
            .generate(Vendor::Huawei, ConfigType::InterfaceConfig, &params("GigabitEthernet0/0/1-5"))
            .unwrap_err();
        assert!(
            matches!(err, GenerateError::Validation(ref e) if e[0].contains("more than 4 interfaces")),
            "{:?}",
            err
        );

        let out = gen
            .generate(Vendor::Huawei, ConfigType::InterfaceConfig, &params("GigabitEthernet0/0/1-4"))
            .unwrap();
        assert_eq!(out.commands.len(), 4);
    }

    #[test]
    fn test_shared_generator_renders_from_many_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ConfigGenerator>();

        let gen = generator();
        let results: Vec<Vec<String>> = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| {
                    s.spawn(|| {
                        gen.generate(
                            Vendor::Huawei,
                            ConfigType::VlanManagement,
                            &raw(&[("vlan_id", "10,20-22")]),
                        )
                        .unwrap()
                        .commands
                    })
                })
                .collect();
            handles.into_iter().map(|h| h.join().unwrap()).collect()
        });

        assert_eq!(results.len(), 8);
        for commands in results {
            assert_eq!(commands, vec!["vlan batch 10 20 to 22"]);
        }
    }

    #[test]
    fn test_listing() {
        let gen = generator();
        let vendors = gen.vendors();
        assert_eq!(vendors.len(), 1);
        assert_eq!(vendors[0].name, "Huawei");
        assert_eq!(vendors[0].config_type_count, 3);

        let types: Vec<ConfigType> = gen.config_types(Vendor::Huawei).iter().map(|e| e.value).collect();
        assert_eq!(
            types,
            vec![ConfigType::VlanManagement, ConfigType::PortAggregation, ConfigType::StaticRoute]
        );

        let info = gen.template_info(Vendor::Huawei, ConfigType::VlanManagement).unwrap();
        assert_eq!(info.example["vlan_id"], "10");
        assert!(gen.template_info(Vendor::H3c, ConfigType::VlanManagement).is_err());
    }
}
