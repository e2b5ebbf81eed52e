use crate::config::AdapterConfig;
use crate::domain::bosh::{
    BoshInstanceGroup, BoshJob, BoshManifest, BoshNetwork, BoshRelease, BoshStemcell, BoshVMs,
};
use crate::domain::model::{
    Binding, InstanceGroup, Plan, Properties, RequestParameters, ServiceDeployment,
    ServiceReleases,
};
use crate::domain::ports::{Binder, ManifestGenerator};
use crate::utils::error::{AdapterError, Result};
use anyhow::anyhow;
use serde_json::{json, Value};

pub const STEMCELL_ALIAS: &str = "only-stemcell";

/// A configuration-driven adapter: plan instance groups become BOSH instance
/// groups running the jobs listed for them in [`AdapterConfig`].
#[derive(Debug, Clone)]
pub struct TemplateAdapter {
    config: AdapterConfig,
}

impl TemplateAdapter {
    pub fn new(config: AdapterConfig) -> Self {
        Self { config }
    }

    fn check_parameters(&self, params: &Properties) -> Result<()> {
        let mut unsupported: Vec<&str> = params
            .keys()
            .filter(|key| !self.config.is_allowed_parameter(key))
            .map(String::as_str)
            .collect();
        if unsupported.is_empty() {
            return Ok(());
        }
        unsupported.sort_unstable();
        Err(anyhow!("unsupported parameters: {}", unsupported.join(", ")).into())
    }

    fn check_no_scale_down(&self, plan: &Plan, previous_plan: &Plan) -> Result<()> {
        for previous in &previous_plan.instance_groups {
            if let Some(current) = plan.instance_group(&previous.name) {
                if current.instances < previous.instances {
                    return Err(anyhow!(
                        "cannot scale down instance group '{}' from {} to {} instances",
                        previous.name,
                        previous.instances,
                        current.instances
                    )
                    .into());
                }
            }
        }
        Ok(())
    }

    fn instance_group(
        &self,
        group: &InstanceGroup,
        releases: &ServiceReleases,
    ) -> Result<BoshInstanceGroup> {
        let job_names = self.config.jobs_for(&group.name).ok_or_else(|| {
            anyhow!("no jobs configured for instance group '{}'", group.name)
        })?;

        let jobs = job_names
            .iter()
            .map(|job| -> Result<BoshJob> {
                let release = releases.providing(job).ok_or_else(|| {
                    anyhow!("job '{}' is not provided by any service release", job)
                })?;
                Ok(BoshJob {
                    name: job.clone(),
                    release: release.name.clone(),
                    properties: Properties::new(),
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(BoshInstanceGroup {
            name: group.name.clone(),
            instances: group.instances,
            jobs,
            vm_type: group.vm_type.clone(),
            persistent_disk_type: group.persistent_disk.clone(),
            stemcell: STEMCELL_ALIAS.to_string(),
            azs: group.azs.clone(),
            networks: group
                .networks
                .iter()
                .map(|name| BoshNetwork {
                    name: name.clone(),
                    static_ips: Vec::new(),
                    default: Vec::new(),
                })
                .collect(),
            lifecycle: group.lifecycle.clone(),
            properties: Properties::new(),
        })
    }

    /// Plan properties, then parameters a user set on an earlier deployment,
    /// then this request's parameters.
    fn manifest_properties(
        &self,
        plan: &Plan,
        arbitrary_params: Properties,
        previous_manifest: Option<&BoshManifest>,
    ) -> Properties {
        let mut properties = plan.properties.clone();
        if let Some(previous) = previous_manifest {
            for (key, value) in &previous.properties {
                if self.config.is_allowed_parameter(key) {
                    properties.insert(key.clone(), value.clone());
                }
            }
        }
        properties.extend(arbitrary_params);
        properties
    }
}

impl ManifestGenerator for TemplateAdapter {
    fn generate_manifest(
        &self,
        service_deployment: &ServiceDeployment,
        plan: &Plan,
        request_params: &RequestParameters,
        previous_manifest: Option<&BoshManifest>,
        previous_plan: Option<&Plan>,
    ) -> Result<BoshManifest> {
        let arbitrary_params = request_params.arbitrary_params()?;
        self.check_parameters(&arbitrary_params)?;

        if let Some(previous_plan) = previous_plan {
            self.check_no_scale_down(plan, previous_plan)?;
        }

        let instance_groups = plan
            .instance_groups
            .iter()
            .map(|group| self.instance_group(group, &service_deployment.releases))
            .collect::<Result<Vec<_>>>()?;

        tracing::debug!(
            "Built {} instance groups for {}",
            instance_groups.len(),
            service_deployment.deployment_name
        );

        Ok(BoshManifest {
            name: service_deployment.deployment_name.clone(),
            releases: service_deployment
                .releases
                .iter()
                .map(|release| BoshRelease {
                    name: release.name.clone(),
                    version: release.version.clone(),
                })
                .collect(),
            stemcells: vec![BoshStemcell {
                alias: STEMCELL_ALIAS.to_string(),
                os: service_deployment.stemcell.os.clone(),
                version: service_deployment.stemcell.version.clone(),
            }],
            instance_groups,
            update: self.config.update.clone(),
            properties: self.manifest_properties(plan, arbitrary_params, previous_manifest),
        })
    }
}

impl Binder for TemplateAdapter {
    fn create_binding(
        &self,
        binding_id: &str,
        deployment_topology: &BoshVMs,
        manifest: &BoshManifest,
        arbitrary_params: &Properties,
    ) -> Result<Binding> {
        if self.config.binding.require_app_guid {
            match arbitrary_params.get("app_guid") {
                Some(Value::String(guid)) if !guid.is_empty() => {}
                _ => {
                    return Err(AdapterError::app_guid_not_provided(anyhow!(
                        "app_guid is required to create binding {}",
                        binding_id
                    )))
                }
            }
        }

        let group = &self.config.binding.instance_group;
        let hosts = deployment_topology
            .get(group)
            .filter(|hosts| !hosts.is_empty())
            .ok_or_else(|| {
                anyhow!("no VMs found for instance group '{}' in {}", group, manifest.name)
            })?;

        let mut credentials = Properties::new();
        credentials.insert("hosts".to_string(), json!(hosts));
        credentials.insert("port".to_string(), json!(self.config.binding.port));

        tracing::debug!("Binding {} issued for {} hosts", binding_id, hosts.len());

        Ok(Binding {
            credentials,
            syslog_drain_url: self.config.binding.syslog_drain_url.clone(),
            route_service_url: None,
        })
    }

    fn delete_binding(
        &self,
        binding_id: &str,
        _deployment_topology: &BoshVMs,
        manifest: &BoshManifest,
    ) -> Result<()> {
        // credentials are derived from topology alone, nothing to revoke
        tracing::debug!("Binding {} removed from {}", binding_id, manifest.name);
        Ok(())
    }
}
