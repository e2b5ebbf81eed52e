use crate::utils::error::{AdapterError, Result};
use crate::utils::validation::{
    validate_dive, validate_min, validate_min_len, validate_nested, validate_required,
    validate_url, Validate,
};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Open, plan-specific configuration. Adapters interpret the contents.
pub type Properties = serde_json::Map<String, Value>;

/// Reads `null` as an empty mapping; Go encoders write a nil map that way.
fn nullable_properties<'de, D>(deserializer: D) -> std::result::Result<Properties, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Properties>::deserialize(deserializer)?.unwrap_or_default())
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceRelease {
    pub name: String,
    pub version: String,
    pub jobs: Vec<String>,
}

impl Validate for ServiceRelease {
    fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_required("version", &self.version)?;
        validate_min_len("jobs", &self.jobs, 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ServiceReleases(pub Vec<ServiceRelease>);

impl ServiceReleases {
    pub fn iter(&self) -> std::slice::Iter<'_, ServiceRelease> {
        self.0.iter()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Finds the first release that ships `job`.
    pub fn providing(&self, job: &str) -> Option<&ServiceRelease> {
        self.0.iter().find(|release| release.jobs.iter().any(|j| j == job))
    }
}

impl From<Vec<ServiceRelease>> for ServiceReleases {
    fn from(releases: Vec<ServiceRelease>) -> Self {
        ServiceReleases(releases)
    }
}

impl<'a> IntoIterator for &'a ServiceReleases {
    type Item = &'a ServiceRelease;
    type IntoIter = std::slice::Iter<'a, ServiceRelease>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl Validate for ServiceReleases {
    fn validate(&self) -> Result<()> {
        if self.is_empty() {
            return Err(AdapterError::NoReleasesSpecified);
        }
        validate_dive("releases", &self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stemcell {
    #[serde(rename = "stemcell_os")]
    pub os: String,
    #[serde(rename = "stemcell_version")]
    pub version: String,
}

impl Validate for Stemcell {
    fn validate(&self) -> Result<()> {
        validate_required("stemcell_os", &self.os)?;
        validate_required("stemcell_version", &self.version)
    }
}

/// Identity and software baseline of the deployment a manifest is generated for.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceDeployment {
    pub deployment_name: String,
    pub releases: ServiceReleases,
    pub stemcell: Stemcell,
}

impl Validate for ServiceDeployment {
    fn validate(&self) -> Result<()> {
        validate_required("deployment_name", &self.deployment_name)?;
        self.releases.validate()?;
        validate_nested("stemcell", &self.stemcell)
    }
}

/// One homogeneous group of VMs in a plan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InstanceGroup {
    pub name: String,
    pub vm_type: String,
    #[serde(
        rename = "persistent_disk_type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub persistent_disk: Option<String>,
    pub instances: i32,
    pub networks: Vec<String>,
    pub azs: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<String>,
}

impl Validate for InstanceGroup {
    fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_required("vm_type", &self.vm_type)?;
        validate_min("instances", self.instances, 1)?;
        validate_min_len("azs", &self.azs, 1)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Plan {
    #[serde(default, deserialize_with = "nullable_properties")]
    pub properties: Properties,
    pub instance_groups: Vec<InstanceGroup>,
}

impl Plan {
    pub fn instance_group(&self, name: &str) -> Option<&InstanceGroup> {
        self.instance_groups.iter().find(|group| group.name == name)
    }
}

impl Validate for Plan {
    fn validate(&self) -> Result<()> {
        validate_dive("instance_groups", &self.instance_groups)
    }
}

/// The raw request body the orchestrator received for a provision or update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RequestParameters(pub Properties);

impl RequestParameters {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// User-supplied parameters nested under `"parameters"`.
    ///
    /// Absent or `null` yields an empty mapping; any non-mapping value is
    /// rejected with [`AdapterError::InvalidParametersShape`].
    pub fn arbitrary_params(&self) -> Result<Properties> {
        match self.0.get("parameters") {
            None | Some(Value::Null) => Ok(Properties::new()),
            Some(Value::Object(params)) => Ok(params.clone()),
            Some(other) => Err(AdapterError::InvalidParametersShape {
                found: value_kind(other).to_string(),
            }),
        }
    }
}

impl From<Properties> for RequestParameters {
    fn from(params: Properties) -> Self {
        RequestParameters(params)
    }
}

fn value_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Everything a consumer needs to use a bound service instance.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Binding {
    pub credentials: Properties,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub syslog_drain_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub route_service_url: Option<String>,
}

impl Validate for Binding {
    fn validate(&self) -> Result<()> {
        if let Some(url) = &self.syslog_drain_url {
            validate_url("syslog_drain_url", url, &["syslog", "syslog-tls", "https"])?;
        }
        if let Some(url) = &self.route_service_url {
            validate_url("route_service_url", url, &["https"])?;
        }
        Ok(())
    }
}
