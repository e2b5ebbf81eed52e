#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::bosh::{BoshUpdate, UpdateLimit};
use crate::utils::error::{AdapterError, Result};
use crate::utils::validation::{
    validate_dive, validate_min, validate_min_len, validate_required, validate_url, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Settings for [`TemplateAdapter`](crate::adapter::template_adapter::TemplateAdapter).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdapterConfig {
    pub instance_groups: Vec<JobMapping>,
    pub binding: BindingConfig,
    pub update: Option<BoshUpdate>,
    #[serde(default)]
    pub allowed_parameters: Vec<String>,
}

/// Jobs to colocate on every VM of the plan instance group called `name`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JobMapping {
    pub name: String,
    pub jobs: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BindingConfig {
    pub instance_group: String,
    pub port: u16,
    pub syslog_drain_url: Option<String>,
    #[serde(default)]
    pub require_app_guid: bool,
}

impl AdapterConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(AdapterError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| AdapterError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Replaces `${VAR_NAME}` with the variable's value; unset variables are left as written.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| AdapterError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn jobs_for(&self, instance_group: &str) -> Option<&[String]> {
        self.instance_groups
            .iter()
            .find(|mapping| mapping.name == instance_group)
            .map(|mapping| mapping.jobs.as_slice())
    }

    pub fn is_allowed_parameter(&self, name: &str) -> bool {
        self.allowed_parameters.iter().any(|p| p == name)
    }
}

impl Validate for JobMapping {
    fn validate(&self) -> Result<()> {
        validate_required("name", &self.name)?;
        validate_min_len("jobs", &self.jobs, 1)
    }
}

impl Validate for AdapterConfig {
    fn validate(&self) -> Result<()> {
        validate_dive("instance_groups", &self.instance_groups)?;

        validate_required("binding.instance_group", &self.binding.instance_group)?;
        validate_min("binding.port", self.binding.port, 1)?;
        if self.jobs_for(&self.binding.instance_group).is_none() {
            return Err(AdapterError::ConfigError {
                message: format!(
                    "binding.instance_group '{}' has no entry in instance_groups",
                    self.binding.instance_group
                ),
            });
        }
        if let Some(url) = &self.binding.syslog_drain_url {
            validate_url("binding.syslog_drain_url", url, &["syslog", "syslog-tls", "https"])?;
        }

        if let Some(update) = &self.update {
            validate_update_limit("update.canaries", &update.canaries, 0)?;
            validate_update_limit("update.max_in_flight", &update.max_in_flight, 1)?;
        }

        Ok(())
    }
}

fn validate_update_limit(field_name: &str, limit: &UpdateLimit, min_count: u32) -> Result<()> {
    match limit {
        UpdateLimit::Count(count) => validate_min(field_name, *count, min_count),
        UpdateLimit::Percent(_) if limit.percent().is_some() => Ok(()),
        UpdateLimit::Percent(_) => Err(AdapterError::validation(field_name, "percent")),
    }
}
