//! BOSH manifest and topology types exchanged with adapters.

use crate::domain::model::Properties;
use crate::utils::error::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Deployed topology: instance group name to the IPs of its VMs.
pub type BoshVMs = HashMap<String, Vec<String>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BoshManifest {
    pub name: String,
    pub releases: Vec<BoshRelease>,
    pub stemcells: Vec<BoshStemcell>,
    pub instance_groups: Vec<BoshInstanceGroup>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub update: Option<BoshUpdate>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

impl BoshManifest {
    pub fn from_yaml(content: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(content)?)
    }

    pub fn to_yaml(&self) -> Result<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn instance_group(&self, name: &str) -> Option<&BoshInstanceGroup> {
        self.instance_groups.iter().find(|group| group.name == name)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoshRelease {
    pub name: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoshStemcell {
    pub alias: String,
    pub os: String,
    pub version: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoshInstanceGroup {
    pub name: String,
    pub instances: i32,
    pub jobs: Vec<BoshJob>,
    pub vm_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub persistent_disk_type: Option<String>,
    pub stemcell: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub azs: Vec<String>,
    pub networks: Vec<BoshNetwork>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub lifecycle: Option<String>,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoshJob {
    pub name: String,
    pub release: String,
    #[serde(default, skip_serializing_if = "Properties::is_empty")]
    pub properties: Properties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoshNetwork {
    pub name: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub static_ips: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub default: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoshUpdate {
    pub canaries: UpdateLimit,
    pub canary_watch_time: String,
    pub update_watch_time: String,
    pub max_in_flight: UpdateLimit,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub serial: Option<bool>,
}

/// `canaries` and `max_in_flight` take either a VM count or a percentage
/// of the instance group, e.g. `25%`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum UpdateLimit {
    Count(u32),
    Percent(String),
}

impl UpdateLimit {
    /// The percentage for a well-formed `N%` value with `N` in 1..=100.
    pub fn percent(&self) -> Option<u32> {
        match self {
            UpdateLimit::Count(_) => None,
            UpdateLimit::Percent(raw) => raw
                .trim()
                .strip_suffix('%')
                .and_then(|n| n.trim().parse::<u32>().ok())
                .filter(|n| (1..=100).contains(n)),
        }
    }
}
