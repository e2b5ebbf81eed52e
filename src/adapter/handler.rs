//! Command-line transport for an adapter.
//!
//! This sits outside the adapter contract itself: it only decodes the string
//! arguments an orchestrator passes to an adapter executable, enforces the
//! validation preconditions, and calls whichever of [`ManifestGenerator`] and
//! [`Binder`] the adapter supplies. Adapters may be driven by any other
//! transport instead.

use crate::domain::bosh::{BoshManifest, BoshVMs};
use crate::domain::model::{Plan, RequestParameters, ServiceDeployment};
use crate::domain::ports::{Binder, ManifestGenerator};
use crate::utils::error::{AdapterError, Result};
use crate::utils::validation::Validate;
use serde::de::DeserializeOwned;

/// One adapter operation as the orchestrator invokes it: every document
/// arrives as a string argument.
#[derive(Debug, Clone)]
#[cfg_attr(feature = "cli", derive(clap::Subcommand))]
pub enum Invocation {
    /// Generate a BOSH manifest and print it as YAML
    GenerateManifest {
        /// Service deployment as JSON
        service_deployment: String,
        /// Plan as JSON
        plan: String,
        /// Request parameters as JSON
        request_params: String,
        /// Previous manifest as YAML, empty on first deployment
        previous_manifest: String,
        /// Previous plan as JSON, `null` or empty on first deployment
        previous_plan: String,
    },
    /// Create a binding and print it as JSON
    CreateBinding {
        binding_id: String,
        /// Deployment topology as JSON
        bosh_vms: String,
        /// Manifest as YAML
        manifest: String,
        /// Request parameters as JSON
        request_params: String,
    },
    /// Delete a binding
    DeleteBinding {
        binding_id: String,
        /// Deployment topology as JSON
        bosh_vms: String,
        /// Manifest as YAML
        manifest: String,
        /// Request parameters as JSON
        request_params: String,
    },
}

impl Invocation {
    pub fn operation(&self) -> &'static str {
        match self {
            Invocation::GenerateManifest { .. } => "generate-manifest",
            Invocation::CreateBinding { .. } => "create-binding",
            Invocation::DeleteBinding { .. } => "delete-binding",
        }
    }
}

/// Decodes invocation arguments, checks them, and dispatches to whichever
/// capabilities the adapter supplies. Returns the document to print on stdout.
#[derive(Default)]
pub struct CommandLineHandler<'a> {
    manifest_generator: Option<&'a dyn ManifestGenerator>,
    binder: Option<&'a dyn Binder>,
}

impl<'a> CommandLineHandler<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_manifest_generator(mut self, generator: &'a dyn ManifestGenerator) -> Self {
        self.manifest_generator = Some(generator);
        self
    }

    pub fn with_binder(mut self, binder: &'a dyn Binder) -> Self {
        self.binder = Some(binder);
        self
    }

    pub fn handle(&self, invocation: &Invocation) -> Result<String> {
        tracing::debug!("Handling {}", invocation.operation());

        let result = match invocation {
            Invocation::GenerateManifest {
                service_deployment,
                plan,
                request_params,
                previous_manifest,
                previous_plan,
            } => self.generate_manifest(
                service_deployment,
                plan,
                request_params,
                previous_manifest,
                previous_plan,
            ),
            Invocation::CreateBinding {
                binding_id,
                bosh_vms,
                manifest,
                request_params,
            } => self.create_binding(binding_id, bosh_vms, manifest, request_params),
            Invocation::DeleteBinding {
                binding_id,
                bosh_vms,
                manifest,
                request_params,
            } => self.delete_binding(binding_id, bosh_vms, manifest, request_params),
        };

        if let Err(e) = &result {
            tracing::error!(
                "{} failed: {} (kind: {:?})",
                invocation.operation(),
                e,
                e.kind()
            );
        }
        result
    }

    fn generate_manifest(
        &self,
        service_deployment: &str,
        plan: &str,
        request_params: &str,
        previous_manifest: &str,
        previous_plan: &str,
    ) -> Result<String> {
        let generator = self.manifest_generator.ok_or_else(|| AdapterError::NotImplemented {
            operation: "generate-manifest".to_string(),
        })?;

        let service_deployment: ServiceDeployment = decode_json("service deployment", service_deployment)?;
        service_deployment.validate()?;
        let plan: Plan = decode_json("plan", plan)?;
        plan.validate()?;
        let request_params: RequestParameters = decode_json("request parameters", request_params)?;
        let previous_manifest = decode_optional_manifest(previous_manifest)?;
        let previous_plan = decode_optional_plan(previous_plan)?;

        tracing::info!(
            "Generating manifest for {} ({})",
            service_deployment.deployment_name,
            if previous_manifest.is_some() { "update" } else { "initial deployment" }
        );

        let manifest = generator.generate_manifest(
            &service_deployment,
            &plan,
            &request_params,
            previous_manifest.as_ref(),
            previous_plan.as_ref(),
        )?;
        manifest.to_yaml()
    }

    fn create_binding(
        &self,
        binding_id: &str,
        bosh_vms: &str,
        manifest: &str,
        request_params: &str,
    ) -> Result<String> {
        let binder = self.binder.ok_or_else(|| AdapterError::NotImplemented {
            operation: "create-binding".to_string(),
        })?;

        let topology: BoshVMs = decode_json("bosh VMs", bosh_vms)?;
        let manifest = decode_manifest(manifest)?;
        let request_params: RequestParameters = decode_json("request parameters", request_params)?;
        let arbitrary_params = request_params.arbitrary_params()?;

        tracing::info!("Creating binding {} for {}", binding_id, manifest.name);
        let binding = binder.create_binding(binding_id, &topology, &manifest, &arbitrary_params)?;
        binding.validate()?;

        Ok(serde_json::to_string(&binding)?)
    }

    fn delete_binding(
        &self,
        binding_id: &str,
        bosh_vms: &str,
        manifest: &str,
        request_params: &str,
    ) -> Result<String> {
        let binder = self.binder.ok_or_else(|| AdapterError::NotImplemented {
            operation: "delete-binding".to_string(),
        })?;

        let topology: BoshVMs = decode_json("bosh VMs", bosh_vms)?;
        let manifest = decode_manifest(manifest)?;
        // decoded only to reject malformed input; delete takes no parameters
        let _: RequestParameters = decode_json("request parameters", request_params)?;

        tracing::info!("Deleting binding {} for {}", binding_id, manifest.name);
        binder.delete_binding(binding_id, &topology, &manifest)?;

        Ok(String::new())
    }
}

fn decode_json<T: DeserializeOwned>(argument: &str, raw: &str) -> Result<T> {
    serde_json::from_str(raw).map_err(|e| AdapterError::InvalidInputError {
        argument: argument.to_string(),
        message: e.to_string(),
    })
}

fn decode_manifest(raw: &str) -> Result<BoshManifest> {
    serde_yaml::from_str(raw).map_err(|e| AdapterError::InvalidInputError {
        argument: "manifest".to_string(),
        message: e.to_string(),
    })
}

fn decode_optional_manifest(raw: &str) -> Result<Option<BoshManifest>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    decode_manifest(raw).map(Some)
}

fn decode_optional_plan(raw: &str) -> Result<Option<Plan>> {
    if raw.trim().is_empty() {
        return Ok(None);
    }
    let plan: Option<Plan> = decode_json("previous plan", raw)?;
    Ok(plan)
}
