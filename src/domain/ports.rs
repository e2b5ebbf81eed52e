use crate::domain::bosh::{BoshManifest, BoshVMs};
use crate::domain::model::{Binding, Plan, Properties, RequestParameters, ServiceDeployment};
use crate::utils::error::Result;

/// Turns a plan into a deployable manifest.
///
/// Callers validate `service_deployment` and `plan` before invoking. When
/// `previous_manifest` and `previous_plan` are both `None` this is an initial
/// deployment; when present, the generator is producing an update and may
/// carry state over from the previous manifest.
pub trait ManifestGenerator: Send + Sync {
    fn generate_manifest(
        &self,
        service_deployment: &ServiceDeployment,
        plan: &Plan,
        request_params: &RequestParameters,
        previous_manifest: Option<&BoshManifest>,
        previous_plan: Option<&Plan>,
    ) -> Result<BoshManifest>;
}

/// Issues and revokes bindings against a deployed service instance.
///
/// `create_binding` returns [`AdapterError::BindingAlreadyExists`] when
/// `binding_id` is already bound, and [`AdapterError::AppGuidNotProvided`]
/// when an application identifier is required but missing from
/// `arbitrary_params`.
///
/// [`AdapterError::BindingAlreadyExists`]: crate::utils::error::AdapterError::BindingAlreadyExists
/// [`AdapterError::AppGuidNotProvided`]: crate::utils::error::AdapterError::AppGuidNotProvided
pub trait Binder: Send + Sync {
    fn create_binding(
        &self,
        binding_id: &str,
        deployment_topology: &BoshVMs,
        manifest: &BoshManifest,
        arbitrary_params: &Properties,
    ) -> Result<Binding>;

    fn delete_binding(
        &self,
        binding_id: &str,
        deployment_topology: &BoshVMs,
        manifest: &BoshManifest,
    ) -> Result<()>;
}
