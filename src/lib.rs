pub mod adapter;
pub mod config;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::cli::Cli;

pub use adapter::{
    handler::{CommandLineHandler, Invocation},
    template_adapter::TemplateAdapter,
};
pub use config::AdapterConfig;
pub use domain::bosh::{BoshManifest, BoshVMs};
pub use domain::model::{
    Binding, InstanceGroup, Plan, Properties, RequestParameters, ServiceDeployment,
    ServiceRelease, ServiceReleases, Stemcell,
};
pub use domain::ports::{Binder, ManifestGenerator};
pub use utils::error::{AdapterError, ErrorKind, Result};
pub use utils::validation::Validate;
