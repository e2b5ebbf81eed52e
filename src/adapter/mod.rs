pub mod handler;
pub mod template_adapter;

pub use crate::domain::ports::{Binder, ManifestGenerator};
