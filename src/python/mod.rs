pub mod activation;
pub mod executor;

pub use activation::{activate_environment, script_dir, EnvironmentContext, VenvMetadata};
pub use executor::VenvExecutor;
