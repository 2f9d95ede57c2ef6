use crate::cli::commands::load_plan;
use crate::cli::LaunchOptions;
use crate::core::error::Result;
use crate::core::exit_code_from_status;
use crate::launcher::Bootstrap;

pub async fn execute(options: &LaunchOptions, worker: Vec<String>) -> Result<i32> {
    let plan = load_plan(options, worker).await?;
    let bootstrap = Bootstrap::new(plan);

    let status = bootstrap.run(std::env::vars_os()).await?;

    Ok(exit_code_from_status(status))
}
