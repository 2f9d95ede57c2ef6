use crate::cli::commands::load_plan;
use crate::cli::LaunchOptions;
use crate::core::error::Result;
use crate::launcher::Bootstrap;
use colored::Colorize;

pub async fn execute(options: &LaunchOptions) -> Result<i32> {
    println!("{}", "Running launch checks...".bold());
    println!();

    let plan = load_plan(options, Vec::new()).await?;
    let bootstrap = Bootstrap::new(plan);
    let plan = bootstrap.plan();

    print!("Checking virtual environment... ");
    let context = match bootstrap.prepare(std::env::vars_os()).await {
        Ok(context) => {
            println!("{}", "✓".green());
            context
        }
        Err(e) => {
            println!("{}", "✗".red());
            return Err(e);
        }
    };
    println!("  Location: {}", context.root().display().to_string().cyan());
    if let Some(version) = context.metadata().version.as_deref() {
        println!("  Python: {}", version.cyan());
    }

    print!("Checking bot command... ");
    match bootstrap.resolve_worker(&context) {
        Ok(executable) => {
            println!("{} ({})", "✓".green(), executable.display().to_string().yellow());
            println!("  Command: {}", plan.command_line().cyan());
            println!("  Working dir: {}", plan.working_dir.display());
        }
        Err(e) => {
            println!("{}", "✗".red());
            return Err(e);
        }
    }

    if !plan.config.worker.require_env.is_empty() {
        println!(
            "  Required variables: {}",
            plan.config.worker.require_env.join(", ").cyan()
        );
    }

    println!();
    println!("{}", "All checks passed!".green().bold());

    Ok(0)
}
