use anyhow::{Context, Result, anyhow};
use std::fs;
use std::path::Path;
use vector_jam::cli::Cli;
use vector_jam::interpreter::{Session, SessionConfig};
use vector_jam::logging;

fn main() -> Result<()> {
    let cli = Cli::parse_args();
    logging::init_log(cli.log_level())?;

    if let Some(file_path) = &cli.file {
        run_script(file_path, cli.session_config())
            .with_context(|| format!("Failed to run script: {:?}", file_path))?;
    } else {
        use clap::CommandFactory;
        Cli::command().print_help()?;
        println!();
    }

    Ok(())
}

fn run_script(path: &Path, config: SessionConfig) -> Result<()> {
    if !path.exists() {
        return Err(anyhow!("File not found: {:?}", path));
    }

    let source = fs::read_to_string(path)
        .with_context(|| format!("Failed to read file: {:?}", path))?;

    let mut session = Session::new(config).context("Failed to create array")?;
    let transcript = session
        .run(&source)
        .map_err(|e| anyhow!("Parse error: {}", e))?;

    for line in transcript {
        println!("{}", line);
    }
    log::info!(
        "finished with len={} cap={}",
        session.array().len(),
        session.array().capacity()
    );

    Ok(())
}
