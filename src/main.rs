use anyhow::{bail, Context};
use setupsmarters::{init_logging, write_snapshot, SessionFile, BUILD_DATE, VERSION};
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "usage: setupsmarters <session.toml> [output]";

fn main() -> anyhow::Result<()> {
    init_logging()?;

    let mut args = std::env::args_os().skip(1);
    let Some(session_path) = args.next().map(PathBuf::from) else {
        bail!(USAGE);
    };
    let output_arg = args.next().map(PathBuf::from);
    if args.next().is_some() {
        bail!(USAGE);
    }

    info!("setupsmarters {} ({})", VERSION, BUILD_DATE);

    let session = SessionFile::load(&session_path)
        .with_context(|| format!("Failed to read session {}", session_path.display()))?;
    let snapshot = session
        .build()
        .with_context(|| format!("Invalid session {}", session_path.display()))?;

    let output = output_arg.unwrap_or_else(|| session.output_path());
    write_snapshot(&snapshot, &output)
        .with_context(|| format!("Failed to write snapshot to {}", output.display()))?;

    let env = snapshot.env();
    info!(
        "Grid {}x{} at {} m: {} blocked, {} isolated, {} opening cells",
        env.grid_rows,
        env.grid_cols,
        env.grid_tile_size,
        env.blocked.len(),
        env.isolated_area.len(),
        env.opening.len()
    );
    Ok(())
}
