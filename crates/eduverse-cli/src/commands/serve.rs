//! The `eduverse serve` command.

use std::path::PathBuf;

use anyhow::Result;

use super::SourceArgs;

pub async fn execute(
    bind: Option<String>,
    static_dir: Option<PathBuf>,
    source: SourceArgs,
) -> Result<()> {
    let mut config = source.resolve()?;

    if let Some(bind) = bind {
        config.server.bind = bind;
    }
    if static_dir.is_some() {
        config.server.static_dir = static_dir;
    }

    eduverse_server::serve(&config).await?;
    Ok(())
}
