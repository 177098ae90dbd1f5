use anyhow::Context;
use disclosure_merge::{PipelineConfig, run};
use log::info;

fn main() -> anyhow::Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .target(env_logger::Target::Stdout)
        .init();

    let config = PipelineConfig::default();
    info!(
        "Merging archives from {} with authors from {}",
        config.data_dir.display(),
        config.author_file.display()
    );

    let summary = run(&config).context("Disclosure merge failed")?;
    info!(
        "Wrote {} rows x {} columns from {} tables in {} archives",
        summary.rows, summary.columns, summary.tables, summary.archives
    );
    Ok(())
}
