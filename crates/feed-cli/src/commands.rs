use anyhow::{Context, Result};
use tracing::info_span;

use feed_cli::collaborators::{ArtifactSink, DirectorySink, DirectorySource, FileSource};
use feed_cli::config::FeedConfig;
use feed_cli::pipeline::Pipeline;
use feed_cli::report::RunReport;
use feed_ingest::parse_input_overrides;
use feed_model::ZeroPricePolicy;
use feed_transform::shape_table;

use crate::cli::RunArgs;
use crate::summary::{print_config, print_shapes};

pub fn run_feed(args: &RunArgs) -> Result<RunReport> {
    let config = resolve_config(args)?;
    let overrides = parse_input_overrides(&args.inputs).context("parse --input")?;
    let source = config
        .source_dir
        .as_ref()
        .map(|dir| Box::new(DirectorySource::new(dir)) as Box<dyn FileSource>);
    let sink = config
        .sink_dir
        .as_ref()
        .map(|dir| Box::new(DirectorySink::new(dir)) as Box<dyn ArtifactSink>);

    let span = info_span!("feedgen", target_currency = %config.options.pricing.target_currency);
    let _guard = span.enter();
    let pipeline = Pipeline::new(config, source, sink).with_overrides(overrides);
    Ok(pipeline.run()?)
}

pub fn run_config() -> Result<()> {
    let config = FeedConfig::from_env().context("load configuration")?;
    print_config(&config.entries());
    Ok(())
}

pub fn run_shapes() {
    print_shapes(shape_table());
}

/// Environment first, then command-line flags.
fn resolve_config(args: &RunArgs) -> Result<FeedConfig> {
    let mut config = FeedConfig::from_env().context("load configuration")?;
    if let Some(dir) = &args.output_dir {
        config.output_dir.clone_from(dir);
    }
    if let Some(dir) = &args.staging_dir {
        config.staging_dir.clone_from(dir);
    }
    if let Some(dir) = &args.source_dir {
        config.source_dir = Some(dir.clone());
    }
    if let Some(dir) = &args.sink_dir {
        config.sink_dir = Some(dir.clone());
    }
    if let Some(code) = &args.target_currency {
        config.set_target_currency("--target-currency", code)?;
    }
    if let Some(rate) = args.exchange_rate {
        config.set_exchange_rate("--exchange-rate", rate)?;
    }
    if args.drop_zero_priced {
        config.options.zero_price = ZeroPricePolicy::Drop;
    }
    Ok(config)
}
