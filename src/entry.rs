use std::sync::Arc;

use clap::{ArgMatches, CommandFactory, FromArgMatches};
use tracing::info;

use crate::app::{self, summary};
use crate::args::LoadArgs;
use crate::error::AppResult;
use crate::metrics::{Aggregate, RunOutcome};
use crate::session::SessionConfig;
use crate::shutdown_handlers::{setup_signal_shutdown_handler, shutdown_channel};

pub(crate) fn run() -> AppResult<()> {
    let (mut args, matches) = parse_args()?;

    crate::logger::init_logging(args.verbose);
    apply_config(&mut args, &matches)?;

    let Some(url) = app::resolve_target(&args)? else {
        LoadArgs::command().print_help()?;
        println!();
        return Ok(());
    };

    let params = app::resolve_params(&args, url)?;
    let session = Arc::new(SessionConfig::new(params)?);
    summary::print_banner(&session);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let aggregate = runtime.block_on(run_async(Arc::clone(&session)))?;

    let outcome = RunOutcome::from_stats(&aggregate.stats, session.concurrency);
    summary::print_outcome(&outcome, args.output_format)
}

fn parse_args() -> AppResult<(LoadArgs, ArgMatches)> {
    let matches = LoadArgs::command().get_matches();
    let args = LoadArgs::from_arg_matches(&matches)?;
    Ok((args, matches))
}

fn apply_config(args: &mut LoadArgs, matches: &ArgMatches) -> AppResult<()> {
    if let Some(config) = crate::config::load_config(args.config.as_deref())? {
        crate::config::apply_config(args, matches, &config)?;
    }
    Ok(())
}

async fn run_async(session: Arc<SessionConfig>) -> AppResult<Aggregate> {
    let (shutdown_tx, interrupt_rx) = shutdown_channel();
    let signal_handle = setup_signal_shutdown_handler(&shutdown_tx);

    let result = app::run_load(session, interrupt_rx).await;
    signal_handle.abort();

    if let Ok(aggregate) = result.as_ref()
        && aggregate.interrupted
    {
        info!(
            "Run interrupted; reporting {} collected worker results",
            aggregate.responders
        );
    }
    result
}
