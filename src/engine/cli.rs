//! CLI command handler: store maintenance plus the two word queries.

use anyhow::{Context, Result};
use std::io::{self, BufWriter, Write};
use std::path::Path;

use crate::engine::arg_parser::{Cli, Commands};
use crate::engine::render::{write_names, write_ranked, write_total};
use crate::pipeline::CancelToken;
use crate::store::DirStore;
use crate::utils::config::PackagePaths;
use crate::utils::{apply_file_to_opts, load_filestore_toml, setup_logging};
use crate::{Opts, top_words, total_word_count};

/// Defaults, then `.filestore.toml` from the working directory, then flags.
/// Returns a config-file problem to log once the logger exists.
fn setup_opts(cli: &Cli) -> (Opts, Option<String>) {
    let mut opts = Opts::default();
    let mut config_problem = None;
    match load_filestore_toml(Path::new(".")) {
        Ok(Some(file)) => apply_file_to_opts(&file, &mut opts),
        Ok(None) => {}
        Err(msg) => config_problem = Some(msg),
    }
    if let Some(dir) = &cli.store_dir {
        opts.store_dir = Some(dir.clone());
    }
    if cli.workers.is_some() {
        opts.workers = cli.workers;
    }
    if cli.timeout.is_some() {
        opts.timeout_secs = cli.timeout;
    }
    if let Some(strict) = cli.strict {
        opts.strict = strict;
    }
    if let Some(verbose) = cli.verbose {
        opts.verbose = verbose;
    }
    (opts, config_problem)
}

/// Ctrl+C trips the returned token; in-flight scans are abandoned and the query errors out.
fn install_cancel_handler() -> Result<CancelToken> {
    let cancel = CancelToken::new();
    let flag = cancel.flag();
    ctrlc::set_handler(move || {
        flag.store(true, std::sync::atomic::Ordering::Relaxed);
    })
    .context("set Ctrl+C handler")?;
    Ok(cancel)
}

/// Run one subcommand against the configured store.
pub fn handle_run(cli: &Cli) -> Result<()> {
    let (opts, config_problem) = setup_opts(cli);
    let logger = setup_logging(opts.verbose);
    if let Some(msg) = config_problem {
        logger.warn(format_args!("ignoring config file: {}", msg));
    }
    let store_dir = opts
        .store_dir
        .clone()
        .unwrap_or_else(|| PackagePaths::get().default_store_dir());
    logger.debug(format_args!("store dir: {}", store_dir.display()));

    let mut out = BufWriter::new(io::stdout().lock());
    match &cli.command {
        Commands::Add { files } => {
            let store = DirStore::open_or_create(&store_dir)?;
            for name in store.add(files)? {
                logger.info(format_args!("Added {} to the store", name));
            }
        }
        Commands::Update { file } => {
            let store = DirStore::open_or_create(&store_dir)?;
            let name = store.update(file)?;
            logger.info(format_args!("Updated {} in the store", name));
        }
        Commands::Rm { name } => {
            DirStore::new(&store_dir).remove(name)?;
            logger.info(format_args!("Removed {} from the store", name));
        }
        Commands::Ls => {
            let names = DirStore::new(&store_dir).names()?;
            write_names(&mut out, &names)?;
        }
        Commands::Wc => {
            let scan_opts = opts.scan_opts(logger.clone(), install_cancel_handler()?);
            let result = total_word_count(&store_dir, &scan_opts)
                .with_context(|| format!("count words in {}", store_dir.display()))?;
            write_total(&mut out, result.total)?;
        }
        Commands::FreqWords { limit, order } => {
            let scan_opts = opts.scan_opts(logger.clone(), install_cancel_handler()?);
            let result = top_words(&store_dir, *limit, order, &scan_opts)
                .with_context(|| format!("rank words in {}", store_dir.display()))?;
            write_ranked(&mut out, &result.entries)?;
        }
    }
    out.flush().context("write output")?;
    logger.flush();
    Ok(())
}
