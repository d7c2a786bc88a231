use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::catalog::{self, CatalogError, CatalogSource, DirSource, FixtureSource, Json5FileSource};
use crate::config::{self, ConfigError};
use crate::contract::LauncherRequest;
use crate::controller::{InvokeError, Invoker, LauncherController};
use crate::logging;
use crate::ranker::RankOptions;
use crate::transport::{self, ErrorCode, ErrorResponse, TransportResponse};
use crate::weights_store::{self, StoreError};

#[derive(Debug)]
pub enum RuntimeError {
    Config(ConfigError),
    InvalidConfig(String),
    Catalog(CatalogError),
    Store(StoreError),
    Io(std::io::Error),
}

impl std::fmt::Display for RuntimeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Config(error) => write!(f, "config error: {error}"),
            Self::InvalidConfig(error) => write!(f, "invalid config: {error}"),
            Self::Catalog(error) => write!(f, "catalog error: {error}"),
            Self::Store(error) => write!(f, "store error: {error}"),
            Self::Io(error) => write!(f, "io error: {error}"),
        }
    }
}

impl std::error::Error for RuntimeError {}

impl From<ConfigError> for RuntimeError {
    fn from(value: ConfigError) -> Self {
        Self::Config(value)
    }
}

impl From<CatalogError> for RuntimeError {
    fn from(value: CatalogError) -> Self {
        Self::Catalog(value)
    }
}

impl From<StoreError> for RuntimeError {
    fn from(value: StoreError) -> Self {
        Self::Store(value)
    }
}

impl From<std::io::Error> for RuntimeError {
    fn from(value: std::io::Error) -> Self {
        Self::Io(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuntimeOptions {
    pub config_path: Option<PathBuf>,
    pub catalog_path: Option<PathBuf>,
    pub one_shot_query: Option<String>,
    pub limit: Option<usize>,
}

pub fn parse_cli_args(args: &[String]) -> Result<RuntimeOptions, String> {
    let mut options = RuntimeOptions::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--config" => {
                let value = iter.next().ok_or("--config requires a path")?;
                options.config_path = Some(PathBuf::from(value));
            }
            "--catalog" => {
                let value = iter.next().ok_or("--catalog requires a path")?;
                options.catalog_path = Some(PathBuf::from(value));
            }
            "--query" => {
                let value = iter.next().ok_or("--query requires text")?;
                options.one_shot_query = Some(value.clone());
            }
            "--limit" => {
                let value = iter.next().ok_or("--limit requires a number")?;
                let parsed: usize = value
                    .parse()
                    .map_err(|_| format!("--limit is not a number: {value}"))?;
                options.limit = Some(parsed);
            }
            other => return Err(format!("unknown argument: {other}")),
        }
    }

    Ok(options)
}

/// Default invoker outside any host: announce the chosen entry on stdout.
struct StdoutInvoker;

impl Invoker for StdoutInvoker {
    fn invoke(&mut self, path: &str) -> Result<(), InvokeError> {
        println!("invoke {path}");
        std::io::stdout()
            .flush()
            .map_err(|error| InvokeError::new(format!("stdout unavailable: {error}")))
    }
}

pub fn run_with_options(options: RuntimeOptions) -> Result<(), RuntimeError> {
    let config = config::load(options.config_path.as_deref())?;
    config::validate(&config).map_err(RuntimeError::InvalidConfig)?;

    if let Err(error) = logging::init() {
        eprintln!("[quickmenu-core] logging unavailable: {error}");
    }

    let catalog_path = options.catalog_path.clone().or(config.catalog_path.clone());
    let source: Box<dyn CatalogSource> = match &catalog_path {
        Some(path) if path.is_dir() => Box::new(DirSource::new(path)),
        Some(path) => Box::new(Json5FileSource::new(path)),
        None => Box::new(FixtureSource),
    };

    let entries = catalog::load_catalog(source.as_ref())?;
    logging::info(&format!(
        "catalog loaded source={} entries={}",
        source.source_name(),
        entries.len()
    ));

    let weights = weights_store::load_or_default(&config.weights_db_path);
    let rank_options = RankOptions {
        limit: options.limit.unwrap_or(config.max_results as usize),
        mode: config.scoring,
    };

    let mut controller = LauncherController::new(entries, weights, rank_options);

    if let Some(query) = &options.one_shot_query {
        for result in controller.set_query(query) {
            println!("{:.3}\t{}", result.score, result.entry.path());
        }
        return Ok(());
    }

    run_stdin_loop(&mut controller, &config.weights_db_path)
}

/// Line-oriented JSON protocol on stdin/stdout; one request per line, one
/// response per line. Weights are persisted synchronously after every
/// commit so a crash loses at most nothing.
fn run_stdin_loop(
    controller: &mut LauncherController,
    weights_db_path: &std::path::Path,
) -> Result<(), RuntimeError> {
    let stdin = std::io::stdin();
    let mut invoker = StdoutInvoker;

    for line in stdin.lock().lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<LauncherRequest>(trimmed) {
            Ok(request) => {
                let is_commit = matches!(request, LauncherRequest::Commit);
                let response = transport::handle_request(controller, &mut invoker, request);
                if is_commit {
                    persist_weights(controller, weights_db_path);
                }
                TransportResponse::Ok { response }
            }
            Err(error) => TransportResponse::Err {
                error: ErrorResponse {
                    code: ErrorCode::InvalidJson,
                    message: error.to_string(),
                },
            },
        };
        let encoded =
            serde_json::to_string(&response).expect("transport response should serialize");
        println!("{encoded}");
    }

    persist_weights(controller, weights_db_path);
    Ok(())
}

fn persist_weights(controller: &LauncherController, weights_db_path: &std::path::Path) {
    let saved = weights_store::open_at(weights_db_path)
        .and_then(|db| weights_store::save_counts(&db, controller.weights()));
    if let Err(error) = saved {
        logging::warn(&format!(
            "failed to persist usage weights to {}: {error}",
            weights_db_path.display()
        ));
    }
}
