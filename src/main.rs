use clap::Parser;
use moop::utils::error::{ErrorCategory, ErrorSeverity};
use moop::utils::logger;
use moop::utils::validation::parse_theater_ref;
use moop::{
    CliConfig, Command, ConfigProvider, HttpMoopRepository, LocalStorage, MoopConfig, MoopError,
    MoopRepository, SearchViewModel, SettingsViewModel, Theater, TheaterSettingsStore,
};
use std::sync::Arc;

#[tokio::main]
async fn main() {
    let cli = CliConfig::parse();

    // 先載入配置，日誌格式由配置決定
    let config = match cli.resolve() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ {}", e.user_friendly_message());
            eprintln!("💡 Suggestion: {}", e.recovery_suggestion());
            std::process::exit(1);
        }
    };

    if config.json_logs() {
        logger::init_json_logger(config.log_level());
    } else {
        logger::init_cli_logger(cli.verbose, config.log_level());
    }
    tracing::info!("Starting moop CLI");
    tracing::debug!("Resolved config: {:?}", config);

    if let Err(e) = run(cli.command, &config).await {
        tracing::error!(
            "❌ Command failed: {} (Category: {:?}, Severity: {:?})",
            e,
            e.category(),
            e.severity()
        );
        eprintln!("❌ {}", e.user_friendly_message());
        eprintln!("💡 Suggestion: {}", e.recovery_suggestion());

        let exit_code = e.severity().exit_code();
        if exit_code > 0 {
            std::process::exit(exit_code);
        }
    }
}

async fn run(command: Command, config: &MoopConfig) -> moop::Result<()> {
    let repository = Arc::new(HttpMoopRepository::new(config)?);

    match command {
        Command::Search { query } => search(repository, query).await,
        Command::Theaters { areas } => theaters(repository.as_ref(), areas).await,
        Command::MyTheaters { set } => my_theaters(repository.as_ref(), config, set).await,
    }
}

async fn search(repository: Arc<HttpMoopRepository>, query: String) -> moop::Result<()> {
    let view_model = SearchViewModel::new(repository);
    let mut ui_model = view_model.ui_model();
    let mut failures = view_model.failures();

    view_model.search_for(query.clone());

    tokio::select! {
        changed = ui_model.changed() => {
            if changed.is_err() {
                return Ok(());
            }
            let snapshot = ui_model.borrow_and_update().clone();
            if let Some(snapshot) = snapshot {
                if snapshot.has_no_item {
                    println!("No movies found for '{}'", query);
                }
                for movie in &snapshot.movies {
                    match movie.release_date() {
                        Some(date) => println!("{}  ({})", movie.title, date),
                        None => println!("{}", movie.title),
                    }
                }
            }
            Ok(())
        }
        failure = failures.recv() => match failure {
            // 保留原始錯誤的分類，結束代碼才會正確
            Ok(failure) => Err(failure.into()),
            Err(e) => Err(MoopError::RequestFailed {
                message: format!("Failure channel closed: {}", e),
                category: ErrorCategory::Data,
                severity: ErrorSeverity::High,
            }),
        }
    }
}

async fn theaters(repository: &HttpMoopRepository, areas: bool) -> moop::Result<()> {
    let codes = repository.get_code_list().await?;

    if areas {
        for group in codes.to_area_group_list() {
            println!(
                "{} {} ({} theaters)",
                group.area.code,
                group.area.name,
                group.theater_list.len()
            );
        }
    } else {
        for theater in codes.to_theater_list() {
            let chain = theater
                .provider()
                .map(|p| p.display_name())
                .unwrap_or("?");
            println!("[{}] {} {}", chain, theater.code, theater.name);
        }
    }
    Ok(())
}

async fn my_theaters(
    repository: &HttpMoopRepository,
    config: &MoopConfig,
    references: Vec<String>,
) -> moop::Result<()> {
    let storage = LocalStorage::new(config.data_dir().to_string());
    let view_model = SettingsViewModel::new(TheaterSettingsStore::new(storage));
    let mut ui_model = view_model.ui_model();
    let mut failures = view_model.failures();

    if references.is_empty() {
        view_model.load();
    } else {
        let wanted = references
            .iter()
            .map(|reference| parse_theater_ref("--set", reference))
            .collect::<moop::Result<Vec<_>>>()?;

        let response = repository.get_code_list().await?;
        let selected = wanted
            .iter()
            .map(|(provider, code)| {
                response
                    .find_theater(*provider, code)
                    .cloned()
                    .ok_or_else(|| MoopError::NotFound {
                        what: format!("{} theater '{}'", provider.display_name(), code),
                    })
            })
            .collect::<moop::Result<Vec<Theater>>>()?;
        tracing::info!("💾 Saving {} theater(s)", selected.len());
        view_model.select_theaters(selected);
    }

    tokio::select! {
        changed = ui_model.changed() => {
            if changed.is_err() {
                return Ok(());
            }
            let settings = ui_model.borrow_and_update().clone();
            if let Some(settings) = settings {
                if settings.theaters.is_empty() {
                    println!("No theaters selected");
                }
                for theater in &settings.theaters {
                    println!("{} {}", theater.code, theater.name);
                }
            }
            Ok(())
        }
        failure = failures.recv() => match failure {
            // 保留原始錯誤的分類，結束代碼才會正確
            Ok(failure) => Err(failure.into()),
            Err(e) => Err(MoopError::RequestFailed {
                message: format!("Failure channel closed: {}", e),
                category: ErrorCategory::Data,
                severity: ErrorSeverity::High,
            }),
        }
    }
}
