//! Employee directory backend - CLI over the query/mutation API.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, Subcommand};
use employee_directory as app;
use mongodb::Database;
use serde::Serialize;

use app::api::{ApiError, EmployeeApi};
use app::config::{AppConfig, ConfigLoadResult};
use app::models::{CreateEmployee, UpdateEmployee};

/// Employee directory backend over a document store.
#[derive(Parser)]
#[command(name = "employee-directory", version)]
struct Cli {
    /// Use config.toml from current directory (dev mode)
    #[arg(long)]
    dev: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List all employees (reduced listing)
    List,
    /// Show one employee
    Get { id: String },
    /// List employees of a department (exact match)
    Department { name: String },
    /// Search employees by name (case-insensitive)
    Search { term: String },
    /// Create an employee
    Add {
        #[arg(long)]
        name: String,
        #[arg(long)]
        position: String,
        #[arg(long)]
        department: String,
        #[arg(long)]
        salary: f64,
    },
    /// Partially update an employee
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        position: Option<String>,
        #[arg(long)]
        department: Option<String>,
        #[arg(long)]
        salary: Option<f64>,
    },
    /// Delete an employee
    Delete { id: String },
    /// List the department catalog
    Departments,
    /// Replace both collections with the reference data set
    Seed,
    /// Check store connectivity
    Ping,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match load_config(cli.dev) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Fatal: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = init_logging(&config);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "employee-directory starting");

    // A store that is unreachable at startup is fatal to the process.
    let db = match app::db::connect(&config.database).await {
        Ok(db) => db,
        Err(e) => {
            tracing::error!(error = %e, "store connection failed");
            eprintln!("Fatal: store connection failed");
            return ExitCode::FAILURE;
        }
    };

    if let Ok(counts) = app::db::get_collection_counts(&db).await {
        tracing::info!(
            employees = counts.employees,
            departments = counts.departments,
            "connected to {}",
            config.database.name
        );
    }

    let api = EmployeeApi::new(db.clone());
    match run(cli.command, &api, &db).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            print_error(&err);
            ExitCode::FAILURE
        }
    }
}

/// Dispatch one subcommand through the API surface.
async fn run(command: Command, api: &EmployeeApi, db: &Database) -> Result<(), ApiError> {
    match command {
        Command::List => print_json(&api.get_all_employees().await?),
        Command::Get { id } => print_json(&api.get_employee_details(&id).await?),
        Command::Department { name } => print_json(&api.get_employees_by_department(&name).await?),
        Command::Search { term } => print_json(&api.search_employees_by_name(&term).await?),
        Command::Add {
            name,
            position,
            department,
            salary,
        } => {
            let created = api
                .add_employee(CreateEmployee {
                    name,
                    position,
                    department,
                    salary,
                })
                .await?;
            print_json(&created);
        }
        Command::Update {
            id,
            name,
            position,
            department,
            salary,
        } => {
            let updated = api
                .update_employee(
                    &id,
                    &UpdateEmployee {
                        name,
                        position,
                        department,
                        salary,
                    },
                )
                .await?;
            print_json(&updated);
        }
        Command::Delete { id } => {
            let deleted = api.delete_employee(&id).await?;
            print_json(&serde_json::json!({ "deleted": deleted }));
        }
        Command::Departments => print_json(&api.get_all_departments().await?),
        Command::Seed => {
            let summary = app::db::seed::run(db).await.map_err(|e| {
                tracing::error!(error = %e, "seed failed");
                ApiError::internal("seed", "Failed to seed database")
            })?;
            print_json(&serde_json::json!({
                "departments": summary.departments,
                "employees": summary.employees,
            }));
        }
        Command::Ping => {
            app::db::test_connection(db).await.map_err(|e| {
                tracing::error!(error = %e, "ping failed");
                ApiError::internal("ping", "Store unreachable")
            })?;
            print_json(&serde_json::json!({ "ok": true, "message": api.hello() }));
        }
    }
    Ok(())
}

/// Resolve configuration: config.toml if present, defaults otherwise.
fn load_config(dev: bool) -> anyhow::Result<AppConfig> {
    let path = if dev {
        PathBuf::from("config.toml")
    } else {
        AppConfig::default_path()
    };

    match AppConfig::try_load(&path) {
        ConfigLoadResult::Loaded(config) => Ok(config),
        ConfigLoadResult::Missing => {
            // First run without a file: defaults plus the MONGODB_URI override.
            let config = AppConfig::default();
            config.validate().context("default configuration invalid")?;
            Ok(config)
        }
        ConfigLoadResult::Invalid(e) => {
            Err(anyhow::Error::new(e).context(format!("invalid config at {}", path.display())))
        }
    }
}

/// Initialize tracing; returns the file-writer guard when file logging is on.
fn init_logging(config: &AppConfig) -> Option<tracing_appender::non_blocking::WorkerGuard> {
    let filter =
        tracing_subscriber::EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    if config.log.file_enabled {
        let appender = tracing_appender::rolling::daily(&config.log.directory, "employee-directory.log");
        let (writer, guard) = tracing_appender::non_blocking(appender);
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(writer)
            .with_ansi(false)
            .init();
        Some(guard)
    } else {
        tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init();
        None
    }
}

/// Print a response as pretty JSON on stdout.
fn print_json<T: Serialize>(value: &T) {
    println!(
        "{}",
        serde_json::to_string_pretty(value).expect("serializable response")
    );
}

/// Print the error envelope as JSON on stderr.
fn print_error(err: &ApiError) {
    match serde_json::to_string_pretty(err) {
        Ok(json) => eprintln!("{json}"),
        Err(_) => eprintln!("{err}"),
    }
}
