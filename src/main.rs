use clap::{Args, Parser, Subcommand, ValueEnum};
#[cfg(feature = "storage-rocksdb")]
use loancalc::infrastructure::rocksdb::RocksDBStore;
use loancalc::application::service::{CalculateOptions, CalculateRequest, LoanService};
use loancalc::config::Config;
use loancalc::domain::analytics::{AnalyticsEvent, ExportFormat, new_session_id};
use loancalc::domain::calculation::{CalculationUpdate, NewCalculation};
use loancalc::domain::ports::CalculationStoreBox;
use loancalc::domain::validation::LoanInput;
use loancalc::format::{format_currency, format_duration, format_percentage};
use loancalc::infrastructure::in_memory::{InMemoryCalculationStore, LogTelemetry};
use loancalc::interfaces::csv::request_reader::LoanRequestReader;
use loancalc::interfaces::csv::schedule_writer::{ScheduleWriter, SummaryWriter};
use miette::{IntoDiagnostic, Result};
use serde::Serialize;
use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, global = true, env = "LOANCALC_DB_PATH")]
    db_path: Option<PathBuf>,

    /// Owner of saved calculations.
    #[arg(long, global = true, env = "LOANCALC_USER", default_value = "local")]
    user: String,

    /// Deployment label reported by `health` and stamped on analytics events.
    #[arg(long, global = true, env = "LOANCALC_ENVIRONMENT", default_value = "development")]
    environment: String,

    /// Overrides the reported application version.
    #[arg(long, global = true, env = "LOANCALC_VERSION")]
    app_version: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct LoanArgs {
    /// Loan amount, e.g. 250000 or "$250,000"
    #[arg(long, allow_hyphen_values = true)]
    amount: String,

    /// Annual interest rate in percent, e.g. 6.5
    #[arg(long, allow_hyphen_values = true)]
    rate: String,

    /// Loan term in years, may be fractional
    #[arg(long, allow_hyphen_values = true)]
    term: String,
}

impl LoanArgs {
    fn input(&self) -> LoanInput {
        LoanInput::new(&self.amount, &self.rate, &self.term)
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
    Text,
    Json,
    Csv,
}

#[derive(Subcommand)]
enum Command {
    /// Calculate the monthly payment and loan totals
    Calc {
        #[command(flatten)]
        loan: LoanArgs,
        /// ISO currency code used for display, defaults to USD
        #[arg(long)]
        currency: Option<String>,
        #[arg(long, value_enum, default_value = "text")]
        format: OutputFormat,
    },
    /// Print the full amortization schedule
    Schedule {
        #[command(flatten)]
        loan: LoanArgs,
        #[arg(long, value_enum, default_value = "csv")]
        format: OutputFormat,
    },
    /// Calculate every `amount,rate,term` row of a CSV file
    Batch {
        /// Input CSV file
        input: PathBuf,
    },
    /// Calculate and save a named calculation
    Save {
        #[command(flatten)]
        loan: LoanArgs,
        #[arg(long)]
        name: String,
        #[arg(long = "tag")]
        tags: Vec<String>,
        #[arg(long)]
        favorite: bool,
    },
    /// List saved calculations, newest first
    List,
    /// Show one saved calculation
    Show { id: Uuid },
    /// Update fields of a saved calculation
    Update {
        id: Uuid,
        #[arg(long)]
        name: Option<String>,
        #[arg(long = "tag")]
        tags: Vec<String>,
        /// Remove all tags
        #[arg(long, conflicts_with = "tags")]
        clear_tags: bool,
        #[arg(long)]
        favorite: Option<bool>,
    },
    /// Delete a saved calculation
    Delete { id: Uuid },
    /// Record an anonymous analytics event given as a JSON object
    Track { payload: String },
    /// Report service health
    Health,
}

fn open_store(db_path: Option<PathBuf>) -> Result<CalculationStoreBox> {
    match db_path {
        #[cfg(feature = "storage-rocksdb")]
        Some(path) => {
            let store = RocksDBStore::open(path).into_diagnostic()?;
            Ok(Box::new(store))
        }
        #[cfg(not(feature = "storage-rocksdb"))]
        Some(_) => {
            tracing::warn!(
                "Persistent storage requested via --db-path, but 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
            );
            Ok(Box::new(InMemoryCalculationStore::new()))
        }
        None => Ok(Box::new(InMemoryCalculationStore::new())),
    }
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    serde_json::to_writer_pretty(&mut out, value).into_diagnostic()?;
    writeln!(out).into_diagnostic()?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    let mut config = Config {
        environment: cli.environment,
        ..Config::default()
    };
    if let Some(version) = cli.app_version {
        config.version = version;
    }

    let store = open_store(cli.db_path)?;
    let service = LoanService::new(config, store, Box::new(LogTelemetry));
    let session_id = new_session_id();
    let owner = cli.user.as_str();

    match cli.command {
        Command::Calc {
            loan,
            currency,
            format,
        } => {
            let request = CalculateRequest {
                input: loan.input(),
                options: CalculateOptions {
                    currency,
                    include_amortization: false,
                },
            };
            let response = service.calculate(&request).await.into_diagnostic()?;
            let summary = response.calculation.summary;
            service
                .track(AnalyticsEvent::calculation(
                    &summary,
                    &session_id,
                    response.calculation.timestamp,
                ))
                .await;

            match format {
                OutputFormat::Json => print_json(&response)?,
                OutputFormat::Csv => {
                    let mut writer = SummaryWriter::new(io::stdout().lock());
                    writer.write_summary(&summary).into_diagnostic()?;
                    writer.flush().into_diagnostic()?;
                }
                OutputFormat::Text => {
                    let currency = response.calculation.currency.as_str();
                    println!(
                        "Monthly payment: {}",
                        format_currency(summary.monthly_payment, currency)
                    );
                    println!(
                        "Total payment:   {}",
                        format_currency(summary.total_payment, currency)
                    );
                    println!(
                        "Total interest:  {}",
                        format_currency(summary.total_interest, currency)
                    );
                    println!(
                        "Payments:        {} ({})",
                        summary.number_of_payments,
                        format_duration(summary.number_of_payments)
                    );
                    println!(
                        "Annual rate:     {}",
                        format_percentage(summary.annual_rate_percent, 2)
                    );
                }
            }
        }
        Command::Schedule { loan, format } => {
            let request = CalculateRequest {
                input: loan.input(),
                options: CalculateOptions {
                    currency: None,
                    include_amortization: true,
                },
            };
            let response = service.calculate(&request).await.into_diagnostic()?;
            let schedule = response.amortization.unwrap_or_default();

            let export = match format {
                OutputFormat::Json => {
                    print_json(&schedule)?;
                    ExportFormat::Json
                }
                OutputFormat::Csv | OutputFormat::Text => {
                    ScheduleWriter::new(io::stdout().lock())
                        .write_schedule(&schedule)
                        .into_diagnostic()?;
                    ExportFormat::Csv
                }
            };
            service
                .track(AnalyticsEvent::export(
                    export,
                    schedule.len(),
                    &session_id,
                    response.calculation.timestamp,
                ))
                .await;
        }
        Command::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let reader = LoanRequestReader::new(file);
            let mut writer = SummaryWriter::new(io::stdout().lock());
            for (row, input) in reader.requests().enumerate() {
                let request = match input {
                    Ok(input) => CalculateRequest {
                        input,
                        options: CalculateOptions::default(),
                    },
                    Err(e) => {
                        eprintln!("Error reading request on row {}: {}", row + 1, e);
                        continue;
                    }
                };
                match service.calculate(&request).await {
                    Ok(response) => writer
                        .write_summary(&response.calculation.summary)
                        .into_diagnostic()?,
                    Err(e) => eprintln!("Error processing request on row {}: {}", row + 1, e),
                }
            }
            writer.flush().into_diagnostic()?;
        }
        Command::Save {
            loan,
            name,
            tags,
            favorite,
        } => {
            let request = CalculateRequest {
                input: loan.input(),
                options: CalculateOptions::default(),
            };
            let response = service.calculate(&request).await.into_diagnostic()?;
            let calculation = NewCalculation {
                name,
                calculation: response.calculation.summary,
                tags,
                is_favorite: favorite,
            };
            let saved = service.save(owner, calculation).await.into_diagnostic()?;
            print_json(&saved)?;
        }
        Command::List => {
            let list = service.list(owner).await.into_diagnostic()?;
            print_json(&list)?;
        }
        Command::Show { id } => {
            let calculation = service.get(owner, id).await.into_diagnostic()?;
            print_json(&calculation)?;
        }
        Command::Update {
            id,
            name,
            tags,
            clear_tags,
            favorite,
        } => {
            let tags = if clear_tags {
                Some(Vec::new())
            } else if tags.is_empty() {
                None
            } else {
                Some(tags)
            };
            let update = CalculationUpdate {
                name,
                calculation: None,
                tags,
                is_favorite: favorite,
            };
            let updated = service.update(owner, id, update).await.into_diagnostic()?;
            print_json(&updated)?;
        }
        Command::Delete { id } => {
            let deleted = service.delete(owner, id).await.into_diagnostic()?;
            println!("Deleted {deleted}");
        }
        Command::Track { payload } => {
            let value: serde_json::Value = serde_json::from_str(&payload).into_diagnostic()?;
            service.record_event(value).await.into_diagnostic()?;
            println!("Analytics data received");
        }
        Command::Health => {
            print_json(&service.health())?;
        }
    }

    Ok(())
}
