//! Command-line entry point for the surge prediction service.
//!
//! Results are printed to stdout as pretty JSON; logs go to stderr.

use std::sync::Arc;
use std::time::Duration;

use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use thiserror::Error;

use surgecast_lib::config::{ConfigError, ServiceConfig};
use surgecast_lib::models::{
    EnvironmentalConditions, LocationQuery, PatientInfo, PredictionEnvelope, RiskAssessment,
    VitalSigns,
};
use surgecast_lib::prediction::{spawn_refresh, PredictionError, PredictionService, RefreshError};
use surgecast_lib::triage::{build_emergency_record, resolve_patient_location, LocationError};
use surgecast_lib::{analyze_weather_risks, init_tracing};

#[derive(Parser, Debug)]
#[command(name = "surgecast", version, about = "Hospital patient-surge prediction client")]
struct Cli {
    /// Webhook URL (overrides SURGECAST_WEBHOOK_URL)
    #[arg(long, global = true)]
    endpoint: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Fetch surge predictions and analyze their current conditions
    Predict(LocationArgs),
    /// Analyze a set of environmental readings without any network call
    Analyze(ReadingArgs),
    /// Fetch surge alerts for a hospital
    Alerts {
        hospital_id: String,
    },
    /// Submit accuracy feedback for a prediction
    Feedback {
        prediction_id: String,
        /// Observed outcome as a JSON document
        actual_data: String,
    },
    /// Classify an emergency description
    Triage {
        transcript: Vec<String>,
        /// Also send the emergency record to the webhook
        #[arg(long)]
        dispatch: bool,
    },
    /// Refresh predictions periodically until Ctrl+C
    Watch {
        #[command(flatten)]
        location: LocationArgs,
        /// Seconds between refreshes (defaults to the configured interval)
        #[arg(long, value_parser = clap::value_parser!(u64).range(1..))]
        interval_secs: Option<u64>,
    },
}

#[derive(Args, Debug, Clone)]
struct LocationArgs {
    #[arg(long)]
    city: Option<String>,
    #[arg(long, allow_negative_numbers = true)]
    lat: Option<f64>,
    #[arg(long, allow_negative_numbers = true)]
    lng: Option<f64>,
    #[arg(long)]
    country: Option<String>,
}

impl From<LocationArgs> for LocationQuery {
    fn from(args: LocationArgs) -> Self {
        Self {
            city: args.city,
            latitude: args.lat,
            longitude: args.lng,
            country: args.country,
        }
    }
}

#[derive(Args, Debug)]
struct ReadingArgs {
    #[arg(long, allow_negative_numbers = true)]
    temperature: f64,
    #[arg(long)]
    humidity: f64,
    #[arg(long)]
    aqi: u32,
    #[arg(long, default_value_t = 0.0)]
    rainfall: f64,
    #[arg(long, default_value_t = 0.0)]
    wind_speed: f64,
    #[arg(long, default_value_t = 0)]
    uv_index: u32,
}

#[derive(Error, Debug)]
enum CliError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Prediction(#[from] PredictionError),

    #[error(transparent)]
    Refresh(#[from] RefreshError),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Transcript must not be empty")]
    EmptyTranscript,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PredictReport<'a> {
    status: &'static str,
    envelope: &'a PredictionEnvelope,
    risk_assessment: RiskAssessment,
}

#[tokio::main]
async fn main() {
    init_tracing();
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), CliError> {
    let mut config = ServiceConfig::from_env()?;
    if let Some(endpoint) = &cli.endpoint {
        let overridden = ServiceConfig::with_endpoint(endpoint)?;
        config.endpoint_url = overridden.endpoint_url;
    }

    match cli.command {
        Command::Analyze(readings) => {
            let conditions = EnvironmentalConditions {
                temperature: readings.temperature,
                humidity: readings.humidity,
                aqi: readings.aqi,
                rainfall: readings.rainfall,
                wind_speed: readings.wind_speed,
                uv_index: readings.uv_index,
            };
            print_json(&analyze_weather_risks(&conditions))
        }
        Command::Predict(location) => {
            let query: LocationQuery = location.into();
            let service = PredictionService::new(config)?;
            let envelope = service.fetch_predictions(&query).await;
            print_report(&envelope)
        }
        Command::Alerts { hospital_id } => {
            let service = PredictionService::new(config)?;
            print_json(&service.gateway().get_surge_alerts(&hospital_id).await)
        }
        Command::Feedback {
            prediction_id,
            actual_data,
        } => {
            let actual: serde_json::Value = serde_json::from_str(&actual_data)?;
            let service = PredictionService::new(config)?;
            let reply = service
                .gateway()
                .submit_prediction_feedback(&prediction_id, &actual)
                .await;
            print_json(&reply)
        }
        Command::Triage {
            transcript,
            dispatch,
        } => {
            let transcript = transcript.join(" ");
            if transcript.trim().is_empty() {
                return Err(CliError::EmptyTranscript);
            }
            // No device position is available from a terminal.
            let location =
                resolve_patient_location(Err(LocationError::Unsupported), &config.default_location);
            let record = build_emergency_record(
                &transcript,
                PatientInfo::default(),
                location,
                VitalSigns::default(),
            );
            print_json(&record)?;

            if dispatch {
                let service = PredictionService::new(config)?;
                print_json(&service.gateway().submit_emergency(&record).await)?;
            }
            Ok(())
        }
        Command::Watch {
            location,
            interval_secs,
        } => {
            let interval = interval_secs
                .map(Duration::from_secs)
                .unwrap_or_else(|| config.refresh_interval());
            let service = Arc::new(PredictionService::new(config)?);
            let query: LocationQuery = location.into();
            let handle = spawn_refresh(service, query, interval)?;
            let mut updates = handle.subscribe();

            loop {
                tokio::select! {
                    signal = tokio::signal::ctrl_c() => {
                        signal?;
                        break;
                    }
                    changed = updates.changed() => {
                        if changed.is_err() {
                            break;
                        }
                        let latest = updates.borrow_and_update().clone();
                        if let Some(envelope) = latest {
                            print_report(&envelope)?;
                        }
                    }
                }
            }

            handle.stop().await;
            Ok(())
        }
    }
}

fn print_report(envelope: &PredictionEnvelope) -> Result<(), CliError> {
    print_json(&PredictReport {
        status: envelope.status_line(),
        envelope,
        risk_assessment: analyze_weather_risks(&envelope.data.current_conditions),
    })
}

fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
