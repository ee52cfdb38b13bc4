//! CLI argument definitions for `crs`.

use std::path::PathBuf;

use clap::{ArgGroup, Args, Parser, Subcommand};

use crs_client::form::RawFormInput;

#[derive(Parser)]
#[command(
    name = "crs",
    version,
    about = "Crop recommendation client",
    long_about = "Submit soil and weather readings to the crop recommendation service,\n\
                  review enriched recommendations, send feedback and ask the farming assistant."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// TOML config file (environment variables still override it).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level with timestamps.
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Request crop recommendations for one set of readings.
    Predict(PredictArgs),

    /// Send feedback on a recommended crop.
    Feedback(FeedbackArgs),

    /// Probe the service health endpoint.
    Health,

    /// Ask the farming assistant a question.
    Chat {
        /// The question, e.g. "tell me about rice".
        #[arg(value_name = "MESSAGE", num_args = 1.., required = true)]
        message: Vec<String>,

        /// Ask the service's assistant instead of the built-in answers.
        #[arg(long = "online")]
        online: bool,
    },

    /// Print the static crop metadata table.
    Crops,

    /// Show stored recommendations for a farm.
    History {
        #[arg(value_name = "FARM_ID")]
        farm_id: String,
    },
}

/// Readings are taken as text so validation matches the form's rules.
#[derive(Args)]
pub struct PredictArgs {
    /// Nitrogen (kg/ha, 0-300).
    #[arg(short = 'n', long = "nitrogen", allow_hyphen_values = true)]
    pub nitrogen: Option<String>,

    /// Phosphorus (kg/ha, 0-150).
    #[arg(short = 'p', long = "phosphorus", allow_hyphen_values = true)]
    pub phosphorus: Option<String>,

    /// Potassium (kg/ha, 0-100).
    #[arg(short = 'k', long = "potassium", allow_hyphen_values = true)]
    pub potassium: Option<String>,

    /// Soil pH (3-10).
    #[arg(long = "ph", allow_hyphen_values = true)]
    pub ph: Option<String>,

    /// Temperature (°C, -10 to 50).
    #[arg(short = 't', long = "temperature", allow_hyphen_values = true)]
    pub temperature: Option<String>,

    /// Relative humidity (%, 0-100).
    #[arg(short = 'H', long = "humidity", allow_hyphen_values = true)]
    pub humidity: Option<String>,

    /// Rainfall (mm, 0-500).
    #[arg(short = 'r', long = "rainfall", allow_hyphen_values = true)]
    pub rainfall: Option<String>,

    /// Associate the prediction with a stored farm.
    #[arg(long = "farm-id")]
    pub farm_id: Option<String>,

    /// Print results as JSON instead of a table.
    #[arg(long = "json")]
    pub json: bool,
}

impl PredictArgs {
    pub fn raw_input(&self) -> RawFormInput {
        RawFormInput {
            nitrogen: self.nitrogen.clone(),
            phosphorus: self.phosphorus.clone(),
            potassium: self.potassium.clone(),
            ph: self.ph.clone(),
            temperature: self.temperature.clone(),
            humidity: self.humidity.clone(),
            rainfall: self.rainfall.clone(),
        }
    }
}

#[derive(Args)]
#[command(group(ArgGroup::new("verdict").required(true).args(["accepted", "rejected"])))]
pub struct FeedbackArgs {
    /// Farm identifier; one is generated when omitted.
    #[arg(long = "farm-id")]
    pub farm_id: Option<String>,

    /// Crop the feedback is about.
    #[arg(long = "crop")]
    pub crop: String,

    /// The recommendation was accepted.
    #[arg(long = "accepted")]
    pub accepted: bool,

    /// The recommendation was rejected.
    #[arg(long = "rejected")]
    pub rejected: bool,

    /// Star rating, 1-5.
    #[arg(long = "rating")]
    pub rating: Option<u8>,

    #[arg(long = "comments", default_value = "")]
    pub comments: String,
}
