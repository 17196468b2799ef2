use anyhow::Context;
use clap::{Args, Parser, Subcommand};
use inquire::{Confirm, Password, PasswordDisplayMode, Select};
use tracing::debug;
use weatherbuddy_core::{Config, Event, Language, Outcome, TemperatureUnit, WeatherBuddy};

use crate::output::TerminalPresenter;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "weatherbuddy", version, about = "Talking weather lookup")]
pub struct Cli {
    /// Log debug output to stderr.
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Set the OpenWeather API key and narration preferences.
    Configure,

    /// Show and speak the current weather for a city.
    Show {
        /// City name, passed to the provider as typed.
        city: String,

        #[command(flatten)]
        voice: VoiceArgs,
    },

    /// Say the city name into the microphone, then show its weather.
    Listen {
        #[command(flatten)]
        voice: VoiceArgs,
    },

    /// Speak the usage instructions.
    Instructions {
        #[command(flatten)]
        voice: VoiceArgs,
    },

    /// List narration languages and their codes.
    Languages,
}

#[derive(Debug, Args)]
pub struct VoiceArgs {
    /// Narration language, e.g. "Spanish". Defaults to the configured one.
    #[arg(short, long, value_parser = parse_language)]
    language: Option<Language>,

    /// Display unit: fahrenheit, celsius or kelvin.
    #[arg(short, long, value_parser = parse_unit)]
    unit: Option<TemperatureUnit>,

    /// Do not speak anything.
    #[arg(long)]
    mute: bool,
}

impl VoiceArgs {
    fn build(self, mut config: Config) -> anyhow::Result<(WeatherBuddy, Language)> {
        if let Some(unit) = self.unit {
            config.narration.unit = unit;
        }
        if self.mute {
            config.narration.enabled = false;
        }
        let language = self.language.unwrap_or_else(|| config.narration.language());

        let buddy = WeatherBuddy::from_config(&config)?;
        Ok((buddy, language))
    }
}

impl Cli {
    pub async fn run(self, config: Config) -> anyhow::Result<()> {
        match self.command {
            Command::Configure => configure()?,
            Command::Show { city, voice } => {
                let (buddy, language) = voice.build(config)?;
                dispatch(&buddy, Event::GetWeather { city, language }).await;
            }
            Command::Listen { voice } => {
                let (buddy, language) = voice.build(config)?;
                if let Some(Outcome::Heard { city, .. }) =
                    dispatch(&buddy, Event::UseMic { language }).await
                {
                    dispatch(&buddy, Event::GetWeather { city, language }).await;
                }
            }
            Command::Instructions { voice } => {
                let (buddy, language) = voice.build(config)?;
                dispatch(&buddy, Event::RepeatInstructions { language }).await;
            }
            Command::Languages => {
                for lang in Language::all() {
                    println!("{:<10} {}", lang.name(), lang.code());
                }
            }
        }

        Ok(())
    }
}

/// Query failures are reported, not turned into a failing exit.
async fn dispatch(buddy: &WeatherBuddy, event: Event) -> Option<Outcome> {
    debug!(?event, "dispatching event");
    let presenter = TerminalPresenter;
    match buddy.handle(event, &presenter).await {
        Ok(outcome) => Some(outcome),
        Err(err) => {
            presenter.show_error(&err.to_string());
            None
        }
    }
}

fn configure() -> anyhow::Result<()> {
    // Read the file as stored so an env-provided key is not persisted.
    let path = Config::config_file_path()?;
    let mut config = Config::load_from(&path)?;

    let api_key = Password::new("OpenWeather API key:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_help_message("leave empty to keep the current key")
        .prompt()
        .context("Failed to read API key")?;

    let languages = Language::all().to_vec();
    let current = config.narration.language();
    let cursor = languages.iter().position(|l| *l == current).unwrap_or(0);
    let language = Select::new("Narration language:", languages)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read language")?;

    let units = TemperatureUnit::all().to_vec();
    let cursor = units.iter().position(|u| *u == config.narration.unit).unwrap_or(0);
    let unit = Select::new("Temperature unit:", units)
        .with_starting_cursor(cursor)
        .prompt()
        .context("Failed to read unit")?;

    let enabled = Confirm::new("Speak results aloud?")
        .with_default(config.narration.enabled)
        .prompt()
        .context("Failed to read narration preference")?;

    let api_key = api_key.trim();
    if !api_key.is_empty() {
        config.set_api_key(api_key.to_string());
    }
    config.narration.language = language.name().to_string();
    config.narration.unit = unit;
    config.narration.enabled = enabled;

    config.save_to(&path)?;
    println!("Saved configuration to {}", path.display());

    if !config.is_configured() {
        println!(
            "No API key stored yet; set WEATHERBUDDY_API_KEY or run `weatherbuddy configure` again."
        );
    }

    Ok(())
}

fn parse_language(value: &str) -> Result<Language, String> {
    Language::all()
        .iter()
        .copied()
        .find(|lang| lang.name().eq_ignore_ascii_case(value))
        .ok_or_else(|| {
            let names: Vec<&str> = Language::all().iter().map(|l| l.name()).collect();
            format!("unknown language '{value}'; choose one of: {}", names.join(", "))
        })
}

fn parse_unit(value: &str) -> Result<TemperatureUnit, String> {
    TemperatureUnit::try_from(value).map_err(|e| e.to_string())
}
