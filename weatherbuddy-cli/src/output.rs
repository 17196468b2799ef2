use chrono::Local;
use weatherbuddy_core::{DisplayResult, Presenter, WeatherQueryResult};

/// Prints results to stdout and notices to stderr.
#[derive(Debug, Default)]
pub struct TerminalPresenter;

impl TerminalPresenter {
    /// Blocking error notification; the command stops after this.
    pub fn show_error(&self, message: &str) {
        eprintln!("✖ {message}");
    }
}

impl Presenter for TerminalPresenter {
    fn show_weather(&self, result: &WeatherQueryResult, display: &DisplayResult) {
        println!();
        println!("  {}", result.city);
        if display.icon.is_none() {
            println!("  {}", display.temperature_display);
        } else {
            println!("  {}  {}", display.icon, display.temperature_display);
        }
        println!("  {}", display.description);

        if let Some(observed) = result.observed_at {
            let local = observed.with_timezone(&Local);
            println!("  (observed {})", local.format("%Y-%m-%d %H:%M"));
        }
        println!();
    }

    fn show_heard(&self, city: &str) {
        println!("You said: {city}");
    }

    fn show_warning(&self, message: &str) {
        eprintln!("⚠ {message}");
    }
}
