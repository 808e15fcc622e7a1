use std::{path::PathBuf, sync::Arc, time::Duration};

use anyhow::Result;
use async_trait::async_trait;
use chrono::Utc;
use clap::{Args, Parser, Subcommand, ValueEnum};
use rsvp_client::{
    site::{wedding_instant, Countdown},
    FormEvent, HttpIntakePort, RsvpController, SubmissionPort,
};
use shared::{
    config::SiteConfig,
    domain::{AttendanceState, FieldName},
    protocol::SubmissionPayload,
};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod config;

use crate::config::load_settings;

#[derive(Parser, Debug)]
#[command(name = "wedding", about = "Countdown and RSVP tools for the wedding site")]
struct Cli {
    /// Site configuration file (defaults to ./site.toml when present).
    #[arg(long, global = true)]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the time left until the ceremony.
    Countdown {
        /// Re-render every second until the day arrives.
        #[arg(long)]
        watch: bool,
    },
    /// Fill in and submit the RSVP form.
    Rsvp(RsvpArgs),
    /// Print the effective site configuration.
    Config,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Attending {
    Yes,
    No,
}

impl From<Attending> for AttendanceState {
    fn from(value: Attending) -> Self {
        match value {
            Attending::Yes => AttendanceState::Attending,
            Attending::No => AttendanceState::NotAttending,
        }
    }
}

#[derive(Args, Debug)]
struct RsvpArgs {
    #[arg(long, default_value = "")]
    guest_name: String,
    #[arg(long, default_value = "")]
    email: String,
    #[arg(long, default_value = "")]
    phone: String,
    #[arg(long, value_enum)]
    attending: Option<Attending>,
    #[arg(long)]
    guest_count: Option<String>,
    /// Meal choice per guest, repeated in guest order.
    #[arg(long = "meal")]
    meals: Vec<String>,
    #[arg(long, default_value = "")]
    guest_names: String,
    #[arg(long, default_value = "")]
    dietary_restrictions: String,
    #[arg(long, default_value = "")]
    special_requests: String,
    /// Print the request instead of sending it.
    #[arg(long)]
    dry_run: bool,
}

/// Port that writes the request to stdout.
struct PrintingPort;

#[async_trait]
impl SubmissionPort for PrintingPort {
    async fn submit(&self, endpoint: &str, payload: &SubmissionPayload) -> Result<()> {
        println!("POST {endpoint}");
        println!("{}", serde_json::to_string_pretty(payload)?);
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let settings = Arc::new(load_settings(cli.config.as_deref())?);

    match cli.command {
        Command::Countdown { watch } => run_countdown(&settings, watch).await,
        Command::Rsvp(args) => run_rsvp(settings, args).await,
        Command::Config => {
            println!("{}", toml::to_string_pretty(settings.as_ref())?);
            Ok(())
        }
    }
}

async fn run_countdown(settings: &SiteConfig, watch: bool) -> Result<()> {
    let target = wedding_instant(settings.wedding_date);
    if !watch {
        println!("{}", Countdown::until(target, Utc::now()));
        return Ok(());
    }

    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    loop {
        ticker.tick().await;
        let countdown = Countdown::until(target, Utc::now());
        println!("{countdown}");
        if countdown == Countdown::Arrived {
            return Ok(());
        }
    }
}

fn enter(controller: &mut RsvpController, field: FieldName, value: String) {
    controller.apply(FormEvent::Input { field, value });
    controller.apply(FormEvent::Blur(field));
}

/// Matches a typed meal against the configured options ignoring case.
fn canonical_meal(settings: &SiteConfig, typed: &str) -> String {
    settings
        .meal_options
        .iter()
        .find(|option| option.eq_ignore_ascii_case(typed.trim()))
        .cloned()
        .unwrap_or_else(|| typed.to_string())
}

async fn run_rsvp(settings: Arc<SiteConfig>, args: RsvpArgs) -> Result<()> {
    let port: Arc<dyn SubmissionPort> = if args.dry_run {
        Arc::new(PrintingPort)
    } else {
        Arc::new(HttpIntakePort::new())
    };
    let mut controller = RsvpController::new(settings.clone(), port);

    enter(&mut controller, FieldName::GuestName, args.guest_name);
    enter(&mut controller, FieldName::Email, args.email);
    enter(&mut controller, FieldName::Phone, args.phone);

    if let Some(attending) = args.attending {
        controller.apply(FormEvent::AttendingSelected(attending.into()));
    }
    if let Some(guest_count) = args.guest_count {
        enter(&mut controller, FieldName::GuestCount, guest_count);
        controller.apply(FormEvent::GuestCountCommitted);
    }
    for (idx, meal) in args.meals.iter().enumerate() {
        controller.apply(FormEvent::MealSelected {
            guest: idx as u32 + 1,
            option: canonical_meal(&settings, meal),
        });
    }

    enter(&mut controller, FieldName::GuestNames, args.guest_names);
    enter(
        &mut controller,
        FieldName::DietaryRestrictions,
        args.dietary_restrictions,
    );
    enter(
        &mut controller,
        FieldName::SpecialRequests,
        args.special_requests,
    );

    let outcome = controller.submit().await;
    let view = controller.view();

    for field in &view.fields {
        if let Some(error) = &field.error {
            eprintln!("{}: {}", field.name, error.message);
        }
    }
    for alert in &view.alerts {
        eprintln!("{} {}", alert.icon, alert.message);
    }

    if let Err(err) = &outcome {
        warn!(
            code = ?err.code(),
            retryable = err.is_retryable(),
            "rsvp not delivered"
        );
    }
    let payload = outcome?;
    if let Some(confirmation) = view.confirmation {
        println!("{}", confirmation.heading);
        println!("{}", confirmation.message);
        println!("{}", confirmation.note);
    }
    info!(
        attending = %payload.attending,
        guest_count = payload.guest_count,
        "rsvp delivered"
    );
    Ok(())
}
