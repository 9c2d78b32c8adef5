use std::io::{self, BufRead, Write};
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result, bail};
use clap::Parser;
use ev_trip_planner::{
    BookingError, DrivingCondition, SLOT_FORMAT, Speed, StationFinder, SystemClock,
    VehicleSpec,
};
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::debug;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

/// Estimate EV range and trip energy, then book a slot at a nearby charging station.
#[derive(Debug, Parser)]
#[command(version)]
struct Cli {
    /// TOML file with vehicle parameters; built-in defaults when omitted
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for station distances
    #[arg(long)]
    seed: Option<u64>,

    /// Trip distance in km
    #[arg(long, value_parser = parse_distance)]
    distance: Option<f64>,

    /// city, highway or mixed
    #[arg(long)]
    condition: Option<DrivingCondition>,

    /// low, moderate or high
    #[arg(long)]
    speed: Option<Speed>,
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with_writer(io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber).context("setting default subscriber failed")?;

    let cli = Cli::parse();
    let spec = match &cli.config {
        Some(path) => VehicleSpec::load(path)
            .with_context(|| format!("loading vehicle spec from {}", path.display()))?,
        None => VehicleSpec::default(),
    };
    debug!(?spec, "vehicle spec");

    let mut console = Console::new(io::stdin().lock());
    let mut ev = spec.build().context("invalid vehicle spec")?;

    let distance = match cli.distance {
        Some(d) => d,
        None => console.prompt_until("Enter the distance to be traveled (in km): ", |s| {
            parse_distance(s).map_err(|_| "Invalid input. Please enter a positive number.")
        })?,
    };
    let condition = match cli.condition {
        Some(c) => c,
        None => console.prompt_enum::<DrivingCondition>(
            "Enter the driving condition (city/highway/mixed): ",
            "Invalid input. Please enter 'city', 'highway', or 'mixed'.",
        )?,
    };
    let speed = match cli.speed {
        Some(s) => s,
        None => console.prompt_enum::<Speed>(
            "Enter the driving speed (low/moderate/high): ",
            "Invalid input. Please enter 'low', 'moderate', or 'high'.",
        )?,
    };

    let range = ev.distance_on_full_charge(condition);
    println!("\nDistance on a full charge ({condition} driving): {range:.2} km");

    let remaining = ev.simulate_trip(distance, condition, speed);
    println!("Battery remaining after a {distance} km trip: {remaining:.2} kWh");

    let recovered = ev.recover_energy_braking(distance, speed);
    println!("Energy recovered through regenerative braking: {recovered:.2} kWh");

    let label = if spec.fast_charging_speed_kw.is_some() {
        "with fast charging"
    } else {
        "with slow charging"
    };
    println!("Time to fully charge the vehicle {label}: {:.2} hours", ev.charge_time());

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_os_rng(),
    };
    let mut finder = StationFinder::new(&mut rng, &SystemClock);

    println!("\nNearby charging stations:");
    for (number, station) in finder.list_stations() {
        println!(
            "{number}. {} - {:.2} km away",
            station.name, station.distance_from_vehicle_km
        );
    }

    let station_number = console.prompt_number("\nEnter the station number you want to book a slot at: ")?;
    let station = match finder.station_mut(station_number) {
        Ok(station) => station,
        Err(_) => {
            println!("Invalid station number. Exiting.");
            return Ok(());
        }
    };

    println!("\nAvailable charging slots at {}:", station.name);
    for (number, slot) in station.available_slots() {
        println!("{number}. {}", slot.format(SLOT_FORMAT));
    }

    let slot_number = console.prompt_number("\nEnter the slot number you want to book: ")?;
    match station.book_slot(slot_number) {
        Ok(slot) => println!(
            "Slot successfully booked at {} for {}.",
            station.name,
            slot.format(SLOT_FORMAT)
        ),
        Err(BookingError::AlreadyBooked { .. }) => {
            println!("This slot is already booked. Please choose another slot.");
        }
        Err(BookingError::InvalidIndex { .. }) => println!("Invalid slot number. Please try again."),
    }

    Ok(())
}

/// Trip distance in km: a finite number above zero.
fn parse_distance(s: &str) -> std::result::Result<f64, String> {
    let distance: f64 = s
        .trim()
        .parse()
        .map_err(|_| format!("'{}' is not a number", s.trim()))?;
    if distance.is_finite() && distance > 0.0 {
        Ok(distance)
    } else {
        Err(format!("distance must be a positive number of km, got {distance}"))
    }
}

struct Console<R> {
    input: R,
}

impl<R: BufRead> Console<R> {
    fn new(input: R) -> Self {
        Console { input }
    }

    fn read_line(&mut self, prompt: &str) -> Result<String> {
        print!("{prompt}");
        io::stdout().flush().context("flushing stdout")?;
        let mut line = String::new();
        if self.input.read_line(&mut line).context("reading stdin")? == 0 {
            bail!("input closed");
        }
        Ok(line)
    }

    fn prompt_until<T>(
        &mut self,
        prompt: &str,
        mut parse: impl FnMut(&str) -> std::result::Result<T, &'static str>,
    ) -> Result<T> {
        loop {
            let line = self.read_line(prompt)?;
            match parse(&line) {
                Ok(value) => return Ok(value),
                Err(msg) => println!("{msg}"),
            }
        }
    }

    fn prompt_enum<T: FromStr>(&mut self, prompt: &str, invalid: &'static str) -> Result<T> {
        self.prompt_until(prompt, |s| s.parse::<T>().map_err(|_| invalid))
    }

    /// Non-numeric input is an error; out-of-range numbers are left to the caller.
    fn prompt_number(&mut self, prompt: &str) -> Result<usize> {
        let line = self.read_line(prompt)?;
        line.trim()
            .parse()
            .with_context(|| format!("expected a number, got '{}'", line.trim()))
    }
}
