use anyhow::{Context, Result};
use openweathermap::Client;

// Usage: daily_forecast [LAT LON]
//
// Authentication comes from OPENWEATHERMAP_API_KEY or `.api.txt`; set
// RUST_LOG=openweathermap=debug to watch the request happen.
fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let mut args = std::env::args().skip(1);
    let lat: f64 = match args.next() {
        Some(raw) => raw.parse().context("latitude must be a number")?,
        None => 59.33,
    };
    let lon: f64 = match args.next() {
        Some(raw) => raw.parse().context("longitude must be a number")?,
        None => 18.07,
    };

    let client = Client::from_env()?;
    let days = client.daily_forecast(lat, lon)?;

    println!("{} day(s) of forecast for ({lat}, {lon}):", days.len());
    for day in &days {
        println!(
            "{}  day {} K  clouds {}%  pop {}  rain {} mm  snow {} mm",
            day.dt.as_deref().unwrap_or("-"),
            num(day.temp_day),
            num(day.clouds),
            num(day.pop),
            num(day.rain),
            num(day.snow),
        );
    }

    Ok(())
}

fn num(value: Option<f64>) -> String {
    value.map_or_else(|| "-".to_string(), |v| v.to_string())
}
