//! Write a synthetic OWID-style COVID-19 CSV for trying the viewer without
//! downloading the real export.

use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use clap::Parser;

#[derive(Parser)]
#[command(about = "Generate a synthetic owid-covid-data.csv")]
struct Args {
    /// Output CSV path.
    #[arg(default_value = "owid-covid-data.csv")]
    output: PathBuf,

    /// PRNG seed.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// (location, iso_code, population, peak day, peak daily cases, fatality ratio)
const LOCATIONS: [(&str, &str, f64, f64, f64, f64); 4] = [
    ("Ecuador", "ECU", 17_643_060.0, 120.0, 1_800.0, 0.06),
    ("Peru", "PER", 32_971_846.0, 150.0, 7_500.0, 0.04),
    ("Colombia", "COL", 50_882_884.0, 200.0, 11_000.0, 0.03),
    ("Chile", "CHL", 19_116_209.0, 160.0, 5_500.0, 0.025),
];

/// Minimal deterministic PRNG (xoshiro256**)
struct SimpleRng {
    state: [u64; 4],
}

impl SimpleRng {
    fn new(seed: u64) -> Self {
        let mut s = [0u64; 4];
        let mut x = seed;
        for slot in &mut s {
            x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
            *slot = x;
        }
        SimpleRng { state: s }
    }

    fn next_u64(&mut self) -> u64 {
        let result = (self.state[1].wrapping_mul(5))
            .rotate_left(7)
            .wrapping_mul(9);
        let t = self.state[1] << 17;
        self.state[2] ^= self.state[0];
        self.state[3] ^= self.state[1];
        self.state[1] ^= self.state[2];
        self.state[0] ^= self.state[3];
        self.state[2] ^= t;
        self.state[3] = self.state[3].rotate_left(45);
        result
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

/// Daily new cases: a bell-shaped wave around `peak_day`, with multiplicative noise.
fn daily_cases(day: f64, peak_day: f64, peak: f64, rng: &mut SimpleRng) -> f64 {
    let wave = peak * (-(day - peak_day).powi(2) / (2.0 * 45.0_f64.powi(2))).exp();
    (wave * (0.7 + 0.6 * rng.next_f64())).round()
}

fn fmt(v: f64) -> String {
    format!("{v:.1}")
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let first_day = NaiveDate::from_ymd_opt(2020, 1, 1).context("invalid start date")?;
    let days = 366;

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record([
        "iso_code",
        "continent",
        "location",
        "date",
        "total_cases",
        "new_cases",
        "total_deaths",
        "new_deaths",
        "total_cases_per_million",
        "total_deaths_per_million",
        "population",
    ])?;

    let mut rows = 0usize;
    for &(location, iso, population, peak_day, peak, cfr) in &LOCATIONS {
        let mut total_cases = 0.0;
        let mut total_deaths = 0.0;
        for d in 0..days {
            let date = first_day + Days::new(d);
            let new_cases = daily_cases(d as f64, peak_day, peak, &mut rng);
            // Deaths trail cases by about two weeks.
            let new_deaths =
                (daily_cases(d as f64 - 14.0, peak_day, peak, &mut rng) * cfr).round();
            total_cases += new_cases;
            total_deaths += new_deaths;

            // Roughly one day in 25 has no report at all.
            let reported = rng.next_f64() > 0.04;
            let cell = |v: f64| if reported { fmt(v) } else { String::new() };

            writer.write_record([
                iso.to_string(),
                "South America".to_string(),
                location.to_string(),
                date.format("%Y-%m-%d").to_string(),
                cell(total_cases),
                cell(new_cases),
                cell(total_deaths),
                cell(new_deaths),
                cell(total_cases / population * 1e6),
                cell(total_deaths / population * 1e6),
                fmt(population),
            ])?;
            rows += 1;
        }
    }
    writer.flush()?;

    println!(
        "Wrote {rows} rows for {} locations to {}",
        LOCATIONS.len(),
        args.output.display()
    );
    Ok(())
}
