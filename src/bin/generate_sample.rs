use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use arrow::array::{ArrayRef, Float64Array, Int64Array, StringArray};
use arrow::datatypes::{DataType, Field, Schema};
use arrow::record_batch::RecordBatch;
use chrono::{Datelike, NaiveDate, Weekday};
use parquet::arrow::ArrowWriter;
use serde::Serialize;

const DEFAULT_OUTPUT: &str = "dashboard/all_data.csv";

/// One day of synthetic usage, in the column order of the public
/// bike-sharing day dataset.
#[derive(Debug, Serialize)]
struct DayRow {
    instant: i64,
    dteday: String,
    season: i64,
    yr: i64,
    mnth: i64,
    holiday: i64,
    weekday: i64,
    workingday: i64,
    weathersit: i64,
    temp: f64,
    atemp: f64,
    hum: f64,
    windspeed: f64,
    casual: i64,
    registered: i64,
    cnt: i64,
}

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

    /// Box-Muller transform for normal distribution
    fn gauss(&mut self, mean: f64, std_dev: f64) -> f64 {
        let u1 = self.next_f64().max(1e-15);
        let u2 = self.next_f64();
        let z = (-2.0 * u1.ln()).sqrt() * (2.0 * std::f64::consts::PI * u2).cos();
        mean + std_dev * z
    }
}

fn season_of(date: NaiveDate) -> i64 {
    match date.month() {
        1..=3 => 1,
        4..=6 => 2,
        7..=9 => 3,
        _ => 4,
    }
}

fn is_holiday(date: NaiveDate) -> bool {
    matches!((date.month(), date.day()), (1, 1) | (7, 4) | (11, 11) | (12, 25))
}

/// Mostly clear, some mist, a little rain and the rare storm.
fn weather(rng: &mut SimpleRng) -> i64 {
    match rng.next_f64() {
        p if p < 0.63 => 1,
        p if p < 0.96 => 2,
        p if p < 0.997 => 3,
        _ => 4,
    }
}

fn generate_rows(start: NaiveDate, end: NaiveDate, rng: &mut SimpleRng) -> Vec<DayRow> {
    let mut rows = Vec::new();

    for (i, date) in start.iter_days().take_while(|d| *d <= end).enumerate() {
        let yr = (date.year() - start.year()) as i64;
        let holiday = is_holiday(date);
        let weekend = matches!(date.weekday(), Weekday::Sat | Weekday::Sun);
        let working = !holiday && !weekend;
        let weathersit = weather(rng);

        // Warmest around late July.
        let phase = (date.ordinal0() as f64 - 200.0) / 365.0 * 2.0 * std::f64::consts::PI;
        let temp = (0.5 + 0.3 * phase.cos() + rng.gauss(0.0, 0.05)).clamp(0.05, 0.95);
        let hum = (0.6 + 0.1 * (weathersit - 1) as f64 + rng.gauss(0.0, 0.08)).clamp(0.0, 1.0);
        let windspeed = rng.gauss(0.19, 0.07).clamp(0.02, 0.5);

        let weather_factor = match weathersit {
            1 => 1.0,
            2 => 0.85,
            3 => 0.45,
            _ => 0.2,
        };
        let demand = (0.4 + temp) * weather_factor * (1.0 + 0.6 * yr as f64);

        let registered_base = if working { 3800.0 } else { 2700.0 };
        let casual_base = if working { 500.0 } else { 1500.0 };
        let registered = (registered_base * demand + rng.gauss(0.0, 250.0)).max(20.0) as i64;
        let casual = (casual_base * demand + rng.gauss(0.0, 120.0)).max(2.0) as i64;

        rows.push(DayRow {
            instant: i as i64 + 1,
            dteday: date.format("%Y-%m-%d").to_string(),
            season: season_of(date),
            yr,
            mnth: date.month() as i64,
            holiday: holiday as i64,
            weekday: date.weekday().num_days_from_sunday() as i64,
            workingday: working as i64,
            weathersit,
            temp,
            atemp: (temp * 0.9 + rng.gauss(0.0, 0.02)).clamp(0.0, 1.0),
            hum,
            windspeed,
            casual,
            registered,
            cnt: casual + registered,
        });
    }
    rows
}

fn write_csv(rows: &[DayRow], path: &Path) -> Result<()> {
    let mut writer = csv::Writer::from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;
    for row in rows {
        writer.serialize(row).context("writing CSV row")?;
    }
    writer.flush().context("flushing CSV")?;
    Ok(())
}

fn write_parquet(rows: &[DayRow], path: &Path) -> Result<()> {
    let int_col = |f: fn(&DayRow) -> i64| -> ArrayRef { Arc::new(rows.iter().map(f).collect::<Int64Array>()) };
    let float_col = |f: fn(&DayRow) -> f64| -> ArrayRef { Arc::new(rows.iter().map(f).collect::<Float64Array>()) };

    let int_field = |name: &str| Field::new(name, DataType::Int64, false);
    let float_field = |name: &str| Field::new(name, DataType::Float64, false);
    let schema = Arc::new(Schema::new(vec![
        int_field("instant"),
        Field::new("dteday", DataType::Utf8, false),
        int_field("season"),
        int_field("yr"),
        int_field("mnth"),
        int_field("holiday"),
        int_field("weekday"),
        int_field("workingday"),
        int_field("weathersit"),
        float_field("temp"),
        float_field("atemp"),
        float_field("hum"),
        float_field("windspeed"),
        int_field("casual"),
        int_field("registered"),
        int_field("cnt"),
    ]));

    let dates: ArrayRef = Arc::new(StringArray::from_iter_values(rows.iter().map(|r| r.dteday.as_str())));
    let batch = RecordBatch::try_new(
        schema.clone(),
        vec![
            int_col(|r| r.instant),
            dates,
            int_col(|r| r.season),
            int_col(|r| r.yr),
            int_col(|r| r.mnth),
            int_col(|r| r.holiday),
            int_col(|r| r.weekday),
            int_col(|r| r.workingday),
            int_col(|r| r.weathersit),
            float_col(|r| r.temp),
            float_col(|r| r.atemp),
            float_col(|r| r.hum),
            float_col(|r| r.windspeed),
            int_col(|r| r.casual),
            int_col(|r| r.registered),
            int_col(|r| r.cnt),
        ],
    )
    .context("building record batch")?;

    let file = std::fs::File::create(path)
        .with_context(|| format!("creating {}", path.display()))?;
    let mut writer = ArrowWriter::try_new(file, schema, None).context("creating Parquet writer")?;
    writer.write(&batch).context("writing batch")?;
    writer.close().context("closing Parquet writer")?;
    Ok(())
}

fn main() -> Result<()> {
    env_logger::init();

    let output = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_OUTPUT));

    let start = NaiveDate::from_ymd_opt(2011, 1, 1).context("start date")?;
    let end = NaiveDate::from_ymd_opt(2012, 12, 31).context("end date")?;
    let mut rng = SimpleRng::new(42);
    let rows = generate_rows(start, end, &mut rng);

    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("creating {}", parent.display()))?;
    }

    let ext = output
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();
    match ext.as_str() {
        "parquet" | "pq" => write_parquet(&rows, &output)?,
        _ => write_csv(&rows, &output)?,
    }

    log::info!("Wrote {} days ({start} to {end}) to {}", rows.len(), output.display());
    println!("Wrote {} days to {}", rows.len(), output.display());
    Ok(())
}
