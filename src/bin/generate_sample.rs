use anyhow::{Context, Result};
use chrono::{Days, NaiveDate};
use serde::Serialize;

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

#[derive(Serialize)]
struct Row<'a> {
    date: NaiveDate,
    region: &'a str,
    mean: f64,
    median: f64,
    lower_90: f64,
    upper_90: f64,
}

/// Round to three decimals, as the estimation pipeline does.
fn round3(v: f64) -> f64 {
    (v * 1000.0).round() / 1000.0
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);

    let regions = [
        ("Austria", 1.6),
        ("Belgium", 1.9),
        ("Germany", 1.7),
        ("Italy", 2.4),
        ("Netherlands", 1.8),
        ("Norway", 1.3),
        ("Spain", 2.6),
        ("Sweden", 1.2),
        ("Switzerland", 1.5),
    ];
    let days = 75u64;
    let start = NaiveDate::from_ymd_opt(2020, 3, 18).context("invalid start date")?;

    let output_path = "data/rt_mcmc.csv";
    std::fs::create_dir_all("data").context("creating data directory")?;
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    let mut rows = 0usize;
    for &(region, initial_rt) in &regions {
        // Log-space random walk drifting towards a post-lockdown level.
        let mut log_rt: f64 = f64::ln(initial_rt);
        let target = f64::ln(rng.gauss(0.9, 0.12).max(0.4));

        for day in 0..days {
            log_rt += 0.06 * (target - log_rt) + rng.gauss(0.0, 0.03);
            let mean = log_rt.exp();
            // Early estimates rest on fewer cases and are less certain.
            let spread = 0.08 + 0.35 * (-(day as f64) / 20.0).exp() + rng.next_f64() * 0.04;
            let date = start
                .checked_add_days(Days::new(day))
                .context("date out of range")?;

            writer
                .serialize(Row {
                    date,
                    region,
                    mean: round3(mean),
                    median: round3(mean * 0.99),
                    lower_90: round3(mean * (1.0 - spread)),
                    upper_90: round3(mean * (1.0 + spread * 1.2)),
                })
                .context("writing CSV row")?;
            rows += 1;
        }
    }
    writer.flush().context("flushing output file")?;

    println!(
        "Wrote {rows} estimates ({} regions x {days} days) to {output_path}",
        regions.len()
    );
    Ok(())
}
