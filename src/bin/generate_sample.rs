use anyhow::{Context, Result};

/// SplitMix64: small, seedable and good enough for sample amounts.
struct SampleRng(u64);

impl SampleRng {
    fn next(&mut self) -> u64 {
        self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.0;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }

    /// Uniform in `[0, 1)`.
    fn unit(&mut self) -> f64 {
        (self.next() >> 11) as f64 / (1u64 << 53) as f64
    }

    /// Uniform amount in `[lo, hi)`, rounded to cents.
    fn amount(&mut self, lo: f64, hi: f64) -> f64 {
        ((lo + (hi - lo) * self.unit()) * 100.0).round() / 100.0
    }

    fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }
}

const HEADQUARTERS: &str = "Best Inc";
const SHOPS: [&str; 3] = ["Best Websites Ever", "Best Jewelery", "Luxury Clothes"];

fn main() -> Result<()> {
    let mut rng = SampleRng(42);
    let output_path = "Transactions.csv";
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_path(output_path)
        .with_context(|| format!("creating {output_path}"))?;

    let mut id: u64 = 0;
    let mut row = |writer: &mut csv::Writer<std::fs::File>,
                   description: String,
                   day: u32,
                   kind: &str,
                   amount: f64|
     -> Result<()> {
        id += 1;
        writer.write_record([
            description,
            day.to_string(),
            kind.to_string(),
            format!("{amount:.2}"),
            id.to_string(),
        ])?;
        Ok(())
    };

    for day in 1..=60u32 {
        row(
            &mut writer,
            format!("({HEADQUARTERS} Daily Wage)"),
            day,
            "Wage",
            -rng.amount(800.0, 1200.0),
        )?;

        for shop in SHOPS {
            if rng.chance(0.8) {
                row(
                    &mut writer,
                    format!("{shop} Revenue"),
                    day,
                    "Sale",
                    rng.amount(200.0, 2500.0),
                )?;
            }
            if rng.chance(0.3) {
                row(
                    &mut writer,
                    format!("{shop} Stock Purchase"),
                    day,
                    "Purchase",
                    -rng.amount(100.0, 900.0),
                )?;
            }
        }

        if day % 7 == 0 {
            row(&mut writer, "Rent Payment".to_string(), day, "Rent", -3500.0)?;
        }
        if rng.chance(0.1) {
            row(
                &mut writer,
                "Office supplies, misc".to_string(),
                day,
                "Purchase",
                -rng.amount(10.0, 120.0),
            )?;
        }
    }

    writer.flush().context("flushing CSV")?;
    println!("Wrote {id} transactions to {output_path}");
    Ok(())
}
