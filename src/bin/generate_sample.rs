use serde::Serialize;

/// One row of the sample dataset, serialized with the exact header names the
/// dashboard's loader requires.
#[derive(Serialize)]
struct SampleRow {
    #[serde(rename = "Age")]
    age: i64,
    #[serde(rename = "Income")]
    income: i64,
    #[serde(rename = "Credit_Score")]
    credit_score: i64,
    #[serde(rename = "Employment_Status")]
    employment_status: &'static str,
    #[serde(rename = "Marital_Status")]
    marital_status: &'static str,
    #[serde(rename = "Education_Level")]
    education_level: &'static str,
    #[serde(rename = "Loan_Amount")]
    loan_amount: i64,
    #[serde(rename = "Defaulted")]
    defaulted: u8,
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

    /// Pick an entry from a weighted table.
    fn pick<'a, T>(&mut self, table: &'a [(T, f64)]) -> &'a T {
        let total: f64 = table.iter().map(|(_, w)| w).sum();
        let mut roll = self.next_f64() * total;
        for (item, weight) in table {
            if roll < *weight {
                return item;
            }
            roll -= weight;
        }
        &table.last().unwrap().0
    }
}

fn main() {
    let mut rng = SimpleRng::new(42);

    let employment: [(&str, f64); 4] = [
        ("Employed", 0.60),
        ("Self-Employed", 0.15),
        ("Unemployed", 0.15),
        ("Retired", 0.10),
    ];
    let marital: [(&str, f64); 3] = [("Single", 0.40), ("Married", 0.45), ("Divorced", 0.15)];
    let education: [(&str, f64); 4] = [
        ("High School", 0.30),
        ("Bachelor", 0.40),
        ("Master", 0.22),
        ("PhD", 0.08),
    ];

    // Mean/std-dev of income per employment status.
    let income_profile = |status: &str| -> (f64, f64) {
        match status {
            "Employed" => (62_000.0, 28_000.0),
            "Self-Employed" => (70_000.0, 35_000.0),
            "Unemployed" => (15_000.0, 8_000.0),
            _ => (30_000.0, 12_000.0),
        }
    };

    let n_rows = 400;
    let mut rows = Vec::with_capacity(n_rows);
    let mut defaults = 0usize;

    for _ in 0..n_rows {
        let employment_status = *rng.pick(&employment);
        let marital_status = *rng.pick(&marital);
        let education_level = *rng.pick(&education);

        let age = 21 + (rng.next_f64() * 49.0) as i64;

        let (mu, sigma) = income_profile(employment_status);
        let income = rng.gauss(mu, sigma).max(2_000.0).round() as i64;

        let credit_score = rng.gauss(640.0, 90.0).clamp(300.0, 850.0).round() as i64;

        let loan_amount = rng
            .gauss(income as f64 * 0.3, income as f64 * 0.1)
            .max(1_000.0)
            .round() as i64;

        // Default probability falls with credit score.
        let p_default = ((750.0 - credit_score as f64) / 600.0).clamp(0.02, 0.80);
        let defaulted = (rng.next_f64() < p_default) as u8;
        defaults += defaulted as usize;

        rows.push(SampleRow {
            age,
            income,
            credit_score,
            employment_status,
            marital_status,
            education_level,
            loan_amount,
            defaulted,
        });
    }

    let output_path = "loan_details.csv";
    let mut writer = csv::Writer::from_path(output_path).expect("Failed to create output file");
    for row in &rows {
        writer.serialize(row).expect("Failed to write row");
    }
    writer.flush().expect("Failed to flush writer");

    println!(
        "Wrote {} applicants ({} defaulted) to {output_path}",
        rows.len(),
        defaults
    );
}
