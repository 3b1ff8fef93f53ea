use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate};

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

    fn below(&mut self, n: usize) -> usize {
        (self.next_f64() * n as f64) as usize % n
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

const COMPANIES: [&str; 14] = [
    "PT Maju Bersama", "PT Sinar Digital", "PT Nusantara Logistik", "PT Karya Teknologi",
    "PT Bank Sejahtera", "PT Retail Indonesia", "PT Agro Lestari", "PT Media Kreatif",
    "PT Energi Hijau", "PT Solusi Data", "PT Kuliner Rasa", "PT Properti Prima",
    "PT Farmasi Sehat", "PT Otomotif Jaya",
];
const LOCATIONS: [&str; 8] = [
    "Jakarta", "Bandung", "Surabaya", "Medan", "Semarang", "Yogyakarta", "Denpasar", "Makassar",
];
const EXPERIENCE: [&str; 5] = ["0", "1", "2", "3", "5"];
/// Career levels with the base monthly salary (IDR) each is centred on.
const CAREER_LEVELS: [(&str, f64); 4] = [
    ("Staff", 4_500_000.0),
    ("Supervisor", 7_500_000.0),
    ("Manager", 13_000_000.0),
    ("Direktur", 22_000_000.0),
];
const ROLES: [&str; 10] = [
    "software engineer", "sales executive", "data analyst", "accounting staff",
    "graphic designer", "warehouse admin", "marketing specialist", "customer service",
    "project manager", "mechanical technician",
];
const PHRASES: [&str; 10] = [
    "Responsible for daily operations and reporting.",
    "Minimum 1 year experience, fresh graduates welcome!",
    "Strong communication and teamwork skills.",
    "Familiar with Microsoft Excel & data analysis.",
    "Willing to be placed in any branch office.",
    "Mampu bekerja dalam tim dan di bawah tekanan.",
    "Experience with SQL, Python or Rust is a plus.",
    "Manage client relationships and achieve sales targets.",
    "Bachelor degree (S1) in a related field.",
    "Attractive salary + benefits, BPJS, THR.",
];

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(42);
    let output_path = "sample_listings.csv";
    let mut writer = csv::Writer::from_path(output_path).context("creating output file")?;

    writer.write_record([
        "Tanggal",
        "Perusahaan",
        "Lokasi",
        "Pengalaman Minimal",
        "Jenjang Karir",
        "Gaji Minimum",
        "Gaji Maksimum",
        "Deskripsi Pekerjaan",
    ])?;

    let start = NaiveDate::from_ymd_opt(2024, 1, 1).context("invalid start date")?;
    let n_rows = 600;

    for _ in 0..n_rows {
        // Some rows carry dates the loader has to drop.
        let date = if rng.chance(0.02) {
            "tidak diketahui".to_string()
        } else {
            (start + Duration::days(rng.below(120) as i64)).to_string()
        };

        let (career, base) = CAREER_LEVELS[rng.below(CAREER_LEVELS.len())];
        let salary_min = (base * (0.7 + 0.4 * rng.next_f64()) / 100_000.0).round() * 100_000.0;
        let salary_max = salary_min * (1.2 + 0.5 * rng.next_f64());
        let salary_min = if rng.chance(0.08) {
            "Negotiable".to_string()
        } else if rng.chance(0.05) {
            "0".to_string()
        } else {
            format!("{salary_min:.0}")
        };
        let salary_max = if rng.chance(0.05) {
            String::new()
        } else {
            format!("{:.0}", (salary_max / 100_000.0).round() * 100_000.0)
        };

        let description = if rng.chance(0.1) {
            String::new()
        } else {
            format!(
                "We are hiring a {}. {} {}",
                rng.pick(&ROLES),
                rng.pick(&PHRASES),
                rng.pick(&PHRASES)
            )
        };

        let company = if rng.chance(0.03) { "" } else { rng.pick(&COMPANIES) };

        writer.write_record([
            date.as_str(),
            company,
            rng.pick(&LOCATIONS),
            rng.pick(&EXPERIENCE),
            career,
            salary_min.as_str(),
            salary_max.as_str(),
            description.as_str(),
        ])?;
    }

    writer.flush().context("flushing output file")?;
    println!("Wrote {n_rows} listings to {output_path}");
    Ok(())
}
