//! Writes `sample_salaries.csv`: a spreadsheet-shaped grid in the default
//! sheet layout (title rows, year headers in row 4, region labels in column
//! A, salaries in B5 onward) for trying the viewer without a real workbook.

use anyhow::{Context, Result};

const FIRST_YEAR: i32 = 2006;
const N_YEARS: usize = 18;

const REGIONS: &[(&str, f64, f64)] = &[
    // name, starting salary, average yearly growth
    ("Nizhny Novgorod Oblast", 14_500.0, 1_900.0),
    ("Vladimir Oblast", 12_800.0, 1_650.0),
    ("Moscow Oblast", 21_300.0, 2_700.0),
    ("Ivanovo Oblast", 10_900.0, 1_400.0),
    ("Ryazan Oblast", 12_100.0, 1_550.0),
    ("Tula Oblast", 13_400.0, 1_750.0),
    ("Yaroslavl Oblast", 13_900.0, 1_800.0),
    ("Kostroma Oblast", 11_600.0, 1_500.0),
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

    /// Uniform float in `[0, 1)`.
    fn uniform(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

fn main() -> Result<()> {
    let mut rng = SimpleRng::new(0x5a1a_27);
    let path = "sample_salaries.csv";
    let mut writer = csv::Writer::from_path(path).context("creating sample CSV")?;

    let width = N_YEARS + 1;

    // Rows 1-3: title and padding, outside the data window.
    let mut title = vec![String::new(); width];
    title[0] = "Average monthly salary by region".to_string();
    writer.write_record(&title)?;
    writer.write_record(vec![String::new(); width])?;
    writer.write_record(vec![String::new(); width])?;

    // Row 4: year headers, one per data column.
    let mut header = vec![String::new()];
    header.extend((0..N_YEARS).map(|i| (FIRST_YEAR + i as i32).to_string()));
    writer.write_record(&header)?;

    // Data rows: region label + one salary per year, with a few holes.
    for &(region, base, growth) in REGIONS {
        let mut row = vec![region.to_string()];
        for year in 0..N_YEARS {
            if rng.uniform() < 0.03 {
                row.push(String::new()); // reporting gap
                continue;
            }
            let noise = (rng.uniform() - 0.5) * growth;
            let salary = base + growth * year as f64 + noise;
            row.push(format!("{}", salary.round() as i64));
        }
        writer.write_record(&row)?;
    }

    writer.flush()?;
    println!(
        "Wrote {path}: {} regions × {} years starting {FIRST_YEAR}",
        REGIONS.len(),
        N_YEARS
    );
    Ok(())
}
