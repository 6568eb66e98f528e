use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;

/// Write a synthetic metadata export in the CORD-19 column layout.
#[derive(Debug, Parser)]
#[command(name = "generate-sample")]
struct Args {
    /// Destination file.
    #[arg(long, default_value = "metadata.csv")]
    output: PathBuf,

    /// Number of rows to generate.
    #[arg(long, default_value_t = 2_000)]
    rows: usize,

    /// PRNG seed; equal seeds give identical files.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

const HEADER: [&str; 11] = [
    "cord_uid",
    "sha",
    "source_x",
    "title",
    "doi",
    "license",
    "abstract",
    "publish_time",
    "authors",
    "journal",
    "url",
];

const SOURCES: [&str; 6] = ["PMC", "Medline", "WHO", "Elsevier", "MedRxiv", "ArXiv"];
const JOURNALS: [&str; 14] = [
    "PLoS One",
    "bioRxiv",
    "BMJ",
    "The Lancet",
    "Nature",
    "Science",
    "Journal of Virology",
    "Virology",
    "Emerging Infectious Diseases",
    "Viruses",
    "Vaccine",
    "Journal of Medical Virology",
    "Clinical Infectious Diseases",
    "Scientific Reports",
];
const TOPICS: [&str; 16] = [
    "COVID-19",
    "SARS-CoV-2",
    "coronavirus",
    "pandemic",
    "vaccine",
    "transmission",
    "respiratory",
    "infection",
    "patients",
    "clinical",
    "outcomes",
    "mortality",
    "immune response",
    "public health",
    "lockdown",
    "viral load",
];
const FRAMES: [&str; 6] = [
    "Effects of {a} on {b}",
    "{a} and {b}: a systematic review",
    "Clinical characteristics of {a} in {b}",
    "Modelling {a} during the {b} outbreak",
    "The role of {a} in {b}",
    "{a}, {b} and hospital admissions",
];
const SURNAMES: [&str; 10] = [
    "Wang", "Smith", "Garcia", "Müller", "Rossi", "Kim", "Singh", "Okafor", "Silva", "Novak",
];
const ABSTRACT_WORDS: [&str; 12] = [
    "we", "report", "patients", "with", "severe", "disease", "the", "results", "suggest",
    "significant", "association", "cohort",
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

    fn below(&mut self, n: usize) -> usize {
        (self.next_u64() % n as u64) as usize
    }

    fn pick<'a>(&mut self, items: &[&'a str]) -> &'a str {
        items[self.below(items.len())]
    }

    fn chance(&mut self, p: f64) -> bool {
        self.next_f64() < p
    }
}

fn random_id(rng: &mut SimpleRng, len: usize) -> String {
    (0..len)
        .map(|_| char::from_digit(rng.below(36) as u32, 36).unwrap_or('0'))
        .collect()
}

fn title(rng: &mut SimpleRng) -> String {
    let a = rng.pick(&TOPICS);
    let b = rng.pick(&TOPICS);
    rng.pick(&FRAMES).replace("{a}", a).replace("{b}", b)
}

fn abstract_text(rng: &mut SimpleRng) -> String {
    let n = 20 + rng.below(230);
    (0..n)
        .map(|_| rng.pick(&ABSTRACT_WORDS))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Mostly ISO dates, sometimes bare years, occasionally junk.
fn publish_time(rng: &mut SimpleRng) -> String {
    let year = match rng.below(10) {
        0 => 2005 + rng.below(14),
        1..=2 => 2019,
        3..=6 => 2020,
        7..=8 => 2021,
        _ => 2022,
    };
    match rng.below(20) {
        0 => "unknown".to_string(),
        1..=3 => year.to_string(),
        _ => format!("{year}-{:02}-{:02}", 1 + rng.below(12), 1 + rng.below(28)),
    }
}

fn authors(rng: &mut SimpleRng) -> String {
    let n = 1 + rng.below(5);
    (0..n)
        .map(|_| {
            let initial = char::from(b'A' + rng.below(26) as u8);
            format!("{}, {initial}.", rng.pick(&SURNAMES))
        })
        .collect::<Vec<_>>()
        .join("; ")
}

fn optional(rng: &mut SimpleRng, missing: f64, value: String) -> String {
    if rng.chance(missing) {
        String::new()
    } else {
        value
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    let mut rng = SimpleRng::new(args.seed);

    let mut writer = csv::Writer::from_path(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;
    writer.write_record(HEADER)?;

    for _ in 0..args.rows {
        let uid = random_id(&mut rng, 8);
        let doi = format!("10.{}/{}", 1000 + rng.below(9000), random_id(&mut rng, 10));
        let title = title(&mut rng);
        let title = optional(&mut rng, 0.04, title);
        let abstract_text = abstract_text(&mut rng);
        let abstract_text = optional(&mut rng, 0.2, abstract_text);
        let date = publish_time(&mut rng);
        let date = optional(&mut rng, 0.03, date);
        let authors = authors(&mut rng);
        let authors = optional(&mut rng, 0.05, authors);
        let journal = rng.pick(&JOURNALS).to_string();
        let journal = optional(&mut rng, 0.1, journal);
        let sha = random_id(&mut rng, 40);
        let sha = optional(&mut rng, 0.3, sha);
        let url = format!("https://doi.org/{doi}");

        writer.write_record([
            uid.as_str(),
            sha.as_str(),
            rng.pick(&SOURCES),
            title.as_str(),
            doi.as_str(),
            "cc-by",
            abstract_text.as_str(),
            date.as_str(),
            authors.as_str(),
            journal.as_str(),
            url.as_str(),
        ])?;
    }
    writer.flush()?;

    println!("Wrote {} rows to {}", args.rows, args.output.display());
    Ok(())
}
