// Dump stored speed test results as JSON, newest last.
//
// Usage: cargo run --example dump_results -- [CSV_PATH] [LIMIT]
//   CSV_PATH  default: ./speedtest_results.csv
//   LIMIT     default: all rows

use speedtest_results::results_repo::ResultsRepo;
use std::env;

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let path = args
        .get(1)
        .map(String::as_str)
        .unwrap_or("./speedtest_results.csv");
    let limit: Option<usize> = args.get(2).and_then(|s| s.parse().ok());

    let repo = ResultsRepo::new(path);
    let mut records = repo.read_all()?;
    if let Some(limit) = limit {
        let skip = records.len().saturating_sub(limit);
        records.drain(..skip);
    }

    println!("{}", serde_json::to_string_pretty(&records)?);
    Ok(())
}
