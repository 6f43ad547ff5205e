use klip::config::Config;
use klip::{device, json, markdown, models, parser, reader};
use std::error::Error;
use std::path::Path;

fn main() {
    let config = Config::load();

    if let Err(e) = run(&config) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(config: &Config) -> Result<(), Box<dyn Error>> {
    let input = device::resolve_clippings_path(Path::new(&config.input_path))?;
    if config.verbose {
        println!("Reading clippings from {}", input.display());
    }

    let lines = reader::read_clippings(&input, encoding_rs::UTF_8)?;
    let (highlights, errors) = parser::parse_highlights(&lines, parser::SEPARATOR);

    for e in &errors {
        eprintln!("Warning: skipping malformed clipping: {}", e);
    }
    if config.verbose {
        println!("Parsed {} highlights.", highlights.len());
    }

    if config.json {
        json::write_highlights(&highlights, Path::new(&config.destination))?;
        println!(
            "Wrote {} highlights to {}",
            highlights.len(),
            config.destination
        );
        return Ok(());
    }

    let books = models::group_by_book(highlights);
    let report = markdown::sync_books(&books, Path::new(&config.destination), config.verbose);

    for (book, e) in &report.failures {
        eprintln!("Warning: failed to write '{}': {}", book, e);
    }

    println!("Sync complete.");
    println!(
        "Successfully synced {} new highlights to {}",
        report.synced, config.destination
    );
    println!(
        "Skipped {} highlights already existing at {}",
        report.skipped, config.destination
    );

    Ok(())
}
