use mathwaa_portfolio::{Locale, Portfolio, PortfolioError};
use tracing_subscriber::EnvFilter;

const SAMPLE_UPLOAD: &str = "\
Apt #,Type,Status,Monthly Rent,Cash Collected,Estimated Duration,Lifetime Value,Booking Source
52-01,Studio,RENTED,2400,2400,12,28800,Bayut
52-02,Studio,RENTED,,2600,3 months,7800,Social Media Campaign
52-03,1BR,RESERVED,2400,0,0,0,Walk in
52-04,2br,VACANT,2400,0,,0,
";

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .init();

    let locale = std::env::var("REPORT_LOCALE")
        .ok()
        .and_then(|code| Locale::from_code(&code))
        .unwrap_or_default();

    let upload = match std::env::args().nth(1) {
        Some(path) => std::fs::read_to_string(path)?,
        None => SAMPLE_UPLOAD.to_string(),
    };

    let mut portfolio = Portfolio::default();

    match portfolio.ingest_spreadsheet(&upload) {
        Ok(outcome) => {
            println!("{}", outcome.message(locale));
            println!(
                " - {} apartments now in {} ({} duplicate rows collapsed)",
                outcome.apartment_count, outcome.branch_id, outcome.duplicates_collapsed
            );
        }
        Err(PortfolioError::Format(err)) => {
            eprintln!("{}", err.localized(locale));
            if let Some(row) = err.row() {
                eprintln!(" - fix spreadsheet row {} and upload again", row);
            }
            std::process::exit(1);
        }
        Err(other) => return Err(other.into()),
    }

    println!("{}", portfolio.report().to_json()?);
    Ok(())
}
