use anyhow::{Context, Result, bail};
use review_pipeline::config::HarvestConfig;
use review_pipeline::fetcher::{BrowserSession, ReviewHarvester, extract_product_id, site_origin};
use review_pipeline::models::Review;
use review_pipeline::processor::ReviewExtractor;
use review_pipeline::storage::{cookie_store, review_store};
use std::io::{self, Write};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt::init();

    // Load environment variables
    dotenv::dotenv().ok();

    let config = HarvestConfig::from_file("src/configs/harvest.toml")
        .context("Failed to load harvest configuration")?;

    let product_url = prompt("Enter the product URL: ")?;

    let Some(product_id) = extract_product_id(&product_url) else {
        bail!(
            "Invalid URL. Could not extract a product id from '{}'",
            product_url
        );
    };
    info!("Harvesting reviews for product {}", product_id);

    let origin = site_origin(&product_url)?;
    let mut browser = BrowserSession::connect(&config.browser, &config.scraping).await?;

    // The browser handle is held for the whole run and closed whether
    // the harvest succeeded or not.
    let outcome = run_harvest(&mut browser, &config, &product_url, &origin).await;
    if let Err(e) = browser.close().await {
        warn!("Failed to close browser session: {}", e);
    }
    let reviews = outcome?;

    if reviews.is_empty() {
        warn!("No reviews found.");
        return Ok(());
    }

    review_store::write_reviews_csv(&config.output.reviews_path, &reviews)?;
    info!(
        "Harvest complete: {} reviews saved to {}",
        reviews.len(),
        config.output.reviews_path
    );

    Ok(())
}

async fn run_harvest(
    browser: &mut BrowserSession,
    config: &HarvestConfig,
    product_url: &str,
    origin: &str,
) -> Result<Vec<Review>> {
    let cookies = cookie_store::load_cookies(&config.output.cookies_path)?;
    if !cookies.is_empty() {
        // Cookies can only be attached once the browser is on the site.
        browser.open_origin(origin).await?;
        browser.apply_cookies(&cookies).await?;
    }

    let extractor = ReviewExtractor::from_config(&config.selectors);
    let harvester = ReviewHarvester::new(config.scraping.clone(), extractor);
    let reviews = harvester.harvest(browser, product_url).await?;

    // Refresh the cookie file with whatever the session holds now.
    match browser.export_cookies().await {
        Ok(session_cookies) => {
            cookie_store::save_cookies(&config.output.cookies_path, &session_cookies)?;
        }
        Err(e) => warn!("Could not export cookies: {}", e),
    }

    Ok(reviews)
}

fn prompt(message: &str) -> Result<String> {
    print!("{}", message);
    io::stdout().flush()?;

    let mut line = String::new();
    io::stdin()
        .read_line(&mut line)
        .context("Failed to read input")?;
    Ok(line.trim().to_string())
}
