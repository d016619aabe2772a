use crate::print_json;
use crate::wiring::App;
use anyhow::{Context, Result};
use clap::Subcommand;
use farmer_reference_data::MarketPriceQuery;

#[derive(Subcommand)]
pub(crate) enum ReferenceAction {
    /// Current pest and disease alerts
    Pests,

    /// Market prices, optionally filtered
    Prices {
        #[arg(long)]
        commodity: Option<String>,

        #[arg(long)]
        state: Option<String>,
    },

    /// Government schemes for farmers
    Schemes,
}

pub(crate) async fn run(app: &App, action: ReferenceAction) -> Result<()> {
    let client = app.reference_client()?;

    match action {
        ReferenceAction::Pests => {
            let alerts = client
                .pest_alerts()
                .await
                .context("Failed to fetch pest alerts")?;
            log::info!("Fetched {} pest alerts", alerts.len());
            print_json(&alerts)
        }
        ReferenceAction::Prices { commodity, state } => {
            let query = MarketPriceQuery { commodity, state };
            let prices = client
                .market_prices(&query)
                .await
                .context("Failed to fetch market prices")?;
            log::info!("Fetched {} market prices", prices.len());
            print_json(&prices)
        }
        ReferenceAction::Schemes => {
            let schemes = client
                .government_schemes()
                .await
                .context("Failed to fetch government schemes")?;
            log::info!("Fetched {} schemes", schemes.len());
            print_json(&schemes)
        }
    }
}
