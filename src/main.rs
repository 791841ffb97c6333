use anyhow::Context;
use chrono::Utc;
use property_desk::format::{format_currency, format_number};
use property_desk::{AppConfig, HttpPropertyApi, ListView, MutationCoordinator, PropertyStore, TracingNotifier};
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("🏢 Property Desk");
    info!("================");

    let config = AppConfig::from_env().context("Failed to load configuration")?;
    let api = Arc::new(HttpPropertyApi::new(&config.api)?);
    let store = PropertyStore::new();
    let desk = MutationCoordinator::new(api, store.clone(), TracingNotifier);

    let view = ListView::new(config.filters, config.sort)
        .map_err(|errors| anyhow::anyhow!("Invalid filter bounds: {errors}"))?;

    if store.is_stale(Utc::now(), config.stale_after) {
        info!("Loading properties from {}", config.api.base_url);
        desk.refresh().await.context("Failed to load properties")?;
    }

    let properties = store.properties().unwrap_or_default();
    let visible = view.visible(&properties);

    info!(
        "Showing {} of {} properties (sort: {})",
        visible.len(),
        properties.len(),
        view.sort().label()
    );
    if view.has_active_filters() {
        info!("Filters: {:?}", view.criteria());
    }

    if properties.is_empty() {
        println!("No properties found. Add your first property to get started.");
        return Ok(());
    }
    if visible.is_empty() {
        println!("No properties match the current filters.");
        return Ok(());
    }

    for (i, property) in visible.iter().enumerate() {
        println!("{}. {} [{}]", i + 1, property.address, property.status.label());
        match (&property.floor, &property.suite) {
            (Some(floor), Some(suite)) => println!("   Floor {}, Suite {}", floor, suite),
            (Some(floor), None) => println!("   Floor {}", floor),
            (None, Some(suite)) => println!("   Suite {}", suite),
            (None, None) => {}
        }
        if let Some(size) = property.size {
            println!("   {} sq ft", format_number(u64::from(size)));
        }
        if let Some(rent) = property.rent {
            let annual = property.annual_rent.map(format_currency).unwrap_or_default();
            println!("   {}/mo  {}/yr", format_currency(rent), annual);
        }
        println!("   Broker: {} <{}>", property.broker_name, property.broker_email);
        if let Some(phone) = &property.broker_phone {
            println!("   Phone: {}", phone);
        }
        println!("   Landlord: {} <{}>", property.landlord_name, property.landlord_email);
        println!("   ID: {}", property.id);
        println!();
    }

    Ok(())
}
