use crate::infra::load_listings;
use chrono::Local;
use clap::Args;
use property_scout::config::{AppConfig, SearchConfig};
use property_scout::error::AppError;
use property_scout::search::report::format_percentage;
use property_scout::search::request::{FlexibleValue, TypologySelection};
use property_scout::search::{SearchRequest, SearchResults, SearchService};
use std::path::PathBuf;

#[derive(Args, Debug, Default)]
pub(crate) struct SearchArgs {
    /// Country whose catalog is searched (defaults to the configured country)
    #[arg(long)]
    pub(crate) country: Option<String>,
    /// City or neighbourhood to match against listing locations
    #[arg(long)]
    pub(crate) location: Option<String>,
    /// Typologies to include, e.g. `T1,T2`
    #[arg(long, value_delimiter = ',', required = true)]
    pub(crate) typology: Vec<String>,
    /// `flat`, `house` or `any`
    #[arg(long)]
    pub(crate) property_type: Option<String>,
    #[arg(long)]
    pub(crate) price_min: Option<u64>,
    #[arg(long)]
    pub(crate) price_max: Option<u64>,
    /// Exact number of bathrooms, or `any`
    #[arg(long)]
    pub(crate) wcs: Option<String>,
    /// `brand new`, `new`, `used`, `recovery` or `any`
    #[arg(long)]
    pub(crate) usage_state: Option<String>,
    /// Maximum walking minutes to public transport, or `any`
    #[arg(long)]
    pub(crate) public_transport: Option<String>,
    #[arg(long)]
    pub(crate) max_results: Option<usize>,
    /// Saved web search results (JSON) to rank instead of the mock catalog
    #[arg(long)]
    pub(crate) listings: Option<PathBuf>,
    /// Write the ranked table as CSV to this path
    #[arg(long)]
    pub(crate) export: Option<PathBuf>,
}

impl SearchArgs {
    fn into_request(self) -> Result<SearchRequest, AppError> {
        let web_listings = self
            .listings
            .as_deref()
            .map(load_listings)
            .transpose()?;

        Ok(SearchRequest {
            country: self.country,
            location: self.location,
            property_type: self.property_type,
            typology: Some(TypologySelection::Many(self.typology)),
            max_results: self.max_results,
            price_min: self.price_min,
            price_max: self.price_max,
            wcs: self.wcs.map(flexible),
            usage_state: self.usage_state,
            public_transport: self.public_transport.map(flexible),
            web_listings,
            ..SearchRequest::default()
        })
    }
}

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Listings generated per city for the demo catalog
    #[arg(long, default_value_t = 30)]
    pub(crate) properties_per_city: usize,
    /// Skip the refinement step
    #[arg(long)]
    pub(crate) skip_refine: bool,
}

pub(crate) fn run_search(args: SearchArgs) -> Result<(), AppError> {
    let config = AppConfig::load()?;
    let export = args.export.clone();
    let request = args.into_request()?;

    let service = SearchService::new(config.search);
    let results = service.search(&request)?;
    render_results(&results);

    if let Some(path) = export {
        match &results.export_csv {
            Some(csv) => {
                std::fs::write(&path, csv)?;
                println!("\nExported {} rows to {}", results.table_data.len(), path.display());
            }
            None => println!("\nNothing to export"),
        }
    }

    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let service = SearchService::new(SearchConfig {
        properties_per_city: args.properties_per_city,
        ..SearchConfig::default()
    });

    println!("Property scout demo ({})", Local::now().format("%Y-%m-%d"));

    let first = SearchRequest {
        location: Some("Lisboa".to_string()),
        property_type: Some("flat".to_string()),
        typology: Some(TypologySelection::One("T2,T3".to_string())),
        price_min: Some(150_000),
        price_max: Some(350_000),
        public_transport: Some(FlexibleValue::Number(10)),
        max_results: Some(10),
        ..SearchRequest::default()
    };
    println!("\nSearch: T2/T3 flats in Lisboa, 150k to 350k, transport within 10 min");
    render_results(&service.search(&first)?);

    if args.skip_refine {
        return Ok(());
    }

    let refinements = SearchRequest {
        location: Some("Porto".to_string()),
        usage_state: Some("new".to_string()),
        ..SearchRequest::default()
    };
    println!("\nRefined: same brief in Porto, new builds preferred");
    render_results(&service.refine(&first, &refinements)?);

    Ok(())
}

pub(crate) fn render_results(results: &SearchResults) {
    let summary = &results.summary;
    if results.table_data.is_empty() {
        println!("No properties matched (source: {})", results.source.label());
        return;
    }

    println!(
        "{} properties in {} ({}), type {} | source: {}",
        summary.total,
        summary.search_location.as_deref().unwrap_or("N/A"),
        summary.search_country.as_deref().unwrap_or("N/A"),
        summary.search_type.as_deref().unwrap_or("any"),
        results.source.label()
    );

    println!(
        "{:>4}  {:<32} {:<6} {:<8} {:>12} {:>4} {:<18} {:>9} {:<22} {:>6}",
        "Rank", "Location", "Type", "Typology", "Price", "WCs", "State", "Transport", "Agency", "Score"
    );
    for row in &results.table_data {
        println!(
            "{:>4}  {:<32} {:<6} {:<8} {:>12} {:>4} {:<18} {:>9} {:<22} {:>6}",
            row.rank,
            truncate(&row.location, 32),
            row.property_type,
            row.typology,
            row.price,
            row.wcs,
            row.state,
            row.transport,
            truncate(&row.agency, 22),
            row.match_score
        );
    }

    if let Some(prices) = &summary.price_range {
        println!(
            "Price range: {} to {} (avg {})",
            prices.min, prices.max, prices.avg
        );
    }
    if let Some(scores) = &summary.match_score {
        println!("Match score: avg {} | best {}", scores.avg, scores.best);
    }
    if !summary.typologies.is_empty() {
        let mix: Vec<String> = summary
            .typologies
            .iter()
            .map(|(typology, count)| format!("{typology}: {count}"))
            .collect();
        println!("Typology mix: {}", mix.join(", "));
    }
    if let Some(top) = results.ranked.first() {
        println!(
            "Top pick: {} ({})",
            top.property.url,
            format_percentage(top.match_score)
        );
        if !top.components.is_empty() {
            let breakdown: Vec<String> = top
                .components
                .iter()
                .map(|component| component.to_string())
                .collect();
            println!("  Breakdown: {}", breakdown.join(", "));
        }
    }
    if let Some(error) = &results.error {
        println!("Export unavailable: {error}");
    }
}

fn flexible(raw: String) -> FlexibleValue {
    match raw.trim().parse() {
        Ok(number) => FlexibleValue::Number(number),
        Err(_) => FlexibleValue::Text(raw),
    }
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        value.to_string()
    } else {
        let kept: String = value.chars().take(width.saturating_sub(1)).collect();
        format!("{kept}…")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flexible_values_parse_numbers_and_keep_text() {
        assert_eq!(flexible("2".to_string()), FlexibleValue::Number(2));
        assert_eq!(
            flexible("any".to_string()),
            FlexibleValue::Text("any".to_string())
        );
    }

    #[test]
    fn search_args_map_onto_request() {
        let request = SearchArgs {
            location: Some("Porto".to_string()),
            typology: vec!["T1".to_string(), "T2".to_string()],
            wcs: Some("1".to_string()),
            public_transport: Some("any".to_string()),
            ..SearchArgs::default()
        }
        .into_request()
        .expect("request builds");

        assert_eq!(
            request.typology,
            Some(TypologySelection::Many(vec!["T1".to_string(), "T2".to_string()]))
        );
        assert_eq!(request.wcs, Some(FlexibleValue::Number(1)));
        assert_eq!(
            request.public_transport,
            Some(FlexibleValue::Text("any".to_string()))
        );
        assert!(request.web_listings.is_none());
    }

    #[test]
    fn long_cells_are_truncated() {
        assert_eq!(truncate("Lisboa", 32), "Lisboa");
        assert_eq!(truncate("Lisboa, Oriente, Setúbal", 10), "Lisboa, O…");
    }
}
