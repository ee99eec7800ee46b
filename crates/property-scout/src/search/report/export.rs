use super::views::PropertyRow;
use thiserror::Error;

const HEADERS: [&str; 11] = [
    "Rank",
    "Location",
    "Type",
    "Typology",
    "Price",
    "WCs",
    "State",
    "Transport (min)",
    "Agency",
    "Match Score (%)",
    "Link",
];

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("failed to write CSV export: {0}")]
    Csv(#[from] csv::Error),
    #[error("failed to flush CSV export: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV export is not valid UTF-8")]
    Encoding(#[from] std::string::FromUtf8Error),
}

/// Renders table rows as CSV with numeric price and score columns.
pub fn rows_to_csv(rows: &[PropertyRow]) -> Result<String, ExportError> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(HEADERS)?;

    for row in rows {
        writer.write_record([
            row.rank.to_string(),
            row.location.clone(),
            row.property_type.clone(),
            row.typology.clone(),
            row.price_amount.to_string(),
            row.wcs.clone(),
            row.state.clone(),
            row.transport.clone(),
            row.agency.clone(),
            row.score_percent.to_string(),
            row.link.clone(),
        ])?;
    }

    writer.flush()?;
    let bytes = writer
        .into_inner()
        .map_err(|err| ExportError::Io(err.into_error()))?;
    Ok(String::from_utf8(bytes)?)
}
