use crate::error::ExportError;
use crate::models::Quote;

/// Download name of the quote list export
pub const CSV_FILENAME: &str = "quotes_export.csv";

pub const CSV_HEADER: [&str; 6] = ["ID", "Client", "Address", "Amount", "Date", "Status"];

/// Serialize quotes as CSV text
///
/// One header line, then one line per quote (id, client name, client address,
/// amount, date, status). Lines are separated by `\n` without a trailing
/// newline. Fields containing a comma, quote or line break are quoted per
/// RFC 4180.
pub fn to_csv(quotes: &[Quote]) -> Result<String, ExportError> {
    let mut writer = ::csv::WriterBuilder::new()
        .terminator(::csv::Terminator::Any(b'\n'))
        .quote_style(::csv::QuoteStyle::Necessary)
        .from_writer(Vec::new());

    writer.write_record(CSV_HEADER)?;
    for quote in quotes {
        let amount = quote.amount.to_string();
        let date = quote.date.format("%Y-%m-%d").to_string();
        writer.write_record([
            quote.id.as_str(),
            quote.client_name.as_str(),
            quote.client_address.as_str(),
            amount.as_str(),
            date.as_str(),
            quote.status.as_str(),
        ])?;
    }

    let bytes = writer
        .into_inner()
        .map_err(|e| ExportError::Io(e.into_error()))?;
    let mut text = String::from_utf8_lossy(&bytes).into_owned();
    if text.ends_with('\n') {
        text.pop();
    }

    log::debug!("Exported {} quotes to CSV", quotes.len());
    Ok(text)
}
