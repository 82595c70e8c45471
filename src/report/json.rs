use serde::Serialize;

use crate::model::quote::Quote;
use crate::report::QuoteHeader;

#[derive(Serialize)]
struct QuoteDocument<'a> {
    tool: &'static str,
    version: &'static str,
    header: &'a QuoteHeader,
    quote: &'a Quote,
}

pub fn render_quote_json(header: &QuoteHeader, quote: &Quote) -> serde_json::Result<String> {
    let doc = QuoteDocument {
        tool: env!("CARGO_PKG_NAME"),
        version: env!("CARGO_PKG_VERSION"),
        header,
        quote,
    };
    let mut out = serde_json::to_string_pretty(&doc)?;
    out.push('\n');
    Ok(out)
}

#[cfg(test)]
#[path = "../../tests/src_inline/report/json.rs"]
mod tests;
