//! Alert message text.

use crate::types::CandidateToken;

const MISSING: &str = "N/A";

/// Inspection link for a token on pump.fun.
pub fn pump_fun_link(address: &str) -> String {
    format!("https://pump.fun/{}", address)
}

/// HTML alert for a newly discovered token.
pub fn format_token_alert(token: &CandidateToken) -> String {
    let name = token.name.as_deref().map(escape_html).unwrap_or_else(|| MISSING.to_string());
    let symbol = token.symbol.as_deref().map(escape_html).unwrap_or_else(|| MISSING.to_string());
    let address = escape_html(&token.address);

    format!(
        "<b>🔫 New Suspect ({}) 🔫</b>\n\n\
         <b>Name:</b> {} (${})\n\
         <b>Address:</b> <code>{}</code>\n\n\
         👉 <a href='{}'>Inspect the suspect</a>",
        token.source.label(),
        name,
        symbol,
        address,
        pump_fun_link(&address),
    )
}

/// Fixed acknowledgment sent for every webhook delivery.
pub fn webhook_ack_message() -> String {
    "<b>📡 Webhook received</b>\n\nThe indexing service pushed a new event.".to_string()
}

/// Escape the characters Telegram's HTML parse mode treats as markup.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
