//! Token codes.

/// Ticker of the network's native token. Fees are always paid in it.
pub const NATIVE_TICKER: &str = "LYR";

/// A token ticker is `domain/name`: both parts non-empty, no whitespace,
/// exactly one separator. The native ticker is the only bare name allowed.
pub fn is_valid_ticker(ticker: &str) -> bool {
    if ticker == NATIVE_TICKER {
        return true;
    }
    let mut parts = ticker.split('/');
    match (parts.next(), parts.next(), parts.next()) {
        (Some(domain), Some(name), None) => {
            !domain.is_empty()
                && !name.is_empty()
                && !ticker.chars().any(char::is_whitespace)
        }
        _ => false,
    }
}
