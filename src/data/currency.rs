//! Display currencies accepted by the CoinGecko `vs_currency` parameter.

/// Every code the dashboard offers, as CoinGecko spells them.
pub const SUPPORTED_CURRENCIES: [&str; 62] = [
    // crypto
    "btc", "eth", "ltc", "bch", "bnb", "eos", "xrp", "xlm", "link", "dot", "yfi",
    // fiat
    "usd", "aed", "ars", "aud", "bdt", "bhd", "bmd", "brl", "cad", "chf", "clp", "cny", "czk",
    "dkk", "eur", "gbp", "gel", "hkd", "huf", "idr", "ils", "inr", "jpy", "krw", "kwd", "lkr",
    "mmk", "mxn", "myr", "ngn", "nok", "nzd", "php", "pkr", "pln", "rub", "sar", "sek", "sgd",
    "thb", "try", "twd", "uah", "vef", "vnd", "zar",
    // special drawing rights and metals
    "xdr", "xag", "xau",
    // bitcoin units
    "bits", "sats",
];

pub const DEFAULT_CURRENCY: &str = "USD";

/// The supported list, upper-cased. Every call builds a new vector.
pub fn supported_currencies() -> Vec<String> {
    SUPPORTED_CURRENCIES
        .iter()
        .map(|code| code.to_ascii_uppercase())
        .collect()
}

/// Case-insensitive substring match over `currencies`.
///
/// An empty needle keeps everything, which is what the search box shows
/// before the user types.
pub fn filter_currencies(currencies: &[String], needle: &str) -> Vec<String> {
    let needle = needle.trim().to_ascii_uppercase();
    currencies
        .iter()
        .filter(|code| code.to_ascii_uppercase().contains(&needle))
        .cloned()
        .collect()
}

pub fn is_supported(code: &str) -> bool {
    SUPPORTED_CURRENCIES
        .iter()
        .any(|supported| supported.eq_ignore_ascii_case(code))
}

/// Symbol used when printing an amount in `code`.
///
/// Codes with a dedicated en-US symbol get it (`usd` -> `$`). Any other
/// well-formed ISO 4217 style code (three ASCII letters) is printed as the
/// code itself, the same way a locale formatter falls back. Informal units
/// such as `sats` have no currency formatting at all and yield `None`.
pub fn currency_symbol_for(code: &str) -> Option<String> {
    let code = code.trim().to_ascii_uppercase();
    if code.len() != 3 || !code.chars().all(|c| c.is_ascii_alphabetic()) {
        return None;
    }

    let symbol = match code.as_str() {
        "USD" => "$",
        "AUD" => "A$",
        "BRL" => "R$",
        "CAD" => "CA$",
        "CNY" => "CN¥",
        "EUR" => "€",
        "GBP" => "£",
        "HKD" => "HK$",
        "ILS" => "₪",
        "INR" => "₹",
        "JPY" => "¥",
        "KRW" => "₩",
        "MXN" => "MX$",
        "NZD" => "NZ$",
        "PHP" => "₱",
        "TWD" => "NT$",
        "VND" => "₫",
        _ => return Some(code),
    };

    Some(symbol.to_string())
}
