//! Name, ticker and sector pools.

use market_core::Market;
use rand::seq::SliceRandom;
use rand::Rng;

pub const SECTORS: &[&str] = &[
    "Technology",
    "Healthcare",
    "Financials",
    "Consumer Discretionary",
    "Industrials",
    "Energy",
    "Utilities",
    "Real Estate",
    "Materials",
];

const IN_SUFFIXES: &[&str] = &["Ltd", "Limited", "Industries", "Ventures", "India"];
const GLOBAL_SUFFIXES: &[&str] = &["Inc", "Corp", "Group", "Holdings", "PLC"];

const BASE_NAMES: &[&str] = &[
    "Abbott", "Adler", "Armstrong", "Bailey", "Barton", "Bennett", "Bradley", "Carter",
    "Chandra", "Collins", "Crawford", "Dalton", "Desai", "Ellison", "Fischer", "Fletcher",
    "Garrison", "Goyal", "Hartman", "Hayes", "Iyer", "Jensen", "Kapoor", "Keller",
    "Lambert", "Larsen", "Mahajan", "Mercer", "Nakamura", "Nolan", "Oberoi", "Parker",
    "Prescott", "Quinn", "Raman", "Reddy", "Sinclair", "Sterling", "Thakur", "Turner",
    "Vance", "Walsh", "Whitfield", "Yadav", "Zimmerman",
];

const ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Share of IN tickers listed on the NSE; the rest go to the BSE.
const NSE_SHARE: f64 = 0.2;

fn pick<'a, R: Rng + ?Sized>(rng: &mut R, pool: &'a [&'a str]) -> &'a str {
    pool.choose(rng).copied().unwrap_or_default()
}

pub fn sector<R: Rng + ?Sized>(rng: &mut R) -> String {
    pick(rng, SECTORS).to_string()
}

/// Base name plus a suffix typical for the market.
pub fn company_name<R: Rng + ?Sized>(rng: &mut R, market: Market) -> String {
    let base = pick(rng, BASE_NAMES);
    let suffix = match market {
        Market::In => pick(rng, IN_SUFFIXES),
        Market::Global => pick(rng, GLOBAL_SUFFIXES),
    };
    format!("{} {}", base, suffix)
}

/// IN: first four letters of the name plus `.NS` or `.BO`. GLOBAL: three or
/// four random letters.
pub fn ticker<R: Rng + ?Sized>(rng: &mut R, market: Market, name: &str) -> String {
    match market {
        Market::In => {
            let stem: String = name
                .chars()
                .filter(|c| c.is_ascii_alphanumeric())
                .take(4)
                .collect::<String>()
                .to_ascii_uppercase();
            let exchange = if rng.gen_bool(NSE_SHARE) { ".NS" } else { ".BO" };
            format!("{}{}", stem, exchange)
        }
        Market::Global => {
            let len = rng.gen_range(3..=4);
            (0..len)
                .map(|_| ALPHABET[rng.gen_range(0..ALPHABET.len())] as char)
                .collect()
        }
    }
}
