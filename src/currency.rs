//! Locale-aware currency formatting.
//!
//! Amounts can be formatted from a fractional value ([format_currency]), a
//! whole-unit integer ([format_currency_whole]) or an integer in minor units
//! as stored in the database ([format_minor_units]).

use std::{env, sync::OnceLock};

use crate::database_id::Amount;

/// Where the currency symbol goes relative to the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolPosition {
    /// `$1.00`
    Prefix,
    /// `€ 1,00`
    PrefixWithSpace,
    /// `1,00 €`
    SuffixWithSpace,
}

/// The currency formatting conventions of a locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    tag: &'static str,
    symbol: &'static str,
    symbol_position: SymbolPosition,
    decimal_separator: char,
    grouping_separator: char,
    fraction_digits: u32,
}

const NBSP: char = '\u{a0}';

const fn locale(
    tag: &'static str,
    symbol: &'static str,
    symbol_position: SymbolPosition,
    decimal_separator: char,
    grouping_separator: char,
    fraction_digits: u32,
) -> Locale {
    Locale {
        tag,
        symbol,
        symbol_position,
        decimal_separator,
        grouping_separator,
        fraction_digits,
    }
}

/// Locales with known currency conventions. The first entry is the fallback
/// when the platform locale is unknown.
const KNOWN_LOCALES: &[Locale] = &[
    locale("en-US", "$", SymbolPosition::Prefix, '.', ',', 2),
    locale("en-GB", "£", SymbolPosition::Prefix, '.', ',', 2),
    locale("en-AU", "$", SymbolPosition::Prefix, '.', ',', 2),
    locale("en-CA", "$", SymbolPosition::Prefix, '.', ',', 2),
    locale("en-NZ", "$", SymbolPosition::Prefix, '.', ',', 2),
    locale("en-IE", "€", SymbolPosition::Prefix, '.', ',', 2),
    locale("de-DE", "€", SymbolPosition::SuffixWithSpace, ',', '.', 2),
    locale("de-AT", "€", SymbolPosition::PrefixWithSpace, ',', NBSP, 2),
    locale("de-CH", "CHF", SymbolPosition::PrefixWithSpace, '.', '\'', 2),
    locale("fr-FR", "€", SymbolPosition::SuffixWithSpace, ',', NBSP, 2),
    locale("es-ES", "€", SymbolPosition::SuffixWithSpace, ',', '.', 2),
    locale("it-IT", "€", SymbolPosition::SuffixWithSpace, ',', '.', 2),
    locale("nl-NL", "€", SymbolPosition::PrefixWithSpace, ',', '.', 2),
    locale("pt-PT", "€", SymbolPosition::SuffixWithSpace, ',', NBSP, 2),
    locale("pl-PL", "zł", SymbolPosition::SuffixWithSpace, ',', NBSP, 2),
    locale("cs-CZ", "Kč", SymbolPosition::SuffixWithSpace, ',', NBSP, 2),
    locale("sv-SE", "kr", SymbolPosition::SuffixWithSpace, ',', NBSP, 2),
    locale("ja-JP", "¥", SymbolPosition::Prefix, '.', ',', 0),
];

impl Locale {
    /// Look up a locale by its tag, e.g. `"en-NZ"`, `"de_DE.UTF-8"` or `"fr"`.
    ///
    /// POSIX style tags (underscores, encoding and modifier suffixes) are
    /// accepted. A bare language matches the first known locale for it.
    /// Returns `None` if the locale is not known.
    pub fn from_tag(tag: &str) -> Option<Locale> {
        let tag = tag
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim()
            .replace('_', "-");

        if tag.is_empty() {
            return None;
        }

        KNOWN_LOCALES
            .iter()
            .find(|locale| locale.tag.eq_ignore_ascii_case(&tag))
            .or_else(|| {
                let language = tag.split('-').next().unwrap_or_default();
                KNOWN_LOCALES.iter().find(|locale| {
                    locale
                        .tag
                        .split('-')
                        .next()
                        .is_some_and(|known| known.eq_ignore_ascii_case(language))
                })
            })
            .copied()
    }

    /// The platform default locale.
    ///
    /// Read once from `LC_ALL`, `LC_MONETARY` or `LANG` (in that order),
    /// falling back to `en-US` when none of them name a known locale.
    pub fn system() -> Locale {
        static SYSTEM_LOCALE: OnceLock<Locale> = OnceLock::new();

        *SYSTEM_LOCALE.get_or_init(|| {
            ["LC_ALL", "LC_MONETARY", "LANG"]
                .iter()
                .filter_map(|variable| env::var(variable).ok())
                .find_map(|value| Locale::from_tag(&value))
                .unwrap_or(KNOWN_LOCALES[0])
        })
    }

    /// Resolve an optional locale tag, falling back to [Locale::system] when
    /// the tag is absent or unknown.
    pub fn resolve(tag: Option<&str>) -> Locale {
        tag.and_then(Locale::from_tag)
            .unwrap_or_else(Locale::system)
    }

    /// The canonical tag of the locale, e.g. `"en-US"`.
    pub fn tag(&self) -> &'static str {
        self.tag
    }

    /// The currency symbol, e.g. `"$"`.
    pub fn symbol(&self) -> &'static str {
        self.symbol
    }

    /// The character placed between whole and fractional digits.
    pub fn decimal_separator(&self) -> char {
        self.decimal_separator
    }

    /// The number of fractional digits shown by default.
    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale::system()
    }
}

/// Format `amount` as currency in `locale`.
///
/// When `drop_decimals` is set the fractional part is truncated rather than
/// rounded, so `$99.99` is shown as `$99`, never `$100`. Otherwise the amount
/// is rounded to the locale's number of fraction digits.
pub fn format_currency(amount: f64, locale: &Locale, drop_decimals: bool) -> String {
    let fraction_digits = if drop_decimals {
        0
    } else {
        locale.fraction_digits
    };
    let scale = 10u64.pow(fraction_digits);

    let magnitude = amount.abs();
    let scaled = if drop_decimals {
        magnitude.trunc()
    } else {
        (magnitude * scale as f64).round()
    };

    render(amount < 0.0, scaled as u64, fraction_digits, locale)
}

/// Format a whole-unit integer amount as currency without decimals.
///
/// Equivalent to `format_currency(amount as f64, locale, true)`.
pub fn format_currency_whole(amount: i64, locale: &Locale) -> String {
    format_currency(amount as f64, locale, true)
}

/// Format an amount stored in minor units (hundredths) as currency.
///
/// The conversion is done in integer arithmetic, so every [Amount] is shown
/// exactly. Dropped decimals are truncated, and locales with fewer than two
/// fraction digits round half away from zero.
pub fn format_minor_units(amount: Amount, locale: &Locale, drop_decimals: bool) -> String {
    const MINOR_DIGITS: u32 = 2;

    let magnitude = amount.unsigned_abs();

    let (scaled, fraction_digits) = if drop_decimals {
        (magnitude / 10u64.pow(MINOR_DIGITS), 0)
    } else if locale.fraction_digits >= MINOR_DIGITS {
        let extra = 10u64.pow(locale.fraction_digits - MINOR_DIGITS);
        (magnitude.saturating_mul(extra), locale.fraction_digits)
    } else {
        let divisor = 10u64.pow(MINOR_DIGITS - locale.fraction_digits);
        let rounded = magnitude / divisor + u64::from(magnitude % divisor >= divisor / 2);
        (rounded, locale.fraction_digits)
    };

    render(amount < 0, scaled, fraction_digits, locale)
}

/// Convert an amount in minor units (hundredths) to a fractional amount.
pub fn minor_to_major(amount: Amount) -> f64 {
    amount as f64 / 100.0
}

/// Lay out `scaled`, an amount in units of `10^-fraction_digits`, with the
/// locale's separators and symbol.
fn render(negative: bool, scaled: u64, fraction_digits: u32, locale: &Locale) -> String {
    let scale = 10u64.pow(fraction_digits);
    let whole = scaled / scale;
    let fraction = scaled % scale;

    let mut number = group_digits(whole, locale.grouping_separator);
    if fraction_digits > 0 {
        number.push(locale.decimal_separator);
        number.push_str(&format!(
            "{fraction:0width$}",
            width = fraction_digits as usize
        ));
    }

    // An amount that displays as zero is never shown as negative.
    let sign = if negative && scaled > 0 { "-" } else { "" };
    let symbol = locale.symbol;

    match locale.symbol_position {
        SymbolPosition::Prefix => format!("{sign}{symbol}{number}"),
        SymbolPosition::PrefixWithSpace => format!("{sign}{symbol}{NBSP}{number}"),
        SymbolPosition::SuffixWithSpace => format!("{sign}{number}{NBSP}{symbol}"),
    }
}

/// Insert grouping separators into `whole`, e.g. `1234567` -> `1,234,567`.
fn group_digits(whole: u64, separator: char) -> String {
    let digits = whole.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);

    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(digit);
    }

    grouped
}
