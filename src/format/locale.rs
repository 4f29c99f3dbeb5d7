//! Number and currency conventions for the supported locales.
//!
//! Values follow CLDR: separators, grouping sizes, minimum grouping digits
//! and the positive and negative currency patterns. In a pattern `¤` is the
//! symbol, `#` the localized number and `-` the minus sign. Spaces inside
//! patterns render as no-break spaces, as CLDR emits them.

use std::fmt;

use crate::errors::ConvertError;

#[derive(Debug, PartialEq, Eq)]
struct LocaleData {
    language: &'static str,
    territory: &'static str,
    decimal: &'static str,
    group: &'static str,
    min_grouping: usize,
    /// Size of every group left of the first one (2 for lakh grouping)
    secondary_grouping: usize,
    positive: &'static str,
    negative: &'static str,
}

const NBSP: &str = "\u{a0}";
const NNBSP: &str = "\u{202f}";

macro_rules! locale {
    ($lang:literal, $terr:literal, $dec:expr, $grp:expr, $min:literal, $pos:literal, $neg:literal) => {
        locale!($lang, $terr, $dec, $grp, $min, $pos, $neg, 3)
    };
    ($lang:literal, $terr:literal, $dec:expr, $grp:expr, $min:literal, $pos:literal, $neg:literal, $sec:literal) => {
        LocaleData {
            language: $lang,
            territory: $terr,
            decimal: $dec,
            group: $grp,
            min_grouping: $min,
            secondary_grouping: $sec,
            positive: $pos,
            negative: $neg,
        }
    };
}

/// The first entry of each language is its default territory.
static LOCALES: &[LocaleData] = &[
    locale!("en", "US", ".", ",", 1, "¤#", "-¤#"),
    locale!("en", "GB", ".", ",", 1, "¤#", "-¤#"),
    locale!("en", "CA", ".", ",", 1, "¤#", "-¤#"),
    locale!("en", "AU", ".", ",", 1, "¤#", "-¤#"),
    locale!("en", "NZ", ".", ",", 1, "¤#", "-¤#"),
    locale!("en", "IE", ".", ",", 1, "¤#", "-¤#"),
    locale!("en", "IN", ".", ",", 1, "¤#", "-¤#", 2),
    locale!("pt", "BR", ",", ".", 1, "¤ #", "-¤ #"),
    locale!("pt", "PT", ",", NBSP, 2, "# ¤", "-# ¤"),
    locale!("de", "DE", ",", ".", 1, "# ¤", "-# ¤"),
    locale!("de", "AT", ",", NBSP, 1, "¤ #", "-¤ #"),
    locale!("de", "CH", ".", "’", 1, "¤ #", "¤-#"),
    locale!("fr", "FR", ",", NNBSP, 1, "# ¤", "-# ¤"),
    locale!("fr", "CA", ",", NBSP, 1, "# ¤", "-# ¤"),
    locale!("fr", "BE", ",", NNBSP, 1, "# ¤", "-# ¤"),
    locale!("es", "ES", ",", ".", 2, "# ¤", "-# ¤"),
    locale!("es", "MX", ".", ",", 1, "¤#", "-¤#"),
    locale!("it", "IT", ",", ".", 1, "# ¤", "-# ¤"),
    locale!("nl", "BE", ",", ".", 1, "¤ #", "¤ -#"),
    locale!("ja", "JP", ".", ",", 1, "¤#", "-¤#"),
    locale!("ko", "KR", ".", ",", 1, "¤#", "-¤#"),
    locale!("zh", "CN", ".", ",", 1, "¤#", "-¤#"),
    locale!("sv", "SE", ",", NBSP, 1, "# ¤", "-# ¤"),
];

/// A resolved locale. Passed explicitly to every formatting call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    data: &'static LocaleData,
}

impl Locale {
    /// Resolves identifiers such as `en_US`, `pt-BR`, `de_DE.UTF-8`,
    /// `fr_FR@euro` or a bare language like `ja`.
    pub fn parse(identifier: &str) -> Result<Self, ConvertError> {
        let unknown = || ConvertError::UnknownLocale(identifier.to_string());

        let base = identifier
            .split(['.', '@'])
            .next()
            .unwrap_or_default()
            .trim();
        let mut parts = base.split(['_', '-']);
        let language = parts.next().filter(|l| !l.is_empty()).ok_or_else(unknown)?;
        let territory = parts.next();
        if parts.next().is_some() {
            return Err(unknown());
        }

        let language = language.to_lowercase();
        let data = match territory {
            Some(territory) => {
                let territory = territory.to_uppercase();
                LOCALES
                    .iter()
                    .find(|l| l.language == language && l.territory == territory)
            }
            None => LOCALES.iter().find(|l| l.language == language),
        };

        data.map(|data| Locale { data }).ok_or_else(unknown)
    }

    pub fn language(&self) -> &'static str {
        self.data.language
    }

    pub fn territory(&self) -> &'static str {
        self.data.territory
    }

    pub fn decimal_separator(&self) -> &'static str {
        self.data.decimal
    }

    pub fn group_separator(&self) -> &'static str {
        self.data.group
    }

    /// Currency pattern for a positive or negative amount.
    pub fn currency_pattern(&self, negative: bool) -> &'static str {
        if negative {
            self.data.negative
        } else {
            self.data.positive
        }
    }

    /// Renders an unsigned digit string (`"1234"`, `"1234.5"`) with this
    /// locale's separators.
    pub fn localize_digits(&self, digits: &str) -> String {
        let (integer, fraction) = match digits.split_once('.') {
            Some((i, f)) => (i, Some(f)),
            None => (digits, None),
        };

        let mut out = String::with_capacity(digits.len() + integer.len() / 2 + 1);
        if integer.len() >= 3 + self.data.min_grouping {
            let (rest, last) = integer.split_at(integer.len() - 3);
            let mut groups = vec![last];
            let mut end = rest.len();
            while end > 0 {
                let start = end.saturating_sub(self.data.secondary_grouping);
                groups.push(&rest[start..end]);
                end = start;
            }
            groups.reverse();
            out.push_str(&groups.join(self.data.group));
        } else {
            out.push_str(integer);
        }

        if let Some(fraction) = fraction.filter(|f| !f.is_empty()) {
            out.push_str(self.data.decimal);
            out.push_str(fraction);
        }
        out
    }
}

impl Default for Locale {
    fn default() -> Self {
        Locale { data: &LOCALES[0] }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}_{}", self.data.language, self.data.territory)
    }
}
