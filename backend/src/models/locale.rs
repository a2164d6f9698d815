//! Supported locales and their static metadata.
//!
//! The locale set is closed: adding a language means adding a variant here,
//! its [`LocaleConfig`] entry, and its country mappings.

use once_cell::sync::Lazy;
use serde::Serialize;
use std::collections::HashMap;
use std::fmt;
use utoipa::ToSchema;

/// A supported UI language.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    En,
    Ar,
    Ur,
    Bn,
    Ms,
    Id,
    Tr,
    Fr,
}

impl Locale {
    /// Served without a URL prefix.
    pub const DEFAULT: Locale = Locale::En;

    pub const ALL: &'static [Locale] = &[
        Locale::En,
        Locale::Ar,
        Locale::Ur,
        Locale::Bn,
        Locale::Ms,
        Locale::Id,
        Locale::Tr,
        Locale::Fr,
    ];

    pub fn code(self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::Ar => "ar",
            Locale::Ur => "ur",
            Locale::Bn => "bn",
            Locale::Ms => "ms",
            Locale::Id => "id",
            Locale::Tr => "tr",
            Locale::Fr => "fr",
        }
    }

    /// Exact, case-sensitive membership test against the supported codes.
    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "en" => Some(Locale::En),
            "ar" => Some(Locale::Ar),
            "ur" => Some(Locale::Ur),
            "bn" => Some(Locale::Bn),
            "ms" => Some(Locale::Ms),
            "id" => Some(Locale::Id),
            "tr" => Some(Locale::Tr),
            "fr" => Some(Locale::Fr),
            _ => None,
        }
    }

    pub fn is_default(self) -> bool {
        self == Self::DEFAULT
    }

    pub fn config(self) -> &'static LocaleConfig {
        match self {
            Locale::En => &EN,
            Locale::Ar => &AR,
            Locale::Ur => &UR,
            Locale::Bn => &BN,
            Locale::Ms => &MS,
            Locale::Id => &ID,
            Locale::Tr => &TR,
            Locale::Fr => &FR,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum TextDirection {
    Ltr,
    Rtl,
}

impl TextDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            TextDirection::Ltr => "ltr",
            TextDirection::Rtl => "rtl",
        }
    }
}

/// Display metadata for one locale.
#[derive(Debug)]
pub struct LocaleConfig {
    pub name: &'static str,
    pub native_name: &'static str,
    pub direction: TextDirection,
    pub flag: &'static str,
    pub region: &'static str,
}

static EN: LocaleConfig = LocaleConfig {
    name: "English",
    native_name: "English",
    direction: TextDirection::Ltr,
    flag: "🇺🇸",
    region: "US",
};

static AR: LocaleConfig = LocaleConfig {
    name: "Arabic",
    native_name: "العربية",
    direction: TextDirection::Rtl,
    flag: "🇸🇦",
    region: "SA",
};

static UR: LocaleConfig = LocaleConfig {
    name: "Urdu",
    native_name: "اردو",
    direction: TextDirection::Rtl,
    flag: "🇵🇰",
    region: "PK",
};

static BN: LocaleConfig = LocaleConfig {
    name: "Bengali",
    native_name: "বাংলা",
    direction: TextDirection::Ltr,
    flag: "🇧🇩",
    region: "BD",
};

static MS: LocaleConfig = LocaleConfig {
    name: "Malay",
    native_name: "Bahasa Melayu",
    direction: TextDirection::Ltr,
    flag: "🇲🇾",
    region: "MY",
};

static ID: LocaleConfig = LocaleConfig {
    name: "Indonesian",
    native_name: "Bahasa Indonesia",
    direction: TextDirection::Ltr,
    flag: "🇮🇩",
    region: "ID",
};

static TR: LocaleConfig = LocaleConfig {
    name: "Turkish",
    native_name: "Türkçe",
    direction: TextDirection::Ltr,
    flag: "🇹🇷",
    region: "TR",
};

static FR: LocaleConfig = LocaleConfig {
    name: "French",
    native_name: "Français",
    direction: TextDirection::Ltr,
    flag: "🇫🇷",
    region: "FR",
};

static COUNTRY_TO_LOCALE: Lazy<HashMap<&'static str, Locale>> = Lazy::new(|| {
    let groups: &[(Locale, &[&str])] = &[
        (Locale::En, &["US", "GB", "CA", "AU", "NZ", "IE"]),
        (
            Locale::Ar,
            &[
                "SA", "AE", "EG", "JO", "KW", "QA", "BH", "OM", "IQ", "SY", "LB", "PS", "YE",
                "LY", "TN", "DZ", "MA", "SD", "MR",
            ],
        ),
        (Locale::Ur, &["PK"]),
        (Locale::Bn, &["BD"]),
        (Locale::Ms, &["MY", "BN"]),
        (Locale::Id, &["ID"]),
        (Locale::Tr, &["TR"]),
        (Locale::Fr, &["FR", "SN", "CI", "ML", "NE"]),
    ];

    groups
        .iter()
        .flat_map(|(locale, countries)| countries.iter().map(move |c| (*c, *locale)))
        .collect()
});

/// Suggested locale for a two-letter region code, if any.
pub fn locale_for_country(country: &str) -> Option<Locale> {
    let country = country.trim();
    if country.len() != 2 {
        return None;
    }
    COUNTRY_TO_LOCALE.get(country.to_ascii_uppercase().as_str()).copied()
}

/// Locale table entry as exposed by `GET /api/locales`.
#[derive(Debug, Serialize, ToSchema)]
pub struct LocaleInfo {
    pub code: Locale,
    pub is_default: bool,
    pub name: String,
    pub native_name: String,
    pub direction: TextDirection,
    pub flag: String,
    pub region: String,
}

impl From<Locale> for LocaleInfo {
    fn from(locale: Locale) -> Self {
        let config = locale.config();
        Self {
            code: locale,
            is_default: locale.is_default(),
            name: config.name.to_string(),
            native_name: config.native_name.to_string(),
            direction: config.direction,
            flag: config.flag.to_string(),
            region: config.region.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_round_trip_through_from_code() {
        for locale in Locale::ALL {
            assert_eq!(Locale::from_code(locale.code()), Some(*locale));
        }
    }

    #[test]
    fn test_exactly_one_default() {
        let defaults: Vec<_> = Locale::ALL.iter().filter(|l| l.is_default()).collect();
        assert_eq!(defaults, vec![&Locale::En]);
    }

    #[test]
    fn test_from_code_rejects_unknown_and_mixed_case() {
        assert_eq!(Locale::from_code("de"), None);
        assert_eq!(Locale::from_code("AR"), None);
        assert_eq!(Locale::from_code(""), None);
    }

    #[test]
    fn test_country_lookup() {
        assert_eq!(locale_for_country("SA"), Some(Locale::Ar));
        assert_eq!(locale_for_country("sa"), Some(Locale::Ar));
        assert_eq!(locale_for_country("PK"), Some(Locale::Ur));
        assert_eq!(locale_for_country("BD"), Some(Locale::Bn));
        assert_eq!(locale_for_country("XX"), None);
        assert_eq!(locale_for_country("T1"), None);
        assert_eq!(locale_for_country("SAU"), None);
    }

    #[test]
    fn test_rtl_locales() {
        assert_eq!(Locale::Ar.config().direction, TextDirection::Rtl);
        assert_eq!(Locale::Ur.config().direction, TextDirection::Rtl);
        assert_eq!(Locale::En.config().direction, TextDirection::Ltr);
    }
}
