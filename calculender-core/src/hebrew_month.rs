//! Hebrew months and the integer codes the server expects.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A Hebrew month, numbered the way the server numbers them
/// (Nisan = 1 … Adar = 13).
///
/// `AdarI` only exists in leap years. `Adar` is the Adar of a common
/// year, which is also Adar II in a leap year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum HebrewMonth {
    Nisan = 1,
    Iyar = 2,
    Sivan = 3,
    Tammuz = 4,
    Av = 5,
    Elul = 6,
    Tishrei = 7,
    Cheshvan = 8,
    Kislev = 9,
    Tevet = 10,
    Shevat = 11,
    AdarI = 12,
    Adar = 13,
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Unknown Hebrew month '{0}'. Use a month name (e.g. tishrei) or its number (1-13)")]
pub struct ParseHebrewMonthError(pub String);

impl HebrewMonth {
    /// Months in the order of the civil year, starting at Tishrei.
    pub const CALENDAR_ORDER: [HebrewMonth; 13] = [
        HebrewMonth::Tishrei,
        HebrewMonth::Cheshvan,
        HebrewMonth::Kislev,
        HebrewMonth::Tevet,
        HebrewMonth::Shevat,
        HebrewMonth::AdarI,
        HebrewMonth::Adar,
        HebrewMonth::Nisan,
        HebrewMonth::Iyar,
        HebrewMonth::Sivan,
        HebrewMonth::Tammuz,
        HebrewMonth::Av,
        HebrewMonth::Elul,
    ];

    pub fn code(self) -> u8 {
        self as u8
    }

    pub fn from_code(code: u8) -> Option<Self> {
        Self::CALENDAR_ORDER
            .iter()
            .copied()
            .find(|m| m.code() == code)
    }

    pub fn name(self) -> &'static str {
        match self {
            HebrewMonth::Nisan => "Nisan",
            HebrewMonth::Iyar => "Iyar",
            HebrewMonth::Sivan => "Sivan",
            HebrewMonth::Tammuz => "Tammuz",
            HebrewMonth::Av => "Av",
            HebrewMonth::Elul => "Elul",
            HebrewMonth::Tishrei => "Tishrei",
            HebrewMonth::Cheshvan => "Cheshvan",
            HebrewMonth::Kislev => "Kislev",
            HebrewMonth::Tevet => "Tevet",
            HebrewMonth::Shevat => "Shevat",
            HebrewMonth::AdarI => "Adar I",
            HebrewMonth::Adar => "Adar",
        }
    }

    pub fn hebrew_name(self) -> &'static str {
        match self {
            HebrewMonth::Nisan => "ניסן",
            HebrewMonth::Iyar => "אייר",
            HebrewMonth::Sivan => "סיוון",
            HebrewMonth::Tammuz => "תמוז",
            HebrewMonth::Av => "אב",
            HebrewMonth::Elul => "אלול",
            HebrewMonth::Tishrei => "תשרי",
            HebrewMonth::Cheshvan => "חשוון",
            HebrewMonth::Kislev => "כסלו",
            HebrewMonth::Tevet => "טבת",
            HebrewMonth::Shevat => "שבט",
            HebrewMonth::AdarI => "אדר א'",
            HebrewMonth::Adar => "אדר / אדר ב'",
        }
    }

    /// Extra explanation for the two Adars, shown next to the name.
    pub fn note(self) -> Option<&'static str> {
        match self {
            HebrewMonth::AdarI => Some("leap years only"),
            HebrewMonth::Adar => Some("common years; Adar II in leap years"),
            _ => None,
        }
    }

    fn aliases(self) -> &'static [&'static str] {
        match self {
            HebrewMonth::Nisan => &["nisan", "nissan"],
            HebrewMonth::Iyar => &["iyar", "iyyar"],
            HebrewMonth::Sivan => &["sivan", "siwan"],
            HebrewMonth::Tammuz => &["tammuz", "tamuz"],
            HebrewMonth::Av => &["av", "ab", "menachemav"],
            HebrewMonth::Elul => &["elul"],
            HebrewMonth::Tishrei => &["tishrei", "tishri"],
            HebrewMonth::Cheshvan => &["cheshvan", "heshvan", "marcheshvan", "marheshvan"],
            HebrewMonth::Kislev => &["kislev", "kislew"],
            HebrewMonth::Tevet => &["tevet", "teves", "tebeth"],
            HebrewMonth::Shevat => &["shevat", "shvat", "shevet"],
            HebrewMonth::AdarI => &["adari", "adar1", "adaraleph"],
            HebrewMonth::Adar => &["adar", "adarii", "adar2", "adarbet"],
        }
    }
}

impl fmt::Display for HebrewMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl From<HebrewMonth> for u8 {
    fn from(month: HebrewMonth) -> u8 {
        month.code()
    }
}

impl TryFrom<u8> for HebrewMonth {
    type Error = ParseHebrewMonthError;

    fn try_from(code: u8) -> Result<Self, Self::Error> {
        HebrewMonth::from_code(code).ok_or_else(|| ParseHebrewMonthError(code.to_string()))
    }
}

impl FromStr for HebrewMonth {
    type Err = ParseHebrewMonthError;

    /// Accepts the numeric code or a month name; case, spaces, hyphens and
    /// apostrophes are ignored ("Adar II", "adar-ii", "ADAR2").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(code) = trimmed.parse::<u8>() {
            return HebrewMonth::try_from(code);
        }

        let normalized: String = trimmed
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_' | '\'' | '.'))
            .flat_map(char::to_lowercase)
            .collect();

        HebrewMonth::CALENDAR_ORDER
            .iter()
            .copied()
            .find(|m| m.aliases().contains(&normalized.as_str()))
            .ok_or_else(|| ParseHebrewMonthError(s.to_string()))
    }
}
