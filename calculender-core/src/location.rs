//! Locations offered for sunset lookup.
//!
//! The server accepts any place name; these are the ones it is known to
//! resolve, grouped the way they are offered to the user.

pub const DEFAULT_LOCATION: &str = "Jerusalem";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocationGroup {
    Israel,
    Worldwide,
}

impl LocationGroup {
    pub fn label(self) -> &'static str {
        match self {
            LocationGroup::Israel => "Israel",
            LocationGroup::Worldwide => "Around the world",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KnownLocation {
    /// Value sent to the server.
    pub name: &'static str,
    /// Human-readable label.
    pub label: &'static str,
    pub group: LocationGroup,
}

const fn israel(name: &'static str, label: &'static str) -> KnownLocation {
    KnownLocation {
        name,
        label,
        group: LocationGroup::Israel,
    }
}

const fn abroad(name: &'static str, label: &'static str) -> KnownLocation {
    KnownLocation {
        name,
        label,
        group: LocationGroup::Worldwide,
    }
}

pub const KNOWN_LOCATIONS: &[KnownLocation] = &[
    israel("Jerusalem", "Jerusalem"),
    israel("Tel Aviv", "Tel Aviv - Jaffa"),
    israel("Haifa", "Haifa"),
    israel("Rishon LeZion", "Rishon LeZion"),
    israel("Petah Tikva", "Petah Tikva"),
    israel("Ashdod", "Ashdod"),
    israel("Netanya", "Netanya"),
    israel("Beersheba", "Beersheba"),
    israel("Bnei Brak", "Bnei Brak"),
    israel("Holon", "Holon"),
    israel("Ramat Gan", "Ramat Gan"),
    israel("Rehovot", "Rehovot"),
    israel("Ashkelon", "Ashkelon"),
    israel("Modiin", "Modiin"),
    israel("Beit Shemesh", "Beit Shemesh"),
    israel("Tiberias", "Tiberias"),
    israel("Safed", "Safed"),
    israel("Eilat", "Eilat"),
    israel("Kfar Saba", "Kfar Saba"),
    israel("Ra'anana", "Ra'anana"),
    abroad("New York", "New York (USA)"),
    abroad("Los Angeles", "Los Angeles (USA)"),
    abroad("Miami", "Miami (USA)"),
    abroad("Chicago", "Chicago (USA)"),
    abroad("London", "London (UK)"),
    abroad("Paris", "Paris (France)"),
    abroad("Antwerp", "Antwerp (Belgium)"),
    abroad("Buenos Aires", "Buenos Aires (Argentina)"),
    abroad("Toronto", "Toronto (Canada)"),
    abroad("Montreal", "Montreal (Canada)"),
    abroad("Moscow", "Moscow (Russia)"),
    abroad("Melbourne", "Melbourne (Australia)"),
    abroad("Sydney", "Sydney (Australia)"),
    abroad("Johannesburg", "Johannesburg (South Africa)"),
    abroad("Sao Paulo", "Sao Paulo (Brazil)"),
];

pub fn locations_in(group: LocationGroup) -> impl Iterator<Item = &'static KnownLocation> {
    KNOWN_LOCATIONS.iter().filter(move |l| l.group == group)
}

/// Case-insensitive lookup by server name.
pub fn find_known(name: &str) -> Option<&'static KnownLocation> {
    let name = name.trim();
    KNOWN_LOCATIONS
        .iter()
        .find(|l| l.name.eq_ignore_ascii_case(name))
}
