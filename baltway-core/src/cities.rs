use serde::Serialize;

/// Sentinel city code for "some other city" — the user types the name in
/// a free-text field instead of picking from the list.
pub const CUSTOM: &str = "custom";

/// Origin pre-selected when the form mounts.
pub const DEFAULT_ORIGIN: &str = "kaliningrad";

/// A city the service runs scheduled transfers to, with the coordinates
/// the route preview centers on.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct City {
    pub code: &'static str,
    pub label: &'static str,
    pub lat: f64,
    pub lon: f64,
}

pub const CITIES: [City; 7] = [
    City { code: "kaliningrad", label: "Kaliningrad", lat: 54.7104, lon: 20.5101 },
    City { code: "gdansk", label: "Gdansk", lat: 54.3520, lon: 18.6466 },
    City { code: "warsaw", label: "Warsaw", lat: 52.2297, lon: 21.0122 },
    City { code: "berlin", label: "Berlin", lat: 52.5200, lon: 13.4050 },
    City { code: "vilnius", label: "Vilnius", lat: 54.6872, lon: 25.2797 },
    City { code: "kaunas", label: "Kaunas", lat: 54.8985, lon: 23.9036 },
    City { code: "riga", label: "Riga", lat: 56.9496, lon: 24.1052 },
];

/// Look up a city by its code. Returns `None` for unknown codes and for
/// the `custom` sentinel.
pub fn find(code: &str) -> Option<&'static City> {
    CITIES.iter().find(|c| c.code == code)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finds_known_city() {
        let city = find("kaliningrad").unwrap();
        assert_eq!(city.label, "Kaliningrad");
        assert!((city.lat - 54.7104).abs() < f64::EPSILON);
    }

    #[test]
    fn custom_is_not_a_city() {
        assert!(find(CUSTOM).is_none());
        assert!(find("atlantis").is_none());
    }
}
