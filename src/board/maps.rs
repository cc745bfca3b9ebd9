//! Built-in maps.
//!
//! `test01` is a tiny symmetric ring used throughout the tests; `classic`
//! is the standard 42-territory world map.

use super::map::BoardMap;

/// Six territories in a ring, paired into three continents worth 2 each.
const TEST01_TERRITORIES: &[(&str, &[&str])] = &[
    ("WhiteCountry", &["BlackCountry", "YellowCountry"]),
    ("YellowCountry", &["WhiteCountry", "RedCountry"]),
    ("RedCountry", &["YellowCountry", "GreenCountry"]),
    ("GreenCountry", &["RedCountry", "BlueCountry"]),
    ("BlueCountry", &["GreenCountry", "BlackCountry"]),
    ("BlackCountry", &["BlueCountry", "WhiteCountry"]),
];

const TEST01_CONTINENTS: &[(&str, &[&str])] = &[
    ("GreyContinent", &["WhiteCountry", "BlackCountry"]),
    ("OrangeContinent", &["YellowCountry", "RedCountry"]),
    ("CyanContinent", &["GreenCountry", "BlueCountry"]),
];

const TEST01_BONUSES: &[(&str, u32)] = &[
    ("GreyContinent", 2),
    ("OrangeContinent", 2),
    ("CyanContinent", 2),
];

const CLASSIC_TERRITORIES: &[(&str, &[&str])] = &[
    ("Alaska", &["Alberta", "Northwest Territory", "Kamchatka"]),
    ("Alberta", &["Alaska", "Northwest Territory", "Ontario", "Western United States"]),
    ("Central America", &["Eastern United States", "Western United States", "Venezuela"]),
    ("Eastern United States", &["Central America", "Ontario", "Quebec", "Western United States"]),
    ("Greenland", &["Northwest Territory", "Ontario", "Quebec", "Iceland"]),
    ("Northwest Territory", &["Alaska", "Alberta", "Ontario", "Greenland"]),
    (
        "Ontario",
        &[
            "Alberta", "Eastern United States", "Greenland", "Northwest Territory", "Quebec",
            "Western United States",
        ],
    ),
    ("Quebec", &["Eastern United States", "Greenland", "Ontario"]),
    ("Western United States", &["Alberta", "Central America", "Eastern United States", "Ontario"]),
    ("Argentina", &["Brazil", "Peru"]),
    ("Brazil", &["Argentina", "Peru", "Venezuela", "North Africa"]),
    ("Peru", &["Argentina", "Brazil", "Venezuela"]),
    ("Venezuela", &["Brazil", "Peru", "Central America"]),
    ("Great Britain", &["Iceland", "Northern Europe", "Scandinavia", "Western Europe"]),
    ("Iceland", &["Great Britain", "Scandinavia", "Greenland"]),
    (
        "Northern Europe",
        &[
            "Great Britain", "Scandinavia", "Southern Europe", "Ukraine", "Western Europe",
        ],
    ),
    ("Scandinavia", &["Great Britain", "Iceland", "Northern Europe", "Ukraine"]),
    (
        "Southern Europe",
        &[
            "Northern Europe", "Ukraine", "Western Europe", "Middle East", "Egypt", "North Africa",
        ],
    ),
    (
        "Ukraine",
        &[
            "Northern Europe", "Scandinavia", "Southern Europe", "Afghanistan", "Middle East",
            "Ural",
        ],
    ),
    ("Western Europe", &["Great Britain", "Northern Europe", "Southern Europe", "North Africa"]),
    ("Congo", &["East Africa", "North Africa", "South Africa"]),
    (
        "East Africa",
        &[
            "Congo", "Egypt", "Madagascar", "North Africa", "South Africa", "Middle East",
        ],
    ),
    ("Egypt", &["East Africa", "North Africa", "Southern Europe", "Middle East"]),
    ("Madagascar", &["East Africa", "South Africa"]),
    (
        "North Africa",
        &[
            "Congo", "East Africa", "Egypt", "Southern Europe", "Western Europe", "Brazil",
        ],
    ),
    ("South Africa", &["Congo", "East Africa", "Madagascar"]),
    ("Afghanistan", &["China", "India", "Middle East", "Ural", "Ukraine"]),
    ("China", &["Afghanistan", "India", "Mongolia", "Siam", "Siberia", "Ural"]),
    ("India", &["Afghanistan", "China", "Middle East", "Siam"]),
    ("Irkutsk", &["Kamchatka", "Mongolia", "Siberia", "Yakutsk"]),
    ("Japan", &["Kamchatka", "Mongolia"]),
    ("Kamchatka", &["Irkutsk", "Japan", "Mongolia", "Yakutsk", "Alaska"]),
    (
        "Middle East",
        &[
            "Afghanistan", "India", "Southern Europe", "Ukraine", "East Africa", "Egypt",
        ],
    ),
    ("Mongolia", &["China", "Irkutsk", "Japan", "Kamchatka", "Siberia"]),
    ("Siam", &["China", "India", "Indonesia"]),
    ("Siberia", &["China", "Irkutsk", "Mongolia", "Ural", "Yakutsk"]),
    ("Ural", &["Afghanistan", "China", "Siberia", "Ukraine"]),
    ("Yakutsk", &["Irkutsk", "Kamchatka", "Siberia"]),
    ("Eastern Australia", &["New Guinea", "Western Australia"]),
    ("Indonesia", &["New Guinea", "Western Australia", "Siam"]),
    ("New Guinea", &["Eastern Australia", "Indonesia", "Western Australia"]),
    ("Western Australia", &["Eastern Australia", "Indonesia", "New Guinea"]),
];

const CLASSIC_CONTINENTS: &[(&str, &[&str])] = &[
    ("South America", &["Argentina", "Brazil", "Peru", "Venezuela"]),
    ("Australia", &["Eastern Australia", "Indonesia", "New Guinea", "Western Australia"]),
    ("Africa", &["Congo", "East Africa", "Egypt", "Madagascar", "North Africa", "South Africa"]),
    (
        "Europe",
        &[
            "Great Britain", "Iceland", "Northern Europe", "Scandinavia", "Southern Europe",
            "Ukraine", "Western Europe",
        ],
    ),
    (
        "North America",
        &[
            "Alaska", "Alberta", "Central America", "Eastern United States", "Greenland",
            "Northwest Territory", "Ontario", "Quebec", "Western United States",
        ],
    ),
    (
        "Asia",
        &[
            "Afghanistan", "China", "India", "Irkutsk", "Japan", "Kamchatka", "Middle East",
            "Mongolia", "Siam", "Siberia", "Ural", "Yakutsk",
        ],
    ),
];

const CLASSIC_BONUSES: &[(&str, u32)] = &[
    ("Asia", 7),
    ("North America", 5),
    ("Europe", 5),
    ("Africa", 3),
    ("Australia", 2),
    ("South America", 2),
];

/// The small symmetric test map.
pub fn test01() -> BoardMap {
    BoardMap::from_tables(TEST01_TERRITORIES, TEST01_CONTINENTS, TEST01_BONUSES)
        .expect("built-in test01 map is valid")
}

/// The classic world map.
pub fn classic() -> BoardMap {
    BoardMap::from_tables(CLASSIC_TERRITORIES, CLASSIC_CONTINENTS, CLASSIC_BONUSES)
        .expect("built-in classic map is valid")
}

/// Looks up a built-in map by name.
pub fn by_name(name: &str) -> Option<BoardMap> {
    match name {
        "test01" => Some(test01()),
        "classic" => Some(classic()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test01_shape() {
        let map = test01();
        assert_eq!(map.len(), 6);
        assert_eq!(map.continents().len(), 3);
        assert!(map.continents().iter().all(|c| c.bonus == 2 && c.territories.len() == 2));
        for t in map.territories() {
            assert_eq!(map.neighbours(t).len(), 2);
        }
    }

    #[test]
    fn classic_shape() {
        let map = classic();
        assert_eq!(map.len(), 42);
        assert_eq!(map.continents().len(), 6);
        let total_bonus: u32 = map.continents().iter().map(|c| c.bonus).sum();
        assert_eq!(total_bonus, 24);
        // Every territory belongs to exactly one continent.
        let members: usize = map.continents().iter().map(|c| c.territories.len()).sum();
        assert_eq!(members, 42);
        assert!(map.territories().all(|t| map.continent_of(t).is_some()));
    }

    #[test]
    fn classic_frontiers_are_symmetric() {
        let map = classic();
        for (a, b) in map.frontiers() {
            assert!(map.adjacent(b, a), "{} -> {} has no way back", map.name(a), map.name(b));
        }
    }

    #[test]
    fn by_name_lookup() {
        assert!(by_name("classic").is_some());
        assert!(by_name("test01").is_some());
        assert!(by_name("mars").is_none());
    }
}
