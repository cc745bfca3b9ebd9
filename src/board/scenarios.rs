//! Built-in scenarios.
//!
//! Fixed six-player starting positions on the classic map, used to assess
//! games and compare players from a known opening. Each table lists every
//! classic territory with its owner and army count.

use thiserror::Error;

use super::map::{BoardMap, Territory};
use super::player::Player;

const WHITE: Player = Player(0);
const YELLOW: Player = Player(1);
const RED: Player = Player(2);
const GREEN: Player = Player(3);
const BLUE: Player = Player(4);
const BLACK: Player = Player(5);

type Placement = (&'static str, Player, u32);

/// White holds Oceania and three bordering Asian territories; the rest is scattered.
const WHITE_OCEANIA: &[Placement] = &[
    ("Afghanistan", GREEN, 12),
    ("Alaska", BLACK, 12),
    ("Alberta", BLUE, 12),
    ("Argentina", RED, 9),
    ("Brazil", GREEN, 2),
    ("Central America", YELLOW, 12),
    ("China", WHITE, 6),
    ("Congo", BLACK, 2),
    ("East Africa", BLUE, 1),
    ("Eastern Australia", WHITE, 1),
    ("Eastern United States", GREEN, 2),
    ("Egypt", YELLOW, 2),
    ("Great Britain", BLUE, 1),
    ("Greenland", RED, 2),
    ("Iceland", BLUE, 3),
    ("India", WHITE, 6),
    ("Indonesia", WHITE, 1),
    ("Irkutsk", YELLOW, 1),
    ("Japan", BLACK, 2),
    ("Kamchatka", GREEN, 1),
    ("Madagascar", BLACK, 1),
    ("Middle East", YELLOW, 2),
    ("Mongolia", RED, 4),
    ("New Guinea", WHITE, 1),
    ("North Africa", RED, 1),
    ("Northern Europe", BLUE, 1),
    ("Northwest Territory", BLUE, 1),
    ("Ontario", BLACK, 1),
    ("Peru", GREEN, 1),
    ("Quebec", YELLOW, 1),
    ("Scandinavia", GREEN, 1),
    ("Siam", WHITE, 4),
    ("Siberia", YELLOW, 1),
    ("South Africa", RED, 1),
    ("Southern Europe", BLUE, 1),
    ("Ukraine", BLACK, 1),
    ("Ural", RED, 1),
    ("Venezuela", BLACK, 1),
    ("Western Australia", WHITE, 1),
    ("Western Europe", YELLOW, 1),
    ("Western United States", RED, 2),
    ("Yakutsk", GREEN, 1),
];

/// `white_oceania` with White and Black swapped.
const BLACK_OCEANIA: &[Placement] = &[
    ("Afghanistan", GREEN, 12),
    ("Alaska", WHITE, 12),
    ("Alberta", BLUE, 12),
    ("Argentina", RED, 9),
    ("Brazil", GREEN, 2),
    ("Central America", YELLOW, 12),
    ("China", BLACK, 6),
    ("Congo", WHITE, 2),
    ("East Africa", BLUE, 1),
    ("Eastern Australia", BLACK, 1),
    ("Eastern United States", GREEN, 2),
    ("Egypt", YELLOW, 2),
    ("Great Britain", BLUE, 1),
    ("Greenland", RED, 2),
    ("Iceland", BLUE, 3),
    ("India", BLACK, 6),
    ("Indonesia", BLACK, 1),
    ("Irkutsk", YELLOW, 1),
    ("Japan", WHITE, 2),
    ("Kamchatka", GREEN, 1),
    ("Madagascar", WHITE, 1),
    ("Middle East", YELLOW, 2),
    ("Mongolia", RED, 4),
    ("New Guinea", BLACK, 1),
    ("North Africa", RED, 1),
    ("Northern Europe", BLUE, 1),
    ("Northwest Territory", BLUE, 1),
    ("Ontario", WHITE, 1),
    ("Peru", GREEN, 1),
    ("Quebec", YELLOW, 1),
    ("Scandinavia", GREEN, 1),
    ("Siam", BLACK, 4),
    ("Siberia", YELLOW, 1),
    ("South Africa", RED, 1),
    ("Southern Europe", BLUE, 1),
    ("Ukraine", WHITE, 1),
    ("Ural", RED, 1),
    ("Venezuela", WHITE, 1),
    ("Western Australia", BLACK, 1),
    ("Western Europe", YELLOW, 1),
    ("Western United States", RED, 2),
    ("Yakutsk", GREEN, 1),
];

/// White holds Africa; the rest is scattered.
const WHITE_AFRICA: &[Placement] = &[
    ("Afghanistan", GREEN, 12),
    ("Alaska", BLACK, 12),
    ("Alberta", BLUE, 12),
    ("Argentina", RED, 9),
    ("Brazil", WHITE, 5),
    ("Central America", YELLOW, 12),
    ("China", BLACK, 2),
    ("Congo", WHITE, 1),
    ("East Africa", WHITE, 4),
    ("Eastern Australia", BLUE, 1),
    ("Eastern United States", GREEN, 2),
    ("Egypt", WHITE, 5),
    ("Great Britain", BLUE, 1),
    ("Greenland", RED, 2),
    ("Iceland", BLUE, 3),
    ("India", YELLOW, 2),
    ("Indonesia", BLACK, 1),
    ("Irkutsk", YELLOW, 1),
    ("Japan", BLACK, 2),
    ("Kamchatka", GREEN, 1),
    ("Madagascar", WHITE, 1),
    ("Middle East", YELLOW, 2),
    ("Mongolia", RED, 4),
    ("New Guinea", RED, 1),
    ("North Africa", WHITE, 3),
    ("Northern Europe", BLUE, 1),
    ("Northwest Territory", BLUE, 1),
    ("Ontario", BLACK, 1),
    ("Peru", GREEN, 1),
    ("Quebec", YELLOW, 1),
    ("Scandinavia", GREEN, 1),
    ("Siam", GREEN, 2),
    ("Siberia", YELLOW, 1),
    ("South Africa", WHITE, 1),
    ("Southern Europe", BLUE, 1),
    ("Ukraine", BLACK, 1),
    ("Ural", RED, 1),
    ("Venezuela", BLACK, 1),
    ("Western Australia", RED, 1),
    ("Western Europe", YELLOW, 1),
    ("Western United States", RED, 2),
    ("Yakutsk", GREEN, 1),
];

/// `white_africa` with White and Black swapped.
const BLACK_AFRICA: &[Placement] = &[
    ("Afghanistan", GREEN, 12),
    ("Alaska", WHITE, 12),
    ("Alberta", BLUE, 12),
    ("Argentina", RED, 9),
    ("Brazil", BLACK, 5),
    ("Central America", YELLOW, 12),
    ("China", WHITE, 2),
    ("Congo", BLACK, 1),
    ("East Africa", BLACK, 4),
    ("Eastern Australia", BLUE, 1),
    ("Eastern United States", GREEN, 2),
    ("Egypt", BLACK, 5),
    ("Great Britain", BLUE, 1),
    ("Greenland", RED, 2),
    ("Iceland", BLUE, 3),
    ("India", YELLOW, 2),
    ("Indonesia", WHITE, 1),
    ("Irkutsk", YELLOW, 1),
    ("Japan", WHITE, 2),
    ("Kamchatka", GREEN, 1),
    ("Madagascar", BLACK, 1),
    ("Middle East", YELLOW, 2),
    ("Mongolia", RED, 4),
    ("New Guinea", RED, 1),
    ("North Africa", BLACK, 3),
    ("Northern Europe", BLUE, 1),
    ("Northwest Territory", BLUE, 1),
    ("Ontario", WHITE, 1),
    ("Peru", GREEN, 1),
    ("Quebec", YELLOW, 1),
    ("Scandinavia", GREEN, 1),
    ("Siam", GREEN, 2),
    ("Siberia", YELLOW, 1),
    ("South Africa", BLACK, 1),
    ("Southern Europe", BLUE, 1),
    ("Ukraine", WHITE, 1),
    ("Ural", RED, 1),
    ("Venezuela", WHITE, 1),
    ("Western Australia", RED, 1),
    ("Western Europe", YELLOW, 1),
    ("Western United States", RED, 2),
    ("Yakutsk", GREEN, 1),
];

/// Every player scattered over the map.
const SPREAD_OUT: &[Placement] = &[
    ("Afghanistan", YELLOW, 3),
    ("Alaska", WHITE, 3),
    ("Alberta", WHITE, 3),
    ("Argentina", WHITE, 2),
    ("Brazil", GREEN, 3),
    ("Central America", BLUE, 2),
    ("China", WHITE, 4),
    ("Congo", BLUE, 3),
    ("East Africa", YELLOW, 4),
    ("Eastern Australia", GREEN, 2),
    ("Eastern United States", BLACK, 6),
    ("Egypt", RED, 3),
    ("Great Britain", RED, 4),
    ("Greenland", WHITE, 1),
    ("Iceland", RED, 2),
    ("India", YELLOW, 3),
    ("Indonesia", GREEN, 4),
    ("Irkutsk", WHITE, 5),
    ("Japan", GREEN, 4),
    ("Kamchatka", RED, 3),
    ("Madagascar", RED, 2),
    ("Middle East", YELLOW, 3),
    ("Mongolia", BLACK, 5),
    ("New Guinea", BLACK, 3),
    ("North Africa", BLACK, 2),
    ("Northern Europe", GREEN, 1),
    ("Northwest Territory", YELLOW, 2),
    ("Ontario", YELLOW, 2),
    ("Peru", BLUE, 2),
    ("Quebec", GREEN, 4),
    ("Scandinavia", BLUE, 3),
    ("Siam", YELLOW, 3),
    ("Siberia", BLACK, 1),
    ("South Africa", RED, 3),
    ("Southern Europe", BLACK, 1),
    ("Ukraine", BLUE, 3),
    ("Ural", GREEN, 2),
    ("Venezuela", WHITE, 2),
    ("Western Australia", RED, 3),
    ("Western Europe", BLUE, 3),
    ("Western United States", BLUE, 4),
    ("Yakutsk", BLACK, 2),
];

/// `spread_out` with White and Black swapped.
const SPREAD_OUT_BLACK: &[Placement] = &[
    ("Afghanistan", YELLOW, 3),
    ("Alaska", BLACK, 3),
    ("Alberta", BLACK, 3),
    ("Argentina", BLACK, 2),
    ("Brazil", GREEN, 3),
    ("Central America", BLUE, 2),
    ("China", BLACK, 4),
    ("Congo", BLUE, 3),
    ("East Africa", YELLOW, 4),
    ("Eastern Australia", GREEN, 2),
    ("Eastern United States", WHITE, 6),
    ("Egypt", RED, 3),
    ("Great Britain", RED, 4),
    ("Greenland", BLACK, 1),
    ("Iceland", RED, 2),
    ("India", YELLOW, 3),
    ("Indonesia", GREEN, 4),
    ("Irkutsk", BLACK, 5),
    ("Japan", GREEN, 4),
    ("Kamchatka", RED, 3),
    ("Madagascar", RED, 2),
    ("Middle East", YELLOW, 3),
    ("Mongolia", WHITE, 5),
    ("New Guinea", WHITE, 3),
    ("North Africa", WHITE, 2),
    ("Northern Europe", GREEN, 1),
    ("Northwest Territory", YELLOW, 2),
    ("Ontario", YELLOW, 2),
    ("Peru", BLUE, 2),
    ("Quebec", GREEN, 4),
    ("Scandinavia", BLUE, 3),
    ("Siam", YELLOW, 3),
    ("Siberia", WHITE, 1),
    ("South Africa", RED, 3),
    ("Southern Europe", WHITE, 1),
    ("Ukraine", BLUE, 3),
    ("Ural", GREEN, 2),
    ("Venezuela", BLACK, 2),
    ("Western Australia", RED, 3),
    ("Western Europe", BLUE, 3),
    ("Western United States", BLUE, 4),
    ("Yakutsk", WHITE, 2),
];

/// Another scattered layout.
const SPREAD_OUT_V2: &[Placement] = &[
    ("Afghanistan", BLACK, 3),
    ("Alaska", YELLOW, 3),
    ("Alberta", BLUE, 3),
    ("Argentina", GREEN, 2),
    ("Brazil", RED, 3),
    ("Central America", BLACK, 3),
    ("China", YELLOW, 3),
    ("Congo", WHITE, 3),
    ("East Africa", GREEN, 3),
    ("Eastern Australia", BLACK, 4),
    ("Eastern United States", YELLOW, 3),
    ("Egypt", YELLOW, 3),
    ("Great Britain", WHITE, 3),
    ("Greenland", BLUE, 3),
    ("Iceland", RED, 3),
    ("India", BLUE, 3),
    ("Indonesia", GREEN, 5),
    ("Irkutsk", RED, 3),
    ("Japan", BLACK, 1),
    ("Kamchatka", GREEN, 3),
    ("Madagascar", RED, 2),
    ("Middle East", WHITE, 3),
    ("Mongolia", WHITE, 1),
    ("New Guinea", WHITE, 5),
    ("North Africa", BLACK, 3),
    ("Northern Europe", GREEN, 3),
    ("Northwest Territory", BLACK, 3),
    ("Ontario", GREEN, 3),
    ("Peru", WHITE, 2),
    ("Quebec", WHITE, 3),
    ("Scandinavia", BLACK, 3),
    ("Siam", RED, 3),
    ("Siberia", GREEN, 1),
    ("South Africa", BLUE, 2),
    ("Southern Europe", BLUE, 3),
    ("Ukraine", RED, 3),
    ("Ural", BLUE, 3),
    ("Venezuela", BLUE, 3),
    ("Western Australia", YELLOW, 4),
    ("Western Europe", YELLOW, 3),
    ("Western United States", RED, 3),
    ("Yakutsk", YELLOW, 1),
];

/// A third scattered layout.
const SPREAD_OUT_E1: &[Placement] = &[
    ("Afghanistan", WHITE, 3),
    ("Alaska", RED, 2),
    ("Alberta", YELLOW, 4),
    ("Argentina", BLUE, 3),
    ("Brazil", GREEN, 2),
    ("Central America", RED, 2),
    ("China", RED, 4),
    ("Congo", BLACK, 2),
    ("East Africa", RED, 5),
    ("Eastern Australia", YELLOW, 3),
    ("Eastern United States", WHITE, 4),
    ("Egypt", BLACK, 2),
    ("Great Britain", YELLOW, 2),
    ("Greenland", RED, 1),
    ("Iceland", GREEN, 3),
    ("India", RED, 4),
    ("Indonesia", BLACK, 3),
    ("Irkutsk", YELLOW, 3),
    ("Japan", WHITE, 2),
    ("Kamchatka", WHITE, 4),
    ("Madagascar", YELLOW, 1),
    ("Middle East", GREEN, 1),
    ("Mongolia", BLUE, 1),
    ("New Guinea", BLUE, 4),
    ("North Africa", YELLOW, 3),
    ("Northern Europe", BLACK, 2),
    ("Northwest Territory", GREEN, 4),
    ("Ontario", RED, 2),
    ("Peru", BLACK, 3),
    ("Quebec", GREEN, 4),
    ("Scandinavia", BLUE, 4),
    ("Siam", BLACK, 4),
    ("Siberia", GREEN, 3),
    ("South Africa", GREEN, 3),
    ("Southern Europe", WHITE, 2),
    ("Ukraine", BLUE, 3),
    ("Ural", BLACK, 4),
    ("Venezuela", WHITE, 1),
    ("Western Australia", BLUE, 2),
    ("Western Europe", BLUE, 3),
    ("Western United States", YELLOW, 4),
    ("Yakutsk", WHITE, 4),
];

/// A scattered layout with White seated differently.
const WHITE_SPREAD_OUT: &[Placement] = &[
    ("Afghanistan", BLUE, 1),
    ("Alaska", BLACK, 1),
    ("Alberta", BLACK, 2),
    ("Argentina", YELLOW, 1),
    ("Brazil", YELLOW, 1),
    ("Central America", YELLOW, 12),
    ("China", GREEN, 1),
    ("Congo", YELLOW, 2),
    ("East Africa", BLUE, 1),
    ("Eastern Australia", WHITE, 1),
    ("Eastern United States", WHITE, 6),
    ("Egypt", BLUE, 12),
    ("Great Britain", RED, 1),
    ("Greenland", WHITE, 1),
    ("Iceland", RED, 1),
    ("India", BLUE, 1),
    ("Indonesia", GREEN, 2),
    ("Irkutsk", BLACK, 2),
    ("Japan", WHITE, 1),
    ("Kamchatka", BLACK, 12),
    ("Madagascar", BLUE, 1),
    ("Middle East", BLUE, 3),
    ("Mongolia", GREEN, 1),
    ("New Guinea", GREEN, 2),
    ("North Africa", YELLOW, 2),
    ("Northern Europe", WHITE, 4),
    ("Northwest Territory", BLACK, 1),
    ("Ontario", BLACK, 1),
    ("Peru", WHITE, 1),
    ("Quebec", BLACK, 1),
    ("Scandinavia", RED, 4),
    ("Siam", GREEN, 1),
    ("Siberia", GREEN, 12),
    ("South Africa", BLUE, 1),
    ("Southern Europe", RED, 2),
    ("Ukraine", RED, 9),
    ("Ural", RED, 1),
    ("Venezuela", YELLOW, 1),
    ("Western Australia", GREEN, 1),
    ("Western Europe", RED, 2),
    ("Western United States", YELLOW, 1),
    ("Yakutsk", WHITE, 6),
];

/// `white_spread_out` with White and Black swapped.
const BLACK_SPREAD_OUT: &[Placement] = &[
    ("Afghanistan", BLUE, 1),
    ("Alaska", WHITE, 1),
    ("Alberta", WHITE, 2),
    ("Argentina", YELLOW, 1),
    ("Brazil", YELLOW, 1),
    ("Central America", YELLOW, 12),
    ("China", GREEN, 1),
    ("Congo", YELLOW, 2),
    ("East Africa", BLUE, 1),
    ("Eastern Australia", BLACK, 1),
    ("Eastern United States", BLACK, 6),
    ("Egypt", BLUE, 12),
    ("Great Britain", RED, 1),
    ("Greenland", BLACK, 1),
    ("Iceland", RED, 1),
    ("India", BLUE, 1),
    ("Indonesia", GREEN, 2),
    ("Irkutsk", WHITE, 2),
    ("Japan", BLACK, 1),
    ("Kamchatka", WHITE, 12),
    ("Madagascar", BLUE, 1),
    ("Middle East", BLUE, 3),
    ("Mongolia", GREEN, 1),
    ("New Guinea", GREEN, 2),
    ("North Africa", YELLOW, 2),
    ("Northern Europe", BLACK, 4),
    ("Northwest Territory", WHITE, 1),
    ("Ontario", WHITE, 1),
    ("Peru", BLACK, 1),
    ("Quebec", WHITE, 1),
    ("Scandinavia", RED, 4),
    ("Siam", GREEN, 1),
    ("Siberia", GREEN, 12),
    ("South Africa", BLUE, 1),
    ("Southern Europe", RED, 2),
    ("Ukraine", RED, 9),
    ("Ural", RED, 1),
    ("Venezuela", YELLOW, 1),
    ("Western Australia", GREEN, 1),
    ("Western Europe", RED, 2),
    ("Western United States", YELLOW, 1),
    ("Yakutsk", BLACK, 6),
];

/// Yellow, Green and Blue each hold a whole continent; White holds none.
const ALL_TOTALITIES_BUT_WHITE: &[Placement] = &[
    ("Afghanistan", WHITE, 6),
    ("Alaska", BLACK, 5),
    ("Alberta", BLACK, 2),
    ("Argentina", YELLOW, 1),
    ("Brazil", YELLOW, 7),
    ("Central America", YELLOW, 2),
    ("China", GREEN, 1),
    ("Congo", BLUE, 1),
    ("East Africa", BLUE, 1),
    ("Eastern Australia", GREEN, 1),
    ("Eastern United States", BLACK, 5),
    ("Egypt", BLUE, 6),
    ("Great Britain", RED, 1),
    ("Greenland", WHITE, 1),
    ("Iceland", RED, 4),
    ("India", GREEN, 1),
    ("Indonesia", GREEN, 3),
    ("Irkutsk", WHITE, 1),
    ("Japan", WHITE, 1),
    ("Kamchatka", YELLOW, 1),
    ("Madagascar", BLUE, 1),
    ("Middle East", BLUE, 3),
    ("Mongolia", YELLOW, 2),
    ("New Guinea", GREEN, 3),
    ("North Africa", BLUE, 7),
    ("Northern Europe", RED, 1),
    ("Northwest Territory", BLACK, 1),
    ("Ontario", BLACK, 1),
    ("Peru", YELLOW, 1),
    ("Quebec", BLACK, 1),
    ("Scandinavia", RED, 4),
    ("Siam", GREEN, 10),
    ("Siberia", WHITE, 1),
    ("South Africa", BLUE, 1),
    ("Southern Europe", RED, 2),
    ("Ukraine", RED, 6),
    ("Ural", WHITE, 4),
    ("Venezuela", YELLOW, 6),
    ("Western Australia", GREEN, 1),
    ("Western Europe", RED, 2),
    ("Western United States", BLACK, 5),
    ("Yakutsk", WHITE, 6),
];

/// `all_totalities_but_white` with White and Black swapped.
const ALL_TOTALITIES_BUT_BLACK: &[Placement] = &[
    ("Afghanistan", BLACK, 6),
    ("Alaska", WHITE, 5),
    ("Alberta", WHITE, 2),
    ("Argentina", YELLOW, 1),
    ("Brazil", YELLOW, 7),
    ("Central America", YELLOW, 2),
    ("China", GREEN, 1),
    ("Congo", BLUE, 1),
    ("East Africa", BLUE, 1),
    ("Eastern Australia", GREEN, 1),
    ("Eastern United States", WHITE, 5),
    ("Egypt", BLUE, 6),
    ("Great Britain", RED, 1),
    ("Greenland", BLACK, 1),
    ("Iceland", RED, 4),
    ("India", GREEN, 1),
    ("Indonesia", GREEN, 3),
    ("Irkutsk", BLACK, 1),
    ("Japan", BLACK, 1),
    ("Kamchatka", YELLOW, 1),
    ("Madagascar", BLUE, 1),
    ("Middle East", BLUE, 3),
    ("Mongolia", YELLOW, 2),
    ("New Guinea", GREEN, 3),
    ("North Africa", BLUE, 7),
    ("Northern Europe", RED, 1),
    ("Northwest Territory", WHITE, 1),
    ("Ontario", WHITE, 1),
    ("Peru", YELLOW, 1),
    ("Quebec", WHITE, 1),
    ("Scandinavia", RED, 4),
    ("Siam", GREEN, 10),
    ("Siberia", BLACK, 1),
    ("South Africa", BLUE, 1),
    ("Southern Europe", RED, 2),
    ("Ukraine", RED, 6),
    ("Ural", BLACK, 4),
    ("Venezuela", YELLOW, 6),
    ("Western Australia", GREEN, 1),
    ("Western Europe", RED, 2),
    ("Western United States", WHITE, 5),
    ("Yakutsk", BLACK, 6),
];

/// Names of every built-in scenario.
pub const NAMES: &[&str] = &[
    "white_oceania",
    "black_oceania",
    "white_africa",
    "black_africa",
    "spread_out",
    "spread_out_black",
    "spread_out_v2",
    "spread_out_e1",
    "white_spread_out",
    "black_spread_out",
    "all_totalities_but_white",
    "all_totalities_but_black",
];

fn table(name: &str) -> Option<&'static [Placement]> {
    let table = match name {
        "white_oceania" => WHITE_OCEANIA,
        "black_oceania" => BLACK_OCEANIA,
        "white_africa" => WHITE_AFRICA,
        "black_africa" => BLACK_AFRICA,
        "spread_out" => SPREAD_OUT,
        "spread_out_black" => SPREAD_OUT_BLACK,
        "spread_out_v2" => SPREAD_OUT_V2,
        "spread_out_e1" => SPREAD_OUT_E1,
        "white_spread_out" => WHITE_SPREAD_OUT,
        "black_spread_out" => BLACK_SPREAD_OUT,
        "all_totalities_but_white" => ALL_TOTALITIES_BUT_WHITE,
        "all_totalities_but_black" => ALL_TOTALITIES_BUT_BLACK,
        _ => return None,
    };
    Some(table)
}
/// Errors resolving a scenario.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScenarioError {
    #[error("unknown scenario '{0}'")]
    UnknownScenario(String),

    #[error("scenario territory '{0}' is not on the map")]
    UnknownTerritory(&'static str),
}

/// Looks up a built-in scenario by name and resolves it against `map`,
/// ready for `Engine::new_game`. Names compare without case or
/// underscores, so `whiteOceania` finds `white_oceania`.
pub fn by_name(map: &BoardMap, name: &str) -> Result<Vec<(Territory, Player, u32)>, ScenarioError> {
    let wanted: String = name
        .chars()
        .filter(|&c| c != '_')
        .map(|c| c.to_ascii_lowercase())
        .collect();
    let table = NAMES
        .iter()
        .find(|n| n.replace('_', "") == wanted)
        .and_then(|n| table(n))
        .ok_or_else(|| ScenarioError::UnknownScenario(name.to_string()))?;

    table
        .iter()
        .map(|&(territory, owner, armies)| {
            let t = map
                .territory(territory)
                .ok_or(ScenarioError::UnknownTerritory(territory))?;
            Ok((t, owner, armies))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::maps;
    use std::collections::HashSet;

    #[test]
    fn every_scenario_covers_the_classic_map() {
        let map = maps::classic();
        for name in NAMES {
            let placements = by_name(&map, name).unwrap();
            assert_eq!(placements.len(), 42, "{name}");
            let covered: HashSet<_> = placements.iter().map(|p| p.0).collect();
            assert_eq!(covered.len(), map.len(), "{name}");
            assert!(placements.iter().all(|p| p.2 > 0), "{name}");
        }
    }

    #[test]
    fn scenarios_are_fair_in_size() {
        let map = maps::classic();
        for name in NAMES {
            let mut territories = [0u32; 6];
            let mut armies = [0u32; 6];
            for (_, player, count) in by_name(&map, name).unwrap() {
                territories[player.index()] += 1;
                armies[player.index()] += count;
            }
            assert_eq!(territories, [7; 6], "{name}");
            assert_eq!(armies, [20; 6], "{name}");
        }
    }

    #[test]
    fn colour_swapped_pairs() {
        let map = maps::classic();
        let swap = |p: Player| match p {
            WHITE => BLACK,
            BLACK => WHITE,
            _ => p,
        };
        for (white, black) in [
            ("white_oceania", "black_oceania"),
            ("white_africa", "black_africa"),
            ("spread_out", "spread_out_black"),
            ("white_spread_out", "black_spread_out"),
            ("all_totalities_but_white", "all_totalities_but_black"),
        ] {
            let swapped: Vec<_> = by_name(&map, white)
                .unwrap()
                .into_iter()
                .map(|(t, p, n)| (t, swap(p), n))
                .collect();
            assert_eq!(swapped, by_name(&map, black).unwrap(), "{white}");
        }
    }

    #[test]
    fn names_resolve_loosely() {
        let map = maps::classic();
        assert_eq!(by_name(&map, "whiteOceania"), by_name(&map, "white_oceania"));
        assert_eq!(
            by_name(&map, "atlantis"),
            Err(ScenarioError::UnknownScenario("atlantis".into()))
        );
        assert_eq!(
            by_name(&maps::test01(), "spread_out"),
            Err(ScenarioError::UnknownTerritory("Afghanistan"))
        );
    }
}
