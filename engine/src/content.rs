use indexmap::IndexMap;

use crate::Level;
use crate::challenge::Challenge;
use crate::oracle::{OptionPair, option_pair};

pub fn default_attributes() -> Vec<&'static str> {
    vec!["Speed", "Morality", "Toughness"]
}

/// Catching a departing bus; tests Speed against a HIGH threat.
pub fn bus_challenge() -> Challenge {
    Challenge::new(
        "bus_challenge",
        "You are attempting to catch the bus, but you are late, and it is pulling away from the stop.",
        "Speed",
        Level::High,
        "seat_challenge",
        "_done",
        vec![
            option_pair(
                "You run as fast as you can, and you almost catch up to the bus.",
                "You run as fast as you can, but you can't seem to gain any ground catching up to the bus.",
            ),
            option_pair(
                "You run with all of your might, and the driver sees you in the mirror waving, and lets you on.",
                "You step in a puddle and it slows you down.",
            ),
            option_pair(
                "The bus pulls over out of pity and lets you on.",
                "You couldn't catch up, the bus drives away.",
            ),
        ],
        vec![
            option_pair(
                "The bus is pulling away, but you are pretty fast and easily catch it.",
                "The bus is pulling away, and even though you are pretty fast, you can't seem to catch up.",
            ),
            option_pair(
                "Although harder than you expected, you put your head down and eventually catch up to the bus, getting on.",
                "You are surprised to find you are not as fast as you once were.",
            ),
        ],
        vec![
            b_first(
                "The bus is pulling away, and even though you are pretty slow, you seem to gain ground.",
                "The bus is pulling away, and you are far too slow to really catch it, and it drives out of sight.",
            ),
            b_first(
                "By some miracle, you actually flag down the driver to stop, and get on.",
                "But try as you might, it eventually gets away.",
            ),
        ],
    )
}

// Order only matters for which key is scanned first.
fn b_first(a: &str, b: &str) -> OptionPair {
    IndexMap::from([("B".to_string(), b.to_string()), ("A".to_string(), a.to_string())])
}
