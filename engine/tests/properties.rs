use adventure_engine::{
    AttributePool, BinaryOracle, Character, Draw, OptionPair, ScriptedSource, option_pair,
};
use indexmap::IndexMap;
use proptest::prelude::*;

fn any_draw() -> impl Strategy<Value = Draw> {
    prop_oneof![Just(Draw::First), Just(Draw::Second)]
}

fn any_label_pair() -> impl Strategy<Value = (&'static str, &'static str)> {
    prop_oneof![Just(("A", "B")), Just(("yes", "no")), Just(("High", "Low"))]
}

proptest! {
    #[test]
    fn resolve_returns_an_entry_from_the_drawn_row(
        draw in any_draw(),
        (first, second) in any_label_pair(),
        swap in any::<bool>(),
        a_text in ".*",
        b_text in ".*",
    ) {
        let mut entries = vec![
            (first.to_string(), a_text.clone()),
            (second.to_string(), b_text.clone()),
        ];
        if swap {
            entries.reverse();
        }
        let options: OptionPair = entries.into_iter().collect();

        let mut oracle = BinaryOracle::new(ScriptedSource::always(draw));
        let res = oracle.resolve_outcome(&options).unwrap();

        let row = BinaryOracle::<ScriptedSource>::label_table()[draw.index()];
        prop_assert!(row.contains(&res.key.to_ascii_uppercase().as_str()));
        prop_assert_eq!(options.get(res.key).map(String::as_str), Some(res.text));
        let expected = if draw == Draw::First { &a_text } else { &b_text };
        prop_assert_eq!(res.text, expected.as_str());
    }

    #[test]
    fn a_b_pairs_never_fail(draw in any_draw()) {
        let mut oracle = BinaryOracle::new(ScriptedSource::always(draw));
        prop_assert!(oracle.resolve_outcome(&option_pair("a", "b")).is_ok());
    }

    #[test]
    fn empty_options_always_fail(draw in any_draw()) {
        let mut oracle = BinaryOracle::new(ScriptedSource::always(draw));
        prop_assert!(oracle.resolve_outcome(&IndexMap::new()).is_err());
    }

    #[test]
    fn decrementing_never_goes_negative(deltas in prop::collection::vec(0i64..50, 0..40)) {
        let pool = AttributePool::new();
        let mut oracle = BinaryOracle::new(ScriptedSource::always(Draw::First));
        let mut c = Character::generate(&mut oracle, &pool, "teddy", 0).unwrap();
        for (i, delta) in deltas.into_iter().enumerate() {
            let total = if i % 2 == 0 {
                c.increment_points(delta)
            } else {
                c.decrement_points(delta)
            };
            prop_assert!(total >= 0);
            prop_assert_eq!(total, c.points());
        }
    }

    #[test]
    fn oversized_requests_always_fail(size in 0usize..6, extra in 1usize..4) {
        let pool = AttributePool::with_names((0..size).map(|i| format!("attr{i}")));
        let mut oracle = BinaryOracle::new(ScriptedSource::always(Draw::Second));
        prop_assert!(Character::generate(&mut oracle, &pool, "teddy", size + extra).is_err());
        prop_assert!(Character::generate(&mut oracle, &pool, "teddy", size).is_ok());
    }
}
