use std::collections::HashSet;

use adventure_engine::{
    AttributePool, BinaryOracle, Character, CharacterError, Draw, Level, ScriptedSource,
    SeededSource,
};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

fn speed_pool() -> AttributePool {
    AttributePool::with_names(["Speed"])
}

fn oracle(draw: Draw) -> BinaryOracle<ScriptedSource> {
    BinaryOracle::new(ScriptedSource::always(draw))
}

#[test]
fn new_character_has_name_and_no_points() {
    let pool = speed_pool();
    let c = Character::generate(&mut oracle(Draw::First), &pool, "apple", 1).unwrap();
    assert_eq!(c.name(), "apple");
    assert_eq!(c.points(), 0);
    assert_eq!(c.attributes().len(), 1);
}

#[test]
fn zero_attributes_is_allowed() {
    let pool = speed_pool();
    let c = Character::generate(&mut oracle(Draw::First), &pool, "teddy", 0).unwrap();
    assert!(c.attributes().is_empty());
}

#[test]
fn oracle_decides_starting_level() {
    let pool = speed_pool();
    let high = Character::generate(&mut oracle(Draw::First), &pool, "teddy", 1).unwrap();
    assert_eq!(high.level("Speed"), Ok(Level::High));
    let low = Character::generate(&mut oracle(Draw::Second), &pool, "teddy", 1).unwrap();
    assert_eq!(low.level("Speed"), Ok(Level::Low));
}

#[test]
fn increment_attribute_is_idempotent_at_high() {
    let pool = speed_pool();
    let mut c = Character::generate(&mut oracle(Draw::Second), &pool, "teddy", 1).unwrap();
    assert_eq!(c.increment_attribute("Speed"), Ok(true));
    assert_eq!(c.level("Speed"), Ok(Level::High));
    assert_eq!(c.increment_attribute("Speed"), Ok(false));
    assert_eq!(c.level("Speed"), Ok(Level::High));
}

#[test]
fn decrement_attribute_is_idempotent_at_low() {
    let pool = speed_pool();
    let mut c = Character::generate(&mut oracle(Draw::First), &pool, "teddy", 1).unwrap();
    assert_eq!(c.decrement_attribute("Speed"), Ok(true));
    assert_eq!(c.level("Speed"), Ok(Level::Low));
    assert_eq!(c.decrement_attribute("Speed"), Ok(false));
}

#[test]
fn unknown_attribute_is_an_error() {
    let pool = speed_pool();
    let mut c = Character::generate(&mut oracle(Draw::First), &pool, "teddy", 0).unwrap();
    let expected = CharacterError::UnknownAttribute {
        character: "teddy".into(),
        attribute: "dne".into(),
    };
    assert_eq!(c.increment_attribute("dne"), Err(expected.clone()));
    assert_eq!(c.decrement_attribute("dne"), Err(expected));
    assert!(c.decrement_attribute("Speed").is_err());
}

#[test]
fn cannot_sample_more_than_the_pool() {
    let pool = speed_pool();
    let err = Character::generate(&mut oracle(Draw::First), &pool, "teddy", 2).unwrap_err();
    assert_eq!(
        err,
        CharacterError::NotEnoughAttributes {
            requested: 2,
            available: 1
        }
    );
}

#[test]
fn whole_pool_is_selected_when_requested() {
    let pool = AttributePool::with_names(["Speed", "Morality", "Toughness", "Luck"]);
    let mut oracle = BinaryOracle::new(SeededSource::from_seed(9));
    let c = Character::generate(&mut oracle, &pool, "Brian", pool.len()).unwrap();
    let got: HashSet<&str> = c.attributes().keys().map(String::as_str).collect();
    let want: HashSet<&str> = pool.iter().collect();
    assert_eq!(got, want);
}

#[test]
fn sampled_attributes_are_distinct_pool_members() {
    let pool = AttributePool::with_names(["Speed", "Morality", "Toughness", "Luck", "Wit"]);
    let mut rng = ChaCha8Rng::seed_from_u64(3);
    for seed in 0..20 {
        let mut oracle = BinaryOracle::new(SeededSource::from_seed(seed));
        let c = Character::generate_with_rng(&mut oracle, &pool, "Brian", 3, &mut rng).unwrap();
        assert_eq!(c.attributes().len(), 3);
        assert!(c.attributes().keys().all(|k| pool.contains(k)));
    }
}

#[test]
fn top_up_keeps_existing_attributes() {
    let mut pool = speed_pool();
    let mut c = Character::generate(&mut oracle(Draw::Second), &pool, "teddy", 1).unwrap();
    pool.register("Speed2");
    c.top_up_attributes(&mut oracle(Draw::First), &pool, 2).unwrap();
    assert_eq!(c.name(), "teddy");
    assert_eq!(c.level("Speed"), Ok(Level::Low));
    assert_eq!(c.level("Speed2"), Ok(Level::High));
}

#[test]
fn top_up_rejects_oversized_requests() {
    let pool = speed_pool();
    let mut c = Character::generate(&mut oracle(Draw::First), &pool, "teddy", 1).unwrap();
    assert!(matches!(
        c.top_up_attributes(&mut oracle(Draw::First), &pool, 2),
        Err(CharacterError::NotEnoughAttributes { .. })
    ));
}

#[test]
fn clearing_the_pool_does_not_touch_existing_characters() {
    let mut pool = AttributePool::with_names(["Speed", "Morality"]);
    let c = Character::generate(&mut oracle(Draw::First), &pool, "teddy", 2).unwrap();
    pool.clear();
    assert_eq!(c.attributes().len(), 2);
    assert!(Character::generate(&mut oracle(Draw::First), &pool, "eddy", 1).is_err());
}

#[test]
fn points_increment_and_decrement() {
    let pool = speed_pool();
    let mut c = Character::generate(&mut oracle(Draw::First), &pool, "teddy", 0).unwrap();
    assert_eq!(c.increment_points(10), 10);
    assert_eq!(c.increment_points(-10), 0);
    assert_eq!(c.decrement_points(10), 0);
    assert_eq!(c.points(), 0);
    c.increment_points(5);
    assert_eq!(c.decrement_points(2), 3);
}
