use assert_float_eq::assert_float_absolute_eq;

use meal_battle_rs::battle::BattleArena;
use meal_battle_rs::kitchen::{KitchenConfig, MealCatalog};
use meal_battle_rs::models::Meal;
use meal_battle_rs::random::FixedRandom;
use meal_battle_rs::MealError;

fn catalog_with_reference_meals() -> (MealCatalog, Meal, Meal) {
    let catalog = MealCatalog::open_in_memory().unwrap();
    catalog.clear_meals(&KitchenConfig::default()).unwrap();

    let spaghetti = catalog
        .create_meal("Spaghetti Bolognese", "Italian", 14.5, "MED")
        .unwrap();
    let burrito = catalog
        .create_meal("Bean Burrito", "Mexican", 9.75, "LOW")
        .unwrap();
    (catalog, spaghetti, burrito)
}

#[test]
fn test_reference_battle_scores() {
    let (_, spaghetti, burrito) = catalog_with_reference_meals();
    let arena = BattleArena::new();

    assert_float_absolute_eq!(arena.get_battle_score(&spaghetti), 99.5, 1e-9);
    assert_float_absolute_eq!(arena.get_battle_score(&burrito), 65.25, 1e-9);
}

#[test]
fn test_battle_persists_winner_and_loser_stats() {
    let (mut catalog, spaghetti, burrito) = catalog_with_reference_meals();

    let mut arena = BattleArena::new();
    arena.prep_combatant(spaghetti.clone()).unwrap();
    arena.prep_combatant(burrito.clone()).unwrap();

    let winner = arena.battle(&FixedRandom(0.1), &mut catalog).unwrap();
    assert_eq!(winner, "Spaghetti Bolognese");

    let stored_winner = catalog.get_meal_by_id(spaghetti.id).unwrap();
    assert_eq!(stored_winner.battles, 1);
    assert_eq!(stored_winner.wins, 1);

    let stored_loser = catalog.get_meal_by_id(burrito.id).unwrap();
    assert_eq!(stored_loser.battles, 1);
    assert_eq!(stored_loser.wins, 0);

    // Only the winner remains staged.
    assert_eq!(arena.get_combatants().len(), 1);
    assert_eq!(arena.get_combatants()[0].name, "Spaghetti Bolognese");
}

#[test]
fn test_draw_value_flips_the_outcome() {
    let (mut catalog, spaghetti, burrito) = catalog_with_reference_meals();

    let mut arena = BattleArena::new();
    arena.prep_combatant(spaghetti.clone()).unwrap();
    arena.prep_combatant(burrito.clone()).unwrap();
    let winner_low_draw = arena.battle(&FixedRandom(0.1), &mut catalog).unwrap();
    assert_eq!(winner_low_draw, spaghetti.name);

    arena.clear_combatants();
    arena.prep_combatant(spaghetti.clone()).unwrap();
    arena.prep_combatant(burrito.clone()).unwrap();
    let winner_high_draw = arena.battle(&FixedRandom(0.9), &mut catalog).unwrap();
    assert_eq!(winner_high_draw, burrito.name);

    // Two battles each, one win apiece.
    let spaghetti = catalog.get_meal_by_id(spaghetti.id).unwrap();
    let burrito = catalog.get_meal_by_id(burrito.id).unwrap();
    assert_eq!((spaghetti.battles, spaghetti.wins), (2, 1));
    assert_eq!((burrito.battles, burrito.wins), (2, 1));
}

#[test]
fn test_battles_feed_the_leaderboard() {
    let (mut catalog, spaghetti, burrito) = catalog_with_reference_meals();

    let mut arena = BattleArena::new();
    for draw in [0.1, 0.1, 0.9] {
        arena.clear_combatants();
        arena.prep_combatant(spaghetti.clone()).unwrap();
        arena.prep_combatant(burrito.clone()).unwrap();
        arena.battle(&FixedRandom(draw), &mut catalog).unwrap();
    }

    let leaderboard = catalog.get_leaderboard("wins").unwrap();
    assert_eq!(leaderboard[0].name, "Spaghetti Bolognese");
    assert_eq!(leaderboard[0].wins, 2);
    assert_eq!(leaderboard[0].win_pct, 66.7);
    assert_eq!(leaderboard[1].name, "Bean Burrito");
    assert_eq!(leaderboard[1].wins, 1);
    assert_eq!(leaderboard[1].win_pct, 33.3);
}

#[test]
fn test_battle_against_deleted_loser_applies_partial_update() {
    let (mut catalog, spaghetti, burrito) = catalog_with_reference_meals();

    let mut arena = BattleArena::new();
    arena.prep_combatant(spaghetti.clone()).unwrap();
    arena.prep_combatant(burrito.clone()).unwrap();

    // The loser disappears from the catalog between prep and battle.
    catalog.delete_meal(burrito.id).unwrap();

    let err = arena.battle(&FixedRandom(0.1), &mut catalog).unwrap_err();
    assert!(matches!(err, MealError::IdDeleted(id) if id == burrito.id));

    // The winner's stats were already recorded and the loser already
    // left the arena; callers must treat a failed battle as possibly
    // partially applied.
    let stored_winner = catalog.get_meal_by_id(spaghetti.id).unwrap();
    assert_eq!((stored_winner.battles, stored_winner.wins), (1, 1));
    assert_eq!(arena.get_combatants().len(), 1);
}
