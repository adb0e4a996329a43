use macroforge::{Action, WeightTable};

#[test]
fn test_new_table_is_all_zero() {
    let table = WeightTable::new();
    for prev in Action::ALL {
        for next in Action::ALL {
            assert_eq!(table.get(prev, next), 0.0);
        }
    }
}

#[test]
fn test_raise_keeps_the_maximum() {
    let mut table = WeightTable::new();
    table.raise(Action::BasicTouch, Action::StandardTouch, 0.5);
    assert_eq!(table.get(Action::BasicTouch, Action::StandardTouch), 0.5);

    table.raise(Action::BasicTouch, Action::StandardTouch, 0.25);
    assert_eq!(table.get(Action::BasicTouch, Action::StandardTouch), 0.5);

    table.raise(Action::BasicTouch, Action::StandardTouch, 0.75);
    assert_eq!(table.get(Action::BasicTouch, Action::StandardTouch), 0.75);
}

#[test]
fn test_save_and_load_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("weights.bin");

    let mut table = WeightTable::new();
    table.set(Action::MuscleMemory, Action::Veneration, 0.625);
    table.set(Action::Reflect, Action::PrudentTouch, 1.75);
    table.save(&path).unwrap();

    let mut loaded = WeightTable::new();
    assert!(loaded.load(&path).unwrap());
    assert_eq!(loaded.get(Action::MuscleMemory, Action::Veneration), 0.625);
    assert_eq!(loaded.get(Action::Reflect, Action::PrudentTouch), 1.75);
    assert_eq!(loaded.get(Action::BasicTouch, Action::BasicTouch), 0.0);
}

#[test]
fn test_missing_file_is_not_an_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.bin");

    let mut table = WeightTable::new();
    table.set(Action::Observe, Action::AdvancedTouch, 2.0);
    assert!(!table.load(&path).unwrap());
    // The table is left as it was.
    assert_eq!(table.get(Action::Observe, Action::AdvancedTouch), 2.0);
}
