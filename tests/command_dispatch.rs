mod common;

use tempfile::TempDir;
use textquest::adventure::{CommandOutcome, Player};
use textquest::metrics;

use common::{controller, corridor, item, run};

#[test]
fn unknown_verb_changes_nothing() {
    let tmp = TempDir::new().unwrap();
    let mut game = controller(corridor(), Player::new("Hero", 10, 1), tmp.path());
    let before = (game.world().clone(), game.player().clone());
    let rejected_before = metrics::snapshot().commands_rejected;

    let text = run(&mut game, "dance");
    assert!(text.contains("I don't understand 'dance'"));
    assert_eq!((game.world().clone(), game.player().clone()), before);
    assert!(metrics::snapshot().commands_rejected > rejected_before);
}

#[test]
fn missing_argument_is_reported() {
    let tmp = TempDir::new().unwrap();
    let mut game = controller(corridor(), Player::new("Hero", 10, 1), tmp.path());
    assert_eq!(run(&mut game, "take"), "Take what?");
    assert_eq!(run(&mut game, "U"), "U what?");
}

#[test]
fn unresolvable_arguments_are_reported() {
    let tmp = TempDir::new().unwrap();
    let mut game = controller(corridor(), Player::new("Hero", 10, 1), tmp.path());
    assert_eq!(run(&mut game, "take ghost"), "There is no ghost here.");
    assert_eq!(run(&mut game, "drop ghost"), "You don't have ghost.");
    assert_eq!(run(&mut game, "use ghost"), "You don't have ghost.");
    assert_eq!(run(&mut game, "answer 42"), "There is nothing here to answer.");
}

#[test]
fn overlong_input_is_refused() {
    let tmp = TempDir::new().unwrap();
    let mut game = controller(corridor(), Player::new("Hero", 10, 1), tmp.path())
        .with_max_input_length(10);
    let text = run(&mut game, "take the extremely long thing");
    assert!(text.contains("too long"));
}

#[test]
fn names_match_loosely() {
    let tmp = TempDir::new().unwrap();
    let mut world = corridor();
    world.room_mut(1).unwrap().add_item(item("Rusty Key", 1, 1)).unwrap();
    let mut game = controller(world, Player::new("Hero", 10, 1), tmp.path());

    assert_eq!(run(&mut game, "take   rusty    KEY"), "You take the Rusty Key.");
    assert!(game.player().has_item("rusty key"));
}

#[test]
fn help_score_and_quit() {
    let tmp = TempDir::new().unwrap();
    let mut game = controller(corridor(), Player::new("Hero", 10, 1), tmp.path());

    assert!(run(&mut game, "h").contains("ANSWER (A) <text>"));
    assert_eq!(
        run(&mut game, "score"),
        "Hero: health 100/100, score 0, in South End."
    );
    assert_eq!(game.process("q"), CommandOutcome::Quit);
    assert_eq!(game.process("look"), CommandOutcome::Continue);
}

#[test]
fn blank_lines_are_ignored() {
    let tmp = TempDir::new().unwrap();
    let mut game = controller(corridor(), Player::new("Hero", 10, 1), tmp.path());
    assert_eq!(run(&mut game, "   "), "");
}
