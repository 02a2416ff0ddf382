//! Command parsing and the turn loop.
//!
//! [`parse_command`] turns one line of input into a [`GameCommand`].
//! [`GameController`] owns the world and player, applies commands to them and
//! reports everything the player should see through an [`OutputSink`].
//!
//! One command is processed to completion before the next is accepted.
//! Mistakes (unknown verbs, missing arguments, weight limits, wrong answers)
//! are reported as text and never returned as errors.

use log::{debug, info, warn};
use uuid::Uuid;

use crate::adventure::entity::{names_match, Entity, Valuable, Weighted};
use crate::adventure::errors::AdventureError;
use crate::adventure::item::Item;
use crate::adventure::output::OutputSink;
use crate::adventure::player::{Player, MAX_HEALTH};
use crate::adventure::problem::{SolveOutcome, Submission};
use crate::adventure::room::{Direction, ExitState, Room, RoomEntity};
use crate::adventure::storage::GameStore;
use crate::adventure::world::{GameWorld, MoveOutcome};
use crate::logutil::escape_log;
use crate::metrics;
use crate::validation::sanitize_command;

/// Parsed player command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameCommand {
    Move(Direction),  // N, S, E, W, MOVE <dir>
    Take(String),     // T item
    Drop(String),     // D item
    Examine(String),  // X thing
    Use(String),      // U item
    Answer(String),   // A text
    Look,             // L
    Inventory,        // I
    Score,            // SCORE
    Help,             // H
    Save,             // SAVE
    Restore,          // RESTORE
    Quit,             // Q
    /// A verb that needs an argument was given none. Holds the verb as typed.
    MissingArgument(String),
    Invalid(String),
    Empty,
}

/// Parse one sanitized input line. The verb is case-insensitive; the
/// argument keeps its original case so answers compare exactly.
pub fn parse_command(input: &str) -> GameCommand {
    let input = input.trim();
    let (verb, rest) = match input.split_once(char::is_whitespace) {
        Some((verb, rest)) => (verb, rest.trim()),
        None => (input, ""),
    };
    if verb.is_empty() {
        return GameCommand::Empty;
    }
    let arg = (!rest.is_empty()).then(|| rest.to_string());
    let upper = verb.to_uppercase();

    let needs = |build: fn(String) -> GameCommand| match arg.clone() {
        Some(arg) => build(arg),
        None => GameCommand::MissingArgument(upper.clone()),
    };

    match upper.as_str() {
        "N" | "NORTH" => GameCommand::Move(Direction::North),
        "S" | "SOUTH" => GameCommand::Move(Direction::South),
        "E" | "EAST" => GameCommand::Move(Direction::East),
        "W" | "WEST" => GameCommand::Move(Direction::West),
        "M" | "MOVE" | "GO" => match arg.as_deref() {
            None => GameCommand::MissingArgument(upper.clone()),
            Some(dir) => Direction::parse(dir)
                .map(GameCommand::Move)
                .unwrap_or_else(|| GameCommand::Invalid(input.to_string())),
        },

        "T" | "TAKE" | "GET" => needs(GameCommand::Take),
        "D" | "DROP" => needs(GameCommand::Drop),
        "X" | "EXAMINE" => needs(GameCommand::Examine),
        "U" | "USE" => needs(GameCommand::Use),
        "A" | "ANSWER" => needs(GameCommand::Answer),

        "L" | "LOOK" => GameCommand::Look,
        "I" | "INV" | "INVENTORY" => GameCommand::Inventory,
        "SCORE" => GameCommand::Score,
        "H" | "HELP" | "?" => GameCommand::Help,
        "SAVE" => GameCommand::Save,
        "RESTORE" | "LOAD" => GameCommand::Restore,
        "Q" | "QUIT" | "EXIT" => GameCommand::Quit,

        _ => GameCommand::Invalid(input.to_string()),
    }
}

const HELP_TEXT: &str = "Commands:
  N S E W / MOVE <dir>   walk in a direction
  LOOK (L)               describe your surroundings
  TAKE (T) <item>        pick something up
  DROP (D) <item>        put something down
  EXAMINE (X) <thing>    look closely at something
  USE (U) <item>         use something you carry
  ANSWER (A) <text>      answer a puzzle
  INVENTORY (I)          list what you carry
  SCORE                  show health and score
  SAVE / RESTORE         save or reload the game
  HELP (H)               this list
  QUIT (Q)               leave the game";

/// Whether the session should keep reading input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandOutcome {
    Continue,
    Quit,
}

/// How a handled command affects the turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Turn {
    /// Read-only command; the world does not react.
    Idle,
    /// The turn passed; a hostile monster in the room may strike.
    Ended,
    /// The command could not be carried out.
    Failed,
}

pub struct GameController<O: OutputSink> {
    world: GameWorld,
    player: Player,
    store: GameStore,
    output: O,
    session_id: Uuid,
    max_input_length: usize,
    game_over: bool,
}

impl<O: OutputSink> GameController<O> {
    pub fn new(world: GameWorld, player: Player, store: GameStore, output: O) -> Self {
        let session_id = Uuid::new_v4();
        info!(
            "[{}] session for {} in world '{}' ({} rooms)",
            session_id,
            escape_log(player.name()),
            escape_log(world.name()),
            world.room_count()
        );
        Self {
            game_over: !player.is_alive(),
            world,
            player,
            store,
            output,
            session_id,
            max_input_length: 120,
        }
    }

    /// Start a fresh game in the world's lowest-numbered room.
    pub fn new_game(
        world: GameWorld,
        name: &str,
        max_weight: i32,
        health: i32,
        store: GameStore,
        output: O,
    ) -> Result<Self, AdventureError> {
        let start = world
            .starting_room()
            .ok_or_else(|| AdventureError::InvalidData("world has no rooms".to_string()))?;
        let player = Player::new(name, max_weight, start).with_health(health);
        Ok(Self::new(world, player, store, output))
    }

    pub fn with_max_input_length(mut self, max: usize) -> Self {
        self.max_input_length = max;
        self
    }

    pub fn world(&self) -> &GameWorld {
        &self.world
    }

    pub fn player(&self) -> &Player {
        &self.player
    }

    pub fn store(&self) -> &GameStore {
        &self.store
    }

    pub fn output(&self) -> &O {
        &self.output
    }

    pub fn output_mut(&mut self) -> &mut O {
        &mut self.output
    }

    pub fn session_id(&self) -> Uuid {
        self.session_id
    }

    /// True once the player has died and until a restore brings them back.
    pub fn is_over(&self) -> bool {
        self.game_over
    }

    /// Greet the player and describe the starting room.
    pub fn intro(&mut self) {
        let greeting = format!(
            "Welcome to {}, {}. Type HELP for a list of commands.",
            self.world.name(),
            self.player.name()
        );
        self.emit(&greeting);
        self.look();
    }

    /// Handle one line of raw input.
    pub fn process(&mut self, line: &str) -> CommandOutcome {
        let line = match sanitize_command(line, self.max_input_length) {
            Ok(line) => line,
            Err(e) => {
                metrics::inc_commands_rejected();
                debug!("[{}] input refused: {}", self.session_id, e);
                self.emit(&e.to_string());
                return CommandOutcome::Continue;
            }
        };

        let command = parse_command(&line);
        if command == GameCommand::Empty {
            return CommandOutcome::Continue;
        }
        debug!(
            "[{}] '{}' -> {:?}",
            self.session_id,
            escape_log(&line),
            command
        );
        metrics::inc_commands_processed();

        if self.game_over
            && !matches!(
                command,
                GameCommand::Restore | GameCommand::Quit | GameCommand::Help
            )
        {
            self.emit("You are dead. RESTORE a saved game or QUIT.");
            return CommandOutcome::Continue;
        }

        let turn = match command {
            GameCommand::Move(direction) => self.move_player(direction),
            GameCommand::Take(name) => self.take(&name),
            GameCommand::Drop(name) => self.drop_item(&name),
            GameCommand::Examine(name) => self.examine(&name),
            GameCommand::Use(name) => self.use_item(&name),
            GameCommand::Answer(text) => self.answer(&text),
            GameCommand::Look => {
                self.look();
                Turn::Idle
            }
            GameCommand::Inventory => self.inventory(),
            GameCommand::Score => self.score(),
            GameCommand::Help => {
                self.emit(HELP_TEXT);
                Turn::Idle
            }
            GameCommand::Save => self.save(),
            GameCommand::Restore => self.restore(),
            GameCommand::Quit => {
                info!("[{}] player quit", self.session_id);
                self.emit("Goodbye.");
                return CommandOutcome::Quit;
            }
            GameCommand::MissingArgument(verb) => {
                self.emit(&format!("{} what?", capitalize(&verb)));
                Turn::Failed
            }
            GameCommand::Invalid(text) => {
                self.emit(&format!(
                    "I don't understand '{}'. Type HELP for a list of commands.",
                    text
                ));
                Turn::Failed
            }
            GameCommand::Empty => Turn::Idle,
        };

        match turn {
            Turn::Ended => self.monster_turn(),
            Turn::Failed => metrics::inc_commands_rejected(),
            Turn::Idle => {}
        }
        CommandOutcome::Continue
    }

    fn emit(&mut self, text: &str) {
        self.output.emit(text);
    }

    fn current_room(&self) -> Option<&Room> {
        self.world.room(self.player.room_number())
    }

    // ------------------------------------------------------------------
    // Handlers
    // ------------------------------------------------------------------

    fn move_player(&mut self, direction: Direction) -> Turn {
        let from = self.player.room_number();
        match self.world.destination(from, direction) {
            MoveOutcome::NoExit => {
                self.emit(&format!("You can't go {} from here.", direction));
                Turn::Failed
            }
            MoveOutcome::Blocked(to) => {
                debug!(
                    "[{}] blocked {} from {} towards {}",
                    self.session_id, direction, from, to
                );
                let message = self
                    .current_room()
                    .and_then(Room::active_problem)
                    .map(|p| p.description().to_string())
                    .unwrap_or_else(|| "The way is blocked.".to_string());
                self.emit(&message);
                Turn::Failed
            }
            MoveOutcome::Moved(to) => {
                self.player.move_to(to);
                debug!("[{}] moved {} from {} to {}", self.session_id, direction, from, to);
                self.look();
                Turn::Ended
            }
        }
    }

    fn take(&mut self, name: &str) -> Turn {
        let room_number = self.player.room_number();
        let Some(room) = self.world.room_mut(room_number) else {
            self.output.emit("There is nothing here.");
            return Turn::Failed;
        };

        let item = match room.entity_named(name) {
            None => {
                self.output.emit(&format!("There is no {} here.", name));
                return Turn::Failed;
            }
            Some(RoomEntity::Fixture(fixture)) => {
                self.output
                    .emit(&format!("The {} won't budge.", fixture.name()));
                return Turn::Failed;
            }
            Some(RoomEntity::Item(_)) => match room.take_item(name) {
                Some(item) => item,
                None => return Turn::Failed,
            },
        };

        let item_name = item.name().to_string();
        match self.player.add_item(item) {
            Ok(()) => {
                debug!(
                    "[{}] took {} (weight now {})",
                    self.session_id,
                    escape_log(&item_name),
                    self.player.current_weight()
                );
                self.output.emit(&format!("You take the {}.", item_name));
                Turn::Ended
            }
            Err(item) => {
                let message = if self.player.has_item(item.name()) {
                    format!("You already carry a {}.", item_name)
                } else {
                    format!(
                        "The {} is too heavy. You are carrying {} of {}.",
                        item_name,
                        self.player.current_weight(),
                        self.player.max_weight()
                    )
                };
                // room slot was just vacated, so this cannot collide
                let _ = room.add_item(item);
                self.output.emit(&message);
                Turn::Failed
            }
        }
    }

    fn drop_item(&mut self, name: &str) -> Turn {
        let Some(item) = self.player.remove_item(name) else {
            self.emit(&format!("You don't have {}.", name));
            return Turn::Failed;
        };
        let item_name = item.name().to_string();
        let room_number = self.player.room_number();

        let rejected = match self.world.room_mut(room_number) {
            Some(room) => room.add_item(item).err(),
            None => Some(item),
        };
        if let Some(item) = rejected {
            let _ = self.player.restore_item(item);
            self.emit(&format!("There is already a {} here.", item_name));
            return Turn::Failed;
        }

        self.emit(&format!("You drop the {}.", item_name));
        Turn::Ended
    }

    fn examine(&mut self, name: &str) -> Turn {
        let description = self
            .current_room()
            .and_then(|room| {
                if let Some(entity) = room.entity_named(name) {
                    return Some(match entity {
                        RoomEntity::Item(item) => describe_item(item),
                        RoomEntity::Fixture(fixture) => format!(
                            "{} (weight {})",
                            fixture.description(),
                            fixture.weight()
                        ),
                    });
                }
                room.problem()
                    .filter(|p| names_match(name, p.name()))
                    .map(|p| p.description().to_string())
            })
            .or_else(|| self.player.item(name).map(describe_item));

        match description {
            Some(text) => {
                self.emit(&text);
                Turn::Idle
            }
            None => {
                self.emit(&format!("You see no {} here.", name));
                Turn::Failed
            }
        }
    }

    fn use_item(&mut self, name: &str) -> Turn {
        let room_number = self.player.room_number();
        let Some(item) = self.player.item(name) else {
            self.emit(&format!("You don't have {}.", name));
            return Turn::Failed;
        };
        if item.is_spent() {
            let message = format!("The {} has no uses left.", item.name());
            self.emit(&message);
            return Turn::Failed;
        }

        // Judge the submission before the use is spent: the last use of an
        // item still counts.
        let verdict = self
            .world
            .room(room_number)
            .and_then(Room::problem)
            .map(|problem| (problem.solve(Submission::Item(item)), problem.is_monster()));

        let Some(item) = self.player.item_mut(name) else {
            return Turn::Failed;
        };
        if !item.use_item() {
            return Turn::Failed;
        }
        let item_name = item.name().to_string();
        let used_text = if item.when_used().trim().is_empty() {
            format!("You use the {}.", item_name)
        } else {
            item.when_used().to_string()
        };
        debug!(
            "[{}] used {} ({} uses left)",
            self.session_id,
            escape_log(&item_name),
            item.remaining_uses()
        );
        self.emit(&used_text);

        match verdict {
            Some((SolveOutcome::Solved, _)) => self.resolve_problem(room_number),
            Some((SolveOutcome::Rejected, true)) => {
                self.emit("It has no effect on the creature.");
            }
            Some((SolveOutcome::Rejected, false)) | Some((SolveOutcome::Inert, _)) | None => {}
        }
        Turn::Ended
    }

    fn answer(&mut self, text: &str) -> Turn {
        let room_number = self.player.room_number();
        let Some(problem) = self.world.room(room_number).and_then(Room::problem) else {
            self.emit("There is nothing here to answer.");
            return Turn::Failed;
        };
        let is_monster = problem.is_monster();
        let problem_name = problem.name().to_string();

        match problem.solve(Submission::Text(text)) {
            SolveOutcome::Inert => {
                self.emit(&format!("The {} has already been dealt with.", problem_name));
                Turn::Idle
            }
            SolveOutcome::Solved => {
                self.resolve_problem(room_number);
                Turn::Idle
            }
            SolveOutcome::Rejected => {
                debug!(
                    "[{}] wrong answer '{}' for {}",
                    self.session_id,
                    escape_log(text),
                    escape_log(&problem_name)
                );
                self.emit("That is not the answer.");
                if is_monster {
                    Turn::Ended
                } else {
                    Turn::Failed
                }
            }
        }
    }

    /// Apply every consequence of solving the problem in `room_number`:
    /// mark it solved, award its value and open the target's locked exits.
    fn resolve_problem(&mut self, room_number: i32) {
        let Some(problem) = self
            .world
            .room_mut(room_number)
            .and_then(Room::problem_mut)
        else {
            return;
        };
        problem.mark_solved();
        let name = problem.name().to_string();
        let value = problem.value();
        let effects = problem.effects().to_string();
        let affects_target = problem.affects_target();
        let target = problem.target().to_string();

        self.player.add_score(value);
        metrics::inc_problems_solved();
        info!(
            "[{}] {} solved {} (+{} points, score {})",
            self.session_id,
            escape_log(self.player.name()),
            escape_log(&name),
            value,
            self.player.score()
        );

        if effects.trim().is_empty() {
            self.emit(&format!("You have dealt with the {}.", name));
        } else {
            self.emit(&effects);
        }
        if value != 0 {
            self.emit(&format!("(+{} points)", value));
        }

        if !affects_target {
            return;
        }
        let target_room = self.world.resolve_target(&target).unwrap_or(room_number);
        let Some(room) = self.world.room_mut(target_room) else {
            warn!("[{}] problem target room {} is missing", self.session_id, target_room);
            return;
        };
        let opened: Vec<Direction> = room
            .blocked_directions()
            .into_iter()
            .filter(|d| room.unlock_exit(*d))
            .collect();
        if opened.is_empty() {
            return;
        }
        debug!(
            "[{}] unlocked {:?} in room {}",
            self.session_id, opened, target_room
        );
        let directions = opened
            .iter()
            .map(Direction::to_string)
            .collect::<Vec<_>>()
            .join(" and ");
        if target_room == room_number {
            self.emit(&format!("The way {} is now open.", directions));
        } else {
            self.emit(&format!("Somewhere, a way {} opens.", directions));
        }
    }

    fn look(&mut self) {
        let Some(room) = self.current_room() else {
            self.emit("You are nowhere at all.");
            return;
        };

        let mut lines = vec![format!("== {} ==", room.name()), room.description().to_string()];
        if let Some(problem) = room.problem() {
            if problem.is_active() {
                lines.push(problem.description().to_string());
            } else if !problem.effects().trim().is_empty() {
                lines.push(problem.effects().to_string());
            }
        }

        let items = room.items();
        if !items.is_empty() {
            let names: Vec<&str> = items.iter().map(|i| i.name()).collect();
            lines.push(format!("You see: {}", names.join(", ")));
        }
        let fixtures = room.fixtures();
        if !fixtures.is_empty() {
            let names: Vec<&str> = fixtures.iter().map(|f| f.name()).collect();
            lines.push(format!("Here: {}", names.join(", ")));
        }

        let exits: Vec<String> = room
            .exit_directions()
            .into_iter()
            .map(|d| match room.exit(d) {
                ExitState::Blocked(_) => format!("{} (blocked)", d),
                _ => d.to_string(),
            })
            .collect();
        if exits.is_empty() {
            lines.push("There are no exits.".to_string());
        } else {
            lines.push(format!("Exits: {}", exits.join(", ")));
        }

        let text = lines.join("\n");
        self.emit(&text);
    }

    fn inventory(&mut self) -> Turn {
        let held: Vec<String> = self
            .player
            .inventory()
            .iter()
            .map(|item| format!("{} ({})", item.name(), item.weight()))
            .collect();
        let mut text = if held.is_empty() {
            "You are empty-handed.".to_string()
        } else {
            format!("You are carrying: {}", held.join(", "))
        };
        text.push_str(&format!(
            "\nWeight: {}/{}",
            self.player.current_weight(),
            self.player.max_weight()
        ));
        self.emit(&text);
        Turn::Idle
    }

    fn score(&mut self) -> Turn {
        let location = self
            .current_room()
            .map(|room| room.name().to_string())
            .unwrap_or_else(|| "nowhere".to_string());
        let text = format!(
            "{}: health {}/{}, score {}, in {}.",
            self.player.name(),
            self.player.health(),
            MAX_HEALTH,
            self.player.score(),
            location
        );
        self.emit(&text);
        Turn::Idle
    }

    fn save(&mut self) -> Turn {
        match self.store.save(&self.world, &self.player) {
            Ok(saved_at) => {
                metrics::inc_games_saved();
                self.emit(&format!(
                    "Game saved ({}).",
                    saved_at.format("%Y-%m-%d %H:%M:%S UTC")
                ));
                Turn::Idle
            }
            Err(e) => {
                warn!("[{}] save failed: {}", self.session_id, e);
                self.emit(&format!("Save failed: {}", e));
                Turn::Failed
            }
        }
    }

    /// Swap in the saved world and player. On failure nothing changes.
    fn restore(&mut self) -> Turn {
        match self.store.load() {
            Ok((world, player)) => {
                self.world = world;
                self.player = player;
                self.game_over = !self.player.is_alive();
                metrics::inc_games_restored();
                info!(
                    "[{}] restored game from {}",
                    self.session_id,
                    self.store.path().display()
                );
                self.emit("Game restored.");
                self.look();
                Turn::Idle
            }
            Err(e) => {
                warn!("[{}] restore failed: {}", self.session_id, e);
                self.emit(&format!("Restore failed: {}", e));
                Turn::Failed
            }
        }
    }

    /// A hostile monster in the player's room strikes once.
    fn monster_turn(&mut self) {
        let Some(problem) = self
            .world
            .room(self.player.room_number())
            .and_then(Room::active_problem)
            .filter(|p| p.is_hostile())
        else {
            return;
        };
        let Some(damage) = problem.attack(&mut self.player) else {
            return;
        };
        let attack_text = problem
            .monster_traits()
            .map(|t| t.attack.trim().to_string())
            .filter(|t| !t.is_empty())
            .unwrap_or_else(|| format!("The {} attacks!", problem.name()));
        metrics::inc_monster_attacks();
        debug!(
            "[{}] {} hit for {} (health {})",
            self.session_id,
            escape_log(problem.name()),
            damage,
            self.player.health()
        );

        self.output.emit(&format!(
            "{} You lose {} health ({} left).",
            attack_text,
            damage,
            self.player.health()
        ));

        if !self.player.is_alive() {
            self.game_over = true;
            info!(
                "[{}] {} died in room {}",
                self.session_id,
                escape_log(self.player.name()),
                self.player.room_number()
            );
            self.output
                .emit("You have died. RESTORE a saved game or QUIT.");
        }
    }
}

fn describe_item(item: &Item) -> String {
    format!(
        "{} (weight {}, value {}, uses {}/{})",
        item.description(),
        item.weight(),
        item.value(),
        item.remaining_uses(),
        item.max_uses()
    )
}

fn capitalize(verb: &str) -> String {
    let lower = verb.to_lowercase();
    let mut chars = lower.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_movement_aliases() {
        assert_eq!(parse_command("n"), GameCommand::Move(Direction::North));
        assert_eq!(parse_command("WEST"), GameCommand::Move(Direction::West));
        assert_eq!(parse_command("go east"), GameCommand::Move(Direction::East));
        assert_eq!(parse_command("M s"), GameCommand::Move(Direction::South));
        assert_eq!(parse_command("move"), GameCommand::MissingArgument("MOVE".to_string()));
        assert_eq!(parse_command("move up"), GameCommand::Invalid("move up".to_string()));
    }

    #[test]
    fn test_verbs_keep_argument_case() {
        assert_eq!(parse_command("t Brass Lamp"), GameCommand::Take("Brass Lamp".to_string()));
        assert_eq!(parse_command("ANSWER Echo"), GameCommand::Answer("Echo".to_string()));
        assert_eq!(parse_command("x desk"), GameCommand::Examine("desk".to_string()));
        assert_eq!(parse_command("D rope"), GameCommand::Drop("rope".to_string()));
        assert_eq!(parse_command("u key"), GameCommand::Use("key".to_string()));
    }

    #[test]
    fn test_missing_arguments() {
        assert_eq!(parse_command("take"), GameCommand::MissingArgument("TAKE".to_string()));
        assert_eq!(parse_command("U"), GameCommand::MissingArgument("U".to_string()));
    }

    #[test]
    fn test_single_word_commands() {
        assert_eq!(parse_command("l"), GameCommand::Look);
        assert_eq!(parse_command("i"), GameCommand::Inventory);
        assert_eq!(parse_command("Score"), GameCommand::Score);
        assert_eq!(parse_command("h"), GameCommand::Help);
        assert_eq!(parse_command("save"), GameCommand::Save);
        assert_eq!(parse_command("restore"), GameCommand::Restore);
        assert_eq!(parse_command("q"), GameCommand::Quit);
        assert_eq!(parse_command("   "), GameCommand::Empty);
        assert_eq!(parse_command("dance wildly"), GameCommand::Invalid("dance wildly".to_string()));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("TAKE"), "Take");
        assert_eq!(capitalize("u"), "U");
    }
}
