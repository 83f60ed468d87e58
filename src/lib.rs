/// Deterministic simulation core of the 1989 Apple II *Prince of
/// Persia*, written to sit under a faithful renderer.
///
/// The crate advances a kid, at most one guard, and a level full of
/// animated tiles by exactly one frame per `Game::step` call. There is
/// no clock in here: the host calls `step` at whatever cadence it
/// renders (83 ms to match the original), feeds it a normalized
/// two-axis input sample, and draws from `Game::view`. Given the same
/// level bytes and the same input sequence, two runs produce identical
/// state on every tick.
///
/// ```no_run
/// use persia::{Game, Level, TickInput};
///
/// let bytes = std::fs::read("levels/LEVEL1").unwrap();
/// let level = Level::from_blueprint(&bytes).unwrap();
/// let mut game = Game::new(level, 1);
/// loop {
///     let events = game.step(TickInput { jstk_x: -1, jstk_y: 0, btn: false });
///     let view = game.view();
///     // hand `view` and `events` to the renderer and mixer
///     # let _ = (events, view); break;
/// }
/// ```

pub mod config;
pub mod domain;
pub mod sim;

pub use config::GameConfig;
pub use domain::character::Character;
pub use domain::tile::{Tile, TileKind};
pub use sim::event::GameEvent;
pub use sim::input::TickInput;
pub use sim::level::Level;
pub use sim::sched::{Game, View};
