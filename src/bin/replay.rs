//! Replay driver: run a recorded input script through the simulation
//! and print a per-tick trace plus a digest of the whole run.
//!
//! ```text
//! replay <inputs.txt> [LEVEL file]
//! ```
//!
//! The input script holds one `x,y,btn` triple per line (axes in
//! −1/0/1, button in 0/1); blank lines and `#` comments are skipped.
//! Without a level file a small built-in test room is used, so the
//! determinism check needs no assets at all: two invocations over the
//! same script must print the same digest.

use std::path::PathBuf;
use std::process::exit;

use persia::domain::tile::{Tile, TileKind};
use persia::sim::level::Room;
use persia::{Game, Level, TickInput};

fn parse_inputs(text: &str) -> Result<Vec<TickInput>, String> {
    let mut out = Vec::new();
    for (n, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        if parts.len() != 3 {
            return Err(format!("line {}: expected x,y,btn", n + 1));
        }
        let x: i8 = parts[0].parse().map_err(|_| format!("line {}: bad x", n + 1))?;
        let y: i8 = parts[1].parse().map_err(|_| format!("line {}: bad y", n + 1))?;
        let btn: u8 = parts[2].parse().map_err(|_| format!("line {}: bad btn", n + 1))?;
        out.push(TickInput {
            jstk_x: x.clamp(-1, 1),
            jstk_y: y.clamp(-1, 1),
            btn: btn != 0,
        });
    }
    Ok(out)
}

/// A self-contained room for asset-free runs: a floor with a gap, a
/// loose slab and a flask.
fn demo_level() -> Level {
    let mut level = Level::empty();
    let mut room = Room::empty();
    for col in 0..10 {
        room.tiles[20 + col] = Tile::new(TileKind::Floor, 0);
    }
    for col in [0, 1, 2, 3, 4, 7, 8, 9] {
        room.tiles[10 + col] = Tile::new(TileKind::Floor, 0);
    }
    room.tiles[12] = Tile::new(TileKind::Loose, 0);
    room.tiles[18] = Tile::new(TileKind::Flask, 1 << 5);
    level.put_room(1, room);
    level.kid_room = 1;
    level.kid_block = 14;
    level.kid_face = -1;
    level
}

fn fnv(hash: &mut u64, value: i64) {
    for b in value.to_le_bytes() {
        *hash ^= b as u64;
        *hash = hash.wrapping_mul(0x100000001b3);
    }
}

fn main() {
    let mut args = std::env::args().skip(1);
    let script = match args.next() {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("usage: replay <inputs.txt> [LEVEL file]");
            exit(2);
        }
    };
    let level = match args.next() {
        Some(p) => {
            let bytes = match std::fs::read(&p) {
                Ok(b) => b,
                Err(e) => {
                    eprintln!("error: cannot read {p}: {e}");
                    exit(1);
                }
            };
            match Level::from_blueprint(&bytes) {
                Ok(l) => l,
                Err(e) => {
                    eprintln!("error: {e}");
                    exit(1);
                }
            }
        }
        None => demo_level(),
    };

    let text = match std::fs::read_to_string(&script) {
        Ok(t) => t,
        Err(e) => {
            eprintln!("error: cannot read {}: {e}", script.display());
            exit(1);
        }
    };
    let inputs = match parse_inputs(&text) {
        Ok(i) => i,
        Err(e) => {
            eprintln!("error: {e}");
            exit(1);
        }
    };

    let mut game = Game::new(level, 1);
    let mut hash = 0xcbf29ce484222325u64;

    println!("tick,x,y,posn,action,room,hp");
    for (tick, inp) in inputs.iter().enumerate() {
        game.step(*inp);
        let kid = &game.kid;
        println!(
            "{},{},{},{},{},{},{}",
            tick,
            kid.x,
            kid.y,
            kid.posn,
            kid.action.as_u8(),
            kid.scrn,
            game.health.cur,
        );
        for v in [
            kid.x as i64,
            kid.y as i64,
            kid.posn as i64,
            kid.action.as_u8() as i64,
            kid.scrn as i64,
            game.health.cur as i64,
        ] {
            fnv(&mut hash, v);
        }
    }
    println!("digest,{hash:#018x}");
}
