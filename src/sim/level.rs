/// Level data: 24 linked rooms of 30 tiles, the pressure-plate link
/// tables, and the start records for the kid, the sword and the guards.
///
/// ## Sources
///
/// Levels are either built programmatically (tests) or decoded from the
/// original 2,304-byte blueprint files:
///
/// | offset | size | content                                  |
/// |--------|------|------------------------------------------|
/// | 0x000  | 720  | tile type bytes, 24 rooms x 30           |
/// | 0x2D0  | 720  | initial spec bytes                       |
/// | 0x5A0  | 256  | link target table                        |
/// | 0x6A0  | 256  | link timer table                         |
/// | 0x7A0  | 96   | neighbor rooms (L, R, U, D per room)     |
/// | 0x800  | 256  | info block (starts, guards)              |
///
/// The original tiles are kept in a pristine copy so a level restart can
/// revert every runtime change (opened gates, drunk flasks, crumbled
/// floors) without touching the asset again.

use crate::domain::tile::{Tile, TileKind};

pub const ROOM_COLS: i16 = 10;
pub const ROOM_ROWS: i16 = 3;
pub const ROOM_TILES: usize = 30;
pub const NUM_ROOMS: usize = 24;

const BLUEPRINT_LEN: usize = 0x900;

/// One room: 30 tiles row-major (3 rows x 10 cols) and four neighbor
/// room numbers, 0 meaning void.
#[derive(Clone, Debug)]
pub struct Room {
    pub tiles: [Tile; ROOM_TILES],
    pub left: u8,
    pub right: u8,
    pub up: u8,
    pub down: u8,
}

impl Room {
    pub fn empty() -> Room {
        Room {
            tiles: [Tile::new(TileKind::Space, 0); ROOM_TILES],
            left: 0,
            right: 0,
            up: 0,
            down: 0,
        }
    }

    pub fn tile(&self, col: i16, row: i16) -> Tile {
        self.tiles[(row * ROOM_COLS + col) as usize]
    }
}

/// Per-room guard start. `block >= 30` means no guard in that room.
#[derive(Clone, Copy, Debug)]
pub struct GuardStart {
    pub block: u8,
    pub face: i16,
    pub skill: u8,
}

impl GuardStart {
    pub fn none() -> GuardStart {
        GuardStart { block: 30, face: -1, skill: 0 }
    }

    pub fn present(&self) -> bool {
        self.block < ROOM_TILES as u8
    }
}

#[derive(Clone, Debug)]
pub struct Level {
    /// Rooms indexed 1..=24; slot 0 is a void placeholder.
    rooms: Vec<Room>,
    /// Pristine copy for level restarts.
    base: Vec<Room>,
    pub link_loc: Vec<u8>,
    pub link_map: Vec<u8>,
    pub kid_room: u8,
    pub kid_block: u8,
    pub kid_face: i16,
    pub sword_room: u8,
    pub sword_block: u8,
    /// Guard starts indexed by room, 1..=24.
    pub guards: Vec<GuardStart>,
    pub num_rooms: u8,
}

impl Level {
    pub fn empty() -> Level {
        Level {
            rooms: vec![Room::empty(); NUM_ROOMS + 1],
            base: vec![Room::empty(); NUM_ROOMS + 1],
            link_loc: vec![0; 256],
            link_map: vec![0; 256],
            kid_room: 1,
            kid_block: 0,
            kid_face: -1,
            sword_room: 0,
            sword_block: 0,
            guards: vec![GuardStart::none(); NUM_ROOMS + 1],
            num_rooms: NUM_ROOMS as u8,
        }
    }

    /// Decode a blueprint file. Rejects short files and unknown tile
    /// types outright — a half-parsed level is worse than none.
    pub fn from_blueprint(data: &[u8]) -> Result<Level, String> {
        if data.len() < BLUEPRINT_LEN {
            return Err(format!(
                "level file too short: {} bytes, need {}",
                data.len(),
                BLUEPRINT_LEN
            ));
        }

        let mut level = Level::empty();

        for r in 0..NUM_ROOMS {
            let room = &mut level.rooms[r + 1];
            for t in 0..ROOM_TILES {
                let ty = data[r * ROOM_TILES + t];
                let spec = data[0x2D0 + r * ROOM_TILES + t];
                room.tiles[t] = Tile::from_bytes(ty, spec).ok_or_else(|| {
                    format!("unknown tile type {:#04x} in room {} slot {}", ty, r + 1, t)
                })?;
            }
            let m = 0x7A0 + r * 4;
            room.left = clamp_room(data[m]);
            room.right = clamp_room(data[m + 1]);
            room.up = clamp_room(data[m + 2]);
            room.down = clamp_room(data[m + 3]);
        }

        level.link_loc.copy_from_slice(&data[0x5A0..0x6A0]);
        level.link_map.copy_from_slice(&data[0x6A0..0x7A0]);

        let info = &data[0x800..0x900];
        level.num_rooms = info[0].saturating_sub(1).min(NUM_ROOMS as u8);
        level.kid_room = clamp_room(info[0x40]).max(1);
        level.kid_block = info[0x41].min(29);
        level.kid_face = decode_face(info[0x42]);
        level.sword_room = clamp_room(info[0x44]);
        level.sword_block = info[0x45];
        for r in 0..NUM_ROOMS {
            level.guards[r + 1] = GuardStart {
                block: info[0x47 + r],
                face: decode_face(info[0x5F + r]),
                skill: info[0xA7 + r],
            };
        }

        level.base = level.rooms.clone();
        Ok(level)
    }

    pub fn room(&self, r: u8) -> Option<&Room> {
        if r == 0 || r as usize > NUM_ROOMS {
            return None;
        }
        Some(&self.rooms[r as usize])
    }

    /// Resolve a possibly out-of-room coordinate to a concrete
    /// (room, tile index), wrapping through at most one neighbor.
    /// None means the walk fell into the void.
    pub fn resolve(&self, room: u8, col: i16, row: i16) -> Option<(u8, usize)> {
        let mut room = room;
        let mut col = col;
        let mut row = row;

        if col < 0 {
            room = self.room(room)?.left;
            col += ROOM_COLS;
        } else if col >= ROOM_COLS {
            room = self.room(room)?.right;
            col -= ROOM_COLS;
        }
        if row < 0 {
            room = self.room(room)?.up;
            row += ROOM_ROWS;
        } else if row >= ROOM_ROWS {
            room = self.room(room)?.down;
            row -= ROOM_ROWS;
        }

        if self.room(room).is_none()
            || !(0..ROOM_COLS).contains(&col)
            || !(0..ROOM_ROWS).contains(&row)
        {
            return None;
        }
        Some((room, (row * ROOM_COLS + col) as usize))
    }

    /// Tile lookup with void-as-wall semantics.
    pub fn tile_at(&self, room: u8, col: i16, row: i16) -> Tile {
        match self.resolve(room, col, row) {
            Some((r, idx)) => self.rooms[r as usize].tiles[idx],
            None => Tile::wall(),
        }
    }

    pub fn tile(&self, handle: (u8, usize)) -> Tile {
        self.rooms[handle.0 as usize].tiles[handle.1]
    }

    pub fn tile_mut(&mut self, handle: (u8, usize)) -> &mut Tile {
        &mut self.rooms[handle.0 as usize].tiles[handle.1]
    }

    pub fn set_spec(&mut self, handle: (u8, usize), spec: u8) {
        self.tile_mut(handle).spec = spec;
    }

    /// Revert every room to its as-loaded state (level restart).
    pub fn reset_tiles(&mut self) {
        self.rooms = self.base.clone();
    }

    // ── Test construction ──

    /// Install a room and refresh the pristine copy to match.
    pub fn put_room(&mut self, r: u8, room: Room) {
        self.rooms[r as usize] = room.clone();
        self.base[r as usize] = room;
    }
}

fn clamp_room(b: u8) -> u8 {
    if b as usize > NUM_ROOMS { 0 } else { b }
}

fn decode_face(b: u8) -> i16 {
    if b == 0xFF { -1 } else { 1 }
}

// ══════════════════════════════════════════════════════════════
// String-diagram builders for tests
// ══════════════════════════════════════════════════════════════


#[cfg(test)]
mod tests {
    use super::diagrams::*;
    use super::*;

    #[test]
    fn resolve_wraps_left_and_right() {
        let level = pair_lr(
            &["__________", "__________", "__________"],
            &["__________", "__________", "__________"],
        );
        // col −1 of room 2 lands on col 9 of room 1
        assert_eq!(level.resolve(2, -1, 1), Some((1, 19)));
        // col 10 of room 1 lands on col 0 of room 2
        assert_eq!(level.resolve(1, 10, 0), Some((2, 0)));
        // no vertical neighbors
        assert_eq!(level.resolve(1, 4, -1), None);
        assert_eq!(level.resolve(1, 4, 3), None);
    }

    #[test]
    fn resolve_wraps_down_into_row_zero() {
        let level = pair_ud(
            &["__________", "__________", "__________"],
            &["__________", "__________", "__________"],
        );
        assert_eq!(level.resolve(1, 3, 3), Some((2, 3)));
        assert_eq!(level.resolve(2, 3, -1), Some((1, 23)));
    }

    #[test]
    fn void_lookups_read_as_wall() {
        let level = single(&["__________", "__________", "__________"]);
        assert_eq!(level.tile_at(1, -1, 0).kind, TileKind::Block);
        assert_eq!(level.tile_at(1, 0, 0).kind, TileKind::Floor);
    }

    #[test]
    fn reset_restores_mutated_tiles() {
        let mut level = single(&["__________", "F_________", "__________"]);
        let h = (1u8, 10usize);
        level.tile_mut(h).become_kind(TileKind::Floor);
        assert_eq!(level.tile(h).kind, TileKind::Floor);
        level.reset_tiles();
        assert_eq!(level.tile(h).kind, TileKind::Flask);
    }

    #[test]
    fn blueprint_rejects_short_files() {
        assert!(Level::from_blueprint(&[0u8; 100]).is_err());
    }

    #[test]
    fn blueprint_rejects_unknown_tile_types() {
        let mut data = vec![0u8; BLUEPRINT_LEN];
        data[5] = 31; // no such tile kind
        let err = Level::from_blueprint(&data).unwrap_err();
        assert!(err.contains("unknown tile type"));
    }

    #[test]
    fn blueprint_decodes_starts_and_guards() {
        let mut data = vec![0u8; BLUEPRINT_LEN];
        data[0x800] = 25; // rooms + 1
        data[0x840] = 3; // kid room
        data[0x841] = 14; // kid block
        data[0x842] = 0xFF; // facing left
        data[0x844] = 7;
        data[0x845] = 22;
        data[0x847 + 2] = 11; // guard in room 3, block 11
        data[0x85F + 2] = 0; // facing right
        data[0x8A7 + 2] = 5; // skill
        let level = Level::from_blueprint(&data).unwrap();
        assert_eq!(level.kid_room, 3);
        assert_eq!(level.kid_block, 14);
        assert_eq!(level.kid_face, -1);
        assert_eq!((level.sword_room, level.sword_block), (7, 22));
        let g = level.guards[3];
        assert!(g.present());
        assert_eq!((g.block, g.face, g.skill), (11, 1, 5));
        assert!(!level.guards[1].present());
    }
}
