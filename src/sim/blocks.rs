/// Block reading: everything a character wants to know about the tiles
/// around it. Pure queries — no side effects.
///
/// TERRAIN here is two distinct ideas:
///   1. floor   — does the tile stop a fall (`TileKind::is_passable`)
///   2. barrier — does the tile body block horizontal motion, and where
///                its face sits inside the block (`dbarr`)
/// A gate is a barrier while shut but has a floor either way; an open
/// panel is a wall only from one side. Keeping the two queries separate
/// is what makes the edge cases fall out.

use crate::domain::character::Character;
use crate::domain::coords::{block_ej, ANGLE, BLOCK_WIDTH};
use crate::domain::tile::{Tile, TileKind};
use super::level::Level;

/// Pixel inset of a barrier body from the left block edge, by barrier
/// code (0 clear, 1 panel/gate, 3 mirror/slicer, 4 block).
pub const BAR_L: [i16; 5] = [0, 12, 2, 0, 0];
/// Same, from the right block edge.
pub const BAR_R: [i16; 5] = [0, 0, 9, 11, 0];

/// A gate opened at least this far is no barrier.
pub const GATE_CLEARANCE: u8 = 24;

/// Neighborhood reader centered on a character's block.
pub struct Probe<'a> {
    lvl: &'a Level,
    pub room: u8,
    pub col: i16,
    pub row: i16,
    pub face: i16,
}

impl<'a> Probe<'a> {
    pub fn of(lvl: &'a Level, ch: &Character) -> Probe<'a> {
        Probe { lvl, room: ch.scrn, col: ch.block_x, row: ch.block_y, face: ch.face }
    }

    fn at(&self, dc: i16, dr: i16) -> Tile {
        self.lvl.tile_at(self.room, self.col + dc * self.face, self.row + dr)
    }

    /// The tile the character is in; its floor is what he stands on.
    pub fn under(&self) -> Tile {
        self.at(0, 0)
    }

    pub fn front(&self) -> Tile {
        self.at(1, 0)
    }

    pub fn behind(&self) -> Tile {
        self.at(-1, 0)
    }

    pub fn above(&self) -> Tile {
        self.at(0, -1)
    }

    pub fn above_front(&self) -> Tile {
        self.at(1, -1)
    }

    pub fn above_behind(&self) -> Tile {
        self.at(-1, -1)
    }

    pub fn below(&self) -> Tile {
        self.at(0, 1)
    }

    /// Concrete handle of a neighbor, for mutation.
    pub fn handle(&self, dc: i16, dr: i16) -> Option<(u8, usize)> {
        self.lvl.resolve(self.room, self.col + dc * self.face, self.row + dr)
    }
}

/// Can a ledge be grabbed? `ledge` is the candidate tile, `above` the
/// tile over the grabber's head.
pub fn can_grab_ledge(ledge: Tile, above: Tile, face: i16) -> bool {
    // headroom: nothing solid overhead
    if above.kind == TileKind::Block {
        return false;
    }
    if above.kind == TileKind::PanelWof && face > 0 {
        return false;
    }
    if !above.kind.is_passable() {
        return false;
    }
    // the ledge itself must hold: a floor, not already crumbling, and
    // not a panel lip approached from its blind side
    if ledge.kind.is_passable() {
        return false;
    }
    if ledge.kind == TileKind::Loose && ledge.spec != 0 {
        return false;
    }
    if ledge.kind == TileKind::PanelWif && face < 0 {
        return false;
    }
    true
}

/// Signed distance from a character's base X to the barrier face in
/// block `col`, or None when the block body doesn't block this facing.
pub fn dbarr(tile: Tile, col: i16, base_x: i16, face: i16) -> Option<i16> {
    if tile.kind == TileKind::Gate && tile.spec >= GATE_CLEARANCE {
        return None;
    }
    if tile.kind == TileKind::PanelWof && face < 0 {
        return None;
    }
    let code = tile.kind.barrier_code();
    if code == 0 {
        return None;
    }
    let edge = block_ej(col) + ANGLE;
    Some(if face > 0 {
        (edge + BAR_L[code]) - base_x
    } else {
        base_x - (edge + BLOCK_WIDTH - 1 - BAR_R[code])
    })
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum FwdKind {
    Edge,
    Barrier,
    Clear,
}

#[derive(Clone, Copy, Debug)]
pub struct FwdDist {
    pub dist: i16,
    pub kind: FwdKind,
    pub tile: TileKind,
}

/// Forward distance: how far the character can go before something
/// happens, and what that something is.
pub fn fwd_dist(lvl: &Level, ch: &Character) -> FwdDist {
    let probe = Probe::of(lvl, ch);
    let base = ch.base_x();

    let here = probe.under();
    if let Some(d) = dbarr(here, ch.block_x, base, ch.face) {
        return FwdDist { dist: d, kind: FwdKind::Barrier, tile: here.kind };
    }

    let front = probe.front();
    let front_col = ch.block_x + ch.face;
    if let Some(d) = dbarr(front, front_col, base, ch.face) {
        return FwdDist { dist: d, kind: FwdKind::Barrier, tile: front.kind };
    }

    let edge = ch.dist_to_edge();
    match front.kind {
        TileKind::Loose => FwdDist { dist: edge, kind: FwdKind::Edge, tile: front.kind },
        TileKind::PressPlate | TileKind::UPressPlate | TileKind::Sword | TileKind::Flask => {
            if edge == 0 {
                FwdDist { dist: 11, kind: FwdKind::Clear, tile: front.kind }
            } else {
                FwdDist { dist: edge, kind: FwdKind::Edge, tile: front.kind }
            }
        }
        k if k.is_passable() => FwdDist { dist: edge, kind: FwdKind::Edge, tile: front.kind },
        _ => FwdDist { dist: 11, kind: FwdKind::Clear, tile: front.kind },
    }
}
