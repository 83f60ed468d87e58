/// Room transitions ("cuts"): wrap the character across a room edge and
/// rebind him to the neighbor.
///
/// The down threshold sits below the 192-line room height on purpose:
/// the band in between is a dead zone, so a character briefly dipping
/// under the bottom row does not flap between rooms.

use crate::domain::character::Character;
use super::level::Level;

const CROSS_LEFT: i16 = 54;
const CROSS_RIGHT: i16 = 201;
const CROSS_UP: i16 = 10;
const CROSS_DOWN: i16 = 215;

const WRAP_X: i16 = 140;
const WRAP_Y: i16 = 189;

/// Ticks after a cut during which no further cut is taken.
const CUT_COOLDOWN: u8 = 2;

#[derive(Clone, Copy, Debug, Default)]
pub struct CutState {
    pub cooldown: u8,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CutDir {
    Left,
    Right,
    Up,
    Down,
}

#[derive(Clone, Copy, Debug, Default)]
pub struct CutResult {
    pub cut: Option<(CutDir, u8)>,
    /// Crossed the bottom edge into the void.
    pub fell_off: bool,
}

pub fn cut_check(ch: &mut Character, lvl: &Level, st: &mut CutState) -> CutResult {
    let mut out = CutResult::default();

    if st.cooldown > 0 {
        st.cooldown -= 1;
        return out;
    }
    let room = match lvl.room(ch.scrn) {
        Some(r) => r,
        None => return out,
    };

    if ch.x <= CROSS_LEFT && room.left != 0 {
        ch.x += WRAP_X;
        ch.scrn = room.left;
        st.cooldown = CUT_COOLDOWN;
        out.cut = Some((CutDir::Left, ch.scrn));
    } else if ch.x >= CROSS_RIGHT && room.right != 0 {
        ch.x -= WRAP_X;
        ch.scrn = room.right;
        st.cooldown = CUT_COOLDOWN;
        out.cut = Some((CutDir::Right, ch.scrn));
    } else if ch.y < CROSS_UP && room.up != 0 {
        ch.y += WRAP_Y;
        ch.block_y += 3;
        ch.scrn = room.up;
        st.cooldown = CUT_COOLDOWN;
        out.cut = Some((CutDir::Up, ch.scrn));
    } else if ch.y >= CROSS_DOWN {
        if room.down != 0 {
            ch.y -= WRAP_Y;
            ch.block_y -= 3;
            ch.scrn = room.down;
            st.cooldown = CUT_COOLDOWN;
            out.cut = Some((CutDir::Down, ch.scrn));
        } else {
            out.fell_off = true;
        }
    }

    if out.cut.is_some() {
        ch.reread_blocks();
    }
    out
}
