/// Player control: re-points the kid's sequence based on the current
/// frame, the tri-state input and the surrounding tiles.
///
/// Processing model: the input is face-normalized for the duration of
/// the call (forward is always jstk_x == −1 in here), then one handler
/// runs, keyed on the frame family the kid is showing:
///
///   15, 50..52   standing (includes the final turn frames)
///   1..3         start of a run
///   4..14        full run cycle
///   48           mid-turn
///   67..69       jump-up startup (can still become a standing jump)
///   87..99       hanging
///   109          crouched
///
/// A handler either consumes a fresh press and re-points `seq`, or does
/// nothing. Position corrections (edge snaps, takeoff fudges) happen
/// here, before the sequence runs its first frame this same tick.

use crate::domain::character::{Action, Character};
use crate::domain::coords::{block_ej, block_x_center, ANGLE, BLOCK_WIDTH};
use crate::domain::seq::{Seq, SeqTable};
use crate::domain::tile::TileKind;
use super::blocks::{can_grab_ledge, dbarr, fwd_dist, FwdKind, Probe};
use super::input::{take_fresh, InputState};
use super::level::Level;

// Running-jump takeoff tuning.
const RJ_CHANGE: i16 = 4;
const RJ_LOOKAHEAD: i16 = 1;
const RJ_LEAD_DIST: i16 = 14;
const RJ_MAX_FUJ_BAK: i16 = 8;
const RJ_MAX_FUJ_FWD: i16 = 2;

/// Minimum pixels from the back edge before a backward ledge grab.
const JUMP_BACK_THRES: i16 = 6;

/// An exit doorway must have risen this far (spec >> 2) to be entered.
const STAIRS_OPEN: u8 = 30;

/// Gate clearance (spec >> 2) needed to climb through from the left.
const GATE_CLIMB_MIN: u8 = 6;

fn goto(kid: &mut Character, tab: &SeqTable, seq: Seq) {
    kid.seq = tab.start(seq);
}

pub fn player_ctrl(
    kid: &mut Character,
    lvl: &mut Level,
    input: &mut InputState,
    tab: &SeqTable,
    last_potion: &mut i16,
) {
    let face0 = kid.face;
    input.face_jstk(face0);

    match kid.posn {
        15 | 50..=52 => standing(kid, lvl, input, tab),
        1..=3 => starting(kid, input, tab),
        4..=14 => running(kid, lvl, input, tab),
        48 => turning(kid, input, tab),
        67..=69 => jumpup_start(kid, input, tab),
        87..=99 => hanging(kid, lvl, input, tab),
        109 => crouching(kid, lvl, input, tab, last_potion),
        _ => {}
    }

    input.unface_jstk(face0);
}

// ══════════════════════════════════════════════════════════════
// Standing
// ══════════════════════════════════════════════════════════════

fn standing(kid: &mut Character, lvl: &mut Level, input: &mut InputState, tab: &SeqTable) {
    if input.clr_btn == -1 && pickup_from_stand(kid, lvl, tab) {
        input.clr_btn = 1;
        return;
    }
    if take_fresh(&mut input.clr_b) {
        goto(kid, tab, Seq::Turn);
        return;
    }
    if take_fresh(&mut input.clr_u) {
        standing_up(kid, lvl, input, tab);
        return;
    }
    if take_fresh(&mut input.clr_d) {
        standing_down(kid, lvl, tab);
        return;
    }
    if take_fresh(&mut input.clr_f) {
        if input.btn {
            step_forward(kid, lvl, tab);
        } else {
            goto(kid, tab, Seq::StartRun);
        }
    }
}

/// Up pressed while standing: stairs if an open exit is in reach, else
/// a standing jump forward or a jump straight up.
fn standing_up(kid: &mut Character, lvl: &mut Level, input: &mut InputState, tab: &SeqTable) {
    let probe = Probe::of(lvl, kid);
    for (tile, dc) in [(probe.under(), 0), (probe.behind(), -1), (probe.front(), 1)] {
        if tile.kind.is_exit() && tile.spec >> 2 >= STAIRS_OPEN {
            let col = kid.block_x + dc * kid.face;
            kid.x = block_ej(col) + ANGLE;
            kid.face = -1;
            kid.reread_blocks();
            goto(kid, tab, Seq::ClimbStairs);
            return;
        }
    }
    if input.forward_held() {
        goto(kid, tab, Seq::StandJump);
    } else {
        jump_up(kid, lvl, tab);
    }
}

/// Down pressed while standing: climb down over the back edge, shuffle
/// toward a close front edge, or just crouch.
fn standing_down(kid: &mut Character, lvl: &mut Level, tab: &SeqTable) {
    let probe = Probe::of(lvl, kid);

    if probe.front().kind.is_passable() && kid.dist_to_edge() < 3 {
        kid.add_x(5);
        kid.reread_blocks();
        return;
    }

    let back_dist = BLOCK_WIDTH - 1 - kid.dist_to_edge();
    if probe.behind().kind.is_passable() && back_dist >= 8 {
        let ledge = probe.under();
        let over = probe.above_behind();
        let gate_ok = over.kind != TileKind::Gate || over.spec >> 2 >= GATE_CLIMB_MIN;
        if gate_ok && can_grab_ledge(ledge, over, kid.face) {
            kid.add_x(-9);
            kid.reread_blocks();
            goto(kid, tab, Seq::ClimbDown);
            return;
        }
    }

    goto(kid, tab, Seq::Stoop);
}

// ══════════════════════════════════════════════════════════════
// Run family
// ══════════════════════════════════════════════════════════════

fn starting(kid: &mut Character, input: &mut InputState, tab: &SeqTable) {
    if take_fresh(&mut input.clr_b) {
        goto(kid, tab, Seq::Turn);
        return;
    }
    if input.jstk_x == 0 {
        goto(kid, tab, Seq::Stand);
    }
}

fn running(kid: &mut Character, lvl: &mut Level, input: &mut InputState, tab: &SeqTable) {
    if input.jstk_x == 0 && (kid.posn == 7 || kid.posn == 11) {
        goto(kid, tab, Seq::RunStop);
        return;
    }
    if input.backward_held() {
        goto(kid, tab, Seq::RunTurn);
        return;
    }
    if input.forward_held() {
        if input.clr_u == -1 {
            take_fresh(&mut input.clr_u);
            if kid.posn >= 7 {
                run_jump(kid, lvl, tab);
            }
            return;
        }
        if take_fresh(&mut input.clr_d) {
            goto(kid, tab, Seq::DiveRoll);
        }
    }
}

fn turning(kid: &mut Character, input: &mut InputState, tab: &SeqTable) {
    if !input.btn && input.forward_held() && input.jstk_y >= 0 {
        goto(kid, tab, Seq::TurnRun);
    }
}

fn jumpup_start(kid: &mut Character, input: &mut InputState, tab: &SeqTable) {
    if input.forward_held() {
        goto(kid, tab, Seq::StandJump);
    }
}

// ══════════════════════════════════════════════════════════════
// Hanging
// ══════════════════════════════════════════════════════════════

fn hanging(kid: &mut Character, lvl: &mut Level, input: &mut InputState, tab: &SeqTable) {
    let probe = Probe::of(lvl, kid);

    if kid.stun == 0 && input.up_held() {
        let ledge = probe.above_front();
        let target = match ledge.kind {
            TileKind::Mirror | TileKind::Slicer => {
                if kid.face < 0 { Seq::ClimbUp } else { Seq::ClimbFail }
            }
            TileKind::Gate => {
                if kid.face > 0 || ledge.spec >> 2 >= GATE_CLIMB_MIN {
                    Seq::ClimbUp
                } else {
                    Seq::ClimbFail
                }
            }
            _ => Seq::ClimbUp,
        };
        goto(kid, tab, target);
        return;
    }

    if !input.btn {
        hang_release(kid, lvl, tab);
        return;
    }

    if kid.action != Action::HangStill {
        if probe.under().kind.is_wall(kid.face) {
            goto(kid, tab, Seq::HangStraight);
            return;
        }
        if probe.above_front().kind.is_passable() {
            // the ledge crumbled away under his fingers
            hang_release(kid, lvl, tab);
        }
    }
}

fn hang_release(kid: &mut Character, lvl: &mut Level, tab: &SeqTable) {
    let probe = Probe::of(lvl, kid);
    if probe.behind().kind.is_passable() {
        if probe.under().kind.is_wall(kid.face) {
            // sheer drop against a wall face: push clear before letting go
            kid.add_x(-7);
            kid.reread_blocks();
        }
        goto(kid, tab, Seq::HangDrop);
    } else if probe.under().kind.is_passable() {
        goto(kid, tab, Seq::HangFall);
    } else {
        goto(kid, tab, Seq::HangDrop);
    }
}

// ══════════════════════════════════════════════════════════════
// Crouching
// ══════════════════════════════════════════════════════════════

fn crouching(
    kid: &mut Character,
    lvl: &mut Level,
    input: &mut InputState,
    tab: &SeqTable,
    last_potion: &mut i16,
) {
    if input.btn || input.clr_btn == -1 {
        take_fresh(&mut input.clr_btn);
        if pickup_from_crouch(kid, lvl, tab, last_potion) {
            return;
        }
    }
    if !input.down_held() {
        goto(kid, tab, Seq::StandUp);
        return;
    }
    if take_fresh(&mut input.clr_f) {
        goto(kid, tab, Seq::Crawl);
    }
}

// ══════════════════════════════════════════════════════════════
// Pickup (two phases)
// ══════════════════════════════════════════════════════════════

/// Standing phase: line up on the item and start the stoop. The crouch
/// handler finishes the job while the button is still down.
fn pickup_from_stand(kid: &mut Character, lvl: &mut Level, tab: &SeqTable) -> bool {
    let probe = Probe::of(lvl, kid);
    let under = probe.under();
    if matches!(under.kind, TileKind::Flask | TileKind::Sword)
        && !probe.behind().kind.is_passable()
    {
        kid.add_x(-14);
        kid.reread_blocks();
    }
    let probe = Probe::of(lvl, kid);
    if matches!(probe.front().kind, TileKind::Flask | TileKind::Sword) {
        goto(kid, tab, Seq::Stoop);
        return true;
    }
    false
}

/// Crouched phase: snap to the item and swap the tile for a plain floor.
/// The `effect` opcode later in the drink/pickup sequence is what makes
/// the scheduler act on `last_potion`.
fn pickup_from_crouch(
    kid: &mut Character,
    lvl: &mut Level,
    tab: &SeqTable,
    last_potion: &mut i16,
) -> bool {
    let d = fwd_dist(lvl, kid);
    let handle = match Probe::of(lvl, kid).handle(1, 0) {
        Some(h) => h,
        None => return false,
    };
    let tile = lvl.tile(handle);
    if !matches!(tile.kind, TileKind::Flask | TileKind::Sword) {
        return false;
    }

    if d.dist != 0 {
        kid.add_x(d.dist);
    }
    if kid.face > 0 {
        kid.add_x(-2);
    }
    kid.reread_blocks();

    match tile.kind {
        TileKind::Sword => {
            *last_potion = -1;
            lvl.tile_mut(handle).become_kind(TileKind::Floor);
            goto(kid, tab, Seq::PickUpSword);
        }
        _ => {
            *last_potion = tile.potion_kind() as i16;
            lvl.tile_mut(handle).become_kind(TileKind::Floor);
            goto(kid, tab, Seq::DrinkPotion);
        }
    }
    true
}

// ══════════════════════════════════════════════════════════════
// Jump selection
// ══════════════════════════════════════════════════════════════

/// Up with no forward: grab a ledge if one is in reach, else hop.
fn jump_up(kid: &mut Character, lvl: &mut Level, tab: &SeqTable) {
    let probe = Probe::of(lvl, kid);
    let over = probe.above();

    if can_grab_ledge(probe.above_front(), over, kid.face) {
        jump_hang(kid, lvl, tab);
        return;
    }

    let back_dist = BLOCK_WIDTH - 1 - kid.dist_to_edge();
    if can_grab_ledge(probe.above_behind(), over, kid.face) && back_dist >= JUMP_BACK_THRES {
        // snap under the back edge; keep a 2px standoff when a wall
        // face is right behind
        let snap = if probe.behind().kind.is_wall(-kid.face) { back_dist - 2 } else { back_dist };
        kid.add_x(-snap);
        kid.reread_blocks();
        goto(kid, tab, Seq::JumpBackHang);
        return;
    }

    jump_high(kid, lvl, tab);
}

/// Grab the ledge above-front: long variant when far from the edge or
/// cramped against a wall, medium otherwise.
fn jump_hang(kid: &mut Character, lvl: &mut Level, tab: &SeqTable) {
    let dist = kid.dist_to_edge();
    if dist >= 4 {
        kid.add_x(dist - 4);
        kid.reread_blocks();
        goto(kid, tab, Seq::JumpHangLong);
        return;
    }
    let probe = Probe::of(lvl, kid);
    let front_col = kid.block_x + kid.face;
    let wall_close = dbarr(probe.front(), front_col, kid.base_x(), kid.face)
        .map_or(false, |d| d < 4);
    if wall_close {
        kid.add_x(dist - 4);
        kid.reread_blocks();
        goto(kid, tab, Seq::JumpHangLong);
    } else {
        kid.add_x(dist);
        kid.reread_blocks();
        goto(kid, tab, Seq::JumpHangMed);
    }
}

/// Nothing grabbable: short hop under a ceiling, full jump otherwise.
fn jump_high(kid: &mut Character, lvl: &mut Level, tab: &SeqTable) {
    let (col, _) = block_x_center(kid.base_x() - 6 * kid.face);
    let over = lvl.tile_at(kid.scrn, col, kid.block_y - 1);
    if over.kind.is_passable() {
        goto(kid, tab, Seq::HighJump);
    } else {
        goto(kid, tab, Seq::JumpUp);
    }
}

/// Running jump: project the takeoff point forward and look for an edge
/// worth jumping; fudge the takeoff X so the leap leads it by a stride.
fn run_jump(kid: &mut Character, lvl: &mut Level, tab: &SeqTable) {
    let proj = kid.base_x() + kid.face * RJ_CHANGE;
    let (col, off) = block_x_center(proj);
    let to_edge = if kid.face > 0 { BLOCK_WIDTH - 1 - off } else { off };

    let mut found = None;
    let mut j = 0;
    while j <= RJ_LOOKAHEAD {
        let t = lvl.tile_at(kid.scrn, col + (j + 1) * kid.face, kid.block_y);
        if t.kind == TileKind::Spikes || t.kind.is_passable() {
            found = Some(j);
            break;
        }
        j += 1;
    }
    let blocks = match found {
        Some(j) => j,
        None => return, // nothing to clear; keep running
    };

    let diff = to_edge + blocks * BLOCK_WIDTH - RJ_LEAD_DIST;
    if diff < -RJ_MAX_FUJ_BAK {
        return; // too soon, wait a stride
    }
    let diff = if diff > RJ_MAX_FUJ_FWD { -3 } else { diff };
    kid.add_x(diff + RJ_CHANGE);
    kid.reread_blocks();
    goto(kid, tab, Seq::RunJump);
}

// ══════════════════════════════════════════════════════════════
// Careful step
// ══════════════════════════════════════════════════════════════

/// Walk forward by the measured distance (1..11). At a dead stop the
/// `repeat` memory decides between pressing on and testing the edge.
fn step_forward(kid: &mut Character, lvl: &mut Level, tab: &SeqTable) {
    let d = fwd_dist(lvl, kid);
    let dist = d.dist.clamp(0, 11) as u8;

    if dist != 0 {
        kid.repeat = dist;
        kid.seq = tab.step_seq(dist);
        return;
    }
    if d.kind == FwdKind::Barrier {
        kid.repeat = 11;
        kid.seq = tab.step_seq(11);
        return;
    }
    if kid.repeat == 0 {
        kid.seq = tab.step_seq(11);
    } else {
        kid.repeat = 0;
        goto(kid, tab, Seq::TestFoot);
    }
}
