/// Floor check: classifies the character against the floor after the
/// frame, gravity and velocity have all been applied. The outcome is a
/// sequence re-point (start a fall, land, grab a ledge) and possibly a
/// position correction (bumped out of a block).
///
/// Dispatch is on the action the sequence last set:
///   hang / hang-static  — nothing to check
///   bumped              — only the crouch and lying-dead frames touch ground
///   freefall            — falling (land / keep falling / grab)
///   mid-fall            — ledge grab only, on the reach frames
///   everything else     — ground check on foot-down frames

use crate::domain::character::{Action, Character, ID_KID, ID_SHADOW};
use crate::domain::coords::{floor_level, BLOCK_WIDTH};
use crate::domain::seq::{anim_char, Seq, SeqTable};
use super::blocks::{can_grab_ledge, Probe};
use super::event::GameEvent;
use super::input::InputState;
use super::level::Level;

/// Landing softer than this costs nothing.
pub const SOFT_LIMIT: i16 = 22;
/// Landing at this velocity or beyond is fatal.
pub const HARD_LIMIT: i16 = 33;
/// A fall faster than this cannot be caught by hand.
pub const GRAB_LIMIT: i16 = 32;
/// Ticks of stun after catching a ledge mid-fall.
pub const GRAB_STUN: u8 = 12;

pub fn check_floor(
    kid: &mut Character,
    lvl: &Level,
    tab: &SeqTable,
    input: &InputState,
    decstr: &mut dyn FnMut(i16),
    events: &mut Vec<GameEvent>,
) {
    match kid.action {
        Action::Hang | Action::HangStill => {}
        Action::Bumped => {
            if kid.posn == 109 || kid.posn == 185 {
                on_ground(kid, lvl, tab);
            }
        }
        Action::FreeFall => falling(kid, lvl, tab, input, decstr, events),
        Action::MidFall => {
            if (102..=105).contains(&kid.posn) {
                fall_on(kid, lvl, tab, input);
            }
        }
        Action::Normal | Action::Ground | Action::Turned => on_ground(kid, lvl, tab),
    }
}

// ══════════════════════════════════════════════════════════════
// Falling
// ══════════════════════════════════════════════════════════════

fn falling(
    kid: &mut Character,
    lvl: &Level,
    tab: &SeqTable,
    input: &InputState,
    decstr: &mut dyn FnMut(i16),
    events: &mut Vec<GameEvent>,
) {
    if kid.y < floor_level(kid.block_y) {
        fall_on(kid, lvl, tab, input);
        return;
    }
    let under = lvl.tile_at(kid.scrn, kid.block_x, kid.block_y);
    if under.kind.is_wall(kid.face) {
        inside_block(kid, lvl);
    } else if under.kind.is_passable() {
        kid.block_y += 1;
    } else {
        hit_floor(kid, lvl, tab, decstr, events);
    }
}

/// Mid-air ledge grab. Only a live character with a hand free (button
/// held), falling slower than the grab limit and close under a floor
/// line, gets to try.
fn fall_on(kid: &mut Character, lvl: &Level, tab: &SeqTable, input: &InputState) {
    if !input.btn || !kid.alive() || kid.yvel >= GRAB_LIMIT {
        return;
    }
    if kid.y + 25 < floor_level(kid.block_y) {
        return;
    }

    let x0 = kid.x;
    kid.add_x(-8);
    kid.reread_blocks();

    let probe = Probe::of(lvl, kid);
    if !can_grab_ledge(probe.above_front(), probe.above(), kid.face) {
        kid.x = x0;
        kid.reread_blocks();
        return;
    }

    let snap = kid.dist_to_edge();
    kid.add_x(snap);
    kid.y = floor_level(kid.block_y);
    kid.yvel = 0;
    kid.xvel = 0;
    kid.seq = tab.start(Seq::FallHang);
    let _ = anim_char(kid, tab, false);
    kid.reread_blocks();
    kid.stun = GRAB_STUN;
}

/// Touch down: snap to the floor line and grade the landing by the
/// vertical velocity at impact.
fn hit_floor(
    kid: &mut Character,
    lvl: &Level,
    tab: &SeqTable,
    decstr: &mut dyn FnMut(i16),
    events: &mut Vec<GameEvent>,
) {
    kid.y = floor_level(kid.block_y);

    let probe = Probe::of(lvl, kid);
    if probe.front().kind.is_passable() && kid.dist_to_edge() < 4 {
        kid.add_x(-3);
        kid.reread_blocks();
    }

    let vel = kid.yvel;
    kid.yvel = 0;

    if !kid.alive() {
        kid.seq = tab.start(Seq::HardLand);
        return;
    }

    if vel < SOFT_LIMIT {
        kid.seq = tab.start(Seq::SoftLand);
        events.push(GameEvent::SoftLanded);
    } else if vel < HARD_LIMIT {
        match kid.id {
            ID_KID => {
                decstr(1);
                kid.seq = tab.start(Seq::MedLand);
                events.push(GameEvent::MediumLanded);
            }
            ID_SHADOW => {
                kid.seq = tab.start(Seq::SoftLand);
            }
            _ => {
                // guards have no medium landing in them
                kid.life = 0;
                kid.seq = tab.start(Seq::HardLand);
            }
        }
    } else {
        if kid.id == ID_KID {
            decstr(100);
        } else {
            kid.life = 0;
        }
        kid.seq = tab.start(Seq::HardLand);
        events.push(GameEvent::HardLanded);
    }
}

// ══════════════════════════════════════════════════════════════
// On the ground
// ══════════════════════════════════════════════════════════════

fn on_ground(kid: &mut Character, lvl: &Level, tab: &SeqTable) {
    if !kid.frame().on_floor() {
        return;
    }
    let under = lvl.tile_at(kid.scrn, kid.block_x, kid.block_y);
    if under.kind.is_wall(kid.face) {
        inside_block(kid, lvl);
    } else if under.kind.is_passable() {
        start_fall(kid, lvl, tab);
    }
}

/// The floor disappeared underfoot: start the fall that fits the frame
/// the character was showing.
fn start_fall(kid: &mut Character, lvl: &Level, tab: &SeqTable) {
    kid.rjump_flag = kid.posn;
    kid.sword = 0;
    kid.block_y += 1;

    let seq = match kid.posn {
        9 => Seq::StepFall,
        13 => Seq::StepFall2,
        26 => Seq::JumpFall,
        44 => Seq::RJumpFall,
        81..=85 => {
            kid.add_x(5);
            Seq::StepFall2
        }
        150..=179 => Seq::StepFall,
        _ => Seq::StepFall,
    };
    kid.seq = tab.start(seq);
    kid.reread_blocks();

    let probe = Probe::of(lvl, kid);
    if probe.under().kind.is_wall(kid.face) {
        inside_block(kid, lvl);
    }
    let probe = Probe::of(lvl, kid);
    if probe.front().kind.is_wall(kid.face) {
        // falling against a wall face: a committed running jump tucks
        // into the patched fall, anything else shaves a pixel
        if kid.rjump_flag == 44 && kid.dist_to_edge() < 6 {
            kid.seq = tab.start(Seq::PatchFall);
        } else {
            kid.add_x(-1);
        }
    }
}

/// Pushed inside a block body: shove out the near side if it is clear,
/// else out the far side.
fn inside_block(kid: &mut Character, lvl: &Level) {
    let d = kid.dist_to_edge();
    let probe = Probe::of(lvl, kid);
    if d < 8 && !probe.front().kind.is_wall(kid.face) {
        kid.add_x(d + 4);
    } else {
        kid.add_x(-(BLOCK_WIDTH - d) + 4);
    }
    kid.reread_blocks();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::character::ID_GUARD;
    use crate::sim::level::diagrams::single;

    fn no_damage() -> impl FnMut(i16) {
        |d| panic!("unexpected damage {d}")
    }

    fn falling_kid(lvl: &Level, col: u8, y: i16, yvel: i16) -> Character {
        let mut kid = Character::new(ID_KID);
        kid.posn = 107;
        kid.action = Action::FreeFall;
        kid.put_on_block(1, col);
        kid.y = y;
        kid.yvel = yvel;
        kid.reread_blocks();
        kid
    }

    #[test]
    fn lands_soft_below_the_limit() {
        let lvl = single(&["          ", "__________", "__________"]);
        let tab = SeqTable::build();
        let mut kid = falling_kid(&lvl, 4, 120, SOFT_LIMIT - 1);
        let mut ev = Vec::new();
        check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
        assert_eq!(kid.seq, tab.start(Seq::SoftLand));
        assert_eq!(kid.y, 118, "snapped to the floor line");
        assert_eq!(kid.yvel, 0);
        assert!(ev.contains(&GameEvent::SoftLanded));
    }

    #[test]
    fn lands_medium_and_pays_a_point() {
        let lvl = single(&["          ", "__________", "__________"]);
        let tab = SeqTable::build();
        let mut kid = falling_kid(&lvl, 4, 120, SOFT_LIMIT);
        let mut hits = Vec::new();
        let mut ev = Vec::new();
        check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut |d| hits.push(d), &mut ev);
        assert_eq!(kid.seq, tab.start(Seq::MedLand));
        assert_eq!(hits, vec![1]);
    }

    #[test]
    fn lands_hard_at_terminal() {
        let lvl = single(&["          ", "__________", "__________"]);
        let tab = SeqTable::build();
        let mut kid = falling_kid(&lvl, 4, 120, HARD_LIMIT);
        let mut hits = Vec::new();
        let mut ev = Vec::new();
        check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut |d| hits.push(d), &mut ev);
        assert_eq!(kid.seq, tab.start(Seq::HardLand));
        assert_eq!(hits, vec![100]);
        assert!(ev.contains(&GameEvent::HardLanded));
    }

    #[test]
    fn guards_die_on_medium_falls() {
        let lvl = single(&["          ", "__________", "__________"]);
        let tab = SeqTable::build();
        let mut g = falling_kid(&lvl, 4, 120, SOFT_LIMIT + 3);
        g.id = ID_GUARD;
        let mut ev = Vec::new();
        check_floor(&mut g, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
        assert_eq!(g.life, 0);
        assert_eq!(g.seq, tab.start(Seq::HardLand));
    }

    #[test]
    fn keeps_falling_through_space() {
        let lvl = single(&["          ", "          ", "__________"]);
        let tab = SeqTable::build();
        let mut kid = falling_kid(&lvl, 4, 120, 9);
        let by0 = kid.block_y;
        let mut ev = Vec::new();
        check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
        assert_eq!(kid.block_y, by0 + 1);
        assert_eq!(kid.action, Action::FreeFall);
    }

    #[test]
    fn grabs_a_ledge_at_31_not_32() {
        for (yvel, grabs) in [(GRAB_LIMIT - 1, true), (GRAB_LIMIT, false)] {
            let lvl = single(&["     _    ", "          ", "__________"]);
            let tab = SeqTable::build();
            let mut kid = falling_kid(&lvl, 15, 110, yvel);
            kid.face = 1;
            let mut input = InputState::new();
            input.btn = true;
            let x0 = kid.x;
            let mut ev = Vec::new();
            check_floor(&mut kid, &lvl, &tab, &input, &mut no_damage(), &mut ev);
            if grabs {
                assert_eq!(kid.posn, 87, "hanging frame");
                assert_eq!(kid.action, Action::Hang);
                assert_eq!(kid.yvel, 0);
                assert_eq!(kid.y, 118);
                assert_eq!(kid.stun, GRAB_STUN);
            } else {
                assert_eq!(kid.x, x0, "too fast: position restored");
                assert_ne!(kid.action, Action::Hang);
            }
        }
    }

    #[test]
    fn no_grab_without_the_button() {
        let lvl = single(&["     _    ", "          ", "__________"]);
        let tab = SeqTable::build();
        let mut kid = falling_kid(&lvl, 15, 110, 10);
        kid.face = 1;
        let x0 = kid.x;
        let mut ev = Vec::new();
        check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
        assert_eq!(kid.x, x0);
        assert_ne!(kid.action, Action::Hang);
    }

    #[test]
    fn standing_over_space_starts_a_fall() {
        let lvl = single(&["          ", "          ", "__________"]);
        let tab = SeqTable::build();
        let mut kid = Character::new(ID_KID);
        kid.posn = 15;
        kid.sword = 2;
        kid.put_on_block(1, 14);
        kid.action = Action::Normal;
        let mut ev = Vec::new();
        check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
        assert_eq!(kid.seq, tab.start(Seq::StepFall));
        assert_eq!(kid.rjump_flag, 15);
        assert_eq!(kid.sword, 0, "blades don't survive a fall");
        assert_eq!(kid.block_y, 2);
    }

    #[test]
    fn fall_start_matches_the_frame() {
        let lvl = single(&["          ", "          ", "__________"]);
        let tab = SeqTable::build();
        for (posn, want) in [
            (9u8, Seq::StepFall),
            (13, Seq::StepFall2),
            (26, Seq::JumpFall),
            (44, Seq::RJumpFall),
        ] {
            let mut kid = Character::new(ID_KID);
            kid.posn = posn;
            kid.put_on_block(1, 14);
            kid.action = Action::Ground;
            let mut ev = Vec::new();
            check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
            assert_eq!(kid.seq, tab.start(want), "frame {posn}");
        }
    }

    #[test]
    fn ground_check_waits_for_a_foot_frame() {
        let lvl = single(&["          ", "          ", "__________"]);
        let tab = SeqTable::build();
        let mut kid = Character::new(ID_KID);
        kid.posn = 8; // run frame without the foot bit
        kid.put_on_block(1, 14);
        kid.action = Action::Ground;
        let seq0 = kid.seq;
        let mut ev = Vec::new();
        check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
        assert_eq!(kid.seq, seq0, "no check between strides");
    }

    #[test]
    fn bumped_out_of_a_block() {
        let lvl = single(&["          ", "____#_____", "__________"]);
        let tab = SeqTable::build();
        let mut kid = Character::new(ID_KID);
        kid.posn = 15;
        kid.put_on_block(1, 14);
        kid.x += 10; // clipped into the block body, near its far edge
        kid.face = 1;
        kid.reread_blocks();
        kid.action = Action::Normal;
        let mut ev = Vec::new();
        check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
        assert_ne!(kid.block_x, 4, "no longer inside the block");
    }

    #[test]
    fn hang_actions_skip_the_check() {
        let lvl = single(&["          ", "          ", "          "]);
        let tab = SeqTable::build();
        for action in [Action::Hang, Action::HangStill] {
            let mut kid = Character::new(ID_KID);
            kid.posn = 87;
            kid.put_on_block(1, 14);
            kid.action = action;
            let before = kid.clone();
            let mut ev = Vec::new();
            check_floor(&mut kid, &lvl, &tab, &InputState::new(), &mut no_damage(), &mut ev);
            assert_eq!(kid.seq, before.seq);
            assert_eq!(kid.y, before.y);
        }
    }
}
