/// The mover system: everything in a level that moves on its own.
///
/// Two lists, scanned back to front every tick:
///
///   trobs — transitional objects: tiles animating in place. Each entry
///           is a (tile, room, dir) triple; the tile's `spec` byte holds
///           the animation phase and `dir` selects the mode (a gate
///           rising vs. slamming, for instance). Entries stop by setting
///           the −1 sentinel and are compacted after the scan.
///
///   mobs  — mobile objects: loose-floor slabs that detached and are
///           falling through open space until they crash into rubble.
///
/// Pressure plates tie into both: a stepped plate runs its link chain,
/// pointing gates and exit doors at new trob modes; a slab crashing on
/// a plate jams the plate and whatever it controls.

use crate::domain::character::Character;
use crate::domain::coords::{floor_level, ANGLE, BLOCK_WIDTH, SCRN_LEFT};
use crate::domain::tile::TileKind;
use super::event::GameEvent;
use super::level::{Level, ROOM_COLS, ROOM_TILES};

pub const MAX_TROBS: usize = 31;
pub const MAX_MOBS: usize = 15;

// Gate animation modes (trob dir).
pub const GATE_DOWN: i8 = 0;
pub const GATE_UP: i8 = 1;
pub const GATE_UPJAM: i8 = 2;
pub const GATE_FAST: i8 = 3;
/// Fully-open gate height; above it lies the hold-open timer zone.
pub const GMAX_VAL: u8 = 188;
const GATE_TIMER_TOP: u8 = 238;
const GATE_JAMMED: u8 = 0xFF;
/// Closing speed ramp for the fast (plate-released) close.
const GATE_VEL: [u8; 9] = [0, 0, 0, 20, 40, 60, 80, 100, 120];

/// Exit doors rise to this and stay.
pub const EMAX_VAL: u8 = 172;

// Slicer blade cycle.
const SLICE_TIMER: u8 = 15;
const SLICER_RET: u8 = 6;
/// Blade-shut frame: contact on this frame draws blood.
pub const SLICER_EXT: u8 = 2;
const SLICER_SYNC: u8 = 3;
const SLICER_BLOOD: u8 = 0x80;

/// Loose-floor count at which the slab lets go.
const FFALLING: u8 = 10;
const CRUMBLE_TIME: i16 = 2;
const MOB_TERMINAL: i16 = 29;

/// Plate hold time (ticks), and the timer value that means "permanent".
const PLATE_HOLD: u8 = 5;
const PLATE_PERMANENT: u8 = 31;

#[derive(Clone, Copy, Debug)]
pub struct Trob {
    pub index: u8,
    pub room: u8,
    pub dir: i8,
}

#[derive(Clone, Copy, Debug)]
pub struct Mob {
    pub x: i16,
    pub y: i16,
    pub room: u8,
    pub yvel: i16,
    pub row: i16,
}

/// What pressed a plate: a foot, or rubble jamming it for good.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Press {
    Step,
    Rubble,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum SpikeState {
    Safe,
    Deadly,
    Springing,
}

/// Spike danger classification by spec value.
pub fn get_spikes(spec: u8) -> SpikeState {
    match spec {
        1..=4 => SpikeState::Springing,
        5 | 0xFF => SpikeState::Deadly,
        s if s & 0x80 != 0 => SpikeState::Deadly,
        _ => SpikeState::Safe,
    }
}

pub struct Movers {
    pub trobs: Vec<Trob>,
    pub mobs: Vec<Mob>,
    /// Pending screen-shake frames, decayed by the scheduler.
    pub shake: u8,
}

impl Movers {
    pub fn new() -> Movers {
        Movers { trobs: Vec::new(), mobs: Vec::new(), shake: 0 }
    }

    pub fn clear(&mut self) {
        self.trobs.clear();
        self.mobs.clear();
        self.shake = 0;
    }

    fn search(&self, index: u8, room: u8) -> Option<usize> {
        self.trobs.iter().position(|t| t.index == index && t.room == room)
    }

    /// Track a tile, or re-mode it if already tracked.
    pub fn add(&mut self, index: u8, room: u8, dir: i8) {
        if let Some(i) = self.search(index, room) {
            self.trobs[i].dir = dir;
            return;
        }
        if self.trobs.len() < MAX_TROBS {
            self.trobs.push(Trob { index, room, dir });
        }
    }

    fn request_shake(&mut self, frames: u8, events: &mut Vec<GameEvent>) {
        self.shake = self.shake.max(frames);
        events.push(GameEvent::ScreenShake { frames });
    }

    // ══════════════════════════════════════════════════════════════
    // Transitional objects
    // ══════════════════════════════════════════════════════════════

    /// Advance every animating tile one frame. `cur_room` lets slicers
    /// shed themselves when their room scrolls away.
    pub fn anim_trans(&mut self, lvl: &mut Level, cur_room: u8, events: &mut Vec<GameEvent>) {
        for i in (0..self.trobs.len()).rev() {
            let t = self.trobs[i];
            let handle = (t.room, t.index as usize);
            match lvl.tile(handle).kind {
                TileKind::Gate => self.anim_gate(lvl, i, handle, events),
                TileKind::Exit | TileKind::Exit2 => self.anim_exit(lvl, i, handle),
                TileKind::Spikes => self.anim_spikes(lvl, i, handle),
                TileKind::Slicer => self.anim_slicer(lvl, i, handle, cur_room),
                TileKind::Loose => self.anim_loose(lvl, i, handle),
                TileKind::PressPlate | TileKind::UPressPlate => self.anim_plate(lvl, i, handle),
                _ => self.trobs[i].dir = -1,
            }
        }
        self.trobs.retain(|t| t.dir >= 0);
    }

    fn anim_gate(
        &mut self,
        lvl: &mut Level,
        i: usize,
        handle: (u8, usize),
        events: &mut Vec<GameEvent>,
    ) {
        let spec = lvl.tile(handle).spec;
        if spec == GATE_JAMMED {
            self.trobs[i].dir = -1;
            return;
        }
        let dir = self.trobs[i].dir;
        match dir {
            GATE_DOWN => {
                if spec == 0 {
                    self.trobs[i].dir = -1;
                } else {
                    lvl.set_spec(handle, spec - 1);
                    if spec - 1 == 0 {
                        self.trobs[i].dir = -1;
                    }
                }
            }
            GATE_UP => {
                let next = spec.saturating_add(4);
                if next >= GMAX_VAL {
                    lvl.set_spec(handle, GATE_TIMER_TOP);
                    self.trobs[i].dir = GATE_DOWN;
                } else {
                    lvl.set_spec(handle, next);
                }
            }
            GATE_UPJAM => {
                let next = spec.saturating_add(4);
                if next >= GMAX_VAL {
                    lvl.set_spec(handle, GATE_JAMMED);
                    self.trobs[i].dir = -1;
                } else {
                    lvl.set_spec(handle, next);
                }
            }
            _ => {
                // ramping slam
                let vel = GATE_VEL[(dir as usize).min(8)];
                let next = spec.saturating_sub(vel);
                lvl.set_spec(handle, next);
                if next == 0 {
                    self.trobs[i].dir = -1;
                    self.request_shake(2, events);
                    events.push(GameEvent::GateShut { room: handle.0, tile: handle.1 as u8 });
                } else {
                    self.trobs[i].dir = (dir + 1).min(8);
                }
            }
        }
    }

    fn anim_exit(&mut self, lvl: &mut Level, i: usize, handle: (u8, usize)) {
        let spec = lvl.tile(handle).spec;
        let next = spec.saturating_add(4).min(EMAX_VAL);
        lvl.set_spec(handle, next);
        if next == EMAX_VAL {
            self.trobs[i].dir = -1;
        }
    }

    fn anim_spikes(&mut self, lvl: &mut Level, i: usize, handle: (u8, usize)) {
        let spec = lvl.tile(handle).spec;
        if spec == 0xFF {
            self.trobs[i].dir = -1;
            return;
        }
        if spec & 0x80 != 0 {
            let next = spec - 1;
            if next & 0x7F == 0 {
                lvl.set_spec(handle, 6); // timer ran out, start retracting
            } else {
                lvl.set_spec(handle, next);
            }
        } else if spec < 5 {
            lvl.set_spec(handle, spec + 1);
        } else if spec == 5 {
            lvl.set_spec(handle, 0x8F); // fully out, arm the hold timer
        } else {
            let next = spec + 1;
            if next >= 9 {
                lvl.set_spec(handle, 0);
                self.trobs[i].dir = -1;
            } else {
                lvl.set_spec(handle, next);
            }
        }
    }

    fn anim_slicer(&mut self, lvl: &mut Level, i: usize, handle: (u8, usize), cur_room: u8) {
        let spec = lvl.tile(handle).spec;
        let blood = spec & SLICER_BLOOD;
        let mut frame = (spec & 0x7F) + 1;
        if frame >= SLICE_TIMER {
            frame = 0;
        }
        if frame == SLICER_RET && handle.0 != cur_room {
            // blades in rooms we left settle down until re-seeded
            lvl.set_spec(handle, 0);
            self.trobs[i].dir = -1;
            return;
        }
        lvl.set_spec(handle, blood | frame);
    }

    fn anim_loose(&mut self, lvl: &mut Level, i: usize, handle: (u8, usize)) {
        let spec = lvl.tile(handle).spec;
        if spec & 0x80 != 0 {
            // wiggle, then start the real countdown
            let next = spec + 1;
            if next > 0x83 {
                lvl.set_spec(handle, 1);
            } else {
                lvl.set_spec(handle, next);
            }
            return;
        }
        let next = spec + 1;
        if next < FFALLING {
            lvl.set_spec(handle, next);
            return;
        }
        // detach: the tile becomes air and a slab starts falling
        let col = (handle.1 % ROOM_COLS as usize) as i16;
        let row = (handle.1 / ROOM_COLS as usize) as i16;
        lvl.tile_mut(handle).become_kind(TileKind::Space);
        if self.mobs.len() < MAX_MOBS {
            self.mobs.push(Mob {
                x: SCRN_LEFT + col * BLOCK_WIDTH + ANGLE,
                y: floor_level(row - 1),
                room: handle.0,
                yvel: 0,
                row,
            });
        }
        self.trobs[i].dir = -1;
    }

    fn anim_plate(&mut self, lvl: &mut Level, i: usize, handle: (u8, usize)) {
        let idx = lvl.tile(handle).spec as usize;
        let timer = lvl.link_map[idx] & 0x1F;
        if timer > 0 {
            lvl.link_map[idx] = (lvl.link_map[idx] & 0xE0) | (timer - 1);
        }
        if lvl.link_map[idx] & 0x1F == 0 {
            self.trobs[i].dir = -1;
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Mobile objects
    // ══════════════════════════════════════════════════════════════

    pub fn anim_mobs(&mut self, lvl: &mut Level, events: &mut Vec<GameEvent>) {
        for i in (0..self.mobs.len()).rev() {
            let mut m = self.mobs[i];

            if m.yvel < 0 {
                // crumbling on the ground
                m.yvel += 1;
                if m.yvel == 0 {
                    self.mobs.remove(i);
                } else {
                    self.mobs[i] = m;
                }
                continue;
            }

            m.yvel = (m.yvel + 3).min(MOB_TERMINAL);
            m.y += m.yvel;

            if m.room == 0 && m.y >= 192 + 17 {
                self.mobs.remove(i);
                continue;
            }

            if m.y >= floor_level(m.row) {
                if m.row >= 2 {
                    // out the bottom of the room
                    let down = lvl.room(m.room).map(|r| r.down).unwrap_or(0);
                    if down != 0 {
                        m.room = down;
                        m.row = 0;
                        m.y -= 189;
                    } else {
                        m.room = 0;
                    }
                    self.mobs[i] = m;
                    continue;
                }

                let col = (m.x - SCRN_LEFT) / BLOCK_WIDTH;
                match lvl.resolve(m.room, col, m.row + 1) {
                    None => {
                        m.row += 1;
                        self.mobs[i] = m;
                    }
                    Some(target) => match lvl.tile(target).kind {
                        TileKind::Space => {
                            m.row += 1;
                            self.mobs[i] = m;
                        }
                        TileKind::Loose => {
                            self.knock_loose(lvl, target);
                            m.yvel /= 2;
                            m.row += 1;
                            self.mobs[i] = m;
                        }
                        _ => {
                            m.y = floor_level(m.row);
                            m.yvel = -CRUMBLE_TIME;
                            self.make_rubble(lvl, target, events);
                            self.request_shake(4, events);
                            events.push(GameEvent::FloorCrashed {
                                room: target.0,
                                tile: target.1 as u8,
                            });
                            self.mobs[i] = m;
                        }
                    },
                }
            } else {
                self.mobs[i] = m;
            }
        }
    }

    /// A slab hit this tile: pressure plates underneath jam first, then
    /// the tile turns to rubble.
    fn make_rubble(&mut self, lvl: &mut Level, handle: (u8, usize), events: &mut Vec<GameEvent>) {
        if lvl.tile(handle).kind.is_plate() {
            self.jam_plate(lvl, handle, events);
        }
        lvl.tile_mut(handle).become_kind(TileKind::Rubble);
    }

    // ══════════════════════════════════════════════════════════════
    // Pressure plates and link chains
    // ══════════════════════════════════════════════════════════════

    /// A foot landed on the plate under this character.
    pub fn check_press(&mut self, lvl: &mut Level, ch: &Character, events: &mut Vec<GameEvent>) {
        if let Some(handle) = lvl.resolve(ch.scrn, ch.block_x, ch.block_y) {
            if lvl.tile(handle).kind.is_plate() {
                self.push_plate(lvl, handle, Press::Step, events);
            }
        }
    }

    pub fn push_plate(
        &mut self,
        lvl: &mut Level,
        handle: (u8, usize),
        press: Press,
        events: &mut Vec<GameEvent>,
    ) {
        let plate_kind = lvl.tile(handle).kind;
        let idx = lvl.tile(handle).spec as usize;
        let timer = lvl.link_map[idx] & 0x1F;
        if timer >= PLATE_PERMANENT {
            return;
        }
        set_link_timer(lvl, idx, PLATE_HOLD);
        if timer < 2 {
            self.add(handle.1 as u8, handle.0, 0);
        }
        self.trigger_chain(lvl, idx, plate_kind, press, events);
    }

    /// Rubble landed on a plate: the plate dies in the pressed state,
    /// then the press cascades through the normal plate path, so a
    /// permanent link shrugs the rubble off like any other press.
    pub fn jam_plate(&mut self, lvl: &mut Level, handle: (u8, usize), events: &mut Vec<GameEvent>) {
        match lvl.tile(handle).kind {
            TileKind::PressPlate => lvl.tile_mut(handle).kind = TileKind::DPressPlate,
            // the spec stays put: the link index still drives the cascade
            TileKind::UPressPlate => lvl.tile_mut(handle).kind = TileKind::Floor,
            _ => return,
        }
        self.push_plate(lvl, handle, Press::Rubble, events);
        if lvl.tile(handle).kind == TileKind::Floor {
            lvl.set_spec(handle, 0);
        }
    }

    /// Walk a link chain and point each target at its new behavior.
    fn trigger_chain(
        &mut self,
        lvl: &mut Level,
        start: usize,
        plate_kind: TileKind,
        press: Press,
        events: &mut Vec<GameEvent>,
    ) {
        let mut i = start;
        loop {
            let loc = lvl.link_loc[i];
            let map = lvl.link_map[i];
            let pos = loc & 0x1F;
            let scrn = (((map & 0xE0) >> 5) << 2) | ((loc & 0x60) >> 5);

            if (pos as usize) < ROOM_TILES && lvl.room(scrn).is_some() {
                let target = (scrn, pos as usize);
                match lvl.tile(target).kind {
                    TileKind::Gate => self.trig_gate(lvl, target, plate_kind, press, events),
                    TileKind::Exit | TileKind::Exit2 => self.add(pos, scrn, GATE_UP),
                    _ => {}
                }
            }

            if loc & 0x80 != 0 || i == 255 {
                break;
            }
            i += 1;
        }
    }

    fn trig_gate(
        &mut self,
        lvl: &mut Level,
        handle: (u8, usize),
        plate_kind: TileKind,
        press: Press,
        _events: &mut Vec<GameEvent>,
    ) {
        let spec = lvl.tile(handle).spec;
        if spec == GATE_JAMMED {
            return;
        }
        if press == Press::Rubble {
            self.add(handle.1 as u8, handle.0, GATE_UPJAM);
            return;
        }
        match plate_kind {
            TileKind::UPressPlate => {
                if spec > GMAX_VAL {
                    // already at the top: just rewind the hold timer
                    lvl.set_spec(handle, GATE_TIMER_TOP);
                    self.add(handle.1 as u8, handle.0, GATE_DOWN);
                } else {
                    self.add(handle.1 as u8, handle.0, GATE_UP);
                }
            }
            _ => self.add(handle.1 as u8, handle.0, GATE_FAST),
        }
    }

    // ══════════════════════════════════════════════════════════════
    // Triggers
    // ══════════════════════════════════════════════════════════════

    /// Arm spikes the character is standing on or walking into.
    pub fn check_spikes(&mut self, lvl: &mut Level, ch: &Character) {
        for dc in [0, ch.face] {
            if let Some(h) = lvl.resolve(ch.scrn, ch.block_x + dc, ch.block_y) {
                if lvl.tile(h).kind == TileKind::Spikes {
                    self.trig_spikes(lvl, h);
                }
            }
        }
    }

    pub fn trig_spikes(&mut self, lvl: &mut Level, handle: (u8, usize)) {
        let spec = lvl.tile(handle).spec;
        if spec == 0xFF {
            return; // jammed forever
        }
        if spec == 0 {
            lvl.set_spec(handle, 1);
            self.add(handle.1 as u8, handle.0, 0);
        } else if spec & 0x80 != 0 {
            lvl.set_spec(handle, 0x8F); // rewind the hold
        }
    }

    pub fn trig_slicer(&mut self, lvl: &mut Level, handle: (u8, usize)) {
        let spec = lvl.tile(handle).spec;
        let frame = spec & 0x7F;
        if frame == 0 || frame > SLICER_RET {
            lvl.set_spec(handle, (spec & SLICER_BLOOD) | 1);
            self.add(handle.1 as u8, handle.0, 0);
        }
    }

    /// Prime every slicer in a freshly entered room, staggered so a
    /// corridor of blades runs out of phase.
    pub fn add_slicers(&mut self, lvl: &mut Level, room: u8) {
        if lvl.room(room).is_none() {
            return;
        }
        let mut slot: u8 = 0;
        for idx in 0..ROOM_TILES {
            let handle = (room, idx);
            if lvl.tile(handle).kind == TileKind::Slicer {
                let blood = lvl.tile(handle).spec & SLICER_BLOOD;
                lvl.set_spec(handle, blood | ((slot * SLICER_SYNC) % SLICE_TIMER));
                self.add(idx as u8, room, 0);
                slot += 1;
            }
        }
    }

    pub fn break_loose(&mut self, lvl: &mut Level, handle: (u8, usize)) {
        let tile = lvl.tile(handle);
        if tile.required || tile.spec != 0 {
            return;
        }
        lvl.set_spec(handle, 1);
        self.add(handle.1 as u8, handle.0, 0);
    }

    fn knock_loose(&mut self, lvl: &mut Level, handle: (u8, usize)) {
        let tile = lvl.tile(handle);
        if !tile.required && tile.spec == 0 {
            lvl.set_spec(handle, 0x80);
            self.add(handle.1 as u8, handle.0, 0);
        }
    }

    /// Start every unbroken loose floor in a row wiggling.
    pub fn shakem(&mut self, lvl: &mut Level, room: u8, row: i16) {
        if !(0..3).contains(&row) || lvl.room(room).is_none() {
            return;
        }
        for col in 0..ROOM_COLS {
            let handle = (room, (row * ROOM_COLS + col) as usize);
            let tile = lvl.tile(handle);
            if tile.kind == TileKind::Loose && !tile.required && tile.spec == 0 {
                lvl.set_spec(handle, 0x80);
                self.add(handle.1 as u8, handle.0, 0);
            }
        }
    }

    /// The tile underfoot gives way if it is loose.
    pub fn shake_loose(&mut self, lvl: &mut Level, ch: &Character) {
        if let Some(h) = lvl.resolve(ch.scrn, ch.block_x, ch.block_y) {
            if lvl.tile(h).kind == TileKind::Loose {
                self.break_loose(lvl, h);
            }
        }
    }
}

fn set_link_timer(lvl: &mut Level, idx: usize, timer: u8) {
    lvl.link_map[idx] = (lvl.link_map[idx] & 0xE0) | (timer & 0x1F);
}

// ══════════════════════════════════════════════════════════════
// Contact predicates
// ══════════════════════════════════════════════════════════════

/// Standing in armed spikes. Jams them (bloodied spikes stay out) and
/// reports the kill.
pub fn check_impale(lvl: &mut Level, ch: &Character) -> bool {
    let handle = match lvl.resolve(ch.scrn, ch.block_x, ch.block_y) {
        Some(h) => h,
        None => return false,
    };
    let tile = lvl.tile(handle);
    if tile.kind != TileKind::Spikes || get_spikes(tile.spec) == SpikeState::Safe {
        return false;
    }
    lvl.set_spec(handle, 0xFF);
    true
}

/// Caught by a closing blade on the character's row (own column and
/// both neighbors). Marks the blade bloody.
pub fn check_slice(lvl: &mut Level, ch: &Character) -> bool {
    for dc in -1..=1 {
        if let Some(handle) = lvl.resolve(ch.scrn, ch.block_x + dc, ch.block_y) {
            let tile = lvl.tile(handle);
            if tile.kind == TileKind::Slicer && tile.spec & 0x7F == SLICER_EXT {
                lvl.set_spec(handle, tile.spec | SLICER_BLOOD);
                return true;
            }
        }
    }
    false
}
