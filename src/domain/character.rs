/// Character state: the kid, the guard, and anything else the sequence
/// interpreter can drive. One record per character; the interpreter,
/// player control and floor check all mutate it in turn.

use super::coords;
use super::frames;

/// What the character is doing, as far as physics is concerned. Set by
/// the `act` opcode in sequence programs.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Action {
    /// Upright on the ground.
    Normal,
    /// On the ground, moving (run, jump takeoffs, steps).
    Ground,
    /// Hanging from a ledge.
    Hang,
    /// Falling but still sequence-driven (ledge grabs allowed).
    MidFall,
    /// Ballistic: gravity and x-velocity apply.
    FreeFall,
    /// Knocked out of a block, or lying dead/crouched; ground checks
    /// only run on a couple of frames.
    Bumped,
    /// Stable hang; floor check suppressed entirely.
    HangStill,
    /// Ground variant used by turn-style frames.
    Turned,
}

impl Action {
    pub fn from_u8(v: u8) -> Action {
        match v {
            1 => Action::Ground,
            2 => Action::Hang,
            3 => Action::MidFall,
            4 => Action::FreeFall,
            5 => Action::Bumped,
            6 => Action::HangStill,
            7 => Action::Turned,
            _ => Action::Normal,
        }
    }

    pub fn as_u8(self) -> u8 {
        match self {
            Action::Normal => 0,
            Action::Ground => 1,
            Action::Hang => 2,
            Action::MidFall => 3,
            Action::FreeFall => 4,
            Action::Bumped => 5,
            Action::HangStill => 6,
            Action::Turned => 7,
        }
    }

    /// Standing-on-something states that go through the ground check.
    pub fn grounded(self) -> bool {
        matches!(self, Action::Normal | Action::Ground | Action::Turned)
    }
}

/// Character ids: 0 kid, 1 shadow, 2+ guards, 24 mouse.
pub const ID_KID: u8 = 0;
pub const ID_SHADOW: u8 = 1;
pub const ID_GUARD: u8 = 2;
pub const ID_MOUSE: u8 = 24;

#[derive(Clone, Debug)]
pub struct Character {
    /// Current frame number 1..240.
    pub posn: u8,
    /// Foot X in 140-column coordinates (58..197 inside the room).
    pub x: i16,
    /// Foot Y in scanlines.
    pub y: i16,
    /// −1 facing left, +1 facing right.
    pub face: i16,
    pub block_x: i16,
    pub block_y: i16,
    pub action: Action,
    pub xvel: i16,
    pub yvel: i16,
    /// Program counter: byte offset into the sequence table.
    pub seq: u16,
    /// Room number 1..24 (0 = nowhere).
    pub scrn: u8,
    /// Step-distance memory used by the careful-step sequences.
    pub repeat: u8,
    pub id: u8,
    /// 0 no sword, 2 en-garde (drives the sword overlay).
    pub sword: u8,
    /// −1 alive, 0 dead.
    pub life: i16,
    /// Ticks of post-grab stun during which climbing is refused.
    pub stun: u8,
    /// Frame number at which a fall began; drives the running-jump
    /// wall-correction patch.
    pub rjump_flag: u8,
}

impl Character {
    pub fn new(id: u8) -> Character {
        Character {
            posn: 15,
            x: 0,
            y: 0,
            face: -1,
            block_x: 0,
            block_y: 0,
            action: Action::Normal,
            xvel: 0,
            yvel: 0,
            seq: 0,
            scrn: 0,
            repeat: 0,
            id,
            sword: 0,
            life: -1,
            stun: 0,
            rjump_flag: 0,
        }
    }

    pub fn alive(&self) -> bool {
        self.life < 0
    }

    pub fn frame(&self) -> frames::FrameDef {
        frames::frame(self.posn, self.id)
    }

    /// Face-relative move: positive `dx` is forward, whichever way the
    /// character faces.
    pub fn add_x(&mut self, dx: i16) {
        self.x += self.face * dx;
    }

    /// Notional foot/center X for all block and distance queries,
    /// corrected by the current frame's geometry.
    pub fn base_x(&self) -> i16 {
        let fr = self.frame();
        self.x + self.face * (fr.dx as i16 - fr.foot_mark())
    }

    /// Pixels to the block edge in the facing direction (0..13).
    pub fn dist_to_edge(&self) -> i16 {
        let (_, off) = coords::block_x_center(self.base_x());
        if self.face > 0 { coords::BLOCK_WIDTH - 1 - off } else { off }
    }

    /// Recompute the block position from the current X/Y and frame.
    pub fn reread_blocks(&mut self) {
        let (bx, _) = coords::block_x_center(self.base_x());
        self.block_x = bx;
        self.block_y = coords::block_y(self.y);
    }

    /// Gravity acts only in freefall. The weightless potion drops the
    /// pull and the terminal velocity.
    pub fn apply_gravity(&mut self, weightless: bool) {
        if self.action != Action::FreeFall {
            return;
        }
        if weightless {
            self.yvel = (self.yvel + 1).min(4);
        } else {
            self.yvel = (self.yvel + 3).min(33);
        }
    }

    /// Velocity integration: Y always, forward X only while ballistic.
    pub fn add_fall(&mut self) {
        self.y += self.yvel;
        if self.action == Action::FreeFall {
            let dx = self.xvel;
            self.add_x(dx);
        }
    }

    /// Place the character on a block of a room: foot centered on the
    /// column, on the row's floor line.
    pub fn put_on_block(&mut self, scrn: u8, block: u8) {
        let col = (block % 10) as i16;
        let row = (block / 10) as i16;
        self.scrn = scrn;
        self.x = coords::block_ej(col) + coords::ANGLE;
        self.y = coords::floor_level(row);
        self.block_x = col;
        self.block_y = row;
    }
}
