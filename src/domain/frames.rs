/// The static per-frame table: one record for each of the 240 animation
/// frames, plus a 40-entry alternate set used for guard bodies on frames
/// 150..189 and a 50-entry sword overlay table.
///
/// Only `dx`, `dy` and `check` matter to the simulation (`check` carries
/// the parity bit, the foot-on-floor bit and the 5-bit foot offset). The
/// image and sword selectors are passed through to the renderer.

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct FrameDef {
    /// 7-bit image index; bit 7 is the high bit of the table selector.
    pub image: u8,
    /// Low 6 bits: sword overlay slot (1..50, 0 = none).
    /// High 2 bits: low bits of the table selector.
    pub sword: u8,
    pub dx: i8,
    pub dy: i8,
    pub check: u8,
}

/// check bit 7: swap image parity when facing left.
pub const CHK_ODD: u8 = 0x80;
/// check bit 6: foot is on the floor — ground checks run on this frame.
pub const CHK_FOOT: u8 = 0x40;
/// check bits 0..4: foot offset from the frame origin.
pub const CHK_FOOT_MASK: u8 = 0x1F;

impl FrameDef {
    pub fn foot_mark(&self) -> i16 {
        (self.check & CHK_FOOT_MASK) as i16
    }

    pub fn on_floor(&self) -> bool {
        self.check & CHK_FOOT != 0
    }

    /// 3-bit image table index assembled from the two selector fields.
    pub fn table_index(&self) -> u8 {
        ((self.image >> 7) << 2) | (self.sword >> 6)
    }

    pub fn sword_slot(&self) -> u8 {
        self.sword & 0x3F
    }
}

/// Sword overlay placement for one sword slot.
#[derive(Clone, Copy, Debug, Default)]
pub struct SwordDef {
    pub image: u8,
    pub dx: i8,
    pub dy: i8,
}

const Z: FrameDef = FrameDef { image: 0, sword: 0, dx: 0, dy: 0, check: 0 };

const fn f(image: u8, sword: u8, dx: i8, dy: i8, check: u8) -> FrameDef {
    FrameDef { image, sword, dx, dy, check }
}

const fn foot(off: u8) -> u8 {
    CHK_FOOT | off
}

/// Renderer image selector for a kid frame: images above 127 live in the
/// second image table, selected through the high bit.
const fn img(posn: u16) -> u8 {
    if posn < 128 { posn as u8 } else { ((posn - 128) as u8) | 0x80 }
}

const fn build_frames() -> [FrameDef; 241] {
    let mut t = [Z; 241];
    let mut i: u16 = 1;

    // Run cycle 1..14 (1..3 are the start-run frames). Ground contact is
    // sampled on frames 9 and 13 only; the stride overshoots edges by a
    // frame or two, as the original did.
    while i <= 14 {
        let chk = if i == 9 || i == 13 { foot(2) } else { 2 };
        let odd = if i % 2 == 1 { CHK_ODD } else { 0 };
        t[i as usize] = f(img(i), 0, 2, 0, chk | odd);
        i += 1;
    }

    t[15] = f(img(15), 0, 0, 0, foot(0)); // stand

    // Standing jump: takeoff 16..19, flight 20..25, touch-down 26,
    // landing 27..28.
    while i <= 19 {
        t[i as usize] = f(img(i), 0, 2, 0, foot(2));
        i += 1;
    }
    while i <= 25 {
        t[i as usize] = f(img(i), 0, 5, -2, 0);
        i += 1;
    }
    t[26] = f(img(26), 0, 2, 0, foot(0));
    t[27] = f(img(27), 0, 1, 0, foot(1));
    t[28] = f(img(28), 0, 1, 0, foot(1));

    // Stoop approach.
    t[29] = f(img(29), 0, 1, 0, foot(1));
    t[30] = f(img(30), 0, 1, 0, foot(1));

    // Running jump: run-in 34..37, flight 38..43, touch-down 44.
    i = 34;
    while i <= 37 {
        t[i as usize] = f(img(i), 0, 3, 0, foot(3));
        i += 1;
    }
    while i <= 43 {
        t[i as usize] = f(img(i), 0, 6, -3, 0);
        i += 1;
    }
    t[44] = f(img(44), 0, 3, 1, foot(1));

    // Turn 45..48, 50..52 (49 unused).
    i = 45;
    while i <= 48 {
        t[i as usize] = f(img(i), 0, 1, 0, foot(1) | CHK_ODD);
        i += 1;
    }
    i = 50;
    while i <= 52 {
        t[i as usize] = f(img(i), 0, 1, 0, foot(1));
        i += 1;
    }

    // Walk / careful-step / run-stop frames.
    while i <= 66 {
        t[i as usize] = f(img(i), 0, 1, 0, foot(1));
        i += 1;
    }

    // Jump-up startup 67..69, airborne 70..80.
    while i <= 69 {
        t[i as usize] = f(img(i), 0, 1, 0, foot(1));
        i += 1;
    }
    while i <= 80 {
        t[i as usize] = f(img(i), 0, 0, -1, 0);
        i += 1;
    }

    // Foot-test frames.
    while i <= 85 {
        t[i as usize] = f(img(i), 0, 2, 0, foot(2));
        i += 1;
    }

    // Hang cycle 87..99 and hang-drop transition 100..101.
    i = 87;
    while i <= 101 {
        t[i as usize] = f(img(i), 0, 0, 0, 0);
        i += 1;
    }

    // Controlled fall 102..105 (ledge-grab window), freefall loop 106..108.
    while i <= 105 {
        t[i as usize] = f(img(i), 0, 3, 2, 0);
        i += 1;
    }
    while i <= 108 {
        t[i as usize] = f(img(i), 0, 0, 3, 0);
        i += 1;
    }

    t[109] = f(img(109), 0, 1, 0, foot(1)); // crouch

    // Crawl 110..113, stand-up 114..118.
    i = 110;
    while i <= 118 {
        t[i as usize] = f(img(i), 0, 1, 0, foot(1));
        i += 1;
    }

    // Climb-down 119..125, climb-up 126..134 — airborne, the sequence
    // carries the motion.
    while i <= 134 {
        t[i as usize] = f(img(i), 0, 0, 0, 0);
        i += 1;
    }

    // Stairway exit 135..140.
    while i <= 140 {
        t[i as usize] = f(img(i), 0, 2, 0, 0);
        i += 1;
    }

    // Sword pickup 141..145.
    while i <= 145 {
        t[i as usize] = f(img(i), 0, 1, 0, foot(1));
        i += 1;
    }

    // En-garde and fight frames 150..184; sword slot tracks the frame.
    i = 150;
    while i <= 184 {
        t[i as usize] = f(img(i), (i - 149) as u8, 2, 0, foot(2));
        i += 1;
    }

    t[185] = f(img(185), 0, 0, 0, foot(0)); // lying dead

    // Collapse 186..189.
    i = 186;
    while i <= 189 {
        t[i as usize] = f(img(i), 0, 1, 1, 0);
        i += 1;
    }

    // Drink 190..202.
    while i <= 202 {
        t[i as usize] = f(img(i), 0, 0, 0, foot(0));
        i += 1;
    }

    // Landings 203..206, impaled 207, halved 208.
    while i <= 206 {
        t[i as usize] = f(img(i), 0, 1, 0, foot(1));
        i += 1;
    }
    t[207] = f(img(207), 0, 0, 0, 0);
    t[208] = f(img(208), 0, 0, 0, 0);

    // Dive roll 213..216.
    i = 213;
    while i <= 216 {
        t[i as usize] = f(img(i), 0, 2, 0, foot(2));
        i += 1;
    }

    // Mouse 217..220.
    while i <= 220 {
        t[i as usize] = f(img(i), 0, 1, 0, foot(1));
        i += 1;
    }

    t
}

/// Guard bodies for frames 150..189: same geometry, different image table
/// (selector bits point at the guard sheet).
const fn build_alt() -> [FrameDef; 40] {
    let mut t = [Z; 40];
    let mut i: u16 = 0;
    while i < 40 {
        let posn = 150 + i;
        let sword = if posn <= 184 { (posn - 149) as u8 } else { 0 };
        let chk = if posn <= 184 || posn == 185 { foot(2) } else { 0 };
        t[i as usize] = f((i as u8) | 0x80, sword | 0x40, 2, 0, chk);
        i += 1;
    }
    t
}

const fn build_swords() -> [SwordDef; 51] {
    let mut t = [SwordDef { image: 0, dx: 0, dy: 0 }; 51];
    let mut i: u16 = 1;
    while i <= 50 {
        t[i as usize] = SwordDef {
            image: i as u8,
            dx: (i % 7) as i8 - 3,
            dy: -((i % 5) as i8),
        };
        i += 1;
    }
    t
}

static FRAMES: [FrameDef; 241] = build_frames();
static ALT_FRAMES: [FrameDef; 40] = build_alt();
static SWORDS: [SwordDef; 51] = build_swords();

/// Look up the frame record for a character. Shadow and guards (ids 1..4)
/// use the alternate body set on frames 150..189. Out-of-range or unused
/// frames come back as a zero record and act as no-ops.
pub fn frame(posn: u8, id: u8) -> FrameDef {
    if (1..=4).contains(&id) && (150..=189).contains(&posn) {
        return ALT_FRAMES[(posn - 150) as usize];
    }
    if posn as usize >= FRAMES.len() {
        return Z;
    }
    FRAMES[posn as usize]
}

/// Sword overlay for a slot from a frame's `sword_slot()`.
pub fn sword_frame(slot: u8) -> SwordDef {
    if slot == 0 || slot as usize >= SWORDS.len() {
        return SwordDef::default();
    }
    SWORDS[slot as usize]
}
