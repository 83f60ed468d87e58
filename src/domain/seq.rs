/// The sequence table and its interpreter.
///
/// Every character animation is a little byte-code program in one shared
/// table. The table opens with 114 little-endian 2-byte entry pointers
/// (one per named sequence), followed by the program bytes. A character's
/// `seq` field is a byte offset into this table; advancing a character
/// means running its program until exactly one frame byte is emitted.
///
/// Bytes below the opcode range emit a frame; bytes 0xF1..0xFF are ops:
///
/// | byte | op        | operands | effect                                |
/// |------|-----------|----------|---------------------------------------|
/// | 0xFF | goto      | addr lo, hi | jump                               |
/// | 0xFE | aboutface | —        | flip facing                           |
/// | 0xFD | up        | —        | block row −1                          |
/// | 0xFC | down      | —        | block row +1                          |
/// | 0xFB | chx       | i8       | face-relative X delta                 |
/// | 0xFA | chy       | i8       | Y delta                               |
/// | 0xF9 | act       | u8       | set action                            |
/// | 0xF8 | setfall   | i8, i8   | set x/y velocity                      |
/// | 0xF7 | ifwtless  | addr lo, hi | jump when weightless               |
/// | 0xF6 | die       | —        | signal only                           |
/// | 0xF5 | jaru      | —        | signal: jar the floor above           |
/// | 0xF4 | jard      | —        | signal: jar the floor below           |
/// | 0xF3 | effect    | u8       | signal: trigger potion/pickup logic   |
/// | 0xF2 | tap       | u8       | signal: sound tap                     |
/// | 0xF1 | nextlevel | —        | signal: level finished                |
///
/// The signals never mutate interpreter state; the scheduler reads them
/// from the returned record once per tick.

use super::character::{Action, Character};

pub const SEQ_COUNT: usize = 114;
pub const HEADER_LEN: usize = SEQ_COUNT * 2;

pub const OP_GOTO: u8 = 0xFF;
pub const OP_ABOUTFACE: u8 = 0xFE;
pub const OP_UP: u8 = 0xFD;
pub const OP_DOWN: u8 = 0xFC;
pub const OP_CHX: u8 = 0xFB;
pub const OP_CHY: u8 = 0xFA;
pub const OP_ACT: u8 = 0xF9;
pub const OP_SETFALL: u8 = 0xF8;
pub const OP_IFWTLESS: u8 = 0xF7;
pub const OP_DIE: u8 = 0xF6;
pub const OP_JARU: u8 = 0xF5;
pub const OP_JARD: u8 = 0xF4;
pub const OP_EFFECT: u8 = 0xF3;
pub const OP_TAP: u8 = 0xF2;
pub const OP_NEXTLEVEL: u8 = 0xF1;

/// Opcode chains longer than this fail the tick instead of spinning.
pub const OPCODE_BUDGET: u32 = 200;

/// The named sequences, numbered as the dispatch header lays them out.
/// The careful-step family must sit at 28 + distance (Step1..Step11).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
#[repr(u8)]
pub enum Seq {
    StartRun = 1,
    Stand = 2,
    StandJump = 3,
    RunJump = 4,
    Turn = 5,
    RunTurn = 6,
    StepFall = 7,
    JumpHangMed = 8,
    Hang = 9,
    ClimbUp = 10,
    HangDrop = 11,
    HangFall = 12,
    FreeFall = 13,
    RunStop = 14,
    JumpUp = 15,
    FallHang = 16,
    JumpBackHang = 17,
    SoftLand = 18,
    JumpFall = 19,
    StepFall2 = 20,
    MedLand = 21,
    RJumpFall = 22,
    HardLand = 23,
    HangStraight = 24,
    TurnRun = 25,
    Running = 26,
    Stoop = 27,
    Crawl = 28,
    Step1 = 29,
    Step2 = 30,
    Step3 = 31,
    Step4 = 32,
    Step5 = 33,
    Step6 = 34,
    Step7 = 35,
    Step8 = 36,
    Step9 = 37,
    Step10 = 38,
    Step11 = 39,
    TestFoot = 40,
    StandUp = 41,
    CrouchHold = 42,
    DiveRoll = 43,
    ClimbDown = 44,
    ClimbFail = 45,
    ClimbStairs = 46,
    StairsTop = 47,
    PickUpSword = 48,
    DrinkPotion = 49,
    JumpHangLong = 50,
    HighJump = 51,
    PatchFall = 52,
    Dead = 53,
    DropDead = 54,
    Impaled = 55,
    ImpaledStill = 56,
    Halved = 57,
    HalvedStill = 58,
    GuardEngarde = 59,
    GuardStand = 60,
    GuardAdvance = 61,
    GuardRetreat = 62,
    GuardStrike = 63,
    GuardBlock = 64,
    GuardStruck = 65,
    GuardDie = 66,
    MouseClimb = 67,
    MouseLeave = 68,
    AlertStand = 69,
    TurnDraw = 70,
    Resheathe = 71,
    FastSheathe = 72,
    StepBack = 73,
    Flee = 74,
    TurnToFlee = 75,
    StrikeAdvance = 76,
    StrikeRetreat = 77,
    ReadyBlock = 78,
    BlockToStrike = 79,
    ReadyStrike = 80,
    BlockedStrike = 81,
    LandEngarde = 82,
    BumpEngardeFwd = 83,
    BumpEngardeBack = 84,
    Stabbed = 85,
    StabKill = 86,
    Bump = 87,
    BumpFall = 88,
    VizierStand = 89,
    VizierWalk = 90,
    VizierStop = 91,
    VizierExit = 92,
    VizierRaise = 93,
    PrincessStand = 94,
    PrincessAlert = 95,
    PrincessStepBack = 96,
    PrincessLookDown = 97,
    PrincessEmbrace = 98,
    PrincessStroke = 99,
    PrincessLie = 100,
    PrincessWaiting = 101,
    MouseRaise = 102,
    MouseStand = 103,
    MouseCrawl = 104,
    GuardAlert = 105,
    GuardBumpFwd = 106,
    GuardBumpBack = 107,
    GuardStabbed = 108,
    GuardFlee = 109,
    SuperHighJump = 110,
    CrawlStop = 111,
    Slump = 112,
    PrincessRun = 113,
    StandEngarde = 114,
}

/// Assembler source instruction. One-to-one with the opcode table, with
/// jump targets by sequence name instead of raw address.
#[derive(Clone, Copy, Debug)]
pub enum Ins {
    Fr(u8),
    Go(Seq),
    IfW(Seq),
    Flip,
    Up,
    Dn,
    Cx(i8),
    Cy(i8),
    Act(u8),
    Fall(i8, i8),
    Die,
    JarU,
    JarD,
    Fx(u8),
    Tap(u8),
    Next,
}

impl Ins {
    fn len(&self) -> usize {
        match self {
            Ins::Fr(_) | Ins::Flip | Ins::Up | Ins::Dn | Ins::Die | Ins::JarU | Ins::JarD
            | Ins::Next => 1,
            Ins::Cx(_) | Ins::Cy(_) | Ins::Act(_) | Ins::Fx(_) | Ins::Tap(_) => 2,
            Ins::Go(_) | Ins::IfW(_) | Ins::Fall(_, _) => 3,
        }
    }
}

/// The assembled table: dispatch header followed by program bytes.
pub struct SeqTable {
    bytes: Vec<u8>,
}

impl SeqTable {
    /// Assemble the embedded sequence programs. Two passes: lay the
    /// sequences out in id order to fix their addresses, then emit with
    /// jump targets resolved.
    pub fn build() -> SeqTable {
        let programs = super::seqdata::programs();
        assert_eq!(programs.len(), SEQ_COUNT, "one program per dispatch slot");

        let mut starts = [0u16; SEQ_COUNT + 1];
        let mut addr = HEADER_LEN;
        for (id, (seq, code)) in programs.iter().enumerate() {
            assert_eq!(*seq as usize, id + 1, "programs listed in id order");
            starts[id + 1] = addr as u16;
            addr += code.iter().map(Ins::len).sum::<usize>();
        }

        let mut bytes = Vec::with_capacity(addr);
        for id in 1..=SEQ_COUNT {
            bytes.extend_from_slice(&starts[id].to_le_bytes());
        }
        for (_, code) in &programs {
            for ins in code {
                match *ins {
                    Ins::Fr(n) => bytes.push(n),
                    Ins::Go(s) => {
                        bytes.push(OP_GOTO);
                        bytes.extend_from_slice(&starts[s as usize].to_le_bytes());
                    }
                    Ins::IfW(s) => {
                        bytes.push(OP_IFWTLESS);
                        bytes.extend_from_slice(&starts[s as usize].to_le_bytes());
                    }
                    Ins::Flip => bytes.push(OP_ABOUTFACE),
                    Ins::Up => bytes.push(OP_UP),
                    Ins::Dn => bytes.push(OP_DOWN),
                    Ins::Cx(d) => {
                        bytes.push(OP_CHX);
                        bytes.push(d as u8);
                    }
                    Ins::Cy(d) => {
                        bytes.push(OP_CHY);
                        bytes.push(d as u8);
                    }
                    Ins::Act(a) => {
                        bytes.push(OP_ACT);
                        bytes.push(a);
                    }
                    Ins::Fall(vx, vy) => {
                        bytes.push(OP_SETFALL);
                        bytes.push(vx as u8);
                        bytes.push(vy as u8);
                    }
                    Ins::Die => bytes.push(OP_DIE),
                    Ins::JarU => bytes.push(OP_JARU),
                    Ins::JarD => bytes.push(OP_JARD),
                    Ins::Fx(c) => {
                        bytes.push(OP_EFFECT);
                        bytes.push(c);
                    }
                    Ins::Tap(c) => {
                        bytes.push(OP_TAP);
                        bytes.push(c);
                    }
                    Ins::Next => bytes.push(OP_NEXTLEVEL),
                }
            }
        }

        SeqTable { bytes }
    }

    #[cfg(test)]
    pub fn from_raw(bytes: Vec<u8>) -> SeqTable {
        SeqTable { bytes }
    }

    /// Entry address of a named sequence.
    pub fn start(&self, seq: Seq) -> u16 {
        let slot = (seq as usize - 1) * 2;
        u16::from_le_bytes([self.bytes[slot], self.bytes[slot + 1]])
    }

    /// The careful-step sequence for a forward distance 1..11.
    pub fn step_seq(&self, dist: u8) -> u16 {
        let id = 28 + dist.clamp(1, 11) as usize;
        let slot = (id - 1) * 2;
        u16::from_le_bytes([self.bytes[slot], self.bytes[slot + 1]])
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    fn byte(&self, at: u16) -> Option<u8> {
        self.bytes.get(at as usize).copied()
    }
}

/// Everything a single interpreter step can report back.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SeqSignals {
    pub die: bool,
    pub next_level: bool,
    pub jar_above: bool,
    pub jar_below: bool,
    pub effect: Option<u8>,
    pub tap: Option<u8>,
}

/// A malformed or runaway program. The character keeps its previous
/// frame; the scheduler reports and carries on next tick.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SeqFault {
    pub offset: u16,
}

/// Advance a character by exactly one frame. Opcodes before the frame
/// byte are applied in stream order; signals are collected, never acted
/// on here.
pub fn anim_char(
    ch: &mut Character,
    tab: &SeqTable,
    weightless: bool,
) -> Result<SeqSignals, SeqFault> {
    let entry = ch.seq;
    let mut sig = SeqSignals::default();
    let mut budget = OPCODE_BUDGET;

    loop {
        if budget == 0 {
            ch.seq = entry;
            return Err(SeqFault { offset: ch.seq });
        }
        budget -= 1;

        let b = match tab.byte(ch.seq) {
            Some(b) => b,
            None => {
                ch.seq = entry;
                return Err(SeqFault { offset: entry });
            }
        };
        ch.seq += 1;

        if b < OP_NEXTLEVEL {
            ch.posn = b;
            return Ok(sig);
        }

        match b {
            OP_GOTO => {
                let lo = tab.byte(ch.seq);
                let hi = tab.byte(ch.seq + 1);
                match (lo, hi) {
                    (Some(lo), Some(hi)) => ch.seq = u16::from_le_bytes([lo, hi]),
                    _ => {
                        ch.seq = entry;
                        return Err(SeqFault { offset: entry });
                    }
                }
            }
            OP_IFWTLESS => {
                let lo = tab.byte(ch.seq);
                let hi = tab.byte(ch.seq + 1);
                ch.seq += 2;
                if weightless {
                    match (lo, hi) {
                        (Some(lo), Some(hi)) => ch.seq = u16::from_le_bytes([lo, hi]),
                        _ => {
                            ch.seq = entry;
                            return Err(SeqFault { offset: entry });
                        }
                    }
                }
            }
            OP_ABOUTFACE => ch.face = -ch.face,
            OP_UP => ch.block_y -= 1,
            OP_DOWN => ch.block_y += 1,
            OP_CHX => {
                let d = read_i8(tab, ch, entry)?;
                ch.add_x(d as i16);
            }
            OP_CHY => {
                let d = read_i8(tab, ch, entry)?;
                ch.y += d as i16;
            }
            OP_ACT => {
                let a = read_u8(tab, ch, entry)?;
                ch.action = Action::from_u8(a);
            }
            OP_SETFALL => {
                let vx = read_i8(tab, ch, entry)?;
                let vy = read_i8(tab, ch, entry)?;
                ch.xvel = vx as i16;
                ch.yvel = vy as i16;
            }
            OP_DIE => sig.die = true,
            OP_JARU => sig.jar_above = true,
            OP_JARD => sig.jar_below = true,
            OP_EFFECT => sig.effect = Some(read_u8(tab, ch, entry)?),
            OP_TAP => sig.tap = Some(read_u8(tab, ch, entry)?),
            OP_NEXTLEVEL => sig.next_level = true,
            _ => unreachable!(),
        }
    }
}

fn read_u8(tab: &SeqTable, ch: &mut Character, entry: u16) -> Result<u8, SeqFault> {
    match tab.byte(ch.seq) {
        Some(b) => {
            ch.seq += 1;
            Ok(b)
        }
        None => {
            ch.seq = entry;
            Err(SeqFault { offset: entry })
        }
    }
}

fn read_i8(tab: &SeqTable, ch: &mut Character, entry: u16) -> Result<i8, SeqFault> {
    read_u8(tab, ch, entry).map(|b| b as i8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::character::{Character, ID_KID};

    fn kid_at(tab: &SeqTable, seq: Seq) -> Character {
        let mut c = Character::new(ID_KID);
        c.x = 128;
        c.y = 55;
        c.seq = tab.start(seq);
        c
    }

    #[test]
    fn header_points_every_sequence_into_the_program() {
        let tab = SeqTable::build();
        let all = crate::domain::seqdata::programs();
        for (seq, _) in all {
            let s = tab.start(seq) as usize;
            assert!(s >= HEADER_LEN && s < tab.len(), "{seq:?} -> {s}");
        }
    }

    #[test]
    fn step_sequences_sit_at_28_plus_distance() {
        let tab = SeqTable::build();
        assert_eq!(tab.step_seq(1), tab.start(Seq::Step1));
        assert_eq!(tab.step_seq(11), tab.start(Seq::Step11));
        assert_eq!(tab.step_seq(40), tab.start(Seq::Step11));
    }

    #[test]
    fn stand_emits_one_frame_per_tick_forever() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::Stand);
        for _ in 0..50 {
            anim_char(&mut c, &tab, false).unwrap();
            assert_eq!(c.posn, 15);
        }
    }

    #[test]
    fn run_cycle_walks_frames_4_to_14() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::Running);
        let mut seen = Vec::new();
        for _ in 0..22 {
            anim_char(&mut c, &tab, false).unwrap();
            seen.push(c.posn);
        }
        assert_eq!(&seen[..11], &[4, 5, 6, 7, 8, 9, 10, 11, 12, 13, 14]);
        assert_eq!(&seen[11..], &seen[..11], "cycle repeats");
    }

    #[test]
    fn startrun_moves_forward_face_relative() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::StartRun);
        c.face = -1;
        let x0 = c.x;
        for _ in 0..3 {
            anim_char(&mut c, &tab, false).unwrap();
        }
        assert!(c.x < x0, "facing left runs toward lower X");
        assert_eq!(c.posn, 3);
    }

    #[test]
    fn turn_flips_facing_once() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::Turn);
        c.face = -1;
        anim_char(&mut c, &tab, false).unwrap();
        assert_eq!(c.face, 1);
        for _ in 0..6 {
            anim_char(&mut c, &tab, false).unwrap();
        }
        assert_eq!(c.face, 1);
        assert_eq!(c.posn, 52);
    }

    #[test]
    fn hardland_signals_death_once() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::HardLand);
        let mut deaths = 0;
        for _ in 0..10 {
            let sig = anim_char(&mut c, &tab, false).unwrap();
            if sig.die {
                deaths += 1;
            }
        }
        assert_eq!(deaths, 1);
        assert_eq!(c.posn, 185, "settles on the lying frame");
    }

    #[test]
    fn drink_fires_the_effect_midway() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::DrinkPotion);
        let mut fired = 0;
        for _ in 0..20 {
            let sig = anim_char(&mut c, &tab, false).unwrap();
            if sig.effect == Some(1) {
                fired += 1;
            }
        }
        assert_eq!(fired, 1);
    }

    #[test]
    fn climb_up_rises_one_row() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::ClimbUp);
        c.y = 118;
        c.block_y = 1;
        for _ in 0..12 {
            anim_char(&mut c, &tab, false).unwrap();
        }
        assert_eq!(c.block_y, 0);
        assert_eq!(c.y, 55, "one block height climbed");
    }

    #[test]
    fn climb_down_descends_one_row() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::ClimbDown);
        c.y = 55;
        c.block_y = 0;
        for _ in 0..12 {
            anim_char(&mut c, &tab, false).unwrap();
        }
        assert_eq!(c.block_y, 1);
        assert_eq!(c.y, 118);
    }

    #[test]
    fn weightless_branch_is_taken_only_when_weightless() {
        let tab = SeqTable::build();
        let mut c = kid_at(&tab, Seq::HighJump);
        for _ in 0..3 {
            anim_char(&mut c, &tab, false).unwrap();
        }
        let heavy = anim_char(&mut c, &tab, false).unwrap();
        assert!(heavy.tap.is_none());

        let mut f = kid_at(&tab, Seq::HighJump);
        for _ in 0..3 {
            anim_char(&mut f, &tab, true).unwrap();
        }
        anim_char(&mut f, &tab, true).unwrap();
        assert_ne!(c.posn, f.posn, "weightless float takes its own frames");
    }

    #[test]
    fn one_frame_per_tick_across_many_sequences() {
        let tab = SeqTable::build();
        for seq in [
            Seq::Running,
            Seq::StandJump,
            Seq::RunJump,
            Seq::FreeFall,
            Seq::Hang,
            Seq::CrouchHold,
            Seq::GuardStand,
        ] {
            let mut c = kid_at(&tab, seq);
            let mut frames = 0;
            for _ in 0..40 {
                anim_char(&mut c, &tab, false).unwrap();
                frames += 1;
            }
            assert_eq!(frames, 40, "{seq:?}");
        }
    }

    #[test]
    fn runaway_goto_trips_the_budget_and_freezes() {
        // hand-assembled table: one sequence whose program is `goto self`
        let mut bytes = vec![0u8; HEADER_LEN];
        let start = (HEADER_LEN as u16).to_le_bytes();
        bytes[0] = start[0];
        bytes[1] = start[1];
        bytes.push(OP_GOTO);
        bytes.extend_from_slice(&start);
        let tab = SeqTable::from_raw(bytes);

        let mut c = Character::new(ID_KID);
        c.posn = 15;
        c.seq = HEADER_LEN as u16;
        let err = anim_char(&mut c, &tab, false);
        assert_eq!(err, Err(SeqFault { offset: HEADER_LEN as u16 }));
        assert_eq!(c.posn, 15, "frame frozen");
        assert_eq!(c.seq, HEADER_LEN as u16, "program counter restored");
    }

    #[test]
    fn out_of_range_pointer_is_a_fault_not_a_panic() {
        let tab = SeqTable::build();
        let mut c = Character::new(ID_KID);
        c.seq = u16::MAX;
        assert!(anim_char(&mut c, &tab, false).is_err());
    }
}
