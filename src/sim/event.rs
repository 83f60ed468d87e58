/// Events emitted during a simulation tick.
/// The host consumes these for sound, flashes and logging; nothing in
/// the core reads them back.

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameEvent {
    /// A sequence played a sound tap (footsteps, sword taps).
    Tap { code: u8 },
    /// A potion was drunk; kind per the flask spec bits.
    PotionDrunk { kind: u8 },
    SwordPicked,
    /// A gate slammed shut.
    GateShut { room: u8, tile: u8 },
    /// Screen shake requested for this many frames.
    ScreenShake { frames: u8 },
    /// A loose floor crashed into rubble.
    FloorCrashed { room: u8, tile: u8 },
    /// A character's death sequence started playing.
    CharDied { id: u8 },
    Impaled,
    Sliced,
    /// Landing grades, for landing thuds and grunts.
    SoftLanded,
    MediumLanded,
    HardLanded,
    /// The kid crossed into another room.
    RoomChanged { room: u8 },
    /// The kid dropped out of the bottom of the map.
    FellOff,
    /// The exit stairs were climbed; the host should load this level.
    LevelDone { next: u8 },
    /// Past the last level.
    GameWon,
    /// A sequence program overran its opcode budget and was frozen.
    SequenceFault { id: u8, offset: u16 },
}
