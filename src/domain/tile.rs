/// Tile kinds and their properties.
/// Properties are queried via methods, not stored as flags,
/// so tile semantics are centralized here.
///
/// Every tile carries one mutable byte, `spec`, whose meaning depends on
/// the tile kind: gates store their opening height, spikes their
/// extend/retract phase, slicers their blade frame (plus a blood bit),
/// loose floors their wiggle/detach counter, pressure plates an index
/// into the level's link tables, and flasks the potion kind in the top
/// three bits.

/// The 30 tile kinds of the level format (type byte bits 0..4).
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TileKind {
    Space,
    Floor,
    Spikes,
    Posts,
    Gate,
    DPressPlate, // dead (jammed) pressure plate
    PressPlate,  // plate that closes gates
    PanelWif,    // panel, wall in front
    PillarBottom,
    PillarTop,
    Flask,
    Loose,
    PanelWof, // panel, wall on floor
    Mirror,
    Rubble,
    UPressPlate, // plate that opens gates
    Exit,
    Exit2,
    Slicer,
    Torch,
    Block,
    Bones,
    Sword,
    Window,
    Window2,
    ArchBot,
    ArchTop1,
    ArchTop2,
    ArchTop3,
    ArchTop4,
}

impl TileKind {
    /// Decode the low five bits of a level type byte.
    pub fn from_byte(b: u8) -> Option<TileKind> {
        use TileKind::*;
        Some(match b & 0x1F {
            0 => Space,
            1 => Floor,
            2 => Spikes,
            3 => Posts,
            4 => Gate,
            5 => DPressPlate,
            6 => PressPlate,
            7 => PanelWif,
            8 => PillarBottom,
            9 => PillarTop,
            10 => Flask,
            11 => Loose,
            12 => PanelWof,
            13 => Mirror,
            14 => Rubble,
            15 => UPressPlate,
            16 => Exit,
            17 => Exit2,
            18 => Slicer,
            19 => Torch,
            20 => Block,
            21 => Bones,
            22 => Sword,
            23 => Window,
            24 => Window2,
            25 => ArchBot,
            26 => ArchTop1,
            27 => ArchTop2,
            28 => ArchTop3,
            29 => ArchTop4,
            _ => return None,
        })
    }

    /// No floor here: these tiles do not stop a fall.
    pub fn is_passable(self) -> bool {
        use TileKind::*;
        matches!(
            self,
            Space | PillarTop | PanelWof | Block | ArchTop1 | ArchTop2 | ArchTop3 | ArchTop4
        )
    }

    /// Does this tile act as a wall for a character facing `face`?
    /// Solid blocks always do; panels only stop left-facing characters.
    pub fn is_wall(self, face: i16) -> bool {
        use TileKind::*;
        match self {
            Block => true,
            PanelWif | PanelWof => face < 0,
            _ => false,
        }
    }

    /// Barrier body class: 0 clear, 1 panel/gate, 3 mirror/slicer, 4 block.
    /// Indexes the `BAR_L` / `BAR_R` inset tables.
    pub fn barrier_code(self) -> usize {
        use TileKind::*;
        match self {
            PanelWif | PanelWof | Gate => 1,
            Mirror | Slicer => 3,
            Block => 4,
            _ => 0,
        }
    }

    /// Both doorway halves of an exit.
    pub fn is_exit(self) -> bool {
        matches!(self, TileKind::Exit | TileKind::Exit2)
    }

    pub fn is_plate(self) -> bool {
        matches!(self, TileKind::PressPlate | TileKind::UPressPlate)
    }
}

/// One room cell. `spec` is the only field the simulation mutates
/// (except for the pickup / plate-jam paths, which rewrite `kind`).
#[derive(Clone, Copy, Debug)]
pub struct Tile {
    pub kind: TileKind,
    /// Bit 5 of the type byte; a marked tile is required (loose floors
    /// with this bit never detach).
    pub required: bool,
    /// Bits 6..7 of the type byte; render section, carried verbatim.
    pub section: u8,
    pub spec: u8,
}

impl Tile {
    pub fn new(kind: TileKind, spec: u8) -> Tile {
        Tile { kind, required: false, section: 0, spec }
    }

    /// Decode a (type byte, spec byte) pair from the level file.
    pub fn from_bytes(ty: u8, spec: u8) -> Option<Tile> {
        Some(Tile {
            kind: TileKind::from_byte(ty)?,
            required: ty & 0x20 != 0,
            section: (ty >> 6) & 3,
            spec,
        })
    }

    /// The solid tile callers get when a lookup walks off the map.
    pub fn wall() -> Tile {
        Tile::new(TileKind::Block, 0)
    }

    /// Rewrite this tile in place. A tile turned to empty space always
    /// carries spec 0.
    pub fn become_kind(&mut self, kind: TileKind) {
        self.kind = kind;
        self.spec = 0;
    }

    /// Potion kind for a flask tile (spec bits 5..7).
    pub fn potion_kind(self) -> u8 {
        (self.spec >> 5) & 7
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decode_round_trip_all_kinds() {
        for b in 0..30u8 {
            let k = TileKind::from_byte(b).expect("kind in range");
            // modifier and section bits must not disturb the kind
            assert_eq!(TileKind::from_byte(b | 0xE0), Some(k));
        }
        assert_eq!(TileKind::from_byte(30), None);
        assert_eq!(TileKind::from_byte(31), None);
    }

    #[test]
    fn modifier_and_section_bits() {
        let t = Tile::from_bytes(0x0B | 0x20 | 0x40, 0).unwrap();
        assert_eq!(t.kind, TileKind::Loose);
        assert!(t.required);
        assert_eq!(t.section, 1);
    }

    #[test]
    fn passable_set_matches_no_floor_rule() {
        use TileKind::*;
        for k in [Space, PillarTop, PanelWof, Block, ArchTop1, ArchTop4] {
            assert!(k.is_passable(), "{k:?}");
        }
        for k in [Floor, Spikes, Gate, Loose, Exit, Slicer, Sword, Flask] {
            assert!(!k.is_passable(), "{k:?}");
        }
    }

    #[test]
    fn panels_wall_left_facers_only() {
        assert!(TileKind::PanelWif.is_wall(-1));
        assert!(!TileKind::PanelWif.is_wall(1));
        assert!(TileKind::Block.is_wall(1));
        assert!(TileKind::Block.is_wall(-1));
        assert!(!TileKind::Floor.is_wall(-1));
    }

    #[test]
    fn become_space_clears_spec() {
        let mut t = Tile::new(TileKind::Flask, 0x45);
        t.become_kind(TileKind::Space);
        assert_eq!(t.spec, 0);
    }

    #[test]
    fn flask_potion_kind_in_high_bits() {
        let t = Tile::new(TileKind::Flask, 3 << 5);
        assert_eq!(t.potion_kind(), 3);
    }
}
