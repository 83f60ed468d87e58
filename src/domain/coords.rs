/// Screen and block coordinate math — pure functions, no world access.
///
/// The simulation runs in the 140-column coordinate space of the Apple II
/// double-hi-res screen: a room is 10 blocks of 14 pixels across and
/// 3 blocks of 63 scanlines down. X grows rightward; Y grows downward.
/// "Forward" is face-relative: facing left, forward means decreasing X.

pub const SCRN_LEFT: i16 = 58;
pub const SCRN_WIDTH: i16 = 140;
pub const BLOCK_WIDTH: i16 = 14;
pub const BLOCK_HEIGHT: i16 = 63;
/// Offset of the character's center plane within a block.
pub const ANGLE: i16 = 7;
/// Vertical grace band below a floor line that still counts as the row above.
pub const VERT_DIST: i16 = 10;

/// Floor scanline of row `r`, indexed by `r + 1` (index 0 is the floor of
/// the room above).
pub const FLOOR_Y: [i16; 5] = [-8, 55, 118, 181, 244];

/// `FLOOR_Y` shifted down by the grace band; used for foot-row scanning.
pub const BLOCK_TOP: [i16; 5] = [2, 65, 128, 191, 254];

/// Left screen edge of block column `b`.
pub fn block_ej(b: i16) -> i16 {
    SCRN_LEFT + b * BLOCK_WIDTH
}

/// Block column and offset-in-block (0..13) for a screen X.
pub fn block_x(x: i16) -> (i16, i16) {
    let rel = x - SCRN_LEFT;
    (rel.div_euclid(BLOCK_WIDTH), rel.rem_euclid(BLOCK_WIDTH))
}

/// Same, measured at the character center plane.
pub fn block_x_center(x: i16) -> (i16, i16) {
    block_x(x - ANGLE)
}

fn scan_rows(table: &[i16; 5], y: i16) -> i16 {
    for (i, limit) in table.iter().enumerate() {
        if y <= *limit {
            return i as i16 - 1;
        }
    }
    3
}

/// Block row for a foot Y, with the grace band applied.
pub fn block_y(y: i16) -> i16 {
    scan_rows(&BLOCK_TOP, y)
}

/// Block row for a foot Y at exact floor lines (no grace band).
pub fn block_y_center(y: i16) -> i16 {
    scan_rows(&FLOOR_Y, y)
}

/// Floor scanline of row `r` (rows −1..=3 are meaningful).
pub fn floor_level(row: i16) -> i16 {
    let i = (row + 1).clamp(0, 4) as usize;
    FLOOR_Y[i]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn block_x_spans_the_screen() {
        assert_eq!(block_x(58), (0, 0));
        assert_eq!(block_x(71), (0, 13));
        assert_eq!(block_x(72), (1, 0));
        assert_eq!(block_x(197), (9, 13));
    }

    #[test]
    fn block_x_wraps_negative_offscreen() {
        // one pixel left of the screen belongs to the neighbor's col 9
        assert_eq!(block_x(57), (-1, 13));
        assert_eq!(block_x(198), (10, 0));
    }

    #[test]
    fn center_plane_round_trip() {
        for b in 0..10 {
            let (got, _) = block_x_center(block_ej(b) + ANGLE);
            assert_eq!(got, b);
        }
    }

    #[test]
    fn standing_on_a_floor_line_is_that_row() {
        assert_eq!(block_y_center(FLOOR_Y[1]), 0);
        assert_eq!(block_y_center(FLOOR_Y[2]), 1);
        assert_eq!(block_y_center(FLOOR_Y[3]), 2);
    }

    #[test]
    fn grace_band_keeps_the_row_above() {
        // up to VERT_DIST below the floor line still reads as the row above
        assert_eq!(block_y(FLOOR_Y[1] + VERT_DIST), 0);
        assert_eq!(block_y(FLOOR_Y[1] + VERT_DIST + 1), 1);
    }

    #[test]
    fn rows_above_and_below_clamp() {
        assert_eq!(block_y(-40), -1);
        assert_eq!(block_y(500), 3);
        assert_eq!(floor_level(-2), FLOOR_Y[0]);
        assert_eq!(floor_level(9), FLOOR_Y[4]);
    }
}
