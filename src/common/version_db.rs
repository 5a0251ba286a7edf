// Alignment pattern positions
//------------------------------------------------------------------------------

// Row/column coordinates of alignment pattern centres, indexed by version - 1.
// Every pair drawn from a row is a candidate centre; the ones overlapping a
// finder are dropped by the caller.
pub static ALIGNMENT_PATTERN_POSITIONS: [&[i16]; 40] = [
    &[],
    &[6, 18],
    &[6, 22],
    &[6, 26],
    &[6, 30],
    &[6, 34],
    &[6, 22, 38],
    &[6, 24, 42],
    &[6, 26, 46],
    &[6, 28, 50],
    &[6, 30, 54],
    &[6, 32, 58],
    &[6, 34, 62],
    &[6, 26, 46, 66],
    &[6, 26, 48, 70],
    &[6, 26, 50, 74],
    &[6, 30, 54, 78],
    &[6, 30, 56, 82],
    &[6, 30, 58, 86],
    &[6, 34, 62, 90],
    &[6, 28, 50, 72, 94],
    &[6, 26, 50, 74, 98],
    &[6, 30, 54, 78, 102],
    &[6, 28, 54, 80, 106],
    &[6, 32, 58, 84, 110],
    &[6, 30, 58, 86, 114],
    &[6, 34, 62, 90, 118],
    &[6, 26, 50, 74, 98, 122],
    &[6, 30, 54, 78, 102, 126],
    &[6, 26, 52, 78, 104, 130],
    &[6, 30, 56, 82, 108, 134],
    &[6, 34, 60, 86, 112, 138],
    &[6, 30, 58, 86, 114, 142],
    &[6, 34, 62, 90, 118, 146],
    &[6, 30, 54, 78, 102, 126, 150],
    &[6, 24, 50, 76, 102, 128, 154],
    &[6, 28, 54, 80, 106, 132, 158],
    &[6, 32, 58, 84, 110, 136, 162],
    &[6, 26, 54, 82, 110, 138, 166],
    &[6, 30, 58, 86, 114, 142, 170],
];

#[cfg(test)]
mod version_db_tests {
    use super::ALIGNMENT_PATTERN_POSITIONS;

    #[test]
    fn test_alignment_positions_span_symbol() {
        for (i, poses) in ALIGNMENT_PATTERN_POSITIONS.iter().enumerate().skip(1) {
            let w = (i as i16 + 1) * 4 + 17;
            assert_eq!(poses[0], 6, "Version {} doesn't start at timing line", i + 1);
            assert_eq!(*poses.last().unwrap(), w - 7, "Version {} doesn't end at w - 7", i + 1);
            assert!(poses.windows(2).all(|p| p[0] < p[1]), "Version {} not ascending", i + 1);
        }
    }

    #[test]
    fn test_alignment_position_count() {
        assert!(ALIGNMENT_PATTERN_POSITIONS[0].is_empty());
        assert_eq!(ALIGNMENT_PATTERN_POSITIONS[1].len(), 2);
        assert_eq!(ALIGNMENT_PATTERN_POSITIONS[6].len(), 3);
        assert_eq!(ALIGNMENT_PATTERN_POSITIONS[39].len(), 7);
    }
}
