//! Experience table and level progress.

/// Minimum cumulative experience for levels 1 through 99.
const XP_TABLE: [u64; 99] = [
    0, 83, 174, 276, 388, 512, 650, 801, //
    969, 1_154, 1_358, 1_584, 1_833, 2_107, 2_411, 2_746, //
    3_115, 3_523, 3_973, 4_470, 5_018, 5_624, 6_291, 7_028, //
    7_842, 8_740, 9_730, 10_824, 12_031, 13_363, 14_833, 16_456, //
    18_247, 20_224, 22_406, 24_815, 27_473, 30_408, 33_648, 37_224, //
    41_171, 45_529, 50_339, 55_649, 61_512, 67_983, 75_127, 83_014, //
    91_721, 101_333, 111_945, 123_660, 136_594, 150_872, 166_636, 184_040, //
    203_254, 224_466, 247_886, 273_742, 302_288, 333_804, 368_599, 407_015, //
    449_428, 496_254, 547_953, 605_032, 668_051, 737_627, 814_445, 899_257, //
    992_895, 1_096_278, 1_210_421, 1_336_443, 1_475_581, 1_629_200, 1_798_808, 1_986_068, //
    2_192_818, 2_421_087, 2_673_114, 2_951_373, 3_258_594, 3_597_792, 3_972_294, 4_385_776, //
    4_842_295, 5_346_332, 5_902_831, 6_517_253, 7_195_629, 7_944_614, 8_771_558, 9_684_577, //
    10_692_629, 11_805_606, 13_034_431,
];

pub const MAX_LEVEL: u32 = 99;

/// Progress toward the next level.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LevelProgress {
    /// Percent of the current level's span already earned, one decimal.
    pub progress: f64,
    pub xp_to_level: u64,
}

/// Minimum experience required for `level`.
///
/// Levels below 1 return 0 and levels above 99 clamp to the level 99 threshold.
pub fn xp_for_level(level: u32) -> u64 {
    match level {
        0 => 0,
        l if l >= MAX_LEVEL => XP_TABLE[XP_TABLE.len() - 1],
        l => XP_TABLE[(l - 1) as usize],
    }
}

/// Progress from `level` toward `level + 1` given the total `xp`.
pub fn level_progress(xp: u64, level: u32) -> LevelProgress {
    if level >= MAX_LEVEL {
        return LevelProgress {
            progress: 100.0,
            xp_to_level: 0,
        };
    }

    let current = xp_for_level(level);
    let next = xp_for_level(level + 1);
    let span = next.saturating_sub(current);
    if span == 0 {
        return LevelProgress {
            progress: 0.0,
            xp_to_level: next.saturating_sub(xp),
        };
    }

    let earned = xp.saturating_sub(current).min(span);
    let pct = earned as f64 / span as f64 * 100.0;

    LevelProgress {
        progress: (pct * 10.0).round() / 10.0,
        xp_to_level: next.saturating_sub(xp),
    }
}
