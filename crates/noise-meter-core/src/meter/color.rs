use crate::meter::LoudnessLevel;

use std::fmt;

/// Display color derived from the current loudness.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ColorBucket {
    /// 0 dB and above.
    Green,
    /// [-30, -10) dB.
    Blue,
    /// [-50, -30) dB.
    Yellow,
    /// [-70, -50) dB.
    Orange,
    /// Everything else, including the [-10, 0) band.
    Red,
}

impl ColorBucket {
    /// All buckets, loudest first.
    pub const ALL: [ColorBucket; 5] = [
        ColorBucket::Green,
        ColorBucket::Blue,
        ColorBucket::Yellow,
        ColorBucket::Orange,
        ColorBucket::Red,
    ];

    /// Classifies a level. Rows are checked top to bottom; red catches
    /// whatever the earlier rows leave uncovered.
    pub fn classify(level: LoudnessLevel) -> Self {
        let db = level.db();

        if db >= 0.0 {
            ColorBucket::Green
        } else if (-30.0..-10.0).contains(&db) {
            ColorBucket::Blue
        } else if (-50.0..-30.0).contains(&db) {
            ColorBucket::Yellow
        } else if (-70.0..-50.0).contains(&db) {
            ColorBucket::Orange
        } else {
            ColorBucket::Red
        }
    }

    /// sRGB fill for tray rendering.
    pub fn rgb(self) -> [u8; 3] {
        match self {
            ColorBucket::Green => [0x00, 0x80, 0x00],
            ColorBucket::Blue => [0x00, 0x00, 0xFF],
            ColorBucket::Yellow => [0xFF, 0xFF, 0x00],
            ColorBucket::Orange => [0xFF, 0xA5, 0x00],
            ColorBucket::Red => [0xFF, 0x00, 0x00],
        }
    }

    /// Lowercase name.
    pub fn as_str(self) -> &'static str {
        match self {
            ColorBucket::Green => "green",
            ColorBucket::Blue => "blue",
            ColorBucket::Yellow => "yellow",
            ColorBucket::Orange => "orange",
            ColorBucket::Red => "red",
        }
    }
}

impl From<LoudnessLevel> for ColorBucket {
    fn from(level: LoudnessLevel) -> Self {
        Self::classify(level)
    }
}

impl fmt::Display for ColorBucket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
