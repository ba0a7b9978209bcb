use core::fmt;
use serde::{Deserialize, Serialize};

use crate::*;

/// Discrete intensity of a single color channel.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    Off,
    Half,
    Full,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::Off, Level::Half, Level::Full];

    pub const fn from_ordinal(ordinal: u8) -> Option<Self> {
        match ordinal {
            0 => Some(Self::Off),
            1 => Some(Self::Half),
            2 => Some(Self::Full),
            _ => None,
        }
    }

    pub const fn ordinal(self) -> u8 {
        match self {
            Self::Off => 0,
            Self::Half => 1,
            Self::Full => 2,
        }
    }

    /// Intensity used when painting the level, in `0.0..=1.0`.
    pub const fn intensity(self) -> f32 {
        match self {
            Self::Off => 0.0,
            Self::Half => 0.5,
            Self::Full => 1.0,
        }
    }

    /// Compact notation used in logs: `-` off, `0` half, `+` full.
    pub const fn symbol(self) -> char {
        match self {
            Self::Off => '-',
            Self::Half => '0',
            Self::Full => '+',
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

impl Channel {
    pub const ALL: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

    pub const fn index(self) -> usize {
        match self {
            Self::Red => 0,
            Self::Green => 1,
            Self::Blue => 2,
        }
    }

    pub const fn from_index(index: usize) -> Option<Self> {
        match index {
            0 => Some(Self::Red),
            1 => Some(Self::Green),
            2 => Some(Self::Blue),
            _ => None,
        }
    }

    /// Channel `steps` positions further along R → G → B, wrapping around.
    pub const fn rotated(self, steps: usize) -> Self {
        match (self.index() + steps) % 3 {
            0 => Self::Red,
            1 => Self::Green,
            _ => Self::Blue,
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::Red => "red",
            Self::Green => "green",
            Self::Blue => "blue",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A color made of three independent channel levels.
///
/// Every color has an integer id `r * 9 + g * 3 + b` in `0..=26`, which is
/// how palettes are described.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Color {
    levels: [Level; 3],
}

impl Color {
    pub const MAX_ID: u8 = 26;
    pub const BLACK: Color = Color::new(Level::Off, Level::Off, Level::Off);
    pub const RED: Color = Color::pure(Channel::Red);
    pub const GREEN: Color = Color::pure(Channel::Green);
    pub const BLUE: Color = Color::pure(Channel::Blue);

    pub const fn new(red: Level, green: Level, blue: Level) -> Self {
        Self {
            levels: [red, green, blue],
        }
    }

    /// Color with `channel` at full intensity and the other two off.
    pub const fn pure(channel: Channel) -> Self {
        let mut levels = [Level::Off; 3];
        levels[channel.index()] = Level::Full;
        Self { levels }
    }

    pub fn decode(id: u8) -> Result<Self> {
        if id > Self::MAX_ID {
            return Err(QuizError::InvalidColorId(id));
        }
        Ok(Self::decode_unchecked(id))
    }

    pub(crate) const fn decode_unchecked(id: u8) -> Self {
        const fn level(ordinal: u8) -> Level {
            match Level::from_ordinal(ordinal) {
                Some(level) => level,
                None => Level::Full,
            }
        }

        Self::new(level(id / 9), level(id % 9 / 3), level(id % 3))
    }

    pub const fn id(self) -> u8 {
        self.levels[0].ordinal() * 9 + self.levels[1].ordinal() * 3 + self.levels[2].ordinal()
    }

    pub const fn level(self, channel: Channel) -> Level {
        self.levels[channel.index()]
    }

    pub const fn levels(self) -> [Level; 3] {
        self.levels
    }

    pub fn is_pure(self, channel: Channel) -> bool {
        self == Self::pure(channel)
    }

    pub fn pure_channel(self) -> Option<Channel> {
        Channel::ALL.into_iter().find(|&channel| self.is_pure(channel))
    }

    /// Paint intensities for red, green and blue.
    pub fn rgb(self) -> [f32; 3] {
        self.levels.map(Level::intensity)
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for level in self.levels {
            write!(f, "{}", level.symbol())?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::string::ToString;

    #[test]
    fn decode_splits_id_into_channel_levels() {
        let color = Color::decode(20).unwrap();

        assert_eq!(color.level(Channel::Red), Level::Full);
        assert_eq!(color.level(Channel::Green), Level::Off);
        assert_eq!(color.level(Channel::Blue), Level::Full);
        assert_eq!(color.to_string(), "+-+");
    }

    #[test]
    fn id_inverts_decode_for_every_color() {
        for id in 0..=Color::MAX_ID {
            assert_eq!(Color::decode(id).unwrap().id(), id);
        }
    }

    #[test]
    fn decode_rejects_ids_past_full_white() {
        assert_eq!(Color::decode(27), Err(QuizError::InvalidColorId(27)));
    }

    #[test]
    fn pure_colors_match_palette_ids() {
        assert_eq!(Color::RED.id(), 18);
        assert_eq!(Color::GREEN.id(), 6);
        assert_eq!(Color::BLUE.id(), 2);
        assert_eq!(Color::decode(8).unwrap().pure_channel(), None);
        assert_eq!(Color::decode(6).unwrap().pure_channel(), Some(Channel::Green));
    }

    #[test]
    fn rgb_maps_levels_to_intensities() {
        let color = Color::new(Level::Half, Level::Full, Level::Off);

        assert_eq!(color.rgb(), [0.5, 1.0, 0.0]);
    }

    #[test]
    fn channel_rotation_wraps() {
        assert_eq!(Channel::Blue.rotated(1), Channel::Red);
        assert_eq!(Channel::Green.rotated(2), Channel::Red);
        assert_eq!(Channel::Red.rotated(3), Channel::Red);
    }
}
