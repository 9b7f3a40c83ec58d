use serde::{Deserialize, Serialize};

/// Keys held during one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
}

impl FrameInput {
    pub const IDLE: Self = Self {
        left: false,
        right: false,
        thrust: false,
        fire: false,
    };

    #[inline]
    pub fn is_idle(&self) -> bool {
        *self == Self::IDLE
    }
}

#[inline]
pub fn encode_input_byte(input: FrameInput) -> u8 {
    (if input.left { 0x01 } else { 0 })
        | (if input.right { 0x02 } else { 0 })
        | (if input.thrust { 0x04 } else { 0 })
        | (if input.fire { 0x08 } else { 0 })
}

#[inline]
pub fn decode_input_byte(byte: u8) -> FrameInput {
    FrameInput {
        left: (byte & 0x01) != 0,
        right: (byte & 0x02) != 0,
        thrust: (byte & 0x04) != 0,
        fire: (byte & 0x08) != 0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn upper_bits_are_ignored() {
        assert_eq!(decode_input_byte(0xF0), FrameInput::IDLE);
        assert_eq!(
            decode_input_byte(0xF5),
            FrameInput {
                left: true,
                right: false,
                thrust: true,
                fire: false,
            }
        );
    }

    #[test]
    fn all_sixteen_combinations_survive_encoding() {
        for byte in 0u8..16 {
            assert_eq!(encode_input_byte(decode_input_byte(byte)), byte);
        }
    }
}
