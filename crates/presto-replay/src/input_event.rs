use presto_input::CursorButton;
use serde::{Deserialize, Serialize};

/// A single press/release transition of one cursor channel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct InputEvent {
    /// Transition time in milliseconds.
    pub time: f64,
    pub button: CursorButton,
    /// Whether the channel went down (true) or up (false).
    pub pressed: bool,
}

impl InputEvent {
    pub fn new(time: f64, button: CursorButton, pressed: bool) -> Self {
        Self {
            time,
            button,
            pressed,
        }
    }

    fn button_code(button: CursorButton) -> i32 {
        match button {
            CursorButton::LeftKey => 0,
            CursorButton::RightKey => 1,
            CursorButton::LeftMouse => 2,
            CursorButton::RightMouse => 3,
        }
    }

    fn button_from_code(code: i32) -> Option<CursorButton> {
        match code {
            0 => Some(CursorButton::LeftKey),
            1 => Some(CursorButton::RightKey),
            2 => Some(CursorButton::LeftMouse),
            3 => Some(CursorButton::RightMouse),
            _ => None,
        }
    }

    /// Encode as a 9-byte record: `(code + 1) * sign` (positive when
    /// pressed) followed by the time's little-endian bit pattern.
    pub(crate) fn encode(&self, out: &mut Vec<u8>) {
        let sign: i32 = if self.pressed { 1 } else { -1 };
        out.push(((Self::button_code(self.button) + 1) * sign) as i8 as u8);
        out.extend_from_slice(&self.time.to_le_bytes());
    }

    /// Decode a 9-byte record; `None` for a malformed channel byte.
    pub(crate) fn decode(raw: &[u8; 9]) -> Option<Self> {
        let code_byte = raw[0] as i8;
        if code_byte == 0 {
            return None;
        }
        let button = Self::button_from_code(i32::from(code_byte).abs() - 1)?;
        let time_bytes: [u8; 8] = raw[1..9].try_into().ok()?;
        Some(Self {
            time: f64::from_le_bytes(time_bytes),
            button,
            pressed: code_byte > 0,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_decode_round_trip() {
        for button in CursorButton::ALL {
            for pressed in [true, false] {
                let event = InputEvent::new(1234.5, button, pressed);
                let mut raw = Vec::new();
                event.encode(&mut raw);
                assert_eq!(raw.len(), 9);

                let decoded = InputEvent::decode(raw[..9].try_into().unwrap()).unwrap();
                assert_eq!(decoded, event);
            }
        }
    }

    #[test]
    fn zero_channel_byte_is_rejected() {
        let raw = [0u8; 9];
        assert!(InputEvent::decode(&raw).is_none());
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let mut raw = [0u8; 9];
        raw[0] = 6; // code 5: no such channel
        assert!(InputEvent::decode(&raw).is_none());
    }
}
