//! Frame module - throws bowled by one player in one frame
//!
//! Frames 1-9 hold one throw (strike) or two. The tenth frame holds two, or three
//! when its first two balls produce a strike or spare. Whenever a ball clears the
//! deck in the tenth frame the pins are reset to a fresh rack.

use arrayvec::ArrayVec;

use crate::error::ScoreError;
use crate::types::{Mark, Rack, MAX_PINS, MAX_THROWS_PER_FRAME};

/// Marks shown for one frame on the score sheet
pub type FrameMarks = ArrayVec<Mark, MAX_THROWS_PER_FRAME>;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Frame {
    throws: ArrayVec<u8, MAX_THROWS_PER_FRAME>,
    last: bool,
}

impl Frame {
    pub fn new(last: bool) -> Self {
        Self {
            throws: ArrayVec::new(),
            last,
        }
    }

    pub fn throws(&self) -> &[u8] {
        &self.throws
    }

    /// Whether this is the tenth frame.
    pub fn is_last(&self) -> bool {
        self.last
    }

    pub fn is_empty(&self) -> bool {
        self.throws.is_empty()
    }

    pub fn is_strike(&self) -> bool {
        self.throws.first() == Some(&MAX_PINS)
    }

    pub fn is_spare(&self) -> bool {
        matches!(self.throws[..], [a, b, ..] if a != MAX_PINS && a + b == MAX_PINS)
    }

    /// Pins knocked down in this frame alone, bonuses excluded.
    pub fn pins(&self) -> u16 {
        self.throws.iter().map(|&p| p as u16).sum()
    }

    /// Throws this frame needs before it is complete, given what has been bowled so far.
    pub fn required_throws(&self) -> usize {
        if !self.last {
            return if self.is_strike() { 1 } else { 2 };
        }
        if self.throws.len() >= 2 && (self.is_strike() || self.is_spare()) {
            3
        } else {
            2
        }
    }

    pub fn is_complete(&self) -> bool {
        self.throws.len() >= self.required_throws()
    }

    /// Pins standing for the next ball.
    pub fn pins_standing(&self) -> u8 {
        self.rack().standing
    }

    /// Rack the next ball is bowled at.
    pub fn rack(&self) -> Rack {
        self.throws
            .iter()
            .fold(Rack::FULL, |rack, &pins| rack.after(pins))
    }

    /// Check that `pins` is a legal next throw without recording it.
    pub fn check(&self, pins: u8) -> Result<(), ScoreError> {
        let standing = self.pins_standing();
        if pins > standing {
            return Err(ScoreError::InvalidScore { pins, standing });
        }
        Ok(())
    }

    /// Record the next throw. Leaves the frame unchanged on error.
    ///
    /// Completion is the caller's concern; pushing onto a complete frame is a logic error.
    pub(crate) fn push(&mut self, pins: u8) -> Result<(), ScoreError> {
        debug_assert!(!self.is_complete(), "push onto a complete frame");
        self.check(pins)?;
        self.throws.push(pins);
        Ok(())
    }

    /// Score sheet marks for the throws bowled so far.
    ///
    /// A strike in frames 1-9 is followed by a `-` placeholder for the unused ball.
    pub fn marks(&self) -> FrameMarks {
        let mut out = FrameMarks::new();
        let mut rack = Rack::FULL;

        for &pins in &self.throws {
            let mark = rack.mark_for(pins);
            out.push(mark);

            if mark == Mark::Strike && !self.last {
                out.push(Mark::Skip);
                break;
            }
            rack = rack.after(pins);
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn frame(last: bool, throws: &[u8]) -> Frame {
        let mut f = Frame::new(last);
        for &t in throws {
            f.push(t).unwrap();
        }
        f
    }

    #[test]
    fn test_open_frame() {
        let f = frame(false, &[3, 4]);
        assert!(f.is_complete());
        assert!(!f.is_strike());
        assert!(!f.is_spare());
        assert_eq!(f.pins(), 7);
        assert_eq!(f.marks().as_slice(), &[Mark::Pins(3), Mark::Pins(4)]);
    }

    #[test]
    fn test_strike_completes_early_frame() {
        let f = frame(false, &[10]);
        assert!(f.is_complete());
        assert!(f.is_strike());
        assert_eq!(f.marks().as_slice(), &[Mark::Strike, Mark::Skip]);
    }

    #[test]
    fn test_spare_marks() {
        let f = frame(false, &[7, 3]);
        assert!(f.is_spare());
        assert_eq!(f.marks().as_slice(), &[Mark::Pins(7), Mark::Spare]);

        // Ten on the second ball is still a spare.
        let f = frame(false, &[0, 10]);
        assert!(f.is_spare());
        assert!(!f.is_strike());
        assert_eq!(f.marks().as_slice(), &[Mark::Pins(0), Mark::Spare]);
    }

    #[test]
    fn test_second_ball_bounded_by_standing_pins() {
        let f = frame(false, &[6]);
        assert_eq!(f.pins_standing(), 4);
        assert_eq!(
            f.check(5),
            Err(ScoreError::InvalidScore {
                pins: 5,
                standing: 4
            })
        );

        let mut f = f;
        assert!(f.push(5).is_err());
        assert_eq!(f.throws(), &[6]);
        assert!(!f.is_complete());
    }

    #[test]
    fn test_pins_over_ten_rejected() {
        let f = Frame::new(false);
        assert_eq!(
            f.check(11),
            Err(ScoreError::InvalidScore {
                pins: 11,
                standing: 10
            })
        );
    }

    #[test]
    fn test_tenth_frame_open_needs_two_throws() {
        let f = frame(true, &[4, 5]);
        assert!(f.is_complete());
        assert_eq!(f.required_throws(), 2);
        assert_eq!(f.marks().as_slice(), &[Mark::Pins(4), Mark::Pins(5)]);
    }

    #[test]
    fn test_tenth_frame_strike_resets_rack() {
        let mut f = frame(true, &[10]);
        assert!(!f.is_complete());
        assert_eq!(f.pins_standing(), 10);

        f.push(10).unwrap();
        assert_eq!(f.pins_standing(), 10);
        assert!(!f.is_complete());

        f.push(10).unwrap();
        assert!(f.is_complete());
        assert_eq!(f.marks().as_slice(), &[Mark::Strike, Mark::Strike, Mark::Strike]);
    }

    #[test]
    fn test_tenth_frame_strike_then_partial_rack() {
        let f = frame(true, &[10, 8]);
        assert_eq!(f.pins_standing(), 2);
        assert_eq!(
            f.check(3),
            Err(ScoreError::InvalidScore {
                pins: 3,
                standing: 2
            })
        );

        let f = frame(true, &[10, 8, 2]);
        assert_eq!(f.marks().as_slice(), &[Mark::Strike, Mark::Pins(8), Mark::Spare]);
    }

    #[test]
    fn test_tenth_frame_spare_earns_bonus_ball() {
        let f = frame(true, &[5, 5]);
        assert!(!f.is_complete());
        assert_eq!(f.required_throws(), 3);
        assert_eq!(f.pins_standing(), 10);

        let f = frame(true, &[5, 5, 10]);
        assert!(f.is_complete());
        assert_eq!(f.pins(), 20);
        assert_eq!(f.marks().as_slice(), &[Mark::Pins(5), Mark::Spare, Mark::Strike]);
    }
}
