//! Scoring module - ten-pin cumulative scoring
//!
//! Totals are always recomputed from the recorded throws; nothing here keeps a
//! running counter. Rules:
//! - An open frame scores its pins.
//! - A strike in frames 1-9 scores 10 plus the next two balls, in bowling order,
//!   crossing frame boundaries as needed.
//! - A spare in frames 1-9 scores 10 plus the next ball.
//! - The tenth frame scores its own two or three balls.
//!
//! A frame whose bonus balls have not been bowled yet is [`FrameTotal::Pending`]
//! rather than being guessed at.

use arrayvec::ArrayVec;

use crate::frame::Frame;
use crate::types::{FrameTotal, FRAME_COUNT};

/// Most balls one player can bowl in a game (nine open frames plus three in the tenth).
const MAX_ROLLS: usize = (FRAME_COUNT - 1) * 2 + 3;

/// Score of a single frame, or `None` while it (or its bonus) is still unresolved.
///
/// `following` holds every ball bowled after this frame, in order.
pub fn frame_score(frame: &Frame, following: &[u8]) -> Option<u16> {
    if !frame.is_complete() {
        return None;
    }
    if frame.is_last() {
        return Some(frame.pins());
    }

    let bonus_balls = if frame.is_strike() {
        2
    } else if frame.is_spare() {
        1
    } else {
        0
    };

    let bonus = following.get(..bonus_balls)?;
    Some(frame.pins() + bonus.iter().map(|&p| p as u16).sum::<u16>())
}

/// Running total under every frame of one player's game.
pub fn frame_totals(frames: &[Frame]) -> [FrameTotal; FRAME_COUNT] {
    let rolls: ArrayVec<u8, MAX_ROLLS> = frames
        .iter()
        .flat_map(|f| f.throws().iter().copied())
        .collect();

    let mut totals = [FrameTotal::Unplayed; FRAME_COUNT];
    let mut consumed = 0usize;
    let mut running: u16 = 0;
    let mut resolved = true;

    for (slot, frame) in totals.iter_mut().zip(frames) {
        if frame.is_empty() {
            continue;
        }
        consumed += frame.throws().len();

        *slot = match (resolved, frame_score(frame, &rolls[consumed..])) {
            (true, Some(score)) => {
                running += score;
                FrameTotal::Resolved(running)
            }
            _ => {
                // Everything after an unresolved frame is unresolved too.
                resolved = false;
                FrameTotal::Pending
            }
        };
    }

    totals
}

/// Total through the latest frame whose score is fully resolved.
pub fn cumulative_total(frames: &[Frame]) -> u16 {
    frame_totals(frames)
        .iter()
        .rev()
        .find_map(FrameTotal::value)
        .unwrap_or(0)
}

/// Score of frame `index` with its bonuses, once `totals` has resolved it.
pub fn resolved_frame_score(totals: &[FrameTotal], index: usize) -> Option<u16> {
    let through = totals.get(index)?.value()?;
    let before = match index {
        0 => 0,
        _ => totals.get(index - 1)?.value()?,
    };
    Some(through - before)
}
