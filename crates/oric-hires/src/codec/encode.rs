//! Canvas to byte table.
//!
//! Each scanline is planned independently as a shortest path over the 64
//! possible `(ink, paper)` states. Every cell moves the state forward by
//! one byte: a pixel byte (free, keeps the state) or, for a single-colour
//! cell, an ink or paper attribute (cost 1, changes the state). The plan
//! with the fewest attributes wins, so pictures that need no attributes
//! encode as pure pixel data.
//!
//! Ties are broken by scanning states in ascending `ink * 8 + paper` order
//! and candidates in a fixed order (pixel, inverse pixel, ink attribute,
//! paper attribute), keeping the first strictly cheaper one. The output is
//! therefore a pure function of the pixels.

use std::fmt::Write as _;

use super::{BYTES_PER_LINE, BYTES_PER_ROW, PICTURE_BYTES};
use crate::attribute::{distinct_colours, AttributeState, CellByte, CELL_WIDTH, HEIGHT};
use crate::canvas::Canvas;
use crate::document::PictureDocument;
use crate::error::{CellConflict, HiresError};
use crate::palette::{OricColour, PALETTE_SIZE};

const STATES: usize = PALETTE_SIZE * PALETTE_SIZE;

#[inline]
fn state_index(state: AttributeState) -> usize {
    state.ink.index() as usize * PALETTE_SIZE + state.paper.index() as usize
}

#[inline]
fn state_at(index: usize) -> AttributeState {
    AttributeState {
        ink: OricColour::from_bits((index / PALETTE_SIZE) as u8),
        paper: OricColour::from_bits((index % PALETTE_SIZE) as u8),
    }
}

/// Predecessor state and the byte emitted to leave it.
#[derive(Debug, Clone, Copy, Default)]
struct Step {
    prev: u8,
    byte: u8,
}

/// Pixel bits for `cell` under a displayed `(ink, paper)` pair, if the cell
/// uses only those colours. Paper wins when both are the same colour.
fn pixel_bits((ink, paper): (OricColour, OricColour), cell: &[OricColour]) -> Option<u8> {
    cell.iter().try_fold(0u8, |bits, &px| {
        let on = if px == paper {
            0
        } else if px == ink {
            1
        } else {
            return None;
        };
        Some((bits << 1) | on)
    })
}

/// Every byte that renders `cell` from `state`, in tie-break order.
fn transitions(
    state: AttributeState,
    cell: &[OricColour],
    uniform: Option<OricColour>,
    mut emit: impl FnMut(AttributeState, u8, u32),
) {
    for inverse in [false, true] {
        if let Some(bits) = pixel_bits(state.shown(inverse), cell) {
            emit(state, CellByte::Pixels { bits, inverse }.to_byte(), 0);
        }
    }

    let Some(colour) = uniform else {
        return;
    };

    // An ink attribute shows the current paper.
    for inverse in [false, true] {
        let (_, paper) = state.shown(inverse);
        if paper != colour {
            continue;
        }
        for ink in OricColour::ALL.into_iter().filter(|&c| c != state.ink) {
            let next = AttributeState { ink, ..state };
            emit(next, CellByte::Ink { colour: ink, inverse }.to_byte(), 1);
        }
    }

    // A paper attribute shows the new paper.
    for inverse in [false, true] {
        let paper = if inverse { colour.inverse() } else { colour };
        if paper == state.paper {
            continue;
        }
        let next = AttributeState { paper, ..state };
        emit(next, CellByte::Paper { colour: paper, inverse }.to_byte(), 1);
    }
}

/// Encode scanline `y` into its 40 bytes.
///
/// Fails with [`HiresError::NonConformantCell`] naming the first cell that
/// holds more than two colours, or the first cell no attribute sequence
/// can reach.
pub fn encode_row(canvas: &Canvas, y: usize) -> Result<[u8; BYTES_PER_ROW], HiresError> {
    if y >= HEIGHT {
        return Err(HiresError::out_of_range("y", y, HEIGHT));
    }

    let mut cost = [None::<u32>; STATES];
    cost[state_index(AttributeState::default())] = Some(0);
    let mut back = Vec::with_capacity(BYTES_PER_ROW);

    for (cell_index, cell) in canvas.row(y).chunks_exact(CELL_WIDTH).enumerate() {
        let colours = distinct_colours(cell);
        if colours > 2 {
            return Err(HiresError::NonConformantCell {
                row: y,
                cell: cell_index,
                conflict: CellConflict::TooManyColours(colours),
            });
        }
        let uniform = (colours == 1).then_some(cell[0]);

        let mut next = [None::<u32>; STATES];
        let mut steps = [Step::default(); STATES];
        for (index, reached) in cost.iter().enumerate() {
            let Some(base) = *reached else {
                continue;
            };
            transitions(state_at(index), cell, uniform, |state, byte, extra| {
                let target = state_index(state);
                let total = base + extra;
                if next[target].map_or(true, |best| total < best) {
                    next[target] = Some(total);
                    steps[target] = Step {
                        prev: index as u8,
                        byte,
                    };
                }
            });
        }

        if next.iter().all(Option::is_none) {
            return Err(HiresError::NonConformantCell {
                row: y,
                cell: cell_index,
                conflict: CellConflict::AttributeClash,
            });
        }
        cost = next;
        back.push(steps);
    }

    // min_by_key keeps the first of equal minima, i.e. the lowest state.
    let mut state = cost
        .iter()
        .enumerate()
        .filter_map(|(index, c)| c.map(|c| (index, c)))
        .min_by_key(|&(_, c)| c)
        .map_or(0, |(index, _)| index);

    let mut bytes = [0u8; BYTES_PER_ROW];
    for (cell_index, steps) in back.iter().enumerate().rev() {
        let step = steps[state];
        bytes[cell_index] = step.byte;
        state = step.prev as usize;
    }
    Ok(bytes)
}

/// Encode the whole canvas into its 8000-byte table.
pub fn encode_canvas(canvas: &Canvas) -> Result<Vec<u8>, HiresError> {
    let mut bytes = Vec::with_capacity(PICTURE_BYTES);
    for y in 0..HEIGHT {
        bytes.extend_from_slice(&encode_row(canvas, y)?);
    }
    Ok(bytes)
}

/// Render a labelled `.byt` table.
///
/// The label is written as given; [`encode`] is the checked entry point.
pub fn write_table(label: &str, bytes: &[u8]) -> String {
    // "\t.byt " plus "$xx," per value.
    let line_len = 7 + BYTES_PER_LINE * 4;
    let mut out = String::with_capacity(label.len() + 1 + bytes.len() / BYTES_PER_LINE * line_len);
    out.push_str(label);
    out.push('\n');
    for line in bytes.chunks(BYTES_PER_LINE) {
        out.push_str("\t.byt ");
        for (i, byte) in line.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            // Writing to a String cannot fail.
            let _ = write!(out, "${byte:02x}");
        }
        out.push('\n');
    }
    out
}

/// Serialize a document to `.s` text.
///
/// Fails on an invalid label or a canvas that breaks the attribute rules;
/// nothing is produced in either case.
pub fn encode(doc: &PictureDocument) -> Result<String, HiresError> {
    if !super::is_valid_label(doc.label()) {
        return Err(HiresError::InvalidLabel(doc.label().to_string()));
    }
    let bytes = encode_canvas(doc.canvas())?;
    Ok(write_table(doc.label(), &bytes))
}
