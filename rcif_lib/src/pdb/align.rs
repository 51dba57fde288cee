//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

/*!
Module with the chain/SEQRES aligner.

The residues observed in the ATOM records are aligned against the residues the
SEQRES records declare, using dynamic programming with an affine gap penalty.
The alignment recovers the authoritative sequence numbering: aligned SEQRES
positions take the observed residue's number and insertion code, unaligned
positions are numbered from their aligned neighbours, and leading positions
without a numbered neighbour count backwards from the first aligned one.

An observed residue that aligns against nothing in SEQRES is a hard error: the
file disagrees with itself.
!*/

use crate::error::{RCifError, Result};

use super::reconstruct::{AtomRes, PdbSeqRes};

const MATCH_REWARD: f32 = 5.0;
const MISMATCH_COST: f32 = -10.0;
const GAP_OPEN: f32 = 10.0;
const GAP_EXTEND: f32 = 0.1;

/// Sequence number sentinel for still-unnumbered SEQRES positions.
const FLAG_SEQ_NR: i32 = i32::MIN;

/// Row-major score matrix.
struct Matrix {
    data: Vec<f32>,
    n: usize,
}

impl Matrix {
    fn new(m: usize, n: usize) -> Self {
        Self { data: vec![0.0; m * n], n }
    }

    fn get(&self, i: usize, j: usize) -> f32 {
        self.data[i * self.n + j]
    }

    fn set(&mut self, i: usize, j: usize, v: f32) {
        self.data[i * self.n + j] = v;
    }
}

/// This function aligns the observed residues against the declared SEQRES of
/// one chain, assigning sequence numbers in place.
///
/// Returns the index of the last aligned observed residue, so the caller can
/// report (and cut off) unaligned tails.
pub fn align_res_to_seqres(chain_id: char, seqres: &mut [PdbSeqRes], residues_seen: &[AtomRes]) -> Result<usize> {
    let dim_x = seqres.len();
    if dim_x == 0 {
        return Err(RCifError::ValidationError(format!("SEQRES for chain {chain_id} is empty")));
    }

    let dim_y = residues_seen.len();
    if dim_y == 0 {
        return Err(RCifError::ValidationError(format!(
            "number of residues in ATOM records for chain {chain_id} is zero"
        )));
    }

    let mut b = Matrix::new(dim_x, dim_y);
    let mut ix = Matrix::new(dim_x, dim_y);
    let mut iy = Matrix::new(dim_x, dim_y);
    let mut tb = vec![0i8; dim_x * dim_y];

    let mut high = 0.0f32;
    let (mut high_x, mut high_y) = (0usize, 0usize);

    for x in 0..dim_x {
        for y in 0..dim_y {
            let ix1 = if x > 0 { ix.get(x - 1, y) } else { 0.0 };
            let iy1 = if y > 0 { iy.get(x, y - 1) } else { 0.0 };

            let mut m = if seqres[x].mon_id == residues_seen[y].mon_id {
                MATCH_REWARD
            } else {
                MISMATCH_COST
            };

            // Opening a gap is free where the ATOM numbering already shows one.
            let gap_open = if y == 0 || (y + 1 < dim_y && residues_seen[y + 1].seq_num > residues_seen[y].seq_num + 1) {
                0.0
            } else {
                GAP_OPEN
            };

            if x > 0 && y > 0 {
                m += b.get(x - 1, y - 1);
            }

            let s;
            if m >= ix1 && m >= iy1 {
                tb[x * dim_y + y] = 0;
                b.set(x, y, m);
                s = m;

                ix.set(x, y, m - if x < dim_x - 1 { gap_open } else { 0.0 });
                iy.set(x, y, m - if y < dim_y - 1 { gap_open } else { 0.0 });
            } else if ix1 >= iy1 {
                tb[x * dim_y + y] = 1;
                b.set(x, y, ix1);
                s = ix1;

                ix.set(x, y, ix1 - GAP_EXTEND);
                let mut niy = m - if y < dim_y - 1 { gap_open } else { 0.0 };
                if niy < iy1 - GAP_EXTEND {
                    niy = iy1 - GAP_EXTEND;
                }
                iy.set(x, y, niy);
            } else {
                tb[x * dim_y + y] = -1;
                b.set(x, y, iy1);
                s = iy1;

                let mut nix = m - if x < dim_x - 1 { gap_open } else { 0.0 };
                if nix < ix1 - GAP_EXTEND {
                    nix = ix1 - GAP_EXTEND;
                }
                ix.set(x, y, nix);
                iy.set(x, y, iy1 - GAP_EXTEND);
            }

            if high < s {
                high = s;
                high_x = x;
                high_y = y;
            }
        }
    }

    // Reset the numbering, then walk the traceback to reassign it.
    for sr in seqres.iter_mut() {
        sr.seq_num = FLAG_SEQ_NR;
        sr.icode = ' ';
    }

    let mut x = high_x as isize;
    let mut y = high_y as isize;

    while x >= 0 && y >= 0 {
        match tb[x as usize * dim_y + y as usize] {
            -1 => {
                let r = &residues_seen[y as usize];
                return Err(RCifError::UnmappableResidue(
                    r.mon_id.clone(),
                    r.seq_num,
                    if r.icode == ' ' { String::new() } else { r.icode.to_string() },
                    chain_id.to_string(),
                ));
            }

            1 => {
                log::debug!(
                    "missing residue in ATOM records: {} at {}",
                    seqres[x as usize].mon_id, seqres[x as usize].seq_num
                );
                x -= 1;
            }

            _ => {
                let sr = &mut seqres[x as usize];
                let ar = &residues_seen[y as usize];

                if sr.mon_id != ar.mon_id {
                    log::warn!(
                        "unaligned residues at {x}/{y} ({}/{}), SEQRES does not agree with ATOM records",
                        sr.mon_id, ar.mon_id
                    );
                    sr.mon_id = ar.mon_id.clone();
                }

                sr.seq_num = ar.seq_num;
                sr.icode = ar.icode;

                x -= 1;
                y -= 1;
            }
        }
    }

    // Propagate numbers forward from aligned neighbours; what remains is a
    // leading stretch which counts backwards from its successor.
    let mut unnumbered = vec![];
    for x in 0..dim_x {
        if seqres[x].seq_num == FLAG_SEQ_NR {
            if x > 0 && seqres[x - 1].seq_num != FLAG_SEQ_NR {
                seqres[x].seq_num = seqres[x - 1].seq_num + 1;
            } else {
                unnumbered.push(x);
            }
        }
    }

    while let Some(x) = unnumbered.pop() {
        if x + 1 >= dim_x {
            return Err(RCifError::ValidationError("could not assign sequence numbers".to_owned()));
        }

        seqres[x].seq_num = seqres[x + 1].seq_num - 1;
    }

    Ok(high_y)
}
