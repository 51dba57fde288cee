//---------------------------------------------------------------------------//
// Copyright (c) 2017-2022 Ismael Gutiérrez González. All rights reserved.
//
// This file is part of the Rusted CIF Manager (RCIF) project,
// which can be found here: https://github.com/Frodo45127/rcif.
//
// This file is licensed under the MIT license, which can be found here:
// https://github.com/Frodo45127/rcif/blob/master/LICENSE.
//---------------------------------------------------------------------------//

//! Crystallographic records (CRYST1) and the coordinate transformations
//! (ORIGXn, SCALEn, MTRIXn).

use crate::error::Result;

use super::PdbParser;

/// Space groups by Hermann-Mauguin symbol, for `_symmetry.Int_Tables_number`.
/// Only the groups chiral macromolecules can crystallize in are needed.
const SPACE_GROUPS: &[(&str, i32)] = &[
    ("P 1", 1), ("P 1 2 1", 3), ("P 1 21 1", 4), ("C 1 2 1", 5),
    ("P 2 2 2", 16), ("P 2 2 21", 17), ("P 21 21 2", 18), ("P 21 21 21", 19),
    ("C 2 2 21", 20), ("C 2 2 2", 21), ("F 2 2 2", 22), ("I 2 2 2", 23),
    ("I 21 21 21", 24), ("P 4", 75), ("P 41", 76), ("P 42", 77), ("P 43", 78),
    ("I 4", 79), ("I 41", 80), ("P 4 2 2", 89), ("P 4 21 2", 90),
    ("P 41 2 2", 91), ("P 41 21 2", 92), ("P 42 2 2", 93), ("P 42 21 2", 94),
    ("P 43 2 2", 95), ("P 43 21 2", 96), ("I 4 2 2", 97), ("I 41 2 2", 98),
    ("P 3", 143), ("P 31", 144), ("P 32", 145), ("R 3", 146),
    ("P 3 1 2", 149), ("P 3 2 1", 150), ("P 31 1 2", 151), ("P 31 2 1", 152),
    ("P 32 1 2", 153), ("P 32 2 1", 154), ("R 3 2", 155), ("P 6", 168),
    ("P 61", 169), ("P 65", 170), ("P 62", 171), ("P 64", 172), ("P 63", 173),
    ("P 6 2 2", 177), ("P 61 2 2", 178), ("P 65 2 2", 179), ("P 62 2 2", 180),
    ("P 64 2 2", 181), ("P 63 2 2", 182), ("P 2 3", 195), ("F 2 3", 196),
    ("I 2 3", 197), ("P 21 3", 198), ("I 21 3", 199), ("P 4 3 2", 207),
    ("P 42 3 2", 208), ("F 4 3 2", 209), ("F 41 3 2", 210), ("I 4 3 2", 211),
    ("P 43 3 2", 212), ("P 41 3 2", 213), ("I 41 3 2", 214),
];

fn space_group_number(symbol: &str) -> Option<i32> {
    SPACE_GROUPS.iter().find(|(s, _)| *s == symbol).map(|(_, n)| *n)
}

impl PdbParser<'_> {

    pub(crate) fn parse_crystallographic(&mut self) -> Result<()> {
        if self.rec().is("CRYST1") {
            let entry_id = self.structure_id.clone();

            self.emplace("cell", &[
                ("entry_id", &entry_id),
                ("length_a", &self.vf(7, 15)),
                ("length_b", &self.vf(16, 24)),
                ("length_c", &self.vf(25, 33)),
                ("angle_alpha", &self.vf(34, 40)),
                ("angle_beta", &self.vf(41, 47)),
                ("angle_gamma", &self.vf(48, 54)),
                ("Z_PDB", &self.vf(67, 70)),
            ])?;

            let space_group = self.vs(56, 66);
            let int_tables_nr = space_group_number(&space_group)
                .map(|n| n.to_string())
                .unwrap_or_default();

            self.emplace("symmetry", &[
                ("entry_id", &entry_id),
                ("space_group_name_H-M", &space_group),
                ("Int_Tables_number", &int_tables_nr),
            ])?;

            self.next_record();
        }

        Ok(())
    }

    pub(crate) fn parse_coordinate_transformation(&mut self) -> Result<()> {
        let mut m = [[String::new(), String::new(), String::new()],
                     [String::new(), String::new(), String::new()],
                     [String::new(), String::new(), String::new()]];
        let mut v = [String::new(), String::new(), String::new()];

        if self.rec().name.starts_with("ORIGX") {
            for n in 1..=3usize {
                self.match_rec(&format!("ORIGX{n}"), true)?;

                let x = n - 1;
                m[x][0] = self.vf(11, 20);
                m[x][1] = self.vf(21, 30);
                m[x][2] = self.vf(31, 40);
                v[x] = self.vf(46, 55);

                self.next_record();
            }

            let entry_id = self.structure_id.clone();
            self.emplace("database_PDB_matrix", &[
                ("entry_id", &entry_id),
                ("origx[1][1]", &m[0][0]), ("origx[1][2]", &m[0][1]), ("origx[1][3]", &m[0][2]),
                ("origx[2][1]", &m[1][0]), ("origx[2][2]", &m[1][1]), ("origx[2][3]", &m[1][2]),
                ("origx[3][1]", &m[2][0]), ("origx[3][2]", &m[2][1]), ("origx[3][3]", &m[2][2]),
                ("origx_vector[1]", &v[0]), ("origx_vector[2]", &v[1]), ("origx_vector[3]", &v[2]),
            ])?;
        }

        if self.rec().name.starts_with("SCALE") {
            for n in 1..=3usize {
                self.match_rec(&format!("SCALE{n}"), true)?;

                let x = n - 1;
                m[x][0] = self.vf(11, 20);
                m[x][1] = self.vf(21, 30);
                m[x][2] = self.vf(31, 40);
                v[x] = self.vf(46, 55);

                self.next_record();
            }

            let entry_id = self.structure_id.clone();
            self.emplace("atom_sites", &[
                ("entry_id", &entry_id),
                ("fract_transf_matrix[1][1]", &m[0][0]), ("fract_transf_matrix[1][2]", &m[0][1]), ("fract_transf_matrix[1][3]", &m[0][2]),
                ("fract_transf_matrix[2][1]", &m[1][0]), ("fract_transf_matrix[2][2]", &m[1][1]), ("fract_transf_matrix[2][3]", &m[1][2]),
                ("fract_transf_matrix[3][1]", &m[2][0]), ("fract_transf_matrix[3][2]", &m[2][1]), ("fract_transf_matrix[3][3]", &m[2][2]),
                ("fract_transf_vector[1]", &v[0]), ("fract_transf_vector[2]", &v[1]), ("fract_transf_vector[3]", &v[2]),
            ])?;
        }

        while self.rec().name.starts_with("MTRIX1") {
            let mut serial = 0;
            let mut igiven = false;

            for n in 1..=3usize {
                self.match_rec(&format!("MTRIX{n}"), true)?;

                let x = n - 1;
                serial = self.vi(8, 10);
                m[x][0] = self.vf(11, 20);
                m[x][1] = self.vf(21, 30);
                m[x][2] = self.vf(31, 40);
                v[x] = self.vf(46, 55);
                igiven = self.vc(60) == '1';

                self.next_record();
            }

            let serial = serial.to_string();
            self.emplace("struct_ncs_oper", &[
                ("id", &serial),
                ("matrix[1][1]", &m[0][0]), ("matrix[1][2]", &m[0][1]), ("matrix[1][3]", &m[0][2]),
                ("matrix[2][1]", &m[1][0]), ("matrix[2][2]", &m[1][1]), ("matrix[2][3]", &m[1][2]),
                ("matrix[3][1]", &m[2][0]), ("matrix[3][2]", &m[2][1]), ("matrix[3][3]", &m[2][2]),
                ("vector[1]", &v[0]), ("vector[2]", &v[1]), ("vector[3]", &v[2]),
                ("code", if igiven { "given" } else { "" }),
            ])?;
        }

        Ok(())
    }
}
