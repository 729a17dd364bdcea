//! Known cubes shared by tests.

use super::types::Cube;

/// A diagonal magic cube of side 7.
///
/// Built from three linear digit forms mod 7 with coefficients drawn from
/// distinct `±` classes, so every row, column, pillar and planar diagonal
/// sees each digit once. A form that is constant along a space diagonal
/// takes the value 3 at the centre, which is also the mean digit.
pub(crate) fn diagonal_magic_7() -> Cube {
    const N: usize = 7;
    const FORMS: [[usize; 3]; 3] = [[1, 2, 3], [2, 3, 1], [3, 1, 2]];
    // (1 + 2 + 3) · 3 + 6 ≡ 3 (mod 7) at the centre (3, 3, 3).
    const OFFSET: usize = 6;

    let digit = |form: [usize; 3], z: usize, y: usize, x: usize| {
        (form[0] * z + form[1] * y + form[2] * x + OFFSET) % N
    };

    let mut values = Vec::with_capacity(N * N * N);
    for z in 0..N {
        for y in 0..N {
            for x in 0..N {
                let a = digit(FORMS[0], z, y, x);
                let b = digit(FORMS[1], z, y, x);
                let c = digit(FORMS[2], z, y, x);
                values.push((a * N * N + b * N + c + 1) as u32);
            }
        }
    }
    Cube::from_values(N, values).expect("linear construction is a permutation")
}
