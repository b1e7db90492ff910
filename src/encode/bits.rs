use rayon::prelude::*;

use crate::error::{LandGridError, Result};
use crate::grid::{DenseGrid, GridSpec};

/// Bytes needed for one row: 8 cells per byte, rows never share a byte
pub fn row_bytes(width: usize) -> usize {
    width.div_ceil(8)
}

/// Total length of a packed stream for a `width x height` grid
pub fn packed_len(width: usize, height: usize) -> usize {
    height * row_bytes(width)
}

/// Pack one row MSB-first into `out`, which must hold `row_bytes(row.len())` bytes
///
/// Unused low bits of a short final byte stay zero.
pub fn pack_row(row: &[bool], out: &mut [u8]) {
    for (byte, chunk) in out.iter_mut().zip(row.chunks(8)) {
        *byte = chunk
            .iter()
            .enumerate()
            .filter(|&(_, &land)| land)
            .fold(0u8, |acc, (bit, _)| acc | (0x80u8 >> bit));
    }
}

/// Pack a whole grid, row-major
pub fn pack(grid: &DenseGrid) -> Vec<u8> {
    let stride = row_bytes(grid.width());
    let mut packed = vec![0u8; packed_len(grid.width(), grid.height())];
    if stride == 0 {
        return packed;
    }

    packed
        .par_chunks_mut(stride)
        .enumerate()
        .for_each(|(r, out)| pack_row(grid.row(r), out));

    packed
}

/// Pack a grid after checking that it has the dimensions of `spec`
pub fn pack_for(grid: &DenseGrid, spec: &GridSpec) -> Result<Vec<u8>> {
    grid.check_spec(spec)?;
    Ok(pack(grid))
}

/// Decode a packed stream; dimensions come from outside the stream
pub fn unpack(bytes: &[u8], width: usize, height: usize) -> Result<DenseGrid> {
    let expected = packed_len(width, height);
    if bytes.len() != expected {
        return Err(LandGridError::byte_length(expected, bytes.len()));
    }

    let stride = row_bytes(width);
    let mut cells = Vec::with_capacity(width * height);
    if stride > 0 {
        for row in bytes.chunks_exact(stride) {
            cells.extend((0..width).map(|col| row[col / 8] & (0x80u8 >> (col % 8)) != 0));
        }
    }

    Ok(DenseGrid::from_cells(width, height, cells))
}

pub fn unpack_for(bytes: &[u8], spec: &GridSpec) -> Result<DenseGrid> {
    unpack(bytes, spec.width(), spec.height())
}

/// Number of land cells in a packed stream
pub fn count_land(bytes: &[u8]) -> usize {
    bytes.iter().map(|b| b.count_ones() as usize).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(bits: &str) -> Vec<bool> {
        bits.chars().map(|c| c == '1').collect()
    }

    #[test]
    fn test_row_bytes() {
        assert_eq!(row_bytes(0), 0);
        assert_eq!(row_bytes(1), 1);
        assert_eq!(row_bytes(8), 1);
        assert_eq!(row_bytes(9), 2);
        assert_eq!(row_bytes(18_000), 2_250);
    }

    #[test]
    fn test_pack_scenario() {
        let grid =
            DenseGrid::from_rows(vec![row("00000000"), row("00111000"), row("00000000")]).unwrap();
        assert_eq!(pack(&grid), vec![0x00, 0b0011_1000, 0x00]);
    }

    #[test]
    fn test_pack_msb_first() {
        let grid = DenseGrid::from_rows(vec![row("1000000000000001")]).unwrap();
        assert_eq!(pack(&grid), vec![0x80, 0x01]);
    }

    #[test]
    fn test_short_row_is_padded() {
        // width 10: second byte holds two cells, low six bits zero
        let grid = DenseGrid::from_rows(vec![row("1111111111"), row("0000000001")]).unwrap();
        assert_eq!(pack(&grid), vec![0xFF, 0b1100_0000, 0x00, 0b0100_0000]);
    }

    #[test]
    fn test_round_trip() {
        let grid = DenseGrid::from_rows(vec![
            row("10110011101"),
            row("00000000000"),
            row("11111111111"),
            row("01000000010"),
        ])
        .unwrap();

        let packed = pack(&grid);
        assert_eq!(packed.len(), 8);
        assert_eq!(unpack(&packed, 11, 4).unwrap(), grid);
        assert_eq!(count_land(&packed), grid.land_cells());
    }

    #[test]
    fn test_every_short_row_round_trips() {
        for width in 1..=10usize {
            // every possible row of this width, one per grid row
            let rows: Vec<Vec<bool>> = (0u32..(1 << width))
                .map(|bits| (0..width).map(|col| bits & (1 << col) != 0).collect())
                .collect();
            let height = rows.len();
            let grid = DenseGrid::from_rows(rows).unwrap();

            let packed = pack(&grid);
            assert_eq!(packed.len(), packed_len(width, height));
            assert_eq!(count_land(&packed), grid.land_cells());
            assert_eq!(unpack(&packed, width, height).unwrap(), grid, "width {width}");
        }
    }

    #[test]
    fn test_unpack_length_mismatch() {
        let result = unpack(&[0u8; 5], 8, 4);
        assert!(matches!(
            result,
            Err(LandGridError::ResolutionMismatch { .. })
        ));
    }

    #[test]
    fn test_pack_for_dimension_mismatch() {
        let spec = GridSpec::new(90.0).unwrap();
        let grid = DenseGrid::from_rows(vec![row("0110"); 3]).unwrap();
        assert!(pack_for(&grid, &spec).is_err());

        let grid = DenseGrid::from_rows(vec![row("0110"); 2]).unwrap();
        assert_eq!(pack_for(&grid, &spec).unwrap(), vec![0b0110_0000; 2]);
    }

    #[test]
    fn test_unpack_for_spec() {
        let spec = GridSpec::new(45.0).unwrap();
        let bytes = vec![0xAA, 0x00, 0x01, 0xFF];
        let grid = unpack_for(&bytes, &spec).unwrap();
        assert_eq!(grid.dimensions(), (8, 4));
        assert_eq!(pack(&grid), bytes);

        assert!(unpack_for(&bytes[..3], &spec).is_err());
    }
}
