use anyhow::Result;
use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::input::Grid;

const CYCLES: usize = 6;

type Cube<const D: usize> = [i32; D];

/// Active cubes of the input slice, padded with zeros into `D` dimensions.
fn initial<const D: usize>(grid: &Grid) -> FxHashSet<Cube<D>> {
    grid.rows().enumerate().flat_map(|(row, cells)| {
        cells.iter().enumerate().filter(|&(_, &cell)| cell == b'#').map(move |(col, _)| {
            let mut cube = [0; D];
            cube[0] = row as i32;
            cube[1] = col as i32;
            cube
        })
    }).collect()
}

/// All 3^D - 1 unit offsets to neighbouring cubes.
fn offsets<const D: usize>() -> Vec<Cube<D>> {
    (0 .. 3usize.pow(D as u32)).map(|mut n| {
        let mut offset = [0; D];
        for axis in &mut offset {
            *axis = (n % 3) as i32 - 1;
            n /= 3;
        }
        offset
    }).filter(|offset| offset.iter().any(|&axis| axis != 0)).collect()
}

fn cycle<const D: usize>(active: &FxHashSet<Cube<D>>, offsets: &[Cube<D>]) -> FxHashSet<Cube<D>> {
    let mut neighbours: FxHashMap<Cube<D>, u8> = FxHashMap::default();
    for cube in active {
        for offset in offsets {
            let mut near = *cube;
            for (axis, delta) in near.iter_mut().zip(offset) {*axis += delta};
            *neighbours.entry(near).or_default() += 1;
        }
    }
    neighbours.into_iter()
        .filter(|(cube, count)| *count == 3 || *count == 2 && active.contains(cube))
        .map(|(cube, _)| cube)
        .collect()
}

fn simulate<const D: usize>(grid: &Grid) -> usize {
    let offsets = offsets::<D>();
    let mut active = initial::<D>(grid);
    for round in 1 ..= CYCLES {
        active = cycle(&active, &offsets);
        trace!("{} dimensions, cycle {}: {} active", D, round, active.len());
    }
    active.len()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let grid = Grid::parse(input.lines(), b".#")?;
    let active = if part == 1 {simulate::<3>(&grid)} else {simulate::<4>(&grid)};
    Ok(active.to_string())
}
