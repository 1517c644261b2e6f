use anyhow::Result;
use arrayvec::ArrayVec;
use log::debug;

use crate::input::Grid;

const DIRECTIONS: [(isize, isize); 8] = [(-1, -1), (-1, 0), (-1, 1), (0, -1), (0, 1), (1, -1), (1, 0), (1, 1)];

struct Seating {
    /// Cell index of every seat in the grid.
    seats: Vec<usize>,
    /// For each seat, the seats (as indices into `seats`) it pays attention to.
    neighbours: Vec<ArrayVec<usize, 8>>,
    occupied: Vec<bool>,
}

impl Seating {
    /// `reach` limits how far along each direction a seat can see.
    fn new(grid: &Grid, reach: usize) -> Seating {
        let mut seat_at = vec![None; grid.cells.len()];
        let seats = (0 .. grid.cells.len()).filter(|&ix| grid.cells[ix] != b'.').collect::<Vec<_>>();
        for (seat, &cell) in seats.iter().enumerate() {seat_at[cell] = Some(seat)};

        let neighbours = seats.iter().map(|&cell| {
            let (row, col) = (cell / grid.width, cell % grid.width);
            DIRECTIONS.iter().filter_map(|&(dr, dc)| {
                (1 ..= reach).map_while(|dist| {
                    let r = row.checked_add_signed(dr * dist as isize)?;
                    let c = col.checked_add_signed(dc * dist as isize)?;
                    grid.get(r, c).map(|_| r * grid.width + c)
                }).find_map(|cell| seat_at[cell])
            }).collect()
        }).collect();

        let occupied = seats.iter().map(|&cell| grid.cells[cell] == b'#').collect();
        Seating {seats, neighbours, occupied}
    }

    /// One round of the rules; returns whether anything changed.
    fn step(&mut self, tolerance: usize) -> bool {
        let next = (0 .. self.seats.len()).map(|seat| {
            let around = self.neighbours[seat].iter().filter(|&&n| self.occupied[n]).count();
            if self.occupied[seat] {around < tolerance} else {around == 0}
        }).collect::<Vec<_>>();
        let changed = next != self.occupied;
        self.occupied = next;
        changed
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let grid = Grid::parse(input.lines(), b"L#.")?;
    let (reach, tolerance) = if part == 1 {(1, 4)} else {(grid.width.max(grid.height), 5)};
    let mut seating = Seating::new(&grid, reach);
    let mut rounds = 0;
    while seating.step(tolerance) {rounds += 1};
    debug!("seating settled after {} rounds", rounds);
    Ok(seating.occupied.iter().filter(|&&taken| taken).count().to_string())
}
