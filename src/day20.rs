use std::fmt;

use anyhow::{anyhow, bail, ensure, Result};
use bitvec::prelude::*;
use log::{debug, trace};
use regex::Regex;
use rustc_hash::FxHashMap;

use crate::input::{self, Grid};

const MONSTER: [&str; 3] = [
    "                  # ",
    "#    ##    ##    ###",
    " #  #  #  #  #  #   ",
];

/// A square block of pixels, `true` for `#`.
#[derive(Clone, Debug, PartialEq, Eq)]
struct Image {
    side: usize,
    pixels: BitVec,
}

impl Image {
    fn from_grid(grid: &Grid) -> Result<Image> {
        ensure!(grid.width == grid.height, "image is {}x{}, not square", grid.width, grid.height);
        Ok(Image {side: grid.width, pixels: grid.cells.iter().map(|&cell| cell == b'#').collect()})
    }

    fn from_fn(side: usize, pixel: impl Fn(usize, usize) -> bool) -> Image {
        Image {side, pixels: (0 .. side * side).map(|ix| pixel(ix / side, ix % side)).collect()}
    }

    fn at(&self, row: usize, col: usize) -> bool {
        self.pixels[row * self.side + col]
    }

    /// A quarter turn clockwise.
    fn rotated(&self) -> Image {
        Image::from_fn(self.side, |row, col| self.at(self.side - 1 - col, row))
    }

    /// Mirrored left to right.
    fn flipped(&self) -> Image {
        Image::from_fn(self.side, |row, col| self.at(row, self.side - 1 - col))
    }

    /// The four rotations of the image followed by the four rotations of its mirror.
    fn orientations(&self) -> Vec<Image> {
        let mut all = Vec::with_capacity(8);
        for start in [self.clone(), self.flipped()] {
            let mut image = start;
            for _ in 0 .. 4 {
                let next = image.rotated();
                all.push(image);
                image = next;
            }
        }
        all
    }

    fn border(&self, cells: impl Iterator<Item = (usize, usize)>) -> u32 {
        cells.fold(0, |edge, (row, col)| edge << 1 | self.at(row, col) as u32)
    }
}

impl fmt::Display for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in self.pixels.chunks(self.side) {
            for pixel in row.iter() {
                f.write_str(if *pixel {"#"} else {"."})?;
            }
            f.write_str("\n")?;
        }
        Ok(())
    }
}

/// One orientation of a tile. Edges read left to right or top to bottom.
struct Piece {
    id: u64,
    image: Image,
    top: u32,
    right: u32,
    bottom: u32,
    left: u32,
}

impl Piece {
    fn new(id: u64, image: Image) -> Piece {
        let last = image.side - 1;
        let side = 0 .. image.side;
        Piece {
            id,
            top: image.border(side.clone().map(|col| (0, col))),
            right: image.border(side.clone().map(|row| (row, last))),
            bottom: image.border(side.clone().map(|col| (last, col))),
            left: image.border(side.map(|row| (row, 0))),
            image,
        }
    }
}

/// (tile, orientation)
type Slot = (usize, usize);

struct Jigsaw {
    /// Tiles per row of the assembled picture.
    side: usize,
    tile_side: usize,
    variants: Vec<Vec<Piece>>,
    every_slot: Vec<Slot>,
    by_left: FxHashMap<u32, Vec<Slot>>,
    by_top: FxHashMap<u32, Vec<Slot>>,
}

fn parse(input: &str) -> Result<Vec<(u64, Image)>> {
    let header = Regex::new(r"^Tile (\d+):$")?;
    input::blocks(input).into_iter().map(|block| -> Result<(u64, Image)> {
        let (_, [id]) = header.captures(block[0]).ok_or_else(|| anyhow!("bad tile header {:?}", block[0]))?.extract();
        let image = Image::from_grid(&Grid::parse(block[1 ..].iter().copied(), b".#")?)?;
        Ok((input::parse(id)?, image))
    }).collect()
}

impl Jigsaw {
    fn new(tiles: Vec<(u64, Image)>) -> Result<Jigsaw> {
        let side = (1usize ..).find(|n| n * n >= tiles.len()).unwrap_or(0);
        ensure!(!tiles.is_empty() && side * side == tiles.len(), "{} tiles do not make a square", tiles.len());
        let tile_side = tiles[0].1.side;
        ensure!((3 ..= 32).contains(&tile_side), "tiles must be 3 to 32 pixels wide, not {}", tile_side);
        if let Some((id, _)) = tiles.iter().find(|(_, image)| image.side != tile_side) {
            bail!("tile {} is not {} pixels wide", id, tile_side);
        }

        let variants = tiles.into_iter().map(|(id, image)| {
            image.orientations().into_iter().map(|oriented| Piece::new(id, oriented)).collect::<Vec<_>>()
        }).collect::<Vec<_>>();
        let every_slot = (0 .. variants.len()).flat_map(|tile| (0 .. 8).map(move |o| (tile, o))).collect::<Vec<_>>();
        let mut by_left: FxHashMap<u32, Vec<Slot>> = FxHashMap::default();
        let mut by_top: FxHashMap<u32, Vec<Slot>> = FxHashMap::default();
        for &(tile, o) in &every_slot {
            by_left.entry(variants[tile][o].left).or_default().push((tile, o));
            by_top.entry(variants[tile][o].top).or_default().push((tile, o));
        }
        Ok(Jigsaw {side, tile_side, variants, every_slot, by_left, by_top})
    }

    fn piece(&self, (tile, orientation): Slot) -> &Piece {
        &self.variants[tile][orientation]
    }

    /// The pieces in row-major order, each matching the piece to its left and above.
    fn solve(&self) -> Option<Vec<Slot>> {
        let mut slots = Vec::with_capacity(self.variants.len());
        let mut used = bitvec![0; self.variants.len()];
        self.fill(&mut slots, &mut used).then_some(slots)
    }

    fn fill(&self, slots: &mut Vec<Slot>, used: &mut BitVec) -> bool {
        let pos = slots.len();
        if pos == self.variants.len() {return true};
        let (row, col) = (pos / self.side, pos % self.side);
        let above = (row > 0).then(|| self.piece(slots[pos - self.side]).bottom);
        let candidates = if col > 0 {
            self.by_left.get(&self.piece(slots[pos - 1]).right).map_or(&[][..], Vec::as_slice)
        } else if let Some(above) = above {
            self.by_top.get(&above).map_or(&[][..], Vec::as_slice)
        } else {
            &self.every_slot[..]
        };

        for &slot in candidates {
            if used[slot.0] || above.is_some_and(|above| self.piece(slot).top != above) {continue};
            used.set(slot.0, true);
            slots.push(slot);
            if self.fill(slots, used) {return true};
            slots.pop();
            used.set(slot.0, false);
        }
        false
    }

    fn corners(&self, slots: &[Slot]) -> [u64; 4] {
        let last = slots.len() - 1;
        [0, self.side - 1, last + 1 - self.side, last].map(|pos| self.piece(slots[pos]).id)
    }

    /// The picture with every tile's border stripped.
    fn picture(&self, slots: &[Slot]) -> Image {
        let inner = self.tile_side - 2;
        Image::from_fn(self.side * inner, |row, col| {
            let piece = self.piece(slots[row / inner * self.side + col / inner]);
            piece.image.at(row % inner + 1, col % inner + 1)
        })
    }
}

fn monster() -> Vec<(usize, usize)> {
    MONSTER.iter().enumerate().flat_map(|(row, line)| {
        line.bytes().enumerate().filter(|&(_, b)| b == b'#').map(move |(col, _)| (row, col))
    }).collect()
}

/// `#` pixels outside any sea monster, in the first orientation that shows monsters.
fn roughness(picture: &Image) -> Option<usize> {
    let shape = monster();
    let (height, width) = (MONSTER.len(), MONSTER[0].len());
    if picture.side < height.max(width) {return None};
    picture.orientations().into_iter().find_map(|view| {
        let mut covered = bitvec![0; view.pixels.len()];
        let mut monsters = 0;
        for row in 0 ..= view.side - height {
            for col in 0 ..= view.side - width {
                if shape.iter().all(|&(dr, dc)| view.at(row + dr, col + dc)) {
                    monsters += 1;
                    for &(dr, dc) in &shape {covered.set((row + dr) * view.side + col + dc, true)};
                }
            }
        }
        (monsters > 0).then(|| {
            debug!("{} sea monsters", monsters);
            trace!("picture:\n{}", view);
            view.pixels.count_ones() - covered.count_ones()
        })
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let jigsaw = Jigsaw::new(parse(input)?)?;
    let slots = jigsaw.solve().ok_or_else(|| anyhow!("the tiles do not fit together"))?;
    debug!("arrangement: {:?}", slots.iter().map(|&slot| jigsaw.piece(slot).id).collect::<Vec<_>>());
    if part == 1 {
        Ok(jigsaw.corners(&slots).iter().product::<u64>().to_string())
    } else {
        roughness(&jigsaw.picture(&slots)).map(|r| r.to_string()).ok_or_else(|| anyhow!("no sea monsters found"))
    }
}
