use anyhow::{bail, Result};
use log::trace;
use rustc_hash::{FxHashMap, FxHashSet};

/// Axial hex coordinates: `q` grows to the east, `r` to the south-east.
type Hex = (i32, i32);

const NEIGHBOURS: [Hex; 6] = [(1, 0), (-1, 0), (1, -1), (0, -1), (0, 1), (-1, 1)];

/// Follows one line of directions from the reference tile.
fn walk(line: &str) -> Result<Hex> {
    let mut bytes = line.bytes();
    let (mut q, mut r) = (0, 0);
    while let Some(b) = bytes.next() {
        let (dq, dr) = match (b, if b == b'n' || b == b's' {bytes.next()} else {None}) {
            (b'e', _) => (1, 0),
            (b'w', _) => (-1, 0),
            (b'n', Some(b'e')) => (1, -1),
            (b'n', Some(b'w')) => (0, -1),
            (b's', Some(b'e')) => (0, 1),
            (b's', Some(b'w')) => (-1, 1),
            _ => bail!("bad direction in {:?}", line),
        };
        q += dq;
        r += dr;
    }
    Ok((q, r))
}

fn day(black: &FxHashSet<Hex>) -> FxHashSet<Hex> {
    let mut counts: FxHashMap<Hex, u8> = FxHashMap::default();
    for &(q, r) in black {
        for (dq, dr) in NEIGHBOURS {
            *counts.entry((q + dq, r + dr)).or_default() += 1;
        }
    }
    counts.into_iter()
        .filter(|(tile, count)| *count == 2 || *count == 1 && black.contains(tile))
        .map(|(tile, _)| tile)
        .collect()
}

fn lay_out(input: &str) -> Result<FxHashSet<Hex>> {
    let mut black = FxHashSet::default();
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let tile = walk(line)?;
        if !black.remove(&tile) {black.insert(tile);}
    }
    Ok(black)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut black = lay_out(input)?;
    if part == 2 {
        for n in 1 ..= 100 {
            black = day(&black);
            trace!("day {}: {}", n, black.len());
        }
    }
    Ok(black.len().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
sesenwnenenewseeswwswswwnenewsewsw
neeenesenwnwwswnenewnwwsewnenwseswesw
seswneswswsenwwnwse
nwnwneseeswswnenewneswwnewseswneseene
swweswneswnenwsewnwneneseenw
eesenwseswswnenwswnwnwsewwnwsene
sewnenenenesenwsewnenwwwse
wenwwweseeeweswwwnwwe
wsweesenenewnwwnwsenewsenwwsesesenwne
neeswseenwwswnwswswnw
nenwswwsewswnenenewsenwsenwnesesenew
enewnwewneswsewnwswenweswnenwsenwsw
sweneswneswneneenwnewenewwneswswnese
swwesenesewenwneswnwwneseswwne
enesenwswwswneneswsenwnewswseenwsese
wnwnesenesenenwwnenwsewesewsesesew
nenewswnwewswnenesenwnesewesw
eneswnwswnwsenenwnwnwwseeswneewsenese
neswnwewnwnwseenwseesewsenwsweewe
wseweeenwnesenwwwswnew
";

    #[test]
    fn walks() {
        assert_eq!(walk("nwwswee").unwrap(), (0, 0));
        assert_eq!(walk("esew").unwrap(), (0, 1));
        assert!(walk("enw n").is_err());
    }

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "10");
        let mut black = lay_out(EXAMPLE).unwrap();
        black = day(&black);
        assert_eq!(black.len(), 15);
        assert_eq!(solve(2, EXAMPLE).unwrap(), "2208");
    }
}
