use anyhow::{anyhow, ensure, Result};
use bitvec::prelude::*;

/// A boarding pass is its seat ID written in binary: `B`/`R` are ones, `F`/`L` zeros.
fn seat_id(pass: &str) -> Result<usize> {
    ensure!(pass.len() == 10, "boarding pass {:?} is not 10 characters", pass);
    pass.bytes().try_fold(0, |id, b| match b {
        b'F' | b'L' => Ok(id * 2),
        b'B' | b'R' => Ok(id * 2 + 1),
        _ => Err(anyhow!("unexpected {:?} in boarding pass {:?}", b as char, pass)),
    })
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let ids = input.lines().map(str::trim).filter(|line| !line.is_empty())
        .map(seat_id).collect::<Result<Vec<_>>>()?;
    if part == 1 {
        ids.iter().max().map(|id| id.to_string()).ok_or_else(|| anyhow!("no boarding passes"))
    } else {
        let mut taken = bitarr![0; 1024];
        for &id in &ids {taken.set(id, true)};
        (1 .. 1023).find(|&id| !taken[id] && taken[id - 1] && taken[id + 1])
            .map(|id| id.to_string()).ok_or_else(|| anyhow!("no free seat between two taken ones"))
    }
}
