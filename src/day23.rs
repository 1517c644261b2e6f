use anyhow::{bail, ensure, Result};
use arrayvec::ArrayVec;
use bitvec::prelude::*;

/// A circle of cups labelled `1 ..= n`; `next[label]` is the label clockwise of it.
struct Circle {
    next: Vec<u32>,
    current: u32,
}

impl Circle {
    /// The cups from `labels` in order, then `labels.len() + 1 ..= total`.
    fn new(labels: &[u32], total: usize) -> Circle {
        let mut next = vec![0; total + 1];
        let order = labels.iter().copied().chain(labels.len() as u32 + 1 ..= total as u32);
        let mut last = labels[0];
        for label in order.skip(1) {
            next[last as usize] = label;
            last = label;
        }
        next[last as usize] = labels[0];
        Circle {next, current: labels[0]}
    }

    fn step(&mut self) {
        let highest = self.next.len() as u32 - 1;
        let mut picked = ArrayVec::<u32, 3>::new();
        let mut cup = self.current;
        for _ in 0 .. 3 {
            cup = self.next[cup as usize];
            picked.push(cup);
        }
        let mut destination = self.current;
        loop {
            destination = if destination == 1 {highest} else {destination - 1};
            if !picked.contains(&destination) {break};
        }
        self.next[self.current as usize] = self.next[picked[2] as usize];
        self.next[picked[2] as usize] = self.next[destination as usize];
        self.next[destination as usize] = picked[0];
        self.current = self.next[self.current as usize];
    }

    fn after_one(&self) -> impl Iterator<Item = u32> + '_ {
        std::iter::successors(Some(self.next[1]), |&cup| Some(self.next[cup as usize])).take_while(|&cup| cup != 1)
    }
}

fn labels(input: &str) -> Result<Vec<u32>> {
    let labels = input.trim().chars().map(|c| match c.to_digit(10) {
        Some(d) => Ok(d),
        None => bail!("bad cup label {:?}", c),
    }).collect::<Result<Vec<_>>>()?;
    ensure!(labels.len() >= 5, "need at least five cups, got {}", labels.len());
    let mut present = bitvec![0; labels.len() + 1];
    for &label in &labels {
        ensure!((1 ..= labels.len() as u32).contains(&label) && !present.replace(label as usize, true),
            "cups must be labelled 1 to {} once each", labels.len());
    }
    Ok(labels)
}

fn play(labels: &[u32], total: usize, moves: usize) -> Circle {
    let mut circle = Circle::new(labels, total);
    for _ in 0 .. moves {circle.step()};
    circle
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let labels = labels(input)?;
    if part == 1 {
        Ok(play(&labels, labels.len(), 100).after_one().map(|cup| cup.to_string()).collect())
    } else {
        let circle = play(&labels, 1_000_000, 10_000_000);
        Ok(circle.after_one().take(2).map(u64::from).product::<u64>().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ten_moves() {
        let circle = play(&labels("389125467").unwrap(), 9, 10);
        assert_eq!(circle.after_one().map(|cup| cup.to_string()).collect::<String>(), "92658374");
    }

    #[test]
    fn example() {
        assert_eq!(solve(1, "389125467\n").unwrap(), "67384529");
        assert_eq!(solve(2, "389125467\n").unwrap(), "149245887792");
    }

    #[test]
    fn labels_must_be_a_permutation() {
        assert!(solve(1, "389125466").is_err());
        assert!(solve(1, "38a125467").is_err());
    }
}
