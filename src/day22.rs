use std::collections::VecDeque;

use anyhow::{anyhow, ensure, Result};
use log::{debug, trace};
use rustc_hash::FxHashSet;

use crate::input;

type Deck = VecDeque<u8>;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Player {
    One,
    Two,
}

fn parse(input: &str) -> Result<(Deck, Deck)> {
    let blocks = input::blocks(input);
    let [one, two] = &blocks[..] else {
        return Err(anyhow!("expected two decks, found {} blocks", blocks.len()));
    };
    let deck = |block: &[&str], header: &str| -> Result<Deck> {
        ensure!(block[0].trim() == header, "expected {:?}, found {:?}", header, block[0]);
        Ok(block[1 ..].iter().map(|line| input::parse(line)).collect::<Result<_, _>>()?)
    };
    Ok((deck(one.as_slice(), "Player 1:")?, deck(two.as_slice(), "Player 2:")?))
}

/// Plays until one deck is empty and returns the winner with both final decks.
fn play(mut one: Deck, mut two: Deck, recursive: bool, depth: usize) -> (Player, Deck, Deck) {
    let mut seen: FxHashSet<(Deck, Deck)> = FxHashSet::default();
    let mut rounds = 0;
    loop {
        if recursive && !seen.insert((one.clone(), two.clone())) {
            trace!("game at depth {} repeats after {} rounds", depth, rounds);
            return (Player::One, one, two);
        }
        let (a, b) = match (one.pop_front(), two.pop_front()) {
            (Some(a), Some(b)) => (a, b),
            (Some(a), None) => {
                one.push_front(a);
                return (Player::One, one, two);
            },
            (None, Some(b)) => {
                two.push_front(b);
                return (Player::Two, one, two);
            },
            (None, None) => return (Player::One, one, two),
        };
        rounds += 1;
        let winner = if recursive && one.len() >= a as usize && two.len() >= b as usize {
            let sub_one = one.iter().take(a as usize).copied().collect();
            let sub_two = two.iter().take(b as usize).copied().collect();
            play(sub_one, sub_two, true, depth + 1).0
        } else if a > b {Player::One} else {Player::Two};
        match winner {
            Player::One => one.extend([a, b]),
            Player::Two => two.extend([b, a]),
        }
    }
}

fn score(deck: &Deck) -> u64 {
    deck.iter().rev().zip(1 ..).map(|(&card, position)| card as u64 * position).sum()
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (one, two) = parse(input)?;
    let (winner, one, two) = play(one, two, part == 2, 0);
    debug!("player {:?} wins", winner);
    Ok(score(if winner == Player::One {&one} else {&two}).to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "Player 1:\n9\n2\n6\n3\n1\n\nPlayer 2:\n5\n8\n4\n7\n10\n";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "306");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "291");
    }

    #[test]
    fn repeated_positions_end_the_game() {
        let input = "Player 1:\n43\n19\n\nPlayer 2:\n2\n29\n14\n";
        let (one, two) = parse(input).unwrap();
        assert_eq!(play(one, two, true, 0).0, Player::One);
    }

    #[test]
    fn needs_two_decks() {
        assert!(solve(1, "Player 1:\n1\n").is_err());
        assert!(solve(1, "Player 2:\n1\n\nPlayer 1:\n2\n").is_err());
    }
}
