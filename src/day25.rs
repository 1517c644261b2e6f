use anyhow::{anyhow, Result};
use log::debug;

use crate::input;

const MODULUS: u64 = 20201227;
const SUBJECT: u64 = 7;

fn transform(subject: u64, loop_size: u64) -> u64 {
    let (mut base, mut exp, mut value) = (subject % MODULUS, loop_size, 1);
    while exp > 0 {
        if exp & 1 == 1 {value = value * base % MODULUS};
        base = base * base % MODULUS;
        exp >>= 1;
    }
    value
}

/// The number of transform steps that turn 7 into `public_key`.
fn loop_size(public_key: u64) -> Option<u64> {
    let mut value = 1;
    (0 .. MODULUS).find(|_| {
        let found = value == public_key;
        value = value * SUBJECT % MODULUS;
        found
    })
}

pub fn solve(_part: u8, input: &str) -> Result<String> {
    let keys = input::numbers::<u64>(input)?;
    let &[card, door] = &keys[..] else {
        return Err(anyhow!("expected two public keys, found {}", keys.len()));
    };
    let card_loop = loop_size(card).ok_or_else(|| anyhow!("{} is not a public key", card))?;
    debug!("card loop size {}", card_loop);
    Ok(transform(door, card_loop).to_string())
}
