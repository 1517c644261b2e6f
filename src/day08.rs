use anyhow::{anyhow, bail, Result};
use bitvec::prelude::*;
use log::debug;

use crate::input;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {Acc(i64), Jmp(i64), Nop(i64)}

#[derive(Debug, PartialEq, Eq)]
enum Outcome {
    /// An instruction was about to run a second time.
    Looped {acc: i64},
    /// Execution stepped to just past the last instruction.
    Terminated {acc: i64},
    /// A jump left the program anywhere else.
    Crashed {ip: i64},
}

fn parse(input: &str) -> Result<Vec<Op>> {
    input.lines().map(str::trim).filter(|line| !line.is_empty()).map(|line| {
        let (op, arg) = input::split_pair(line, " ")?;
        let arg = input::parse(arg.trim_start_matches('+'))?;
        Ok(match op {
            "acc" => Op::Acc(arg),
            "jmp" => Op::Jmp(arg),
            "nop" => Op::Nop(arg),
            _ => bail!("unknown instruction {:?}", line),
        })
    }).collect()
}

fn run(code: &[Op]) -> Outcome {
    let mut visited = bitvec![0; code.len()];
    let (mut ip, mut acc) = (0i64, 0i64);
    loop {
        let Some(ix) = usize::try_from(ip).ok().filter(|&ix| ix <= code.len()) else {
            return Outcome::Crashed {ip}
        };
        if ix == code.len() {return Outcome::Terminated {acc}};
        if visited.replace(ix, true) {return Outcome::Looped {acc}};
        match code[ix] {
            Op::Acc(arg) => {acc += arg; ip += 1},
            Op::Jmp(arg) => ip += arg,
            Op::Nop(_) => ip += 1,
        }
    }
}

/// Swaps a `jmp` for a `nop` or back; `acc` has nothing to swap with.
fn flipped(op: Op) -> Option<Op> {
    match op {
        Op::Jmp(arg) => Some(Op::Nop(arg)),
        Op::Nop(arg) => Some(Op::Jmp(arg)),
        Op::Acc(_) => None,
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let mut code = parse(input)?;
    if part == 1 {
        return match run(&code) {
            Outcome::Looped {acc} => Ok(acc.to_string()),
            outcome => Err(anyhow!("program never loops: {:?}", outcome)),
        }
    }

    for ix in 0 .. code.len() {
        let Some(patch) = flipped(code[ix]) else {continue};
        let original = std::mem::replace(&mut code[ix], patch);
        let outcome = run(&code);
        code[ix] = original;
        match outcome {
            Outcome::Terminated {acc} => {
                debug!("patched line {} to {:?}", ix + 1, patch);
                return Ok(acc.to_string())
            },
            Outcome::Crashed {ip} => debug!("patching line {} jumps to {}", ix + 1, ip),
            Outcome::Looped {..} => {},
        }
    }
    bail!("no single jmp/nop swap lets the program terminate")
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = "\
nop +0
acc +1
jmp +4
acc +3
jmp -3
acc -99
acc +1
jmp -4
acc +6
";

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "5");
        assert_eq!(solve(2, EXAMPLE).unwrap(), "8");
    }

    #[test]
    fn outcomes() {
        assert_eq!(run(&[Op::Acc(2), Op::Nop(0)]), Outcome::Terminated {acc: 2});
        assert_eq!(run(&[Op::Jmp(-1)]), Outcome::Crashed {ip: -1});
        assert_eq!(run(&[Op::Jmp(5)]), Outcome::Crashed {ip: 5});
        assert_eq!(run(&[Op::Acc(1), Op::Jmp(-1)]), Outcome::Looped {acc: 1});
    }

    #[test]
    fn unpatchable() {
        assert!(solve(2, "jmp +0\njmp -1\n").is_err());
        assert_eq!(solve(2, "acc +1\njmp -1\n").unwrap(), "1");
        assert!(solve(1, "mul +1\n").is_err());
    }
}
