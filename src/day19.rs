use anyhow::{anyhow, bail, ensure, Result};
use itertools::Itertools;
use log::debug;
use regex::RegexBuilder;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::input;

enum Rule {
    Char(char),
    /// Alternatives, each a sequence of rule numbers.
    Alts(Vec<Vec<u32>>),
}

type Grammar = FxHashMap<u32, Rule>;

fn parse(input: &str) -> Result<(Grammar, Vec<&str>)> {
    let blocks = input::blocks(input);
    let [rules, messages] = &blocks[..] else {bail!("expected rules and messages separated by a blank line")};
    let mut grammar = Grammar::default();
    for &line in rules {
        let (id, body) = input::split_pair(line, ": ")?;
        let rule = if let Some(quoted) = body.strip_prefix('"').and_then(|rest| rest.strip_suffix('"')) {
            let Ok(c) = quoted.chars().exactly_one() else {bail!("rule {:?} must match a single character", line)};
            Rule::Char(c)
        } else {
            Rule::Alts(body.split(" | ").map(|alt| {
                alt.split_whitespace().map(input::parse::<u32>).collect::<Result<Vec<_>, _>>()
            }).collect::<Result<Vec<_>, _>>()?)
        };
        if grammar.insert(input::parse(id)?, rule).is_some() {bail!("rule {} is defined twice", id)};
    }
    Ok((grammar, messages.clone()))
}

fn lookup(grammar: &Grammar, id: u32) -> Result<&Rule> {
    grammar.get(&id).ok_or_else(|| anyhow!("rule {} is not defined", id))
}

/// Length of the shortest text `id` matches.
fn shortest(grammar: &Grammar, id: u32, memo: &mut FxHashMap<u32, Option<usize>>) -> Result<usize> {
    match memo.get(&id) {
        Some(&Some(len)) => return Ok(len),
        Some(None) => bail!("rule {} refers back to itself", id),
        None => {},
    }
    memo.insert(id, None);
    let len = match lookup(grammar, id)? {
        Rule::Char(_) => 1,
        Rule::Alts(alts) => {
            let mut best = usize::MAX;
            for seq in alts {
                let mut total = 0;
                for &part in seq {total += shortest(grammar, part, memo)?};
                best = best.min(total);
            }
            best
        },
    };
    memo.insert(id, Some(len));
    Ok(len)
}

/// Turns rules into regular expression source, innermost rules first.
struct Compiler<'g> {
    grammar: &'g Grammar,
    /// With a bound, rule 8 is read as `42 | 42 8` and rule 11 as `42 31 | 42 11 31`, the
    /// latter unrolled up to that many levels.
    loop_bound: Option<usize>,
    cache: FxHashMap<u32, String>,
    active: FxHashSet<u32>,
}

impl<'g> Compiler<'g> {
    fn new(grammar: &'g Grammar, loop_bound: Option<usize>) -> Compiler<'g> {
        Compiler {grammar, loop_bound, cache: FxHashMap::default(), active: FxHashSet::default()}
    }

    fn pattern(&mut self, id: u32) -> Result<String> {
        if let Some(pattern) = self.cache.get(&id) {return Ok(pattern.clone())};
        ensure!(self.active.insert(id), "rule {} refers back to itself", id);
        let pattern = match (self.loop_bound, id) {
            (Some(_), 8) => format!("(?:{})+", self.pattern(42)?),
            (Some(bound), 11) => {
                let (head, tail) = (self.pattern(42)?, self.pattern(31)?);
                format!("(?:{})", (1 ..= bound).map(|n| format!("(?:{head}){{{n}}}(?:{tail}){{{n}}}")).join("|"))
            },
            _ => match lookup(self.grammar, id)? {
                Rule::Char(c) => regex::escape(&c.to_string()),
                Rule::Alts(alts) => {
                    let mut options = Vec::with_capacity(alts.len());
                    for seq in alts {
                        let mut option = String::new();
                        for &part in seq {option += &self.pattern(part)?};
                        options.push(option);
                    }
                    if options.len() == 1 {options.remove(0)} else {format!("(?:{})", options.join("|"))}
                },
            },
        };
        self.active.remove(&id);
        self.cache.insert(id, pattern.clone());
        Ok(pattern)
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let (grammar, messages) = parse(input)?;
    let loop_bound = if part == 1 {
        None
    } else {
        let mut memo = FxHashMap::default();
        let pair = shortest(&grammar, 42, &mut memo)? + shortest(&grammar, 31, &mut memo)?;
        let longest = messages.iter().map(|message| message.len()).max().unwrap_or(0);
        Some((longest / pair.max(1)).max(1))
    };
    let pattern = Compiler::new(&grammar, loop_bound).pattern(0)?;
    debug!("rule 0 compiled to {} bytes of pattern, loop bound {:?}", pattern.len(), loop_bound);
    let matcher = RegexBuilder::new(&format!("^(?:{})$", pattern))
        .size_limit(1 << 28)
        .dfa_size_limit(1 << 28)
        .build()?;
    Ok(messages.iter().filter(|message| matcher.is_match(message)).count().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLE: &str = r#"0: 4 1 5
1: 2 3 | 3 2
2: 4 4 | 5 5
3: 4 5 | 5 4
4: "a"
5: "b"

ababbb
bababa
abbbab
aaabbb
aaaabbb
"#;

    const LOOPING: &str = r#"42: 9 14 | 10 1
9: 14 27 | 1 26
10: 23 14 | 28 1
1: "a"
11: 42 31
5: 1 14 | 15 1
19: 14 1 | 14 14
12: 24 14 | 19 1
16: 15 1 | 14 14
31: 14 17 | 1 13
6: 14 14 | 1 14
2: 1 24 | 14 4
0: 8 11
13: 14 3 | 1 12
15: 1 | 14
17: 14 2 | 1 7
23: 25 1 | 22 14
28: 16 1
4: 1 1
20: 14 14 | 1 15
3: 5 14 | 16 1
27: 1 6 | 14 18
14: "b"
21: 14 1 | 1 14
25: 1 1 | 1 14
22: 14 14
8: 42
26: 14 22 | 1 20
18: 15 15
7: 14 5 | 1 21
24: 14 1

abbbbbabbbaaaababbaabbbbabababbbabbbbbbabaaaa
bbabbbbaabaabba
babbbbaabbbbbabbbbbbaabaaabaaa
aaabbbbbbaaaabaababaabababbabaaabbababababaaa
bbbbbbbaaaabbbbaaabbabaaa
bbbababbbbaaaaaaaabbababaaababaabab
ababaaaaaabaaab
ababaaaaabbbaba
baabbaaaabbaaaababbaababb
abbbbabbbbaaaababbbbbbaaaababb
aaaaabbaabaaaaababaa
aaaabbaaaabbaaa
aaaabbaabbaaaaaaabbbabbbaaabbaabaaa
babaaabbbaaabaababbaabababaaab
aabbbbbaabbbaaaaaabbbbbababaaaaabbaaabba
"#;

    #[test]
    fn example() {
        assert_eq!(solve(1, EXAMPLE).unwrap(), "2");
        assert_eq!(solve(1, LOOPING).unwrap(), "3");
        assert_eq!(solve(2, LOOPING).unwrap(), "12");
    }

    #[test]
    fn compiled_pattern() {
        let (grammar, _) = parse(EXAMPLE).unwrap();
        let mut compiler = Compiler::new(&grammar, None);
        assert_eq!(compiler.pattern(3).unwrap(), "(?:ab|ba)");
        assert_eq!(compiler.pattern(0).unwrap(), "a(?:(?:aa|bb)(?:ab|ba)|(?:ab|ba)(?:aa|bb))b");
    }

    #[test]
    fn shortest_matches() {
        let (grammar, _) = parse(LOOPING).unwrap();
        let mut memo = FxHashMap::default();
        assert_eq!(shortest(&grammar, 42, &mut memo).unwrap(), 5);
        assert_eq!(shortest(&grammar, 31, &mut memo).unwrap(), 5);
    }

    #[test]
    fn bad_grammars() {
        assert!(solve(1, "0: 1 0 | 1\n1: \"a\"\n\na\n").is_err());
        assert!(solve(1, "0: 1 2\n1: \"a\"\n\na\n").is_err());
        assert!(solve(1, "0: \"ab\"\n\nab\n").is_err());
        assert!(solve(2, EXAMPLE).is_err());
    }
}
