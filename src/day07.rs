use std::collections::VecDeque;

use anyhow::{anyhow, bail, Result};
use log::debug;
use regex::Regex;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::input;

const MINE: &str = "shiny gold";

type Rules<'a> = FxHashMap<&'a str, Vec<(u64, &'a str)>>;

fn parse(input: &str) -> Result<Rules> {
    let rule_re = Regex::new(r"^(\w+ \w+) bags contain (.+)\.$")?;
    let content_re = Regex::new(r"^(\d+) (\w+ \w+) bags?$")?;
    let mut rules = Rules::default();
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let caps = rule_re.captures(line).ok_or_else(|| anyhow!("malformed rule {:?}", line))?;
        let (_, [outer, contents]) = caps.extract();
        let contents = if contents == "no other bags" {
            vec![]
        } else {
            contents.split(", ").map(|content| {
                let caps = content_re.captures(content).ok_or_else(|| anyhow!("malformed content {:?} in {:?}", content, line))?;
                let (_, [count, inner]) = caps.extract();
                Ok((input::parse(count)?, inner))
            }).collect::<Result<Vec<_>>>()?
        };
        if rules.insert(outer, contents).is_some() {bail!("second rule for {} bags", outer)};
    }
    if let Some((_, missing)) = rules.values().flatten().find(|(_, inner)| !rules.contains_key(inner)) {
        bail!("no rule for {} bags", missing);
    }
    Ok(rules)
}

fn containers(rules: &Rules, bag: &str) -> usize {
    let mut inverse: FxHashMap<&str, Vec<&str>> = FxHashMap::default();
    for (&outer, contents) in rules {
        for &(_, inner) in contents {
            inverse.entry(inner).or_default().push(outer);
        }
    }
    let mut seen = FxHashSet::default();
    let mut queue = VecDeque::from([bag]);
    while let Some(bag) = queue.pop_front() {
        for &outer in inverse.get(bag).into_iter().flatten() {
            if seen.insert(outer) {queue.push_back(outer)};
        }
    }
    seen.len()
}

/// `None` in `memo` marks a bag whose contents are still being counted.
fn contents<'a>(rules: &Rules<'a>, bag: &'a str, memo: &mut FxHashMap<&'a str, Option<u64>>) -> Result<u64> {
    match memo.get(bag) {
        Some(&Some(count)) => return Ok(count),
        Some(None) => bail!("{} bags end up containing themselves", bag),
        None => {},
    }
    memo.insert(bag, None);
    let mut total = 0;
    for &(count, inner) in rules.get(bag).into_iter().flatten() {
        total += count * (1 + contents(rules, inner, memo)?);
    }
    memo.insert(bag, Some(total));
    Ok(total)
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let rules = parse(input)?;
    debug!("{} bag rules", rules.len());
    if part == 1 {
        Ok(containers(&rules, MINE).to_string())
    } else {
        if !rules.contains_key(MINE) {bail!("no rule for {} bags", MINE)};
        Ok(contents(&rules, MINE, &mut FxHashMap::default())?.to_string())
    }
}
