use std::ops::RangeInclusive;

use anyhow::{anyhow, bail, ensure, Result};
use log::debug;
use regex::Regex;

use crate::input;

struct Field<'a> {
    name: &'a str,
    ranges: [RangeInclusive<u64>; 2],
}

impl Field<'_> {
    fn accepts(&self, value: u64) -> bool {
        self.ranges.iter().any(|range| range.contains(&value))
    }
}

struct Notes<'a> {
    fields: Vec<Field<'a>>,
    mine: Vec<u64>,
    nearby: Vec<Vec<u64>>,
}

fn parse(input: &str) -> Result<Notes> {
    let blocks = input::blocks(input);
    let [fields, mine, nearby] = &blocks[..] else {
        bail!("expected field rules, your ticket and nearby tickets")
    };
    ensure!(mine.first() == Some(&"your ticket:"), "missing \"your ticket:\" header");
    ensure!(nearby.first() == Some(&"nearby tickets:"), "missing \"nearby tickets:\" header");

    let field_re = Regex::new(r"^([^:]+): (\d+)-(\d+) or (\d+)-(\d+)$")?;
    let fields = fields.iter().map(|&line| {
        let caps = field_re.captures(line).ok_or_else(|| anyhow!("malformed field rule {:?}", line))?;
        let (_, [name, a, b, c, d]) = caps.extract();
        Ok(Field {name, ranges: [input::parse(a)? ..= input::parse(b)?, input::parse(c)? ..= input::parse(d)?]})
    }).collect::<Result<Vec<_>>>()?;
    ensure!(fields.len() <= 64, "{} fields do not fit a 64-bit candidate set", fields.len());

    let mine = input::comma_separated(mine.get(1).ok_or_else(|| anyhow!("your ticket is missing"))?)?;
    let nearby = nearby[1 ..].iter().map(|line| input::comma_separated(line)).collect::<Result<Vec<_>, _>>()?;
    if let Some(ticket) = nearby.iter().find(|ticket| ticket.len() != mine.len()) {
        bail!("ticket {:?} has a different number of values than yours", ticket);
    }
    Ok(Notes {fields, mine, nearby})
}

impl Notes<'_> {
    fn valid_value(&self, value: u64) -> bool {
        self.fields.iter().any(|field| field.accepts(value))
    }

    fn error_rate(&self) -> u64 {
        self.nearby.iter().flatten().filter(|&&value| !self.valid_value(value)).sum()
    }

    /// The field name of every ticket column, deduced by elimination.
    fn columns(&self) -> Result<Vec<&str>> {
        let tickets = self.nearby.iter().filter(|ticket| ticket.iter().all(|&v| self.valid_value(v)))
            .chain(std::iter::once(&self.mine)).collect::<Vec<_>>();
        let mut candidates = (0 .. self.mine.len()).map(|col| {
            (0 .. self.fields.len()).filter(|&f| tickets.iter().all(|ticket| self.fields[f].accepts(ticket[col])))
                .fold(0u64, |set, f| set | 1 << f)
        }).collect::<Vec<_>>();

        let mut assigned = vec![None; candidates.len()];
        while assigned.iter().any(Option::is_none) {
            let Some(col) = (0 .. candidates.len())
                .find(|&col| assigned[col].is_none() && candidates[col].count_ones() == 1)
            else {
                bail!("cannot narrow down the remaining columns");
            };
            let field = candidates[col].trailing_zeros() as usize;
            debug!("column {} is {}", col, self.fields[field].name);
            assigned[col] = Some(self.fields[field].name);
            for set in &mut candidates {*set &= !(1 << field)};
        }
        Ok(assigned.into_iter().flatten().collect())
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let notes = parse(input)?;
    if part == 1 {return Ok(notes.error_rate().to_string())};
    let columns = notes.columns()?;
    Ok(columns.iter().zip(&notes.mine)
        .filter(|(name, _)| name.starts_with("departure"))
        .map(|(_, value)| value)
        .product::<u64>().to_string())
}
