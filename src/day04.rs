use anyhow::{anyhow, bail, Result};
use arrayvec::ArrayVec;
use regex::Regex;

use crate::input;

const REQUIRED: [&str; 7] = ["byr", "iyr", "eyr", "hgt", "hcl", "ecl", "pid"];
const EYE_COLORS: [&str; 7] = ["amb", "blu", "brn", "gry", "grn", "hzl", "oth"];

type Passport<'a> = ArrayVec<(&'a str, &'a str), 8>;

fn parse(input: &str) -> Result<Vec<Passport>> {
    input::blocks(input).into_iter().map(|block| {
        let mut passport = Passport::new();
        for field in block.iter().flat_map(|line| line.split_whitespace()) {
            let (key, value) = input::split_pair(field, ":")?;
            if key != "cid" && !REQUIRED.contains(&key) {bail!("unknown passport field {:?}", key)};
            passport.try_push((key, value)).map_err(|_| anyhow!("too many fields in passport {:?}", block))?;
        }
        Ok(passport)
    }).collect()
}

fn has_required(passport: &Passport) -> bool {
    REQUIRED.iter().all(|required| passport.iter().any(|(key, _)| key == required))
}

struct Validator {
    hair: Regex,
    passport_id: Regex,
}

impl Validator {
    fn new() -> Result<Validator> {
        Ok(Validator {hair: Regex::new("^#[0-9a-f]{6}$")?, passport_id: Regex::new("^[0-9]{9}$")?})
    }

    fn field(&self, key: &str, value: &str) -> bool {
        let year_in = |low: u32, high: u32| value.len() == 4 && value.parse().is_ok_and(|year: u32| (low ..= high).contains(&year));
        match key {
            "byr" => year_in(1920, 2002),
            "iyr" => year_in(2010, 2020),
            "eyr" => year_in(2020, 2030),
            "hgt" => {
                let (number, range) = if let Some(cm) = value.strip_suffix("cm") {
                    (cm, 150 ..= 193)
                } else if let Some(inches) = value.strip_suffix("in") {
                    (inches, 59 ..= 76)
                } else {
                    return false
                };
                number.parse().is_ok_and(|height: u32| range.contains(&height))
            },
            "hcl" => self.hair.is_match(value),
            "ecl" => EYE_COLORS.contains(&value),
            "pid" => self.passport_id.is_match(value),
            _ => true,
        }
    }
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let passports = parse(input)?;
    let complete = passports.iter().filter(|passport| has_required(passport));
    let count = if part == 1 {
        complete.count()
    } else {
        let validator = Validator::new()?;
        complete.filter(|passport| passport.iter().all(|(key, value)| validator.field(key, value))).count()
    };
    Ok(count.to_string())
}
