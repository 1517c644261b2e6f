use std::iter::Peekable;
use std::slice;

use anyhow::{anyhow, bail, Result};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Op {Add, Mul}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Token {Num(u64), Op(Op), Open, Close}

#[derive(Debug, PartialEq, Eq)]
enum Expr {
    Num(u64),
    Binary(Op, Box<Expr>, Box<Expr>),
}

impl Expr {
    fn eval(&self) -> u64 {
        match self {
            Expr::Num(n) => *n,
            Expr::Binary(Op::Add, lhs, rhs) => lhs.eval() + rhs.eval(),
            Expr::Binary(Op::Mul, lhs, rhs) => lhs.eval() * rhs.eval(),
        }
    }
}

fn tokenize(line: &str) -> Result<Vec<Token>> {
    let mut tokens = vec![];
    let mut chars = line.char_indices().peekable();
    while let Some((ix, c)) = chars.next() {
        tokens.push(match c {
            ' ' => continue,
            '+' => Token::Op(Op::Add),
            '*' => Token::Op(Op::Mul),
            '(' => Token::Open,
            ')' => Token::Close,
            '0' ..= '9' => {
                let mut end = ix + 1;
                while let Some(&(next, '0' ..= '9')) = chars.peek() {
                    end = next + 1;
                    chars.next();
                }
                Token::Num(line[ix .. end].parse()?)
            },
            _ => bail!("unexpected {:?} in {:?}", c, line),
        });
    }
    Ok(tokens)
}

/// Precedence climbing; operators of equal precedence associate to the left.
struct Parser<'t> {
    tokens: Peekable<slice::Iter<'t, Token>>,
    precedence: fn(Op) -> u8,
}

impl Parser<'_> {
    fn parse(tokens: &[Token], precedence: fn(Op) -> u8) -> Result<Expr> {
        let mut parser = Parser {tokens: tokens.iter().peekable(), precedence};
        let expr = parser.expr(0)?;
        match parser.tokens.next() {
            None => Ok(expr),
            Some(token) => Err(anyhow!("unexpected {:?} after a complete expression", token)),
        }
    }

    fn expr(&mut self, min_precedence: u8) -> Result<Expr> {
        let mut lhs = self.operand()?;
        while let Some(&&Token::Op(op)) = self.tokens.peek() {
            let precedence = (self.precedence)(op);
            if precedence < min_precedence {break};
            self.tokens.next();
            let rhs = self.expr(precedence + 1)?;
            lhs = Expr::Binary(op, Box::new(lhs), Box::new(rhs));
        }
        Ok(lhs)
    }

    fn operand(&mut self) -> Result<Expr> {
        match self.tokens.next() {
            Some(&Token::Num(n)) => Ok(Expr::Num(n)),
            Some(Token::Open) => {
                let inner = self.expr(0)?;
                match self.tokens.next() {
                    Some(Token::Close) => Ok(inner),
                    other => Err(anyhow!("expected ')', found {:?}", other)),
                }
            },
            other => Err(anyhow!("expected a number or '(', found {:?}", other)),
        }
    }
}

fn flat(_: Op) -> u8 {1}

fn addition_first(op: Op) -> u8 {
    match op {Op::Add => 2, Op::Mul => 1}
}

pub fn solve(part: u8, input: &str) -> Result<String> {
    let precedence = if part == 1 {flat as fn(Op) -> u8} else {addition_first};
    let mut total = 0;
    for line in input.lines().map(str::trim).filter(|line| !line.is_empty()) {
        let expr = Parser::parse(&tokenize(line)?, precedence).map_err(|err| err.context(line.to_owned()))?;
        total += expr.eval();
    }
    Ok(total.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXAMPLES: [(&str, u64, u64); 6] = [
        ("1 + 2 * 3 + 4 * 5 + 6", 71, 231),
        ("1 + (2 * 3) + (4 * (5 + 6))", 51, 51),
        ("2 * 3 + (4 * 5)", 26, 46),
        ("5 + (8 * 3 + 9 + 3 * 4 * 3)", 437, 1445),
        ("5 * 9 * (7 * 3 * 3 + 9 * 3 + (8 + 6 * 4))", 12240, 669060),
        ("((2 + 4 * 9) * (6 + 9 * 8 + 6) + 6) + 2 + 4 * 2", 13632, 23340),
    ];

    #[test]
    fn example() {
        for (line, left_to_right, plus_first) in EXAMPLES {
            assert_eq!(solve(1, line).unwrap(), left_to_right.to_string(), "{}", line);
            assert_eq!(solve(2, line).unwrap(), plus_first.to_string(), "{}", line);
        }
        let all = EXAMPLES.iter().map(|(line, ..)| *line).collect::<Vec<_>>().join("\n");
        assert_eq!(solve(1, &all).unwrap(), EXAMPLES.iter().map(|e| e.1).sum::<u64>().to_string());
    }

    #[test]
    fn tree_shape() {
        let tokens = tokenize("12 * 3 + 4").unwrap();
        let num = |n| Box::new(Expr::Num(n));
        assert_eq!(
            Parser::parse(&tokens, addition_first).unwrap(),
            Expr::Binary(Op::Mul, num(12), Box::new(Expr::Binary(Op::Add, num(3), num(4)))),
        );
        assert_eq!(
            Parser::parse(&tokens, flat).unwrap(),
            Expr::Binary(Op::Add, Box::new(Expr::Binary(Op::Mul, num(12), num(3))), num(4)),
        );
    }

    #[test]
    fn malformed() {
        assert!(solve(1, "1 + (2 * 3").is_err());
        assert!(solve(1, "1 + 2)").is_err());
        assert!(solve(1, "1 - 2").is_err());
        assert!(solve(1, "1 + * 2").is_err());
    }
}
