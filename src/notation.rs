//! Short text notation for orders.
//!
//! Provinces are 3-letter abbreviations, coasts follow a slash, and the
//! unit-kind letter before a province is optional:
//!
//! ```text
//! A par - bur        F mao - spa/nc     A vie H
//! A tyr S A vie      A tyr S A vie - bud
//! F nth C A lon - bel
//! ```
//!
//! Orders address units by province only, so formatting leaves the letter
//! out. Several orders are joined with ` ; `.

use thiserror::Error;

use crate::board::order::{BuildOrder, Order, RetreatOrder};
use crate::board::province::{Coast, Province};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum NotationError {
    #[error("empty input")]
    EmptyInput,

    #[error("unknown province '{0}'")]
    UnknownProvince(String),

    #[error("unknown coast '{0}'")]
    UnknownCoast(String),

    #[error("unknown action '{0}'")]
    UnknownAction(String),

    #[error("unexpected end of input, expected {0}")]
    UnexpectedEnd(&'static str),

    #[error("unexpected token '{found}', expected {expected}")]
    UnexpectedToken {
        expected: &'static str,
        found: String,
    },

    #[error("trailing input '{0}'")]
    TrailingInput(String),
}

struct Tokens<'a> {
    items: Vec<&'a str>,
    pos: usize,
}

impl<'a> Tokens<'a> {
    fn new(s: &'a str) -> Self {
        Tokens {
            items: s.split_whitespace().collect(),
            pos: 0,
        }
    }

    fn peek(&self) -> Option<&'a str> {
        self.items.get(self.pos).copied()
    }

    fn next(&mut self, expected: &'static str) -> Result<&'a str, NotationError> {
        let tok = self.peek().ok_or(NotationError::UnexpectedEnd(expected))?;
        self.pos += 1;
        Ok(tok)
    }

    fn is(&self, word: &str) -> bool {
        self.peek().is_some_and(|t| t.eq_ignore_ascii_case(word))
    }

    fn expect(&mut self, word: &'static str) -> Result<(), NotationError> {
        let tok = self.next(word)?;
        if tok.eq_ignore_ascii_case(word) {
            Ok(())
        } else {
            Err(NotationError::UnexpectedToken {
                expected: word,
                found: tok.to_string(),
            })
        }
    }

    /// Skips an `A` or `F` unit letter if present.
    fn skip_kind(&mut self) {
        if self.is("A") || self.is("F") {
            self.pos += 1;
        }
    }

    fn location(&mut self) -> Result<(Province, Coast), NotationError> {
        let tok = self.next("province")?;
        let (prov, coast) = tok.split_once('/').unwrap_or((tok, ""));
        let province =
            Province::from_abbr(prov).ok_or_else(|| NotationError::UnknownProvince(prov.to_string()))?;
        let coast = Coast::from_abbr(coast).ok_or_else(|| NotationError::UnknownCoast(coast.to_string()))?;
        Ok((province, coast))
    }

    fn province(&mut self) -> Result<Province, NotationError> {
        self.location().map(|(p, _)| p)
    }

    fn finish(&self) -> Result<(), NotationError> {
        match self.peek() {
            None => Ok(()),
            Some(_) => Err(NotationError::TrailingInput(self.items[self.pos..].join(" "))),
        }
    }
}

/// Parses one movement order.
pub fn parse_order(s: &str) -> Result<Order, NotationError> {
    let mut t = Tokens::new(s);
    if t.peek().is_none() {
        return Err(NotationError::EmptyInput);
    }
    t.skip_kind();
    let unit = t.province()?;

    let action = t.next("action (H, -, S, C)")?;
    let order = match action.to_ascii_uppercase().as_str() {
        "H" => Order::hold(unit),
        "-" => {
            let (dest, coast) = t.location()?;
            Order::move_to_coast(unit, dest, coast)
        }
        "S" => {
            t.skip_kind();
            let supported = t.province()?;
            if t.is("-") {
                t.expect("-")?;
                Order::support_move(unit, supported, t.province()?)
            } else {
                if t.is("H") {
                    t.expect("H")?;
                }
                Order::support_hold(unit, supported)
            }
        }
        "C" => {
            t.skip_kind();
            let convoyed = t.province()?;
            t.expect("-")?;
            Order::convoy(unit, convoyed, t.province()?)
        }
        _ => return Err(NotationError::UnknownAction(action.to_string())),
    };
    t.finish()?;
    Ok(order)
}

/// Parses orders separated by `;`. Blank entries are skipped.
pub fn parse_orders(s: &str) -> Result<Vec<Order>, NotationError> {
    let orders: Vec<Order> = s
        .split(';')
        .filter(|part| !part.trim().is_empty())
        .map(parse_order)
        .collect::<Result<_, _>>()?;
    if orders.is_empty() {
        return Err(NotationError::EmptyInput);
    }
    Ok(orders)
}

fn location(province: Province, coast: Coast) -> String {
    match coast {
        Coast::None => province.abbr().to_string(),
        c => format!("{}/{}", province.abbr(), c.abbr()),
    }
}

pub fn format_order(order: &Order) -> String {
    match *order {
        Order::Hold { unit } => format!("{} H", unit.abbr()),
        Order::Move { unit, dest, coast } => format!("{} - {}", unit.abbr(), location(dest, coast)),
        Order::Support {
            unit,
            supported,
            dest: None,
        } => format!("{} S {}", unit.abbr(), supported.abbr()),
        Order::Support {
            unit,
            supported,
            dest: Some(dest),
        } => format!("{} S {} - {}", unit.abbr(), supported.abbr(), dest.abbr()),
        Order::Convoy {
            unit,
            convoyed,
            dest,
        } => format!("{} C {} - {}", unit.abbr(), convoyed.abbr(), dest.abbr()),
    }
}

pub fn format_orders(orders: &[Order]) -> String {
    orders.iter().map(format_order).collect::<Vec<_>>().join(" ; ")
}

/// `bur R par` or `bur D`.
pub fn format_retreat(order: &RetreatOrder) -> String {
    match *order {
        RetreatOrder::Retreat { unit, dest, coast } => {
            format!("{} R {}", unit.abbr(), location(dest, coast))
        }
        RetreatOrder::Disband { unit } => format!("{} D", unit.abbr()),
    }
}

/// `F stp/sc B`, `par D` or `W`.
pub fn format_build(order: &BuildOrder) -> String {
    match *order {
        BuildOrder::Build {
            province,
            kind,
            coast,
        } => format!("{} {} B", kind.letter(), location(province, coast)),
        BuildOrder::Disband { unit } => format!("{} D", unit.abbr()),
        BuildOrder::Waive => "W".to_string(),
    }
}
