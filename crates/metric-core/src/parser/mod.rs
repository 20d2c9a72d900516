//! Unit expression parser using pest
//!
//! Accepts everything the formatter emits, in both fancy and plain form:
//! `12kN·s⁻¹`, `12kN*s^-1` and `12kN/s` all parse to the same unit.

use pest::iterators::Pair;
use pest::Parser;
use pest_derive::Parser;
use tracing::{debug, trace};

use crate::error::UnitError;
use crate::format::{SUPERSCRIPT_DIGITS, SUPERSCRIPT_MINUS, SUPERSCRIPT_PLUS};
use crate::types::{Prefix, Unit, MAX_POWER};

#[derive(Parser)]
#[grammar = "parser/grammar.pest"]
pub struct UnitParser;

/// Parse a unit expression such as `5 kg·m/s²`
pub fn parse_unit(input: &str) -> Result<Unit, UnitError> {
    let normalized = normalize(input);
    if normalized.is_empty() {
        return Err(UnitError::Format("empty unit expression".to_string()));
    }
    debug!(input, %normalized, "parsing unit");

    let expr = UnitParser::parse(Rule::unit_expr, &normalized)
        .map_err(|e| {
            debug!(input, error = %e, "unit expression rejected");
            UnitError::Format(format!("{} in '{}'", e.variant.message(), input))
        })?
        .next()
        .ok_or_else(|| UnitError::Format(format!("nothing to parse in '{input}'")))?;

    let mut quantity = 1.0;
    let mut unit = Unit::scalar(1.0);
    for pair in expr.into_inner() {
        match pair.as_rule() {
            Rule::number => quantity = parse_number(pair.as_str())?,
            Rule::numerator => unit = multiply(unit, build_polynomial(pair, 1)?)?,
            Rule::denominator => unit = multiply(unit, build_polynomial(pair, -1)?)?,
            _ => {}
        }
    }
    Ok(unit * quantity)
}

/// Rewrite the fancy notation into what the grammar accepts
fn normalize(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_superscript = false;
    for c in input.chars() {
        if c.is_whitespace() {
            continue;
        }
        if let Some(plain) = from_superscript(c) {
            if !in_superscript {
                out.push('^');
                in_superscript = true;
            }
            out.push(plain);
            continue;
        }
        in_superscript = false;
        out.push(match c {
            '·' | '⋅' => '*',
            // ohm sign and micro sign have their own code points
            '\u{2126}' => 'Ω',
            'µ' => 'μ',
            c => c,
        });
    }
    out
}

fn from_superscript(c: char) -> Option<char> {
    match c {
        SUPERSCRIPT_MINUS => Some('-'),
        SUPERSCRIPT_PLUS => Some('+'),
        _ => SUPERSCRIPT_DIGITS
            .iter()
            .position(|&d| d == c)
            .and_then(|d| char::from_digit(d as u32, 10)),
    }
}

fn parse_number(s: &str) -> Result<f64, UnitError> {
    s.parse::<f64>()
        .map_err(|e| UnitError::Format(format!("invalid number '{s}': {e}")))
}

/// Multiply the terms of a numerator (`sign` 1) or denominator (`sign` -1)
fn build_polynomial(pair: Pair<'_, Rule>, sign: i32) -> Result<Unit, UnitError> {
    let mut unit = Unit::scalar(1.0);
    for polynomial in pair.into_inner() {
        for term in polynomial.into_inner() {
            unit = multiply(unit, build_term(term, sign)?)?;
        }
    }
    Ok(unit)
}

fn build_term(pair: Pair<'_, Rule>, sign: i32) -> Result<Unit, UnitError> {
    let mut inner = pair.into_inner();
    let symbol = inner.next().map(|p| p.as_str()).unwrap_or_default();
    let power = match inner.next() {
        Some(exponent) => {
            let text = exponent.as_str();
            text.parse::<i32>()
                .map_err(|e| UnitError::Format(format!("invalid exponent '{text}': {e}")))?
        }
        None => 1,
    };
    let unit = resolve_symbol(symbol)?;
    power
        .checked_mul(sign)
        .and_then(|power| unit.checked_powi(power))
        .ok_or_else(|| exponent_out_of_range(symbol))
}

fn multiply(lhs: Unit, rhs: Unit) -> Result<Unit, UnitError> {
    lhs.checked_mul(&rhs)
        .ok_or_else(|| exponent_out_of_range(&rhs.format("ic")))
}

fn exponent_out_of_range(near: &str) -> UnitError {
    UnitError::Format(format!(
        "exponent out of range near '{near}' (limit ±{MAX_POWER})"
    ))
}

/// Split a prefixed symbol into prefix and unit.
///
/// Suffixes are tried shortest first, so `cd` is candela rather than
/// centi-day and `mol` wins over a prefixed `ol`. A suffix only counts when
/// what is left in front of it is a valid prefix: `ohm` is not `oh` + `m`.
pub fn resolve_symbol(symbol: &str) -> Result<Unit, UnitError> {
    for (start, _) in symbol.char_indices().rev() {
        let (head, tail) = symbol.split_at(start);
        if !Unit::exists(tail) {
            continue;
        }
        let prefix = if head.is_empty() {
            Some(Prefix::Unity)
        } else {
            Prefix::parse(head)
        };
        if let Some(prefix) = prefix {
            trace!(symbol, %prefix, unit = tail, "resolved symbol");
            return Unit::create_prefixed(prefix, tail);
        }
    }
    Err(UnitError::UnknownSymbol(symbol.to_string()))
}
