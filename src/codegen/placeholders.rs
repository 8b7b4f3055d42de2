//! Rewrites positional placeholders in query text into named parameters.
//!
//! Hosts hand over SQL with the engine's own positional markers (`?`,
//! `?NNN`, `$N`). Generated methods bind every argument by name, so each
//! marker becomes `@<field>` for the parameter at that position. Quoted
//! strings, quoted identifiers and comments are copied untouched.

use crate::error::{GenError, GenResult};
use crate::query::Query;

/// How an engine spells positional parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaceholderStyle {
    /// `?` numbered by occurrence, or explicit `?NNN`. Backslash escapes
    /// are honoured inside quotes.
    Question,
    /// `$1`, `$2`, ... with `$tag$ ... $tag$` dollar quoting.
    Dollar,
}

/// Rewrite `query.text`, naming each placeholder after its parameter.
///
/// `names[i]` is the field name of `query.params[i]`. A placeholder whose
/// position matches no parameter is a contract violation.
pub fn rewrite(query: &Query, style: PlaceholderStyle, names: &[String]) -> GenResult<String> {
    let chars: Vec<char> = query.text.chars().collect();
    let mut out = String::with_capacity(query.text.len());
    let mut largest = 0;
    let mut i = 0;

    let bind = |position: usize| -> GenResult<String> {
        query
            .params
            .iter()
            .position(|p| p.index == position)
            .map(|at| format!("@{}", names[at]))
            .ok_or_else(|| {
                GenError::contract(
                    &query.name,
                    format!("placeholder {} has no matching parameter", position),
                )
            })
    };

    while i < chars.len() {
        let c = chars[i];
        let end = match c {
            '\'' | '"' | '`' => quoted_end(&chars, i, style == PlaceholderStyle::Question),
            '-' if chars.get(i + 1) == Some(&'-') => line_end(&chars, i),
            '/' if chars.get(i + 1) == Some(&'*') => block_end(&chars, i),
            '$' if style == PlaceholderStyle::Dollar => {
                let digits = count_digits(&chars, i + 1);
                if digits > 0 {
                    let position = parse_position(query, &chars[i + 1..i + 1 + digits])?;
                    out.push_str(&bind(position)?);
                    i += 1 + digits;
                    continue;
                }
                match dollar_tag_len(&chars, i) {
                    Some(tag) => dollar_quoted_end(&chars, i, tag),
                    None => i + 1,
                }
            }
            '?' if style == PlaceholderStyle::Question => {
                let digits = count_digits(&chars, i + 1);
                let position = if digits > 0 {
                    parse_position(query, &chars[i + 1..i + 1 + digits])?
                } else {
                    largest + 1
                };
                largest = largest.max(position);
                out.push_str(&bind(position)?);
                i += 1 + digits;
                continue;
            }
            _ => i + 1,
        };
        out.extend(&chars[i..end]);
        i = end;
    }

    Ok(out)
}

fn count_digits(chars: &[char], from: usize) -> usize {
    chars
        .iter()
        .skip(from)
        .take_while(|c| c.is_ascii_digit())
        .count()
}

fn parse_position(query: &Query, digits: &[char]) -> GenResult<usize> {
    let text: String = digits.iter().collect();
    text.parse().map_err(|_| {
        GenError::contract(&query.name, format!("placeholder position '{}' is out of range", text))
    })
}

/// End of a quoted run starting at `start`. A doubled quote stays inside.
fn quoted_end(chars: &[char], start: usize, backslash_escapes: bool) -> usize {
    let quote = chars[start];
    let mut i = start + 1;
    while i < chars.len() {
        match chars[i] {
            '\\' if backslash_escapes && quote != '`' => i += 2,
            c if c == quote => {
                if chars.get(i + 1) == Some(&quote) {
                    i += 2;
                } else {
                    return i + 1;
                }
            }
            _ => i += 1,
        }
    }
    chars.len()
}

fn line_end(chars: &[char], start: usize) -> usize {
    chars[start..]
        .iter()
        .position(|&c| c == '\n')
        .map_or(chars.len(), |at| start + at + 1)
}

fn block_end(chars: &[char], start: usize) -> usize {
    (start + 2..chars.len().saturating_sub(1))
        .find(|&i| chars[i] == '*' && chars[i + 1] == '/')
        .map_or(chars.len(), |i| i + 2)
}

/// Length of a `$tag$` opener at `start`, including both dollars.
fn dollar_tag_len(chars: &[char], start: usize) -> Option<usize> {
    let mut i = start + 1;
    if chars.get(i).is_some_and(|c| c.is_ascii_digit()) {
        return None;
    }
    while i < chars.len() && (chars[i].is_alphanumeric() || chars[i] == '_') {
        i += 1;
    }
    (chars.get(i) == Some(&'$')).then_some(i + 1 - start)
}

fn dollar_quoted_end(chars: &[char], start: usize, tag_len: usize) -> usize {
    let tag = &chars[start..start + tag_len];
    let body = start + tag_len;
    (body..chars.len())
        .find(|&i| chars[i..].starts_with(tag))
        .map_or(chars.len(), |i| i + tag_len)
}
