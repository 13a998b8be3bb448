//! Parsing of user range specifications such as `"12-13,44-60"`.

use std::num::IntErrorKind;
use std::ops::RangeInclusive;
use std::sync::OnceLock;

use regex::Regex;

use crate::interval::IntervalSet;

fn pair_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"([0-9]+)-([0-9]+)").expect("range pattern is valid"))
}

fn single_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^\s*([0-9]+)\s*$").expect("single pattern is valid"))
}

/// Parse every `<digits>-<digits>` pair in `input` into a closed range.
///
/// Only ASCII digits count; other scripts' digits are unmatched text.
///
/// Text that does not match is ignored. Bounds are swapped when given in
/// descending order and numbers too large for `usize` are clamped to
/// `usize::MAX`. When no pair is found, a bare integer such as `"7"` yields
/// the single-point range `7..=7`.
///
/// An empty result means "no filter", not "exclude everything".
pub fn parse_ranges(input: &str) -> Vec<RangeInclusive<usize>> {
    let ranges: Vec<RangeInclusive<usize>> = pair_pattern()
        .captures_iter(input)
        .filter_map(|caps| Some(ordered(parse_clamped(&caps[1])?, parse_clamped(&caps[2])?)))
        .collect();

    if !ranges.is_empty() {
        return ranges;
    }

    match single_pattern()
        .captures(input)
        .and_then(|caps| parse_clamped(&caps[1]))
    {
        Some(n) => vec![n..=n],
        None => {
            if !input.trim().is_empty() {
                log::debug!("No ranges found in {:?}", input);
            }
            Vec::new()
        }
    }
}

/// Parse a range specification into an inclusion filter.
///
/// Returns `None` when the specification contains no ranges, so callers
/// include every entry.
pub fn parse_inclusion(input: &str) -> Option<IntervalSet<usize>> {
    let ranges = parse_ranges(input);
    if ranges.is_empty() {
        None
    } else {
        Some(IntervalSet::new(ranges))
    }
}

fn ordered(a: usize, b: usize) -> RangeInclusive<usize> {
    if a <= b {
        a..=b
    } else {
        b..=a
    }
}

fn parse_clamped(digits: &str) -> Option<usize> {
    match digits.parse::<usize>() {
        Ok(n) => Some(n),
        Err(e) if *e.kind() == IntErrorKind::PosOverflow => Some(usize::MAX),
        Err(_) => None,
    }
}
