//! Shared chumsky combinators for the line-oriented dialect parsers
//!
//! Every dialect is parsed one logical line at a time, so none of these
//! consume newlines.

use chumsky::prelude::*;

/// Spaces and tabs, possibly none.
pub fn inline_whitespace<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().ignored()
}

/// At least one space or tab.
pub fn inline_whitespace_required<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    one_of(" \t").repeated().at_least(1).ignored()
}

/// A `%%` comment running to the end of the line.
pub fn line_comment<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    just("%%").ignore_then(any().repeated()).ignored()
}

/// Optional trailing whitespace and comment, then end of input.
pub fn line_end<'src>() -> impl Parser<'src, &'src str, ()> + Clone {
    inline_whitespace()
        .then(line_comment().or_not())
        .then(end())
        .ignored()
}

/// Identifier made of letters, digits and `_`; a leading digit is allowed.
///
/// `-` is excluded so `A-->B` splits at the connector.
pub fn identifier<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    any()
        .filter(|c: &char| c.is_alphanumeric() || *c == '_')
        .repeated()
        .at_least(1)
        .collect::<String>()
}

/// A double-quoted string; the quotes are not part of the output.
pub fn quoted<'src>() -> impl Parser<'src, &'src str, String> + Clone {
    none_of('"')
        .repeated()
        .collect::<String>()
        .delimited_by(just('"'), just('"'))
}

/// Whether a trimmed line is blank or a `%%` comment.
pub fn is_blank_or_comment(line: &str) -> bool {
    let line = line.trim();
    line.is_empty() || line.starts_with("%%")
}
