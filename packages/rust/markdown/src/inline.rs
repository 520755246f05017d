//! Inline tokenizer.
//!
//! A line is first lexed into atoms (text, `*` delimiter runs, code spans,
//! links, content links), then delimiter runs are paired into emphasis nodes,
//! longest match first: `***` pairs, then `**`, then `*`. A pair may take
//! part of a longer run, leaving the rest for a shorter pass. Stars still
//! unpaired after the single pass are dropped, so unmatched markers never
//! reach the output.

use tracing::trace;

use crate::ast::{CONTENT_LINK_SCHEME, Emphasis, Inline};

enum Token {
    Text(String),
    Stars(usize),
    Node(Inline),
}

/// Parse the inline content of a single line.
pub(crate) fn parse_inlines(line: &str) -> Vec<Inline> {
    build(lex(line))
}

// ---------------------------------------------------------------------------
// Lexing
// ---------------------------------------------------------------------------

fn lex(line: &str) -> Vec<Token> {
    let bytes = line.as_bytes();
    let mut tokens = Vec::new();
    let mut text_start = 0;
    let mut i = 0;

    // Only ASCII bytes are inspected, so every slice boundary is a char boundary.
    while i < bytes.len() {
        let atom = match bytes[i] {
            b'`' => code_span(line, i),
            b'[' => link(line, i),
            b'*' => {
                let len = bytes[i..].iter().take_while(|&&b| b == b'*').count();
                Some((Token::Stars(len), i + len))
            }
            _ => None,
        };

        match atom {
            Some((token, end)) => {
                flush_text(&mut tokens, &line[text_start..i]);
                tokens.push(token);
                i = end;
                text_start = end;
            }
            None => i += 1,
        }
    }

    flush_text(&mut tokens, &line[text_start..]);
    tokens
}

fn flush_text(tokens: &mut Vec<Token>, text: &str) {
    if !text.is_empty() {
        tokens.push(Token::Text(text.to_string()));
    }
}

/// `` `code` `` starting at `start`. Empty spans stay literal.
fn code_span(line: &str, start: usize) -> Option<(Token, usize)> {
    let rest = &line[start + 1..];
    let close = rest.find('`')?;
    if close == 0 {
        return None;
    }

    let code = rest[..close].to_string();
    Some((Token::Node(Inline::CodeSpan(code)), start + close + 2))
}

/// `[label](target)` starting at `start`.
fn link(line: &str, start: usize) -> Option<(Token, usize)> {
    let rest = &line[start + 1..];
    let label_end = rest.find(']')?;
    if label_end == 0 {
        return None;
    }
    let label = &rest[..label_end];

    let target = rest[label_end + 1..].strip_prefix('(')?;
    let target_end = target.find(')')?;
    let href = &target[..target_end];
    if href.trim().is_empty() {
        return None;
    }

    // `[` + label + `](` + href + `)`
    let end = start + label_end + target_end + 4;

    let node = match href.strip_prefix(CONTENT_LINK_SCHEME) {
        Some(id) if !id.is_empty() => Inline::ContentLink {
            label: label.to_string(),
            content_id: id.to_string(),
        },
        _ => Inline::Link {
            children: parse_inlines(label),
            href: href.trim().to_string(),
        },
    };

    Some((Token::Node(node), end))
}

// ---------------------------------------------------------------------------
// Emphasis pairing
// ---------------------------------------------------------------------------

fn build(tokens: Vec<Token>) -> Vec<Inline> {
    finish(pair_runs(tokens, 3))
}

/// Run the pairing passes for every run length from `max` down to 1.
fn pair_runs(mut tokens: Vec<Token>, max: usize) -> Vec<Token> {
    for len in (1..=max).rev() {
        if let Some(style) = Emphasis::from_run(len) {
            tokens = pair_level(tokens, len, style);
        }
    }
    tokens
}

/// Pair runs holding at least `len` stars, left to right.
///
/// The opener gives up its innermost `len` stars and the closer its first
/// `len`; leftovers stay in place for the shorter passes. Runs shorter than
/// `len` between the pair are resolved inside the new node.
fn pair_level(tokens: Vec<Token>, len: usize, style: Emphasis) -> Vec<Token> {
    let mut out: Vec<Token> = Vec::with_capacity(tokens.len());
    let mut opener: Option<usize> = None;

    for token in tokens {
        let Token::Stars(mut count) = token else {
            out.push(token);
            continue;
        };
        if count < len {
            out.push(Token::Stars(count));
            continue;
        }

        if let Some(at) = opener.take().filter(|&at| out.len() > at + 1) {
            let inner: Vec<Token> = out.drain(at + 1..).collect();
            let exhausted = match out.last_mut() {
                Some(Token::Stars(rest)) => {
                    *rest -= len;
                    *rest == 0
                }
                _ => false,
            };
            if exhausted {
                out.pop();
            }

            let children = finish(pair_runs(inner, len - 1));
            if !children.is_empty() {
                out.push(Token::Node(Inline::Emphasis { style, children }));
            }
            count -= len;
        }

        if count > 0 {
            out.push(Token::Stars(count));
            if count >= len {
                opener = Some(out.len() - 1);
            }
        }
    }

    out
}

/// Flatten paired tokens into inlines, dropping leftover stars.
fn finish(tokens: Vec<Token>) -> Vec<Inline> {
    let mut out = Vec::new();
    for token in tokens {
        match token {
            Token::Text(text) => push_text(&mut out, text),
            Token::Node(node) => out.push(node),
            Token::Stars(len) => trace!(len, "dropping unmatched emphasis marker"),
        }
    }
    out
}

fn push_text(out: &mut Vec<Inline>, text: String) {
    if let Some(Inline::Text(prev)) = out.last_mut() {
        prev.push_str(&text);
    } else {
        out.push(Inline::Text(text));
    }
}
