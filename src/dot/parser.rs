use std::cmp::Ordering;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::iter::Peekable;
use std::str::Chars;

use dot_parser::ast::{AList, Graph as AstGraph};
use dot_parser::canonical::Graph as CanonicalGraph;

use super::{DotEdge, DotError, DotGraph, DotNode};

/// Deeper input overflows the parser's stack on loader threads.
const MAX_NESTING: usize = 64;

pub fn parse_dot(src: &str) -> Result<DotGraph, DotError> {
    if src.trim().is_empty() {
        return Err(DotError::Empty);
    }
    check_nesting(src)?;

    let ast = AstGraph::<(&str, &str)>::try_from(src)
        .map_err(|error| DotError::Syntax(error.to_string()))?;
    let canonical: CanonicalGraph<(&str, &str)> = ast.into();
    Ok(flatten(canonical))
}

fn flatten(graph: CanonicalGraph<(&str, &str)>) -> DotGraph {
    let directed = graph.is_digraph;
    let strict = graph.strict;
    let name = graph.name.as_deref().map(unquote);

    // `"a"` and `a` name the same node.
    let mut merged: HashMap<String, BTreeMap<String, String>> = HashMap::new();
    for (id, node) in graph.nodes.set {
        merged
            .entry(unquote(&id))
            .or_default()
            .extend(attributes(node.attr));
    }
    let mut nodes = merged
        .into_iter()
        .map(|(id, attributes)| DotNode { id, attributes })
        .collect::<Vec<_>>();
    nodes.sort_by(|a, b| node_order(&a.id, &b.id));

    let index_by_id = nodes
        .iter()
        .enumerate()
        .map(|(index, node)| (node.id.clone(), index))
        .collect::<HashMap<_, _>>();

    let mut seen_pairs = HashSet::new();
    let mut edges = Vec::with_capacity(graph.edges.set.len());
    for edge in graph.edges.set {
        let from = index_by_id.get(&unquote(&edge.from)).copied();
        let to = index_by_id.get(&unquote(&edge.to)).copied();
        let (Some(from), Some(to)) = (from, to) else {
            log::debug!("skipping edge with unknown endpoint");
            continue;
        };

        if strict {
            let pair = if directed || from <= to {
                (from, to)
            } else {
                (to, from)
            };
            if !seen_pairs.insert(pair) {
                continue;
            }
        }
        edges.push(DotEdge {
            from,
            to,
            attributes: attributes(edge.attr),
        });
    }

    DotGraph {
        name,
        directed,
        strict,
        nodes,
        edges,
    }
}

fn attributes(list: AList<(&str, &str)>) -> BTreeMap<String, String> {
    list.elems
        .into_iter()
        .map(|(key, value)| (unquote(key), unquote(value)))
        .collect()
}

/// Strips the quotes of a DOT string and resolves `\"` and line continuations.
fn unquote(raw: &str) -> String {
    let trimmed = raw.trim();
    match trimmed
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
    {
        Some(inner) => inner.replace("\\\"", "\"").replace("\\\n", ""),
        None => trimmed.to_owned(),
    }
}

fn node_order(a: &str, b: &str) -> Ordering {
    match (a.parse::<u64>(), b.parse::<u64>()) {
        (Ok(x), Ok(y)) => x.cmp(&y).then_with(|| a.cmp(b)),
        (Ok(_), Err(_)) => Ordering::Less,
        (Err(_), Ok(_)) => Ordering::Greater,
        (Err(_), Err(_)) => a.cmp(b),
    }
}

/// Rejects brace nesting beyond `MAX_NESTING`, ignoring braces in strings
/// and comments.
fn check_nesting(src: &str) -> Result<(), DotError> {
    let mut depth = 0usize;
    let mut line = 1;
    let mut chars = src.chars().peekable();

    while let Some(ch) = chars.next() {
        match ch {
            '\n' => line += 1,
            '"' => skip_quoted(&mut chars, &mut line),
            '/' if chars.peek() == Some(&'/') => {
                while chars.next_if(|&next| next != '\n').is_some() {}
            }
            '/' if chars.peek() == Some(&'*') => {
                chars.next();
                skip_block_comment(&mut chars, &mut line);
            }
            '{' => {
                depth += 1;
                if depth > MAX_NESTING {
                    return Err(DotError::TooDeeplyNested {
                        line,
                        limit: MAX_NESTING,
                    });
                }
            }
            '}' => depth = depth.saturating_sub(1),
            _ => {}
        }
    }
    Ok(())
}

fn skip_quoted(chars: &mut Peekable<Chars<'_>>, line: &mut usize) {
    while let Some(ch) = chars.next() {
        match ch {
            '"' => return,
            '\\' => {
                if chars.next() == Some('\n') {
                    *line += 1;
                }
            }
            '\n' => *line += 1,
            _ => {}
        }
    }
}

fn skip_block_comment(chars: &mut Peekable<Chars<'_>>, line: &mut usize) {
    while let Some(ch) = chars.next() {
        match ch {
            '*' if chars.peek() == Some(&'/') => {
                chars.next();
                return;
            }
            '\n' => *line += 1,
            _ => {}
        }
    }
}
