use std::io::{BufRead, BufReader, Read};

use indexmap::{IndexMap, IndexSet};

use super::error::{ConvertError, Result};
use super::util::ValidGraphType;

const COMMENT_PREFIX: char = '#';

/// Vertices and neighbor lists, both kept in the order they were first seen.
pub(crate) struct Grouping<N> {
    pub vertices: IndexSet<N>,
    pub adjacency: IndexMap<N, Vec<N>>,
}

/// Turns a text edge list into a stream of `(src, dst)` pairs.
///
/// Lines starting with `#` and lines that do not hold exactly two tokens are skipped.
/// A two-token line with a token that is not a valid `N` ends the stream with an error.
pub(crate) fn txt_edges<N, R>(reader: R) -> impl Iterator<Item = Result<(N, N)>>
where
    N: ValidGraphType,
    R: Read,
{
    BufReader::new(reader)
        .lines()
        .enumerate()
        .filter_map(|(idx, line)| {
            let line = match line {
                Ok(line) => line,
                Err(e) => return Some(Err(ConvertError::Read(e))),
            };

            if line.starts_with(COMMENT_PREFIX) {
                return None;
            }

            let mut parts = line.split_whitespace();
            let (src, dst) = match (parts.next(), parts.next(), parts.next()) {
                (Some(src), Some(dst), None) => (src, dst),
                _ => return None,
            };

            Some(parse_edge(idx + 1, src, dst))
        })
}

fn parse_edge<N: ValidGraphType>(line: usize, src: &str, dst: &str) -> Result<(N, N)> {
    let parse = |token: &str| {
        N::parse_token(token).ok_or_else(|| ConvertError::MalformedToken {
            line,
            token: token.to_string(),
        })
    };

    Ok((parse(src)?, parse(dst)?))
}

/// Groups a stream of edges by source. Duplicate edges are retained.
/// Stops at the first error in the stream.
pub(crate) fn group_edges<N, T>(stream: T) -> Result<Grouping<N>>
where
    N: ValidGraphType,
    T: Iterator<Item = Result<(N, N)>>,
{
    let mut vertices = IndexSet::new();
    let mut adjacency: IndexMap<N, Vec<N>> = IndexMap::new();

    for e in stream {
        let (src, dst) = e?;

        adjacency.entry(src).or_default().push(dst);
        vertices.insert(src);
        vertices.insert(dst);
    }

    Ok(Grouping {
        vertices,
        adjacency,
    })
}
