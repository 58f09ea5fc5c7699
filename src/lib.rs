use std::{
    fs,
    io::{self, Read, Write},
    path::Path,
};

use indexmap::{IndexMap, IndexSet};
use tracing::info;

use error::{ConvertError, Result};
use util::ValidGraphType;

mod reading;
mod writing;

/// Side-by-side comparison of benchmark timings produced by two graph engines.
pub mod compare;

/// Error types for conversion and reporting.
pub mod error;

/// A collection of convenient functions and traits to be used across the crate.
pub mod util;

/// A directed graph held as per-vertex neighbor lists.
///
/// Neighbor lists keep the order in which edges were read, duplicates included.
/// Vertex order is only imposed on output, where vertices are visited in ascending id order.
pub struct AdjacencyList<N> {
    vertices: IndexSet<N>,
    adjacency: IndexMap<N, Vec<N>>,
}

impl<N> AdjacencyList<N>
where
    N: ValidGraphType,
{
    /// Convenience method for reading an input stream in text format.
    /// Each line should contain two numbers, separated by whitespace.
    /// Lines starting with `#` and lines with any other number of tokens are ignored.
    pub fn from_txt_edge_list<T>(stream: T) -> Result<AdjacencyList<N>>
    where
        T: Read,
    {
        Self::from_edges(reading::txt_edges(stream))
    }

    /// Builds the adjacency list from an already parsed edge stream.
    /// The stream is consumed until its first error, which is returned.
    pub fn from_edges<T>(stream: T) -> Result<AdjacencyList<N>>
    where
        T: Iterator<Item = Result<(N, N)>>,
    {
        let grouping = reading::group_edges(stream)?;

        Ok(AdjacencyList {
            vertices: grouping.vertices,
            adjacency: grouping.adjacency,
        })
    }

    /// Returns the number of distinct vertices, counting those that only appear as destinations.
    pub fn n_vertices(&self) -> usize {
        self.vertices.len()
    }

    /// Returns the number of edges, duplicates included.
    pub fn n_edges(&self) -> usize {
        self.adjacency.values().map(Vec::len).sum()
    }

    /// Returns the outgoing neighbors of `vertex` in the order they were read.
    pub fn neighbors(&self, vertex: N) -> &[N] {
        self.adjacency
            .get(&vertex)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Returns every vertex with its neighbor list, in ascending vertex order.
    pub fn iter(&self) -> impl Iterator<Item = (N, &[N])> + '_ {
        let mut vertices = self.vertices.iter().copied().collect::<Vec<N>>();
        vertices.sort_unstable();

        vertices.into_iter().map(move |v| (v, self.neighbors(v)))
    }

    /// Writes the adjacency-list text representation to `writer`.
    pub fn write_to<W>(&self, writer: W) -> io::Result<()>
    where
        W: Write,
    {
        writing::write_adjacency(self.iter(), writer)
    }

    /// Creates (or truncates) `path` and writes the adjacency list to it.
    pub fn save<P>(&self, path: P) -> Result<()>
    where
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let failure = |source: io::Error| ConvertError::OutputWriteFailure {
            path: path.to_path_buf(),
            source,
        };

        let file = fs::File::create(path).map_err(failure)?;
        self.write_to(file).map_err(failure)
    }
}

/// Counts reported after a successful conversion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConversionSummary {
    pub vertices: usize,
    pub edges: usize,
}

/// Reads the edge list at `input` and writes its adjacency list to `output`.
///
/// The output file is only created once the whole input has been parsed,
/// so a malformed input leaves no partial output behind.
pub fn convert<N, P, Q>(input: P, output: Q) -> Result<ConversionSummary>
where
    N: ValidGraphType,
    P: AsRef<Path>,
    Q: AsRef<Path>,
{
    let (input, output) = (input.as_ref(), output.as_ref());

    info!("Reading {}...", input.display());
    let source_file = fs::File::open(input).map_err(|source| ConvertError::InputNotFound {
        path: input.to_path_buf(),
        source,
    })?;

    let graph = AdjacencyList::<N>::from_txt_edge_list(source_file)?;
    let summary = ConversionSummary {
        vertices: graph.n_vertices(),
        edges: graph.n_edges(),
    };
    info!(
        "Found {} vertices, {} edges",
        summary.vertices, summary.edges
    );

    info!("Writing to {}...", output.display());
    graph.save(output)?;

    info!("✓ Conversion complete");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    fn tmp_path(prefix: &str) -> PathBuf {
        std::env::temp_dir().join(format!("{}_{}", prefix, rand::random::<u32>()))
    }

    fn write_source(contents: &str) -> PathBuf {
        let source_file_name = tmp_path("tmp_src");
        fs::write(&source_file_name, contents).unwrap();
        source_file_name
    }

    fn convert_str(contents: &str) -> String {
        let source_file_name = write_source(contents);
        let destination_file_name = tmp_path("tmp_dst");

        match convert::<u32, _, _>(&source_file_name, &destination_file_name) {
            Ok(_) => {}
            Err(e) => panic!("{:?}", e),
        };

        fs::read_to_string(&destination_file_name).unwrap()
    }

    #[test]
    fn end_to_end() {
        assert_eq!(convert_str("1 2\n1 3\n2 3\n"), "1 2:0 3:0\n2 3:0\n3\n");
    }

    #[test]
    fn every_vertex_once_in_ascending_order() {
        let output = convert_str("10 2\n3 10\n2 7\n3 2\n");
        let vertices = output
            .lines()
            .map(|l| l.split(' ').next().unwrap().parse::<u32>().unwrap())
            .collect::<Vec<u32>>();

        assert_eq!(vertices, vec![2, 3, 7, 10]);
        assert_eq!(output, "2 7:0\n3 10:0 2:0\n7\n10 2:0\n");
    }

    #[test]
    fn neighbor_order_and_duplicates_survive() {
        assert_eq!(convert_str("0 9\n0 4\n0 9\n0 1\n"), "0 9:0 4:0 9:0 1:0\n1\n4\n9\n");
    }

    #[test]
    fn tolerates_comments_and_malformed_lines() {
        let input = "# FromNodeId\tToNodeId\n4 5\n\n1 2 3\n5 4\n";
        assert_eq!(convert_str(input), "4 5:0\n5 4:0\n");
    }

    #[test]
    fn idempotent() {
        let source_file_name = write_source("30 1\n# x\n1 30\n1 2\n2 2\n");
        let first = tmp_path("tmp_dst");
        let second = tmp_path("tmp_dst");

        convert::<u64, _, _>(&source_file_name, &first).unwrap();
        convert::<u64, _, _>(&source_file_name, &second).unwrap();

        assert_eq!(fs::read(&first).unwrap(), fs::read(&second).unwrap());
    }

    #[test]
    fn summary_counts() {
        let source_file_name = write_source("1 2\n1 2\n3 4\n");
        let summary = convert::<u32, _, _>(&source_file_name, tmp_path("tmp_dst")).unwrap();

        assert_eq!(
            summary,
            ConversionSummary {
                vertices: 4,
                edges: 3
            }
        );
    }

    #[test]
    fn missing_input() {
        let missing = tmp_path("tmp_missing");

        match convert::<u32, _, _>(&missing, tmp_path("tmp_dst")) {
            Err(ConvertError::InputNotFound { path, .. }) => assert_eq!(path, missing),
            other => panic!("{:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn malformed_token_leaves_no_output() {
        let source_file_name = write_source("1 2\n2 two\n");
        let destination_file_name = tmp_path("tmp_dst");

        match convert::<u32, _, _>(&source_file_name, &destination_file_name) {
            Err(ConvertError::MalformedToken { line, token }) => {
                assert_eq!(line, 2);
                assert_eq!(token, "two");
            }
            other => panic!("{:?}", other.map(|_| ())),
        }

        assert!(!destination_file_name.exists());
    }

    #[test]
    fn unwritable_output() {
        let source_file_name = write_source("1 2\n");
        let destination_file_name = tmp_path("tmp_no_such_dir").join("out.txt");

        match convert::<u32, _, _>(&source_file_name, &destination_file_name) {
            Err(ConvertError::OutputWriteFailure { path, .. }) => {
                assert_eq!(path, destination_file_name)
            }
            other => panic!("{:?}", other.map(|_| ())),
        }
    }

    #[test]
    fn from_general_stream() {
        let edges = vec![(0u64, 1u64), (0, 2), (1, 5), (1, 2), (4, 7)];
        let expected_res = vec![
            (0u64, vec![1, 2]),
            (1, vec![5, 2]),
            (2, vec![]),
            (4, vec![7]),
            (5, vec![]),
            (7, vec![]),
        ];

        let graph = match AdjacencyList::<u64>::from_edges(edges.iter().map(|x| Ok(*x))) {
            Ok(g) => g,
            Err(e) => panic!("{:?}", e),
        };

        assert_eq!(graph.n_vertices(), 6);
        assert_eq!(graph.n_edges(), 5);
        assert_eq!(
            graph
                .iter()
                .map(|(v, edges)| (v, edges.to_vec()))
                .collect::<Vec<(u64, Vec<u64>)>>(),
            expected_res
        );
    }

    #[test]
    fn stream_error_is_returned() {
        let edges = vec![
            Ok((0u32, 1u32)),
            Err(ConvertError::MalformedToken {
                line: 2,
                token: "z".to_string(),
            }),
            Ok((1, 2)),
        ];

        assert!(matches!(
            AdjacencyList::<u32>::from_edges(edges.into_iter()),
            Err(ConvertError::MalformedToken { line: 2, .. })
        ));
    }

    #[test]
    fn neighbors_of_unknown_vertex() {
        let graph = AdjacencyList::<u32>::from_txt_edge_list("1 2\n".as_bytes()).unwrap();

        assert_eq!(graph.neighbors(1), &[2]);
        assert!(graph.neighbors(2).is_empty());
        assert!(graph.neighbors(99).is_empty());
    }
}
