use petgraph::graph::{NodeIndex, UnGraph};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ReadSpGraphError {
    #[error("missing header")]
    MissingHeader,
    #[error("invalid token (expected integer, got {0})")]
    InvalidToken(String),
    #[error("negative count in header ({0})")]
    NegativeCount(i64),
    #[error("missing edge endpoint (expected {expected} edges, input ended at {actual})")]
    MissingEndpoint { expected: usize, actual: usize },
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Reads the whitespace-separated graph format: two tokens `n e`, followed by
/// exactly `e` pairs of vertex ids.
///
/// Edges with an endpoint outside `0..n` are skipped without error; the
/// returned graph always has exactly `n` nodes. Negative counts are rejected,
/// `n = 0` is not (callers decide whether an empty graph is acceptable).
pub fn read_sp_graph<P>(path: P) -> Result<UnGraph<(), ()>, ReadSpGraphError>
where
    P: AsRef<Path>,
{
    let mut contents = String::new();
    File::open(path)?.read_to_string(&mut contents)?;

    let mut tokens = contents.split_ascii_whitespace();
    let mut next_count = |missing: ReadSpGraphError| -> Result<i64, ReadSpGraphError> {
        let token = tokens.next().ok_or(missing)?;
        token.parse().map_err(|_| ReadSpGraphError::InvalidToken(token.to_string()))
    };

    let n = next_count(ReadSpGraphError::MissingHeader)?;
    let e = next_count(ReadSpGraphError::MissingHeader)?;
    if n < 0 {
        return Err(ReadSpGraphError::NegativeCount(n));
    }
    if e < 0 {
        return Err(ReadSpGraphError::NegativeCount(e));
    }
    let (n, e) = (n as usize, e as usize);

    let mut graph = UnGraph::with_capacity(n, e);
    for _ in 0..n {
        graph.add_node(());
    }

    for i in 0..e {
        let u = next_count(ReadSpGraphError::MissingEndpoint { expected: e, actual: i })?;
        let v = next_count(ReadSpGraphError::MissingEndpoint { expected: e, actual: i })?;
        if u < 0 || v < 0 || u as usize >= n || v as usize >= n {
            continue;
        }
        graph.add_edge(NodeIndex::new(u as usize), NodeIndex::new(v as usize), ());
    }

    Ok(graph)
}

#[derive(Error, Debug)]
pub enum WriteSpGraphError {
    #[error("io error")]
    IoError(#[from] std::io::Error),
}

/// Writes a graph in the format accepted by [read_sp_graph].
pub fn write_sp_graph<P>(path: P, graph: &UnGraph<(), ()>) -> Result<(), WriteSpGraphError>
where
    P: AsRef<Path>,
{
    let file = File::create(path)?;
    let mut file = BufWriter::new(file);
    write_sp_graph_to(&mut file, graph)?;
    file.flush()?;
    Ok(())
}

/// Writes a graph to an arbitrary writer in the [read_sp_graph] format.
pub fn write_sp_graph_to<W>(out: &mut W, graph: &UnGraph<(), ()>) -> Result<(), WriteSpGraphError>
where
    W: Write,
{
    writeln!(out, "{} {}", graph.node_count(), graph.edge_count())?;
    for edge in graph.raw_edges() {
        writeln!(out, "{} {}", edge.source().index(), edge.target().index())?;
    }
    Ok(())
}

#[cfg(test)]
mod test {
    use super::*;
    use std::io::Write;

    fn write_temp(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_header_and_pairs() {
        let file = write_temp("3 3\n0 1\n1 2\n2 0\n");
        let graph = read_sp_graph(file.path()).unwrap();
        assert_eq!(graph.node_count(), 3);
        assert_eq!(graph.edge_count(), 3);
    }

    #[test]
    fn skips_out_of_range_edges() {
        let file = write_temp("2 3 0 1 0 7 5 1");
        let graph = read_sp_graph(file.path()).unwrap();
        assert_eq!(graph.node_count(), 2);
        assert_eq!(graph.edge_count(), 1);
    }

    #[test]
    fn rejects_negative_counts() {
        let file = write_temp("-1 0");
        assert!(matches!(read_sp_graph(file.path()), Err(ReadSpGraphError::NegativeCount(-1))));
    }

    #[test]
    fn rejects_truncated_edge_list() {
        let file = write_temp("2 2 0 1");
        assert!(matches!(
            read_sp_graph(file.path()),
            Err(ReadSpGraphError::MissingEndpoint { expected: 2, actual: 1 })
        ));
    }

    #[test]
    fn rejects_non_integer_tokens() {
        let file = write_temp("x 0");
        assert!(matches!(read_sp_graph(file.path()), Err(ReadSpGraphError::InvalidToken(_))));
    }

    #[test]
    fn round_trips_through_writer() {
        let graph = UnGraph::<(), ()>::from_edges([(0, 1), (1, 2), (2, 0)]);
        let file = tempfile::NamedTempFile::new().unwrap();
        write_sp_graph(file.path(), &graph).unwrap();
        let back = read_sp_graph(file.path()).unwrap();
        assert_eq!(back.node_count(), graph.node_count());
        assert_eq!(back.edge_count(), graph.edge_count());
    }
}
