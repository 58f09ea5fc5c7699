use std::io::{BufWriter, Result, Write};

use super::util::ValidGraphType;

/// Weight written after every neighbor. The target format requires one, the edge list has none.
const EDGE_WEIGHT: &str = ":0";

/// Writes one line per vertex: `<vertex>[ <neighbor>:0]*`.
/// `rows` must already be in the desired output order.
pub(crate) fn write_adjacency<'a, N, I, W>(rows: I, writer: W) -> Result<()>
where
    N: ValidGraphType + 'a,
    I: Iterator<Item = (N, &'a [N])>,
    W: Write,
{
    let mut writer = BufWriter::new(writer);

    for (vertex, neighbors) in rows {
        write!(writer, "{}", vertex)?;
        for n in neighbors {
            write!(writer, " {}{}", n, EDGE_WEIGHT)?;
        }
        writer.write_all(b"\n")?;
    }

    writer.flush()
}
