//! Plain text adjacency format
//!
//! ```text
//! # comment
//! 4              vertex count
//! 1 2 ACGT       vertex 0: out-neighbours 1 and 2, label "ACGT"
//! 3 T            vertex 1
//! 3 GA           vertex 2
//! C              vertex 3: no out-edges
//! ```
//!
//! The last token of a vertex line is always the label; ids are 0-based.
//! Vertices without a line keep no label and no out-edges.

use std::io::BufRead;

use crate::error::{Error, Result};
use crate::graph::Graph;

pub fn read_txt<R: BufRead>(reader: R) -> Result<Graph> {
    let mut lines = reader.lines().enumerate();

    let mut graph = loop {
        let Some((idx, line)) = lines.next() else {
            return Err(Error::parse(0, "missing vertex count"));
        };
        let line = line?;
        let Some(content) = strip_comment(&line) else {
            continue;
        };
        let n: usize = content.parse().map_err(|_| {
            Error::parse(idx + 1, format!("expected vertex count, got '{content}'"))
        })?;
        break Graph::new(n);
    };

    let mut vertex = 0usize;
    for (idx, line) in lines {
        let line = line?;
        let line_no = idx + 1;
        let Some(content) = strip_comment(&line) else {
            continue;
        };

        if vertex >= graph.n() {
            return Err(Error::parse(
                line_no,
                format!("more vertex lines than the declared {} vertices", graph.n()),
            ));
        }

        let tokens: Vec<&str> = content.split_whitespace().collect();
        let (label, neighbours) = tokens
            .split_last()
            .ok_or_else(|| Error::parse(line_no, "empty vertex line"))?;

        for token in neighbours {
            let v: usize = token
                .parse()
                .map_err(|_| Error::parse(line_no, format!("invalid neighbour id '{token}'")))?;
            if v >= graph.n() {
                return Err(Error::parse(
                    line_no,
                    format!("neighbour id {v} out of range for {} vertices", graph.n()),
                ));
            }
            graph.add_edge(vertex, v)?;
        }
        let weight =
            u32::try_from(label.len()).map_err(|_| Error::parse(line_no, "label too long"))?;
        graph.set_weight(vertex, weight)?;
        vertex += 1;
    }

    Ok(graph)
}

/// Trimmed line, or `None` for blank lines and comments
fn strip_comment(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    if trimmed.is_empty() || trimmed.starts_with('#') {
        None
    } else {
        Some(trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_txt() {
        let input = "# toy graph\n4\n1 2 ACGT\n3 T\n\n3 GA\nC\n";
        let g = read_txt(Cursor::new(input)).unwrap();
        assert_eq!(g.n(), 4);
        assert_eq!(g.edges(), &[(0, 1), (0, 2), (1, 3), (2, 3)]);
        assert_eq!(g.weight(0), Some(4));
        assert_eq!(g.weight(3), Some(1));
    }

    #[test]
    fn test_missing_lines_leave_unlabeled_vertices() {
        let g = read_txt(Cursor::new("3\n1 A\n")).unwrap();
        assert_eq!(g.n(), 3);
        assert_eq!(g.weight(1), None);
        assert_eq!(g.n_edges(), 1);
    }

    #[test]
    fn test_errors_carry_line_numbers() {
        match read_txt(Cursor::new("2\n5 A\n")) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 2),
            other => panic!("Expected parse error, got {:?}", other),
        }
        match read_txt(Cursor::new("2\nA\nx A\n")) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected parse error, got {:?}", other),
        }
        match read_txt(Cursor::new("1\nA\nC\n")) {
            Err(Error::Parse { line, .. }) => assert_eq!(line, 3),
            other => panic!("Expected parse error, got {:?}", other),
        }
        assert!(read_txt(Cursor::new("four\n")).is_err());
        assert!(read_txt(Cursor::new("# only comments\n")).is_err());
    }
}
