//! GFA 1 reader (segments and links only)
//!
//! Segments get dense ids in order of appearance. The sequence length is the
//! node weight; for `*` sequences the optional `LN:i:` tag is used instead.
//! Only `+`/`+` links are kept: the index works on the forward strand.

use rustc_hash::FxHashMap;
use std::io::BufRead;
use tracing::warn;

use crate::error::{Error, Result};
use crate::graph::Graph;

struct Link {
    line: usize,
    from: String,
    to: String,
}

pub fn read_gfa<R: BufRead>(reader: R) -> Result<Graph> {
    let mut ids: FxHashMap<String, usize> = FxHashMap::default();
    let mut weights: Vec<Option<u32>> = Vec::new();
    let mut links: Vec<Link> = Vec::new();
    let mut skipped_reverse = 0usize;

    for (idx, line) in reader.lines().enumerate() {
        let line = line?;
        let line_no = idx + 1;
        let fields: Vec<&str> = line.split('\t').collect();

        match fields[0] {
            "S" => {
                if fields.len() < 3 {
                    return Err(Error::parse(line_no, "segment line needs a name and a sequence"));
                }
                let name = fields[1];
                if ids.contains_key(name) {
                    return Err(Error::parse(line_no, format!("duplicate segment '{name}'")));
                }
                ids.insert(name.to_string(), weights.len());
                weights.push(segment_length(fields[2], &fields[3..], line_no)?);
            }
            "L" => {
                if fields.len() < 5 {
                    return Err(Error::parse(line_no, "link line needs 4 fields"));
                }
                for orient in [fields[2], fields[4]] {
                    if orient != "+" && orient != "-" {
                        return Err(Error::parse(line_no, format!("invalid orientation '{orient}'")));
                    }
                }
                if fields[2] == "+" && fields[4] == "+" {
                    links.push(Link {
                        line: line_no,
                        from: fields[1].to_string(),
                        to: fields[3].to_string(),
                    });
                } else {
                    skipped_reverse += 1;
                }
            }
            _ => {}
        }
    }

    if skipped_reverse > 0 {
        warn!(links = skipped_reverse, "skipped links involving reverse orientation");
    }

    let mut graph = Graph::new(weights.len());
    for (v, weight) in weights.into_iter().enumerate() {
        if let Some(w) = weight {
            graph.set_weight(v, w)?;
        }
    }
    for link in links {
        let lookup = |name: &str| {
            ids.get(name)
                .copied()
                .ok_or_else(|| Error::parse(link.line, format!("link to unknown segment '{name}'")))
        };
        let u = lookup(&link.from)?;
        let v = lookup(&link.to)?;
        graph.add_edge(u, v)?;
    }
    Ok(graph)
}

fn segment_length(sequence: &str, tags: &[&str], line_no: usize) -> Result<Option<u32>> {
    if sequence != "*" {
        return u32::try_from(sequence.len())
            .map(Some)
            .map_err(|_| Error::parse(line_no, "segment too long"));
    }
    for tag in tags {
        if let Some(len) = tag.strip_prefix("LN:i:") {
            return len
                .parse()
                .map(Some)
                .map_err(|_| Error::parse(line_no, format!("invalid LN tag '{tag}'")));
        }
    }
    Ok(None)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[test]
    fn test_read_gfa() {
        let input = "H\tVN:Z:1.0\n\
                     L\ts1\t+\ts2\t+\t0M\n\
                     S\ts1\tACGT\n\
                     S\ts2\t*\tLN:i:7\n\
                     S\ts3\tG\n\
                     L\ts2\t+\ts3\t+\t0M\n\
                     L\ts1\t-\ts3\t+\t0M\n\
                     P\tp1\ts1+,s2+\t*\n";
        let g = read_gfa(Cursor::new(input)).unwrap();
        assert_eq!(g.n(), 3);
        assert_eq!(g.edges(), &[(0, 1), (1, 2)]);
        assert_eq!(g.weight(0), Some(4));
        assert_eq!(g.weight(1), Some(7));
        assert_eq!(g.weight(2), Some(1));
    }

    #[test]
    fn test_unknown_segment() {
        let input = "S\ta\tA\nL\ta\t+\tb\t+\t0M\n";
        match read_gfa(Cursor::new(input)) {
            Err(Error::Parse { line, message }) => {
                assert_eq!(line, 2);
                assert!(message.contains("'b'"));
            }
            other => panic!("Expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_malformed_lines() {
        assert!(read_gfa(Cursor::new("S\ta\n")).is_err());
        assert!(read_gfa(Cursor::new("S\ta\tA\nS\ta\tC\n")).is_err());
        assert!(read_gfa(Cursor::new("S\ta\tA\nL\ta\t?\ta\t+\t0M\n")).is_err());
    }
}
