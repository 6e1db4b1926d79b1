//! Splits scraped markdown into model-sized chunks without cutting through
//! sentences or tables.
//!
//! Product pages and spec sheets carry their data in markdown tables, and a
//! table split across two model calls loses its header row. Chunking is
//! line-based: a boundary can only fall between two lines, and never between
//! two lines that belong to the same table.

use crate::error::{PipelineError, Result};

/// Split `text` into chunks of at most `max_size` characters.
///
/// Lines are accumulated greedily; the running size counts one separator per
/// line so that the joined chunk stays under budget. A line starting with
/// `|` is a table row, and a boundary is never placed where either side is a
/// table row, so one long table can push a chunk past `max_size`. That is
/// accepted rather than an error. A single line longer than `max_size`
/// becomes its own oversized chunk.
///
/// Empty input yields no chunks. The output is a pure function of
/// `(text, max_size)`.
pub fn chunk(text: &str, max_size: usize) -> Result<Vec<String>> {
    if max_size == 0 {
        return Err(PipelineError::InvalidConfiguration {
            reason: "max chunk size must be a positive number of characters".into(),
        });
    }

    let mut chunks = Vec::new();
    let mut current: Vec<&str> = Vec::new();
    // Sum of line lengths; separators are current.len() at join time.
    let mut current_len = 0usize;

    for line in text.lines() {
        let in_table = line.starts_with('|')
            || current.last().is_some_and(|last| last.starts_with('|'));

        if current_len + line.len() + current.len() < max_size || in_table {
            current_len += line.len();
            current.push(line);
        } else {
            if !current.is_empty() {
                chunks.push(current.join("\n"));
            }
            current_len = line.len();
            current = vec![line];
        }
    }

    if !current.is_empty() {
        chunks.push(current.join("\n"));
    }

    Ok(chunks)
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Rejoining chunks with the separator must reproduce the input.
    fn reassemble(chunks: &[String]) -> String {
        chunks.join("\n")
    }

    #[test]
    fn zero_max_size_is_invalid() {
        let err = chunk("some text", 0).unwrap_err();
        assert!(matches!(err, PipelineError::InvalidConfiguration { .. }));
    }

    #[test]
    fn empty_text_yields_no_chunks() {
        assert_eq!(chunk("", 100).unwrap(), Vec::<String>::new());
    }

    #[test]
    fn short_text_is_one_chunk() {
        let text = "line one\nline two";
        assert_eq!(chunk(text, 100).unwrap(), vec![text.to_string()]);
    }

    #[test]
    fn chunks_reassemble_to_the_original() {
        let text = "alpha\nbravo\ncharlie\ndelta\necho\nfoxtrot";
        for max_size in [1, 7, 13, 20, 1000] {
            let chunks = chunk(text, max_size).unwrap();
            assert_eq!(reassemble(&chunks), text, "max_size={max_size}");
        }
    }

    #[test]
    fn chunks_respect_the_budget_without_tables() {
        let text = "aaaa\nbbbb\ncccc\ndddd\neeee\nffff";
        let max_size = 12;
        for piece in chunk(text, max_size).unwrap() {
            assert!(piece.len() <= max_size, "{piece:?} over budget");
        }
    }

    #[test]
    fn oversized_single_line_becomes_its_own_chunk() {
        let long = "x".repeat(50);
        let text = format!("short\n{long}\ntail");
        let chunks = chunk(&text, 10).unwrap();
        assert_eq!(chunks, vec!["short".to_string(), long, "tail".to_string()]);
    }

    #[test]
    fn table_is_never_split() {
        // Budget small enough to force a cut inside the table if tables
        // were not protected.
        let text = "para1 line\n|h1|h2|\n|a|b|\n|c|d|\npara2";
        let chunks = chunk(text, 12).unwrap();

        let table_chunk = chunks
            .iter()
            .find(|c| c.contains("|h1|h2|"))
            .expect("table header present");
        assert!(table_chunk.contains("|a|b|"), "{chunks:?}");
        assert!(table_chunk.contains("|c|d|"), "{chunks:?}");

        assert_eq!(reassemble(&chunks), text);
    }

    #[test]
    fn no_boundary_between_consecutive_table_lines() {
        let text = "intro\n|a|\n|b|\n|c|\n|d|\n|e|\noutro";
        for max_size in [1, 4, 8, 16] {
            let chunks = chunk(text, max_size).unwrap();
            for pair in chunks.windows(2) {
                let last_of_first = pair[0].lines().last().unwrap_or("");
                let first_of_next = pair[1].lines().next().unwrap_or("");
                assert!(
                    !(last_of_first.starts_with('|') && first_of_next.starts_with('|')),
                    "boundary split a table at max_size={max_size}: {chunks:?}"
                );
            }
        }
    }

    #[test]
    fn table_may_exceed_the_budget() {
        let text = "|h1|h2|\n|aaaa|bbbb|\n|cccc|dddd|";
        let chunks = chunk(text, 10).unwrap();
        assert_eq!(chunks.len(), 1);
        assert!(chunks[0].len() > 10);
    }

    #[test]
    fn deterministic_for_fixed_input() {
        let text = "one\ntwo\n|a|b|\n|c|d|\nthree";
        assert_eq!(chunk(text, 9).unwrap(), chunk(text, 9).unwrap());
    }
}
