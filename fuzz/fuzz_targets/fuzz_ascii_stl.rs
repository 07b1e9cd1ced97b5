#![no_main]

use libfuzzer_sys::arbitrary::{Arbitrary, Result, Unstructured};
use libfuzzer_sys::fuzz_target;

/// One line of a generated ASCII STL body
#[derive(Debug)]
enum Line {
    Vertex(f32, f32, f32),
    RawVertex(String),
    EndFacet,
    Other(String),
}

impl<'a> Arbitrary<'a> for Line {
    fn arbitrary(u: &mut Unstructured<'a>) -> Result<Self> {
        Ok(match u.int_in_range(0..=9)? {
            0..=5 => Line::Vertex(u.arbitrary()?, u.arbitrary()?, u.arbitrary()?),
            6 => Line::RawVertex(u.arbitrary()?),
            7 | 8 => Line::EndFacet,
            _ => Line::Other(u.arbitrary()?),
        })
    }
}

fuzz_target!(|lines: Vec<Line>| {
    // Structured ASCII input reaches the facet accumulator far more often
    // than random bytes do
    let mut text = String::from("solid fuzz\n");
    for line in &lines {
        match line {
            Line::Vertex(x, y, z) => text.push_str(&format!("vertex {} {} {}\n", x, y, z)),
            Line::RawVertex(rest) => text.push_str(&format!("vertex {}\n", rest)),
            Line::EndFacet => text.push_str("endfacet\n"),
            Line::Other(raw) => {
                text.push_str(raw);
                text.push('\n');
            }
        }
    }

    let analysis = printquote::analyze_mesh(text.as_bytes());
    assert_eq!(analysis.has_errors, !analysis.errors.is_empty());
});
