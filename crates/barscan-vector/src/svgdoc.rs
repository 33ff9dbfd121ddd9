//! Thin SVG-document collaborator.
//!
//! Wraps `roxmltree` with exactly what the pipeline consumes: bar paths
//! selected by style token, path data parsed into absolute line segments,
//! text labels with their transform anchors, and ancestor scoping. Only the
//! straight-line path commands are supported; bar rectangles need nothing
//! else, and anything else is reported rather than guessed.

use log::debug;
use roxmltree::{Document, Node};

use crate::error::VectorError;

const EPS: f64 = 1e-6;

/// One absolute line segment of a path.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Segment {
    pub from: (f64, f64),
    pub to: (f64, f64),
}

impl Segment {
    fn new(from: (f64, f64), to: (f64, f64)) -> Self {
        Self { from, to }
    }

    pub fn is_horizontal(&self) -> bool {
        (self.from.1 - self.to.1).abs() < EPS && (self.from.0 - self.to.0).abs() >= EPS
    }

    pub fn is_vertical(&self) -> bool {
        (self.from.0 - self.to.0).abs() < EPS && (self.from.1 - self.to.1).abs() >= EPS
    }

    pub fn x_start(&self) -> f64 {
        self.from.0.min(self.to.0)
    }

    pub fn dx(&self) -> f64 {
        (self.to.0 - self.from.0).abs()
    }

    pub fn dy(&self) -> f64 {
        (self.to.1 - self.from.1).abs()
    }

    pub fn min_y(&self) -> f64 {
        self.from.1.min(self.to.1)
    }
}

/// A positioned text run.
#[derive(Clone, Debug, PartialEq)]
pub struct TextLabel {
    pub text: String,
    pub x: f64,
    pub y: f64,
}

/// All `<path>` nodes whose `style` attribute contains `fill_token`.
pub fn bar_paths<'a, 'i>(doc: &'a Document<'i>, fill_token: &str) -> Vec<Node<'a, 'i>> {
    let paths: Vec<Node<'a, 'i>> = doc
        .root()
        .descendants()
        .filter(|n| n.has_tag_name("path"))
        .filter(|n| {
            n.attribute("style")
                .is_some_and(|style| style.contains(fill_token))
        })
        .collect();
    debug!("{} bar paths match `{fill_token}`", paths.len());
    paths
}

/// Climb `depth` element ancestors, stopping at the document root.
pub fn ancestor<'a, 'i>(node: Node<'a, 'i>, depth: usize) -> Node<'a, 'i> {
    let mut current = node;
    for _ in 0..depth {
        match current.parent_element() {
            Some(parent) => current = parent,
            None => break,
        }
    }
    current
}

/// All text labels under `scope`, anchored by their transform matrix (or
/// plain `x`/`y` attributes); empty runs and unanchored nodes are skipped.
pub fn text_labels(scope: Node<'_, '_>) -> Vec<TextLabel> {
    scope
        .descendants()
        .filter(|n| n.has_tag_name("text"))
        .filter_map(|n| {
            let (x, y) = anchor(&n)?;
            let text: String = n
                .descendants()
                .filter(|d| d.is_text())
                .filter_map(|d| d.text())
                .collect();
            let text = text.trim().to_owned();
            if text.is_empty() {
                None
            } else {
                Some(TextLabel { text, x, y })
            }
        })
        .collect()
}

fn anchor(node: &Node<'_, '_>) -> Option<(f64, f64)> {
    if let Some(t) = node.attribute("transform") {
        if let Some(a) = transform_anchor(t) {
            return Some(a);
        }
    }
    let x = node.attribute("x")?.parse().ok()?;
    let y = node.attribute("y")?.parse().ok()?;
    Some((x, y))
}

/// Translation component of a `matrix(a,b,c,d,e,f)` or `translate(x[,y])`.
fn transform_anchor(value: &str) -> Option<(f64, f64)> {
    let (name, rest) = value.trim().split_once('(')?;
    let args: Vec<f64> = rest
        .trim_end_matches(')')
        .split(|c: char| c == ',' || c.is_whitespace())
        .filter(|s| !s.is_empty())
        .map(str::parse)
        .collect::<Result<_, _>>()
        .ok()?;
    match name.trim() {
        "matrix" if args.len() == 6 => Some((args[4], args[5])),
        "translate" if !args.is_empty() => Some((args[0], args.get(1).copied().unwrap_or(0.0))),
        _ => None,
    }
}

#[derive(Debug, PartialEq)]
enum Token {
    Cmd(char),
    Num(f64),
}

fn lex(d: &str) -> Result<Vec<Token>, VectorError> {
    let bytes = d.as_bytes();
    let mut tokens = Vec::new();
    let mut i = 0;
    while i < bytes.len() {
        let c = bytes[i] as char;
        if c.is_ascii_whitespace() || c == ',' {
            i += 1;
        } else if c.is_ascii_alphabetic() {
            tokens.push(Token::Cmd(c));
            i += 1;
        } else if c.is_ascii_digit() || c == '.' || c == '-' || c == '+' {
            let start = i;
            i += 1;
            let mut seen_dot = c == '.';
            let mut seen_exp = false;
            while i < bytes.len() {
                match bytes[i] {
                    b'0'..=b'9' => i += 1,
                    b'.' if !seen_dot && !seen_exp => {
                        seen_dot = true;
                        i += 1;
                    }
                    b'e' | b'E' if !seen_exp => {
                        seen_exp = true;
                        i += 1;
                        if i < bytes.len() && (bytes[i] == b'+' || bytes[i] == b'-') {
                            i += 1;
                        }
                    }
                    _ => break,
                }
            }
            let text = &d[start..i];
            let value = text
                .parse()
                .map_err(|_| VectorError::BadPathData(format!("bad number `{text}`")))?;
            tokens.push(Token::Num(value));
        } else {
            return Err(VectorError::BadPathData(format!(
                "unexpected character `{c}`"
            )));
        }
    }
    Ok(tokens)
}

fn take_number(tokens: &[Token], i: &mut usize) -> Result<f64, VectorError> {
    match tokens.get(*i) {
        Some(Token::Num(v)) => {
            *i += 1;
            Ok(*v)
        }
        _ => Err(VectorError::BadPathData("expected a number".to_owned())),
    }
}

fn peek_number(tokens: &[Token], i: usize) -> bool {
    matches!(tokens.get(i), Some(Token::Num(_)))
}

/// Parse a path `d` attribute into absolute line segments.
///
/// Supports `M/m L/l H/h V/v Z/z` with implicit command repetition; curve
/// commands are a format error for this chart family.
pub fn parse_segments(d: &str) -> Result<Vec<Segment>, VectorError> {
    let tokens = lex(d)?;
    let mut segments = Vec::new();
    let mut cur = (0.0f64, 0.0f64);
    let mut subpath_start = cur;
    let mut i = 0;

    while i < tokens.len() {
        let cmd = match tokens[i] {
            Token::Cmd(c) => {
                i += 1;
                c
            }
            Token::Num(v) => {
                return Err(VectorError::BadPathData(format!(
                    "stray number `{v}` without a command"
                )))
            }
        };
        let rel = cmd.is_ascii_lowercase();

        match cmd.to_ascii_uppercase() {
            'M' => {
                let x = take_number(&tokens, &mut i)?;
                let y = take_number(&tokens, &mut i)?;
                cur = if rel { (cur.0 + x, cur.1 + y) } else { (x, y) };
                subpath_start = cur;
                // Extra coordinate pairs after a moveto are implicit linetos.
                while peek_number(&tokens, i) {
                    let x = take_number(&tokens, &mut i)?;
                    let y = take_number(&tokens, &mut i)?;
                    let to = if rel { (cur.0 + x, cur.1 + y) } else { (x, y) };
                    segments.push(Segment::new(cur, to));
                    cur = to;
                }
            }
            'L' => {
                let mut any = false;
                while peek_number(&tokens, i) {
                    let x = take_number(&tokens, &mut i)?;
                    let y = take_number(&tokens, &mut i)?;
                    let to = if rel { (cur.0 + x, cur.1 + y) } else { (x, y) };
                    segments.push(Segment::new(cur, to));
                    cur = to;
                    any = true;
                }
                if !any {
                    return Err(VectorError::BadPathData("lineto without arguments".into()));
                }
            }
            'H' => {
                let mut any = false;
                while peek_number(&tokens, i) {
                    let x = take_number(&tokens, &mut i)?;
                    let to = (if rel { cur.0 + x } else { x }, cur.1);
                    segments.push(Segment::new(cur, to));
                    cur = to;
                    any = true;
                }
                if !any {
                    return Err(VectorError::BadPathData("lineto without arguments".into()));
                }
            }
            'V' => {
                let mut any = false;
                while peek_number(&tokens, i) {
                    let y = take_number(&tokens, &mut i)?;
                    let to = (cur.0, if rel { cur.1 + y } else { y });
                    segments.push(Segment::new(cur, to));
                    cur = to;
                    any = true;
                }
                if !any {
                    return Err(VectorError::BadPathData("lineto without arguments".into()));
                }
            }
            'Z' => {
                if (cur.0 - subpath_start.0).abs() >= EPS || (cur.1 - subpath_start.1).abs() >= EPS
                {
                    segments.push(Segment::new(cur, subpath_start));
                }
                cur = subpath_start;
            }
            other => {
                return Err(VectorError::BadPathData(format!(
                    "unsupported path command `{other}`"
                )))
            }
        }
    }

    Ok(segments)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rectangle_path_parses_to_four_segments() {
        let segments = parse_segments("M 10,100 h 20 v -40 h -20 z").unwrap();
        assert_eq!(segments.len(), 4);
        assert!(segments[0].is_horizontal());
        assert_eq!(segments[0].x_start(), 10.0);
        assert_eq!(segments[0].dx(), 20.0);
        assert!(segments[3].is_vertical());
        assert_eq!(segments[3].dy(), 40.0);
    }

    #[test]
    fn absolute_and_relative_commands_agree() {
        let abs = parse_segments("M 10,100 L 30,100 L 30,60 L 10,60 Z").unwrap();
        let rel = parse_segments("m 10,100 l 20,0 l 0,-40 l -20,0 z").unwrap();
        assert_eq!(abs, rel);
    }

    #[test]
    fn implicit_lineto_after_moveto() {
        let segments = parse_segments("M 0,0 10,0 10,10").unwrap();
        assert_eq!(segments.len(), 2);
        assert_eq!(segments[1].to, (10.0, 10.0));
    }

    #[test]
    fn curve_commands_are_rejected() {
        let err = parse_segments("M 0,0 C 1,1 2,2 3,3").unwrap_err();
        assert!(matches!(err, VectorError::BadPathData(_)));
    }

    #[test]
    fn negative_and_decimal_numbers_lex() {
        let segments = parse_segments("M -1.5,2.25 h 3e1").unwrap();
        assert_eq!(segments[0].from, (-1.5, 2.25));
        assert_eq!(segments[0].dx(), 30.0);
    }

    #[test]
    fn bar_paths_filter_by_style_token() {
        let svg = r##"<svg xmlns="http://www.w3.org/2000/svg">
            <path style="fill:#808080;stroke:none" d="M 0,10 h 5 v -5 h -5 z"/>
            <path style="fill:#ff0000" d="M 9,9 h 1 v -1 h -1 z"/>
        </svg>"##;
        let doc = Document::parse(svg).unwrap();
        let bars = bar_paths(&doc, "fill:#808080");
        assert_eq!(bars.len(), 1);
    }

    #[test]
    fn text_labels_read_matrix_and_translate_anchors() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <g>
                <text transform="matrix(1,0,0,1,15,120)">26</text>
                <text transform="translate(40,120)">27</text>
                <text x="65" y="120">28</text>
                <text transform="matrix(1,0,0,1,0,0)">  </text>
            </g>
        </svg>"#;
        let doc = Document::parse(svg).unwrap();
        let labels = text_labels(doc.root());
        assert_eq!(labels.len(), 3);
        assert_eq!(labels[0], TextLabel {
            text: "26".to_owned(),
            x: 15.0,
            y: 120.0
        });
        assert_eq!((labels[1].x, labels[1].y), (40.0, 120.0));
        assert_eq!((labels[2].x, labels[2].y), (65.0, 120.0));
    }

    #[test]
    fn nested_tspans_concatenate() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg">
            <text transform="translate(5,5)"><tspan>Abril</tspan> <tspan>2022</tspan></text>
        </svg>"#;
        let doc = Document::parse(svg).unwrap();
        let labels = text_labels(doc.root());
        assert_eq!(labels[0].text, "Abril 2022");
    }

    #[test]
    fn ancestor_stops_at_root() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg"><g><path d="M 0,0 h 1"/></g></svg>"#;
        let doc = Document::parse(svg).unwrap();
        let path = doc
            .root()
            .descendants()
            .find(|n| n.has_tag_name("path"))
            .unwrap();
        assert_eq!(ancestor(path, 1).tag_name().name(), "g");
        assert_eq!(ancestor(path, 2).tag_name().name(), "svg");
        assert_eq!(ancestor(path, 99).tag_name().name(), "svg");
    }
}
