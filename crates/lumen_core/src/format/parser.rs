//! Scene text format parser.
//!
//! Line-oriented keyword blocks:
//!
//! ```text
//! WORLD
//!   MODEL
//!     FACE
//!       [px,py,pz],[nx,ny,nz],[r,g,b],opacity,reflectance;
//!       ... three vertex lines per face
//!   END_MODEL
//!   LIGHT
//!     [px,py,pz],[r,g,b],intensity;
//!   END_LIGHT
//! END_WORLD
//! ```
//!
//! `#` starts a comment that runs to the end of the line. Blank lines are
//! ignored everywhere.

use std::collections::VecDeque;

use lumen_math::Vec3;
use thiserror::Error;

use crate::mesh::{Face, Vertex};
use crate::model::Model;
use crate::scene::{LightSource, Scene};

const VERTEX_SYNTAX: &str = "vertex `[px,py,pz],[nx,ny,nz],[r,g,b],opacity,reflectance;`";
const LIGHT_SYNTAX: &str = "light `[px,py,pz],[r,g,b],intensity;`";

/// Errors that can occur while parsing a scene file.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("Parse error at line {line}: expected {expected}, got `{found}`")]
    Expected {
        line: usize,
        expected: &'static str,
        found: String,
    },

    #[error("Parse error at line {line}: invalid number `{text}` in `{found}`")]
    InvalidNumber {
        line: usize,
        text: String,
        found: String,
    },

    #[error("Unexpected end of file, expected {expected}")]
    UnexpectedEof { expected: &'static str },

    #[error("Parse error at line {line}: unexpected content after END_WORLD: `{found}`")]
    TrailingContent { line: usize, found: String },
}

/// Result type for parsing operations.
pub type ParseResult<T> = Result<T, ParseError>;

/// Parse scene text into a `Scene`.
pub fn parse_scene(content: &str) -> ParseResult<Scene> {
    SceneParser::new(content).parse()
}

/// Scene file parser.
pub struct SceneParser<'a> {
    /// (1-based line number, comment-stripped trimmed text, raw line)
    lines: VecDeque<(usize, &'a str, &'a str)>,
}

impl<'a> SceneParser<'a> {
    /// Create a new parser from file contents.
    pub fn new(content: &'a str) -> Self {
        let lines = content
            .lines()
            .enumerate()
            .filter_map(|(i, raw)| {
                let text = raw.split('#').next().unwrap_or("").trim();
                (!text.is_empty()).then_some((i + 1, text, raw))
            })
            .collect();

        Self { lines }
    }

    /// Parse the whole input as one `WORLD` block.
    pub fn parse(&mut self) -> ParseResult<Scene> {
        self.expect_keyword("WORLD")?;

        let mut scene = Scene::default();
        loop {
            let (line, text, raw) = self.next_line("MODEL, LIGHT or END_WORLD")?;
            match text {
                "MODEL" => {
                    scene.add_model(self.parse_model()?);
                }
                "LIGHT" => scene.add_light(self.parse_light()?),
                "END_WORLD" => break,
                _ => {
                    return Err(ParseError::Expected {
                        line,
                        expected: "keyword MODEL, LIGHT or END_WORLD",
                        found: raw.to_string(),
                    })
                }
            }
        }

        if let Some((line, _, raw)) = self.lines.pop_front() {
            return Err(ParseError::TrailingContent {
                line,
                found: raw.to_string(),
            });
        }

        Ok(scene)
    }

    /// Parse the body of a `MODEL` block up to and including `END_MODEL`.
    fn parse_model(&mut self) -> ParseResult<Model> {
        let mut faces = Vec::new();
        loop {
            let (line, text, raw) = self.next_line("FACE or END_MODEL")?;
            match text {
                "FACE" => {
                    let v1 = self.parse_vertex()?;
                    let v2 = self.parse_vertex()?;
                    let v3 = self.parse_vertex()?;
                    faces.push(Face::new(v1, v2, v3));
                }
                "END_MODEL" => break,
                _ => {
                    return Err(ParseError::Expected {
                        line,
                        expected: "keyword FACE or END_MODEL",
                        found: raw.to_string(),
                    })
                }
            }
        }
        Ok(Model::new(faces))
    }

    fn parse_vertex(&mut self) -> ParseResult<Vertex> {
        let (line, text, raw) = self.next_line(VERTEX_SYNTAX)?;
        let mut cursor = LineCursor::new(line, text, raw, VERTEX_SYNTAX);

        let position = cursor.vec3()?;
        cursor.expect(',')?;
        let normal = cursor.vec3()?;
        cursor.expect(',')?;
        let color = cursor.vec3()?;
        cursor.expect(',')?;
        let opacity = cursor.number()?;
        cursor.expect(',')?;
        let reflectance = cursor.number()?;
        cursor.expect(';')?;
        cursor.finish()?;

        Ok(Vertex::new(position, normal, color)
            .with_opacity(opacity)
            .with_reflectance(reflectance))
    }

    /// Parse the body of a `LIGHT` block up to and including `END_LIGHT`.
    fn parse_light(&mut self) -> ParseResult<LightSource> {
        let (line, text, raw) = self.next_line(LIGHT_SYNTAX)?;
        let mut cursor = LineCursor::new(line, text, raw, LIGHT_SYNTAX);

        let position = cursor.vec3()?;
        cursor.expect(',')?;
        let color = cursor.vec3()?;
        cursor.expect(',')?;
        let intensity = cursor.number()?;
        cursor.expect(';')?;
        cursor.finish()?;

        self.expect_keyword("END_LIGHT")?;

        Ok(LightSource::new(position, color, intensity))
    }

    fn next_line(&mut self, expected: &'static str) -> ParseResult<(usize, &'a str, &'a str)> {
        self.lines
            .pop_front()
            .ok_or(ParseError::UnexpectedEof { expected })
    }

    fn expect_keyword(&mut self, keyword: &'static str) -> ParseResult<()> {
        let (line, text, raw) = self.next_line(keyword)?;
        if text == keyword {
            Ok(())
        } else {
            Err(ParseError::Expected {
                line,
                expected: keyword,
                found: raw.to_string(),
            })
        }
    }
}

/// Token cursor over a single data line.
struct LineCursor<'a> {
    line: usize,
    raw: &'a str,
    rest: &'a str,
    expected: &'static str,
}

impl<'a> LineCursor<'a> {
    fn new(line: usize, text: &'a str, raw: &'a str, expected: &'static str) -> Self {
        Self {
            line,
            raw,
            rest: text,
            expected,
        }
    }

    fn error(&self) -> ParseError {
        ParseError::Expected {
            line: self.line,
            expected: self.expected,
            found: self.raw.to_string(),
        }
    }

    fn expect(&mut self, c: char) -> ParseResult<()> {
        self.rest = self.rest.trim_start();
        match self.rest.strip_prefix(c) {
            Some(rest) => {
                self.rest = rest;
                Ok(())
            }
            None => Err(self.error()),
        }
    }

    fn number(&mut self) -> ParseResult<f32> {
        self.rest = self.rest.trim_start();
        let end = self
            .rest
            .find(|c: char| !(c.is_ascii_digit() || matches!(c, '+' | '-' | '.' | 'e' | 'E')))
            .unwrap_or(self.rest.len());
        if end == 0 {
            return Err(self.error());
        }

        let (text, rest) = self.rest.split_at(end);
        let value = text.parse::<f32>().map_err(|_| ParseError::InvalidNumber {
            line: self.line,
            text: text.to_string(),
            found: self.raw.to_string(),
        })?;
        self.rest = rest;
        Ok(value)
    }

    fn vec3(&mut self) -> ParseResult<Vec3> {
        self.expect('[')?;
        let x = self.number()?;
        self.expect(',')?;
        let y = self.number()?;
        self.expect(',')?;
        let z = self.number()?;
        self.expect(']')?;
        Ok(Vec3::new(x, y, z))
    }

    fn finish(&self) -> ParseResult<()> {
        if self.rest.trim().is_empty() {
            Ok(())
        } else {
            Err(self.error())
        }
    }
}
