//! Parsers for marble notation and the inline diagram format

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::{tag_no_case, take_while1},
    character::complete::{char, digit1, space0, space1},
    combinator::{all_consuming, eof, map, map_opt, map_res, opt, rest},
    sequence::{preceded, separated_pair, terminated},
};

use crate::ast::*;
use crate::token::{classify, Token};

/// Diagram name used when the inline format has no `name` line
pub const DEFAULT_NAME: &str = "diagram";
/// Canvas size used when the inline format has no `size` line
pub const DEFAULT_WIDTH: f64 = 1000.0;
pub const DEFAULT_HEIGHT: f64 = 400.0;

/// Parse error
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ParseError {
    #[error("Parse error at line {line}: {message}")]
    SyntaxError { line: usize, message: String },
    #[error("Invalid size at line {line}: expected <width>x<height>, got `{value}`")]
    InvalidSize { line: usize, value: String },
}

/// Walk a notation string and return its visible events in order.
///
/// Every recognised character occupies one frame; `-` only advances time.
/// Inert characters are skipped without consuming a frame. Characters after
/// `|` keep advancing the frame counter.
pub fn parse_notation(notation: &str) -> Vec<Event> {
    let mut events = Vec::new();
    let mut frame = 0;
    let mut sequence = 0;

    for token in notation.chars().filter_map(classify) {
        match token {
            Token::TimeStep => {}
            Token::Message { .. } => {
                events.push(Event { token, frame, sequence });
                sequence += 1;
            }
            _ => events.push(Event { token, frame, sequence }),
        }
        frame += 1;
    }

    events
}

/// One line of the inline format
#[derive(Debug, Clone, PartialEq)]
enum Line {
    Name(String),
    Title(String),
    Description(String),
    Size(String),
    Lane(Lane),
}

/// Parse a diagram written in the inline format:
///
/// ```text
/// name multiple-partitions
/// title Multiple Partition Processing
/// description Messages distributed across multiple partitions
/// size 1000x400
/// producer: a---b---c---d---e---f---|
/// partition0: a-------c-------e-----|
/// stats as sink: --a---b---|
/// ```
pub fn parse(input: &str) -> Result<DiagramSpec, ParseError> {
    let mut spec = DiagramSpec::new(DEFAULT_NAME, DEFAULT_WIDTH, DEFAULT_HEIGHT);

    for (line_num, line) in input.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }

        let item = match parse_line(trimmed) {
            Ok((_, item)) => item,
            Err(_) => {
                return Err(ParseError::SyntaxError {
                    line: line_num + 1,
                    message: format!("unrecognised line `{}`", trimmed),
                });
            }
        };

        match item {
            Line::Name(name) => spec.name = name,
            Line::Title(title) => spec.title = title,
            Line::Description(description) => spec.description = description,
            Line::Size(value) => match parse_dimensions(&value) {
                Ok((_, (width, height))) => {
                    spec.width = width;
                    spec.height = height;
                }
                Err(_) => {
                    return Err(ParseError::InvalidSize {
                        line: line_num + 1,
                        value,
                    });
                }
            },
            Line::Lane(lane) => spec.lanes.push(lane),
        }
    }

    Ok(spec)
}

/// Lanes are tried first: `<name> [as <role>]:` only matches a lane, so a
/// lane may be named after a directive
fn parse_line(input: &str) -> IResult<&str, Line> {
    alt((
        parse_lane,
        parse_name_directive,
        parse_title,
        parse_description,
        parse_size,
    ))
    .parse(input)
}

/// Parse `name <identifier>`
fn parse_name_directive(input: &str) -> IResult<&str, Line> {
    let (input, _) = tag_no_case("name").parse(input)?;
    let (input, _) = space1.parse(input)?;
    let (input, name) = terminated(parse_identifier, (space0, eof)).parse(input)?;
    Ok((input, Line::Name(name.to_string())))
}

/// Parse `title <text>`
fn parse_title(input: &str) -> IResult<&str, Line> {
    map(
        preceded((tag_no_case("title"), space1), rest),
        |t: &str| Line::Title(t.trim().to_string()),
    )
    .parse(input)
}

/// Parse `description <text>`
fn parse_description(input: &str) -> IResult<&str, Line> {
    map(
        preceded((tag_no_case("description"), space1), rest),
        |t: &str| Line::Description(t.trim().to_string()),
    )
    .parse(input)
}

/// Parse `size <raw>`; the dimensions are validated separately so a bad
/// value reports as a size error instead of an unrecognised line
fn parse_size(input: &str) -> IResult<&str, Line> {
    map(
        preceded((tag_no_case("size"), space1), rest),
        |t: &str| Line::Size(t.trim().to_string()),
    )
    .parse(input)
}

/// Parse `<width>x<height>`
fn parse_dimensions(input: &str) -> IResult<&str, (f64, f64)> {
    all_consuming(separated_pair(parse_pixels, tag_no_case("x"), parse_pixels)).parse(input)
}

fn parse_pixels(input: &str) -> IResult<&str, f64> {
    map_res(digit1, |n: &str| n.parse::<f64>()).parse(input)
}

/// Parse a lane: `partition0: a---b---|` or `audit as sink: --a--|`
fn parse_lane(input: &str) -> IResult<&str, Line> {
    let (input, name) = parse_identifier(input)?;
    let (input, role) = opt(preceded((space1, tag_no_case("as"), space1), parse_role)).parse(input)?;
    let (input, _) = space0.parse(input)?;
    let (input, _) = char(':').parse(input)?;
    let notation = input.trim();

    let mut lane = Lane::new(name, notation);
    if let Some(role) = role {
        lane = lane.with_role(role);
    }
    Ok(("", Line::Lane(lane)))
}

fn parse_role(input: &str) -> IResult<&str, LaneRole> {
    map_opt(take_while1(|c: char| c.is_ascii_alphabetic()), LaneRole::by_name).parse(input)
}

/// Parse an identifier (alphanumeric, underscore, hyphen)
fn parse_identifier(input: &str) -> IResult<&str, &str> {
    take_while1(|c: char| c.is_alphanumeric() || c == '_' || c == '-').parse(input)
}
