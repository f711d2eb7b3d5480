//! Text input and output for point sets and tours.
//!
//! Input format: a point count `n` followed by `n` whitespace-separated
//! coordinate pairs `x y`.

use std::io::{Read, Write};

use super::{Point, PointSet, Tour};
use crate::{Error, Result};

/// Reads a point set from a text stream.
pub fn read_point_set<R: Read>(mut reader: R) -> Result<PointSet> {
    let mut text = String::new();
    reader.read_to_string(&mut text)?;
    parse_point_set(&text)
}

/// Parses a point set from text.
pub fn parse_point_set(text: &str) -> Result<PointSet> {
    let mut tokens = text.split_whitespace();

    let count: usize = match tokens.next() {
        Some(token) => token
            .parse()
            .map_err(|e| Error::parse(format!("invalid point count {token:?}: {e}")))?,
        None => return Err(Error::parse("missing point count")),
    };

    let mut points = Vec::with_capacity(count);
    for i in 0..count {
        let x = next_coordinate(&mut tokens, i, "x")?;
        let y = next_coordinate(&mut tokens, i, "y")?;
        points.push(Point::new(x, y));
    }

    let trailing = tokens.count();
    if trailing > 0 {
        log::warn!("ignoring {trailing} trailing tokens after {count} points");
    }

    Ok(PointSet::new(points))
}

fn next_coordinate<'a, I>(tokens: &mut I, index: usize, axis: &str) -> Result<f64>
where
    I: Iterator<Item = &'a str>,
{
    let token = tokens
        .next()
        .ok_or_else(|| Error::parse(format!("point {index}: missing {axis} coordinate")))?;
    let value: f64 = token
        .parse()
        .map_err(|e| Error::parse(format!("point {index}: invalid {axis} {token:?}: {e}")))?;
    if !value.is_finite() {
        return Err(Error::parse(format!(
            "point {index}: {axis} coordinate must be finite, got {token}"
        )));
    }
    Ok(value)
}

/// Writes a tour and its cyclic length.
///
/// With `detail`, the visited coordinates are listed first, closing the
/// cycle back at the starting point.
pub fn write_tour<W: Write>(
    mut writer: W,
    points: &PointSet,
    tour: &Tour,
    detail: bool,
) -> Result<()> {
    if detail {
        write!(writer, "order: ")?;
        let order = tour.order();
        for (i, &index) in order.iter().chain(order.first()).enumerate() {
            if i > 0 {
                write!(writer, " -> ")?;
            }
            let p = points
                .get(index)
                .ok_or_else(|| Error::Infeasible(format!("point index {index} out of range")))?;
            write!(writer, "({}, {})", p.x, p.y)?;
        }
        writeln!(writer)?;
    }
    writeln!(writer, "total distance: {}", tour.length(points))?;
    Ok(())
}
