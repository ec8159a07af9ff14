use super::Coordinate;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("line {line}: {message}")]
pub struct BoundaryParseError {
    pub line: usize,
    pub message: String,
}

/// Parse a boundary listing: one `lat,lng` per line, in tracing order.
///
/// Blank lines and lines starting with `#` are skipped. Trailing `# ...`
/// comments after a point are allowed.
pub fn parse_boundary(text: &str) -> Result<Vec<Coordinate>, BoundaryParseError> {
    let mut points = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let point = line.parse::<Coordinate>().map_err(|e| BoundaryParseError {
            line: idx + 1,
            message: e.to_string(),
        })?;
        points.push(point);
    }

    Ok(points)
}
