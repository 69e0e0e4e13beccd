//! Viewport-width media queries and the host capability that evaluates them.
//!
//! A [`MediaQuery`] is a width predicate with optional inclusive bounds,
//! written in CSS as `(min-width: 600px) and (max-width: 959.99px)`. A
//! [`MediaQueryHost`] turns a query into a live [`MediaQueryList`] that
//! reports its current match state and calls its listeners whenever that
//! state flips.

use std::{fmt, rc::Rc, str::FromStr};

/// `(max-width: 599.99px)`
pub const XSMALL_QUERY: MediaQuery = MediaQuery::max_width(599.99);
/// `(min-width: 600px) and (max-width: 959.99px)`
pub const SMALL_QUERY: MediaQuery = MediaQuery::between(600.0, 959.99);
/// `(min-width: 960px) and (max-width: 1279.99px)`
pub const MEDIUM_QUERY: MediaQuery = MediaQuery::between(960.0, 1279.99);
/// `(min-width: 1280px)`
pub const LARGE_QUERY: MediaQuery = MediaQuery::min_width(1280.0);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaQueryError {
    #[error("media query is empty")]
    Empty,
    #[error("malformed media query clause `{0}`")]
    MalformedClause(String),
    #[error("unsupported media feature `{0}`")]
    UnknownFeature(String),
    #[error("unsupported length unit in `{0}`, only px is accepted")]
    UnsupportedUnit(String),
    #[error("invalid length `{0}`")]
    InvalidLength(String),
    #[error("media feature `{0}` is given more than once")]
    DuplicateFeature(&'static str),
}

/// A predicate over viewport width. Both bounds are inclusive, as in CSS.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MediaQuery {
    pub min_width: Option<f64>,
    pub max_width: Option<f64>,
}

impl MediaQuery {
    /// Matches every width.
    pub const ALL: MediaQuery = MediaQuery {
        min_width: None,
        max_width: None,
    };

    pub const fn min_width(px: f64) -> Self {
        Self {
            min_width: Some(px),
            max_width: None,
        }
    }

    pub const fn max_width(px: f64) -> Self {
        Self {
            min_width: None,
            max_width: Some(px),
        }
    }

    pub const fn between(min: f64, max: f64) -> Self {
        Self {
            min_width: Some(min),
            max_width: Some(max),
        }
    }

    pub fn matches(&self, width: f64) -> bool {
        self.min_width.is_none_or(|min| width >= min)
            && self.max_width.is_none_or(|max| width <= max)
    }
}

impl fmt::Display for MediaQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.min_width, self.max_width) {
            (None, None) => f.write_str("all"),
            (Some(min), None) => write!(f, "(min-width: {min}px)"),
            (None, Some(max)) => write!(f, "(max-width: {max}px)"),
            (Some(min), Some(max)) => {
                write!(f, "(min-width: {min}px) and (max-width: {max}px)")
            }
        }
    }
}

impl FromStr for MediaQuery {
    type Err = MediaQueryError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MediaQueryError::Empty);
        }
        if s.eq_ignore_ascii_case("all") {
            return Ok(MediaQuery::ALL);
        }

        let mut query = MediaQuery::ALL;
        for clause in s.split(" and ") {
            let (feature, px) = parse_clause(clause)?;
            let slot = match feature {
                "min-width" => &mut query.min_width,
                _ => &mut query.max_width,
            };
            if slot.replace(px).is_some() {
                return Err(MediaQueryError::DuplicateFeature(feature));
            }
        }
        Ok(query)
    }
}

fn parse_clause(clause: &str) -> Result<(&'static str, f64), MediaQueryError> {
    let malformed = || MediaQueryError::MalformedClause(clause.trim().to_string());

    let inner = clause
        .trim()
        .strip_prefix('(')
        .and_then(|c| c.strip_suffix(')'))
        .ok_or_else(malformed)?;
    let (feature, value) = inner.split_once(':').ok_or_else(malformed)?;

    let feature = match feature.trim() {
        "min-width" => "min-width",
        "max-width" => "max-width",
        other => return Err(MediaQueryError::UnknownFeature(other.to_string())),
    };

    let value = value.trim();
    let number = value.strip_suffix("px").ok_or_else(|| {
        if value.starts_with(|c: char| c.is_ascii_digit() || matches!(c, '.' | '-' | '+')) {
            MediaQueryError::UnsupportedUnit(value.to_string())
        } else {
            MediaQueryError::InvalidLength(value.to_string())
        }
    })?;
    let px = number
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|px| px.is_finite())
        .ok_or_else(|| MediaQueryError::InvalidLength(value.to_string()))?;

    Ok((feature, px))
}

/// A live media query evaluated by a host.
pub trait MediaQueryList {
    fn media(&self) -> MediaQuery;

    /// Whether the query matches the viewport right now.
    fn matches(&self) -> bool;

    /// Register `listener` to be called with the new match state each time
    /// it flips. Listeners cannot be removed; they live as long as the list.
    fn add_listener(&self, listener: Box<dyn Fn(bool)>);
}

/// The environment's ability to evaluate viewport media queries.
///
/// A runtime without a viewport simply has no host; see
/// [`Broadcaster::new`](crate::Broadcaster::new).
pub trait MediaQueryHost {
    fn match_media(&self, query: &MediaQuery) -> Rc<dyn MediaQueryList>;
}
