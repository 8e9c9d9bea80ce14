//! Route arguments.
//!
//! A route is a space-delimited sequence of elements: published
//! identifiers (waypoints or airways), compact lat/lon points, and
//! place/bearing/distance fixes. On the wire a route always occupies the
//! tail of its `DATA=` segment.

use std::{fmt, str::FromStr};

use crate::{
    core::is_ident_char,
    error::ValidationError,
    position::{LatLon, Pbd},
};

#[derive(Debug, Clone, PartialEq)]
pub enum RouteElement {
    /// A waypoint or airway identifier. The two are not distinguishable
    /// from text alone.
    Ident(String),
    LatLon(LatLon),
    Pbd(Pbd),
}

impl fmt::Display for RouteElement {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            RouteElement::Ident(name) => f.write_str(name),
            RouteElement::LatLon(ll) => ll.fmt(f),
            RouteElement::Pbd(pbd) => pbd.fmt(f),
        }
    }
}

impl FromStr for RouteElement {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Err(ValidationError::empty());
        }
        if s.contains('/') {
            return Ok(RouteElement::Pbd(s.parse()?));
        }
        if (s.starts_with('N') || s.starts_with('S'))
            && s.len() >= 10
            && s.as_bytes()[1].is_ascii_digit()
        {
            if let Ok(ll) = s.parse::<LatLon>() {
                return Ok(RouteElement::LatLon(ll));
            }
        }
        if s.len() > 8 {
            return Err(ValidationError::too_long(8));
        }
        if let Some(at) = s.bytes().position(|b| !is_ident_char(b)) {
            return Err(ValidationError::invalid_byte(s.as_bytes()[at], at));
        }
        Ok(RouteElement::Ident(s.to_owned()))
    }
}

/// An ordered sequence of route elements.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Route {
    pub elements: Vec<RouteElement>,
}

impl Route {
    pub const MAX_ELEMENTS: usize = 128;

    pub fn new(elements: Vec<RouteElement>) -> Result<Self, ValidationError> {
        if elements.is_empty() {
            return Err(ValidationError::empty());
        }
        if elements.len() > Self::MAX_ELEMENTS {
            return Err(ValidationError::too_long(Self::MAX_ELEMENTS));
        }
        Ok(Self { elements })
    }

    /// Convenience constructor from bare identifiers.
    pub fn from_idents<I, S>(idents: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let elements = idents
            .into_iter()
            .map(|id| id.as_ref().parse())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(elements)
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        for (i, element) in self.elements.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            element.fmt(f)?;
        }
        Ok(())
    }
}

impl FromStr for Route {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let elements = s
            .split_whitespace()
            .map(|token| token.parse())
            .collect::<Result<Vec<_>, _>>()?;
        Self::new(elements)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_roundtrip() {
        let text = "KSFO OFFSH9 SXC V25 N3322.50W11845.20 SXC/240/25.0 KLAX";
        let route = text.parse::<Route>().unwrap();
        assert_eq!(route.elements.len(), 7);
        assert_eq!(route.to_string(), text);
        assert!(matches!(route.elements[4], RouteElement::LatLon(_)));
        assert!(matches!(route.elements[5], RouteElement::Pbd(_)));
    }

    #[test]
    fn test_route_rejects_empty_and_junk() {
        assert!("".parse::<Route>().is_err());
        assert!("KSFO BAD*TOKEN".parse::<Route>().is_err());
    }
}
