//! Navigation targets.

use std::fmt;

/// A place the presentation layer can be sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// The publication list.
    Publications,
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Publications => f.write_str("/publications"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_route_path() {
        assert_eq!(Route::Publications.to_string(), "/publications");
    }
}
