use std::{fmt, str::FromStr};

use super::Error;

/// The fixed set of supported integration methods.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Method {
    /// Explicit Euler, see [`Euler`](super::Euler).
    Euler,

    /// Leapfrog with an Euler bootstrap step, see [`Leapfrog`](super::Leapfrog).
    Leapfrog,

    /// Classical fourth-order Runge-Kutta, see [`Rk4`](super::Rk4).
    Rk4,
}

impl Method {
    /// All supported methods.
    pub const ALL: [Method; 3] = [Method::Euler, Method::Leapfrog, Method::Rk4];

    /// Returns the canonical identifier of the method.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Method::Euler => "euler",
            Method::Leapfrog => "leapfrog",
            Method::Rk4 => "rk4",
        }
    }
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Parses a method identifier.
///
/// Matching ignores case, the separators `_`, `-`, and spaces, and an
/// optional trailing `method`, so `"rk4"`, `"RK4"`, `"r_k_4"`, and
/// `"rk4_method"` all name [`Method::Rk4`].
impl FromStr for Method {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, '_' | '-' | ' '))
            .flat_map(char::to_lowercase)
            .collect();
        let key = normalized.strip_suffix("method").unwrap_or(normalized.as_str());

        Method::ALL
            .into_iter()
            .find(|method| method.name() == key)
            .ok_or_else(|| Error::UnsupportedMethod(s.to_owned()))
    }
}
