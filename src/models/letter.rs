//! The closed letter alphabet and its static letter types.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::models::error::ModelError;

/// Static classification of a letter, independent of motion attributes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LetterType {
    /// Dual shift
    Type1,
    /// Shift + static
    Type2,
    /// Shift + dash ("cross-shift")
    Type3,
    /// Dash + static
    Type4,
    /// Dual dash
    Type5,
    /// Dual static
    Type6,
}

impl LetterType {
    /// All letter types in order.
    pub const ALL: [Self; 6] = [
        Self::Type1,
        Self::Type2,
        Self::Type3,
        Self::Type4,
        Self::Type5,
        Self::Type6,
    ];

    /// Zero-based position in [`LetterType::ALL`].
    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Short human-readable description.
    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::Type1 => "Dual-Shift",
            Self::Type2 => "Shift",
            Self::Type3 => "Cross-Shift",
            Self::Type4 => "Dash",
            Self::Type5 => "Dual-Dash",
            Self::Type6 => "Static",
        }
    }
}

impl fmt::Display for LetterType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Type{}", self.index() + 1)
    }
}

impl FromStr for LetterType {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix("Type")
            .or_else(|| trimmed.strip_prefix("type"))
            .unwrap_or(trimmed);
        match digits.parse::<usize>() {
            Ok(n @ 1..=6) => Ok(Self::ALL[n - 1]),
            _ => Err(ModelError::unknown("letter type", s)),
        }
    }
}

/// A symbol of the letter alphabet.
///
/// Serialized as its symbol (`"Σ"`, `"W-"`); parsing also accepts the ASCII
/// name (`"Sigma"`, `"Sigma-"`).
#[allow(missing_docs)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Letter {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
    Sigma,
    Delta,
    Theta,
    Omega,
    WDash,
    XDash,
    YDash,
    ZDash,
    SigmaDash,
    DeltaDash,
    ThetaDash,
    OmegaDash,
    Phi,
    Psi,
    Lambda,
    PhiDash,
    PsiDash,
    LambdaDash,
    Alpha,
    Beta,
    Gamma,
}

impl Letter {
    /// Every letter in alphabet order.
    pub const ALL: [Self; 47] = [
        Self::A,
        Self::B,
        Self::C,
        Self::D,
        Self::E,
        Self::F,
        Self::G,
        Self::H,
        Self::I,
        Self::J,
        Self::K,
        Self::L,
        Self::M,
        Self::N,
        Self::O,
        Self::P,
        Self::Q,
        Self::R,
        Self::S,
        Self::T,
        Self::U,
        Self::V,
        Self::W,
        Self::X,
        Self::Y,
        Self::Z,
        Self::Sigma,
        Self::Delta,
        Self::Theta,
        Self::Omega,
        Self::WDash,
        Self::XDash,
        Self::YDash,
        Self::ZDash,
        Self::SigmaDash,
        Self::DeltaDash,
        Self::ThetaDash,
        Self::OmegaDash,
        Self::Phi,
        Self::Psi,
        Self::Lambda,
        Self::PhiDash,
        Self::PsiDash,
        Self::LambdaDash,
        Self::Alpha,
        Self::Beta,
        Self::Gamma,
    ];

    /// Notation symbol.
    #[must_use]
    pub const fn symbol(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::E => "E",
            Self::F => "F",
            Self::G => "G",
            Self::H => "H",
            Self::I => "I",
            Self::J => "J",
            Self::K => "K",
            Self::L => "L",
            Self::M => "M",
            Self::N => "N",
            Self::O => "O",
            Self::P => "P",
            Self::Q => "Q",
            Self::R => "R",
            Self::S => "S",
            Self::T => "T",
            Self::U => "U",
            Self::V => "V",
            Self::W => "W",
            Self::X => "X",
            Self::Y => "Y",
            Self::Z => "Z",
            Self::Sigma => "Σ",
            Self::Delta => "Δ",
            Self::Theta => "θ",
            Self::Omega => "Ω",
            Self::WDash => "W-",
            Self::XDash => "X-",
            Self::YDash => "Y-",
            Self::ZDash => "Z-",
            Self::SigmaDash => "Σ-",
            Self::DeltaDash => "Δ-",
            Self::ThetaDash => "θ-",
            Self::OmegaDash => "Ω-",
            Self::Phi => "Φ",
            Self::Psi => "Ψ",
            Self::Lambda => "Λ",
            Self::PhiDash => "Φ-",
            Self::PsiDash => "Ψ-",
            Self::LambdaDash => "Λ-",
            Self::Alpha => "α",
            Self::Beta => "β",
            Self::Gamma => "Γ",
        }
    }

    /// ASCII spelling of the symbol, for terminals and file names.
    #[must_use]
    pub fn ascii_name(self) -> String {
        let (base, dash) = self.base_symbol();
        let name = match base {
            "Σ" => "Sigma",
            "Δ" => "Delta",
            "θ" => "Theta",
            "Ω" => "Omega",
            "Φ" => "Phi",
            "Ψ" => "Psi",
            "Λ" => "Lambda",
            "α" => "Alpha",
            "β" => "Beta",
            "Γ" => "Gamma",
            other => other,
        };
        if dash {
            format!("{name}-")
        } else {
            name.to_string()
        }
    }

    /// Symbol without its trailing dash marker, and whether it had one.
    #[must_use]
    pub fn base_symbol(self) -> (&'static str, bool) {
        let symbol = self.symbol();
        match symbol.strip_suffix('-') {
            Some(base) => (base, true),
            None => (symbol, false),
        }
    }

    /// Static letter type.
    #[must_use]
    pub const fn letter_type(self) -> LetterType {
        match self {
            Self::A
            | Self::B
            | Self::C
            | Self::D
            | Self::E
            | Self::F
            | Self::G
            | Self::H
            | Self::I
            | Self::J
            | Self::K
            | Self::L
            | Self::M
            | Self::N
            | Self::O
            | Self::P
            | Self::Q
            | Self::R
            | Self::S
            | Self::T
            | Self::U
            | Self::V => LetterType::Type1,
            Self::W
            | Self::X
            | Self::Y
            | Self::Z
            | Self::Sigma
            | Self::Delta
            | Self::Theta
            | Self::Omega => LetterType::Type2,
            Self::WDash
            | Self::XDash
            | Self::YDash
            | Self::ZDash
            | Self::SigmaDash
            | Self::DeltaDash
            | Self::ThetaDash
            | Self::OmegaDash => LetterType::Type3,
            Self::Phi | Self::Psi | Self::Lambda => LetterType::Type4,
            Self::PhiDash | Self::PsiDash | Self::LambdaDash => LetterType::Type5,
            Self::Alpha | Self::Beta | Self::Gamma => LetterType::Type6,
        }
    }

    /// Chase letters whose placement keys depend on lead/trail rather than track.
    #[must_use]
    pub const fn is_lead_state_letter(self) -> bool {
        matches!(self, Self::S | Self::T | Self::U | Self::V)
    }

    /// Suffix appended to default-placement keys for dash-bearing letter types.
    ///
    /// `W-` yields `"_W_dash"`, `Φ-` yields `"_Φ_dash"`.
    #[must_use]
    pub fn dash_key_suffix(self) -> Option<String> {
        match self.letter_type() {
            LetterType::Type3 | LetterType::Type5 => {
                Some(format!("_{}_dash", self.base_symbol().0))
            }
            _ => None,
        }
    }
}

impl fmt::Display for Letter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

impl FromStr for Letter {
    type Err = ModelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        Self::ALL
            .into_iter()
            .find(|letter| letter.symbol() == s)
            .or_else(|| {
                Self::ALL
                    .into_iter()
                    .find(|letter| letter.ascii_name().eq_ignore_ascii_case(s))
            })
            .ok_or_else(|| ModelError::unknown("letter", s))
    }
}

impl Serialize for Letter {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.symbol())
    }
}

impl<'de> Deserialize<'de> for Letter {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
