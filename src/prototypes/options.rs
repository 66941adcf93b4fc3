//! Settings a language passes along when parsing its prototypes.

/// How a language writes its parameters.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ParameterStyle {
    /// Detect it from the parameters' tags.
    #[default]
    Unknown,
    /// Type before the name, as in `int x`. Implied types come from earlier
    /// parameters.
    C,
    /// Name before the type, as in `x: integer`. Implied types come from later
    /// parameters.
    Pascal,
}

/// Options for [`ParsedPrototype`](super::ParsedPrototype).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PrototypeOptions {
    pub parameter_style: ParameterStyle,
    /// Whether a parameter without a type can borrow one from its neighbors,
    /// like `y` in `int x, y`.
    pub supports_implied_types: bool,
}

impl Default for PrototypeOptions {
    fn default() -> Self {
        Self {
            parameter_style: ParameterStyle::Unknown,
            supports_implied_types: true,
        }
    }
}

impl PrototypeOptions {
    pub fn with_parameter_style(parameter_style: ParameterStyle) -> Self {
        Self {
            parameter_style,
            ..Self::default()
        }
    }
}
