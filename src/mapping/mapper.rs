use crate::mapping::error::{MappingError, MappingResult};

/// Resolves a wire code through `from_code`, naming `property` on failure.
pub(crate) fn decode_code<T>(
    property: &'static str,
    code: i32,
    from_code: fn(i32) -> Option<T>,
) -> MappingResult<T> {
    from_code(code).ok_or(MappingError::UnknownCode { property, code })
}

/// Converts one aggregate between its complex and simple forms.
///
/// Implementors supply the single-entity conversions; absent inputs and
/// sequences are handled here so every mapper treats them alike.
pub trait EntityMapper: Send + Sync {
    type Complex;
    type Simple;

    fn map_to_complex(&self, simple: &Self::Simple) -> MappingResult<Self::Complex>;

    fn map_to_simple(&self, complex: &Self::Complex) -> MappingResult<Self::Simple>;

    /// An absent simple entity maps to an absent complex one.
    fn to_complex(&self, simple: Option<&Self::Simple>) -> MappingResult<Option<Self::Complex>> {
        simple.map(|s| self.map_to_complex(s)).transpose()
    }

    /// An absent complex entity maps to an absent simple one.
    fn to_simple(&self, complex: Option<&Self::Complex>) -> MappingResult<Option<Self::Simple>> {
        complex.map(|c| self.map_to_simple(c)).transpose()
    }

    /// An absent sequence maps to an empty one.
    fn to_complex_all(&self, simple: Option<&[Self::Simple]>) -> MappingResult<Vec<Self::Complex>> {
        simple
            .unwrap_or_default()
            .iter()
            .map(|s| self.map_to_complex(s))
            .collect()
    }

    /// An absent sequence maps to an empty one.
    fn to_simple_all(&self, complex: Option<&[Self::Complex]>) -> MappingResult<Vec<Self::Simple>> {
        complex
            .unwrap_or_default()
            .iter()
            .map(|c| self.map_to_simple(c))
            .collect()
    }
}
