use serde_yaml::Number;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Width {
    W32,
    W64,
}

/// Shape of a YAML number after classification.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum NumShape {
    Unsigned(Width),
    Signed(Width),
    Float,
    /// NaN / infinities, no C literal worth emitting
    NonFinite,
}

pub fn num_shape(n: &Number) -> NumShape {
    if let Some(u) = n.as_u64() {
        return if u <= u32::MAX as u64 {
            NumShape::Unsigned(Width::W32)
        } else {
            NumShape::Unsigned(Width::W64)
        };
    }
    if let Some(i) = n.as_i64() {
        return if i >= i32::MIN as i64 {
            NumShape::Signed(Width::W32)
        } else {
            NumShape::Signed(Width::W64)
        };
    }
    match n.as_f64() {
        Some(f) if f.is_finite() => NumShape::Float,
        _ => NumShape::NonFinite,
    }
}
