#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ObjectKind {
    Transform,
    Mesh,
    Material, // Lambert
    ShadingEngine,
}

#[derive(Clone, Debug, PartialEq)]
pub enum AttrValue {
    Int(i32),
    Float(f64),
    Text(String),
    Double3([f64; 3]),
}

impl AttrValue {
    pub fn type_name(&self) -> &'static str {
        match self {
            AttrValue::Int(_) => "int",
            AttrValue::Float(_) => "float",
            AttrValue::Text(_) => "string",
            AttrValue::Double3(_) => "double3",
        }
    }

    /// Reads as a frame number. Floats are truncated like the host's time query.
    pub fn as_int(&self) -> Option<i32> {
        match self {
            AttrValue::Int(v) => Some(*v),
            AttrValue::Float(v) => Some(*v as i32),
            _ => None
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            AttrValue::Text(s) => Some(s.as_str()),
            _ => None
        }
    }

    pub fn as_double3(&self) -> Option<[f64; 3]> {
        match self {
            AttrValue::Double3(v) => Some(*v),
            _ => None
        }
    }
}

impl From<i32> for AttrValue {
    fn from(v: i32) -> AttrValue {
        AttrValue::Int(v)
    }
}

impl From<f64> for AttrValue {
    fn from(v: f64) -> AttrValue {
        AttrValue::Float(v)
    }
}

impl From<&str> for AttrValue {
    fn from(v: &str) -> AttrValue {
        AttrValue::Text(v.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(v: String) -> AttrValue {
        AttrValue::Text(v)
    }
}

impl From<[f64; 3]> for AttrValue {
    fn from(v: [f64; 3]) -> AttrValue {
        AttrValue::Double3(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn float_frames_truncate() {
        assert_eq!(AttrValue::Float(12.9).as_int(), Some(12));
        assert_eq!(AttrValue::Int(-3).as_int(), Some(-3));
        assert_eq!(AttrValue::from("12").as_int(), None);
    }

    #[test]
    fn text_and_double3_accessors() {
        assert_eq!(AttrValue::from("a,b").as_text(), Some("a,b"));
        assert_eq!(AttrValue::from([1.0, 0.5, 0.0]).as_double3(), Some([1.0, 0.5, 0.0]));
        assert_eq!(AttrValue::Int(1).as_double3(), None);
    }
}
