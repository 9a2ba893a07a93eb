use std::fmt;
use std::sync::Arc;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

/// Name used by [`Cardinal::unit`].
pub const UNIT_NAME: &str = "unit";

/// Unit tag carried by every scalar.
///
/// Two scalars can only be added or multiplied when their cardinals are
/// equal. Cloning is a reference-count bump, so every coefficient of a large
/// multivector can carry one without copying the name.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Cardinal(Arc<str>);

impl Cardinal {
    /// Create a cardinal with the given unit name.
    pub fn new(name: &str) -> Self {
        Self(Arc::from(name))
    }

    /// The default dimensionless unit.
    pub fn unit() -> Self {
        Self::new(UNIT_NAME)
    }

    pub fn name(&self) -> &str {
        &self.0
    }
}

impl Default for Cardinal {
    fn default() -> Self {
        Self::unit()
    }
}

impl fmt::Debug for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Cardinal({})", self.0)
    }
}

impl fmt::Display for Cardinal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Serialize for Cardinal {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> Deserialize<'de> for Cardinal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let name = String::deserialize(deserializer)?;
        Ok(Cardinal::new(&name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_equality_by_name() {
        assert_eq!(Cardinal::new("m"), Cardinal::new("m"));
        assert_ne!(Cardinal::new("m"), Cardinal::new("s"));
        assert_eq!(Cardinal::default(), Cardinal::unit());
        assert_eq!(Cardinal::unit().name(), "unit");
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", Cardinal::new("kg")), "kg");
        assert_eq!(format!("{:?}", Cardinal::new("kg")), "Cardinal(kg)");
    }
}
