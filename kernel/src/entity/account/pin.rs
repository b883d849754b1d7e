use std::fmt::{Debug, Formatter};

use vodca::{AsRefln, Fromln};

/// Plain-text PIN as typed by the account holder. Never persisted and never logged.
#[derive(Clone, Eq, PartialEq, AsRefln)]
pub struct Pin(String);

impl Pin {
    pub fn new(pin: impl Into<String>) -> Self {
        Self(pin.into())
    }
}

impl Debug for Pin {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Pin(***)")
    }
}

#[derive(Debug, Clone, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct PinDigest(String);

impl PinDigest {
    pub fn new(digest: impl Into<String>) -> Self {
        Self(digest.into())
    }
}

#[cfg(test)]
mod test {
    use super::Pin;

    #[test]
    fn debug_is_redacted() {
        let pin = Pin::new("4321");
        assert_eq!(format!("{pin:?}"), "Pin(***)");
        assert_eq!(pin.as_ref(), "4321");
    }
}
