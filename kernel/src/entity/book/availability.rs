use vodca::{AsRefln, Fromln};

/// `false` exactly while an open loan references the book.
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq, Fromln, AsRefln)]
pub struct BookAvailability(bool);

impl BookAvailability {
    pub fn new(available: impl Into<bool>) -> Self {
        Self(available.into())
    }
}
