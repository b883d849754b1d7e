pub use crate::error::*;

mod clock;
mod database;
mod entity;
mod error;
mod identity;
mod modify;
mod policy;
mod query;
mod security;

#[cfg(feature = "prelude")]
pub mod prelude {
    pub mod entity {
        pub use crate::entity::*;
    }
    pub mod policy {
        pub use crate::policy::*;
    }
}

#[cfg(feature = "interface")]
pub mod interface {
    pub mod database {
        pub use crate::database::*;
    }
    pub mod query {
        pub use crate::query::*;
    }
    pub mod update {
        pub use crate::modify::*;
    }
    pub mod clock {
        pub use crate::clock::*;
    }
    pub mod identity {
        pub use crate::identity::*;
    }
    pub mod security {
        pub use crate::security::*;
    }
}
