//! HTTP Handlers

mod accounts;
mod authors;
mod books;
mod persons;
mod ping;
mod publishers;

pub use accounts::*;
pub use authors::*;
pub use books::*;
pub use persons::*;
pub use ping::*;
pub use publishers::*;
