//! Host shell: selects exactly one feature module per path.
//!
//! Feature modules share no state; the shell only decides which one a host
//! should render.

pub mod router;

pub use router::Route;
