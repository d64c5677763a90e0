pub mod rest;
pub mod state;

// Re-export the handlers to make them easily accessible
// to the binary that will build the web server router.
pub use rest::{calmind_handler, index_handler};
