//! Endpoint clients. Each one is a thin layer over the shared `RestClient`.

pub mod listen;
pub mod manage;
pub mod speak;

pub use listen::ListenClient;
pub use manage::ManageClient;
pub use speak::SpeakClient;
