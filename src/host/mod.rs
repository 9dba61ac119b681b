//! Browser side: canvas access, the frame loop and the mount/unmount
//! lifecycle exposed to JS.

pub mod canvas;
pub mod frame;
pub mod mount;
