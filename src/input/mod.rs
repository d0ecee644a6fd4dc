//! Abstract keyboard and mouse input and its translation into platform
//! input records.

pub mod codec;
pub mod keyboard;
pub mod mouse;
pub mod record;
