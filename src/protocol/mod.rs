//! Tag reader protocol stack.
//!
//! ```text
//! ┌──────────┐   ┌───────────────┐   ┌────────────────────┐
//! │ Reader   │──▶│ Codec         │──▶│ Scan loop          │
//! │ (TCP)    │   │ (CRC, frame,  │   │ (app::service)     │
//! │          │◀──│  classify)    │   │                    │
//! └──────────┘   └───────────────┘   └────────────────────┘
//! ```

pub mod codec;
pub mod crc;
pub mod reader;

pub use codec::Classification;
pub use reader::{ReaderClient, ReaderEndpoint};
