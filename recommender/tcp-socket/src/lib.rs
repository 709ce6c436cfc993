// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod connection_handler;
pub mod coordinator;
pub mod error;
pub mod line_codec;
pub mod logging;
pub mod query_prompt;
pub mod socket_worker;

pub use error::TransportError;
