// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

pub mod aggregator;
pub mod config;
pub mod dataset;
pub mod error;
pub mod partition_job;
pub mod partition_manager;
pub mod rating_record;
pub mod recommendation_table;
pub mod result_data;
pub mod wire_message;

pub use error::CoreError;
