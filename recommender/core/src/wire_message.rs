// Copyright 2025 Umberto Gotti <umberto.gotti@umbertogotti.dev>
// Licensed under the Apache License, Version 2.0
// http://www.apache.org/licenses/LICENSE-2.0

use crate::error::CoreError;
use crate::rating_record::RatingRecord;
use crate::result_data::ResultData;
use serde::{Deserialize, Serialize};

pub const NO_MORE_WORK: &str = "NO_MORE_WORK";

/// Control envelope sent instead of a partition when the coordinator has nothing left
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ControlMessage {
    pub message: String,
}

impl ControlMessage {
    pub fn no_more_work() -> Self {
        Self {
            message: NO_MORE_WORK.to_string(),
        }
    }

    pub fn is_no_more_work(&self) -> bool {
        self.message == NO_MORE_WORK
    }
}

/// Message types received by workers
#[derive(Debug, Clone, PartialEq)]
pub enum WorkerMessage {
    /// Termination signal, no partition is left for this worker
    NoMoreWork,
    /// Ordered slice of the dataset to compute on
    Partition(Vec<RatingRecord>),
}

impl WorkerMessage {
    pub fn encode_no_more_work() -> Result<String, CoreError> {
        Ok(serde_json::to_string(&ControlMessage::no_more_work())?)
    }

    pub fn encode_partition(records: &[RatingRecord]) -> Result<String, CoreError> {
        Ok(serde_json::to_string(records)?)
    }

    /// Decode a coordinator frame. The control shape is tried first and the
    /// partition shape second, there is no discriminating envelope field.
    pub fn decode(frame: &str) -> Result<Self, CoreError> {
        if let Ok(control) = serde_json::from_str::<ControlMessage>(frame) {
            if control.is_no_more_work() {
                return Ok(WorkerMessage::NoMoreWork);
            }
            return Err(CoreError::UnknownControlMessage(control.message));
        }

        let records: Vec<RatingRecord> = serde_json::from_str(frame)?;
        Ok(WorkerMessage::Partition(records))
    }
}

impl ResultData {
    pub fn encode(&self) -> Result<String, CoreError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn decode(frame: &str) -> Result<Self, CoreError> {
        Ok(serde_json::from_str(frame)?)
    }
}
