#![allow(dead_code)]

use std::sync::Mutex;

use chrono::NaiveDate;
use kakeibo::{
    config::ConfigManager,
    core::{FixedClock, Session},
};
use once_cell::sync::Lazy;
use tempfile::TempDir;

/// Holds TempDir guards so temporary folders live for the duration of the test run.
static TEST_DIRS: Lazy<Mutex<Vec<TempDir>>> = Lazy::new(|| Mutex::new(Vec::new()));

pub fn day(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

/// Session over the seeded taxonomy whose clock is pinned to `date`.
pub fn session_on(date: NaiveDate) -> Session {
    Session::with_clock(Box::new(FixedClock::on(date)))
}

/// Config manager backed by a unique directory per call.
pub fn temp_config_manager() -> ConfigManager {
    let temp = TempDir::new().expect("create temp dir");
    let base = temp.path().to_path_buf();
    TEST_DIRS.lock().expect("lock temp dir registry").push(temp);
    ConfigManager::with_base_dir(base).expect("create config manager for temp dir")
}

/// Records every prompt it is shown and answers with `answer`.
pub struct RecordingGate {
    pub answer: bool,
    pub prompts: Vec<String>,
}

impl RecordingGate {
    pub fn answering(answer: bool) -> Self {
        Self {
            answer,
            prompts: Vec::new(),
        }
    }
}

impl kakeibo::core::services::ConfirmGate for RecordingGate {
    fn confirm(&mut self, prompt: &str) -> kakeibo::core::services::ServiceResult<bool> {
        self.prompts.push(prompt.to_string());
        Ok(self.answer)
    }
}
