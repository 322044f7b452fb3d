//! Deterministic chat model for unit tests

use crate::error::{CareerForgeError, Result};
use crate::llm::client::ChatModel;
use std::collections::VecDeque;
use std::sync::Mutex;

/// Replays canned replies in order and records every prompt
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn new(replies: &[&str]) -> Self {
        Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

impl ChatModel for ScriptedModel {
    async fn complete(&self, _system: &str, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| CareerForgeError::Llm("script exhausted".to_string()))
    }

    async fn transcribe(&self, audio: Vec<u8>, _file_name: &str) -> Result<String> {
        Ok(format!("{} bytes", audio.len()))
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}
