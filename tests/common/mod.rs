#![allow(dead_code)]

use reflect_daily_import::api::{ApiStatus, Graph, ImportRequest, ReflectApi};
use reflect_daily_import::ui::Prompter;
use reflect_daily_import::{ImportError, Result};
use std::cell::RefCell;
use std::collections::{HashMap, VecDeque};
use std::fs;
use std::path::Path;
use tempfile::TempDir;

/// In-memory stand-in for the Reflect API that records every call.
pub struct FakeApi {
    pub graphs: Vec<Graph>,
    pub listing_status: u16,
    /// Status per date for append calls; dates not listed answer 200.
    pub append_status: HashMap<String, u16>,
    pub list_calls: RefCell<usize>,
    pub appended: RefCell<Vec<(String, ImportRequest)>>,
}

impl FakeApi {
    pub fn with_graphs(ids: &[&str]) -> Self {
        FakeApi {
            graphs: ids
                .iter()
                .map(|id| Graph {
                    id: id.to_string(),
                    name: None,
                })
                .collect(),
            listing_status: 200,
            append_status: HashMap::new(),
            list_calls: RefCell::new(0),
            appended: RefCell::new(Vec::new()),
        }
    }

    pub fn appended_dates(&self) -> Vec<String> {
        self.appended
            .borrow()
            .iter()
            .map(|(_, req)| req.date.clone())
            .collect()
    }
}

fn status(code: u16) -> ApiStatus {
    ApiStatus::from(reqwest::StatusCode::from_u16(code).unwrap())
}

impl ReflectApi for FakeApi {
    fn list_graphs(&self) -> Result<Vec<Graph>> {
        *self.list_calls.borrow_mut() += 1;
        let st = status(self.listing_status);
        if !st.is_ok() {
            return Err(ImportError::GraphListing {
                status: st.code,
                status_text: st.text,
            });
        }
        Ok(self.graphs.clone())
    }

    fn append_daily_note(&self, graph_id: &str, req: &ImportRequest) -> Result<ApiStatus> {
        self.appended
            .borrow_mut()
            .push((graph_id.to_string(), req.clone()));
        let code = self.append_status.get(&req.date).copied().unwrap_or(200);
        Ok(status(code))
    }
}

/// Answers prompts from a script and remembers what it was asked.
#[derive(Default)]
pub struct ScriptedPrompter {
    pub answers: VecDeque<String>,
    pub asked: Vec<(String, Vec<String>)>,
}

impl ScriptedPrompter {
    pub fn answering(answers: &[&str]) -> Self {
        ScriptedPrompter {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            asked: Vec::new(),
        }
    }
}

impl Prompter for ScriptedPrompter {
    fn select(&mut self, message: &str, options: &[String]) -> Result<String> {
        self.asked.push((message.to_string(), options.to_vec()));
        self.answers
            .pop_front()
            .ok_or_else(|| ImportError::Prompt(format!("unexpected prompt: {message}")))
    }
}

/// Temporary notes directory populated with `(name, content)` files.
pub fn notes_dir(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (name, content) in files {
        fs::write(dir.path().join(name), content).unwrap();
    }
    dir
}

pub fn output_text(out: Vec<u8>) -> String {
    String::from_utf8(out).unwrap()
}

pub fn path_str(dir: &Path, name: &str) -> String {
    dir.join(name).display().to_string()
}
