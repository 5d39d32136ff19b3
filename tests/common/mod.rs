#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};
use secrecy::SecretString;
use serde_json::{json, Value};

use skill_quiz_server::{
    config::{Config, PipelineLimits},
    constants::prompts::AgentProfile,
    errors::{AppError, AppResult},
    services::language_model::LanguageModel,
};

pub const BOUNDARY: &str = "----skillquizboundary";

/// Canned replies in call order; records the persona and prompt of every call.
pub struct ScriptedModel {
    replies: Mutex<VecDeque<AppResult<String>>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedModel {
    pub fn new(replies: Vec<AppResult<String>>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            calls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, agent: &AgentProfile, instructions: &str) -> AppResult<String> {
        self.calls
            .lock()
            .unwrap()
            .push((agent.role.to_string(), instructions.to_string()));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(AppError::ModelError("no scripted reply left".into())))
    }
}

pub fn test_config(limits: PipelineLimits) -> Config {
    Config {
        web_server_host: "127.0.0.1".to_string(),
        web_server_port: 8000,
        openai_api_key: SecretString::from("sk-test".to_string()),
        openai_api_base: "http://localhost:1234/v1".to_string(),
        llm_model: "test-model".to_string(),
        llm_temperature: 0.0,
        limits,
    }
}

/// `{"<module>": ["<module> skill 1", ...]}` wrapped in a json fence.
pub fn skills_reply(modules: &[(&str, usize)]) -> String {
    let map: serde_json::Map<String, Value> = modules
        .iter()
        .map(|(module, count)| {
            let skills: Vec<String> = (1..=*count)
                .map(|i| format!("{} skill {}", module, i))
                .collect();
            (module.to_string(), json!(skills))
        })
        .collect();
    format!("```json\n{}\n```", Value::Object(map))
}

/// Bare JSON reply with `count` well-formed questions tagged `tag`.
pub fn mcq_reply(tag: &str, count: usize) -> String {
    let questions: Vec<Value> = (1..=count)
        .map(|i| {
            json!({
                "question": format!("{} question {}", tag, i),
                "answers": ["right", "wrong a", "wrong b", "wrong c"],
                "topic": tag,
                "difficulty": if i % 2 == 0 { "hard" } else { "Easy" },
            })
        })
        .collect();
    json!({ "mc_questions": questions }).to_string()
}

pub fn pdf_with_pages(pages: &[&str]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();
    let font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! { "F1" => font_id },
    });

    let mut kids: Vec<Object> = Vec::new();
    for text in pages {
        let content = Content {
            operations: vec![
                Operation::new("BT", vec![]),
                Operation::new("Tf", vec!["F1".into(), 18.into()]),
                Operation::new("Td", vec![72.into(), 720.into()]),
                Operation::new("Tj", vec![Object::string_literal(*text)]),
                Operation::new("ET", vec![]),
            ],
        };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).unwrap();
    bytes
}

/// A multipart/form-data body with one field per `(name, filename, bytes)`.
pub fn multipart_body(fields: &[(&str, &str, &[u8])]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, filename, bytes) in fields {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        body.extend_from_slice(
            format!(
                "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                name, filename
            )
            .as_bytes(),
        );
        body.extend_from_slice(b"Content-Type: application/pdf\r\n\r\n");
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn multipart_content_type() -> String {
    format!("multipart/form-data; boundary={}", BOUNDARY)
}
