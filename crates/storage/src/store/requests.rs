#![forbid(unsafe_code)]

use vc_core::model::{NewTag, TranslationData};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddWordRequest {
    pub original_text: String,
    pub source_language: String,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddTranslationRequest {
    pub word_id: i64,
    pub target_language: String,
    pub data: TranslationData,
    pub now_ms: i64,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AddTagsRequest {
    pub word_id: i64,
    pub tags: Vec<NewTag>,
    pub now_ms: i64,
}
